pub mod config;
pub mod habit;
pub mod note;
pub mod settings;
pub mod state;
pub mod stats;
pub mod tap;
