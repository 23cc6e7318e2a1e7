use chrono::Local;
use clap::Subcommand;
use sproutling_core::{Histogram, HistogramRange};

use crate::common::{open_engine, CliResult};

const BAR_WIDTH: u64 = 32;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today / week / month / total counts
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// ASCII chart of event counts
    Chart {
        /// Bucket range: day | week | month | year
        #[arg(long, default_value = "week")]
        range: String,
    },
    /// All-time count per habit
    Counts,
}

pub fn run(action: StatsAction) -> CliResult {
    let engine = open_engine();
    let now = Local::now();

    match action {
        StatsAction::Show { json } => {
            let stats = engine.stats(&now);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("today  {}", stats.today);
                println!("week   {}", stats.week);
                println!("month  {}", stats.month);
                println!("total  {}", stats.total);
            }
        }
        StatsAction::Chart { range } => {
            let range: HistogramRange = range.parse()?;
            let histogram = engine.histogram(range, &now);
            print_chart(&histogram);
        }
        StatsAction::Counts => {
            let counts = engine.per_habit_counts();
            for button in engine.list_habits() {
                let count = counts.get(&button.id).copied().unwrap_or(0);
                println!("{:>6}  {}", count, button.label);
            }
        }
    }
    Ok(())
}

fn print_chart(histogram: &Histogram) {
    let max = histogram.scale_max();
    for (i, &count) in histogram.buckets.iter().enumerate() {
        let bar = "█".repeat((count * BAR_WIDTH / max) as usize);
        println!("{:<4} {:>5} {}", bucket_label(histogram.range, i), count, bar);
    }
}

fn bucket_label(range: HistogramRange, index: usize) -> String {
    match range {
        HistogramRange::Day => format!("{index:02}h"),
        HistogramRange::Week => {
            const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
            DAYS.get(index).copied().unwrap_or("?").to_string()
        }
        HistogramRange::Month => format!("W{}", index + 1),
        HistogramRange::Year => {
            const MONTHS: [&str; 12] = [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
                "Dec",
            ];
            MONTHS.get(index).copied().unwrap_or("?").to_string()
        }
    }
}
