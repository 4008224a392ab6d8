use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ziwei_base::{
    BirthInput, Branch, Gender, hour_window_start, resolve_hour_branch, resolve_year_stem_branch,
};
use ziwei_chart::{
    ChartConfig, ChartLayer, LeapMonthPolicy, assemble_chart_with, calculate_chart_json,
};
use ziwei_rules::{
    ConsensusLevel, RuleMatchResult, evaluate, filter_by_consensus, filter_by_dimension,
    load_rules, rank_matches, summarize,
};

#[derive(Parser)]
#[command(name = "ziwei", about = "Ziwei Doushu chart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct BirthArgs {
    /// Birth year of the sexagenary cycle (e.g. 1984)
    #[arg(long)]
    year: i32,
    /// Lunar month (1-12)
    #[arg(long)]
    month: u8,
    /// Lunar day (1-30)
    #[arg(long)]
    day: u8,
    /// Double-hour branch (亥, hai) or clock hour (0-23)
    #[arg(long)]
    hour: String,
    /// Born in an intercalary month
    #[arg(long)]
    leap: bool,
    /// Gender: male/female, M/F, 男/女
    #[arg(long, default_value = "male")]
    gender: String,
    /// Count days 16-30 of a leap month as the following month
    #[arg(long)]
    split_leap: bool,
    /// Skip 天刑, 天姚, 三台, 八座, 紅鸞, 天喜
    #[arg(long)]
    no_minor: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sexagenary stem-branch of a year
    Year {
        year: i32,
    },
    /// Double-hour branch of a clock hour
    Hour {
        /// Clock hour (0-23)
        hour: u8,
    },
    /// Assemble a chart and print it as JSON
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Evaluate a rule knowledge base against a chart
    Evaluate {
        #[command(flatten)]
        birth: BirthArgs,
        /// Path to the rule JSON file
        #[arg(long)]
        rules: PathBuf,
        /// Consensus level: high (default), consensus, all
        #[arg(long, default_value = "high")]
        consensus: String,
        /// Keep only these dimensions (repeatable)
        #[arg(long)]
        dimension: Vec<String>,
        /// Include unmatched rules
        #[arg(long)]
        all: bool,
        /// Print a summary instead of individual results
        #[arg(long)]
        summary: bool,
    },
    /// Run a JSON chart request from a file
    Request {
        file: PathBuf,
        /// Count days 16-30 of a leap month as the following month
        #[arg(long)]
        split_leap: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Year { year } => {
            let sb = resolve_year_stem_branch(year).unwrap_or_else(|e| fail(&e));
            println!(
                "{year}: {sb} ({}-{}), cycle index {}",
                sb.stem().pinyin(),
                sb.branch().pinyin(),
                sb.cycle_index()
            );
        }

        Commands::Hour { hour } => {
            let branch = resolve_hour_branch(hour).unwrap_or_else(|e| fail(&e));
            let start = hour_window_start(branch);
            println!(
                "{hour:02}:00 -> {branch} ({}), {start:02}:00-{:02}:59",
                branch.pinyin(),
                (start + 1) % 24
            );
        }

        Commands::Chart { birth } => {
            let chart = build_chart(&birth);
            print_json(&chart);
        }

        Commands::Evaluate {
            birth,
            rules,
            consensus,
            dimension,
            all,
            summary,
        } => {
            let chart = build_chart(&birth);
            let text = std::fs::read_to_string(&rules).unwrap_or_else(|e| {
                eprintln!("Failed to read {}: {e}", rules.display());
                std::process::exit(1);
            });
            let set = load_rules(&text).unwrap_or_else(|e| fail(&e));
            for rejected in &set.rejected {
                eprintln!("Skipped rule #{}: {}", rejected.index, rejected.error);
            }

            let results = select_results(
                evaluate(&chart, &set),
                ConsensusLevel::parse_lenient(&consensus),
                &dimension,
            );
            if summary {
                print_json(&summarize(&results));
                return;
            }
            let results = if all { results } else { rank_matches(results) };
            print_json(&results);
        }

        Commands::Request { file, split_leap } => {
            let body = std::fs::read_to_string(&file).unwrap_or_else(|e| {
                eprintln!("Failed to read {}: {e}", file.display());
                std::process::exit(1);
            });
            let config = ChartConfig {
                leap_month: leap_policy(split_leap),
                ..ChartConfig::default()
            };
            let response = calculate_chart_json(&body, &config);
            print_json(&response);
            if !response.success {
                std::process::exit(1);
            }
        }
    }
}

fn fail(e: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

fn leap_policy(split: bool) -> LeapMonthPolicy {
    if split {
        LeapMonthPolicy::SplitAtMidMonth
    } else {
        LeapMonthPolicy::SameMonth
    }
}

fn parse_hour(s: &str) -> Branch {
    let s = s.trim();
    let parsed = match s.parse::<u8>() {
        Ok(hour) => resolve_hour_branch(hour),
        Err(_) => s.parse::<Branch>(),
    };
    parsed.unwrap_or_else(|e| {
        eprintln!("Invalid hour: {e}");
        eprintln!("Valid: 0-23, or a branch such as 子, zi, 亥, hai");
        std::process::exit(1);
    })
}

fn build_chart(args: &BirthArgs) -> ChartLayer {
    let gender: Gender = args.gender.parse().unwrap_or_else(|e| fail(&e));
    let birth = BirthInput::new(args.year, args.month, args.day, parse_hour(&args.hour), gender)
        .unwrap_or_else(|e| fail(&e))
        .with_leap_month(args.leap);
    let config = ChartConfig {
        leap_month: leap_policy(args.split_leap),
        include_minor_stars: !args.no_minor,
        ..ChartConfig::default()
    };
    assemble_chart_with(&birth, &config).unwrap_or_else(|e| fail(&e))
}

/// Consensus and dimension filters, applied before ranking or summarizing.
fn select_results(
    results: Vec<RuleMatchResult>,
    level: ConsensusLevel,
    dimensions: &[String],
) -> Vec<RuleMatchResult> {
    filter_by_dimension(filter_by_consensus(results, level), dimensions)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(&e),
    }
}
