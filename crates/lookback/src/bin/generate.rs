//! Lookback window generation CLI tool.
//!
//! Reads a session table and windowing parameters, generates labeled windows
//! for every user, and prints per-user counts and the overall label rate.
//!
//! Usage: `lookback-generate --sessions FILE.csv --params FILE.json [--threads N] [--collect-errors]`
//!
//! The session CSV needs `user_id`, `session_id`, `visit_start_time` and
//! `last_hit_time` columns, plus an optional `positive_label_time`, with
//! instants in epoch milliseconds.

use std::{env, fs::File, io::BufReader, path::PathBuf, process};

use lookback::{
    observability::{init_logging, log_run_start, logging_config_from_env},
    utils::{label_rate, sessions_from_frame, windows_to_frame},
    windows::{BatchConfig, BatchOutput, BatchProcessor, ErrorMode, WindowGenerator, WindowingParams},
};
use polars::prelude::*;

/// Command line arguments.
struct Args {
    sessions: PathBuf,
    params: PathBuf,
    threads: Option<usize>,
    collect_errors: bool,
}

fn main() {
    let Some(args) = parse_args(&env::args().collect::<Vec<_>>()) else {
        eprintln!(
            "Usage: lookback-generate --sessions FILE.csv --params FILE.json [--threads N] [--collect-errors]"
        );
        process::exit(2);
    };

    let logging = logging_config_from_env();
    if let Err(e) = init_logging(&logging) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
    log_run_start(&logging, &args.sessions.display().to_string(), &args.params.display().to_string());

    match run(&args) {
        Ok(output) => print_summary(&output),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut sessions = None;
    let mut params = None;
    let mut threads = None;
    let mut collect_errors = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--sessions" => sessions = iter.next().map(PathBuf::from),
            "--params" => params = iter.next().map(PathBuf::from),
            "--threads" => threads = Some(iter.next()?.parse::<usize>().ok()?),
            "--collect-errors" => collect_errors = true,
            _ => return None,
        }
    }

    Some(Args { sessions: sessions?, params: params?, threads, collect_errors })
}

fn run(args: &Args) -> Result<BatchOutput, Box<dyn std::error::Error>> {
    let params: WindowingParams = serde_json::from_reader(BufReader::new(File::open(&args.params)?))?;
    let (config, placement) = params.resolve()?;
    let generator = WindowGenerator::new(config, placement)?;

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(args.sessions.clone()))?
        .finish()?;
    let sessions = sessions_from_frame(frame.lazy())?;

    let mut batch = BatchConfig::new();
    if let Some(threads) = args.threads {
        batch = batch.with_threads(threads);
    }
    if args.collect_errors {
        batch = batch.with_error_mode(ErrorMode::CollectErrors);
    }

    Ok(BatchProcessor::new(generator, batch).process(&sessions)?)
}

fn print_summary(output: &BatchOutput) {
    println!("{:<24} {:>10} {:>10}", "user", "windows", "positive");
    println!("{}", "-".repeat(46));
    for user in &output.users {
        let positives = user.windows.iter().filter(|w| w.prediction_label).count();
        println!("{:<24} {:>10} {:>10}", user.user_id, user.windows.len(), positives);
    }
    for failure in &output.failures {
        println!("{:<24} {:>10}", failure.user_id, "failed");
        eprintln!("  {}", failure.error);
    }
    println!("{}", "-".repeat(46));

    let windows: Vec<_> = output.users.iter().flat_map(|u| u.windows.iter().cloned()).collect();
    match windows_to_frame(&windows).and_then(|df| label_rate(&df)) {
        Ok(rate) => println!(
            "{} users, {} windows, label rate {:.4} ({} ms)",
            output.user_count(),
            output.window_count(),
            rate,
            output.elapsed.as_millis()
        ),
        Err(e) => eprintln!("Error: {e}"),
    }
}
