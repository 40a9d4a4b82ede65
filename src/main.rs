// SPDX-License-Identifier: MPL-2.0
//! `playback-sim`: drive a playback session from a script.
//!
//! ```text
//! playback-sim [--config PATH] [--source URL] [--auto-play] [SCRIPT]
//! ```
//!
//! Reads the script from SCRIPT, or from stdin when omitted, and prints the
//! decoder commands and session snapshot after every line.

use playback_session::config;
use playback_session::error::{Error, Result};
use playback_session::sim::{ScriptCommand, Simulator, StepReport};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct Flags {
    config: Option<PathBuf>,
    source: Option<String>,
    auto_play: bool,
    script: Option<PathBuf>,
}

fn parse_flags() -> Result<Flags> {
    let mut args = pico_args::Arguments::from_env();
    let arg_error = |e: pico_args::Error| Error::Config(e.to_string());

    let flags = Flags {
        config: args.opt_value_from_str("--config").map_err(arg_error)?,
        source: args.opt_value_from_str("--source").map_err(arg_error)?,
        auto_play: args.contains("--auto-play"),
        script: args
            .finish()
            .into_iter()
            .next()
            .map(PathBuf::from),
    };
    Ok(flags)
}

fn print_report(line: usize, report: &StepReport) {
    for command in &report.commands {
        println!("{line:>4} -> {command:?}");
    }
    if let Some(outcome) = report.outcome {
        println!("{line:>4} <- {outcome:?}");
    }
    match serde_json::to_string(&report.snapshot) {
        Ok(json) => println!("{line:>4}    {json}"),
        Err(err) => tracing::warn!(error = %err, "could not serialize snapshot"),
    }
}

fn run() -> Result<()> {
    let flags = parse_flags()?;

    let mut options = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if flags.source.is_some() {
        options.source = flags.source;
    }
    options.auto_play |= flags.auto_play;

    let reader: Box<dyn BufRead> = match &flags.script {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut simulator = Simulator::new(options);
    for command in simulator.take_commands() {
        println!("   0 -> {command:?}");
    }

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        if let Some(command) = ScriptCommand::parse(line_number, &line?)? {
            let report = simulator.apply(command);
            print_report(line_number, &report);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playback_session=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
