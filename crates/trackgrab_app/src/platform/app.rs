use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use trackgrab_core::RequestState;
use trackgrab_engine::{
    ensure_data_dir, Controller, FileStore, HistoryLedger, Navigator, ReqwestResolver,
    SystemClipboard, SystemNavigator,
};
use trackgrab_logging::{grab_error, grab_info, grab_warn, redact_secret};

use super::cli::{Cli, Command};
use super::config::AppConfig;
use super::logging::{self, LogDestination};
use super::navigate::PrintNavigator;
use super::render::{self, TerminalSink};

pub fn run_app() -> ExitCode {
    let cli = Cli::parse();

    let destination = match &cli.global.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    logging::initialize(destination, logging::level_for_verbosity(cli.global.verbose));

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            grab_error!("{:#}", err);
            eprintln!("trackgrab error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = AppConfig::from_args(&cli.global)?;
    ensure_data_dir(&config.data_dir)
        .with_context(|| format!("preparing data directory {}", config.data_dir.display()))?;

    match config.resolver.api_key.as_deref() {
        Some(key) => grab_info!("Using API key {}", redact_secret(key)),
        None => grab_warn!("No API key configured; the resolution service will reject requests"),
    }

    match cli.command.unwrap_or(Command::Session { no_open: false }) {
        Command::History => {
            let ledger = HistoryLedger::open(FileStore::new(&config.data_dir));
            print_lines(render::history_lines(ledger.entries()));
            Ok(ExitCode::SUCCESS)
        }
        Command::Download {
            url,
            paste,
            no_open,
        } => {
            let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
            let mut controller = build_controller(&config, no_open);
            let state = if paste {
                runtime.block_on(controller.submit_from_clipboard())
            } else {
                if let Some(url) = url {
                    controller.set_input(url);
                }
                runtime.block_on(controller.submit_current())
            };
            print_lines(render::outcome_lines(&controller.view()));
            Ok(match state {
                RequestState::Succeeded => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        Command::Session { no_open } => {
            let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
            let mut controller = build_controller(&config, no_open);
            run_session(&runtime, &mut controller)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_controller(config: &AppConfig, no_open: bool) -> Controller {
    let navigator: Box<dyn Navigator> = if no_open {
        Box::new(PrintNavigator)
    } else {
        Box::new(SystemNavigator::new())
    };
    Controller::new(
        Box::new(ReqwestResolver::new(config.resolver.clone())),
        Box::new(FileStore::new(&config.data_dir)),
        navigator,
        Box::new(SystemClipboard::new()),
    )
    .with_sink(Box::new(TerminalSink))
}

const SESSION_HELP: &str =
    "Paste a track URL and press Enter. Commands: :paste, :history, :help, :quit";

fn run_session(runtime: &tokio::runtime::Runtime, controller: &mut Controller) -> Result<()> {
    println!("{SESSION_HELP}");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading input")?;

        match line.trim() {
            ":quit" | ":q" => break,
            ":help" => println!("{SESSION_HELP}"),
            ":history" => print_lines(render::history_lines(controller.history())),
            ":paste" => {
                runtime.block_on(controller.submit_from_clipboard());
                finish_run(controller);
            }
            _ => {
                runtime.block_on(controller.submit(&line));
                finish_run(controller);
            }
        }
    }
    Ok(())
}

// Show the outcome, then fold back to idle for the next line.
fn finish_run(controller: &mut Controller) {
    print_lines(render::outcome_lines(&controller.view()));
    controller.dismiss();
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
