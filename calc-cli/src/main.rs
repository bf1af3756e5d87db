//! Keystroke Calculator CLI Application
//!
//! This is the terminal adapter for the calc-engine library. It adds:
//! - Key name translation (`{Enter}`, `{Backspace}`, ...)
//! - An interactive line-by-line mode
//! - Session persistence between invocations (JSON)
//! - Text/JSON rendering of the display

use anyhow::{Context, Result};
use calc_engine::{Calculator, Session};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

mod config;
mod keys;
mod report;
mod state;

use config::{AppConfig, OutputFormat};
use keys::KeyMap;

/// Typed line that ends the interactive mode
const QUIT_COMMAND: &str = ":quit";

/// Keystroke Calculator - feed calculator keys, print the display
#[derive(Parser, Debug)]
#[command(name = "calc-cli")]
#[command(
    about = "Validate and evaluate calculator input one keystroke at a time",
    long_about = None
)]
#[command(version)]
struct Args {
    /// Input bursts, processed in order (interactive mode if omitted).
    /// Put `--` before input that starts with `-`
    #[arg(value_name = "KEYS")]
    inputs: Vec<String>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Session file to resume from and save to
    #[arg(short, long, value_name = "FILE")]
    state: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Show machine states next to the expression
    #[arg(long)]
    show_state: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

/// Everything a run needs besides the session
struct Runner {
    calculator: Calculator,
    keys: KeyMap,
    format: OutputFormat,
    show_state: bool,
}

impl Runner {
    fn feed(&self, line: &str, session: Session) -> Result<Session> {
        let input = self
            .keys
            .translate(line)
            .with_context(|| format!("Invalid input: {:?}", line))?;
        log::debug!("Feeding {:?}", input);
        Ok(self.calculator.step(&input, session))
    }

    fn render(&self, session: &Session) -> String {
        report::render(session, self.format, self.show_state)
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Keystroke Calculator CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using engine library v{}", calc_engine::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    let runner = Runner {
        calculator: Calculator::with_config(&app_config.calculator_config())
            .context("Invalid calculator configuration")?,
        keys: app_config.key_map(),
        format: args.format.unwrap_or(app_config.output.format),
        show_state: args.show_state || app_config.output.show_state,
    };

    let session = match &args.state {
        Some(path) => state::load_session(path)?,
        None => Session::new(),
    };

    let session = if args.inputs.is_empty() {
        interactive_mode(&runner, session)?
    } else {
        batch_mode(&runner, &args.inputs, session)?
    };

    if let Some(path) = &args.state {
        state::save_session(path, &session)?;
    }

    Ok(())
}

/// Batch mode - feed every argument, print the final display
fn batch_mode(runner: &Runner, inputs: &[String], mut session: Session) -> Result<Session> {
    for input in inputs {
        session = runner.feed(input, session)?;
    }
    println!("{}", runner.render(&session));
    Ok(session)
}

/// Interactive mode - one burst per stdin line, display printed after each
fn interactive_mode(runner: &Runner, mut session: Session) -> Result<Session> {
    log::info!(
        "Interactive mode: type keys, {} to exit. Named keys: {}",
        QUIT_COMMAND,
        runner
            .keys
            .names()
            .map(|name| format!("{{{}}}", name))
            .collect::<Vec<_>>()
            .join(" ")
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let line = line.trim_end();
        if line == QUIT_COMMAND {
            break;
        }

        match runner.feed(line, session.clone()) {
            Ok(next) => session = next,
            Err(e) => {
                eprintln!("{:#}", e);
                continue;
            }
        }

        writeln!(stdout, "{}", runner.render(&session))?;
        stdout.flush()?;
    }

    Ok(session)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
