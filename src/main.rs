// algotrace: step-by-step algorithm traces in the terminal

use std::io;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use algotrace::config::{Args, ViewerConfig};
use algotrace::generate;
use algotrace::input::{DemoInputs, Input};
use algotrace::step::Trace;
use algotrace::ui::App;

/// Everything needed to reproduce a trace, as printed by `--json`
#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    input: &'a Input,
    target: Option<i64>,
    trace: &'a Trace,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never mix with --json output or the TUI
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match ViewerConfig::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let mut demo = DemoInputs::new(config.seed);
    let (input, target) = match config.build_input(&mut demo) {
        Ok(built) => built,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let trace = generate(config.algorithm, &input, target);
    info!(
        algorithm = %config.algorithm,
        seed = config.seed,
        steps = trace.len(),
        "trace ready"
    );

    if config.json {
        let report = Report {
            seed: config.seed,
            input: &input,
            target,
            trace: &trace,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(config, demo, input, trace);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
