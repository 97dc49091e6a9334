mod app;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod logging;
mod nav;
mod output;
mod plan;
mod selection;
mod tui;
mod ui;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, error, info};

use crate::app::App;
use crate::config::{AppConfig, GeneralConfig, PickerOptions};
use crate::event::Event;
use crate::fs::scanner::Identity;
use crate::tui::{install_panic_hook, Tui};

/// Interactive terminal file/directory picker. Prints the chosen paths on exit.
#[derive(Parser, Debug)]
#[command(name = "file-picker", version, about)]
struct Cli {
    /// Colon-separated list of preselected paths
    #[arg(short = 'p', long = "pre-selected", value_name = "PATHS")]
    preselected: Option<String>,

    /// Directory the picker starts in (defaults to the home directory)
    #[arg(short, long, value_name = "DIR")]
    start_dir: Option<PathBuf>,

    /// Lowest directory the user may navigate back to
    #[arg(short, long, value_name = "DIR")]
    lowest_dir: Option<PathBuf>,

    /// Write results to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Flags as the highest-priority config layer.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                start_dir: self.start_dir.clone(),
                lowest_dir: self.lowest_dir.clone(),
                preselected: self.preselected.clone(),
                output: self.output.clone(),
            },
            ..Default::default()
        }
    }
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));
    let log_path = logging::init(&config);
    let options = PickerOptions::resolve(&config)?;
    debug!(?options, ?log_path, "resolved options");

    let mut app = App::new(&options, Identity::current())?;

    install_panic_hook();
    let mut tui = Tui::new()?;
    let result = run(&mut tui, &mut app);
    let restored = tui.restore();
    settle(result, restored)?;

    let selected = app.into_selection();
    info!(count = selected.len(), "selection finished");
    output::write_selection(&selected, options.output.as_deref(), io::stdout().lock())?;
    Ok(())
}

/// Draw, wait for a key, apply it; until the user quits.
fn run(tui: &mut Tui, app: &mut App) -> error::Result<()> {
    loop {
        let capacity = plan::viewport_capacity(tui.rows()?);
        app.nav.fit_viewport(capacity);
        let frame_plan = plan::plan_frame(app, capacity);
        tui.terminal_mut()
            .draw(|frame| ui::render(&frame_plan, frame))?;

        match event::next()? {
            Event::Key(key) => handler::handle_key_event(app, key, capacity),
            Event::Resize(_, rows) => debug!(rows, "terminal resized"),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Outcome of the session once the terminal is back. A loop error wins over
/// a restore error, which is then only logged.
fn settle(run: error::Result<()>, restored: error::Result<()>) -> error::Result<()> {
    match (run, restored) {
        (Err(e), Err(restore_err)) => {
            error!(error = %restore_err, "terminal restore failed");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), restored) => restored,
    }
}
