use std::{fs::File, io::stdout, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{Config, LevelFilter, WriteLogger};

use daltonview::app::{App, run_app_with_event_source};
use daltonview::event_source::KeyboardEventSource;
use daltonview::panic_handler;
use daltonview::settings::Settings;

/// Name of the bundled sample shown when no file is given.
const DEFAULT_DOCUMENT: &str = "sample.pdf";

#[derive(Parser, Debug)]
#[command(name = "daltonview", version, about)]
struct Cli {
    /// PDF file to preview (defaults to sample.pdf in the working directory)
    file: Option<PathBuf>,

    /// Initial page size in pixels, overriding settings
    #[arg(long)]
    size: Option<u32>,

    /// Log file location
    #[arg(long, default_value = "daltonview.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    WriteLogger::init(
        LevelFilter::Debug,
        Config::default(),
        File::create(&cli.log_file)?,
    )?;
    info!("starting daltonview");

    panic_handler::initialize_panic_handler();

    let mut settings = Settings::load();
    let doc_path = cli.file.unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT));

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(doc_path, &settings, cli.size);
    let mut events = KeyboardEventSource;
    let res = run_app_with_event_source(&mut terminal, &mut app, &mut events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Remember the size the user settled on for the next session.
    if settings.page_size != app.current_size() {
        settings.page_size = app.current_size();
        if let Err(e) = settings.save() {
            warn!("failed to save settings: {e}");
        }
    }

    if let Err(err) = res {
        error!("application error: {err:?}");
        eprintln!("{err:?}");
    }

    info!("shutting down");
    Ok(())
}
