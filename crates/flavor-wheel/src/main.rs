use clap::Parser;
use cupping::config;
use cupping::language::Language;
use cupping::persist::{self, SessionFile};
use cupping::store::SessionStore;
use cupping::taxonomy::Taxonomy;
use flavor_wheel::app::WheelApp;
use flavor_wheel::sys::clock::FrameClock;
use flavor_wheel::sys::runtime::BackgroundServices;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Duration;

/// Drives the descriptor wheel from pointer events read on stdin and tags the
/// current session's coffees with the descriptor under the indicator.
#[derive(Parser, Debug)]
#[command(name = "flavor-wheel", version, about, long_about = None)]
struct Cli {
    /// Session file to tag (defaults to the configured session path)
    #[arg(short = 's', long)]
    session: Option<PathBuf>,

    /// Label language: fr, en or es (defaults to the configured language)
    #[arg(short = 'l', long)]
    lang: Option<Language>,

    /// Do not reload settings when the config file changes
    #[arg(long)]
    no_watch: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = config::write_default_config() {
        log::warn!("Could not write default config: {}", e);
    }
    let mut config = config::load_or_default();
    if let Some(lang) = cli.lang {
        config.language = lang;
    }

    let file = SessionFile::new(match cli.session {
        Some(path) => path,
        None => config.session_path()?,
    });
    let session = file.load_or_new();
    persist::warn_unknown_descriptors(&session, Taxonomy::builtin());

    let (tx, rx) = async_channel::bounded(64);
    let services = BackgroundServices::start(tx.clone(), !cli.no_watch)?;
    let clock = FrameClock::spawn(
        services.handle(),
        Duration::from_millis(config.wheel.frame_interval_ms),
        tx,
    );

    let mut app = WheelApp::new(SessionStore::new(session), file, clock, &config)?;
    report(&app);

    while let Ok(event) = rx.recv_blocking() {
        match app.handle(event) {
            ControlFlow::Continue(action) if action.selection_changed => report(&app),
            ControlFlow::Continue(_) => {}
            ControlFlow::Break(()) => break,
        }
    }

    services.shutdown();
    Ok(())
}

fn report<S, K>(app: &WheelApp<S, K>)
where
    S: flavor_wheel::sys::clock::FrameScheduler,
    K: cupping::persist::SessionSink,
{
    match app.model().active_sector() {
        Some(sector) => println!("{} ({})", sector.label, sector.category_label),
        None => println!("-"),
    }
}
