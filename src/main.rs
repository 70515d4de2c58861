use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use spellright::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    profile::Profile,
    runtime::{AppEvent, CrosstermEventSource, Runner},
    store::SqliteStore,
    ui,
    word_bank::{DifficultyFilter, WordBank},
};

/// spelling drills in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Short spelling drills with streaks, XP levels and weekly progress, kept in a local profile."
)]
pub struct Cli {
    /// number of words per drill
    #[clap(short = 'w', long = "words")]
    words_per_session: Option<usize>,

    /// difficulty for this run (overrides the saved setting)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<DifficultyFilter>,

    /// path to the profile database
    #[clap(long = "db")]
    db_path: Option<PathBuf>,

    /// wipe the saved profile and start over
    #[clap(long)]
    reset: bool,

    /// disable the terminal bell
    #[clap(long)]
    no_sound: bool,
}

impl Cli {
    fn apply_to(&self, config: &mut Config) -> bool {
        let before = config.clone();
        if let Some(n) = self.words_per_session {
            config.words_per_session = n.max(1);
        }
        if let Some(path) = &self.db_path {
            config.db_path = Some(path.clone());
        }
        if self.no_sound {
            config.sound_enabled = false;
        }
        *config != before
    }
}

fn open_store(config: &Config) -> spellright::Result<SqliteStore> {
    match &config.db_path {
        Some(path) => SqliteStore::open(path),
        None => SqliteStore::open_default(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init(AppDirs::log_path().as_deref())?;

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    if cli.apply_to(&mut config) {
        if let Err(e) = config_store.save(&config) {
            warn!("could not save config to {}: {e}", config_store.path().display());
        }
    }

    let mut profile = Profile::open(Box::new(open_store(&config)?))?;
    if cli.reset {
        info!("resetting profile");
        profile.reset()?;
    }
    let bank = WordBank::english()?;

    let app = App::new(profile, bank, config).with_difficulty_override(cli.difficulty);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.handle_event(AppEvent::Resize(size.width, size.height));

    let runner = Runner::with_default_tick(CrosstermEventSource::new());
    info!("session started");

    loop {
        terminal.draw(|f| ui::draw(&app, f))?;
        app.handle_event(runner.step());
        if app.should_quit {
            break;
        }
    }

    info!("session ended");
    Ok(())
}
