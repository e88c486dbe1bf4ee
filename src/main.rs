mod ui;

use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
};

use clap::{error::ErrorKind, ArgGroup, CommandFactory, Parser};
use cli_racer::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    game::{Command, Game},
    input::{map_key, KeyAction},
    language::{Corpus, FixedProvider, RandomProvider, WordProvider},
    menu::{Menu, MenuOutcome},
    runtime::{CrosstermEventSource, FixedTicker, RacerEvent, Runner},
    session::{Difficulty, Mode, Phase, SessionConfig},
};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};

/// terminal typing-speed trainer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a stream of words against the clock and see your words-per-minute and accuracy. Run without a mode flag to pick one from the menu."
)]
#[clap(group(ArgGroup::new("mode").required(false).args(["words", "time", "endless"])))]
pub struct Cli {
    /// word mode: number of words to type (1 to 10000)
    #[clap(short = 'w', long, value_parser = clap::value_parser!(u64).range(1..=10000))]
    words: Option<u64>,

    /// time mode: number of seconds to type for
    #[clap(short = 't', long, value_parser = clap::value_parser!(u64).range(1..))]
    time: Option<u64>,

    /// vibe mode: type endlessly until ENTER
    #[clap(short = 'e', long)]
    endless: bool,

    /// word difficulty
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// custom words to type instead of the built-in list
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// seed for reproducible word selection
    #[clap(long)]
    seed: Option<u64>,

    /// open the mode menu even when a mode flag is given
    #[clap(long)]
    menu: bool,
}

impl Cli {
    fn difficulty(&self, config: &Config) -> Difficulty {
        self.difficulty.unwrap_or(config.difficulty)
    }

    /// The session requested on the command line, if any.
    fn session_config(&self, config: &Config) -> Option<SessionConfig> {
        let mode = if let Some(words) = self.words {
            Mode::Words(words as usize)
        } else if let Some(secs) = self.time {
            Mode::Time(secs)
        } else if self.endless {
            Mode::Endless
        } else {
            return None;
        };
        Some(SessionConfig::new(mode, self.difficulty(config)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Menu,
    Game,
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    /// A fresh session was created; restart the tick cadence.
    NewSession,
    Quit,
}

pub struct App {
    pub state: AppState,
    pub menu: Menu,
    pub game: Option<Game>,
    config: Config,
    store: FileConfigStore,
    corpus: Corpus,
    prompt: Option<String>,
    seed: Option<u64>,
}

impl App {
    fn new(cli: &Cli, store: FileConfigStore, corpus: Corpus) -> Self {
        let config = store.load();
        let mut app = Self {
            state: AppState::Menu,
            menu: Menu::from_config(&config, cli.difficulty(&config)),
            game: None,
            config,
            store,
            corpus,
            prompt: cli.prompt.clone(),
            seed: cli.seed,
        };
        if !cli.menu {
            if let Some(session) = cli.session_config(&app.config) {
                app.start_game(session);
            }
        }
        app
    }

    fn provider(&self) -> Box<dyn WordProvider> {
        match (&self.prompt, self.seed) {
            (Some(prompt), _) => Box::new(FixedProvider::from_prompt(prompt)),
            (None, Some(seed)) => Box::new(RandomProvider::seeded(&self.corpus, seed)),
            (None, None) => Box::new(RandomProvider::new(&self.corpus)),
        }
    }

    fn start_game(&mut self, session: SessionConfig) {
        log::debug!("entering game: {session:?}");
        self.game = Some(Game::new(session, self.provider()));
        self.state = AppState::Game;
    }

    fn choose(&mut self, session: SessionConfig) {
        self.config.remember(&session);
        self.menu.remember(&session);
        if let Err(err) = self.store.save(&self.config) {
            log::warn!("could not save config to {}: {err}", self.store.path().display());
        }
        self.start_game(session);
    }

    fn back_to_menu(&mut self) {
        self.game = None;
        self.menu.reset();
        self.state = AppState::Menu;
    }

    /// Once per second: auto-start a waiting session, drive the countdown.
    fn on_tick(&mut self) {
        if let Some(game) = self.game.as_mut() {
            match game.phase() {
                Phase::NotStarted => game.apply(Command::Start),
                Phase::Playing => game.apply(Command::Tick),
                Phase::Finished => {}
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }
        match self.state {
            AppState::Menu => match self.menu.on_key(key) {
                MenuOutcome::Pending => Flow::Continue,
                MenuOutcome::Quit => Flow::Quit,
                MenuOutcome::Selected(session) => {
                    self.choose(session);
                    Flow::NewSession
                }
            },
            AppState::Game => {
                let action = match self.game.as_ref() {
                    Some(game) => map_key(key, game.phase(), game.config().mode),
                    None => KeyAction::Exit,
                };
                match action {
                    KeyAction::Game(command) => {
                        let restarting = command == Command::Restart;
                        if let Some(game) = self.game.as_mut() {
                            game.apply(command);
                        }
                        if restarting {
                            Flow::NewSession
                        } else {
                            Flow::Continue
                        }
                    }
                    KeyAction::Exit => {
                        self.back_to_menu();
                        Flow::Continue
                    }
                    KeyAction::Quit => Flow::Quit,
                    KeyAction::Ignore => Flow::Continue,
                }
            }
        }
    }
}

fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    // stdout and stderr belong to the terminal UI
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("RACER_LOG", "warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }
    if cli
        .prompt
        .as_deref()
        .is_some_and(|p| p.split_whitespace().next().is_none())
    {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::InvalidValue, "prompt must contain at least one word")
            .exit();
    }

    init_logging();
    let corpus = Corpus::embedded()?;
    let mut app = App::new(&cli, FileConfigStore::new(), corpus);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            RacerEvent::Tick => app.on_tick(),
            RacerEvent::Resize => {}
            RacerEvent::Key(key) => match app.on_key(key) {
                Flow::Continue => {}
                Flow::NewSession => runner.reset_ticks(),
                Flow::Quit => break,
            },
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    ui::screen::current_screen(&app.state).render(app, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    fn corpus() -> Corpus {
        Corpus::embedded().unwrap()
    }

    fn app_with(args: &[&str]) -> (App, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let cli = Cli::parse_from(args);
        (App::new(&cli, store, corpus()), dir)
    }

    fn press(app: &mut App, code: KeyCode) -> Flow {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["cli-racer"]);

        assert_eq!(cli.words, None);
        assert_eq!(cli.time, None);
        assert!(!cli.endless);
        assert_eq!(cli.prompt, None);
        assert!(cli.session_config(&Config::default()).is_none());
    }

    #[test]
    fn test_cli_words() {
        let cli = Cli::parse_from(["cli-racer", "-w", "25"]);
        assert_eq!(
            cli.session_config(&Config::default()).map(|s| s.mode),
            Some(Mode::Words(25))
        );

        let cli = Cli::parse_from(["cli-racer", "--words", "50"]);
        assert_eq!(cli.words, Some(50));
    }

    #[test]
    fn test_cli_words_out_of_range() {
        assert!(Cli::try_parse_from(["cli-racer", "-w", "0"]).is_err());
        assert!(Cli::try_parse_from(["cli-racer", "-w", "10001"]).is_err());
    }

    #[test]
    fn test_cli_time_and_difficulty() {
        let cli = Cli::parse_from(["cli-racer", "-t", "60", "-d", "programming"]);
        assert_eq!(
            cli.session_config(&Config::default()),
            Some(SessionConfig::new(Mode::Time(60), Difficulty::Programming))
        );
    }

    #[test]
    fn test_cli_modes_conflict() {
        assert!(Cli::try_parse_from(["cli-racer", "-w", "10", "-t", "10"]).is_err());
        assert!(Cli::try_parse_from(["cli-racer", "-e", "-t", "10"]).is_err());
    }

    #[test]
    fn test_cli_endless() {
        let cli = Cli::parse_from(["cli-racer", "--endless"]);
        assert_eq!(
            cli.session_config(&Config::default()).map(|s| s.mode),
            Some(Mode::Endless)
        );
    }

    #[test]
    fn test_app_without_mode_opens_menu() {
        let (app, _dir) = app_with(&["cli-racer"]);
        assert_eq!(app.state, AppState::Menu);
        assert!(app.game.is_none());
    }

    #[test]
    fn test_menu_flag_wins_over_mode() {
        let (app, _dir) = app_with(&["cli-racer", "-w", "10", "--menu"]);
        assert_eq!(app.state, AppState::Menu);
    }

    #[test]
    fn test_prompt_session_plays_through() {
        let (mut app, _dir) = app_with(&["cli-racer", "-w", "1", "-p", "cat"]);
        assert_eq!(app.state, AppState::Game);

        // keys before the first tick are ignored
        assert_eq!(press(&mut app, KeyCode::Char('c')), Flow::Continue);
        app.on_tick();
        for c in "cat ".chars() {
            press(&mut app, KeyCode::Char(c));
        }

        let session = app.game.as_ref().unwrap().session();
        assert!(session.is_finished);
        assert_eq!(session.stats.correct_words, 1);

        assert_eq!(press(&mut app, KeyCode::Tab), Flow::NewSession);
        assert_eq!(app.game.as_ref().unwrap().phase(), Phase::NotStarted);
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let (mut app, _dir) = app_with(&["cli-racer", "-e"]);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Menu);
        assert!(app.game.is_none());
    }

    #[test]
    fn test_menu_selection_saves_config() {
        let (mut app, dir) = app_with(&["cli-racer"]);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(press(&mut app, KeyCode::Enter), Flow::NewSession);

        assert_eq!(app.state, AppState::Game);
        let saved = FileConfigStore::with_path(dir.path().join("config.json")).load();
        assert_eq!(saved.session_config().mode, Mode::Time(30));
    }

    #[test]
    fn test_saved_choice_is_preselected_next_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.remember(&SessionConfig::new(Mode::Time(60), Difficulty::Hard));
        FileConfigStore::with_path(&path).save(&config).unwrap();

        let cli = Cli::parse_from(["cli-racer"]);
        let mut app = App::new(&cli, FileConfigStore::with_path(&path), corpus());
        assert_eq!(app.state, AppState::Menu);
        assert_eq!(app.menu.difficulty, Difficulty::Hard);

        press(&mut app, KeyCode::Enter);
        assert_eq!(press(&mut app, KeyCode::Enter), Flow::NewSession);
        assert_eq!(
            app.game.as_ref().unwrap().config(),
            &SessionConfig::new(Mode::Time(60), Difficulty::Hard)
        );
    }

    #[test]
    fn test_menu_reopens_on_last_choice() {
        let (mut app, _dir) = app_with(&["cli-racer"]);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.state, AppState::Menu);
        assert_eq!(app.menu.selected, 2);
    }

    #[test]
    fn test_seeded_sessions_repeat() {
        let (a, _d1) = app_with(&["cli-racer", "-w", "10", "--seed", "9"]);
        let (b, _d2) = app_with(&["cli-racer", "-w", "10", "--seed", "9"]);
        let words = |app: &App| {
            app.game
                .as_ref()
                .unwrap()
                .session()
                .words
                .iter()
                .map(|w| w.text.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(words(&a), words(&b));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let (mut app, _dir) = app_with(&["cli-racer"]);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.on_key(ctrl_c), Flow::Quit);
    }
}
