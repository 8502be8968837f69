use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::LevelFilter;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use wordquiz::app::{App, AppScreen, Panel, STORAGE_WARNING};
use wordquiz::config::Config;
use wordquiz::engine::difficulty::{ALL_DIFFICULTIES, Difficulty};
use wordquiz::event::{AppEvent, EventHandler, spawn_file_reader};
use wordquiz::narration::{CommandNarrator, Narrator, SilentNarrator};
use wordquiz::store::json_store::{JsonStore, default_data_dir};
use wordquiz::store::{MemoryStore, Persistence};
use wordquiz::ui::components::file_manager::FileManager;
use wordquiz::ui::components::header::Header;
use wordquiz::ui::components::question_card::QuestionCard;
use wordquiz::ui::components::settings_panel::SettingsPanel;
use wordquiz::ui::components::stop_confirm::StopConfirm;
use wordquiz::ui::components::timer_bar::TimerBar;
use wordquiz::ui::components::upload_panel::UploadPanel;
use wordquiz::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use wordquiz::ui::path_input::InputResult;
use wordquiz::ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "wordquiz",
    version,
    about = "Terminal vocabulary quiz with timed multiple-choice translations"
)]
struct Cli {
    #[arg(short, long, help = "Difficulty (easy, medium, hard)")]
    difficulty: Option<Difficulty>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, conflicts_with = "sample", help = "Word list to load at start")]
    file: Option<PathBuf>,

    #[arg(long, help = "Start with the bundled sample word list")]
    sample: bool,

    #[arg(long, help = "Do not speak prompts aloud")]
    no_speech: bool,

    #[arg(long, help = "Directory for progress, saved lists and the log file")]
    data_dir: Option<PathBuf>,

    #[arg(
        long,
        default_value = "info",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"],
        help = "Log level"
    )]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("warning: ignoring unreadable config: {e}");
        Config::default()
    });

    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.data_dir())
        .unwrap_or_else(default_data_dir);
    let level = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    if let Err(e) = init_logging(&data_dir, level) {
        eprintln!("warning: logging disabled: {e}");
    }

    if !Config::config_path().exists() {
        if let Err(e) = config.save() {
            log::warn!("cannot write default config: {e}");
        }
    }

    if let Some(theme_name) = cli.theme {
        config.theme = theme_name;
    }
    config.normalize_theme(&Theme::available_themes());
    let theme = Theme::load(&config.theme).unwrap_or_default();

    let (store, degraded): (Box<dyn Persistence>, bool) =
        match JsonStore::with_base_dir(data_dir.clone()) {
            Ok(store) => (Box::new(store), false),
            Err(e) => {
                log::warn!("falling back to in-memory storage: {e:#}");
                (Box::new(MemoryStore::new()), true)
            }
        };

    let narrator: Box<dyn Narrator> = if cli.no_speech || !config.speech_enabled {
        Box::new(SilentNarrator)
    } else {
        Box::new(CommandNarrator::new(
            &config.speech_command,
            &config.speech_args,
        ))
    };

    let mut app = App::new(config, theme, store, narrator, SmallRng::from_entropy());
    let now = Instant::now();
    if degraded {
        app.storage_degraded = true;
        app.set_status(STORAGE_WARNING, true, now);
    }
    if let Some(difficulty) = cli.difficulty {
        app.change_difficulty(difficulty, now);
    }

    let events = EventHandler::new(Duration::from_millis(100));

    if cli.sample {
        app.load_sample(now);
    } else if let Some(path) = cli.file {
        app.path_input.set_value(&path.to_string_lossy());
        if let Some(path) = app.begin_upload(now) {
            spawn_file_reader(path, events.sender());
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("{err:?}");
        eprintln!("Error: {err:?}");
    }
    log::info!("exiting with {} points", app.engine.points());

    Ok(())
}

/// Send log output to `<data_dir>/wordquiz.log` so it never lands on the
/// alternate screen.
fn init_logging(data_dir: &Path, level: LevelFilter) -> Result<()> {
    fs::create_dir_all(data_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("wordquiz.log"))?;

    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key, events),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
            AppEvent::WordsLoaded { name, result } => {
                app.finish_upload(name, result, Instant::now())
            }
        }
        // Timers run after every event so steady typing cannot starve them.
        app.on_tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, events: &EventHandler) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    let now = Instant::now();
    if let Some(panel) = app.panel {
        match panel {
            Panel::Settings => handle_settings_key(app, key, now),
            Panel::FileManager => handle_file_manager_key(app, key, now),
            Panel::StopConfirm => handle_stop_key(app, key),
        }
        return;
    }

    match app.screen() {
        AppScreen::Upload => handle_upload_key(app, key, events, now),
        AppScreen::Quiz => handle_quiz_key(app, key, now),
    }
}

fn handle_upload_key(app: &mut App, key: KeyEvent, events: &EventHandler, now: Instant) {
    if app.editing_path {
        match app.path_input.handle(key) {
            InputResult::Submit => {
                if let Some(path) = app.begin_upload(now) {
                    spawn_file_reader(path, events.sender());
                }
            }
            InputResult::Cancel => app.editing_path = false,
            InputResult::Continue => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('o') | KeyCode::Enter => app.editing_path = true,
        KeyCode::Char('r') => app.restart(now),
        KeyCode::Char('e') => app.load_sample(now),
        KeyCode::Char('f') => app.open_panel(Panel::FileManager),
        KeyCode::Char('c') => app.open_panel(Panel::Settings),
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char(ch @ '1'..='6') => {
            let index = ch as usize - '1' as usize;
            app.answer(index, now);
        }
        KeyCode::Left | KeyCode::Up | KeyCode::Char('k') => app.select_prev_option(),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter => app.answer_selected(now),
        KeyCode::Char('s') => app.replay_prompt(),
        KeyCode::Char('w') => app.save_current(now),
        KeyCode::Char('c') => app.open_panel(Panel::Settings),
        KeyCode::Char('f') => app.open_panel(Panel::FileManager),
        KeyCode::Char('x') | KeyCode::Esc => app.request_stop(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent, now: Instant) {
    let count = ALL_DIFFICULTIES.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_panel(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = (app.settings_selected + count - 1) % count;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.settings_selected = (app.settings_selected + 1) % count;
        }
        KeyCode::Enter => {
            let difficulty = ALL_DIFFICULTIES[app.settings_selected.min(count - 1)];
            app.change_difficulty(difficulty, now);
        }
        _ => {}
    }
}

fn handle_file_manager_key(app: &mut App, key: KeyEvent, now: Instant) {
    let count = app.saved_files.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_panel(),
        KeyCode::Up | KeyCode::Char('k') if count > 0 => {
            app.file_selected = (app.file_selected + count - 1) % count;
        }
        KeyCode::Down | KeyCode::Char('j') if count > 0 => {
            app.file_selected = (app.file_selected + 1) % count;
        }
        KeyCode::Enter => app.load_saved(app.file_selected, now),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_saved(app.file_selected, now),
        _ => {}
    }
}

fn handle_stop_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => app.confirm_stop(),
        KeyCode::Char('n') | KeyCode::Esc => app.close_panel(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()).fg(colors.fg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    let header = Header::new(
        app.engine.points(),
        app.engine.streak(),
        app.engine.difficulty(),
        &app.theme,
    )
    .file_name(app.current_file.as_deref());
    frame.render_widget(header, layout.header);

    match app.screen() {
        AppScreen::Upload => render_upload(frame, app, layout.main),
        AppScreen::Quiz => render_quiz(frame, app, layout.main),
    }

    render_footer(frame, app, layout.footer);

    match app.panel {
        Some(Panel::Settings) => {
            let popup = centered_rect(50, 50, area);
            frame.render_widget(
                SettingsPanel {
                    current: app.engine.difficulty(),
                    selected: app.settings_selected,
                    theme: &app.theme,
                },
                popup,
            );
        }
        Some(Panel::FileManager) => {
            let popup = centered_rect(60, 60, area);
            frame.render_widget(
                FileManager {
                    files: &app.saved_files,
                    selected: app.file_selected,
                    theme: &app.theme,
                },
                popup,
            );
        }
        Some(Panel::StopConfirm) => {
            let popup = centered_rect(40, 30, area);
            frame.render_widget(
                StopConfirm {
                    streak: app.engine.streak(),
                    theme: &app.theme,
                },
                popup,
            );
        }
        None => {}
    }
}

fn render_upload(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let panel_area = centered_rect(70, 60, area);
    frame.render_widget(
        UploadPanel {
            input: &app.path_input,
            label: app.upload_label(),
            loaded_words: app.engine.words().len(),
            saved_count: app.saved_files.len(),
            theme: &app.theme,
        },
        panel_area,
    );
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(area);

    frame.render_widget(
        TimerBar::new(
            app.engine.time_remaining(),
            app.engine.difficulty().time_limit(),
            &app.theme,
        ),
        rows[0],
    );

    frame.render_widget(
        QuestionCard::new(&app.engine, app.option_selected, &app.theme),
        rows[1],
    );
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;

    if let Some(status) = &app.status {
        let color = if status.is_error {
            colors.error()
        } else {
            colors.success()
        };
        let line = Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hints: &[&str] = match (app.screen(), app.editing_path) {
        (AppScreen::Quiz, _) => &[
            "[1-6] Answer",
            "[arrows/Enter] Select",
            "[s] Speak",
            "[w] Save list",
            "[c] Difficulty",
            "[f] Saved lists",
            "[x] Stop",
        ],
        (AppScreen::Upload, true) => &["[Tab] Complete", "[Enter] Load", "[Esc] Menu"],
        (AppScreen::Upload, false) => &[
            "[o] Open file",
            "[e] Sample list",
            "[r] Restart list",
            "[f] Saved lists",
            "[c] Difficulty",
            "[q] Quit",
        ],
    };
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
