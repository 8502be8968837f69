use std::fs;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use wordquiz::app::{App, AppScreen, SAVED_MESSAGE};
use wordquiz::config::Config;
use wordquiz::engine::difficulty::Difficulty;
use wordquiz::engine::quiz::Phase;
use wordquiz::engine::scheduler::{COUNTDOWN_PERIOD, FEEDBACK_DELAY, INPUT_UNLOCK_DELAY};
use wordquiz::event::{AppEvent, spawn_file_reader};
use wordquiz::narration::SilentNarrator;
use wordquiz::store::Persistence;
use wordquiz::store::json_store::JsonStore;
use wordquiz::ui::theme::{Theme, ThemeColors};

const WORDS: &str = "\
apple : olma
book: kitob
bad line without colon
cat:mushuk
dog:it:extra
water:suv
";

fn open_app(data_dir: &TempDir, seed: u64) -> App {
    let store = JsonStore::with_base_dir(data_dir.path().to_path_buf()).unwrap();
    let mut config = Config::default();
    config.word_list_dir = String::new();
    App::new(
        config,
        Theme {
            name: "test".to_string(),
            colors: ThemeColors::default(),
        },
        Box::new(store),
        Box::new(SilentNarrator),
        SmallRng::seed_from_u64(seed),
    )
}

/// Read the file the way the event loop does and hand the result to the app.
fn upload(app: &mut App, path: &std::path::Path, now: Instant) {
    app.path_input.set_value(&path.to_string_lossy());
    let path = app.begin_upload(now).expect("upload slot free");
    let (tx, rx) = mpsc::channel();
    spawn_file_reader(path, tx);
    match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
        AppEvent::WordsLoaded { name, result } => app.finish_upload(name, result, now),
        _ => panic!("expected WordsLoaded"),
    }
}

fn answer_correctly(app: &mut App, now: Instant) {
    let question = app.engine.question().unwrap();
    let index = question
        .options
        .iter()
        .position(|o| *o == question.pair.translation)
        .unwrap();
    app.answer(index, now);
}

#[test]
fn test_full_session_persists_progress_and_lists() {
    let data_dir = TempDir::new().unwrap();
    let lists_dir = TempDir::new().unwrap();
    let list_path = lists_dir.path().join("basics.txt");
    fs::write(&list_path, WORDS).unwrap();

    let mut now = Instant::now();
    {
        let mut app = open_app(&data_dir, 1);
        upload(&mut app, &list_path, now);

        assert_eq!(app.screen(), AppScreen::Quiz);
        assert_eq!(app.engine.words().len(), 4);
        assert_eq!(app.current_file.as_deref(), Some("basics.txt"));

        // Three correct answers in a row on medium: 10 + 20 + 30.
        for _ in 0..3 {
            answer_correctly(&mut app, now);
            now += FEEDBACK_DELAY;
            app.on_tick(now);
            now += INPUT_UNLOCK_DELAY;
            app.on_tick(now);
        }
        assert_eq!(app.engine.streak(), 3);
        assert_eq!(app.engine.points(), 60);

        app.change_difficulty(Difficulty::Hard, now);
        app.save_current(now);
        assert_eq!(app.status.as_ref().unwrap().text, SAVED_MESSAGE);
    }

    let store = JsonStore::with_base_dir(data_dir.path().to_path_buf()).unwrap();
    assert_eq!(store.points(), 60);
    assert_eq!(store.difficulty(), Difficulty::Hard);
    let saved = store.load_file("basics.txt").unwrap();
    let terms: Vec<&str> = saved.words.iter().map(|w| w.term.as_str()).collect();
    assert_eq!(terms, vec!["apple", "book", "cat", "water"]);

    // A new session starts from the stored progress with no list loaded.
    let mut app = open_app(&data_dir, 2);
    assert_eq!(app.screen(), AppScreen::Upload);
    assert_eq!(app.engine.points(), 60);
    assert_eq!(app.engine.difficulty(), Difficulty::Hard);

    app.load_saved(0, now);
    assert_eq!(app.engine.question().unwrap().options.len(), 4);
    assert_eq!(app.engine.streak(), 0);
}

#[test]
fn test_timeout_then_stop() {
    let data_dir = TempDir::new().unwrap();
    let lists_dir = TempDir::new().unwrap();
    let list_path = lists_dir.path().join("basics.txt");
    fs::write(&list_path, WORDS).unwrap();

    let mut now = Instant::now();
    let mut app = open_app(&data_dir, 3);
    upload(&mut app, &list_path, now);
    answer_correctly(&mut app, now);
    now += FEEDBACK_DELAY;
    app.on_tick(now);

    for _ in 0..app.engine.difficulty().time_limit() {
        now += COUNTDOWN_PERIOD;
        app.on_tick(now);
    }
    assert_eq!(app.engine.phase(), Phase::Resolved);
    assert_eq!(app.engine.streak(), 0);
    assert_eq!(app.engine.points(), 10);

    app.request_stop();
    app.confirm_stop();
    assert_eq!(app.screen(), AppScreen::Upload);
    assert!(!app.scheduler.has_pending());
    assert_eq!(app.upload_label(), "Change word list");
}

#[test]
fn test_rejects_file_without_pairs() {
    let data_dir = TempDir::new().unwrap();
    let lists_dir = TempDir::new().unwrap();
    let list_path = lists_dir.path().join("empty.txt");
    fs::write(&list_path, "nothing here\n:\n  :olma\n").unwrap();

    let mut app = open_app(&data_dir, 4);
    upload(&mut app, &list_path, Instant::now());

    assert_eq!(app.screen(), AppScreen::Upload);
    assert!(app.engine.words().is_empty());
    assert!(app.status.as_ref().unwrap().is_error);
    assert!(app.loading.is_none());
}
