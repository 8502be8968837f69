use std::io;
use std::path::PathBuf;
use std::time::Instant;

use rand::rngs::SmallRng;

use crate::config::Config;
use crate::engine::difficulty::{ALL_DIFFICULTIES, Difficulty};
use crate::engine::quiz::{Phase, Progress, QuizEngine, QuizError, Resolution};
use crate::engine::scheduler::{
    COUNTDOWN_PERIOD, FEEDBACK_DELAY, INPUT_UNLOCK_DELAY, STATUS_CLEAR_DELAY, Scheduler,
    TimerKind,
};
use crate::event::file_name_of;
use crate::narration::Narrator;
use crate::store::Persistence;
use crate::store::schema::SavedFile;
use crate::ui::path_input::PathInput;
use crate::ui::theme::Theme;
use crate::words::{self, WordList, sample};

pub const SAVED_MESSAGE: &str = "File saved successfully!";
pub const STORAGE_WARNING: &str = "Storage unavailable, progress kept in memory";
pub const UPLOAD_BUSY: &str = "A word list is already loading";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Upload,
    Quiz,
}

/// Overlay drawn on top of the current screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Settings,
    FileManager,
    StopConfirm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub engine: QuizEngine,
    pub scheduler: Scheduler,
    pub config: Config,
    pub theme: Theme,
    pub saved_files: Vec<SavedFile>,
    pub current_file: Option<String>,
    /// Name of the file being read in the background, if any.
    pub loading: Option<String>,
    pub path_input: PathInput,
    /// Keys on the upload screen go to the path input while set.
    pub editing_path: bool,
    pub status: Option<StatusMessage>,
    pub panel: Option<Panel>,
    pub option_selected: usize,
    pub settings_selected: usize,
    pub file_selected: usize,
    pub storage_degraded: bool,
    pub should_quit: bool,
    store: Box<dyn Persistence>,
}

impl App {
    pub fn new(
        config: Config,
        theme: Theme,
        store: Box<dyn Persistence>,
        narrator: Box<dyn Narrator>,
        rng: SmallRng,
    ) -> Self {
        let progress = Progress {
            points: store.points(),
            difficulty: store.difficulty(),
        };
        let saved_files = store.saved_files();
        let settings_selected = ALL_DIFFICULTIES
            .iter()
            .position(|d| *d == progress.difficulty)
            .unwrap_or(0);
        let path_input = PathInput::new(&start_path(&config.word_list_dir));

        log::info!(
            "starting with {} points on {}, {} saved lists",
            progress.points,
            progress.difficulty,
            saved_files.len()
        );

        Self {
            engine: QuizEngine::new(progress, narrator, rng),
            scheduler: Scheduler::new(),
            config,
            theme,
            saved_files,
            current_file: None,
            loading: None,
            path_input,
            editing_path: true,
            status: None,
            panel: None,
            option_selected: 0,
            settings_selected,
            file_selected: 0,
            storage_degraded: false,
            should_quit: false,
            store,
        }
    }

    pub fn screen(&self) -> AppScreen {
        match self.engine.phase() {
            Phase::Idle => AppScreen::Upload,
            Phase::AwaitingAnswer | Phase::Resolved => AppScreen::Quiz,
        }
    }

    pub fn upload_label(&self) -> &'static str {
        if self.loading.is_some() {
            "Loading..."
        } else if self.engine.words().is_empty() {
            "Upload word list"
        } else {
            "Change word list"
        }
    }

    // --- timers ---

    /// Run every timer whose deadline has passed.
    pub fn on_tick(&mut self, now: Instant) {
        for (kind, deadline) in self.scheduler.take_due(now) {
            self.handle_timer(kind, deadline, now);
        }
    }

    fn handle_timer(&mut self, kind: TimerKind, deadline: Instant, now: Instant) {
        match kind {
            TimerKind::Countdown => {
                if let Some(resolution) = self.engine.tick() {
                    log::debug!("time ran out, answer was '{}'", resolution.answer);
                    self.on_resolved(&resolution, now);
                } else if self.engine.phase() == Phase::AwaitingAnswer {
                    // Seconds are counted from the previous deadline so a late
                    // wakeup does not stretch the question.
                    self.scheduler
                        .schedule(TimerKind::Countdown, deadline, COUNTDOWN_PERIOD);
                }
            }
            TimerKind::Advance => match self.engine.advance() {
                Ok(_) => {
                    self.option_selected = 0;
                    self.scheduler
                        .schedule(TimerKind::Countdown, now, COUNTDOWN_PERIOD);
                    self.scheduler
                        .schedule(TimerKind::Unlock, now, INPUT_UNLOCK_DELAY);
                }
                Err(e) => log::debug!("auto-advance skipped: {e}"),
            },
            TimerKind::Unlock => self.engine.unlock_input(),
            TimerKind::ClearStatus => self.status = None,
        }
    }

    /// Re-arm the countdown for a freshly generated question.
    fn start_question(&mut self, now: Instant) {
        self.scheduler.cancel(TimerKind::Countdown);
        self.scheduler.cancel(TimerKind::Advance);
        self.scheduler.cancel(TimerKind::Unlock);
        self.option_selected = 0;
        self.scheduler
            .schedule(TimerKind::Countdown, now, COUNTDOWN_PERIOD);
    }

    fn on_resolved(&mut self, resolution: &Resolution, now: Instant) {
        self.scheduler.cancel(TimerKind::Countdown);
        if resolution.is_correct() {
            self.persist_points(now);
        }
        self.scheduler
            .schedule(TimerKind::Advance, now, FEEDBACK_DELAY);
    }

    // --- answering ---

    pub fn answer(&mut self, index: usize, now: Instant) {
        let Some(choice) = self
            .engine
            .question()
            .and_then(|q| q.options.get(index))
            .cloned()
        else {
            return;
        };

        match self.engine.submit_answer(&choice) {
            Ok(resolution) => {
                self.option_selected = index;
                self.on_resolved(&resolution, now);
            }
            Err(e) => log::debug!("answer ignored: {e}"),
        }
    }

    pub fn answer_selected(&mut self, now: Instant) {
        self.answer(self.option_selected, now);
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_selected = (self.option_selected + 1) % count;
        }
    }

    pub fn select_prev_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_selected = (self.option_selected + count - 1) % count;
        }
    }

    fn option_count(&self) -> usize {
        self.engine.question().map(|q| q.options.len()).unwrap_or(0)
    }

    pub fn replay_prompt(&mut self) {
        self.engine.replay_prompt();
    }

    // --- word lists ---

    /// Claim the upload slot and return the path to read. Returns `None` when
    /// another upload is still pending or nothing was entered.
    pub fn begin_upload(&mut self, now: Instant) -> Option<PathBuf> {
        if self.upload_pending(now) {
            return None;
        }
        if self.path_input.value().trim().is_empty() {
            self.set_status("Enter the path of a .txt word list", true, now);
            return None;
        }

        let path = self.path_input.path();
        self.loading = Some(file_name_of(&path));
        self.editing_path = false;
        log::info!("loading word list {}", path.display());
        Some(path)
    }

    /// A list may only be swapped in once the pending read has finished,
    /// otherwise the late result would replace the list being played.
    fn upload_pending(&mut self, now: Instant) -> bool {
        if self.loading.is_some() {
            self.set_status(UPLOAD_BUSY, true, now);
            return true;
        }
        false
    }

    pub fn finish_upload(&mut self, name: String, result: io::Result<String>, now: Instant) {
        self.loading = None;

        let text = match result {
            Ok(text) => text,
            Err(e) => {
                log::warn!("cannot read {name}: {e}");
                self.set_status(&format!("Could not read {name}: {e}"), true, now);
                return;
            }
        };

        match words::parse_word_list(&text) {
            Ok(list) => self.load_list(name, list, now),
            Err(e) => {
                log::info!("rejected {name}: {e}");
                self.set_status(&format!("{name}: {e}"), true, now);
            }
        }
    }

    pub fn load_sample(&mut self, now: Instant) {
        if self.upload_pending(now) {
            return;
        }
        match sample::load(sample::SAMPLE_NAME) {
            Some(Ok(list)) => self.load_list(sample::SAMPLE_NAME.to_string(), list, now),
            Some(Err(e)) => self.set_status(&e.to_string(), true, now),
            None => log::warn!("bundled sample list is missing"),
        }
    }

    fn load_list(&mut self, name: String, list: WordList, now: Instant) {
        let count = list.len();
        match self.engine.load_words(list) {
            Ok(_) => {
                log::info!("loaded {count} word pairs from {name}");
                self.current_file = Some(name);
                self.panel = None;
                self.start_question(now);
            }
            Err(e) => self.set_status(&e.to_string(), true, now),
        }
    }

    /// Ask the loaded list again after a stop.
    pub fn restart(&mut self, now: Instant) {
        match self.engine.generate_question() {
            Ok(_) => self.start_question(now),
            Err(QuizError::EmptyWordList) => {
                self.set_status("Load a word list first", true, now)
            }
            Err(e) => log::debug!("restart ignored: {e}"),
        }
    }

    pub fn save_current(&mut self, now: Instant) {
        let Some(name) = self.current_file.clone() else {
            self.set_status("Load a word list before saving", true, now);
            return;
        };
        if self.engine.words().is_empty() {
            self.set_status("Load a word list before saving", true, now);
            return;
        }

        let file = SavedFile::new(&name, self.engine.words().to_vec());
        match self.store.save_file(file) {
            Ok(()) => {
                log::info!("saved word list {name}");
                self.refresh_saved_files();
                self.set_status(SAVED_MESSAGE, false, now);
            }
            Err(e) => self.storage_failed(&e, now),
        }
    }

    pub fn load_saved(&mut self, index: usize, now: Instant) {
        if self.upload_pending(now) {
            return;
        }
        let Some(file) = self.saved_files.get(index).cloned() else {
            return;
        };
        self.load_list(file.name, file.words, now);
    }

    pub fn delete_saved(&mut self, index: usize, now: Instant) {
        let Some(name) = self.saved_files.get(index).map(|f| f.name.clone()) else {
            return;
        };
        match self.store.delete_file(&name) {
            Ok(()) => {
                log::info!("deleted saved list {name}");
                self.refresh_saved_files();
                self.file_selected = self
                    .file_selected
                    .min(self.saved_files.len().saturating_sub(1));
            }
            Err(e) => self.storage_failed(&e, now),
        }
    }

    fn refresh_saved_files(&mut self) {
        self.saved_files = self.store.saved_files();
    }

    // --- difficulty and stopping ---

    pub fn change_difficulty(&mut self, difficulty: Difficulty, now: Instant) {
        self.scheduler.cancel(TimerKind::Countdown);
        self.scheduler.cancel(TimerKind::Advance);
        self.scheduler.cancel(TimerKind::Unlock);

        if self.engine.change_difficulty(difficulty) {
            self.start_question(now);
        }
        self.settings_selected = ALL_DIFFICULTIES
            .iter()
            .position(|d| *d == difficulty)
            .unwrap_or(self.settings_selected);
        self.panel = None;

        if let Err(e) = self.store.set_difficulty(difficulty) {
            self.storage_failed(&e, now);
        }
    }

    pub fn request_stop(&mut self) {
        if self.screen() == AppScreen::Quiz {
            self.panel = Some(Panel::StopConfirm);
        }
    }

    pub fn confirm_stop(&mut self) {
        self.scheduler.cancel_all();
        self.engine.stop();
        self.status = None;
        self.panel = None;
        self.option_selected = 0;
        log::info!("quiz stopped");
    }

    // --- panels ---

    pub fn open_panel(&mut self, panel: Panel) {
        match panel {
            Panel::FileManager => {
                self.refresh_saved_files();
                self.file_selected = 0;
            }
            Panel::Settings => {
                self.settings_selected = ALL_DIFFICULTIES
                    .iter()
                    .position(|d| *d == self.engine.difficulty())
                    .unwrap_or(0);
            }
            Panel::StopConfirm => {}
        }
        self.panel = Some(panel);
    }

    pub fn close_panel(&mut self) {
        self.panel = None;
    }

    // --- status and storage ---

    pub fn set_status(&mut self, text: &str, is_error: bool, now: Instant) {
        self.status = Some(StatusMessage {
            text: text.to_string(),
            is_error,
        });
        self.scheduler
            .schedule(TimerKind::ClearStatus, now, STATUS_CLEAR_DELAY);
    }

    fn persist_points(&mut self, now: Instant) {
        if let Err(e) = self.store.set_points(self.engine.points()) {
            self.storage_failed(&e, now);
        }
    }

    /// Keep playing in memory; warn the user the first time only.
    fn storage_failed(&mut self, err: &anyhow::Error, now: Instant) {
        log::warn!("storage write failed: {err:#}");
        if !self.storage_degraded {
            self.storage_degraded = true;
            self.set_status(STORAGE_WARNING, true, now);
        }
    }
}

fn start_path(dir: &str) -> String {
    if dir.is_empty() || dir.ends_with(std::path::MAIN_SEPARATOR) {
        dir.to_string()
    } else {
        format!("{dir}{}", std::path::MAIN_SEPARATOR)
    }
}
