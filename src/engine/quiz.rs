use std::fmt;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::engine::difficulty::Difficulty;
use crate::engine::options::build_options;
use crate::engine::scoring::points_for;
use crate::narration::Narrator;
use crate::words::{WordList, WordPair};

pub const CORRECT_PHRASE: &str = "Correct!";
pub const TIME_UP_PHRASE: &str = "Time is up!";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("cannot ask a question from an empty word list")]
    EmptyWordList,
    #[error("no question is being asked")]
    NoActiveQuestion,
    #[error("the current question is already answered")]
    AlreadyResolved,
    #[error("input is locked while the next question appears")]
    InputLocked,
    #[error("the current question has not been answered yet")]
    Unanswered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingAnswer,
    Resolved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Correctness {
    Unresolved,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub pair: WordPair,
    pub options: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct { awarded: u64 },
    Incorrect { chosen: String },
    TimedOut,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub verdict: Verdict,
    pub answer: String,
}

impl Resolution {
    pub fn is_correct(&self) -> bool {
        matches!(self.verdict, Verdict::Correct { .. })
    }
}

/// Feedback shown under the options after a question resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct { awarded: u64 },
    Incorrect { answer: String },
    TimeUp { answer: String },
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct { awarded } => write!(f, "Correct! +{awarded} points"),
            Feedback::Incorrect { answer } => {
                write!(f, "Wrong, the correct answer was: {answer}")
            }
            Feedback::TimeUp { answer } => {
                write!(f, "Time's up! The correct answer was: {answer}")
            }
        }
    }
}

/// Values carried across sessions, loaded once at start and handed to the
/// engine. The caller writes them back whenever they change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub points: u64,
    pub difficulty: Difficulty,
}

/// The quiz session state machine.
///
/// `Idle` until a word list is loaded, then alternates between
/// `AwaitingAnswer` and `Resolved`. The engine never reads the clock: the
/// owner calls [`tick`](Self::tick) once per second and
/// [`advance`](Self::advance) once the feedback delay has passed.
pub struct QuizEngine {
    words: WordList,
    question: Option<Question>,
    correctness: Correctness,
    streak: u32,
    points: u64,
    time_remaining: u32,
    difficulty: Difficulty,
    feedback: Option<Feedback>,
    input_locked: bool,
    narrator: Box<dyn Narrator>,
    rng: SmallRng,
}

impl QuizEngine {
    pub fn new(progress: Progress, narrator: Box<dyn Narrator>, rng: SmallRng) -> Self {
        Self {
            words: Vec::new(),
            question: None,
            correctness: Correctness::Unresolved,
            streak: 0,
            points: progress.points,
            time_remaining: 0,
            difficulty: progress.difficulty,
            feedback: None,
            input_locked: false,
            narrator,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        match (&self.question, self.correctness) {
            (None, _) => Phase::Idle,
            (Some(_), Correctness::Unresolved) => Phase::AwaitingAnswer,
            (Some(_), _) => Phase::Resolved,
        }
    }

    pub fn words(&self) -> &[WordPair] {
        &self.words
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn correctness(&self) -> Correctness {
        self.correctness
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn progress(&self) -> Progress {
        Progress {
            points: self.points,
            difficulty: self.difficulty,
        }
    }

    /// Replace the word list wholesale and pose the first question.
    pub fn load_words(&mut self, words: WordList) -> Result<&Question, QuizError> {
        if words.is_empty() {
            return Err(QuizError::EmptyWordList);
        }
        self.words = words;
        self.input_locked = false;
        self.generate_question()
    }

    pub fn generate_question(&mut self) -> Result<&Question, QuizError> {
        if self.words.is_empty() {
            return Err(QuizError::EmptyWordList);
        }

        let idx = self.rng.gen_range(0..self.words.len());
        let pair = self.words[idx].clone();
        let options = build_options(
            &self.words,
            &pair,
            self.difficulty.option_count(),
            &mut self.rng,
        );

        self.correctness = Correctness::Unresolved;
        self.feedback = None;
        self.time_remaining = self.difficulty.time_limit();
        self.narrator.speak(&pair.term);
        log::debug!(
            "question '{}' with {} options ({})",
            pair.term,
            options.len(),
            self.difficulty
        );

        Ok(&*self.question.insert(Question { pair, options }))
    }

    pub fn submit_answer(&mut self, choice: &str) -> Result<Resolution, QuizError> {
        match self.phase() {
            Phase::Idle => return Err(QuizError::NoActiveQuestion),
            Phase::Resolved => return Err(QuizError::AlreadyResolved),
            Phase::AwaitingAnswer => {}
        }
        if self.input_locked {
            return Err(QuizError::InputLocked);
        }

        let answer = self.current_answer();
        if choice == answer {
            self.streak += 1;
            let awarded = points_for(self.streak, self.difficulty);
            self.points = self.points.saturating_add(awarded);
            self.correctness = Correctness::Correct;
            self.feedback = Some(Feedback::Correct { awarded });
            self.narrator.speak(CORRECT_PHRASE);
            Ok(Resolution {
                verdict: Verdict::Correct { awarded },
                answer,
            })
        } else {
            self.streak = 0;
            self.correctness = Correctness::Incorrect;
            self.feedback = Some(Feedback::Incorrect {
                answer: answer.clone(),
            });
            self.narrator.speak(&answer);
            Ok(Resolution {
                verdict: Verdict::Incorrect {
                    chosen: choice.to_string(),
                },
                answer,
            })
        }
    }

    /// One second of the countdown. Returns the resolution when time runs out.
    pub fn tick(&mut self) -> Option<Resolution> {
        if self.phase() != Phase::AwaitingAnswer {
            return None;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return None;
        }

        let answer = self.current_answer();
        self.streak = 0;
        self.correctness = Correctness::Incorrect;
        self.feedback = Some(Feedback::TimeUp {
            answer: answer.clone(),
        });
        self.narrator.speak(TIME_UP_PHRASE);
        Some(Resolution {
            verdict: Verdict::TimedOut,
            answer,
        })
    }

    /// Move from a resolved question to the next one. Input stays locked
    /// until [`unlock_input`](Self::unlock_input).
    pub fn advance(&mut self) -> Result<&Question, QuizError> {
        match self.phase() {
            Phase::Idle => Err(QuizError::NoActiveQuestion),
            Phase::AwaitingAnswer => Err(QuizError::Unanswered),
            Phase::Resolved => {
                self.input_locked = true;
                self.generate_question()
            }
        }
    }

    pub fn unlock_input(&mut self) {
        self.input_locked = false;
    }

    /// Switch difficulty. A question in progress is replaced without penalty.
    /// Returns true when a new question was generated.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) -> bool {
        self.difficulty = difficulty;
        if self.question.is_none() {
            return false;
        }
        self.input_locked = false;
        self.generate_question().is_ok()
    }

    pub fn stop(&mut self) {
        self.question = None;
        self.correctness = Correctness::Unresolved;
        self.streak = 0;
        self.time_remaining = 0;
        self.feedback = None;
        self.input_locked = false;
        self.narrator.cancel_all();
    }

    pub fn replay_prompt(&mut self) {
        if let Some(question) = &self.question {
            self.narrator.speak(&question.pair.term);
        }
    }

    fn current_answer(&self) -> String {
        self.question
            .as_ref()
            .map(|q| q.pair.translation.clone())
            .unwrap_or_default()
    }
}
