use std::fs;
use std::io;
use std::path::{MAIN_SEPARATOR, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Only this many completion candidates are offered.
const MAX_COMPLETIONS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Single-line path editor for choosing a word list file. Tab cycles through
/// directories and `.txt` files matching the text typed so far.
pub struct PathInput {
    chars: Vec<char>,
    cursor: usize,
    completions: Vec<String>,
    completion_index: Option<usize>,
    pub completion_error: bool,
}

impl PathInput {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self {
            cursor: chars.len(),
            chars,
            completions: Vec::new(),
            completion_index: None,
            completion_error: false,
        }
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn set_value(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
        self.reset_completion();
    }

    /// The entered path with a leading `~` expanded.
    pub fn path(&self) -> PathBuf {
        PathBuf::from(expand_home(self.value().trim()))
    }

    /// Text before the cursor, the character under it, and the rest.
    pub fn render_parts(&self) -> (String, Option<char>, String) {
        let before = self.chars[..self.cursor].iter().collect();
        let at = self.chars.get(self.cursor).copied();
        let after = self
            .chars
            .get(self.cursor + 1..)
            .map(|rest| rest.iter().collect())
            .unwrap_or_default();
        (before, at, after)
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if !matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.reset_completion();
        }

        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.chars.len(),
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.chars.remove(self.cursor);
            }
            KeyCode::Delete if self.cursor < self.chars.len() => {
                self.chars.remove(self.cursor);
            }
            KeyCode::Tab => self.tab_complete(true),
            KeyCode::BackTab => self.tab_complete(false),
            KeyCode::Char('u') if ctrl => {
                self.chars.clear();
                self.cursor = 0;
            }
            KeyCode::Char(ch) if !ctrl => {
                self.chars.insert(self.cursor, ch);
                self.cursor += 1;
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn reset_completion(&mut self) {
        self.completions.clear();
        self.completion_index = None;
        self.completion_error = false;
    }

    fn tab_complete(&mut self, forward: bool) {
        if self.cursor < self.chars.len() {
            return;
        }

        let next = match self.completion_index {
            None => {
                match complete(&self.value()) {
                    Ok(found) => self.completions = found,
                    Err(e) => {
                        log::debug!("path completion failed: {e}");
                        self.completion_error = true;
                        return;
                    }
                }
                if self.completions.is_empty() {
                    return;
                }
                0
            }
            Some(idx) => {
                let count = self.completions.len();
                if forward {
                    (idx + 1) % count
                } else {
                    (idx + count - 1) % count
                }
            }
        };

        self.completion_index = Some(next);
        self.chars = self.completions[next].chars().collect();
        self.cursor = self.chars.len();
    }
}

fn expand_home(text: &str) -> String {
    match (text.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) => format!("{}{rest}", home.to_string_lossy()),
        _ => text.to_string(),
    }
}

/// Completion candidates for `seed`: directories first, then `.txt` files,
/// each group sorted by name. Hidden entries appear only when the typed name
/// starts with a dot.
pub fn complete(seed: &str) -> io::Result<Vec<String>> {
    let split_at = seed.rfind(['/', '\\']).map(|pos| pos + 1).unwrap_or(0);
    let (dir_part, partial) = seed.split_at(split_at);

    let read_from = if dir_part.is_empty() {
        ".".to_string()
    } else {
        expand_home(dir_part)
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(read_from)? {
        let entry = entry?;
        let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        entries.push((entry.file_name().to_string_lossy().to_string(), is_dir));
    }
    Ok(filter_candidates(entries, dir_part, partial))
}

fn filter_candidates(entries: Vec<(String, bool)>, dir_part: &str, partial: &str) -> Vec<String> {
    let show_hidden = partial.starts_with('.');
    let mut matches: Vec<(bool, String)> = entries
        .into_iter()
        .filter(|(name, _)| show_hidden || !name.starts_with('.'))
        .filter(|(name, _)| name.starts_with(partial))
        .filter(|(name, is_dir)| *is_dir || name.to_lowercase().ends_with(".txt"))
        .map(|(name, is_dir)| {
            let text = if is_dir {
                format!("{dir_part}{name}{MAIN_SEPARATOR}")
            } else {
                format!("{dir_part}{name}")
            };
            (!is_dir, text)
        })
        .collect();

    matches.sort();
    matches.truncate(MAX_COMPLETIONS);
    matches.into_iter().map(|(_, text)| text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut PathInput, text: &str) {
        for ch in text.chars() {
            input.handle(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_editing_keys() {
        let mut input = PathInput::new("");
        type_str(&mut input, "wrds.txt");
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Right));
        input.handle(key(KeyCode::Char('o')));
        assert_eq!(input.value(), "words.txt");

        input.handle(key(KeyCode::End));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "words.tx");

        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "ords.tx");

        input.handle(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_backspace_on_empty_is_harmless() {
        let mut input = PathInput::new("");
        input.handle(key(KeyCode::Backspace));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_enter_and_esc() {
        let mut input = PathInput::new("a.txt");
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
    }

    #[test]
    fn test_render_parts_around_cursor() {
        let mut input = PathInput::new("añb");
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Left));
        let (before, at, after) = input.render_parts();
        assert_eq!(before, "a");
        assert_eq!(at, Some('ñ'));
        assert_eq!(after, "b");
    }

    #[test]
    fn test_filter_keeps_dirs_and_txt_only() {
        let entries = vec![
            ("notes.md".to_string(), false),
            ("animals.txt".to_string(), false),
            ("lists".to_string(), true),
            (".hidden.txt".to_string(), false),
            ("FRUIT.TXT".to_string(), false),
        ];
        let found = filter_candidates(entries, "", "");
        assert_eq!(
            found,
            vec![
                format!("lists{MAIN_SEPARATOR}"),
                "FRUIT.TXT".to_string(),
                "animals.txt".to_string(),
            ]
        );
    }

    #[test]
    fn test_filter_shows_hidden_for_dot_prefix() {
        let entries = vec![(".hidden.txt".to_string(), false), ("a.txt".to_string(), false)];
        assert_eq!(filter_candidates(entries, "dir/", "."), vec!["dir/.hidden.txt"]);
    }

    #[test]
    fn test_tab_cycles_completions_in_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("alpha.txt"), "a:b").unwrap();
        fs::write(dir.path().join("beta.txt"), "a:b").unwrap();
        fs::write(dir.path().join("image.png"), "").unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();

        let base = format!("{}{MAIN_SEPARATOR}", dir.path().display());
        let mut input = PathInput::new(&base);

        input.handle(key(KeyCode::Tab));
        assert_eq!(input.value(), format!("{base}archive{MAIN_SEPARATOR}"));
        input.handle(key(KeyCode::Tab));
        assert_eq!(input.value(), format!("{base}alpha.txt"));
        input.handle(key(KeyCode::Tab));
        assert_eq!(input.value(), format!("{base}beta.txt"));
        input.handle(key(KeyCode::BackTab));
        assert_eq!(input.value(), format!("{base}alpha.txt"));
    }

    #[test]
    fn test_tab_on_missing_directory_flags_error() {
        let dir = TempDir::new().unwrap();
        let missing = format!("{}{MAIN_SEPARATOR}nope{MAIN_SEPARATOR}", dir.path().display());
        let mut input = PathInput::new(&missing);
        input.handle(key(KeyCode::Tab));
        assert!(input.completion_error);
        assert_eq!(input.value(), missing);
    }
}
