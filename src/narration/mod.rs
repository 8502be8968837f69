use std::process::{Child, Command, Stdio};

/// Speaks prompts aloud. Calls are fire-and-forget: nothing waits for speech
/// to finish, and failures never reach the quiz.
pub trait Narrator: Send {
    fn speak(&mut self, text: &str);
    fn cancel_all(&mut self);
}

pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&mut self, _text: &str) {}
    fn cancel_all(&mut self) {}
}

/// Runs a host text-to-speech program (`say`, `espeak-ng`, ...) with the text
/// as its last argument.
pub struct CommandNarrator {
    program: String,
    args: Vec<String>,
    speaking: Vec<Child>,
    unavailable: bool,
}

impl CommandNarrator {
    pub fn new(program: &str, args: &[String]) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
            speaking: Vec::new(),
            unavailable: false,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.unavailable
    }

    /// Drop handles of utterances that already finished.
    fn reap(&mut self) {
        self.speaking
            .retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    }

    #[cfg(test)]
    fn in_flight(&mut self) -> usize {
        self.reap();
        self.speaking.len()
    }
}

impl Narrator for CommandNarrator {
    fn speak(&mut self, text: &str) {
        if self.unavailable || text.trim().is_empty() {
            return;
        }

        // A new prompt interrupts whatever is still being said.
        self.cancel_all();

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => self.speaking.push(child),
            Err(e) => {
                log::debug!("speech command '{}' unavailable: {e}", self.program);
                self.unavailable = true;
            }
        }
    }

    // Killed children that have not exited yet stay in `speaking` and are
    // reaped by a later call.
    fn cancel_all(&mut self) {
        for child in &mut self.speaking {
            let _ = child.kill();
        }
        self.reap();
    }
}

impl Drop for CommandNarrator {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Default speech program for the host platform.
pub fn default_command() -> (&'static str, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("say", Vec::new())
    } else {
        ("espeak-ng", vec!["-v".to_string(), "en-us".to_string()])
    }
}
