use crate::config::BootTiming;

/// What a single boot tick did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootEvent {
    /// One more character of message `index` is visible; `text` is the
    /// revealed prefix so far.
    Reveal { index: usize, text: String },
    MessageDone { index: usize },
    Finished,
}

/// A boot tick plus the delay before the next one should run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootStep {
    pub event: BootEvent,
    pub delay_ms: u32,
}

/// Timer-driven typing animation over a fixed list of messages.
///
/// The sequencer owns no timers. The caller waits `initial_delay()`, then
/// calls `step()` and waits the returned `delay_ms` before calling it again,
/// until `step()` returns `None`.
pub struct BootSequencer {
    messages: Vec<Vec<char>>,
    log: Vec<String>,
    timing: BootTiming,
    message_index: usize,
    char_index: usize,
    finished: bool,
}

impl BootSequencer {
    pub fn new(messages: &[String], timing: BootTiming) -> Self {
        Self {
            messages: messages.iter().map(|m| m.chars().collect()).collect(),
            log: vec![String::new(); messages.len()],
            timing,
            message_index: 0,
            char_index: 0,
            finished: false,
        }
    }

    pub fn initial_delay(&self) -> u32 {
        self.timing.start_ms
    }

    pub fn step(&mut self) -> Option<BootStep> {
        if self.finished {
            return None;
        }

        let Some(message) = self.messages.get(self.message_index) else {
            self.finished = true;
            return Some(BootStep {
                event: BootEvent::Finished,
                delay_ms: self.timing.welcome_ms,
            });
        };

        if let Some(&c) = message.get(self.char_index) {
            let slot = &mut self.log[self.message_index];
            slot.push(c);
            self.char_index += 1;
            return Some(BootStep {
                event: BootEvent::Reveal {
                    index: self.message_index,
                    text: slot.clone(),
                },
                delay_ms: self.timing.char_ms,
            });
        }

        let index = self.message_index;
        self.message_index += 1;
        self.char_index = 0;
        Some(BootStep {
            event: BootEvent::MessageDone { index },
            delay_ms: self.timing.message_pause_ms,
        })
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fraction of boot lines with visible text, for the loading bar.
    pub fn progress(&self) -> f64 {
        if self.log.is_empty() {
            return 1.0;
        }
        let shown = self.log.iter().filter(|l| !l.is_empty()).count();
        (shown as f64 / self.log.len() as f64).min(1.0)
    }
}
