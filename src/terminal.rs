use crate::{
    boot::{BootSequencer, BootStep},
    commands::{CommandTable, SessionFacts, WELCOME},
    config::TerminalConfig,
    history::{History, HistoryEntry},
    log,
    shell::{prompt, Dispatch, KeyInput, KeyOutcome, Shell},
};
use wasm_bindgen::prelude::*;

const CLEAR_TOKEN: &str = "\x1b[CLEAR]";
const EXIT_TOKEN: &str = "\x1b[EXIT]";

fn dispatch_token(d: Dispatch) -> String {
    match d {
        Dispatch::Cleared => CLEAR_TOKEN.into(),
        Dispatch::Exit => EXIT_TOKEN.into(),
        Dispatch::Appended(entry) => entry.output,
    }
}

#[wasm_bindgen]
pub struct Terminal {
    config: TerminalConfig,
    boot: Option<BootSequencer>,
    shell: Shell,
    booted: bool,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn with_config(config: TerminalConfig, facts: &SessionFacts) -> Terminal {
        let table = CommandTable::new(&config.user, &config.host, facts);
        let shell = Shell::new(table, config.suggestion_count);
        let boot = BootSequencer::new(&config.boot_messages, config.timing);
        Terminal {
            config,
            boot: Some(boot),
            shell,
            booted: false,
        }
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Advance the boot animation by one tick. `None` means boot is over and
    /// the session is interactive.
    pub fn advance_boot(&mut self) -> Option<BootStep> {
        if self.booted {
            return None;
        }
        if let Some(step) = self.boot.as_mut().and_then(|b| b.step()) {
            return Some(step);
        }
        self.finish_boot();
        None
    }

    fn finish_boot(&mut self) {
        self.boot = None;
        self.booted = true;
        self.shell.history.clear();
        self.shell.history.push(HistoryEntry::new("", WELCOME));
        log::info("boot complete");
    }

    pub fn boot_lines(&self) -> &[String] {
        self.boot.as_ref().map(|b| b.log()).unwrap_or(&[])
    }

    pub fn history(&self) -> &History {
        &self.shell.history
    }

    pub fn submit_line(&mut self, line: &str) -> Dispatch {
        let result = self.shell.dispatch(line);
        if result == Dispatch::Exit {
            log::info("exit requested");
        }
        result
    }

    pub fn press(&mut self, key: KeyInput) -> KeyOutcome {
        self.shell.handle_key(key)
    }
}

#[wasm_bindgen]
impl Terminal {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Terminal {
        Terminal::with_config(TerminalConfig::default(), &SessionFacts::capture())
    }

    /// Delay in ms before the first boot tick.
    #[wasm_bindgen]
    pub fn start_boot(&self) -> u32 {
        self.boot.as_ref().map(|b| b.initial_delay()).unwrap_or(0)
    }

    /// Run one boot tick; returns the delay before the next, or -1 once
    /// the terminal is interactive.
    #[wasm_bindgen]
    pub fn next_boot_step(&mut self) -> i32 {
        match self.advance_boot() {
            Some(step) => step.delay_ms as i32,
            None => -1,
        }
    }

    #[wasm_bindgen]
    pub fn boot_log(&self) -> Vec<JsValue> {
        self.boot_lines()
            .iter()
            .map(|l| JsValue::from_str(l))
            .collect()
    }

    #[wasm_bindgen]
    pub fn boot_progress(&self) -> f64 {
        match &self.boot {
            Some(b) => b.progress(),
            None => 1.0,
        }
    }

    #[wasm_bindgen]
    pub fn is_booted(&self) -> bool {
        self.booted
    }

    #[wasm_bindgen]
    pub fn prompt(&self) -> String {
        prompt(&self.config)
    }

    #[wasm_bindgen]
    pub fn title(&self) -> String {
        self.config.title()
    }

    #[wasm_bindgen]
    pub fn submit(&mut self, line: &str) -> String {
        dispatch_token(self.submit_line(line))
    }

    /// Feed a DOM key. Returns `undefined` for keys the terminal ignores,
    /// `""` after an edit or cancel, and otherwise what `submit` would.
    #[wasm_bindgen]
    pub fn key(&mut self, key: &str, ctrl: bool) -> Option<String> {
        let k = KeyInput::from_key(key, ctrl)?;
        let token = match self.press(k) {
            KeyOutcome::Edited | KeyOutcome::Cancelled => String::new(),
            KeyOutcome::Cleared => CLEAR_TOKEN.into(),
            KeyOutcome::Dispatched(d) => {
                if d == Dispatch::Exit {
                    log::info("exit requested");
                }
                dispatch_token(d)
            }
        };
        Some(token)
    }

    #[wasm_bindgen]
    pub fn input(&self) -> String {
        self.shell.input().to_string()
    }

    #[wasm_bindgen]
    pub fn set_input(&mut self, text: &str) {
        self.shell.set_input(text);
    }

    #[wasm_bindgen]
    pub fn history_json(&self) -> String {
        match self.shell.history.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error(&format!("history serialization failed: {}", e));
                "[]".into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::BootEvent;

    fn terminal() -> Terminal {
        let facts = SessionFacts {
            date: "Sun Oct 18 2026".into(),
            short_date: "10/18/2026".into(),
            uptime_days: 1,
            uptime_hours: 1,
        };
        Terminal::with_config(TerminalConfig::default(), &facts)
    }

    #[test]
    fn test_full_boot_then_single_welcome() {
        let mut t = terminal();
        let messages = t.config().boot_messages.clone();
        assert_eq!(t.start_boot(), 1000);

        let mut revealed: Vec<String> = vec![String::new(); messages.len()];
        let mut done_order = Vec::new();
        let mut finished_seen = false;
        while let Some(step) = t.advance_boot() {
            assert!(!t.is_booted());
            assert!(t.history().is_empty());
            match step.event {
                BootEvent::Reveal { index, text } => {
                    assert!(!finished_seen);
                    assert_eq!(text.chars().count(), revealed[index].chars().count() + 1);
                    revealed[index] = text;
                }
                BootEvent::MessageDone { index } => done_order.push(index),
                BootEvent::Finished => finished_seen = true,
            }
        }

        assert!(finished_seen);
        assert_eq!(revealed, messages);
        assert_eq!(done_order, (0..messages.len()).collect::<Vec<_>>());
        assert!(t.is_booted());
        assert_eq!(t.history().entries(), &[HistoryEntry::new("", WELCOME)]);
        assert!(t.boot_lines().is_empty());

        assert!(t.advance_boot().is_none());
        assert_eq!(t.history().len(), 1);
    }

    #[test]
    fn test_next_boot_step_reports_delays() {
        let mut t = terminal();
        assert_eq!(t.next_boot_step(), 50);
        let mut last = 0;
        loop {
            let d = t.next_boot_step();
            if d < 0 {
                break;
            }
            last = d;
        }
        assert_eq!(last, 1500);
        assert_eq!(t.boot_progress(), 1.0);
    }

    #[test]
    fn test_submit_tokens() {
        let mut t = terminal();
        assert_eq!(t.submit("whoami"), "Dijash");
        assert_eq!(t.submit("clear"), "\x1b[CLEAR]");
        assert_eq!(t.submit("exit"), "\x1b[EXIT]");
        assert!(t.submit("nope").starts_with("zsh: command not found: nope"));
    }

    #[test]
    fn test_key_routing() {
        let mut t = terminal();
        assert_eq!(t.key("h", false), Some(String::new()));
        assert_eq!(t.key("i", false), Some(String::new()));
        assert_eq!(t.input(), "hi");
        assert_eq!(t.key("ArrowUp", false), None);
        assert_eq!(t.key("c", true), Some(String::new()));
        assert_eq!(t.input(), "");
        assert_eq!(t.history_json(), r#"[{"input":"hi^C","output":""}]"#);
    }

    #[test]
    fn test_enter_reports_dispatch_tokens() {
        let mut t = terminal();
        t.set_input("whoami");
        assert_eq!(t.key("Enter", false).as_deref(), Some("Dijash"));

        t.set_input("exit");
        assert_eq!(t.key("Enter", false).as_deref(), Some("\x1b[EXIT]"));

        t.set_input("clear");
        assert_eq!(t.key("Enter", false).as_deref(), Some("\x1b[CLEAR]"));
        assert!(t.history().is_empty());

        t.submit("help");
        assert_eq!(t.key("l", true).as_deref(), Some("\x1b[CLEAR]"));
        assert!(t.history().is_empty());
    }
}
