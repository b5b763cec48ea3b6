use crate::commands::CommandTable;
use crate::config::TerminalConfig;
use crate::history::{History, HistoryEntry};

const CLEAR: &str = "clear";
const EXIT: &str = "exit";

/// Result of dispatching one submitted line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Cleared,
    Exit,
    Appended(HistoryEntry),
}

/// Keys the input line reacts to; everything else is left to the browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    Enter,
    CtrlC,
    CtrlL,
}

impl KeyInput {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str, ctrl: bool) -> Option<KeyInput> {
        if key == "Enter" {
            return Some(KeyInput::Enter);
        }
        if ctrl {
            return match key {
                "c" | "C" => Some(KeyInput::CtrlC),
                "l" | "L" => Some(KeyInput::CtrlL),
                _ => None,
            };
        }
        match key {
            "Backspace" => Some(KeyInput::Backspace),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(KeyInput::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Edited,
    Dispatched(Dispatch),
    Cancelled,
    Cleared,
}

pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub struct Shell {
    pub history: History,
    pub table: CommandTable,
    input: String,
    suggestion_count: usize,
}

impl Shell {
    pub fn new(table: CommandTable, suggestion_count: usize) -> Self {
        Shell {
            history: History::new(),
            table,
            input: String::new(),
            suggestion_count,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    /// Run one line through the fixed rule chain.
    pub fn dispatch(&mut self, raw: &str) -> Dispatch {
        let cmd = normalize(raw);
        match cmd.as_str() {
            CLEAR => {
                self.history.clear();
                return Dispatch::Cleared;
            }
            EXIT => return Dispatch::Exit,
            _ => {}
        }

        let output = if cmd.is_empty() {
            String::new()
        } else if let Some(out) = self.table.get(&cmd) {
            out.to_string()
        } else {
            self.not_found(&cmd)
        };

        let entry = HistoryEntry::new(raw, output);
        self.history.push(entry.clone());
        Dispatch::Appended(entry)
    }

    pub fn handle_key(&mut self, key: KeyInput) -> KeyOutcome {
        match key {
            KeyInput::Char(c) => {
                self.input.push(c);
                KeyOutcome::Edited
            }
            KeyInput::Backspace => {
                self.input.pop();
                KeyOutcome::Edited
            }
            KeyInput::Enter => {
                let line = std::mem::take(&mut self.input);
                KeyOutcome::Dispatched(self.dispatch(&line))
            }
            KeyInput::CtrlC => {
                let line = std::mem::take(&mut self.input);
                self.history.push(HistoryEntry::new(format!("{}^C", line), ""));
                KeyOutcome::Cancelled
            }
            KeyInput::CtrlL => {
                self.history.clear();
                KeyOutcome::Cleared
            }
        }
    }

    fn not_found(&self, cmd: &str) -> String {
        format!(
            "zsh: command not found: {}\n\nDid you mean one of these?\n{}\n\nType 'help' to see all available commands.",
            cmd,
            self.table.suggestions(self.suggestion_count).join(", ")
        )
    }
}

pub fn prompt(config: &TerminalConfig) -> String {
    format!("╭─{}💀{} {} ", config.user, config.host, config.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SessionFacts;

    fn shell() -> Shell {
        let facts = SessionFacts {
            date: "Sun Oct 18 2026".into(),
            short_date: "10/18/2026".into(),
            uptime_days: 1,
            uptime_hours: 2,
        };
        Shell::new(CommandTable::new("Dijash", "portfolio", &facts), 5)
    }

    fn output_of(d: Dispatch) -> String {
        match d {
            Dispatch::Appended(e) => e.output,
            other => panic!("expected appended entry, got {:?}", other),
        }
    }

    #[test]
    fn test_known_commands_any_case_and_whitespace() {
        let mut sh = shell();
        let names: Vec<&str> = sh.table.names().collect();
        for name in names {
            let expected = sh.table.get(name).unwrap().to_string();
            for raw in [
                name.to_string(),
                name.to_uppercase(),
                format!("  {}\t", name),
                format!(" {} ", name.to_uppercase()),
            ] {
                assert_eq!(output_of(sh.dispatch(&raw)), expected, "input {:?}", raw);
            }
        }
    }

    #[test]
    fn test_help_with_trailing_space() {
        let mut sh = shell();
        let out = output_of(sh.dispatch("HELP "));
        assert_eq!(out, sh.table.get("help").unwrap());
        assert_eq!(sh.history.entries()[0].input, "HELP ");
    }

    #[test]
    fn test_empty_line_appends_empty_output() {
        let mut sh = shell();
        assert_eq!(
            sh.dispatch("   "),
            Dispatch::Appended(HistoryEntry::new("   ", ""))
        );
        assert_eq!(sh.history.len(), 1);
    }

    #[test]
    fn test_unknown_command() {
        let mut sh = shell();
        let out = output_of(sh.dispatch("foo"));
        assert!(out.starts_with("zsh: command not found: foo"));
        assert!(out.contains("help, about, skills, projects, contact"));
        assert!(!out.contains("education"));
    }

    #[test]
    fn test_unknown_command_normalized_in_message() {
        let mut sh = shell();
        let out = output_of(sh.dispatch("  FOO "));
        assert!(out.starts_with("zsh: command not found: foo\n"));
    }

    #[test]
    fn test_clear_wipes_without_entry() {
        let mut sh = shell();
        sh.dispatch("help");
        sh.dispatch("about");
        assert_eq!(sh.dispatch(" Clear "), Dispatch::Cleared);
        assert!(sh.history.is_empty());
    }

    #[test]
    fn test_exit_adds_no_entry() {
        let mut sh = shell();
        assert_eq!(sh.dispatch("EXIT"), Dispatch::Exit);
        assert!(sh.history.is_empty());
    }

    #[test]
    fn test_typing_and_enter() {
        let mut sh = shell();
        for c in "whoami".chars() {
            assert_eq!(sh.handle_key(KeyInput::Char(c)), KeyOutcome::Edited);
        }
        sh.handle_key(KeyInput::Char('x'));
        sh.handle_key(KeyInput::Backspace);
        let outcome = sh.handle_key(KeyInput::Enter);
        assert_eq!(
            outcome,
            KeyOutcome::Dispatched(Dispatch::Appended(HistoryEntry::new("whoami", "Dijash")))
        );
        assert_eq!(sh.input(), "");
    }

    #[test]
    fn test_ctrl_c_echoes_and_cancels() {
        let mut sh = shell();
        sh.set_input("hel");
        assert_eq!(sh.handle_key(KeyInput::CtrlC), KeyOutcome::Cancelled);
        assert_eq!(sh.history.entries(), &[HistoryEntry::new("hel^C", "")]);
        assert_eq!(sh.input(), "");
    }

    #[test]
    fn test_ctrl_l_clears_history_keeps_input() {
        let mut sh = shell();
        sh.dispatch("help");
        sh.set_input("ab");
        assert_eq!(sh.handle_key(KeyInput::CtrlL), KeyOutcome::Cleared);
        assert!(sh.history.is_empty());
        assert_eq!(sh.input(), "ab");
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyInput::from_key("Enter", false), Some(KeyInput::Enter));
        assert_eq!(KeyInput::from_key("c", true), Some(KeyInput::CtrlC));
        assert_eq!(KeyInput::from_key("l", true), Some(KeyInput::CtrlL));
        assert_eq!(KeyInput::from_key("c", false), Some(KeyInput::Char('c')));
        assert_eq!(KeyInput::from_key("é", false), Some(KeyInput::Char('é')));
        assert_eq!(KeyInput::from_key("ArrowUp", false), None);
        assert_eq!(KeyInput::from_key("a", true), None);
    }

    #[test]
    fn test_ctrl_enter_still_submits() {
        assert_eq!(KeyInput::from_key("Enter", true), Some(KeyInput::Enter));
        let mut sh = shell();
        sh.set_input("whoami");
        let key = KeyInput::from_key("Enter", true).unwrap();
        assert_eq!(
            sh.handle_key(key),
            KeyOutcome::Dispatched(Dispatch::Appended(HistoryEntry::new("whoami", "Dijash")))
        );
    }

    #[test]
    fn test_prompt() {
        assert_eq!(prompt(&TerminalConfig::default()), "╭─Dijash💀portfolio ~ ");
    }
}
