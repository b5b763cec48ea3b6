/// Delays driving the boot animation, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootTiming {
    pub start_ms: u32,
    pub char_ms: u32,
    pub message_pause_ms: u32,
    pub welcome_ms: u32,
}

impl Default for BootTiming {
    fn default() -> Self {
        Self {
            start_ms: 1000,
            char_ms: 50,
            message_pause_ms: 800,
            welcome_ms: 1500,
        }
    }
}

/// Terminal session configuration
#[derive(Clone, Debug)]
pub struct TerminalConfig {
    pub timing: BootTiming,
    pub boot_messages: Vec<String>,
    pub user: String,
    pub host: String,
    pub path: String,
    pub suggestion_count: usize,
    pub version_label: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            timing: BootTiming::default(),
            boot_messages: vec![
                "🚀 Initializing neural networks...".to_string(),
                "⚡ Loading developer protocols...".to_string(),
                "🔥 Compiling awesome sauce...".to_string(),
                "🎯 Calibrating code cannons...".to_string(),
                "✨ Activating beast mode...".to_string(),
                "🔒 Terminal locked and loaded!".to_string(),
            ],
            user: "Dijash".to_string(),
            host: "portfolio".to_string(),
            path: "~".to_string(),
            suggestion_count: 5,
            version_label: "Terminal v2.0".to_string(),
        }
    }
}

impl TerminalConfig {
    /// Title bar label, e.g. `Dijash💀portfolio: ~`
    pub fn title(&self) -> String {
        format!("{}💀{}: {}", self.user, self.host, self.path)
    }
}
