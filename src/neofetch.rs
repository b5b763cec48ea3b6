use crate::commands::SessionFacts;

const LOGO: [&str; 13] = [
    "        ╭───────╮",
    "      ╭─╯███████╲─╮",
    "     ╱████▀▀▀▀▀████╲",
    "    ╱███▀  ▄▄▄  ▀███╲",
    "   ╱██▀ ▄██▀▀▀██▄ ▀██╲",
    "  ╱██ ██▀  ▄  ▀██ ██╲",
    "  ██  ██  ███  ██  ██",
    "  ██  ██▄ ▀█▀ ▄██  ██",
    "  ╲██  ▀██▄▄▄██▀  ██╱",
    "   ╲██▄  ▀▀███▀▀  ▄██╱",
    "    ╲███▄▄▄▄▄▄▄▄▄███╱",
    "     ╲█████████████╱",
    "      ╲───────────╱",
];

const TRAILER: &str = "\
         ████████████████████████████████████████
         ████████████████████████████████████████

🚀 Active Processes: [coding, debugging, innovating]
📦 Installed Packages: 42,069 (cargo), 1,337 (npm)
⚡ Power Level: Over 9000
🔧 Currently Running: creativity.exe, passion.service
💡 Last Commit: \"Fixed universe.rs - reality now stable\"";

/// Render the `neofetch` output: logo on the left, system info on the right.
pub fn format_neofetch(user: &str, host: &str, facts: &SessionFacts) -> String {
    let info_lines = [
        "OS: Terminal Portfolio v3.0 ⚡".to_string(),
        "Host: dijash.dev 🌐".to_string(),
        "Kernel: wasm32-unknown-unknown 🦀".to_string(),
        format!(
            "Uptime: {} days, {} hours",
            facts.uptime_days, facts.uptime_hours
        ),
        "Resolution: ∞ × ∞ pixels".to_string(),
        "DE: Custom Terminal Environment".to_string(),
        "WM: Browser Window Manager".to_string(),
        "Terminal: dijash-terminal v3.0".to_string(),
        "Shell: zsh 5.9 💻".to_string(),
        "CPU: Developer Brain Pro Max (∞ cores)".to_string(),
        "GPU: Imagination Engine RTX 4090".to_string(),
        "Memory: Infinite Coffee Buffer (∞ GB)".to_string(),
        "Disk: Cloud Storage (∞ TB SSD)".to_string(),
        "Network: Fiber Optic Thoughts".to_string(),
    ];

    let header = format!("{}@{}", user.to_lowercase(), host);
    let mut output = header.clone();
    output.push('\n');
    output.push_str(&"━".repeat(visible_width(&header) + 4));
    output.push('\n');

    let max_logo_width = LOGO.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    for i in 0..LOGO.len().max(info_lines.len()) {
        let logo_line = LOGO.get(i).copied().unwrap_or("");
        let info_line = info_lines.get(i).map(String::as_str).unwrap_or("");
        let padding = " ".repeat(max_logo_width - visible_width(logo_line) + 3);
        output.push_str(logo_line);
        output.push_str(&padding);
        output.push_str(info_line);
        output.push('\n');
    }

    output.push('\n');
    output.push_str(TRAILER);
    output
}

// Box-drawing and block glyphs are multi-byte, so pad on chars, not bytes.
fn visible_width(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts() -> SessionFacts {
        SessionFacts {
            date: "Sun Oct 18 2026".into(),
            short_date: "10/18/2026".into(),
            uptime_days: 42,
            uptime_hours: 7,
        }
    }

    #[test]
    fn test_header_and_uptime() {
        let out = format_neofetch("Dijash", "portfolio", &facts());
        assert!(out.starts_with("dijash@portfolio\n"));
        assert!(out.contains("Uptime: 42 days, 7 hours"));
    }

    #[test]
    fn test_info_column_aligned() {
        let out = format_neofetch("Dijash", "portfolio", &facts());
        let os_col = out
            .lines()
            .find(|l| l.contains("OS: "))
            .and_then(|l| l.find("OS: ").map(|b| l[..b].chars().count()))
            .unwrap();
        let host_col = out
            .lines()
            .find(|l| l.contains("Host: "))
            .and_then(|l| l.find("Host: ").map(|b| l[..b].chars().count()))
            .unwrap();
        assert_eq!(os_col, host_col);
    }

    #[test]
    fn test_trailer_present() {
        let out = format_neofetch("Dijash", "portfolio", &facts());
        assert!(out.ends_with("reality now stable\""));
    }
}
