use crate::neofetch::format_neofetch;

/// Values captured once per session and baked into a few canned outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionFacts {
    pub date: String,
    pub short_date: String,
    pub uptime_days: u32,
    pub uptime_hours: u32,
}

impl SessionFacts {
    #[cfg(target_arch = "wasm32")]
    pub fn capture() -> Self {
        let now = js_sys::Date::new_0();
        SessionFacts {
            date: String::from(now.to_string()),
            short_date: String::from(
                now.to_locale_date_string("en-US", &wasm_bindgen::JsValue::UNDEFINED),
            ),
            uptime_days: (js_sys::Math::random() * 365.0) as u32,
            uptime_hours: (js_sys::Math::random() * 24.0) as u32,
        }
    }

    /// Outside the browser there is no JS clock. The values are placeholders
    /// derived from the system clock, labelled as such in the output; native
    /// callers that care should build `SessionFacts` themselves.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn capture() -> Self {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        SessionFacts {
            date: format!("{} (unix time {})", NATIVE_PLACEHOLDER, secs),
            short_date: format!("{} (day {})", NATIVE_PLACEHOLDER, secs / 86_400),
            uptime_days: (secs % 365) as u32,
            uptime_hours: (secs % 24) as u32,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
const NATIVE_PLACEHOLDER: &str = "no browser clock";

const HELP: &str = "\
Available commands:
  help     - Show this help message
  about    - Learn about me
  skills   - View my technical skills
  projects - See my awesome projects
  contact  - Get in touch
  education- Academic background
  resume   - Download my resume
  whoami   - Current user info
  date     - Show current date
  neofetch - System information
  clear    - Clear terminal history
  exit     - Close terminal";

const ABOUT: &str = "\
Hi there! 👋 I'm Dijash

A passionate full-stack developer who loves turning coffee into code.
I specialize in building scalable web applications and enjoy tackling
complex problems with elegant solutions.

When I'm not coding, you'll find me exploring new technologies,
contributing to open source, or mentoring fellow developers.";

const SKILLS: &str = "\
Technical Arsenal:

Frontend:  JavaScript/TypeScript, React, Vue.js, Next.js
Backend:   Node.js, Python, Express, FastAPI
Database:  PostgreSQL, MongoDB, Redis
Cloud:     AWS, Docker, Kubernetes
Tools:     Git, VS Code, Linux, Figma
Other:     GraphQL, REST APIs, CI/CD, Testing";

const PROJECTS: &str = "\
Featured Projects:

🚀 E-Commerce Platform
   → Full-stack React/Node.js app with payment integration
   → GitHub: github.com/Dijash-dev/ecommerce

🎮 Real-time Chat App
   → WebSocket-based chat with rooms and file sharing
   → GitHub: github.com/Dijash-dev/chat-app

📊 Data Visualization Dashboard
   → D3.js powered analytics dashboard
   → GitHub: github.com/Dijash-dev/dashboard";

const CONTACT: &str = "\
Let's Connect! 📬

Email:    Dijash.dev@example.com
GitHub:   github.com/Dijash-dev
LinkedIn: linkedin.com/in/Dijash-dev
Twitter:  @Dijash_codes
Website:  Dijash.dev";

const EDUCATION: &str = "\
Academic Background 🎓

BSc Computer Science
Islington College (2020-present)

Relevant Coursework:
• Data Structures & Algorithms
• Software Engineering";

pub const WELCOME: &str = "\
Welcome to Dijash's Terminal Portfolio! 🎉
Type 'help' to see available commands.

╭─────────────────────────────────────╮
│  \"Code is poetry in motion\" 🎵      │
╰─────────────────────────────────────╯";

/// Ordered mapping of command name to canned output.
pub struct CommandTable {
    entries: Vec<(&'static str, String)>,
}

impl CommandTable {
    pub fn new(user: &str, host: &str, facts: &SessionFacts) -> Self {
        let resume = format!(
            "📄 Resume Download\n\n\
             → PDF Version: resume.Dijash.dev/pdf\n\
             → Web Version: resume.Dijash.dev\n\
             → Last Updated: {}\n\n\
             Tip: Use 'wget resume.Dijash.dev/pdf' to download via terminal 😉",
            facts.short_date
        );
        CommandTable {
            entries: vec![
                ("help", HELP.to_string()),
                ("about", ABOUT.to_string()),
                ("skills", SKILLS.to_string()),
                ("projects", PROJECTS.to_string()),
                ("contact", CONTACT.to_string()),
                ("education", EDUCATION.to_string()),
                ("resume", resume),
                ("whoami", user.to_string()),
                ("date", facts.date.clone()),
                ("neofetch", format_neofetch(user, host, facts)),
            ],
        }
    }

    /// Exact lookup; callers normalize first.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, out)| out.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    pub fn suggestions(&self, count: usize) -> Vec<&'static str> {
        self.names().take(count).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
