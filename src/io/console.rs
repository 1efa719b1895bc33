// Human-readable status lines. Everything here goes to stderr; stdout is reserved for results.

use colored::*;
use std::env;

pub enum ConsoleEvent {
    Config(String),
    Request { provider: String, model: String },
    Done,
    Warning(String),
}

pub struct Console {
    quiet: bool,
}

impl Console {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// `TRIPLEX_QUIET=1` silences status output.
    pub fn from_env() -> Self {
        let quiet = env::var("TRIPLEX_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Self::new(quiet)
    }

    pub fn line(event: &ConsoleEvent) -> String {
        match event {
            ConsoleEvent::Config(path) => format!("{} Config: {}", "⚙️".cyan(), path),
            ConsoleEvent::Request { provider, model } => format!(
                "{} Extracting triples via {} ({})",
                "🧠".cyan(),
                provider.bold(),
                model
            ),
            ConsoleEvent::Done => format!("{}", "✅ Completion received.".green()),
            ConsoleEvent::Warning(msg) => format!("{} {}", "⚠️".yellow(), msg.yellow()),
        }
    }

    pub fn say(&self, event: ConsoleEvent) {
        if self.quiet {
            return;
        }
        eprintln!("{}", Self::line(&event));
    }
}
