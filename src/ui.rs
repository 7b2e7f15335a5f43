//! Terminal output for the `doclite` binary

use owo_colors::{OwoColorize, Style};
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();
static QUIET: OnceLock<bool> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub dim: Style,
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            dim: Style::new().white().dimmed(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            dim: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

/// `DOCLITE_QUIET=1` silences everything but errors
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("DOCLITE_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

pub fn section(title: &str) {
    if is_quiet() {
        return;
    }
    println!();
    println!("━ {}", title.style(theme().header.clone()));
}

pub fn success(label: &str) {
    if !is_quiet() {
        println!("✔ {}", label.style(theme().success.clone()));
    }
}

pub fn error(label: &str) {
    eprintln!("✘ {}", label.style(theme().error.clone()));
}

pub fn info(label: &str, value: &str) {
    if !is_quiet() {
        println!("  {}: {}", label.style(theme().dim.clone()), value);
    }
}

/// One result line, e.g. a stored document
pub fn item(text: &str) {
    if !is_quiet() {
        println!("  • {}", text);
    }
}
