//! Terminal markdown rendering for generated plans.
//!
//! The reply is markdown (tables, headings, `---` rules). `PlanRenderer`
//! renders it through termimad without altering the text.

use termimad::MadSkin;
use termimad::crossterm::style::Color;

/// Terminal markdown renderer.
pub struct PlanRenderer {
    skin: MadSkin,
}

impl PlanRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.bold.set_fg(Color::White);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render the whole reply. Tables span several lines, so the text is
    /// rendered in one piece rather than line by line.
    pub fn render(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }
}

impl Default for PlanRenderer {
    fn default() -> Self {
        Self::new()
    }
}
