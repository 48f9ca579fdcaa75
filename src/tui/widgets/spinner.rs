//! Loading spinner shown while the first fetch is in flight

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Spinner animation frames
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// App branding
const APP_NAME: &str = "stockheat";
const TAGLINE: &str = "Calendar heatmap of daily returns";

/// Loading spinner widget
pub struct Spinner {
    frame: usize,
    symbol: String,
    year: i32,
}

impl Spinner {
    pub fn new(frame: usize, symbol: &str, year: i32) -> Self {
        Self {
            frame,
            symbol: symbol.to_string(),
            year,
        }
    }

    /// Get the current spinner character
    pub fn current_char(&self) -> char {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    /// Advance to next frame, returning the new frame index
    pub fn next_frame(frame: usize) -> usize {
        (frame + 1) % SPINNER_FRAMES.len()
    }
}

impl Widget for Spinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 5 || area.width < 35 {
            return;
        }

        let center_y = area.y + area.height / 2;

        let name_y = center_y.saturating_sub(2);
        let name_x = area.x + (area.width.saturating_sub(APP_NAME.len() as u16)) / 2;
        buf.set_string(
            name_x,
            name_y,
            APP_NAME,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

        let tag_y = name_y + 1;
        let tag_x = area.x + (area.width.saturating_sub(TAGLINE.len() as u16)) / 2;
        buf.set_string(tag_x, tag_y, TAGLINE, Style::default().fg(Color::DarkGray));

        let text = format!("{} Fetching {} {}...", self.current_char(), self.symbol, self.year);
        let spinner_y = tag_y + 2;
        let spinner_x = area.x + (area.width.saturating_sub(text.len() as u16)) / 2;
        buf.set_string(spinner_x, spinner_y, &text, Style::default().fg(Color::Cyan));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_frames() {
        assert_eq!(SPINNER_FRAMES.len(), 10);
    }

    #[test]
    fn test_spinner_current_char() {
        assert_eq!(Spinner::new(0, "AAPL", 2024).current_char(), '⠋');
        assert_eq!(Spinner::new(5, "AAPL", 2024).current_char(), '⠴');
    }

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(Spinner::new(10, "AAPL", 2024).current_char(), '⠋');
    }

    #[test]
    fn test_next_frame() {
        assert_eq!(Spinner::next_frame(0), 1);
        assert_eq!(Spinner::next_frame(9), 0);
    }
}
