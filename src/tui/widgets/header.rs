//! Header line: symbol, year window, theme, and the symbol input buffer

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Header widget state for one render
pub struct Header<'a> {
    symbol: &'a str,
    year: i32,
    years: [i32; 5],
    theme: Theme,
    /// Some while the user is typing a new symbol
    input: Option<&'a str>,
    loading: bool,
}

impl<'a> Header<'a> {
    pub fn new(symbol: &'a str, year: i32, years: [i32; 5], theme: Theme) -> Self {
        Self {
            symbol,
            year,
            years,
            theme,
            input: None,
            loading: false,
        }
    }

    pub fn with_input(mut self, input: Option<&'a str>) -> Self {
        self.input = input;
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let text = Style::default().fg(self.theme.text());
        let muted = Style::default().fg(self.theme.muted());
        let accent = Style::default()
            .fg(self.theme.accent())
            .add_modifier(Modifier::BOLD);

        let mut x = area.x + 1;
        let y = area.y;
        let max_x = area.x + area.width;

        let mut put = |buf: &mut Buffer, s: &str, style: Style, x: &mut u16| {
            if *x + s.len() as u16 <= max_x {
                buf.set_string(*x, y, s, style);
                *x += s.len() as u16;
            }
        };

        match self.input {
            Some(input) => {
                put(buf, "Symbol: ", muted, &mut x);
                put(buf, input, accent, &mut x);
                put(buf, "_", accent, &mut x);
                put(buf, "  (Enter to load, Esc to cancel)", muted, &mut x);
            }
            None => {
                put(buf, "Symbol: ", muted, &mut x);
                put(buf, self.symbol, text.add_modifier(Modifier::BOLD), &mut x);
                put(buf, "   Year: ", muted, &mut x);
                for year in self.years {
                    let style = if year == self.year { accent } else { muted };
                    put(buf, &format!("{} ", year), style, &mut x);
                }
                put(buf, "  Theme: ", muted, &mut x);
                put(buf, self.theme.label(), text, &mut x);
                if self.loading {
                    put(buf, "  fetching...", muted, &mut x);
                }
            }
        }

        // Key hints on the second header row
        if area.height > 1 {
            buf.set_string(
                area.x + 1,
                y + 1,
                "[/] symbol  [←/→] year  [t] theme  [r] refresh  [q] quit",
                muted,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn test_header_shows_symbol_and_years() {
        let area = Rect::new(0, 0, 80, 2);
        let mut buf = Buffer::empty(area);
        Header::new("AAPL", 2024, [2022, 2023, 2024, 2025, 2026], Theme::Dark)
            .render(area, &mut buf);

        let top = line(&buf, 0, 80);
        assert!(top.contains("AAPL"));
        assert!(top.contains("2024"));
        assert!(top.contains("dark"));
        assert!(line(&buf, 1, 80).contains("[t] theme"));
    }

    #[test]
    fn test_header_input_mode() {
        let area = Rect::new(0, 0, 80, 2);
        let mut buf = Buffer::empty(area);
        Header::new("AAPL", 2024, [2022, 2023, 2024, 2025, 2026], Theme::Dark)
            .with_input(Some("MSF"))
            .render(area, &mut buf);

        let top = line(&buf, 0, 80);
        assert!(top.contains("MSF"));
        assert!(top.contains("Enter to load"));
        assert!(!top.contains("Year:"));
    }

    #[test]
    fn test_header_loading_indicator() {
        let area = Rect::new(0, 0, 80, 2);
        let mut buf = Buffer::empty(area);
        Header::new("AAPL", 2024, [2022, 2023, 2024, 2025, 2026], Theme::Dark)
            .with_loading(true)
            .render(area, &mut buf);
        assert!(line(&buf, 0, 80).contains("fetching"));
    }
}
