//! Hover state machine and the day-detail tooltip popup
//!
//! Exactly one tooltip can be showing at a time. Entering an out-of-month
//! cell is an ignored transition; entering another in-month cell retargets
//! the tooltip directly without passing through Idle.

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;
use crate::types::{format_pct, PriceRow};

/// Tooltip state: nothing shown, or one date with its anchor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Showing { date: NaiveDate, x: u16, y: u16 },
}

impl HoverState {
    /// Hover-enter on a cell. Out-of-month cells are ignored (the current
    /// state is kept); in-month cells show or retarget the tooltip.
    pub fn enter(&mut self, date: NaiveDate, is_in_month: bool, x: u16, y: u16) {
        if is_in_month {
            *self = Self::Showing { date, x, y };
        }
    }

    /// Hover-leave: back to Idle
    pub fn leave(&mut self) {
        *self = Self::Idle;
    }

    /// The date currently showing, if any
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Idle => None,
            Self::Showing { date, .. } => Some(*date),
        }
    }
}

/// Price formatted for the tooltip body ("$100.00", or "N/A" when absent)
fn price_label(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => "N/A".to_string(),
    }
}

/// Floating detail popup for the hovered day
pub struct TooltipPopup<'a> {
    date: NaiveDate,
    row: Option<&'a PriceRow>,
    theme: Theme,
}

impl<'a> TooltipPopup<'a> {
    pub const WIDTH: u16 = 26;
    pub const HEIGHT: u16 = 6;

    pub fn new(date: NaiveDate, row: Option<&'a PriceRow>, theme: Theme) -> Self {
        Self { date, row, theme }
    }

    /// Popup area anchored near the hovered cell, nudged right/below the
    /// cursor and clamped inside the frame
    pub fn anchored_area(frame: Rect, x: u16, y: u16) -> Rect {
        let w = Self::WIDTH.min(frame.width);
        let h = Self::HEIGHT.min(frame.height);
        let px = (x + 2).min(frame.x + frame.width - w);
        let py = (y + 1).min(frame.y + frame.height - h);
        Rect::new(px, py, w, h)
    }
}

impl Widget for TooltipPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        let border_style = Style::default().fg(self.theme.border());
        let text_style = Style::default().fg(self.theme.text());

        // Frame
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;
        buf.set_string(area.x, area.y, "┌", border_style);
        buf.set_string(right, area.y, "┐", border_style);
        buf.set_string(area.x, bottom, "└", border_style);
        buf.set_string(right, bottom, "┘", border_style);
        for x in (area.x + 1)..right {
            buf.set_string(x, area.y, "─", border_style);
            buf.set_string(x, bottom, "─", border_style);
        }
        for y in (area.y + 1)..bottom {
            buf.set_string(area.x, y, "│", border_style);
            buf.set_string(right, y, "│", border_style);
            // Blank the interior so the popup covers the cells beneath
            buf.set_string(
                area.x + 1,
                y,
                " ".repeat((area.width - 2) as usize),
                text_style,
            );
        }

        let inner_x = area.x + 2;
        let mut y = area.y + 1;
        let max_y = bottom;

        let mut line = |buf: &mut Buffer, text: String, style: Style, y: &mut u16| {
            if *y < max_y {
                buf.set_string(inner_x, *y, text, style);
                *y += 1;
            }
        };

        line(
            buf,
            self.date.format("%b %-d, %Y").to_string(),
            text_style.add_modifier(Modifier::BOLD),
            &mut y,
        );
        line(
            buf,
            format!("Open:   {}", price_label(self.row.map(|r| r.open))),
            text_style,
            &mut y,
        );
        line(
            buf,
            format!("Close:  {}", price_label(self.row.map(|r| r.close))),
            text_style,
            &mut y,
        );

        let pct = self.row.and_then(PriceRow::pct_change);
        let pct_style = match pct {
            Some(p) if p < 0.0 => Style::default().fg(self.theme.loss_text()),
            Some(_) => Style::default().fg(self.theme.gain_text()),
            None => Style::default().fg(self.theme.muted()),
        };
        line(
            buf,
            format!("Change: {}", format_pct(pct)),
            pct_style,
            &mut y,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    // ========== HoverState tests ==========

    #[test]
    fn test_initial_state_is_idle() {
        let state = HoverState::default();
        assert_eq!(state, HoverState::Idle);
        assert_eq!(state.date(), None);
    }

    #[test]
    fn test_enter_in_month_shows() {
        let mut state = HoverState::Idle;
        state.enter(date(15), true, 10, 5);
        assert_eq!(state.date(), Some(date(15)));
    }

    #[test]
    fn test_enter_out_of_month_from_idle_is_noop() {
        let mut state = HoverState::Idle;
        state.enter(date(15), false, 10, 5);
        assert_eq!(state, HoverState::Idle);
    }

    #[test]
    fn test_enter_out_of_month_keeps_current_tooltip() {
        let mut state = HoverState::Idle;
        state.enter(date(15), true, 10, 5);
        state.enter(date(31), false, 12, 5);
        assert_eq!(state.date(), Some(date(15)));
    }

    #[test]
    fn test_retarget_without_idle() {
        let mut state = HoverState::Idle;
        state.enter(date(15), true, 10, 5);
        state.enter(date(18), true, 13, 5);
        assert_eq!(state.date(), Some(date(18)));
    }

    #[test]
    fn test_leave_returns_to_idle() {
        let mut state = HoverState::Idle;
        state.enter(date(15), true, 10, 5);
        state.leave();
        assert_eq!(state, HoverState::Idle);
    }

    #[test]
    fn test_leave_when_idle_stays_idle() {
        let mut state = HoverState::Idle;
        state.leave();
        assert_eq!(state, HoverState::Idle);
    }

    // ========== popup tests ==========

    #[test]
    fn test_anchored_area_nudges_and_clamps() {
        let frame = Rect::new(0, 0, 100, 40);
        let area = TooltipPopup::anchored_area(frame, 10, 5);
        assert_eq!(area, Rect::new(12, 6, TooltipPopup::WIDTH, TooltipPopup::HEIGHT));

        // Near the bottom-right corner the popup stays inside the frame
        let area = TooltipPopup::anchored_area(frame, 99, 39);
        assert!(area.x + area.width <= 100);
        assert!(area.y + area.height <= 40);
    }

    #[test]
    fn test_price_label() {
        assert_eq!(price_label(Some(100.0)), "$100.00");
        assert_eq!(price_label(Some(3.456)), "$3.46");
        assert_eq!(price_label(None), "N/A");
    }

    #[test]
    fn test_popup_renders_market_closed_for_missing_row() {
        let area = Rect::new(0, 0, 26, 6);
        let mut buf = Buffer::empty(area);
        TooltipPopup::new(date(16), None, Theme::Dark).render(area, &mut buf);

        // "Change: Market Closed" on the 4th body line
        let mut text = String::new();
        for x in 2..25 {
            text.push_str(buf.cell((x, 4)).unwrap().symbol());
        }
        assert!(text.contains("Market Closed"), "{:?}", text);
    }

    #[test]
    fn test_popup_renders_prices() {
        let row = PriceRow {
            date: date(15),
            open: 100.0,
            close: 103.0,
            high: None,
            low: None,
            volume: None,
        };
        let area = Rect::new(0, 0, 26, 6);
        let mut buf = Buffer::empty(area);
        TooltipPopup::new(date(15), Some(&row), Theme::Dark).render(area, &mut buf);

        let line = |y: u16| -> String {
            (2..25).map(|x| buf.cell((x, y)).unwrap().symbol().to_string()).collect()
        };
        assert!(line(1).contains("Mar 15, 2024"));
        assert!(line(2).contains("$100.00"));
        assert!(line(3).contains("$103.00"));
        assert!(line(4).contains("+3.00%"));
    }

    #[test]
    fn test_popup_tiny_area_is_noop() {
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 4));
        TooltipPopup::new(date(15), None, Theme::Dark).render(area, &mut buf);
    }
}
