//! Color legend: Less -> seven-step scale -> More, plus the no-data swatch

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::tui::theme::Theme;
use crate::types::ChangeBucket;

/// Legend row widget; swatches share the heatmap's cell width
pub struct Legend {
    theme: Theme,
    cell_w: u16,
}

impl Legend {
    pub fn new(theme: Theme, cell_w: u16) -> Self {
        Self { theme, cell_w }
    }

    /// Width of the rendered legend for centering
    pub fn width(&self) -> u16 {
        // "Less " + 7 swatches with gaps + " More" + "   " + nodata + " n/a"
        5 + 7 * (self.cell_w + 1) - 1 + 5 + 3 + self.cell_w + 4
    }
}

impl Widget for Legend {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let muted = Style::default().fg(self.theme.muted());
        let swatch = " ".repeat(self.cell_w as usize);
        let max_x = area.x + area.width;
        let x_offset = area.width.saturating_sub(self.width()) / 2;
        let mut x = area.x + x_offset;
        let y = area.y;

        buf.set_string(x, y, "Less ", muted);
        x += 5;

        for bucket in ChangeBucket::scale() {
            if x + self.cell_w > max_x {
                return;
            }
            let style = Style::default().bg(self.theme.bucket_color(bucket));
            buf.set_string(x, y, &swatch, style);
            x += self.cell_w + 1;
        }

        if x + 4 > max_x {
            return;
        }
        buf.set_string(x, y, "More", muted);
        x += 4 + 3;

        if x + self.cell_w + 4 > max_x {
            return;
        }
        let style = Style::default().bg(self.theme.bucket_color(ChangeBucket::NoData));
        buf.set_string(x, y, &swatch, style);
        buf.set_string(x + self.cell_w + 1, y, ChangeBucket::NoData.label(), muted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn bg(buf: &Buffer, x: u16, y: u16) -> Option<Color> {
        buf.cell((x, y)).map(|c| c.style().bg.unwrap_or(Color::Reset))
    }

    #[test]
    fn test_legend_renders_scale_in_order() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        let legend = Legend::new(Theme::Dark, 1);
        let x_offset = area.width.saturating_sub(legend.width()) / 2;
        legend.render(area, &mut buf);

        let scale = ChangeBucket::scale();
        for (i, bucket) in scale.iter().enumerate() {
            let x = x_offset + 5 + i as u16 * 2;
            assert_eq!(
                bg(&buf, x, 0),
                Some(Theme::Dark.bucket_color(*bucket)),
                "swatch {}",
                i
            );
        }
    }

    #[test]
    fn test_legend_includes_no_data_swatch() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        Legend::new(Theme::Dark, 1).render(area, &mut buf);

        let no_data = Theme::Dark.bucket_color(ChangeBucket::NoData);
        let found = (0..60).any(|x| bg(&buf, x, 0) == Some(no_data));
        assert!(found);
    }

    #[test]
    fn test_legend_narrow_area_truncates_quietly() {
        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        Legend::new(Theme::Light, 2).render(area, &mut buf);
    }
}
