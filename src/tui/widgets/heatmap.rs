//! Year heatmap widget: 12 month blocks of weekday-aligned day cells
//!
//! Cell sizing keeps the original pixel-space design constants (label
//! column 40px, 11 month gaps of 12px, 5 week gaps of 3px, cell edge
//! clamped to 10..=16) and projects the resulting edge onto terminal
//! columns at roughly 8px per glyph, so wide terminals get 2-column day
//! cells and narrow ones get 1-column cells.

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::calendar::{in_month, MonthGrid, WEEKDAY_NAMES};
use crate::tui::theme::Theme;
use crate::types::PriceIndex;

/// Smallest allowed cell edge, px
pub const MIN_CELL_PX: i64 = 10;
/// Largest allowed cell edge, px
pub const MAX_CELL_PX: i64 = 16;
/// Weekday label column, px
const LABEL_WIDTH_PX: f64 = 40.0;
/// Gap between month blocks, px (11 gaps across 12 months)
const MONTH_GAP_PX: f64 = 12.0;
/// Gap between week columns, px (5 gaps across 6 weeks)
const WEEK_GAP_PX: f64 = 3.0;

/// Approximate terminal glyph width used to project px onto columns
const TERM_CELL_PX: u16 = 8;

/// Weekday label column in terminal cells ("Mon ")
pub const LABEL_COLS: u16 = 4;
/// Gap between month blocks in terminal cells
const MONTH_GAP_COLS: u16 = 1;

/// Cell edge for a container width, in px.
///
/// Subtracts the label column and the 11 month gaps, splits across 12
/// months, subtracts the 5 week gaps, splits across 6 week columns, floors
/// and clamps. Total, idempotent, and monotonically non-decreasing; even
/// pathological widths only ever clamp.
pub fn cell_edge(container_px: f64) -> u16 {
    let net = container_px - LABEL_WIDTH_PX - MONTH_GAP_PX * 11.0;
    let month_width = net / 12.0;
    let raw = ((month_width - WEEK_GAP_PX * 5.0) / 6.0).floor() as i64;
    raw.clamp(MIN_CELL_PX, MAX_CELL_PX) as u16
}

/// Terminal columns per day cell for a terminal width
pub fn cell_cols(term_width: u16) -> u16 {
    let edge = cell_edge(f64::from(term_width) * f64::from(TERM_CELL_PX));
    (edge / TERM_CELL_PX).max(1)
}

/// Pure cell geometry for one render: positions and the inverse hit test.
///
/// Computed identically from the heatmap area by both the draw path and the
/// mouse handler, so hover hit testing never drifts from what was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapLayout {
    origin_x: u16,
    origin_y: u16,
    cell_w: u16,
}

impl HeatmapLayout {
    /// Rows used by the grid: month-name row + 7 day rows
    pub const HEIGHT: u16 = 8;

    pub fn new(area: Rect) -> Self {
        let cell_w = cell_cols(area.width);
        let x_offset = area.width.saturating_sub(Self::total_width(cell_w)) / 2;
        Self {
            origin_x: area.x + x_offset,
            origin_y: area.y,
            cell_w,
        }
    }

    /// Full grid width in terminal cells for a given cell width
    pub fn total_width(cell_w: u16) -> u16 {
        LABEL_COLS + 12 * 6 * cell_w + 11 * MONTH_GAP_COLS
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    fn month_span(&self) -> u16 {
        6 * self.cell_w + MONTH_GAP_COLS
    }

    /// Top-left terminal position of cell (month, week, day)
    pub fn cell_pos(&self, month: usize, week: usize, day: usize) -> (u16, u16) {
        let x = self.origin_x
            + LABEL_COLS
            + month as u16 * self.month_span()
            + week as u16 * self.cell_w;
        let y = self.origin_y + 1 + day as u16;
        (x, y)
    }

    /// Inverse of [`cell_pos`](Self::cell_pos): which (month, week, day) a
    /// terminal coordinate lands on, or `None` for labels, gaps, and
    /// anything outside the grid.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(usize, usize, usize)> {
        let day = y.checked_sub(self.origin_y + 1)? as usize;
        if day >= 7 {
            return None;
        }
        let rel = x.checked_sub(self.origin_x + LABEL_COLS)?;
        let month = (rel / self.month_span()) as usize;
        if month >= 12 {
            return None;
        }
        let within = rel % self.month_span();
        if within >= 6 * self.cell_w {
            return None; // month gap
        }
        let week = (within / self.cell_w) as usize;
        Some((month, week, day))
    }
}

/// The full-year heatmap widget
pub struct YearHeatmap<'a> {
    grids: &'a [MonthGrid],
    index: &'a PriceIndex,
    year: i32,
    theme: Theme,
    hover: Option<NaiveDate>,
}

impl<'a> YearHeatmap<'a> {
    pub fn new(grids: &'a [MonthGrid], index: &'a PriceIndex, year: i32, theme: Theme) -> Self {
        Self {
            grids,
            index,
            year,
            theme,
            hover: None,
        }
    }

    /// Mark a date's cell as hovered (drawn in reverse video)
    pub fn with_hover(mut self, hover: Option<NaiveDate>) -> Self {
        self.hover = hover;
        self
    }

    fn render_weekday_labels(&self, layout: &HeatmapLayout, area: Rect, buf: &mut Buffer) {
        // Mon/Wed/Fri only, matching the original's sparse gutter
        for day in [1usize, 3, 5] {
            let y = layout.origin_y + 1 + day as u16;
            if y >= area.y + area.height {
                break;
            }
            buf.set_string(
                layout.origin_x,
                y,
                WEEKDAY_NAMES[day],
                Style::default().fg(self.theme.muted()),
            );
        }
    }

    fn render_month_names(&self, layout: &HeatmapLayout, area: Rect, buf: &mut Buffer) {
        for (mi, grid) in self.grids.iter().enumerate().take(12) {
            let (block_x, _) = layout.cell_pos(mi, 0, 0);
            let block_w = 6 * layout.cell_w();
            let x = block_x + block_w.saturating_sub(grid.name.len() as u16) / 2;
            if x + grid.name.len() as u16 > area.x + area.width {
                break;
            }
            buf.set_string(
                x,
                layout.origin_y,
                grid.name,
                Style::default().fg(self.theme.muted()),
            );
        }
    }
}

impl Widget for YearHeatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let layout = HeatmapLayout::new(area);
        let max_x = area.x + area.width;
        let max_y = area.y + area.height;

        self.render_month_names(&layout, area, buf);
        self.render_weekday_labels(&layout, area, buf);

        let blank = " ".repeat(layout.cell_w() as usize);
        for (mi, grid) in self.grids.iter().enumerate().take(12) {
            for (wi, week) in grid.weeks.iter().enumerate() {
                for (di, &date) in week.iter().enumerate() {
                    // Spill cells from adjacent months stay transparent
                    if !in_month(date, self.year, mi as u32) {
                        continue;
                    }
                    let (x, y) = layout.cell_pos(mi, wi, di);
                    if x + layout.cell_w() > max_x || y >= max_y {
                        continue;
                    }

                    let bucket = self.index.bucket_for(date);
                    let mut style = Style::default().bg(self.theme.bucket_color(bucket));
                    if self.hover == Some(date) {
                        style = style
                            .fg(self.theme.text())
                            .add_modifier(Modifier::REVERSED);
                    }
                    buf.set_string(x, y, &blank, style);
                }
            }
        }
    }
}
