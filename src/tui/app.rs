//! Application state and event loop
//!
//! Fetches run on background threads and report through an mpsc channel.
//! Every fetch is tagged with a request sequence number; results whose tag
//! no longer matches the latest request are discarded, so a slow superseded
//! response can never overwrite the index installed by a newer one.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::{Datelike, Local};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEvent,
    MouseEventKind,
};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, DefaultTerminal, Frame};

use crate::calendar::{clamp_year, in_month, year_grids, year_window, MonthGrid};
use crate::services::{normalize_symbol, PriceLoader};
use crate::tui::theme::Theme;
use crate::tui::widgets::{
    header::Header,
    heatmap::{HeatmapLayout, YearHeatmap},
    legend::Legend,
    spinner::Spinner,
    tooltip::{HoverState, TooltipPopup},
};
use crate::types::PriceIndex;

/// Longest accepted symbol input
const MAX_SYMBOL_LEN: usize = 8;

/// Completed fetch, tagged with the request sequence that started it
struct FetchDone {
    seq: u64,
    index: PriceIndex,
}

/// Screen regions derived from the frame size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    pub heatmap: Rect,
    pub legend: Rect,
}

/// Fixed vertical layout: 2 header rows, a blank row, the 8-row grid,
/// a blank row, then the legend. Degrades by truncation on short frames.
pub fn screen_areas(area: Rect) -> ScreenAreas {
    let bottom = area.y + area.height;
    let header_h = area.height.min(2);
    let header = Rect::new(area.x, area.y, area.width, header_h);

    let heat_y = (area.y + header_h + 1).min(bottom);
    let heat_h = HeatmapLayout::HEIGHT.min(bottom - heat_y);
    let heatmap = Rect::new(area.x, heat_y, area.width, heat_h);

    let legend_y = (heat_y + heat_h + 1).min(bottom);
    let legend_h = u16::from(legend_y < bottom);
    let legend = Rect::new(area.x, legend_y, area.width, legend_h);

    ScreenAreas {
        header,
        heatmap,
        legend,
    }
}

/// Main application
pub struct App {
    symbol: String,
    year: i32,
    current_year: i32,
    theme: Theme,
    grids: Vec<MonthGrid>,
    index: PriceIndex,
    hover: HoverState,
    /// Some while the user is typing a new symbol
    input: Option<String>,
    loading: bool,
    /// Full-screen spinner until the first result lands
    first_load: bool,
    spinner_frame: usize,
    should_quit: bool,
    fetch_seq: u64,
    tx: mpsc::Sender<FetchDone>,
    rx: mpsc::Receiver<FetchDone>,
    viewport: Rect,
}

impl App {
    pub fn new(symbol: String, year: i32, theme: Theme) -> Self {
        let current_year = Local::now().year();
        let year = clamp_year(year, current_year);
        let (tx, rx) = mpsc::channel();
        Self {
            symbol,
            year,
            current_year,
            theme,
            grids: year_grids(year),
            index: PriceIndex::default(),
            hover: HoverState::Idle,
            input: None,
            loading: false,
            first_load: true,
            spinner_frame: 0,
            should_quit: false,
            fetch_seq: 0,
            tx,
            rx,
            viewport: Rect::default(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Start a new fetch generation: later results with an older tag are stale
    fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.loading = true;
        self.fetch_seq
    }

    /// Kick off a background fetch for the current (symbol, year)
    pub fn spawn_fetch(&mut self) {
        let seq = self.begin_fetch();
        let tx = self.tx.clone();
        let symbol = self.symbol.clone();
        let year = self.year;
        thread::spawn(move || {
            let index = PriceLoader::new().load(&symbol, year);
            let _ = tx.send(FetchDone { seq, index });
        });
    }

    /// Apply finished fetches, dropping superseded results
    pub fn poll_fetch(&mut self) {
        while let Ok(done) = self.rx.try_recv() {
            if done.seq == self.fetch_seq {
                self.index = done.index;
                self.loading = false;
                self.first_load = false;
            }
        }
    }

    /// Step the displayed year within the rolling 5-year window
    fn step_year(&mut self, delta: i32) {
        let next = clamp_year(self.year + delta, self.current_year);
        if next != self.year {
            self.year = next;
            self.grids = year_grids(next);
            self.index = PriceIndex::default();
            self.hover.leave();
            self.spawn_fetch();
        }
    }

    /// Commit the symbol input buffer, fetching if it changed
    fn commit_input(&mut self) {
        if let Some(buffer) = self.input.take() {
            if let Some(symbol) = normalize_symbol(&buffer) {
                if symbol != self.symbol {
                    self.symbol = symbol;
                    self.index = PriceIndex::default();
                    self.hover.leave();
                    self.spawn_fetch();
                }
            }
        }
    }

    /// Handle keyboard and mouse events
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(input) = &mut self.input {
                    match key.code {
                        KeyCode::Esc => self.input = None,
                        KeyCode::Enter => self.commit_input(),
                        KeyCode::Backspace => {
                            input.pop();
                        }
                        KeyCode::Char(c)
                            if (c.is_ascii_alphanumeric() || c == '.' || c == '-')
                                && input.len() < MAX_SYMBOL_LEN =>
                        {
                            input.push(c.to_ascii_uppercase());
                        }
                        _ => {}
                    }
                    return;
                }

                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        self.should_quit = true;
                    }
                    KeyCode::Char('t') => self.theme = self.theme.toggle(),
                    KeyCode::Char('/') | KeyCode::Char('s') => {
                        self.input = Some(String::new());
                    }
                    KeyCode::Char('r') => self.spawn_fetch(),
                    KeyCode::Left | KeyCode::Char('[') => self.step_year(-1),
                    KeyCode::Right | KeyCode::Char(']') => self.step_year(1),
                    _ => {}
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.viewport = Rect::new(0, 0, width, height);
            }
            _ => {}
        }
    }

    /// Drive the hover state machine from mouse movement
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Moved {
            return;
        }

        let areas = screen_areas(self.viewport);
        let layout = HeatmapLayout::new(areas.heatmap);
        match layout.hit_test(mouse.column, mouse.row) {
            Some((month, week, day)) => {
                let date = self.grids[month].weeks[week][day];
                self.hover.enter(
                    date,
                    in_month(date, self.year, month as u32),
                    mouse.column,
                    mouse.row,
                );
            }
            None => self.hover.leave(),
        }
    }

    /// Advance the spinner while loading
    pub fn tick(&mut self) {
        if self.loading {
            self.spinner_frame = Spinner::next_frame(self.spinner_frame);
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.first_load && self.loading {
            Spinner::new(self.spinner_frame, &self.symbol, self.year).render(area, buf);
            return;
        }

        let areas = screen_areas(area);
        Header::new(
            &self.symbol,
            self.year,
            year_window(self.current_year),
            self.theme,
        )
        .with_input(self.input.as_deref())
        .with_loading(self.loading)
        .render(areas.header, buf);

        let layout = HeatmapLayout::new(areas.heatmap);
        YearHeatmap::new(&self.grids, &self.index, self.year, self.theme)
            .with_hover(self.hover.date())
            .render(areas.heatmap, buf);

        Legend::new(self.theme, layout.cell_w()).render(areas.legend, buf);

        if let HoverState::Showing { date, x, y } = self.hover {
            let popup_area = TooltipPopup::anchored_area(area, x, y);
            TooltipPopup::new(date, self.index.get(date), self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI application
pub fn run(symbol: String, year: i32, theme: Theme) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let mouse_on = crossterm::execute!(std::io::stdout(), EnableMouseCapture).is_ok();
    let result = run_app(&mut terminal, symbol, year, theme);
    if mouse_on {
        let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    }
    ratatui::restore();
    result
}

fn run_app(
    terminal: &mut DefaultTerminal,
    symbol: String,
    year: i32,
    theme: Theme,
) -> anyhow::Result<()> {
    let mut app = App::new(symbol, year, theme);
    app.spawn_fetch();

    loop {
        let size = terminal.size()?;
        app.set_viewport(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        app.poll_fetch();

        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        }
        app.tick();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use crate::types::PriceRow;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn test_app() -> App {
        let mut app = App::new("AAPL".to_string(), 2024, Theme::Dark);
        // Pin time-dependent state so the tests don't drift with the clock
        app.current_year = 2026;
        app.year = 2024;
        app.grids = year_grids(2024);
        app.first_load = false;
        app.set_viewport(Rect::new(0, 0, 100, 20));
        app
    }

    fn index_with(date: NaiveDate) -> PriceIndex {
        PriceIndex::from_rows(vec![PriceRow {
            date,
            open: 100.0,
            close: 103.0,
            high: None,
            low: None,
            volume: None,
        }])
    }

    // ========== fetch supersede tests ==========

    #[test]
    fn test_stale_fetch_result_is_dropped() {
        let mut app = test_app();
        let first = app.begin_fetch();
        let second = app.begin_fetch();
        assert!(second > first);

        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        // Stale result arrives after the newer request started
        app.tx
            .send(FetchDone {
                seq: first,
                index: index_with(date),
            })
            .unwrap();
        app.poll_fetch();
        assert!(app.index.is_empty(), "stale result must not install");
        assert!(app.loading, "still waiting on the newer request");

        app.tx
            .send(FetchDone {
                seq: second,
                index: index_with(date),
            })
            .unwrap();
        app.poll_fetch();
        assert_eq!(app.index.len(), 1);
        assert!(!app.loading);
    }

    #[test]
    fn test_newer_result_survives_late_stale_arrival() {
        let mut app = test_app();
        let first = app.begin_fetch();
        let second = app.begin_fetch();

        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        app.tx
            .send(FetchDone {
                seq: second,
                index: index_with(date),
            })
            .unwrap();
        app.poll_fetch();
        assert_eq!(app.index.len(), 1);

        // The superseded response lands last; it must not overwrite
        app.tx
            .send(FetchDone {
                seq: first,
                index: PriceIndex::default(),
            })
            .unwrap();
        app.poll_fetch();
        assert_eq!(app.index.len(), 1);
    }

    // ========== year stepping tests ==========

    #[test]
    fn test_year_steps_within_window() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Right));
        assert_eq!(app.year, 2025);
        app.handle_event(key(KeyCode::Left));
        app.handle_event(key(KeyCode::Left));
        assert_eq!(app.year, 2023);
    }

    #[test]
    fn test_year_clamps_at_window_edges() {
        let mut app = test_app();
        app.year = 2022;
        for _ in 0..5 {
            app.handle_event(key(KeyCode::Left));
        }
        assert_eq!(app.year, 2022);

        app.year = 2026;
        app.handle_event(key(KeyCode::Right));
        assert_eq!(app.year, 2026);
    }

    #[test]
    fn test_year_change_clears_index_and_rebuilds_grids() {
        let mut app = test_app();
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        app.index = index_with(date);
        app.handle_event(key(KeyCode::Right));
        assert!(app.index.is_empty());
        assert_eq!(app.grids[0].name, "Jan");
        assert!(in_month(app.grids[0].weeks[1][0], 2025, 0));
    }

    // ========== symbol input tests ==========

    #[test]
    fn test_symbol_input_uppercases_and_commits() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Char('/')));
        for c in ['m', 's', 'f', 't'] {
            app.handle_event(key(KeyCode::Char(c)));
        }
        assert_eq!(app.input.as_deref(), Some("MSFT"));
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(app.symbol, "MSFT");
        assert!(app.input.is_none());
        assert!(app.loading);
    }

    #[test]
    fn test_symbol_input_escape_cancels() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Char('s')));
        app.handle_event(key(KeyCode::Char('x')));
        app.handle_event(key(KeyCode::Esc));
        assert!(app.input.is_none());
        assert_eq!(app.symbol, "AAPL");
        assert!(!app.should_quit(), "Esc in input mode only cancels input");
    }

    #[test]
    fn test_blank_symbol_input_is_ignored() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Char('/')));
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(app.symbol, "AAPL");
        assert!(!app.loading);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_theme_toggle_key() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Char('t')));
        assert_eq!(app.theme, Theme::Light);
    }

    // ========== mouse hover tests ==========

    fn mouse_moved(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_mouse_over_in_month_cell_shows_tooltip() {
        let mut app = test_app();
        let areas = screen_areas(app.viewport);
        let layout = HeatmapLayout::new(areas.heatmap);
        // Jan 2024, week 0, day 1 = Jan 1 (in month)
        let (x, y) = layout.cell_pos(0, 0, 1);
        app.handle_event(mouse_moved(x, y));
        assert_eq!(
            app.hover.date(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
    }

    #[test]
    fn test_mouse_over_spill_cell_is_ignored() {
        let mut app = test_app();
        let areas = screen_areas(app.viewport);
        let layout = HeatmapLayout::new(areas.heatmap);
        // Jan 2024, week 0, day 0 = Dec 31 2023 (spill)
        let (sx, sy) = layout.cell_pos(0, 0, 0);
        let (ix, iy) = layout.cell_pos(0, 0, 1);

        app.handle_event(mouse_moved(sx, sy));
        assert_eq!(app.hover.date(), None);

        // Spill cells also keep an existing tooltip
        app.handle_event(mouse_moved(ix, iy));
        app.handle_event(mouse_moved(sx, sy));
        assert_eq!(
            app.hover.date(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
    }

    #[test]
    fn test_mouse_off_grid_clears_tooltip() {
        let mut app = test_app();
        let areas = screen_areas(app.viewport);
        let layout = HeatmapLayout::new(areas.heatmap);
        let (x, y) = layout.cell_pos(0, 0, 1);
        app.handle_event(mouse_moved(x, y));
        assert!(app.hover.date().is_some());

        app.handle_event(mouse_moved(0, 0));
        assert_eq!(app.hover.date(), None);
    }

    // ========== layout tests ==========

    #[test]
    fn test_screen_areas_stack() {
        let areas = screen_areas(Rect::new(0, 0, 100, 20));
        assert_eq!(areas.header.height, 2);
        assert_eq!(areas.heatmap.y, 3);
        assert_eq!(areas.heatmap.height, HeatmapLayout::HEIGHT);
        assert_eq!(areas.legend.y, 12);
        assert_eq!(areas.legend.height, 1);
    }

    #[test]
    fn test_screen_areas_tiny_frame() {
        let areas = screen_areas(Rect::new(0, 0, 10, 3));
        assert!(areas.header.height <= 2);
        assert_eq!(areas.legend.height, 0);
    }

    // ========== render smoke test ==========

    #[test]
    fn test_app_renders_without_data() {
        let app = test_app();
        let area = Rect::new(0, 0, 100, 20);
        let mut buf = Buffer::empty(area);
        (&app).render(area, &mut buf);
        // Header symbol visible
        let top: String = (0..20).map(|x| buf.cell((x, 0)).unwrap().symbol().to_string()).collect();
        assert!(top.contains("AAPL"));
    }
}
