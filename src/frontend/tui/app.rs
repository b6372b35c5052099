use super::chrome::{render_header, render_loader, render_mobile_menu};
use super::effects_view::{render_confetti, render_particles};
use super::hit_map::{relative_x, HitMap};
use super::overlays::{new_search_input, render_lab_modal, render_search};
use super::page_view::render_document;
use crate::config::UiConfig;
use crate::core::actions::PageAction;
use crate::core::layout::HEADER_ROWS;
use crate::core::{AppCore, Click, HitTarget};
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tui_textarea::TextArea;

/// Rows moved per mouse wheel notch
const WHEEL_ROWS: i32 = 3;

/// TUI Frontend using ratatui
///
/// Renders the page with ratatui and handles events via crossterm.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    mouse_capture: bool,
    /// Clickable regions from the last frame
    hits: HitMap,
    search_input: TextArea<'static>,
    /// Slider being dragged, if any
    dragging_slider: Option<Rect>,
    frame: u64,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables mouse capture, and enters alternate screen.
    pub fn new(ui: &UiConfig) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to setup terminal")?;
        if ui.mouse_capture {
            execute!(stdout, EnableMouseCapture).context("Failed to enable mouse capture")?;
        }

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(ui.poll_timeout_ms),
            mouse_capture: ui.mouse_capture,
            hits: HitMap::default(),
            search_input: new_search_input(),
            dragging_slider: None,
            frame: 0,
        })
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Only process key press events (ignore repeats and releases)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::key(key_event.code, key_event.modifiers))
            }
            Event::Mouse(mouse_event) => Some(FrontendEvent::mouse(
                mouse_event.kind,
                mouse_event.column,
                mouse_event.row,
                mouse_event.modifiers,
            )),
            Event::Resize(w, h) => Some(FrontendEvent::resize(w, h)),
            Event::Paste(text) => Some(FrontendEvent::paste(text)),
            _ => None,
        }
    }

    /// Route one event into the core. Keys go to the search input while the
    /// search overlay is open.
    pub fn dispatch(&mut self, core: &mut AppCore, event: FrontendEvent, now: Instant) {
        let search_was_open = core.search.is_open();

        match event {
            FrontendEvent::Key { code, modifiers } => {
                if search_was_open {
                    match code {
                        KeyCode::Esc => core.handle_action(PageAction::CloseOverlay, now),
                        KeyCode::Enter => {
                            let query = self.search_input.lines().join(" ");
                            core.submit_search(query.trim(), now);
                        }
                        _ => {
                            self.search_input.input(KeyEvent::new(code, modifiers));
                        }
                    }
                } else {
                    core.handle_key(code, modifiers, now);
                }
            }
            FrontendEvent::Mouse { kind, x, y, .. } => self.dispatch_mouse(core, kind, x, y, now),
            FrontendEvent::Resize { width, height } => core.on_resize(width, height),
            FrontendEvent::Paste { text } => {
                if search_was_open {
                    self.search_input.insert_str(text.replace(['\r', '\n'], " "));
                } else {
                    core.paste_text(&text, now);
                }
            }
        }

        if !search_was_open && core.search.is_open() {
            self.search_input = new_search_input();
        }
    }

    fn dispatch_mouse(
        &mut self,
        core: &mut AppCore,
        kind: MouseEventKind,
        x: u16,
        y: u16,
        now: Instant,
    ) {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let overlay_open = core.search.is_open() || core.lab.is_open() || core.menu.is_open();
                let hit = self.hits.hit(x, y);
                let click = Click {
                    target: hit.map(|(_, t)| t),
                    x,
                    y,
                    rel_x: hit.map_or(0.0, |(rect, _)| relative_x(rect, x)),
                };
                core.handle_click(click, now);

                if overlay_open {
                    return;
                }
                match hit {
                    Some((_, HitTarget::CarouselTrack)) => core.begin_swipe(x),
                    Some((rect, HitTarget::DosageSlider)) => self.dragging_slider = Some(rect),
                    _ => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(rect) = self.dragging_slider {
                    let click = Click {
                        target: Some(HitTarget::DosageSlider),
                        x,
                        y,
                        rel_x: relative_x(rect, x),
                    };
                    core.handle_click(click, now);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.dragging_slider = None;
                if core.is_swiping() {
                    core.end_swipe(x);
                }
            }
            MouseEventKind::ScrollUp => core.scroll_wheel(-WHEEL_ROWS),
            MouseEventKind::ScrollDown => core.scroll_wheel(WHEEL_ROWS),
            _ => {}
        }
    }

    fn draw_frame(
        core: &AppCore,
        now: Instant,
        frame_no: u64,
        search_input: &TextArea<'static>,
        hits: &mut HitMap,
        area: Rect,
        buf: &mut Buffer,
    ) {
        hits.clear();

        let viewport = Rect::new(
            area.x,
            area.y + HEADER_ROWS.min(area.height),
            area.width,
            core.viewport_height().min(area.height.saturating_sub(HEADER_ROWS)),
        );
        let offset = core.scroll.offset();

        // Page document, scrolled. Never narrower than the width the layout
        // wrapped text for, or wrapped rows would overflow the buffer.
        let doc_width = area.width.max(core.layout.content_width);
        let mut doc = Buffer::empty(Rect::new(0, 0, doc_width, core.layout.doc_height.max(1)));
        let mut doc_hits = Vec::new();
        render_document(core, now, &mut doc, &mut doc_hits);
        for row in 0..viewport.height {
            let doc_y = offset + row;
            if doc_y >= doc.area.height {
                break;
            }
            for col in 0..viewport.width {
                if let (Some(src), Some(dst)) = (
                    doc.cell((col, doc_y)).cloned(),
                    buf.cell_mut((viewport.x + col, viewport.y + row)),
                ) {
                    *dst = src;
                }
            }
        }
        for (rect, target) in doc_hits {
            hits.push_doc(rect, target, offset, viewport);
        }

        render_particles(core, now, viewport, buf);
        render_header(core, Rect::new(area.x, area.y, area.width, HEADER_ROWS.min(area.height)), buf, hits);
        render_mobile_menu(core, area, buf, hits);
        render_confetti(core, now, area, buf);

        if core.lab.is_open() {
            render_lab_modal(core, area, buf, hits);
        }
        if core.search.is_open() {
            render_search(core, search_input, area, buf, hits);
        }
        if core.loader.is_visible() {
            hits.clear();
            render_loader(core, frame_no, area, buf);
        }
    }
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        while event::poll(self.poll_timeout)? {
            if let Ok(ev) = event::read() {
                if let Some(frontend_event) = Self::convert_event(ev) {
                    events.push(frontend_event);
                }
            }
        }

        Ok(events)
    }

    fn render(&mut self, core: &mut AppCore, now: Instant) -> Result<()> {
        // Catch size changes that arrived without a resize event
        let size = self.terminal.size()?;
        if (size.width, size.height) != (core.width, core.height) {
            core.on_resize(size.width, size.height);
        }

        let frame_no = self.frame;
        let hits = &mut self.hits;
        let search_input = &self.search_input;
        let page: &AppCore = core;
        self.terminal.draw(|f| {
            let area = f.area();
            Self::draw_frame(page, now, frame_no, search_input, hits, area, f.buffer_mut());
        })?;

        if self.frame == 0 {
            core.mark_content_ready(now);
        }
        self.frame += 1;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        if self.mouse_capture {
            execute!(self.terminal.backend_mut(), DisableMouseCapture)?;
        }
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        let size = self.terminal.size().unwrap_or_default();
        (size.width, size.height)
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::content::{PageContent, SectionId};
    use crossterm::event::{KeyEventState, KeyModifiers, MouseEvent};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_convert_event_drops_key_release() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(TuiFrontend::convert_event(Event::Key(release)).is_none());

        let press = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches!(
            TuiFrontend::convert_event(Event::Key(press)),
            Some(FrontendEvent::Key { code: KeyCode::Char('q'), .. })
        ));
    }

    #[test]
    fn test_convert_event_keeps_mouse_position() {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert!(matches!(
            TuiFrontend::convert_event(Event::Mouse(mouse)),
            Some(FrontendEvent::Mouse { x: 12, y: 7, .. })
        ));
        assert!(TuiFrontend::convert_event(Event::FocusGained).is_none());
    }

    #[test]
    fn test_narrow_terminals_draw_every_section() {
        let t0 = Instant::now();
        let later = t0 + Duration::from_secs(5);
        for width in 1..=12u16 {
            let mut core = AppCore::with_rng(
                Config::default(),
                PageContent::embedded().unwrap(),
                width,
                40,
                true,
                t0,
                StdRng::seed_from_u64(3),
            );
            core.mark_content_ready(t0);
            core.tick(later);
            for section in SectionId::ALL {
                core.handle_action(PageAction::JumpTo(section), later);
                core.tick(later);

                let area = Rect::new(0, 0, width, 40);
                let mut buf = Buffer::empty(area);
                let mut hits = HitMap::default();
                TuiFrontend::draw_frame(&core, later, 0, &new_search_input(), &mut hits, area, &mut buf);
                assert!(!core.loader.is_visible());
            }

            core.handle_action(PageAction::ToggleMenu, later);
            core.handle_action(PageAction::OpenLabReport, later);
            assert!(core.menu.is_open() && core.lab.is_open());
            let area = Rect::new(0, 0, width, 40);
            let mut buf = Buffer::empty(area);
            let mut hits = HitMap::default();
            TuiFrontend::draw_frame(&core, later, 0, &new_search_input(), &mut hits, area, &mut buf);
        }
    }
}
