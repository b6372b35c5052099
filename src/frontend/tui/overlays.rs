//! Search overlay and lab-report modal.

use super::hit_map::HitMap;
use super::palette;
use crate::core::layout::wrap_text;
use crate::core::{AppCore, HitTarget};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Widget},
};
use tui_textarea::TextArea;

/// Fresh single-line search input
pub fn new_search_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text("Search ingredients, dosage, FAQ...");
    input.set_placeholder_style(palette::muted());
    input.set_cursor_line_style(Style::default());
    input.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    input.set_style(palette::body());
    input
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 3,
        width,
        height,
    )
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette::BRAND))
        .title(Line::from(title).style(palette::heading()))
        .style(Style::default().bg(palette::PANEL_BG))
}

/// Close control in the top-right corner of a panel
fn close_control(rect: Rect, buf: &mut Buffer) -> Rect {
    let close = Rect::new(rect.right().saturating_sub(4), rect.y, 3, 1);
    buf.set_string(close.x, close.y, "[x]", Style::default().fg(palette::HIGHLIGHT));
    close
}

pub fn render_search(
    core: &AppCore,
    input: &TextArea<'static>,
    area: Rect,
    buf: &mut Buffer,
    hits: &mut HitMap,
) {
    let rect = centered_rect(area, 60, 6);
    if rect.width < 8 || rect.height < 4 {
        return;
    }
    Clear.render(rect, buf);
    let block = panel("Search");
    let inner = block.inner(rect);
    block.render(rect, buf);
    hits.push(rect, HitTarget::SearchPanel);
    let close = close_control(rect, buf);
    hits.push(close, HitTarget::SearchClose);

    let input_area = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), 1);
    input.render(input_area, buf);

    let status = if core.search.last_query().is_empty() {
        "Enter to jump, Esc to close".to_string()
    } else if core.search.results().is_empty() {
        format!("No results for '{}'", core.search.last_query())
    } else {
        let names: Vec<&str> = core
            .search
            .results()
            .iter()
            .map(|s| s.display_name())
            .collect();
        format!("Found in: {}", names.join(", "))
    };
    buf.set_stringn(
        inner.x + 1,
        inner.y + 2,
        status,
        inner.width.saturating_sub(2) as usize,
        palette::muted(),
    );
}

pub fn render_lab_modal(core: &AppCore, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    let Some(report) = &core.content.lab_report else { return };

    // Dim the page behind the modal
    buf.set_style(area, Style::default().add_modifier(Modifier::DIM));

    let width = 70.min(area.width.saturating_sub(4));
    let body: Vec<String> = report
        .lines
        .iter()
        .flat_map(|l| wrap_text(&format!("✓ {}", l), width.saturating_sub(4) as usize))
        .collect();
    let rect = centered_rect(area, width, body.len() as u16 + 4);
    if rect.width < 8 || rect.height < 3 {
        return;
    }

    Clear.render(rect, buf);
    let block = panel(&report.title);
    let inner = block.inner(rect);
    block.render(rect, buf);
    hits.push(rect, HitTarget::LabPanel);
    let close = close_control(rect, buf);
    hits.push(close, HitTarget::LabClose);

    for (i, line) in body.iter().enumerate() {
        let y = inner.y + 1 + i as u16;
        if y >= inner.bottom() {
            break;
        }
        buf.set_stringn(inner.x + 1, y, line, inner.width.saturating_sub(2) as usize, palette::body());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::content::PageContent;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Instant;

    fn core() -> AppCore {
        AppCore::with_rng(
            Config::default(),
            PageContent::embedded().unwrap(),
            100,
            30,
            false,
            Instant::now(),
            StdRng::seed_from_u64(2),
        )
    }

    #[test]
    fn test_lab_modal_close_sits_on_panel() {
        let core = core();
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        let mut hits = HitMap::default();
        render_lab_modal(&core, area, &mut buf, &mut hits);

        let (panel, _) = hits.hit(50, 10).expect("panel under center");
        let close = hits
            .hit(panel.right() - 3, panel.y)
            .map(|(_, t)| t);
        assert_eq!(close, Some(HitTarget::LabClose));
        assert_eq!(hits.hit(0, 29), None);
    }

    #[test]
    fn test_search_panel_reports_no_results() {
        let mut core = core();
        core.search.set_results("zzz", Vec::new());
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        let mut hits = HitMap::default();
        render_search(&core, &new_search_input(), area, &mut buf, &mut hits);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .filter_map(|p| buf.cell(p).map(|c| c.symbol().to_string()))
            .collect();
        assert!(text.contains("No results for 'zzz'"));
    }
}
