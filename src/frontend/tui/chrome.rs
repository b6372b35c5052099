//! Sticky header, scroll progress bar, mobile menu and the page loader.

use super::hit_map::HitMap;
use super::palette;
use crate::core::{AppCore, HitTarget};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn render_header(core: &AppCore, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    if area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.y, area.width, 1);
    let bar_style = if core.scroll.header_scrolled() {
        Style::default().bg(palette::PANEL_BG)
    } else {
        Style::default()
    };
    buf.set_style(row, bar_style);

    let brand = format!(" {} ", core.content.brand);
    buf.set_string(row.x, row.y, &brand, palette::heading());
    let mut x = row.x + Line::from(brand.as_str()).width() as u16 + 1;

    // Right side, laid out from the edge inward
    let cta = core.price_display().map(|p| p.cta_label.clone());
    let mut right = row.right();
    if let Some(label) = cta {
        let text = format!(" {} ", label);
        let width = Line::from(text.as_str()).width() as u16;
        if width < right.saturating_sub(x) {
            right -= width;
            buf.set_string(right, row.y, &text, palette::button());
            hits.push(Rect::new(right, row.y, width, 1), HitTarget::HeaderCta);
            right = right.saturating_sub(1);
        }
    }
    if right.saturating_sub(x) > 4 {
        right -= 3;
        buf.set_string(right, row.y, "🔍", palette::body());
        hits.push(Rect::new(right, row.y, 2, 1), HitTarget::SearchTrigger);
    }

    if core.is_mobile() {
        if right.saturating_sub(x) > 3 {
            let label = if core.menu.is_open() { "✕" } else { "☰" };
            buf.set_string(right - 2, row.y, label, Style::default().fg(palette::HIGHLIGHT));
            hits.push(Rect::new(right - 2, row.y, 1, 1), HitTarget::MenuButton);
        }
    } else {
        for link in &core.content.nav {
            let width = Line::from(link.label.as_str()).width() as u16;
            if x + width + 1 >= right {
                break;
            }
            buf.set_string(x, row.y, &link.label, palette::body());
            hits.push(Rect::new(x, row.y, width, 1), HitTarget::NavLink(link.target));
            x += width + 2;
        }
    }

    if area.height > 1 {
        render_progress(core, Rect::new(area.x, area.y + 1, area.width, 1), buf);
    }
}

fn render_progress(core: &AppCore, area: Rect, buf: &mut Buffer) {
    let fraction = core.scroll.progress_percent() / 100.0;
    let filled = (fraction * area.width as f64).round() as u16;
    for col in 0..area.width {
        let (symbol, style) = if col < filled {
            ("━", Style::default().fg(palette::BRAND))
        } else {
            ("─", Style::default().fg(Color::Rgb(50, 50, 60)))
        };
        buf.set_string(area.x + col, area.y, symbol, style);
    }
}

/// Dropdown of nav links under the menu button
pub fn render_mobile_menu(core: &AppCore, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    if !core.menu.is_open() || core.content.nav.is_empty() {
        return;
    }
    let width = core
        .content
        .nav
        .iter()
        .map(|l| Line::from(l.label.as_str()).width() as u16)
        .max()
        .unwrap_or(0)
        + 4;
    let height = core.content.nav.len() as u16 + 2;
    let rect = Rect::new(
        area.right().saturating_sub(width + 1),
        area.y + 1,
        width,
        height,
    )
    .intersection(area);

    Clear.render(rect, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette::muted())
        .style(Style::default().bg(palette::PANEL_BG));
    let inner = block.inner(rect);
    block.render(rect, buf);

    for (i, link) in core.content.nav.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.bottom() {
            break;
        }
        buf.set_stringn(inner.x + 1, y, &link.label, inner.width as usize, palette::body());
        hits.push(Rect::new(inner.x, y, inner.width, 1), HitTarget::NavLink(link.target));
    }
}

/// Full-screen loader shown until the page is ready
pub fn render_loader(core: &AppCore, frame: u64, area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);
    buf.set_style(area, Style::default().bg(palette::PANEL_BG));

    let spinner = SPINNER[(frame / 4) as usize % SPINNER.len()];
    let lines = [
        (spinner.to_string(), Style::default().fg(palette::HIGHLIGHT)),
        (
            core.content.brand.clone(),
            palette::heading().add_modifier(Modifier::BOLD),
        ),
        ("Loading...".to_string(), palette::muted()),
    ];
    let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
    for (i, (text, style)) in lines.iter().enumerate() {
        let width = (Line::from(text.as_str()).width() as u16).min(area.width);
        let x = area.x + (area.width - width) / 2;
        let y = top + i as u16;
        if y < area.bottom() {
            buf.set_stringn(x, y, text, width as usize, *style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::content::{PageContent, SectionId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Instant;

    fn core(width: u16) -> AppCore {
        AppCore::with_rng(
            Config::default(),
            PageContent::embedded().unwrap(),
            width,
            30,
            true,
            Instant::now(),
            StdRng::seed_from_u64(9),
        )
    }

    fn targets(hits: &HitMap, area: Rect) -> Vec<HitTarget> {
        let mut found = Vec::new();
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some((_, t)) = hits.hit(x, y) {
                    if !found.contains(&t) {
                        found.push(t);
                    }
                }
            }
        }
        found
    }

    #[test]
    fn test_wide_header_shows_nav_links() {
        let core = core(120);
        let area = Rect::new(0, 0, 120, 2);
        let mut buf = Buffer::empty(area);
        let mut hits = HitMap::default();
        render_header(&core, area, &mut buf, &mut hits);

        let found = targets(&hits, area);
        assert!(found.contains(&HitTarget::NavLink(SectionId::Faq)));
        assert!(found.contains(&HitTarget::HeaderCta));
        assert!(found.contains(&HitTarget::SearchTrigger));
        assert!(!found.contains(&HitTarget::MenuButton));
    }

    #[test]
    fn test_narrow_header_collapses_to_menu() {
        let mut core = core(60);
        let area = Rect::new(0, 0, 60, 2);
        let mut buf = Buffer::empty(area);
        let mut hits = HitMap::default();
        render_header(&core, area, &mut buf, &mut hits);
        let found = targets(&hits, area);
        assert!(found.contains(&HitTarget::MenuButton));
        assert!(!found.iter().any(|t| matches!(t, HitTarget::NavLink(_))));

        core.menu.toggle();
        let full = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(full);
        let mut hits = HitMap::default();
        render_mobile_menu(&core, full, &mut buf, &mut hits);
        assert_eq!(
            targets(&hits, full)
                .iter()
                .filter(|t| matches!(t, HitTarget::NavLink(_)))
                .count(),
            core.content.nav.len()
        );
    }

    #[test]
    fn test_progress_bar_fills_with_scroll() {
        let mut core = core(100);
        let area = Rect::new(0, 0, 100, 2);
        core.scroll.scroll_to(core.scroll.max_offset());
        let mut buf = Buffer::empty(area);
        render_progress(&core, Rect::new(0, 1, 100, 1), &mut buf);
        assert_eq!(buf.cell((99, 1)).map(|c| c.symbol()), Some("━"));
    }
}
