//! Draws the page document into an off-screen buffer as tall as the whole
//! page. The frame then copies the scrolled window out of it.

use super::palette;
use crate::core::layout::{wrap_text, SectionSlot, REVIEW_CARD_HEIGHT, STAT_BOX_HEIGHT};
use crate::core::{AppCore, FocusTarget, HitTarget};
use crate::content::SectionId;
use crate::effects::count_up::format_thousands;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use std::time::Instant;

/// Hit regions in document coordinates
pub type DocHits = Vec<(Rect, HitTarget)>;

pub fn render_document(core: &AppCore, now: Instant, buf: &mut Buffer, hits: &mut DocHits) {
    let content_width = core.layout.content_width;
    let x = buf.area.width.saturating_sub(content_width) / 2;

    for slot in &core.layout.slots {
        if !core.is_revealed(slot.id) {
            continue;
        }
        let area = Rect::new(x, slot.top, content_width, slot.height).intersection(buf.area);
        if area.is_empty() {
            continue;
        }
        let mut view = SectionView {
            core,
            now,
            buf: &mut *buf,
            hits: &mut *hits,
        };
        view.render(slot, area);
    }
}

struct SectionView<'a> {
    core: &'a AppCore,
    now: Instant,
    buf: &'a mut Buffer,
    hits: &'a mut DocHits,
}

impl SectionView<'_> {
    fn render(&mut self, slot: &SectionSlot, area: Rect) {
        match slot.id {
            SectionId::Hero => self.hero(area),
            SectionId::Benefits => self.benefits(area),
            SectionId::Ingredients => self.ingredients(area),
            SectionId::Dosage => self.dosage(area),
            SectionId::Reviews => self.reviews(area),
            SectionId::Faq => self.faq(area),
            SectionId::Cta => self.cta(area),
        }
    }

    fn heading(&mut self, area: Rect, text: &str, focus: Option<FocusTarget>) {
        let focused = focus.is_some() && self.core.focus == focus;
        if focused {
            self.buf
                .set_string(area.x, area.y, "▌", Style::default().fg(palette::HIGHLIGHT));
        }
        self.buf
            .set_stringn(area.x + 2, area.y, text, area.width.saturating_sub(2) as usize, palette::heading());
    }

    fn centered(&mut self, area: Rect, y: u16, text: &str, style: Style) -> Rect {
        let width = (Line::from(text).width() as u16).min(area.width);
        let x = area.x + (area.width - width) / 2;
        self.buf.set_stringn(x, y, text, width as usize, style);
        Rect::new(x, y, width, 1)
    }

    fn hero(&mut self, area: Rect) {
        let Some(hero) = &self.core.content.hero else { return };
        let mut y = area.y + 1;
        for line in wrap_text(&hero.title, area.width as usize) {
            self.centered(area, y, &line, palette::heading());
            y += 1;
        }
        y += 1;
        for line in wrap_text(&hero.tagline, area.width as usize) {
            self.centered(area, y, &line, palette::body());
            y += 1;
        }
        y += 1;

        if hero.stats.is_empty() {
            return;
        }
        let count = hero.stats.len() as u16;
        let box_width = area.width / count;
        for (i, stat) in hero.stats.iter().enumerate() {
            let rect = Rect::new(area.x + box_width * i as u16, y, box_width, STAT_BOX_HEIGHT)
                .intersection(area);
            let value = self.core.stat_value(i, self.now).unwrap_or(stat.target);
            let text = format!("{}{}", format_thousands(value), stat.suffix);
            Paragraph::new(Line::from(text).style(Style::default().fg(palette::HIGHLIGHT).add_modifier(Modifier::BOLD)))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(palette::muted())
                        .title(Line::from(stat.label.as_str()).centered()),
                )
                .render(rect, self.buf);
        }
    }

    fn benefits(&mut self, area: Rect) {
        let title = format!("Why {}", self.core.content.brand);
        self.heading(area, &title, None);
        let fade = self.core.fade_in(SectionId::Benefits);
        let mut y = area.y + 2;
        for (i, benefit) in self.core.content.benefits.iter().enumerate() {
            let text = wrap_text(&benefit.text, area.width.saturating_sub(4) as usize);
            let visible = fade.is_some_and(|f| f.is_child_visible(i, self.now));
            if visible {
                let title = format!("{} {}", benefit.icon, benefit.title);
                self.buf.set_stringn(
                    area.x + 2,
                    y,
                    title.trim_start(),
                    area.width.saturating_sub(2) as usize,
                    Style::default().fg(palette::ACCENT).add_modifier(Modifier::BOLD),
                );
                for (row, line) in text.iter().enumerate() {
                    self.buf
                        .set_string(area.x + 4, y + 1 + row as u16, line, palette::body());
                }
            }
            y += 1 + text.len() as u16 + 1;
        }
    }

    fn ingredients(&mut self, area: Rect) {
        let Some(tabs) = &self.core.controllers.tabs else {
            if let Some(ingredients) = &self.core.content.ingredients {
                self.heading(area, &ingredients.title, None);
            }
            return;
        };
        self.heading(area, tabs.title(), Some(FocusTarget::Tabs));

        let mut x = area.x + 2;
        let y = area.y + 2;
        for (i, button, active) in tabs.buttons().iter() {
            let label = format!(" {} ", button.label);
            let width = Line::from(label.as_str()).width() as u16;
            if x + width > area.right() {
                break;
            }
            let style = if active {
                palette::active()
            } else {
                palette::muted()
            };
            self.buf.set_string(x, y, &label, style);
            self.hits.push((Rect::new(x, y, width, 1), HitTarget::TabButton(i)));
            x += width + 1;
        }

        if let Some(pane) = tabs.active_pane() {
            let shown = tabs.visible_items(self.now);
            for (row, item) in pane.items.iter().take(shown).enumerate() {
                let line = format!("• {}", item);
                self.buf.set_stringn(
                    area.x + 4,
                    y + 2 + row as u16,
                    &line,
                    area.width.saturating_sub(4) as usize,
                    palette::body(),
                );
            }
        }
    }

    fn dosage(&mut self, area: Rect) {
        self.heading(area, "Dosage Calculator", Some(FocusTarget::Dosage));
        let Some(calc) = &self.core.controllers.dosage else { return };

        let (min, max) = calc.bounds();
        let y = area.y + 2;
        let min_label = min.to_string();
        let max_label = max.to_string();
        let track_x = area.x + 3 + min_label.len() as u16;
        let track_end = area.right().saturating_sub(3 + max_label.len() as u16);
        let track_width = track_end.saturating_sub(track_x);

        self.buf.set_string(area.x + 2, y, &min_label, palette::muted());
        self.buf.set_string(track_end + 1, y, &max_label, palette::muted());
        if track_width > 0 {
            let handle = (calc.fraction() * (track_width - 1) as f64).round() as u16;
            for col in 0..track_width {
                let (symbol, style) = match col.cmp(&handle) {
                    std::cmp::Ordering::Less => ("━", Style::default().fg(palette::BRAND)),
                    std::cmp::Ordering::Equal => {
                        ("●", Style::default().fg(palette::HIGHLIGHT).add_modifier(Modifier::BOLD))
                    }
                    std::cmp::Ordering::Greater => ("─", palette::muted()),
                };
                self.buf.set_string(track_x + col, y, symbol, style);
            }
            self.hits
                .push((Rect::new(track_x, y, track_width, 1), HitTarget::DosageSlider));
        }

        self.buf
            .set_string(track_x, y + 1, calc.age_label(), palette::body());

        let result_style = if calc.is_pulsing(self.now) {
            Style::default()
                .fg(palette::HIGHLIGHT)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(palette::BRAND).add_modifier(Modifier::BOLD)
        };
        let rect = Rect::new(area.x + 2, y + 3, area.width.saturating_sub(4).min(40), 3)
            .intersection(area);
        Paragraph::new(Line::from(calc.dosage()).style(result_style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(palette::muted())
                    .title("Recommended"),
            )
            .render(rect, self.buf);
    }

    fn reviews(&mut self, area: Rect) {
        self.heading(area, "What Parents Say", Some(FocusTarget::Reviews));
        let Some(carousel) = &self.core.controllers.carousel else { return };

        let y = area.y + 2;
        let footprint = carousel.card_footprint();
        let card_width = self.core.config.carousel.card_width.max(1);
        let track = Rect::new(area.x, y, area.width, REVIEW_CARD_HEIGHT).intersection(area);

        for index in carousel.visible_range() {
            let Some(review) = self.core.content.reviews.get(index) else { continue };
            // Track scrolled left by the carousel offset
            let column = (index as u32 * footprint as u32).saturating_sub(carousel.offset());
            let x = track.x.saturating_add(column.min(u16::MAX as u32) as u16);
            if x >= track.right() {
                break;
            }
            let width = card_width.min(track.right() - x);
            let rect = Rect::new(x, y, width, REVIEW_CARD_HEIGHT).intersection(track);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(palette::muted())
                .title(Line::from(review.author.as_str()).style(palette::heading()));
            let inner = block.inner(rect);
            block.render(rect, self.buf);
            if inner.is_empty() {
                continue;
            }

            let rating = review.rating.min(5) as usize;
            let stars = format!("{}{}", "★".repeat(rating), "☆".repeat(5 - rating));
            self.buf
                .set_string(inner.x, inner.y, stars, Style::default().fg(palette::HIGHLIGHT));
            let body_rows = inner.height.saturating_sub(2) as usize;
            for (row, line) in wrap_text(&review.text, inner.width as usize)
                .iter()
                .take(body_rows)
                .enumerate()
            {
                self.buf.set_stringn(
                    inner.x,
                    inner.y + 1 + row as u16,
                    line,
                    inner.width as usize,
                    palette::body(),
                );
            }
            if !review.location.is_empty() {
                self.buf.set_stringn(
                    inner.x,
                    inner.bottom() - 1,
                    format!("- {}", review.location),
                    inner.width as usize,
                    palette::muted(),
                );
            }
        }
        self.hits.push((track, HitTarget::CarouselTrack));

        let controls = y + REVIEW_CARD_HEIGHT;
        let prev = "◀ Prev";
        let next = "Next ▶";
        self.buf
            .set_string(area.x + 2, controls, prev, palette::control(carousel.prev_dimmed()));
        self.hits
            .push((Rect::new(area.x + 2, controls, 6, 1), HitTarget::CarouselPrev));

        let next_x = area.right().saturating_sub(8);
        self.buf
            .set_string(next_x, controls, next, palette::control(carousel.next_dimmed()));
        self.hits
            .push((Rect::new(next_x, controls, 6, 1), HitTarget::CarouselNext));

        let position = format!(
            "{}-{} of {}",
            carousel.current_index() + 1,
            carousel.visible_range().end,
            carousel.item_count()
        );
        self.centered(area, controls, &position, palette::muted());
    }

    fn faq(&mut self, area: Rect) {
        self.heading(area, "Frequently Asked Questions", Some(FocusTarget::Faq));
        let Some(faq) = &self.core.controllers.faq else { return };
        let focused = self.core.focus == Some(FocusTarget::Faq);

        let mut y = area.y + 2;
        for (i, item, open) in faq.items().iter() {
            let marker = if open { "▾" } else { "▸" };
            let mut style = if open {
                Style::default().fg(palette::BRAND).add_modifier(Modifier::BOLD)
            } else {
                palette::body()
            };
            if focused && faq.cursor() == i {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let line = format!("{} {}", marker, item.question);
            self.buf
                .set_stringn(area.x + 2, y, &line, area.width.saturating_sub(2) as usize, style);
            self.hits.push((
                Rect::new(area.x + 2, y, area.width.saturating_sub(2), 1),
                HitTarget::FaqQuestion(i),
            ));
            y += 1;

            if open {
                for line in wrap_text(&item.answer, area.width.saturating_sub(4) as usize) {
                    self.buf.set_string(area.x + 4, y, line, palette::muted());
                    y += 1;
                }
            }
        }
    }

    fn cta(&mut self, area: Rect) {
        let Some(cta) = &self.core.content.cta else { return };
        let mut y = area.y;
        for line in wrap_text(&cta.headline, area.width as usize) {
            self.centered(area, y, &line, palette::heading());
            y += 1;
        }
        y += 1;

        let focused = self.core.focus == Some(FocusTarget::Cta);
        let variants = self.core.controllers.variants.as_ref();
        let focused_group = variants.map_or(0, |v| v.focused_group());
        for (g, group) in variants.map_or(&[][..], |v| v.groups()).iter().enumerate() {
            let marker = if focused && focused_group == g { "›" } else { " " };
            let label = format!("{} {}: ", marker, group.name());
            self.buf.set_string(area.x + 2, y, &label, palette::muted());
            let mut x = area.x + 2 + Line::from(label.as_str()).width() as u16;
            for (p, pill, active) in group.pills().iter() {
                let text = format!(" {} ", pill.label);
                let width = Line::from(text.as_str()).width() as u16;
                if x + width > area.right() {
                    break;
                }
                let style = if active { palette::active() } else { palette::body() };
                self.buf.set_string(x, y, &text, style);
                self.hits
                    .push((Rect::new(x, y, width, 1), HitTarget::Pill { group: g, pill: p }));
                x += width + 1;
            }
            y += 1;
        }
        y += 1;

        let Some(display) = self.core.price_display() else { return };
        self.centered(
            area,
            y,
            &display.price,
            Style::default().fg(palette::HIGHLIGHT).add_modifier(Modifier::BOLD),
        );
        self.centered(area, y + 1, &display.details, palette::muted());
        y += 3;

        let label = format!(
            "  {}  ",
            cta.button_label.as_deref().unwrap_or(display.cta_label.as_str())
        );
        let rect = self.centered(area, y, &label, palette::button());
        self.hits.push((rect, HitTarget::BuyButton));
        y += 1;

        if let Some(link) = &cta.lab_link {
            let text = format!("🔬 {}", link);
            let rect = self.centered(
                area,
                y,
                &text,
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::UNDERLINED),
            );
            self.hits.push((rect, HitTarget::LabLink));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::content::PageContent;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn revealed_core(t0: Instant) -> (AppCore, Instant) {
        let mut core = AppCore::with_rng(
            Config::default(),
            PageContent::embedded().unwrap(),
            100,
            300,
            true,
            t0,
            StdRng::seed_from_u64(5),
        );
        core.mark_content_ready(t0);
        // Long enough for every reveal and count-up to finish
        let later = t0 + Duration::from_secs(5);
        core.tick(t0 + Duration::from_millis(500));
        core.tick(later);
        (core, later)
    }

    fn render(core: &AppCore, now: Instant) -> (Buffer, DocHits) {
        let mut buf = Buffer::empty(Rect::new(0, 0, core.width, core.layout.doc_height));
        let mut hits = Vec::new();
        render_document(core, now, &mut buf, &mut hits);
        (buf, hits)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    fn contains(buf: &Buffer, needle: &str) -> bool {
        (0..buf.area.height).any(|y| row_text(buf, y).contains(needle))
    }

    #[test]
    fn test_every_widget_records_hits() {
        let t0 = Instant::now();
        let (core, now) = revealed_core(t0);
        let (_, hits) = render(&core, now);
        let has = |pred: fn(&HitTarget) -> bool| hits.iter().any(|(_, t)| pred(t));
        assert!(has(|t| matches!(t, HitTarget::TabButton(2))));
        assert!(has(|t| matches!(t, HitTarget::DosageSlider)));
        assert!(has(|t| matches!(t, HitTarget::CarouselNext)));
        assert!(has(|t| matches!(t, HitTarget::FaqQuestion(3))));
        assert!(has(|t| matches!(t, HitTarget::Pill { group: 1, pill: 1 })));
        assert!(has(|t| matches!(t, HitTarget::BuyButton)));
        assert!(has(|t| matches!(t, HitTarget::LabLink)));
    }

    fn position(buf: &Buffer, needle: &str) -> Option<(usize, u16)> {
        (0..buf.area.height).find_map(|y| {
            let row = row_text(buf, y);
            row.find(needle).map(|at| (row[..at].chars().count(), y))
        })
    }

    #[test]
    fn test_carousel_track_follows_index() {
        let t0 = Instant::now();
        let (mut core, now) = revealed_core(t0);
        let (buf, _) = render(&core, now);
        let first = position(&buf, "Priya S.").unwrap();

        assert!(core.controllers.carousel.as_mut().unwrap().next());
        let (buf, _) = render(&core, now);
        assert!(position(&buf, "Priya S.").is_none());
        assert_eq!(position(&buf, "Rahul M."), Some(first));
    }

    #[test]
    fn test_price_follows_active_pill() {
        let t0 = Instant::now();
        let (mut core, now) = revealed_core(t0);
        let (buf, _) = render(&core, now);
        assert!(contains(&buf, "30 Gummies · 30 Days Pack"));

        core.controllers.variants.as_mut().unwrap().select(1, 1);
        let (buf, _) = render(&core, now);
        assert!(contains(&buf, "60 Gummies · 60 Days Pack (Save ₹100)"));
    }

    #[test]
    fn test_stats_show_final_values() {
        let t0 = Instant::now();
        let (core, now) = revealed_core(t0);
        let (buf, _) = render(&core, now);
        assert!(contains(&buf, "50,000+"));
    }

    #[test]
    fn test_hidden_sections_draw_nothing() {
        let t0 = Instant::now();
        let core = AppCore::with_rng(
            Config::default(),
            PageContent::embedded().unwrap(),
            100,
            300,
            true,
            t0,
            StdRng::seed_from_u64(5),
        );
        let (buf, hits) = render(&core, t0);
        assert!(hits.is_empty());
        assert!(!contains(&buf, "Frequently Asked Questions"));
    }
}
