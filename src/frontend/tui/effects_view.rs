//! Paints floating particles and confetti over the page.

use super::palette;
use crate::core::AppCore;
use crate::effects::confetti::PieceShape;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};
use std::time::Instant;

/// Particles rise from the bottom of `area` to its top and only land on
/// blank cells so page text stays readable
pub fn render_particles(core: &AppCore, now: Instant, area: Rect, buf: &mut Buffer) {
    let Some(field) = &core.particles else { return };
    if area.is_empty() {
        return;
    }
    for particle in field.particles() {
        let Some(progress) = particle.progress(now) else { continue };
        let x = area.x + (particle.x * area.width.saturating_sub(2) as f64) as u16;
        let rise = (progress * area.height.saturating_sub(1) as f64).round() as u16;
        let y = area.bottom().saturating_sub(1).saturating_sub(rise);
        if !is_blank(buf, x, y) || !is_blank(buf, x + 1, y) {
            continue;
        }
        let style = if particle.large {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        buf.set_string(x, y, &particle.glyph, style);
    }
}

fn is_blank(buf: &Buffer, x: u16, y: u16) -> bool {
    buf.cell((x, y)).is_some_and(|c| c.symbol() == " ")
}

pub fn render_confetti(core: &AppCore, now: Instant, area: Rect, buf: &mut Buffer) {
    let Some(confetti) = &core.confetti else { return };
    for burst in confetti.bursts() {
        let progress = burst.progress(now);
        for piece in burst.pieces() {
            let (x, y) = piece.position(progress);
            if x < area.x as f64 || y < area.y as f64 {
                continue;
            }
            let (x, y) = (x.round() as u16, y.round() as u16);
            if x >= area.right() || y >= area.bottom() {
                continue;
            }
            let symbol = match piece.shape {
                PieceShape::Round => "●",
                PieceShape::Square => "■",
            };
            let color = palette::parse_hex_color(&piece.color).unwrap_or(Color::White);
            buf.set_string(x, y, symbol, Style::default().fg(color));
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

    #[test]
    fn test_confetti_lands_inside_area() {
        let t0 = Instant::now();
        let mut core = AppCore::with_rng(
            Config::default(),
            PageContent::embedded().unwrap(),
            80,
            40,
            true,
            t0,
            StdRng::seed_from_u64(11),
        );
        core.confetti.as_mut().unwrap().burst(40.0, 20.0, t0);

        let area = Rect::new(0, 0, 80, 40);
        let mut buf = Buffer::empty(area);
        render_confetti(&core, t0 + Duration::from_millis(600), area, &mut buf);
        let painted = (0..40u16)
            .flat_map(|y| (0..80u16).map(move |x| (x, y)))
            .filter(|p| matches!(buf.cell(*p).map(|c| c.symbol()), Some("●") | Some("■")))
            .count();
        assert!(painted > 0);
    }

    #[test]
    fn test_particles_skip_text() {
        let t0 = Instant::now();
        let mut core = AppCore::with_rng(
            Config::default(),
            PageContent::embedded().unwrap(),
            80,
            20,
            true,
            t0,
            StdRng::seed_from_u64(11),
        );
        core.tick(t0);

        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        for y in 0..20 {
            buf.set_string(0, y, "x".repeat(80), Style::default());
        }
        render_particles(&core, t0 + Duration::from_secs(6), area, &mut buf);
        assert!((0..20).all(|y| (0..80).all(|x| buf.cell((x, y)).map(|c| c.symbol()) == Some("x"))));
    }
}
