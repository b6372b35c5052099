//! Confetti burst fired from a call-to-action button.
//!
//! Pieces fly out in a straight line from the button center and retire when
//! their lifetime ends. There is no gravity or drag.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::f64::consts::PI;
use std::time::{Duration, Instant};

/// Horizontal cells per velocity unit; terminal cells are about twice as
/// tall as they are wide, so vertical travel is halved
const SPREAD_X: f64 = 1.6;
const SPREAD_Y: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceShape {
    Round,
    Square,
}

#[derive(Debug, Clone)]
pub struct ConfettiPiece {
    pub color: String,
    pub shape: PieceShape,
    origin: (f64, f64),
    vx: f64,
    vy: f64,
}

impl ConfettiPiece {
    /// Screen position after `progress` (0.0..=1.0) of the lifetime
    pub fn position(&self, progress: f64) -> (f64, f64) {
        let p = progress.clamp(0.0, 1.0);
        (
            self.origin.0 + self.vx * SPREAD_X * p,
            self.origin.1 + self.vy * SPREAD_Y * p,
        )
    }
}

#[derive(Debug, Clone)]
pub struct ConfettiBurst {
    started: Instant,
    life: Duration,
    pieces: Vec<ConfettiPiece>,
}

impl ConfettiBurst {
    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.life.as_secs_f64().max(f64::EPSILON)).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.started + self.life
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }
}

/// Owns every live burst and the palette they draw from
pub struct Confetti {
    colors: Vec<String>,
    count: usize,
    life: Duration,
    bursts: Vec<ConfettiBurst>,
    rng: StdRng,
}

impl Confetti {
    pub fn new(colors: &[String], count: usize, life: Duration, rng: StdRng) -> Option<Self> {
        if colors.is_empty() || count == 0 {
            tracing::debug!("No confetti colors configured, skipping confetti");
            return None;
        }
        Some(Self {
            colors: colors.to_vec(),
            count,
            life,
            bursts: Vec::new(),
            rng,
        })
    }

    pub fn bursts(&self) -> &[ConfettiBurst] {
        &self.bursts
    }

    /// Fire a burst centered on `(x, y)` in screen cells
    pub fn burst(&mut self, x: f64, y: f64, now: Instant) {
        let pieces = (0..self.count)
            .map(|_| {
                let angle = self.rng.random_range(0.0..360.0) * (PI / 180.0);
                let velocity = self.rng.random_range(5.0..15.0);
                ConfettiPiece {
                    color: self
                        .colors
                        .choose(&mut self.rng)
                        .cloned()
                        .unwrap_or_default(),
                    shape: if self.rng.random_bool(0.5) {
                        PieceShape::Round
                    } else {
                        PieceShape::Square
                    },
                    origin: (x, y),
                    vx: angle.cos() * velocity,
                    vy: angle.sin() * velocity,
                }
            })
            .collect();

        self.bursts.push(ConfettiBurst {
            started: now,
            life: self.life,
            pieces,
        });
        tracing::debug!(x, y, "confetti burst");
    }

    /// Drop finished bursts
    pub fn tick(&mut self, now: Instant) {
        self.bursts.retain(|b| !b.is_finished(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn confetti() -> Confetti {
        let colors = vec!["#FF6B8A".to_string(), "#FFD93D".to_string()];
        Confetti::new(&colors, 30, Duration::from_millis(1200), StdRng::seed_from_u64(3)).unwrap()
    }

    #[test]
    fn test_burst_has_configured_piece_count() {
        let t0 = Instant::now();
        let mut c = confetti();
        c.burst(40.0, 12.0, t0);
        assert_eq!(c.bursts().len(), 1);
        assert_eq!(c.bursts()[0].pieces().len(), 30);
    }

    #[test]
    fn test_pieces_start_at_origin_and_spread() {
        let t0 = Instant::now();
        let mut c = confetti();
        c.burst(40.0, 12.0, t0);
        for piece in c.bursts()[0].pieces() {
            assert_eq!(piece.position(0.0), (40.0, 12.0));
            let (x, y) = piece.position(1.0);
            let distance = ((x - 40.0) / SPREAD_X).hypot((y - 12.0) / SPREAD_Y);
            assert!((5.0..15.0).contains(&distance), "distance {}", distance);
        }
    }

    #[test]
    fn test_bursts_retire_after_lifetime() {
        let t0 = Instant::now();
        let mut c = confetti();
        c.burst(0.0, 0.0, t0);
        c.burst(0.0, 0.0, t0 + Duration::from_millis(600));
        c.tick(t0 + Duration::from_millis(1200));
        assert_eq!(c.bursts().len(), 1);
        c.tick(t0 + Duration::from_millis(1800));
        assert!(c.bursts().is_empty());
    }

    #[test]
    fn test_no_colors_no_confetti() {
        assert!(Confetti::new(&[], 30, Duration::from_secs(1), StdRng::seed_from_u64(0)).is_none());
    }
}
