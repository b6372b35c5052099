//! Floating background particles.
//!
//! Particles are spawned one per interval until the field is full. When a
//! particle's lifetime ends it is retired and a fresh one takes its place, so
//! the field perpetuates itself without any callback chain.

use super::scheduler::RecurringTask;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Particle {
    pub glyph: String,
    /// Horizontal position as a fraction of the viewport width
    pub x: f64,
    /// Drawn bold when true
    pub large: bool,
    spawned: Instant,
    delay: Duration,
    life: Duration,
}

impl Particle {
    /// Rise progress 0.0 (bottom) ..= 1.0 (top), `None` while still delayed
    pub fn progress(&self, now: Instant) -> Option<f64> {
        let start = self.spawned + self.delay;
        if now < start {
            return None;
        }
        let elapsed = now - start;
        Some((elapsed.as_secs_f64() / self.life.as_secs_f64().max(f64::EPSILON)).min(1.0))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.spawned + self.delay + self.life
    }
}

/// Settings for a particle field
#[derive(Debug, Clone)]
pub struct ParticleSettings {
    pub count: usize,
    pub spawn_interval: Duration,
    pub min_life: Duration,
    pub life_jitter: Duration,
    pub max_delay: Duration,
}

pub struct ParticleField {
    glyphs: Vec<String>,
    settings: ParticleSettings,
    spawner: RecurringTask,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(
        glyphs: &[String],
        settings: ParticleSettings,
        now: Instant,
        rng: StdRng,
    ) -> Option<Self> {
        if glyphs.is_empty() || settings.count == 0 {
            tracing::debug!("No particle glyphs configured, skipping particles");
            return None;
        }
        Some(Self {
            glyphs: glyphs.to_vec(),
            spawner: RecurringTask::limited(now, settings.spawn_interval, settings.count),
            settings,
            particles: Vec::new(),
            rng,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Spawn due particles and replace expired ones
    pub fn tick(&mut self, now: Instant) {
        let mut replacements = 0;
        self.particles.retain(|p| {
            let keep = !p.is_expired(now);
            if !keep {
                replacements += 1;
            }
            keep
        });

        let due = self.spawner.poll(now);
        for _ in 0..(due + replacements) {
            let particle = self.spawn(now);
            self.particles.push(particle);
        }
    }

    fn spawn(&mut self, now: Instant) -> Particle {
        let glyph = self
            .glyphs
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| "*".to_string());
        let jitter_ms = self.settings.life_jitter.as_millis() as u64;
        let delay_ms = self.settings.max_delay.as_millis() as u64;
        Particle {
            glyph,
            x: self.rng.random_range(0.0..1.0),
            large: self.rng.random_bool(0.5),
            spawned: now,
            delay: Duration::from_millis(self.rng.random_range(0..=delay_ms)),
            life: self.settings.min_life + Duration::from_millis(self.rng.random_range(0..=jitter_ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn settings() -> ParticleSettings {
        ParticleSettings {
            count: 15,
            spawn_interval: Duration::from_secs(2),
            min_life: Duration::from_secs(15),
            life_jitter: Duration::from_secs(10),
            max_delay: Duration::from_secs(5),
        }
    }

    fn field(now: Instant) -> ParticleField {
        let glyphs = vec!["🍓".to_string(), "🍊".to_string()];
        ParticleField::new(&glyphs, settings(), now, StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn test_spawns_one_per_interval() {
        let t0 = Instant::now();
        let mut f = field(t0);
        f.tick(t0);
        assert_eq!(f.particles().len(), 1);
        f.tick(t0 + Duration::from_millis(1999));
        assert_eq!(f.particles().len(), 1);
        f.tick(t0 + Duration::from_secs(4));
        assert_eq!(f.particles().len(), 3);
    }

    #[test]
    fn test_population_never_exceeds_count() {
        let t0 = Instant::now();
        let mut f = field(t0);
        for s in 0..200 {
            f.tick(t0 + Duration::from_secs(s));
            assert!(f.particles().len() <= 15);
        }
        assert_eq!(f.particles().len(), 15);
    }

    #[test]
    fn test_expired_particles_are_replaced() {
        let t0 = Instant::now();
        let mut f = ParticleField::new(
            &["x".to_string()],
            ParticleSettings {
                count: 1,
                ..settings()
            },
            t0,
            StdRng::seed_from_u64(1),
        )
        .unwrap();
        f.tick(t0);
        assert_eq!(f.particles().len(), 1);

        // Past the longest possible delay + life of the first particle
        let late = t0 + Duration::from_secs(31);
        f.tick(late);
        assert_eq!(f.particles().len(), 1);
        assert!(!f.particles()[0].is_expired(late));
    }

    #[test]
    fn test_particle_progress() {
        let t0 = Instant::now();
        let mut f = field(t0);
        f.tick(t0);
        let p = &f.particles()[0];
        assert!((0.0..1.0).contains(&p.x));
        let far = t0 + Duration::from_secs(40);
        assert_eq!(p.progress(far), Some(1.0));
        assert!(p.is_expired(far));
    }

    #[test]
    fn test_no_glyphs_no_field() {
        assert!(ParticleField::new(&[], settings(), Instant::now(), StdRng::seed_from_u64(0)).is_none());
    }
}
