//! Dosage calculator: an age slider mapped to a daily dose.

use crate::content::DosageDef;
use regex::Regex;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

const PULSE: Duration = Duration::from_millis(200);

fn leading_int() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("static regex"))
}

/// Integer prefix of a string, like a slider's raw value attribute.
/// `"12"`, `" 7 years"` and `"+3x"` parse; `"abc"` and `""` do not.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    leading_int()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[derive(Debug, Clone)]
pub struct DosageCalculator {
    min_age: u32,
    max_age: u32,
    default_age: u32,
    threshold_age: u32,
    low_dose: String,
    high_dose: String,
    age: u32,
    pulse_until: Option<Instant>,
}

impl DosageCalculator {
    pub fn discover(def: &DosageDef) -> Option<Self> {
        if def.min_age > def.max_age {
            tracing::warn!(
                min = def.min_age,
                max = def.max_age,
                "Dosage slider bounds are inverted, skipping calculator"
            );
            return None;
        }
        let default_age = def
            .initial_age
            .unwrap_or(def.min_age)
            .clamp(def.min_age, def.max_age);
        Some(Self {
            min_age: def.min_age,
            max_age: def.max_age,
            default_age,
            threshold_age: def.threshold_age,
            low_dose: def.low_dose.clone(),
            high_dose: def.high_dose.clone(),
            age: default_age,
            pulse_until: None,
        })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.min_age, self.max_age)
    }

    /// Apply a raw slider value. Non-numeric input falls back to the
    /// default age; numbers are clamped to the slider bounds.
    pub fn set_from_input(&mut self, raw: &str, now: Instant) {
        let age = match parse_leading_int(raw) {
            Some(n) => n.clamp(self.min_age as i64, self.max_age as i64) as u32,
            None => {
                tracing::debug!(raw, "Non-numeric slider value, using default age");
                self.default_age
            }
        };
        self.set_age(age, now);
    }

    pub fn set_age(&mut self, age: u32, now: Instant) {
        self.age = age.clamp(self.min_age, self.max_age);
        self.pulse_until = Some(now + PULSE);
    }

    pub fn increment(&mut self, now: Instant) {
        self.set_age(self.age.saturating_add(1), now);
    }

    pub fn decrement(&mut self, now: Instant) {
        self.set_age(self.age.saturating_sub(1), now);
    }

    pub fn age_label(&self) -> String {
        format!("{} years", self.age)
    }

    pub fn dosage(&self) -> &str {
        if self.age >= self.threshold_age {
            &self.high_dose
        } else {
            &self.low_dose
        }
    }

    /// Position of the handle as a fraction of the track, 0.0..=1.0
    pub fn fraction(&self) -> f64 {
        let span = self.max_age - self.min_age;
        if span == 0 {
            return 0.0;
        }
        (self.age - self.min_age) as f64 / span as f64
    }

    /// Set the age from a position on the slider track
    pub fn set_fraction(&mut self, fraction: f64, now: Instant) {
        let fraction = fraction.clamp(0.0, 1.0);
        let span = (self.max_age - self.min_age) as f64;
        let age = self.min_age + (fraction * span).round() as u32;
        self.set_age(age, now);
    }

    /// True while the result highlight animation runs
    pub fn is_pulsing(&self, now: Instant) -> bool {
        self.pulse_until.is_some_and(|until| now < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def() -> DosageDef {
        DosageDef {
            min_age: 2,
            max_age: 14,
            initial_age: Some(4),
            threshold_age: 10,
            low_dose: "1 Gummy / Day".to_string(),
            high_dose: "1-2 Gummies / Day".to_string(),
        }
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int(" 7 years"), Some(7));
        assert_eq!(parse_leading_int("+3x"), Some(3));
        assert_eq!(parse_leading_int("-4"), Some(-4));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_dose_threshold() {
        let t0 = Instant::now();
        let mut calc = DosageCalculator::discover(&def()).unwrap();
        assert_eq!(calc.age_label(), "4 years");
        assert_eq!(calc.dosage(), "1 Gummy / Day");

        calc.set_from_input("9", t0);
        assert_eq!(calc.dosage(), "1 Gummy / Day");
        calc.set_from_input("10", t0);
        assert_eq!(calc.dosage(), "1-2 Gummies / Day");
        assert_eq!(calc.age_label(), "10 years");
    }

    #[test]
    fn test_non_numeric_input_defaults_safely() {
        let t0 = Instant::now();
        let mut calc = DosageCalculator::discover(&def()).unwrap();
        calc.set_from_input("12", t0);
        calc.set_from_input("twelve", t0);
        assert_eq!(calc.age(), 4);
    }

    #[test]
    fn test_input_clamped_to_bounds() {
        let t0 = Instant::now();
        let mut calc = DosageCalculator::discover(&def()).unwrap();
        calc.set_from_input("99", t0);
        assert_eq!(calc.age(), 14);
        calc.set_from_input("-5", t0);
        assert_eq!(calc.age(), 2);
        calc.decrement(t0);
        assert_eq!(calc.age(), 2);
    }

    #[test]
    fn test_pulse_lasts_200ms() {
        let t0 = Instant::now();
        let mut calc = DosageCalculator::discover(&def()).unwrap();
        assert!(!calc.is_pulsing(t0));
        calc.increment(t0);
        assert!(calc.is_pulsing(t0 + Duration::from_millis(199)));
        assert!(!calc.is_pulsing(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_fraction_round_trip() {
        let t0 = Instant::now();
        let mut calc = DosageCalculator::discover(&def()).unwrap();
        calc.set_fraction(1.0, t0);
        assert_eq!(calc.age(), 14);
        calc.set_fraction(0.5, t0);
        assert_eq!(calc.age(), 8);
        assert!((calc.fraction() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_bounds_skip_widget() {
        let mut bad = def();
        bad.min_age = 20;
        assert!(DosageCalculator::discover(&bad).is_none());
    }
}
