//! Timing and geometry behind the page animations, kept free of DOM types.

use std::collections::HashSet;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const REVEAL_SELECTOR: &str = ".feature-card, .hero-content, .about-content, .contact-form";

pub const RIPPLE_MS: u32 = 600;
pub const PARALLAX_RATE: f64 = -0.5;

pub const COUNTER_TICK_MS: u32 = 16;
pub const DEFAULT_COUNTER_MS: u32 = 2_000;
pub const DEFAULT_FADE_MS: f64 = 300.0;

/// Elements that already played their reveal animation.
#[derive(Debug, Default)]
pub struct RevealSet {
    revealed: HashSet<u32>,
}

impl RevealSet {
    /// True only the first time `key` is seen.
    pub fn mark(&mut self, key: u32) -> bool {
        self.revealed.insert(key)
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }
}

/// Count-up from zero in fixed ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    current: f64,
    target: f64,
    increment: f64,
}

impl Counter {
    pub fn new(target: f64, duration_ms: u32) -> Self {
        let ticks = f64::from(duration_ms) / f64::from(COUNTER_TICK_MS);
        Self { current: 0.0, target, increment: target / ticks }
    }

    /// Advances one tick. Returns the text to show and whether the count is done.
    pub fn tick(&mut self) -> (String, bool) {
        self.current += self.increment;
        if !(self.current < self.target) {
            (self.target.to_string(), true)
        } else {
            (self.current.floor().to_string(), false)
        }
    }
}

/// Share of a fade that has elapsed, clamped to `[0, 1]`.
pub fn fade_progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl Ripple {
    /// Square ripple as big as the larger side of the button, centred on the pointer.
    pub fn at(rect_left: f64, rect_top: f64, width: f64, height: f64, client_x: f64, client_y: f64) -> Self {
        let size = width.max(height);
        Self {
            size,
            left: client_x - rect_left - size / 2.0,
            top: client_y - rect_top - size / 2.0,
        }
    }
}

pub fn parallax_transform(scroll_y: f64) -> String {
    format!("translateY({}px)", scroll_y * PARALLAX_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_happens_once_per_element() {
        let mut set = RevealSet::default();
        // Scrolling back and forth reports the same element many times.
        let sightings = [0, 1, 0, 0, 2, 1, 0];
        let transitions = sightings.iter().filter(|&&key| set.mark(key)).count();
        assert_eq!(transitions, 3);
        assert_eq!(set.len(), 3);
        assert!(!set.mark(2));
    }

    #[test]
    fn counter_reaches_target_exactly() {
        let mut counter = Counter::new(100.0, 160);
        let mut shown = Vec::new();
        loop {
            let (text, done) = counter.tick();
            shown.push(text);
            if done {
                break;
            }
        }
        assert_eq!(shown.len(), 10);
        assert_eq!(shown.first().map(String::as_str), Some("10"));
        assert_eq!(shown.last().map(String::as_str), Some("100"));
    }

    #[test]
    fn counter_shows_whole_numbers_on_the_way() {
        let mut counter = Counter::new(7.0, 64);
        assert_eq!(counter.tick(), ("1".to_string(), false));
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut counter = Counter::new(0.0, DEFAULT_COUNTER_MS);
        assert_eq!(counter.tick(), ("0".to_string(), true));
    }

    #[test]
    fn fade_progress_is_clamped() {
        assert_eq!(fade_progress(0.0, DEFAULT_FADE_MS), 0.0);
        assert_eq!(fade_progress(150.0, DEFAULT_FADE_MS), 0.5);
        assert_eq!(fade_progress(450.0, DEFAULT_FADE_MS), 1.0);
        assert_eq!(fade_progress(10.0, 0.0), 1.0);
    }

    #[test]
    fn ripple_is_centred_on_pointer() {
        let ripple = Ripple::at(10.0, 20.0, 120.0, 40.0, 70.0, 40.0);
        assert_eq!(ripple, Ripple { size: 120.0, left: 0.0, top: -40.0 });
    }

    #[test]
    fn parallax_moves_at_half_speed_upwards() {
        assert_eq!(parallax_transform(200.0), "translateY(-100px)");
        assert_eq!(parallax_transform(35.0), "translateY(-17.5px)");
    }
}
