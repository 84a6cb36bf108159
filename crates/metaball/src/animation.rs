//! Time-driven progress sources. Both are pure functions of elapsed time so
//! the caller owns the clock; stopping one is simply not asking it again.

use std::f32::consts::PI;
use std::time::Duration;

pub const SWEEP_DURATION: Duration = Duration::from_millis(2500);
pub const GLIDE_DURATION: Duration = Duration::from_millis(300);

/// Accelerate-decelerate curve: slow at both ends, fastest in the middle.
pub fn ease_in_out(t: f32) -> f32 {
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

/// Cursor sweeping from the first dot to the last and back, forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub dot_count: usize,
    /// Length of one leg (first to last dot).
    pub duration: Duration,
}

impl Sweep {
    pub fn new(dot_count: usize, duration: Duration) -> Self {
        Self {
            dot_count,
            duration,
        }
    }

    pub fn progress_at(&self, elapsed: Duration) -> f32 {
        let span = self.dot_count.saturating_sub(1) as f32;
        if span == 0.0 || self.duration.is_zero() {
            return 0.0;
        }

        let legs = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let leg = legs.floor();
        let t = (legs - leg) as f32;
        // odd legs run backwards
        let t = if leg as u64 % 2 == 0 { t } else { 1.0 - t };
        ease_in_out(t) * span
    }
}

/// One-shot eased move of the scroll position between two pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glide {
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
}

impl Glide {
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    pub fn position_at(&self, elapsed: Duration) -> f32 {
        if self.is_finished(elapsed) {
            return self.to;
        }
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32;
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        assert!(close(ease_in_out(0.0), 0.0));
        assert!(close(ease_in_out(0.5), 0.5));
        assert!(close(ease_in_out(1.0), 1.0));
        assert!(ease_in_out(0.1) < 0.1);
        assert!(ease_in_out(0.9) > 0.9);
    }

    #[test]
    fn test_sweep_goes_there_and_back() {
        let sweep = Sweep::new(4, SWEEP_DURATION);
        let ms = Duration::from_millis;

        assert!(close(sweep.progress_at(ms(0)), 0.0));
        assert!(close(sweep.progress_at(ms(1250)), 1.5));
        assert!(close(sweep.progress_at(ms(2500)), 3.0));
        assert!(close(sweep.progress_at(ms(3750)), 1.5));
        assert!(close(sweep.progress_at(ms(5000)), 0.0));
        assert!(close(sweep.progress_at(ms(7500)), 3.0));
    }

    #[test]
    fn test_sweep_with_single_dot_stays_put() {
        let ms = Duration::from_millis;
        assert_eq!(Sweep::new(1, SWEEP_DURATION).progress_at(ms(900)), 0.0);
        assert_eq!(Sweep::new(0, SWEEP_DURATION).progress_at(ms(900)), 0.0);
        assert_eq!(Sweep::new(3, Duration::ZERO).progress_at(ms(900)), 0.0);
    }

    #[test]
    fn test_glide_reaches_target() {
        let glide = Glide::new(1.0, 3.0, GLIDE_DURATION);
        let ms = Duration::from_millis;

        assert!(close(glide.position_at(ms(0)), 1.0));
        assert!(close(glide.position_at(ms(150)), 2.0));
        assert!(!glide.is_finished(ms(299)));
        assert_eq!(glide.position_at(ms(300)), 3.0);
        assert!(glide.is_finished(ms(400)));
    }

    #[test]
    fn test_zero_length_glide_jumps() {
        let glide = Glide::new(0.0, 2.0, Duration::ZERO);
        assert_eq!(glide.position_at(Duration::ZERO), 2.0);
    }
}
