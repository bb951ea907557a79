use std::time::Duration;

/// Ease-out quadratic, `p · (2 − p)`. Fast off the line, settling softly.
pub fn ease_out(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    p * (2.0 - p)
}

/// An angle transition the host ticker samples once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTransition {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl SpinTransition {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    pub fn angle_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_out(progress)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let spin = SpinTransition::new(1.0, 14.0, Duration::from_secs(5));
        assert_eq!(spin.angle_at(Duration::ZERO), 1.0);
        assert_eq!(spin.angle_at(Duration::from_secs(5)), 14.0);
        assert_eq!(spin.angle_at(Duration::from_secs(9)), 14.0);
    }

    #[test]
    fn advances_monotonically_toward_target() {
        let spin = SpinTransition::new(0.0, -20.0, Duration::from_millis(800));
        let mut last = spin.angle_at(Duration::ZERO);
        for ms in (50..=800).step_by(50) {
            let angle = spin.angle_at(Duration::from_millis(ms));
            assert!(angle <= last, "reversed at {ms}ms");
            last = angle;
        }
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let spin = SpinTransition::new(3.0, 7.0, Duration::ZERO);
        assert_eq!(spin.angle_at(Duration::ZERO), 7.0);
        assert!(spin.is_finished(Duration::ZERO));
    }

    #[test]
    fn finishes_only_after_duration() {
        let spin = SpinTransition::new(0.0, 1.0, Duration::from_millis(300));
        assert!(!spin.is_finished(Duration::from_millis(299)));
        assert!(spin.is_finished(Duration::from_millis(300)));
    }
}
