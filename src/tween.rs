// ---------------------------------------------------------------------------
// Tween – time-driven numeric interpolation
// ---------------------------------------------------------------------------

/// Interpolates from a start value to a target over a fixed duration.
///
/// Retargeting mid-flight restarts the clock from the currently displayed
/// value; the previous animation is superseded, never cancelled explicitly.
/// Time is an `f64` in seconds (egui's `Input::time`), which keeps this
/// testable without a real clock.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
}

impl Tween {
    /// A finished tween resting at 0.
    pub fn new(duration: f64) -> Self {
        Tween {
            from: 0.0,
            to: 0.0,
            start: f64::NEG_INFINITY,
            duration,
        }
    }

    /// Start animating toward `target` from whatever value is shown at `now`.
    pub fn retarget(&mut self, now: f64, target: f64) {
        self.from = self.value_at(now);
        self.to = target;
        self.start = now;
    }

    /// The interpolated value at time `now`, eased cubic in-out.
    pub fn value_at(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = ((now - self.start) / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * ease_cubic_in_out(t)
    }

    /// Whether the animation has reached its target.
    pub fn finished(&self, now: f64) -> bool {
        now - self.start >= self.duration
    }

    pub fn target(&self) -> f64 {
        self.to
    }
}

/// Symmetric cubic easing: slow start, slow finish.
fn ease_cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tween_is_finished_at_zero() {
        let tween = Tween::new(1.5);
        assert!(tween.finished(0.0));
        assert_eq!(tween.value_at(0.0), 0.0);
    }

    #[test]
    fn reaches_target_after_duration() {
        let mut tween = Tween::new(1.5);
        tween.retarget(10.0, 15_000.0);
        assert_eq!(tween.value_at(10.0), 0.0);
        assert_eq!(tween.value_at(11.5), 15_000.0);
        assert_eq!(tween.value_at(20.0), 15_000.0);
        assert!(!tween.finished(10.5));
        assert!(tween.finished(11.5));
    }

    #[test]
    fn easing_is_monotonic_toward_target() {
        let mut tween = Tween::new(1.0);
        tween.retarget(0.0, 100.0);
        let mut prev = tween.value_at(0.0);
        for i in 1..=20 {
            let v = tween.value_at(i as f64 / 20.0);
            assert!(v >= prev, "value regressed at step {i}");
            prev = v;
        }
        assert_eq!(prev, 100.0);
    }

    #[test]
    fn retarget_mid_flight_starts_from_shown_value() {
        let mut tween = Tween::new(1.0);
        tween.retarget(0.0, 100.0);
        let shown = tween.value_at(0.5);
        assert!(shown > 0.0 && shown < 100.0);

        tween.retarget(0.5, 10.0);
        assert_eq!(tween.value_at(0.5), shown);
        assert_eq!(tween.target(), 10.0);
        assert_eq!(tween.value_at(1.5), 10.0);
    }

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
    }
}
