// scroll.rs - Eased scroll tracking
//
// Discrete exponential filter evaluated once per animation frame.
// Not corrected for frame time, so easing speed follows the refresh rate.

pub struct ScrollState {
    current: f64,
    target: f64,
    ease: f64,
}

impl ScrollState {
    pub fn new(ease: f64) -> Self {
        debug_assert!(ease > 0.0 && ease <= 1.0);
        Self { current: 0.0, target: 0.0, ease }
    }

    /// Feed the raw scroll offset, returns the new smoothed offset
    pub fn advance(&mut self, target: f64) -> f64 {
        self.target = target;
        self.current = lerp(self.current, self.target, self.ease);
        self.current
    }

    /// Distance still to travel; stands in for scroll speed
    pub fn velocity(&self) -> f64 {
        self.target - self.current
    }

    /// CSS transform for the scrollable container
    pub fn transform(&self) -> String {
        // 0.0 - x keeps a resting offset as "0" rather than "-0"
        format!("translate3d(0,{}px, 0)", 0.0 - self.current)
    }
}

#[inline]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start * (1.0 - t) + end * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
        assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
    }

    #[test]
    fn converges_geometrically_for_any_ease() {
        const EPS: f64 = 1e-3;
        let target = 1000.0;

        for &t in &[0.01, 0.075, 0.25, 0.5, 0.9, 1.0] {
            let mut s = ScrollState::new(t);
            let mut err = (target - s.current).abs();

            // |e_n| = |e_0| (1 - t)^n
            let bound = if t >= 1.0 { 1 } else { ((EPS / target).ln() / (1.0 - t).ln()).ceil() as usize + 1 };

            let mut steps = 0;
            while err >= EPS {
                s.advance(target);
                let next = (target - s.current).abs();
                assert!(next < err, "t={} step {}: {} !< {}", t, steps, next, err);
                err = next;
                steps += 1;
                assert!(steps <= bound, "t={} did not converge within {} steps", t, bound);
            }
        }
    }

    #[test]
    fn full_ease_snaps_to_target() {
        let mut s = ScrollState::new(1.0);
        assert_eq!(s.advance(321.5), 321.5);
        assert_eq!(s.velocity(), 0.0);
    }

    #[test]
    fn first_frame_moves_by_ease_fraction() {
        let mut s = ScrollState::new(0.075);
        let cur = s.advance(400.0);
        assert!((cur - 30.0).abs() < 1e-9);
        assert_eq!(s.target, 400.0);
        assert!((s.velocity() - 370.0).abs() < 1e-9);
    }

    #[test]
    fn transform_translates_up_by_current() {
        let mut s = ScrollState::new(0.5);
        assert_eq!(s.transform(), "translate3d(0,0px, 0)");
        s.advance(200.0);
        assert_eq!(s.transform(), "translate3d(0,-100px, 0)");
    }
}
