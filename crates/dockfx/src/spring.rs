use serde::{Deserialize, Serialize};

/// Critically damped spring configuration. Damping is derived from stiffness
/// and mass (`2 * sqrt(k * m)`), so the value never oscillates when released
/// from rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringSpec {
    pub stiffness: f64,
    pub mass: f64,
    /// Distance from target below which the spring may settle.
    pub rest_displacement: f64,
    /// Speed below which the spring may settle.
    pub rest_speed: f64,
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            mass: 1.0,
            rest_displacement: 0.01,
            rest_speed: 2.0,
        }
    }
}

impl SpringSpec {
    pub fn is_valid(&self) -> bool {
        [self.stiffness, self.mass]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
            && [self.rest_displacement, self.rest_speed]
                .iter()
                .all(|v| v.is_finite() && *v >= 0.0)
    }

    pub fn angular_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    spec: SpringSpec,
}

impl Spring {
    pub fn new(value: f64, spec: SpringSpec) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            spec,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_spec(&mut self, spec: SpringSpec) {
        self.spec = spec;
    }

    /// Supersedes the in-flight target. Velocity carries over so a retarget
    /// mid-flight bends the motion instead of restarting it.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advances by `dt` seconds. Returns `true` while still moving.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.is_at_rest() {
            return false;
        }
        if !(dt.is_finite() && dt > 0.0) {
            return true;
        }

        // closed form of x'' + 2w x' + w^2 x = 0 around the target
        let w = self.spec.angular_frequency();
        let x0 = self.value - self.target;
        let v0 = self.velocity;
        let b = v0 + w * x0;
        let decay = (-w * dt).exp();
        let x = (x0 + b * dt) * decay;
        let v = (v0 - w * b * dt) * decay;

        if x.abs() < self.spec.rest_displacement && v.abs() < self.spec.rest_speed {
            self.value = self.target;
            self.velocity = 0.0;
            return false;
        }

        self.value = self.target + x;
        self.velocity = v;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    #[test]
    fn test_settles_on_target() {
        let mut s = Spring::new(1.0, SpringSpec::default());
        s.set_target(2.0);

        let mut frames = 0;
        while s.step(FRAME) {
            frames += 1;
            assert!(frames < 600, "spring never settled");
        }
        assert_eq!(s.value(), 2.0);
        assert_eq!(s.velocity(), 0.0);
        assert!(s.is_at_rest());
    }

    #[test]
    fn test_no_overshoot_from_rest() {
        let mut s = Spring::new(0.0, SpringSpec::default());
        s.set_target(-40.0);
        let mut prev = s.value();
        while s.step(FRAME) {
            assert!(s.value() <= prev);
            assert!(s.value() >= -40.0);
            prev = s.value();
        }
        assert_eq!(s.value(), -40.0);
    }

    #[test]
    fn test_large_frame_gap_is_stable() {
        let mut s = Spring::new(0.0, SpringSpec::default());
        s.set_target(100.0);
        s.step(5.0);
        assert!(s.value().is_finite());
        assert!((s.value() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut s = Spring::new(0.0, SpringSpec::default());
        s.set_target(10.0);
        for _ in 0..5 {
            s.step(FRAME);
        }
        let v = s.velocity();
        assert!(v > 0.0);
        s.set_target(-10.0);
        assert_eq!(s.velocity(), v);
        s.step(FRAME);
        assert!(s.velocity() < v);
    }

    #[test]
    fn test_at_rest_does_nothing() {
        let mut s = Spring::new(3.0, SpringSpec::default());
        assert!(!s.step(FRAME));
        assert_eq!(s.value(), 3.0);

        s.set_target(4.0);
        assert!(s.step(0.0));
        assert_eq!(s.value(), 3.0);
    }

    #[test]
    fn test_snap_to() {
        let mut s = Spring::new(0.0, SpringSpec::default());
        s.set_target(5.0);
        s.step(FRAME);
        s.snap_to(7.0);
        assert!(s.is_at_rest());
        assert_eq!(s.value(), 7.0);
    }

    #[test]
    fn test_spec_validation() {
        assert!(SpringSpec::default().is_valid());
        let bad = SpringSpec {
            mass: 0.0,
            ..SpringSpec::default()
        };
        assert!(!bad.is_valid());
        let bad = SpringSpec {
            stiffness: f64::NAN,
            ..SpringSpec::default()
        };
        assert!(!bad.is_valid());
    }
}
