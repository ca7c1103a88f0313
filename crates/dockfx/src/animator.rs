use crate::proximity::{Effect, EffectField};
use crate::spring::{Spring, SpringSpec};
use strum::IntoEnumIterator;

/// Drives one box's displayed effect toward its latest target. Scale,
/// translate_y, margin and elevation each ride their own spring; z-index
/// jumps straight to the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectAnimator {
    scale: Spring,
    translate_y: Spring,
    margin: Spring,
    elevation: Spring,
    z_index: f64,
}

impl EffectAnimator {
    pub fn new(initial: Effect, spec: SpringSpec) -> Self {
        Self {
            scale: Spring::new(initial.scale, spec),
            translate_y: Spring::new(initial.translate_y, spec),
            margin: Spring::new(initial.margin, spec),
            elevation: Spring::new(initial.elevation, spec),
            z_index: initial.z_index,
        }
    }

    fn spring(&self, field: EffectField) -> Option<&Spring> {
        match field {
            EffectField::Scale => Some(&self.scale),
            EffectField::TranslateY => Some(&self.translate_y),
            EffectField::Margin => Some(&self.margin),
            EffectField::Elevation => Some(&self.elevation),
            EffectField::ZIndex => None,
        }
    }

    fn spring_mut(&mut self, field: EffectField) -> Option<&mut Spring> {
        match field {
            EffectField::Scale => Some(&mut self.scale),
            EffectField::TranslateY => Some(&mut self.translate_y),
            EffectField::Margin => Some(&mut self.margin),
            EffectField::Elevation => Some(&mut self.elevation),
            EffectField::ZIndex => None,
        }
    }

    fn springs_mut(&mut self) -> [&mut Spring; 4] {
        [
            &mut self.scale,
            &mut self.translate_y,
            &mut self.margin,
            &mut self.elevation,
        ]
    }

    pub fn retarget(&mut self, target: Effect) {
        self.z_index = target.z_index;
        for field in EffectField::iter().filter(|f| f.is_smoothed()) {
            if let Some(spring) = self.spring_mut(field) {
                spring.set_target(target.get(field));
            }
        }
    }

    /// Jumps straight to `effect` with no animation.
    pub fn snap_to(&mut self, effect: Effect) {
        self.z_index = effect.z_index;
        for field in EffectField::iter().filter(|f| f.is_smoothed()) {
            if let Some(spring) = self.spring_mut(field) {
                spring.snap_to(effect.get(field));
            }
        }
    }

    pub fn set_spec(&mut self, spec: SpringSpec) {
        for spring in self.springs_mut() {
            spring.set_spec(spec);
        }
    }

    /// Advances every spring by `dt` seconds. Returns `true` while any of them
    /// is still moving.
    pub fn tick(&mut self, dt: f64) -> bool {
        let mut moving = false;
        for spring in self.springs_mut() {
            moving |= spring.step(dt);
        }
        moving
    }

    pub fn is_settled(&self) -> bool {
        EffectField::iter()
            .filter_map(|f| self.spring(f))
            .all(Spring::is_at_rest)
    }

    pub fn current(&self) -> Effect {
        self.collect(Spring::value)
    }

    pub fn target(&self) -> Effect {
        self.collect(Spring::target)
    }

    fn collect(&self, read: impl Fn(&Spring) -> f64) -> Effect {
        let mut effect = Effect {
            z_index: self.z_index,
            ..Effect::IDLE
        };
        for field in EffectField::iter() {
            if let Some(spring) = self.spring(field) {
                effect.set(field, read(spring));
            }
        }
        effect
    }
}

impl Default for EffectAnimator {
    fn default() -> Self {
        Self::new(Effect::IDLE, SpringSpec::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn lifted() -> Effect {
        Effect {
            scale: 2.0,
            translate_y: -40.0,
            z_index: 10.0,
            margin: 32.0,
            elevation: 10.0,
        }
    }

    #[test]
    fn test_z_index_is_immediate() {
        let mut a = EffectAnimator::default();
        a.retarget(lifted());
        let now = a.current();
        assert_eq!(now.z_index, 10.0);
        assert_eq!(now.scale, 1.0);
        assert_eq!(now.translate_y, 0.0);
        assert_eq!(a.target(), lifted());
    }

    #[test]
    fn test_tick_moves_toward_target_and_settles() {
        let mut a = EffectAnimator::default();
        a.retarget(lifted());

        assert!(a.tick(FRAME));
        let mid = a.current();
        assert!(mid.scale > 1.0 && mid.scale < 2.0);
        assert!(mid.translate_y < 0.0 && mid.translate_y > -40.0);

        let mut frames = 0;
        while a.tick(FRAME) {
            frames += 1;
            assert!(frames < 600);
        }
        assert!(a.is_settled());
        assert_eq!(a.current(), lifted());
    }

    #[test]
    fn test_new_target_supersedes_old() {
        let mut a = EffectAnimator::default();
        a.retarget(lifted());
        for _ in 0..10 {
            a.tick(FRAME);
        }
        a.retarget(Effect::IDLE);
        while a.tick(FRAME) {}
        assert_eq!(a.current(), Effect::IDLE);
    }

    #[test]
    fn test_snap_to_skips_animation() {
        let mut a = EffectAnimator::default();
        a.snap_to(lifted());
        assert!(a.is_settled());
        assert!(!a.tick(FRAME));
        assert_eq!(a.current(), lifted());
    }
}
