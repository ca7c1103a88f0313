//! Headless dock: one tracker, one animator per icon.
//!
//! ## Usage
//!
//! 1) Build a [`Dock`] from [`DockSettings`].
//! 2) Feed pointer samples with [`Dock::handle`].
//! 3) Call [`Dock::tick`] once per frame with the elapsed seconds.
//! 4) Render [`Dock::effects`].
//!
//! ```
//! use dockfx::dock::{Dock, DockSettings};
//! use dockfx::interaction::{Phase, PointerEvent};
//!
//! let mut dock = Dock::new(&DockSettings::default()).unwrap();
//! dock.handle(PointerEvent::new(Phase::Start, 52.73));
//!
//! // z-index is applied at once, everything else springs toward the target
//! assert_eq!(dock.effects()[1].z_index, 10.0);
//! assert_eq!(dock.effects()[1].scale, 1.0);
//!
//! while dock.tick(1.0 / 60.0) {}
//! assert_eq!(dock.effects()[1].scale, 2.0);
//! ```

use crate::animator::EffectAnimator;
use crate::interaction::{ActivePosition, PointerEvent, SubscriptionId, Tracker};
use crate::interpolate::InterpolateError;
use crate::layout::{IconIndex, Layout, LayoutError, LayoutSpec};
use crate::proximity::{Effect, EffectProfile, ProximityMapper};
use crate::spring::SpringSpec;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DockSettings {
    pub layout: LayoutSpec,
    pub effect: EffectProfile,
    pub spring: SpringSpec,
}

#[derive(Debug, Error)]
pub enum DockError {
    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("Invalid effect profile: {0}")]
    Interpolate(#[from] InterpolateError),
    #[error("Spring stiffness and mass must be positive, rest thresholds non-negative")]
    InvalidSpring,
}

type Animators = Rc<RefCell<Vec<EffectAnimator>>>;

#[derive(Debug)]
pub struct Dock {
    layout: Layout,
    tracker: Tracker,
    animators: Animators,
    subscription: SubscriptionId,
}

impl Dock {
    pub fn new(settings: &DockSettings) -> Result<Self, DockError> {
        let (layout, mapper) = Self::build(settings)?;
        let animators: Animators = Rc::new(RefCell::new(
            (0..layout.icon_count())
                .map(|_| EffectAnimator::new(Effect::IDLE, settings.spring))
                .collect(),
        ));

        let mut tracker = Tracker::new();
        let subscription = tracker.subscribe(retarget_all(mapper, animators.clone()));

        Ok(Self {
            layout,
            tracker,
            animators,
            subscription,
        })
    }

    fn build(settings: &DockSettings) -> Result<(Layout, ProximityMapper), DockError> {
        if !settings.spring.is_valid() {
            return Err(DockError::InvalidSpring);
        }
        let layout = Layout::compute(&settings.layout)?;
        let mapper = ProximityMapper::new(&settings.effect, layout.icon_size())?;
        Ok((layout, mapper))
    }

    /// Applies new settings in place. Running springs keep their current
    /// values and head for the targets of the new profile; the active
    /// position survives. On error nothing changes.
    pub fn reconfigure(&mut self, settings: &DockSettings) -> Result<(), DockError> {
        let (layout, mapper) = Self::build(settings)?;

        {
            let mut animators = self.animators.borrow_mut();
            animators.resize_with(layout.icon_count(), || {
                EffectAnimator::new(Effect::IDLE, settings.spring)
            });
            for animator in animators.iter_mut() {
                animator.set_spec(settings.spring);
            }
        }

        self.tracker.unsubscribe(self.subscription);
        self.subscription = self
            .tracker
            .subscribe(retarget_all(mapper, self.animators.clone()));
        self.layout = layout;
        let mut retarget = retarget_all(mapper, self.animators.clone());
        retarget(self.tracker.position());

        log::debug!(
            "Dock reconfigured: {} icons of {:.2}px in {:.2}px",
            layout.icon_count(),
            layout.icon_size(),
            layout.container_width()
        );
        Ok(())
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn position(&self) -> ActivePosition {
        self.tracker.position()
    }

    /// Feeds a pointer sample, `x` relative to the container's left edge.
    /// Returns `true` when the active position changed.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        self.tracker.handle(event, &self.layout)
    }

    /// Advances all animations by `dt` seconds. Returns `true` while anything
    /// is still moving.
    pub fn tick(&mut self, dt: f64) -> bool {
        let mut moving = false;
        for animator in self.animators.borrow_mut().iter_mut() {
            moving |= animator.tick(dt);
        }
        moving
    }

    pub fn is_settled(&self) -> bool {
        self.animators.borrow().iter().all(EffectAnimator::is_settled)
    }

    /// Currently displayed effect of each box.
    pub fn effects(&self) -> Vec<Effect> {
        self.animators
            .borrow()
            .iter()
            .map(EffectAnimator::current)
            .collect()
    }

    /// Effect each box is heading for.
    pub fn targets(&self) -> Vec<Effect> {
        self.animators
            .borrow()
            .iter()
            .map(EffectAnimator::target)
            .collect()
    }
}

fn retarget_all(mapper: ProximityMapper, animators: Animators) -> impl FnMut(ActivePosition) {
    move |position| {
        for (i, animator) in animators.borrow_mut().iter_mut().enumerate() {
            animator.retarget(mapper.effect(position, IconIndex::from_position(i)));
        }
    }
}
