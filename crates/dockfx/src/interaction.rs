//! Idle/Active state machine for the single drag interaction over the dock.
//!
//! The [`Tracker`] is the only writer of the [`ActivePosition`]. Boxes never
//! read it directly; they subscribe and get the new position pushed to them
//! whenever it changes.

use crate::layout::{IconIndex, Layout};
use crate::proximity::IDLE_DIFF;
use derive_more::Display;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum ActivePosition {
    #[default]
    #[display("idle")]
    Idle,
    #[display("active({_0})")]
    Active(IconIndex),
}

impl ActivePosition {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Distance in icon units from `box_index`, or the idle sentinel. An
    /// active [`IconIndex::IDLE`] maps to the sentinel as well; the drag
    /// stays live and later moves still resolve.
    pub fn diff(self, box_index: IconIndex) -> f64 {
        match self {
            Self::Active(index) if index != IconIndex::IDLE => index.distance(box_index) as f64,
            _ => IDLE_DIFF,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Phase {
    Start,
    Move,
    End,
    Cancel,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: Phase,
    pub x: f64,
}

impl PointerEvent {
    pub fn new(phase: Phase, x: f64) -> Self {
        Self { phase, x }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(ActivePosition)>;

#[derive(Default)]
pub struct Tracker {
    position: ActivePosition,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("position", &self.position)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> ActivePosition {
        self.position
    }

    pub fn subscribe(&mut self, observer: impl FnMut(ActivePosition) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(other, _)| *other != id);
        self.observers.len() != before
    }

    /// Feeds one pointer sample through the state machine. Returns `true` when
    /// the active position changed and subscribers were notified.
    pub fn handle(&mut self, event: PointerEvent, layout: &Layout) -> bool {
        let next = match (event.phase, self.position) {
            (Phase::Start, _) | (Phase::Move, ActivePosition::Active(_)) => {
                ActivePosition::Active(layout.resolve_index(event.x))
            }
            (Phase::Move, ActivePosition::Idle) => {
                log::trace!("Ignoring move at x = {} without a drag in progress", event.x);
                return false;
            }
            (Phase::End | Phase::Cancel | Phase::Fail, _) => ActivePosition::Idle,
        };
        self.set(next)
    }

    fn set(&mut self, next: ActivePosition) -> bool {
        if next == self.position {
            return false;
        }
        log::debug!("Active position {} -> {}", self.position, next);
        self.position = next;
        for (_, observer) in &mut self.observers {
            observer(next);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutSpec;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn layout() -> Layout {
        Layout::compute(&LayoutSpec::default()).unwrap()
    }

    fn ev(phase: Phase, x: f64) -> PointerEvent {
        PointerEvent::new(phase, x)
    }

    #[test]
    fn test_start_then_move_then_end() {
        let l = layout();
        let mut t = Tracker::new();
        assert_eq!(t.position(), ActivePosition::Idle);

        assert!(t.handle(ev(Phase::Start, 52.73), &l));
        assert_eq!(t.position(), ActivePosition::Active(IconIndex::new(1)));

        assert!(t.handle(ev(Phase::Move, 120.0), &l));
        assert_eq!(t.position(), ActivePosition::Active(IconIndex::new(3)));

        assert!(t.handle(ev(Phase::End, 120.0), &l));
        assert_eq!(t.position(), ActivePosition::Idle);
    }

    #[test]
    fn test_terminal_phases_always_reset() {
        let l = layout();
        for phase in [Phase::End, Phase::Cancel, Phase::Fail] {
            let mut t = Tracker::new();
            t.handle(ev(Phase::Start, 200.0), &l);
            t.handle(ev(phase, 200.0), &l);
            assert_eq!(t.position(), ActivePosition::Idle);

            // from idle as well
            t.handle(ev(phase, 10.0), &l);
            assert_eq!(t.position(), ActivePosition::Idle);
        }
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let l = layout();
        let mut t = Tracker::new();
        assert!(!t.handle(ev(Phase::Move, 100.0), &l));
        assert_eq!(t.position(), ActivePosition::Idle);
    }

    #[test]
    fn test_observers_see_changes_only() {
        let l = layout();
        let mut t = Tracker::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = t.subscribe(move |p| sink.borrow_mut().push(p));

        t.handle(ev(Phase::Start, 52.73), &l);
        // same icon, no notification
        t.handle(ev(Phase::Move, 53.0), &l);
        t.handle(ev(Phase::Move, 90.0), &l);
        t.handle(ev(Phase::Cancel, 90.0), &l);

        assert_eq!(
            *seen.borrow(),
            vec![
                ActivePosition::Active(IconIndex::new(1)),
                ActivePosition::Active(IconIndex::new(2)),
                ActivePosition::Idle,
            ]
        );

        assert!(t.unsubscribe(id));
        assert!(!t.unsubscribe(id));
        t.handle(ev(Phase::Start, 52.73), &l);
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_diff_uses_idle_sentinel() {
        assert_eq!(ActivePosition::Idle.diff(IconIndex::new(4)), -1.0);
        let active = ActivePosition::Active(IconIndex::new(2));
        assert_eq!(active.diff(IconIndex::new(2)), 0.0);
        assert_eq!(active.diff(IconIndex::new(9)), 7.0);
        assert_eq!(active.diff(IconIndex::new(-1)), 3.0);

        let padding = ActivePosition::Active(IconIndex::IDLE);
        assert_eq!(padding.diff(IconIndex::new(0)), -1.0);
        assert_eq!(padding.diff(IconIndex::new(5)), -1.0);
        assert_eq!(ActivePosition::Active(IconIndex::new(-2)).diff(IconIndex::new(0)), 2.0);
    }

    #[test]
    fn test_drag_through_left_padding_stays_live() {
        let l = layout();
        let mut t = Tracker::new();
        t.handle(ev(Phase::Start, 10.0), &l);
        assert_eq!(t.position(), ActivePosition::Active(IconIndex::IDLE));

        assert!(t.handle(ev(Phase::Move, 52.73), &l));
        assert_eq!(t.position(), ActivePosition::Active(IconIndex::new(1)));
    }

    #[test]
    fn test_phase_parsing() {
        for phase in Phase::iter() {
            assert_eq!(Phase::from_str(&phase.to_string()), Ok(phase));
        }
        assert_eq!(Phase::from_str("CANCEL"), Ok(Phase::Cancel));
        assert!(Phase::from_str("hover").is_err());
    }
}
