//! Position-to-effect core of the magnification dock: layout constants, the
//! pointer-to-icon resolver, the proximity curves and the springs that smooth
//! them. No toolkit dependencies; `magdock` renders what this computes.

pub mod animator;
pub mod dock;
pub mod interaction;
pub mod interpolate;
pub mod layout;
pub mod proximity;
pub mod spring;

pub use dock::{Dock, DockError, DockSettings};
pub use interaction::{ActivePosition, Phase, PointerEvent};
pub use layout::{IconIndex, Layout, LayoutSpec};
pub use proximity::{Effect, EffectProfile};
pub use spring::SpringSpec;
