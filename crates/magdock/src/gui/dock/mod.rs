pub mod frame;
pub mod model;
pub mod view;

pub use frame::FrameStep;
pub use model::{BoxGeometry, Point, Rect, Scene};
pub use view::draw;

pub const SHADOW_STEPS: usize = 4;
pub const SHADOW_OFFSET: f64 = 0.5; // y offset per unit of elevation
pub const SHADOW_SPREAD: f64 = 0.6; // blur spread per unit of elevation
pub const MAX_FRAME_DT: f64 = 0.1; // seconds; longer stalls are not replayed
