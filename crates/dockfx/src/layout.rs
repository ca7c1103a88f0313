use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ICON_COUNT: usize = 10;
pub const DEFAULT_PADDING: f64 = 10.0;
pub const CONTAINER_RATIO: f64 = 0.9;
pub const FALLBACK_SCREEN_WIDTH: f64 = 400.0;

/// Position of an icon in the row. Not bounded by the icon count: the resolver
/// happily produces `-1` or `icon_count + 3` for pointers outside the icons.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
)]
#[serde(transparent)]
pub struct IconIndex(i64);

impl IconIndex {
    /// Resolved for the strip just left of the first icon. Shares its value
    /// with the idle sentinel, so a pointer there leaves every box at rest.
    pub const IDLE: IconIndex = IconIndex(-1);

    pub fn new(index: i64) -> Self {
        Self(index)
    }

    pub fn from_position(position: usize) -> Self {
        Self(i64::try_from(position).unwrap_or(i64::MAX))
    }

    pub fn distance(self, other: IconIndex) -> u64 {
        self.0.abs_diff(other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSpec {
    pub screen_width: f64,
    pub icon_count: usize,
    pub padding: f64,
    pub container_ratio: f64,
    pub clamp_index: bool,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            screen_width: FALLBACK_SCREEN_WIDTH,
            icon_count: DEFAULT_ICON_COUNT,
            padding: DEFAULT_PADDING,
            container_ratio: CONTAINER_RATIO,
            clamp_index: false,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("screen width must be positive and finite, got {0}")]
    ScreenWidth(f64),
    #[error("padding must be non-negative and finite, got {0}")]
    Padding(f64),
    #[error("container ratio must lie in (0, 1], got {0}")]
    ContainerRatio(f64),
}

/// Constants of the dock row, derived once from the screen width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    container_width: f64,
    icon_size: f64,
    padding: f64,
    icon_count: usize,
    clamp_index: bool,
}

impl Layout {
    pub fn compute(spec: &LayoutSpec) -> Result<Self, LayoutError> {
        if !spec.screen_width.is_finite() || spec.screen_width <= 0.0 {
            return Err(LayoutError::ScreenWidth(spec.screen_width));
        }
        if !spec.padding.is_finite() || spec.padding < 0.0 {
            return Err(LayoutError::Padding(spec.padding));
        }
        if !(spec.container_ratio > 0.0 && spec.container_ratio <= 1.0) {
            return Err(LayoutError::ContainerRatio(spec.container_ratio));
        }

        let container_width = spec.screen_width * spec.container_ratio;
        let icon_size = container_width / (spec.icon_count as f64 + 1.0);

        Ok(Self {
            container_width,
            icon_size,
            padding: spec.padding,
            icon_count: spec.icon_count,
            clamp_index: spec.clamp_index,
        })
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn container_height(&self) -> f64 {
        self.icon_size + 2.0 * self.padding
    }

    pub fn icon_size(&self) -> f64 {
        self.icon_size
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn icon_count(&self) -> usize {
        self.icon_count
    }

    /// Maps a pointer x, measured from the container's left edge, to the icon
    /// under it. The `2 * padding` offset is kept as-is even though the row
    /// starts one padding in; it shifts the hot zones slightly right.
    pub fn resolve_index(&self, pointer_x: f64) -> IconIndex {
        // `as` saturates, NaN becomes 0
        let raw = ((pointer_x - 2.0 * self.padding) / self.icon_size).floor() as i64;
        let index = IconIndex(raw);
        if self.clamp_index {
            self.clamp(index)
        } else {
            index
        }
    }

    pub fn clamp(&self, index: IconIndex) -> IconIndex {
        match self.icon_count {
            0 => index,
            n => IconIndex(index.0.clamp(0, IconIndex::from_position(n - 1).0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(screen_width: f64, icon_count: usize) -> Layout {
        Layout::compute(&LayoutSpec {
            screen_width,
            icon_count,
            ..LayoutSpec::default()
        })
        .unwrap()
    }

    #[test]
    fn test_icon_size_fills_container() {
        for count in 1..40 {
            for width in [1.0, 320.0, 400.0, 1080.0, 2560.5] {
                let l = layout(width, count);
                let total = l.icon_size() * (count as f64 + 1.0);
                assert!((total - l.container_width()).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_reference_scenario() {
        let l = layout(400.0, 10);
        assert!((l.container_width() - 360.0).abs() < 1e-9);
        assert!((l.icon_size() - 360.0 / 11.0).abs() < 1e-9);
        assert_eq!(l.resolve_index(52.73), IconIndex::new(1));
    }

    #[test]
    fn test_zero_icons_uses_whole_container() {
        let l = layout(400.0, 0);
        assert_eq!(l.icon_size(), l.container_width());
    }

    #[test]
    fn test_resolve_is_monotonic() {
        let l = layout(400.0, 10);
        let mut prev = l.resolve_index(-100.0);
        let mut x = -100.0;
        while x < 500.0 {
            let next = l.resolve_index(x);
            assert!(next >= prev, "{} < {} at x = {}", next, prev, x);
            prev = next;
            x += 0.37;
        }
    }

    #[test]
    fn test_resolve_does_not_clamp_by_default() {
        let l = layout(400.0, 10);
        assert_eq!(l.resolve_index(0.0), IconIndex::new(-1));
        assert!(*l.resolve_index(399.0) >= 10);
    }

    #[test]
    fn test_resolve_clamps_when_asked() {
        let l = Layout::compute(&LayoutSpec {
            clamp_index: true,
            ..LayoutSpec::default()
        })
        .unwrap();
        assert_eq!(l.resolve_index(-50.0), IconIndex::new(0));
        assert_eq!(l.resolve_index(10_000.0), IconIndex::new(9));
        assert_eq!(l.resolve_index(52.73), IconIndex::new(1));
    }

    #[test]
    fn test_non_finite_pointer_does_not_panic() {
        let l = layout(400.0, 10);
        assert_eq!(l.resolve_index(f64::NAN), IconIndex::new(0));
        assert_eq!(l.resolve_index(f64::INFINITY), IconIndex::new(i64::MAX));
    }

    #[test]
    fn test_invalid_specs_are_rejected() {
        let bad = [
            (
                LayoutSpec {
                    screen_width: 0.0,
                    ..LayoutSpec::default()
                },
                LayoutError::ScreenWidth(0.0),
            ),
            (
                LayoutSpec {
                    padding: -1.0,
                    ..LayoutSpec::default()
                },
                LayoutError::Padding(-1.0),
            ),
            (
                LayoutSpec {
                    container_ratio: 1.5,
                    ..LayoutSpec::default()
                },
                LayoutError::ContainerRatio(1.5),
            ),
        ];
        for (spec, expected) in bad {
            assert_eq!(Layout::compute(&spec), Err(expected));
        }
        assert!(Layout::compute(&LayoutSpec {
            screen_width: f64::NAN,
            ..LayoutSpec::default()
        })
        .is_err());
    }
}
