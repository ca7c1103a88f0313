use dockfx::{Effect, Layout};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn inflate(&self, by: f64) -> Self {
        Self::new(
            self.x - by,
            self.y - by,
            self.width + 2.0 * by,
            self.height + 2.0 * by,
        )
    }
}

/// Where one box ends up on screen after its effect is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub index: usize,
    pub center: Point,
    pub size: f64,
    pub corner_radius: f64,
    pub z_index: f64,
    pub elevation: f64,
}

impl BoxGeometry {
    pub fn rect(&self) -> Rect {
        Rect::centered(self.center, self.size, self.size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub container: Rect,
    pub corner_radius: f64,
    /// In icon order, not draw order.
    pub boxes: Vec<BoxGeometry>,
}

impl Scene {
    /// The container is centred in the drawing area.
    pub fn container_rect(layout: &Layout, width: f64, height: f64) -> Rect {
        let (cw, ch) = (layout.container_width(), layout.container_height());
        Rect::new((width - cw) / 2.0, (height - ch) / 2.0, cw, ch)
    }

    pub fn compute(layout: &Layout, effects: &[Effect], width: f64, height: f64) -> Self {
        let container = Self::container_rect(layout, width, height);
        Self {
            container,
            corner_radius: layout.padding(),
            boxes: arrange(layout, effects, container),
        }
    }

    /// Boxes sorted by ascending z-index; equal z keeps icon order.
    pub fn draw_order(&self) -> Vec<&BoxGeometry> {
        let mut order: Vec<_> = self.boxes.iter().collect();
        order.sort_by(|a, b| a.z_index.total_cmp(&b.z_index));
        order
    }
}

/// Lays the boxes out as a `space-around` row inside the container padding.
/// Each box occupies `icon_size + 2 * margin`; the free space is shared
/// evenly around the boxes. When the margins overflow the row, the row is
/// centred on the container instead.
///
/// Scale applies about the box centre, and translate_y is applied after it,
/// so the visible lift is `translate_y * scale`.
fn arrange(layout: &Layout, effects: &[Effect], container: Rect) -> Vec<BoxGeometry> {
    let padding = layout.padding();
    let size = layout.icon_size();
    let inner = container.width - 2.0 * padding;

    let used: f64 = effects.iter().map(|e| size + 2.0 * e.margin).sum();
    let free = inner - used;
    let (mut cursor, gap) = match effects.len() {
        n if n > 0 && free >= 0.0 => {
            let gap = free / n as f64;
            (container.x + padding + gap / 2.0, gap)
        }
        _ => (container.x + padding + free / 2.0, 0.0),
    };
    let top = container.y + padding;

    effects
        .iter()
        .enumerate()
        .map(|(index, e)| {
            let left = cursor + e.margin;
            cursor += size + 2.0 * e.margin + gap;

            let scale = e.scale.max(0.0);
            BoxGeometry {
                index,
                center: Point::new(left + size / 2.0, top + size / 2.0 + e.translate_y * scale),
                size: size * scale,
                corner_radius: padding * scale,
                z_index: e.z_index,
                elevation: e.elevation.max(0.0),
            }
        })
        .collect()
}
