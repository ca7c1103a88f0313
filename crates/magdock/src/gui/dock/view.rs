use super::model::{BoxGeometry, Rect, Scene};
use super::{SHADOW_OFFSET, SHADOW_SPREAD, SHADOW_STEPS};
use crate::gui::theme::DockColors;
use cairo::Context;
use palette::{Alpha, Srgba};
use std::f64::consts::PI;

struct BoxRenderer<'a> {
    geometry: &'a BoxGeometry,
    fill: Srgba<f64>,
    shadow: Srgba<f64>,
}

impl<'a> BoxRenderer<'a> {
    fn new(geometry: &'a BoxGeometry, colors: &DockColors) -> Self {
        Self {
            geometry,
            fill: colors.for_box(geometry.index),
            shadow: colors.shadow,
        }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        if self.geometry.size <= 0.0 {
            return Ok(());
        }
        self.draw_shadow(cr)?;
        self.draw_body(cr)
    }

    /// Stacked translucent rounded rects, wider and fainter outward.
    fn draw_shadow(&self, cr: &Context) -> Result<(), cairo::Error> {
        let elevation = self.geometry.elevation;
        if elevation <= 0.0 {
            return Ok(());
        }

        let mut base = self.geometry.rect();
        base.y += elevation * SHADOW_OFFSET;
        let layer = Alpha {
            color: self.shadow.color,
            alpha: self.shadow.alpha / SHADOW_STEPS as f64,
        };

        for step in 1..=SHADOW_STEPS {
            let spread = elevation * SHADOW_SPREAD * step as f64 / SHADOW_STEPS as f64;
            set_source(cr, layer);
            rounded_rect(cr, &base.inflate(spread), self.geometry.corner_radius + spread);
            cr.fill()?;
        }
        Ok(())
    }

    fn draw_body(&self, cr: &Context) -> Result<(), cairo::Error> {
        set_source(cr, self.fill);
        rounded_rect(cr, &self.geometry.rect(), self.geometry.corner_radius);
        cr.fill()
    }
}

pub fn draw(cr: &Context, scene: &Scene, colors: &DockColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.background);
    cr.paint()?;

    set_source(cr, colors.container);
    rounded_rect(cr, &scene.container, scene.corner_radius);
    cr.fill()?;

    for geometry in scene.draw_order() {
        BoxRenderer::new(geometry, colors).draw(cr)?;
    }
    Ok(())
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn rounded_rect(cr: &Context, rect: &Rect, radius: f64) {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    cr.new_sub_path();
    cr.arc(rect.right() - r, rect.y + r, r, -PI / 2.0, 0.0);
    cr.arc(rect.right() - r, rect.bottom() - r, r, 0.0, PI / 2.0);
    cr.arc(rect.x + r, rect.bottom() - r, r, PI / 2.0, PI);
    cr.arc(rect.x + r, rect.y + r, r, PI, 1.5 * PI);
    cr.close_path();
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairo::{Format, ImageSurface};
    use dockfx::{Effect, Layout, LayoutSpec};

    fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> [u8; 4] {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let i = y * stride + x * 4;
        [data[i], data[i + 1], data[i + 2], data[i + 3]]
    }

    #[test]
    fn test_renders_idle_dock() {
        let layout = Layout::compute(&LayoutSpec::default()).unwrap();
        let scene = Scene::compute(&layout, &[Effect::IDLE; 10], 400.0, 300.0);
        let mut surface = ImageSurface::create(Format::ARgb32, 400, 300).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            draw(&cr, &scene, &DockColors::default()).unwrap();
        }
        surface.flush();

        // BGRA in memory on little-endian
        assert_eq!(pixel(&mut surface, 2, 2), [0, 0, 0, 255]);

        let first = scene.boxes[0].center;
        assert_eq!(
            pixel(&mut surface, first.x as usize, first.y as usize),
            [128, 0, 128, 255]
        );
        let second = scene.boxes[1].center;
        assert_eq!(
            pixel(&mut surface, second.x as usize, second.y as usize),
            [0, 0, 255, 255]
        );

        // container padding strip above the boxes is white
        let c = scene.container;
        assert_eq!(
            pixel(&mut surface, (c.x + c.width / 2.0) as usize, (c.y + 3.0) as usize),
            [255, 255, 255, 255]
        );
    }
}
