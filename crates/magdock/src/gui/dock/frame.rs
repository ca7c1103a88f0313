use super::MAX_FRAME_DT;

/// Frame-clock bookkeeping for the tick callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameStep {
    last_frame: Option<i64>,
    was_moving: bool,
}

impl FrameStep {
    /// Seconds since the previous frame, from a frame time in microseconds.
    /// The first frame advances nothing.
    pub fn advance(&mut self, now: i64) -> f64 {
        self.last_frame
            .replace(now)
            .map_or(0.0, |prev| ((now - prev) as f64 / 1_000_000.0).clamp(0.0, MAX_FRAME_DT))
    }

    /// Redraw on every frame that moved, plus the first one after settling so
    /// the snapped values reach the screen.
    pub fn needs_redraw(&mut self, moving: bool) -> bool {
        let was_moving = std::mem::replace(&mut self.was_moving, moving);
        moving || was_moving
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_delta_is_capped() {
        let mut frames = FrameStep::default();
        assert_eq!(frames.advance(1_000_000), 0.0);
        assert!((frames.advance(1_016_667) - 0.016667).abs() < 1e-9);
        assert_eq!(frames.advance(3_000_000), MAX_FRAME_DT);
    }

    #[test]
    fn test_one_redraw_after_settling() {
        let mut frames = FrameStep::default();
        assert!(!frames.needs_redraw(false));
        assert!(frames.needs_redraw(true));
        assert!(frames.needs_redraw(true));
        // settled on this frame, snapped values still need drawing
        assert!(frames.needs_redraw(false));
        assert!(!frames.needs_redraw(false));
    }
}
