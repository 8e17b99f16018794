use crate::types::Point;

/// Cursor pipeline state for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorState {
    /// Sensitivity-mapped fraction of the screen before clamping (may leave `[0, 1]`).
    pub raw_target: Point,
    /// Clamped target in screen pixels.
    pub clamped_screen_pos: Point,
    /// Exponentially smoothed cursor in screen pixels; `None` until the first hand sample.
    pub smoothed: Option<Point>,
}

/// Maps a normalized fingertip into screen space and smooths it over time.
#[derive(Debug)]
pub struct CursorFilter {
    screen_width: f32,
    screen_height: f32,
    blend: f32,
    mirror_x: bool,
    state: CursorState,
}

impl CursorFilter {
    pub fn new(screen_width: f32, screen_height: f32, blend: f32, mirror_x: bool) -> Self {
        Self {
            screen_width,
            screen_height,
            blend,
            mirror_x,
            state: CursorState::default(),
        }
    }

    /// Feeds one frame. `raw` is the normalized fingertip, `None` when no hand was seen,
    /// in which case the smoothed value is left untouched.
    pub fn filter(&mut self, raw: Option<(f32, f32)>, sensitivity: f32) -> Point {
        let Some((raw_x, raw_y)) = raw else {
            return self.position();
        };
        let raw_x = if self.mirror_x { 1.0 - raw_x } else { raw_x };

        let norm = Point::new(
            amplify(raw_x, sensitivity),
            amplify(raw_y, sensitivity),
        );
        let target = Point::new(
            norm.x.clamp(0.0, 1.0) * self.screen_width,
            norm.y.clamp(0.0, 1.0) * self.screen_height,
        );

        let smoothed = match self.state.smoothed {
            Some(prev) => Point::new(
                prev.x + (target.x - prev.x) * self.blend,
                prev.y + (target.y - prev.y) * self.blend,
            ),
            None => target,
        };

        self.state = CursorState {
            raw_target: norm,
            clamped_screen_pos: target,
            smoothed: Some(smoothed),
        };
        smoothed
    }

    /// Smoothed position, or the screen centre before any hand has been seen.
    pub fn position(&self) -> Point {
        self.state
            .smoothed
            .unwrap_or(Point::new(self.screen_width / 2.0, self.screen_height / 2.0))
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = CursorState::default();
    }
}

fn amplify(raw: f32, sensitivity: f32) -> f32 {
    (raw - 0.5) * sensitivity + 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const W: f32 = 1920.0;
    const H: f32 = 1080.0;

    fn filter() -> CursorFilter {
        CursorFilter::new(W, H, 0.2, false)
    }

    #[test]
    fn unit_sensitivity_is_identity() {
        let mut cursor = filter();
        let pos = cursor.filter(Some((0.25, 0.75)), 1.0);
        assert_eq!(pos, Point::new(0.25 * W, 0.75 * H));
        assert_eq!(cursor.state().raw_target, Point::new(0.25, 0.75));
    }

    #[test]
    fn amplified_motion_saturates_at_edges() {
        let mut cursor = filter();
        cursor.filter(Some((0.1, 0.5)), 2.0);
        let state = cursor.state();
        assert!((state.raw_target.x - -0.3).abs() < 1e-6);
        assert_eq!(state.clamped_screen_pos.x, 0.0);
        assert_eq!(state.clamped_screen_pos.y, 0.5 * H);
    }

    #[test]
    fn smoothing_blends_clamped_target() {
        let mut cursor = filter();
        cursor.filter(Some((0.5, 0.5)), 1.0);
        // Raw 0.0 at sensitivity 3 maps to -1.0, clamped to 0.
        let pos = cursor.filter(Some((0.0, 0.5)), 3.0);
        assert!((pos.x - 0.8 * (W / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn missing_hand_holds_position() {
        let mut cursor = filter();
        cursor.filter(Some((0.2, 0.2)), 1.0);
        let before = cursor.filter(Some((0.8, 0.8)), 1.0);
        for _ in 0..10 {
            assert_eq!(cursor.filter(None, 1.0), before);
        }
    }

    #[test]
    fn mirror_flips_horizontal_axis() {
        let mut cursor = CursorFilter::new(W, H, 0.2, true);
        let pos = cursor.filter(Some((0.25, 0.5)), 1.0);
        assert_eq!(pos.x, 0.75 * W);
    }

    #[test]
    fn reset_forgets_smoothed_value() {
        let mut cursor = filter();
        cursor.filter(Some((0.1, 0.1)), 1.0);
        cursor.reset();
        assert!(cursor.state().smoothed.is_none());
        assert_eq!(cursor.position(), Point::new(W / 2.0, H / 2.0));
    }

    proptest! {
        #[test]
        fn centre_maps_to_centre_for_any_sensitivity(s in 1.0f32..=5.0) {
            let mut cursor = filter();
            let pos = cursor.filter(Some((0.5, 0.5)), s);
            prop_assert!((pos.x - 0.5 * W).abs() < 1e-3);
            prop_assert!((pos.y - 0.5 * H).abs() < 1e-3);
        }

        #[test]
        fn smoothing_converges_without_overshoot(
            start_x in 0.0f32..=1.0,
            start_y in 0.0f32..=1.0,
            goal_x in 0.0f32..=1.0,
            goal_y in 0.0f32..=1.0,
        ) {
            let mut cursor = filter();
            cursor.filter(Some((start_x, start_y)), 1.0);
            let goal = Point::new(goal_x * W, goal_y * H);
            let mut last_gap = cursor.position().distance(goal);
            for _ in 0..60 {
                let pos = cursor.filter(Some((goal_x, goal_y)), 1.0);
                let gap = pos.distance(goal);
                prop_assert!(gap <= last_gap + 1e-3);
                // Never crosses past the goal on either axis.
                prop_assert!((pos.x - goal.x) * (start_x * W - goal.x) >= -1e-3);
                prop_assert!((pos.y - goal.y) * (start_y * H - goal.y) >= -1e-3);
                last_gap = gap;
            }
            // 0.8^60 of a full screen diagonal is well under a pixel.
            prop_assert!(last_gap < 1.0);
        }
    }
}
