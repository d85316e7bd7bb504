//! Mutable pipeline state shared between the interaction bridge and the
//! frame loop.
//!
//! The clock and pointer used to be ambient globals in earlier prototypes;
//! they are kept together in [`PipelineState`] so each field has exactly one
//! writer (the frame loop for the clock, the interaction bridge for the
//! pointer) without hidden coupling.

/// Fixed synthetic time increment applied every frame, in time-units.
pub const DEFAULT_TIME_STEP: f32 = 0.025;

/// Initial value of the time accumulator.
pub const DEFAULT_TIME_SEED: f32 = 0.20;

/// Monotonically increasing time accumulator.
///
/// The step is a fixed synthetic increment decoupled from wall time, so
/// playback speed follows the display refresh rate. There is deliberately no
/// reset operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    time: f32,
    step: f32,
}

impl FrameClock {
    pub fn new(seed: f32, step: f32) -> Self {
        Self { time: seed, step }
    }

    /// Advances the accumulator by one step and returns the new value.
    pub fn advance(&mut self) -> f32 {
        self.time += self.step;
        self.time
    }

    pub fn current(&self) -> f32 {
        self.time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SEED, DEFAULT_TIME_STEP)
    }
}

/// Last-observed pointer position in clip space ([-1, 1] per axis).
///
/// Updated only on click; each click overwrites the previous value. No
/// history, no debouncing, no drag tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    position: [f32; 2],
}

impl PointerState {
    /// Starts at the clip-space origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a click at raw pixel coordinates (relative to the surface's
    /// top-left) into clip space and records it.
    ///
    /// The event coordinates are first scaled from the surface's displayed
    /// size into its backing-pixel size, which accounts for any pixel-ratio
    /// mismatch between the two. The vertical axis flips so +y points up.
    pub fn update_from_click(
        &mut self,
        x: f32,
        y: f32,
        displayed: (f32, f32),
        backing: (f32, f32),
    ) -> [f32; 2] {
        let backing_x = x * backing.0 / displayed.0;
        let backing_y = y * backing.1 / displayed.1;
        self.position = [
            backing_x / backing.0 * 2.0 - 1.0,
            backing_y / backing.1 * -2.0 + 1.0,
        ];
        self.position
    }

    pub fn position(&self) -> [f32; 2] {
        self.position
    }
}

/// All mutable state the render loop carries between frames.
#[derive(Debug, Default)]
pub struct PipelineState {
    pub clock: FrameClock,
    pub pointer: PointerState,
}

impl PipelineState {
    pub fn new(time_seed: f32, time_step: f32) -> Self {
        Self {
            clock: FrameClock::new(time_seed, time_step),
            pointer: PointerState::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_accumulates_fixed_steps() {
        let mut clock = FrameClock::default();
        let mut last = clock.current();
        for _ in 0..4 {
            last = clock.advance();
        }
        assert!((last - 0.30).abs() < 1e-6, "0.20 + 4 * 0.025 = 0.30, got {last}");
    }

    #[test]
    fn clock_is_monotonically_non_decreasing() {
        let mut clock = FrameClock::default();
        let mut previous = clock.current();
        for _ in 0..1_000 {
            let next = clock.advance();
            assert!(next >= previous);
            previous = next;
        }
    }

    #[test]
    fn clock_matches_seed_plus_n_steps() {
        let (seed, step) = (1.5_f32, 0.125_f32);
        let mut clock = FrameClock::new(seed, step);
        for n in 1..=64_u32 {
            let accumulated = clock.advance();
            let expected = seed + n as f32 * step;
            assert!((accumulated - expected).abs() <= f32::EPSILON * expected.abs() * n as f32 + 1e-6);
        }
    }

    #[test]
    fn pointer_starts_at_origin() {
        assert_eq!(PointerState::new().position(), [0.0, 0.0]);
    }

    #[test]
    fn click_maps_to_clip_space() {
        let mut pointer = PointerState::new();
        pointer.update_from_click(10.0, 10.0, (800.0, 600.0), (800.0, 600.0));
        let clip = pointer.update_from_click(50.0, 80.0, (800.0, 600.0), (800.0, 600.0));
        // Only the most recent click survives.
        assert!((clip[0] - -0.875).abs() < 1e-6);
        assert!((clip[1] - 0.733_333_3).abs() < 1e-6);
        assert_eq!(pointer.position(), clip);
    }

    #[test]
    fn click_scales_through_pixel_ratio_mismatch() {
        // Surface displayed at 400x300 but backed by 800x600 pixels: the
        // displayed-space click lands on the same clip coordinate.
        let mut pointer = PointerState::new();
        let clip = pointer.update_from_click(25.0, 40.0, (400.0, 300.0), (800.0, 600.0));
        assert!((clip[0] - (2.0 * 50.0 / 800.0 - 1.0)).abs() < 1e-6);
        assert!((clip[1] - (-2.0 * 80.0 / 600.0 + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn corner_clicks_reach_clip_extremes() {
        let mut pointer = PointerState::new();
        let top_left = pointer.update_from_click(0.0, 0.0, (640.0, 480.0), (640.0, 480.0));
        assert_eq!(top_left, [-1.0, 1.0]);
        let bottom_right = pointer.update_from_click(640.0, 480.0, (640.0, 480.0), (640.0, 480.0));
        assert_eq!(bottom_right, [1.0, -1.0]);
    }
}
