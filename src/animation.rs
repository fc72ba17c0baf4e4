/// Visual state of one tile: position in container space, opacity, scale.
/// The gallery keeps the last-written values here so a new transition can
/// start from wherever the previous one left the tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub left: f32,
    pub top: f32,
    pub opacity: f32,
    pub scale: f32,
}

impl VisualState {
    /// State every tile starts in: fully visible at the container origin.
    pub fn resting() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            opacity: 1.0,
            scale: 1.0,
        }
    }

    pub fn interpolate(&self, target: &VisualState, k: f32) -> VisualState {
        VisualState {
            left: lerp(self.left, target.left, k),
            top: lerp(self.top, target.top, k),
            opacity: lerp(self.opacity, target.opacity, k),
            scale: lerp(self.scale, target.scale, k),
        }
    }
}

/// Linear interpolation.
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Ease-in-out cubic: slow start and end, symmetric around the midpoint.
/// f(0) = 0, f(0.5) = 0.5, f(1) = 1, monotonic over [0, 1].
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// One in-flight animation moving a tile between two visual states.
#[derive(Debug, Clone)]
pub struct Transition {
    pub tile: usize,
    /// Token from the animator; a newer transition for the same tile carries
    /// a higher generation and supersedes this one.
    pub generation: u64,
    pub from: VisualState,
    pub to: VisualState,
    elapsed: f32,
    duration: f32,
}

impl Transition {
    pub fn new(
        tile: usize,
        generation: u64,
        from: VisualState,
        to: VisualState,
        duration_ms: f32,
    ) -> Self {
        Self {
            tile,
            generation,
            from,
            to,
            elapsed: 0.0,
            // Seconds internally; dt arrives in seconds from the frame loop.
            duration: (duration_ms / 1000.0).max(f32::EPSILON),
        }
    }

    /// Advance by `dt` seconds and return the eased progress in [0, 1].
    fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        ease_in_out_cubic(self.raw_progress())
    }

    fn raw_progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    fn finished(&self) -> bool {
        self.raw_progress() >= 1.0
    }
}

/// Frame-driven driver for the in-flight transitions of one gallery.
///
/// Ticked once per display refresh by the host frame loop. Each tick advances
/// every live transition, hands the interpolated state to the caller, and
/// drops transitions after the frame where progress reaches 1. Starting a new
/// transition for a tile supersedes any still-running one for that tile, so
/// the newest call wins instead of two writers racing.
#[derive(Debug, Default)]
pub struct Animator {
    transitions: Vec<Transition>,
    next_generation: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transition for a tile, superseding any in-flight one.
    pub fn start(&mut self, tile: usize, from: VisualState, to: VisualState, duration_ms: f32) {
        self.next_generation += 1;
        self.transitions.retain(|t| t.tile != tile);
        self.transitions
            .push(Transition::new(tile, self.next_generation, from, to, duration_ms));
    }

    /// Advance all transitions by `dt` seconds, invoking `apply` with the
    /// interpolated state for each animated tile. Returns true while any
    /// transition is still live.
    pub fn tick(&mut self, dt: f32, mut apply: impl FnMut(usize, VisualState)) -> bool {
        for transition in &mut self.transitions {
            let k = transition.advance(dt);
            apply(transition.tile, transition.from.interpolate(&transition.to, k));
        }
        self.transitions.retain(|t| !t.finished());
        !self.transitions.is_empty()
    }

    pub fn is_animating(&self) -> bool {
        !self.transitions.is_empty()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
}
