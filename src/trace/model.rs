use crate::{
    foundation::core::{Direction, GridBounds, GridPoint, Point},
    trace::class::{ClassProfile, TraceClass},
};

/// Unique, monotonically assigned trace identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TraceId(pub u64);

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug)]
/// Everything a trace needs besides its identity and birth time.
pub struct TraceSeed {
    pub class: TraceClass,
    /// Class profile already scaled by zoom.
    pub profile: ClassProfile,
    /// Walked path; must hold at least two points.
    pub path: Vec<GridPoint>,
    /// Grid the path was generated on. Children are validated against it.
    pub bounds: GridBounds,
    pub hue: f64,
    /// Branch depth, 0 for root spawns.
    pub generation: u32,
}

#[derive(Clone, Debug, serde::Serialize)]
/// One animated pulse travelling along a generated grid path.
///
/// Motion is never accumulated: the head position is recomputed from `created_at` on every
/// query. The only mutable state is the checkpoint cursor and the completion marker, both
/// owned by the lifecycle manager.
pub struct Trace {
    id: TraceId,
    class: TraceClass,
    path: Vec<GridPoint>,
    bounds: GridBounds,
    created_at: f64,
    total_length: f64,
    duration_ceiling_ms: f64,
    hue: f64,
    generation: u32,
    profile: ClassProfile,
    next_checkpoint: f64,
    completed_at: Option<f64>,
    completion_signalled: bool,
}

impl Trace {
    /// Build a trace born at `created_at` (ms).
    ///
    /// `safety_buffer_ms` pads the travel-time estimate that bounds the age of a trace that
    /// somehow never completes.
    pub fn new(id: TraceId, seed: TraceSeed, created_at: f64, safety_buffer_ms: f64) -> Self {
        let segments = seed.path.len().saturating_sub(1);
        let total_length = segments as f64 * seed.profile.cell_size;
        let duration_ceiling_ms = seed.profile.travel_ms(total_length) + safety_buffer_ms;
        Self {
            id,
            class: seed.class,
            path: seed.path,
            bounds: seed.bounds,
            created_at,
            total_length,
            duration_ceiling_ms,
            hue: seed.hue,
            generation: seed.generation,
            next_checkpoint: seed.profile.cell_size,
            profile: seed.profile,
            completed_at: None,
            completion_signalled: false,
        }
    }

    pub fn id(&self) -> TraceId {
        self.id
    }

    pub fn class(&self) -> TraceClass {
        self.class
    }

    pub fn path(&self) -> &[GridPoint] {
        &self.path
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn created_at(&self) -> f64 {
        self.created_at
    }

    /// `(points - 1) * cell_size`.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn duration_ceiling_ms(&self) -> f64 {
        self.duration_ceiling_ms
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn profile(&self) -> &ClassProfile {
        &self.profile
    }

    pub fn next_checkpoint(&self) -> f64 {
        self.next_checkpoint
    }

    pub fn completed_at(&self) -> Option<f64> {
        self.completed_at
    }

    pub fn completion_signalled(&self) -> bool {
        self.completion_signalled
    }

    /// Milliseconds since birth, never negative.
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.created_at).max(0.0)
    }

    /// Unclamped distance the head would have travelled by `now`.
    pub fn raw_distance(&self, now: f64) -> f64 {
        self.elapsed(now) * self.profile.speed
    }

    /// `min(elapsed * speed, total_length)`.
    pub fn head_distance(&self, now: f64) -> f64 {
        self.raw_distance(now).min(self.total_length)
    }

    /// Milliseconds the head has spent parked on the last point.
    pub fn overrun_ms(&self, now: f64) -> f64 {
        (self.elapsed(now) - self.profile.travel_ms(self.total_length)).max(0.0)
    }

    /// Direction of the final step.
    pub fn arrival_direction(&self) -> Option<Direction> {
        match self.path.as_slice() {
            [.., prev, last] => Direction::between(*prev, *last),
            _ => None,
        }
    }

    pub fn end_point(&self) -> GridPoint {
        // Traces are only built from usable walks, so the path is never empty.
        self.path.last().copied().unwrap_or(GridPoint::new(0, 0))
    }

    /// Grid node at a checkpoint distance and the direction used to arrive there.
    pub fn checkpoint_node(&self, distance: f64) -> Option<(GridPoint, Direction)> {
        let last = self.path.len().checked_sub(1)?;
        let index = ((distance / self.profile.cell_size).round().max(0.0) as usize).min(last);
        if index == 0 {
            return None;
        }
        let node = self.path[index];
        let dir = Direction::between(self.path[index - 1], node)?;
        Some((node, dir))
    }

    /// Surface position at `distance` along the path, clamped to its ends.
    pub fn point_at(&self, distance: f64) -> Point {
        let cell = self.profile.cell_size;
        if self.path.len() < 2 || distance >= self.total_length {
            return self.end_point().to_surface(cell);
        }
        let distance = distance.max(0.0);
        let segment = ((distance / cell).floor() as usize).min(self.path.len() - 2);
        let fraction = (distance - segment as f64 * cell) / cell;
        let a = self.path[segment].to_surface(cell);
        let b = self.path[segment + 1].to_surface(cell);
        a.lerp(b, fraction)
    }

    /// 1 while live, then a linear ramp to 0 across the fade-out window.
    pub fn decay_factor(&self, now: f64) -> f64 {
        match self.completed_at {
            None => 1.0,
            Some(done) => (1.0 - (now - done) / self.profile.fade_out_ms).clamp(0.0, 1.0),
        }
    }

    /// Faded out after completion, or past the safety ceiling without ever completing.
    pub fn is_expired(&self, now: f64) -> bool {
        match self.completed_at {
            Some(done) => now - done > self.profile.fade_out_ms,
            None => self.elapsed(now) > self.duration_ceiling_ms,
        }
    }

    /// Record completion once. Returns `true` only for the call that signals it.
    pub(crate) fn mark_completed(&mut self, now: f64) -> bool {
        if self.completion_signalled {
            return false;
        }
        self.completion_signalled = true;
        self.completed_at.get_or_insert(now);
        true
    }

    /// Pop the next checkpoint the head has crossed, if any, and advance the cursor one cell.
    pub(crate) fn take_checkpoint(&mut self, head: f64) -> Option<f64> {
        if head >= self.next_checkpoint && self.next_checkpoint < self.total_length {
            let crossed = self.next_checkpoint;
            self.next_checkpoint += self.profile.cell_size;
            Some(crossed)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/model.rs"]
mod tests;
