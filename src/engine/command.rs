use crate::{
    foundation::core::{Direction, Extents, GridPoint},
    trace::class::TraceClass,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Parameters of one spawn attempt.
pub struct SpawnRequest {
    pub class: TraceClass,
    /// Grid origin in the class's own grid. `None` picks a random cell.
    pub origin: Option<GridPoint>,
    /// First step to take, if forced.
    pub forced_first: Option<Direction>,
    /// Hue the class hue policy derives from. `None` for root spawns.
    pub parent_hue: Option<f64>,
    /// Branch depth of the new trace.
    pub generation: u32,
}

impl SpawnRequest {
    /// Unprompted spawn at a random cell.
    pub fn root(class: TraceClass) -> Self {
        Self {
            class,
            origin: None,
            forced_first: None,
            parent_hue: None,
            generation: 0,
        }
    }

    /// Child anchored at `origin` whose first step is `dir`.
    pub fn child(
        class: TraceClass,
        origin: GridPoint,
        dir: Direction,
        parent_hue: f64,
        generation: u32,
    ) -> Self {
        Self {
            class,
            origin: Some(origin),
            forced_first: Some(dir),
            parent_hue: Some(parent_hue),
            generation,
        }
    }

    pub fn at(mut self, origin: GridPoint) -> Self {
        self.origin = Some(origin);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Event consumed by the engine in strict arrival order.
pub enum EngineCommand {
    /// Attempt a spawn stamped with the time it was requested.
    SpawnRequested { request: SpawnRequest, at: f64 },
    /// One frame tick: advance, compile a frame, merge children.
    TickElapsed { now: f64 },
    /// Surface extents changed; affects only later spawns.
    Resized(Extents),
}
