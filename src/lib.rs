//! Gridpulse is a procedural animation engine for branching, grid-aligned pulse traces.
//!
//! Traces walk randomized orthogonal paths over a class-specific grid, branch when they
//! arrive, shed finer `micro` offshoots at checkpoints and fade out. Every frame is rebuilt
//! from wall-clock time alone, so a late frame draws a longer jump instead of drifting.
//!
//! # Pipeline overview
//!
//! 1. **Spawn**: interval tickers and host commands request root traces ([`Engine::pump`]).
//! 2. **Advance**: `Engine + now -> AdvanceReport` (completion branching, checkpoint seeding,
//!    expiry). Children spawned mid-pass are queued and merged afterwards.
//! 3. **Compile**: `(traces, now) -> FramePlan` ([`compile_frame`]), a pure function.
//! 4. **Draw**: `FramePlan -> DrawSurface` ([`execute_plan`]); [`CpuSurface`] rasterizes with
//!    `vello_cpu` and reads back a [`FrameRGBA`].
//!
//! The simulation is single-threaded and infallible. Only configuration loading and raster
//! backends return [`GridpulseResult`].
#![forbid(unsafe_code)]

mod engine;
mod foundation;
mod render;
mod trace;
mod walk;

pub use engine::clock::{Clock, ManualClock, SystemClock};
pub use engine::command::{EngineCommand, SpawnRequest};
pub use engine::config::EngineConfig;
pub use engine::lifecycle::{AdvanceReport, Engine, EngineStats, Frame, TickReport};
pub use engine::schedule::IntervalTicker;
pub use foundation::color::{Hsla, wrap_hue};
pub use foundation::core::{Direction, Extents, GridBounds, GridPoint, Point, Rgba8, Vec2};
pub use foundation::error::{GridpulseError, GridpulseResult};
pub use render::FrameRGBA;
pub use render::compile::{
    HEAD_MIN_OPACITY, HEAD_MIN_RADIUS, HeadMarker, RenderSettings, SegmentSlice, VisibleWindow,
    compile_frame, head_marker, tail_opacity, visible_slices, visible_window,
};
pub use render::cpu::CpuSurface;
pub use render::plan::{Disc, DrawOp, FramePlan, Glow, GradientStroke};
pub use render::surface::{DrawSurface, execute_plan};
pub use trace::class::{
    ClassProfile, ClassTable, META_HUE, MICRO_FALLBACK_HUE, RootSpawn, TraceClass, TraceStyle,
};
pub use trace::model::{Trace, TraceId, TraceSeed};
pub use walk::entropy::Entropy;
pub use walk::generator::{
    BASE_HUE, DEFAULT_BRANCH_PROBABILITY, HUE_DRIFT, MAX_WALK_STEPS, Walk, branch_directions,
    evolve_hue, generate_path, valid_directions,
};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
