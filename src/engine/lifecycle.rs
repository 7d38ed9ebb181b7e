use std::collections::VecDeque;

use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    engine::command::{EngineCommand, SpawnRequest},
    engine::config::EngineConfig,
    engine::schedule::IntervalTicker,
    foundation::color::wrap_hue,
    foundation::core::{Extents, GridBounds, GridPoint},
    foundation::error::GridpulseResult,
    render::compile::{RenderSettings, compile_frame},
    render::plan::FramePlan,
    trace::class::TraceClass,
    trace::model::{Trace, TraceId, TraceSeed},
    walk::entropy::Entropy,
    walk::generator::{branch_directions, generate_path},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Counters for one advance pass.
pub struct AdvanceReport {
    /// Checkpoints evaluated (every crossed checkpoint counts, even without a spawn).
    pub checkpoints: u32,
    /// Traces that signalled completion in this pass.
    pub completions: u32,
    /// Children queued by completion branching.
    pub branch_children: u32,
    /// `micro` children queued at checkpoints.
    pub micro_children: u32,
    /// Traces dropped from the active set.
    pub expired: u32,
    /// Queued children merged into the active set after the pass.
    pub merged: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Summary of one frame tick.
pub struct TickReport {
    pub advance: AdvanceReport,
    /// Draw ops emitted into the frame plan.
    pub ops: usize,
    /// Traces drawn this tick (children merged afterwards are not included).
    pub drawn: usize,
}

#[derive(Clone, Debug)]
/// Output of one frame tick.
pub struct Frame {
    pub now: f64,
    pub plan: FramePlan,
    pub report: TickReport,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Lifetime counters. Survive `shutdown` so a host can report totals.
pub struct EngineStats {
    pub ticks: u64,
    pub root_spawns: u64,
    pub child_spawns: u64,
    /// Spawn attempts discarded because the walk never left its origin.
    pub rejected_spawns: u64,
    pub completions: u64,
    pub checkpoints: u64,
    pub expired: u64,
    pub peak_active: usize,
}

/// Owner of the active trace set.
///
/// All creation, mutation and removal of traces goes through this type. Spawns requested
/// while an advance pass is iterating the set land in a pending queue that is merged only
/// after the pass (and, during a frame tick, after the frame has been compiled), so children
/// become visible on the next tick.
pub struct Engine<E: Entropy = SmallRng> {
    config: EngineConfig,
    render: RenderSettings,
    rng: E,
    extents: Extents,
    traces: Vec<Trace>,
    pending: Vec<Trace>,
    advancing: bool,
    next_id: u64,
    tickers: Vec<IntervalTicker>,
    commands: VecDeque<EngineCommand>,
    running: bool,
    stats: EngineStats,
}

impl Engine<SmallRng> {
    /// Build an engine seeded from `config.seed`, or from OS entropy when unset.
    pub fn new(config: EngineConfig) -> GridpulseResult<Self> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_entropy(config, rng)
    }
}

impl<E: Entropy> Engine<E> {
    /// Build an engine around an explicit random source.
    pub fn with_entropy(config: EngineConfig, rng: E) -> GridpulseResult<Self> {
        config.validate()?;
        Ok(Self {
            render: RenderSettings::from_config(&config),
            config,
            rng,
            extents: Extents::default(),
            traces: Vec::new(),
            pending: Vec::new(),
            advancing: false,
            next_id: 1,
            tickers: Vec::new(),
            commands: VecDeque::new(),
            running: false,
            stats: EngineStats::default(),
        })
    }

    /// Begin from an empty set and arm one interval ticker per root-spawning class.
    pub fn start(&mut self, extents: Extents, now: f64) {
        if self.running {
            self.shutdown();
        }
        self.extents = extents;
        self.tickers = TraceClass::ALL
            .into_iter()
            .filter_map(|class| {
                let spawn = self.config.classes.profile(class).root_spawn?;
                Some(IntervalTicker::new(class, spawn, now))
            })
            .collect();
        self.running = true;
        tracing::debug!(
            width = extents.width,
            height = extents.height,
            tickers = self.tickers.len(),
            "engine started"
        );
    }

    /// Stop every ticker and drop all traces, queued children and undelivered commands.
    pub fn shutdown(&mut self) {
        let dropped = self.traces.len() + self.pending.len();
        self.running = false;
        self.tickers.clear();
        self.commands.clear();
        self.traces.clear();
        self.pending.clear();
        tracing::debug!(dropped, "engine shut down");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Record new surface extents. Only later spawns see the new grid.
    pub fn resize(&mut self, extents: Extents) {
        tracing::debug!(width = extents.width, height = extents.height, "surface resized");
        self.extents = extents;
    }

    pub fn extents(&self) -> Extents {
        self.extents
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Active traces in draw order.
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Children waiting to be merged.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn rng_mut(&mut self) -> &mut E {
        &mut self.rng
    }

    /// Enqueue a command for the next [`Engine::pump`].
    pub fn submit(&mut self, command: EngineCommand) {
        if !self.running {
            tracing::trace!(?command, "engine stopped, command dropped");
            return;
        }
        self.commands.push_back(command);
    }

    /// Host entry point for one display refresh.
    ///
    /// Polls the interval tickers, queues a tick for `now` and drains every queued command
    /// in arrival order. Returns one [`Frame`] per tick drained.
    pub fn pump(&mut self, now: f64) -> Vec<Frame> {
        if !self.running {
            return Vec::new();
        }
        self.poll_intervals(now);
        self.commands.push_back(EngineCommand::TickElapsed { now });

        let mut frames = Vec::new();
        while let Some(command) = self.commands.pop_front() {
            match command {
                EngineCommand::SpawnRequested { request, at } => {
                    self.spawn(request, at);
                }
                EngineCommand::TickElapsed { now } => frames.push(self.tick(now)),
                EngineCommand::Resized(extents) => self.resize(extents),
            }
        }
        frames
    }

    /// Roll each interval ticker that came due by `now` and queue the root spawns won.
    ///
    /// A ticker fires at most once per call, however long the host stalled.
    pub fn poll_intervals(&mut self, now: f64) {
        for ticker in &mut self.tickers {
            if ticker.poll(now) && self.rng.chance(ticker.chance()) {
                self.commands.push_back(EngineCommand::SpawnRequested {
                    request: SpawnRequest::root(ticker.class()),
                    at: now,
                });
            }
        }
    }

    /// Attempt a spawn at time `now`.
    ///
    /// Silently does nothing (returns `None`) when the engine is stopped, the surface has no
    /// area, or the walk never leaves its origin.
    pub fn spawn(&mut self, request: SpawnRequest, now: f64) -> Option<TraceId> {
        if !self.running || self.extents.is_empty() {
            tracing::trace!(class = %request.class, "spawn skipped, no surface");
            return None;
        }

        let profile = self.config.resolve(request.class);
        let bounds = GridBounds::for_surface(self.extents, profile.cell_size);
        let origin = request.origin.unwrap_or_else(|| {
            GridPoint::new(
                self.rng.index(bounds.columns as usize) as i32,
                self.rng.index(bounds.rows as usize) as i32,
            )
        });

        let walk = generate_path(origin, bounds, request.forced_first, &mut self.rng);
        if !walk.is_usable() {
            self.stats.rejected_spawns += 1;
            tracing::trace!(class = %request.class, ?origin, "walk never left origin, discarded");
            return None;
        }

        let hue = request.class.pick_hue(request.parent_hue, &mut self.rng);
        let id = TraceId(self.next_id);
        self.next_id += 1;
        let trace = Trace::new(
            id,
            TraceSeed {
                class: request.class,
                profile,
                path: walk.path,
                bounds,
                hue,
                generation: request.generation,
            },
            now,
            self.config.safety_buffer_ms,
        );
        tracing::debug!(
            trace = %id,
            class = %request.class,
            points = trace.path().len(),
            hue,
            generation = request.generation,
            deferred = self.advancing,
            "trace spawned"
        );

        if request.generation == 0 {
            self.stats.root_spawns += 1;
        } else {
            self.stats.child_spawns += 1;
        }
        if self.advancing {
            self.pending.push(trace);
        } else {
            self.traces.push(trace);
            self.stats.peak_active = self.stats.peak_active.max(self.traces.len());
        }
        Some(id)
    }

    /// Advance every trace to `now` and merge queued children.
    pub fn advance(&mut self, now: f64) -> AdvanceReport {
        let mut report = self.run_pass(now);
        report.merged = self.merge_pending();
        report
    }

    /// One frame tick: advance, compile the frame from the survivors, then merge children.
    #[tracing::instrument(level = "debug", skip(self), fields(active = self.traces.len()))]
    pub fn tick(&mut self, now: f64) -> Frame {
        let mut advance = self.run_pass(now);
        let plan = compile_frame(&self.traces, now, self.extents, &self.render);
        let drawn = self.traces.len();
        advance.merged = self.merge_pending();
        self.stats.ticks += 1;
        Frame {
            now,
            report: TickReport {
                advance,
                ops: plan.ops.len(),
                drawn,
            },
            plan,
        }
    }

    /// Compile the current set at `now` without advancing anything.
    pub fn snapshot(&self, now: f64) -> FramePlan {
        compile_frame(&self.traces, now, self.extents, &self.render)
    }

    fn run_pass(&mut self, now: f64) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        let mut active = std::mem::take(&mut self.traces);
        self.advancing = true;
        active.retain_mut(|trace| self.advance_trace(trace, now, &mut report));
        self.advancing = false;
        self.traces = active;

        self.stats.completions += u64::from(report.completions);
        self.stats.checkpoints += u64::from(report.checkpoints);
        self.stats.expired += u64::from(report.expired);
        report
    }

    /// Returns whether the trace stays active.
    fn advance_trace(&mut self, trace: &mut Trace, now: f64, report: &mut AdvanceReport) -> bool {
        let head = trace.head_distance(now);

        if head >= trace.total_length() && trace.mark_completed(now) {
            report.completions += 1;
            report.branch_children += self.branch_on_completion(trace, now);
        }

        while let Some(distance) = trace.take_checkpoint(head) {
            report.checkpoints += 1;
            if self.seed_micro(trace, distance, now).is_some() {
                report.micro_children += 1;
            }
        }

        if trace.is_expired(now) {
            report.expired += 1;
            tracing::debug!(trace = %trace.id(), class = %trace.class(), "trace expired");
            return false;
        }
        true
    }

    fn branch_on_completion(&mut self, trace: &Trace, now: f64) -> u32 {
        let Some(arrival) = trace.arrival_direction() else {
            return 0;
        };
        let profile = trace.profile();
        let end = trace.end_point();
        let mut spawned = 0;
        for dir in branch_directions(Some(arrival), profile.branch_probability, &mut self.rng) {
            if !trace.bounds().contains(end.step(dir)) {
                tracing::trace!(trace = %trace.id(), ?dir, "branch leaves parent grid, dropped");
                continue;
            }
            let hue = wrap_hue(trace.hue() + self.rng.jitter(profile.lineage_hue_shift));
            let request =
                SpawnRequest::child(trace.class(), end, dir, hue, trace.generation() + 1);
            if self.spawn(request, now).is_some() {
                spawned += 1;
            }
        }
        if spawned > 0 {
            tracing::debug!(trace = %trace.id(), children = spawned, "completion branched");
        }
        spawned
    }

    fn seed_micro(&mut self, trace: &Trace, distance: f64, now: f64) -> Option<TraceId> {
        if !trace.class().seeds_micro() || !self.rng.chance(trace.profile().checkpoint_spawn_chance)
        {
            return None;
        }
        let (node, dir) = trace.checkpoint_node(distance)?;

        // Re-express the parent's node on the finer micro grid.
        let micro = self.config.resolve(TraceClass::Micro);
        let scale = trace.profile().cell_size / micro.cell_size;
        let origin = GridPoint::new(
            (f64::from(node.x) * scale).round() as i32,
            (f64::from(node.y) * scale).round() as i32,
        );
        let hue = wrap_hue(trace.hue() + self.rng.jitter(micro.lineage_hue_shift));
        let request =
            SpawnRequest::child(TraceClass::Micro, origin, dir, hue, trace.generation() + 1);
        let id = self.spawn(request, now)?;
        tracing::debug!(parent = %trace.id(), child = %id, distance, "micro trace seeded");
        Some(id)
    }

    fn merge_pending(&mut self) -> u32 {
        if self.pending.is_empty() {
            return 0;
        }
        let merged = self.pending.len();
        self.traces.append(&mut self.pending);
        self.stats.peak_active = self.stats.peak_active.max(self.traces.len());
        tracing::debug!(merged, active = self.traces.len(), "pending children merged");
        u32::try_from(merged).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/lifecycle.rs"]
mod tests;
