use crate::{
    foundation::color::wrap_hue,
    foundation::error::{GridpulseError, GridpulseResult},
    walk::entropy::Entropy,
    walk::generator::{DEFAULT_BRANCH_PROBABILITY, evolve_hue},
};

/// Centre of the cool band used by `meta` traces.
pub const META_HUE: f64 = 260.0;
/// Half-width of the `meta` hue band.
pub const META_HUE_SPREAD: f64 = 7.0;
/// Hue a `micro` trace uses when spawned without a parent hue.
pub const MICRO_FALLBACK_HUE: f64 = 205.0;
/// Half-width of the `micro` hue jitter around its parent.
pub const MICRO_HUE_SPREAD: f64 = 10.0;

/// Visual and motion profile of a trace.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TraceClass {
    /// Medium grid, fast, warm lineage colors.
    Standard,
    /// Coarse grid, slow, cool desaturated band.
    Meta,
    /// Fine grid, fast short-lived offshoots.
    Micro,
}

impl TraceClass {
    pub const ALL: [TraceClass; 3] = [TraceClass::Standard, TraceClass::Meta, TraceClass::Micro];

    pub fn name(self) -> &'static str {
        match self {
            TraceClass::Standard => "standard",
            TraceClass::Meta => "meta",
            TraceClass::Micro => "micro",
        }
    }

    /// Whether heads of this class may shed `micro` children at checkpoints.
    pub fn seeds_micro(self) -> bool {
        matches!(self, TraceClass::Standard | TraceClass::Meta)
    }

    /// Per-class hue policy applied at spawn time.
    ///
    /// - `standard`: lineage evolution ([`evolve_hue`]).
    /// - `meta`: fixed cool band around [`META_HUE`], parent ignored.
    /// - `micro`: parent hue (or [`MICRO_FALLBACK_HUE`]) with wider jitter.
    pub fn pick_hue<E: Entropy + ?Sized>(self, parent_hue: Option<f64>, rng: &mut E) -> f64 {
        match self {
            TraceClass::Standard => evolve_hue(parent_hue, rng),
            TraceClass::Meta => wrap_hue(META_HUE + rng.jitter(META_HUE_SPREAD)),
            TraceClass::Micro => {
                let base = parent_hue.unwrap_or(MICRO_FALLBACK_HUE);
                wrap_hue(base + rng.jitter(MICRO_HUE_SPREAD))
            }
        }
    }
}

impl std::fmt::Display for TraceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Static stroke/fill styling for one class. Only hue and opacity vary per trace.
pub struct TraceStyle {
    /// Tail stroke width in pixels.
    pub line_width: f64,
    /// Extra width of the glow underlay, in pixels.
    pub glow_radius: f64,
    /// Glow opacity relative to the stroke it surrounds.
    pub glow_alpha: f64,
    /// Opacity of the tail right behind the head.
    pub tail_max_opacity: f64,
    pub tail_saturation: f64,
    pub tail_lightness: f64,
    pub head_saturation: f64,
    pub head_lightness: f64,
    /// Head marker opacity while in flight.
    pub head_alpha: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Scheduled unprompted spawning for a class.
pub struct RootSpawn {
    /// Interval between probability rolls.
    pub period_ms: f64,
    /// Probability that one roll spawns a root trace.
    pub chance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Configuration record for one [`TraceClass`], resolved once per spawn and stored on the trace.
pub struct ClassProfile {
    /// Grid cell size in pixels (also the checkpoint spacing).
    pub cell_size: f64,
    /// Head speed in pixels per millisecond.
    pub speed: f64,
    /// Visible distance behind the head, in pixels.
    pub tail_length: f64,
    /// Head marker radius in pixels.
    pub head_radius: f64,
    /// Fade-out window after completion.
    pub fade_out_ms: f64,
    /// Per-direction chance of a child at path completion.
    pub branch_probability: f64,
    /// Chance of a `micro` child at each checkpoint (only for classes that seed micro).
    pub checkpoint_spawn_chance: f64,
    /// Parent hue shift applied when seeding a child's hue, degrees either way.
    pub lineage_hue_shift: f64,
    /// Root spawning schedule, if this class spawns on its own.
    pub root_spawn: Option<RootSpawn>,
    pub style: TraceStyle,
}

impl ClassProfile {
    pub fn standard() -> Self {
        Self {
            cell_size: 40.0,
            speed: 0.8,
            tail_length: 160.0,
            head_radius: 1.5,
            fade_out_ms: 800.0,
            branch_probability: DEFAULT_BRANCH_PROBABILITY,
            checkpoint_spawn_chance: 0.08,
            lineage_hue_shift: 28.0,
            root_spawn: Some(RootSpawn {
                period_ms: 1000.0,
                chance: 0.24,
            }),
            style: TraceStyle {
                line_width: 1.2,
                glow_radius: 8.0,
                glow_alpha: 0.35,
                tail_max_opacity: 0.6,
                tail_saturation: 82.0,
                tail_lightness: 52.0,
                head_saturation: 90.0,
                head_lightness: 62.0,
                head_alpha: 0.85,
            },
        }
    }

    pub fn meta() -> Self {
        Self {
            cell_size: 120.0,
            speed: 0.18,
            tail_length: 360.0,
            head_radius: 3.0,
            fade_out_ms: 800.0,
            branch_probability: DEFAULT_BRANCH_PROBABILITY,
            checkpoint_spawn_chance: 0.08,
            lineage_hue_shift: 28.0,
            root_spawn: Some(RootSpawn {
                period_ms: 1800.0,
                chance: 0.08,
            }),
            style: TraceStyle {
                line_width: 1.6,
                glow_radius: 11.0,
                glow_alpha: 0.28,
                tail_max_opacity: 0.42,
                tail_saturation: 24.0,
                tail_lightness: 60.0,
                head_saturation: 28.0,
                head_lightness: 66.0,
                head_alpha: 0.5,
            },
        }
    }

    pub fn micro() -> Self {
        Self {
            cell_size: 10.0,
            speed: 0.85,
            tail_length: 80.0,
            head_radius: 0.9,
            fade_out_ms: 800.0,
            branch_probability: DEFAULT_BRANCH_PROBABILITY,
            checkpoint_spawn_chance: 0.0,
            lineage_hue_shift: 48.0,
            root_spawn: None,
            style: TraceStyle {
                line_width: 0.9,
                glow_radius: 5.0,
                glow_alpha: 0.25,
                tail_max_opacity: 0.75,
                tail_saturation: 74.0,
                tail_lightness: 66.0,
                head_saturation: 78.0,
                head_lightness: 72.0,
                head_alpha: 0.7,
            },
        }
    }

    /// Geometry scaled by a zoom factor. Speeds and timings are unchanged.
    pub fn scaled(self, zoom: f64) -> Self {
        Self {
            cell_size: self.cell_size * zoom,
            tail_length: self.tail_length * zoom,
            head_radius: self.head_radius * zoom,
            ..self
        }
    }

    /// Time for the head to travel `length` pixels.
    pub fn travel_ms(&self, length: f64) -> f64 {
        length / self.speed
    }

    pub fn validate(&self, class: TraceClass) -> GridpulseResult<()> {
        for (field, value) in [
            ("cell_size", self.cell_size),
            ("speed", self.speed),
            ("tail_length", self.tail_length),
            ("fade_out_ms", self.fade_out_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GridpulseError::validation(format!(
                    "{class}.{field} must be finite and > 0"
                )));
            }
        }
        for (field, value) in [
            ("head_radius", self.head_radius),
            ("lineage_hue_shift", self.lineage_hue_shift),
            ("style.line_width", self.style.line_width),
            ("style.glow_radius", self.style.glow_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GridpulseError::validation(format!(
                    "{class}.{field} must be finite and >= 0"
                )));
            }
        }
        for (field, value) in [
            ("branch_probability", self.branch_probability),
            ("checkpoint_spawn_chance", self.checkpoint_spawn_chance),
            ("style.glow_alpha", self.style.glow_alpha),
            ("style.tail_max_opacity", self.style.tail_max_opacity),
            ("style.head_alpha", self.style.head_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GridpulseError::validation(format!(
                    "{class}.{field} must be in [0, 1]"
                )));
            }
        }
        if let Some(root) = self.root_spawn {
            if !root.period_ms.is_finite() || root.period_ms <= 0.0 {
                return Err(GridpulseError::validation(format!(
                    "{class}.root_spawn.period_ms must be finite and > 0"
                )));
            }
            if !(0.0..=1.0).contains(&root.chance) {
                return Err(GridpulseError::validation(format!(
                    "{class}.root_spawn.chance must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// One [`ClassProfile`] per [`TraceClass`].
pub struct ClassTable {
    pub standard: ClassProfile,
    pub meta: ClassProfile,
    pub micro: ClassProfile,
}

impl Default for ClassTable {
    fn default() -> Self {
        Self {
            standard: ClassProfile::standard(),
            meta: ClassProfile::meta(),
            micro: ClassProfile::micro(),
        }
    }
}

impl ClassTable {
    pub fn profile(&self, class: TraceClass) -> &ClassProfile {
        match class {
            TraceClass::Standard => &self.standard,
            TraceClass::Meta => &self.meta,
            TraceClass::Micro => &self.micro,
        }
    }

    pub fn profile_mut(&mut self, class: TraceClass) -> &mut ClassProfile {
        match class {
            TraceClass::Standard => &mut self.standard,
            TraceClass::Meta => &mut self.meta,
            TraceClass::Micro => &mut self.micro,
        }
    }

    pub fn validate(&self) -> GridpulseResult<()> {
        for class in TraceClass::ALL {
            self.profile(class).validate(class)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/class.rs"]
mod tests;
