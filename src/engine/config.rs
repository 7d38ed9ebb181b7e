use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::error::{GridpulseError, GridpulseResult},
    trace::class::{ClassProfile, ClassTable, TraceClass},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Tunables for one engine instance.
///
/// Every field has a default matching the reference tuning, so a config file only needs to
/// name what it changes.
pub struct EngineConfig {
    /// Seed for the engine's random source. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Multiplies every class's cell size, tail length and head radius.
    pub zoom: f64,
    /// Window over which a parked head marker shrinks away after arrival.
    pub head_decay_ms: f64,
    /// Padding added to a trace's travel time to bound the age of an uncompleted trace.
    pub safety_buffer_ms: f64,
    /// Surface clear color (straight RGBA8).
    pub background_rgba: [u8; 4],
    /// Per-class profiles.
    pub classes: ClassTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            zoom: 1.0,
            head_decay_ms: 260.0,
            safety_buffer_ms: 1200.0,
            background_rgba: [10, 12, 18, 255],
            classes: ClassTable::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> GridpulseResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| GridpulseError::serde(format!("parse engine config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GridpulseResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GridpulseError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> GridpulseResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GridpulseError::serde(format!("serialize engine config: {e}")))
    }

    pub fn validate(&self) -> GridpulseResult<()> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(GridpulseError::validation("zoom must be finite and > 0"));
        }
        if !self.head_decay_ms.is_finite() || self.head_decay_ms <= 0.0 {
            return Err(GridpulseError::validation(
                "head_decay_ms must be finite and > 0",
            ));
        }
        if !self.safety_buffer_ms.is_finite() || self.safety_buffer_ms < 0.0 {
            return Err(GridpulseError::validation(
                "safety_buffer_ms must be finite and >= 0",
            ));
        }
        self.classes.validate()
    }

    /// Profile for `class` with zoom applied, as stored on newly spawned traces.
    pub fn resolve(&self, class: TraceClass) -> ClassProfile {
        self.classes.profile(class).scaled(self.zoom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
