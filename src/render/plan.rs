use crate::{
    foundation::color::Hsla,
    foundation::core::{Extents, Point, Rgba8},
    trace::model::TraceId,
};

#[derive(Clone, Debug, serde::Serialize)]
/// Backend-agnostic drawing instructions for one frame.
///
/// A plan is a pure function of the trace list and a timestamp; executing it twice yields the
/// same pixels.
pub struct FramePlan {
    /// Surface size the plan was compiled for.
    pub canvas: Extents,
    /// Clear color.
    pub background: Rgba8,
    /// Draw operations in painter's order.
    pub ops: Vec<DrawOp>,
}

impl FramePlan {
    pub fn strokes(&self) -> impl Iterator<Item = &GradientStroke> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::StrokeGradient(s) => Some(s),
            DrawOp::FillCircle(_) => None,
        })
    }

    pub fn discs(&self) -> impl Iterator<Item = &Disc> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillCircle(d) => Some(d),
            DrawOp::StrokeGradient(_) => None,
        })
    }

    /// Ops belonging to one trace.
    pub fn ops_for(&self, id: TraceId) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(move |op| op.trace() == id)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
/// A single drawing primitive.
pub enum DrawOp {
    StrokeGradient(GradientStroke),
    FillCircle(Disc),
}

impl DrawOp {
    pub fn trace(&self) -> TraceId {
        match self {
            DrawOp::StrokeGradient(s) => s.trace,
            DrawOp::FillCircle(d) => d.trace,
        }
    }

    /// Highest alpha this op paints with (glow excluded).
    pub fn peak_alpha(&self) -> f64 {
        match self {
            DrawOp::StrokeGradient(s) => s.start.alpha.max(s.end.alpha),
            DrawOp::FillCircle(d) => d.color.alpha,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Soft underlay drawn beneath a primitive.
pub struct Glow {
    /// Stroke width (for segments) or radius (for discs) of the underlay.
    pub extent: f64,
    pub color: Hsla,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Straight segment stroked with a two-stop linear gradient from `from` to `to`.
pub struct GradientStroke {
    pub trace: TraceId,
    pub from: Point,
    pub to: Point,
    pub width: f64,
    pub start: Hsla,
    pub end: Hsla,
    pub glow: Option<Glow>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Filled circle (head marker).
pub struct Disc {
    pub trace: TraceId,
    pub center: Point,
    pub radius: f64,
    pub color: Hsla,
    pub glow: Option<Glow>,
}
