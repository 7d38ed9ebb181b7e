use crate::{
    foundation::core::{Extents, Rgba8},
    foundation::error::GridpulseResult,
    render::plan::{Disc, DrawOp, FramePlan, GradientStroke},
};

/// Minimal 2D vector target a [`FramePlan`] is drawn onto.
pub trait DrawSurface {
    /// Start a frame: size the target to `canvas` and fill it with `background`.
    fn clear(&mut self, canvas: Extents, background: Rgba8) -> GridpulseResult<()>;

    /// Stroke a straight segment with a two-stop linear gradient, glow underlay first.
    fn stroke_gradient(&mut self, stroke: &GradientStroke) -> GridpulseResult<()>;

    /// Fill a disc, glow underlay first.
    fn fill_circle(&mut self, disc: &Disc) -> GridpulseResult<()>;

    /// Finish the frame.
    fn present(&mut self) -> GridpulseResult<()>;
}

/// Replay `plan` onto `surface` in painter's order.
pub fn execute_plan<S: DrawSurface + ?Sized>(
    surface: &mut S,
    plan: &FramePlan,
) -> GridpulseResult<()> {
    surface.clear(plan.canvas, plan.background)?;
    for op in &plan.ops {
        match op {
            DrawOp::StrokeGradient(s) => surface.stroke_gradient(s)?,
            DrawOp::FillCircle(d) => surface.fill_circle(d)?,
        }
    }
    surface.present()
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
