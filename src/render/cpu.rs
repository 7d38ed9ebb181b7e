use vello_cpu::kurbo::{self as cpu_kurbo, Shape};

use crate::{
    foundation::color::Hsla,
    foundation::core::{Extents, Point, Rgba8},
    foundation::error::{GridpulseError, GridpulseResult},
    render::FrameRGBA,
    render::plan::{Disc, FramePlan, GradientStroke},
    render::surface::{DrawSurface, execute_plan},
};

// Segments shorter than this have no usable gradient direction.
const MIN_SEGMENT_PX: f64 = 1e-6;
const CIRCLE_TOLERANCE: f64 = 0.05;

/// Software raster target backed by a `vello_cpu` pixmap.
pub struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuSurface {
    pub fn new(extents: Extents) -> GridpulseResult<Self> {
        let (width, height) = surface_dims(extents)?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            ctx: None,
        })
    }

    pub fn extents(&self) -> Extents {
        Extents::new(u32::from(self.width), u32::from(self.height))
    }

    /// Execute `plan` and read the result back.
    pub fn render(&mut self, plan: &FramePlan) -> GridpulseResult<FrameRGBA> {
        execute_plan(self, plan)?;
        Ok(self.readback())
    }

    /// Copy of the last presented frame (premultiplied).
    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn ctx(&mut self) -> GridpulseResult<&mut vello_cpu::RenderContext> {
        self.ctx
            .as_mut()
            .ok_or_else(|| GridpulseError::render("draw call outside clear/present"))
    }
}

impl DrawSurface for CpuSurface {
    fn clear(&mut self, canvas: Extents, background: Rgba8) -> GridpulseResult<()> {
        let (width, height) = surface_dims(canvas)?;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixmap = vello_cpu::Pixmap::new(width, height);
        }
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint(to_cpu_color(background));
        ctx.fill_rect(&cpu_kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
        self.ctx = Some(ctx);
        Ok(())
    }

    fn stroke_gradient(&mut self, stroke: &GradientStroke) -> GridpulseResult<()> {
        if (stroke.to - stroke.from).hypot() < MIN_SEGMENT_PX {
            return Ok(());
        }
        let ctx = self.ctx()?;
        let line = line_path(stroke.from, stroke.to);

        if let Some(glow) = stroke.glow {
            ctx.set_stroke(round_stroke(glow.extent));
            ctx.set_paint(to_cpu_color(glow.color.to_rgba8()));
            ctx.stroke_path(&line);
        }

        let gradient = vello_cpu::peniko::Gradient::new_linear(
            point_to_cpu(stroke.from),
            point_to_cpu(stroke.to),
        )
        .with_stops([
            (0.0_f32, hsla_to_cpu(stroke.start)),
            (1.0_f32, hsla_to_cpu(stroke.end)),
        ]);
        ctx.set_stroke(round_stroke(stroke.width));
        ctx.set_paint(gradient);
        ctx.stroke_path(&line);
        Ok(())
    }

    fn fill_circle(&mut self, disc: &Disc) -> GridpulseResult<()> {
        let ctx = self.ctx()?;
        let center = point_to_cpu(disc.center);
        if let Some(glow) = disc.glow {
            ctx.set_paint(to_cpu_color(glow.color.to_rgba8()));
            let halo = cpu_kurbo::Circle::new(center, glow.extent);
            ctx.fill_path(&halo.to_path(CIRCLE_TOLERANCE));
        }
        ctx.set_paint(hsla_to_cpu(disc.color));
        let body = cpu_kurbo::Circle::new(center, disc.radius);
        ctx.fill_path(&body.to_path(CIRCLE_TOLERANCE));
        Ok(())
    }

    fn present(&mut self) -> GridpulseResult<()> {
        let mut ctx = self
            .ctx
            .take()
            .ok_or_else(|| GridpulseError::render("present without a cleared frame"))?;
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }
}

fn surface_dims(extents: Extents) -> GridpulseResult<(u16, u16)> {
    if extents.is_empty() {
        return Err(GridpulseError::validation("surface extents must be non-zero"));
    }
    let width: u16 = extents
        .width
        .try_into()
        .map_err(|_| GridpulseError::validation("surface width exceeds u16"))?;
    let height: u16 = extents
        .height
        .try_into()
        .map_err(|_| GridpulseError::validation("surface height exceeds u16"))?;
    Ok((width, height))
}

fn round_stroke(width: f64) -> cpu_kurbo::Stroke {
    cpu_kurbo::Stroke::new(width)
        .with_caps(cpu_kurbo::Cap::Round)
        .with_join(cpu_kurbo::Join::Round)
}

fn line_path(from: Point, to: Point) -> cpu_kurbo::BezPath {
    let mut path = cpu_kurbo::BezPath::new();
    path.move_to(point_to_cpu(from));
    path.line_to(point_to_cpu(to));
    path
}

fn point_to_cpu(p: Point) -> cpu_kurbo::Point {
    cpu_kurbo::Point::new(p.x, p.y)
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn hsla_to_cpu(c: Hsla) -> vello_cpu::peniko::Color {
    to_cpu_color(c.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
