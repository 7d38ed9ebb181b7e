//! Frame compilation and raster backends.
//!
//! Rendering is split in two steps: [`compile::compile_frame`] turns `(traces, now)` into a
//! backend-agnostic [`plan::FramePlan`], and a [`surface::DrawSurface`] replays that plan.

pub mod compile;
pub mod cpu;
pub mod plan;
pub mod surface;

#[derive(Clone, Debug)]
/// Raw RGBA8 frame read back from a surface.
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the frame, suitable for PNG export.
    pub fn to_straight(&self) -> FrameRGBA {
        if !self.premultiplied {
            return self.clone();
        }
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }
}
