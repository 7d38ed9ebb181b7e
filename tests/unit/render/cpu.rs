use super::*;
use crate::{
    foundation::color::Hsla,
    render::plan::{DrawOp, Glow},
    trace::model::TraceId,
};

const BG: Rgba8 = Rgba8::new(10, 12, 18, 255);

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn plan_with(ops: Vec<DrawOp>) -> FramePlan {
    FramePlan {
        canvas: Extents::new(32, 32),
        background: BG,
        ops,
    }
}

fn bright_stroke() -> DrawOp {
    let color = Hsla::new(0.0, 100.0, 50.0, 1.0);
    DrawOp::StrokeGradient(GradientStroke {
        trace: TraceId(1),
        from: Point::new(2.0, 16.0),
        to: Point::new(30.0, 16.0),
        width: 4.0,
        start: color,
        end: color,
        glow: Some(Glow {
            extent: 8.0,
            color: color.with_alpha(0.3),
        }),
    })
}

#[test]
fn empty_plan_fills_background() {
    let mut surface = CpuSurface::new(Extents::new(32, 32)).unwrap();
    let frame = surface.render(&plan_with(vec![])).unwrap();
    assert_eq!((frame.width, frame.height), (32, 32));
    assert_eq!(frame.data.len(), 32 * 32 * 4);
    assert!(frame.premultiplied);
    for (x, y) in [(0, 0), (31, 31), (16, 16)] {
        assert_eq!(pixel(&frame, x, y), [10, 12, 18, 255]);
    }
}

#[test]
fn stroke_and_disc_paint_pixels() {
    let disc = DrawOp::FillCircle(Disc {
        trace: TraceId(2),
        center: Point::new(16.0, 4.0),
        radius: 3.0,
        color: Hsla::new(120.0, 100.0, 50.0, 1.0),
        glow: None,
    });
    let mut surface = CpuSurface::new(Extents::new(32, 32)).unwrap();
    let frame = surface.render(&plan_with(vec![bright_stroke(), disc])).unwrap();

    let on_line = pixel(&frame, 16, 16);
    assert!(on_line[0] > 200, "line pixel {on_line:?}");
    let on_disc = pixel(&frame, 16, 4);
    assert!(on_disc[1] > 200, "disc pixel {on_disc:?}");
    assert_eq!(pixel(&frame, 16, 30), [10, 12, 18, 255]);
}

#[test]
fn rendering_is_deterministic_and_repeatable() {
    let plan = plan_with(vec![bright_stroke()]);
    let mut a = CpuSurface::new(Extents::new(32, 32)).unwrap();
    let mut b = CpuSurface::new(Extents::new(32, 32)).unwrap();
    let first = a.render(&plan).unwrap();
    let again = a.render(&plan).unwrap();
    let other = b.render(&plan).unwrap();
    assert_eq!(first.data, again.data);
    assert_eq!(first.data, other.data);
}

#[test]
fn degenerate_segment_is_skipped() {
    let color = Hsla::new(0.0, 100.0, 50.0, 1.0);
    let dot = DrawOp::StrokeGradient(GradientStroke {
        trace: TraceId(1),
        from: Point::new(5.0, 5.0),
        to: Point::new(5.0, 5.0),
        width: 4.0,
        start: color,
        end: color,
        glow: None,
    });
    let mut surface = CpuSurface::new(Extents::new(32, 32)).unwrap();
    let frame = surface.render(&plan_with(vec![dot])).unwrap();
    assert_eq!(pixel(&frame, 5, 5), [10, 12, 18, 255]);
}

#[test]
fn next_frame_replaces_previous_pixels() {
    let mut surface = CpuSurface::new(Extents::new(32, 32)).unwrap();
    let painted = surface.render(&plan_with(vec![bright_stroke()])).unwrap();
    assert_ne!(pixel(&painted, 16, 16), [10, 12, 18, 255]);

    let cleared = surface.render(&plan_with(vec![])).unwrap();
    assert!(
        cleared
            .data
            .chunks_exact(4)
            .all(|px| px == [10, 12, 18, 255].as_slice())
    );
}

#[test]
fn clear_resizes_to_the_plan_canvas() {
    let mut surface = CpuSurface::new(Extents::new(8, 8)).unwrap();
    let frame = surface.render(&plan_with(vec![])).unwrap();
    assert_eq!(surface.extents(), Extents::new(32, 32));
    assert_eq!(frame.data.len(), 32 * 32 * 4);
}

#[test]
fn drawing_outside_a_frame_is_an_error() {
    let mut surface = CpuSurface::new(Extents::new(8, 8)).unwrap();
    let DrawOp::StrokeGradient(stroke) = bright_stroke() else {
        unreachable!()
    };
    let err = surface.stroke_gradient(&stroke).unwrap_err();
    assert!(err.to_string().starts_with("render error:"));
    assert!(surface.present().is_err());
}

#[test]
fn surface_size_is_validated() {
    assert!(CpuSurface::new(Extents::new(0, 10)).is_err());
    let err = CpuSurface::new(Extents::new(70_000, 10)).err().unwrap();
    assert!(err.to_string().contains("width exceeds u16"));
}
