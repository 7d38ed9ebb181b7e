use super::*;
use crate::{
    foundation::color::Hsla,
    foundation::core::Point,
    foundation::error::GridpulseError,
    trace::model::TraceId,
};

#[derive(Default)]
struct RecordingSurface {
    calls: Vec<&'static str>,
    fail_on_circle: bool,
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, _canvas: Extents, _background: Rgba8) -> GridpulseResult<()> {
        self.calls.push("clear");
        Ok(())
    }

    fn stroke_gradient(&mut self, _stroke: &GradientStroke) -> GridpulseResult<()> {
        self.calls.push("stroke_gradient");
        Ok(())
    }

    fn fill_circle(&mut self, _disc: &Disc) -> GridpulseResult<()> {
        if self.fail_on_circle {
            return Err(GridpulseError::render("disc rejected"));
        }
        self.calls.push("fill_circle");
        Ok(())
    }

    fn present(&mut self) -> GridpulseResult<()> {
        self.calls.push("present");
        Ok(())
    }
}

fn plan() -> FramePlan {
    let color = Hsla::new(38.0, 80.0, 50.0, 0.5);
    let stroke = GradientStroke {
        trace: TraceId(1),
        from: Point::new(0.0, 0.0),
        to: Point::new(10.0, 0.0),
        width: 1.0,
        start: color,
        end: color,
        glow: None,
    };
    FramePlan {
        canvas: Extents::new(4, 3),
        background: Rgba8::new(0, 0, 0, 255),
        ops: vec![
            DrawOp::StrokeGradient(stroke),
            DrawOp::FillCircle(Disc {
                trace: TraceId(1),
                center: Point::new(10.0, 0.0),
                radius: 1.0,
                color,
                glow: None,
            }),
            DrawOp::StrokeGradient(stroke),
        ],
    }
}

#[test]
fn execute_plan_calls_in_painter_order() {
    let mut surface = RecordingSurface::default();
    execute_plan(&mut surface, &plan()).unwrap();
    assert_eq!(
        surface.calls,
        vec![
            "clear",
            "stroke_gradient",
            "fill_circle",
            "stroke_gradient",
            "present"
        ]
    );
}

#[test]
fn execute_plan_stops_at_first_backend_error() {
    let mut surface = RecordingSurface {
        fail_on_circle: true,
        ..RecordingSurface::default()
    };
    let err = execute_plan(&mut surface, &plan()).unwrap_err();
    assert!(err.to_string().starts_with("render error:"));
    assert_eq!(surface.calls, vec!["clear", "stroke_gradient"]);
}
