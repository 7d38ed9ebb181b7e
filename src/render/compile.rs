use crate::{
    engine::config::EngineConfig,
    foundation::color::Hsla,
    foundation::core::{Extents, Point, Rgba8},
    render::plan::{Disc, DrawOp, FramePlan, Glow, GradientStroke},
    trace::class::TraceStyle,
    trace::model::Trace,
};

/// Head markers at or below this radius are not drawn.
pub const HEAD_MIN_RADIUS: f64 = 0.05;
/// Head markers at or below this opacity are not drawn.
pub const HEAD_MIN_OPACITY: f64 = 0.01;

// Glow underlays sit slightly lighter than the primitive they surround.
const GLOW_LIGHTNESS_LIFT: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Frame-wide inputs that are not stored on traces.
pub struct RenderSettings {
    pub background: Rgba8,
    /// Window over which a parked head marker shrinks to nothing.
    pub head_decay_ms: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl RenderSettings {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            background: Rgba8::from_array(config.background_rgba),
            head_decay_ms: config.head_decay_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Distance interval `[tail, head]` of a trace that is currently on screen.
pub struct VisibleWindow {
    pub tail: f64,
    pub head: f64,
}

impl VisibleWindow {
    pub fn len(&self) -> f64 {
        self.head - self.tail
    }

    pub fn is_empty(&self) -> bool {
        self.head <= self.tail
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Portion of one path segment that overlaps a [`VisibleWindow`].
pub struct SegmentSlice {
    /// Index of the segment (`path[segment]..path[segment + 1]`).
    pub segment: usize,
    /// Path distance of the slice start.
    pub start: f64,
    /// Path distance of the slice end.
    pub end: f64,
    pub from: Point,
    pub to: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Resolved head disc for one trace at one instant.
pub struct HeadMarker {
    pub center: Point,
    pub radius: f64,
    pub opacity: f64,
}

/// Compile the frame for `traces` at `now`.
///
/// Output depends only on the arguments: no renderer state survives between frames.
#[tracing::instrument(level = "trace", skip(traces, settings), fields(traces = traces.len()))]
pub fn compile_frame(
    traces: &[Trace],
    now: f64,
    canvas: Extents,
    settings: &RenderSettings,
) -> FramePlan {
    let mut ops = Vec::new();
    for trace in traces {
        compile_trace(trace, now, settings, &mut ops);
    }
    FramePlan {
        canvas,
        background: settings.background,
        ops,
    }
}

/// Visible distance window, or `None` when the tail has moved past the end of the path.
pub fn visible_window(trace: &Trace, now: f64) -> Option<VisibleWindow> {
    let head = trace.head_distance(now);
    let tail = (head - trace.profile().tail_length).max(0.0);
    if tail >= trace.total_length() {
        return None;
    }
    Some(VisibleWindow { tail, head })
}

/// Overlap of every path segment with `window`, in path order. Empty overlaps are omitted.
pub fn visible_slices(trace: &Trace, window: VisibleWindow) -> Vec<SegmentSlice> {
    let cell = trace.profile().cell_size;
    trace
        .path()
        .windows(2)
        .enumerate()
        .filter_map(|(segment, pair)| {
            let seg_start = segment as f64 * cell;
            let start = seg_start.max(window.tail);
            let end = (seg_start + cell).min(window.head);
            if start >= end {
                return None;
            }
            let a = pair[0].to_surface(cell);
            let b = pair[1].to_surface(cell);
            Some(SegmentSlice {
                segment,
                start,
                end,
                from: a.lerp(b, (start - seg_start) / cell),
                to: a.lerp(b, (end - seg_start) / cell),
            })
        })
        .collect()
}

/// Tail opacity at path distance `distance`: full right behind the head, 0 one tail length back.
pub fn tail_opacity(trace: &Trace, window: VisibleWindow, distance: f64, decay: f64) -> f64 {
    let closeness = 1.0 - (window.head - distance) / trace.profile().tail_length;
    trace.profile().style.tail_max_opacity * closeness.clamp(0.0, 1.0) * decay
}

/// Head disc at `now`, shrinking over `head_decay_ms` once the head is parked on the last point.
pub fn head_marker(trace: &Trace, now: f64, head_decay_ms: f64) -> Option<HeadMarker> {
    let overrun_fade = (1.0 - trace.overrun_ms(now) / head_decay_ms).clamp(0.0, 1.0);
    let radius = trace.profile().head_radius * overrun_fade;
    let opacity = trace.profile().style.head_alpha * overrun_fade * trace.decay_factor(now);
    if radius <= HEAD_MIN_RADIUS || opacity <= HEAD_MIN_OPACITY {
        return None;
    }
    Some(HeadMarker {
        center: trace.point_at(trace.head_distance(now)),
        radius,
        opacity,
    })
}

fn compile_trace(trace: &Trace, now: f64, settings: &RenderSettings, ops: &mut Vec<DrawOp>) {
    let style = trace.profile().style;
    let decay = trace.decay_factor(now);
    let tail_color = Hsla::new(
        trace.hue(),
        style.tail_saturation,
        style.tail_lightness,
        0.0,
    );

    match visible_window(trace, now) {
        Some(window) => {
            for slice in visible_slices(trace, window) {
                let start = tail_opacity(trace, window, slice.start, decay);
                let end = tail_opacity(trace, window, slice.end, decay);
                if start.max(end) <= 0.0 {
                    continue;
                }
                ops.push(DrawOp::StrokeGradient(GradientStroke {
                    trace: trace.id(),
                    from: slice.from,
                    to: slice.to,
                    width: style.line_width,
                    start: tail_color.with_alpha(start),
                    end: tail_color.with_alpha(end),
                    glow: glow(
                        &style,
                        style.line_width + style.glow_radius,
                        tail_color,
                        start.max(end),
                    ),
                }));
            }
        }
        // A zero-length trace has no tail but may still show its head.
        None if trace.total_length() > 0.0 => {
            tracing::trace!(trace = %trace.id(), "tail past end of path, skipped");
            return;
        }
        None => {}
    }

    if let Some(head) = head_marker(trace, now, settings.head_decay_ms) {
        let head_color = Hsla::new(
            trace.hue(),
            style.head_saturation,
            style.head_lightness,
            head.opacity,
        );
        ops.push(DrawOp::FillCircle(Disc {
            trace: trace.id(),
            center: head.center,
            radius: head.radius,
            color: head_color,
            glow: glow(
                &style,
                head.radius + style.glow_radius * 0.5,
                head_color,
                head.opacity,
            ),
        }));
    }
}

fn glow(style: &TraceStyle, extent: f64, base: Hsla, opacity: f64) -> Option<Glow> {
    let alpha = style.glow_alpha * opacity;
    if style.glow_radius <= 0.0 || alpha <= 0.0 {
        return None;
    }
    Some(Glow {
        extent,
        color: Hsla {
            lightness: (base.lightness + GLOW_LIGHTNESS_LIFT).min(100.0),
            alpha,
            ..base
        },
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/compile.rs"]
mod tests;
