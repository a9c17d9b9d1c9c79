use crate::foundation::core::{BezPath, Circle, Point, Rgba8, ViewSize};
use crate::indicator::view::WaveProgress;

/// One backend-agnostic drawing step.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Restrict all following ops to the inside of `circle` until [`DrawOp::Restore`].
    ClipCircle(Circle),
    FillBackground(Rgba8),
    FillPath {
        path: BezPath,
        color: Rgba8,
    },
    CenteredText {
        text: String,
        center: Point,
        color: Rgba8,
        size_px: f32,
    },
    StrokeCircle {
        circle: Circle,
        color: Rgba8,
        width: f64,
    },
    Restore,
}

/// Ordered ops for one frame of a view of `size`.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub size: ViewSize,
    pub ops: Vec<DrawOp>,
}

/// Build the frame for the indicator's current state.
///
/// Order: clip to the circle, background, back wave, front wave, optional progress number,
/// optional ring, restore. Waves are omitted until the first tick has produced geometry.
pub fn compile_frame(view: &WaveProgress, size: ViewSize) -> FramePlan {
    let cfg = view.config();
    let wave = view.wave_config();
    let circle = size.clip_circle();
    let mut ops = vec![
        DrawOp::ClipCircle(circle),
        DrawOp::FillBackground(cfg.background_color),
    ];

    if let Some(g) = view.geometry() {
        ops.push(DrawOp::FillPath {
            path: g.below.to_bez_path(),
            color: wave.below_color,
        });
        ops.push(DrawOp::FillPath {
            path: g.above.to_bez_path(),
            color: wave.above_color,
        });
    }

    if cfg.progress_text_visible {
        ops.push(DrawOp::CenteredText {
            text: view.progress().to_string(),
            center: size.center(),
            color: cfg.progress_text_color,
            size_px: cfg.progress_text_size,
        });
    }

    if cfg.stroke_width != 0.0 {
        ops.push(DrawOp::StrokeCircle {
            circle,
            color: cfg.stroke_color,
            width: cfg.stroke_width,
        });
    }

    ops.push(DrawOp::Restore);
    FramePlan { size, ops }
}

impl WaveProgress {
    /// See [`compile_frame`].
    pub fn compile_frame(&self, size: ViewSize) -> FramePlan {
        compile_frame(self, size)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
