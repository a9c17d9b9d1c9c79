use crate::foundation::core::{BezPath, Circle, Point, Rgba8};
use crate::foundation::error::WaveResult;
use crate::render::plan::{DrawOp, FramePlan};

/// Drawing primitives a host surface must provide.
pub trait DrawSurface {
    fn clip_to_circle(&mut self, circle: Circle) -> WaveResult<()>;

    fn fill_background(&mut self, color: Rgba8) -> WaveResult<()>;

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) -> WaveResult<()>;

    fn draw_centered_text(
        &mut self,
        text: &str,
        center: Point,
        color: Rgba8,
        size_px: f32,
    ) -> WaveResult<()>;

    fn stroke_circle(&mut self, circle: Circle, color: Rgba8, width: f64) -> WaveResult<()>;

    /// Undo the most recent clip.
    fn restore(&mut self) -> WaveResult<()>;
}

pub fn execute_plan<S: DrawSurface + ?Sized>(surface: &mut S, plan: &FramePlan) -> WaveResult<()> {
    for op in &plan.ops {
        match op {
            DrawOp::ClipCircle(circle) => surface.clip_to_circle(*circle)?,
            DrawOp::FillBackground(color) => surface.fill_background(*color)?,
            DrawOp::FillPath { path, color } => surface.fill_path(path, *color)?,
            DrawOp::CenteredText {
                text,
                center,
                color,
                size_px,
            } => surface.draw_centered_text(text, *center, *color, *size_px)?,
            DrawOp::StrokeCircle {
                circle,
                color,
                width,
            } => surface.stroke_circle(*circle, *color, *width)?,
            DrawOp::Restore => surface.restore()?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
