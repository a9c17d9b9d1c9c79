use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use kurbo::Shape as _;

use crate::foundation::core::{BezPath, Circle, Point, Rgba8};
use crate::foundation::error::{WaveError, WaveResult};
use crate::render::plan::FramePlan;
use crate::render::surface::{DrawSurface, execute_plan};
use crate::render::text::TextLayoutEngine;

/// Flattening tolerance used when turning circles into paths.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// If set, the whole frame is filled with this color before the plan runs.
    pub clear_rgba: Option<Rgba8>,
    /// Font used for the progress label. Without one, labels are skipped.
    pub font_bytes: Option<Arc<Vec<u8>>>,
}

impl RenderSettings {
    pub fn with_font_file(mut self, path: &Path) -> WaveResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        self.font_bytes = Some(Arc::new(bytes));
        Ok(self)
    }
}

/// CPU raster backend powered by `vello_cpu`.
pub struct CpuRenderer {
    settings: RenderSettings,
    text: Option<(TextLayoutEngine, vello_cpu::peniko::FontData)>,
    warned_missing_font: bool,
}

impl CpuRenderer {
    pub fn new(settings: RenderSettings) -> WaveResult<Self> {
        let text = match &settings.font_bytes {
            Some(bytes) => {
                let engine = TextLayoutEngine::new(bytes.clone())?;
                let font = vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
                    0,
                );
                tracing::debug!(family = engine.family_name(), "label font loaded");
                Some((engine, font))
            }
            None => None,
        };
        Ok(Self {
            settings,
            text,
            warned_missing_font: false,
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn render(&mut self, plan: &FramePlan) -> WaveResult<FrameRGBA> {
        let width: u16 = plan
            .size
            .width
            .try_into()
            .map_err(|_| WaveError::render("frame width exceeds u16"))?;
        let height: u16 = plan
            .size
            .height
            .try_into()
            .map_err(|_| WaveError::render("frame height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(WaveError::render("frame width/height must be non-zero"));
        }

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        if let Some(clear) = self.settings.clear_rgba {
            ctx.set_paint(cpu_color(clear));
            ctx.fill_rect(&full_rect(width, height));
        }

        let mut surface = CpuSurface {
            ctx: &mut ctx,
            width,
            height,
            text: self.text.as_mut(),
            warned_missing_font: &mut self.warned_missing_font,
            clip_depth: 0,
        };
        execute_plan(&mut surface, plan)?;
        while surface.clip_depth > 0 {
            surface.restore()?;
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(width),
            height: u32::from(height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

struct CpuSurface<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
    width: u16,
    height: u16,
    text: Option<&'a mut (TextLayoutEngine, vello_cpu::peniko::FontData)>,
    warned_missing_font: &'a mut bool,
    clip_depth: usize,
}

impl DrawSurface for CpuSurface<'_> {
    fn clip_to_circle(&mut self, circle: Circle) -> WaveResult<()> {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .push_clip_layer(&bezpath_to_cpu(&circle.to_path(CIRCLE_TOLERANCE)));
        self.clip_depth += 1;
        Ok(())
    }

    fn fill_background(&mut self, color: Rgba8) -> WaveResult<()> {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(cpu_color(color));
        self.ctx.fill_rect(&full_rect(self.width, self.height));
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) -> WaveResult<()> {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(cpu_color(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
        Ok(())
    }

    fn draw_centered_text(
        &mut self,
        text: &str,
        center: Point,
        color: Rgba8,
        size_px: f32,
    ) -> WaveResult<()> {
        let Some((engine, font)) = self.text.as_deref_mut() else {
            if !*self.warned_missing_font {
                tracing::warn!("no label font configured, progress text is not drawn");
                *self.warned_missing_font = true;
            }
            return Ok(());
        };
        if size_px <= 0.0 {
            return Ok(());
        }

        let layout = engine.layout_line(text, size_px, color)?;
        let origin = vello_cpu::kurbo::Vec2::new(
            center.x - f64::from(layout.width()) / 2.0,
            center.y - f64::from(layout.height()) / 2.0,
        );
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate(origin));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(cpu_color(brush));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn stroke_circle(&mut self, circle: Circle, color: Rgba8, width: f64) -> WaveResult<()> {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(cpu_color(color));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx
            .stroke_path(&bezpath_to_cpu(&circle.to_path(CIRCLE_TOLERANCE)));
        Ok(())
    }

    fn restore(&mut self) -> WaveResult<()> {
        if self.clip_depth == 0 {
            return Err(WaveError::render("restore without a matching clip"));
        }
        self.ctx.pop_layer();
        self.clip_depth -= 1;
        Ok(())
    }
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn full_rect(width: u16, height: u16) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(width), f64::from(height))
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
