//! The convenience wrapper itself: a [`DrawingSurface`] owns one primitive
//! drawing context, tracks presentation state (font, position fix, clear
//! mode), and exposes shape/text helpers that forward to the context.

use std::f64::consts::PI;

use crate::api::{
    DrawContext, Paint, PaintStyles, PathOps, RectOps, SurfaceInfo, TextAlign, TextBaseline,
    TextOps,
};
use crate::backends::recording::RecordingContext;
use crate::error::Result;
use crate::font::FontSpec;

/// What [`DrawingSurface::clear`] does with the surface before painting.
///
/// The two behaviors come from two historical variants of this component and
/// are materially different, so the choice is a configuration option rather
/// than something the library picks silently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearMode {
    /// Clear the full surface to transparent, then fill it with the given
    /// color unless the color is absent or the literal string `"clear"`.
    ClearThenFill,
    /// Fill the full surface with the given color (or the sticky fill paint)
    /// without clearing to transparent first.
    FillOnly,
}

/// Construction options for [`DrawingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceOptions {
    /// Apply a 0.5 offset to coordinates before stroking thin lines so they
    /// align to the pixel grid instead of blurring across two columns.
    pub position_fix: bool,
    pub clear_mode: ClearMode,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            position_fix: true,
            clear_mode: ClearMode::ClearThenFill,
        }
    }
}

/// A drawable surface plus the small pieces of presentation state the shape
/// helpers need. Every draw call translates into primitive context
/// operations; nothing is deferred or batched.
pub struct DrawingSurface<C: DrawContext> {
    ctx: C,
    font: FontSpec,
    position_fix: bool,
    clear_mode: ClearMode,
}

impl DrawingSurface<RecordingContext> {
    /// Creates a surface over a [`RecordingContext`], useful for tests and
    /// for replaying draw sequences against another backend.
    pub fn recording(width: u32, height: u32, options: SurfaceOptions) -> Result<Self> {
        Self::new(RecordingContext::new(width, height), options)
    }
}

#[cfg(feature = "cairo")]
impl DrawingSurface<crate::backends::cairo::CairoContext> {
    /// Creates a surface backed by a cairo image surface. Fails only if the
    /// environment cannot allocate the surface.
    pub fn cairo(width: u32, height: u32, options: SurfaceOptions) -> Result<Self> {
        Self::new(crate::backends::cairo::CairoContext::new(width, height)?, options)
    }
}

impl<C: DrawContext> DrawingSurface<C> {
    /// Wraps an already-constructed context. Text alignment defaults to
    /// left/top and the default font is applied immediately.
    pub fn new(ctx: C, options: SurfaceOptions) -> Result<Self> {
        let mut surface = Self {
            ctx,
            font: FontSpec::default(),
            position_fix: options.position_fix,
            clear_mode: options.clear_mode,
        };
        surface.ctx.set_text_align(TextAlign::Left)?;
        surface.ctx.set_text_baseline(TextBaseline::Top)?;
        surface.apply_font()?;
        Ok(surface)
    }

    /// The owned context, for primitive operations this wrapper does not
    /// cover. No ownership transfer; the wrapper keeps drawing through it.
    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    pub fn into_context(self) -> C {
        self.ctx
    }

    pub fn width(&self) -> u32 {
        self.ctx.width()
    }

    pub fn height(&self) -> u32 {
        self.ctx.height()
    }

    /// Resizes the backing surface. The pixel contents are discarded, so the
    /// caller must redraw; the tracked presentation state is re-applied.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        log::debug!(target: "tabula", "set_size {} {}", width, height);
        self.ctx.resize(width, height)?;
        self.apply_font()
    }

    pub fn position_fix_enabled(&self) -> bool {
        self.position_fix
    }

    pub fn set_position_fix(&mut self, enabled: bool) {
        self.position_fix = enabled;
    }

    pub fn clear_mode(&self) -> ClearMode {
        self.clear_mode
    }

    pub fn font_spec(&self) -> &FontSpec {
        &self.font
    }

    pub fn set_font_size(&mut self, size_px: f64) -> Result<()> {
        self.font.set_size_px(size_px);
        self.apply_font()
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) -> Result<()> {
        self.font.set_family(family);
        self.apply_font()
    }

    pub fn set_font_decorations(&mut self, decorations: Vec<String>) -> Result<()> {
        self.font.set_decorations(decorations);
        self.apply_font()
    }

    /// Partial font update: every `None` leaves the corresponding field
    /// unchanged. The composed string is re-applied either way.
    pub fn set_font(
        &mut self,
        family: Option<&str>,
        size_px: Option<f64>,
        decorations: Option<Vec<String>>,
    ) -> Result<()> {
        if let Some(family) = family {
            self.font.set_family(family);
        }
        if let Some(size_px) = size_px {
            self.font.set_size_px(size_px);
        }
        if let Some(decorations) = decorations {
            self.font.set_decorations(decorations);
        }
        self.apply_font()
    }

    pub fn set_text_align(&mut self, align: TextAlign) -> Result<()> {
        self.ctx.set_text_align(align)
    }

    /// Sets the alignment by its canvas-style name. Unrecognized names are
    /// silently ignored, matching the pass-through contract of the original
    /// string-typed API.
    pub fn set_text_align_name(&mut self, name: &str) -> Result<()> {
        match TextAlign::from_name(name) {
            Some(align) => self.ctx.set_text_align(align),
            None => Ok(()),
        }
    }

    pub fn set_text_baseline(&mut self, baseline: TextBaseline) -> Result<()> {
        self.ctx.set_text_baseline(baseline)
    }

    pub fn set_text_baseline_name(&mut self, name: &str) -> Result<()> {
        match TextBaseline::from_name(name) {
            Some(baseline) => self.ctx.set_text_baseline(baseline),
            None => Ok(()),
        }
    }

    pub fn set_line_width(&mut self, width: f64) -> Result<()> {
        self.ctx.set_line_width(width)
    }

    /// Draws a straight stroked line. Both endpoints are position-fixed when
    /// the fix is enabled.
    pub fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Option<Paint>,
    ) -> Result<()> {
        log::debug!(target: "tabula", "draw_line {} {} {} {}", x1, y1, x2, y2);
        self.apply_stroke_color(color)?;
        self.ctx.begin_path()?;
        self.ctx.move_to(self.fix(x1), self.fix(y1))?;
        self.ctx.line_to(self.fix(x2), self.fix(y2))?;
        self.ctx.stroke()
    }

    /// Draws an axis-aligned rectangle. The stroke variant position-fixes
    /// the origin only; width and height are untouched, and fills are never
    /// fixed.
    pub fn draw_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Option<Paint>,
        fill: bool,
    ) -> Result<()> {
        log::debug!(target: "tabula", "draw_rect {} {} {} {} fill={}", x, y, w, h, fill);
        if fill {
            self.apply_fill_color(color)?;
            self.ctx.fill_rect(x, y, w, h)
        } else {
            self.apply_stroke_color(color)?;
            self.ctx.stroke_rect(self.fix(x), self.fix(y), w, h)
        }
    }

    /// Draws a rectangle with quarter-circle corners of radius `r`: four
    /// clockwise arcs starting at the top-left corner, closed before
    /// painting. With `r = 0` the arcs collapse to the corners and the shape
    /// degenerates to an ordinary rectangle.
    pub fn draw_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        r: f64,
        color: Option<Paint>,
        fill: bool,
    ) -> Result<()> {
        log::debug!(target: "tabula", "draw_rounded_rect {} {} {} {} r={} fill={}", x, y, w, h, r, fill);
        let (x, y) = if fill {
            (x, y)
        } else {
            (self.fix(x), self.fix(y))
        };
        let r = r.min(w / 2.0).min(h / 2.0);
        let right = x + w;
        let bottom = y + h;

        self.ctx.begin_path()?;
        self.ctx.arc(x + r, y + r, r, PI, 1.5 * PI)?;
        self.ctx.arc(right - r, y + r, r, 1.5 * PI, 0.0)?;
        self.ctx.arc(right - r, bottom - r, r, 0.0, 0.5 * PI)?;
        self.ctx.arc(x + r, bottom - r, r, 0.5 * PI, PI)?;
        self.ctx.close_path()?;
        self.paint_path(color, fill)
    }

    /// Draws a full circle. Never position-fixed.
    pub fn draw_circle(
        &mut self,
        x: f64,
        y: f64,
        r: f64,
        color: Option<Paint>,
        fill: bool,
    ) -> Result<()> {
        log::debug!(target: "tabula", "draw_circle {} {} r={} fill={}", x, y, r, fill);
        self.ctx.begin_path()?;
        self.ctx.arc(x, y, r, 0.0, 2.0 * PI)?;
        self.ctx.close_path()?;
        self.paint_path(color, fill)
    }

    /// Draws a closed polygon from a flat sequence of alternating x,y
    /// coordinates. Fewer than two values (less than one point) is a silent
    /// no-op. Never position-fixed.
    pub fn draw_polygon(&mut self, coords: &[f64], color: Option<Paint>, fill: bool) -> Result<()> {
        if coords.len() < 2 {
            return Ok(());
        }
        log::debug!(target: "tabula", "draw_polygon {} points fill={}", coords.len() / 2, fill);
        self.ctx.begin_path()?;
        self.ctx.move_to(coords[0], coords[1])?;
        for point in coords[2..].chunks_exact(2) {
            self.ctx.line_to(point[0], point[1])?;
        }
        self.ctx.close_path()?;
        self.paint_path(color, fill)
    }

    /// Draws filled or outlined glyph text. The origin is position-fixed
    /// when the fix is enabled.
    pub fn draw_text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        color: Option<Paint>,
        fill: bool,
    ) -> Result<()> {
        log::debug!(target: "tabula", "draw_text {} {} {:?} fill={}", x, y, text, fill);
        let (x, y) = (self.fix(x), self.fix(y));
        if fill {
            self.apply_fill_color(color)?;
            self.ctx.fill_text(text, x, y)
        } else {
            self.apply_stroke_color(color)?;
            self.ctx.stroke_text(text, x, y)
        }
    }

    /// Re-fills whatever path is currently active on the context. Lets a
    /// caller fill and stroke one path without rebuilding it.
    pub fn draw_fill(&mut self, color: Option<Paint>) -> Result<()> {
        self.apply_fill_color(color)?;
        self.ctx.fill()
    }

    /// Re-strokes whatever path is currently active on the context.
    pub fn draw_stroke(&mut self, color: Option<Paint>) -> Result<()> {
        self.apply_stroke_color(color)?;
        self.ctx.stroke()
    }

    /// Clears the surface according to the configured [`ClearMode`].
    pub fn clear(&mut self, color: Option<Paint>) -> Result<()> {
        let w = self.ctx.width() as f64;
        let h = self.ctx.height() as f64;
        log::debug!(target: "tabula", "clear {}x{} mode={:?}", w, h, self.clear_mode);
        match self.clear_mode {
            ClearMode::ClearThenFill => {
                self.ctx.clear_rect(0.0, 0.0, w, h)?;
                match color {
                    None => Ok(()),
                    Some(Paint::Color(ref name)) if name == "clear" => Ok(()),
                    Some(paint) => {
                        self.ctx.set_fill_paint(paint)?;
                        self.ctx.fill_rect(0.0, 0.0, w, h)
                    }
                }
            }
            ClearMode::FillOnly => {
                self.apply_fill_color(color)?;
                self.ctx.fill_rect(0.0, 0.0, w, h)
            }
        }
    }

    /// Measures text with the current font settings.
    pub fn measure_text(&self, text: &str) -> Result<crate::api::TextMetrics> {
        self.ctx.measure_text(text)
    }

    fn apply_font(&mut self) -> Result<()> {
        self.ctx.set_font(self.font.compose())
    }

    fn fix(&self, v: f64) -> f64 {
        if self.position_fix { v + 0.5 } else { v }
    }

    // Omitting the color keeps whichever paint is already set on the
    // context (the sticky-color contract).
    fn apply_fill_color(&mut self, color: Option<Paint>) -> Result<()> {
        match color {
            Some(paint) => self.ctx.set_fill_paint(paint),
            None => Ok(()),
        }
    }

    fn apply_stroke_color(&mut self, color: Option<Paint>) -> Result<()> {
        match color {
            Some(paint) => self.ctx.set_stroke_paint(paint),
            None => Ok(()),
        }
    }

    fn paint_path(&mut self, color: Option<Paint>, fill: bool) -> Result<()> {
        if fill {
            self.apply_fill_color(color)?;
            self.ctx.fill()
        } else {
            self.apply_stroke_color(color)?;
            self.ctx.stroke()
        }
    }
}
