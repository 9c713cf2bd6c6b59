//! Cairo backend behind the optional `cairo` crate feature. Owns both the
//! pixel surface and the drawing context bound to it, and translates the
//! primitive trait calls into Cairo operations.

use cairo::{Context, Format, FontSlant, FontWeight, ImageSurface, Operator};

use crate::api::*;
use crate::error::{Result, TabulaError};

/// Adapter that renders the primitive context operations with Cairo. The
/// paints are held here and applied to the Cairo context immediately before
/// each fill/stroke, which is what makes the sticky-color contract work.
pub struct CairoContext {
    surface: ImageSurface,
    ctx: Context,
    fill_paint: Paint,
    stroke_paint: Paint,
    font: String,
    text_align: TextAlign,
    text_baseline: TextBaseline,
}

fn allocate(width: u32, height: u32) -> Result<(ImageSurface, Context)> {
    let surface = ImageSurface::create(Format::ARgb32, width as i32, height as i32).map_err(
        |err| TabulaError::SurfaceAllocation {
            width,
            height,
            reason: err.to_string(),
        },
    )?;
    let ctx = Context::new(&surface).map_err(|err| TabulaError::SurfaceAllocation {
        width,
        height,
        reason: err.to_string(),
    })?;
    Ok((surface, ctx))
}

impl CairoContext {
    /// Allocates an ARGB32 image surface of the given pixel dimensions and
    /// binds a context to it. The only failure mode is the environment being
    /// unable to produce the surface.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let (surface, ctx) = allocate(width, height)?;
        Ok(Self {
            surface,
            ctx,
            fill_paint: Paint::Color("#000000".into()),
            stroke_paint: Paint::Color("#000000".into()),
            font: "10px sans-serif".into(),
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
        })
    }

    /// The raw pixel surface, for host embedding or direct Cairo use.
    pub fn image_surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// The raw Cairo context, for operations the traits do not cover.
    pub fn cairo_context(&self) -> &Context {
        &self.ctx
    }

    /// Flushes pending drawing and hands the surface back. The context is
    /// dropped so the surface's pixel data can be borrowed exclusively.
    pub fn finish(self) -> ImageSurface {
        let CairoContext { surface, ctx, .. } = self;
        drop(ctx);
        surface.flush();
        surface
    }

    fn apply_paint(&self, paint: &Paint) -> Result<()> {
        match paint {
            Paint::Color(s) => {
                let (r, g, b, a) = parse_color(s);
                self.ctx.set_source_rgba(r, g, b, a);
            }
            Paint::Gradient(grad) => match &grad.kind {
                GradientKind::Linear { x0, y0, x1, y1 } => {
                    let pattern = cairo::LinearGradient::new(*x0, *y0, *x1, *y1);
                    for stop in &grad.stops {
                        let (r, g, b, a) = parse_color(&stop.color);
                        pattern.add_color_stop_rgba(stop.offset, r, g, b, a);
                    }
                    self.ctx.set_source(&pattern)?;
                }
                GradientKind::Radial {
                    x0,
                    y0,
                    r0,
                    x1,
                    y1,
                    r1,
                } => {
                    let pattern = cairo::RadialGradient::new(*x0, *y0, *r0, *x1, *y1, *r1);
                    for stop in &grad.stops {
                        let (r, g, b, a) = parse_color(&stop.color);
                        pattern.add_color_stop_rgba(stop.offset, r, g, b, a);
                    }
                    self.ctx.set_source(&pattern)?;
                }
            },
        }
        Ok(())
    }

    /// Runs an operation on its own fresh path and puts the caller's current
    /// path back afterwards. The rect and text shortcuts must not repaint or
    /// destroy a path a caller is still filling/stroking.
    fn with_own_path<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let saved = self.ctx.copy_path()?;
        self.ctx.new_path();
        let result = op(self);
        self.ctx.new_path();
        self.ctx.append_path(&saved);
        result
    }

    fn apply_font(&self) {
        let (size, family, slant, weight) = parse_font(&self.font);
        self.ctx.select_font_face(family, slant, weight);
        self.ctx.set_font_size(size);
    }

    fn adjust_text_position(&self, text: &str, x: f64, y: f64) -> Result<(f64, f64)> {
        let extents = self.ctx.text_extents(text)?;
        let mut tx = x;
        let mut ty = y;

        tx -= match self.text_align {
            TextAlign::Left | TextAlign::Start => 0.0,
            TextAlign::Center => extents.width() / 2.0,
            TextAlign::Right | TextAlign::End => extents.width(),
        };

        ty += match self.text_baseline {
            TextBaseline::Top => extents.height(),
            TextBaseline::Hanging => extents.height() * 0.8,
            TextBaseline::Middle => extents.height() * 0.5,
            TextBaseline::Alphabetic => 0.0,
            TextBaseline::Ideographic => extents.height() * 0.1,
            TextBaseline::Bottom => -extents.y_bearing(),
        };

        Ok((tx, ty))
    }
}

impl SurfaceInfo for CairoContext {
    fn width(&self) -> u32 {
        self.surface.width() as u32
    }

    fn height(&self) -> u32 {
        self.surface.height() as u32
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        // A fresh surface starts out fully transparent; the sticky state is
        // carried over so only the pixel contents are lost.
        let line_width = self.ctx.line_width();
        let (surface, ctx) = allocate(width, height)?;
        ctx.set_line_width(line_width);
        self.surface = surface;
        self.ctx = ctx;
        Ok(())
    }
}

impl PaintStyles for CairoContext {
    fn set_fill_paint(&mut self, paint: Paint) -> Result<()> {
        self.fill_paint = paint;
        Ok(())
    }

    fn fill_paint(&self) -> Result<Paint> {
        Ok(self.fill_paint.clone())
    }

    fn set_stroke_paint(&mut self, paint: Paint) -> Result<()> {
        self.stroke_paint = paint;
        Ok(())
    }

    fn stroke_paint(&self) -> Result<Paint> {
        Ok(self.stroke_paint.clone())
    }

    fn set_line_width(&mut self, value: f64) -> Result<()> {
        self.ctx.set_line_width(value);
        Ok(())
    }

    fn line_width(&self) -> Result<f64> {
        Ok(self.ctx.line_width())
    }
}

impl PathOps for CairoContext {
    fn begin_path(&mut self) -> Result<()> {
        self.ctx.new_path();
        Ok(())
    }

    fn close_path(&mut self) -> Result<()> {
        self.ctx.close_path();
        Ok(())
    }

    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.ctx.move_to(x, y);
        Ok(())
    }

    fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.ctx.line_to(x, y);
        Ok(())
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> Result<()> {
        self.ctx.arc(x, y, radius, start_angle, end_angle);
        Ok(())
    }

    fn fill(&mut self) -> Result<()> {
        self.apply_paint(&self.fill_paint)?;
        // Preserve so the same path can be stroked afterwards.
        self.ctx.fill_preserve()?;
        Ok(())
    }

    fn stroke(&mut self) -> Result<()> {
        self.apply_paint(&self.stroke_paint)?;
        self.ctx.stroke_preserve()?;
        Ok(())
    }
}

impl RectOps for CairoContext {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.with_own_path(|this| {
            this.ctx.save()?;
            this.ctx.rectangle(x, y, w, h);
            this.ctx.set_operator(Operator::Clear);
            this.ctx.fill()?;
            this.ctx.restore()?;
            Ok(())
        })
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.with_own_path(|this| {
            this.ctx.rectangle(x, y, w, h);
            this.apply_paint(&this.fill_paint)?;
            this.ctx.fill()?;
            Ok(())
        })
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.with_own_path(|this| {
            this.ctx.rectangle(x, y, w, h);
            this.apply_paint(&this.stroke_paint)?;
            this.ctx.stroke()?;
            Ok(())
        })
    }
}

impl TextOps for CairoContext {
    fn set_font(&mut self, value: String) -> Result<()> {
        self.font = value;
        Ok(())
    }

    fn font(&self) -> Result<String> {
        Ok(self.font.clone())
    }

    fn set_text_align(&mut self, value: TextAlign) -> Result<()> {
        self.text_align = value;
        Ok(())
    }

    fn text_align(&self) -> Result<TextAlign> {
        Ok(self.text_align)
    }

    fn set_text_baseline(&mut self, value: TextBaseline) -> Result<()> {
        self.text_baseline = value;
        Ok(())
    }

    fn text_baseline(&self) -> Result<TextBaseline> {
        Ok(self.text_baseline)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        self.apply_font();
        self.apply_paint(&self.fill_paint)?;
        let (tx, ty) = self.adjust_text_position(text, x, y)?;
        self.with_own_path(|this| {
            this.ctx.move_to(tx, ty);
            this.ctx.show_text(text)?;
            Ok(())
        })
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        self.apply_font();
        self.apply_paint(&self.stroke_paint)?;
        let (tx, ty) = self.adjust_text_position(text, x, y)?;
        self.with_own_path(|this| {
            this.ctx.move_to(tx, ty);
            this.ctx.text_path(text);
            this.ctx.stroke()?;
            Ok(())
        })
    }

    fn measure_text(&self, text: &str) -> Result<TextMetrics> {
        self.apply_font();
        let extents = self.ctx.text_extents(text)?;
        Ok(TextMetrics {
            width: extents.width(),
        })
    }
}

fn parse_color(color: &str) -> (f64, f64, f64, f64) {
    let c = color.trim();
    if let Some(hex) = c.strip_prefix('#') {
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[1..2], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[2..3], 16).unwrap_or(0);
                return (
                    (r * 17) as f64 / 255.0,
                    (g * 17) as f64 / 255.0,
                    (b * 17) as f64 / 255.0,
                    1.0,
                );
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                return (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0, 1.0);
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                let a = u8::from_str_radix(&hex[6..8], 16).unwrap_or(255);
                return (
                    r as f64 / 255.0,
                    g as f64 / 255.0,
                    b as f64 / 255.0,
                    a as f64 / 255.0,
                );
            }
            _ => {}
        }
    }

    // A small named table; the wrapper treats color strings opaquely, so
    // names have to resolve here.
    match c {
        "black" => (0.0, 0.0, 0.0, 1.0),
        "white" => (1.0, 1.0, 1.0, 1.0),
        "red" => (1.0, 0.0, 0.0, 1.0),
        "green" => (0.0, 128.0 / 255.0, 0.0, 1.0),
        "lime" => (0.0, 1.0, 0.0, 1.0),
        "blue" => (0.0, 0.0, 1.0, 1.0),
        "yellow" => (1.0, 1.0, 0.0, 1.0),
        "cyan" => (0.0, 1.0, 1.0, 1.0),
        "magenta" => (1.0, 0.0, 1.0, 1.0),
        "gray" | "grey" => (128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0, 1.0),
        "transparent" => (0.0, 0.0, 0.0, 0.0),
        // Fallback to opaque black if parsing fails.
        _ => (0.0, 0.0, 0.0, 1.0),
    }
}

fn parse_font(font: &str) -> (f64, &str, FontSlant, FontWeight) {
    // Minimal parser for composed strings like "bold italic 12px serif".
    let mut size = 10.0;
    let mut family = "sans-serif";
    let mut slant = FontSlant::Normal;
    let mut weight = FontWeight::Normal;
    for part in font.split_whitespace() {
        if let Some(px) = part.strip_suffix("px") {
            if let Ok(v) = px.parse::<f64>() {
                size = v;
            }
        } else if part == "bold" {
            weight = FontWeight::Bold;
        } else if part == "italic" || part == "oblique" {
            slant = FontSlant::Italic;
        } else {
            family = part;
        }
    }
    (size, family, slant, weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawingSurface, SurfaceOptions};

    fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> u32 {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let idx = y * stride + x * 4;
        u32::from_ne_bytes([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]])
    }

    #[test]
    fn clear_then_fill_leaves_the_whole_surface_blue() {
        let mut s = DrawingSurface::cairo(16, 16, SurfaceOptions::default()).unwrap();
        s.draw_rect(2.0, 2.0, 4.0, 4.0, Some("red".into()), true).unwrap();
        s.clear(None).unwrap();
        s.draw_rect(0.0, 0.0, 16.0, 16.0, Some("blue".into()), true)
            .unwrap();
        let mut surface = s.into_context().finish();
        // ARGB32 premultiplied: opaque blue is 0xFF0000FF.
        for (x, y) in [(0, 0), (8, 8), (15, 15)] {
            assert_eq!(pixel(&mut surface, x, y), 0xFF0000FF);
        }
    }

    #[test]
    fn clear_with_no_color_makes_the_surface_transparent() {
        let mut s = DrawingSurface::cairo(8, 8, SurfaceOptions::default()).unwrap();
        s.draw_rect(0.0, 0.0, 8.0, 8.0, Some("red".into()), true).unwrap();
        s.clear(None).unwrap();
        let mut surface = s.into_context().finish();
        assert_eq!(pixel(&mut surface, 4, 4), 0);
    }

    #[test]
    fn resize_discards_pixels_and_keeps_line_width() {
        let mut ctx = CairoContext::new(8, 8).unwrap();
        ctx.set_line_width(3.0).unwrap();
        ctx.fill_rect(0.0, 0.0, 8.0, 8.0).unwrap();
        ctx.resize(12, 12).unwrap();
        assert_eq!(ctx.width(), 12);
        assert_eq!(ctx.line_width().unwrap(), 3.0);
        let mut surface = ctx.finish();
        assert_eq!(pixel(&mut surface, 2, 2), 0);
    }

    #[test]
    fn rect_fill_does_not_repaint_a_preserved_path() {
        let mut s = DrawingSurface::cairo(32, 32, SurfaceOptions::default()).unwrap();
        // The filled circle's path stays active so it could be stroked next;
        // the rect shortcut must not pick it up.
        s.draw_circle(8.0, 8.0, 6.0, Some("red".into()), true).unwrap();
        s.draw_rect(20.0, 20.0, 8.0, 8.0, Some("blue".into()), true)
            .unwrap();
        let mut surface = s.into_context().finish();
        assert_eq!(pixel(&mut surface, 8, 8), 0xFFFF0000);
        assert_eq!(pixel(&mut surface, 24, 24), 0xFF0000FF);
    }

    #[test]
    fn clear_rect_does_not_consume_the_active_path() {
        let mut ctx = CairoContext::new(16, 16).unwrap();
        ctx.begin_path().unwrap();
        ctx.move_to(2.0, 2.0).unwrap();
        ctx.line_to(14.0, 2.0).unwrap();
        ctx.line_to(14.0, 14.0).unwrap();
        ctx.close_path().unwrap();
        ctx.clear_rect(0.0, 0.0, 16.0, 16.0).unwrap();
        ctx.set_fill_paint(Paint::Color("red".into())).unwrap();
        ctx.fill().unwrap();
        let mut surface = ctx.finish();
        // Centroid of the triangle, well inside the filled region.
        assert_eq!(pixel(&mut surface, 10, 5), 0xFFFF0000);
    }

    #[test]
    fn stroked_text_leaves_the_active_path_strokable() {
        let mut s = DrawingSurface::cairo(32, 32, SurfaceOptions::default()).unwrap();
        s.set_line_width(4.0).unwrap();
        s.draw_circle(16.0, 16.0, 6.0, Some("red".into()), false)
            .unwrap();
        s.draw_text(4.0, 4.0, "x", Some("blue".into()), false).unwrap();
        s.draw_stroke(Some("lime".into())).unwrap();
        let mut surface = s.into_context().finish();
        // Mid-annulus of the circle stroke: re-stroked lime, not text blue.
        assert_eq!(pixel(&mut surface, 22, 16), 0xFF00FF00);
    }

    #[test]
    fn filled_text_leaves_the_active_path_fillable() {
        let mut s = DrawingSurface::cairo(32, 32, SurfaceOptions::default()).unwrap();
        s.draw_circle(8.0, 8.0, 6.0, Some("red".into()), true).unwrap();
        s.draw_text(20.0, 4.0, "x", Some("blue".into()), true).unwrap();
        s.draw_fill(Some("lime".into())).unwrap();
        let mut surface = s.into_context().finish();
        assert_eq!(pixel(&mut surface, 8, 8), 0xFF00FF00);
    }

    #[test]
    fn measure_text_reports_a_positive_advance() {
        let mut ctx = CairoContext::new(8, 8).unwrap();
        ctx.set_font("12px sans-serif".into()).unwrap();
        assert!(ctx.measure_text("hello").unwrap().width > 0.0);
    }

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#ff0000"), (1.0, 0.0, 0.0, 1.0));
        assert_eq!(parse_color("#f00"), (1.0, 0.0, 0.0, 1.0));
        assert_eq!(parse_color("blue"), (0.0, 0.0, 1.0, 1.0));
        assert_eq!(parse_color("transparent"), (0.0, 0.0, 0.0, 0.0));
        // Unknown strings fall back to opaque black.
        assert_eq!(parse_color("no-such-color"), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn parses_decorated_font_strings() {
        let (size, family, slant, weight) = parse_font("bold italic 14px serif");
        assert_eq!(size, 14.0);
        assert_eq!(family, "serif");
        assert_eq!(slant, FontSlant::Italic);
        assert_eq!(weight, FontWeight::Bold);
    }
}
