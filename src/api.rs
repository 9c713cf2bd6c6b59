//! Traits and supporting types describing the primitive 2D drawing context
//! that [`DrawingSurface`](crate::DrawingSurface) forwards to. These are
//! interface definitions only; implement them for any backend (software
//! rasterizer, recording context, Cairo, etc.).

use crate::error::Result;

/// A color or gradient that can be used for fill/stroke.
///
/// Color strings are treated opaquely by the wrapper; only backends that
/// rasterize need to parse them.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Color(String),
    Gradient(Gradient),
}

impl From<&str> for Paint {
    fn from(color: &str) -> Self {
        Paint::Color(color.to_string())
    }
}

impl From<String> for Paint {
    fn from(color: String) -> Self {
        Paint::Color(color)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GradientKind {
    Linear { x0: f64, y0: f64, x1: f64, y1: f64 },
    Radial { x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn linear(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            kind: GradientKind::Linear { x0, y0, x1, y1 },
            stops: Vec::new(),
        }
    }

    pub fn radial(x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64) -> Self {
        Self {
            kind: GradientKind::Radial {
                x0,
                y0,
                r0,
                x1,
                y1,
                r1,
            },
            stops: Vec::new(),
        }
    }

    pub fn add_color_stop(&mut self, offset: f64, color: impl Into<String>) {
        self.stops.push(GradientStop {
            offset,
            color: color.into(),
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
    Center,
    Start,
    End,
}

impl TextAlign {
    /// Looks up an alignment by its canvas-style name. Unknown names yield
    /// `None`, which callers treat as "leave the current value alone".
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(TextAlign::Left),
            "right" => Some(TextAlign::Right),
            "center" => Some(TextAlign::Center),
            "start" => Some(TextAlign::Start),
            "end" => Some(TextAlign::End),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    Alphabetic,
    Ideographic,
    Bottom,
}

impl TextBaseline {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(TextBaseline::Top),
            "hanging" => Some(TextBaseline::Hanging),
            "middle" => Some(TextBaseline::Middle),
            "alphabetic" => Some(TextBaseline::Alphabetic),
            "ideographic" => Some(TextBaseline::Ideographic),
            "bottom" => Some(TextBaseline::Bottom),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
}

/// Pixel dimensions of the backing surface.
pub trait SurfaceInfo {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resizes the backing surface. Resizing a pixel surface discards its
    /// contents; callers must redraw.
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;
}

/// Sticky paint state living on the context. Setting a paint affects every
/// subsequent fill/stroke until it is set again.
pub trait PaintStyles {
    fn set_fill_paint(&mut self, paint: Paint) -> Result<()>;
    fn fill_paint(&self) -> Result<Paint>;

    fn set_stroke_paint(&mut self, paint: Paint) -> Result<()>;
    fn stroke_paint(&self) -> Result<Paint>;

    fn set_line_width(&mut self, value: f64) -> Result<()>;
    fn line_width(&self) -> Result<f64>;
}

/// Path construction and painting.
pub trait PathOps {
    /// Starts a new empty path.
    fn begin_path(&mut self) -> Result<()>;
    /// Closes the current subpath with a straight line.
    fn close_path(&mut self) -> Result<()>;
    /// Moves the current point without drawing.
    fn move_to(&mut self, x: f64, y: f64) -> Result<()>;
    /// Adds a straight line from the current point to (x, y).
    fn line_to(&mut self, x: f64, y: f64) -> Result<()>;
    /// Adds a clockwise arc centered at (x, y).
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> Result<()>;

    /// Fills the current path with the fill paint. The path stays active, so
    /// a caller can fill and then stroke the same path without rebuilding it.
    fn fill(&mut self) -> Result<()>;
    /// Strokes the current path with the stroke paint. The path stays active.
    fn stroke(&mut self) -> Result<()>;
}

/// Axis-aligned rectangle shortcuts.
pub trait RectOps {
    /// Clears the rectangle to full transparency.
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()>;
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()>;
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()>;
}

/// Text state and rendering.
pub trait TextOps {
    /// Sets the composed font string, e.g. `"bold 12px serif"`.
    fn set_font(&mut self, value: String) -> Result<()>;
    fn font(&self) -> Result<String>;

    fn set_text_align(&mut self, value: TextAlign) -> Result<()>;
    fn text_align(&self) -> Result<TextAlign>;

    fn set_text_baseline(&mut self, value: TextBaseline) -> Result<()>;
    fn text_baseline(&self) -> Result<TextBaseline>;

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()>;
    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<()>;
    fn measure_text(&self, text: &str) -> Result<TextMetrics>;
}

/// The full primitive context surface a [`DrawingSurface`](crate::DrawingSurface)
/// draws through.
pub trait DrawContext: SurfaceInfo + PaintStyles + PathOps + RectOps + TextOps {}

impl<T> DrawContext for T where T: SurfaceInfo + PaintStyles + PathOps + RectOps + TextOps {}
