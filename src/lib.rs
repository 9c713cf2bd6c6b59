//! A small convenience wrapper around a 2D drawing surface.
//!
//! [`DrawingSurface`] owns one primitive drawing context, tracks a few pieces
//! of presentation state (font family/size/decorations, text alignment,
//! position-fix flag), and exposes shape-drawing helpers (line, rectangle,
//! rounded rectangle, circle, polygon, text) that forward to the context's
//! primitive path/fill/stroke/text operations, optionally applying a
//! half-pixel correction so 1-pixel strokes land crisply on the pixel grid.
//!
//! The context itself is the trait surface in [`api`]; two backends are
//! provided: a recording context for inspection and testing, and a Cairo
//! rasterizer behind the `cairo` feature (on by default).
//!
//! ```
//! use tabula_rs::{DrawingSurface, SurfaceOptions};
//!
//! # fn main() -> tabula_rs::Result<()> {
//! let mut board = DrawingSurface::recording(400, 300, SurfaceOptions::default())?;
//! board.draw_rect(10.0, 10.0, 100.0, 50.0, Some("#ff0000".into()), true)?;
//! board.draw_line(0.0, 0.0, 400.0, 300.0, Some("#000".into()))?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod backends;
mod error;
mod font;
mod surface;

pub use api::{
    DrawContext, Gradient, GradientKind, GradientStop, Paint, PaintStyles, PathOps, RectOps,
    SurfaceInfo, TextAlign, TextBaseline, TextMetrics, TextOps,
};
pub use error::{Result, TabulaError};
pub use font::FontSpec;
pub use surface::{ClearMode, DrawingSurface, SurfaceOptions};

#[cfg(feature = "cairo")]
pub use backends::cairo::CairoContext;
pub use backends::recording::RecordingContext;
