//! A context that records every primitive operation together with a snapshot
//! of the sticky state. Useful for tests and for replaying a draw sequence
//! against another backend.

use crate::api::*;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    ClosePath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPath {
    pub commands: Vec<PathCommand>,
}

impl RecordedPath {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }
}

/// The sticky state captured alongside each recorded operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub fill_paint: Paint,
    pub stroke_paint: Paint,
    pub line_width: f64,
    pub font: String,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillPath { path: RecordedPath, state: Snapshot },
    StrokePath { path: RecordedPath, state: Snapshot },
    ClearRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        state: Snapshot,
    },
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        state: Snapshot,
    },
    StrokeRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        state: Snapshot,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        state: Snapshot,
    },
    StrokeText {
        text: String,
        x: f64,
        y: f64,
        state: Snapshot,
    },
}

#[derive(Clone, Debug)]
struct RecorderState {
    fill_paint: Paint,
    stroke_paint: Paint,
    line_width: f64,
    font: String,
    text_align: TextAlign,
    text_baseline: TextBaseline,
}

impl Default for RecorderState {
    fn default() -> Self {
        Self {
            fill_paint: Paint::Color("#000".to_string()),
            stroke_paint: Paint::Color("#000".to_string()),
            line_width: 1.0,
            font: "10px sans-serif".to_string(),
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
        }
    }
}

pub struct RecordingContext {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
    state: RecorderState,
    current_path: Vec<PathCommand>,
}

impl RecordingContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            state: RecorderState::default(),
            current_path: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            fill_paint: self.state.fill_paint.clone(),
            stroke_paint: self.state.stroke_paint.clone(),
            line_width: self.state.line_width,
            font: self.state.font.clone(),
            text_align: self.state.text_align,
            text_baseline: self.state.text_baseline,
        }
    }

    fn record_op(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

impl SurfaceInfo for RecordingContext {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        // The op list models the visible surface contents, which resizing a
        // pixel surface wipes.
        self.ops.clear();
        self.current_path.clear();
        Ok(())
    }
}

impl PaintStyles for RecordingContext {
    fn set_fill_paint(&mut self, paint: Paint) -> Result<()> {
        self.state.fill_paint = paint;
        Ok(())
    }

    fn fill_paint(&self) -> Result<Paint> {
        Ok(self.state.fill_paint.clone())
    }

    fn set_stroke_paint(&mut self, paint: Paint) -> Result<()> {
        self.state.stroke_paint = paint;
        Ok(())
    }

    fn stroke_paint(&self) -> Result<Paint> {
        Ok(self.state.stroke_paint.clone())
    }

    fn set_line_width(&mut self, value: f64) -> Result<()> {
        self.state.line_width = value;
        Ok(())
    }

    fn line_width(&self) -> Result<f64> {
        Ok(self.state.line_width)
    }
}

impl PathOps for RecordingContext {
    fn begin_path(&mut self) -> Result<()> {
        self.current_path.clear();
        Ok(())
    }

    fn close_path(&mut self) -> Result<()> {
        self.current_path.push(PathCommand::ClosePath);
        Ok(())
    }

    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.current_path.push(PathCommand::MoveTo { x, y });
        Ok(())
    }

    fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.current_path.push(PathCommand::LineTo { x, y });
        Ok(())
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> Result<()> {
        self.current_path.push(PathCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
        });
        Ok(())
    }

    fn fill(&mut self) -> Result<()> {
        if self.current_path.is_empty() {
            return Ok(());
        }
        // The path stays active so it can be stroked afterwards.
        let op = DrawOp::FillPath {
            path: RecordedPath::new(self.current_path.clone()),
            state: self.snapshot(),
        };
        self.record_op(op);
        Ok(())
    }

    fn stroke(&mut self) -> Result<()> {
        if self.current_path.is_empty() {
            return Ok(());
        }
        let op = DrawOp::StrokePath {
            path: RecordedPath::new(self.current_path.clone()),
            state: self.snapshot(),
        };
        self.record_op(op);
        Ok(())
    }
}

impl RectOps for RecordingContext {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        let op = DrawOp::ClearRect {
            x,
            y,
            w,
            h,
            state: self.snapshot(),
        };
        self.record_op(op);
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        let op = DrawOp::FillRect {
            x,
            y,
            w,
            h,
            state: self.snapshot(),
        };
        self.record_op(op);
        Ok(())
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        let op = DrawOp::StrokeRect {
            x,
            y,
            w,
            h,
            state: self.snapshot(),
        };
        self.record_op(op);
        Ok(())
    }
}

impl TextOps for RecordingContext {
    fn set_font(&mut self, value: String) -> Result<()> {
        self.state.font = value;
        Ok(())
    }

    fn font(&self) -> Result<String> {
        Ok(self.state.font.clone())
    }

    fn set_text_align(&mut self, value: TextAlign) -> Result<()> {
        self.state.text_align = value;
        Ok(())
    }

    fn text_align(&self) -> Result<TextAlign> {
        Ok(self.state.text_align)
    }

    fn set_text_baseline(&mut self, value: TextBaseline) -> Result<()> {
        self.state.text_baseline = value;
        Ok(())
    }

    fn text_baseline(&self) -> Result<TextBaseline> {
        Ok(self.state.text_baseline)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        let op = DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            state: self.snapshot(),
        };
        self.record_op(op);
        Ok(())
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        let op = DrawOp::StrokeText {
            text: text.to_string(),
            x,
            y,
            state: self.snapshot(),
        };
        self.record_op(op);
        Ok(())
    }

    fn measure_text(&self, text: &str) -> Result<TextMetrics> {
        // Placeholder advance; the recording backend has no font machinery.
        Ok(TextMetrics {
            width: text.chars().count() as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_fill_rect_with_sticky_state() {
        let mut c = RecordingContext::new(50, 50);
        c.set_fill_paint(Paint::Color("#f00".into())).unwrap();
        c.fill_rect(1.0, 2.0, 3.0, 4.0).unwrap();
        let ops = c.ops();
        assert_eq!(ops.len(), 1);
        match &ops[0] {
            DrawOp::FillRect { x, y, w, h, state } => {
                assert_eq!((*x, *y, *w, *h), (1.0, 2.0, 3.0, 4.0));
                assert_eq!(state.fill_paint, Paint::Color("#f00".into()));
                assert_eq!(state.stroke_paint, Paint::Color("#000".into()));
            }
            _ => panic!("unexpected op"),
        }
    }

    #[test]
    fn fill_keeps_the_path_active_for_a_following_stroke() {
        let mut c = RecordingContext::new(50, 50);
        c.begin_path().unwrap();
        c.move_to(0.0, 0.0).unwrap();
        c.line_to(10.0, 0.0).unwrap();
        c.close_path().unwrap();
        c.fill().unwrap();
        c.stroke().unwrap();

        let ops = c.ops();
        assert_eq!(ops.len(), 2);
        let (filled, stroked) = match (&ops[0], &ops[1]) {
            (DrawOp::FillPath { path: f, .. }, DrawOp::StrokePath { path: s, .. }) => (f, s),
            _ => panic!("unexpected ops"),
        };
        assert_eq!(filled, stroked);
    }

    #[test]
    fn painting_an_empty_path_records_nothing() {
        let mut c = RecordingContext::new(50, 50);
        c.begin_path().unwrap();
        c.fill().unwrap();
        c.stroke().unwrap();
        assert!(c.ops().is_empty());
    }

    #[test]
    fn begin_path_discards_the_previous_path() {
        let mut c = RecordingContext::new(50, 50);
        c.begin_path().unwrap();
        c.move_to(0.0, 0.0).unwrap();
        c.line_to(5.0, 5.0).unwrap();
        c.begin_path().unwrap();
        c.move_to(1.0, 1.0).unwrap();
        c.line_to(2.0, 2.0).unwrap();
        c.stroke().unwrap();

        match &c.ops()[0] {
            DrawOp::StrokePath { path, .. } => {
                assert_eq!(
                    path.commands,
                    vec![
                        PathCommand::MoveTo { x: 1.0, y: 1.0 },
                        PathCommand::LineTo { x: 2.0, y: 2.0 },
                    ]
                );
            }
            _ => panic!("unexpected op"),
        }
    }

    #[test]
    fn resize_updates_dimensions_and_drops_recorded_ops() {
        let mut c = RecordingContext::new(50, 50);
        c.fill_rect(0.0, 0.0, 10.0, 10.0).unwrap();
        c.resize(80, 60).unwrap();
        assert_eq!(c.width(), 80);
        assert_eq!(c.height(), 60);
        assert!(c.ops().is_empty());
    }
}
