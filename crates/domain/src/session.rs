use crate::{Point, Rgba};

/// Per-window drawing state owned by the UI shell.
#[derive(Debug, Clone, PartialEq)]
pub struct PadSession {
    pub drawing: bool,
    pub last_point: Option<Point>,
    pub ink: Rgba,
    pub background: Rgba,
    pub text_armed: bool,
}

impl Default for PadSession {
    fn default() -> Self {
        Self {
            drawing: false,
            last_point: None,
            ink: Rgba::BLACK,
            background: Rgba::WHITE,
            text_armed: false,
        }
    }
}

impl PadSession {
    pub fn with_colors(ink: Rgba, background: Rgba) -> Self {
        Self {
            ink,
            background,
            ..Self::default()
        }
    }

    pub fn begin_stroke(&mut self, point: Point) {
        self.drawing = true;
        self.last_point = Some(point);
    }

    /// Returns the segment to ink, if a stroke is in progress.
    pub fn extend_stroke(&mut self, point: Point) -> Option<(Point, Point)> {
        if !self.drawing {
            return None;
        }
        let from = self.last_point.replace(point)?;
        Some((from, point))
    }

    pub fn end_stroke(&mut self) {
        self.drawing = false;
        self.last_point = None;
    }

    /// Consumes the armed state; true if text should be stamped.
    pub fn take_text_arm(&mut self) -> bool {
        std::mem::take(&mut self.text_armed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_without_a_press_draw_nothing() {
        let mut session = PadSession::default();
        assert_eq!(session.extend_stroke(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn stroke_chains_segments_until_release() {
        let mut session = PadSession::default();
        session.begin_stroke(Point::new(0.0, 0.0));
        assert_eq!(
            session.extend_stroke(Point::new(3.0, 4.0)),
            Some((Point::new(0.0, 0.0), Point::new(3.0, 4.0)))
        );
        assert_eq!(
            session.extend_stroke(Point::new(5.0, 4.0)),
            Some((Point::new(3.0, 4.0), Point::new(5.0, 4.0)))
        );
        session.end_stroke();
        assert!(!session.drawing);
        assert_eq!(session.extend_stroke(Point::new(9.0, 9.0)), None);
    }

    #[test]
    fn text_arm_is_one_shot() {
        let mut session = PadSession {
            text_armed: true,
            ..PadSession::default()
        };
        assert!(session.take_text_arm());
        assert!(!session.take_text_arm());
    }
}
