//! Pointer gesture tracking

/// Pointer travel (in pixels) after which a press counts as an orbit drag
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Distinguishes a tap from a drag across one pointer press.
///
/// A press that travels more than [`DRAG_THRESHOLD_PX`] from where it went
/// down is a camera drag and never produces a tap.
#[derive(Debug, Default)]
pub struct TapGesture {
    /// Where the current press started, if a pointer is down
    press_origin: Option<(f64, f64)>,
    /// Whether the current press has moved past the drag threshold
    dragging: bool,
}

impl TapGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer press
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.press_origin = Some((x, y));
        self.dragging = false;
    }

    /// Process pointer movement. Movement without a press is ignored.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some((ox, oy)) = self.press_origin else {
            return;
        };
        let dx = x - ox;
        let dy = y - oy;
        if (dx * dx + dy * dy).sqrt() > DRAG_THRESHOLD_PX {
            self.dragging = true;
        }
    }

    /// Process a pointer release. Returns true if the press was a tap.
    pub fn pointer_up(&mut self) -> bool {
        let was_pressed = self.press_origin.take().is_some();
        let tap = was_pressed && !self.dragging;
        self.dragging = false;
        tap
    }

    /// Whether the current press has turned into a drag
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}
