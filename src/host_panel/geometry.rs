/// Pointer gesture math for the launcher bubble and the panel resize handle

/// Movement beyond this many pixels on either axis turns a press into a drag
pub const DRAG_THRESHOLD_PX: i32 = 3;

pub const MIN_WIDTH: i32 = 250;
pub const MAX_WIDTH: i32 = 600;
pub const MIN_HEIGHT: i32 = 350;
pub const MAX_HEIGHT: i32 = 800;

pub const DEFAULT_PANEL_SIZE: Size = Size {
    width: 350,
    height: 500,
};

/// Bubble starts this far from the bottom-right corner of the viewport
pub const BUBBLE_MARGIN: i32 = 20;
pub const BUBBLE_SIZE: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn offset(self, delta: Point) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn clamped(width: i32, height: i32) -> Size {
        Size {
            width: width.clamp(MIN_WIDTH, MAX_WIDTH),
            height: height.clamp(MIN_HEIGHT, MAX_HEIGHT),
        }
    }
}

/// Exactly one of these is on screen at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Bubble,
    Panel,
}

impl Visibility {
    pub fn toggled(self) -> Visibility {
        match self {
            Visibility::Bubble => Visibility::Panel,
            Visibility::Panel => Visibility::Bubble,
        }
    }
}

/// Where the bubble sits, how big the panel is, and which one is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    pub bubble: Point,
    pub panel: Size,
    pub visibility: Visibility,
}

impl PanelGeometry {
    pub fn new(bubble: Point) -> Self {
        PanelGeometry {
            bubble,
            panel: DEFAULT_PANEL_SIZE,
            visibility: Visibility::Bubble,
        }
    }

    /// Bubble position for a viewport of the given size
    pub fn default_bubble(viewport_width: i32, viewport_height: i32) -> Point {
        Point::new(
            (viewport_width - BUBBLE_SIZE - BUBBLE_MARGIN).max(0),
            (viewport_height - BUBBLE_SIZE - BUBBLE_MARGIN).max(0),
        )
    }

    pub fn toggle(&mut self) -> Visibility {
        self.visibility = self.visibility.toggled();
        self.visibility
    }
}

/// How a bubble press ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Clicked,
    Dragged,
}

/// A press on the bubble that may become a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleDrag {
    anchor: Point,
    dragging: bool,
}

impl BubbleDrag {
    pub fn press(at: Point) -> Self {
        BubbleDrag {
            anchor: at,
            dragging: false,
        }
    }

    /// Returns how far to move the bubble, if this motion passes the threshold.
    /// The anchor follows each applied move, so small jitter after that is ignored.
    pub fn motion(&mut self, at: Point) -> Option<Point> {
        let delta = Point::new(at.x - self.anchor.x, at.y - self.anchor.y);
        if delta.x.abs() > DRAG_THRESHOLD_PX || delta.y.abs() > DRAG_THRESHOLD_PX {
            self.dragging = true;
            self.anchor = at;
            Some(delta)
        } else {
            None
        }
    }

    pub fn release(self) -> GestureOutcome {
        if self.dragging {
            GestureOutcome::Dragged
        } else {
            GestureOutcome::Clicked
        }
    }
}

/// A drag on the corner handle. The panel is anchored at its bottom edge, so
/// moving up makes it taller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDrag {
    origin: Point,
    initial: Size,
}

impl ResizeDrag {
    pub fn press(at: Point, initial: Size) -> Self {
        ResizeDrag {
            origin: at,
            initial,
        }
    }

    pub fn size_at(&self, at: Point) -> Size {
        Size::clamped(
            self.initial.width + (at.x - self.origin.x),
            self.initial.height + (self.origin.y - at.y),
        )
    }
}
