use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_WIDTH: i32 = 1040;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 690;
pub const CASCADE_ORIGIN: i32 = 100;
pub const CASCADE_STEP: i32 = 20;
pub const BASE_Z_INDEX: u32 = 100;
pub const TASKBAR_HEIGHT_PX: i32 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset_from(self, origin: Point) -> Self {
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// Browser viewport dimensions, including the taskbar strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Area a maximized window occupies: full width, height minus the taskbar.
    pub fn work_area(self) -> Size {
        Size {
            width: self.width.max(0),
            height: (self.height - TASKBAR_HEIGHT_PX).max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: String,
    pub title: String,
    pub launch_url: String,
    pub position: Point,
    pub size: Size,
    pub last_position: Option<Point>,
    pub last_size: Option<Size>,
    pub z_index: u32,
    pub state: WindowState,
    pub is_focused: bool,
}

impl WindowRecord {
    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.state == WindowState::Maximized
    }
}

/// What the shell needs to open (or re-focus) the window of one app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub app_id: String,
    pub title: String,
    pub launch_url: String,
}

impl OpenWindowRequest {
    pub fn new(
        app_id: impl Into<String>,
        title: impl Into<String>,
        launch_url: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            title: title.into(),
            launch_url: launch_url.into(),
        }
    }
}

/// Window registry. `windows` is kept in taskbar order; stacking is carried by `z_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopState {
    pub next_window_id: u64,
    pub windows: Vec<WindowRecord>,
    pub focused_window_id: Option<WindowId>,
    pub max_z_index: u32,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            windows: Vec::new(),
            focused_window_id: None,
            max_z_index: BASE_Z_INDEX,
        }
    }
}

impl DesktopState {
    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.focused_window_id
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn window_for_app(&self, app_id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.app_id == app_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    pub window_id: WindowId,
    /// Pointer position relative to the window origin when the drag began.
    pub pointer_offset: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
}

impl InteractionState {
    pub fn is_dragging(&self, window_id: WindowId) -> bool {
        self.dragging
            .is_some_and(|session| session.window_id == window_id)
    }
}
