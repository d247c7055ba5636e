//! Shared window-manager transition helpers used by the desktop reducer.

use crate::model::{
    DesktopState, Point, Size, Viewport, WindowId, WindowRecord, WindowState, CASCADE_ORIGIN,
    CASCADE_STEP,
};

/// Position of the next window given how many windows are already open.
pub fn cascade_position(open_windows: usize) -> Point {
    let offset = i32::try_from(open_windows)
        .unwrap_or(i32::MAX / CASCADE_STEP)
        .saturating_mul(CASCADE_STEP);
    Point::new(CASCADE_ORIGIN + offset, CASCADE_ORIGIN + offset)
}

/// Allocates the next stacking value.
pub fn next_z_index(state: &mut DesktopState) -> u32 {
    state.max_z_index = state.max_z_index.saturating_add(1);
    state.max_z_index
}

/// Focuses `window_id`: raises it above every other window, un-minimizes it and clears focus on
/// the rest.
///
/// Returns `false` when the window does not exist.
pub fn focus_window_internal(state: &mut DesktopState, window_id: WindowId) -> bool {
    if state.window(window_id).is_none() {
        return false;
    }
    let z_index = next_z_index(state);
    for window in &mut state.windows {
        if window.id == window_id {
            window.is_focused = true;
            window.z_index = z_index;
            if window.is_minimized() {
                window.state = WindowState::Normal;
            }
        } else {
            window.is_focused = false;
        }
    }
    state.focused_window_id = Some(window_id);
    true
}

/// Drops global focus if it points at `window_id`.
pub fn release_focus(state: &mut DesktopState, window_id: WindowId) {
    if state.focused_window_id == Some(window_id) {
        state.focused_window_id = None;
    }
}

/// Toggles between maximized and normal geometry.
pub fn toggle_maximize(window: &mut WindowRecord, viewport: Viewport) {
    if window.is_maximized() {
        window.position = window.last_position.take().unwrap_or(window.position);
        window.size = window.last_size.take().unwrap_or(window.size);
        window.state = WindowState::Normal;
    } else {
        window.last_position = Some(window.position);
        window.last_size = Some(window.size);
        window.position = Point::default();
        window.size = viewport.work_area();
        window.state = WindowState::Maximized;
    }
}

/// Moves the entry at `from` to `to`, shifting the entries in between.
pub fn move_entry<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}

/// Builds the record for a freshly opened window.
pub fn new_window_record(
    id: WindowId,
    app_id: String,
    title: String,
    launch_url: String,
    position: Point,
    z_index: u32,
) -> WindowRecord {
    WindowRecord {
        id,
        app_id,
        title,
        launch_url,
        position,
        size: Size::default(),
        last_position: None,
        last_size: None,
        z_index,
        state: WindowState::Normal,
        is_focused: true,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cascade_steps_twenty_pixels_per_open_window() {
        assert_eq!(cascade_position(0), Point::new(100, 100));
        assert_eq!(cascade_position(3), Point::new(160, 160));
    }

    #[test]
    fn move_entry_shifts_neighbours() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        move_entry(&mut items, 0, 2);
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);
        move_entry(&mut items, 3, 0);
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }
}
