//! Reducer actions and transition logic for the window store.

use thiserror::Error;

use crate::{
    model::{
        DesktopState, DragSession, InteractionState, OpenWindowRequest, Point, Viewport,
        WindowId, WindowRecord, WindowState,
    },
    window_manager::{
        cascade_position, focus_window_internal, move_entry, new_window_record, next_z_index,
        release_focus, toggle_maximize,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open the app's window, or focus it when one is already open.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Maximize into the viewport work area, or restore the cached geometry.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
        /// Current browser viewport.
        viewport: Viewport,
    },
    /// Taskbar click: minimize the focused window, otherwise focus it.
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Overwrite a window's position (ignored while maximized).
    UpdatePosition {
        /// Window to move.
        window_id: WindowId,
        /// New top-left corner.
        position: Point,
    },
    /// Move one taskbar entry from `from` to `to`.
    ReorderWindows {
        /// Current index.
        from: usize,
        /// Target index.
        to: usize,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: Point,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: Point,
    },
    /// End the active window drag.
    EndMove,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions. The state is left untouched when one is returned.
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window {0} not found")]
    WindowNotFound(WindowId),
    /// A reorder index fell outside the window list.
    #[error("window index {index} out of range for {len} windows")]
    InvalidIndex {
        /// Offending index.
        index: usize,
        /// Number of open windows.
        len: usize,
    },
}

/// Applies a [`DesktopAction`] to the window store.
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] when an action references a window that is not
/// present and [`ReducerError::InvalidIndex`] for out-of-range reorder indices.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<(), ReducerError> {
    match action {
        DesktopAction::OpenWindow(req) => {
            if let Some(existing) = state.window_for_app(&req.app_id).map(|w| w.id) {
                focus_window_internal(state, existing);
                return Ok(());
            }
            let window_id = next_window_id(state);
            let position = cascade_position(state.windows.len());
            let z_index = next_z_index(state);
            for window in &mut state.windows {
                window.is_focused = false;
            }
            state.windows.push(new_window_record(
                window_id,
                req.app_id,
                req.title,
                req.launch_url,
                position,
                z_index,
            ));
            state.focused_window_id = Some(window_id);
        }
        DesktopAction::CloseWindow { window_id } => {
            find_window_mut(state, window_id)?;
            state.windows.retain(|w| w.id != window_id);
            release_focus(state, window_id);
            if interaction.is_dragging(window_id) {
                interaction.dragging = None;
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if !focus_window_internal(state, window_id) {
                return Err(ReducerError::WindowNotFound(window_id));
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            let window = find_window_mut(state, window_id)?;
            window.state = WindowState::Minimized;
            window.is_focused = false;
            release_focus(state, window_id);
        }
        DesktopAction::ToggleMaximize {
            window_id,
            viewport,
        } => {
            toggle_maximize(find_window_mut(state, window_id)?, viewport);
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            find_window_mut(state, window_id)?;
            let action = if state.focused_window_id == Some(window_id) {
                DesktopAction::MinimizeWindow { window_id }
            } else {
                DesktopAction::FocusWindow { window_id }
            };
            reduce_desktop(state, interaction, action)?;
        }
        DesktopAction::UpdatePosition {
            window_id,
            position,
        } => {
            let window = find_window_mut(state, window_id)?;
            if !window.is_maximized() {
                window.position = position;
            }
        }
        DesktopAction::ReorderWindows { from, to } => {
            let len = state.windows.len();
            for index in [from, to] {
                if index >= len {
                    return Err(ReducerError::InvalidIndex { index, len });
                }
            }
            move_entry(&mut state.windows, from, to);
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let window = find_window_mut(state, window_id)?;
            let maximized = window.is_maximized();
            let pointer_offset = pointer.offset_from(window.position);
            focus_window_internal(state, window_id);
            interaction.dragging = (!maximized).then_some(DragSession {
                window_id,
                pointer_offset,
            });
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging {
                let position = pointer.offset_from(session.pointer_offset);
                match find_window_mut(state, session.window_id) {
                    Ok(window) if !window.is_maximized() => window.position = position,
                    Ok(_) => {}
                    Err(_) => interaction.dragging = None,
                }
            }
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
    }

    Ok(())
}

fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

fn find_window_mut(
    state: &mut DesktopState,
    window_id: WindowId,
) -> Result<&mut WindowRecord, ReducerError> {
    state
        .windows
        .iter_mut()
        .find(|w| w.id == window_id)
        .ok_or(ReducerError::WindowNotFound(window_id))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Size, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

    const VIEWPORT: Viewport = Viewport {
        width: 1920,
        height: 1080,
    };

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, app_id: &str) -> WindowId {
        reduce_desktop(
            state,
            interaction,
            DesktopAction::OpenWindow(OpenWindowRequest::new(
                app_id,
                app_id.to_uppercase(),
                format!("https://{app_id}.test"),
            )),
        )
        .expect("open window");
        state.window_for_app(app_id).expect("window").id
    }

    fn record(state: &DesktopState, window_id: WindowId) -> &WindowRecord {
        state.window(window_id).expect("window exists")
    }

    #[test]
    fn open_cascades_and_focuses_new_window() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let first = open(&mut state, &mut interaction, "google");
        let second = open(&mut state, &mut interaction, "vscode");

        assert_eq!(state.focused_window_id(), Some(second));
        assert_eq!(record(&state, first).position, Point::new(100, 100));
        assert_eq!(record(&state, second).position, Point::new(120, 120));
        assert_eq!(
            record(&state, second).size,
            Size {
                width: DEFAULT_WINDOW_WIDTH,
                height: DEFAULT_WINDOW_HEIGHT
            }
        );
        assert_eq!(record(&state, first).z_index, 101);
        assert_eq!(record(&state, second).z_index, 102);
        assert!(!record(&state, first).is_focused);
        assert!(record(&state, second).is_focused);
    }

    #[test]
    fn reopening_an_app_focuses_the_existing_window() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let google = open(&mut state, &mut interaction, "google");
        open(&mut state, &mut interaction, "github");
        let again = open(&mut state, &mut interaction, "google");

        assert_eq!(again, google);
        assert_eq!(state.windows.len(), 2);
        assert_eq!(state.focused_window_id(), Some(google));
        assert_eq!(record(&state, google).z_index, state.max_z_index);
    }

    #[test]
    fn closing_focused_window_clears_focus_without_refocusing() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let first = open(&mut state, &mut interaction, "google");
        let second = open(&mut state, &mut interaction, "vscode");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: second },
        )
        .expect("close focused");

        assert_eq!(state.focused_window_id(), None);
        assert!(!record(&state, first).is_focused);
    }

    #[test]
    fn closing_background_window_keeps_focus() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let first = open(&mut state, &mut interaction, "google");
        let second = open(&mut state, &mut interaction, "vscode");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: first },
        )
        .expect("close background");

        assert_eq!(state.focused_window_id(), Some(second));
        assert_eq!(state.windows.len(), 1);
    }

    #[test]
    fn minimizing_background_window_keeps_focus() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let first = open(&mut state, &mut interaction, "google");
        let second = open(&mut state, &mut interaction, "vscode");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: first },
        )
        .expect("minimize background");

        assert_eq!(state.focused_window_id(), Some(second));
        assert!(record(&state, second).is_focused);
        assert_eq!(record(&state, first).state, WindowState::Minimized);
        assert!(!record(&state, first).is_focused);
    }

    #[test]
    fn maximize_then_restore_returns_original_geometry() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = open(&mut state, &mut interaction, "google");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdatePosition {
                window_id: win,
                position: Point::new(333, 44),
            },
        )
        .expect("move");
        let before = record(&state, win).clone();

        let toggle = DesktopAction::ToggleMaximize {
            window_id: win,
            viewport: VIEWPORT,
        };
        reduce_desktop(&mut state, &mut interaction, toggle.clone()).expect("maximize");
        let maximized = record(&state, win);
        assert_eq!(maximized.state, WindowState::Maximized);
        assert_eq!(maximized.position, Point::default());
        assert_eq!(
            maximized.size,
            Size {
                width: 1920,
                height: 1032
            }
        );

        reduce_desktop(&mut state, &mut interaction, toggle).expect("restore");
        let restored = record(&state, win);
        assert_eq!(restored.state, WindowState::Normal);
        assert_eq!(restored.position, before.position);
        assert_eq!(restored.size, before.size);
    }

    #[test]
    fn maximized_windows_ignore_position_updates() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = open(&mut state, &mut interaction, "google");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: win,
                viewport: VIEWPORT,
            },
        )
        .expect("maximize");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdatePosition {
                window_id: win,
                position: Point::new(50, 50),
            },
        )
        .expect("update");

        assert_eq!(record(&state, win).position, Point::default());
    }

    #[test]
    fn focus_always_raises_above_previous_focus() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let a = open(&mut state, &mut interaction, "a");
        let b = open(&mut state, &mut interaction, "b");
        let mut last_z = record(&state, b).z_index;
        for window_id in [a, b, a, a] {
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::FocusWindow { window_id },
            )
            .expect("focus");
            let z = record(&state, window_id).z_index;
            assert!(z > last_z);
            last_z = z;
        }
        assert_eq!(state.windows.iter().filter(|w| w.is_focused).count(), 1);
    }

    #[test]
    fn taskbar_toggle_minimizes_focused_and_restores_minimized() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = open(&mut state, &mut interaction, "google");
        let toggle = DesktopAction::ToggleTaskbarWindow { window_id: win };
        reduce_desktop(&mut state, &mut interaction, toggle.clone()).expect("minimize");
        assert!(record(&state, win).is_minimized());
        assert!(!record(&state, win).is_focused);
        assert_eq!(state.focused_window_id(), None);

        reduce_desktop(&mut state, &mut interaction, toggle).expect("restore");
        assert_eq!(record(&state, win).state, WindowState::Normal);
        assert_eq!(state.focused_window_id(), Some(win));
    }

    #[test]
    fn reorder_moves_taskbar_entries_and_rejects_bad_indices() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let a = open(&mut state, &mut interaction, "a");
        let b = open(&mut state, &mut interaction, "b");
        let c = open(&mut state, &mut interaction, "c");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ReorderWindows { from: 2, to: 0 },
        )
        .expect("reorder");
        let order: Vec<_> = state.windows.iter().map(|w| w.id).collect();
        assert_eq!(order, vec![c, a, b]);

        let before = state.clone();
        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ReorderWindows { from: 0, to: 3 },
        )
        .expect_err("out of range");
        assert_eq!(err, ReducerError::InvalidIndex { index: 3, len: 3 });
        assert_eq!(state, before);
    }

    #[test]
    fn unknown_window_is_reported() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "a");
        let before = state.clone();

        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleTaskbarWindow {
                window_id: WindowId(99),
            },
        )
        .expect_err("missing window");
        assert_eq!(err, ReducerError::WindowNotFound(WindowId(99)));
        assert_eq!(state, before);
    }

    #[test]
    fn drag_session_tracks_pointer_offset() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = open(&mut state, &mut interaction, "google");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: win,
                pointer: Point::new(130, 110),
            },
        )
        .expect("begin");
        assert!(interaction.is_dragging(win));

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: Point::new(300, 250),
            },
        )
        .expect("update");
        assert_eq!(record(&state, win).position, Point::new(270, 240));

        reduce_desktop(&mut state, &mut interaction, DesktopAction::EndMove).expect("end");
        assert_eq!(interaction.dragging, None);
    }

    #[test]
    fn maximized_window_focuses_without_drag_session() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let a = open(&mut state, &mut interaction, "a");
        open(&mut state, &mut interaction, "b");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: a,
                viewport: VIEWPORT,
            },
        )
        .expect("maximize");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: a,
                pointer: Point::new(10, 10),
            },
        )
        .expect("begin");

        assert_eq!(state.focused_window_id(), Some(a));
        assert_eq!(interaction.dragging, None);
    }
}
