use std::time::Duration;

use super::*;
use crate::{
    icons::{FluentIcon, IconName},
    model::{WindowId, WindowRecord},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ClockSnapshot {
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

impl ClockSnapshot {
    pub(super) fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                year: date.get_full_year(),
                month: date.get_month() + 1,
                day: date.get_date(),
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                year: 1970,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
            }
        }
    }

    pub(super) fn time_label(self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    pub(super) fn date_label(self) -> String {
        format!("{}. {}. {}.", self.year, self.month, self.day)
    }
}

fn taskbar_item_class(win: &WindowRecord, dragged: bool) -> String {
    let mut class = String::from("taskbar-item");
    if win.is_focused {
        class.push_str(" focused");
    }
    if win.is_minimized() {
        class.push_str(" minimized");
    }
    if dragged {
        class.push_str(" dragging");
    }
    class
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let clock_now = create_rw_signal(ClockSnapshot::now());
    // Taskbar index of the entry being dragged.
    let dragged_index = create_rw_signal(None::<usize>);

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(ClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let index_of = move |window_id: WindowId| {
        runtime
            .state
            .with_untracked(|state| state.windows.iter().position(|w| w.id == window_id))
    };

    view! {
        <footer class="taskbar" data-ui-kind="taskbar">
            <div class="taskbar-start" aria-hidden="true">
                <FluentIcon icon=IconName::Launcher size=IconSize::Lg />
            </div>

            <div class="taskbar-running" role="toolbar" aria-label="Running windows">
                <For each=move || runtime.state.get().windows key=|win| win.id.0 let:win>
                    {{
                        let window_id = win.id;
                        let record = Signal::derive(move || {
                            runtime.state.with(|state| state.window(window_id).cloned())
                        });
                        view! {
                            <button
                                class=move || {
                                    let dragged = dragged_index
                                        .get()
                                        .is_some_and(|index| Some(index) == index_of(window_id));
                                    record
                                        .get()
                                        .map(|w| taskbar_item_class(&w, dragged))
                                        .unwrap_or_default()
                                }
                                draggable="true"
                                on:click=move |_| {
                                    runtime.dispatch_action(DesktopAction::ToggleTaskbarWindow { window_id });
                                }
                                on:dragstart=move |ev: web_sys::DragEvent| {
                                    if let Some(data) = ev.data_transfer() {
                                        data.set_effect_allowed("move");
                                    }
                                    dragged_index.set(index_of(window_id));
                                }
                                on:dragover=move |ev: web_sys::DragEvent| {
                                    ev.prevent_default();
                                    let (Some(from), Some(to)) = (dragged_index.get_untracked(), index_of(window_id)) else {
                                        return;
                                    };
                                    if from != to {
                                        runtime.dispatch_action(DesktopAction::ReorderWindows { from, to });
                                        dragged_index.set(Some(to));
                                    }
                                }
                                on:dragend=move |_| dragged_index.set(None)
                            >
                                <span class="taskbar-indicator" aria-hidden="true"></span>
                                <span class="taskbar-title">
                                    {move || record.get().map(|w| w.title).unwrap_or_default()}
                                </span>
                            </button>
                        }
                    }}
                </For>
            </div>

            <div class="taskbar-tray">
                <div class="taskbar-clock">
                    <span>{move || clock_now.get().time_label()}</span>
                    <span>{move || clock_now.get().date_label()}</span>
                </div>
            </div>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{model::Point, window_manager::new_window_record};

    #[test]
    fn clock_labels_pad_time_but_not_date() {
        let snapshot = ClockSnapshot {
            year: 2024,
            month: 3,
            day: 7,
            hour: 9,
            minute: 5,
        };
        assert_eq!(snapshot.time_label(), "09:05");
        assert_eq!(snapshot.date_label(), "2024. 3. 7.");
    }

    #[test]
    fn taskbar_item_reflects_window_state() {
        let mut win = new_window_record(
            WindowId(4),
            "github".to_string(),
            "GitHub".to_string(),
            "https://github.com".to_string(),
            Point::new(100, 100),
            104,
        );
        assert_eq!(taskbar_item_class(&win, false), "taskbar-item focused");

        win.is_focused = false;
        win.state = crate::model::WindowState::Minimized;
        assert_eq!(
            taskbar_item_class(&win, true),
            "taskbar-item minimized dragging"
        );
    }
}
