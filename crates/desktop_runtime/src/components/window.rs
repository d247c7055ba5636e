use super::*;
use crate::{
    icons::{FluentIcon, IconName},
    model::{WindowId, WindowRecord},
};

fn window_style(win: &WindowRecord) -> String {
    let mut style = format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        win.position.x, win.position.y, win.size.width, win.size.height, win.z_index
    );
    if win.is_minimized() {
        style.push_str("display:none;");
    }
    style
}

fn window_class(win: &WindowRecord) -> String {
    let mut class = String::from("desktop-window");
    if win.is_focused {
        class.push_str(" focused");
    }
    if win.is_minimized() {
        class.push_str(" minimized");
    }
    if win.is_maximized() {
        class.push_str(" maximized");
    }
    class
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let window = Signal::derive(move || runtime.state.with(|state| state.window(window_id).cloned()));
    let dragging = Signal::derive(move || runtime.interaction.get().is_dragging(window_id));
    let maximized = Signal::derive(move || window.get().is_some_and(|w| w.is_maximized()));

    // The frame is created once; re-rendering it would reload the page inside.
    let Some(initial) = window.get_untracked() else {
        return ().into_view();
    };

    let focus = move |_| {
        if window.get_untracked().is_some_and(|w| !w.is_focused) {
            runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
        }
    };
    let begin_move = move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_mouse_event(&ev),
        });
    };
    let toggle_maximize = move || {
        runtime.dispatch_action(DesktopAction::ToggleMaximize {
            window_id,
            viewport: runtime.viewport(),
        });
    };

    view! {
        <section
            class=move || window.get().map(|w| window_class(&w)).unwrap_or_default()
            style=move || window.get().map(|w| window_style(&w)).unwrap_or_default()
            data-window-id=window_id.to_string()
            role="dialog"
            aria-label=initial.title.clone()
            on:mousedown=focus
        >
            <header
                class="titlebar"
                on:mousedown=begin_move
                on:dblclick=move |ev: web_sys::MouseEvent| {
                    ev.prevent_default();
                    toggle_maximize();
                }
            >
                <div class="titlebar-title">
                    <span class="titlebar-name">{initial.title.clone()}</span>
                    <span class="titlebar-url">{initial.launch_url.clone()}</span>
                </div>
                <div
                    class="titlebar-controls"
                    on:mousedown=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    on:dblclick=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                >
                    <button
                        class="control minimize"
                        aria-label="Minimize window"
                        on:click=move |ev: web_sys::MouseEvent| {
                            ev.stop_propagation();
                            runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id });
                        }
                    >
                        <FluentIcon icon=IconName::WindowMinimize size=IconSize::Xs />
                    </button>
                    <button
                        class="control maximize"
                        title=move || if maximized.get() { "Restore" } else { "Maximize" }
                        aria-label=move || if maximized.get() { "Restore window" } else { "Maximize window" }
                        on:click=move |ev: web_sys::MouseEvent| {
                            ev.stop_propagation();
                            toggle_maximize();
                        }
                    >
                        {move || {
                            let icon = if maximized.get() {
                                IconName::WindowRestore
                            } else {
                                IconName::WindowMaximize
                            };
                            view! { <FluentIcon icon=icon size=IconSize::Xs /> }
                        }}
                    </button>
                    <button
                        class="control close"
                        aria-label="Close window"
                        on:click=move |ev: web_sys::MouseEvent| {
                            ev.stop_propagation();
                            runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
                        }
                    >
                        <FluentIcon icon=IconName::Dismiss size=IconSize::Xs />
                    </button>
                </div>
            </header>
            <div class="window-content">
                <Show when=move || dragging.get() fallback=|| ()>
                    <div class="window-drag-overlay" aria-hidden="true"></div>
                </Show>
                <iframe src=initial.launch_url.clone() title=initial.title.clone()></iframe>
            </div>
        </section>
    }
    .into_view()
}
