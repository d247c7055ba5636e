//! Desktop shell UI composition and interaction surfaces.

mod lock_screen;
mod menus;
mod modals;
mod taskbar;
mod window;

use leptos::*;

use self::{
    lock_screen::LockScreen,
    menus::{ContextMenuState, DesktopContextMenu},
    modals::{DesktopModal, ModalKind},
    taskbar::Taskbar,
    window::DesktopWindow,
};

use crate::{
    app_store::AppEntry,
    grid::GridLayout,
    icons::{AppIconView, IconSize},
    model::{Point, Viewport},
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

/// `DataTransfer` format carrying the dragged app id.
const APP_DRAG_FORMAT: &str = "text/plain";

fn pointer_from_mouse_event(ev: &web_sys::MouseEvent) -> Point {
    Point::new(ev.client_x(), ev.client_y())
}

fn wallpaper_style(url: Option<&str>) -> String {
    match url {
        Some(url) => format!(
            "background-image:url(\"{}\");background-size:cover;background-position:center;",
            url.replace('"', "%22")
        ),
        None => String::new(),
    }
}

/// Absolute placement of an icon inside the grid container.
fn icon_style(layout: GridLayout, app: &AppEntry, container: Viewport) -> String {
    let area = container.work_area();
    let (x, y) = layout.cell_origin(
        app.grid_position,
        f64::from(area.width),
        f64::from(area.height),
    );
    let (width, height) = layout.cell_size(f64::from(area.width), f64::from(area.height));
    format!("left:{x}px;top:{y}px;width:{width}px;height:{height}px;")
}

#[component]
/// Top-level desktop view: the lock screen while locked, the desktop surface afterwards.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <Show when=move || !runtime.locked.get() fallback=|| view! { <LockScreen /> }>
            <DesktopSurface />
        </Show>
    }
}

#[component]
fn DesktopSurface() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let context_menu = create_rw_signal(None::<ContextMenuState>);
    let modal = create_rw_signal(None::<ModalKind>);
    let viewport = create_rw_signal(runtime.viewport());

    let resize_listener = window_event_listener(ev::resize, move |_| {
        viewport.set(runtime.viewport());
    });
    on_cleanup(move || resize_listener.remove());

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.key() != "Escape" {
            return;
        }
        if context_menu.get_untracked().is_some() || modal.get_untracked().is_some() {
            ev.prevent_default();
            context_menu.set(None);
            modal.set(None);
        }
    });
    on_cleanup(move || escape_listener.remove());

    // Title-bar drags are tracked at window level so fast pointer moves never escape the bar.
    let move_listener = window_event_listener(ev::mousemove, move |ev| {
        if runtime.interaction.get_untracked().dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove {
                pointer: pointer_from_mouse_event(&ev),
            });
        }
    });
    on_cleanup(move || move_listener.remove());

    let up_listener = window_event_listener(ev::mouseup, move |_| {
        if runtime.interaction.get_untracked().dragging.is_some() {
            runtime.dispatch_action(DesktopAction::EndMove);
        }
    });
    on_cleanup(move || up_listener.remove());

    let background = move || wallpaper_style(runtime.configs.get().wallpaper());

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let Some(app_id) = ev
            .data_transfer()
            .and_then(|data| data.get_data(APP_DRAG_FORMAT).ok())
            .filter(|id| !id.is_empty())
        else {
            return;
        };
        let area = viewport.get_untracked().work_area();
        let position = runtime.grid.get_value().position_at(
            f64::from(ev.client_x()),
            f64::from(ev.client_y()),
            f64::from(area.width),
            f64::from(area.height),
        );
        runtime.move_app(app_id, position);
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            data-ui-kind="desktop-root"
            style=background
            on:mousedown=move |_| {
                if context_menu.get_untracked().is_some() {
                    context_menu.set(None);
                }
            }
        >
            <div
                class="desktop-icon-grid"
                data-ui-slot="icon-grid"
                on:dragover=move |ev: web_sys::DragEvent| ev.prevent_default()
                on:drop=on_drop
                on:contextmenu=move |ev: web_sys::MouseEvent| {
                    ev.prevent_default();
                    context_menu.set(Some(ContextMenuState::new(ev.client_x(), ev.client_y(), None)));
                }
            >
                <For
                    each=move || runtime.apps.get().apps().to_vec()
                    key=|app| app.id.clone()
                    let:app
                >
                    <DesktopIcon app_id=app.id viewport context_menu />
                </For>
            </div>

            <div class="desktop-window-layer" data-ui-slot="window-layer">
                <For each=move || runtime.state.get().windows key=|win| win.id.0 let:win>
                    <DesktopWindow window_id=win.id />
                </For>
            </div>

            <DesktopContextMenu context_menu modal />
            <DesktopModal modal />
            <Taskbar />
        </div>
    }
}

#[component]
fn DesktopIcon(
    app_id: String,
    viewport: RwSignal<Viewport>,
    context_menu: RwSignal<Option<ContextMenuState>>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app = {
        let app_id = app_id.clone();
        Signal::derive(move || runtime.apps.with(|store| store.app(&app_id).cloned()))
    };

    let style = move || {
        app.get()
            .map(|app| icon_style(runtime.grid.get_value(), &app, viewport.get()))
            .unwrap_or_default()
    };
    let drag_id = app_id.clone();
    let menu_id = app_id;

    view! {
        <Show when=move || app.get().is_some() fallback=|| ()>
            {
                let drag_id = drag_id.clone();
                let menu_id = menu_id.clone();
                view! {
                    <div
                        class="desktop-icon"
                        data-ui-slot="desktop-icon"
                        draggable="true"
                        style=style
                        on:dragstart=move |ev: web_sys::DragEvent| {
                            if let Some(data) = ev.data_transfer() {
                                let _ = data.set_data(APP_DRAG_FORMAT, &drag_id);
                            }
                        }
                        on:dblclick=move |_| {
                            if let Some(app) = app.get_untracked() {
                                runtime.dispatch_action(DesktopAction::OpenWindow(app.open_request()));
                            }
                        }
                        on:contextmenu=move |ev: web_sys::MouseEvent| {
                            ev.prevent_default();
                            ev.stop_propagation();
                            context_menu.set(Some(ContextMenuState::new(
                                ev.client_x(),
                                ev.client_y(),
                                Some(menu_id.clone()),
                            )));
                        }
                    >
                        {move || {
                            app.get().map(|app| {
                                view! {
                                    <AppIconView icon=app.icon label=app.name.clone() size=IconSize::Xl />
                                    <span class="desktop-icon-label">{app.name}</span>
                                }
                            })
                        }}
                    </div>
                }
            }
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use platform_host::AppIcon;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::grid::GridPosition;

    fn entry(row: u32, col: u32) -> AppEntry {
        AppEntry {
            id: "g".to_string(),
            name: "Google".to_string(),
            icon: AppIcon::parse("search"),
            launch_url: "https://www.google.com/webhp?igu=1".to_string(),
            grid_position: GridPosition::new(row, col),
        }
    }

    #[test]
    fn icons_are_placed_on_their_cell() {
        let container = Viewport {
            width: 1200,
            height: 648,
        };
        assert_eq!(
            icon_style(GridLayout::default(), &entry(2, 3), container),
            "left:200px;top:100px;width:100px;height:100px;"
        );
    }

    #[test]
    fn missing_wallpaper_leaves_background_unset() {
        assert_eq!(wallpaper_style(None), "");
        assert!(wallpaper_style(Some("https://img.test/a.jpg"))
            .starts_with("background-image:url(\"https://img.test/a.jpg\")"));
    }
}
