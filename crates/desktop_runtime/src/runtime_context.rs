//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the app and config stores and the host API
//! handle. UI composition stays in [`crate::components`]; network orchestration lives in
//! [`crate::sync`].

use std::rc::Rc;

use leptos::*;
use platform_host::{AppIcon, DesktopApi, WALLPAPER_KEY};

use crate::{
    app_store::{AppFields, AppStore},
    config_store::ConfigStore,
    grid::{GridLayout, GridPosition},
    model::{DesktopState, InteractionState, Viewport},
    reducer::{reduce_desktop, DesktopAction},
    sync,
};

/// Viewport used when no browser window is available.
const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 1280,
    height: 800,
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Backend API used by the store sync helpers.
    pub api: StoredValue<Rc<dyn DesktopApi>>,
    /// Reactive window store.
    pub state: RwSignal<DesktopState>,
    /// Reactive title-bar drag state.
    pub interaction: RwSignal<InteractionState>,
    /// Persisted application entries.
    pub apps: RwSignal<AppStore>,
    /// Persisted key/value settings.
    pub configs: RwSignal<ConfigStore>,
    /// Icon grid geometry.
    pub grid: StoredValue<GridLayout>,
    /// Whether the lock screen covers the desktop.
    pub locked: RwSignal<bool>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Current browser viewport.
    pub fn viewport(&self) -> Viewport {
        browser_viewport().unwrap_or(FALLBACK_VIEWPORT)
    }

    pub fn fetch_apps(&self) {
        let api = self.api.get_value();
        let apps = self.apps;
        spawn_local(async move {
            match sync::fetch_apps(api.as_ref(), &apps).await {
                Ok(count) => logging::log!("loaded {count} desktop apps"),
                Err(err) => logging::error!("failed to load desktop apps: {err}"),
            }
        });
    }

    pub fn fetch_configs(&self) {
        let api = self.api.get_value();
        let configs = self.configs;
        spawn_local(async move {
            if let Err(err) = sync::fetch_configs(api.as_ref(), &configs).await {
                logging::error!("failed to load desktop config: {err}");
            }
        });
    }

    /// Moves an icon to `position`, swapping with whatever occupies it.
    pub fn move_app(&self, app_id: String, position: GridPosition) {
        let api = self.api.get_value();
        let apps = self.apps;
        spawn_local(async move {
            if let Err(err) = sync::update_app_position(api.as_ref(), &apps, &app_id, position).await
            {
                logging::warn!("failed to move app {app_id}: {err}");
            }
        });
    }

    pub fn add_app(&self, name: String, launch_url: String, icon: AppIcon) {
        let api = self.api.get_value();
        let apps = self.apps;
        let layout = self.grid.get_value();
        spawn_local(async move {
            match sync::add_app(api.as_ref(), &apps, &layout, &name, &launch_url, icon).await {
                Ok(entry) => logging::log!("added app {} ({})", entry.name, entry.id),
                Err(err) => logging::warn!("failed to add app {name}: {err}"),
            }
        });
    }

    pub fn update_app(&self, app_id: String, fields: AppFields) {
        let api = self.api.get_value();
        let apps = self.apps;
        spawn_local(async move {
            if let Err(err) = sync::update_app(api.as_ref(), &apps, &app_id, fields).await {
                logging::warn!("failed to update app {app_id}: {err}");
            }
        });
    }

    /// Deletes an app. An open window for it is closed first.
    pub fn delete_app(&self, app_id: String) {
        if let Some(window) = self.state.get_untracked().window_for_app(&app_id) {
            self.dispatch_action(DesktopAction::CloseWindow {
                window_id: window.id,
            });
        }
        let api = self.api.get_value();
        let apps = self.apps;
        spawn_local(async move {
            if let Err(err) = sync::delete_app(api.as_ref(), &apps, &app_id).await {
                logging::warn!("failed to delete app {app_id}: {err}");
            }
        });
    }

    pub fn set_wallpaper(&self, url: String) {
        let api = self.api.get_value();
        let configs = self.configs;
        spawn_local(async move {
            if let Err(err) =
                sync::update_config(api.as_ref(), &configs, WALLPAPER_KEY, &url).await
            {
                logging::warn!("failed to update wallpaper: {err}");
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_viewport() -> Option<Viewport> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Viewport {
        width: width as i32,
        height: height as i32,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_viewport() -> Option<Viewport> {
    None
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and loads persisted state.
pub fn DesktopProvider(
    /// Backend API assembled by the entry layer.
    api: Rc<dyn DesktopApi>,
    /// Icon grid geometry; defaults to a 12 x 6 viewport-fraction grid.
    #[prop(optional)]
    grid: Option<GridLayout>,
    /// Start behind the lock screen.
    #[prop(default = true)]
    locked: bool,
    children: Children,
) -> impl IntoView {
    let api = store_value(api);
    let state = create_rw_signal(DesktopState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let apps = create_rw_signal(AppStore::default());
    let configs = create_rw_signal(ConfigStore::default());
    let grid = store_value(grid.unwrap_or_default());
    let locked = create_rw_signal(locked);

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = ui;

        match reduce_desktop(&mut desktop, &mut ui, action) {
            Ok(()) => {
                if desktop != previous_desktop {
                    state.set(desktop);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
            }
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        api,
        state,
        interaction,
        apps,
        configs,
        grid,
        locked,
        dispatch,
    };

    provide_context(runtime);

    runtime.fetch_apps();
    runtime.fetch_configs();

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
