//! Centralized Fluent UI System Icon abstraction for the desktop shell.
//!
//! Shell components use semantic [`IconName`] values and the [`FluentIcon`] renderer instead of
//! embedding raw SVG. App icons stored as keywords resolve through [`named_app_icon`]; remote
//! app icons render as images through [`AppIconView`].

use leptos::*;
use platform_host::AppIcon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Semantic icon identifiers used by shell components.
pub enum IconName {
    /// `search` app keyword.
    Search,
    /// `monitor` app keyword.
    Monitor,
    /// `github` app keyword.
    Code,
    /// Fallback for unknown keywords.
    AppGeneric,
    /// Start/launcher button glyph.
    Launcher,
    /// Lock screen avatar badge.
    LockClosed,
    /// Context menu "App info".
    Info,
    /// Context menu "Delete app".
    Delete,
    /// Context menu "Add app".
    AddCircle,
    /// Context menu "Change wallpaper".
    Image,
    /// Icon upload button.
    ArrowUpload,
    /// Caution banner.
    Warning,
    /// Window minimize control icon.
    WindowMinimize,
    /// Window maximize control icon.
    WindowMaximize,
    /// Window restore control icon.
    WindowRestore,
    /// Dismiss/close icon.
    Dismiss,
}

impl IconName {
    /// Stable token used for CSS hooks and debugging.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Monitor => "monitor",
            Self::Code => "code",
            Self::AppGeneric => "app-generic",
            Self::Launcher => "launcher",
            Self::LockClosed => "lock-closed",
            Self::Info => "info",
            Self::Delete => "delete",
            Self::AddCircle => "add-circle",
            Self::Image => "image",
            Self::ArrowUpload => "arrow-upload",
            Self::Warning => "warning",
            Self::WindowMinimize => "window-minimize",
            Self::WindowMaximize => "window-maximize",
            Self::WindowRestore => "window-restore",
            Self::Dismiss => "dismiss",
        }
    }

    /// Raw SVG body markup for the icon (24px grid).
    fn svg_body(self) -> &'static str {
        match self {
            Self::Search => {
                r#"<path d="M10 2.75a7.25 7.25 0 0 1 5.63 11.82l4.9 4.9a.75.75 0 0 1-.98 1.13l-.08-.07-4.9-4.9A7.25 7.25 0 1 1 10 2.75Zm0 1.5a5.75 5.75 0 1 0 0 11.5 5.75 5.75 0 0 0 0-11.5Z"/>"#
            }
            Self::Monitor => {
                r#"<path d="M4.25 3A2.25 2.25 0 0 0 2 5.25v10.5C2 16.99 3 18 4.25 18H8.5v2H6.75a.75.75 0 0 0 0 1.5h10.5a.75.75 0 0 0 0-1.5H15.5v-2h4.25c1.24 0 2.25-1 2.25-2.25V5.25C22 4.01 21 3 19.75 3H4.25ZM14 18v2h-4v-2h4ZM3.5 5.25c0-.41.34-.75.75-.75h15.5c.41 0 .75.34.75.75v10.5c0 .41-.34.75-.75.75H4.25a.75.75 0 0 1-.75-.75V5.25Z"/>"#
            }
            Self::Code => {
                r#"<path d="M8.06 6.5a.75.75 0 0 1 .44.97L4.9 12l3.6 4.53a.75.75 0 1 1-1.17.94l-3.98-5a.75.75 0 0 1 0-.94l3.98-5a.75.75 0 0 1 .73-.03Zm7.88 0a.75.75 0 0 1 1.05.13l3.98 5c.22.27.22.66 0 .94l-3.98 5a.75.75 0 1 1-1.17-.94L19.1 12l-3.6-4.53a.75.75 0 0 1 .44-.97Z"/>"#
            }
            Self::AppGeneric => {
                r#"<path d="M19 6.01c1.68.13 3 1.53 3 3.24v8A4.75 4.75 0 0 1 17.25 22h-8a3.25 3.25 0 0 1-3.24-3h1.51c.12.85.85 1.5 1.73 1.5h8c1.8 0 3.25-1.46 3.25-3.25v-8c0-.88-.65-1.6-1.5-1.73V6.01ZM14.75 2C16.55 2 18 3.46 18 5.25v9.5c0 1.8-1.46 3.25-3.25 3.25h-9.5A3.25 3.25 0 0 1 2 14.75v-9.5C2 3.45 3.46 2 5.25 2h9.5ZM3.5 14.75c0 .97.78 1.75 1.75 1.75h9.5c.97 0 1.75-.78 1.75-1.75V7.5h-13v7.25ZM5.25 3.5c-.97 0-1.75.78-1.75 1.75V6h13v-.75c0-.97-.78-1.75-1.75-1.75h-9.5Z"/>"#
            }
            Self::Launcher => {
                r#"<path d="M4 5.25C4 4.56 4.56 4 5.25 4h4.5c.69 0 1.25.56 1.25 1.25v4.5c0 .69-.56 1.25-1.25 1.25h-4.5C4.56 11 4 10.44 4 9.75v-4.5Zm1.5.25v4h4v-4h-4ZM13 5.25c0-.69.56-1.25 1.25-1.25h4.5c.69 0 1.25.56 1.25 1.25v4.5c0 .69-.56 1.25-1.25 1.25h-4.5C13.56 11 13 10.44 13 9.75v-4.5Zm1.5.25v4h4v-4h-4ZM5.25 13C4.56 13 4 13.56 4 14.25v4.5c0 .69.56 1.25 1.25 1.25h4.5c.69 0 1.25-.56 1.25-1.25v-4.5c0-.69-.56-1.25-1.25-1.25h-4.5Zm.25 5.5v-4h4v4h-4ZM13 14.25c0-.69.56-1.25 1.25-1.25h4.5c.69 0 1.25.56 1.25 1.25v4.5c0 .69-.56 1.25-1.25 1.25h-4.5c-.69 0-1.25-.56-1.25-1.25v-4.5Zm1.5.25v4h4v-4h-4Z"/>"#
            }
            Self::LockClosed => {
                r#"<path d="M12 2a4 4 0 0 1 4 4v2h1.75c1.24 0 2.25 1 2.25 2.25v9.5c0 1.24-1 2.25-2.25 2.25H6.25C5.01 22 4 21 4 19.75v-9.5C4 9.01 5 8 6.25 8H8V6a4 4 0 0 1 4-4Zm5.75 7.5H6.25a.75.75 0 0 0-.75.75v9.5c0 .41.34.75.75.75h11.5c.41 0 .75-.34.75-.75v-9.5a.75.75 0 0 0-.75-.75Zm-5.75 4a1.5 1.5 0 1 1 0 3 1.5 1.5 0 0 1 0-3Zm0-10A2.5 2.5 0 0 0 9.5 6v2h5V6A2.5 2.5 0 0 0 12 3.5Z"/>"#
            }
            Self::Info => {
                r#"<path d="M12 2a10 10 0 1 1 0 20 10 10 0 0 1 0-20Zm0 1.5a8.5 8.5 0 1 0 0 17 8.5 8.5 0 0 0 0-17Zm0 7c.41 0 .75.34.75.75v5.5a.75.75 0 0 1-1.5 0v-5.5c0-.41.34-.75.75-.75ZM12 7a1 1 0 1 1 0 2 1 1 0 0 1 0-2Z"/>"#
            }
            Self::Delete => {
                r#"<path d="M10 5h4a2 2 0 1 0-4 0ZM8.5 5a3.5 3.5 0 1 1 7 0h5.75a.75.75 0 0 1 0 1.5h-1.32l-1.17 12.11A3.75 3.75 0 0 1 15.03 22H8.97a3.75 3.75 0 0 1-3.73-3.39L4.07 6.5H2.75a.75.75 0 0 1 0-1.5H8.5Zm2 4.75a.75.75 0 0 0-1.5 0v7.5a.75.75 0 0 0 1.5 0v-7.5ZM14.25 9c.41 0 .75.34.75.75v7.5a.75.75 0 0 1-1.5 0v-7.5c0-.41.34-.75.75-.75Zm-7.52 9.47c.1 1.15 1.07 2.03 2.24 2.03h6.06c1.17 0 2.14-.88 2.24-2.03L18.42 6.5H5.58l1.15 11.97Z"/>"#
            }
            Self::AddCircle => {
                r#"<path d="M12 2a10 10 0 1 1 0 20 10 10 0 0 1 0-20Zm0 1.5a8.5 8.5 0 1 0 0 17 8.5 8.5 0 0 0 0-17Zm0 3.75c.41 0 .75.34.75.75v3.25H16a.75.75 0 0 1 0 1.5h-3.25V16a.75.75 0 0 1-1.5 0v-3.25H8a.75.75 0 0 1 0-1.5h3.25V8c0-.41.34-.75.75-.75Z"/>"#
            }
            Self::Image => {
                r#"<path d="M18.75 4C20.55 4 22 5.46 22 7.25v9.5c0 1.8-1.46 3.25-3.25 3.25H5.25A3.25 3.25 0 0 1 2 16.75v-9.5C2 5.45 3.46 4 5.25 4h13.5Zm0 1.5H5.25c-.97 0-1.75.78-1.75 1.75v9.5c0 .2.03.4.1.58l6.8-6.65a2.25 2.25 0 0 1 3.02-.14l.13.12 6.8 6.67c.07-.18.1-.38.1-.58v-9.5c0-.97-.78-1.75-1.75-1.75Zm-2.5 2a1.75 1.75 0 1 1 0 3.5 1.75 1.75 0 0 1 0-3.5Zm-3.72 4.24a.75.75 0 0 0-.98-.07l-.07.07-6.8 6.67c.18.06.37.09.57.09h13.5c.2 0 .39-.03.58-.1l-6.8-6.66Z"/>"#
            }
            Self::ArrowUpload => {
                r#"<path d="M5.25 3.5a.75.75 0 0 1 0-1.5h13.5a.75.75 0 0 1 0 1.5H5.25Zm6.2 2.72a.75.75 0 0 1 1.06 0l4.75 4.75a.75.75 0 1 1-1.06 1.06l-3.47-3.47v12.69a.75.75 0 0 1-1.5 0V8.56l-3.47 3.47a.75.75 0 0 1-1.06-1.06l4.75-4.75Z"/>"#
            }
            Self::Warning => {
                r#"<path d="M12 2a10 10 0 1 1 0 20 10 10 0 0 1 0-20Zm0 1.5a8.5 8.5 0 1 0 0 17 8.5 8.5 0 0 0 0-17Zm0 12a1 1 0 1 1 0 2 1 1 0 0 1 0-2Zm0-9c.41 0 .75.34.75.75v6a.75.75 0 0 1-1.5 0v-6c0-.41.34-.75.75-.75Z"/>"#
            }
            Self::WindowMinimize => {
                r#"<path d="M3.75 12.5h16.5a.75.75 0 0 0 0-1.5H3.75a.75.75 0 0 0 0 1.5Z"/>"#
            }
            Self::WindowMaximize => {
                r#"<path d="M3 6.25C3 4.45 4.46 3 6.25 3h11.5C19.55 3 21 4.46 21 6.25v11.5c0 1.8-1.46 3.25-3.25 3.25H6.25A3.25 3.25 0 0 1 3 17.75V6.25ZM6.25 4.5c-.97 0-1.75.78-1.75 1.75v11.5c0 .97.78 1.75 1.75 1.75h11.5c.97 0 1.75-.78 1.75-1.75V6.25c0-.97-.78-1.75-1.75-1.75H6.25Z"/>"#
            }
            Self::WindowRestore => {
                r#"<path d="M7.52 5H6c.13-1.68 1.53-3 3.24-3h8A4.75 4.75 0 0 1 22 6.75v8a3.25 3.25 0 0 1-3 3.24v-1.5c.85-.13 1.5-.86 1.5-1.74v-8c0-1.8-1.46-3.25-3.25-3.25h-8c-.88 0-1.61.65-1.73 1.5ZM5.25 6A3.25 3.25 0 0 0 2 9.25v9.5C2 20.55 3.46 22 5.25 22h9.5c1.8 0 3.25-1.46 3.25-3.25v-9.5C18 7.45 16.55 6 14.75 6h-9.5ZM3.5 9.25c0-.97.78-1.75 1.75-1.75h9.5c.97 0 1.75.78 1.75 1.75v9.5c0 .97-.78 1.75-1.75 1.75h-9.5c-.97 0-1.75-.78-1.75-1.75v-9.5Z"/>"#
            }
            Self::Dismiss => {
                r#"<path d="m4.4 4.55.07-.08a.75.75 0 0 1 .98-.07l.08.07L12 10.94l6.47-6.47a.75.75 0 1 1 1.06 1.06L13.06 12l6.47 6.47c.27.27.3.68.07.98l-.07.08a.75.75 0 0 1-.98.07l-.08-.07L12 13.06l-6.47 6.47a.75.75 0 0 1-1.06-1.06L10.94 12 4.47 5.53a.75.75 0 0 1-.07-.98l.07-.08-.07.08Z"/>"#
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
/// Standardized shell icon sizes.
pub enum IconSize {
    /// 14px compact icon (window controls).
    Xs,
    /// 16px standard icon (menus/taskbar).
    #[default]
    Sm,
    /// 24px large icon (lock screen, banners).
    Lg,
    /// 40px desktop launcher icon.
    Xl,
}

impl IconSize {
    /// Pixel size for the icon.
    pub const fn px(self) -> u16 {
        match self {
            Self::Xs => 14,
            Self::Sm => 16,
            Self::Lg => 24,
            Self::Xl => 40,
        }
    }

    /// Stable size token used for CSS hooks and debugging.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

/// Maps an app icon keyword to its glyph, ignoring case.
pub fn named_app_icon(keyword: &str) -> IconName {
    match keyword.trim().to_ascii_lowercase().as_str() {
        "search" => IconName::Search,
        "monitor" => IconName::Monitor,
        "github" => IconName::Code,
        _ => IconName::AppGeneric,
    }
}

#[component]
/// Renders a Fluent UI System Icon SVG from the centralized shell icon catalog.
pub fn FluentIcon(
    /// Semantic icon identifier.
    icon: IconName,
    /// Standardized icon size token.
    #[prop(default = IconSize::Sm)]
    size: IconSize,
) -> impl IntoView {
    let size_px = size.px().to_string();

    view! {
        <svg
            class="ui-icon"
            data-icon=icon.token()
            data-size=size.token()
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            width=size_px.clone()
            height=size_px
            fill="currentColor"
            focusable="false"
            aria-hidden="true"
            inner_html=icon.svg_body()
        />
    }
}

#[component]
/// Renders an app icon: keyword glyphs through [`FluentIcon`], remote icons as images.
pub fn AppIconView(
    /// Icon stored on the app entry.
    icon: AppIcon,
    /// Accessible label (the app name).
    #[prop(into)]
    label: String,
    #[prop(default = IconSize::Xl)] size: IconSize,
) -> impl IntoView {
    match icon {
        AppIcon::Remote(url) => {
            let size_px = size.px().to_string();
            view! {
                <img
                    class="app-icon-image"
                    src=url
                    alt=label
                    width=size_px.clone()
                    height=size_px
                    draggable="false"
                />
            }
            .into_view()
        }
        AppIcon::Named(keyword) => view! {
            <FluentIcon icon=named_app_icon(&keyword) size=size />
        }
        .into_view(),
    }
}
