use super::*;
use crate::icons::{FluentIcon, IconName};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Open desktop context menu. `target` is the app under the pointer, if any.
pub(super) struct ContextMenuState {
    x: i32,
    y: i32,
    target: Option<String>,
}

impl ContextMenuState {
    pub(super) fn new(x: i32, y: i32, target: Option<String>) -> Self {
        Self { x, y, target }
    }

    fn style(&self) -> String {
        format!("left:{}px;top:{}px;", self.x, self.y)
    }
}

#[component]
fn MenuItem(
    icon: IconName,
    label: &'static str,
    enabled: bool,
    #[prop(into)] on_select: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            role="menuitem"
            class="desktop-menu-item"
            class:disabled=!enabled
            aria-disabled=(!enabled).to_string()
            on:click=move |ev: web_sys::MouseEvent| {
                ev.stop_propagation();
                if enabled {
                    on_select.call(());
                }
            }
        >
            <FluentIcon icon=icon size=IconSize::Sm />
            <span>{label}</span>
        </button>
    }
}

#[component]
pub(super) fn DesktopContextMenu(
    context_menu: RwSignal<Option<ContextMenuState>>,
    modal: RwSignal<Option<ModalKind>>,
) -> impl IntoView {
    let open_modal = move |kind: ModalKind| {
        context_menu.set(None);
        modal.set(Some(kind));
    };

    view! {
        {move || {
            let menu = context_menu.get()?;
            let target = menu.target.clone();
            let has_target = target.is_some();
            let info_target = target.clone();
            let delete_target = target;

            Some(view! {
                <div
                    id="desktop-context-menu"
                    class="desktop-context-menu"
                    role="menu"
                    aria-label="Desktop context menu"
                    style=menu.style()
                    on:mousedown=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    on:contextmenu=move |ev: web_sys::MouseEvent| ev.prevent_default()
                >
                    <MenuItem
                        icon=IconName::Info
                        label="앱 정보"
                        enabled=has_target
                        on_select=move |_| {
                            if let Some(app_id) = info_target.clone() {
                                open_modal(ModalKind::EditApp(app_id));
                            }
                        }
                    />
                    <MenuItem
                        icon=IconName::Delete
                        label="앱 삭제"
                        enabled=has_target
                        on_select=move |_| {
                            if let Some(app_id) = delete_target.clone() {
                                open_modal(ModalKind::DeleteApp(app_id));
                            }
                        }
                    />
                    <div class="desktop-menu-separator" role="separator" aria-hidden="true"></div>
                    <MenuItem
                        icon=IconName::AddCircle
                        label="앱 추가"
                        enabled=!has_target
                        on_select=move |_| open_modal(ModalKind::AddApp)
                    />
                    <MenuItem
                        icon=IconName::Image
                        label="배경화면 변경"
                        enabled=!has_target
                        on_select=move |_| open_modal(ModalKind::Wallpaper)
                    />
                </div>
            })
        }}
    }
}
