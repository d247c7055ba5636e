use platform_host::AppIcon;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::*;
use crate::{
    app_store::AppFields,
    icons::{FluentIcon, IconName},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ModalKind {
    AddApp,
    EditApp(String),
    DeleteApp(String),
    Wallpaper,
}

/// Fields whose submitted value differs from the current entry.
fn changed_fields(current: &AppEntry, name: &str, launch_url: &str, icon: &str) -> AppFields {
    let icon = AppIcon::parse(icon);
    AppFields {
        name: (current.name != name).then(|| name.to_string()),
        launch_url: (current.launch_url != launch_url).then(|| launch_url.to_string()),
        icon: (current.icon != icon).then_some(icon),
    }
}

async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| format!("failed to read {}: {err:?}", file.name()))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[component]
fn ModalFrame(modal: RwSignal<Option<ModalKind>>, children: Children) -> impl IntoView {
    view! {
        <div
            class="modal-overlay"
            data-ui-slot="modal-overlay"
            on:mousedown=move |ev: web_sys::MouseEvent| {
                ev.stop_propagation();
                let on_overlay = match (ev.target(), ev.current_target()) {
                    (Some(target), Some(current)) => target == current,
                    _ => false,
                };
                if on_overlay {
                    modal.set(None);
                }
            }
        >
            <div class="modal" role="dialog" aria-modal="true">
                {children()}
            </div>
        </div>
    }
}

#[component]
pub(super) fn DesktopModal(modal: RwSignal<Option<ModalKind>>) -> impl IntoView {
    let runtime = use_desktop_runtime();

    move || match modal.get()? {
        ModalKind::AddApp => Some(view! { <AppFormModal modal app=None /> }.into_view()),
        ModalKind::EditApp(app_id) => {
            let app = runtime.apps.with_untracked(|store| store.app(&app_id).cloned())?;
            Some(view! { <AppFormModal modal app=Some(app) /> }.into_view())
        }
        ModalKind::DeleteApp(app_id) => {
            let app = runtime.apps.with_untracked(|store| store.app(&app_id).cloned())?;
            Some(view! { <DeleteAppModal modal app /> }.into_view())
        }
        ModalKind::Wallpaper => Some(view! { <WallpaperModal modal /> }.into_view()),
    }
}

#[component]
fn AppFormModal(modal: RwSignal<Option<ModalKind>>, app: Option<AppEntry>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let editing = app.is_some();
    let name = create_rw_signal(app.as_ref().map(|a| a.name.clone()).unwrap_or_default());
    let launch_url = create_rw_signal(
        app.as_ref()
            .map(|a| a.launch_url.clone())
            .unwrap_or_default(),
    );
    let icon = create_rw_signal(
        app.as_ref()
            .map(|a| a.icon.as_str().to_string())
            .unwrap_or_default(),
    );
    let upload_status = create_rw_signal(None::<String>);
    let current = store_value(app);

    let on_file = move |ev: web_sys::Event| {
        let Some(file) = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        let api = runtime.api.get_value();
        upload_status.set(Some("업로드 중...".to_string()));
        spawn_local(async move {
            let filename = file.name();
            let result = match read_file_bytes(&file).await {
                Ok(bytes) => api
                    .upload_icon(&filename, &bytes)
                    .await
                    .map_err(|err| err.to_string()),
                Err(err) => Err(err),
            };
            match result {
                Ok(url) => {
                    icon.set(url);
                    upload_status.set(None);
                }
                Err(err) => {
                    logging::warn!("icon upload failed: {err}");
                    upload_status.set(Some("업로드 실패".to_string()));
                }
            }
        });
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let (name, launch_url, icon) = (
            name.get_untracked(),
            launch_url.get_untracked(),
            icon.get_untracked(),
        );
        match current.get_value() {
            Some(app) => {
                let fields = changed_fields(&app, &name, &launch_url, &icon);
                runtime.update_app(app.id, fields);
            }
            None => runtime.add_app(name, launch_url, AppIcon::parse(&icon)),
        }
        modal.set(None);
    };

    view! {
        <ModalFrame modal>
            <h2>{if editing { "앱 정보" } else { "앱 추가" }}</h2>
            <form on:submit=on_submit>
                <div class="form-group">
                    <label>"이름"</label>
                    <input
                        prop:value=name
                        on:input=move |ev| name.set(event_target_value(&ev))
                        placeholder="앱 이름 입력"
                        required
                        autofocus
                    />
                </div>
                <div class="form-group">
                    <label>"URL"</label>
                    <input
                        prop:value=launch_url
                        on:input=move |ev| launch_url.set(event_target_value(&ev))
                        placeholder="https://..."
                        required
                    />
                </div>
                <div class="form-group">
                    <label>"아이콘 URL (또는 'monitor', 'search', 'github')"</label>
                    <input
                        prop:value=icon
                        on:input=move |ev| icon.set(event_target_value(&ev))
                        placeholder="이미지 URL 또는 키워드"
                        required
                    />
                    <label class="upload-button">
                        <FluentIcon icon=IconName::ArrowUpload size=IconSize::Sm />
                        <span>"이미지 업로드"</span>
                        <input type="file" accept="image/*" hidden on:change=on_file />
                    </label>
                    {move || upload_status.get().map(|status| view! { <span class="upload-status">{status}</span> })}
                </div>
                <div class="modal-actions">
                    <button type="button" class="btn btn-cancel" on:click=move |_| modal.set(None)>
                        "취소"
                    </button>
                    <button type="submit" class="btn btn-confirm">
                        {if editing { "저장" } else { "추가" }}
                    </button>
                </div>
            </form>
        </ModalFrame>
    }
}

#[component]
fn DeleteAppModal(modal: RwSignal<Option<ModalKind>>, app: AppEntry) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = store_value(app.id);

    view! {
        <ModalFrame modal>
            <h2>"앱 삭제"</h2>
            <p class="modal-description">
                {format!("'{}' 앱을 삭제하시겠습니까? 이 작업은 취소할 수 없습니다.", app.name)}
            </p>
            <div class="modal-actions">
                <button class="btn btn-cancel" on:click=move |_| modal.set(None)>
                    "취소"
                </button>
                <button
                    class="btn btn-delete"
                    on:click=move |_| {
                        runtime.delete_app(app_id.get_value());
                        modal.set(None);
                    }
                >
                    "삭제"
                </button>
            </div>
        </ModalFrame>
    }
}

#[component]
fn WallpaperModal(modal: RwSignal<Option<ModalKind>>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let url = create_rw_signal(
        runtime
            .configs
            .with_untracked(|configs| configs.wallpaper().unwrap_or_default().to_string()),
    );

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        runtime.set_wallpaper(url.get_untracked());
        modal.set(None);
    };

    view! {
        <ModalFrame modal>
            <h2>"배경화면 변경"</h2>
            <form on:submit=on_submit>
                <div class="form-group">
                    <label>"이미지 URL"</label>
                    <input
                        prop:value=url
                        on:input=move |ev| url.set(event_target_value(&ev))
                        placeholder="https://..."
                        required
                        autofocus
                    />
                </div>
                <div class="modal-actions">
                    <button type="button" class="btn btn-cancel" on:click=move |_| modal.set(None)>
                        "취소"
                    </button>
                    <button type="submit" class="btn btn-confirm">
                        "변경"
                    </button>
                </div>
            </form>
        </ModalFrame>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::grid::GridPosition;

    #[test]
    fn edit_form_only_sends_changed_fields() {
        let current = AppEntry {
            id: "vscode".to_string(),
            name: "VS Code".to_string(),
            icon: AppIcon::parse("monitor"),
            launch_url: "https://vscode.dev".to_string(),
            grid_position: GridPosition::new(2, 1),
        };

        assert!(changed_fields(&current, "VS Code", "https://vscode.dev", "monitor").is_empty());
        assert_eq!(
            changed_fields(&current, "Code", "https://vscode.dev", "/api/blobs/code.png"),
            AppFields {
                name: Some("Code".to_string()),
                launch_url: None,
                icon: Some(AppIcon::Remote("/api/blobs/code.png".to_string())),
            }
        );
    }
}
