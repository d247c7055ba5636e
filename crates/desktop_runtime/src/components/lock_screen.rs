use std::time::Duration;

use super::{taskbar::ClockSnapshot, *};
use crate::icons::{FluentIcon, IconName};

/// How long the failure banner stays visible.
const ERROR_BANNER_DURATION: Duration = Duration::from_secs(2);

fn attempts_label(failed_attempts: u32) -> Option<String> {
    (failed_attempts > 0).then(|| format!("Failed attempts: {failed_attempts}"))
}

#[component]
pub(super) fn LockScreen() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let password = create_rw_signal(String::new());
    let show_error = create_rw_signal(false);
    let failed_attempts = create_rw_signal(0_u32);
    let pending = create_rw_signal(false);
    let clock = ClockSnapshot::now();

    let reject = move || {
        password.set(String::new());
        failed_attempts.update(|count| *count += 1);
        show_error.set(true);
        set_timeout(move || show_error.set(false), ERROR_BANNER_DURATION);
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let candidate = password.get_untracked();
        let api = runtime.api.get_value();
        pending.set(true);
        spawn_local(async move {
            match api.verify_password(&candidate).await {
                Ok(true) => runtime.locked.set(false),
                Ok(false) => reject(),
                Err(err) => {
                    logging::warn!("password verification failed: {err}");
                    reject();
                }
            }
            pending.set(false);
        });
    };

    view! {
        <div class="lock-screen" data-ui-kind="lock-screen">
            <div class="lock-overlay" aria-hidden="true"></div>
            <div class="lock-card">
                <div class="lock-avatar" aria-hidden="true">
                    <FluentIcon icon=IconName::LockClosed size=IconSize::Xl />
                </div>
                <h2>"Welcome Back"</h2>
                <form class="lock-form" on:submit=on_submit>
                    <input
                        type="password"
                        placeholder="Enter Passcode"
                        class:input-error=move || show_error.get()
                        prop:value=password
                        on:input=move |ev| password.set(event_target_value(&ev))
                        autofocus
                    />
                    <button type="submit" disabled=move || pending.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || show_error.get() fallback=|| ()>
                    <p class="lock-error" role="alert">
                        <FluentIcon icon=IconName::Warning size=IconSize::Sm />
                        "Invalid passcode. Please try again."
                    </p>
                </Show>
                {move || attempts_label(failed_attempts.get()).map(|label| view! { <p class="lock-attempts">{label}</p> })}
            </div>
            <div class="lock-footer">
                <p>{clock.time_label()}</p>
                <p>{clock.date_label()}</p>
            </div>
        </div>
    }
}
