use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::pages::{AccountsPage, ProfilePage};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Web Desktop" />
        <Meta name="description" content="A browser desktop shell for launching web apps." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/skt" view=AccountsPage />
                    <Route path="/me" view=ProfilePage />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider api=platform_host_web::desktop_api()>
            <DesktopShell />
        </DesktopProvider>
    }
}
