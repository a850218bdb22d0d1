use desktop_runtime::{DeepLinkState, DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use platform_host_web::build_host_services;

/// Query parameter listing windows to open at boot, comma-separated (`?open=about,resume`).
const OPEN_QUERY_KEY: &str = "open";

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Hashir's Desktop" />
        <Meta name="description" content="A retro desktop-style personal portfolio." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                </Routes>
            </main>
        </Router>
    }
}

/// Builds the boot deep link from the router query map.
pub fn deep_link_from_query(query: &ParamsMap) -> DeepLinkState {
    query
        .get(OPEN_QUERY_KEY)
        .map(|raw| DeepLinkState::from_query_value(raw))
        .unwrap_or_default()
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let query = use_query_map();
    let deep_link = query.with_untracked(deep_link_from_query);

    view! {
        <DesktopProvider host_services=build_host_services() deep_link=deep_link>
            <DesktopShell />
        </DesktopProvider>
    }
}
