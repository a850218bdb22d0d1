//! Host-side runtime helpers for executing reducer effects and querying rendered window frames.
//!
//! Reducer semantics stay pure; everything that touches the browser (opening tabs, moving
//! keyboard focus, reading offset boxes) goes through [`DesktopHostContext`].

use std::rc::Rc;

use leptos::{logging, spawn_local};
use platform_host::{ExternalUrlService, HostServices, HostStrategy};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::{
    model::{window_frame_dom_id, WindowId, WindowRect},
    reducer::RuntimeEffect,
};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    external_urls: Rc<dyn ExternalUrlService>,
    host_strategy: HostStrategy,
}

impl DesktopHostContext {
    pub fn new(services: HostServices) -> Self {
        Self {
            external_urls: services.external_urls,
            host_strategy: services.host_strategy,
        }
    }

    /// Returns the configured external URL service.
    pub fn external_url_service(&self) -> Rc<dyn ExternalUrlService> {
        self.external_urls.clone()
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.host_strategy.as_str()
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::OpenExternalUrl(url) => {
                let service = self.external_url_service();
                spawn_local(async move {
                    open_external_url(service, url).await;
                });
            }
            RuntimeEffect::FocusWindowFrame(window_id) => focus_window_frame(&window_id),
        }
    }

    /// Reads the rendered offset box of a window frame, if it is mounted.
    pub fn measure_window(&self, window_id: &WindowId) -> Option<WindowRect> {
        measure_window_frame(window_id)
    }
}

impl std::fmt::Debug for DesktopHostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopHostContext")
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}

/// Opens `url` through `service`, logging failures. Returns whether the host accepted it.
pub async fn open_external_url(service: Rc<dyn ExternalUrlService>, url: String) -> bool {
    match service.open_url(&url).await {
        Ok(()) => true,
        Err(err) => {
            logging::warn!("open external url failed for `{url}`: {err}");
            false
        }
    }
}

fn focus_window_frame(window_id: &WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let dom_id = window_frame_dom_id(window_id);
        // Deferred so a frame mounted by the same dispatch exists before the lookup.
        let callback = Closure::once_into_js(move || {
            let Some(element) = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(&dom_id))
                .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
            else {
                return;
            };
            let _ = element.focus();
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = window_frame_dom_id(window_id);
}

fn measure_window_frame(window_id: &WindowId) -> Option<WindowRect> {
    #[cfg(target_arch = "wasm32")]
    {
        let element = web_sys::window()?
            .document()?
            .get_element_by_id(&window_frame_dom_id(window_id))?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()?;
        Some(WindowRect {
            x: element.offset_left(),
            y: element.offset_top(),
            w: element.offset_width(),
            h: element.offset_height(),
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = window_id;
        None
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{ExternalUrlFuture, RecordingExternalUrlService};
    use pretty_assertions::assert_eq;

    use super::*;

    struct RejectingExternalUrlService;

    impl ExternalUrlService for RejectingExternalUrlService {
        fn open_url<'a>(&'a self, _url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>> {
            Box::pin(async { Err("popup blocked".to_string()) })
        }
    }

    #[test]
    fn open_external_url_forwards_to_service() {
        let recorder = RecordingExternalUrlService::default();
        let host = DesktopHostContext::new(
            HostServices::headless().with_external_urls(Rc::new(recorder.clone())),
        );

        assert!(block_on(open_external_url(
            host.external_url_service(),
            "https://play.hashir.tech".to_string()
        )));
        assert_eq!(
            recorder.opened_urls(),
            vec!["https://play.hashir.tech".to_string()]
        );
    }

    #[test]
    fn open_external_url_reports_rejection_without_panicking() {
        assert!(!block_on(open_external_url(
            Rc::new(RejectingExternalUrlService),
            "https://example.com".to_string()
        )));
    }

    #[test]
    fn headless_host_cannot_measure_frames() {
        let host = DesktopHostContext::new(HostServices::headless());
        assert_eq!(host.measure_window(&WindowId::new("about")), None);
        assert_eq!(host.host_strategy_name(), "headless");
    }
}
