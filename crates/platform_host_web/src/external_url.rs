//! External URL host-service adapter for browser contexts.

use platform_host::{ExternalUrlFuture, ExternalUrlService};

/// Browsing-context target used for every external link.
pub const NEW_TAB_TARGET: &str = "_blank";

#[derive(Debug, Clone, Copy, Default)]
/// Browser external URL adapter that opens links in a new browsing context.
pub struct WebExternalUrlService;

impl ExternalUrlService for WebExternalUrlService {
    fn open_url<'a>(&'a self, url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>> {
        Box::pin(async move { open_in_new_tab(url) })
    }
}

#[cfg(target_arch = "wasm32")]
fn open_in_new_tab(url: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    match window.open_with_url_and_target(url, NEW_TAB_TARGET) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err("popup blocked".to_string()),
        Err(err) => Err(err
            .as_string()
            .unwrap_or_else(|| "window.open failed".to_string())),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_in_new_tab(_url: &str) -> Result<(), String> {
    Err("external URLs require the browser host".to_string())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn native_builds_report_unsupported() {
        let err = block_on(WebExternalUrlService.open_url("https://example.com"))
            .expect_err("unsupported off the browser");
        assert!(err.contains("browser"));
    }
}
