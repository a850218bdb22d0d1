//! Shared host-bundle models for browser and headless runtime composition.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{ExternalUrlService, NoopExternalUrlService};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostStrategy {
    /// Browser-backed runtime composition.
    Browser,
    /// Composition with no-op adapters, used off the browser and in tests.
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics and runtime inspection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

#[derive(Clone)]
/// Host service bundle injected into the desktop runtime by the entry layer.
pub struct HostServices {
    /// External URL opening service.
    pub external_urls: Rc<dyn ExternalUrlService>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a bundle backed by no-op adapters.
    pub fn headless() -> Self {
        Self {
            external_urls: Rc::new(NoopExternalUrlService),
            host_strategy: HostStrategy::Headless,
        }
    }

    /// Replaces the external URL service, keeping the rest of the bundle.
    pub fn with_external_urls(mut self, service: Rc<dyn ExternalUrlService>) -> Self {
        self.external_urls = service;
        self
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::RecordingExternalUrlService;

    #[test]
    fn with_external_urls_swaps_only_the_url_service() {
        let recorder = RecordingExternalUrlService::default();
        let services = HostServices::headless().with_external_urls(Rc::new(recorder.clone()));

        block_on(services.external_urls.open_url("https://example.com")).expect("open");

        assert_eq!(services.host_strategy, HostStrategy::Headless);
        assert_eq!(recorder.opened_urls(), vec!["https://example.com".to_string()]);
    }

    #[test]
    fn host_strategy_serializes_as_its_stable_token() {
        for strategy in [HostStrategy::Browser, HostStrategy::Headless] {
            assert_eq!(
                serde_json::to_string(&strategy).expect("serialize"),
                format!("\"{}\"", strategy.as_str())
            );
        }
    }
}
