//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer. Today that is external URL
//! opening plus the compile-time host strategy used to assemble a [`platform_host::HostServices`]
//! bundle.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod external_url;

pub use adapters::{
    build_host_services, external_url_service, host_strategy_name, selected_host_strategy,
    ExternalUrlServiceAdapter,
};
pub use external_url::WebExternalUrlService;
