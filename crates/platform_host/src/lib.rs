//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! Concrete browser adapters live in `platform_host_web`; this crate only defines the service
//! traits, no-op/in-memory implementations, and small host-facing value types.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod external_url;
pub mod host;
pub mod time;

pub use external_url::{
    ExternalUrlFuture, ExternalUrlService, NoopExternalUrlService, RecordingExternalUrlService,
};
pub use host::{HostServices, HostStrategy};
pub use time::LocalClockTime;
