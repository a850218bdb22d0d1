//! Desktop window manager for the portfolio site: window registry, stacking, drag, taskbar,
//! start menu, and clock, rendered with Leptos.

pub mod catalog;
pub mod clock;
pub mod components;
pub mod host;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod window_manager;

pub use catalog::{builtin_catalog, DesktopCatalog};
pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
