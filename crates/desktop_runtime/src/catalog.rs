//! Desktop configuration catalog generated at build time from `desktop.manifest.toml`.
//!
//! `build.rs` validates the manifest (schema version, unique ids and action tags, start menu
//! window targets, geometry lengths) and embeds it as JSON; this module turns that JSON into typed descriptors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    clock::ClockConfig,
    model::{WindowGeometry, WindowId},
};

include!(concat!(env!("OUT_DIR"), "/desktop_catalog_generated.rs"));

/// Catalog schema version understood by this runtime.
pub const DESKTOP_CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
/// Errors raised while loading a desktop catalog.
pub enum CatalogError {
    /// The catalog JSON could not be decoded.
    #[error("invalid desktop catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// The catalog was produced for a different schema.
    #[error("desktop catalog schema mismatch: expected {expected} found {found}")]
    SchemaVersion {
        /// Supported schema version.
        expected: u32,
        /// Version found in the catalog.
        found: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDescriptor {
    pub id: WindowId,
    pub title: String,
    pub taskbar_label: Option<String>,
    #[serde(default)]
    pub open_on_boot: bool,
    #[serde(default)]
    pub geometry: WindowGeometry,
    #[serde(default)]
    pub body: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartMenuSection {
    Programs,
    System,
}

/// Effect bound to a start menu action tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StartMenuAction {
    /// Open a URL in a new browsing context.
    ExternalUrl { url: String },
    /// Open a registered window.
    OpenWindow { window: WindowId },
    /// Listed but intentionally inert.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartMenuEntry {
    /// Tag rendered as `data-action` and used for dispatch.
    pub action: String,
    pub label: String,
    pub section: StartMenuSection,
    pub target: StartMenuAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesktopCatalog {
    pub schema_version: u32,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub windows: Vec<WindowDescriptor>,
    #[serde(default)]
    pub start_menu: Vec<StartMenuEntry>,
}

impl DesktopCatalog {
    /// Decodes and version-checks a catalog JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the JSON is malformed or the schema version differs.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(raw)?;
        if catalog.schema_version != DESKTOP_CATALOG_SCHEMA_VERSION {
            return Err(CatalogError::SchemaVersion {
                expected: DESKTOP_CATALOG_SCHEMA_VERSION,
                found: catalog.schema_version,
            });
        }
        Ok(catalog)
    }

    pub fn start_action(&self, action: &str) -> Option<&StartMenuAction> {
        find_start_action(&self.start_menu, action)
    }
}

/// Looks up the target of the start menu entry tagged `action`.
pub fn find_start_action<'a>(
    entries: &'a [StartMenuEntry],
    action: &str,
) -> Option<&'a StartMenuAction> {
    entries
        .iter()
        .find(|entry| entry.action == action)
        .map(|entry| &entry.target)
}

/// Loads the catalog embedded from `desktop.manifest.toml`.
///
/// # Errors
///
/// Returns [`CatalogError`] if the embedded document fails to decode.
pub fn builtin_catalog() -> Result<DesktopCatalog, CatalogError> {
    DesktopCatalog::from_json(DESKTOP_CATALOG_JSON)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Length;

    #[test]
    fn builtin_catalog_registers_about_and_resume() {
        let catalog = builtin_catalog().expect("builtin catalog");
        let ids: Vec<&str> = catalog.windows.iter().map(|w| w.id.as_str()).collect();
        assert!(ids.contains(&"about"));
        assert!(ids.contains(&"resume"));

        let about = catalog
            .windows
            .iter()
            .find(|w| w.id.as_str() == "about")
            .expect("about window");
        assert!(about.open_on_boot);
        assert_eq!(about.geometry.left, Some(Length::Percent(20)));
        assert_eq!(about.geometry.top, Some(Length::Percent(30)));
    }

    #[test]
    fn builtin_catalog_maps_start_actions() {
        let catalog = builtin_catalog().expect("builtin catalog");
        assert_eq!(
            catalog.start_action("myresume"),
            Some(&StartMenuAction::OpenWindow {
                window: WindowId::new("resume")
            })
        );
        assert_eq!(
            catalog.start_action("allprograms"),
            Some(&StartMenuAction::Placeholder)
        );
        assert!(matches!(
            catalog.start_action("youtube"),
            Some(StartMenuAction::ExternalUrl { .. })
        ));
        assert_eq!(catalog.start_action("unknown"), None);
    }

    #[test]
    fn schema_mismatch_is_rejected() {
        let err = DesktopCatalog::from_json(r#"{"schema_version": 7}"#).expect_err("mismatch");
        assert!(matches!(
            err,
            CatalogError::SchemaVersion {
                expected: 1,
                found: 7
            }
        ));
    }

    #[test]
    fn bad_geometry_length_fails_to_decode() {
        let raw = r#"{
            "schema_version": 1,
            "windows": [{
                "id": "about",
                "title": "About",
                "taskbar_label": null,
                "geometry": { "left": "3em", "top": null, "width": null, "height": null }
            }]
        }"#;
        assert!(matches!(
            DesktopCatalog::from_json(raw),
            Err(CatalogError::Parse(_))
        ));
    }
}
