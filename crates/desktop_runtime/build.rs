use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const MANIFEST_FILE: &str = "desktop.manifest.toml";
const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ClockManifest {
    #[serde(default)]
    use_24_hour: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GeometryManifest {
    left: Option<String>,
    top: Option<String>,
    width: Option<String>,
    height: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowManifest {
    id: String,
    title: String,
    taskbar_label: Option<String>,
    #[serde(default)]
    open_on_boot: bool,
    #[serde(default)]
    geometry: GeometryManifest,
    #[serde(default)]
    body: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct StartMenuManifest {
    action: String,
    label: String,
    section: String,
    url: Option<String>,
    window: Option<String>,
    #[serde(default)]
    placeholder: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct DesktopManifest {
    schema_version: u32,
    #[serde(default)]
    clock: ClockManifest,
    #[serde(default)]
    windows: Vec<WindowManifest>,
    #[serde(default)]
    start_menu: Vec<StartMenuManifest>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum StartMenuTarget {
    ExternalUrl { url: String },
    OpenWindow { window: String },
    Placeholder,
}

#[derive(Debug, Clone, Serialize)]
struct StartMenuEntry {
    action: String,
    label: String,
    section: String,
    target: StartMenuTarget,
}

#[derive(Debug, Clone, Serialize)]
struct DesktopCatalog {
    schema_version: u32,
    clock: ClockManifest,
    windows: Vec<WindowManifest>,
    start_menu: Vec<StartMenuEntry>,
}

fn start_menu_target(entry: &StartMenuManifest, window_ids: &BTreeSet<String>) -> StartMenuTarget {
    match (&entry.url, &entry.window, entry.placeholder) {
        (Some(url), None, false) => StartMenuTarget::ExternalUrl { url: url.clone() },
        (None, Some(window), false) => {
            if !window_ids.contains(window) {
                panic!(
                    "start menu action `{}` targets unknown window `{window}`",
                    entry.action
                );
            }
            StartMenuTarget::OpenWindow {
                window: window.clone(),
            }
        }
        (None, None, true) => StartMenuTarget::Placeholder,
        _ => panic!(
            "start menu action `{}` must set exactly one of `url`, `window`, or `placeholder`",
            entry.action
        ),
    }
}

/// Accepts the inline CSS lengths the runtime understands: `0`, `<n>px`, `<n>%`, and
/// `calc(100% - <n>px)`.
fn is_supported_length(raw: &str) -> bool {
    let value = raw.trim();
    if value == "0" {
        return true;
    }
    let number = value
        .strip_prefix("calc(100% -")
        .and_then(|rest| rest.strip_suffix("px)"))
        .or_else(|| value.strip_suffix('%'))
        .or_else(|| value.strip_suffix("px"));
    number.is_some_and(|number| number.trim().parse::<i32>().is_ok())
}

fn validate_geometry(window: &WindowManifest) {
    let geometry = &window.geometry;
    for (field, value) in [
        ("left", &geometry.left),
        ("top", &geometry.top),
        ("width", &geometry.width),
        ("height", &geometry.height),
    ] {
        if let Some(value) = value {
            if !is_supported_length(value) {
                panic!(
                    "window `{}` has unsupported geometry {field} `{value}`",
                    window.id
                );
            }
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join(MANIFEST_FILE);
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: DesktopManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if manifest.schema_version != SCHEMA_VERSION {
        panic!(
            "manifest schema mismatch in {}: expected {SCHEMA_VERSION} found {}",
            path.display(),
            manifest.schema_version
        );
    }

    let mut window_ids = BTreeSet::new();
    for window in &manifest.windows {
        if window.id.trim().is_empty() {
            panic!("window ids must not be empty");
        }
        if !window_ids.insert(window.id.clone()) {
            panic!("duplicate window id `{}`", window.id);
        }
        validate_geometry(window);
    }

    let mut actions = BTreeSet::new();
    let mut start_menu = Vec::with_capacity(manifest.start_menu.len());
    for entry in &manifest.start_menu {
        if !actions.insert(entry.action.clone()) {
            panic!("duplicate start menu action `{}`", entry.action);
        }
        if !matches!(entry.section.as_str(), "programs" | "system") {
            panic!(
                "start menu action `{}` has unknown section `{}`",
                entry.action, entry.section
            );
        }
        start_menu.push(StartMenuEntry {
            action: entry.action.clone(),
            label: entry.label.clone(),
            section: entry.section.clone(),
            target: start_menu_target(entry, &window_ids),
        });
    }

    let catalog = DesktopCatalog {
        schema_version: manifest.schema_version,
        clock: manifest.clock,
        windows: manifest.windows,
        start_menu,
    };
    let json = serde_json::to_string_pretty(&catalog).expect("serialize desktop catalog");
    let generated = format!(
        "/// Build-time generated desktop catalog JSON.\n\
pub const DESKTOP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("desktop_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
