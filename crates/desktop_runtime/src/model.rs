use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::{DesktopCatalog, StartMenuEntry},
    clock::ClockConfig,
};

/// Stacking counter value before the first window is raised.
pub const BASE_Z_INDEX: u32 = 1000;
/// Vertical space reserved for the taskbar when a window is maximized.
pub const TASKBAR_HEIGHT_PX: i32 = 30;

/// Logical window id (`"about"`, `"resume"`), unique within the registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// DOM id of the frame element rendered for `window_id`.
pub fn window_frame_dom_id(window_id: &WindowId) -> String {
    format!("{}Window", window_id.as_str())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors produced when parsing a CSS length from manifest or style text.
pub enum LengthParseError {
    /// The value was empty or whitespace.
    #[error("empty length")]
    Empty,
    /// The value used a unit or syntax that is not supported.
    #[error("unsupported length `{0}`")]
    Unsupported(String),
}

/// Inline CSS length used for window geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Length {
    Px(i32),
    Percent(i32),
    /// Full container extent minus a pixel inset, rendered as `calc(100% - <inset>px)`.
    Fill { inset_px: i32 },
}

impl Length {
    pub const fn as_px(self) -> Option<i32> {
        match self {
            Self::Px(px) => Some(px),
            _ => None,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(0) => f.write_str("0"),
            Self::Px(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
            Self::Fill { inset_px } => write!(f, "calc(100% - {inset_px}px)"),
        }
    }
}

impl FromStr for Length {
    type Err = LengthParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(LengthParseError::Empty);
        }
        let unsupported = || LengthParseError::Unsupported(value.to_string());

        if let Some(inner) = value
            .strip_prefix("calc(100% -")
            .and_then(|rest| rest.strip_suffix("px)"))
        {
            let inset_px = inner.trim().parse().map_err(|_| unsupported())?;
            return Ok(Self::Fill { inset_px });
        }
        if let Some(pct) = value.strip_suffix('%') {
            return pct.trim().parse().map(Self::Percent).map_err(|_| unsupported());
        }
        if let Some(px) = value.strip_suffix("px") {
            return px.trim().parse().map(Self::Px).map_err(|_| unsupported());
        }
        if value == "0" {
            return Ok(Self::Px(0));
        }
        Err(unsupported())
    }
}

impl TryFrom<String> for Length {
    type Error = LengthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Length> for String {
    fn from(value: Length) -> Self {
        value.to_string()
    }
}

/// Measured pixel box of a rendered window frame (`offsetLeft`/`offsetTop`/...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 48,
            y: 48,
            w: 420,
            h: 300,
        }
    }
}

/// Inline geometry of a window. `None` leaves the stylesheet value in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub left: Option<Length>,
    pub top: Option<Length>,
    pub width: Option<Length>,
    pub height: Option<Length>,
}

impl WindowGeometry {
    /// Geometry covering the desktop above a taskbar of `taskbar_height_px`.
    pub const fn fill_viewport(taskbar_height_px: i32) -> Self {
        Self {
            left: Some(Length::Px(0)),
            top: Some(Length::Px(0)),
            width: Some(Length::Percent(100)),
            height: Some(Length::Fill {
                inset_px: taskbar_height_px,
            }),
        }
    }

    /// Fills every unset field from the measured frame box.
    pub fn resolved_with(self, measured: WindowRect) -> Self {
        Self {
            left: self.left.or(Some(Length::Px(measured.x))),
            top: self.top.or(Some(Length::Px(measured.y))),
            width: self.width.or(Some(Length::Px(measured.w))),
            height: self.height.or(Some(Length::Px(measured.h))),
        }
    }

    /// Renders the set fields as CSS declarations.
    pub fn style_declarations(&self) -> String {
        [
            ("left", self.left),
            ("top", self.top),
            ("width", self.width),
            ("height", self.height),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| format!("{name}:{value};")))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub taskbar_label: String,
    pub body: Vec<String>,
    pub open_on_boot: bool,
    /// Whether the frame is shown (`display:block`). Minimized and closed windows are hidden.
    pub displayed: bool,
    /// Last stacking value assigned by focus/open; `0` until first raised.
    pub z_index: u32,
    /// Focus marker; at most one window carries it.
    pub active: bool,
    pub maximized: bool,
    pub geometry: WindowGeometry,
    /// Geometry captured on maximize. Present only while maximized.
    pub restore_geometry: Option<WindowGeometry>,
}

impl WindowRecord {
    /// Inline style for the window frame.
    pub fn inline_style(&self) -> String {
        let display = if self.displayed { "block" } else { "none" };
        let mut style = format!("display:{display};");
        if self.z_index > 0 {
            style.push_str(&format!("z-index:{};", self.z_index));
        }
        style.push_str(&self.geometry.style_declarations());
        style
    }

    pub fn css_class(&self) -> String {
        let mut class = String::from("window");
        if self.active {
            class.push_str(" active");
        }
        if self.maximized {
            class.push_str(" maximized");
        }
        class
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopState {
    /// Registry of every manageable window, populated once from the catalog.
    pub windows: BTreeMap<WindowId, WindowRecord>,
    /// Next stacking value to hand out. Only ever increases.
    pub next_z_index: u32,
    /// Open windows in the order they were opened; drives taskbar buttons.
    pub open_windows: Vec<WindowId>,
    /// Windows whose frame has been mounted and bound, in first-open order.
    pub wired_windows: Vec<WindowId>,
    pub start_menu_open: bool,
    pub start_menu: Vec<StartMenuEntry>,
    pub clock: ClockConfig,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            windows: BTreeMap::new(),
            next_z_index: BASE_Z_INDEX + 1,
            open_windows: Vec::new(),
            wired_windows: Vec::new(),
            start_menu_open: false,
            start_menu: Vec::new(),
            clock: ClockConfig::default(),
        }
    }
}

impl DesktopState {
    pub fn from_catalog(catalog: &DesktopCatalog) -> Self {
        let windows = catalog
            .windows
            .iter()
            .map(|descriptor| {
                let record = WindowRecord {
                    id: descriptor.id.clone(),
                    title: descriptor.title.clone(),
                    taskbar_label: descriptor
                        .taskbar_label
                        .clone()
                        .unwrap_or_else(|| descriptor.id.to_string()),
                    body: descriptor.body.clone(),
                    open_on_boot: descriptor.open_on_boot,
                    displayed: false,
                    z_index: 0,
                    active: false,
                    maximized: false,
                    geometry: descriptor.geometry,
                    restore_geometry: None,
                };
                (descriptor.id.clone(), record)
            })
            .collect();

        Self {
            windows,
            start_menu: catalog.start_menu.clone(),
            clock: catalog.clock,
            ..Self::default()
        }
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.get(window_id)
    }

    pub fn is_open(&self, window_id: &WindowId) -> bool {
        self.open_windows.contains(window_id)
    }

    pub fn is_wired(&self, window_id: &WindowId) -> bool {
        self.wired_windows.contains(window_id)
    }

    pub fn active_window_id(&self) -> Option<&WindowId> {
        self.windows.values().find(|w| w.active).map(|w| &w.id)
    }

    /// Ids of registered windows flagged to open when the desktop boots.
    pub fn boot_window_ids(&self) -> Vec<WindowId> {
        self.windows
            .values()
            .filter(|w| w.open_on_boot)
            .map(|w| w.id.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

/// One header drag, from mouse-down to mouse-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    /// Pointer position at the previous move (or at mouse-down).
    pub last_pointer: PointerPosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
}

/// Windows requested through the `?open=` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DeepLinkState {
    pub open: Vec<WindowId>,
}

impl DeepLinkState {
    /// Parses a comma-separated list of window ids, dropping blanks and repeats.
    pub fn from_query_value(raw: &str) -> Self {
        let mut open = Vec::new();
        for id in raw.split(',').map(str::trim).filter(|id| !id.is_empty()) {
            let id = WindowId::new(id);
            if !open.contains(&id) {
                open.push(id);
            }
        }
        Self { open }
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn length_parses_manifest_and_style_forms() {
        assert_eq!("20%".parse::<Length>(), Ok(Length::Percent(20)));
        assert_eq!(" 12px ".parse::<Length>(), Ok(Length::Px(12)));
        assert_eq!("-8px".parse::<Length>(), Ok(Length::Px(-8)));
        assert_eq!("0".parse::<Length>(), Ok(Length::Px(0)));
        assert_eq!(
            "calc(100% - 30px)".parse::<Length>(),
            Ok(Length::Fill { inset_px: 30 })
        );
        assert_eq!("".parse::<Length>(), Err(LengthParseError::Empty));
        assert_eq!(
            "3em".parse::<Length>(),
            Err(LengthParseError::Unsupported("3em".to_string()))
        );
    }

    #[test]
    fn length_display_is_valid_css() {
        assert_eq!(Length::Px(0).to_string(), "0");
        assert_eq!(Length::Px(14).to_string(), "14px");
        assert_eq!(Length::Percent(100).to_string(), "100%");
        assert_eq!(
            Length::Fill { inset_px: 30 }.to_string(),
            "calc(100% - 30px)"
        );
    }

    #[test]
    fn resolved_with_keeps_inline_fields_and_fills_the_rest() {
        let geometry = WindowGeometry {
            left: Some(Length::Percent(20)),
            ..WindowGeometry::default()
        };
        let measured = WindowRect {
            x: 100,
            y: 200,
            w: 400,
            h: 250,
        };

        assert_eq!(
            geometry.resolved_with(measured),
            WindowGeometry {
                left: Some(Length::Percent(20)),
                top: Some(Length::Px(200)),
                width: Some(Length::Px(400)),
                height: Some(Length::Px(250)),
            }
        );
    }

    #[test]
    fn inline_style_omits_unset_geometry_and_unraised_z() {
        let record = WindowRecord {
            id: WindowId::new("about"),
            title: "About".to_string(),
            taskbar_label: "About".to_string(),
            body: Vec::new(),
            open_on_boot: false,
            displayed: false,
            z_index: 0,
            active: false,
            maximized: false,
            geometry: WindowGeometry {
                top: Some(Length::Px(5)),
                ..WindowGeometry::default()
            },
            restore_geometry: None,
        };
        assert_eq!(record.inline_style(), "display:none;top:5px;");
        assert_eq!(record.css_class(), "window");
    }

    #[test]
    fn deep_link_query_value_drops_blanks_and_duplicates() {
        let deep_link = DeepLinkState::from_query_value(" resume, ,about,resume ");
        assert_eq!(
            deep_link.open,
            vec![WindowId::new("resume"), WindowId::new("about")]
        );
        assert!(DeepLinkState::from_query_value("").is_empty());
    }

    #[test]
    fn frame_dom_id_follows_window_suffix_convention() {
        assert_eq!(window_frame_dom_id(&WindowId::new("resume")), "resumeWindow");
    }
}
