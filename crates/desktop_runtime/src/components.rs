//! Desktop shell UI composition and interaction surfaces.

mod a11y;
mod menus;
mod taskbar;
mod window;

use std::time::Duration;

use leptos::*;
use wasm_bindgen::JsCast;

use self::{
    a11y::{focus_element_by_id, focus_first_menu_item, handle_menu_roving_keydown, is_activation_key},
    menus::{event_targets_start_surface, StartMenu},
    taskbar::Taskbar,
    window::DesktopWindow,
};

use crate::{
    catalog::{StartMenuEntry, StartMenuSection},
    clock::{format_clock, CLOCK_REFRESH_SECS},
    model::{window_frame_dom_id, PointerPosition, WindowId},
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

const START_BUTTON_DOM_ID: &str = "startButton";
const START_MENU_DOM_ID: &str = "startMenu";

fn taskbar_window_button_dom_id(window_id: &WindowId) -> String {
    format!("taskbar-window-button-{window_id}")
}

fn start_item_dom_id(action: &str) -> String {
    format!("start-item-{action}")
}

/// Returns whether the event target is, or sits inside, an element matching `selector`.
fn event_target_within(ev: &web_sys::MouseEvent, selector: &str) -> bool {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.closest(selector).ok().flatten())
        .is_some()
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_mouse_event(ev: &web_sys::MouseEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

#[component]
/// Renders the desktop window layer and the taskbar using the current runtime context.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <div id="desktop" class="desktop-shell">
            <div class="window-layer">
                // Frames stay mounted once wired; closing only hides them.
                <For
                    each=move || state.get().wired_windows
                    key=|window_id| window_id.clone()
                    let:window_id
                >
                    <DesktopWindow window_id=window_id />
                </For>
            </div>

            <Taskbar />
        </div>
    }
}
