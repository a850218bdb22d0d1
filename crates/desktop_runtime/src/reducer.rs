//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use thiserror::Error;

use crate::{
    catalog::{find_start_action, StartMenuAction},
    model::{
        DeepLinkState, DesktopState, DragSession, InteractionState, PointerPosition, WindowId,
        WindowRect,
    },
    window_manager::{
        close_window_internal, drag_window_by, focus_window_internal, minimize_window_internal,
        open_window_internal, pin_position_to_pixels, toggle_maximize_internal,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open windows flagged `open_on_boot` in the catalog.
    Boot,
    /// Show, focus, and track a window as open.
    OpenWindow {
        /// Window to open.
        window_id: WindowId,
    },
    /// Hide a window and drop its taskbar button.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Taskbar button click: reopen a hidden window, refocus a visible one.
    ActivateTaskbarButton {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Hide a window but keep its taskbar button.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Maximize a window, or restore it when already maximized.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
        /// Rendered frame box, used for geometry not set inline.
        measured: WindowRect,
    },
    /// Begin dragging a window by its header.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at mouse-down.
        pointer: PointerPosition,
        /// Rendered frame box at mouse-down.
        measured: WindowRect,
    },
    /// Update an in-progress drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active drag.
    EndMove,
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Run the start menu item tagged `action`, then close the menu.
    ActivateStartItem {
        /// `data-action` tag of the activated item.
        action: String,
    },
    /// Open the windows named by a `?open=` deep link.
    ApplyDeepLink {
        /// Parsed deep-link payload.
        deep_link: DeepLinkState,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Open a URL in a new browsing context.
    OpenExternalUrl(String),
    /// Move keyboard focus into a window frame.
    FocusWindowFrame(WindowId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that reference windows missing from the registry.
pub enum ReducerError {
    /// The window id is not registered.
    #[error("window `{0}` is not registered")]
    UnknownWindow(WindowId),
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError::UnknownWindow`] when an action names a window that is not in the
/// registry. The state is left unchanged in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::Boot => {
            for window_id in state.boot_window_ids() {
                open_window(state, &window_id, &mut effects)?;
            }
        }
        DesktopAction::OpenWindow { window_id } => {
            open_window(state, &window_id, &mut effects)?;
        }
        DesktopAction::CloseWindow { window_id } => {
            ensure(close_window_internal(state, &window_id), &window_id)?;
            if interaction
                .dragging
                .as_ref()
                .is_some_and(|session| session.window_id == window_id)
            {
                interaction.dragging = None;
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            ensure(focus_window_internal(state, &window_id), &window_id)?;
        }
        DesktopAction::ActivateTaskbarButton { window_id } => {
            let displayed = state
                .window(&window_id)
                .map(|w| w.displayed)
                .ok_or_else(|| ReducerError::UnknownWindow(window_id.clone()))?;
            if displayed {
                focus_window_internal(state, &window_id);
            } else {
                open_window(state, &window_id, &mut effects)?;
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            ensure(minimize_window_internal(state, &window_id), &window_id)?;
        }
        DesktopAction::ToggleMaximize {
            window_id,
            measured,
        } => {
            ensure(
                toggle_maximize_internal(state, &window_id, measured),
                &window_id,
            )?;
        }
        DesktopAction::BeginMove {
            window_id,
            pointer,
            measured,
        } => {
            ensure(
                pin_position_to_pixels(state, &window_id, measured),
                &window_id,
            )?;
            focus_window_internal(state, &window_id);
            interaction.dragging = Some(DragSession {
                window_id,
                last_pointer: pointer,
            });
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.as_mut() {
                drag_window_by(state, &session.window_id, session.last_pointer, pointer);
                session.last_pointer = pointer;
            }
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::ActivateStartItem { action } => {
            let target = find_start_action(&state.start_menu, &action).cloned();
            match target {
                Some(StartMenuAction::ExternalUrl { url }) => {
                    effects.push(RuntimeEffect::OpenExternalUrl(url));
                }
                Some(StartMenuAction::OpenWindow { window }) => {
                    if state.windows.contains_key(&window) {
                        open_window(state, &window, &mut effects)?;
                    }
                }
                Some(StartMenuAction::Placeholder) | None => {}
            }
            state.start_menu_open = false;
        }
        DesktopAction::ApplyDeepLink { deep_link } => {
            for window_id in deep_link.open {
                if state.windows.contains_key(&window_id) {
                    open_window(state, &window_id, &mut effects)?;
                }
            }
        }
    }

    Ok(effects)
}

fn ensure(found: bool, window_id: &WindowId) -> Result<(), ReducerError> {
    if found {
        Ok(())
    } else {
        Err(ReducerError::UnknownWindow(window_id.clone()))
    }
}

fn open_window(
    state: &mut DesktopState,
    window_id: &WindowId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    ensure(open_window_internal(state, window_id), window_id)?;
    effects.push(RuntimeEffect::FocusWindowFrame(window_id.clone()));
    Ok(())
}
