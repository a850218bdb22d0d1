use leptos::leptos_dom::helpers::WindowListenerHandle;

use super::*;

/// Control buttons focus the frame on mouse-down but never start a header drag.
const WINDOW_CONTROLS_SELECTOR: &str = ".window-controls";

/// Document-level listeners that live for a single header drag.
struct DragListeners {
    pointer_move: WindowListenerHandle,
    pointer_up: WindowListenerHandle,
}

impl DragListeners {
    fn remove(self) {
        self.pointer_move.remove();
        self.pointer_up.remove();
    }
}

fn release_drag_listeners(slot: StoredValue<Option<DragListeners>>) {
    if let Some(listeners) = slot.try_update_value(Option::take).flatten() {
        listeners.remove();
    }
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let Some(initial) = runtime
        .state
        .with_untracked(|desktop| desktop.window(&window_id).cloned())
    else {
        return ().into_view();
    };

    let window = {
        let window_id = window_id.clone();
        Signal::derive(move || {
            runtime
                .state
                .with(|desktop| desktop.window(&window_id).cloned())
        })
    };
    let maximized = move || window.with(|win| win.as_ref().is_some_and(|win| win.maximized));
    let measure = move |window_id: &WindowId| {
        runtime
            .host
            .with_value(|host| host.measure_window(window_id))
            .unwrap_or_default()
    };

    let drag_listeners = store_value(None::<DragListeners>);
    on_cleanup(move || release_drag_listeners(drag_listeners));

    let focus = {
        let window_id = window_id.clone();
        move |_: web_sys::MouseEvent| {
            runtime.dispatch_action(DesktopAction::FocusWindow {
                window_id: window_id.clone(),
            })
        }
    };
    let minimize = {
        let window_id = window_id.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            runtime.dispatch_action(DesktopAction::MinimizeWindow {
                window_id: window_id.clone(),
            });
        }
    };
    let toggle_maximize = {
        let window_id = window_id.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            runtime.dispatch_action(DesktopAction::ToggleMaximize {
                window_id: window_id.clone(),
                measured: measure(&window_id),
            });
        }
    };
    let close = {
        let window_id = window_id.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            runtime.dispatch_action(DesktopAction::CloseWindow {
                window_id: window_id.clone(),
            });
        }
    };
    let begin_move = {
        let window_id = window_id.clone();
        move |event: web_sys::MouseEvent| {
            if event.button() != 0 || event_target_within(&event, WINDOW_CONTROLS_SELECTOR) {
                return;
            }
            event.prevent_default();
            event.stop_propagation();

            release_drag_listeners(drag_listeners);
            runtime.dispatch_action(DesktopAction::BeginMove {
                window_id: window_id.clone(),
                pointer: pointer_from_mouse_event(&event),
                measured: measure(&window_id),
            });

            let pointer_move = window_event_listener(ev::mousemove, move |moved| {
                runtime.dispatch_action(DesktopAction::UpdateMove {
                    pointer: pointer_from_mouse_event(&moved),
                });
            });
            let pointer_up = window_event_listener(ev::mouseup, move |_| {
                release_drag_listeners(drag_listeners);
                runtime.dispatch_action(DesktopAction::EndMove);
            });
            drag_listeners.set_value(Some(DragListeners {
                pointer_move,
                pointer_up,
            }));
        }
    };

    let title = initial.title.clone();
    let body = initial
        .body
        .iter()
        .map(|paragraph| view! { <p>{paragraph.clone()}</p> })
        .collect_view();

    view! {
        <section
            id=window_frame_dom_id(&window_id)
            class=move || window.with(|win| win.as_ref().map(|win| win.css_class()).unwrap_or_default())
            style=move || {
                window.with(|win| {
                    win.as_ref()
                        .map(|win| win.inline_style())
                        .unwrap_or_else(|| "display:none;".to_string())
                })
            }
            data-window=window_id.to_string()
            role="dialog"
            aria-label=title.clone()
            tabindex="-1"
            on:mousedown=focus
        >
            <header class="window-header" style="cursor: move;" on:mousedown=begin_move>
                <span class="window-title">{title}</span>
                <div class="window-controls">
                    <button
                        class="minimize"
                        aria-label="Minimize window"
                        on:click=minimize
                    >
                        "_"
                    </button>
                    <button
                        class="maximize"
                        aria-label=move || if maximized() { "Restore window" } else { "Maximize window" }
                        on:click=toggle_maximize
                    >
                        "□"
                    </button>
                    <button
                        class="close"
                        aria-label="Close window"
                        on:click=close
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div class="window-body">{body}</div>
        </section>
    }
    .into_view()
}
