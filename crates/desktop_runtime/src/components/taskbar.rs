use platform_host::LocalClockTime;

use super::*;

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let clock_now = create_rw_signal(LocalClockTime::now());
    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(LocalClockTime::now()),
        Duration::from_secs(CLOCK_REFRESH_SECS),
    ) {
        on_cleanup(move || interval.clear());
    }

    let outside_click_listener = window_event_listener(ev::click, move |ev| {
        if !runtime.state.get_untracked().start_menu_open {
            return;
        }
        if event_targets_start_surface(&ev) {
            return;
        }
        runtime.dispatch_action(DesktopAction::CloseStartMenu);
    });
    on_cleanup(move || outside_click_listener.remove());

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.key() != "Escape" || !runtime.state.get_untracked().start_menu_open {
            return;
        }
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::CloseStartMenu);
        let _ = focus_element_by_id(START_BUTTON_DOM_ID);
    });
    on_cleanup(move || escape_listener.remove());

    let start_menu_open = move || state.with(|desktop| desktop.start_menu_open);
    let clock_label = move || format_clock(clock_now.get(), state.with(|desktop| desktop.clock));

    view! {
        <footer class="taskbar" role="toolbar" aria-label="Desktop taskbar">
            <button
                id=START_BUTTON_DOM_ID
                class=move || if start_menu_open() { "start-button pressed" } else { "start-button" }
                aria-haspopup="menu"
                aria-controls=START_MENU_DOM_ID
                aria-expanded=move || start_menu_open().to_string()
                on:mousedown=move |ev| ev.stop_propagation()
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::ToggleStartMenu);
                }
            >
                "Start"
            </button>

            <StartMenu />

            <div id="taskItems" class="task-items" role="group" aria-label="Open windows">
                <For
                    each=move || state.get().open_windows
                    key=|window_id| window_id.clone()
                    let:window_id
                >
                    <TaskbarButton window_id=window_id />
                </For>
            </div>

            <div class="taskbar-clock" role="timer" aria-live="off">
                <time>{clock_label}</time>
            </div>
        </footer>
    }
}

#[component]
fn TaskbarButton(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let label = {
        let window_id = window_id.clone();
        move || {
            state.with(|desktop| {
                desktop
                    .window(&window_id)
                    .map(|win| win.taskbar_label.clone())
                    .unwrap_or_else(|| window_id.to_string())
            })
        }
    };
    let is_active = {
        let window_id = window_id.clone();
        Signal::derive(move || {
            state.with(|desktop| {
                desktop
                    .window(&window_id)
                    .is_some_and(|win| win.active && win.displayed)
            })
        })
    };
    let activate = {
        let window_id = window_id.clone();
        move |_: web_sys::MouseEvent| {
            runtime.dispatch_action(DesktopAction::ActivateTaskbarButton {
                window_id: window_id.clone(),
            });
        }
    };

    view! {
        <button
            id=taskbar_window_button_dom_id(&window_id)
            class=move || if is_active.get() { "task-item active" } else { "task-item" }
            data-window=window_id.to_string()
            aria-pressed=move || is_active.get().to_string()
            on:click=activate
        >
            {label}
        </button>
    }
}
