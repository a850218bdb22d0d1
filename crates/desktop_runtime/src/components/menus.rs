use super::*;

/// Returns whether a document click landed on the start menu or the start button.
pub(super) fn event_targets_start_surface(ev: &web_sys::MouseEvent) -> bool {
    event_target_within(ev, &format!("#{START_MENU_DOM_ID}, #{START_BUTTON_DOM_ID}"))
}

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let is_open = move || state.with(|desktop| desktop.start_menu_open);

    let entries_in = move |section: StartMenuSection| {
        state.with_untracked(|desktop| {
            desktop
                .start_menu
                .iter()
                .filter(|entry| entry.section == section)
                .cloned()
                .collect::<Vec<_>>()
        })
    };
    let programs = entries_in(StartMenuSection::Programs);
    let system = entries_in(StartMenuSection::System);

    let was_open = store_value(false);
    create_effect(move |_| {
        let open = is_open();
        if open && !was_open.get_value() {
            let _ = focus_first_menu_item(START_MENU_DOM_ID);
        }
        was_open.set_value(open);
    });

    view! {
        <div
            id=START_MENU_DOM_ID
            class=move || if is_open() { "start-menu open" } else { "start-menu" }
            role="menu"
            aria-label="Start"
            aria-hidden=move || (!is_open()).to_string()
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                let _ = handle_menu_roving_keydown(&ev, START_MENU_DOM_ID);
            }
        >
            <div class="start-menu-column programs" role="group" aria-label="Programs">
                {programs.into_iter().map(|entry| view! { <StartMenuItem entry /> }).collect_view()}
            </div>
            <div class="start-menu-column system" role="group" aria-label="System">
                {system.into_iter().map(|entry| view! { <StartMenuItem entry /> }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn StartMenuItem(entry: StartMenuEntry) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let action = entry.action.clone();

    let activate = {
        let action = action.clone();
        move || {
            runtime.dispatch_action(DesktopAction::ActivateStartItem {
                action: action.clone(),
            })
        }
    };
    let on_click = {
        let activate = activate.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            activate();
        }
    };
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if is_activation_key(&ev) {
            ev.prevent_default();
            ev.stop_propagation();
            activate();
        }
    };

    view! {
        <div
            id=start_item_dom_id(&action)
            class="start-item"
            role="menuitem"
            tabindex="0"
            data-action=action.clone()
            on:click=on_click
            on:keydown=on_keydown
        >
            {entry.label}
        </div>
    }
}
