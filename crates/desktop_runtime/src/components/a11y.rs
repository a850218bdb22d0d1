//! Internal DOM focus and menu-keyboard helpers for desktop shell widgets.

use wasm_bindgen::JsCast;

fn active_html_element() -> Option<web_sys::HtmlElement> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.active_element())
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
}

fn focus_html_element(element: &web_sys::HtmlElement) {
    let _ = element.focus();
}

/// Focuses an element by ID and reports whether a focusable HTML element was found.
pub(super) fn focus_element_by_id(id: &str) -> bool {
    let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return false;
    };
    focus_html_element(&element);
    true
}

fn menu_items(menu_id: &str) -> Vec<web_sys::HtmlElement> {
    let Some(menu) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(menu_id))
    else {
        return Vec::new();
    };
    let Ok(nodes) = menu.query_selector_all(r#"[role="menuitem"]"#) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .filter(|item| item.get_attribute("aria-disabled").as_deref() != Some("true"))
        .collect()
}

/// Focuses the first enabled menu item inside a menu container.
pub(super) fn focus_first_menu_item(menu_id: &str) -> bool {
    match menu_items(menu_id).first() {
        Some(first) => {
            focus_html_element(first);
            true
        }
        None => false,
    }
}

fn roving_target_index(len: usize, current: Option<usize>, key: &str) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0) as i64;
    let len_i = len as i64;
    match key {
        "ArrowDown" | "ArrowRight" => Some((current + 1).rem_euclid(len_i) as usize),
        "ArrowUp" | "ArrowLeft" => Some((current - 1).rem_euclid(len_i) as usize),
        "Home" => Some(0),
        "End" => Some(len - 1),
        _ => None,
    }
}

/// Handles arrow/home/end menu navigation and prevents default when handled.
pub(super) fn handle_menu_roving_keydown(ev: &web_sys::KeyboardEvent, menu_id: &str) -> bool {
    let items = menu_items(menu_id);
    let active_id = active_html_element().map(|el| el.id()).unwrap_or_default();
    let current = items
        .iter()
        .position(|item| !active_id.is_empty() && item.id() == active_id);

    let Some(next) = roving_target_index(items.len(), current, ev.key().as_str()) else {
        return false;
    };
    focus_html_element(&items[next]);
    ev.prevent_default();
    ev.stop_propagation();
    true
}

/// Returns whether the keyboard event should activate the focused item.
pub(super) fn is_activation_key(ev: &web_sys::KeyboardEvent) -> bool {
    is_activation_key_name(ev.key().as_str())
}

fn is_activation_key_name(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn roving_wraps_in_both_directions() {
        assert_eq!(roving_target_index(3, Some(2), "ArrowDown"), Some(0));
        assert_eq!(roving_target_index(3, Some(0), "ArrowUp"), Some(2));
        assert_eq!(roving_target_index(3, None, "ArrowDown"), Some(1));
    }

    #[test]
    fn roving_jumps_to_edges_and_ignores_other_keys() {
        assert_eq!(roving_target_index(4, Some(1), "Home"), Some(0));
        assert_eq!(roving_target_index(4, Some(1), "End"), Some(3));
        assert_eq!(roving_target_index(4, Some(1), "Tab"), None);
        assert_eq!(roving_target_index(0, None, "End"), None);
    }

    #[test]
    fn enter_and_space_activate() {
        assert!(is_activation_key_name("Enter"));
        assert!(is_activation_key_name(" "));
        assert!(!is_activation_key_name("Escape"));
    }
}
