//! Shared window-manager transition helpers used by the desktop reducer.
//!
//! Every helper returns `false` when `window_id` is not in the registry and leaves the state
//! untouched in that case.

use crate::model::{
    DesktopState, Length, PointerPosition, WindowGeometry, WindowId, WindowRect, BASE_Z_INDEX,
    TASKBAR_HEIGHT_PX,
};

/// Hands out the next stacking value, strictly greater than every value handed out before.
///
/// When the counter would overflow, existing windows are restacked from
/// [`BASE_Z_INDEX`] upward in their current order first.
pub fn take_next_z_index(state: &mut DesktopState) -> u32 {
    let z_index = state.next_z_index;
    match z_index.checked_add(1) {
        Some(next) => {
            state.next_z_index = next;
            z_index
        }
        None => {
            compact_z_indices(state);
            take_next_z_index(state)
        }
    }
}

fn compact_z_indices(state: &mut DesktopState) {
    let mut stacked: Vec<_> = state
        .windows
        .values_mut()
        .filter(|window| window.z_index > 0)
        .collect();
    stacked.sort_by_key(|window| window.z_index);

    let mut next = BASE_Z_INDEX + 1;
    for window in stacked {
        window.z_index = next;
        next += 1;
    }
    state.next_z_index = next;
}

/// Moves the focus marker to `window_id` and raises it above every other window.
///
/// This is the only helper that sets the focus marker.
pub fn focus_window_internal(state: &mut DesktopState, window_id: &WindowId) -> bool {
    if !state.windows.contains_key(window_id) {
        return false;
    }
    let z_index = take_next_z_index(state);
    for window in state.windows.values_mut() {
        window.active = false;
    }
    if let Some(window) = state.windows.get_mut(window_id) {
        window.active = true;
        window.z_index = z_index;
    }
    true
}

/// Shows, focuses, and tracks `window_id` as open.
///
/// The taskbar entry and the wired-chrome entry are appended only on first insertion, so
/// repeated opens never duplicate either.
pub fn open_window_internal(state: &mut DesktopState, window_id: &WindowId) -> bool {
    let Some(window) = state.windows.get_mut(window_id) else {
        return false;
    };
    window.displayed = true;
    focus_window_internal(state, window_id);

    if !state.open_windows.contains(window_id) {
        state.open_windows.push(window_id.clone());
    }
    if !state.wired_windows.contains(window_id) {
        state.wired_windows.push(window_id.clone());
    }
    true
}

/// Hides `window_id`, clears its focus marker, and drops its taskbar entry.
pub fn close_window_internal(state: &mut DesktopState, window_id: &WindowId) -> bool {
    let Some(window) = state.windows.get_mut(window_id) else {
        return false;
    };
    window.displayed = false;
    window.active = false;
    state.open_windows.retain(|id| id != window_id);
    true
}

/// Hides `window_id` while keeping it open on the taskbar.
pub fn minimize_window_internal(state: &mut DesktopState, window_id: &WindowId) -> bool {
    let Some(window) = state.windows.get_mut(window_id) else {
        return false;
    };
    window.displayed = false;
    true
}

/// Toggles the maximized state of `window_id`.
///
/// Maximizing captures the current inline geometry, with unset fields taken from `measured`,
/// and fills the desktop above the taskbar. Restoring puts the captured geometry back and
/// discards the capture; with nothing captured the stylesheet geometry applies again.
pub fn toggle_maximize_internal(
    state: &mut DesktopState,
    window_id: &WindowId,
    measured: WindowRect,
) -> bool {
    let Some(window) = state.windows.get_mut(window_id) else {
        return false;
    };
    if window.maximized {
        window.maximized = false;
        window.geometry = window.restore_geometry.take().unwrap_or_default();
    } else {
        window.restore_geometry = Some(window.geometry.resolved_with(measured));
        window.maximized = true;
        window.geometry = WindowGeometry::fill_viewport(TASKBAR_HEIGHT_PX);
    }
    true
}

/// Pins `left`/`top` of `window_id` to pixel values so drag deltas can be applied.
///
/// Percentage or stylesheet positions are replaced by the measured offsets.
pub fn pin_position_to_pixels(
    state: &mut DesktopState,
    window_id: &WindowId,
    measured: WindowRect,
) -> bool {
    let Some(window) = state.windows.get_mut(window_id) else {
        return false;
    };
    let geometry = &mut window.geometry;
    if geometry.left.and_then(|left| left.as_px()).is_none() {
        geometry.left = Some(Length::Px(measured.x));
    }
    if geometry.top.and_then(|top| top.as_px()).is_none() {
        geometry.top = Some(Length::Px(measured.y));
    }
    true
}

/// Shifts `window_id` by the pointer delta between `from` and `to`.
pub fn drag_window_by(
    state: &mut DesktopState,
    window_id: &WindowId,
    from: PointerPosition,
    to: PointerPosition,
) -> bool {
    let Some(window) = state.windows.get_mut(window_id) else {
        return false;
    };
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let geometry = &mut window.geometry;
    let left = geometry.left.and_then(|left| left.as_px()).unwrap_or(0);
    let top = geometry.top.and_then(|top| top.as_px()).unwrap_or(0);
    geometry.left = Some(Length::Px(left + dx));
    geometry.top = Some(Length::Px(top + dy));
    true
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowRecord;

    fn state_with(ids: &[&str]) -> DesktopState {
        let mut state = DesktopState::default();
        for id in ids {
            let id = WindowId::new(*id);
            state.windows.insert(
                id.clone(),
                WindowRecord {
                    id,
                    title: String::new(),
                    taskbar_label: String::new(),
                    body: Vec::new(),
                    open_on_boot: false,
                    displayed: false,
                    z_index: 0,
                    active: false,
                    maximized: false,
                    geometry: WindowGeometry::default(),
                    restore_geometry: None,
                },
            );
        }
        state
    }

    #[test]
    fn focus_keeps_a_single_active_marker() {
        let mut state = state_with(&["about", "resume"]);
        let about = WindowId::new("about");
        let resume = WindowId::new("resume");

        assert!(focus_window_internal(&mut state, &about));
        assert!(focus_window_internal(&mut state, &resume));

        let active: Vec<_> = state.windows.values().filter(|w| w.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, resume);
    }

    #[test]
    fn repeated_focus_on_same_window_still_increases_z() {
        let mut state = state_with(&["about"]);
        let about = WindowId::new("about");

        focus_window_internal(&mut state, &about);
        let first = state.windows[&about].z_index;
        focus_window_internal(&mut state, &about);
        let second = state.windows[&about].z_index;

        assert!(second > first);
        assert!(first > BASE_Z_INDEX);
    }

    #[test]
    fn helpers_ignore_unknown_windows() {
        let mut state = state_with(&["about"]);
        let before = state.clone();
        let ghost = WindowId::new("ghost");

        assert!(!focus_window_internal(&mut state, &ghost));
        assert!(!open_window_internal(&mut state, &ghost));
        assert!(!close_window_internal(&mut state, &ghost));
        assert!(!minimize_window_internal(&mut state, &ghost));
        assert!(!toggle_maximize_internal(
            &mut state,
            &ghost,
            WindowRect::default()
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn pin_position_replaces_percentages_with_measured_offsets() {
        let mut state = state_with(&["about"]);
        let about = WindowId::new("about");
        state.windows.get_mut(&about).unwrap().geometry.left = Some(Length::Percent(20));
        state.windows.get_mut(&about).unwrap().geometry.top = Some(Length::Px(12));

        pin_position_to_pixels(
            &mut state,
            &about,
            WindowRect {
                x: 256,
                y: 999,
                w: 10,
                h: 10,
            },
        );

        let geometry = state.windows[&about].geometry;
        assert_eq!(geometry.left, Some(Length::Px(256)));
        assert_eq!(geometry.top, Some(Length::Px(12)));
    }

    #[test]
    fn counter_overflow_restacks_without_reordering() {
        let mut state = state_with(&["about", "resume"]);
        let about = WindowId::new("about");
        let resume = WindowId::new("resume");
        state.windows.get_mut(&about).unwrap().z_index = u32::MAX - 2;
        state.windows.get_mut(&resume).unwrap().z_index = u32::MAX - 1;
        state.next_z_index = u32::MAX;

        assert!(focus_window_internal(&mut state, &about));

        assert_eq!(state.windows[&resume].z_index, BASE_Z_INDEX + 2);
        assert_eq!(state.windows[&about].z_index, BASE_Z_INDEX + 3);
        assert_eq!(state.next_z_index, BASE_Z_INDEX + 4);
    }
}
