//! Decision logic for the single shell window slot.
//!
//! At most one shell window exists at a time. Creating one pumps the
//! message queue while the webview bootstraps, so a second request can
//! arrive before the first window has landed in the slot; the
//! in-progress state counts as occupied.

/// Lifecycle of the one shell slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No window and no creation underway.
    Empty,
    /// A create request is still bootstrapping its webview.
    Creating,
    /// A live window occupies the slot.
    Live,
}

/// What a create request (hotkey or second instance) should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateAction {
    Create,
    /// Creation already underway; drop the request.
    Ignore,
    FocusExisting,
}

/// What the visibility toggle should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Create,
    /// Creation already underway; drop the request.
    Ignore,
    FlipVisibility,
}

pub fn on_create_request(state: SlotState) -> CreateAction {
    match state {
        SlotState::Empty => CreateAction::Create,
        SlotState::Creating => CreateAction::Ignore,
        SlotState::Live => CreateAction::FocusExisting,
    }
}

pub fn on_toggle_request(state: SlotState) -> ToggleAction {
    match state {
        SlotState::Empty => ToggleAction::Create,
        SlotState::Creating => ToggleAction::Ignore,
        SlotState::Live => ToggleAction::FlipVisibility,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_creates() {
        assert_eq!(on_create_request(SlotState::Empty), CreateAction::Create);
        assert_eq!(on_toggle_request(SlotState::Empty), ToggleAction::Create);
    }

    #[test]
    fn repeated_create_focuses_the_existing_window() {
        assert_eq!(
            on_create_request(SlotState::Live),
            CreateAction::FocusExisting
        );
    }

    #[test]
    fn create_during_create_is_dropped() {
        // A request delivered while the first window is still
        // bootstrapping must not start a second one.
        assert_eq!(on_create_request(SlotState::Creating), CreateAction::Ignore);
    }

    #[test]
    fn toggle_during_create_is_dropped() {
        assert_eq!(on_toggle_request(SlotState::Creating), ToggleAction::Ignore);
    }

    #[test]
    fn toggle_on_a_live_window_flips_visibility() {
        assert_eq!(
            on_toggle_request(SlotState::Live),
            ToggleAction::FlipVisibility
        );
    }
}
