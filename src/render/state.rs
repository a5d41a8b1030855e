//! View state and its update function.
//!
//! Navigation and size changes are expressed as Commands applied through a
//! single update function returning Effects, so every transition is unit
//! testable without a terminal or a PDF engine.

use crate::scale::SizeControl;

use super::request::RenderParams;

/// Session state driving the gallery: the 1-indexed page cursor and the
/// user's size control.
#[derive(Clone, Debug)]
pub struct ViewState {
    /// Current page, 1-indexed, in [1, page_count]
    pub current_page: u32,

    /// Total page count, fixed per loaded document (0 until load completes)
    pub page_count: u32,

    /// The user's page size control
    pub size: SizeControl,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_count: 0,
            size: SizeControl::default(),
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a `NextPage` transition is currently valid.
    #[must_use]
    pub fn can_next(&self) -> bool {
        self.current_page < self.page_count
    }

    /// Whether a `PrevPage` transition is currently valid.
    #[must_use]
    pub fn can_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Apply a command and return resulting effects. Invalid transitions
    /// (next at the last page, prev at the first) are no-ops.
    #[must_use]
    pub fn apply(&mut self, cmd: Command) -> Vec<Effect> {
        match cmd {
            Command::NextPage => {
                if self.can_next() {
                    self.current_page += 1;
                    vec![Effect::RenderCurrentPage]
                } else {
                    vec![]
                }
            }

            Command::PrevPage => {
                if self.can_prev() {
                    self.current_page -= 1;
                    vec![Effect::RenderCurrentPage]
                } else {
                    vec![]
                }
            }

            Command::SizeUp => {
                if self.size.step_up() {
                    vec![Effect::RenderCurrentPage]
                } else {
                    vec![]
                }
            }

            Command::SizeDown => {
                if self.size.step_down() {
                    vec![Effect::RenderCurrentPage]
                } else {
                    vec![]
                }
            }

            Command::SetPageCount(count) => {
                self.page_count = count;
                if count > 0 && self.current_page > count {
                    self.current_page = count;
                }
                vec![]
            }

            Command::Reload => {
                vec![Effect::InvalidateCache, Effect::ReloadDocument]
            }
        }
    }

    /// Render parameters for the current state.
    #[must_use]
    pub fn render_params(&self) -> RenderParams {
        RenderParams { size: self.size }
    }
}

/// Commands that modify view state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Move to the next page
    NextPage,
    /// Move to the previous page
    PrevPage,
    /// Increase the size control by one step
    SizeUp,
    /// Decrease the size control by one step
    SizeDown,
    /// Update the page count (on document load)
    SetPageCount(u32),
    /// Reload the document
    Reload,
}

/// Effects produced by state changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Render the gallery for the current page
    RenderCurrentPage,
    /// Invalidate the gallery cache
    InvalidateCache,
    /// Reopen the document
    ReloadDocument,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_state(pages: u32) -> ViewState {
        let mut state = ViewState::new();
        let _ = state.apply(Command::SetPageCount(pages));
        state
    }

    #[test]
    fn starts_at_page_one() {
        let state = loaded_state(5);
        assert_eq!(state.current_page, 1);
        assert!(!state.can_prev());
        assert!(state.can_next());
    }

    #[test]
    fn next_is_noop_at_last_page() {
        let mut state = loaded_state(2);
        assert_eq!(state.apply(Command::NextPage), vec![Effect::RenderCurrentPage]);
        assert_eq!(state.current_page, 2);

        assert!(state.apply(Command::NextPage).is_empty());
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn prev_is_noop_at_first_page() {
        let mut state = loaded_state(2);
        assert!(state.apply(Command::PrevPage).is_empty());
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn both_directions_enabled_in_the_middle() {
        let mut state = loaded_state(3);
        let _ = state.apply(Command::NextPage);
        assert_eq!(state.current_page, 2);
        assert!(state.can_next());
        assert!(state.can_prev());
    }

    #[test]
    fn size_steps_trigger_render_until_bound() {
        let mut state = loaded_state(1);
        assert_eq!(state.apply(Command::SizeUp), vec![Effect::RenderCurrentPage]);
        assert_eq!(state.size.value, 400);

        state.size.set(state.size.max);
        assert!(state.apply(Command::SizeUp).is_empty());
    }

    #[test]
    fn set_page_count_clamps_cursor() {
        let mut state = loaded_state(10);
        for _ in 0..7 {
            let _ = state.apply(Command::NextPage);
        }
        assert_eq!(state.current_page, 8);

        let _ = state.apply(Command::SetPageCount(3));
        assert_eq!(state.current_page, 3);
    }

    #[test]
    fn reload_invalidates_and_reopens() {
        let mut state = loaded_state(3);
        assert_eq!(
            state.apply(Command::Reload),
            vec![Effect::InvalidateCache, Effect::ReloadDocument]
        );
    }
}
