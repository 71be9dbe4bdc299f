//! Reducer for the session state machine.

use crate::content::ButtonTarget;
use crate::ui::mvi::Reducer;

use super::intent::SessionIntent;
use super::state::SessionScreen;

/// Pure transition function for the kiosk session.
///
/// Intents that do not apply in the current screen are ignored, so a stale
/// spin tick arriving after a commit (or after an idle reset) cannot move
/// the session backwards.
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionScreen;
    type Intent = SessionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SessionIntent::Tap { number } => match state {
                SessionScreen::Idle => SessionScreen::Revealing { number },
                other => other,
            },

            SessionIntent::SpinTick { number } => match state {
                SessionScreen::Revealing { .. } => SessionScreen::Revealing { number },
                other => other,
            },

            SessionIntent::Commit { number } => match state {
                SessionScreen::Revealing { .. } => SessionScreen::Revealed { number },
                other => other,
            },

            SessionIntent::Select { target } => match state {
                SessionScreen::Revealed { number } => match target {
                    ButtonTarget::Events => SessionScreen::Browsing { number },
                    ButtonTarget::Link(url) => SessionScreen::Embedded { number, url },
                },
                other => other,
            },

            SessionIntent::Back => match state {
                SessionScreen::Browsing { number } => SessionScreen::Revealed { number },
                SessionScreen::Embedded { number, .. } => SessionScreen::Revealed { number },
                other => other,
            },

            SessionIntent::IdleReset => SessionScreen::Idle,
        }
    }
}
