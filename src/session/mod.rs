//! The kiosk session state machine.
//!
//! Pure MVI core: [`SessionScreen`] is the state, [`SessionIntent`] the
//! input, [`SessionReducer`] the transition function. Timers, random draws
//! and analytics posts are side effects owned by the UI layer; by the time
//! an intent reaches the reducer every number has already been drawn.

mod intent;
mod reducer;
mod state;

pub use intent::SessionIntent;
pub use reducer::SessionReducer;
pub use state::SessionScreen;
