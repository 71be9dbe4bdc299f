//! Screen state for the kiosk session.

use crate::ui::mvi::UiState;

/// Which screen the visitor sees, with the data that screen needs.
///
/// The revealed number and the embedded URL live inside the variants, so a
/// number can only exist once a spin has started and an URL only while an
/// external page is shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionScreen {
    /// Attract screen, waiting for a tap.
    #[default]
    Idle,

    /// Spin in progress; `number` is the currently displayed draw and is
    /// replaced on every spin tick until the final draw is committed.
    Revealing { number: u32 },

    /// Final number settled, action buttons visible.
    Revealed { number: u32 },

    /// Events grid shown; the revealed number is kept for the way back.
    Browsing { number: u32 },

    /// External sign-up page shown as a link/QR panel.
    Embedded { number: u32, url: String },
}

impl UiState for SessionScreen {}

impl SessionScreen {
    /// True while the spin animation is running.
    pub fn is_spinning(&self) -> bool {
        matches!(self, Self::Revealing { .. })
    }

    /// The number currently on screen, if any.
    pub fn number(&self) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Revealing { number }
            | Self::Revealed { number }
            | Self::Browsing { number }
            | Self::Embedded { number, .. } => Some(*number),
        }
    }

    /// The embedded page URL, if one is shown.
    pub fn embedded_url(&self) -> Option<&str> {
        match self {
            Self::Embedded { url, .. } => Some(url),
            _ => None,
        }
    }
}
