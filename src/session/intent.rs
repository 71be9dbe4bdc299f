//! Intents driving the session state machine.

use crate::content::ButtonTarget;
use crate::ui::mvi::Intent;

/// Everything that can move the session between screens.
///
/// Draws are performed by the dispatcher before building the intent, so
/// the reducer stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIntent {
    /// Visitor tapped the attract screen; `number` is the first draw.
    Tap { number: u32 },

    /// Spin animation tick: replace the displayed draw.
    SpinTick { number: u32 },

    /// Spin duration elapsed: commit the final draw.
    Commit { number: u32 },

    /// Visitor selected an action button on the revealed screen.
    Select { target: ButtonTarget },

    /// Visitor-initiated return from the events grid or an embedded page.
    Back,

    /// Inactivity timeout fired: back to the attract screen from anywhere.
    IdleReset,
}

impl Intent for SessionIntent {}
