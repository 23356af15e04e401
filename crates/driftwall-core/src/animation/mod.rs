//! Reference animations for the five worker slots
//!
//! | Slot | Animation   | Talks to the register                                  |
//! |------|-------------|--------------------------------------------------------|
//! | 1    | fountain    | never                                                  |
//! | 2    | snow        | writes command 1 when its field escapes the screen     |
//! | 3    | galaxy      | notifies on command 2                                  |
//! | 4    | purge       | fills while command 1 is visible                       |
//! | 5    | lightning   | never                                                  |
//!
//! Slot 6 exists only as a command value and has no animation.

mod fountain;
mod galaxy;
mod lightning;
mod particles;
mod purge;
mod snow;

use std::sync::Arc;

pub use fountain::Fountain;
pub use galaxy::Galaxy;
pub use lightning::Lightning;
pub use purge::Purge;
pub use snow::Snow;

use crate::types::SlotId;
use crate::worker::Animation;

/// Builds a fresh animation for a slot and frame size
///
/// Returns `None` for slots without an animation. Called on every launch,
/// so restarted slots always begin from a clean state.
pub type AnimationFactory = Arc<dyn Fn(SlotId, usize, usize) -> Option<Box<dyn Animation>> + Send + Sync>;

/// Factory wired to the built-in animations
pub fn reference_factory() -> AnimationFactory {
    Arc::new(build_reference)
}

pub fn build_reference(slot: SlotId, width: usize, height: usize) -> Option<Box<dyn Animation>> {
    let animation: Box<dyn Animation> = match slot {
        SlotId::FOUNTAIN => Box::new(Fountain::new()),
        SlotId::SNOW => Box::new(Snow::new()),
        SlotId::GALAXY => Box::new(Galaxy::new()),
        SlotId::PURGE => Box::new(Purge::new()),
        SlotId::LIGHTNING => Box::new(Lightning::new(width, height)),
        _ => return None,
    };
    Some(animation)
}
