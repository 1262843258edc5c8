//! State transitions - burn, melt, decay and generator deposits
//!
//! Priority inside one solid resolution attempt:
//! contact reaction > decay > frozen block > displacement.
//! Liquids never consult these rules.

use rand::Rng;

use crate::domain::content::ElementCatalog;
use crate::elements::{ElementDef, ElementId};

/// A contact conversion and the element it leaves at the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactReaction {
    Burn(ElementId),
    Melt(ElementId),
}

impl ContactReaction {
    #[inline]
    pub fn product(self) -> ElementId {
        match self {
            ContactReaction::Burn(id) | ContactReaction::Melt(id) => id,
        }
    }
}

/// Burn wins over melt when both pairs match.
#[inline]
pub fn contact_reaction(
    mover: &ElementDef,
    target: &ElementDef,
    catalog: &ElementCatalog,
) -> Option<ContactReaction> {
    if mover.flaming && target.flammable {
        if let Some(fire) = catalog.fire() {
            return Some(ContactReaction::Burn(fire));
        }
    }
    if mover.melting && target.meltable {
        if let Some(molten) = catalog.molten() {
            return Some(ContactReaction::Melt(molten));
        }
    }
    None
}

/// 1-in-`death_chance` roll. Never fires for `death_chance == 0`.
#[inline]
pub fn roll_decay<R: Rng + ?Sized>(mover: &ElementDef, rng: &mut R) -> bool {
    mover.death_chance > 0 && rng.random_range(1..=mover.death_chance) == 1
}

/// Deposit test for a generator move: an even draw from `1..=frequency`.
/// A frequency of 1 therefore never deposits.
#[inline]
pub fn roll_deposit<R: Rng + ?Sized>(frequency: u32, rng: &mut R) -> bool {
    rng.random_range(1..=frequency.max(1)) % 2 == 0
}
