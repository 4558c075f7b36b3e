//! Hit resolution against a single enemy.

use rampart_core::components::{Health, StatusEffects};
use rampart_core::constants::{MIN_ARMORED_DAMAGE, SHIELD_DAMAGE_FACTOR};
use rampart_core::enums::Resolution;

/// Effective damage of a raw hit after armor and shield.
///
/// Armored hits never drop below `MIN_ARMORED_DAMAGE`; the shield reduction
/// applies after the armor floor.
pub fn effective_damage(amount: f64, armor: f64, ignore_armor: bool, shielded: bool) -> f64 {
    let mut dealt = if ignore_armor {
        amount
    } else {
        (amount - armor).max(MIN_ARMORED_DAMAGE)
    };
    if shielded {
        dealt *= SHIELD_DAMAGE_FACTOR;
    }
    dealt
}

/// Apply a hit. Returns the damage actually dealt, or `None` when the enemy
/// is already resolved or currently invisible.
///
/// HP is clamped at zero and the enemy is marked `DiedInField` on a lethal
/// hit. Reward payout happens later, during reconciliation.
pub fn take_damage(
    health: &mut Health,
    resolution: &mut Resolution,
    status: &StatusEffects,
    armor: f64,
    amount: f64,
    ignore_armor: bool,
) -> Option<f64> {
    if *resolution != Resolution::Alive || status.is_invisible() {
        return None;
    }
    let dealt = effective_damage(amount, armor, ignore_armor, status.shielded);
    health.hp -= dealt;
    if health.hp <= 0.0 {
        health.hp = 0.0;
        *resolution = Resolution::DiedInField;
    }
    Some(dealt)
}

/// Restore HP up to max. Resolved enemies are never healed.
pub fn heal(health: &mut Health, resolution: Resolution, amount: f64) {
    if resolution == Resolution::Alive {
        health.hp = (health.hp + amount).min(health.max);
    }
}
