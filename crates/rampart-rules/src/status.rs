//! Per-tick status effects: burn, slow, invisibility and the heal pulse clock.
//!
//! Movement and heal application happen in the caller; this module only
//! advances timers and reports what they produced.

use rampart_core::components::{Burn, Health, PathFollower, Slow, StatusEffects};
use rampart_core::constants::HEAL_PULSE_SECS;
use rampart_core::enums::{EnemySpecial, Resolution};

/// Result of advancing one enemy's status timers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTick {
    /// Burn damage killed the enemy this tick. The caller must skip the rest
    /// of the enemy's update.
    pub died: bool,
    /// The enemy's heal pulse fired this tick.
    pub heal_pulse: bool,
    /// Invisibility flipped this tick.
    pub visibility_changed: bool,
}

/// Advance burn, slow, invisibility and heal timers by `dt` seconds.
///
/// Burn ticks first and ignores armor, shield and invisibility. A lethal
/// burn tick marks the enemy `DiedInField` and leaves the other timers
/// untouched.
pub fn tick_status(
    health: &mut Health,
    resolution: &mut Resolution,
    status: &mut StatusEffects,
    follower: &mut PathFollower,
    special: EnemySpecial,
    dt: f64,
) -> StatusTick {
    let mut tick = StatusTick::default();
    if *resolution != Resolution::Alive {
        return tick;
    }

    if status.burn.remaining > 0.0 {
        status.burn.remaining -= dt;
        health.hp -= status.burn.dps * dt;
        if health.hp <= 0.0 {
            health.hp = 0.0;
            *resolution = Resolution::DiedInField;
            tick.died = true;
            return tick;
        }
    }

    if status.slow.remaining > 0.0 {
        status.slow.remaining -= dt;
        follower.speed = follower.base_speed * (1.0 - status.slow.amount);
    } else {
        status.slow.amount = 0.0;
        follower.speed = follower.base_speed;
    }

    if let (Some(cycle), EnemySpecial::Invisible { interval, duration }) =
        (status.invisibility.as_mut(), special)
    {
        cycle.timer -= dt;
        if cycle.timer <= 0.0 {
            cycle.invisible = !cycle.invisible;
            cycle.timer = if cycle.invisible { duration } else { interval };
            tick.visibility_changed = true;
        }
    }

    if matches!(special, EnemySpecial::Heal { .. }) {
        status.heal_timer += dt;
        if status.heal_timer >= HEAL_PULSE_SECS {
            status.heal_timer -= HEAL_PULSE_SECS;
            tick.heal_pulse = true;
        }
    }

    tick
}

/// Apply a slow. A new slow replaces the current one only when it is
/// stronger or would last longer than what remains.
pub fn apply_slow(status: &mut StatusEffects, amount: f64, duration: f64) -> bool {
    let current = status.slow;
    if amount > current.amount || duration > current.remaining {
        status.slow = Slow {
            amount,
            remaining: duration,
        };
        true
    } else {
        false
    }
}

/// Apply a burn. Burns always overwrite the current one.
pub fn apply_burn(status: &mut StatusEffects, dps: f64, duration: f64) {
    status.burn = Burn {
        dps,
        remaining: duration,
    };
}
