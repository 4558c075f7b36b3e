//! Target selection for towers and chain lightning.
//!
//! Candidates are supplied in spawn order. Every comparison is strict, so on
//! a tie the earliest candidate wins and selection is deterministic.

use rampart_core::enums::TargetPriority;
use rampart_core::types::Position;

/// An enemy as seen by a tower. Callers filter out resolved and invisible
/// enemies before building the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCandidate<K> {
    pub key: K,
    pub position: Position,
    pub hp: f64,
    pub waypoint_index: usize,
}

/// Pick a target within `range` of `origin` according to `priority`.
pub fn select_target<K: Copy>(
    priority: TargetPriority,
    origin: &Position,
    range: f64,
    candidates: &[TargetCandidate<K>],
) -> Option<K> {
    let mut best: Option<(&TargetCandidate<K>, f64)> = None;

    for candidate in candidates {
        let dist = origin.distance_to(&candidate.position);
        if dist > range {
            continue;
        }
        let better = match best {
            None => true,
            Some((current, current_dist)) => match priority {
                TargetPriority::First => candidate.waypoint_index > current.waypoint_index,
                TargetPriority::Closest => dist < current_dist,
                TargetPriority::Strongest => candidate.hp > current.hp,
                TargetPriority::Weakest => candidate.hp < current.hp,
            },
        };
        if better {
            best = Some((candidate, dist));
        }
    }

    best.map(|(c, _)| c.key)
}

/// Next chain jump: the nearest candidate within `chain_range` of `from`
/// that is not in `already_hit`.
pub fn nearest_chain_candidate<K: Copy + PartialEq>(
    from: &Position,
    chain_range: f64,
    already_hit: &[K],
    candidates: &[TargetCandidate<K>],
) -> Option<K> {
    let mut closest: Option<(K, f64)> = None;
    for candidate in candidates {
        if already_hit.contains(&candidate.key) {
            continue;
        }
        let dist = from.distance_to(&candidate.position);
        if dist > chain_range {
            continue;
        }
        if closest.map_or(true, |(_, best)| dist < best) {
            closest = Some((candidate.key, dist));
        }
    }
    closest.map(|(key, _)| key)
}

/// Keys of every candidate within `radius` of `center`, in input order.
pub fn within_radius<K: Copy>(
    center: &Position,
    radius: f64,
    candidates: &[TargetCandidate<K>],
) -> Vec<K> {
    candidates
        .iter()
        .filter(|c| center.distance_to(&c.position) <= radius)
        .map(|c| c.key)
        .collect()
}
