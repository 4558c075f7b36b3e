//! Path following.

use rampart_core::components::PathFollower;
use rampart_core::types::Position;

/// Move an enemy along the waypoint list at its current speed.
///
/// Reaching a waypoint snaps onto it and targets the next one; leftover
/// step distance is dropped. Returns true once the enemy has passed the
/// last waypoint.
pub fn advance_along_path(
    position: &mut Position,
    follower: &mut PathFollower,
    waypoints: &[Position],
    dt: f64,
) -> bool {
    if let Some(target) = waypoints.get(follower.waypoint_index) {
        let (next, arrived) = position.step_towards(target, follower.speed * dt);
        *position = next;
        if arrived {
            follower.waypoint_index += 1;
        }
    }
    follower.waypoint_index >= waypoints.len()
}
