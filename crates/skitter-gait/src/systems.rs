//! Bevy systems driving the gait of every creature.
//!
//! ```text
//! Sense:  sense_ground        probes  -> home anchors
//! Step:   step_gaits          Time    -> coordinator tick
//!         write_foot_targets  feet    -> FootTarget transforms
//! Lift:   lift_bodies         anchors -> body height
//! ```

use bevy::prelude::*;
use skitter_core::convert::{isometry_from_global, write_isometry};

use crate::components::{BodyLift, FootTarget, Gait, GroundQuery, LegProbe};
use crate::ground::attach_to_ground;

// ---------------------------------------------------------------------------
// sense_ground
// ---------------------------------------------------------------------------

/// Re-anchor every leg's home on the ground below its probe entity.
///
/// The anchor rotation always follows the probe entity's world rotation. The
/// position only moves on a hit.
#[allow(clippy::needless_pass_by_value)]
pub fn sense_ground(
    ground: Res<GroundQuery>,
    probes: Query<(Entity, &LegProbe, &GlobalTransform)>,
    mut gaits: Query<&mut Gait>,
) {
    for (entity, probe, global) in &probes {
        let Ok(mut gait) = gaits.get_mut(probe.creature) else {
            warn!(
                "leg probe {entity} points at {} which has no Gait",
                probe.creature
            );
            continue;
        };
        let origin = isometry_from_global(global);
        let leg = gait.coordinator.leg_mut(probe.leg);
        leg.set_home_rotation(origin.rotation);
        attach_to_ground(
            leg,
            ground.probe.as_ref(),
            &origin.translation.vector,
            ground.max_distance,
        );
    }
}

// ---------------------------------------------------------------------------
// step_gaits
// ---------------------------------------------------------------------------

/// Tick every gait coordinator by the frame delta.
#[allow(clippy::needless_pass_by_value)]
pub fn step_gaits(time: Res<Time>, mut gaits: Query<&mut Gait>) {
    let dt = time.delta_secs_f64();
    for mut gait in &mut gaits {
        gait.last_tick = gait.coordinator.tick(dt);
    }
}

// ---------------------------------------------------------------------------
// write_foot_targets
// ---------------------------------------------------------------------------

/// Copy each leg's commanded foot pose onto its [`FootTarget`] entity.
#[allow(clippy::needless_pass_by_value)]
pub fn write_foot_targets(
    gaits: Query<&Gait>,
    mut targets: Query<(Entity, &FootTarget, &mut Transform)>,
) {
    for (entity, target, mut transform) in &mut targets {
        let Ok(gait) = gaits.get(target.creature) else {
            warn!(
                "foot target {entity} points at {} which has no Gait",
                target.creature
            );
            continue;
        };
        write_isometry(&mut transform, gait.coordinator.leg(target.leg).foot());
    }
}

// ---------------------------------------------------------------------------
// lift_bodies
// ---------------------------------------------------------------------------

/// Run the ride-height controller of every body that has one.
///
/// The ground reference is the mean height of the four home anchors.
#[allow(clippy::needless_pass_by_value, clippy::cast_possible_truncation)]
pub fn lift_bodies(time: Res<Time>, mut bodies: Query<(&Gait, &mut BodyLift, &mut Transform)>) {
    let dt = time.delta_secs_f64();
    for (gait, mut lift, mut transform) in &mut bodies {
        let ground_y = gait.coordinator.mean_home_height();
        if let Some(y) = lift.0.update(f64::from(transform.translation.y), ground_y, dt) {
            transform.translation.y = y as f32;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
