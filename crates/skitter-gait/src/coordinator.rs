//! Diagonal-pair gait coordinator.
//!
//! Four legs, two diagonal pairs. At any time exactly one pair is active and
//! only the active pair may start steps. The turn passes to the other pair
//! once both legs of the active pair are planted, so the swing pattern is
//! always `FL+BR, FR+BL, FL+BR, ...`.
//!
//! Per tick:
//! 1. advance every in-flight step;
//! 2. after the first tick, if the active pair is idle, switch pairs;
//! 3. run the trigger check on both legs of the active pair.

use bevy::log::debug;
use nalgebra::{Isometry3, Vector3};
use skitter_core::config::StepConfig;
use skitter_core::error::RigError;
use skitter_core::types::{DiagonalPair, LegId};

use crate::ground::{GroundProbe, attach_to_ground};
use crate::stepper::Leg;

/// What happened during one coordinator tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GaitTick {
    /// Pair holding the turn at the end of the tick.
    pub active: DiagonalPair,
    /// `true` if the turn changed hands this tick.
    pub switched: bool,
    /// Legs that started a step this tick.
    pub started: Vec<LegId>,
    /// Legs that landed this tick.
    pub landed: Vec<LegId>,
}

/// Owns the four legs of one creature and sequences their steps.
#[derive(Debug, Clone)]
pub struct GaitCoordinator {
    legs: [Leg; 4],
    active: DiagonalPair,
    ticked: bool,
    switches: u64,
}

impl GaitCoordinator {
    /// Build from exactly one leg per [`LegId`], in any order.
    pub fn from_legs(legs: impl IntoIterator<Item = Leg>) -> Result<Self, RigError> {
        let mut slots: [Option<Leg>; 4] = [None, None, None, None];
        for leg in legs {
            let slot = &mut slots[leg.id().index()];
            if slot.is_some() {
                return Err(RigError::DuplicateLeg(leg.id()));
            }
            *slot = Some(leg);
        }

        let [fl, fr, bl, br] = slots;
        let require = |slot: Option<Leg>, id: LegId| slot.ok_or(RigError::MissingLeg(id));
        Ok(Self {
            legs: [
                require(fl, LegId::FrontLeft)?,
                require(fr, LegId::FrontRight)?,
                require(bl, LegId::BackLeft)?,
                require(br, LegId::BackRight)?,
            ],
            active: DiagonalPair::default(),
            ticked: false,
            switches: 0,
        })
    }

    /// Four legs sharing one step config, feet planted at `feet` (indexed by
    /// [`LegId::index`]) with home anchors at the same poses.
    #[must_use]
    pub fn quadruped(config: StepConfig, feet: [Isometry3<f64>; 4]) -> Self {
        Self {
            legs: LegId::ALL.map(|id| Leg::new(id, config, feet[id.index()])),
            active: DiagonalPair::default(),
            ticked: false,
            switches: 0,
        }
    }

    /// Advance the gait by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> GaitTick {
        let mut report = GaitTick::default();

        for leg in &mut self.legs {
            if leg.advance(dt) {
                report.landed.push(leg.id());
            }
        }

        if self.ticked && self.is_pair_idle(self.active) {
            self.active = self.active.other();
            self.switches += 1;
            report.switched = true;
            debug!("gait turn passes to {}", self.active);
        }
        self.ticked = true;

        for id in self.active.legs() {
            let leg = &mut self.legs[id.index()];
            if leg.try_step(dt) {
                report.started.push(id);
                // A dt longer than the step lands it on the spot.
                if !leg.is_moving() {
                    report.landed.push(id);
                }
            }
        }

        report.active = self.active;
        report
    }

    /// Refresh every home anchor from a downward probe.
    ///
    /// `origins` are world-space probe origins indexed by [`LegId::index`].
    /// Legs whose probe misses keep their previous anchor. Returns the number
    /// of hits.
    pub fn attach_all(
        &mut self,
        probe: &dyn GroundProbe,
        origins: &[Vector3<f64>; 4],
        max_distance: f64,
    ) -> usize {
        let mut hits = 0;
        for (leg, origin) in self.legs.iter_mut().zip(origins) {
            if attach_to_ground(leg, probe, origin, max_distance) {
                hits += 1;
            }
        }
        hits
    }

    #[must_use]
    pub const fn leg(&self, id: LegId) -> &Leg {
        &self.legs[id.index()]
    }

    pub fn leg_mut(&mut self, id: LegId) -> &mut Leg {
        &mut self.legs[id.index()]
    }

    #[must_use]
    pub const fn legs(&self) -> &[Leg; 4] {
        &self.legs
    }

    #[must_use]
    pub const fn active_pair(&self) -> DiagonalPair {
        self.active
    }

    /// How many times the turn has changed hands.
    #[must_use]
    pub const fn switches(&self) -> u64 {
        self.switches
    }

    /// `true` if neither leg of `pair` is mid-step.
    #[must_use]
    pub fn is_pair_idle(&self, pair: DiagonalPair) -> bool {
        pair.legs().iter().all(|id| !self.leg(*id).is_moving())
    }

    /// Legs currently mid-step.
    pub fn moving_legs(&self) -> impl Iterator<Item = LegId> + '_ {
        self.legs.iter().filter(|leg| leg.is_moving()).map(Leg::id)
    }

    /// Mean height of the four home anchors.
    #[must_use]
    pub fn mean_home_height(&self) -> f64 {
        self.legs.iter().map(|leg| leg.home().translation.y).sum::<f64>() / 4.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
