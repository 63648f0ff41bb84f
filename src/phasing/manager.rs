//! Phasing domain: collision suppression bookkeeping for dashes.
//!
//! The manager only decides *what* to suppress and remembers it; the
//! actual physics world is reached through [`CollisionToggle`], so the
//! begin/end pairing can be exercised without a running app.

use bevy::prelude::*;

/// The player's view of the physics world's collision filtering.
pub trait CollisionToggle {
    /// Whether the player currently collides with the given layer bit.
    fn layer_enabled(&self, layer_bit: u32) -> bool;
    fn set_layer_enabled(&mut self, layer_bit: u32, enabled: bool);
    /// Whether the player currently collides with a specific collider.
    fn pair_enabled(&self, other: Entity) -> bool;
    fn set_pair_enabled(&mut self, other: Entity, enabled: bool);
}

/// A collider considered for pairwise suppression.
#[derive(Debug, Clone, Copy)]
pub struct PhaseCandidate {
    pub entity: Entity,
    /// Layer memberships of the collider.
    pub layers: u32,
    pub is_sensor: bool,
    /// Part of a protected object's hierarchy.
    pub protected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PhaseRequest {
    pub player: Option<Entity>,
    pub phase_bits: u32,
    pub ground_bits: u32,
    /// Layers used by protected objects and their descendants.
    pub protected_bits: u32,
    pub candidates: Vec<PhaseCandidate>,
}

/// Layers suppressed wholesale: the phase layers minus ground and any
/// layer a protected object lives on.
pub fn effective_phase_bits(phase_bits: u32, ground_bits: u32, protected_bits: u32) -> u32 {
    phase_bits & !ground_bits & !protected_bits
}

impl PhaseRequest {
    pub fn effective_bits(&self) -> u32 {
        effective_phase_bits(self.phase_bits, self.ground_bits, self.protected_bits)
    }

    /// Colliders that get individually suppressed.
    pub fn phased_colliders(&self) -> impl Iterator<Item = Entity> + '_ {
        self.candidates
            .iter()
            .filter(|c| {
                !c.is_sensor
                    && !c.protected
                    && c.layers & self.ground_bits == 0
                    && Some(c.entity) != self.player
            })
            .map(|c| c.entity)
    }
}

/// What a phase actually changed, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseSummary {
    pub layers: u32,
    pub pairs: usize,
}

/// Remembers every layer and collider pair disabled for the current dash
/// so that exactly those are restored when it ends.
#[derive(Component, Debug, Default)]
pub struct DashPhaseManager {
    active: bool,
    disabled_layers: u32,
    ignored_pairs: Vec<Entity>,
}

impl DashPhaseManager {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn disabled_layers(&self) -> u32 {
        self.disabled_layers
    }

    pub fn ignored_pairs(&self) -> &[Entity] {
        &self.ignored_pairs
    }

    /// Suppress collisions for a dash. Anything already suppressed before
    /// the call is left alone and will not be re-enabled by `end_phase`.
    pub fn begin_phase<T: CollisionToggle>(
        &mut self,
        toggle: &mut T,
        request: &PhaseRequest,
    ) -> PhaseSummary {
        if self.active {
            self.end_phase(toggle);
        }
        self.active = true;

        let effective = request.effective_bits();
        for bit in (0..u32::BITS).map(|i| 1u32 << i) {
            if effective & bit != 0 && toggle.layer_enabled(bit) {
                toggle.set_layer_enabled(bit, false);
                self.disabled_layers |= bit;
            }
        }

        for entity in request.phased_colliders() {
            if toggle.pair_enabled(entity) {
                toggle.set_pair_enabled(entity, false);
                self.ignored_pairs.push(entity);
            }
        }

        PhaseSummary {
            layers: self.disabled_layers,
            pairs: self.ignored_pairs.len(),
        }
    }

    /// Restore everything the last `begin_phase` disabled. No-op when no
    /// phase is active.
    pub fn end_phase<T: CollisionToggle>(&mut self, toggle: &mut T) -> PhaseSummary {
        if !self.active {
            return PhaseSummary::default();
        }

        let summary = PhaseSummary {
            layers: self.disabled_layers,
            pairs: self.ignored_pairs.len(),
        };

        for bit in (0..u32::BITS).map(|i| 1u32 << i) {
            if self.disabled_layers & bit != 0 {
                toggle.set_layer_enabled(bit, true);
            }
        }
        for entity in self.ignored_pairs.drain(..) {
            toggle.set_pair_enabled(entity, true);
        }

        self.disabled_layers = 0;
        self.active = false;
        summary
    }
}
