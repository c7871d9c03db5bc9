//! # Actor Stats Module
//!
//! The RPG stat block: base attributes, current/max health and mana, and
//! elemental resistances. Out-of-range mutations are silently clamped,
//! never rejected; gameplay values favor robustness over strictness.
//!
//! Mutations that observers care about return [`StatNotification`] values
//! instead of firing signals, so the caller decides what to do with them.

use serde::{Deserialize, Serialize};

/// Notification emitted by a stat mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatNotification {
    /// Health changed to a new (clamped) value.
    HealthChanged { from: u32, to: u32 },
    /// Health just reached zero. Fires at most once per depletion; the
    /// behavior machine turns it into the Dying transition.
    HealthDepleted,
    /// Mana changed to a new (clamped) value.
    ManaChanged { from: u32, to: u32 },
}

/// RPG stat block for an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    level: u32,
    kill_experience: u32,
    strength: u32,
    magic: u32,
    dexterity: u32,
    vitality: u32,
    max_health: u32,
    health: u32,
    max_mana: u32,
    mana: u32,
    magic_resistance: f64,
    fire_resistance: f64,
    lightning_resistance: f64,
}

impl StatBlock {
    /// A level-1 stat block with the given health and mana pools, starting
    /// full.
    pub fn new(max_health: u32, max_mana: u32) -> Self {
        Self {
            level: 1,
            kill_experience: 0,
            strength: 0,
            magic: 0,
            dexterity: 0,
            vitality: 0,
            max_health,
            health: max_health,
            max_mana,
            mana: max_mana,
            magic_resistance: 0.0,
            fire_resistance: 0.0,
            lightning_resistance: 0.0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    /// Experience awarded to whoever kills this actor.
    pub fn kill_experience(&self) -> u32 {
        self.kill_experience
    }

    pub fn set_kill_experience(&mut self, experience: u32) {
        self.kill_experience = experience;
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    /// Adjusts strength by a possibly negative delta, clamping at zero.
    pub fn increment_strength(&mut self, delta: i32) {
        self.strength = clamped_add(self.strength, delta);
    }

    pub fn magic(&self) -> u32 {
        self.magic
    }

    pub fn increment_magic(&mut self, delta: i32) {
        self.magic = clamped_add(self.magic, delta);
    }

    pub fn dexterity(&self) -> u32 {
        self.dexterity
    }

    pub fn increment_dexterity(&mut self, delta: i32) {
        self.dexterity = clamped_add(self.dexterity, delta);
    }

    pub fn vitality(&self) -> u32 {
        self.vitality
    }

    pub fn increment_vitality(&mut self, delta: i32) {
        self.vitality = clamped_add(self.vitality, delta);
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    /// Sets current health, clamping into `[0, max_health]`.
    ///
    /// Returns a change notification when the stored value actually
    /// changed, plus a depletion notification when it just reached zero.
    pub fn set_health(&mut self, health: i64) -> Vec<StatNotification> {
        let clamped = health.clamp(0, self.max_health as i64) as u32;
        if clamped == self.health {
            return Vec::new();
        }
        let from = self.health;
        self.health = clamped;
        let mut notifications = vec![StatNotification::HealthChanged { from, to: clamped }];
        if clamped == 0 {
            notifications.push(StatNotification::HealthDepleted);
        }
        notifications
    }

    pub fn max_mana(&self) -> u32 {
        self.max_mana
    }

    pub fn mana(&self) -> u32 {
        self.mana
    }

    /// Sets current mana, clamping into `[0, max_mana]`. Returns a change
    /// notification when the stored value actually changed.
    pub fn set_mana(&mut self, mana: i64) -> Vec<StatNotification> {
        let clamped = mana.clamp(0, self.max_mana as i64) as u32;
        if clamped == self.mana {
            return Vec::new();
        }
        let from = self.mana;
        self.mana = clamped;
        vec![StatNotification::ManaChanged { from, to: clamped }]
    }

    pub fn magic_resistance(&self) -> f64 {
        self.magic_resistance
    }

    /// Sets the magic resistance fraction, clamped into `[0, 1]`.
    pub fn set_magic_resistance(&mut self, fraction: f64) {
        self.magic_resistance = fraction.clamp(0.0, 1.0);
    }

    pub fn fire_resistance(&self) -> f64 {
        self.fire_resistance
    }

    pub fn set_fire_resistance(&mut self, fraction: f64) {
        self.fire_resistance = fraction.clamp(0.0, 1.0);
    }

    pub fn lightning_resistance(&self) -> f64 {
        self.lightning_resistance
    }

    pub fn set_lightning_resistance(&mut self, fraction: f64) {
        self.lightning_resistance = fraction.clamp(0.0, 1.0);
    }
}

/// Unsigned add of a signed delta, clamping at zero.
fn clamped_add(base: u32, delta: i32) -> u32 {
    (base as i64 + delta as i64).max(0).min(u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_health_clamps_both_ends() {
        let mut stats = StatBlock::new(100, 50);
        stats.set_health(250);
        assert_eq!(stats.health(), 100);
        stats.set_health(-40);
        assert_eq!(stats.health(), 0);
    }

    #[test]
    fn test_health_change_notifications_fire_once() {
        let mut stats = StatBlock::new(100, 50);
        let n = stats.set_health(60);
        assert_eq!(
            n,
            vec![StatNotification::HealthChanged { from: 100, to: 60 }]
        );
        // Same value again: silent.
        assert!(stats.set_health(60).is_empty());
    }

    #[test]
    fn test_depletion_fires_exactly_once() {
        let mut stats = StatBlock::new(100, 50);
        let n = stats.set_health(0);
        assert_eq!(
            n,
            vec![
                StatNotification::HealthChanged { from: 100, to: 0 },
                StatNotification::HealthDepleted
            ]
        );
        // Re-depleting a depleted actor is silent.
        assert!(stats.set_health(-5).is_empty());
    }

    #[test]
    fn test_base_stats_floor_at_zero() {
        let mut stats = StatBlock::new(100, 50);
        stats.increment_strength(10);
        stats.increment_strength(-25);
        assert_eq!(stats.strength(), 0);
        stats.increment_vitality(3);
        assert_eq!(stats.vitality(), 3);
    }

    #[test]
    fn test_resistances_clamp_to_unit_interval() {
        let mut stats = StatBlock::new(100, 50);
        stats.set_fire_resistance(1.7);
        assert_eq!(stats.fire_resistance(), 1.0);
        stats.set_magic_resistance(-0.3);
        assert_eq!(stats.magic_resistance(), 0.0);
        stats.set_lightning_resistance(0.45);
        assert_eq!(stats.lightning_resistance(), 0.45);
    }

    proptest! {
        #[test]
        fn prop_health_always_in_range(values in proptest::collection::vec(-500i64..500, 1..20)) {
            let mut stats = StatBlock::new(100, 50);
            for v in values {
                stats.set_health(v);
                prop_assert!(stats.health() <= stats.max_health());
            }
        }

        #[test]
        fn prop_mana_always_in_range(values in proptest::collection::vec(-500i64..500, 1..20)) {
            let mut stats = StatBlock::new(100, 50);
            for v in values {
                stats.set_mana(v);
                prop_assert!(stats.mana() <= stats.max_mana());
            }
        }
    }
}
