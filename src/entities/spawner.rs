use rand::Rng;
use rand::seq::IndexedRandom;

use super::enemy::Enemy;
use crate::config::GameConfig;

/// Where a new enemy enters the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub slot: usize,
    pub x: f64,
    pub y: f64,
}

/// Picks free horizontal slots for new enemies.
///
/// The playfield is split into `slot_count` columns of `slot_width` pixels.
/// A slot is taken when some live enemy's x equals the slot's x exactly;
/// overlapping-but-unequal positions do not count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawner {
    pub slot_count: usize,
    pub slot_width: f64,
    /// Enemies start fully above the playfield and slide in
    pub spawn_y: f64,
}

impl Spawner {
    pub fn new(slot_count: usize, slot_width: f64, spawn_y: f64) -> Self {
        Self {
            slot_count,
            slot_width,
            spawn_y,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.slot_count(), config.enemy_width, -config.enemy_height)
    }

    pub fn slot_x(&self, slot: usize) -> f64 {
        slot as f64 * self.slot_width
    }

    pub fn is_taken(&self, slot: usize, enemies: &[Enemy]) -> bool {
        let x = self.slot_x(slot);
        enemies.iter().any(|enemy| enemy.entity.x == x)
    }

    pub fn free_slots(&self, enemies: &[Enemy]) -> Vec<usize> {
        (0..self.slot_count)
            .filter(|&slot| !self.is_taken(slot, enemies))
            .collect()
    }

    /// Pick a random free slot, or `None` when every slot is occupied
    pub fn next_slot<R: Rng + ?Sized>(&self, enemies: &[Enemy], rng: &mut R) -> Option<SpawnPoint> {
        let free = self.free_slots(enemies);
        let &slot = free.choose(rng)?;
        Some(SpawnPoint {
            slot,
            x: self.slot_x(slot),
            y: self.spawn_y,
        })
    }
}
