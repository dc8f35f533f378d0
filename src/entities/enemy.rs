use super::entity::Entity;

/// A falling enemy.
///
/// Enemies only ever move straight down. `base_speed` is the speed the enemy
/// was spawned with; pausing decays `speed` and resuming snaps it back.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub entity: Entity,
    /// Pixels per millisecond
    pub speed: f64,
    pub base_speed: f64,
    pub destroyed: bool,
}

impl Enemy {
    pub fn new(x: f64, y: f64, width: f64, height: f64, speed: f64) -> Self {
        Self {
            entity: Entity::new(x, y, width, height),
            speed,
            base_speed: speed,
            destroyed: false,
        }
    }

    /// Advance by `elapsed_ms` and flag the enemy once it has left the playfield
    pub fn update(&mut self, elapsed_ms: f64, game_height: f64) {
        self.entity.y += self.speed * elapsed_ms;
        self.destroyed = self.entity.bottom() > game_height;
    }

    pub fn damp(&mut self, factor: f64) {
        self.speed *= factor;
    }

    /// Snap back to spawn speed if the current speed has decayed
    pub fn restore_speed(&mut self) {
        if self.speed <= self.base_speed {
            self.speed = self.base_speed;
        }
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        vec![" /\\_/\\ ", "( o.o )", " > ^ < ", "~~~~~~~"]
    }
}
