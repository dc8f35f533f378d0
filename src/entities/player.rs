use super::entity::Entity;

/// The player sprite, pinned to the bottom of the playfield.
///
/// Moves horizontally one sprite width at a time so it always lines up with
/// an enemy slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub entity: Entity,
    /// Cosmetic blink while invincible
    pub flicker: bool,
}

impl Player {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            entity: Entity::new(x, y, width, height),
            flicker: false,
        }
    }

    pub fn move_left(&mut self) {
        self.entity.x = (self.entity.x - self.entity.width).max(0.0);
    }

    pub fn move_right(&mut self, game_width: f64) {
        let max_x = game_width - self.entity.width;
        if self.entity.x + self.entity.width <= max_x {
            self.entity.x += self.entity.width;
        }
    }

    pub fn toggle_flicker(&mut self) {
        self.flicker = !self.flicker;
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        vec![" _____ ", "(=====)", "(_____)"]
    }
}
