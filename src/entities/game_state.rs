/// Where the player's invincibility timer currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvincibilityPhase {
    /// Vulnerable, counter at max
    Off,
    /// Invincible and counting down
    Counting,
    /// Invincible with the counter spent; clears on the next timer step
    Expiring,
}

/// Score, lives and timers owned by the game loop
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub lives: u32,
    pub score: u32,
    pub difficulty_level: u32,
    pub paused: bool,
    pub invincible: bool,
    pub invincible_counter: u32,
    /// Counter value while vulnerable
    pub invincible_max: u32,
}

impl GameState {
    pub fn new(lives: u32, invincible_max: u32) -> Self {
        Self {
            lives,
            score: 0,
            difficulty_level: 1,
            paused: false,
            invincible: false,
            invincible_counter: invincible_max,
            invincible_max,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    /// Damage can only land with the timer fully reset
    pub fn is_vulnerable(&self) -> bool {
        !self.invincible && self.invincible_counter == self.invincible_max
    }

    pub fn invincibility_phase(&self) -> InvincibilityPhase {
        match (self.invincible, self.invincible_counter) {
            (true, 0) => InvincibilityPhase::Expiring,
            (true, counter) if counter < self.invincible_max => InvincibilityPhase::Counting,
            _ => InvincibilityPhase::Off,
        }
    }

    /// Take one life and start the invincible window.
    ///
    /// Returns false (and changes nothing) if the player is not vulnerable.
    pub fn apply_hit(&mut self) -> bool {
        if !self.is_vulnerable() || self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        self.invincible = true;
        // the hit itself consumes the first frame of the window
        self.invincible_counter -= 1;
        true
    }

    pub fn recompute_difficulty(&mut self, points_per_level: u32) -> u32 {
        self.difficulty_level = 1 + self.score / points_per_level;
        self.difficulty_level
    }
}
