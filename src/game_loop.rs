//! The authoritative game update cycle.
//!
//! One [`GameLoop`] exists per session. The host calls [`GameLoop::tick`]
//! with the wall-clock time since the previous tick; the loop advances the
//! enemies, keeps the population topped up, applies damage and asks the host
//! to call it again. After game-over it goes quiet for good.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::config::GameConfig;
use crate::entities::{Enemy, GameState, InvincibilityPhase, Player, Spawner};
use crate::host::{Host, Label};

pub const GAME_OVER_MESSAGE: &str = "Game over";

/// What the host should expect after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Another tick has been scheduled
    Continue,
    /// Lives ran out; nothing further will be scheduled
    GameOver,
}

pub struct GameLoop {
    config: GameConfig,
    player: Player,
    enemies: Vec<Enemy>,
    state: GameState,
    spawner: Spawner,
    rng: StdRng,
    /// Set once the game-over alert has been raised
    finished: bool,
}

impl GameLoop {
    /// Construct a new loop for one game session
    pub fn new(config: GameConfig) -> Self {
        let rng = StdRng::from_rng(&mut rand::rng());
        Self::with_rng(config, rng)
    }

    /// Same as [`GameLoop::new`] but with reproducible enemy placement and speeds
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        // Player starts in the middle slot, resting on the bottom edge
        let player_slots = (config.game_width / config.player_width).floor();
        let player_x = (player_slots / 2.0).floor() * config.player_width;
        let player_y = config.game_height - config.player_height;

        Self {
            player: Player::new(
                player_x,
                player_y,
                config.player_width,
                config.player_height,
            ),
            enemies: Vec::with_capacity(config.max_enemies),
            state: GameState::new(config.starting_lives, config.invincible_frames),
            spawner: Spawner::from_config(&config),
            rng,
            finished: false,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn is_over(&self) -> bool {
        self.finished
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.config.tick_delay_ms)
    }

    pub fn move_player_left(&mut self) {
        if !self.finished {
            self.player.move_left();
        }
    }

    pub fn move_player_right(&mut self) {
        if !self.finished {
            self.player.move_right(self.config.game_width);
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        if !self.finished {
            self.state.paused = paused;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.state.paused);
    }

    /// Advance the world by `elapsed_ms`.
    ///
    /// `None` means there is no previous tick to measure from: nothing moves,
    /// but spawning, difficulty and the invincibility timer still run.
    pub fn tick<H: Host>(&mut self, elapsed_ms: Option<f64>, host: &mut H) -> TickOutcome {
        if self.finished {
            return TickOutcome::GameOver;
        }

        self.update_enemies(elapsed_ms.unwrap_or(0.0));
        self.cull_enemies();
        self.repopulate(host);
        self.apply_pause_scaling();

        if self.death_check(host) {
            return TickOutcome::GameOver;
        }

        self.recompute_difficulty(host);
        self.tick_invincibility();

        host.schedule_after(self.tick_delay());
        TickOutcome::Continue
    }

    /// Move every enemy down and flag the ones that left the playfield
    pub fn update_enemies(&mut self, elapsed_ms: f64) {
        let elapsed_ms = elapsed_ms.max(0.0);
        for enemy in &mut self.enemies {
            enemy.update(elapsed_ms, self.config.game_height);
        }
    }

    /// Drop destroyed enemies, scoring each one as dodged. Returns how many went.
    pub fn cull_enemies(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|enemy| !enemy.destroyed);
        let dodged = before - self.enemies.len();

        if dodged > 0 {
            let points = u32::try_from(dodged)
                .unwrap_or(u32::MAX)
                .saturating_mul(self.config.points_per_dodge);
            self.state.score = self.state.score.saturating_add(points);
            debug!("culled {dodged} enemies, score {}", self.state.score);
        }
        dodged
    }

    /// Spawn enemies until the target population is reached or slots run out
    pub fn repopulate<H: Host>(&mut self, host: &mut H) {
        while self.enemies.len() < self.config.max_enemies {
            let Some(point) = self.spawner.next_slot(&self.enemies, &mut self.rng) else {
                // every slot taken: try again next tick
                debug!(
                    "no free slot, population {}/{}",
                    self.enemies.len(),
                    self.config.max_enemies
                );
                break;
            };

            let speed = self.spawn_speed();
            debug!("spawning enemy in slot {} at speed {speed:.3}", point.slot);
            self.enemies.push(Enemy::new(
                point.x,
                point.y,
                self.config.enemy_width,
                self.config.enemy_height,
                speed,
            ));

            host.update_text(Label::Score, &format!("Score: {}", self.state.score));
            host.update_text(Label::Lives, &format!("Lives: {}", self.state.lives));
        }
    }

    fn spawn_speed(&mut self) -> f64 {
        let base = self.config.enemy_min_speed
            + self.rng.random::<f64>() * self.config.enemy_speed_spread;
        let level_boost = f64::from(self.state.difficulty_level.saturating_sub(1));
        base * (1.0 + self.config.level_speed_step * level_boost)
    }

    /// While paused, speeds decay a little more every tick. Unpausing snaps
    /// every decayed enemy straight back to its spawn speed.
    pub fn apply_pause_scaling(&mut self) {
        if self.state.paused {
            for enemy in &mut self.enemies {
                enemy.damp(self.config.pause_damping);
            }
        } else {
            for enemy in &mut self.enemies {
                enemy.restore_speed();
            }
        }
    }

    /// Does any enemy overlap the lower two thirds of the player?
    ///
    /// Horizontal overlap is exact x equality; enemies and player share the
    /// slot grid so partial overlaps never happen in normal play.
    pub fn player_collides(&self) -> bool {
        let player_top = self.config.game_height - self.config.player_height;
        self.enemies.iter().any(|enemy| {
            enemy.entity.x == self.player.entity.x
                && enemy.entity.y + enemy.entity.height >= player_top
                && enemy.entity.y + enemy.entity.height / 3.0 <= player_top
        })
    }

    /// Apply collision damage. Returns true once the game is over.
    pub fn death_check<H: Host>(&mut self, host: &mut H) -> bool {
        if self.state.is_game_over() {
            self.finish(host);
            return true;
        }

        if self.player_collides() && self.state.apply_hit() {
            info!("player hit, {} lives left", self.state.lives);
            host.update_text(Label::Lives, &format!("Lives: {}", self.state.lives));

            if self.state.is_game_over() {
                self.finish(host);
                return true;
            }
        }
        false
    }

    fn finish<H: Host>(&mut self, host: &mut H) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.player.flicker = false;
        info!(
            "game over: score {}, level {}",
            self.state.score, self.state.difficulty_level
        );
        host.alert(GAME_OVER_MESSAGE);
    }

    pub fn recompute_difficulty<H: Host>(&mut self, host: &mut H) {
        let previous = self.state.difficulty_level;
        let level = self.state.recompute_difficulty(self.config.points_per_level);
        if level != previous {
            info!("difficulty level {previous} -> {level}");
        }
        host.update_text(Label::Level, &format!("Level: {level}"));
    }

    /// Step the invincibility timer
    pub fn tick_invincibility(&mut self) {
        match self.state.invincibility_phase() {
            InvincibilityPhase::Counting => {
                self.state.invincible_counter -= 1;
                self.player.toggle_flicker();
            }
            InvincibilityPhase::Expiring => {
                self.state.invincible = false;
                self.state.invincible_counter = self.state.invincible_max;
                self.player.flicker = false;
                debug!("invincibility over");
            }
            InvincibilityPhase::Off => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;

    fn game() -> GameLoop {
        GameLoop::with_seed(GameConfig::default(), 42)
    }

    #[test]
    fn test_new_game_layout() {
        let game = game();
        assert_eq!(game.player().entity.x, 150.0);
        assert_eq!(game.player().entity.y, 446.0);
        assert!(game.enemies().is_empty());
        assert_eq!(game.state().lives, 3);
        assert!(!game.is_over());
    }

    #[test]
    fn test_first_tick_fills_population() {
        let mut game = game();
        let mut host = RecordingHost::new();
        assert_eq!(game.tick(None, &mut host), TickOutcome::Continue);
        assert_eq!(game.enemies().len(), 3);
        assert_eq!(host.score_text, "Score: 0");
        assert_eq!(host.lives_text, "Lives: 3");
        assert_eq!(host.level_text, "Level: 1");
        assert_eq!(host.scheduled, vec![Duration::from_millis(20)]);
    }

    #[test]
    fn test_spawned_enemies_in_distinct_slots() {
        let mut game = game();
        let mut host = RecordingHost::new();
        game.tick(None, &mut host);
        let mut xs: Vec<f64> = game.enemies().iter().map(|e| e.entity.x).collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup();
        assert_eq!(xs.len(), 3);
        for enemy in game.enemies() {
            assert_eq!(enemy.entity.y, -156.0);
            assert!(enemy.speed >= 0.25 && enemy.speed < 0.75);
        }
    }

    #[test]
    fn test_spawn_speed_scales_with_level() {
        let mut game = game();
        game.state_mut().difficulty_level = 11;
        let speed = game.spawn_speed();
        // level 11 doubles the 0.25..0.75 range
        assert!((0.5..1.5).contains(&speed));
    }

    #[test]
    fn test_cull_awards_points() {
        let mut game = game();
        game.enemies_mut()
            .push(Enemy::new(0.0, 600.0, 75.0, 156.0, 0.5));
        game.enemies_mut()
            .push(Enemy::new(75.0, 0.0, 75.0, 156.0, 0.5));
        game.update_enemies(0.0);
        assert_eq!(game.cull_enemies(), 1);
        assert_eq!(game.state().score, 1);
        assert_eq!(game.enemies().len(), 1);
    }

    #[test]
    fn test_repopulate_stops_when_slots_exhausted() {
        let config = GameConfig {
            max_enemies: 8,
            ..GameConfig::default()
        };
        let mut game = GameLoop::with_seed(config, 3);
        let mut host = RecordingHost::new();
        game.repopulate(&mut host);
        assert_eq!(game.enemies().len(), 5);
    }

    #[test]
    fn test_collision_zone_excludes_top_third() {
        let mut game = game();
        let x = game.player().entity.x;
        // enemy bottom reaches only into the top third: y + h/3 > player top
        game.enemies_mut()
            .push(Enemy::new(x, 446.0 - 156.0 / 3.0 + 1.0, 75.0, 156.0, 0.5));
        assert!(!game.player_collides());
    }

    #[test]
    fn test_collision_needs_exact_x() {
        let mut game = game();
        let x = game.player().entity.x;
        game.enemies_mut()
            .push(Enemy::new(x + 1.0, 446.0 - 100.0, 75.0, 156.0, 0.5));
        assert!(!game.player_collides());
    }

    #[test]
    fn test_collision_leaves_enemy_untouched() {
        let mut game = game();
        let mut host = RecordingHost::new();
        let x = game.player().entity.x;
        let enemy = Enemy::new(x, 300.0, 75.0, 156.0, 0.5);
        game.enemies_mut().push(enemy.clone());
        assert!(!game.death_check(&mut host));
        assert_eq!(game.enemies(), &[enemy]);
        assert_eq!(host.lives_text, "Lives: 2");
    }

    #[test]
    fn test_last_life_ends_game_in_same_tick() {
        let mut game = game();
        let mut host = RecordingHost::new();
        game.state_mut().lives = 1;
        let x = game.player().entity.x;
        game.enemies_mut()
            .push(Enemy::new(x, 300.0, 75.0, 156.0, 0.0));

        assert_eq!(game.tick(Some(20.0), &mut host), TickOutcome::GameOver);
        assert!(game.is_over());
        assert_eq!(game.state().lives, 0);
        assert_eq!(host.alerts, vec![GAME_OVER_MESSAGE.to_string()]);
        assert!(host.scheduled.is_empty());
    }

    #[test]
    fn test_invincibility_counting_toggles_flicker() {
        let mut game = game();
        game.state_mut().apply_hit();
        game.tick_invincibility();
        assert_eq!(game.state().invincible_counter, 73);
        assert!(game.player().flicker);
        game.tick_invincibility();
        assert_eq!(game.state().invincible_counter, 72);
        assert!(!game.player().flicker);
    }

    #[test]
    fn test_invincibility_off_is_rest_state() {
        let mut game = game();
        game.tick_invincibility();
        assert!(!game.state().invincible);
        assert_eq!(game.state().invincible_counter, 75);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut game = game();
        let mut host = RecordingHost::new();
        game.state_mut().lives = 0;
        game.tick(None, &mut host);
        let x = game.player().entity.x;
        game.move_player_left();
        game.toggle_pause();
        assert_eq!(game.player().entity.x, x);
        assert!(!game.state().paused);
    }
}
