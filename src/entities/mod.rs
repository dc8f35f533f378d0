mod enemy;
mod entity;
mod game_state;
mod player;
mod spawner;

// Re-export all public types
pub use enemy::Enemy;
pub use entity::Entity;
pub use game_state::{GameState, InvincibilityPhase};
pub use player::Player;
pub use spawner::{SpawnPoint, Spawner};
