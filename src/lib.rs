// Library exports for the binary and for testing
pub use config::GameConfig;
pub use entities::{Enemy, Entity, GameState, InvincibilityPhase, Player, SpawnPoint, Spawner};
pub use game_loop::{GAME_OVER_MESSAGE, GameLoop, TickOutcome};
pub use host::{Alert, Host, Label, RecordingHost, Scheduler, TextDisplay};

pub mod app;
pub mod audio;
pub mod config;
pub mod entities;
pub mod game_loop;
pub mod headless;
pub mod host;
pub mod input;
pub mod renderer;
