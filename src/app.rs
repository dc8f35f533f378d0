use color_eyre::Result;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::game_loop::{GameLoop, TickOutcome};
use crate::host::{Alert, Label, Scheduler, TextDisplay};
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};

/// Which screen the front end is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Playing,
    Paused,
    GameOver,
}

/// Collaborator side of the terminal front end.
///
/// Keeps the HUD strings the loop publishes, the time the loop asked to be
/// ticked again and the game-over alert.
#[derive(Debug, Default)]
pub struct TerminalHost {
    pub score_text: String,
    pub lives_text: String,
    pub level_text: String,
    pub alert: Option<String>,
    next_tick: Option<Instant>,
}

impl TerminalHost {
    fn new(now: Instant) -> Self {
        Self {
            next_tick: Some(now),
            ..Self::default()
        }
    }

    /// Claim the pending tick if it is due
    fn take_due(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(due) if now >= due => {
                self.next_tick = None;
                true
            }
            _ => false,
        }
    }
}

impl TextDisplay for TerminalHost {
    fn update_text(&mut self, label: Label, text: &str) {
        let slot = match label {
            Label::Score => &mut self.score_text,
            Label::Lives => &mut self.lives_text,
            Label::Level => &mut self.level_text,
        };
        *slot = text.to_string();
    }
}

impl Scheduler for TerminalHost {
    fn schedule_after(&mut self, delay: Duration) {
        self.next_tick = Some(Instant::now() + delay);
    }
}

impl Alert for TerminalHost {
    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }
}

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    config: GameConfig,
    game: GameLoop,
    host: TerminalHost,
    /// When the last tick ran; `None` before the first one
    last_tick: Option<Instant>,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// Game timers
    game_start_time: Instant,
    final_time_secs: Option<u64>,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: Option<AudioManager>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: GameConfig) -> Self {
        let now = Instant::now();
        Self {
            running: true,
            game: GameLoop::new(config.clone()),
            host: TerminalHost::new(now),
            config,
            last_tick: None,
            last_frame_time: now,
            fps: 0,
            game_start_time: now,
            final_time_secs: None,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager: AudioManager::try_open(),
        }
    }

    pub fn screen(&self) -> Screen {
        if self.game.is_over() {
            Screen::GameOver
        } else if self.game.state().paused {
            Screen::Paused
        } else {
            Screen::Playing
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        info!("starting game session");
        while self.running {
            // Calculate FPS
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            // Render the frame
            terminal.draw(|frame| {
                // Use final time if game is over, otherwise calculate current elapsed time
                let elapsed_time_secs = self
                    .final_time_secs
                    .unwrap_or_else(|| self.game_start_time.elapsed().as_secs());
                let view = RenderView {
                    screen: self.screen(),
                    game: &self.game,
                    score_text: &self.host.score_text,
                    lives_text: &self.host.lives_text,
                    level_text: &self.host.level_text,
                    alert: self.host.alert.as_deref(),
                    area: frame.area(),
                    fps: self.fps,
                    elapsed_time_secs,
                };
                self.renderer.render(frame, &view);
            })?;

            // Poll input events and get actions
            self.input_manager.poll_events(self.screen())?;
            let actions = self.input_manager.take_actions();
            self.process_actions(&actions);

            self.drive_clock(Instant::now());

            // Small sleep to prevent CPU spinning; ticks are paced by the scheduler
            std::thread::sleep(Duration::from_millis(4));
        }
        info!("leaving game");
        Ok(())
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::TogglePause => {
                    self.game.toggle_pause();
                    info!("paused: {}", self.game.state().paused);
                }
                InputAction::Restart => {
                    info!("restarting");
                    self.restart();
                }
                InputAction::MoveLeft => self.game.move_player_left(),
                InputAction::MoveRight => self.game.move_player_right(),
            }
        }
    }

    /// A finished loop cannot be resumed; start over with a fresh one
    fn restart(&mut self) {
        let now = Instant::now();
        self.game = GameLoop::new(self.config.clone());
        self.host = TerminalHost::new(now);
        self.last_tick = None;
        self.game_start_time = now;
        self.final_time_secs = None;
    }

    /// Run the game loop if the tick it scheduled is due
    fn drive_clock(&mut self, now: Instant) {
        if !self.host.take_due(now) {
            return;
        }

        let elapsed_ms = self
            .last_tick
            .map(|last| now.duration_since(last).as_secs_f64() * 1000.0);
        self.last_tick = Some(now);

        let lives_before = self.game.state().lives;
        let outcome = self.game.tick(elapsed_ms, &mut self.host);

        if outcome == TickOutcome::GameOver {
            self.final_time_secs = Some(self.game_start_time.elapsed().as_secs());
            if let Some(audio) = &self.audio_manager {
                audio.play_game_over_sound();
            }
        } else if self.game.state().lives < lives_before {
            if let Some(audio) = &self.audio_manager {
                audio.play_hit_sound();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_host_due_once() {
        let now = Instant::now();
        let mut host = TerminalHost::new(now);
        assert!(host.take_due(now));
        assert!(!host.take_due(now));
    }

    #[test]
    fn test_terminal_host_waits_for_delay() {
        let now = Instant::now();
        let mut host = TerminalHost::new(now);
        host.take_due(now);
        host.schedule_after(Duration::from_secs(60));
        assert!(!host.take_due(Instant::now()));
        assert!(host.take_due(Instant::now() + Duration::from_secs(61)));
    }

    #[test]
    fn test_terminal_host_records_text_and_alert() {
        let mut host = TerminalHost::default();
        host.update_text(Label::Level, "Level: 2");
        host.alert("Game over");
        assert_eq!(host.level_text, "Level: 2");
        assert_eq!(host.alert.as_deref(), Some("Game over"));
    }
}
