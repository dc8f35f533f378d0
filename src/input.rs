use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::Screen;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    TogglePause,
    Restart,
    Quit,
}

/// Manages input polling and translates raw key events into game actions.
///
/// The player moves a whole slot per key press, so only presses (and
/// auto-repeats) matter; there is no held-key state.
#[derive(Debug, Default)]
pub struct InputManager {
    actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls for all pending input events without blocking
    /// Should be called once per frame before taking actions
    pub fn poll_events(&mut self, screen: Screen) -> color_eyre::Result<()> {
        self.actions.clear();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, screen);
            }
        }

        Ok(())
    }

    /// Translates one key event into an action for the current screen
    pub fn handle_key_event(&mut self, key_event: KeyEvent, screen: Screen) {
        if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return;
        }
        if let Some(action) = map_key(key_event, screen) {
            self.actions.push(action);
        }
    }

    /// Returns the actions collected since the last poll
    pub fn take_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.actions)
    }
}

fn map_key(key_event: KeyEvent, screen: Screen) -> Option<InputAction> {
    // Quit keys work in any state
    if matches!(
        key_event.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key_event.code == KeyCode::Char('c')
        && key_event.modifiers.contains(KeyModifiers::CONTROL))
    {
        return Some(InputAction::Quit);
    }

    match screen {
        Screen::Playing | Screen::Paused => match key_event.code {
            KeyCode::Char('p') | KeyCode::Char('P') => Some(InputAction::TogglePause),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(InputAction::MoveLeft),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                Some(InputAction::MoveRight)
            }
            _ => None,
        },
        Screen::GameOver => match key_event.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::Restart),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_works_everywhere() {
        for screen in [Screen::Playing, Screen::Paused, Screen::GameOver] {
            assert_eq!(map_key(press(KeyCode::Esc), screen), Some(InputAction::Quit));
        }
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, Screen::Playing), Some(InputAction::Quit));
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key(press(KeyCode::Left), Screen::Playing),
            Some(InputAction::MoveLeft)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('d')), Screen::Paused),
            Some(InputAction::MoveRight)
        );
        assert_eq!(map_key(press(KeyCode::Left), Screen::GameOver), None);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        assert_eq!(map_key(press(KeyCode::Char('r')), Screen::Playing), None);
        assert_eq!(
            map_key(press(KeyCode::Char('r')), Screen::GameOver),
            Some(InputAction::Restart)
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let mut input = InputManager::new();
        let mut release = press(KeyCode::Left);
        release.kind = KeyEventKind::Release;
        input.handle_key_event(release, Screen::Playing);
        input.handle_key_event(press(KeyCode::Char('p')), Screen::Playing);
        assert_eq!(input.take_actions(), vec![InputAction::TogglePause]);
        assert!(input.take_actions().is_empty());
    }
}
