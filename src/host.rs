//! Collaborators the game loop talks to.
//!
//! The engine never touches the terminal or the clock directly. It pushes
//! HUD text, asks to be called again and raises the game-over alert through
//! these traits, so any front end (or a test) can drive it.

use std::time::Duration;

/// Which HUD label a piece of text belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Score,
    Lives,
    Level,
}

pub trait TextDisplay {
    fn update_text(&mut self, label: Label, text: &str);
}

pub trait Scheduler {
    /// Request another tick after `delay`
    fn schedule_after(&mut self, delay: Duration);
}

pub trait Alert {
    fn alert(&mut self, message: &str);
}

/// Everything a tick needs from its surroundings
pub trait Host: TextDisplay + Scheduler + Alert {}

impl<T: TextDisplay + Scheduler + Alert> Host for T {}

/// A host that remembers every call. Used by the headless runner and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub score_text: String,
    pub lives_text: String,
    pub level_text: String,
    /// Number of text updates received
    pub text_updates: usize,
    pub scheduled: Vec<Duration>,
    pub alerts: Vec<String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending reschedule request, if the last tick made one
    pub fn take_scheduled(&mut self) -> Option<Duration> {
        self.scheduled.pop()
    }
}

impl TextDisplay for RecordingHost {
    fn update_text(&mut self, label: Label, text: &str) {
        let slot = match label {
            Label::Score => &mut self.score_text,
            Label::Lives => &mut self.lives_text,
            Label::Level => &mut self.level_text,
        };
        slot.clear();
        slot.push_str(text);
        self.text_updates += 1;
    }
}

impl Scheduler for RecordingHost {
    fn schedule_after(&mut self, delay: Duration) {
        self.scheduled.push(delay);
    }
}

impl Alert for RecordingHost {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_host_tracks_labels() {
        let mut host = RecordingHost::new();
        host.update_text(Label::Score, "Score: 4");
        host.update_text(Label::Lives, "Lives: 2");
        host.update_text(Label::Score, "Score: 5");
        assert_eq!(host.score_text, "Score: 5");
        assert_eq!(host.lives_text, "Lives: 2");
        assert_eq!(host.level_text, "");
        assert_eq!(host.text_updates, 3);
    }

    #[test]
    fn test_recording_host_schedule_and_alert() {
        let mut host = RecordingHost::new();
        host.schedule_after(Duration::from_millis(20));
        host.alert("Game over");
        assert_eq!(host.take_scheduled(), Some(Duration::from_millis(20)));
        assert_eq!(host.take_scheduled(), None);
        assert_eq!(host.alerts, vec!["Game over".to_string()]);
    }
}
