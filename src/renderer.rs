use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::Screen;
use crate::game_loop::GameLoop;

/// Terminal columns given to one horizontal slot of the playfield
const SLOT_COLUMNS: u16 = 9;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub screen: Screen,
    pub game: &'a GameLoop,
    pub score_text: &'a str,
    pub lives_text: &'a str,
    pub level_text: &'a str,
    pub alert: Option<&'a str>,
    pub area: Rect,
    pub fps: u32,
    pub elapsed_time_secs: u64,
}

/// Maps playfield pixels onto terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub game_width: f64,
    pub game_height: f64,
}

impl Viewport {
    /// Column and row for a playfield point; rows may fall outside the area
    pub fn to_cell(&self, x: f64, y: f64) -> (i32, i32) {
        let col = (x / self.game_width * f64::from(self.area.width)).round() as i32;
        let row = (y / self.game_height * f64::from(self.area.height)).round() as i32;
        (col, row)
    }

    /// Absolute buffer position of a cell, if it is visible
    pub fn visible(&self, col: i32, row: i32) -> Option<(u16, u16)> {
        let col = u16::try_from(col).ok()?;
        let row = u16::try_from(row).ok()?;
        (col < self.area.width && row < self.area.height)
            .then(|| (self.area.x + col, self.area.y + row))
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer {}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.screen {
            Screen::Playing => self.render_game(frame, view),
            Screen::Paused => self.render_paused(frame, view),
            Screen::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Bordered playfield centred in the terminal, one row left for the HUD
    /// and one for the controls hint
    fn playfield_area(&self, view: &RenderView) -> Rect {
        let area = view.area;
        let config = view.game.config();
        let columns = config
            .slot_count()
            .max(1)
            .saturating_mul(usize::from(SLOT_COLUMNS))
            .saturating_add(2);
        let width = u16::try_from(columns).unwrap_or(u16::MAX).min(area.width);
        let height = area.height.saturating_sub(2);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + 1,
            width,
            height,
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let game = view.game;
        let config = game.config();

        let outer = self.playfield_area(view);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(outer);
        frame.render_widget(block, outer);

        let viewport = Viewport {
            area: inner,
            game_width: config.game_width,
            game_height: config.game_height,
        };

        let buffer = frame.buffer_mut();

        // Enemies
        for enemy in game.enemies() {
            let (col, row) = viewport.to_cell(enemy.entity.x, enemy.entity.y);
            let style = Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD);
            for (offset, line) in enemy.get_sprite_lines().iter().enumerate() {
                if let Some((x, y)) = viewport.visible(col + 1, row + offset as i32) {
                    buffer.set_string(x, y, *line, style);
                }
            }
        }

        // Player - blinks while invincible
        let player = game.player();
        if !player.flicker {
            let sprite = player.get_sprite_lines();
            let (col, _) = viewport.to_cell(player.entity.x, player.entity.y);
            let base_row = i32::from(inner.height) - sprite.len() as i32;
            let color = if game.state().invincible {
                Color::White
            } else {
                Color::Yellow
            };
            let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
            for (offset, line) in sprite.iter().enumerate() {
                if let Some((x, y)) = viewport.visible(col + 1, base_row + offset as i32) {
                    buffer.set_string(x, y, *line, style);
                }
            }
        }

        // HUD labels published by the game loop
        let hud = Line::from(vec![
            Span::styled(
                view.score_text.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                view.lives_text.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                view.level_text.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default().fg(Color::White),
            ),
        ]);

        let hud_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(hud).centered(), hud_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[A/D/Arrows: Move] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        // First render the game screen, enemies keep drifting while paused
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let width = 30.min(area.width);
        let height = 6.min(area.height);
        let pause_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let state = view.game.state();
        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;

        let game_over_text = vec![
            Line::from(""),
            Line::from(view.alert.unwrap_or("Game over").to_uppercase())
                .centered()
                .red()
                .bold(),
            Line::from(""),
            Line::from(format!("Final Score: {}", state.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Level Reached: {}", state.difficulty_level))
                .centered()
                .cyan()
                .bold(),
            Line::from(format!("Time Survived: {minutes:02}:{seconds:02}"))
                .centered()
                .cyan(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            area,
        );
    }
}
