use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CollisionType, GameState, Phase, Position};
use crate::metrics::GameMetrics;

/// Draws a read-only snapshot of the session
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let board = match state.phase {
            Phase::GameOver => self.render_game_over(state, metrics),
            Phase::Running | Phase::Paused => self.render_grid(state),
        };
        frame.render_widget(board, chunks[1]);

        frame.render_widget(self.render_controls(state.phase), chunks[2]);
    }

    fn cell(&self, state: &GameState, pos: Position) -> Span<'static> {
        if pos == state.player.head() {
            Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else if state.player.occupies(pos) {
            Span::styled("□ ", Style::default().fg(Color::Green))
        } else if pos == state.rival.head() {
            Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
        } else if state.rival.occupies(pos) {
            Span::styled("□ ", Style::default().fg(Color::LightMagenta))
        } else if state.is_obstacle(pos) {
            Span::styled("▓▓", Style::default().fg(Color::Gray))
        } else if pos == state.food {
            Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else if pos == state.power_up {
            Span::styled(
                "◆ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(". ", Style::default().fg(Color::DarkGray))
        }
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        let lines: Vec<Line> = (0..state.grid.rows)
            .map(|y| {
                let spans: Vec<Span> = (0..state.grid.columns)
                    .map(|x| self.cell(state, Position::new(x, y)))
                    .collect();
                Line::from(spans)
            })
            .collect();

        let (title, border) = if state.phase == Phase::Paused {
            (" Rival Snake - PAUSED ", Color::Yellow)
        } else {
            (" Rival Snake ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.display_player_score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Rival: ", Style::default().fg(Color::Magenta)),
            Span::styled(
                state.display_rival_score().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.best_score().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];

        for (label, effect) in [
            ("You", state.player.pass_through),
            ("Rival", state.rival.pass_through),
        ] {
            if effect.is_active() {
                spans.push(Span::raw("    "));
                spans.push(Span::styled(
                    format!("{label} ghost: {}", effect.remaining()),
                    Style::default().fg(Color::Cyan),
                ));
            }
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let cause = match state.collision {
            Some(CollisionType::Wall) => "You hit the wall",
            Some(CollisionType::Obstacle) => "You hit an obstacle",
            Some(CollisionType::SelfCollision) => "You bit yourself",
            Some(CollisionType::Snake) => "The rival got you",
            None => "",
        };

        let score = state.display_player_score();
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.high_score.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Gray)),
                Span::styled(metrics.games_played.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Rival crashes: ", Style::default().fg(Color::Gray)),
                Span::styled(metrics.rival_crashes.to_string(), Style::default().fg(Color::White)),
            ]),
        ];

        if score > 0 && score == state.high_score {
            text.push(Line::from(Span::styled(
                "NEW HIGH SCORE!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'static> {
        let pause_hint = if phase == Phase::Paused {
            " to resume | "
        } else {
            " to pause | "
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(pause_hint),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
