use anyhow::{Context, Result};
use ratatui::{Terminal, backend::Backend};

use super::Renderer;
use crate::game::GameState;
use crate::metrics::GameMetrics;

/// Somewhere a frame can be presented
///
/// The loop calls this with a shared borrow of the state; a sink never
/// feeds anything back into the game.
pub trait RenderSink {
    fn present(&mut self, state: &GameState, metrics: &GameMetrics) -> Result<()>;
}

/// Presents frames on a ratatui terminal
pub struct TerminalSink<B: Backend> {
    terminal: Terminal<B>,
    renderer: Renderer,
}

impl<B: Backend> TerminalSink<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            renderer: Renderer::new(),
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> RenderSink for TerminalSink<B> {
    fn present(&mut self, state: &GameState, metrics: &GameMetrics) -> Result<()> {
        self.terminal
            .draw(|frame| self.renderer.render(frame, state, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, GameConfig, GameEngine, Phase};
    use ratatui::backend::TestBackend;

    fn sink() -> TerminalSink<TestBackend> {
        TerminalSink::new(Terminal::new(TestBackend::new(90, 34)).unwrap())
    }

    fn screen_text(sink: &TerminalSink<TestBackend>) -> String {
        sink.terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_running_board_shows_scores_and_pieces() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 11);
        let mut state = engine.reset();
        state.player_score = 30;
        state.rival_score = -10;
        state.high_score = 200;
        let mut sink = sink();

        sink.present(&state, &GameMetrics::new()).unwrap();
        let text = screen_text(&sink);

        assert!(text.contains("Score: 30"));
        assert!(text.contains("Rival: 0"));
        assert!(text.contains("High: 200"));
        assert!(text.contains("Rival Snake"));
        assert!(text.contains('■'));
        assert!(text.contains('◆'));
        assert!(text.contains('▓'));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_header_high_follows_live_score() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 14);
        let mut state = engine.reset();
        state.player_score = 260;
        state.high_score = 200;
        let mut sink = sink();

        sink.present(&state, &GameMetrics::new()).unwrap();

        assert!(screen_text(&sink).contains("High: 260"));
    }

    #[test]
    fn test_paused_title_and_ghost_timer() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 12);
        let mut state = engine.reset();
        state.phase = Phase::Paused;
        state.player.pass_through.activate(12);
        let mut sink = sink();

        sink.present(&state, &GameMetrics::new()).unwrap();
        let text = screen_text(&sink);

        assert!(text.contains("PAUSED"));
        assert!(text.contains("You ghost: 12"));
        assert!(text.contains("to resume"));
    }

    #[test]
    fn test_game_over_screen() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 13);
        let mut state = engine.reset();
        state.phase = Phase::GameOver;
        state.collision = Some(CollisionType::Obstacle);
        state.player_score = 70;
        state.high_score = 70;
        let mut metrics = GameMetrics::new();
        metrics.on_rival_crash();
        metrics.on_rival_crash();
        let mut sink = sink();

        sink.present(&state, &metrics).unwrap();
        let text = screen_text(&sink);

        assert!(text.contains("GAME OVER"));
        assert!(text.contains("You hit an obstacle"));
        assert!(text.contains("Final Score: 70"));
        assert!(text.contains("NEW HIGH SCORE!"));
        assert!(text.contains("Rival crashes: 2"));
    }
}
