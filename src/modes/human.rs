use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::audio::{AudioCue, AudioSink};
use crate::game::{GameConfig, GameEngine, GameEvent, GameState, PendingInput, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::persistence::HighScoreStore;
use crate::render::{RenderSink, TerminalSink};

/// Render at ~30 FPS regardless of the game speed
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    input_handler: InputHandler,
    pending: PendingInput,
    high_scores: HighScoreStore,
    audio: Box<dyn AudioSink>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(
        config: GameConfig,
        high_scores: HighScoreStore,
        audio: Box<dyn AudioSink>,
        seed: Option<u64>,
    ) -> Self {
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };
        let state = engine.new_session(high_scores.load());

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            pending: PendingInput::new(),
            high_scores,
            audio,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        let mut sink = TerminalSink::new(terminal);

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut sink).await;

        // Cleanup terminal
        self.cleanup_terminal(sink.terminal_mut())?;

        result
    }

    async fn run_game_loop(&mut self, sink: &mut dyn RenderSink) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(Duration::from_millis(self.engine.config().tick_ms));
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(RENDER_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => warn!("terminal event error: {err}"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update(self.state.is_running());
                    sink.present(&self.state, &self.metrics)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.save_unfinished_record();
        info!(
            games = self.metrics.games_played,
            best = self.metrics.best_this_run,
            rival_crashes = self.metrics.rival_crashes,
            "quitting"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameIntent(intent) => self.pending.record(intent),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) -> TickOutcome {
        let input = self.pending.take();
        let outcome = self.engine.tick(&mut self.state, input);
        self.apply_outcome(&outcome);
        outcome
    }

    /// Route tick events to audio, metrics and persistence
    fn apply_outcome(&mut self, outcome: &TickOutcome) {
        for event in &outcome.events {
            if let Some(cue) = AudioCue::for_event(event) {
                self.audio.play(cue);
            }

            match *event {
                GameEvent::RivalCrashed { .. } => self.metrics.on_rival_crash(),
                GameEvent::GameOver { new_high_score, .. } => {
                    self.metrics.on_game_over(self.state.display_player_score());
                    if new_high_score {
                        self.persist_high_score();
                    }
                }
                GameEvent::Restarted => self.metrics.on_game_start(),
                GameEvent::Paused => info!(tick = self.state.ticks, "paused"),
                GameEvent::Resumed => info!(tick = self.state.ticks, "resumed"),
                _ => {}
            }
        }
    }

    /// Keep a record set by a session that was quit before game over
    fn save_unfinished_record(&mut self) {
        let best = self.state.best_score();
        if best > self.state.high_score {
            self.state.high_score = best;
            self.persist_high_score();
        }
    }

    fn persist_high_score(&self) {
        let score = self.state.high_score;
        match self.high_scores.save(score) {
            Ok(()) => info!(score, "new high score"),
            Err(err) => warn!(score, "could not save high score: {err:#}"),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
