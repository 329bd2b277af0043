use std::time::{Duration, Instant};

/// Per-run bookkeeping shown alongside the board
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Best score reached during this run of the program
    pub best_this_run: u32,
    pub games_played: u32,
    pub rival_crashes: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_this_run: 0,
            games_played: 0,
            rival_crashes: 0,
        }
    }

    /// Refresh the session clock; frozen while paused or after game over
    pub fn update(&mut self, running: bool) {
        if running {
            self.elapsed_time = self.start_time.elapsed();
        } else {
            let now = Instant::now();
            self.start_time = now.checked_sub(self.elapsed_time).unwrap_or(now);
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.rival_crashes = 0;
    }

    pub fn on_rival_crash(&mut self) {
        self.rival_crashes += 1;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.best_this_run {
            self.best_this_run = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_best_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.best_this_run, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.best_this_run, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.best_this_run, 15);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_game_start_resets_session() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update(true);
        metrics.on_rival_crash();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update(true);
        assert!(metrics.elapsed_time.as_millis() < 50);
        assert_eq!(metrics.rival_crashes, 0);
    }

    #[test]
    fn test_clock_frozen_while_not_running() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(3);
        metrics.update(false);
        std::thread::sleep(Duration::from_millis(20));
        metrics.update(false);
        assert_eq!(metrics.elapsed_time, Duration::from_secs(3));

        metrics.update(true);
        assert!(metrics.elapsed_time >= Duration::from_secs(3));
        assert!(metrics.elapsed_time < Duration::from_secs(4));
    }
}
