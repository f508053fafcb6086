use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, GameEngine, TickEvent, TickScheduler};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, Screen};

/// Interactive session: keyboard in, ratatui out, ticks from the scheduler
pub struct PlayMode {
    engine: GameEngine,
    scheduler: TickScheduler,
    screen: Screen,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        }
        .context("Invalid game configuration")?;

        Ok(Self {
            engine,
            scheduler: TickScheduler::new(),
            screen: Screen::Title,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
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

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.stop_game();
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = self.scheduler.tick() => {
                    self.update_game()?;
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.engine.snapshot();
                    let state = self.engine.state();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            self.screen,
                            &snapshot,
                            &state,
                            self.engine.config(),
                            &self.metrics,
                        );
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(heading) => {
                self.engine.set_heading(heading);
            }
            KeyAction::Start if self.screen == Screen::Title => self.start_game(),
            KeyAction::Restart if matches!(self.screen, Screen::GameOver { .. }) => {
                self.start_game()
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Start | KeyAction::Restart | KeyAction::None => {}
        }
    }

    fn update_game(&mut self) -> Result<()> {
        let outcome = match self.engine.tick() {
            Ok(outcome) => outcome,
            Err(err) => {
                self.scheduler.cancel();
                return Err(err).context("Game engine stopped unexpectedly");
            }
        };

        match outcome.event {
            TickEvent::Moved => {}
            TickEvent::Ate { speed_changed } => {
                self.metrics.on_food();
                if speed_changed {
                    self.scheduler.reconfigure(outcome.state.tick_interval());
                }
            }
            TickEvent::Collided(_) => {
                self.scheduler.cancel();
                self.metrics.on_game_over(outcome.state.score);
                self.screen = Screen::GameOver {
                    final_score: outcome.state.score,
                };
            }
        }

        Ok(())
    }

    fn start_game(&mut self) {
        if self.engine.is_running() {
            return;
        }

        // Old schedule goes before the engine is reset
        self.scheduler.cancel();
        self.engine.start();
        self.metrics.on_game_start();
        self.scheduler.arm(self.engine.state().tick_interval());
        self.screen = Screen::Playing;
    }

    fn stop_game(&mut self) {
        self.scheduler.cancel();
        self.engine.stop();
        info!(
            "session ended after {} games, best score {}",
            self.metrics.games_played, self.metrics.high_score
        );
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Heading};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn wall_bound() -> GameConfig {
        GameConfig::with_layout(
            800,
            500,
            vec![Cell::new(20, 200), Cell::new(40, 200)],
            Heading::Left,
            Cell::new(300, 200),
        )
    }

    #[tokio::test]
    async fn test_session_waits_on_title() {
        let mode = PlayMode::new(GameConfig::default(), Some(3)).unwrap();
        assert_eq!(mode.screen, Screen::Title);
        assert!(!mode.engine.is_running());
        assert!(!mode.scheduler.is_armed());
    }

    #[tokio::test]
    async fn test_start_key_arms_scheduler() {
        let mut mode = PlayMode::new(GameConfig::default(), Some(3)).unwrap();

        mode.handle_event(key(KeyCode::Enter));

        assert_eq!(mode.screen, Screen::Playing);
        assert!(mode.engine.is_running());
        assert_eq!(mode.scheduler.period(), Some(Duration::from_millis(200)));
    }

    #[tokio::test]
    async fn test_restart_ignored_while_playing() {
        let mut mode = PlayMode::new(GameConfig::default(), Some(3)).unwrap();
        mode.handle_event(key(KeyCode::Enter));
        mode.update_game().unwrap();
        let before = mode.engine.snapshot();

        mode.handle_event(key(KeyCode::Char('r')));

        assert_eq!(mode.engine.snapshot(), before);
    }

    #[tokio::test]
    async fn test_collision_cancels_schedule_and_restart_rearms() {
        let mut mode = PlayMode::new(wall_bound(), Some(3)).unwrap();
        mode.handle_event(key(KeyCode::Enter));

        mode.update_game().unwrap(); // (0,200)
        mode.update_game().unwrap(); // wall

        assert_eq!(mode.screen, Screen::GameOver { final_score: 0 });
        assert!(!mode.scheduler.is_armed());
        assert_eq!(mode.metrics.games_played, 1);

        mode.handle_event(key(KeyCode::Char('r')));

        assert_eq!(mode.screen, Screen::Playing);
        assert!(mode.scheduler.is_armed());
        assert_eq!(mode.engine.state().score, 0);
    }

    #[tokio::test]
    async fn test_eating_reconfigures_schedule() {
        let config = GameConfig {
            initial_food: Cell::new(180, 200),
            ..Default::default()
        };
        let mut mode = PlayMode::new(config, Some(3)).unwrap();
        mode.handle_event(key(KeyCode::Enter));

        mode.update_game().unwrap();

        assert_eq!(mode.metrics.foods_eaten, 1);
        assert_eq!(mode.scheduler.period(), Some(Duration::from_millis(198)));
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut mode = PlayMode::new(GameConfig::default(), None).unwrap();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
