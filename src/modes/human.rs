use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::info;

use crate::game::{GameConfig, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render at ~30 FPS
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Keyboard-driven play in the terminal.
///
/// Input, ticks and redraws all run on one task inside a single `select!`,
/// so the state is never touched from two places at once.
pub struct HumanMode {
    config: GameConfig,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new(&config);
        info!(grid_size = config.grid_size, "round started");

        Self {
            config,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = setup_or_restore(Self::setup_terminal, restore_terminal)?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = self.tick_timer();
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_event(event) {
                                // Fresh round: first move comes one full interval later
                                tick_timer = self.tick_timer();
                            }
                        }
                        Some(Err(err)) => {
                            return Err(anyhow::Error::new(err).context("Failed to read terminal event"));
                        }
                        None => self.should_quit = true,
                    }
                }

                // Ticks only advance a live round; the timer idles after game over
                _ = tick_timer.tick(), if self.state.is_alive => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    self.metrics.update(self.state.is_alive);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
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

        info!(games_played = self.metrics.games_played, "session ended");
        Ok(())
    }

    fn tick_timer(&self) -> Interval {
        let period = self.config.tick_interval();
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer.reset();
        timer
    }

    /// Returns true when the event started a new round
    fn handle_event(&mut self, event: Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match self.input_handler.handle_key_event(key, self.state.is_alive) {
            KeyAction::Steer(direction) => {
                self.state.set_heading(direction);
                false
            }
            KeyAction::Restart => {
                self.reset_game();
                true
            }
            KeyAction::Quit => {
                self.should_quit = true;
                false
            }
            KeyAction::None => false,
        }
    }

    fn update_game(&mut self) {
        let info = self.state.advance();

        if info.collision.is_some() {
            self.metrics.on_game_over();
        }
    }

    fn reset_game(&mut self) {
        self.state.restart();
        self.metrics.on_game_start();
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

/// Run `setup`; if it fails, run `restore` before handing the error back
fn setup_or_restore<T>(
    setup: impl FnOnce() -> Result<T>,
    restore: impl FnOnce(),
) -> Result<T> {
    setup().map_err(|err| {
        restore();
        err
    })
}

/// Best-effort undo of raw mode and the alternate screen
fn restore_terminal() {
    let _ = execute!(stderr(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}
