//! Main TUI application state and logic

use crate::config::ViewerConfig;
use crate::constants::POLL_INTERVAL_MS;
use crate::generator::generate;
use crate::input::{DemoInputs, Input};
use crate::playback::{DeadlineTimer, PlaybackController, PlaybackState, StepRenderer};
use crate::step::{Family, Step, Trace};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Speed change per `+` / `-` press
const SPEED_STEP: u32 = 10;

/// Renderer handed to the playback controller
///
/// Drawing happens once per event-loop turn; the controller only needs to
/// tell the app that the cursor moved so the step log can follow it.
#[derive(Debug, Default)]
pub struct StepLog {
    moved: bool,
}

impl StepLog {
    /// Whether the cursor moved since the last call
    pub fn take_moved(&mut self) -> bool {
        std::mem::take(&mut self.moved)
    }
}

impl StepRenderer for StepLog {
    fn render(&mut self, step: Option<&Step>, cursor: Option<usize>, total: usize) {
        self.moved = true;
        trace!(?cursor, total, message = step.map(|s| s.message.as_str()), "cursor moved");
    }
}

/// The main application state
pub struct App {
    /// Controller owning the trace being shown
    pub playback: PlaybackController<DeadlineTimer, StepLog>,

    /// Configuration the current input was built from
    pub config: ViewerConfig,

    /// Seeded source of demo inputs for `n`
    pub demo: DemoInputs,

    /// Input of the current trace; graph and tree panes draw its structure
    pub input: Input,

    /// Step log scroll offset (usize::MAX follows the newest message)
    pub log_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(config: ViewerConfig, demo: DemoInputs, input: Input, trace: Trace) -> Self {
        let mut playback = PlaybackController::new(trace, DeadlineTimer::new(), StepLog::default());
        playback.set_speed(config.speed);

        let status_message = if playback.trace().is_degenerate() {
            String::from("Invalid input")
        } else {
            String::from("Ready!")
        };

        App {
            playback,
            config,
            demo,
            input,
            log_scroll: 0,
            should_quit: false,
            status_message,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let poll_interval = Duration::from_millis(POLL_INTERVAL_MS);

        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.on_tick(Instant::now());

            // Wake up for the next tick or the next key, whichever comes first
            let timeout = self
                .playback
                .timer()
                .time_until_due(Instant::now())
                .map_or(poll_interval, |due| due.min(poll_interval));
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Deliver a due timer tick to the controller
    pub fn on_tick(&mut self, now: Instant) {
        let Some(handle) = self.playback.timer_mut().poll(now) else {
            return;
        };
        if self.playback.tick(handle) && self.playback.state() == PlaybackState::Finished {
            self.status_message = "Playback complete".to_string();
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        if self.playback.renderer_mut().take_moved() {
            self.log_scroll = usize::MAX;
        }

        let size = frame.area();

        // Visual and log side by side, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        let trace = self.playback.trace();
        let title = trace.algorithm().title();
        // Before playback starts the input is shown as step 0 draws it
        let shown = self.playback.current_step().or_else(|| trace.first());

        if let Some(step) = shown {
            match (&self.input, trace.algorithm().family()) {
                (Input::Graph(graph), Family::Graph) => {
                    super::panes::render_graph_pane(frame, columns[0], graph, step, title)
                }
                (Input::Tree(tree), Family::Tree) => {
                    super::panes::render_tree_pane(frame, columns[0], tree, step, title)
                }
                _ => super::panes::render_array_pane(frame, columns[0], step, title),
            }
        }

        super::panes::render_log_pane(
            frame,
            columns[1],
            trace,
            self.playback.cursor(),
            &mut self.log_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            super::panes::StatusRenderData {
                message: &self.status_message,
                cursor: self.playback.cursor(),
                total: self.playback.total(),
                state: self.playback.state(),
                speed: self.playback.speed(),
                degenerate: trace.is_degenerate(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    if self.playback.state() == PlaybackState::Playing {
                        self.playback.pause();
                        self.status_message = "Paused".to_string();
                    } else {
                        self.playback.play();
                        self.status_message = match self.playback.state() {
                            PlaybackState::Playing => "Playing...".to_string(),
                            _ => "Nothing to play".to_string(),
                        };
                    }
                }
            }
            KeyCode::Left => {
                self.playback.step_backward();
                self.status_message = "Stepped backward".to_string();
            }
            KeyCode::Right => {
                self.playback.step_forward();
                self.status_message = "Stepped forward".to_string();
            }
            KeyCode::Enter => {
                self.playback.pause();
                self.playback.jump_to_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.playback.pause();
                self.playback.jump_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.playback.reset();
                self.status_message = "Reset".to_string();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.playback.set_speed(self.playback.speed().saturating_add(SPEED_STEP));
                self.status_message = format!("Speed {}", self.playback.speed());
            }
            KeyCode::Char('-') => {
                self.playback.set_speed(self.playback.speed().saturating_sub(SPEED_STEP));
                self.status_message = format!("Speed {}", self.playback.speed());
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.new_random_input();
            }
            _ => {}
        }
    }

    /// Replace the trace with one for fresh demo data
    fn new_random_input(&mut self) {
        let config = self.config.with_random_data();
        match config.build_input(&mut self.demo) {
            Ok((input, target)) => {
                let trace = generate(config.algorithm, &input, target);
                debug!(seed = self.demo.seed(), steps = trace.len(), "loaded new demo input");
                self.playback.load(trace);
                self.input = input;
                self.config = config;
                self.status_message = "New random input".to_string();
            }
            Err(e) => {
                self.status_message = format!("Cannot build input: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataSource;
    use crate::step::AlgorithmId;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app(algorithm: AlgorithmId, values: Vec<i64>) -> App {
        let config = ViewerConfig {
            algorithm,
            data: DataSource::Values(values.clone()),
            target: None,
            seed: 5,
            speed: 50,
            json: false,
        };
        let mut demo = DemoInputs::new(config.seed);
        let (input, target) = config.build_input(&mut demo).unwrap();
        let trace = generate(algorithm, &input, target);
        App::new(config, demo, input, trace)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_keys_drive_playback() {
        let mut app = app(AlgorithmId::BubbleSort, vec![3, 1, 2]);
        assert_eq!(app.playback.state(), PlaybackState::Idle);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.playback.cursor(), Some(1));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.playback.state(), PlaybackState::Finished);

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.playback.state(), PlaybackState::Playing);
        assert_eq!(app.playback.cursor(), Some(0));

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.playback.state(), PlaybackState::Idle);
        assert!(!app.playback.has_pending_timer());

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_speed_keys() {
        let mut app = app(AlgorithmId::QuickSort, vec![3, 1, 2]);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.playback.speed(), 60);
        for _ in 0..20 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(app.playback.speed(), 1);
    }

    #[test]
    fn test_due_tick_advances() {
        let mut app = app(AlgorithmId::SelectionSort, vec![3, 1, 2]);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.playback.cursor(), Some(0));

        app.on_tick(Instant::now() + Duration::from_secs(2));
        assert_eq!(app.playback.cursor(), Some(1));
    }

    #[test]
    fn test_new_random_input_switches_to_demo_data() {
        let mut app = app(AlgorithmId::InOrder, vec![2, 1, 3]);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('n'));

        assert_eq!(app.playback.state(), PlaybackState::Idle);
        assert!(matches!(app.config.data, DataSource::Random { .. }));
        assert!(matches!(app.input, Input::Tree(_)));
    }

    #[test]
    fn test_render_smoke() {
        for (algorithm, values) in [
            (AlgorithmId::BubbleSort, vec![5, 2, 8, 1]),
            (AlgorithmId::BinarySearch, vec![1, 3, 5]),
            (AlgorithmId::PreOrder, vec![2, 1, 3]),
        ] {
            let mut app = app(algorithm, values);
            let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
            terminal.draw(|f| app.render(f)).unwrap();
            press(&mut app, KeyCode::Right);
            terminal.draw(|f| app.render(f)).unwrap();
            assert_eq!(app.log_scroll, 0);
        }

        let config = ViewerConfig {
            algorithm: AlgorithmId::Dijkstra,
            data: DataSource::Random { size: 5 },
            target: None,
            seed: 1,
            speed: 50,
            json: false,
        };
        let mut demo = DemoInputs::new(config.seed);
        let (input, _) = config.build_input(&mut demo).unwrap();
        let trace = generate(AlgorithmId::Dijkstra, &input, None);
        let mut app = App::new(config, demo, input, trace);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        press(&mut app, KeyCode::Enter);
        terminal.draw(|f| app.render(f)).unwrap();
        assert_eq!(app.playback.state(), PlaybackState::Finished);
    }
}
