//! Application shell
//!
//! Owns the terminal, the mpv process, and the event loop. The controller
//! decides and the shell executes: every key intent and engine event is fed
//! to [`PlayerController`], and the effects it queues are drained and run
//! here against the engine, the library source, and the notifier.

use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use matinee_engine_mpv::MpvEngine;
use matinee_library::{LocalVideoSource, VideoSource};
use matinee_playback::{
    Effect, PlaybackEngine, PlayerController, PlayerEvent, SplashController, SplashFrame,
};
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{self, Event};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::widgets::ListState;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::PlayerConfig;
use crate::error::{PlayerError, Result};
use crate::keys::{map_key, PlayerIntent};
use crate::notify::Notifier;
use crate::ui::{self, Toast};

/// Seconds moved per seek key press
const SEEK_STEP_SECONDS: i64 = 10;

/// How long the input reader waits between shutdown checks
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// The running player
pub struct App {
    controller: PlayerController,
    engine: MpvEngine,
    source: Arc<LocalVideoSource>,
    events_tx: mpsc::UnboundedSender<PlayerEvent>,
    events_rx: mpsc::UnboundedReceiver<PlayerEvent>,
    notifier: Notifier,
    splash: Option<SplashController>,
    toasts: Vec<Toast>,
    list_state: ListState,
    tick_interval: Duration,
    should_quit: bool,
}

impl App {
    /// Spawn the engine and assemble the shell
    pub async fn new(config: &PlayerConfig) -> Result<Self> {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let engine = MpvEngine::spawn(
            &config.playback.mpv_binary,
            &config.playback.mpv_args,
            events_tx.clone(),
        )
        .await?;

        let splash = config
            .ui
            .splash
            .then(|| SplashController::new(Instant::now()));

        Ok(Self {
            controller: PlayerController::new(),
            engine,
            source: Arc::new(LocalVideoSource::new(&config.library.root)),
            events_tx,
            events_rx,
            notifier: Notifier::new(config.ui.notifications),
            splash,
            toasts: Vec::new(),
            list_state: ListState::default(),
            tick_interval: Duration::from_millis(config.ui.tick_interval_ms),
            should_quit: false,
        })
    }

    /// Run the player until the user quits
    pub async fn run(mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let loop_result = self.event_loop(&mut terminal).await;
        restore_terminal(&mut terminal)?;
        self.engine.shutdown().await;
        loop_result
    }

    async fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let (input_tx, mut input_rx) = mpsc::channel::<Event>(16);
        tokio::task::spawn_blocking(move || read_input(&input_tx));

        // Populate the library before the first frame is drawn.
        self.controller.refresh();
        self.apply_effects().await;

        let mut frame_tick = tokio::time::interval(self.tick_interval);
        frame_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        while !self.should_quit {
            let now = Instant::now();
            let splash_frame = self.splash_frame(now);
            self.toasts.retain(|toast| !toast.is_expired(now));
            self.sync_cursor();

            terminal.draw(|frame| {
                ui::draw(
                    frame,
                    self.controller.state(),
                    &mut self.list_state,
                    &self.toasts,
                    splash_frame,
                );
            })?;

            tokio::select! {
                maybe_input = input_rx.recv() => {
                    let Some(input) = maybe_input else {
                        // The input reader is gone; nothing can quit us anymore.
                        break;
                    };
                    if let Event::Key(key) = input {
                        if let Some(intent) = map_key(key) {
                            self.handle_intent(intent);
                        }
                    }
                }
                maybe_event = self.events_rx.recv() => {
                    if let Some(player_event) = maybe_event {
                        self.controller.handle_event(player_event);
                    }
                }
                _ = frame_tick.tick() => {}
            }

            self.apply_effects().await;
        }

        // Unmounting before the display deadline skips the fade-out.
        if let Some(splash) = self.splash.as_mut() {
            splash.cancel();
        }

        Ok(())
    }

    /// Sample the splash animation, dropping the controller once dismissed
    fn splash_frame(&mut self, now: Instant) -> Option<SplashFrame> {
        let splash = self.splash.as_mut()?;
        let frame = splash.frame(now);
        if frame.is_visible() {
            Some(frame)
        } else {
            self.splash = None;
            None
        }
    }

    fn handle_intent(&mut self, intent: PlayerIntent) {
        debug!(?intent, "Key intent");
        match intent {
            PlayerIntent::TogglePlayPause => self.controller.toggle_play_pause(),
            PlayerIntent::NextVideo => self.controller.play_next(),
            PlayerIntent::PreviousVideo => self.controller.play_previous(),
            PlayerIntent::SeekBackward => self.controller.seek_by(-SEEK_STEP_SECONDS),
            PlayerIntent::SeekForward => self.controller.seek_by(SEEK_STEP_SECONDS),
            PlayerIntent::CycleRate => self.controller.cycle_rate(),
            PlayerIntent::ToggleVolume => self.controller.toggle_volume(),
            PlayerIntent::Refresh => self.controller.refresh(),
            PlayerIntent::CursorUp => self.move_cursor(-1),
            PlayerIntent::CursorDown => self.move_cursor(1),
            PlayerIntent::PlaySelected => self.play_selected(),
            PlayerIntent::Quit => self.should_quit = true,
        }
    }

    /// Keep the list cursor inside the list across wholesale replacements
    fn sync_cursor(&mut self) {
        let len = self.controller.state().videos.len();
        match self.list_state.selected() {
            None if len > 0 => self.list_state.select(Some(0)),
            Some(index) if index >= len => {
                self.list_state
                    .select(if len == 0 { None } else { Some(len - 1) });
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: i64) {
        let len = self.controller.state().videos.len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, len as i64 - 1) as usize;
        self.list_state.select(Some(next));
    }

    fn play_selected(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some(video) = self.controller.state().videos.get(index).cloned() else {
            return;
        };
        self.controller.play(video);
    }

    /// Drain the controller's effect queue and execute each effect in order
    async fn apply_effects(&mut self) {
        for effect in self.controller.take_effects() {
            debug!(?effect, "Running effect");
            self.run_effect(effect).await;
        }
    }

    async fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Scan { token, max_count } => self.spawn_scan(token, max_count),
            Effect::Notify { title, body } => self.notifier.send(title, body),
            Effect::Alert { message } => self.toasts.push(Toast::new(message)),
            engine_effect => {
                let is_load = matches!(engine_effect, Effect::Load { .. });
                if let Err(e) = self.run_engine_effect(&engine_effect).await {
                    // Transport and unload failures are logged and dropped; a
                    // failed load also gets a toast so the user learns why
                    // nothing started.
                    warn!("Engine call failed: {e}");
                    if is_load {
                        self.toasts.push(Toast::new(format!("Playback failed: {e}")));
                    }
                }
            }
        }
    }

    async fn run_engine_effect(&mut self, effect: &Effect) -> matinee_playback::Result<()> {
        match effect {
            Effect::Load {
                generation,
                uri,
                rate,
                volume,
            } => self.engine.load(*generation, uri, *rate, *volume).await,
            Effect::Resume => self.engine.resume().await,
            Effect::Pause => self.engine.pause().await,
            Effect::SeekTo { position_ms } => self.engine.seek_to(*position_ms).await,
            Effect::SetRate { rate } => self.engine.set_rate(*rate).await,
            Effect::SetVolume { volume } => self.engine.set_volume(*volume).await,
            Effect::Unload => self.engine.unload().await,
            _ => Ok(()),
        }
    }

    /// Run an enumeration off the loop, answering through the event channel
    fn spawn_scan(&self, token: u64, max_count: usize) {
        let source = Arc::clone(&self.source);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = match source.request_access().await {
                Ok(()) => source.scan(max_count).await,
                Err(e) => Err(e),
            };
            let player_event = match result {
                Ok(videos) => PlayerEvent::ScanCompleted { token, videos },
                Err(error) => PlayerEvent::ScanFailed { token, error },
            };
            let _ = events.send(player_event);
        });
    }
}

/// Blocking crossterm reader; exits once the event loop drops its receiver.
///
/// Reads are gated on `poll` so the exit check runs even when no further
/// key ever arrives; a bare `read()` would hold the blocking pool open
/// past quit until one more terminal event.
fn read_input(tx: &mpsc::Sender<Event>) {
    while !tx.is_closed() {
        match event::poll(INPUT_POLL_INTERVAL) {
            Ok(false) => {}
            Ok(true) => match event::read() {
                Ok(input) => {
                    if tx.blocking_send(input).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!("Input read failed: {e}");
                    return;
                }
            },
            Err(e) => {
                warn!("Input poll failed: {e}");
                return;
            }
        }
    }
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()
        .map_err(|e| PlayerError::Terminal(format!("failed to enter raw mode: {e}")))?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| PlayerError::Terminal(format!("failed to enter alternate screen: {e}")))?;
    Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|e| PlayerError::Terminal(e.to_string()))
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()
        .map_err(|e| PlayerError::Terminal(format!("failed to leave raw mode: {e}")))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| PlayerError::Terminal(format!("failed to leave alternate screen: {e}")))?;
    terminal
        .show_cursor()
        .map_err(|e| PlayerError::Terminal(e.to_string()))?;
    Ok(())
}
