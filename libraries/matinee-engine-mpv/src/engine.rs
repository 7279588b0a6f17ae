//! mpv subprocess management
//!
//! Spawns one mpv with an IPC socket and keeps it for the process
//! lifetime; playback sessions map to `loadfile ... replace` and `stop`
//! against that single player. A reader task folds socket traffic into
//! status ticks and a monitor task watches the child, both reporting
//! through the event channel the application wired up at construction.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use matinee_playback::{EngineError, PlaybackEngine, PlayerEvent, Result};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::UnixStream;
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, Mutex as AsyncMutex};
use tracing::{debug, trace, warn};

use crate::ipc::{self, MpvMessage};
use crate::status::StatusTracker;

/// How often the monitor polls the child for liveness
const HEALTH_POLL: Duration = Duration::from_millis(500);

/// Socket connect retry schedule; mpv creates the socket shortly after
/// it starts
const CONNECT_ATTEMPTS: u32 = 20;
const CONNECT_BACKOFF: Duration = Duration::from_millis(100);

/// How long a `quit` gets before the child is killed outright
const QUIT_GRACE: Duration = Duration::from_millis(500);

/// Playback engine backed by an mpv subprocess.
///
/// One engine owns one mpv for its whole life. Dropping the engine kills
/// the child; prefer [`MpvEngine::shutdown`] for a clean quit.
pub struct MpvEngine {
    child: Arc<AsyncMutex<Child>>,
    writer: OwnedWriteHalf,
    socket_path: PathBuf,
    request_id: u64,
    tracker: Arc<Mutex<StatusTracker>>,
    alive: Arc<AtomicBool>,
}

impl MpvEngine {
    /// Spawn mpv and connect to its IPC socket.
    ///
    /// Status ticks and engine-loss notifications are delivered on
    /// `events` from background tasks for as long as the engine lives.
    pub async fn spawn(
        binary: &str,
        extra_args: &[String],
        events: mpsc::UnboundedSender<PlayerEvent>,
    ) -> Result<Self> {
        let socket_path =
            std::env::temp_dir().join(format!("matinee-mpv-{}.sock", std::process::id()));

        let mut cmd = Command::new(binary);
        cmd.arg(format!("--input-ipc-server={}", socket_path.display()))
            .arg("--idle=yes")
            .arg("--force-window=yes")
            .arg("--keep-open=no")
            .arg("--no-terminal")
            .args(extra_args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        debug!(binary, socket = %socket_path.display(), "spawning mpv");
        let child = cmd
            .spawn()
            .map_err(|e| EngineError::unavailable(format!("failed to spawn {binary}: {e}")))?;

        let stream = match Self::connect(&socket_path).await {
            Ok(stream) => stream,
            Err(e) => {
                // kill_on_drop reaps the child; only the socket needs cleanup.
                let _ = std::fs::remove_file(&socket_path);
                return Err(e);
            }
        };
        let (read_half, write_half) = stream.into_split();

        let mut engine = Self {
            child: Arc::new(AsyncMutex::new(child)),
            writer: write_half,
            socket_path,
            request_id: 1,
            tracker: Arc::new(Mutex::new(StatusTracker::new())),
            alive: Arc::new(AtomicBool::new(true)),
        };

        for (id, property) in [
            (ipc::OBSERVE_TIME_POS, "time-pos"),
            (ipc::OBSERVE_DURATION, "duration"),
            (ipc::OBSERVE_PAUSE, "pause"),
        ] {
            engine
                .send(&[json!("observe_property"), json!(id), json!(property)])
                .await?;
        }

        tokio::spawn(Self::pump_messages(
            read_half,
            engine.tracker.clone(),
            events.clone(),
            engine.alive.clone(),
        ));
        tokio::spawn(Self::monitor_child(
            engine.child.clone(),
            events,
            engine.alive.clone(),
        ));

        Ok(engine)
    }

    /// Quit mpv, falling back to a kill, and remove the socket file
    pub async fn shutdown(mut self) {
        // Flagging first keeps the monitor and reader from reporting the
        // exit we are about to cause.
        self.alive.store(false, Ordering::SeqCst);

        let line = ipc::encode_command(&[json!("quit")], self.request_id);
        let _ = self.writer.write_all(line.as_bytes()).await;
        let _ = self.writer.write_all(b"\n").await;

        let mut child = self.child.lock().await;
        if tokio::time::timeout(QUIT_GRACE, child.wait()).await.is_err() {
            warn!("mpv ignored quit, killing it");
            let _ = child.kill().await;
        }
        drop(child);

        let _ = tokio::fs::remove_file(&self.socket_path).await;
    }

    async fn connect(path: &Path) -> Result<UnixStream> {
        let mut last_err = None;
        for _ in 0..CONNECT_ATTEMPTS {
            match UnixStream::connect(path).await {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    last_err = Some(e);
                    tokio::time::sleep(CONNECT_BACKOFF).await;
                }
            }
        }

        let detail = last_err.map_or_else(String::new, |e| format!(": {e}"));
        Err(EngineError::unavailable(format!(
            "mpv socket never appeared at {}{detail}",
            path.display()
        )))
    }

    async fn send(&mut self, args: &[Value]) -> Result<()> {
        if !self.alive.load(Ordering::SeqCst) {
            return Err(EngineError::unavailable("mpv is no longer running"));
        }

        let line = ipc::encode_command(args, self.request_id);
        self.request_id += 1;
        trace!(%line, "mpv command");

        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        Ok(())
    }

    async fn set_property(&mut self, property: &str, value: Value) -> Result<()> {
        self.send(&[json!("set_property"), json!(property), value])
            .await
    }

    /// Read socket lines until it closes, folding events into ticks
    async fn pump_messages(
        read_half: OwnedReadHalf,
        tracker: Arc<Mutex<StatusTracker>>,
        events: mpsc::UnboundedSender<PlayerEvent>,
        alive: Arc<AtomicBool>,
    ) {
        let mut lines = BufReader::new(read_half).lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    trace!("mpv socket read failed: {e}");
                    break;
                }
            };

            let Some(message) = ipc::parse_line(&line) else {
                trace!(%line, "unparseable mpv message");
                continue;
            };

            match message {
                MpvMessage::Reply { request_id, error } => {
                    if error != "success" {
                        warn!(request_id, error, "mpv rejected a command");
                    }
                }
                MpvMessage::Event(event) => {
                    let tick = tracker.lock().unwrap().apply(&event);
                    if let Some((generation, status)) = tick {
                        if events
                            .send(PlayerEvent::Status { generation, status })
                            .is_err()
                        {
                            // Receiver gone; the application is shutting down.
                            return;
                        }
                    }
                }
            }
        }

        mark_lost(&alive, &events, "mpv closed its control socket".to_string());
    }

    /// Poll the child until it exits or the engine shuts down
    async fn monitor_child(
        child: Arc<AsyncMutex<Child>>,
        events: mpsc::UnboundedSender<PlayerEvent>,
        alive: Arc<AtomicBool>,
    ) {
        loop {
            tokio::time::sleep(HEALTH_POLL).await;
            if !alive.load(Ordering::SeqCst) {
                return;
            }

            let exit = child.lock().await.try_wait();
            match exit {
                Ok(None) => {}
                Ok(Some(status)) => {
                    mark_lost(&alive, &events, format!("mpv exited ({status})"));
                    return;
                }
                Err(e) => {
                    mark_lost(&alive, &events, format!("mpv health check failed: {e}"));
                    return;
                }
            }
        }
    }
}

/// Report the engine as lost exactly once
fn mark_lost(alive: &AtomicBool, events: &mpsc::UnboundedSender<PlayerEvent>, message: String) {
    if alive.swap(false, Ordering::SeqCst) {
        warn!(%message, "playback engine lost");
        let _ = events.send(PlayerEvent::EngineLost { message });
    }
}

#[async_trait]
impl PlaybackEngine for MpvEngine {
    async fn load(&mut self, generation: u64, uri: &str, rate: f32, volume: f32) -> Result<()> {
        self.tracker.lock().unwrap().expect_generation(generation);
        debug!(generation, uri, "loading file into mpv");

        self.send(&[json!("loadfile"), json!(uri), json!("replace")])
            .await?;
        // mpv keeps pause, speed, and volume across files; pin all three so
        // a new session always starts playing with the caller's settings.
        self.set_property("pause", json!(false)).await?;
        self.set_property("speed", json!(f64::from(rate))).await?;
        self.set_property("volume", json!(f64::from(volume) * 100.0))
            .await
    }

    async fn resume(&mut self) -> Result<()> {
        self.set_property("pause", json!(false)).await
    }

    async fn pause(&mut self) -> Result<()> {
        self.set_property("pause", json!(true)).await
    }

    async fn seek_to(&mut self, position_ms: u64) -> Result<()> {
        self.set_property("time-pos", json!(position_ms as f64 / 1000.0))
            .await
    }

    async fn set_rate(&mut self, rate: f32) -> Result<()> {
        self.set_property("speed", json!(f64::from(rate))).await
    }

    async fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.set_property("volume", json!(f64::from(volume) * 100.0))
            .await
    }

    async fn unload(&mut self) -> Result<()> {
        self.send(&[json!("stop")]).await
    }
}

impl Drop for MpvEngine {
    fn drop(&mut self) {
        // The child dies with its handle via kill_on_drop.
        let _ = std::fs::remove_file(&self.socket_path);
    }
}
