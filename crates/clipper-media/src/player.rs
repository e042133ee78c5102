// crates/clipper-media/src/player.rs
//
// FfmpegPlayer: the playback engine behind clipper-core's `Player` trait.
//
// The clock lives on the caller's thread and is anchored to wall time while
// playing. A single decode worker thread turns commands into RGBA frames:
//
//   Stream { generation, path, start_ms }: decode sequentially from start_ms
//   Still  { generation, path, at_ms }: decode one frame (paused seeks)
//   Stop / Shutdown
//
// Every seek bumps the generation; frames from an older generation are
// dropped on arrival so nothing stale reaches the screen. The bounded frame
// channel is the rate limiter: the worker blocks once it is a few frames
// ahead of the clock.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{bounded, select, Receiver, Sender, TryRecvError};
use parking_lot::Mutex;

use clipper_core::error::ClipperError;
use clipper_core::playback::Player;

use crate::decode::LiveDecoder;
use crate::probe::probe_media;

/// Frames decoded ahead of the clock before the worker blocks.
const FRAME_LOOKAHEAD: usize = 8;

/// A frame ready for display.
pub struct VideoFrame {
    pub generation:   u64,
    pub timestamp_ms: u64,
    pub width:        u32,
    pub height:       u32,
    pub data:         Vec<u8>, // RGBA
}

enum DecodeCmd {
    Stream { generation: u64, path: PathBuf, start_ms: u64 },
    Still  { generation: u64, path: PathBuf, at_ms: u64 },
    Stop,
    Shutdown,
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Playback clock: a paused position, or an anchor plus elapsed wall time.
/// Pinned at `duration_ms` once it runs past the end.
#[derive(Clone, Copy, Debug, Default)]
struct Clock {
    anchor_ms:   u64,
    started:     Option<Instant>,
    duration_ms: Option<u64>,
}

impl Clock {
    fn now_ms(&self, now: Instant) -> u64 {
        let raw = match self.started {
            Some(t) => self.anchor_ms + now.saturating_duration_since(t).as_millis() as u64,
            None    => self.anchor_ms,
        };
        match self.duration_ms {
            Some(d) => raw.min(d),
            None    => raw,
        }
    }

    fn at_end(&self, now: Instant) -> bool {
        self.duration_ms.is_some_and(|d| self.now_ms(now) >= d)
    }

    fn running(&self, now: Instant) -> bool {
        self.started.is_some() && !self.at_end(now)
    }

    fn start(&mut self, now: Instant) {
        if self.at_end(now) {
            self.anchor_ms = 0;
        }
        self.started = Some(now);
    }

    fn stop(&mut self, now: Instant) {
        self.anchor_ms = self.now_ms(now);
        self.started   = None;
    }

    /// Running past the end counts as stopped: a later seek must not resume
    /// playback on its own.
    fn jump(&mut self, ms: u64, now: Instant) {
        if self.started.is_some() && self.at_end(now) {
            self.stop(now);
        }
        self.anchor_ms = match self.duration_ms {
            Some(d) => ms.min(d),
            None    => ms,
        };
        if self.started.is_some() {
            self.started = Some(now);
        }
    }
}

// ── FfmpegPlayer ──────────────────────────────────────────────────────────────

pub struct FfmpegPlayer {
    path:       Option<PathBuf>,
    clock:      Clock,
    generation: u64,
    cmd_tx:     Sender<DecodeCmd>,
    frame_rx:   Receiver<VideoFrame>,
    /// Next frame of the current stream, held until its timestamp is due.
    pending:    Option<VideoFrame>,
    /// Last error reported by the worker (open/decode failures).
    worker_err: Arc<Mutex<Option<(PathBuf, String)>>>,
    worker:     Option<JoinHandle<()>>,
}

impl FfmpegPlayer {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx)     = crossbeam_channel::unbounded();
        let (frame_tx, frame_rx) = bounded(FRAME_LOOKAHEAD);
        let worker_err           = Arc::new(Mutex::new(None));

        let err_slot = Arc::clone(&worker_err);
        let worker = thread::spawn(move || decode_loop(cmd_rx, frame_tx, err_slot));

        Self {
            path: None,
            clock: Clock::default(),
            generation: 0,
            cmd_tx,
            frame_rx,
            pending: None,
            worker_err,
            worker: Some(worker),
        }
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.clock.duration_ms
    }

    /// Take the most recent failure reported by the decode worker.
    pub fn take_error(&self) -> Option<ClipperError> {
        self.worker_err.lock().take()
            .map(|(path, msg)| ClipperError::MediaOpen { path, msg })
    }

    /// Newest frame that is due for display, if any arrived since the last call.
    pub fn poll_frame(&mut self) -> Option<VideoFrame> {
        let now     = Instant::now();
        let now_ms  = self.clock.now_ms(now);
        let playing = self.clock.running(now);
        let mut shown = None;

        loop {
            let frame = match self.pending.take() {
                Some(f) => f,
                None => match self.frame_rx.try_recv() {
                    Ok(f)  => f,
                    Err(_) => break,
                },
            };
            if frame.generation != self.generation { continue; }
            if playing && frame.timestamp_ms > now_ms {
                self.pending = Some(frame);
                break;
            }
            shown = Some(frame);
        }
        shown
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.pending = None;
        self.generation
    }

    fn send(&self, cmd: DecodeCmd) {
        if self.cmd_tx.send(cmd).is_err() {
            eprintln!("[pb] decode worker is gone");
        }
    }

    /// Restart decoding at the clock's position, streaming or as a still.
    fn restart_decode(&mut self, now: Instant) {
        let Some(path) = self.path.clone() else { return };
        let generation = self.next_generation();
        let at_ms      = self.clock.now_ms(now);
        if self.clock.running(now) {
            self.send(DecodeCmd::Stream { generation, path, start_ms: at_ms });
        } else {
            self.send(DecodeCmd::Still { generation, path, at_ms });
        }
    }
}

impl Default for FfmpegPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FfmpegPlayer {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(DecodeCmd::Shutdown);
        // Unblock a worker parked on a full frame channel.
        while self.frame_rx.try_recv().is_ok() {}
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

impl Player for FfmpegPlayer {
    fn load(&mut self, path: &Path) -> Result<(), ClipperError> {
        let info = probe_media(path).map_err(|e| ClipperError::MediaOpen {
            path: path.to_path_buf(),
            msg:  e.to_string(),
        })?;

        self.send(DecodeCmd::Stop);
        self.path  = Some(path.to_path_buf());
        self.clock = Clock { duration_ms: info.duration_ms, ..Clock::default() };
        self.worker_err.lock().take();
        self.restart_decode(Instant::now());
        Ok(())
    }

    fn play(&mut self) -> Result<(), ClipperError> {
        if self.path.is_none() {
            return Err(ClipperError::PlaybackStart("no video is loaded".into()));
        }
        let now = Instant::now();
        self.clock.start(now);
        self.restart_decode(now);
        Ok(())
    }

    fn pause(&mut self) {
        let now = Instant::now();
        self.clock.stop(now);
        // Leave the last shown frame on screen; just stop streaming.
        self.next_generation();
        self.send(DecodeCmd::Stop);
    }

    fn is_playing(&self) -> bool {
        self.clock.running(Instant::now())
    }

    fn time_ms(&self) -> u64 {
        self.clock.now_ms(Instant::now())
    }

    fn set_time_ms(&mut self, ms: u64) {
        let now = Instant::now();
        self.clock.jump(ms, now);
        self.restart_decode(now);
    }

    fn position(&self) -> f32 {
        match self.clock.duration_ms {
            Some(d) if d > 0 => (self.time_ms() as f64 / d as f64).clamp(0.0, 1.0) as f32,
            _                => 0.0,
        }
    }

    fn set_position(&mut self, pos: f32) {
        if let Some(d) = self.clock.duration_ms {
            self.set_time_ms((pos.clamp(0.0, 1.0) as f64 * d as f64) as u64);
        }
    }
}

// ── Decode worker ─────────────────────────────────────────────────────────────

fn decode_loop(
    cmd_rx:   Receiver<DecodeCmd>,
    frame_tx: Sender<VideoFrame>,
    err_slot: Arc<Mutex<Option<(PathBuf, String)>>>,
) {
    let mut active: Option<(u64, LiveDecoder)> = None;
    let mut carried: Option<DecodeCmd> = None;

    loop {
        let next = match carried.take() {
            Some(cmd) => Some(cmd),
            None if active.is_some() => match cmd_rx.try_recv() {
                Ok(cmd)                          => Some(cmd),
                Err(TryRecvError::Empty)         => None,
                Err(TryRecvError::Disconnected)  => return,
            },
            None => match cmd_rx.recv() {
                Ok(cmd) => Some(cmd),
                Err(_)  => return,
            },
        };

        if let Some(cmd) = next {
            // Every command supersedes the ones queued before it.
            let mut cmd = cmd;
            while let Ok(newer) = cmd_rx.try_recv() {
                cmd = newer;
            }
            active = None;

            match cmd {
                DecodeCmd::Shutdown => return,
                DecodeCmd::Stop     => {}
                DecodeCmd::Stream { generation, path, start_ms } => {
                    match LiveDecoder::open(&path, start_ms) {
                        Ok(d)  => active = Some((generation, d)),
                        Err(e) => report(&err_slot, &path, e),
                    }
                }
                DecodeCmd::Still { generation, path, at_ms } => {
                    match LiveDecoder::open(&path, at_ms) {
                        Ok(mut d) => match d.next_frame() {
                            Some(f) => {
                                let frame = VideoFrame {
                                    generation,
                                    timestamp_ms: f.timestamp_ms,
                                    width:        f.width,
                                    height:       f.height,
                                    data:         f.data,
                                };
                                match deliver(&frame_tx, &cmd_rx, frame) {
                                    Delivery::Sent            => {}
                                    Delivery::Interrupted(c)  => carried = Some(c),
                                    Delivery::Closed          => return,
                                }
                            }
                            None => eprintln!("[pb] no frame at {at_ms} ms in {}", path.display()),
                        },
                        Err(e) => report(&err_slot, &path, e),
                    }
                }
            }
            continue;
        }

        let Some((generation, decoder)) = active.as_mut() else { continue };
        match decoder.next_frame() {
            Some(f) => {
                let frame = VideoFrame {
                    generation:   *generation,
                    timestamp_ms: f.timestamp_ms,
                    width:        f.width,
                    height:       f.height,
                    data:         f.data,
                };
                match deliver(&frame_tx, &cmd_rx, frame) {
                    Delivery::Sent           => {}
                    Delivery::Interrupted(c) => carried = Some(c),
                    Delivery::Closed         => return,
                }
            }
            None => {
                eprintln!("[pb] end of stream ← {}", decoder.path.display());
                active = None;
            }
        }
    }
}

enum Delivery {
    Sent,
    Interrupted(DecodeCmd),
    Closed,
}

/// Block until the frame is taken or a new command arrives, whichever is first.
fn deliver(frame_tx: &Sender<VideoFrame>, cmd_rx: &Receiver<DecodeCmd>, frame: VideoFrame) -> Delivery {
    select! {
        send(frame_tx, frame) -> res => match res {
            Ok(())  => Delivery::Sent,
            Err(_)  => Delivery::Closed,
        },
        recv(cmd_rx) -> cmd => match cmd {
            Ok(cmd) => Delivery::Interrupted(cmd),
            Err(_)  => Delivery::Closed,
        },
    }
}

fn report(slot: &Mutex<Option<(PathBuf, String)>>, path: &Path, err: anyhow::Error) {
    eprintln!("[pb] open {}: {err}", path.display());
    *slot.lock() = Some((path.to_path_buf(), err.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn paused_clock_holds_position() {
        let t0 = Instant::now();
        let mut c = Clock { duration_ms: Some(10_000), ..Clock::default() };
        c.jump(4_000, t0);
        assert_eq!(c.now_ms(t0 + Duration::from_secs(3)), 4_000);
        assert!(!c.running(t0));
    }

    #[test]
    fn running_clock_advances_with_wall_time() {
        let t0 = Instant::now();
        let mut c = Clock { duration_ms: Some(10_000), ..Clock::default() };
        c.start(t0);
        assert_eq!(c.now_ms(t0 + Duration::from_millis(1_500)), 1_500);
        c.stop(t0 + Duration::from_millis(2_000));
        assert_eq!(c.now_ms(t0 + Duration::from_secs(9)), 2_000);
    }

    #[test]
    fn clock_pins_at_end_and_restarts_from_zero() {
        let t0 = Instant::now();
        let mut c = Clock { duration_ms: Some(3_000), ..Clock::default() };
        c.start(t0);
        let late = t0 + Duration::from_secs(5);
        assert_eq!(c.now_ms(late), 3_000);
        assert!(!c.running(late));

        c.start(late);
        assert_eq!(c.now_ms(late), 0);
        assert!(c.running(late));
    }

    #[test]
    fn seek_after_end_stays_paused() {
        let t0 = Instant::now();
        let mut c = Clock { duration_ms: Some(3_000), ..Clock::default() };
        c.start(t0);
        let late = t0 + Duration::from_secs(5);
        assert!(!c.running(late));

        c.jump(1_000, late);
        assert!(!c.running(late));
        assert_eq!(c.now_ms(late + Duration::from_millis(1_500)), 1_000);

        c.start(late);
        assert_eq!(c.now_ms(late + Duration::from_millis(500)), 1_500);
    }

    #[test]
    fn seek_while_running_keeps_running() {
        let t0 = Instant::now();
        let mut c = Clock { duration_ms: Some(10_000), ..Clock::default() };
        c.start(t0);
        let t1 = t0 + Duration::from_secs(2);
        c.jump(6_000, t1);
        assert!(c.running(t1));
        assert_eq!(c.now_ms(t1 + Duration::from_secs(1)), 7_000);
    }

    #[test]
    fn jump_past_end_is_clamped_by_engine() {
        let t0 = Instant::now();
        let mut c = Clock { duration_ms: Some(3_000), ..Clock::default() };
        c.jump(9_000, t0);
        assert_eq!(c.now_ms(t0), 3_000);
    }

    #[test]
    fn unknown_duration_is_unbounded() {
        let t0 = Instant::now();
        let mut c = Clock::default();
        c.jump(50_000, t0);
        c.start(t0);
        assert_eq!(c.now_ms(t0 + Duration::from_secs(1)), 51_000);
    }

    #[test]
    fn play_without_media_fails() {
        let mut p = FfmpegPlayer::new();
        assert!(matches!(p.play(), Err(ClipperError::PlaybackStart(_))));
        assert!(!p.is_playing());
        assert_eq!(p.position(), 0.0);
        assert!(p.poll_frame().is_none());
    }

    #[test]
    fn seeking_without_media_moves_nothing_but_the_clock() {
        let mut p = FfmpegPlayer::new();
        p.set_time_ms(2_500);
        assert_eq!(p.time_ms(), 2_500);
        assert_eq!(p.duration_ms(), None);
        assert!(p.take_error().is_none());
    }
}
