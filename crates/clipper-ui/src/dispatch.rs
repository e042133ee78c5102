// src/dispatch.rs
//
// Applies one ClipperCommand to the Session. Every failure ends up in the
// status banner and the diagnostic log; app.rs only handles the window-side
// effects reported back in `Applied`.

use std::path::PathBuf;
use std::time::Instant;

use clipper_core::commands::ClipperCommand;
use clipper_core::error::ClipperError;
use clipper_core::export::{OutputLayout, Trimmer};
use clipper_core::playback::Player;
use clipper_core::{ClassList, Session};

/// Everything a command may touch besides the Session.
pub struct Collaborators<'a> {
    pub player:  &'a mut dyn Player,
    pub trimmer: &'a dyn Trimmer,
    pub classes: &'a ClassList,
    pub layout:  &'a OutputLayout,
}

/// Effects the window has to follow up on.
#[derive(Debug, PartialEq, Eq)]
pub enum Applied {
    Nothing,
    /// A new video replaced the old one; the shown frame is stale.
    Opened(PathBuf),
}

pub fn apply(session: &mut Session, cx: Collaborators<'_>, cmd: ClipperCommand) -> Applied {
    match run(session, cx, cmd) {
        Ok(applied) => applied,
        Err(e) => {
            crate::clipper_log!("[app] {e}");
            session.report_error(&e);
            Applied::Nothing
        }
    }
}

fn run(session: &mut Session, cx: Collaborators<'_>, cmd: ClipperCommand) -> Result<Applied, ClipperError> {
    let Collaborators { player, trimmer, classes, layout } = cx;
    match cmd {
        // ── Media ────────────────────────────────────────────────────────────
        ClipperCommand::OpenVideo(path) => {
            session.open_video(player, &path)?;
            crate::clipper_log!("[app] loaded {}", path.display());
            session.report_info(format!("Loaded {}", path.display()));
            return Ok(Applied::Opened(path));
        }

        // ── Transport ────────────────────────────────────────────────────────
        ClipperCommand::TogglePlayback => {
            session.toggle_playback(player)?;
        }
        ClipperCommand::Skip(delta)        => session.skip(player, delta),
        ClipperCommand::BeginSeek          => session.begin_seek(Instant::now()),
        ClipperCommand::SeekSlider(value)  => session.seek_to(player, value),
        ClipperCommand::EndSeek            => session.end_seek(),

        // ── Rows ─────────────────────────────────────────────────────────────
        ClipperCommand::MarkIn => {
            session.mark_in(player);
        }
        ClipperCommand::MarkOut => {
            if !session.mark_out(player) {
                session.report_info("Press A first to start a row");
            }
        }
        ClipperCommand::EditStart { row, text }    => session.edit_start(row, text)?,
        ClipperCommand::EditEnd { row, text }      => session.edit_end(row, text)?,
        ClipperCommand::SelectClass { row, class } => session.select_class(classes, row, class)?,
        ClipperCommand::GoTo(row)                  => session.go_to_row(player, row)?,

        // Runs the trim utility on the UI thread; the window is unresponsive
        // until it returns.
        ClipperCommand::Cut(row) => {
            let clip = session.cut(row, classes, trimmer, layout)?;
            crate::clipper_log!(
                "[app] cut {}..{} [{}] → {}",
                clip.record.start, clip.record.end, clip.record.class, clip.path.display(),
            );
            session.report_info(format!("Trimmed video saved as: {}", clip.path.display()));
        }

        // ── Status ───────────────────────────────────────────────────────────
        ClipperCommand::DismissStatus => session.dismiss_status(),
    }
    Ok(Applied::Nothing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipper_core::state::StatusLevel;
    use std::path::Path;

    #[derive(Default)]
    struct FakePlayer {
        loaded:    bool,
        playing:   bool,
        time:      u64,
        fail_load: bool,
    }

    impl Player for FakePlayer {
        fn load(&mut self, path: &Path) -> Result<(), ClipperError> {
            if self.fail_load {
                return Err(ClipperError::MediaOpen {
                    path: path.to_path_buf(),
                    msg:  "no video stream".into(),
                });
            }
            self.loaded = true;
            Ok(())
        }
        fn play(&mut self) -> Result<(), ClipperError> {
            if !self.loaded {
                return Err(ClipperError::PlaybackStart("no video is loaded".into()));
            }
            self.playing = true;
            Ok(())
        }
        fn pause(&mut self) { self.playing = false; }
        fn is_playing(&self) -> bool { self.playing }
        fn time_ms(&self) -> u64 { self.time }
        fn set_time_ms(&mut self, ms: u64) { self.time = ms; }
        fn position(&self) -> f32 { 0.0 }
        fn set_position(&mut self, _pos: f32) {}
    }

    struct FakeTrimmer {
        fail: bool,
    }

    impl Trimmer for FakeTrimmer {
        fn trim(&self, _source: &Path, _start: u64, _end: u64, dest: &Path) -> Result<(), ClipperError> {
            if self.fail {
                return Err(ClipperError::TrimFailed("Invalid data found when processing input".into()));
            }
            std::fs::write(dest, b"clip").map_err(|e| ClipperError::TrimFailed(e.to_string()))
        }
    }

    struct Rig {
        session: Session,
        player:  FakePlayer,
        trimmer: FakeTrimmer,
        classes: ClassList,
        layout:  OutputLayout,
        _dir:    tempfile::TempDir,
    }

    impl Rig {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let layout = OutputLayout::under(dir.path());
            Self {
                session: Session::new(&layout),
                player:  FakePlayer::default(),
                trimmer: FakeTrimmer { fail: false },
                classes: ClassList::parse("cat\ndog\n"),
                layout,
                _dir:    dir,
            }
        }

        fn send(&mut self, cmd: ClipperCommand) -> Applied {
            let cx = Collaborators {
                player:  &mut self.player,
                trimmer: &self.trimmer,
                classes: &self.classes,
                layout:  &self.layout,
            };
            apply(&mut self.session, cx, cmd)
        }

        fn error_message(&self) -> Option<&str> {
            self.session.status.as_ref()
                .filter(|s| s.level == StatusLevel::Error)
                .map(|s| s.message.as_str())
        }

        /// Load a video and add one row with the given times.
        fn with_row(&mut self, start: &str, end: &str) -> u64 {
            self.send(ClipperCommand::OpenVideo("/videos/walk.mp4".into()));
            self.send(ClipperCommand::MarkIn);
            let id = self.session.rows.last().unwrap().id;
            self.send(ClipperCommand::EditStart { row: id, text: start.into() });
            self.send(ClipperCommand::EditEnd { row: id, text: end.into() });
            id
        }
    }

    #[test]
    fn open_reports_loaded_video() {
        let mut rig = Rig::new();
        let applied = rig.send(ClipperCommand::OpenVideo("/videos/walk.mp4".into()));
        assert_eq!(applied, Applied::Opened("/videos/walk.mp4".into()));
        assert_eq!(rig.session.status.as_ref().unwrap().level, StatusLevel::Info);
    }

    #[test]
    fn failed_open_reaches_status() {
        let mut rig = Rig::new();
        rig.player.fail_load = true;
        let applied = rig.send(ClipperCommand::OpenVideo("/videos/broken.mp4".into()));
        assert_eq!(applied, Applied::Nothing);
        assert!(rig.error_message().unwrap().contains("no video stream"));
        assert!(rig.session.video.is_none());
    }

    #[test]
    fn failed_play_reaches_status_and_keeps_play_label() {
        let mut rig = Rig::new();
        rig.send(ClipperCommand::TogglePlayback);
        assert!(rig.error_message().unwrap().starts_with("playback could not start"));
        assert_eq!(rig.session.play_affordance.label(), "Play");
    }

    #[test]
    fn reversed_range_reaches_status_and_keeps_row() {
        let mut rig = Rig::new();
        let id = rig.with_row("00:00:10", "00:00:05");
        rig.send(ClipperCommand::Cut(id));
        assert!(rig.error_message().unwrap().contains("must be before"));
        assert!(rig.session.row(id).is_some());
        assert!(!rig.layout.root.exists());
    }

    #[test]
    fn bad_time_reaches_status() {
        let mut rig = Rig::new();
        let id = rig.with_row("0:10", "00:00:20");
        rig.send(ClipperCommand::GoTo(id));
        assert!(rig.error_message().unwrap().contains("invalid start time"));
    }

    #[test]
    fn trim_failure_reaches_status_and_keeps_row() {
        let mut rig = Rig::new();
        rig.trimmer.fail = true;
        let id = rig.with_row("00:00:01", "00:00:04");
        rig.send(ClipperCommand::Cut(id));
        assert!(rig.error_message().unwrap().starts_with("trim failed"));
        assert!(rig.session.row(id).is_some());
        assert_eq!(rig.session.trimmed_count, 0);
    }

    #[test]
    fn stale_row_reaches_status() {
        let mut rig = Rig::new();
        rig.send(ClipperCommand::EditStart { row: 42, text: "00:00:01".into() });
        assert_eq!(rig.error_message(), Some("row 42 no longer exists"));
    }

    #[test]
    fn successful_cut_posts_saved_path() {
        let mut rig = Rig::new();
        let id = rig.with_row("00:00:01", "00:00:04");
        rig.send(ClipperCommand::Cut(id));
        let status = rig.session.status.as_ref().unwrap();
        assert_eq!(status.level, StatusLevel::Info);
        assert!(status.message.starts_with("Trimmed video saved as: "));
        assert_eq!(rig.session.trimmed_count, 1);
    }

    #[test]
    fn mark_out_without_rows_hints_instead_of_failing() {
        let mut rig = Rig::new();
        rig.send(ClipperCommand::MarkOut);
        let status = rig.session.status.as_ref().unwrap();
        assert_eq!(status.level, StatusLevel::Info);
        assert!(rig.session.rows.is_empty());

        rig.send(ClipperCommand::DismissStatus);
        assert!(rig.session.status.is_none());
    }
}
