// crates/clipper-core/src/state.rs
//
// Session: the whole interactive state of one run. Owned by the UI thread and
// mutated only through the methods below; collaborators (player, trimmer,
// class list, output layout) are passed in explicitly so none of them are
// global.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::classes::ClassList;
use crate::counts::ClassCounts;
use crate::error::{ClipperError, TimeField};
use crate::export::{append_log, source_name, ExportedClip, OutputLayout, TrimRecord, Trimmer};
use crate::helpers::time::{format_ms, parse_hms, Hms};
use crate::playback::{
    position_from_slider, slider_from_position, PlayAffordance, Player, SeekInteraction,
};

/// The periodic display refresh runs at most this often.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// One pending clip request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelingRow {
    pub id:    u64,
    pub start: String,
    pub end:   String,
    /// Index into the session's ClassList.
    pub class: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// The single user-visible result channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub level:   StatusLevel,
    pub message: String,
}

/// What the seek slider and the timestamp label currently show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackDisplay {
    pub slider:    u16,
    pub timestamp: String,
}

impl Default for PlaybackDisplay {
    fn default() -> Self {
        Self { slider: 0, timestamp: format_ms(0) }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    pub video:           Option<PathBuf>,
    pub rows:            Vec<LabelingRow>,
    next_row_id:         u64,
    pub trimmed_count:   u64,
    pub last_saved:      Option<PathBuf>,
    pub counts:          ClassCounts,
    pub display:         PlaybackDisplay,
    pub play_affordance: PlayAffordance,
    pub seek:            SeekInteraction,
    pub status:          Option<Status>,
    last_refresh:        Option<Instant>,
}

impl Session {
    pub fn new(layout: &OutputLayout) -> Self {
        Self { counts: ClassCounts::scan(&layout.root), ..Default::default() }
    }

    // ── Status channel ───────────────────────────────────────────────────────

    pub fn report_error(&mut self, err: &ClipperError) {
        self.status = Some(Status { level: StatusLevel::Error, message: err.to_string() });
    }

    pub fn report_info(&mut self, message: impl Into<String>) {
        self.status = Some(Status { level: StatusLevel::Info, message: message.into() });
    }

    pub fn dismiss_status(&mut self) {
        self.status = None;
    }

    // ── Media / transport ────────────────────────────────────────────────────

    pub fn open_video(&mut self, player: &mut dyn Player, path: &Path) -> Result<(), ClipperError> {
        player.load(path)?;
        self.video           = Some(path.to_path_buf());
        self.display         = PlaybackDisplay::default();
        self.play_affordance = PlayAffordance::Play;
        self.seek            = SeekInteraction::Idle;
        self.last_refresh    = None;
        Ok(())
    }

    /// Pause if playing, otherwise start. A failed start leaves the button on
    /// "Play" and hands the error back for the status channel.
    pub fn toggle_playback(&mut self, player: &mut dyn Player) -> Result<PlayAffordance, ClipperError> {
        if player.is_playing() {
            player.pause();
            self.play_affordance = PlayAffordance::Play;
        } else if let Err(e) = player.play() {
            self.play_affordance = PlayAffordance::Play;
            return Err(e);
        } else {
            self.play_affordance = PlayAffordance::Pause;
        }
        Ok(self.play_affordance)
    }

    /// Jump by `delta_ms`, never before zero. No upper bound: the engine deals
    /// with positions past the end.
    pub fn skip(&mut self, player: &mut dyn Player, delta_ms: i64) {
        let target = (player.time_ms() as i64).saturating_add(delta_ms).max(0);
        player.set_time_ms(target as u64);
        self.sync_display(player);
    }

    pub fn begin_seek(&mut self, now: Instant) {
        self.seek = SeekInteraction::Seeking { since: now };
    }

    /// Slider moved by the user. The slider keeps the user's value; the engine
    /// and the timestamp label follow it.
    pub fn seek_to(&mut self, player: &mut dyn Player, slider: u16) {
        player.set_position(position_from_slider(slider));
        self.display.slider    = slider;
        self.display.timestamp = format_ms(player.time_ms());
    }

    pub fn end_seek(&mut self) {
        self.seek = SeekInteraction::Idle;
    }

    /// Periodic refresh. Does nothing until `REFRESH_INTERVAL` has passed
    /// since the previous one; returns whether it ran.
    pub fn refresh(&mut self, player: &dyn Player, now: Instant) -> bool {
        if let Some(prev) = self.last_refresh {
            if now.saturating_duration_since(prev) < REFRESH_INTERVAL {
                return false;
            }
        }
        self.last_refresh = Some(now);

        // The engine stops on its own at end of media.
        self.play_affordance = PlayAffordance::for_playing(player.is_playing());

        if self.seek.holds_display(now) {
            return true;
        }
        self.seek = SeekInteraction::Idle;
        self.sync_display(player);
        true
    }

    fn sync_display(&mut self, player: &dyn Player) {
        self.display.slider    = slider_from_position(player.position());
        self.display.timestamp = format_ms(player.time_ms());
    }

    // ── Rows ─────────────────────────────────────────────────────────────────

    /// "A": append a row starting at the current position.
    pub fn mark_in(&mut self, player: &dyn Player) -> u64 {
        let id = self.next_row_id;
        self.next_row_id += 1;
        self.rows.push(LabelingRow {
            id,
            start: format_ms(player.time_ms()),
            end:   String::new(),
            class: 0,
        });
        id
    }

    /// "B": overwrite the end of the most recently created row. Returns false
    /// when there are no rows.
    pub fn mark_out(&mut self, player: &dyn Player) -> bool {
        match self.rows.last_mut() {
            Some(row) => {
                row.end = format_ms(player.time_ms());
                true
            }
            None => false,
        }
    }

    pub fn row(&self, id: u64) -> Option<&LabelingRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    fn row_mut(&mut self, id: u64) -> Result<&mut LabelingRow, ClipperError> {
        self.rows.iter_mut().find(|r| r.id == id).ok_or(ClipperError::UnknownRow(id))
    }

    pub fn edit_start(&mut self, id: u64, text: String) -> Result<(), ClipperError> {
        self.row_mut(id)?.start = text;
        Ok(())
    }

    pub fn edit_end(&mut self, id: u64, text: String) -> Result<(), ClipperError> {
        self.row_mut(id)?.end = text;
        Ok(())
    }

    pub fn select_class(&mut self, classes: &ClassList, id: u64, class: usize) -> Result<(), ClipperError> {
        if classes.get(class).is_none() {
            return Err(ClipperError::UnknownClass(class));
        }
        self.row_mut(id)?.class = class;
        Ok(())
    }

    /// "GO": seek to the row's start time.
    pub fn go_to_row(&mut self, player: &mut dyn Player, id: u64) -> Result<(), ClipperError> {
        let row = self.row(id).ok_or(ClipperError::UnknownRow(id))?;
        let start = parse_field(&row.start, TimeField::Start)?;
        player.set_time_ms(start.as_ms());
        self.sync_display(player);
        Ok(())
    }

    // ── Export ───────────────────────────────────────────────────────────────

    /// Export row `id` as its own clip.
    ///
    /// Both times must parse and start must be strictly before end; otherwise
    /// nothing touches the disk and the row stays. The trimmer receives an end
    /// bound one second past the typed end so the last second is kept.
    /// If the trimmer fails the row stays for a retry; a partial output file
    /// is left where it is.
    pub fn cut(
        &mut self,
        id:      u64,
        classes: &ClassList,
        trimmer: &dyn Trimmer,
        layout:  &OutputLayout,
    ) -> Result<ExportedClip, ClipperError> {
        let row = self.row(id).ok_or(ClipperError::UnknownRow(id))?.clone();
        let (start, end) = validate_range(&row)?;
        let source = self.video.clone().ok_or(ClipperError::NoVideoLoaded)?;
        let class = classes.get(row.class).ok_or(ClipperError::UnknownClass(row.class))?;

        let dest = layout.prepare_clip_path(class, &source)?;
        trimmer.trim(&source, start.total_secs(), end.total_secs() + 1, &dest)?;

        self.rows.retain(|r| r.id != id);
        self.trimmed_count += 1;
        self.last_saved = Some(dest.clone());
        self.refresh_counts(layout);

        let record = TrimRecord {
            start:  row.start,
            end:    row.end,
            class:  class.to_string(),
            source: source_name(&source),
            output: dest.clone(),
        };
        append_log(&layout.log_path, &record)
            .map_err(|source| ClipperError::LogWrite { clip: dest.clone(), source })?;

        Ok(ExportedClip { path: dest, record })
    }

    pub fn refresh_counts(&mut self, layout: &OutputLayout) {
        self.counts = ClassCounts::scan(&layout.root);
    }
}

fn parse_field(text: &str, field: TimeField) -> Result<Hms, ClipperError> {
    parse_hms(text).ok_or_else(|| ClipperError::InvalidTime { field, text: text.to_string() })
}

fn validate_range(row: &LabelingRow) -> Result<(Hms, Hms), ClipperError> {
    let start = parse_field(&row.start, TimeField::Start)?;
    let end   = parse_field(&row.end, TimeField::End)?;
    if start >= end {
        return Err(ClipperError::EmptyRange { start: row.start.clone(), end: row.end.clone() });
    }
    Ok((start, end))
}
