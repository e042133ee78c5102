// crates/clipper-core/src/commands.rs
//
// Every user action is expressed as a ClipperCommand.
// UI modules emit these; app.rs applies them to the Session after the UI pass.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum ClipperCommand {
    // ── Media ────────────────────────────────────────────────────────────────
    OpenVideo(PathBuf),

    // ── Transport ────────────────────────────────────────────────────────────
    TogglePlayback,
    /// Signed jump in milliseconds (the -5/-2/+2/+5 buttons).
    Skip(i64),
    /// Seek slider grabbed.
    BeginSeek,
    /// Seek slider moved to this value (0..=1000).
    SeekSlider(u16),
    /// Seek slider released.
    EndSeek,

    // ── Rows ─────────────────────────────────────────────────────────────────
    /// "A": new row starting at the current position.
    MarkIn,
    /// "B": set the end of the most recent row to the current position.
    MarkOut,
    EditStart { row: u64, text: String },
    EditEnd   { row: u64, text: String },
    SelectClass { row: u64, class: usize },
    Cut(u64),
    GoTo(u64),

    // ── Status ───────────────────────────────────────────────────────────────
    DismissStatus,
}
