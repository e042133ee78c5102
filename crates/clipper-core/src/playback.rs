// crates/clipper-core/src/playback.rs
//
// The capability surface the session needs from a playback engine, plus the
// small pieces of playback-related UI state that live in the session.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::ClipperError;

/// Slider resolution: positions are pushed to the UI as 0..=SLIDER_MAX.
pub const SLIDER_MAX: u16 = 1000;

/// How long a seek drag may stay latched without a release event before the
/// periodic refresh takes the display back.
pub const SEEK_LATCH_TIMEOUT: Duration = Duration::from_secs(5);

/// A media playback engine. Times are milliseconds from the start of the media.
pub trait Player {
    fn load(&mut self, path: &Path) -> Result<(), ClipperError>;

    fn play(&mut self) -> Result<(), ClipperError>;
    fn pause(&mut self);
    fn is_playing(&self) -> bool;

    fn time_ms(&self) -> u64;
    fn set_time_ms(&mut self, ms: u64);

    /// Normalised position in `0.0..=1.0`; 0 when the duration is unknown.
    fn position(&self) -> f32;
    fn set_position(&mut self, pos: f32);
}

/// What the play/pause button currently offers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayAffordance {
    #[default]
    Play,
    Pause,
}

impl PlayAffordance {
    pub fn label(&self) -> &'static str {
        match self {
            PlayAffordance::Play  => "Play",
            PlayAffordance::Pause => "Pause",
        }
    }

    pub fn for_playing(playing: bool) -> Self {
        if playing { PlayAffordance::Pause } else { PlayAffordance::Play }
    }
}

/// Whether the user is dragging the seek slider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeekInteraction {
    #[default]
    Idle,
    Seeking { since: Instant },
}

impl SeekInteraction {
    /// True while a drag holds the display. A latch older than
    /// `SEEK_LATCH_TIMEOUT` no longer counts.
    pub fn holds_display(&self, now: Instant) -> bool {
        match self {
            SeekInteraction::Idle            => false,
            SeekInteraction::Seeking { since } =>
                now.saturating_duration_since(*since) < SEEK_LATCH_TIMEOUT,
        }
    }
}

/// Map a normalised engine position onto the slider range.
pub fn slider_from_position(pos: f32) -> u16 {
    (pos.clamp(0.0, 1.0) * SLIDER_MAX as f32) as u16
}

pub fn position_from_slider(value: u16) -> f32 {
    value.min(SLIDER_MAX) as f32 / SLIDER_MAX as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_expires() {
        let t0 = Instant::now();
        let seek = SeekInteraction::Seeking { since: t0 };
        assert!(seek.holds_display(t0 + Duration::from_secs(1)));
        assert!(!seek.holds_display(t0 + SEEK_LATCH_TIMEOUT));
        assert!(!SeekInteraction::Idle.holds_display(t0));
    }

    #[test]
    fn slider_mapping_clamps() {
        assert_eq!(slider_from_position(0.5), 500);
        assert_eq!(slider_from_position(1.7), SLIDER_MAX);
        assert_eq!(slider_from_position(-0.1), 0);
        assert_eq!(position_from_slider(250), 0.25);
        assert_eq!(position_from_slider(5000), 1.0);
    }

    #[test]
    fn affordance_labels() {
        assert_eq!(PlayAffordance::for_playing(true).label(), "Pause");
        assert_eq!(PlayAffordance::for_playing(false).label(), "Play");
    }
}
