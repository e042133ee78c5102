// crates/clipper-core/src/lib.rs
//
// Pure session logic: no egui, no ffmpeg, no runtime handles.
// The playback engine and the trim utility are reached only through the
// `Player` and `Trimmer` traits so everything here is testable with fakes.

pub mod classes;
pub mod commands;
pub mod counts;
pub mod error;
pub mod export;
pub mod helpers;
pub mod playback;
pub mod state;

pub use classes::ClassList;
pub use error::ClipperError;
pub use state::Session;
