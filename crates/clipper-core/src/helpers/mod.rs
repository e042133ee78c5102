// crates/clipper-core/src/helpers/mod.rs

pub mod time;
