// crates/clipper-media/src/helpers/mod.rs

pub mod seek;
