// src/modules/mod.rs
//
// Panel registry. Each panel reads the Session and emits commands; panels
// never mutate state directly; app.rs applies the commands after the UI pass.

pub mod counts;
pub mod preview_module;
pub mod rows;
pub mod status;
pub mod transport;

use clipper_core::commands::ClipperCommand;
use clipper_core::{ClassList, Session};
use egui::Ui;

pub trait ClipperModule {
    fn name(&self) -> &str;
    fn ui(
        &mut self,
        ui:      &mut Ui,
        session: &Session,
        classes: &ClassList,
        cmd:     &mut Vec<ClipperCommand>,
    );
}
