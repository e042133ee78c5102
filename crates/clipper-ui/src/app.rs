// src/app.rs
use std::path::PathBuf;
use std::time::Instant;

use clipper_core::commands::ClipperCommand;
use clipper_core::export::OutputLayout;
use clipper_core::playback::Player;
use clipper_core::state::REFRESH_INTERVAL;
use clipper_core::{ClassList, Session};
use clipper_media::FfmpegTrimmer;
use crate::context::AppContext;
use crate::dispatch::{self, Applied, Collaborators};
use crate::modules::{
    ClipperModule,
    counts::{CounterModule, CountsModule},
    preview_module::PreviewModule,
    rows::RowsModule,
    status::StatusModule,
    transport::{is_video_path, TransportModule},
};
use crate::paths::ClipperConfig;
use crate::theme::{configure_style, ACCENT};
use eframe::egui;
use serde::{Deserialize, Serialize};

/// Window-level preferences kept between runs. The session itself is not
/// persisted. Rows live only for the session.
#[derive(Default, Serialize, Deserialize)]
struct AppStorage {
    last_dir: Option<PathBuf>,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct ClipperApp {
    session:      Session,
    classes:      ClassList,
    layout:       OutputLayout,
    context:      AppContext,
    preview:      PreviewModule,
    counts:       CountsModule,
    transport:    TransportModule,
    rows:         RowsModule,
    counter:      CounterModule,
    status:       StatusModule,
    /// Commands emitted by modules each frame, processed after the UI pass
    pending_cmds: Vec<ClipperCommand>,
}

impl ClipperApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ClipperConfig, classes: ClassList) -> Self {
        configure_style(&cc.egui_ctx);
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let stored = cc.storage
            .and_then(|s| eframe::get_value::<AppStorage>(s, eframe::APP_KEY))
            .unwrap_or_default();

        let session = Session::new(&config.layout);
        let context = AppContext::new(FfmpegTrimmer::new(config.ffmpeg));
        crate::clipper_log!("[app] trim via {}", context.trimmer.program().display());

        Self {
            session,
            classes,
            layout:       config.layout,
            context,
            preview:      PreviewModule::new(),
            counts:       CountsModule,
            transport:    TransportModule::new(stored.last_dir),
            rows:         RowsModule,
            counter:      CounterModule,
            status:       StatusModule,
            pending_cmds: Vec::new(),
        }
    }

    fn process_command(&mut self, cmd: ClipperCommand) {
        let cx = Collaborators {
            player:  &mut self.context.player,
            trimmer: &self.context.trimmer,
            classes: &self.classes,
            layout:  &self.layout,
        };
        if let Applied::Opened(path) = dispatch::apply(&mut self.session, cx, cmd) {
            self.context.clear_frame();
            self.transport.last_dir = path.parent().map(PathBuf::from);
        }
    }

    fn poll_player(&mut self, ctx: &egui::Context) {
        if let Some(e) = self.context.ingest_frames(ctx) {
            crate::clipper_log!("[media] {e}");
            self.session.report_error(&e);
        }
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let files = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = files.into_iter().filter_map(|f| f.path).find(|p| is_video_path(p)) {
            self.pending_cmds.push(ClipperCommand::OpenVideo(path));
        }
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for ClipperApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &AppStorage {
            last_dir: self.transport.last_dir.clone(),
        });
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_drag_and_drop(ctx);
        self.poll_player(ctx);
        self.session.refresh(&self.context.player, Instant::now());

        egui::TopBottomPanel::top("top_panel")
            .exact_height(32.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(egui::RichText::new("Video Data Clipper")
                        .strong().size(15.0).color(ACCENT));
                    if let Some(path) = &self.session.video {
                        ui.separator();
                        ui.label(egui::RichText::new(path.display().to_string()).size(12.0).weak());
                    }
                });
            });

        egui::SidePanel::right("labeling_panel")
            .resizable(true)
            .default_width(560.0)
            .min_width(460.0)
            .show(ctx, |ui| {
                self.transport.ui(ui, &self.session, &self.classes, &mut self.pending_cmds);
                ui.separator();
                self.status.ui(ui, &self.session, &self.classes, &mut self.pending_cmds);
                egui::TopBottomPanel::bottom("counter_panel")
                    .show_inside(ui, |ui| {
                        self.counter.ui(ui, &self.session, &self.classes, &mut self.pending_cmds);
                    });
                self.rows.ui(ui, &self.session, &self.classes, &mut self.pending_cmds);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.preview.current_frame = self.context.frame.clone();
            self.preview.duration_ms   = self.context.player.duration_ms();
            self.preview.ui(ui, &self.session, &self.classes, &mut self.pending_cmds);
            ui.add_space(6.0);
            self.counts.ui(ui, &self.session, &self.classes, &mut self.pending_cmds);
        });

        // ── Process commands emitted by modules this frame ────────────────────
        let cmds: Vec<ClipperCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd);
        }

        // Keep the once-per-second refresh ticking without input; stream
        // frames continuously while playing.
        if self.context.player.is_playing() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(REFRESH_INTERVAL);
        }
    }
}
