//! Launcher window (eframe app)

use super::window::{EguiWindows, ViewportObservation, WindowCommand};
use crate::config::{ButtonBindings, LaunchTarget, LauncherConfig};
use egui::ViewportCommand;
use tracing::debug;

/// Root viewport of the launcher.
///
/// Applies queued [`WindowCommand`]s each frame, reports the viewport state
/// back to [`EguiWindows`] and renders the target list.
pub struct LauncherWindowApp {
    windows: EguiWindows,
    targets: Vec<LaunchTarget>,
    shortcut: Vec<String>,
    bindings: ButtonBindings,
    quitting: bool,
    /// Kept alive for the lifetime of the window
    _tray: Option<tray_icon::TrayIcon>,
}

impl LauncherWindowApp {
    pub fn new(config: &LauncherConfig, windows: EguiWindows, tray: Option<tray_icon::TrayIcon>) -> Self {
        Self {
            windows,
            targets: config.launch_targets.clone(),
            shortcut: config.shortcut.clone(),
            bindings: config.bindings.clone(),
            quitting: false,
            _tray: tray,
        }
    }

    fn apply_commands(&mut self, ctx: &egui::Context) {
        for command in self.windows.take_commands() {
            debug!("Window command: {:?}", command);
            match command {
                WindowCommand::Show => {
                    ctx.send_viewport_cmd(ViewportCommand::Minimized(false));
                    ctx.send_viewport_cmd(ViewportCommand::Focus);
                },
                WindowCommand::SetFullscreen(fullscreen) => {
                    ctx.send_viewport_cmd(ViewportCommand::Fullscreen(fullscreen));
                },
                WindowCommand::Focus => ctx.send_viewport_cmd(ViewportCommand::Focus),
                WindowCommand::Quit => {
                    self.quitting = true;
                    ctx.send_viewport_cmd(ViewportCommand::Close);
                },
            }
        }
    }

    fn render(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Bigscreen Launcher");
            ui.add_space(8.0);

            if self.targets.is_empty() {
                ui.colored_label(egui::Color32::YELLOW, "No launch targets configured");
            }
            for target in &self.targets {
                ui.group(|ui| {
                    ui.label(egui::RichText::new(&target.name).strong().size(20.0));
                    ui.monospace(target.path.display().to_string());
                    if !target.arguments.is_empty() {
                        ui.monospace(target.arguments.join(" "));
                    }
                });
            }

            ui.add_space(16.0);
            ui.separator();
            egui::Grid::new("bindings").num_columns(2).show(ui, |ui| {
                ui.label(self.shortcut.join(" + "));
                ui.label("Open window / fullscreen");
                ui.end_row();
                ui.label(&self.bindings.launch);
                ui.label("Launch");
                ui.end_row();
                ui.label(&self.bindings.kill);
                ui.label("Kill running app");
                ui.end_row();
                ui.label(&self.bindings.inspect);
                ui.label("Log running app");
                ui.end_row();
            });
        });
    }
}

impl eframe::App for LauncherWindowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_commands(ctx);

        let (close_requested, observation) = ctx.input(|i| {
            let viewport = i.viewport();
            let observation = ViewportObservation {
                minimized: viewport.minimized,
                fullscreen: viewport.fullscreen,
                focused: viewport.focused,
            };
            (viewport.close_requested(), observation)
        });

        if close_requested && !self.quitting {
            // Keep running in the tray; the shortcut or "Open App" restores it.
            // Minimized, not hidden: a hidden root viewport gets no frames
            ctx.send_viewport_cmd(ViewportCommand::CancelClose);
            ctx.send_viewport_cmd(ViewportCommand::Fullscreen(false));
            ctx.send_viewport_cmd(ViewportCommand::Minimized(true));
            self.windows.mark_closed();
        } else {
            self.windows.observe(observation);
        }

        self.render(ctx);
    }
}
