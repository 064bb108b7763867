//! eframe application hosting the overlay

use std::time::Duration;

use egui::{Color32, CornerRadius, FontId, Margin, Stroke, TextEdit, ViewportCommand};
use tokio::sync::mpsc;
use tracing::info;

use super::controller::{OverlayController, OverlayInput, WindowChange};
use super::layout::{centered_origin, OVERLAY_SIZE};
use crate::events::AppEvent;
use crate::hotkey::HotkeyListener;
use crate::state::Visibility;
use crate::tray::TrayController;

/// Wake-up interval while hidden, in case a platform skips repaint requests
/// for invisible windows
const HIDDEN_POLL_INTERVAL: Duration = Duration::from_millis(250);

const PLACEHOLDER: &str = "Send a message to Discord...";
const FIELD_BACKGROUND: Color32 = Color32::from_rgb(0x2C, 0x2F, 0x33);
const FIELD_BORDER: Color32 = Color32::from_rgb(0x58, 0x65, 0xF2);

/// Viewport settings: borderless, topmost, no taskbar entry, initially hidden
pub fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(env!("CARGO_PKG_NAME"))
            .with_inner_size(OVERLAY_SIZE)
            .with_decorations(false)
            .with_always_on_top()
            .with_taskbar(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_visible(false),
        ..Default::default()
    }
}

/// Platform services kept alive for the lifetime of the UI
///
/// Either may be missing when the platform refused it.
pub struct Services {
    pub hotkeys: Option<HotkeyListener>,
    pub tray: Option<TrayController>,
}

pub struct OverlayApp {
    controller: OverlayController,
    events: mpsc::UnboundedReceiver<AppEvent>,
    services: Services,
    focus_pending: bool,
    quitting: bool,
}

impl OverlayApp {
    pub fn new(
        controller: OverlayController,
        events: mpsc::UnboundedReceiver<AppEvent>,
        services: Services,
    ) -> Self {
        Self {
            controller,
            events,
            services,
            focus_pending: false,
            quitting: false,
        }
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.events.try_recv() {
            info!(%event, "handling event");
            match event {
                AppEvent::ToggleOverlay => self.input(ctx, OverlayInput::Toggle),
                AppEvent::SendClipboard => self.input(ctx, OverlayInput::SendClipboard),
                AppEvent::Quit => {
                    self.quit(ctx);
                    return;
                }
            }
        }
    }

    fn input(&mut self, ctx: &egui::Context, input: OverlayInput) {
        match self.controller.handle(input) {
            Some(WindowChange::Present) => self.present(ctx),
            Some(WindowChange::Hide) => ctx.send_viewport_cmd(ViewportCommand::Visible(false)),
            None => {}
        }
    }

    fn present(&mut self, ctx: &egui::Context) {
        if let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) {
            let origin = centered_origin(monitor, OVERLAY_SIZE);
            ctx.send_viewport_cmd(ViewportCommand::OuterPosition(origin));
        }
        ctx.send_viewport_cmd(ViewportCommand::Visible(true));
        ctx.send_viewport_cmd(ViewportCommand::WindowLevel(egui::WindowLevel::AlwaysOnTop));
        ctx.send_viewport_cmd(ViewportCommand::Focus);
        self.focus_pending = true;
        ctx.request_repaint();
    }

    fn quit(&mut self, ctx: &egui::Context) {
        info!("quit requested");
        self.quitting = true;
        if let Some(tray) = self.services.tray.as_mut() {
            tray.shutdown();
        }
        if let Some(hotkeys) = self.services.hotkeys.as_mut() {
            hotkeys.stop();
        }
        ctx.send_viewport_cmd(ViewportCommand::Close);
    }

    /// The OS closing the window only hides it; "Quit" is the way out
    fn intercept_close(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) {
            return;
        }
        ctx.send_viewport_cmd(ViewportCommand::CancelClose);
        self.input(ctx, OverlayInput::Escape);
    }

    fn draw(&mut self, ctx: &egui::Context) {
        let controller = &mut self.controller;
        let focus_pending = &mut self.focus_pending;
        let mut submitted = false;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().inner_margin(Margin::same(10)))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(FIELD_BACKGROUND)
                    .stroke(Stroke::new(2.0, FIELD_BORDER))
                    .corner_radius(CornerRadius::same(5))
                    .inner_margin(Margin::same(8))
                    .show(ui, |ui| {
                        let response = ui.add(
                            TextEdit::singleline(controller.text_mut())
                                .hint_text(PLACEHOLDER)
                                .font(FontId::proportional(16.0))
                                .text_color(Color32::WHITE)
                                .frame(false)
                                .desired_width(f32::INFINITY),
                        );

                        if std::mem::take(focus_pending) {
                            response.request_focus();
                        }
                        submitted =
                            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.input(ctx, OverlayInput::Escape);
        } else if submitted {
            self.input(ctx, OverlayInput::Submit);
        }
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);
        if self.quitting {
            return;
        }

        self.intercept_close(ctx);

        match self.controller.visibility() {
            Visibility::Shown => self.draw(ctx),
            Visibility::Hidden => ctx.request_repaint_after(HIDDEN_POLL_INTERVAL),
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }
}
