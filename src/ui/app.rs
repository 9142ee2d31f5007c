use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use eframe::egui::{self, Color32, RichText, TextEdit, TopBottomPanel, Ui};

use crate::config::{WatchConfig, save_watch_config};
use crate::watch::display::DisplayId;
use crate::watch::engine::{Mode, Watch};

const STATUS_POLL: Duration = Duration::from_millis(250);

pub fn run_gui(watch: Watch, config: WatchConfig, config_path: PathBuf) -> Result<()> {
    let native_options = eframe::NativeOptions {
        vsync: false,
        viewport: egui::ViewportBuilder::default()
            .with_title("Deskwatch")
            .with_inner_size([760.0, 520.0])
            .with_min_inner_size([560.0, 380.0]),
        ..Default::default()
    };

    let app = DeskwatchApp::new(watch, config, config_path);

    eframe::run_native(
        "Deskwatch",
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch Deskwatch GUI: {err}"))?;

    Ok(())
}

fn configure_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(Color32::from_rgb(226, 234, 246));
    visuals.panel_fill = Color32::from_rgb(8, 16, 26);
    visuals.window_fill = Color32::from_rgb(12, 20, 32);
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(10, 18, 30);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(16, 24, 38);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(26, 42, 62);
    visuals.widgets.active.bg_fill = Color32::from_rgb(34, 60, 88);
    ctx.set_visuals(visuals);
}

struct DeskwatchApp {
    watch: Watch,
    config: WatchConfig,
    config_path: PathBuf,
    add_clock_input: String,
    status_message: Option<(String, Instant)>,
    started: bool,
}

impl DeskwatchApp {
    fn new(watch: Watch, config: WatchConfig, config_path: PathBuf) -> Self {
        Self {
            watch,
            config,
            config_path,
            add_clock_input: "GMT+0".to_string(),
            status_message: None,
            started: false,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, ttl: Duration) {
        self.status_message = Some((text.into(), Instant::now() + ttl));
    }

    fn persist_config(&mut self) {
        if let Err(err) = save_watch_config(&self.config_path, &self.config) {
            self.set_status(format!("Persist failed: {err:#}"), Duration::from_secs(4));
        }
    }

    fn mode_summary(&self) -> String {
        match self.watch.mode() {
            Mode::Time => "mode: time".to_string(),
            Mode::Alarm => {
                let alarm = self.watch.alarm_time();
                format!("mode: alarm ({:02}:{:02})", alarm.hours, alarm.minutes)
            }
            Mode::Stopwatch => {
                let sw = self.watch.stopwatch_time();
                format!(
                    "mode: stopwatch ({:02}:{:02}:{:02})",
                    sw.hours, sw.minutes, sw.seconds
                )
            }
        }
    }

    fn show_header(&mut self, ui: &mut Ui) {
        let main_readout = self
            .watch
            .display(self.watch.default_display_id())
            .map(|display| display.text().to_string())
            .unwrap_or_default();
        ui.horizontal_wrapped(|ui| {
            ui.label(
                RichText::new("Deskwatch")
                    .size(24.0)
                    .color(Color32::from_rgb(96, 228, 206))
                    .strong(),
            );
            ui.separator();
            ui.label(
                RichText::new(main_readout)
                    .size(28.0)
                    .monospace()
                    .color(Color32::from_rgb(255, 214, 117))
                    .strong(),
            );
            ui.separator();
            ui.label(
                RichText::new(self.mode_summary())
                    .size(18.0)
                    .color(Color32::from_rgb(114, 220, 205))
                    .strong(),
            );
            ui.separator();
            ui.label(
                RichText::new(if self.watch.is_running() {
                    "ticking"
                } else {
                    "stopped"
                })
                .color(if self.watch.is_running() {
                    Color32::from_rgb(108, 228, 138)
                } else {
                    Color32::from_rgb(255, 124, 124)
                })
                .strong(),
            );
        });

        ui.horizontal(|ui| {
            if ui
                .button(if self.watch.is_running() { "Stop" } else { "Start" })
                .clicked()
            {
                if self.watch.is_running() {
                    self.watch.stop();
                } else {
                    self.watch.start(Instant::now(), Local::now());
                }
            }
            if ui.button("Change Mode").clicked() {
                self.watch.change_mode();
                let label = self.watch.mode().label();
                self.set_status(format!("Current mode: {label}"), Duration::from_secs(2));
            }
            if ui
                .button(if self.watch.is_24_hour() {
                    "Switch to 12h"
                } else {
                    "Switch to 24h"
                })
                .clicked()
            {
                self.watch.toggle_format(Local::now());
                self.config.use_24h = self.watch.is_24_hour();
                self.persist_config();
            }
        });

        if let Some((msg, _)) = &self.status_message {
            ui.label(
                RichText::new(msg)
                    .color(Color32::from_rgb(111, 228, 134))
                    .strong(),
            );
        }
    }

    fn show_displays(&mut self, ui: &mut Ui) {
        let mut increase_target: Option<DisplayId> = None;
        let mut light_target: Option<DisplayId> = None;

        egui::Grid::new("displays_grid")
            .striped(true)
            .num_columns(4)
            .show(ui, |ui| {
                ui.label(RichText::new("Clock").strong());
                ui.label(RichText::new("Readout").strong());
                ui.label(RichText::new("Increase").strong());
                ui.label(RichText::new("Light").strong());
                ui.end_row();

                for display in self.watch.displays() {
                    let (text_color, badge) = if display.is_dark() {
                        (Color32::from_rgb(120, 134, 150), " [dark]")
                    } else {
                        (Color32::from_rgb(255, 214, 117), "")
                    };
                    ui.label(RichText::new(display.label()).monospace());
                    ui.label(
                        RichText::new(format!("{}{badge}", display.text()))
                            .size(20.0)
                            .monospace()
                            .color(text_color)
                            .strong(),
                    );
                    if ui.button("+").clicked() {
                        increase_target = Some(display.id());
                    }
                    if ui.button("Light").clicked() {
                        light_target = Some(display.id());
                    }
                    ui.end_row();
                }
            });

        if let Some(target) = increase_target {
            self.watch.increase(target);
        }
        if let Some(target) = light_target {
            self.watch.light(target);
        }
    }

    fn show_add_clock(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Offset (GMT+N / GMT-N)");
            ui.add(TextEdit::singleline(&mut self.add_clock_input).desired_width(90.0));
            if ui.button("Add Clock").clicked() {
                let spec = self.add_clock_input.trim().to_string();
                match self.watch.add_clock(&spec, Local::now()) {
                    Ok(_) => {
                        self.config.clocks.push(spec.clone());
                        self.persist_config();
                        self.set_status(format!("Added clock {spec}"), Duration::from_secs(3));
                    }
                    Err(err) => {
                        self.set_status(format!("Add clock failed: {err}"), Duration::from_secs(4));
                    }
                }
            }
        });
    }
}

impl eframe::App for DeskwatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some((_, expires_at)) = &self.status_message
            && Instant::now() >= *expires_at
        {
            self.status_message = None;
        }

        let instant_now = Instant::now();
        if !self.started {
            self.started = true;
            self.watch.start(instant_now, Local::now());
        }
        self.watch.poll(instant_now, Local::now());

        TopBottomPanel::top("header")
            .resizable(false)
            .show(ctx, |ui| self.show_header(ui));

        TopBottomPanel::bottom("footer")
            .resizable(false)
            .show(ctx, |ui| {
                self.show_add_clock(ui);
                ui.label(
                    RichText::new(format!(
                        "Clock list persists to {} on each change.",
                        self.config_path.display()
                    ))
                    .color(Color32::from_rgb(161, 180, 201)),
                );
            });

        egui::CentralPanel::default().show(ctx, |ui| self.show_displays(ui));

        let wait = self.watch.until_next_tick(instant_now).min(STATUS_POLL);
        ctx.request_repaint_after(wait);
    }
}
