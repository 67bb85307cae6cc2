use crate::device_display::interface::{DeviceDisplay, DisplayEvent, EventSubscribers, View};
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

struct DisplayWindow {
    view: Arc<Mutex<View>>,
    subscribers: EventSubscribers,
    file_input: String,
}

impl DisplayWindow {
    fn select_file(&mut self, path: PathBuf) {
        self.file_input = path.display().to_string();
        self.subscribers.send(DisplayEvent::SelectFile(path));
    }
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = self
            .view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let dropped: Vec<PathBuf> =
            ctx.input(|i| i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect());
        if let Some(path) = dropped.into_iter().next() {
            self.select_file(path);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Eye State Classifier");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Image file:");
                let response = ui.text_edit_singleline(&mut self.file_input);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if (ui.button("Select").clicked() || submitted) && !self.file_input.trim().is_empty()
                {
                    let path = PathBuf::from(self.file_input.trim());
                    self.select_file(path);
                }
            });
            ui.small("or drop an image onto this window");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!view.busy, egui::Button::new("Run"))
                    .clicked()
                {
                    self.subscribers.send(DisplayEvent::RunInference);
                }
                if ui.button(view.camera_button.as_str()).clicked() {
                    self.subscribers.send(DisplayEvent::ToggleCamera);
                }
                if view.busy {
                    ui.spinner();
                }
            });
            ui.add_space(8.0);

            if let Some(file) = &view.file {
                ui.label(format!("Selected: {}", file));
            }

            ui.separator();
            ui.label(egui::RichText::new(&view.result).monospace().size(16.0));
            if let Some(top) = &view.top {
                ui.label(egui::RichText::new(format!("Most likely: {}", top)).strong());
            }
        });

        // Results arrive from the app thread.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// An egui window. `run_window` must be called from the main thread and
/// blocks until the window is closed.
pub struct DeviceDisplayGui {
    view: Arc<Mutex<View>>,
    subscribers: EventSubscribers,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            view: Arc::new(Mutex::new(View::default())),
            subscribers: EventSubscribers::default(),
        }
    }

    /// A handle sharing this display's view and subscribers, for the thread
    /// running the window.
    pub fn handle(&self) -> DeviceDisplayGui {
        DeviceDisplayGui {
            view: self.view.clone(),
            subscribers: self.subscribers.clone(),
        }
    }

    pub fn run_window(&self) -> Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([480.0, 320.0])
                .with_drag_and_drop(true),
            ..Default::default()
        };

        let window = DisplayWindow {
            view: self.view.clone(),
            subscribers: self.subscribers.clone(),
            file_input: String::new(),
        };

        let result = eframe::run_native(
            "Eye State Classifier",
            options,
            Box::new(|_cc| Box::new(window)),
        );

        self.subscribers.send(DisplayEvent::Quit);

        result.map_err(|e| Error::Display {
            reason: e.to_string(),
        })
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, view: &View) -> Result<()> {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = view.clone();
        Ok(())
    }

    fn events(&self) -> Receiver<DisplayEvent> {
        self.subscribers.subscribe()
    }
}
