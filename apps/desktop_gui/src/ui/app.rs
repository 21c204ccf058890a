//! App shell: sign-in screen and the patient workspace (search box, form,
//! filtered table, delete confirmation).

use client_core::{filter_by_name, FormMode, PatientController, StoreUpdate};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::domain::{Patient, PatientId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiErrorCategory, UiEvent};
use crate::controller::orchestration::{dispatch_backend_command, dispatch_store_request};

pub const SETTINGS_STORAGE_KEY: &str = "patient_desk_settings";

const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Server URL from the command line or environment; overrides any
    /// persisted value when present.
    pub server_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSettings {
    pub server_url: String,
    pub display_name: String,
}

fn resolve_startup_settings(
    startup: &StartupConfig,
    persisted: Option<PersistedSettings>,
) -> (String, String) {
    let display_name = persisted
        .as_ref()
        .map(|settings| settings.display_name.clone())
        .unwrap_or_default();
    let server_url = startup
        .server_url
        .clone()
        .or(persisted.map(|settings| settings.server_url))
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    (server_url, display_name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppViewState {
    Login,
    Patients,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    category: UiErrorCategory,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

pub struct PatientDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,
    display_name: String,

    controller: PatientController,
    search_term: String,

    status: String,
    status_banner: Option<StatusBanner>,
    view_state: AppViewState,
}

impl PatientDeskApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
        persisted_settings: Option<PersistedSettings>,
    ) -> Self {
        let (server_url, display_name) = resolve_startup_settings(&startup, persisted_settings);
        Self {
            cmd_tx,
            ui_rx,
            server_url,
            display_name,
            controller: PatientController::new(),
            search_term: String::new(),
            status: "Not signed in".to_string(),
            status_banner: None,
            view_state: AppViewState::Login,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Connected => {
                    self.view_state = AppViewState::Patients;
                    self.status_banner = None;
                    self.status = "Connected - loading patients".to_string();
                    dispatch_store_request(
                        &self.cmd_tx,
                        self.controller.load_all(),
                        &mut self.status,
                    );
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Store(update) => {
                    self.status = match &update {
                        StoreUpdate::Loaded(patients) => {
                            format!("Loaded {} patients", patients.len())
                        }
                        StoreUpdate::Created(patient) => format!("Added {}", patient.name),
                        StoreUpdate::Updated(patient) => format!("Saved {}", patient.name),
                        StoreUpdate::Deleted(_) => "Patient deleted".to_string(),
                    };
                    self.controller.apply(update);
                }
                UiEvent::Error(err) => {
                    self.status = "Last request failed".to_string();
                    self.status_banner = Some(StatusBanner {
                        category: err.category(),
                        message: err.message().to_string(),
                    });
                }
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = &self.status_banner else {
            return;
        };
        let label = format!("{}: {}", err_label(banner.category), banner.message);
        let mut dismissed = false;
        ui.horizontal(|ui| {
            ui.colored_label(ui.visuals().error_fg_color, label);
            if ui.small_button("Dismiss").clicked() {
                dismissed = true;
            }
        });
        if dismissed {
            self.status_banner = None;
        }
    }

    fn show_login_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(380.0, 480.0);
            let top_space = (avail.y * 0.15).clamp(18.0, 120.0);
            ui.add_space(top_space);

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);
                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .corner_radius(12.0)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(18, 16))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
                        ui.heading("Patient Desk");
                        ui.weak("Sign in to manage patient records.");
                        ui.add_space(4.0);
                        self.show_status_banner(ui);

                        ui.label("Display name");
                        ui.text_edit_singleline(&mut self.display_name);
                        ui.label("Server URL");
                        ui.text_edit_singleline(&mut self.server_url);
                        ui.add_space(6.0);

                        let can_sign_in = !self.display_name.is_empty();
                        if ui
                            .add_enabled(can_sign_in, egui::Button::new("Sign in"))
                            .clicked()
                        {
                            self.status = format!("Connecting to {}", self.server_url);
                            dispatch_backend_command(
                                &self.cmd_tx,
                                BackendCommand::Connect {
                                    server_url: self.server_url.clone(),
                                },
                                &mut self.status,
                            );
                        }
                    });
            });
        });
    }

    fn show_patient_workspace(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("workspace_header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("Patient Management");
                ui.separator();
                ui.weak(format!("{} @ {}", self.display_name, self.server_url));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.status.clone());
                });
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Search");
                ui.add(
                    egui::TextEdit::singleline(&mut self.search_term)
                        .hint_text("Search Patient by Name")
                        .desired_width(260.0),
                );
                if !self.search_term.is_empty() && ui.small_button("Clear").clicked() {
                    self.search_term.clear();
                }
            });
            ui.add_space(8.0);

            self.show_patient_form(ui);
            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);
            self.show_patient_table(ui);
        });
    }

    fn show_patient_form(&mut self, ui: &mut egui::Ui) {
        let editing = matches!(self.controller.mode(), FormMode::Editing(_));

        ui.horizontal(|ui| {
            let draft = self.controller.draft_mut();
            ui.add(
                egui::TextEdit::singleline(&mut draft.name)
                    .hint_text("Name")
                    .desired_width(180.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut draft.age)
                    .hint_text("Age")
                    .desired_width(60.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut draft.gender)
                    .hint_text("Gender")
                    .desired_width(90.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut draft.address)
                    .hint_text("Address")
                    .desired_width(260.0),
            );
        });
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let submit_label = if editing { "Save Changes" } else { "Add Patient" };
            if ui.button(submit_label).clicked() {
                match self.controller.submit() {
                    Some(request) => {
                        dispatch_store_request(&self.cmd_tx, request, &mut self.status)
                    }
                    None => {
                        self.status = "All four patient fields are required".to_string();
                    }
                }
            }
            if editing && ui.button("Cancel").clicked() {
                self.controller.cancel_edit();
                self.status = "Edit cancelled".to_string();
            }
        });
    }

    fn show_patient_table(&mut self, ui: &mut egui::Ui) {
        // Row buttons only record the requested transition; the controller
        // is updated after the immutable walk over its list.
        let mut begin_edit: Option<Patient> = None;
        let mut request_delete: Option<PatientId> = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("patient_table")
                .striped(true)
                .num_columns(5)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("Name").strong());
                    ui.label(egui::RichText::new("Age").strong());
                    ui.label(egui::RichText::new("Gender").strong());
                    ui.label(egui::RichText::new("Address").strong());
                    ui.label(egui::RichText::new("Actions").strong());
                    ui.end_row();

                    for patient in filter_by_name(self.controller.patients(), &self.search_term) {
                        ui.label(&patient.name);
                        ui.label(&patient.age);
                        ui.label(&patient.gender);
                        ui.label(&patient.address);
                        ui.horizontal(|ui| {
                            if ui.small_button("Edit").clicked() {
                                begin_edit = Some(patient.clone());
                            }
                            if ui.small_button("Delete").clicked() {
                                request_delete = Some(patient.id);
                            }
                        });
                        ui.end_row();
                    }
                });
        });

        if let Some(patient) = begin_edit {
            self.status = format!("Editing {}", patient.name);
            self.controller.begin_edit(&patient);
        }
        if let Some(id) = request_delete {
            self.controller.request_delete(id);
        }
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.controller.pending_delete() else {
            return;
        };
        let name = self
            .controller
            .patients()
            .iter()
            .find(|patient| patient.id == pending)
            .map(|patient| patient.name.clone());

        let mut confirm = false;
        let mut cancel = false;
        egui::Window::new("Confirm delete")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Are you sure you want to delete this patient?");
                if let Some(name) = &name {
                    ui.weak(name);
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        confirm = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if confirm {
            if let Some(request) = self.controller.confirm_delete() {
                dispatch_store_request(&self.cmd_tx, request, &mut self.status);
            }
        } else if cancel {
            self.controller.cancel_delete();
            self.status = "Delete cancelled".to_string();
        }
    }
}

impl eframe::App for PatientDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        match self.view_state {
            AppViewState::Login => self.show_login_screen(ctx),
            AppViewState::Patients => self.show_patient_workspace(ctx),
        }

        self.show_delete_confirmation(ctx);

        // Backend events arrive between frames; poll at a modest cadence.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            server_url: self.server_url.clone(),
            display_name: self.display_name.clone(),
        };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
