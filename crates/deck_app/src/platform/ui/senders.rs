use deck_core::{DashboardViewModel, Msg};
use eframe::egui;

use super::{timestamp_label, FormBuffers, SenderDialog};

pub fn show(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    view: &DashboardViewModel,
    buffers: &mut FormBuffers,
    msgs: &mut Vec<Msg>,
) {
    ui.horizontal(|ui| {
        ui.heading("Senders");
        if ui.button("Add sender").clicked() {
            buffers.sender = Some(SenderDialog {
                id: None,
                name: String::new(),
                storage_state_text: String::new(),
                validation_error: None,
            });
        }
    });

    if !view.senders_loaded {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("loading senders…");
        });
    } else if view.senders.is_empty() {
        ui.label("No senders configured yet.");
    } else {
        sender_table(ui, view, buffers, msgs);
    }

    sender_dialog(ctx, buffers, msgs);
}

fn sender_table(
    ui: &mut egui::Ui,
    view: &DashboardViewModel,
    buffers: &mut FormBuffers,
    msgs: &mut Vec<Msg>,
) {
    egui::Grid::new("senders_table")
        .striped(true)
        .num_columns(5)
        .show(ui, |ui| {
            ui.strong("Name");
            ui.strong("State");
            ui.strong("Session");
            ui.strong("Updated");
            ui.strong("");
            ui.end_row();

            for sender in &view.senders {
                ui.label(&sender.name);
                let toggle = if sender.enabled { "Disable" } else { "Enable" };
                if ui.small_button(toggle).clicked() {
                    msgs.push(Msg::SenderToggleClicked {
                        id: sender.id.clone(),
                    });
                }
                if sender.has_session {
                    ui.colored_label(egui::Color32::DARK_GREEN, "logged in");
                } else {
                    ui.colored_label(egui::Color32::GRAY, "no session");
                }
                ui.label(timestamp_label(sender.updated_at));
                if ui.small_button("Edit").clicked() {
                    buffers.sender = Some(SenderDialog {
                        id: Some(sender.id.clone()),
                        name: sender.name.clone(),
                        storage_state_text: String::new(),
                        validation_error: None,
                    });
                }
                ui.end_row();
            }
        });
}

fn sender_dialog(ctx: &egui::Context, buffers: &mut FormBuffers, msgs: &mut Vec<Msg>) {
    let mut close = false;
    if let Some(dialog) = &mut buffers.sender {
        let title = if dialog.id.is_some() {
            "Edit sender"
        } else {
            "Add sender"
        };
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Name");
                    ui.text_edit_singleline(&mut dialog.name);
                });
                ui.label("Session storage state (JSON, optional)");
                ui.add(
                    egui::TextEdit::multiline(&mut dialog.storage_state_text)
                        .hint_text("{\"cookies\": […]}")
                        .desired_rows(4)
                        .desired_width(420.0),
                );
                if let Some(error) = &dialog.validation_error {
                    ui.colored_label(egui::Color32::RED, error);
                }
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                    if ui.button("Save").clicked() {
                        let text = dialog.storage_state_text.trim();
                        let storage_state = if text.is_empty() {
                            Ok(None)
                        } else {
                            serde_json::from_str::<serde_json::Value>(text)
                                .map(|_| Some(text.to_owned()))
                        };
                        match storage_state {
                            Ok(storage_state) => {
                                msgs.push(Msg::SenderFormSubmitted {
                                    id: dialog.id.clone(),
                                    name: dialog.name.clone(),
                                    storage_state,
                                });
                                close = true;
                            }
                            Err(err) => {
                                dialog.validation_error =
                                    Some(format!("storage state is not valid JSON: {err}"));
                            }
                        }
                    }
                });
            });
    }
    if close {
        buffers.sender = None;
    }
}
