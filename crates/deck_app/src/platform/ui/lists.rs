use deck_core::{ConnectionStatus, DashboardViewModel, Msg};
use eframe::egui;

use super::{timestamp_label, DeleteDialog, FormBuffers, RenameDialog};

pub fn show(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    view: &DashboardViewModel,
    buffers: &mut FormBuffers,
    msgs: &mut Vec<Msg>,
) {
    populate_form(ui, view, buffers, msgs);
    ui.separator();
    list_table(ui, view, buffers, msgs);
    if view.selected_list.is_some() {
        ui.separator();
        prospects_panel(ui, view);
    }
    rename_dialog(ctx, buffers, msgs);
    delete_dialog(ctx, buffers, msgs);
}

fn populate_form(
    ui: &mut egui::Ui,
    view: &DashboardViewModel,
    buffers: &mut FormBuffers,
    msgs: &mut Vec<Msg>,
) {
    egui::CollapsingHeader::new("Populate a list")
        .default_open(true)
        .show(ui, |ui| {
            let form = &mut buffers.populate;
            ui.horizontal(|ui| {
                ui.label("Search URL");
                ui.add(
                    egui::TextEdit::singleline(&mut form.search_url)
                        .hint_text("https://www.linkedin.com/search/results/people/?…")
                        .desired_width(480.0),
                );
            });
            ui.horizontal(|ui| {
                ui.label("Profile limit");
                ui.add(egui::DragValue::new(&mut form.profile_limit).range(1..=500));
                ui.checkbox(&mut form.collect_only, "Collect only");
                ui.checkbox(&mut form.one_sender, "Single sender");
                ui.checkbox(&mut form.send_note, "Send connection note");
            });
            if form.send_note {
                ui.add(
                    egui::TextEdit::multiline(&mut form.note_text)
                        .hint_text("Hi {first_name}, …")
                        .desired_rows(2)
                        .desired_width(480.0),
                );
            }
            ui.horizontal(|ui| {
                let button = ui.add_enabled(
                    !view.populate_in_flight,
                    egui::Button::new("Populate"),
                );
                if button.clicked() {
                    msgs.push(Msg::PopulateSubmitted {
                        draft: form.to_draft(),
                    });
                }
                if view.populate_in_flight {
                    ui.spinner();
                    ui.label("submitting…");
                }
            });
        });
}

fn list_table(
    ui: &mut egui::Ui,
    view: &DashboardViewModel,
    buffers: &mut FormBuffers,
    msgs: &mut Vec<Msg>,
) {
    if !view.lists_loaded {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("loading lists…");
        });
        return;
    }
    if view.lists.is_empty() {
        ui.label("No lists yet. Populate one above.");
        return;
    }

    egui::Grid::new("lists_table")
        .striped(true)
        .num_columns(5)
        .show(ui, |ui| {
            ui.strong("Name");
            ui.strong("Status");
            ui.strong("Query");
            ui.strong("Created");
            ui.strong("");
            ui.end_row();

            for list in &view.lists {
                let selected = view.selected_list.as_deref() == Some(list.id.as_str());
                if ui.selectable_label(selected, &list.name).clicked() {
                    msgs.push(Msg::ListSelected {
                        id: list.id.clone(),
                    });
                }
                if list.processing {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Processing…");
                    });
                } else {
                    ui.label(format!("{} profiles", list.profile_count));
                }
                ui.label(&list.search_url);
                ui.label(timestamp_label(list.created_at));
                ui.horizontal(|ui| {
                    if ui.small_button("Rename").clicked() {
                        buffers.rename = Some(RenameDialog {
                            list_id: list.id.clone(),
                            name: list.name.clone(),
                        });
                    }
                    if ui.small_button("Delete").clicked() {
                        buffers.delete = Some(DeleteDialog {
                            list_id: list.id.clone(),
                            list_name: list.name.clone(),
                        });
                    }
                });
                ui.end_row();
            }
        });
}

fn prospects_panel(ui: &mut egui::Ui, view: &DashboardViewModel) {
    ui.heading("Prospects");
    if !view.prospects_loaded {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("loading prospects…");
        });
        return;
    }
    if view.prospects.is_empty() {
        ui.label("No prospects in this list.");
        return;
    }

    egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
        egui::Grid::new("prospects_table")
            .striped(true)
            .num_columns(4)
            .show(ui, |ui| {
                ui.strong("Name");
                ui.strong("Profile");
                ui.strong("Status");
                ui.strong("Note");
                ui.end_row();

                for prospect in &view.prospects {
                    ui.label(prospect.name.as_deref().unwrap_or("(unknown)"));
                    ui.hyperlink_to(prospect.profile_url.as_str(), &prospect.profile_url);
                    ui.label(status_label(prospect.status));
                    ui.label(prospect.note.as_deref().unwrap_or(""));
                    ui.end_row();
                }
            });
    });
}

fn status_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::New => "new",
        ConnectionStatus::Invited => "invited",
        ConnectionStatus::Connected => "connected",
    }
}

fn rename_dialog(ctx: &egui::Context, buffers: &mut FormBuffers, msgs: &mut Vec<Msg>) {
    let mut close = false;
    if let Some(dialog) = &mut buffers.rename {
        egui::Window::new("Rename list")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.text_edit_singleline(&mut dialog.name);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                    if ui.button("Save").clicked() {
                        msgs.push(Msg::RenameConfirmed {
                            id: dialog.list_id.clone(),
                            name: dialog.name.clone(),
                        });
                        close = true;
                    }
                });
            });
    }
    if close {
        buffers.rename = None;
    }
}

fn delete_dialog(ctx: &egui::Context, buffers: &mut FormBuffers, msgs: &mut Vec<Msg>) {
    let mut close = false;
    if let Some(dialog) = &buffers.delete {
        egui::Window::new("Delete list")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Delete \"{}\" and all of its prospects?",
                    dialog.list_name
                ));
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                    if ui.button("Delete").clicked() {
                        msgs.push(Msg::DeleteConfirmed {
                            id: dialog.list_id.clone(),
                        });
                        close = true;
                    }
                });
            });
    }
    if close {
        buffers.delete = None;
    }
}
