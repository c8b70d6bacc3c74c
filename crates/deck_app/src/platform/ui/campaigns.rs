use deck_core::{CampaignStatus, DashboardViewModel, Msg};
use eframe::egui;

use super::FormBuffers;

pub fn show(
    ui: &mut egui::Ui,
    view: &DashboardViewModel,
    buffers: &mut FormBuffers,
    msgs: &mut Vec<Msg>,
) {
    draft_form(ui, view, buffers, msgs);
    ui.separator();
    campaign_table(ui, view, msgs);
    ui.separator();
    verify_card(ui, view, buffers, msgs);
}

fn draft_form(
    ui: &mut egui::Ui,
    view: &DashboardViewModel,
    buffers: &mut FormBuffers,
    msgs: &mut Vec<Msg>,
) {
    egui::CollapsingHeader::new("Draft a campaign")
        .default_open(true)
        .show(ui, |ui| {
            let form = &mut buffers.campaign;
            ui.horizontal(|ui| {
                ui.label("Name");
                ui.add(egui::TextEdit::singleline(&mut form.name).desired_width(280.0));
                ui.label("Message limit");
                ui.add(egui::DragValue::new(&mut form.limit).range(1..=500));
            });
            ui.label("Message template");
            ui.add(
                egui::TextEdit::multiline(&mut form.template)
                    .hint_text("Hi {first_name}, …")
                    .desired_rows(3)
                    .desired_width(480.0),
            );
            ui.horizontal(|ui| {
                ui.label("Target lists:");
                if view.lists.is_empty() {
                    ui.label("(none available)");
                }
                for list in &view.lists {
                    let mut checked = form.selected_lists.contains(&list.id);
                    if ui.checkbox(&mut checked, &list.name).changed() {
                        if checked {
                            form.selected_lists.insert(list.id.clone());
                        } else {
                            form.selected_lists.remove(&list.id);
                        }
                    }
                }
            });
            ui.horizontal(|ui| {
                ui.label("Sender");
                let current = form
                    .sender_id
                    .as_ref()
                    .and_then(|id| {
                        view.senders
                            .iter()
                            .find(|sender| &sender.id == id)
                            .map(|sender| sender.name.clone())
                    })
                    .unwrap_or_else(|| "round robin".to_owned());
                egui::ComboBox::from_id_salt("campaign_sender")
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut form.sender_id, None, "round robin");
                        for sender in &view.senders {
                            ui.selectable_value(
                                &mut form.sender_id,
                                Some(sender.id.clone()),
                                &sender.name,
                            );
                        }
                    });
            });
            let ready = !form.name.trim().is_empty() && !form.template.trim().is_empty();
            if ui.add_enabled(ready, egui::Button::new("Save draft")).clicked() {
                msgs.push(Msg::CampaignDrafted {
                    name: form.name.trim().to_owned(),
                    template: form.template.clone(),
                    limit: form.limit,
                    list_ids: form.selected_lists.iter().cloned().collect(),
                    sender_id: form.sender_id.clone(),
                });
                *form = Default::default();
            }
        });
}

fn campaign_table(ui: &mut egui::Ui, view: &DashboardViewModel, msgs: &mut Vec<Msg>) {
    if view.campaigns.is_empty() {
        ui.label("No campaigns yet.");
        return;
    }

    let any_running = view
        .campaigns
        .iter()
        .any(|campaign| campaign.status == CampaignStatus::Running);

    egui::Grid::new("campaigns_table")
        .striped(true)
        .num_columns(6)
        .show(ui, |ui| {
            ui.strong("Name");
            ui.strong("Status");
            ui.strong("Lists");
            ui.strong("Sender");
            ui.strong("Outcome");
            ui.strong("");
            ui.end_row();

            for campaign in &view.campaigns {
                ui.label(&campaign.name);
                match campaign.status {
                    CampaignStatus::Draft => {
                        ui.label("draft");
                    }
                    CampaignStatus::Running => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("sending…");
                        });
                    }
                    CampaignStatus::Completed => {
                        ui.colored_label(egui::Color32::DARK_GREEN, "completed");
                    }
                }
                ui.label(campaign.list_names.join(", "));
                ui.label(campaign.sender_name.as_deref().unwrap_or("round robin"));
                match &campaign.outcome {
                    Some(outcome) => ui.label(format!(
                        "{} sent / {} attempted, {} errors",
                        outcome.sent, outcome.attempted, outcome.errors
                    )),
                    None => ui.label(""),
                };
                ui.horizontal(|ui| {
                    if campaign.status == CampaignStatus::Draft {
                        let send = ui.add_enabled(!any_running, egui::Button::new("Send"));
                        if send.clicked() {
                            msgs.push(Msg::CampaignSendClicked { id: campaign.id });
                        }
                    }
                    if campaign.status != CampaignStatus::Running
                        && ui.small_button("Discard").clicked()
                    {
                        msgs.push(Msg::CampaignDiscarded { id: campaign.id });
                    }
                });
                ui.end_row();
            }
        });
}

fn verify_card(
    ui: &mut egui::Ui,
    view: &DashboardViewModel,
    buffers: &mut FormBuffers,
    msgs: &mut Vec<Msg>,
) {
    ui.heading("Connection check");
    ui.horizontal(|ui| {
        ui.label("Invites to check");
        ui.add(egui::DragValue::new(&mut buffers.verify_limit).range(1..=500));
        let button = ui.add_enabled(!view.verify_in_flight, egui::Button::new("Verify"));
        if button.clicked() {
            msgs.push(Msg::VerifyClicked {
                limit: buffers.verify_limit,
            });
        }
        if view.verify_in_flight {
            ui.spinner();
        }
    });
    if let Some(outcome) = &view.verify {
        ui.label(format!(
            "Checked {} pending invites, {} newly connected.",
            outcome.checked, outcome.connected
        ));
    }
}
