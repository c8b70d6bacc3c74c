//! Immediate-mode views. Rendering reads the view model and form buffers
//! and returns messages; it never touches core state directly.

mod campaigns;
mod lists;
mod senders;

use deck_core::{DashboardViewModel, Msg, Page, PopulateDraft, SenderRotation};
use eframe::egui;

/// In-progress form text owned by the shell. Only a submit turns any of
/// this into a message.
pub struct FormBuffers {
    pub populate: PopulateBuffer,
    pub rename: Option<RenameDialog>,
    pub delete: Option<DeleteDialog>,
    pub sender: Option<SenderDialog>,
    pub campaign: CampaignBuffer,
    pub verify_limit: u32,
}

impl Default for FormBuffers {
    fn default() -> Self {
        Self {
            populate: PopulateBuffer::default(),
            rename: None,
            delete: None,
            sender: None,
            campaign: CampaignBuffer::default(),
            verify_limit: 50,
        }
    }
}

impl FormBuffers {
    /// Pre-fills the populate form, used once at startup with the
    /// persisted last-used values.
    pub fn seed_populate(&mut self, draft: PopulateDraft) {
        self.populate = PopulateBuffer {
            search_url: draft.search_url,
            profile_limit: draft.profile_limit,
            collect_only: draft.collect_only,
            send_note: draft.send_note,
            note_text: draft.note_text,
            one_sender: draft.rotation == SenderRotation::OneSender,
        };
    }
}

pub struct PopulateBuffer {
    pub search_url: String,
    pub profile_limit: u32,
    pub collect_only: bool,
    pub send_note: bool,
    pub note_text: String,
    pub one_sender: bool,
}

impl Default for PopulateBuffer {
    fn default() -> Self {
        Self {
            search_url: String::new(),
            profile_limit: deck_core::DEFAULT_PROFILE_LIMIT,
            collect_only: false,
            send_note: false,
            note_text: String::new(),
            one_sender: false,
        }
    }
}

impl PopulateBuffer {
    pub fn to_draft(&self) -> PopulateDraft {
        PopulateDraft {
            search_url: self.search_url.clone(),
            profile_limit: self.profile_limit,
            collect_only: self.collect_only,
            send_note: self.send_note,
            note_text: self.note_text.clone(),
            rotation: if self.one_sender {
                SenderRotation::OneSender
            } else {
                SenderRotation::RoundRobin
            },
        }
    }
}

pub struct RenameDialog {
    pub list_id: String,
    pub name: String,
}

pub struct DeleteDialog {
    pub list_id: String,
    pub list_name: String,
}

pub struct SenderDialog {
    /// `None` creates a sender, `Some` edits an existing one.
    pub id: Option<String>,
    pub name: String,
    pub storage_state_text: String,
    pub validation_error: Option<String>,
}

pub struct CampaignBuffer {
    pub name: String,
    pub template: String,
    pub limit: u32,
    pub selected_lists: std::collections::BTreeSet<String>,
    pub sender_id: Option<String>,
}

impl Default for CampaignBuffer {
    fn default() -> Self {
        Self {
            name: String::new(),
            template: String::new(),
            limit: 20,
            selected_lists: std::collections::BTreeSet::new(),
            sender_id: None,
        }
    }
}

pub fn render(
    ctx: &egui::Context,
    view: &DashboardViewModel,
    buffers: &mut FormBuffers,
) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::TopBottomPanel::top("deck_nav").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Prospect Deck");
            ui.separator();
            for (page, label) in [
                (Page::Lists, "Lists"),
                (Page::Senders, "Senders"),
                (Page::Campaigns, "Campaigns"),
            ] {
                if ui.selectable_label(view.page == page, label).clicked() {
                    msgs.push(Msg::PageSelected(page));
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Refresh").clicked() {
                    msgs.push(Msg::RefreshClicked);
                }
            });
        });
    });

    egui::TopBottomPanel::bottom("deck_status").show(ctx, |ui| {
        status_bar(ui, view, &mut msgs);
    });

    egui::CentralPanel::default().show(ctx, |ui| match view.page {
        Page::Lists => lists::show(ui, ctx, view, buffers, &mut msgs),
        Page::Senders => senders::show(ui, ctx, view, buffers, &mut msgs),
        Page::Campaigns => campaigns::show(ui, view, buffers, &mut msgs),
    });

    msgs
}

fn status_bar(ui: &mut egui::Ui, view: &DashboardViewModel, msgs: &mut Vec<Msg>) {
    ui.horizontal(|ui| {
        match view.health {
            Some(true) => ui.colored_label(egui::Color32::DARK_GREEN, "backend: ok"),
            Some(false) => ui.colored_label(egui::Color32::RED, "backend: unreachable"),
            None => ui.label("backend: checking…"),
        };
        if view.poll_active {
            ui.separator();
            ui.spinner();
            ui.label("polling for new profiles");
        }
        if let Some(error) = &view.error {
            ui.separator();
            ui.colored_label(egui::Color32::RED, error);
            if ui.small_button("Dismiss").clicked() {
                msgs.push(Msg::ErrorDismissed);
            }
        }
    });
}

pub(crate) fn timestamp_label(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match value {
        Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
        None => "—".to_owned(),
    }
}
