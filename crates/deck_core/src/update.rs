use crate::{
    AppState, CampaignStatus, Effect, FetchPurpose, Msg, Page, PopulateDraft, PopulateStage,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            state.mark_session_stale();
            // Independent fetches: each succeeds or fails on its own.
            vec![
                Effect::CheckHealth,
                Effect::FetchLists {
                    generation: state.generation(),
                    purpose: FetchPurpose::Refresh,
                },
                Effect::FetchSenders,
            ]
        }
        Msg::PageSelected(page) => {
            if page == state.page() {
                return (state, Vec::new());
            }
            let mut effects = Vec::new();
            if state.page() == Page::Lists && state.teardown_lists_view() {
                effects.push(Effect::CancelPollTimer);
            }
            state.set_page(page);
            match page {
                Page::Lists => {
                    state.mark_session_stale();
                    effects.push(Effect::FetchLists {
                        generation: state.generation(),
                        purpose: FetchPurpose::Refresh,
                    });
                }
                Page::Senders => effects.push(Effect::FetchSenders),
                Page::Campaigns => {
                    // The draft form needs both collections.
                    effects.push(Effect::FetchLists {
                        generation: state.generation(),
                        purpose: FetchPurpose::Refresh,
                    });
                    effects.push(Effect::FetchSenders);
                }
            }
            effects
        }
        Msg::HealthChecked { ok } => {
            state.set_health(ok);
            Vec::new()
        }
        Msg::ListsFetched {
            generation,
            purpose,
            result,
            now,
        } => {
            if generation != state.generation() {
                // Stale response from a torn-down view.
                return (state, Vec::new());
            }
            match (purpose, result) {
                (FetchPurpose::Refresh, Ok(fetched)) => state.accept_lists_refresh(fetched, now),
                (FetchPurpose::Refresh, Err(message)) => {
                    if state.populate_stage() == PopulateStage::Submitting {
                        state.set_populate_stage(PopulateStage::Idle);
                    }
                    state.set_error(message);
                    Vec::new()
                }
                (FetchPurpose::Poll, Ok(fetched)) => state.apply_poll_fetch(fetched, now),
                // A failed poll tick is a no-op; the session keeps its cadence.
                (FetchPurpose::Poll, Err(_)) => Vec::new(),
            }
        }
        Msg::PopulateSubmitted { draft } => {
            if state.populate_stage() == PopulateStage::Submitting {
                return (state, Vec::new());
            }
            if let Err(message) = validate_populate(&draft) {
                state.set_error(message);
                return (state, Vec::new());
            }
            state.remember_populate(draft.clone());
            state.set_populate_stage(PopulateStage::Submitting);
            vec![Effect::SubmitPopulate { draft }, Effect::SavePreferences]
        }
        Msg::PopulateAcked { result } => match result {
            Ok(()) => {
                // Acknowledged; the follow-up refresh takes the poll snapshot.
                vec![Effect::FetchLists {
                    generation: state.generation(),
                    purpose: FetchPurpose::Refresh,
                }]
            }
            Err(message) => {
                state.set_populate_stage(PopulateStage::Idle);
                state.set_error(message);
                Vec::new()
            }
        },
        Msg::PollTicked => {
            if state.page() == Page::Lists && state.poll_active() {
                vec![Effect::FetchLists {
                    generation: state.generation(),
                    purpose: FetchPurpose::Poll,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::ListSelected { id } => {
            state.select_list(id.clone());
            vec![Effect::FetchProspects { list_id: id }]
        }
        Msg::ProspectsFetched { list_id, result } => {
            if state.selected_list() != Some(&list_id) {
                // Selection moved on while the fetch was in flight.
                return (state, Vec::new());
            }
            match result {
                Ok(prospects) => state.set_prospects(prospects),
                Err(message) => state.set_error(message),
            }
            Vec::new()
        }
        Msg::RenameConfirmed { id, name } => {
            let name = name.trim().to_owned();
            if name.is_empty() {
                state.set_error("list name must not be empty");
                Vec::new()
            } else {
                vec![Effect::RenameList { id, name }]
            }
        }
        Msg::ListRenamed { result } => after_list_mutation(&mut state, result),
        Msg::DeleteConfirmed { id } => vec![Effect::DeleteList { id }],
        Msg::ListDeleted { id, result } => {
            if result.is_ok() {
                state.forget_list(&id);
            }
            after_list_mutation(&mut state, result)
        }
        Msg::SendersFetched { result } => {
            match result {
                Ok(senders) => state.set_senders(senders),
                Err(message) => state.set_error(message),
            }
            Vec::new()
        }
        Msg::RefreshClicked => match state.page() {
            Page::Lists => vec![Effect::FetchLists {
                generation: state.generation(),
                purpose: FetchPurpose::Refresh,
            }],
            Page::Senders => vec![Effect::FetchSenders],
            Page::Campaigns => vec![
                Effect::FetchLists {
                    generation: state.generation(),
                    purpose: FetchPurpose::Refresh,
                },
                Effect::FetchSenders,
            ],
        },
        Msg::SenderToggleClicked { id } => vec![Effect::ToggleSender { id }],
        Msg::SenderToggled { result } => match result {
            // Fetch-after-write: no local patching.
            Ok(_) => vec![Effect::FetchSenders],
            Err(message) => {
                state.set_error(message);
                Vec::new()
            }
        },
        Msg::SenderFormSubmitted {
            id,
            name,
            storage_state,
        } => {
            let name = name.trim().to_owned();
            if name.is_empty() {
                state.set_error("sender name must not be empty");
                Vec::new()
            } else {
                vec![Effect::SaveSender {
                    id,
                    name,
                    storage_state,
                }]
            }
        }
        Msg::SenderSaved { result } => match result {
            Ok(()) => vec![Effect::FetchSenders],
            Err(message) => {
                state.set_error(message);
                Vec::new()
            }
        },
        Msg::CampaignDrafted {
            name,
            template,
            limit,
            list_ids,
            sender_id,
        } => {
            let name = name.trim().to_owned();
            if name.is_empty() || template.trim().is_empty() {
                state.set_error("campaign needs a name and a message template");
                return (state, Vec::new());
            }
            if limit == 0 {
                state.set_error("campaign limit must be positive");
                return (state, Vec::new());
            }
            state.insert_campaign(name, template, limit, list_ids, sender_id);
            vec![Effect::SavePreferences]
        }
        Msg::CampaignSendClicked { id } => {
            if state.any_campaign_running() {
                return (state, Vec::new());
            }
            let Some(campaign) = state.campaign(id) else {
                return (state, Vec::new());
            };
            if campaign.status != CampaignStatus::Draft {
                return (state, Vec::new());
            }
            let limit = campaign.limit;
            let default_dm = campaign.template.clone();
            if let Some(campaign) = state.campaign_mut(id) {
                campaign.status = CampaignStatus::Running;
            }
            vec![Effect::SendCampaign {
                campaign_id: id,
                limit,
                default_dm,
            }]
        }
        Msg::CampaignSendFinished { id, result } => {
            match result {
                Ok(outcome) => {
                    if let Some(campaign) = state.campaign_mut(id) {
                        campaign.status = CampaignStatus::Completed;
                        campaign.outcome = Some(outcome);
                    }
                }
                Err(message) => {
                    if let Some(campaign) = state.campaign_mut(id) {
                        campaign.status = CampaignStatus::Draft;
                    }
                    state.set_error(message);
                }
            }
            vec![Effect::SavePreferences]
        }
        Msg::CampaignDiscarded { id } => {
            let removable = state
                .campaign(id)
                .is_some_and(|campaign| campaign.status != CampaignStatus::Running);
            if removable {
                state.remove_campaign(id);
                vec![Effect::SavePreferences]
            } else {
                Vec::new()
            }
        }
        Msg::VerifyClicked { limit } => {
            if state.verify_in_flight() {
                return (state, Vec::new());
            }
            if limit == 0 {
                state.set_error("verify limit must be positive");
                return (state, Vec::new());
            }
            state.set_verify_in_flight(true);
            vec![Effect::VerifyConnections { limit }]
        }
        Msg::VerifyFinished { result } => {
            state.set_verify_in_flight(false);
            match result {
                Ok(outcome) => state.set_verify_outcome(outcome),
                Err(message) => state.set_error(message),
            }
            Vec::new()
        }
        Msg::PreferencesLoaded(prefs) => {
            state.restore_preferences(prefs);
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.clear_error();
            Vec::new()
        }
    };

    (state, effects)
}

/// Shared tail for rename/delete acknowledgments: on success re-fetch the
/// whole collection, on failure surface the message and leave state alone.
fn after_list_mutation(state: &mut AppState, result: Result<(), String>) -> Vec<Effect> {
    match result {
        Ok(()) => vec![Effect::FetchLists {
            generation: state.generation(),
            purpose: FetchPurpose::Refresh,
        }],
        Err(message) => {
            state.set_error(message);
            Vec::new()
        }
    }
}

fn validate_populate(draft: &PopulateDraft) -> Result<(), String> {
    let trimmed = draft.search_url.trim();
    if trimmed.is_empty() {
        return Err("search URL must not be empty".to_owned());
    }
    let parsed = url::Url::parse(trimmed).map_err(|err| format!("invalid search URL: {err}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("search URL must be http or https".to_owned());
    }
    if draft.profile_limit == 0 {
        return Err("profile limit must be positive".to_owned());
    }
    Ok(())
}
