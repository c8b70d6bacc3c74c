//! Bridges core effects to client requests and client events back to core
//! messages. Each submitted request is remembered with enough context to
//! rebuild the message the core expects.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use deck_client::{AckDto, ClientHandle, ClientOutcome, ClientRequest, RequestId};
use deck_core::{CampaignId, Effect, FetchPurpose, ListId, Msg};
use deck_logging::{deck_debug, deck_warn};

use super::convert;

pub struct EffectRunner {
    client: ClientHandle,
    next_id: RequestId,
    pending: HashMap<RequestId, Pending>,
}

#[derive(Debug, Clone)]
enum Pending {
    Health,
    Lists {
        generation: u64,
        purpose: FetchPurpose,
    },
    Prospects,
    PopulateAck,
    Rename,
    Delete {
        list_id: ListId,
    },
    Senders,
    Toggle,
    SenderSave,
    CampaignSend {
        campaign_id: CampaignId,
    },
    Verify,
}

impl EffectRunner {
    pub fn new(client: ClientHandle) -> Self {
        Self {
            client,
            next_id: 1,
            pending: HashMap::new(),
        }
    }

    /// Submits one network effect. Timer and persistence effects belong to
    /// the shell and must not reach this point.
    pub fn dispatch(&mut self, effect: Effect) {
        let (request, pending) = match effect {
            Effect::CheckHealth => (ClientRequest::Health, Pending::Health),
            Effect::FetchLists {
                generation,
                purpose,
            } => (
                ClientRequest::ListLists,
                Pending::Lists {
                    generation,
                    purpose,
                },
            ),
            Effect::FetchProspects { list_id } => {
                (ClientRequest::ListProspects { list_id }, Pending::Prospects)
            }
            Effect::SubmitPopulate { draft } => (
                ClientRequest::Populate(convert::populate_request(&draft)),
                Pending::PopulateAck,
            ),
            Effect::RenameList { id, name } => {
                (ClientRequest::RenameList { id, name }, Pending::Rename)
            }
            Effect::DeleteList { id } => (
                ClientRequest::DeleteList { id: id.clone() },
                Pending::Delete { list_id: id },
            ),
            Effect::FetchSenders => (ClientRequest::ListSenders, Pending::Senders),
            Effect::ToggleSender { id } => (ClientRequest::ToggleSender { id }, Pending::Toggle),
            Effect::SaveSender {
                id,
                name,
                storage_state,
            } => {
                let storage_state = storage_state.and_then(|text| decode_storage_state(&text));
                let request = match id {
                    Some(id) => ClientRequest::UpdateSender {
                        id,
                        name,
                        storage_state,
                    },
                    None => ClientRequest::CreateSender {
                        name,
                        storage_state,
                    },
                };
                (request, Pending::SenderSave)
            }
            Effect::SendCampaign {
                campaign_id,
                limit,
                default_dm,
            } => (
                ClientRequest::SendCampaign {
                    limit: Some(limit),
                    default_dm: Some(default_dm),
                },
                Pending::CampaignSend { campaign_id },
            ),
            Effect::VerifyConnections { limit } => (
                ClientRequest::VerifyConnections { limit: Some(limit) },
                Pending::Verify,
            ),
            Effect::StartPollTimer | Effect::CancelPollTimer | Effect::SavePreferences => {
                deck_warn!("non-network effect reached the runner: {effect:?}");
                return;
            }
        };

        let id = self.next_id;
        self.next_id += 1;
        deck_debug!("request {id}: {request:?}");
        self.pending.insert(id, pending);
        self.client.submit(id, request);
    }

    /// Converts every event the client has produced since the last frame
    /// into core messages.
    pub fn drain(&mut self, now: DateTime<Utc>) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.client.try_recv() {
            let Some(pending) = self.pending.remove(&event.id) else {
                deck_warn!("event for unknown request {}", event.id);
                continue;
            };
            if let Some(msg) = translate(pending, event.outcome, now) {
                msgs.push(msg);
            }
        }
        msgs
    }

    pub fn shutdown(&self) {
        self.client.shutdown();
    }
}

fn translate(pending: Pending, outcome: ClientOutcome, now: DateTime<Utc>) -> Option<Msg> {
    let msg = match (pending, outcome) {
        (Pending::Health, ClientOutcome::Health(result)) => match result {
            Ok(ok) => Msg::HealthChecked { ok },
            Err(err) => {
                deck_warn!("health check failed: {err}");
                Msg::HealthChecked { ok: false }
            }
        },
        (
            Pending::Lists {
                generation,
                purpose,
            },
            ClientOutcome::Lists(result),
        ) => {
            if let (FetchPurpose::Poll, Err(err)) = (purpose, &result) {
                // Core treats a failed poll tick as a no-op; log it here.
                deck_warn!("poll tick failed: {err}");
            }
            Msg::ListsFetched {
                generation,
                purpose,
                result: result
                    .map(|lists| lists.into_iter().map(convert::list_from_dto).collect())
                    .map_err(|err| err.to_string()),
                now,
            }
        }
        (Pending::Prospects, ClientOutcome::Prospects { list_id, result }) => {
            Msg::ProspectsFetched {
                result: result
                    .map(|prospects| {
                        prospects
                            .into_iter()
                            .map(|dto| convert::prospect_from_dto(dto, &list_id))
                            .collect()
                    })
                    .map_err(|err| err.to_string()),
                list_id,
            }
        }
        (Pending::PopulateAck, ClientOutcome::PopulateAck(result)) => Msg::PopulateAcked {
            result: ack_to_result(result),
        },
        (Pending::Rename, ClientOutcome::Renamed(result)) => Msg::ListRenamed {
            result: result.map(|_| ()).map_err(|err| err.to_string()),
        },
        (Pending::Delete { list_id }, ClientOutcome::Deleted(result)) => Msg::ListDeleted {
            id: list_id,
            result: ack_to_result(result),
        },
        (Pending::Senders, ClientOutcome::Senders(result)) => Msg::SendersFetched {
            result: result
                .map(|senders| senders.into_iter().map(convert::sender_from_dto).collect())
                .map_err(|err| err.to_string()),
        },
        (Pending::Toggle, ClientOutcome::Toggled(result)) => Msg::SenderToggled {
            result: result
                .map(|toggled| (toggled.id, toggled.enabled))
                .map_err(|err| err.to_string()),
        },
        (Pending::SenderSave, ClientOutcome::SenderSaved(result)) => Msg::SenderSaved {
            result: match result {
                Ok(ack) if ack.ok => Ok(()),
                Ok(_) => Err("sender was not saved".to_owned()),
                Err(err) => Err(err.to_string()),
            },
        },
        (Pending::CampaignSend { campaign_id }, ClientOutcome::CampaignSent(result)) => {
            Msg::CampaignSendFinished {
                id: campaign_id,
                result: result
                    .map(|outcome| deck_core::SendOutcome {
                        attempted: outcome.attempted,
                        sent: outcome.sent,
                        errors: outcome.errors,
                    })
                    .map_err(|err| err.to_string()),
            }
        }
        (Pending::Verify, ClientOutcome::Verified(result)) => Msg::VerifyFinished {
            result: result
                .map(|outcome| deck_core::VerifyOutcome {
                    checked: outcome.checked,
                    connected: outcome.connected,
                })
                .map_err(|err| err.to_string()),
        },
        (pending, outcome) => {
            deck_warn!("mismatched response {outcome:?} for pending {pending:?}");
            return None;
        }
    };
    Some(msg)
}

/// `{ ok: false }` with a 2xx status still counts as a refusal; prefer the
/// backend-supplied message.
fn ack_to_result(result: Result<AckDto, deck_client::ApiError>) -> Result<(), String> {
    match result {
        Ok(ack) if ack.ok => Ok(()),
        Ok(ack) => Err(ack
            .message
            .unwrap_or_else(|| "request was not accepted".to_owned())),
        Err(err) => Err(err.to_string()),
    }
}

/// The dialog validated this JSON before submitting; a failure here means
/// the buffer was tampered with between frames, so drop the blob.
fn decode_storage_state(text: &str) -> Option<serde_json::Value> {
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(err) => {
            deck_warn!("discarding invalid storage state: {err}");
            None
        }
    }
}
