//! DTO-to-domain conversion at the platform boundary. Timestamps are
//! parsed here; core state never sees a raw wire string.

use chrono::{DateTime, Utc};
use deck_client::{ListDto, PopulateRequest, ProspectDto, SenderDto};
use deck_core::{ConnectionStatus, List, PopulateDraft, Prospect, Sender, SenderRotation};
use deck_logging::deck_warn;

pub fn list_from_dto(dto: ListDto) -> List {
    List {
        created_at: parse_timestamp(dto.created_at.as_deref()),
        id: dto.id,
        name: dto.name,
        search_url: dto.search_url,
        profile_count: dto.profile_count,
    }
}

pub fn prospect_from_dto(dto: ProspectDto, fallback_list_id: &str) -> Prospect {
    Prospect {
        status: connection_status(dto.status.as_deref()),
        profile_url: dto.profile_url,
        name: dto.name,
        note: dto.note,
        list_id: dto.list_id.unwrap_or_else(|| fallback_list_id.to_owned()),
    }
}

pub fn sender_from_dto(dto: SenderDto) -> Sender {
    Sender {
        updated_at: parse_timestamp(dto.updated_at.as_deref()),
        has_session: dto
            .storage_state
            .as_ref()
            .is_some_and(|state| !state.is_null()),
        id: dto.id,
        name: dto.name,
        enabled: dto.enabled,
    }
}

pub fn populate_request(draft: &PopulateDraft) -> PopulateRequest {
    PopulateRequest {
        search_url: draft.search_url.trim().to_owned(),
        profile_limit: draft.profile_limit,
        collect_only: draft.collect_only,
        send_note: draft.send_note,
        note_text: draft.note_text.clone(),
        // The backend default (round_robin) stays off the wire.
        sender_rotation: match draft.rotation {
            SenderRotation::RoundRobin => None,
            SenderRotation::OneSender => Some("one_sender".to_owned()),
        },
    }
}

/// An unparseable timestamp yields `None`; such a list is never classified
/// processing, so a malformed backend row cannot pin the poll loop open.
fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(err) => {
            deck_warn!("unparseable timestamp {raw:?}: {err}");
            None
        }
    }
}

fn connection_status(raw: Option<&str>) -> ConnectionStatus {
    match raw.map(str::trim) {
        None | Some("") => ConnectionStatus::New,
        Some(status) if status.eq_ignore_ascii_case("new") => ConnectionStatus::New,
        Some(status) if status.eq_ignore_ascii_case("invited") => ConnectionStatus::Invited,
        Some(status) if status.eq_ignore_ascii_case("connected") => ConnectionStatus::Connected,
        Some(other) => {
            deck_warn!("unknown prospect status {other:?}, treating as new");
            ConnectionStatus::New
        }
    }
}
