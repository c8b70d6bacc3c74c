//! Preference persistence: campaigns and the last populate form survive
//! restarts through a RON file in the working directory.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use deck_core::{
    CampaignSnapshot, PopulateDraft, Preferences, SendOutcome, SenderRotation,
    DEFAULT_PROFILE_LIMIT,
};
use deck_logging::{deck_error, deck_info, deck_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

const STATE_FILENAME: &str = ".deck_state.ron";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedOutcome {
    attempted: u64,
    sent: u64,
    errors: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedCampaign {
    name: String,
    template: String,
    limit: u32,
    list_ids: Vec<String>,
    sender_id: Option<String>,
    completed: bool,
    outcome: Option<PersistedOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedDraft {
    search_url: String,
    profile_limit: u32,
    collect_only: bool,
    send_note: bool,
    note_text: String,
    one_sender: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    campaigns: Vec<PersistedCampaign>,
    last_populate: Option<PersistedDraft>,
}

/// Load failures degrade to defaults with a warning; a broken preference
/// file must never keep the dashboard from starting.
pub(crate) fn load_preferences(dir: &Path) -> Preferences {
    let path = dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Preferences::default();
        }
        Err(err) => {
            deck_warn!("Failed to read preferences from {:?}: {}", path, err);
            return Preferences::default();
        }
    };

    let state: PersistedState = match ron::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            deck_warn!("Failed to parse preferences from {:?}: {}", path, err);
            return Preferences::default();
        }
    };

    deck_info!("Loaded preferences from {:?}", path);
    Preferences {
        campaigns: state
            .campaigns
            .into_iter()
            .map(|campaign| CampaignSnapshot {
                name: campaign.name,
                template: campaign.template,
                limit: campaign.limit.max(1),
                list_ids: campaign.list_ids,
                sender_id: campaign.sender_id,
                completed: campaign.completed,
                outcome: campaign.outcome.map(|outcome| SendOutcome {
                    attempted: outcome.attempted,
                    sent: outcome.sent,
                    errors: outcome.errors,
                }),
            })
            .collect(),
        last_populate: state.last_populate.map(|draft| PopulateDraft {
            search_url: draft.search_url,
            profile_limit: draft.profile_limit.clamp(1, 500),
            collect_only: draft.collect_only,
            send_note: draft.send_note,
            note_text: draft.note_text,
            rotation: if draft.one_sender {
                SenderRotation::OneSender
            } else {
                SenderRotation::RoundRobin
            },
        }),
    }
}

pub(crate) fn save_preferences(dir: &Path, prefs: &Preferences) {
    let state = PersistedState {
        campaigns: prefs
            .campaigns
            .iter()
            .map(|campaign| PersistedCampaign {
                name: campaign.name.clone(),
                template: campaign.template.clone(),
                limit: campaign.limit,
                list_ids: campaign.list_ids.clone(),
                sender_id: campaign.sender_id.clone(),
                completed: campaign.completed,
                outcome: campaign.outcome.map(|outcome| PersistedOutcome {
                    attempted: outcome.attempted,
                    sent: outcome.sent,
                    errors: outcome.errors,
                }),
            })
            .collect(),
        last_populate: prefs.last_populate.as_ref().map(|draft| PersistedDraft {
            search_url: draft.search_url.clone(),
            profile_limit: draft.profile_limit.clamp(1, 500),
            collect_only: draft.collect_only,
            send_note: draft.send_note,
            note_text: draft.note_text.clone(),
            one_sender: draft.rotation == SenderRotation::OneSender,
        }),
    };

    if let Err(err) = write_state(dir, &state) {
        deck_error!("Failed to write preferences to {:?}: {}", dir, err);
    }
}

/// Temp file + rename so a crash mid-write never corrupts the previous
/// preferences.
fn write_state(dir: &Path, state: &PersistedState) -> Result<(), PersistError> {
    let content = ron::ser::to_string_pretty(state, ron::ser::PrettyConfig::new())?;
    let target = dir.join(STATE_FILENAME);

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|err| PersistError::Io(err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_preferences() -> Preferences {
        Preferences {
            campaigns: vec![
                CampaignSnapshot {
                    name: "Warm leads".to_owned(),
                    template: "Hi {first_name}!".to_owned(),
                    limit: 25,
                    list_ids: vec!["l1".to_owned()],
                    sender_id: Some("s1".to_owned()),
                    completed: true,
                    outcome: Some(SendOutcome {
                        attempted: 25,
                        sent: 23,
                        errors: 2,
                    }),
                },
                CampaignSnapshot {
                    name: "Draft".to_owned(),
                    template: "Hey".to_owned(),
                    limit: 5,
                    list_ids: Vec::new(),
                    sender_id: None,
                    completed: false,
                    outcome: None,
                },
            ],
            last_populate: Some(PopulateDraft {
                search_url: "https://x/search?kw=eng".to_owned(),
                profile_limit: DEFAULT_PROFILE_LIMIT,
                collect_only: true,
                send_note: false,
                note_text: String::new(),
                rotation: SenderRotation::OneSender,
            }),
        }
    }

    #[test]
    fn round_trip_preserves_campaigns_and_the_form() {
        let temp = TempDir::new().unwrap();
        let prefs = sample_preferences();

        save_preferences(temp.path(), &prefs);
        let loaded = load_preferences(temp.path());

        assert_eq!(loaded, prefs);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_preferences(temp.path()), Preferences::default());
    }

    #[test]
    fn out_of_range_limit_is_clamped_on_load() {
        let temp = TempDir::new().unwrap();
        // A hand-edited file can carry a zero limit; loading repairs it.
        fs::write(
            temp.path().join(STATE_FILENAME),
            r#"(
                campaigns: [],
                last_populate: Some((
                    search_url: "https://x/search?kw=eng",
                    profile_limit: 0,
                    collect_only: false,
                    send_note: false,
                    note_text: "",
                    one_sender: false,
                )),
            )"#,
        )
        .unwrap();

        let loaded = load_preferences(temp.path());
        assert_eq!(loaded.last_populate.unwrap().profile_limit, 1);
    }

    #[test]
    fn corrupt_file_degrades_to_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(STATE_FILENAME), "not ron {").unwrap();
        assert_eq!(load_preferences(temp.path()), Preferences::default());
    }

    #[test]
    fn save_replaces_the_previous_snapshot() {
        let temp = TempDir::new().unwrap();
        save_preferences(temp.path(), &sample_preferences());

        let mut updated = sample_preferences();
        updated.campaigns.truncate(1);
        save_preferences(temp.path(), &updated);

        assert_eq!(load_preferences(temp.path()), updated);
    }
}
