//! Export and import of the whole profile as one JSON document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::profile::{decode_save, decode_template, Profile, SaveData};
use crate::achievements::AchievementId;
use crate::character::CharacterTemplate;
use crate::core::ImportError;

/// Portable snapshot of saves, templates and unlocked achievements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    pub saves: Vec<SaveData>,
    pub templates: Vec<CharacterTemplate>,
    pub unlocked_achievements: Vec<String>,
}

impl BackupData {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            saves: profile.saves.clone(),
            templates: profile.templates.clone(),
            unlocked_achievements: profile.achievements.keys(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A validated backup, already filtered down to usable entries.
#[derive(Debug, Clone, Default)]
pub struct ParsedBackup {
    pub saves: Vec<SaveData>,
    pub templates: Vec<CharacterTemplate>,
    pub achievements: Vec<AchievementId>,
    /// Entries dropped because they were incomplete or unrecognized
    pub rejected: usize,
}

/// What an import actually added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub saves_added: usize,
    pub templates_added: usize,
    pub achievements_added: Vec<AchievementId>,
}

impl ImportSummary {
    pub fn is_empty(&self) -> bool {
        self.saves_added == 0 && self.templates_added == 0 && self.achievements_added.is_empty()
    }

    pub fn describe(&self) -> String {
        format!(
            "Imported {} save(s), {} template(s) and {} achievement(s).",
            self.saves_added,
            self.templates_added,
            self.achievements_added.len()
        )
    }
}

/// Checks the document shape and keeps the entries worth merging.
///
/// The document must be an object with at least one of `saves`,
/// `templates` or `unlockedAchievements`, and each one present must be an
/// array. Saves without an id, templates missing a name, class or
/// backstory, and unknown achievement keys are dropped.
pub fn parse_backup(text: &str) -> Result<ParsedBackup, ImportError> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| ImportError::Malformed(e.to_string()))?;
    let Value::Object(mut object) = document else {
        return Err(ImportError::NotAnObject);
    };

    let saves = take_array(&mut object, "saves")?;
    let templates = take_array(&mut object, "templates")?;
    let achievements = take_array(&mut object, "unlockedAchievements")?;
    if saves.is_none() && templates.is_none() && achievements.is_none() {
        return Err(ImportError::MissingCollections);
    }

    let mut parsed = ParsedBackup::default();
    for entry in saves.unwrap_or_default() {
        match decode_save(entry) {
            Ok(save) => parsed.saves.push(save),
            Err(reason) => {
                tracing::debug!(%reason, "Dropping imported save");
                parsed.rejected += 1;
            }
        }
    }
    for entry in templates.unwrap_or_default() {
        match decode_template(entry) {
            Ok(template) => parsed.templates.push(template),
            Err(reason) => {
                tracing::debug!(%reason, "Dropping imported template");
                parsed.rejected += 1;
            }
        }
    }
    for entry in achievements.unwrap_or_default() {
        match entry.as_str().and_then(AchievementId::from_key) {
            Some(id) => parsed.achievements.push(id),
            None => parsed.rejected += 1,
        }
    }
    Ok(parsed)
}

fn take_array(
    object: &mut serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<Option<Vec<Value>>, ImportError> {
    match object.remove(field) {
        None => Ok(None),
        Some(Value::Array(entries)) => Ok(Some(entries)),
        Some(_) => Err(ImportError::WrongShape(field)),
    }
}

/// Merges without overwriting: saves by id, templates by identity,
/// achievements as a set union.
pub fn merge_backup(profile: &mut Profile, backup: ParsedBackup) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for save in backup.saves {
        if profile.has_save(&save.id) {
            continue;
        }
        profile.upsert_save(save);
        summary.saves_added += 1;
    }
    for template in backup.templates {
        if profile.templates.iter().any(|t| t.id == template.id) {
            continue;
        }
        if profile.add_template(template) {
            summary.templates_added += 1;
        }
    }
    summary.achievements_added = profile.achievements.merge(backup.achievements);

    tracing::info!(
        saves = summary.saves_added,
        templates = summary.templates_added,
        achievements = summary.achievements_added.len(),
        rejected = backup.rejected,
        "Backup merged"
    );
    summary
}
