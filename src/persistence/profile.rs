//! Everything that outlives a single run: saves, templates, achievements
//! and the milestone counters behind a few of them.
//!
//! Loading is forgiving. A record that fails to decode is reported and
//! carried along verbatim, so writing the collection back never destroys
//! data the player might still recover by hand.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::store::{
    Store, ACHIEVEMENTS_KEY, HIDDEN_WORLDS_KEY, SAVES_KEY, TEMPLATES_KEY, USED_CLASSES_KEY,
};
use crate::achievements::{AchievementId, Achievements, Milestones};
use crate::character::{Character, CharacterRecord, CharacterTemplate};
use crate::core::constants::AUTOSAVE_ID;
use crate::core::PersistenceError;
use crate::rules::{default_templates, starting_skills, WorldView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveType {
    Auto,
    Manual,
}

/// A snapshot of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub id: String,
    /// Unix epoch milliseconds
    pub timestamp: i64,
    pub character: Character,
    pub story: Vec<String>,
    pub choices: Vec<String>,
    pub is_end: bool,
    pub save_type: SaveType,
}

impl SaveData {
    pub fn is_autosave(&self) -> bool {
        self.save_type == SaveType::Auto
    }

    /// Saved between a request and its answer: no choices and no ending.
    pub fn is_limbo(&self) -> bool {
        !self.is_end && self.choices.is_empty()
    }
}

/// On-disk shape of a save, tolerant of older records.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveRecord {
    id: String,
    #[serde(default)]
    timestamp: i64,
    character: CharacterRecord,
    #[serde(default)]
    story: Vec<String>,
    #[serde(default)]
    choices: Vec<String>,
    #[serde(default)]
    is_end: bool,
    #[serde(default)]
    save_type: Option<SaveType>,
}

impl SaveRecord {
    fn into_save(self) -> SaveData {
        let save_type = self.save_type.unwrap_or(if self.id == AUTOSAVE_ID {
            SaveType::Auto
        } else {
            SaveType::Manual
        });
        SaveData {
            id: self.id,
            timestamp: self.timestamp,
            character: self.character.into_character(),
            story: self.story,
            choices: self.choices,
            is_end: self.is_end,
            save_type,
        }
    }
}

/// Decodes one save, migrating its character. Empty ids are rejected.
pub fn decode_save(value: Value) -> Result<SaveData, String> {
    let record: SaveRecord = serde_json::from_value(value).map_err(|e| e.to_string())?;
    if record.id.trim().is_empty() {
        return Err("save has no id".to_string());
    }
    Ok(record.into_save())
}

/// Decodes one template. A missing id is generated, missing power or
/// skills fall back to the template defaults.
pub fn decode_template(value: Value) -> Result<CharacterTemplate, String> {
    let mut template: CharacterTemplate =
        serde_json::from_value(value).map_err(|e| e.to_string())?;
    if template.name.trim().is_empty()
        || template.class.trim().is_empty()
        || template.backstory.trim().is_empty()
    {
        return Err("template is missing a name, class or backstory".to_string());
    }
    if template.id.trim().is_empty() {
        template.id = uuid::Uuid::new_v4().to_string();
    }
    if template.skills.is_empty() {
        template.skills = starting_skills(&template.class);
    }
    Ok(template)
}

/// Persisted state plus whatever could not be decoded.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    /// Newest first
    pub saves: Vec<SaveData>,
    pub templates: Vec<CharacterTemplate>,
    pub achievements: Achievements,
    pub milestones: Milestones,
    pub(crate) unreadable_saves: Vec<Value>,
    pub(crate) unreadable_templates: Vec<Value>,
    pub(crate) unknown_achievements: Vec<String>,
}

impl Profile {
    /// Loads every collection. The second value lists human-readable
    /// problems, one per unreadable record or collection.
    pub fn load(store: &mut impl Store) -> (Profile, Vec<String>) {
        let mut profile = Profile::default();
        let mut problems = Vec::new();

        if let Some(entries) = read_array(store, SAVES_KEY, "saved games", &mut problems) {
            for entry in entries {
                match decode_save(entry.clone()) {
                    Ok(save) => profile.saves.push(save),
                    Err(reason) => {
                        tracing::warn!(%reason, "Skipping unreadable save");
                        problems.push(format!("A saved game could not be read: {}", reason));
                        profile.unreadable_saves.push(entry);
                    }
                }
            }
        }
        profile.sort_saves();

        match store.read(TEMPLATES_KEY) {
            Ok(None) => {
                profile.templates = default_templates();
                if let Err(e) = profile.persist_templates(store) {
                    tracing::warn!(error = %e, "Failed to seed default templates");
                }
            }
            Ok(Some(_)) | Err(_) => {
                if let Some(entries) =
                    read_array(store, TEMPLATES_KEY, "character templates", &mut problems)
                {
                    for entry in entries {
                        match decode_template(entry.clone()) {
                            Ok(template) => profile.templates.push(template),
                            Err(reason) => {
                                tracing::warn!(%reason, "Skipping unreadable template");
                                problems.push(format!(
                                    "A character template could not be read: {}",
                                    reason
                                ));
                                profile.unreadable_templates.push(entry);
                            }
                        }
                    }
                }
            }
        }

        if let Some(entries) = read_array(store, ACHIEVEMENTS_KEY, "achievements", &mut problems) {
            for entry in entries {
                match entry.as_str().and_then(AchievementId::from_key) {
                    Some(id) => {
                        profile.achievements.unlock(id);
                    }
                    None => {
                        tracing::warn!(entry = %entry, "Unknown achievement key");
                        if let Some(key) = entry.as_str() {
                            profile.unknown_achievements.push(key.to_string());
                        }
                    }
                }
            }
        }

        if let Some(entries) = read_array(store, USED_CLASSES_KEY, "class history", &mut problems) {
            profile.milestones.used_classes = entries
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
        }
        if let Some(entries) =
            read_array(store, HIDDEN_WORLDS_KEY, "hidden event history", &mut problems)
        {
            profile.milestones.hidden_event_worlds = entries
                .iter()
                .filter_map(|v| v.as_str().and_then(WorldView::from_key))
                .collect();
        }

        tracing::info!(
            saves = profile.saves.len(),
            templates = profile.templates.len(),
            achievements = profile.achievements.unlocked_count(),
            problems = problems.len(),
            "Profile loaded"
        );
        (profile, problems)
    }

    pub fn find_save(&self, id: &str) -> Option<&SaveData> {
        self.saves.iter().find(|s| s.id == id)
    }

    /// Inserts or replaces by id, keeping newest-first order.
    pub fn upsert_save(&mut self, save: SaveData) {
        self.saves.retain(|s| s.id != save.id);
        self.saves.push(save);
        self.sort_saves();
    }

    pub fn remove_save(&mut self, id: &str) -> bool {
        let before = self.saves.len();
        self.saves.retain(|s| s.id != id);
        self.saves.len() != before
    }

    pub fn has_save(&self, id: &str) -> bool {
        self.find_save(id).is_some()
    }

    pub fn find_template(&self, id: &str) -> Option<&CharacterTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Appends unless a template with the same identity exists.
    pub fn add_template(&mut self, template: CharacterTemplate) -> bool {
        if self.templates.iter().any(|t| t.same_identity(&template)) {
            return false;
        }
        self.templates.push(template);
        true
    }

    pub fn remove_template(&mut self, id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        self.templates.len() != before
    }

    pub fn persist_saves(&self, store: &mut impl Store) -> Result<(), PersistenceError> {
        let mut values = self
            .saves
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        values.extend(self.unreadable_saves.iter().cloned());
        write_json(store, SAVES_KEY, &values)
    }

    pub fn persist_templates(&self, store: &mut impl Store) -> Result<(), PersistenceError> {
        let mut values = self
            .templates
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        values.extend(self.unreadable_templates.iter().cloned());
        write_json(store, TEMPLATES_KEY, &values)
    }

    pub fn persist_achievements(&self, store: &mut impl Store) -> Result<(), PersistenceError> {
        let mut keys = self.achievements.keys();
        keys.extend(self.unknown_achievements.iter().cloned());
        write_json(store, ACHIEVEMENTS_KEY, &keys)
    }

    pub fn persist_milestones(&self, store: &mut impl Store) -> Result<(), PersistenceError> {
        write_json(store, USED_CLASSES_KEY, &self.milestones.used_classes)?;
        let worlds: Vec<&str> = self
            .milestones
            .hidden_event_worlds
            .iter()
            .map(WorldView::key)
            .collect();
        write_json(store, HIDDEN_WORLDS_KEY, &worlds)
    }

    fn sort_saves(&mut self) {
        self.saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
}

fn write_json<T: Serialize + ?Sized>(
    store: &mut impl Store,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(value)?;
    store.write(key, &json)
}

/// Reads a JSON array under `key`. Anything else is reported as a problem
/// and the raw document is copied aside under `<key>-unreadable`.
fn read_array(
    store: &mut impl Store,
    key: &str,
    label: &str,
    problems: &mut Vec<String>,
) -> Option<Vec<Value>> {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read collection");
            problems.push(format!("Your {} could not be read: {}", label, e));
            return None;
        }
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(entries)) => Some(entries),
        Ok(_) | Err(_) => {
            tracing::warn!(key, "Collection is not a JSON array");
            problems.push(format!("Your {} could not be read.", label));
            let aside = format!("{}-unreadable", key);
            if let Err(e) = store.write(&aside, &raw) {
                tracing::warn!(key = %aside, error = %e, "Failed to preserve unreadable collection");
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn sample_save(id: &str, timestamp: i64) -> SaveData {
        SaveData {
            id: id.to_string(),
            timestamp,
            character: Character::new(
                "Kaia",
                "Cyber Samurai",
                "A blade for hire in the neon rain.",
                WorldView::CyberpunkMythology,
                12,
            ),
            story: vec!["It begins.".to_string()],
            choices: vec!["Go left".to_string()],
            is_end: false,
            save_type: SaveType::Manual,
        }
    }

    #[test]
    fn test_fresh_store_seeds_default_templates() {
        let mut store = MemoryStore::new();
        let (profile, problems) = Profile::load(&mut store);
        assert!(problems.is_empty());
        assert_eq!(profile.templates.len(), 3);
        assert!(store.get(TEMPLATES_KEY).is_some());
    }

    #[test]
    fn test_empty_template_list_is_not_reseeded() {
        let mut store = MemoryStore::with_entries([(TEMPLATES_KEY, "[]")]);
        let (profile, _) = Profile::load(&mut store);
        assert!(profile.templates.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_saves_sorted_newest_first() {
        let mut profile = Profile::default();
        profile.upsert_save(sample_save("a", 100));
        profile.upsert_save(sample_save("b", 300));
        profile.upsert_save(sample_save("c", 200));
        let ids: Vec<&str> = profile.saves.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut profile = Profile::default();
        profile.upsert_save(sample_save(AUTOSAVE_ID, 100));
        profile.upsert_save(sample_save(AUTOSAVE_ID, 200));
        assert_eq!(profile.saves.len(), 1);
        assert_eq!(profile.saves[0].timestamp, 200);
    }

    #[test]
    fn test_legacy_save_is_migrated() {
        let raw = r#"[{
            "id": "old",
            "timestamp": 5,
            "character": {"name": "Zero", "class": "Shadow Hacker", "backstory": "x",
                          "worldView": "cyberpunk_mythology", "power": 10},
            "story": ["one"],
            "choices": ["a", "b"],
            "isEnd": false
        }]"#;
        let mut store = MemoryStore::with_entries([(SAVES_KEY, raw), (TEMPLATES_KEY, "[]")]);
        let (profile, problems) = Profile::load(&mut store);
        assert!(problems.is_empty());
        let save = &profile.saves[0];
        assert_eq!(save.character.max_hp, 60);
        assert_eq!(save.character.hp, 60);
        assert!(!save.character.skills.is_empty());
        assert_eq!(save.save_type, SaveType::Manual);
    }

    #[test]
    fn test_corrupt_entry_reported_and_preserved() {
        let raw = r#"[{"id": "broken"}]"#;
        let mut store = MemoryStore::with_entries([(SAVES_KEY, raw), (TEMPLATES_KEY, "[]")]);
        let (mut profile, problems) = Profile::load(&mut store);
        assert_eq!(problems.len(), 1);
        assert!(profile.saves.is_empty());

        profile.upsert_save(sample_save("fresh", 1));
        profile.persist_saves(&mut store).unwrap();
        let written: Vec<Value> = serde_json::from_str(store.get(SAVES_KEY).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written.iter().any(|v| v["id"] == "broken"));
    }

    #[test]
    fn test_corrupt_collection_copied_aside() {
        let mut store = MemoryStore::with_entries([(SAVES_KEY, "{not json"), (TEMPLATES_KEY, "[]")]);
        let (profile, problems) = Profile::load(&mut store);
        assert!(profile.saves.is_empty());
        assert_eq!(problems.len(), 1);
        assert_eq!(store.get("saves-unreadable"), Some("{not json"));
    }

    #[test]
    fn test_milestones_roundtrip_through_store() {
        let mut store = MemoryStore::new();
        let mut profile = Profile::default();
        profile.milestones.record_class("Data Wizard");
        profile.milestones.record_hidden_event(WorldView::SteampunkHorror);
        profile.persist_milestones(&mut store).unwrap();

        let (loaded, _) = Profile::load(&mut store);
        assert!(loaded.milestones.used_classes.contains("Data Wizard"));
        assert!(loaded
            .milestones
            .hidden_event_worlds
            .contains(&WorldView::SteampunkHorror));
    }

    #[test]
    fn test_unknown_achievement_keys_survive_rewrite() {
        let mut store = MemoryStore::with_entries([
            (ACHIEVEMENTS_KEY, r#"["BEGINNER", "FROM_THE_FUTURE"]"#),
            (TEMPLATES_KEY, "[]"),
        ]);
        let (profile, _) = Profile::load(&mut store);
        assert!(profile.achievements.is_unlocked(AchievementId::Beginner));
        profile.persist_achievements(&mut store).unwrap();
        assert!(store.get(ACHIEVEMENTS_KEY).unwrap().contains("FROM_THE_FUTURE"));
    }

    #[test]
    fn test_duplicate_template_identity_rejected() {
        let mut profile = Profile::default();
        let template = default_templates().remove(0);
        assert!(profile.add_template(template.clone()));
        let mut copy = template;
        copy.id = "other".to_string();
        assert!(!profile.add_template(copy));
    }
}
