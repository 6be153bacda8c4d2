//! The game session: one player, one character, one story at a time.
//!
//! Every operation takes `&mut self` and runs to completion, narrative
//! request included, before the next one can start. Operations that are not
//! valid in the current phase fail with `SessionError::NotAllowed` and leave
//! the session untouched.

use std::collections::VecDeque;

use rand::Rng;

use super::notifications::Notification;
use super::types::{GamePhase, SessionContext};
use crate::achievements::{AchievementId, Achievements, GameEvent};
use crate::character::{
    available_skills, create_character, newly_active_synergies, reroll_from, total_power,
    Character, CharacterForm, CharacterTemplate, Item,
};
use crate::combat::{resolve_turn, victory_narration, CombatAction, CombatEncounter, TurnReport};
use crate::core::constants::{AUTOSAVE_ID, VICTORY_CHOICE};
use crate::core::{EngineConfig, SessionError};
use crate::narrative::{NarrativeService, StorySegment};
use crate::persistence::{
    merge_backup, parse_backup, BackupData, ImportSummary, Profile, SaveData, SaveType, Store,
};
use crate::rules::{roll_random_event, WorldView};

/// Prefix of the story line recording a player's choice.
pub const CHOICE_LINE_PREFIX: &str = "You chose: ";

/// How a segment arrived; only choices roll random events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentSource {
    Start,
    Choice,
    Continue,
}

pub struct GameSession<N: NarrativeService, S: Store, R: Rng> {
    config: EngineConfig,
    narrator: N,
    store: S,
    rng: R,
    phase: GamePhase,
    ctx: SessionContext,
    profile: Profile,
    notifications: VecDeque<Notification>,
}

impl<N: NarrativeService, S: Store, R: Rng> GameSession<N, S, R> {
    /// Loads the profile from `store` and starts at the welcome screen.
    /// Unreadable records surface as failure notifications.
    pub fn new(config: EngineConfig, narrator: N, mut store: S, rng: R) -> Self {
        let (profile, problems) = Profile::load(&mut store);
        let notifications = problems.into_iter().map(Notification::Failure).collect();
        Self {
            config,
            narrator,
            store,
            rng,
            phase: GamePhase::Welcome,
            ctx: SessionContext::default(),
            profile,
            notifications,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn character(&self) -> Option<&Character> {
        self.ctx.character.as_ref()
    }

    pub fn story(&self) -> &[String] {
        &self.ctx.story
    }

    pub fn choices(&self) -> &[String] {
        &self.ctx.choices
    }

    pub fn encounter(&self) -> Option<&CombatEncounter> {
        self.ctx.encounter.as_ref()
    }

    pub fn last_turn(&self) -> Option<&TurnReport> {
        self.ctx.last_turn.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.ctx.error.as_deref()
    }

    pub fn selected_world(&self) -> Option<WorldView> {
        self.ctx.world
    }

    pub fn saves(&self) -> &[SaveData] {
        &self.profile.saves
    }

    pub fn templates(&self) -> &[CharacterTemplate] {
        &self.profile.templates
    }

    pub fn achievements(&self) -> &Achievements {
        &self.profile.achievements
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.profile.achievements.is_unlocked(id)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Effective power of the current character, bonuses included.
    pub fn total_power(&self) -> Option<u32> {
        self.ctx.character.as_ref().map(total_power)
    }

    /// Hands queued notifications to the caller in emission order.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    // ------------------------------------------------------------------
    // Menus
    // ------------------------------------------------------------------

    pub fn start(&mut self) -> Result<(), SessionError> {
        self.require("start a new game", &[GamePhase::Welcome])?;
        self.phase = GamePhase::WorldSelection;
        Ok(())
    }

    pub fn select_world(&mut self, world: WorldView) -> Result<(), SessionError> {
        self.require("select a world", &[GamePhase::WorldSelection])?;
        self.ctx.world = Some(world);
        self.phase = GamePhase::CharacterCreation;
        tracing::info!(world = world.key(), "World selected");
        Ok(())
    }

    pub fn open_load_game(&mut self) -> Result<(), SessionError> {
        self.require("open saved games", &[GamePhase::Welcome])?;
        self.phase = GamePhase::LoadGame;
        Ok(())
    }

    pub fn open_achievements(&mut self) -> Result<(), SessionError> {
        self.require("open achievements", &[GamePhase::Welcome])?;
        self.phase = GamePhase::Achievements;
        Ok(())
    }

    /// Back to the welcome screen from anywhere, dropping the run.
    pub fn reset(&mut self) {
        tracing::info!(from = self.phase.name(), "Session reset");
        self.ctx = SessionContext::default();
        self.phase = GamePhase::Welcome;
    }

    // ------------------------------------------------------------------
    // Character creation and templates
    // ------------------------------------------------------------------

    /// Validates the form, rolls a character and asks for the opening segment.
    pub fn create_character(&mut self, form: &CharacterForm) -> Result<(), SessionError> {
        self.require("create a character", &[GamePhase::CharacterCreation])?;
        let world = self.world()?;
        let character = create_character(form, world, &mut self.rng)?;
        self.begin_game(character)
    }

    /// Starts a new run seeded from a saved character's identity.
    pub fn start_from_character(&mut self, save_id: &str) -> Result<(), SessionError> {
        self.require(
            "start from a saved character",
            &[GamePhase::CharacterCreation, GamePhase::LoadGame],
        )?;
        let save = self
            .profile
            .find_save(save_id)
            .ok_or_else(|| SessionError::UnknownSave(save_id.to_string()))?;
        let character = reroll_from(&save.character, &mut self.rng);
        self.begin_game(character)
    }

    /// Creation form filled in from a template.
    pub fn template_form(&self, template_id: &str) -> Result<CharacterForm, SessionError> {
        self.profile
            .find_template(template_id)
            .map(CharacterForm::from_template)
            .ok_or_else(|| SessionError::UnknownTemplate(template_id.to_string()))
    }

    /// Stores the form as a template. Returns the new id, or `None` when an
    /// identical template already exists.
    pub fn save_template(&mut self, form: &CharacterForm) -> Result<Option<String>, SessionError> {
        self.require("save a template", &[GamePhase::CharacterCreation])?;
        form.validate(self.world()?)?;

        let template = form.to_template(uuid::Uuid::new_v4().to_string());
        let id = template.id.clone();
        if !self.profile.add_template(template) {
            self.notify(Notification::Info(format!(
                "A template for {} already exists.",
                form.name.trim()
            )));
            return Ok(None);
        }
        self.persist_templates();
        self.notify(Notification::Info(format!(
            "Template {} saved.",
            form.name.trim()
        )));
        self.record(&GameEvent::TemplateSaved);
        Ok(Some(id))
    }

    pub fn delete_template(&mut self, template_id: &str) -> Result<(), SessionError> {
        if !self.profile.remove_template(template_id) {
            return Err(SessionError::UnknownTemplate(template_id.to_string()));
        }
        self.persist_templates();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Story
    // ------------------------------------------------------------------

    /// Records the choice and asks for what happens next.
    pub fn choose(&mut self, choice: &str) -> Result<(), SessionError> {
        self.require("make a choice", &[GamePhase::Playing])?;
        let choice = choice.trim();

        self.ctx
            .story
            .push(format!("{}{}", CHOICE_LINE_PREFIX, choice));
        self.ctx.choices.clear();
        let story_len = self.ctx.story.len();
        self.record(&GameEvent::StoryBeat { story_len });
        self.autosave(false);

        let segment = self.request_segment(Some(choice))?;
        self.apply_segment(segment, SegmentSource::Choice)?;
        self.settle();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------

    pub fn attack(&mut self) -> Result<TurnReport, SessionError> {
        self.resolve_combat(CombatAction::Attack)
    }

    /// Uses one of the character's currently available skills.
    pub fn use_skill(&mut self, skill_id: &str) -> Result<TurnReport, SessionError> {
        let character = self.playing_character("use a skill")?;
        let skill = available_skills(character)
            .into_iter()
            .find(|s| s.id == skill_id)
            .ok_or_else(|| SessionError::UnknownSkill(skill_id.to_string()))?;
        self.resolve_combat(CombatAction::UseSkill(skill))
    }

    /// After a won fight: restore hp, checkpoint, and narrate the aftermath.
    pub fn continue_after_combat(&mut self) -> Result<(), SessionError> {
        self.require("continue after combat", &[GamePhase::Combat])?;
        let Some(power_gain) = self.ctx.pending_victory() else {
            return Err(SessionError::not_allowed(
                "continue before the fight is won",
                self.phase.name(),
            ));
        };
        let enemy = self
            .ctx
            .encounter
            .take()
            .map(|e| e.enemy_name)
            .unwrap_or_default();
        self.ctx.last_turn = None;
        self.ctx.story.push(victory_narration(&enemy, power_gain));
        if let Some(character) = self.ctx.character.as_mut() {
            character.restore_hp();
        }
        self.ctx.choices.clear();
        self.autosave(false);

        let segment = self.request_segment(Some(VICTORY_CHOICE))?;
        self.apply_segment(segment, SegmentSource::Continue)?;
        self.settle();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Saves
    // ------------------------------------------------------------------

    /// Writes a new manual save of the current run and returns its id.
    pub fn manual_save(&mut self) -> Result<String, SessionError> {
        self.require("save", &[GamePhase::Playing, GamePhase::Ended])?;
        let save = self.snapshot(
            uuid::Uuid::new_v4().to_string(),
            SaveType::Manual,
            self.phase == GamePhase::Ended,
        )?;
        let id = save.id.clone();
        self.profile.upsert_save(save);
        self.persist_saves();
        tracing::info!(%id, "Manual save written");
        self.notify(Notification::Info("Game saved.".to_string()));
        self.record(&GameEvent::ManualSave);
        Ok(id)
    }

    /// Restores a save. A save caught between a request and its answer is
    /// continued right away with one more narrative request.
    pub fn load_game(&mut self, save_id: &str) -> Result<(), SessionError> {
        self.require("load a game", &[GamePhase::Welcome, GamePhase::LoadGame])?;
        let save = self
            .profile
            .find_save(save_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownSave(save_id.to_string()))?;
        let limbo = save.is_limbo();
        tracing::info!(id = %save.id, limbo, story = save.story.len(), "Loading save");

        self.ctx = SessionContext::for_character(save.character);
        self.ctx.story = save.story;
        self.ctx.choices = save.choices;
        self.phase = if save.is_end {
            GamePhase::Ended
        } else {
            GamePhase::Playing
        };
        self.record(&GameEvent::SaveLoaded);
        self.record_character_change();

        if limbo {
            let choice = self.pending_choice();
            let segment = self.request_segment(Some(&choice))?;
            self.apply_segment(segment, SegmentSource::Continue)?;
        }
        self.settle();
        Ok(())
    }

    pub fn delete_save(&mut self, save_id: &str) -> Result<(), SessionError> {
        if !self.profile.remove_save(save_id) {
            return Err(SessionError::UnknownSave(save_id.to_string()));
        }
        self.persist_saves();
        tracing::info!(id = save_id, "Save deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Backup
    // ------------------------------------------------------------------

    pub fn export_backup(&mut self) -> BackupData {
        self.record(&GameEvent::DataExported);
        BackupData::from_profile(&self.profile)
    }

    pub fn export_json(&mut self) -> Result<String, SessionError> {
        Ok(self.export_backup().to_json()?)
    }

    /// Merges a backup document into the profile. Only collections that
    /// actually changed are written back.
    pub fn import_backup_json(&mut self, text: &str) -> Result<ImportSummary, SessionError> {
        let parsed = match parse_backup(text) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Backup rejected");
                self.notify(Notification::Failure(format!("Import failed: {}", e)));
                return Err(e.into());
            }
        };

        let summary = merge_backup(&mut self.profile, parsed);
        if summary.is_empty() {
            self.notify(Notification::Info("Nothing to import.".to_string()));
            return Ok(summary);
        }
        if summary.saves_added > 0 {
            self.persist_saves();
        }
        if summary.templates_added > 0 {
            self.persist_templates();
        }
        if !summary.achievements_added.is_empty() {
            self.persist_achievements();
        }
        self.notify(Notification::Info(summary.describe()));
        Ok(summary)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn require(&self, action: &'static str, allowed: &[GamePhase]) -> Result<(), SessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SessionError::not_allowed(action, self.phase.name()))
        }
    }

    fn world(&self) -> Result<WorldView, SessionError> {
        self.ctx
            .world
            .ok_or_else(|| SessionError::not_allowed("continue without a world", self.phase.name()))
    }

    fn playing_character(&self, action: &'static str) -> Result<&Character, SessionError> {
        self.ctx
            .character
            .as_ref()
            .ok_or_else(|| SessionError::not_allowed(action, self.phase.name()))
    }

    fn begin_game(&mut self, character: Character) -> Result<(), SessionError> {
        tracing::info!(
            name = %character.name,
            class = %character.class,
            power = character.power,
            "Starting new game"
        );
        if self.profile.milestones.record_class(&character.class) {
            self.persist_milestones();
        }
        let distinct_classes = self.profile.milestones.used_classes.len();
        self.ctx = SessionContext::for_character(character);
        self.record(&GameEvent::GameStarted { distinct_classes });
        self.record_character_change();

        let segment = self.request_segment(None)?;
        self.apply_segment(segment, SegmentSource::Start)?;
        self.settle();
        Ok(())
    }

    fn resolve_combat(&mut self, action: CombatAction) -> Result<TurnReport, SessionError> {
        self.require("fight", &[GamePhase::Combat])?;
        if self.ctx.pending_victory().is_some() {
            return Err(SessionError::not_allowed("fight a defeated enemy", "combat"));
        }
        let (Some(character), Some(encounter)) =
            (self.ctx.character.as_mut(), self.ctx.encounter.as_mut())
        else {
            return Err(SessionError::not_allowed("fight without an enemy", "combat"));
        };

        let power_before = character.power;
        let report = resolve_turn(character, encounter, &action, &mut self.rng);
        let power_changed = character.power != power_before;

        self.ctx.story.push(report.narration());
        self.record(&GameEvent::CombatResolved { report: &report });
        if power_changed {
            self.record_character_change();
        }

        if report.outcome.player_died() {
            tracing::info!(outcome = ?report.outcome, "Character died");
            self.ctx.encounter = None;
            self.phase = GamePhase::Dead;
        }
        self.ctx.last_turn = Some(report.clone());
        Ok(report)
    }

    fn request_segment(&mut self, choice: Option<&str>) -> Result<StorySegment, SessionError> {
        let Some(character) = self.ctx.character.as_ref() else {
            return Err(SessionError::not_allowed(
                "request the story",
                self.phase.name(),
            ));
        };
        tracing::debug!(history = self.ctx.story.len(), ?choice, "Requesting segment");
        match self
            .narrator
            .generate_segment(character, &self.ctx.story, choice)
        {
            Ok(segment) => Ok(segment),
            Err(e) => {
                tracing::error!(error = %e, "Narrative request failed");
                let message = format!("The story could not continue: {}", e);
                self.ctx.error = Some(message.clone());
                self.phase = GamePhase::Error;
                self.notify(Notification::Failure(message));
                Err(e.into())
            }
        }
    }

    /// Applies a segment to the run: hidden marker, rewards, then the text,
    /// then whatever comes next (combat, ending or choices).
    fn apply_segment(
        &mut self,
        mut segment: StorySegment,
        source: SegmentSource,
    ) -> Result<(), SessionError> {
        let hidden = segment.normalize();
        let Some(character) = self.ctx.character.as_mut() else {
            return Err(SessionError::not_allowed("apply a segment", self.phase.name()));
        };
        let world = character.world_view;
        let before = character.clone();

        let mut acquired: Option<(Item, Option<Item>)> = None;
        let mut power_reward = None;
        if let Some(reward) = segment.reward.take() {
            if let Some(item) = reward.equipment {
                let replaced = character.equipment.equip(item.clone());
                acquired = Some((item, replaced));
            }
            if let Some(power) = reward.power.filter(|p| *p != 0) {
                character.adjust_power(power as i64);
                power_reward = Some(power);
            }
        }
        let after = character.clone();

        if hidden {
            tracing::info!(world = world.key(), "Hidden event found");
            if self.profile.milestones.record_hidden_event(world) {
                self.persist_milestones();
            }
            let distinct_worlds = self.profile.milestones.hidden_event_worlds.len();
            self.record(&GameEvent::HiddenEventFound { distinct_worlds });
        }
        if let Some((item, replaced)) = acquired {
            tracing::info!(item = %item.name, slot = item.slot.name(), "Equipment acquired");
            self.notify(Notification::ItemAcquired {
                name: item.name.clone(),
                slot: item.slot,
                replaced: replaced.map(|old| old.name),
            });
            self.record(&GameEvent::EquipmentAcquired {
                item: &item,
                equipment_full: after.equipment.is_full(),
            });
        }
        if let Some(amount) = power_reward {
            self.notify(Notification::PowerGained {
                amount,
                power: after.power,
            });
        }
        for synergy in newly_active_synergies(&before, &after) {
            self.notify(Notification::synergy(synergy));
        }
        if before != after {
            self.record(&GameEvent::CharacterChanged { character: &after });
        }

        self.ctx.story.push(segment.situation);

        if let Some(spec) = segment.combat_encounter {
            let encounter = CombatEncounter::new(spec);
            tracing::info!(
                enemy = %encounter.enemy_name,
                power = encounter.enemy_power,
                "Combat started"
            );
            self.ctx.choices.clear();
            self.ctx.last_turn = None;
            self.ctx.encounter = Some(encounter);
            self.phase = GamePhase::Combat;
        } else if segment.is_end {
            self.ctx.choices.clear();
            self.phase = GamePhase::Ended;
        } else {
            self.ctx.choices = segment.choices;
            self.phase = GamePhase::Playing;
            if source == SegmentSource::Choice {
                self.maybe_random_event();
            }
        }
        Ok(())
    }

    fn maybe_random_event(&mut self) {
        let Some(event) = roll_random_event(self.config.random_event_chance, &mut self.rng) else {
            return;
        };
        let Some(character) = self.ctx.character.as_mut() else {
            return;
        };
        character.adjust_power(event.power_effect as i64);
        tracing::info!(effect = event.power_effect, "Random event");
        self.notify(Notification::random_event(event));
        self.record_character_change();
    }

    /// Post-segment bookkeeping for runs that landed in playing or ended.
    fn settle(&mut self) {
        if self.ctx.story.is_empty() {
            return;
        }
        match self.phase {
            GamePhase::Playing => self.autosave(false),
            GamePhase::Ended => {
                self.autosave(true);
                self.record(&GameEvent::StoryEnded);
            }
            _ => {}
        }
    }

    /// The choice a limbo save was waiting on.
    fn pending_choice(&self) -> String {
        self.ctx
            .story
            .last()
            .and_then(|line| line.strip_prefix(CHOICE_LINE_PREFIX))
            .unwrap_or(VICTORY_CHOICE)
            .to_string()
    }

    fn snapshot(
        &self,
        id: String,
        save_type: SaveType,
        is_end: bool,
    ) -> Result<SaveData, SessionError> {
        let character = self.playing_character("save")?.clone();
        Ok(SaveData {
            id,
            timestamp: chrono::Utc::now().timestamp_millis(),
            character,
            story: self.ctx.story.clone(),
            choices: self.ctx.choices.clone(),
            is_end,
            save_type,
        })
    }

    /// Upserts the single autosave record.
    fn autosave(&mut self, is_end: bool) {
        if self.ctx.story.is_empty() {
            return;
        }
        let Ok(save) = self.snapshot(AUTOSAVE_ID.to_string(), SaveType::Auto, is_end) else {
            return;
        };
        tracing::debug!(story = save.story.len(), choices = save.choices.len(), "Autosave");
        self.profile.upsert_save(save);
        self.persist_saves();
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }

    fn record(&mut self, event: &GameEvent) {
        let unlocked = self.profile.achievements.record(event);
        if unlocked.is_empty() {
            return;
        }
        for id in &unlocked {
            tracing::info!(achievement = %id.key(), "Achievement unlocked");
            self.notify(Notification::AchievementUnlocked { id: *id });
        }
        self.persist_achievements();
    }

    fn record_character_change(&mut self) {
        if let Some(character) = self.ctx.character.clone() {
            self.record(&GameEvent::CharacterChanged {
                character: &character,
            });
        }
    }

    fn persist_saves(&mut self) {
        if let Err(e) = self.profile.persist_saves(&mut self.store) {
            tracing::warn!(error = %e, "Failed to persist saves");
        }
    }

    fn persist_templates(&mut self) {
        if let Err(e) = self.profile.persist_templates(&mut self.store) {
            tracing::warn!(error = %e, "Failed to persist templates");
        }
    }

    fn persist_achievements(&mut self) {
        if let Err(e) = self.profile.persist_achievements(&mut self.store) {
            tracing::warn!(error = %e, "Failed to persist achievements");
        }
    }

    fn persist_milestones(&mut self) {
        if let Err(e) = self.profile.persist_milestones(&mut self.store) {
            tracing::warn!(error = %e, "Failed to persist milestones");
        }
    }
}
