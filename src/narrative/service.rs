//! The port the session uses to get story segments.

use super::types::StorySegment;
use crate::character::Character;
use crate::core::NarrativeError;

/// Produces the next story segment.
///
/// `history` is the story log so far and `choice` the player's latest
/// choice, or `None` when the story should simply continue (opening
/// segment, resumed limbo save).
pub trait NarrativeService {
    fn generate_segment(
        &mut self,
        character: &Character,
        history: &[String],
        choice: Option<&str>,
    ) -> Result<StorySegment, NarrativeError>;
}

impl<T: NarrativeService + ?Sized> NarrativeService for Box<T> {
    fn generate_segment(
        &mut self,
        character: &Character,
        history: &[String],
        choice: Option<&str>,
    ) -> Result<StorySegment, NarrativeError> {
        (**self).generate_segment(character, history, choice)
    }
}
