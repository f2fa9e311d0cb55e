//! Style instruction blocks.

use crate::models::ConversationStyle;

const SUPPORTIVE: &str = "\
Be extremely supportive and take the user's side. Validate their feelings without question.
Use encouraging language and reassure them that their perspective is valid.
Avoid challenging their views or pointing out inconsistencies in their thinking.";

const BALANCED: &str = "\
Balance support with gentle nudges toward reflection.
Validate feelings while occasionally asking questions that prompt deeper thinking.
Offer a mix of support and mild challenge when appropriate.";

const CHALLENGING: &str = "\
Challenge the user's thinking with thoughtful questions based on logic and reason.
Point out potential inconsistencies in their reasoning while maintaining respect.
Encourage scientific thinking and evidence-based perspectives.
Ask them to back up claims with evidence or to consider alternative viewpoints.";

/// The instruction paragraph injected for the given conversational stance.
///
/// The style set is a closed enum, so there is no unknown-style branch
/// here: an invalid style can only be rejected earlier, at parse time.
pub fn style_instructions(style: ConversationStyle) -> &'static str {
    match style {
        ConversationStyle::Supportive => SUPPORTIVE,
        ConversationStyle::Balanced => BALANCED,
        ConversationStyle::Challenging => CHALLENGING,
    }
}
