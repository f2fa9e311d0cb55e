//! The fixed companion prompt.

use std::collections::HashMap;

use crate::error::Result;
use crate::models::Profile;

use super::styles::style_instructions;
use super::template::PromptTemplate;

/// Sentinel string the model must emit verbatim when the user mentions
/// imminent self-harm or asks for medical advice. The UI layer watches for
/// it; a later safety phase will attach the actual handoff flow.
pub const CRISIS_HANDOFF: &str = "{{CRISIS_HANDOFF}}";

const FIELDS: &[&str] = &[
    "name",
    "pronouns",
    "core_facts",
    "style_instructions",
    "chat_history",
    "query_str",
    "crisis_handoff",
];

const COMPANION_TEMPLATE: &str = "\
You are **Haven**, a relaxed friend chatting with the user as if you're swapping messages over your phone.

The user's name is {{name}} and pronouns are {{pronouns}}.

Here are some key facts about the user:
{{core_facts}}

**Conversation Style**
{{style_instructions}}

**Tone**
- Write informal, first-person sentences with contractions.
- Keep replies to at most three short paragraphs; never use bullet or numbered lists in your replies.

**Boundaries**
- You are not a therapist and never claim clinical expertise.
- If the user mentions imminent self-harm, suicide, or asks for medical or diagnostic advice, respond only with the exact token: {{crisis_handoff}}

**Content Guidelines**
- Focus on listening and reflecting feelings; ask gentle follow-up questions instead of prescribing fixes.
- Do not offer cliche advice (\"go for a walk\", \"deep breathing\", etc.) unless the user explicitly requests it.
- Light humour is welcome when supportive, but never be sarcastic or dismissive.

**Meta**
- If unsure what the user means, ask a clarifying question rather than guessing.

Here is the conversation history:
{{chat_history}}
And here is the user's latest message:
{{query_str}}";

/// The validated companion template. Constructing it at startup is the
/// drift check: a placeholder missing from either side fails here.
pub fn companion_template() -> Result<PromptTemplate> {
    PromptTemplate::new(COMPANION_TEMPLATE, FIELDS)
}

/// Merge profile, style, facts, transcript and the new query into the
/// final model input. Empty profile fields render as empty strings.
pub fn render_prompt(profile: &Profile, chat_history: &str, query: &str) -> Result<String> {
    let template = companion_template()?;

    let core_facts = profile
        .core_facts
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let values: HashMap<&str, String> = HashMap::from([
        ("name", profile.name.clone()),
        ("pronouns", profile.pronouns.clone()),
        ("core_facts", core_facts),
        (
            "style_instructions",
            style_instructions(profile.style).to_string(),
        ),
        ("chat_history", chat_history.to_string()),
        ("query_str", query.to_string()),
        ("crisis_handoff", CRISIS_HANDOFF.to_string()),
    ]);

    template.render(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConversationStyle, CoreFact};

    fn profile() -> Profile {
        Profile {
            name: "Ada".to_string(),
            pronouns: "she/her".to_string(),
            style: ConversationStyle::Challenging,
            core_facts: vec![
                CoreFact {
                    id: 1,
                    text: "Training for a half marathon.".to_string(),
                },
                CoreFact {
                    id: 2,
                    text: "Has a dog named Rosie.".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_companion_template_passes_drift_check() {
        companion_template().unwrap();
    }

    #[test]
    fn test_render_substitutes_every_placeholder() {
        let rendered = render_prompt(&profile(), "Ada: hi\nHaven: hello", "how's it going").unwrap();

        assert!(rendered.contains("The user's name is Ada and pronouns are she/her."));
        assert!(rendered.contains("Training for a half marathon.\nHas a dog named Rosie."));
        assert!(rendered.contains("Challenge the user's thinking"));
        assert!(rendered.contains("Ada: hi\nHaven: hello"));
        assert!(rendered.contains("how's it going"));
        assert!(rendered.contains(CRISIS_HANDOFF));

        // Only the crisis sentinel itself may remain in brace form.
        assert_eq!(rendered.matches("{{").count(), 1);
    }

    #[test]
    fn test_empty_profile_renders_empty_sections() {
        let rendered = render_prompt(&Profile::default(), "", "hi").unwrap();
        assert!(rendered.contains("The user's name is  and pronouns are ."));
        assert!(rendered.contains("key facts about the user:\n\n"));
        // No unresolved placeholder other than the sentinel.
        assert_eq!(rendered.matches("{{").count(), 1);
    }
}
