//! Prompt assembly: validated templating, style instructions and the
//! companion prompt.

mod companion;
mod styles;
mod template;

pub use companion::{CRISIS_HANDOFF, companion_template, render_prompt};
pub use styles::style_instructions;
pub use template::PromptTemplate;
