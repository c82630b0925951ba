//! Prompt builder for spelling and grammar correction.
//!
//! [`PromptBuilder`] constructs two kinds of prompts:
//! * **Chat** (`build_chat`): `(system_msg, user_msg)` for the remote
//!   `/v1/chat/completions` backend.  The user message is the input text
//!   verbatim.
//! * **Flat** (`build`): a single string for the local `/api/generate`
//!   backend.
//!
//! Portuguese (`"pt"`) and English (`"en"`) have dedicated instructions; any
//! other code falls back to Portuguese.

// ---------------------------------------------------------------------------
// System instructions
// ---------------------------------------------------------------------------

const SYSTEM_INSTRUCTION_PT: &str = "\
Você é um especialista em correção ortográfica e gramatical. \
Corrija o texto preservando o estilo e formato original. \
Mantenha a estrutura de parágrafos e pontuação.";

const SYSTEM_INSTRUCTION_EN: &str = "\
You are an expert in spelling and grammar correction. \
Correct the text while preserving its original style and format. \
Keep the paragraph structure and punctuation.";

/// Appended to the flat prompt so small local models answer with the text only.
const REPLY_RULE_PT: &str = "Responda apenas com o texto corrigido, sem explicações.";
const REPLY_RULE_EN: &str = "Reply with ONLY the corrected text, no explanation.";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds correction prompts in either chat-message or flat format.
///
/// # Example
/// ```rust
/// use text_corrector::correction::PromptBuilder;
///
/// let builder = PromptBuilder::new("pt");
/// let (system, user) = builder.build_chat("Ela fez o trabalho rápido.");
/// assert!(system.contains("correção ortográfica"));
/// assert_eq!(user, "Ela fez o trabalho rápido.");
/// ```
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    language: String,
}

impl PromptBuilder {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    /// Build a **(system_msg, user_msg)** pair.
    pub fn build_chat(&self, text: &str) -> (String, String) {
        (self.system_instruction().to_string(), text.to_string())
    }

    /// Build a **flat** prompt: instruction, reply rule, then the text
    /// between labelled sections.
    pub fn build(&self, text: &str) -> String {
        let (original_label, corrected_label) = if self.is_english() {
            ("Original text:", "Corrected text:")
        } else {
            ("Texto original:", "Texto corrigido:")
        };

        let mut prompt = String::with_capacity(text.len() + 512);
        prompt.push_str(self.system_instruction());
        prompt.push('\n');
        prompt.push_str(self.reply_rule());
        prompt.push_str(&format!(
            "\n\n{original_label}\n{text}\n\n{corrected_label}\n"
        ));
        prompt
    }

    fn is_english(&self) -> bool {
        self.language == "en"
    }

    fn system_instruction(&self) -> &'static str {
        if self.is_english() {
            SYSTEM_INSTRUCTION_EN
        } else {
            SYSTEM_INSTRUCTION_PT
        }
    }

    fn reply_rule(&self) -> &'static str {
        if self.is_english() {
            REPLY_RULE_EN
        } else {
            REPLY_RULE_PT
        }
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new("pt")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portuguese_instruction_covers_style_and_structure() {
        let (system, _) = PromptBuilder::new("pt").build_chat("oi");

        assert!(system.contains("correção ortográfica e gramatical"));
        assert!(system.contains("estilo e formato original"));
        assert!(system.contains("parágrafos e pontuação"));
    }

    #[test]
    fn chat_user_message_is_the_input_verbatim() {
        let input = "  primeira linha\n\nsegunda linha  ";
        let (_, user) = PromptBuilder::new("pt").build_chat(input);
        assert_eq!(user, input);
    }

    #[test]
    fn english_instruction() {
        let (system, _) = PromptBuilder::new("en").build_chat("helo wrld");
        assert!(system.contains("spelling and grammar"));
        assert!(system.contains("paragraph structure"));
    }

    #[test]
    fn unknown_language_falls_back_to_portuguese() {
        let (system, _) = PromptBuilder::new("ja").build_chat("test");
        assert!(system.contains("especialista"));
    }

    #[test]
    fn flat_prompt_contains_all_sections() {
        let prompt = PromptBuilder::new("pt").build("Ela fez o trabalho rápido.");

        assert!(prompt.starts_with(SYSTEM_INSTRUCTION_PT));
        assert!(prompt.contains("Responda apenas com o texto corrigido"));
        assert!(prompt.contains("Texto original:\nEla fez o trabalho rápido.\n"));
        assert!(prompt.ends_with("Texto corrigido:\n"));
    }

    #[test]
    fn flat_english_prompt_uses_english_labels() {
        let prompt = PromptBuilder::new("en").build("helo wrld");
        assert!(prompt.contains("Original text:\nhelo wrld\n"));
        assert!(prompt.ends_with("Corrected text:\n"));
    }
}
