use serde_json::Value;

use crate::models::ChatTurn;

const CONTEXT_HEADER: &str = "--- KONTEKS PRODUK (HANYA GUNAKAN INFO INI) ---";
const CONTEXT_FOOTER: &str = "--- AKHIR KONTEKS ---";
const HISTORY_HEADER: &str = "--- HISTORY PERCAKAPAN SEBELUMNYA ---";
const EMPTY_CONTEXT_SENTINEL: &str =
    "Tidak ada produk atau informasi yang relevan ditemukan di database.";

/// Assembles the linear prompt sent to the generation backend.
///
/// Section order is part of the contract: instruction, context block,
/// history transcript, then the bare `Assistant:` continuation cue.
pub struct PromptBuilder {
    system_instruction: String,
}

impl PromptBuilder {
    pub fn new(system_instruction: String) -> Self {
        Self { system_instruction }
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// The grounding rules for the customer service persona. Constrains the
    /// backend to the supplied context, tells it to defer politely when the
    /// information is absent, and pins the reply language.
    pub fn default_system_instruction() -> String {
        r#"Anda adalah Customer Service AI untuk "Sinar Box", sebuah toko spesialis neon box di Pontianak.
Tugas Anda adalah menjawab pertanyaan pelanggan HANYA berdasarkan informasi dalam "KONTEKS PRODUK" yang diberikan.
- JANGAN mengarang harga, spesifikasi, atau informasi lain.
- Jika informasi tidak ada di konteks, jawab dengan sopan bahwa Anda tidak memiliki informasi tersebut atau akan menanyakannya ke tim.
- Jawab dengan ramah, profesional, dan to-the-point.
- Gunakan bahasa Indonesia."#
            .to_string()
    }

    /// Render the retrieved payloads into the fenced context block, or the
    /// "nothing relevant" sentinel when retrieval came back empty.
    pub fn build_context_block(&self, payloads: &[Value]) -> String {
        let body = if payloads.is_empty() {
            EMPTY_CONTEXT_SENTINEL.to_string()
        } else {
            serde_json::to_string_pretty(payloads)
                .unwrap_or_else(|_| EMPTY_CONTEXT_SENTINEL.to_string())
        };

        format!("{}\n{}\n{}", CONTEXT_HEADER, body, CONTEXT_FOOTER)
    }

    /// Render history as `User:`/`Assistant:` lines in chronological order.
    pub fn build_transcript(&self, turns: &[ChatTurn]) -> String {
        turns
            .iter()
            .map(|turn| format!("{}: {}", turn.role.label(), turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Compose the final prompt. Nothing follows the continuation cue.
    pub fn assemble(&self, payloads: &[Value], history: &[ChatTurn]) -> String {
        format!(
            "{}\n{}\n{}\n{}\nAssistant:",
            self.system_instruction,
            self.build_context_block(payloads),
            HISTORY_HEADER,
            self.build_transcript(history),
        )
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(Self::default_system_instruction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatTurn;
    use serde_json::json;

    #[test]
    fn test_context_block_with_payloads() {
        let builder = PromptBuilder::default();
        let block = builder.build_context_block(&[json!({"name": "Neon Box A"})]);
        assert!(block.starts_with(CONTEXT_HEADER));
        assert!(block.ends_with(CONTEXT_FOOTER));
        assert!(block.contains("Neon Box A"));
        assert!(!block.contains(EMPTY_CONTEXT_SENTINEL));
    }

    #[test]
    fn test_context_block_empty_uses_sentinel() {
        let builder = PromptBuilder::default();
        let block = builder.build_context_block(&[]);
        assert!(block.contains(EMPTY_CONTEXT_SENTINEL));
    }

    #[test]
    fn test_transcript_role_labels_and_order() {
        let builder = PromptBuilder::default();
        let turns = vec![ChatTurn::user("halo"), ChatTurn::assistant("halo juga")];
        assert_eq!(builder.build_transcript(&turns), "User: halo\nAssistant: halo juga");
    }

    #[test]
    fn test_assemble_section_order() {
        let builder = PromptBuilder::new("INSTRUKSI".to_string());
        let prompt = builder.assemble(&[json!({"name": "A"})], &[ChatTurn::user("halo")]);

        let instruction_at = prompt.find("INSTRUKSI").unwrap();
        let context_at = prompt.find(CONTEXT_HEADER).unwrap();
        let history_at = prompt.find(HISTORY_HEADER).unwrap();
        let user_at = prompt.find("User: halo").unwrap();

        assert!(instruction_at < context_at);
        assert!(context_at < history_at);
        assert!(history_at < user_at);
        assert!(prompt.ends_with("Assistant:"));
    }

    #[test]
    fn test_assemble_ends_with_cue_even_when_empty() {
        let builder = PromptBuilder::default();
        let prompt = builder.assemble(&[], &[]);
        assert!(prompt.ends_with("Assistant:"));
        assert!(prompt.contains(EMPTY_CONTEXT_SENTINEL));
    }
}
