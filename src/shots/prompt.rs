//! Fixed prompt templates. Only the script text is interpolated.

use crate::upstream::ChatMessage;

const SYSTEM_PROMPT: &str = r#"You convert film scripts into concise, production-ready shot lists.
Respond ONLY with valid JSON matching this schema:
{
  "shots": [
    {
      "n": number,                // 1-based shot number
      "slugline": string,         // e.g., "INT. KITCHEN - NIGHT"
      "description": string,      // 1-2 sentences
      "angle": string,            // e.g., "WS", "MS", "CU", "OTS", "POV"
      "movement": string,         // e.g., "static", "push-in", "pan right"
      "location": string,
      "time_of_day": string,      // "DAY" / "NIGHT" / etc.
      "props": string[],          // main props
      "notes": string             // optional brief note
    }
  ]
}"#;

pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

pub fn user_prompt(script: &str) -> String {
    format!(
        "Script:\n{script}\n\nGenerate 8–15 shots (merge ultra-short beats). \
         Keep it practical for a micro-crew."
    )
}

/// The two-message conversation: system instructions, then the script.
pub fn messages(script: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt()),
        ChatMessage::user(user_prompt(script)),
    ]
}
