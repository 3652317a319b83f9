use serde_json::json;

use crate::constants::quiz_prompt::{quiz_prompt, OPTION_KEYS};
use crate::models::domain::Topic;
use crate::models::dto::generation::{Content, GenerationConfig, GenerationRequest, Part};

/// Builds the structured-generation request for a quiz on `topic`.
pub fn build_request(topic: &Topic) -> GenerationRequest {
    GenerationRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(quiz_prompt(topic.as_str())),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    }
}

/// Declarative output schema the service enforces on the model's answer.
pub fn response_schema() -> serde_json::Value {
    let option_properties: serde_json::Map<String, serde_json::Value> = OPTION_KEYS
        .iter()
        .map(|key| (key.to_string(), json!({ "type": "STRING" })))
        .collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "options": {
                    "type": "OBJECT",
                    "properties": option_properties,
                    "required": OPTION_KEYS,
                },
                "correctAnswer": { "type": "STRING" },
            },
            "required": ["question", "options", "correctAnswer"],
        }
    })
}
