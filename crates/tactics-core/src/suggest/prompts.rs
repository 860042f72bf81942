//! Prompt text for the two suggestion round-trips

use serde_json::{Map, Value};

use crate::card::Card;

/// Ask for a synopsis of the talk plan in at most three sentences
pub fn summary_prompt(talk_plan: &Map<String, Value>) -> String {
    // Map serialization cannot fail: keys are strings and values are JSON
    let plan = serde_json::to_string(talk_plan).unwrap_or_default();
    format!(
        "Summarize the following talk plan in no more than three sentences. \
         Cover what the talk is about, who it is for and what the audience \
         should take away. Use every field and value below.\n\n\
         Talk plan:\n{}",
        plan
    )
}

/// Ask for three structure titles grounded in `synopsis`, listing every
/// structure card as inspiration
pub fn suggestion_prompt(synopsis: &str, structures: &[&Card]) -> String {
    let catalogue = structures
        .iter()
        .map(|card| format!("- {}: {}", card.title, card.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Here is a summary of a talk:\n{}\n\n\
         Suggest exactly three storytelling structures that would suit this \
         talk. Choose them from the following structure cards:\n{}\n\n\
         Respond with only the card titles as a comma-separated list, \
         exactly as written above, and no other text.",
        synopsis, catalogue
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_prompt_embeds_every_field() {
        let plan = json!({
            "topic": "Rust in production",
            "audience": "backend engineers",
            "duration": 30
        });
        let prompt = summary_prompt(plan.as_object().unwrap());

        assert!(prompt.contains("three sentences"));
        assert!(prompt.contains("\"topic\":\"Rust in production\""));
        assert!(prompt.contains("\"audience\":\"backend engineers\""));
        assert!(prompt.contains("\"duration\":30"));
    }

    #[test]
    fn test_suggestion_prompt_lists_structures() {
        let hole = Card {
            id: 1,
            title: "Man in a Hole".to_string(),
            category: "Structure".to_string(),
            description: "Fall into trouble, climb out".to_string(),
            example: String::new(),
        };
        let prompt = suggestion_prompt("A talk about failure.", &[&hole]);

        assert!(prompt.contains("A talk about failure."));
        assert!(prompt.contains("- Man in a Hole: Fall into trouble, climb out"));
        assert!(prompt.contains("exactly three"));
        assert!(prompt.contains("comma-separated"));
    }
}
