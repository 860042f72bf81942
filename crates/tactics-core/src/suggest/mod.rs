//! AI-suggested structure cards
//!
//! A talk plan goes through two generator round-trips:
//!
//! 1. the plan is condensed into a synopsis of at most three sentences
//! 2. the synopsis and every Structure card are sent back with a request for
//!    three titles as a comma-separated list
//!
//! The reply is then resolved against the catalogue with [`resolve_titles`].
//! Both round-trips share one timeout budget. Nothing is retried or cached.

mod prompts;
mod resolve;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::card::{Card, Category};
use crate::error::{GeneratorError, SuggestError};
use crate::generator::{
    ChatMessage, GenerationRequest, TextGenerator, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
};
use crate::store::CardStore;

pub use prompts::{suggestion_prompt, summary_prompt};
pub use resolve::resolve_titles;

/// Free-form description of a planned talk
pub type TalkPlan = Map<String, Value>;

/// Model settings applied to both round-trips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestConfig {
    pub model: String,
    pub max_tokens: u32,
    /// Budget shared by the summary and suggestion calls
    pub timeout: Duration,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Clone)]
pub struct SuggestionEngine {
    store: Arc<CardStore>,
    generator: Arc<dyn TextGenerator>,
    config: SuggestConfig,
}

impl SuggestionEngine {
    pub fn new(
        store: Arc<CardStore>,
        generator: Arc<dyn TextGenerator>,
        config: SuggestConfig,
    ) -> Self {
        Self {
            store,
            generator,
            config,
        }
    }

    /// Suggest Structure cards for `talk_plan`
    pub async fn suggest_structures(
        &self,
        talk_plan: &TalkPlan,
    ) -> Result<Vec<Card>, SuggestError> {
        let budget = self.config.timeout;
        match tokio::time::timeout(budget, self.run(talk_plan)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Structure suggestion exceeded {:?}", budget);
                Err(SuggestError::CollaboratorTimeout(budget))
            }
        }
    }

    async fn run(&self, talk_plan: &TalkPlan) -> Result<Vec<Card>, SuggestError> {
        let synopsis = self.complete(summary_prompt(talk_plan)).await?;
        let synopsis = synopsis.trim();
        debug!("Talk synopsis: {}", synopsis);

        let structures: Vec<&Card> = self
            .store
            .in_category(Category::Structure.as_str())
            .collect();

        let reply = self
            .complete(suggestion_prompt(synopsis, &structures))
            .await?;
        debug!("Suggested titles: {}", reply);

        let cards = resolve_titles(&reply, &structures);
        info!(
            "Resolved {} of the suggested structures against {} catalogue entries",
            cards.len(),
            structures.len()
        );
        Ok(cards)
    }

    async fn complete(&self, prompt: String) -> Result<String, SuggestError> {
        let request = GenerationRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![ChatMessage::user(prompt)],
        };

        self.generator.generate(request).await.map_err(|e| match e {
            GeneratorError::Timeout => {
                warn!("Text generator call timed out");
                SuggestError::CollaboratorTimeout(self.config.timeout)
            }
            e => {
                warn!("Text generator call failed: {}", e);
                SuggestError::CollaboratorUnavailable(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HangingGenerator, ScriptedGenerator};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn card(id: i64, title: &str, category: &str) -> Card {
        Card {
            id,
            title: title.to_string(),
            category: category.to_string(),
            description: format!("About {}", title),
            example: String::new(),
        }
    }

    fn store() -> Arc<CardStore> {
        Arc::new(CardStore::new(vec![
            card(1, "Three Things", "Concept"),
            card(2, "Man in a Hole", "Structure"),
            card(3, "Hero's Journey", "Structure"),
            card(4, "Rags to Riches", "Structure"),
            card(5, "Cliffhanger", "Style"),
        ]))
    }

    fn plan() -> TalkPlan {
        json!({
            "topic": "Scaling a team",
            "audience": "engineering managers",
            "goals": ["hire well", "keep culture"],
            "duration": "20 minutes"
        })
        .as_object()
        .unwrap()
        .clone()
    }

    fn engine(generator: Arc<dyn TextGenerator>) -> SuggestionEngine {
        SuggestionEngine::new(store(), generator, SuggestConfig::default())
    }

    #[tokio::test]
    async fn test_returns_matching_structures_in_reply_order() {
        let generator = ScriptedGenerator::new(vec![
            Ok("A talk for managers about growing teams.".to_string()),
            Ok("Rags to Riches, Man in a Hole, The Sparkline".to_string()),
        ]);
        let cards = engine(generator.clone()).suggest_structures(&plan()).await.unwrap();

        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Rags to Riches", "Man in a Hole"]);
        assert!(cards.iter().all(|c| c.category == "Structure"));
    }

    #[tokio::test]
    async fn test_prompts_carry_plan_synopsis_and_catalogue() {
        let generator = ScriptedGenerator::new(vec![
            Ok("  A talk for managers.  ".to_string()),
            Ok("Hero's Journey".to_string()),
        ]);
        engine(generator.clone()).suggest_structures(&plan()).await.unwrap();

        let requests = generator.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.model == DEFAULT_MODEL));
        assert!(requests.iter().all(|r| r.max_tokens == DEFAULT_MAX_TOKENS));

        let summary = &requests[0].messages[0].content;
        assert!(summary.contains("engineering managers"));
        assert!(summary.contains("20 minutes"));

        let suggestion = &requests[1].messages[0].content;
        assert!(suggestion.contains("summary of a talk:\nA talk for managers.\n"));
        assert!(suggestion.contains("- Man in a Hole: About Man in a Hole"));
        assert!(suggestion.contains("- Rags to Riches"));
        assert!(!suggestion.contains("Three Things"));
        assert!(!suggestion.contains("Cliffhanger"));
    }

    #[tokio::test]
    async fn test_no_matching_titles_is_empty_not_error() {
        let generator = ScriptedGenerator::new(vec![
            Ok("Synopsis.".to_string()),
            Ok("Sure! Here are my suggestions: the heist, the quest".to_string()),
        ]);
        let cards = engine(generator).suggest_structures(&plan()).await.unwrap();
        assert!(cards.is_empty());
    }

    #[tokio::test]
    async fn test_summary_failure_skips_second_call() {
        let generator = ScriptedGenerator::new(vec![Err(GeneratorError::RateLimited)]);
        let err = engine(generator.clone())
            .suggest_structures(&plan())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SuggestError::CollaboratorUnavailable(GeneratorError::RateLimited)
        ));
        assert_eq!(generator.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_suggestion_failure_aborts() {
        let generator = ScriptedGenerator::new(vec![
            Ok("Synopsis.".to_string()),
            Err(GeneratorError::MalformedResponse("eof".to_string())),
        ]);
        let err = engine(generator).suggest_structures(&plan()).await.unwrap_err();
        assert!(matches!(err, SuggestError::CollaboratorUnavailable(_)));
    }

    #[tokio::test]
    async fn test_empty_store_still_round_trips() {
        let generator = ScriptedGenerator::new(vec![
            Ok("Synopsis.".to_string()),
            Ok("Man in a Hole".to_string()),
        ]);
        let engine = SuggestionEngine::new(
            Arc::new(CardStore::default()),
            generator.clone(),
            SuggestConfig::default(),
        );

        let cards = engine.suggest_structures(&plan()).await.unwrap();
        assert!(cards.is_empty());
        assert_eq!(generator.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_hung_generator_times_out() {
        let config = SuggestConfig {
            timeout: Duration::from_millis(50),
            ..SuggestConfig::default()
        };
        let engine = SuggestionEngine::new(store(), Arc::new(HangingGenerator), config);

        let err = engine.suggest_structures(&plan()).await.unwrap_err();
        assert!(matches!(
            err,
            SuggestError::CollaboratorTimeout(d) if d == Duration::from_millis(50)
        ));
    }

    #[tokio::test]
    async fn test_client_timeout_reports_budget() {
        let generator = ScriptedGenerator::new(vec![Err(GeneratorError::Timeout)]);
        let err = engine(generator.clone())
            .suggest_structures(&plan())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SuggestError::CollaboratorTimeout(d) if d == SuggestConfig::default().timeout
        ));
        assert_eq!(generator.calls(), 1);
    }
}
