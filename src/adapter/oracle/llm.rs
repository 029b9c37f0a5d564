//! LLM-backed relationship oracle.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::analysis::PricedMarket;
use crate::error::OracleError;
use crate::port::{OracleRelation, RelationOracle};

use super::chat::ChatCompletion;

const SYSTEM_PROMPT: &str =
    "You are a precise market analyst specializing in finding arbitrage opportunities.";

/// Relationship oracle backed by a chat completion provider.
pub struct LlmOracle {
    chat: Arc<dyn ChatCompletion>,
}

impl LlmOracle {
    /// Create a new oracle on top of a chat client.
    pub fn new(chat: Arc<dyn ChatCompletion>) -> Self {
        Self { chat }
    }

    fn build_prompt(&self, markets: &[PricedMarket]) -> String {
        let markets_text = markets
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let prices = m
                    .pricing
                    .outcome_prices
                    .iter()
                    .map(|(name, e)| format!("{name}: {}", e.probability))
                    .collect::<Vec<_>>()
                    .join(", ");
                let end_date = m
                    .market
                    .end_date()
                    .map(|d| d.to_rfc3339())
                    .unwrap_or_else(|| "unknown".into());
                format!(
                    "Market {}:\nQuestion: {}\nDescription: {}\nCurrent Prices: {{{prices}}}\nEnd Date: {end_date}",
                    i + 1,
                    m.market.question(),
                    m.market.description(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"You are an expert prediction market arbitrage analyst. Your goal is to find ONLY GUARANTEED arbitrage opportunities where buying combinations of YES or NO shares across markets creates mathematically certain profit.
Remember: You can only BUY positions (YES or NO shares) - no short selling is allowed. Price of shares for all outcomes must be less than 1.

{markets_text}

IMPORTANT: Return ONLY a JSON array without any additional text, markdown, or explanation.
Each element in the array should follow this exact structure:
{{
    "markets": ["market question 1", "market question 2"],
    "relationship_type": "mutually_exclusive|complementary|conditional|unrelated",
    "confidence_score": 0.95,
    "explanation": "Detailed explanation",
    "potential_arbitrage": true,
    "combined_probability": 0.95,
    "arbitrage_explanation": "Specific arbitrage mechanics"
}}

Your response should start with [ and end with ] and be valid JSON.
Do not include any other text or explanations outside the JSON array.
"#
        )
    }

    fn parse_response(&self, response: &str) -> Result<Vec<OracleRelation>, OracleError> {
        let json = extract_json_array(response)?;
        serde_json::from_str(json).map_err(|e| OracleError::Parse(format!("invalid JSON: {e}")))
    }
}

#[async_trait]
impl RelationOracle for LlmOracle {
    async fn analyze(&self, markets: &[PricedMarket]) -> Result<Vec<OracleRelation>, OracleError> {
        if markets.len() < 2 {
            return Ok(vec![]);
        }

        let prompt = self.build_prompt(markets);
        let response = self.chat.complete(SYSTEM_PROMPT, &prompt).await?;
        debug!(provider = self.chat.name(), "oracle analysis complete");

        self.parse_response(&response)
    }

    fn oracle_name(&self) -> &'static str {
        "llm"
    }
}

/// Pull the JSON array out of a fenced code block or raw response text.
fn extract_json_array(text: &str) -> Result<&str, OracleError> {
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        let end = text[start..]
            .find("```")
            .map(|i| start + i)
            .unwrap_or(text.len());
        Ok(text[start..end].trim())
    } else if let Some(start) = text.find('[') {
        let end = text.rfind(']').map(|i| i + 1).unwrap_or(text.len());
        Ok(&text[start..end])
    } else {
        Err(OracleError::Parse("no JSON array found in response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::chat::tests::MockChat;
    use super::*;
    use crate::domain::{Market, MarketId, MarketPricing, Outcome, OutcomeId};
    use crate::port::OracleRelationType;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn priced(id: &str, question: &str) -> PricedMarket {
        let market = Market::new(
            MarketId::new(id),
            question,
            "",
            vec![
                Outcome::new(OutcomeId::new(format!("{id}-yes")), "Yes"),
                Outcome::new(OutcomeId::new(format!("{id}-no")), "No"),
            ],
            None,
            vec![],
            None,
            0.0,
            0.0,
        );
        PricedMarket::new(
            market,
            MarketPricing {
                outcome_prices: BTreeMap::new(),
                total_implied_probability: Decimal::ONE,
                market_efficiency: Decimal::ZERO,
                average_spread: Decimal::ZERO,
            },
        )
    }

    #[tokio::test]
    async fn parses_valid_array_response() {
        let response = r#"[
            {
                "markets": ["Will A win?", "Will B win?"],
                "relationship_type": "mutually_exclusive",
                "confidence_score": 0.95,
                "explanation": "Same election",
                "potential_arbitrage": true,
                "combined_probability": 0.85,
                "arbitrage_explanation": "Buy YES on both"
            }
        ]"#;

        let oracle = LlmOracle::new(Arc::new(MockChat::new(response)));
        let markets = vec![priced("a", "Will A win?"), priced("b", "Will B win?")];

        let relations = oracle.analyze(&markets).await.unwrap();
        assert_eq!(relations.len(), 1);
        assert_eq!(
            relations[0].relationship_type,
            OracleRelationType::MutuallyExclusive
        );
        assert!(relations[0].potential_arbitrage);
        assert_eq!(relations[0].combined_probability, Some(0.85));
    }

    #[tokio::test]
    async fn parses_fenced_response() {
        let response = "Here you go:\n```json\n[]\n```";
        let oracle = LlmOracle::new(Arc::new(MockChat::new(response)));
        let markets = vec![priced("a", "A?"), priced("b", "B?")];

        let relations = oracle.analyze(&markets).await.unwrap();
        assert!(relations.is_empty());
    }

    #[tokio::test]
    async fn rejects_response_without_json() {
        let oracle = LlmOracle::new(Arc::new(MockChat::new("no structured data here")));
        let markets = vec![priced("a", "A?"), priced("b", "B?")];

        assert!(oracle.analyze(&markets).await.is_err());
    }

    #[tokio::test]
    async fn fewer_than_two_markets_short_circuits() {
        let oracle = LlmOracle::new(Arc::new(MockChat::new("unused")));
        let markets = vec![priced("a", "A?")];

        let relations = oracle.analyze(&markets).await.unwrap();
        assert!(relations.is_empty());
    }
}
