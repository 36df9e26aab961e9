//! Keyword-scored context retrieval
//!
//! Deterministic, explainable ranking of knowledge-base documents against a
//! free-text query. No embeddings: scores come from topic-word overlap,
//! substring hits for longer query words and the topical expansion table.
//! Documents with equal scores keep their corpus order.

use super::{Document, ExpansionTable, KnowledgeBase};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Number of documents returned when the caller does not ask for a count
pub const DEFAULT_TOP_K: usize = 3;

const TOPIC_OVERLAP_WEIGHT: u32 = 3;
const CONTENT_HIT_WEIGHT: u32 = 1;
const TOPIC_HIT_WEIGHT: u32 = 2;
const EXPANSION_HIT_WEIGHT: u32 = 2;
const MIN_SUBSTRING_WORD_CHARS: usize = 4;

/// Scoring rule used to rank documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringRule {
    /// Topic overlap ×3, substring hits for words longer than three
    /// characters, plus expansion-table hits
    #[default]
    Weighted,
    /// +1 per query word found among the content tokens, +2 per word found
    /// among the topic tokens; no length filter and no expansion table
    Simple,
}

/// A document that scored above zero for a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredDocument {
    /// Position of the document in the corpus
    pub index: usize,
    pub topic: String,
    pub score: u32,
    pub content: String,
}

/// Ranks knowledge-base documents against queries
#[derive(Debug, Clone)]
pub struct ContextRetriever {
    knowledge: Arc<KnowledgeBase>,
    rule: ScoringRule,
}

impl ContextRetriever {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge, rule: ScoringRule::default() }
    }

    pub fn with_rule(mut self, rule: ScoringRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn rule(&self) -> ScoringRule {
        self.rule
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Content of the `top_k` best-scoring documents, best first
    pub fn retrieve(&self, query: &str, top_k: usize) -> Vec<String> {
        self.rank(query).into_iter().take(top_k).map(|doc| doc.content).collect()
    }

    /// Every document with a positive score, ordered by score descending.
    ///
    /// The sort is stable, so equal scores keep corpus order.
    pub fn rank(&self, query: &str) -> Vec<ScoredDocument> {
        let query_lower = query.to_lowercase();
        let query_words: HashSet<&str> = query_lower.split_whitespace().collect();

        let mut scored: Vec<ScoredDocument> = self
            .knowledge
            .documents()
            .iter()
            .enumerate()
            .filter_map(|(index, doc)| {
                let score = match self.rule {
                    ScoringRule::Weighted => weighted_score(
                        &query_lower,
                        &query_words,
                        doc,
                        self.knowledge.expansions(),
                    ),
                    ScoringRule::Simple => simple_score(&query_words, doc),
                };
                (score > 0).then(|| ScoredDocument {
                    index,
                    topic: doc.topic.clone(),
                    score,
                    content: doc.content.clone(),
                })
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));

        debug!(
            rule = ?self.rule,
            eligible = scored.len(),
            top_score = scored.first().map(|d| d.score).unwrap_or(0),
            "Ranked knowledge base"
        );

        scored
    }
}

fn weighted_score(
    query_lower: &str,
    query_words: &HashSet<&str>,
    doc: &Document,
    expansions: &ExpansionTable,
) -> u32 {
    let topic = doc.topic.to_lowercase();
    let content = doc.content.to_lowercase();
    let topic_words: HashSet<&str> = topic.split_whitespace().collect();

    let overlap = query_words.intersection(&topic_words).count() as u32;
    let mut score = overlap * TOPIC_OVERLAP_WEIGHT;

    for word in query_words.iter().filter(|w| w.chars().count() >= MIN_SUBSTRING_WORD_CHARS) {
        if content.contains(word) {
            score += CONTENT_HIT_WEIGHT;
        }
        if topic.contains(word) {
            score += TOPIC_HIT_WEIGHT;
        }
    }

    for expansion in expansions.iter().filter(|e| query_lower.contains(e.trigger.as_str())) {
        for keyword in &expansion.keywords {
            if topic.contains(keyword.as_str()) || content.contains(keyword.as_str()) {
                score += EXPANSION_HIT_WEIGHT;
            }
        }
    }

    score
}

fn simple_score(query_words: &HashSet<&str>, doc: &Document) -> u32 {
    let topic = doc.topic.to_lowercase();
    let content = doc.content.to_lowercase();
    let topic_words: HashSet<&str> = topic.split_whitespace().collect();
    let content_words: HashSet<&str> = content.split_whitespace().collect();

    query_words
        .iter()
        .map(|word| {
            let mut score = 0;
            if content_words.contains(word) {
                score += CONTENT_HIT_WEIGHT;
            }
            if topic_words.contains(word) {
                score += TOPIC_HIT_WEIGHT;
            }
            score
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retriever() -> ContextRetriever {
        ContextRetriever::new(Arc::new(KnowledgeBase::security()))
    }

    fn content_of(topic: &str) -> String {
        KnowledgeBase::security()
            .documents()
            .iter()
            .find(|d| d.topic == topic)
            .map(|d| d.content.clone())
            .unwrap()
    }

    #[test]
    fn test_retriever_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContextRetriever>();
        assert_send_sync::<KnowledgeBase>();

        let shared = Arc::new(retriever());
        let expected = shared.retrieve("How do I prevent SQL injection?", 3);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let retriever = Arc::clone(&shared);
                std::thread::spawn(move || retriever.retrieve("How do I prevent SQL injection?", 3))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_sql_injection_query_ranks_sql_first() {
        let results = retriever().retrieve("How do I prevent SQL injection?", 3);
        assert!(!results.is_empty());
        assert!(results.len() <= 3);
        assert_eq!(results[0], content_of("SQL Injection"));
    }

    #[test]
    fn test_sql_injection_scores() {
        let ranked = retriever().rank("How do I prevent SQL injection?");
        // topic overlap on "sql" (3), "prevent" in content (1), expansion hits
        // on sql/injection/database (6)
        assert_eq!(ranked[0].topic, "SQL Injection");
        assert_eq!(ranked[0].score, 10);
        assert_eq!(ranked[1].topic, "XSS Prevention");
        assert_eq!(ranked[1].score, 2);
        assert_eq!(ranked[2].topic, "API Rate Limiting");
        assert_eq!(ranked[2].score, 1);
    }

    #[test]
    fn test_authentication_query_ranks_auth_first() {
        let ranked = retriever().rank("authentication best practices");
        assert_eq!(ranked[0].topic, "Authentication Best Practices");
        assert_eq!(ranked[0].score, 23);
    }

    #[test]
    fn test_unrelated_query_is_empty() {
        assert!(retriever().retrieve("machine learning datasets", 3).is_empty());
    }

    #[test]
    fn test_empty_query() {
        let r = retriever();
        for k in 0..6 {
            assert!(r.retrieve("", k).is_empty());
        }
        assert!(r.retrieve("   \t ", 3).is_empty());
    }

    #[test]
    fn test_top_k_zero() {
        assert!(retriever().retrieve("How do I prevent SQL injection?", 0).is_empty());
    }

    #[test]
    fn test_result_bounds() {
        let r = retriever();
        let queries = [
            "How do I prevent SQL injection?",
            "authentication best practices",
            "rate limiting for xss and privilege escalation",
            "input",
        ];
        for query in queries {
            let eligible = r.rank(query).len();
            for k in 0..8 {
                let results = r.retrieve(query, k);
                assert!(results.len() <= k);
                assert!(results.len() <= eligible);
                assert_eq!(results.len(), k.min(eligible));
            }
        }
    }

    #[test]
    fn test_prefix_monotonic_in_k() {
        let r = retriever();
        let query = "rate limiting for xss and privilege escalation";
        for k in 0..6 {
            let shorter = r.retrieve(query, k);
            let longer = r.retrieve(query, k + 1);
            assert_eq!(&longer[..shorter.len()], shorter.as_slice());
        }
    }

    #[test]
    fn test_deterministic_and_side_effect_free() {
        let r = retriever();
        let query = "What authentication methods should I use for my API?";
        let first = r.retrieve(query, 3);
        let second = r.retrieve(query, 3);
        assert_eq!(first, second);
        assert_eq!(r.knowledge(), &KnowledgeBase::security());
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        // "input" appears in the SQL and XSS bodies only, one point each
        let ranked = retriever().rank("input");
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].score, ranked[1].score);
        assert!(ranked[0].index < ranked[1].index);
        assert_eq!(ranked[0].topic, "SQL Injection");
    }

    #[test]
    fn test_short_words_only_use_overlap_and_expansion() {
        // every word has three characters or fewer
        let ranked = retriever().rank("sql api");
        let sql = ranked.iter().find(|d| d.topic == "SQL Injection").unwrap();
        assert_eq!(sql.score, 3 + 6);
        let api = ranked.iter().find(|d| d.topic == "API Rate Limiting").unwrap();
        assert_eq!(api.score, 3);
    }

    #[test]
    fn test_expansion_trigger_matches_substring() {
        // "accurate" contains the "rate" trigger
        let ranked = retriever().rank("accurate");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].topic, "API Rate Limiting");
        assert_eq!(ranked[0].score, 6);
    }

    #[test]
    fn test_simple_rule_differs() {
        let weighted = retriever();
        let simple = retriever().with_rule(ScoringRule::Simple);
        assert_eq!(simple.rule(), ScoringRule::Simple);

        let ranked = simple.rank("authentication best practices");
        assert_eq!(ranked[0].topic, "Authentication Best Practices");
        assert_eq!(ranked[0].score, 6);

        // the simple rule has no expansion table and no substring matching
        assert!(simple.rank("accurate").is_empty());
        assert!(!weighted.rank("accurate").is_empty());
    }

    #[test]
    fn test_simple_rule_counts_short_words() {
        let ranked = retriever().with_rule(ScoringRule::Simple).rank("api");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].topic, "API Rate Limiting");
        // "api" is a topic token and a content token
        assert_eq!(ranked[0].score, 3);
    }

    #[test]
    fn test_custom_knowledge_base() {
        let kb = KnowledgeBase::new(
            vec![Document::new("CSRF Tokens", "Use anti-forgery tokens.")],
            ExpansionTable::default(),
        )
        .unwrap();
        let r = ContextRetriever::new(Arc::new(kb));
        assert_eq!(r.retrieve("csrf tokens", 3), vec!["Use anti-forgery tokens.".to_string()]);
        assert!(r.retrieve("sql", 3).is_empty());
    }
}
