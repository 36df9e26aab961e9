//! Evaluator adapter
//!
//! Exposes a chat backend in the shape an external evaluation harness expects:
//! deterministic generation from a single prompt, plus structured decoding
//! into either a plain JSON mapping or a typed record.

use crate::llm::{CompletionOptions, LLMError, LLMProvider, LLMResult, Message};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// How structured evaluator output is decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeTarget {
    /// Untyped JSON object
    #[default]
    Mapping,
    /// Caller-supplied record type
    Record,
}

/// Decoded evaluator output
#[derive(Debug, Clone, PartialEq)]
pub enum Structured<T> {
    Mapping(serde_json::Map<String, serde_json::Value>),
    Record(T),
}

impl<T> Structured<T> {
    pub fn into_record(self) -> Option<T> {
        match self {
            Structured::Record(record) => Some(record),
            Structured::Mapping(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        match self {
            Structured::Mapping(map) => Some(map),
            Structured::Record(_) => None,
        }
    }
}

/// Chat backend wrapped for use as an evaluation model
#[derive(Clone)]
pub struct JudgeModel {
    provider: Arc<dyn LLMProvider>,
    options: CompletionOptions,
}

impl JudgeModel {
    /// `options` normally comes from `GenerationProfile::judge`
    pub fn new(provider: Arc<dyn LLMProvider>, options: CompletionOptions) -> Self {
        Self { provider, options }
    }

    pub fn model_name(&self) -> &str {
        self.provider.model()
    }

    /// Raw model reply to `prompt`
    pub async fn generate(&self, prompt: &str) -> LLMResult<String> {
        let response = self.provider.complete(vec![Message::user(prompt)], self.options).await?;
        Ok(response.content)
    }

    /// Model reply decoded as `target`.
    ///
    /// The JSON object is taken from the first `{` to the last `}` of the
    /// reply so surrounding prose or code fences are ignored.
    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        prompt: &str,
        target: DecodeTarget,
    ) -> LLMResult<Structured<T>> {
        let reply = self.generate(prompt).await?;
        decode(&reply, target)
    }
}

/// Decode the JSON object embedded in `reply`
pub fn decode<T: DeserializeOwned>(reply: &str, target: DecodeTarget) -> LLMResult<Structured<T>> {
    let json = extract_json_object(reply)
        .ok_or_else(|| LLMError::parse("evaluator reply contains no JSON object"))?;
    debug!(?target, bytes = json.len(), "Decoding evaluator output");

    match target {
        DecodeTarget::Mapping => Ok(Structured::Mapping(serde_json::from_str(json)?)),
        DecodeTarget::Record => Ok(Structured::Record(serde_json::from_str(json)?)),
    }
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockLLMProvider;
    use crate::llm::{Backend, GenerationProfile};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Verdict {
        verdict: String,
        reason: String,
    }

    fn judge(mock: &MockLLMProvider) -> JudgeModel {
        JudgeModel::new(Arc::new(mock.clone()), GenerationProfile::for_backend(Backend::Ollama).judge)
    }

    #[tokio::test]
    async fn test_generate_uses_single_user_message() {
        let mock = MockLLMProvider::replying("yes");
        let judge = judge(&mock);

        assert_eq!(judge.model_name(), "mock-model");
        assert_eq!(judge.generate("Is the answer relevant?").await.unwrap(), "yes");

        let (messages, options) = mock.last_call();
        assert_eq!(messages, vec![Message::user("Is the answer relevant?")]);
        assert_eq!(options.temperature, Some(0.0));
        assert_eq!(options.max_tokens, Some(1000));
    }

    #[tokio::test]
    async fn test_structured_record() {
        let mock = MockLLMProvider::replying(
            "Here you go:\n```json\n{\"verdict\": \"yes\", \"reason\": \"on topic\"}\n```",
        );
        let judge = judge(&mock);

        let decoded = judge.generate_structured::<Verdict>("grade", DecodeTarget::Record).await.unwrap();
        assert_eq!(
            decoded.into_record(),
            Some(Verdict { verdict: "yes".to_string(), reason: "on topic".to_string() })
        );
    }

    #[tokio::test]
    async fn test_structured_mapping() {
        let mock = MockLLMProvider::replying("{\"score\": 0.9, \"nested\": {\"a\": 1}}");
        let judge = judge(&mock);

        let decoded = judge
            .generate_structured::<serde_json::Value>("grade", DecodeTarget::Mapping)
            .await
            .unwrap();
        let map = decoded.as_mapping().unwrap();
        assert_eq!(map["score"], serde_json::json!(0.9));
        assert_eq!(map["nested"]["a"], serde_json::json!(1));
    }

    #[test]
    fn test_decode_errors() {
        let missing = decode::<Verdict>("no json here", DecodeTarget::Record);
        assert!(matches!(missing, Err(LLMError::ParseError { .. })));

        let wrong_shape = decode::<Verdict>("{\"score\": 1}", DecodeTarget::Record);
        assert!(matches!(wrong_shape, Err(LLMError::ParseError { .. })));

        let reversed = decode::<Verdict>("} then {", DecodeTarget::Mapping);
        assert!(reversed.is_err());
    }
}
