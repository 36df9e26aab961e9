//! Mock LLM provider for testing
//!
//! Scripted replies and a record of every request, for unit tests only.

#![cfg(test)]

use super::errors::LLMError;
use super::traits::LLMProvider;
use super::types::*;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock LLM provider for testing
#[derive(Clone)]
pub struct MockLLMProvider {
    model: String,
    replies: Arc<Mutex<VecDeque<Result<String, LLMError>>>>,
    call_history: Arc<Mutex<Vec<(Vec<Message>, CompletionOptions)>>>,
    available: bool,
}

impl MockLLMProvider {
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_string(),
            replies: Arc::new(Mutex::new(VecDeque::new())),
            call_history: Arc::new(Mutex::new(Vec::new())),
            available: true,
        }
    }

    /// Provider that answers every call with `reply` until other replies are queued
    pub fn replying(reply: &str) -> Self {
        let mock = Self::new();
        mock.push_reply(reply);
        mock
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Queue a reply; replies are served in order
    pub fn push_reply(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(Ok(reply.to_string()));
    }

    /// Queue an error
    pub fn push_error(&self, error: LLMError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> Vec<(Vec<Message>, CompletionOptions)> {
        self.call_history.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> (Vec<Message>, CompletionOptions) {
        self.calls().pop().expect("no calls recorded")
    }
}

impl Default for MockLLMProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMProvider for MockLLMProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, LLMError> {
        self.call_history.lock().unwrap().push((messages, options));

        let mut replies = self.replies.lock().unwrap();
        // The last queued reply keeps answering once the queue is drained
        let reply = if replies.len() > 1 { replies.pop_front() } else { replies.front().map(clone_reply) };

        match reply {
            Some(Ok(content)) => Ok(CompletionResponse::text(content, self.model.clone())),
            Some(Err(error)) => Err(error),
            None => Ok(CompletionResponse::text("", self.model.clone())),
        }
    }
}

fn clone_reply(reply: &Result<String, LLMError>) -> Result<String, LLMError> {
    match reply {
        Ok(content) => Ok(content.clone()),
        Err(error) => Err(LLMError::provider("mock", error.to_string())),
    }
}
