//! Scripted in-process LLM used by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llms::base_llm::{BaseLLM, ChatMessage, LLMError, ResponseFormat};

/// Replays queued responses in order and records every request it receives.
#[derive(Debug, Default)]
pub struct ScriptedLLM {
    responses: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<(Vec<ChatMessage>, ResponseFormat)>>,
}

impl ScriptedLLM {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queue a failure, surfaced as [`LLMError::Api`].
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Err(message.into()));
        self
    }

    pub fn requests(&self) -> Vec<(Vec<ChatMessage>, ResponseFormat)> {
        self.requests.lock().unwrap().clone()
    }

    /// Content of the last message of every request, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|(messages, _)| messages.last().map(|m| m.content.clone()))
            .collect()
    }
}

#[async_trait]
impl BaseLLM for ScriptedLLM {
    fn model(&self) -> &str {
        "scripted"
    }

    fn provider(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        format: ResponseFormat,
    ) -> Result<String, LLMError> {
        self.requests
            .lock()
            .unwrap()
            .push((messages.to_vec(), format));
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(LLMError::Api(message)),
            None => Err(LLMError::Empty("no scripted response left".into())),
        }
    }
}
