//! Wire types for the Gemini `generateContent` call

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Role in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User/human input
    User,
    /// Model/AI response
    Model,
}

/// Content part types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    /// Text content part
    Text {
        /// Text content as a string
        text: String,
    },
    /// Any non-text part (thoughts, function calls, inline data), kept raw
    Other(serde_json::Value),
}

/// Content in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    /// Role of the content creator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Parts that make up the content
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create user content with text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some(Role::User),
            parts: vec![Part::Text { text: text.into() }],
        }
    }
}

/// Main request structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Input content for generation
    pub contents: Vec<Content>,

    /// System instruction for the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one user prompt
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(text)],
            ..Default::default()
        }
    }
}

/// Response structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated response candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// Feedback about the prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,

    /// Token usage information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, with all of its text parts joined in order.
    ///
    /// Fails when the prompt was blocked, no candidate came back, or the
    /// first candidate holds no text at all.
    pub fn text(&self) -> Result<String> {
        let candidate = self.candidates.first().ok_or_else(|| {
            match self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason)
            {
                Some(reason) => {
                    Error::InvalidResponse(format!("prompt was blocked ({:?})", reason))
                }
                None => Error::InvalidResponse("response contained no candidates".to_string()),
            }
        })?;

        let mut texts = candidate
            .content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                Part::Other(_) => None,
            })
            .peekable();

        if texts.peek().is_none() {
            return Err(Error::InvalidResponse(match candidate.finish_reason {
                Some(reason) => format!("candidate has no text (finish reason {:?})", reason),
                None => "candidate has no text".to_string(),
            }));
        }

        Ok(texts.collect())
    }
}

/// A response candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content; absent when the candidate was filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Reason for finishing generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

/// Reasons for finishing content generation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Natural stopping point
    Stop,
    /// Reached maximum token limit
    MaxTokens,
    /// Stopped due to safety concerns
    Safety,
    /// Stopped due to recitation concerns
    Recitation,
    /// Other reason
    Other,
    /// Unspecified or not known to this client
    #[serde(other)]
    Unspecified,
}

/// Feedback about the prompt before generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Reason for blocking the prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<BlockReason>,
}

/// Reasons why a prompt was blocked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlockReason {
    /// Safety violation
    #[serde(rename = "SAFETY")]
    Safety,
    /// Blocked by a terminology blocklist
    #[serde(rename = "BLOCKLIST")]
    Blocklist,
    /// Prohibited content
    #[serde(rename = "PROHIBITED_CONTENT")]
    ProhibitedContent,
    /// Other or unrecognized reason
    #[serde(rename = "OTHER")]
    #[serde(other)]
    Other,
}

/// Token usage metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageMetadata {
    /// Number of tokens in the prompt
    pub prompt_token_count: i32,
    /// Number of tokens in the candidates
    pub candidates_token_count: i32,
    /// Total number of tokens used
    pub total_token_count: i32,
}
