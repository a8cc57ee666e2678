//! Wire types for the external backend.
//!
//! The backend itself is out of scope: everything goes through the
//! [`Transport`] seam, which the host implements with whatever HTTP stack
//! it has. This module owns the request/response shapes and how failures
//! are turned into the fixed messages the chat panel shows.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const INTERACT_PATH: &str = "/api/interact";
pub const CHAT_PATH: &str = "/api/chat";
pub const DECK_PATH: &str = "/api/generate_ppt";

pub const CHAT_NETWORK_ERROR: &str = "❌ Network Error";
pub const CHAT_CONNECTION_LOST: &str = "❌ Connection Lost";
pub const DECK_GENERATION_FAILED: &str = "❌ Generation failed.";
pub const DECK_SYSTEM_ERROR: &str = "❌ System Error";
pub const DEFAULT_GAMMA_LINK: &str = "https://gamma.app/new?mode=text";
pub const DEFAULT_DECK_MARKDOWN: &str = "# Error";

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Raw HTTP-ish reply: status code plus decoded JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// POSTs JSON to the backend.
pub trait Transport {
    fn post_json(&mut self, path: &str, body: &Value) -> Result<Reply, TransportError>;
}

/// Chat request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub role: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Deck generation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRequest {
    pub topic: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckResponse {
    pub status: String,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub gamma_link: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A generated slide ready to paste into Gamma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckDraft {
    pub markdown: String,
    pub gamma_link: String,
}

/// Send a chat message. Always produces the text to show.
pub fn send_chat<T: Transport + ?Sized>(transport: &mut T, request: &ChatRequest) -> String {
    let result = serde_json::to_value(request)
        .map_err(TransportError::from)
        .and_then(|body| transport.post_json(CHAT_PATH, &body));
    chat_reply_text(result)
}

/// Map a chat round-trip to panel text.
///
/// An undecodable success body counts as a network failure, the same as
/// an unreachable backend.
pub fn chat_reply_text(result: Result<Reply, TransportError>) -> String {
    match result {
        Ok(reply) if reply.is_success() => {
            match serde_json::from_value::<ChatResponse>(reply.body) {
                Ok(chat) => chat.reply,
                Err(e) => {
                    log::warn!("Chat reply malformed: {}", e);
                    CHAT_NETWORK_ERROR.to_string()
                }
            }
        }
        Ok(reply) => {
            log::warn!("Chat request rejected with status {}", reply.status);
            CHAT_CONNECTION_LOST.to_string()
        }
        Err(e) => {
            log::warn!("Chat request failed: {}", e);
            CHAT_NETWORK_ERROR.to_string()
        }
    }
}

/// Request a slide draft. `Err` carries the text to show instead.
pub fn request_deck<T: Transport + ?Sized>(
    transport: &mut T,
    request: &DeckRequest,
) -> Result<DeckDraft, &'static str> {
    let result = serde_json::to_value(request)
        .map_err(TransportError::from)
        .and_then(|body| transport.post_json(DECK_PATH, &body));
    deck_outcome(result)
}

/// Map a deck round-trip to a draft or panel text.
pub fn deck_outcome(result: Result<Reply, TransportError>) -> Result<DeckDraft, &'static str> {
    let reply = match result {
        Ok(reply) => reply,
        Err(e) => {
            log::warn!("Deck request failed: {}", e);
            return Err(DECK_SYSTEM_ERROR);
        }
    };
    if !reply.is_success() {
        log::warn!("Deck request rejected with status {}", reply.status);
        return Err(DECK_GENERATION_FAILED);
    }
    let deck: DeckResponse = match serde_json::from_value(reply.body) {
        Ok(deck) => deck,
        Err(e) => {
            log::warn!("Deck reply malformed: {}", e);
            return Err(DECK_SYSTEM_ERROR);
        }
    };
    if deck.status != "success" {
        log::warn!("Deck generation reported {}: {:?}", deck.status, deck.message);
        return Err(DECK_GENERATION_FAILED);
    }
    Ok(DeckDraft {
        markdown: deck
            .markdown
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_DECK_MARKDOWN.to_string()),
        gamma_link: deck
            .gamma_link
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_GAMMA_LINK.to_string()),
    })
}

/// Errors that can occur talking to the backend
#[derive(Debug)]
pub enum TransportError {
    /// Could not reach the backend at all.
    Connection(String),
    Json(serde_json::Error),
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        TransportError::Json(e)
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Connection(msg) => write!(f, "Connection error: {}", msg),
            TransportError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for TransportError {}
