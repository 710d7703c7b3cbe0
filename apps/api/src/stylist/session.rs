//! Chat sessions: an append-only message list per session plus at most one
//! pending stylist reply.
//!
//! A reply is delivered after an artificial delay by a spawned task that
//! races `sleep` against a `CancellationToken`. A newer user message or
//! closing the session cancels the pending reply. The per-session
//! `generation` is checked again at delivery, so a reply whose sleep finished
//! just as it was superseded is still discarded instead of landing out of order.
//!
//! Sessions nobody has touched for the idle TTL are dropped (and their
//! pending reply cancelled) whenever a session is opened or written to.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::ProductSummary;
use crate::quiz::axis::AxisTriple;
use crate::stylist::responder::StylistReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductSummary>>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: Sender::User,
            content: content.into(),
            timestamp: Utc::now(),
            products: None,
        }
    }

    pub fn ai(reply: StylistReply) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: Sender::Ai,
            content: reply.content,
            timestamp: Utc::now(),
            products: (!reply.products.is_empty()).then_some(reply.products),
        }
    }

    pub fn greeting(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: Sender::Ai,
            content: content.into(),
            timestamp: Utc::now(),
            products: None,
        }
    }
}

struct ChatSession {
    triple: AxisTriple,
    messages: Vec<ChatMessage>,
    generation: u64,
    pending: Option<CancellationToken>,
    last_activity: Instant,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub triple: AxisTriple,
    pub messages: Vec<ChatMessage>,
    /// True while a reply is pending (and the indicator is enabled).
    pub typing: bool,
}

/// Ticket for the reply that a submitted message is waiting on.
#[derive(Debug, Clone)]
pub struct PendingReply {
    pub session_id: Uuid,
    pub generation: u64,
    pub token: CancellationToken,
    pub user_message: ChatMessage,
}

pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, ChatSession>>,
    idle_ttl: Duration,
}

/// Drops sessions idle for at least `ttl`, cancelling their pending replies.
fn evict_idle(sessions: &mut HashMap<Uuid, ChatSession>, ttl: Duration, now: Instant) -> usize {
    let before = sessions.len();
    sessions.retain(|id, session| {
        let keep = now.saturating_duration_since(session.last_activity) < ttl;
        if !keep {
            if let Some(token) = session.pending.take() {
                token.cancel();
            }
            debug!(session_id = %id, "Idle chat session evicted");
        }
        keep
    });
    before - sessions.len()
}

impl SessionRegistry {
    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_ttl,
        }
    }

    pub async fn open(&self, triple: AxisTriple, greeting: Option<String>) -> Uuid {
        let id = Uuid::new_v4();
        let messages = greeting
            .filter(|g| !g.trim().is_empty())
            .map(ChatMessage::greeting)
            .into_iter()
            .collect();
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        let evicted = evict_idle(&mut sessions, self.idle_ttl, now);
        sessions.insert(
            id,
            ChatSession {
                triple,
                messages,
                generation: 0,
                pending: None,
                last_activity: now,
            },
        );
        info!(session_id = %id, ?triple, evicted, open = sessions.len(), "Chat session opened");
        id
    }

    pub async fn triple(&self, id: Uuid) -> Option<AxisTriple> {
        self.sessions.lock().await.get(&id).map(|s| s.triple)
    }

    /// Polling counts as activity and keeps the session alive.
    pub async fn snapshot(&self, id: Uuid, typing_indicator: bool) -> Option<SessionSnapshot> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id)?;
        session.last_activity = Instant::now();
        Some(SessionSnapshot {
            id,
            triple: session.triple,
            messages: session.messages.clone(),
            typing: typing_indicator && session.pending.is_some(),
        })
    }

    /// Appends the user's message and supersedes any reply still pending.
    /// A session that has already gone idle is treated as closed.
    pub async fn submit(&self, id: Uuid, text: &str) -> Option<PendingReply> {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        evict_idle(&mut sessions, self.idle_ttl, now);
        let session = sessions.get_mut(&id)?;
        session.last_activity = now;

        if let Some(previous) = session.pending.take() {
            previous.cancel();
            debug!(session_id = %id, generation = session.generation, "Superseded pending reply");
        }

        let user_message = ChatMessage::user(text);
        session.messages.push(user_message.clone());
        session.generation += 1;
        let token = CancellationToken::new();
        session.pending = Some(token.clone());

        Some(PendingReply {
            session_id: id,
            generation: session.generation,
            token,
            user_message,
        })
    }

    /// Appends the reply if it is still the one the session is waiting for.
    /// Returns false when the reply is stale or the session is gone.
    pub async fn deliver(&self, id: Uuid, generation: u64, reply: StylistReply) -> bool {
        let mut sessions = self.sessions.lock().await;
        let Some(session) = sessions.get_mut(&id) else {
            return false;
        };
        if session.generation != generation {
            debug!(session_id = %id, generation, current = session.generation, "Discarded stale reply");
            return false;
        }
        session.messages.push(ChatMessage::ai(reply));
        session.pending = None;
        true
    }

    /// Cancels any pending reply and forgets the session.
    pub async fn close(&self, id: Uuid) -> bool {
        let removed = self.sessions.lock().await.remove(&id);
        match removed {
            Some(session) => {
                if let Some(token) = session.pending {
                    token.cancel();
                }
                info!(session_id = %id, "Chat session closed");
                true
            }
            None => false,
        }
    }

    /// Spawns the delayed delivery. The handle resolves to whether the reply
    /// was appended.
    pub fn schedule(
        self: &Arc<Self>,
        pending: &PendingReply,
        delay: Duration,
        reply: StylistReply,
    ) -> JoinHandle<bool> {
        let registry = Arc::clone(self);
        let token = pending.token.clone();
        let id = pending.session_id;
        let generation = pending.generation;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(session_id = %id, generation, "Pending reply cancelled");
                    false
                }
                _ = tokio::time::sleep(delay) => {
                    registry.deliver(id, generation, reply).await
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::axis::{BodyType, ColorSeason, StylePreference};

    fn triple() -> AxisTriple {
        AxisTriple::new(BodyType::Natural, ColorSeason::Summer, StylePreference::Elegant)
    }

    fn registry() -> SessionRegistry {
        SessionRegistry::with_idle_ttl(Duration::from_secs(30 * 60))
    }

    fn reply(text: &str) -> StylistReply {
        StylistReply {
            content: text.to_string(),
            products: vec![],
            category: None,
        }
    }

    #[tokio::test]
    async fn test_open_adds_greeting() {
        let registry = registry();
        let id = registry.open(triple(), Some("hello".to_string())).await;
        let snap = registry.snapshot(id, true).await.unwrap();
        assert_eq!(snap.messages.len(), 1);
        assert_eq!(snap.messages[0].sender, Sender::Ai);
        assert!(!snap.typing);
    }

    #[tokio::test]
    async fn test_blank_greeting_is_skipped() {
        let registry = registry();
        let id = registry.open(triple(), Some("  ".to_string())).await;
        assert!(registry.snapshot(id, true).await.unwrap().messages.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_appears_after_delay() {
        let registry = Arc::new(registry());
        let id = registry.open(triple(), None).await;
        let pending = registry.submit(id, "question").await.unwrap();
        let handle = registry.schedule(&pending, Duration::from_millis(1500), reply("answer"));

        let snap = registry.snapshot(id, true).await.unwrap();
        assert_eq!(snap.messages.len(), 1);
        assert!(snap.typing);

        assert!(handle.await.unwrap());
        let snap = registry.snapshot(id, true).await.unwrap();
        assert_eq!(snap.messages.len(), 2);
        assert_eq!(snap.messages[1].content, "answer");
        assert!(!snap.typing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_message_discards_stale_reply() {
        let registry = Arc::new(registry());
        let id = registry.open(triple(), None).await;

        let first = registry.submit(id, "first").await.unwrap();
        let first_handle = registry.schedule(&first, Duration::from_millis(2000), reply("stale"));

        let second = registry.submit(id, "second").await.unwrap();
        let second_handle = registry.schedule(&second, Duration::from_millis(1500), reply("fresh"));

        assert!(!first_handle.await.unwrap());
        assert!(second_handle.await.unwrap());

        let contents: Vec<String> = registry
            .snapshot(id, true)
            .await
            .unwrap()
            .messages
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["first", "second", "fresh"]);
    }

    #[tokio::test]
    async fn test_deliver_rejects_old_generation_even_without_cancel() {
        let registry = registry();
        let id = registry.open(triple(), None).await;
        let first = registry.submit(id, "a").await.unwrap();
        let _second = registry.submit(id, "b").await.unwrap();
        assert!(!registry.deliver(id, first.generation, reply("late")).await);
        assert!(first.token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_pending_reply() {
        let registry = Arc::new(registry());
        let id = registry.open(triple(), None).await;
        let pending = registry.submit(id, "bye").await.unwrap();
        let handle = registry.schedule(&pending, Duration::from_secs(2), reply("never"));

        assert!(registry.close(id).await);
        assert!(!handle.await.unwrap());
        assert!(registry.snapshot(id, true).await.is_none());
        assert!(!registry.close(id).await);
    }

    #[tokio::test]
    async fn test_typing_flag_respects_setting() {
        let registry = registry();
        let id = registry.open(triple(), None).await;
        registry.submit(id, "q").await.unwrap();
        assert!(!registry.snapshot(id, false).await.unwrap().typing);
        assert!(registry.snapshot(id, true).await.unwrap().typing);
    }

    #[tokio::test]
    async fn test_submit_to_unknown_session() {
        let registry = registry();
        assert!(registry.submit(Uuid::new_v4(), "x").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_is_evicted_on_next_open() {
        let registry = Arc::new(SessionRegistry::with_idle_ttl(Duration::from_secs(60)));
        let idle = registry.open(triple(), None).await;
        let pending = registry.submit(idle, "q").await.unwrap();
        let handle = registry.schedule(&pending, Duration::from_secs(600), reply("late"));

        tokio::time::advance(Duration::from_secs(61)).await;
        let fresh = registry.open(triple(), None).await;

        assert!(registry.snapshot(idle, true).await.is_none());
        assert!(registry.snapshot(fresh, true).await.is_some());
        assert!(pending.token.is_cancelled());
        assert!(!handle.await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_keeps_session_alive() {
        let registry = SessionRegistry::with_idle_ttl(Duration::from_secs(60));
        let id = registry.open(triple(), None).await;

        tokio::time::advance(Duration::from_secs(40)).await;
        assert!(registry.snapshot(id, true).await.is_some());
        tokio::time::advance(Duration::from_secs(40)).await;
        registry.open(triple(), None).await;

        assert!(registry.snapshot(id, true).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_to_idle_session_fails() {
        let registry = SessionRegistry::with_idle_ttl(Duration::from_secs(60));
        let id = registry.open(triple(), None).await;
        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(registry.submit(id, "hello?").await.is_none());
    }

    #[test]
    fn test_ai_message_omits_empty_products() {
        let message = ChatMessage::ai(reply("hi"));
        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("products").is_none());
        assert_eq!(json["sender"], "ai");
    }
}
