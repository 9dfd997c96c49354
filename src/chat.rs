//! Append-only chat transcript for the teaching-assistant page.
//!
//! Every appended message is also published on a broadcast channel so live
//! WebSocket clients see user and assistant entries in transcript order.

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::{Message, Sender};
use crate::util::trunc_for_log;

const FEED_CAPACITY: usize = 64;

#[derive(Debug)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
    feed: broadcast::Sender<Message>,
}

impl Transcript {
    pub fn new(greeting: &str) -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        let mut t = Self { messages: Vec::new(), next_id: 1, feed };
        t.append(greeting.to_string(), Sender::Ai);
        t
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.feed.subscribe()
    }

    /// Append a user message. Whitespace-only text is rejected with `None`.
    pub fn send(&mut self, text: &str) -> Option<Message> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.append(text.to_string(), Sender::User))
    }

    pub fn append(&mut self, text: String, sender: Sender) -> Message {
        let msg = Message { id: self.next_id, text, sender, timestamp: Utc::now() };
        self.next_id += 1;
        debug!(target: "chat", id = msg.id, ?sender, text = %trunc_for_log(&msg.text, 40), "Message appended");
        self.messages.push(msg.clone());
        // No subscribers is fine.
        let _ = self.feed.send(msg.clone());
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_greeting() {
        let t = Transcript::new("Hi there");
        assert_eq!(t.messages().len(), 1);
        assert_eq!(t.messages()[0].sender, Sender::Ai);
        assert_eq!(t.messages()[0].text, "Hi there");
    }

    #[test]
    fn test_whitespace_only_is_noop() {
        let mut t = Transcript::new("Hi");
        assert!(t.send("").is_none());
        assert!(t.send("   \n\t").is_none());
        assert_eq!(t.messages().len(), 1);
    }

    #[test]
    fn test_send_keeps_text_verbatim_and_ids_increase() {
        let mut t = Transcript::new("Hi");
        let m = t.send("  what is a derivative? ").unwrap();
        assert_eq!(m.text, "  what is a derivative? ");
        assert_eq!(m.sender, Sender::User);
        let r = t.append("reply".into(), Sender::Ai);
        assert!(r.id > m.id);
        assert_eq!(t.messages().len(), 3);
    }

    #[tokio::test]
    async fn test_subscribers_see_appends() {
        let mut t = Transcript::new("Hi");
        let mut rx = t.subscribe();
        t.send("hello").unwrap();
        let got = rx.recv().await.unwrap();
        assert_eq!(got.text, "hello");
    }
}
