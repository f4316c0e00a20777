use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deterministic, order-independent chat-room key for a pair of users.
pub fn chat_room_id(user_a: &str, user_b: &str) -> String {
    if user_a < user_b {
        format!("{user_a}_{user_b}")
    } else {
        format!("{user_b}_{user_a}")
    }
}

/// A chat message between two users. Plain CRUD data; the only derived field is
/// the chat-room key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub chat_room_id: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
