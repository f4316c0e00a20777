//! Direct messages between two users. No lifecycle beyond the read flag; the
//! chat-room key is derived from the participant pair.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock::Clock;
use crate::domain::{chat_room_id, Message, User};
use crate::store::{MessageStore, UserStore};
use crate::workflows::{actor_id, WorkflowError};

static MESSAGE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_message_id() -> String {
    let id = MESSAGE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("msg-{id:06}")
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub receiver_email: String,
    pub content: String,
}

/// Message enriched with participant display data.
#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub id: String,
    pub chat_room_id: String,
    pub sender_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_email: Option<String>,
    pub receiver_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_email: Option<String>,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnreadCount {
    pub count: usize,
}

pub struct MessageWorkflow<M, U> {
    messages: Arc<M>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<M, U> MessageWorkflow<M, U>
where
    M: MessageStore + 'static,
    U: UserStore + 'static,
{
    pub fn new(messages: Arc<M>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            messages,
            users,
            clock,
        }
    }

    /// Send a message, addressing the receiver by email.
    pub fn send(
        &self,
        request: SendMessageRequest,
        sender_id: &str,
    ) -> Result<MessageView, WorkflowError> {
        if request.content.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "message content must not be empty".to_string(),
            ));
        }

        let sender = self.load_user(sender_id)?;
        let receiver = self
            .users
            .find_by_email(&request.receiver_email)?
            .ok_or(WorkflowError::NotFound("receiver"))?;

        let message = Message {
            id: next_message_id(),
            chat_room_id: chat_room_id(&sender.id, &receiver.id),
            sender_id: sender.id,
            receiver_id: receiver.id,
            content: request.content,
            is_read: false,
            created_at: self.clock.now(),
        };

        let stored = self.messages.save(message)?;
        info!(message_id = %stored.id, chat_room_id = %stored.chat_room_id, "message sent");
        self.view(stored)
    }

    /// The conversation between the acting user and the user behind
    /// `other_email`, oldest first.
    pub fn chat_messages(
        &self,
        current_user_id: &str,
        other_email: &str,
    ) -> Result<Vec<MessageView>, WorkflowError> {
        let current = self.load_user(current_user_id)?;
        let other = self
            .users
            .find_by_email(other_email)?
            .ok_or(WorkflowError::NotFound("user"))?;

        let room = chat_room_id(&current.id, &other.id);
        let messages = self.messages.find_by_chat_room(&room)?;
        self.views(messages)
    }

    /// Flip every unread message in the room that is addressed to the reader.
    pub fn mark_read(&self, chat_room_id: &str, reader_id: &str) -> Result<(), WorkflowError> {
        let unread = self.messages.find_unread(chat_room_id, reader_id)?;
        let count = unread.len();
        for mut message in unread {
            message.is_read = true;
            self.messages.save(message)?;
        }
        info!(chat_room_id = %chat_room_id, count, "messages marked read");
        Ok(())
    }

    pub fn unread_count(&self, user_id: &str) -> Result<UnreadCount, WorkflowError> {
        Ok(UnreadCount {
            count: self.messages.count_unread_by_receiver(user_id)?,
        })
    }

    fn load_user(&self, id: &str) -> Result<User, WorkflowError> {
        self.users.get(id)?.ok_or(WorkflowError::NotFound("user"))
    }

    fn view(&self, message: Message) -> Result<MessageView, WorkflowError> {
        let sender = self.users.get(&message.sender_id)?;
        let receiver = self.users.get(&message.receiver_id)?;

        Ok(MessageView {
            id: message.id,
            chat_room_id: message.chat_room_id,
            sender_id: message.sender_id,
            sender_name: sender.as_ref().map(|user| user.display_name()),
            sender_email: sender.map(|user| user.email),
            receiver_id: message.receiver_id,
            receiver_name: receiver.as_ref().map(|user| user.display_name()),
            receiver_email: receiver.map(|user| user.email),
            content: message.content,
            is_read: message.is_read,
            created_at: message.created_at,
        })
    }

    fn views(&self, messages: Vec<Message>) -> Result<Vec<MessageView>, WorkflowError> {
        let mut views = Vec::with_capacity(messages.len());
        for message in messages {
            views.push(self.view(message)?);
        }
        Ok(views)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatParams {
    pub(crate) with: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MarkReadRequest {
    pub(crate) chat_room_id: String,
}

/// HTTP surface for messaging.
pub fn message_router<M, U>(service: Arc<MessageWorkflow<M, U>>) -> Router
where
    M: MessageStore + 'static,
    U: UserStore + 'static,
{
    Router::new()
        .route("/api/v1/messages", post(send_handler::<M, U>))
        .route("/api/v1/messages/chat", get(chat_handler::<M, U>))
        .route("/api/v1/messages/read", post(mark_read_handler::<M, U>))
        .route(
            "/api/v1/messages/unread-count",
            get(unread_count_handler::<M, U>),
        )
        .with_state(service)
}

async fn send_handler<M, U>(
    State(service): State<Arc<MessageWorkflow<M, U>>>,
    headers: HeaderMap,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, WorkflowError>
where
    M: MessageStore + 'static,
    U: UserStore + 'static,
{
    let sender = actor_id(&headers)?;
    let view = service.send(request, &sender)?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn chat_handler<M, U>(
    State(service): State<Arc<MessageWorkflow<M, U>>>,
    headers: HeaderMap,
    Query(params): Query<ChatParams>,
) -> Result<impl IntoResponse, WorkflowError>
where
    M: MessageStore + 'static,
    U: UserStore + 'static,
{
    let current = actor_id(&headers)?;
    Ok(Json(service.chat_messages(&current, &params.with)?))
}

async fn mark_read_handler<M, U>(
    State(service): State<Arc<MessageWorkflow<M, U>>>,
    headers: HeaderMap,
    Json(request): Json<MarkReadRequest>,
) -> Result<impl IntoResponse, WorkflowError>
where
    M: MessageStore + 'static,
    U: UserStore + 'static,
{
    let reader = actor_id(&headers)?;
    service.mark_read(&request.chat_room_id, &reader)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn unread_count_handler<M, U>(
    State(service): State<Arc<MessageWorkflow<M, U>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, WorkflowError>
where
    M: MessageStore + 'static,
    U: UserStore + 'static,
{
    let user = actor_id(&headers)?;
    Ok(Json(service.unread_count(&user)?))
}
