use actix_web::{delete, get, post, web};

use crate::{
    api::{error, success},
    modules::chat::{
        model::{ClearResponse, Conversation, NewMessage},
        schema::Message,
        service::ChatService,
    },
};

#[post("/messages")]
pub async fn send_message(
    chat_service: web::Data<ChatService>,
    body: web::Json<Option<NewMessage>>,
) -> Result<success::Success<Message>, error::Error> {
    let candidate = body.into_inner();
    let message = chat_service.append(candidate.as_ref()).await?;
    Ok(success::Success::created(Some(message)).message("Message sent successfully"))
}

#[get("/{user_id}/messages")]
pub async fn list_received(
    chat_service: web::Data<ChatService>,
    user_id: web::Path<i32>,
) -> Result<success::Success<Vec<Message>>, error::Error> {
    let messages = chat_service.list_received(user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(messages)).message("Messages retrieved successfully"))
}

#[delete("/{user_id}/messages")]
pub async fn clear_user_messages(
    chat_service: web::Data<ChatService>,
    user_id: web::Path<i32>,
) -> Result<success::Success<ClearResponse>, error::Error> {
    let rows_deleted = chat_service.clear_all_for_user(user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(ClearResponse { rows_deleted }))
        .message("All your messages cleared successfully"))
}

#[get("/{user_a}/{user_b}")]
pub async fn get_conversation(
    chat_service: web::Data<ChatService>,
    path: web::Path<(i32, i32)>,
) -> Result<success::Success<Conversation>, error::Error> {
    let (user_a, user_b) = path.into_inner();
    let conversation = chat_service.get_conversation(user_a, user_b).await?;
    Ok(success::Success::ok(Some(conversation)).message("Conversation retrieved successfully"))
}

#[delete("/{user_a}/{user_b}")]
pub async fn clear_conversation(
    chat_service: web::Data<ChatService>,
    path: web::Path<(i32, i32)>,
) -> Result<success::Success<ClearResponse>, error::Error> {
    let (user_a, user_b) = path.into_inner();
    let rows_deleted = chat_service.clear_conversation(user_a, user_b).await?;
    Ok(success::Success::ok(Some(ClearResponse { rows_deleted }))
        .message("Conversation cleared successfully"))
}
