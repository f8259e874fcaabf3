use std::sync::Arc;

use crate::modules::chat::{
    model::NewMessage, repository_memory::InMemoryMessageRepository, service::ChatService,
};

impl NewMessage {
    pub fn new(sender_id: i32, receiver_id: i32, text: impl Into<String>) -> Self {
        NewMessage { sender_id, receiver_id, text: Some(text.into()) }
    }
}

pub fn memory_service() -> (ChatService, Arc<InMemoryMessageRepository>) {
    let repo = Arc::new(InMemoryMessageRepository::new());
    (ChatService::with_dependencies(repo.clone()), repo)
}

/// Stores (1 -> 2 "hi"), (2 -> 1 "hello"), (1 -> 3 "unrelated") in that order.
pub async fn seed_scenario(service: &ChatService) {
    for (sender_id, receiver_id, text) in [(1, 2, "hi"), (2, 1, "hello"), (1, 3, "unrelated")] {
        service.append(Some(&NewMessage::new(sender_id, receiver_id, text))).await.unwrap();
    }
}
