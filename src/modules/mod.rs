pub mod chat {
    pub mod schema;
    pub mod model;
    pub mod conversation;
    pub mod repository;
    pub mod repository_pg;
    #[cfg(test)]
    pub mod repository_memory;
    pub mod handle;
    pub mod service;
    pub mod route;
}
