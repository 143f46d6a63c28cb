pub mod chat;
pub mod documents;

pub mod types;

pub use chat::chat_routes;
pub use documents::document_routes;
