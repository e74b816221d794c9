//! Assistant HTTP surface: dto / handlers / routes.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AssistantAppState;
pub use routes::assistant_routes;
