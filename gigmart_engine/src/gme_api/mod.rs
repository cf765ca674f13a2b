pub mod auth_api;
pub mod chat_api;
pub mod errors;
pub mod gig_api;
pub mod order_flow_api;
pub mod order_objects;
