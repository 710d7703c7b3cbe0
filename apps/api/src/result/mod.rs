pub mod handlers;
pub mod profiles;
pub mod resolver;
pub mod share;
pub mod templates;
