// Admin editors: JSON CRUD over every table in the config store.

pub mod handlers;
pub mod images;
