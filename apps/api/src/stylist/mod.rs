//! AI stylist chat: scripted replies chosen from admin-editable rules,
//! delivered after an artificial delay.

pub mod classifier;
pub mod handlers;
pub mod random;
pub mod responder;
pub mod rules;
pub mod session;

pub use responder::{ScriptedStylist, Stylist};
