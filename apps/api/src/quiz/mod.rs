// Quiz: the closed axes, the step-by-step answer and the question table.

pub mod axis;
pub mod flow;
pub mod handlers;
pub mod questions;
