//! # solver-handlers
//!
//! Handlers for the doubt-solver chain: [`StartHandler`] greets on /start,
//! [`DoubtHandler`] turns a question (text or photo) into a Gemini answer and
//! replies with a handwritten-page photo.

pub mod doubt_handler;
pub mod start_handler;

pub use doubt_handler::{DoubtHandler, Question};
pub use start_handler::StartHandler;
