//! HTTP request handlers

mod health;
mod relay;

pub use health::*;
pub use relay::*;
