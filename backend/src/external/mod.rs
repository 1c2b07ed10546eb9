//! External API integrations

pub mod power;

pub use power::PowerClient;
