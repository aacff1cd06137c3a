pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod layout;
pub mod quiz;

// Re-export commonly used functions from layout
pub use layout::{page, render, titled};
