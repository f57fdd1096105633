//! HTTP request handlers.

pub mod contact;

pub use contact::relay_submission;
