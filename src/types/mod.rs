//! Core data types shared by the client and the drivers.

pub mod generate;
pub mod message;

pub use generate::{GenerateRequest, GenerateResponse, UsageInfo};
pub use message::{Message, MessageRole};
