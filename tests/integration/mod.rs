//! Integration tests with mock HTTP server

pub mod error_handling;
pub mod gemini_flows;
pub mod mock_server;
pub mod openai_flows;
