//! Resume critique: extract a CV's text, have a language model critique it,
//! and parse that free-text critique into a scored, structured record.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod critique;
pub mod errors;
pub mod extract;
pub mod llm_client;
pub mod text;
