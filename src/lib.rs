//! Library crate for preview-quiz-back, exposing modules for binaries and integration tests.

pub mod catalog;
pub mod config;
mod dto;
mod error;
pub mod routes;
pub mod services;
pub mod state;
