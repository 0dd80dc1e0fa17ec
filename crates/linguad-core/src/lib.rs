//! Linguad Core
//!
//! Shared types for the linguad language identification service.
//!
//! This crate provides:
//! - Error types and result handling
//! - The label/score wire types exchanged between the inference engine
//!   and the language detector

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::LabelScore;
