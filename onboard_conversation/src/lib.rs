#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Onboarding chat sessions.
//!
//! A session pairs the current document with a caller-owned [`Transcript`].
//! Nothing is persisted: the transcript lives as long as the caller keeps it.
//!
//! # Key Features
//! - Append-only transcript of client and agent turns
//! - Document replacement with fresh extraction on every load
//! - Local or remote replies through `ResponseDispatcher`
//! - Draft rendering from the current document

mod manager;
mod transcript;

pub use manager::{ConversationError, OnboardingManager, SessionCommand, TurnResult};
pub use transcript::{ChatTurn, Speaker, Transcript};
