//! Domain logic for the canvass survey service.
//!
//! Holds the shared types, question type tags, input validation and the
//! statistics aggregation engine. This crate has no database dependency;
//! storage is reached through the [`statistics::StatsStore`] trait.

pub mod error;
pub mod question_type;
pub mod statistics;
pub mod survey;
pub mod types;
