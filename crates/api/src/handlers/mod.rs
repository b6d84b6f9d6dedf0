//! HTTP handlers, one module per resource.

pub mod question;
pub mod response;
pub mod stats;
pub mod survey;
