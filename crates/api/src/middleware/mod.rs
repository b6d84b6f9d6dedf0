//! Request extractors shared by handlers.
//!
//! - [`client_info::ClientInfo`] -- Respondent IP address and user agent.

pub mod client_info;
