//! # QuickBlog Shared
//!
//! Request and response types spoken between the API server and the browser
//! client. Field names follow the JSON the client already sends and reads.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, Empty, ErrorResponse};
