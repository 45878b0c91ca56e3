//! The Quill server crate

/// The API routes
pub mod api_routes;
