//! HTTP middleware
//!
//! - `security`: browser hardening response headers

pub mod security;
