/// Extractors whose rejections render as [`ApiError`]
///
/// axum's own `Json` and `Path` reject with plain-text bodies. These wrappers
/// keep malformed bodies and bad path segments on the same `{ "error": ... }`
/// shape as every other failure.

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON body extractor
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
