//! Extractors whose rejections come back as JSON `AppError`s

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::extract::Path` with a JSON rejection
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// `axum::Json` request body with a JSON rejection
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
