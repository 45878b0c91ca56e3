#[macro_use]
extern crate lazy_static;

pub mod cache;
pub mod claims;
pub mod settings;
pub mod utils;

use actix_web::http::StatusCode;
use thiserror::Error;

/// An error the API hands back to the client: a snake_case message plus the
/// status class it belongs to (not found / validation / authorization).
#[derive(Debug, Error)]
#[error("{{\"error\":\"{message}\"}}")]
pub struct APIError {
  pub message: String,
  pub status_code: StatusCode,
}

impl APIError {
  pub fn not_found(msg: &str) -> Self {
    APIError::new(msg, StatusCode::NOT_FOUND)
  }

  pub fn validation(msg: &str) -> Self {
    APIError::new(msg, StatusCode::BAD_REQUEST)
  }

  pub fn forbidden(msg: &str) -> Self {
    APIError::new(msg, StatusCode::FORBIDDEN)
  }

  pub fn not_logged_in() -> Self {
    APIError::new("not_logged_in", StatusCode::UNAUTHORIZED)
  }

  fn new(msg: &str, status_code: StatusCode) -> Self {
    APIError {
      message: msg.to_string(),
      status_code,
    }
  }
}

#[derive(Debug)]
pub struct QuillError {
  pub inner: anyhow::Error,
  pub status_code: Option<StatusCode>,
}

impl std::fmt::Display for QuillError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    self.inner.fmt(f)
  }
}

impl From<anyhow::Error> for QuillError {
  fn from(e: anyhow::Error) -> Self {
    QuillError {
      inner: e,
      status_code: None,
    }
  }
}

impl From<APIError> for QuillError {
  fn from(e: APIError) -> Self {
    let status_code = Some(e.status_code);
    QuillError {
      inner: e.into(),
      status_code,
    }
  }
}

impl From<diesel::result::Error> for QuillError {
  fn from(e: diesel::result::Error) -> Self {
    let status_code = match e {
      diesel::result::Error::NotFound => Some(StatusCode::NOT_FOUND),
      _ => None,
    };
    QuillError {
      inner: e.into(),
      status_code,
    }
  }
}

impl From<r2d2::Error> for QuillError {
  fn from(e: r2d2::Error) -> Self {
    QuillError {
      inner: e.into(),
      status_code: None,
    }
  }
}

impl From<actix_web::error::BlockingError> for QuillError {
  fn from(e: actix_web::error::BlockingError) -> Self {
    QuillError {
      inner: e.into(),
      status_code: None,
    }
  }
}

impl From<jsonwebtoken::errors::Error> for QuillError {
  fn from(e: jsonwebtoken::errors::Error) -> Self {
    QuillError {
      inner: e.into(),
      status_code: None,
    }
  }
}

impl From<serde_json::Error> for QuillError {
  fn from(e: serde_json::Error) -> Self {
    QuillError {
      inner: e.into(),
      status_code: None,
    }
  }
}

impl From<std::io::Error> for QuillError {
  fn from(e: std::io::Error) -> Self {
    QuillError {
      inner: e.into(),
      status_code: None,
    }
  }
}

impl actix_web::error::ResponseError for QuillError {
  fn status_code(&self) -> StatusCode {
    self
      .status_code
      .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
  }
}

#[cfg(test)]
mod tests {
  use crate::{APIError, QuillError};
  use actix_web::http::StatusCode;

  #[test]
  fn test_api_error_statuses() {
    let err: QuillError = APIError::not_found("couldnt_find_post").into();
    assert_eq!(err.status_code, Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "{\"error\":\"couldnt_find_post\"}");

    let err: QuillError = APIError::validation("post_text_required").into();
    assert_eq!(err.status_code, Some(StatusCode::BAD_REQUEST));

    let err: QuillError = APIError::forbidden("no_post_edit_allowed").into();
    assert_eq!(err.status_code, Some(StatusCode::FORBIDDEN));

    let err: QuillError = APIError::not_logged_in().into();
    assert_eq!(err.status_code, Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.to_string(), "{\"error\":\"not_logged_in\"}");
  }

  #[test]
  fn test_diesel_not_found_maps_to_404() {
    let err: QuillError = diesel::result::Error::NotFound.into();
    assert_eq!(err.status_code, Some(StatusCode::NOT_FOUND));
  }
}
