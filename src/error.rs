use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // handler-level rejections answer with a plain message; everything
        // else goes through the generic failure envelope
        match self.code {
            100 => rejection(StatusCode::NOT_FOUND, &self.message),
            101 => rejection(StatusCode::BAD_REQUEST, &self.message),
            3 | 4 => failure(StatusCode::BAD_GATEWAY, "upstream service error"),
            _ => failure(StatusCode::INTERNAL_SERVER_ERROR, "something went wrong"),
        }
    }
}

fn rejection(status: StatusCode, message: &str) -> Response {
    let body = Json(json!({ "message": message }));

    (status, body).into_response()
}

fn failure(status: StatusCode, error_message: &str) -> Response {
    let body = Json(json!({
        "success": false,
        "status": status.as_u16(),
        "error": error_message,
    }));

    (status, body).into_response()
}

pub fn not_found_error(entity: &str) -> Error {
    Error {
        code: 100,
        message: format!("{} not found", entity),
    }
}

pub fn bad_request_error(message: &str) -> Error {
    Error {
        code: 101,
        message: message.into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn database_error<T: Debug>(_: T) -> Error {
    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn config_error(message: &str) -> Error {
    Error {
        code: 5,
        message: message.into(),
    }
}
