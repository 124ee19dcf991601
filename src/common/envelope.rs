// src/common/envelope.rs

use serde::Serialize;

use crate::common::error::{AppError, CODE_OK};

/// What every dispatch entry point returns: either a payload with code 0, or
/// an in-band error code plus message. Failures never leave the envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub error_code: i32,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            error_code: CODE_OK,
            error_message: String::new(),
            data: Some(data),
        }
    }

    pub fn failed(err: &AppError) -> Self {
        Self {
            error_code: err.code(),
            error_message: err.to_string(),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error_code == CODE_OK
    }

    #[cfg(test)]
    pub fn into_result(self) -> Result<T, (i32, String)> {
        match self.data {
            Some(data) if self.error_code == CODE_OK => Ok(data),
            _ => Err((self.error_code, self.error_message)),
        }
    }
}

impl<T> From<Result<T, AppError>> for Envelope<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(data) => Envelope::ok(data),
            Err(err) => Envelope::failed(&err),
        }
    }
}
