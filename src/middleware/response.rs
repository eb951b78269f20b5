use axum::{
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// JSON body with a status code. The payload is written as-is, with no envelope.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: None,
        }
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            status_code: Some(status_code),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        match serde_json::to_value(&self.data) {
            Ok(value) => (status, Json(value)).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to serialize response data").into_response()
            }
        }
    }
}

/// Plain-text message response, optionally carrying a `Set-Cookie` header
#[derive(Debug)]
pub struct TextResponse {
    pub status_code: StatusCode,
    pub message: String,
    pub set_cookie: Option<String>,
}

impl TextResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self::with_status(message, StatusCode::OK)
    }

    pub fn created(message: impl Into<String>) -> Self {
        Self::with_status(message, StatusCode::CREATED)
    }

    pub fn with_status(message: impl Into<String>, status_code: StatusCode) -> Self {
        Self {
            status_code,
            message: message.into(),
            set_cookie: None,
        }
    }

    pub fn with_cookie(mut self, cookie: String) -> Self {
        self.set_cookie = Some(cookie);
        self
    }
}

impl IntoResponse for TextResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status_code, self.message).into_response();
        if let Some(cookie) = self.set_cookie {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().insert(SET_COOKIE, value);
                }
                Err(e) => {
                    tracing::error!("Invalid Set-Cookie value: {}", e);
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            }
        }
        response
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
pub type TextResult = Result<TextResponse, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_response_sets_cookie_header() {
        let response = TextResponse::ok("hi").with_cookie("sessionid=x; Path=/".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(SET_COOKIE).unwrap(), "sessionid=x; Path=/");
    }

    #[test]
    fn api_response_uses_given_status() {
        let response = ApiResponse::with_status(serde_json::json!({"a": 1}), StatusCode::CREATED).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
