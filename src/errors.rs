use axum::http::StatusCode;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ViewError> for AppError {
    fn from(err: ViewError) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Chart initialization failures. None of these reach the end user; they are
/// logged and only abort the chart they belong to.
#[derive(Debug, thiserror::Error)]
pub enum PresenterError {
    #[error("no {0} data available")]
    MissingData(&'static str),
    #[error("chart surface not found: {0}")]
    MissingElement(String),
    #[error("malformed {payload} payload: {reason}")]
    MalformedInput { payload: &'static str, reason: String },
}

impl PresenterError {
    pub fn malformed(payload: &'static str, reason: impl ToString) -> Self {
        Self::MalformedInput {
            payload,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("view registry has no controls")]
    EmptyRegistry,
    #[error("view `{0}` is declared more than once")]
    DuplicateView(String),
    #[error("control targets undeclared section `{0}`")]
    UnknownSection(String),
    #[error("section `{0}` does not follow the `<view>-section` naming")]
    InvalidSectionId(String),
}
