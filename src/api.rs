use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// `{"error": {"message": "..."}}`, the shape used for 4xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorMessage,
}

impl ErrorResponse {
    pub fn new(msg: &str) -> Self {
        ErrorResponse {
            error: ErrorMessage {
                message: msg.to_owned(),
                detail: None,
            },
        }
    }
}

/// The auth layer answers with a bare string under `error`.
#[derive(Debug, Serialize)]
pub struct UnauthorizedResponse {
    pub error: String,
}

impl UnauthorizedResponse {
    pub fn new(msg: &str) -> Self {
        UnauthorizedResponse { error: msg.to_owned() }
    }
}

#[derive(Debug, Serialize)]
pub struct FaultResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorMessage,
}

impl FaultResponse {
    pub fn concealed(msg: &str) -> Self {
        FaultResponse {
            message: None,
            error: ErrorMessage {
                message: msg.to_owned(),
                detail: None,
            },
        }
    }

    pub fn detailed(msg: &str, detail: &str) -> Self {
        FaultResponse {
            message: Some(detail.to_owned()),
            error: ErrorMessage {
                message: msg.to_owned(),
                detail: Some(detail.to_owned()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn new(msg: &str) -> Self {
        HealthResponse { status: msg.to_owned() }
    }
}
