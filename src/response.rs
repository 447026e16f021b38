//! JSON response bodies shared by handlers and error mapping.

use serde::Serialize;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "student-management-backend";

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub service: &'static str,
}

impl HealthBody {
    pub fn healthy() -> Self {
        HealthBody {
            status: "healthy",
            service: SERVICE_NAME,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

pub fn message_body(message: &'static str) -> MessageBody {
    MessageBody { message }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn error_body(message: impl Into<String>) -> ErrorBody {
    ErrorBody {
        error: message.into(),
    }
}
