use dioxus::prelude::ServerFnError;
use shared_types::AppError;

use crate::gateway::GatewayError;

/// Convert a GatewayError into an AppError.
///
/// Backend rejections keep the backend's message so mutation failures can
/// show it verbatim.
pub fn gateway_to_app_error(err: GatewayError) -> AppError {
    match err {
        GatewayError::Rejected { status, message } => match status {
            400 => AppError::bad_request(message),
            401 => AppError::unauthorized(message),
            403 => AppError::forbidden(message),
            404 => AppError::not_found(message),
            409 => AppError::conflict(message),
            422 => AppError::validation(message, Default::default()),
            _ => AppError::gateway(message),
        },
        GatewayError::Transport(msg) => {
            tracing::error!(error = %msg, "backend transport failure");
            AppError::gateway("The student union service is unreachable. Please try again.")
        }
        GatewayError::Decode(msg) => {
            tracing::error!(error = %msg, "backend returned an unexpected payload");
            AppError::internal("Unexpected response from the student union service")
        }
        GatewayError::NotConfigured => AppError::internal("Backend is not configured"),
    }
}

/// Convert an AppError into a ServerFnError by serializing as JSON.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_app_error()` on GatewayError.
pub trait GatewayErrorExt {
    fn into_app_error(self) -> AppError;
}

impl GatewayErrorExt for GatewayError {
    fn into_app_error(self) -> AppError {
        gateway_to_app_error(self)
    }
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
