// Transport adapter: auth.* messages in, AuthResult or StructuredFailure out

use crate::{
    auth::{
        error::AuthError,
        models::{AuthResult, LoginUserRequest, RegisterUserRequest},
        service::CredentialService,
    },
    error::StructuredFailure,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;
use validator::{Validate, ValidationErrors};

pub const REGISTER_PATTERN: &str = "auth.register";
pub const LOGIN_PATTERN: &str = "auth.login";

/// Typed inbound command
#[derive(Debug, Clone)]
pub enum AuthCommand {
    Register(RegisterUserRequest),
    Login(LoginUserRequest),
}

impl AuthCommand {
    /// Decode a message by pattern name
    pub fn parse(pattern: &str, payload: &[u8]) -> Result<Self, StructuredFailure> {
        match pattern {
            REGISTER_PATTERN => decode(payload).map(AuthCommand::Register),
            LOGIN_PATTERN => decode(payload).map(AuthCommand::Login),
            other => Err(StructuredFailure::bad_request(format!("Unknown message pattern: {}", other))),
        }
    }

    fn validate(&self) -> Result<(), AuthError> {
        let result = match self {
            AuthCommand::Register(request) => request.validate(),
            AuthCommand::Login(request) => request.validate(),
        };
        result.map_err(|errors| AuthError::Validation(validation_message(&errors)))
    }
}

fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, StructuredFailure> {
    serde_json::from_slice(payload)
        .map_err(|e| StructuredFailure::bad_request(format!("Invalid message payload: {}", e)))
}

/// Flatten field errors into one line, ordered by field name
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate and run a command against the service
pub async fn dispatch(service: &CredentialService, command: AuthCommand) -> Result<AuthResult, StructuredFailure> {
    command.validate()?;

    let result = match command {
        AuthCommand::Register(request) => {
            debug!("Handling {} for {}", REGISTER_PATTERN, request.email);
            service
                .register_user(&request.name, &request.email, &request.password)
                .await
        }
        AuthCommand::Login(request) => {
            debug!("Handling {} for {}", LOGIN_PATTERN, request.email);
            service.login_user(&request.email, &request.password).await
        }
    };

    result.map_err(StructuredFailure::from)
}

/// Deliver a message
/// POST /messages/:pattern
pub async fn message_handler(
    State(service): State<Arc<CredentialService>>,
    Path(pattern): Path<String>,
    body: Bytes,
) -> Result<Json<AuthResult>, StructuredFailure> {
    let command = AuthCommand::parse(&pattern, &body)?;
    dispatch(&service, command).await.map(Json)
}

/// Liveness probe
/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
