//! Interpretation of login/signup replies.
//!
//! The backend signals some rejections inside HTTP-200 bodies as bare
//! strings. Everything here turns a raw reply, or a transport error, into an
//! [`AuthOutcome`] exactly once so later code never inspects raw text.

use serde::Deserialize;
use serde_json::Value;

use crate::api::ApiError;
use crate::session::{Role, Session};

/// Body the backend returns for rejected logins.
pub const INVALID_CREDENTIALS_SENTINEL: &str = "Credentials Invalid !!";

/// Substring (case-insensitive) marking a duplicate signup.
pub const ACCOUNT_EXISTS_MARKER: &str = "exists";

/// Detail used when an error carries no usable message.
pub const FALLBACK_DETAIL: &str = "Something went wrong.";

/// Which screen produced the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Signup,
}

/// Whether an outcome was read from a 2xx body or from an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Body,
    Error,
}

/// Decoded result of an authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(Session),
    InvalidCredentials,
    AccountExists,
    Unknown(String),
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthReplyBody {
    jwt_token: String,
    username: String,
    #[serde(default)]
    customer_id: Option<i64>,
    #[serde(default, rename = "shopKeeperId")]
    shopkeeper_id: Option<i64>,
}

fn is_account_exists(text: &str) -> bool {
    text.to_lowercase().contains(ACCOUNT_EXISTS_MARKER)
}

/// Validates a success body and tags it with the client-selected role.
fn decode_session(role: Role, body: &Value) -> AuthOutcome {
    let reply: AuthReplyBody = match serde_json::from_value(body.clone()) {
        Ok(reply) => reply,
        Err(e) => return AuthOutcome::Unknown(format!("unexpected response: {e}")),
    };
    if reply.jwt_token.trim().is_empty() {
        return AuthOutcome::Unknown("unexpected response: empty jwtToken".to_string());
    }

    AuthOutcome::Authenticated(Session {
        token: reply.jwt_token,
        username: reply.username,
        role,
        customer_id: reply.customer_id,
        shopkeeper_id: reply.shopkeeper_id,
    })
}

/// Interprets a 2xx login body.
pub fn interpret_login_reply(role: Role, body: &Value) -> AuthOutcome {
    match body {
        Value::String(text) if text == INVALID_CREDENTIALS_SENTINEL => {
            AuthOutcome::InvalidCredentials
        }
        Value::String(text) => AuthOutcome::Unknown(text.clone()),
        _ => decode_session(role, body),
    }
}

/// Interprets a 2xx signup body.
pub fn interpret_signup_reply(role: Role, body: &Value) -> AuthOutcome {
    match body {
        Value::String(text) if is_account_exists(text) => AuthOutcome::AccountExists,
        Value::String(text) => AuthOutcome::Unknown(text.clone()),
        _ => decode_session(role, body),
    }
}

/// Text of an error response whose body is a bare string.
///
/// Sentinels are only recognised here, never in `message` fields or
/// transport descriptions.
fn string_body(error: &ApiError) -> Option<&str> {
    match error {
        ApiError::Status {
            body: Value::String(text),
            ..
        } => Some(text.as_str()),
        _ => None,
    }
}

/// Interprets a failed login request.
pub fn interpret_login_failure(error: &ApiError) -> AuthOutcome {
    if string_body(error) == Some(INVALID_CREDENTIALS_SENTINEL) {
        AuthOutcome::InvalidCredentials
    } else {
        AuthOutcome::Unknown(error_detail(error))
    }
}

/// Interprets a failed signup request.
pub fn interpret_signup_failure(error: &ApiError) -> AuthOutcome {
    if string_body(error).is_some_and(is_account_exists) {
        AuthOutcome::AccountExists
    } else {
        AuthOutcome::Unknown(error_detail(error))
    }
}

/// Best available human-readable detail for an API error.
///
/// Order of preference: string body, `message` field of an object body,
/// the transport/status description, then [`FALLBACK_DETAIL`].
pub fn error_detail(error: &ApiError) -> String {
    let detail = match error {
        ApiError::Status { body, status } => match body {
            Value::String(text) if !text.trim().is_empty() => text.clone(),
            Value::Null | Value::String(_) => {
                format!("Request failed with status code {status}")
            }
            Value::Object(map) => map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(FALLBACK_DETAIL)
                .to_string(),
            _ => FALLBACK_DETAIL.to_string(),
        },
        ApiError::Transport { message } | ApiError::Decode { message } => message.clone(),
        ApiError::Orders(e) => e.to_string(),
    };

    if detail.trim().is_empty() {
        FALLBACK_DETAIL.to_string()
    } else {
        detail
    }
}

/// Message shown to the user for a non-successful outcome.
///
/// Returns `None` for [`AuthOutcome::Authenticated`].
pub fn notice(action: AuthAction, outcome: &AuthOutcome, source: ReplySource) -> Option<String> {
    let message = match (action, outcome) {
        (_, AuthOutcome::Authenticated(_)) => return None,
        (AuthAction::Login, AuthOutcome::InvalidCredentials) => {
            "Invalid email or password. Please try again.".to_string()
        }
        (AuthAction::Signup, AuthOutcome::AccountExists) => match source {
            ReplySource::Body => "Account already exists. Try logging in instead.".to_string(),
            ReplySource::Error => "Email already registered. Please log in.".to_string(),
        },
        (AuthAction::Login, AuthOutcome::Unknown(detail)) => format!("Login failed: {detail}"),
        (AuthAction::Signup, AuthOutcome::Unknown(detail)) => format!("Signup failed: {detail}"),
        (AuthAction::Login, AuthOutcome::AccountExists) => {
            "Login failed: account already exists.".to_string()
        }
        (AuthAction::Signup, AuthOutcome::InvalidCredentials) => {
            format!("Signup failed: {INVALID_CREDENTIALS_SENTINEL}")
        }
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_sentinel_is_exact() {
        let outcome = interpret_login_reply(Role::Customer, &json!("Credentials Invalid !!"));
        assert_eq!(outcome, AuthOutcome::InvalidCredentials);

        let outcome = interpret_login_reply(Role::Customer, &json!("credentials invalid !!"));
        assert_eq!(
            outcome,
            AuthOutcome::Unknown("credentials invalid !!".to_string())
        );
    }

    #[test]
    fn test_signup_marker_is_case_insensitive() {
        for body in ["User already exists", "EMAIL EXISTS", "exists"] {
            assert_eq!(
                interpret_signup_reply(Role::Seller, &json!(body)),
                AuthOutcome::AccountExists
            );
        }
    }

    #[test]
    fn test_role_comes_from_client_not_body() {
        let body = json!({
            "jwtToken": "t", "username": "sam", "shopKeeperId": 12, "role": "customer"
        });
        match interpret_login_reply(Role::Seller, &body) {
            AuthOutcome::Authenticated(session) => {
                assert_eq!(session.role, Role::Seller);
                assert_eq!(session.shopkeeper_id, Some(12));
                assert_eq!(session.customer_id, None);
            }
            other => panic!("expected session, got {other:?}"),
        }
    }

    #[test]
    fn test_null_ids_are_absent() {
        let body = json!({
            "jwtToken": "t", "username": "cora", "customerId": 3, "shopKeeperId": null
        });
        match interpret_signup_reply(Role::Customer, &body) {
            AuthOutcome::Authenticated(session) => {
                assert_eq!(session.customer_id, Some(3));
                assert_eq!(session.shopkeeper_id, None);
            }
            other => panic!("expected session, got {other:?}"),
        }
    }

    #[test]
    fn test_incomplete_body_is_unknown() {
        let outcome = interpret_login_reply(Role::Customer, &json!({"username": "cora"}));
        assert!(matches!(outcome, AuthOutcome::Unknown(ref m) if m.contains("jwtToken")));

        let outcome =
            interpret_login_reply(Role::Customer, &json!({"jwtToken": "", "username": "c"}));
        assert!(matches!(outcome, AuthOutcome::Unknown(_)));

        let outcome = interpret_login_reply(
            Role::Customer,
            &json!({"jwtToken": "t", "username": "c", "customerId": "3"}),
        );
        assert!(matches!(outcome, AuthOutcome::Unknown(_)));
    }

    #[test]
    fn test_failure_detail_extraction() {
        assert_eq!(
            error_detail(&ApiError::status(401, json!("Credentials Invalid !!"))),
            "Credentials Invalid !!"
        );
        assert_eq!(
            error_detail(&ApiError::status(400, json!({"message": "bad email"}))),
            "bad email"
        );
        assert_eq!(
            error_detail(&ApiError::status(400, json!({"error": "x"}))),
            FALLBACK_DETAIL
        );
        assert_eq!(
            error_detail(&ApiError::status(500, Value::Null)),
            "Request failed with status code 500"
        );
        assert_eq!(
            error_detail(&ApiError::transport("connection refused")),
            "connection refused"
        );
        assert_eq!(error_detail(&ApiError::transport("")), FALLBACK_DETAIL);
    }

    #[test]
    fn test_failure_interpretation() {
        let err = ApiError::status(401, json!("Credentials Invalid !!"));
        assert_eq!(interpret_login_failure(&err), AuthOutcome::InvalidCredentials);

        let err = ApiError::status(409, json!("Email already Exists"));
        assert_eq!(interpret_signup_failure(&err), AuthOutcome::AccountExists);

        let err = ApiError::transport("timed out");
        assert_eq!(
            interpret_login_failure(&err),
            AuthOutcome::Unknown("timed out".to_string())
        );
    }

    #[test]
    fn test_sentinels_in_object_bodies_are_plain_details() {
        let err = ApiError::status(401, json!({"message": "Credentials Invalid !!"}));
        let outcome = interpret_login_failure(&err);
        assert_eq!(
            outcome,
            AuthOutcome::Unknown("Credentials Invalid !!".to_string())
        );
        assert_eq!(
            notice(AuthAction::Login, &outcome, ReplySource::Error).unwrap(),
            "Login failed: Credentials Invalid !!"
        );

        let err = ApiError::status(409, json!({"message": "User already exists"}));
        assert_eq!(
            interpret_signup_failure(&err),
            AuthOutcome::Unknown("User already exists".to_string())
        );

        let err = ApiError::transport("exists");
        assert!(matches!(interpret_signup_failure(&err), AuthOutcome::Unknown(_)));
    }

    #[test]
    fn test_notices() {
        assert_eq!(
            notice(AuthAction::Login, &AuthOutcome::InvalidCredentials, ReplySource::Body)
                .unwrap(),
            "Invalid email or password. Please try again."
        );
        assert_eq!(
            notice(AuthAction::Signup, &AuthOutcome::AccountExists, ReplySource::Body).unwrap(),
            "Account already exists. Try logging in instead."
        );
        assert_eq!(
            notice(AuthAction::Signup, &AuthOutcome::AccountExists, ReplySource::Error).unwrap(),
            "Email already registered. Please log in."
        );
        assert_eq!(
            notice(
                AuthAction::Login,
                &AuthOutcome::Unknown("boom".to_string()),
                ReplySource::Error
            )
            .unwrap(),
            "Login failed: boom"
        );
    }
}
