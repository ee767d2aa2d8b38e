//! Authentication domain: navigation targets and reply interpretation.

mod outcome;
mod route;

pub use outcome::{
    ACCOUNT_EXISTS_MARKER, AuthAction, AuthOutcome, FALLBACK_DETAIL,
    INVALID_CREDENTIALS_SENTINEL, ReplySource, error_detail, interpret_login_failure,
    interpret_login_reply, interpret_signup_failure, interpret_signup_reply, notice,
};
pub use route::Route;
