//! User notification port.

/// Blocking user-facing prompts raised by the screens.
///
/// Implementations decide how to surface them (terminal, dialog, test
/// recorder). Both calls return only once the user has seen the message.
pub trait Notifier: Send + Sync {
    /// Shows a message the user must acknowledge.
    fn alert(&self, message: &str);

    /// Asks a yes/no question. `true` means the user confirmed.
    fn confirm(&self, prompt: &str) -> bool;
}
