/// Loose email check used by the signup form: non-empty and contains `@`.
/// Anything stricter is left to the email provider.
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.contains('@')
}

/// Lowercase and trim an email before it is stored.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
