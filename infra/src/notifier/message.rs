//! Text of the message carrying a code

/// Render the body sent to the user
///
/// Validity is stated in whole minutes when it divides evenly, in seconds
/// otherwise.
pub fn render_code_message(code: &str, validity_seconds: u64) -> String {
    let expiry = if validity_seconds >= 60 && validity_seconds % 60 == 0 {
        let minutes = validity_seconds / 60;
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    } else {
        format!(
            "{} second{}",
            validity_seconds,
            if validity_seconds == 1 { "" } else { "s" }
        )
    };
    format!(
        "Your verification code is: {}. This code will expire in {}.",
        code, expiry
    )
}
