// Events module - typed telemetry payloads and the hook seam providers emit through
pub mod events;
pub mod hooks;

#[cfg(test)]
mod tests;

pub use events::{LlmEvent, RequestDebugInfo, RequestInfo, ResponseDebugInfo, ResponseInfo, TokenCounts};
pub use hooks::{EventHooks, LogHooks, NullHooks, RecordingHooks};

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = if max_chars >= 3 { max_chars - 3 } else { 0 };
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}
