//! Upload naming conventions.
//!
//! Storage keys are derived from the submission timestamp plus the
//! sanitized original filename. The timestamp prefix is the collision
//! strategy; two same-named uploads in the same millisecond could still
//! collide, which is accepted.

/// Role a file plays in an order submission. Determines upload order:
/// logo first, then media, then other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadRole {
    Logo,
    Media,
    Other,
}

impl UploadRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Media => "media",
            Self::Other => "other",
        }
    }
}

/// Strip a filename down to the `[A-Za-z0-9._-]` allowlist.
///
/// Whitespace runs become a single dash; every other disallowed character
/// is dropped. An empty result falls back to `"file"`.
pub fn sanitize_filename(original: &str) -> String {
    let mut out = String::with_capacity(original.len());
    let mut pending_dash = false;
    for ch in original.trim().chars() {
        if ch.is_whitespace() {
            pending_dash = !out.is_empty();
            continue;
        }
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            if pending_dash {
                out.push('-');
                pending_dash = false;
            }
            out.push(ch);
        }
    }
    if out.is_empty() {
        "file".to_string()
    } else {
        out
    }
}

/// Build the storage key for an uploaded file.
///
/// Convention: `{millis}-{sanitized_filename}`.
pub fn storage_key(submission_millis: i64, original_filename: &str) -> String {
    format!(
        "{submission_millis}-{}",
        sanitize_filename(original_filename)
    )
}
