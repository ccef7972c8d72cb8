// ABOUTME: Decoding of raw input bytes into an InputDocument.
// ABOUTME: Structural problems become typed AuditError values instead of silent defaults.

use crate::error::AuditError;
use crate::models::InputDocument;

/// Parses a JSON input document.
///
/// # Returns
/// * `Ok(InputDocument)` - channel and items decoded
/// * `Err(AuditError::Parse)` - the bytes are not JSON
/// * `Err(AuditError::Invalid)` - a required key such as `channel` or `statistics` is missing
pub fn parse_input_bytes(data: &[u8]) -> Result<InputDocument, AuditError> {
    let doc: InputDocument = serde_json::from_slice(data)?;
    tracing::debug!(
        channel = %doc.channel.title,
        items = doc.videos.len(),
        "decoded input document"
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_statistics_is_invalid() {
        let json = r#"{"channel":{"title":"C"},"videos":[{"id":"a","title":"t"}]}"#;
        let err = parse_input_bytes(json.as_bytes()).unwrap_err();
        assert!(matches!(err, AuditError::Invalid(ref m) if m.contains("statistics")));
    }

    #[test]
    fn missing_channel_is_invalid() {
        let err = parse_input_bytes(br#"{"videos":[]}"#).unwrap_err();
        assert!(matches!(err, AuditError::Invalid(ref m) if m.contains("channel")));
    }

    #[test]
    fn garbage_is_parse_error() {
        let err = parse_input_bytes(b"not json").unwrap_err();
        assert!(matches!(err, AuditError::Parse(_)));
    }

    #[test]
    fn items_alias_is_accepted() {
        let json = r#"{"channel":{"title":"C"},"items":[{"id":"a","title":"t","statistics":{"viewCount":3}}],"metadata":{"quotaUsed":4}}"#;
        let doc = parse_input_bytes(json.as_bytes()).unwrap();
        assert_eq!(doc.videos.len(), 1);
        assert_eq!(doc.metadata["quotaUsed"], 4);
    }
}
