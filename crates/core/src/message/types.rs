//! Message types and key derivation.

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Extension assumed for rows stored before extensions were recorded.
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Message domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Row ID, assigned by the database.
    pub id: i64,
    /// Trimmed message text.
    pub message: String,
    /// Generated image identifier.
    pub image_id: String,
    /// Original file extension with its leading dot. `None` for legacy rows.
    pub file_extension: Option<String>,
    /// Insert time.
    pub created_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Object-store key of this message's image.
    ///
    /// A missing extension falls back to [`DEFAULT_EXTENSION`]; an empty one
    /// is kept empty.
    #[must_use]
    pub fn object_key(&self) -> String {
        object_key(
            &self.image_id,
            self.file_extension.as_deref().unwrap_or(DEFAULT_EXTENSION),
        )
    }
}

/// Row to insert for a new message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    /// Trimmed message text.
    pub message: String,
    /// Generated image identifier.
    pub image_id: String,
    /// Derived file extension, possibly empty.
    pub file_extension: String,
    /// Insert time.
    pub created_at: DateTime<Utc>,
}

/// Input for posting a message.
#[derive(Debug, Clone, Default)]
pub struct PostMessageInput {
    /// Raw message text, untrimmed.
    pub message: String,
    /// Original filename of the uploaded image.
    pub filename: Option<String>,
    /// Image bytes. `None` when no file part was sent.
    pub data: Option<Bytes>,
}

/// Result of posting a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    /// New row ID.
    pub id: i64,
    /// Generated image identifier.
    pub image_id: String,
    /// Key the image was written under.
    pub object_key: String,
}

/// A listed message with its resolved image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    /// Row ID.
    pub id: i64,
    /// Message text.
    pub message: String,
    /// Image identifier.
    pub image_id: String,
    /// Public image URL, `None` when it could not be resolved.
    pub image_url: Option<String>,
    /// Insert time.
    pub created_at: Option<DateTime<Utc>>,
}

/// Object-store key for an image.
#[must_use]
pub fn object_key(image_id: &str, extension: &str) -> String {
    format!("{image_id}{extension}")
}

/// Extension of `filename` including the leading dot, or `""`.
///
/// Only the last path component is considered. The extension starts at its
/// last dot, unless everything before that dot is dots too (`.bashrc`).
#[must_use]
pub fn file_extension(filename: Option<&str>) -> String {
    let Some(filename) = filename else {
        return String::new();
    };

    let name = filename.rsplit('/').next().unwrap_or(filename);
    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => name[dot..].to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("photo.png"), ".png")]
    #[case(Some("photo.JPEG"), ".JPEG")]
    #[case(Some("archive.tar.gz"), ".gz")]
    #[case(Some("photo"), "")]
    #[case(Some("photo."), ".")]
    #[case(Some(".bashrc"), "")]
    #[case(Some("..hidden"), "")]
    #[case(Some("..hidden.png"), ".png")]
    #[case(Some("dir.d/photo"), "")]
    #[case(Some("dir/photo.webp"), ".webp")]
    #[case(Some(""), "")]
    #[case(None, "")]
    fn test_file_extension(#[case] filename: Option<&str>, #[case] expected: &str) {
        assert_eq!(file_extension(filename), expected);
    }

    fn message(file_extension: Option<&str>) -> Message {
        Message {
            id: 1,
            message: "hello".to_string(),
            image_id: "abc".to_string(),
            file_extension: file_extension.map(String::from),
            created_at: None,
        }
    }

    #[test]
    fn test_object_key_null_extension_defaults_to_jpg() {
        assert_eq!(message(None).object_key(), "abc.jpg");
    }

    #[test]
    fn test_object_key_empty_extension_stays_empty() {
        assert_eq!(message(Some("")).object_key(), "abc");
    }

    #[test]
    fn test_object_key_keeps_stored_extension() {
        assert_eq!(message(Some(".png")).object_key(), "abc.png");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_extension_is_empty_or_dotted_suffix(filename in ".{0,40}") {
            let ext = file_extension(Some(&filename));
            if !ext.is_empty() {
                prop_assert!(ext.starts_with('.'));
                prop_assert!(filename.ends_with(&ext));
                prop_assert!(!ext[1..].contains('.'));
                prop_assert!(!ext.contains('/'));
            }
        }

        #[test]
        fn prop_simple_names_split_at_last_dot(
            stem in "[a-zA-Z0-9_-]{1,20}",
            ext in "[a-z0-9]{1,5}",
        ) {
            let filename = format!("{stem}.{ext}");
            prop_assert_eq!(file_extension(Some(&filename)), format!(".{ext}"));
        }
    }
}
