//! Content-Type lookup by file extension.
//!
//! The table is fixed at compile time. Types in [`BINARY_TYPES`] are sent
//! base64-encoded; every other type is treated as text.

use std::path::Path;

/// Content-Type used for extensions missing from the table.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// see https://www.iana.org/assignments/media-types/media-types.xhtml
const CONTENT_TYPES: [(&str, &str); 20] = [
    ("html", "text/html"),
    ("md", "text/markdown"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("zip", "application/zip"),
    ("pdf", "application/pdf"),
    ("mp4", "audio/mpeg"),
    ("m4a", "audio/mpeg"),
    ("ico", "image/x-icon"),
    ("woff2", "application/font-woff2; charset=utf-8"),
    ("woff", "application/font-woff; charset=utf-8"),
    ("ttf", "application/font-sfnt"),
    ("otf", "application/font-sfnt"),
];

/// Content types whose bodies are base64-encoded in responses.
pub const BINARY_TYPES: [&str; 10] = [
    "image/png",
    "image/jpeg",
    "image/gif",
    "application/zip",
    "application/pdf",
    "audio/mpeg",
    "image/x-icon",
    "application/font-woff2; charset=utf-8",
    "application/font-woff; charset=utf-8",
    "application/font-sfnt",
];

/// Content-Type for an extension (without the dot), matched case-insensitively.
#[must_use]
pub fn content_type_for_extension(extension: &str) -> &'static str {
    CONTENT_TYPES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map_or(DEFAULT_CONTENT_TYPE, |&(_, content_type)| content_type)
}

/// Content-Type of a file, from the extension of its path.
#[must_use]
pub fn content_type(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(DEFAULT_CONTENT_TYPE, content_type_for_extension)
}

/// Whether responses of `content_type` are sent base64-encoded.
#[must_use]
pub fn is_binary(content_type: &str) -> bool {
    BINARY_TYPES.contains(&content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry() {
        for (extension, expected) in CONTENT_TYPES {
            let file = format!("file.{extension}");
            assert_eq!(content_type(Path::new(&file)), expected, "{file}");
        }
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(
            content_type(Path::new("vendor/bootstrap.min.css.map")),
            DEFAULT_CONTENT_TYPE
        );
        assert_eq!(content_type(Path::new("archive.tar")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type(Path::new("Makefile")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type(Path::new(".bashrc")), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(content_type(Path::new("LOGO.PNG")), "image/png");
        assert_eq!(content_type(Path::new("Index.Html")), "text/html");
    }

    #[test]
    fn test_binary_classification() {
        for extension in ["png", "jpg", "jpeg", "gif", "zip", "pdf", "mp4", "m4a", "ico", "woff2", "woff", "ttf", "otf"] {
            assert!(is_binary(content_type_for_extension(extension)), "{extension}");
        }
        for extension in ["html", "md", "css", "js", "svg", "json", "xml", "map"] {
            assert!(!is_binary(content_type_for_extension(extension)), "{extension}");
        }
    }
}
