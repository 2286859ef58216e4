use std::path::Path;

use mime::Mime;
use serde::Deserialize;

/// Office formats have no named constants in `mime`.
pub const OFFICE_DOCUMENT_TYPES: [&str; 4] = [
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

const DEFAULT_SUB_DIR: &str = "general";

/// Which allow-list applies to an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Image,
    Document,
    #[default]
    Any,
}

/// jpeg, png, gif and webp.
pub fn is_allowed_image(content_type: &Mime) -> bool {
    content_type.type_() == mime::IMAGE
        && (content_type.subtype() == mime::JPEG
            || content_type.subtype() == mime::PNG
            || content_type.subtype() == mime::GIF
            || content_type.subtype().as_str() == "webp")
}

/// pdf plus the Word and Excel formats.
pub fn is_allowed_document(content_type: &Mime) -> bool {
    content_type.essence_str() == mime::APPLICATION_PDF.essence_str()
        || OFFICE_DOCUMENT_TYPES.contains(&content_type.essence_str())
}

impl UploadKind {
    /// Parameters such as `; charset=…` are ignored; unparseable types are refused.
    pub fn allows(self, content_type: &str) -> bool {
        let Ok(parsed) = content_type.trim().to_ascii_lowercase().parse::<Mime>() else {
            return false;
        };
        let is_image = is_allowed_image(&parsed);
        let is_document = is_allowed_document(&parsed);
        match self {
            UploadKind::Image => is_image,
            UploadKind::Document => is_document,
            UploadKind::Any => is_image || is_document,
        }
    }

    fn type_message(self) -> &'static str {
        match self {
            UploadKind::Image => "Invalid image type. Allowed: JPEG, PNG, GIF, WebP",
            UploadKind::Document => "Invalid document type. Allowed: PDF, DOC, DOCX, XLS, XLSX",
            UploadKind::Any => "File type not allowed",
        }
    }

    fn size_message(self, max_bytes: u64) -> String {
        let megabytes = max_bytes as f64 / 1024.0 / 1024.0;
        match self {
            UploadKind::Image => format!("Image size exceeds {megabytes}MB limit"),
            UploadKind::Document => format!("Document size exceeds {megabytes}MB limit"),
            UploadKind::Any => {
                format!("File size exceeds maximum allowed size of {megabytes}MB")
            }
        }
    }

    /// Size is checked before type, so an oversized file always reports its size.
    pub fn check(self, content_type: &str, size: u64, max_bytes: u64) -> Result<(), String> {
        if size > max_bytes {
            return Err(self.size_message(max_bytes));
        }
        if !self.allows(content_type) {
            return Err(self.type_message().to_string());
        }
        Ok(())
    }
}

/// Declared MIME essence, or a guess from the file name when the client sent none,
/// sent `application/octet-stream`, or sent something unparseable.
pub fn resolve_content_type(declared: Option<&str>, file_name: &str) -> String {
    let declared = declared
        .and_then(|value| value.trim().to_ascii_lowercase().parse::<Mime>().ok())
        .filter(|parsed| parsed.essence_str() != mime::APPLICATION_OCTET_STREAM.essence_str());
    match declared {
        Some(parsed) => parsed.essence_str().to_string(),
        None => mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}

/// Anything outside `[a-zA-Z0-9.-]` becomes `_`; `_` runs collapse; lowercased.
pub fn sanitize_file_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    for ch in name.chars() {
        let mapped = if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' {
            ch.to_ascii_lowercase()
        } else {
            '_'
        };
        if mapped == '_' && sanitized.ends_with('_') {
            continue;
        }
        sanitized.push(mapped);
    }
    sanitized
}

/// One safe path segment; dot-only names fall back to `general`.
pub fn sanitize_sub_dir(dir: Option<&str>) -> String {
    let sanitized = dir.map(sanitize_file_name).unwrap_or_default();
    let trimmed = sanitized.trim_matches(|ch| ch == '.' || ch == '_');
    if trimmed.is_empty() {
        DEFAULT_SUB_DIR.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `<uuid><.ext>` where the extension comes from the sanitized original name.
pub fn stored_name(original: &str) -> String {
    let sanitized = sanitize_file_name(original);
    let extension = Path::new(&sanitized)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    format!("{}{extension}", uuid::Uuid::new_v4())
}
