//! Media uploads written to local disk under the configured upload directory.

pub mod policy;
pub mod router;
pub mod storage;

pub use policy::{sanitize_file_name, sanitize_sub_dir, UploadKind};
pub use router::upload_router;
pub use storage::{StoredFile, UploadError, UploadStore};
