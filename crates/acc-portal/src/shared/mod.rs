//! Building blocks shared by every portal module.

pub mod http;
pub mod identifiers;
pub mod pagination;
pub mod store;
pub mod validation;

pub use http::{ApiError, ApiResponse};
pub use identifiers::{
    calculate_percentage, generate_reference_number, generate_slug, slugify, truncate,
    SIERRA_LEONE_REGIONS,
};
pub use pagination::{PageMeta, PageRequest, Paginated};
pub use store::RepositoryError;
pub use validation::{FieldError, ValidationErrors, Validator};
