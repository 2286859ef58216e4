use super::domain::{Property, PropertyId};
use super::interest::{ExpressionOfInterest, InterestId};
use crate::shared::RepositoryError;

/// Storage abstraction for property aggregates (images and documents included).
pub trait PropertyRepository: Send + Sync {
    /// Fails with `Conflict` when the slug is taken.
    fn insert(&self, property: Property) -> Result<Property, RepositoryError>;
    /// Replaces the stored aggregate but keeps its `view_count`, which only `record_view` moves.
    fn update(&self, property: Property) -> Result<Property, RepositoryError>;
    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError>;
    fn find_by_slug(&self, slug: &str) -> Result<Option<Property>, RepositoryError>;
    /// Increments `view_count` in place and returns the updated aggregate.
    fn record_view(&self, id: &PropertyId) -> Result<Property, RepositoryError>;
    fn delete(&self, id: &PropertyId) -> Result<Property, RepositoryError>;
    /// Newest first.
    fn all(&self) -> Result<Vec<Property>, RepositoryError>;
}

/// Storage abstraction for expressions of interest.
pub trait InterestRepository: Send + Sync {
    fn insert(&self, interest: ExpressionOfInterest) -> Result<ExpressionOfInterest, RepositoryError>;
    fn update(&self, interest: ExpressionOfInterest) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &InterestId) -> Result<Option<ExpressionOfInterest>, RepositoryError>;
    /// Newest first.
    fn all(&self) -> Result<Vec<ExpressionOfInterest>, RepositoryError>;
    fn count_for(&self, property_id: &PropertyId) -> Result<usize, RepositoryError>;
    fn delete_for(&self, property_id: &PropertyId) -> Result<usize, RepositoryError>;
}
