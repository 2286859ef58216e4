//! Recovered-asset listings, their media, and expressions of interest from bidders.

pub mod domain;
pub mod interest;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    DocumentDraft, ImageDraft, Property, PropertyDetail, PropertyDocument, PropertyDraft,
    PropertyFilters, PropertyId, PropertyImage, PropertyPatch, PropertyStatus, PropertyType,
};
pub use interest::{
    ExpressionOfInterest, InterestFilters, InterestId, InterestReceipt, InterestStatus,
    InterestStatusUpdate, InterestSubmission, InterestView,
};
pub use repository::{InterestRepository, PropertyRepository};
pub use router::{property_admin_router, property_public_router};
pub use service::{PropertyService, PropertyServiceError};
