//! Published editorial content: case highlights, news updates and educational resources.
//!
//! The three kinds share one lifecycle and one service; each kind supplies its own
//! draft, patch and filter types through [`ContentEntry`].

pub mod cases;
pub mod entry;
pub mod news;
pub mod publication;
pub mod repository;
pub mod resources;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use cases::{CaseDraft, CaseFilters, CaseHighlight, CasePatch};
pub use entry::{ContentEntry, ContentId};
pub use news::{NewsDraft, NewsFilters, NewsPatch, NewsUpdate};
pub use publication::{ContentStatus, Publication, StatusChange};
pub use repository::ContentRepository;
pub use resources::{EducationalResource, ResourceDraft, ResourceFilters, ResourcePatch, ResourceType};
pub use router::{content_admin_router, content_public_router};
pub use service::{ContentService, ContentServiceError, PublicEntry};

pub type CaseService = ContentService<CaseHighlight>;
pub type NewsService = ContentService<NewsUpdate>;
pub type ResourceService = ContentService<EducationalResource>;
