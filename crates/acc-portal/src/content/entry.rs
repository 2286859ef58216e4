use serde::de::DeserializeOwned;
use serde::Serialize;

use super::publication::{ContentStatus, Publication};
use crate::shared::identifiers::entity_id;
use crate::shared::ValidationErrors;

entity_id!(
    /// Identifier wrapper shared by cases, news and resources.
    ContentId
);

/// A publishable content kind and the request types that create, edit and filter it.
pub trait ContentEntry: Clone + Serialize + Send + Sync + 'static {
    type Draft: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + Send + 'static;
    type Filters: DeserializeOwned + Default + Send + 'static;

    /// Used in "… not found" messages and logs.
    const NOUN: &'static str;
    const DEFAULT_LIMIT: u32;
    const MAX_LIMIT: u32;

    fn id(&self) -> &ContentId;
    fn slug(&self) -> &str;
    fn set_slug(&mut self, slug: String);
    fn title(&self) -> &str;
    fn publication(&self) -> &Publication;
    fn publication_mut(&mut self) -> &mut Publication;

    fn validate_draft(draft: &Self::Draft) -> Result<(), ValidationErrors>;
    fn draft_title(draft: &Self::Draft) -> &str;
    fn draft_status(draft: &Self::Draft) -> ContentStatus;
    fn from_draft(id: ContentId, slug: String, draft: Self::Draft, publication: Publication) -> Self;

    fn validate_patch(patch: &Self::Patch) -> Result<(), ValidationErrors>;
    fn patch_status(patch: &Self::Patch) -> Option<ContentStatus>;
    /// Copy supplied fields; status is handled by the caller.
    fn apply_patch(&mut self, patch: Self::Patch);

    fn page(filters: &Self::Filters) -> (Option<u32>, Option<u32>);
    fn matches(&self, filters: &Self::Filters) -> bool;

    /// Whether `other` belongs in this entry's "related" list.
    fn is_related(&self, other: &Self) -> bool;

    /// Side effect of a public read, applied by the repository under its lock.
    fn record_public_view(&mut self) {}

    /// Copy counters owned by `record_public_view` from the stored entry before a write.
    fn keep_counters(&mut self, _stored: &Self) {}
}

/// Case-insensitive substring match over optional fields.
pub(crate) fn search_matches(term: Option<&str>, fields: &[Option<&str>]) -> bool {
    match term.map(str::trim).filter(|term| !term.is_empty()) {
        Some(term) => {
            let needle = term.to_lowercase();
            fields
                .iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&needle))
        }
        None => true,
    }
}

/// Exact match when a filter value is supplied.
pub(crate) fn equals_if_set(filter: Option<&str>, value: Option<&str>) -> bool {
    match filter.filter(|wanted| !wanted.is_empty()) {
        Some(wanted) => value == Some(wanted),
        None => true,
    }
}
