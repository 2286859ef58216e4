use serde::{Deserialize, Serialize};

use super::entry::{equals_if_set, search_matches, ContentEntry, ContentId};
use super::publication::{ContentStatus, Publication};
use crate::shared::{ValidationErrors, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Article,
    Video,
    Pdf,
    Infographic,
}

/// Anti-corruption educational material; downloads are counted on every public read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationalResource {
    pub id: ContentId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub category: String,
    pub resource_type: ResourceType,
    pub featured_image: Option<String>,
    pub file_url: Option<String>,
    pub video_url: Option<String>,
    pub download_count: u64,
    #[serde(flatten)]
    pub publication: Publication,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDraft {
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub category: String,
    pub resource_type: ResourceType,
    pub featured_image: Option<String>,
    pub file_url: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub status: ContentStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub resource_type: Option<ResourceType>,
    pub featured_image: Option<String>,
    pub file_url: Option<String>,
    pub video_url: Option<String>,
    pub status: Option<ContentStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceFilters {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<ResourceType>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

struct ResourceFields<'a> {
    title: Option<&'a str>,
    description: Option<&'a str>,
    category: Option<&'a str>,
    featured_image: Option<&'a str>,
    file_url: Option<&'a str>,
    video_url: Option<&'a str>,
}

fn check(fields: ResourceFields<'_>) -> Result<(), ValidationErrors> {
    let mut validator = Validator::new();
    validator.optional_chars_between("title", fields.title, 5, 200);
    validator.optional_chars_between("description", fields.description, 20, 1000);
    if let Some(category) = fields.category {
        validator.min_chars("category", category, 1);
    }
    validator.optional_url("featured_image", fields.featured_image);
    validator.optional_url("file_url", fields.file_url);
    validator.optional_url("video_url", fields.video_url);
    validator.finish()
}

impl ContentEntry for EducationalResource {
    type Draft = ResourceDraft;
    type Patch = ResourcePatch;
    type Filters = ResourceFilters;

    const NOUN: &'static str = "Resource";
    const DEFAULT_LIMIT: u32 = 12;
    const MAX_LIMIT: u32 = 50;

    fn id(&self) -> &ContentId {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn publication(&self) -> &Publication {
        &self.publication
    }

    fn publication_mut(&mut self) -> &mut Publication {
        &mut self.publication
    }

    fn validate_draft(draft: &ResourceDraft) -> Result<(), ValidationErrors> {
        check(ResourceFields {
            title: Some(&draft.title),
            description: Some(&draft.description),
            category: Some(&draft.category),
            featured_image: draft.featured_image.as_deref(),
            file_url: draft.file_url.as_deref(),
            video_url: draft.video_url.as_deref(),
        })
    }

    fn draft_title(draft: &ResourceDraft) -> &str {
        &draft.title
    }

    fn draft_status(draft: &ResourceDraft) -> ContentStatus {
        draft.status
    }

    fn from_draft(
        id: ContentId,
        slug: String,
        draft: ResourceDraft,
        publication: Publication,
    ) -> Self {
        Self {
            id,
            slug,
            title: draft.title.trim().to_string(),
            description: draft.description,
            content: draft.content,
            category: draft.category.trim().to_string(),
            resource_type: draft.resource_type,
            featured_image: draft.featured_image,
            file_url: draft.file_url,
            video_url: draft.video_url,
            download_count: 0,
            publication,
        }
    }

    fn validate_patch(patch: &ResourcePatch) -> Result<(), ValidationErrors> {
        check(ResourceFields {
            title: patch.title.as_deref(),
            description: patch.description.as_deref(),
            category: patch.category.as_deref(),
            featured_image: patch.featured_image.as_deref(),
            file_url: patch.file_url.as_deref(),
            video_url: patch.video_url.as_deref(),
        })
    }

    fn patch_status(patch: &ResourcePatch) -> Option<ContentStatus> {
        patch.status
    }

    fn apply_patch(&mut self, patch: ResourcePatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category.trim().to_string();
        }
        if let Some(resource_type) = patch.resource_type {
            self.resource_type = resource_type;
        }
        if patch.content.is_some() {
            self.content = patch.content;
        }
        if patch.featured_image.is_some() {
            self.featured_image = patch.featured_image;
        }
        if patch.file_url.is_some() {
            self.file_url = patch.file_url;
        }
        if patch.video_url.is_some() {
            self.video_url = patch.video_url;
        }
    }

    fn page(filters: &ResourceFilters) -> (Option<u32>, Option<u32>) {
        (filters.page, filters.limit)
    }

    fn matches(&self, filters: &ResourceFilters) -> bool {
        equals_if_set(filters.category.as_deref(), Some(self.category.as_str()))
            && filters
                .resource_type
                .map_or(true, |kind| kind == self.resource_type)
            && search_matches(
                filters.search.as_deref(),
                &[Some(self.title.as_str()), Some(self.description.as_str())],
            )
    }

    fn is_related(&self, other: &Self) -> bool {
        self.category == other.category
    }

    fn record_public_view(&mut self) {
        self.download_count += 1;
    }

    fn keep_counters(&mut self, stored: &Self) {
        self.download_count = stored.download_count;
    }
}
