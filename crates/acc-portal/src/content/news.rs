use serde::{Deserialize, Serialize};

use super::entry::{equals_if_set, search_matches, ContentEntry, ContentId};
use super::publication::{ContentStatus, Publication};
use crate::shared::{ValidationErrors, Validator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsUpdate {
    pub id: ContentId,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    #[serde(flatten)]
    pub publication: Publication,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsDraft {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    #[serde(default)]
    pub status: ContentStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsPatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub status: Option<ContentStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsFilters {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

fn check(
    title: Option<&str>,
    excerpt: Option<&str>,
    content: Option<&str>,
    featured_image: Option<&str>,
) -> Result<(), ValidationErrors> {
    let mut validator = Validator::new();
    validator.optional_chars_between("title", title, 5, 200);
    validator.optional_max_chars("excerpt", excerpt, 500);
    if let Some(content) = content {
        validator.min_chars("content", content, 100);
    }
    validator.optional_url("featured_image", featured_image);
    validator.finish()
}

impl ContentEntry for NewsUpdate {
    type Draft = NewsDraft;
    type Patch = NewsPatch;
    type Filters = NewsFilters;

    const NOUN: &'static str = "News article";
    const DEFAULT_LIMIT: u32 = 10;
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

    fn validate_draft(draft: &NewsDraft) -> Result<(), ValidationErrors> {
        check(
            Some(&draft.title),
            draft.excerpt.as_deref(),
            Some(&draft.content),
            draft.featured_image.as_deref(),
        )
    }

    fn draft_title(draft: &NewsDraft) -> &str {
        &draft.title
    }

    fn draft_status(draft: &NewsDraft) -> ContentStatus {
        draft.status
    }

    fn from_draft(id: ContentId, slug: String, draft: NewsDraft, publication: Publication) -> Self {
        Self {
            id,
            slug,
            title: draft.title.trim().to_string(),
            excerpt: draft.excerpt,
            content: draft.content,
            category: draft.category,
            tags: draft.tags,
            featured_image: draft.featured_image,
            publication,
        }
    }

    fn validate_patch(patch: &NewsPatch) -> Result<(), ValidationErrors> {
        check(
            patch.title.as_deref(),
            patch.excerpt.as_deref(),
            patch.content.as_deref(),
            patch.featured_image.as_deref(),
        )
    }

    fn patch_status(patch: &NewsPatch) -> Option<ContentStatus> {
        patch.status
    }

    fn apply_patch(&mut self, patch: NewsPatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if patch.excerpt.is_some() {
            self.excerpt = patch.excerpt;
        }
        if patch.category.is_some() {
            self.category = patch.category;
        }
        if patch.featured_image.is_some() {
            self.featured_image = patch.featured_image;
        }
    }

    fn page(filters: &NewsFilters) -> (Option<u32>, Option<u32>) {
        (filters.page, filters.limit)
    }

    fn matches(&self, filters: &NewsFilters) -> bool {
        equals_if_set(filters.category.as_deref(), self.category.as_deref())
            && search_matches(
                filters.search.as_deref(),
                &[Some(self.title.as_str()), self.excerpt.as_deref()],
            )
    }

    /// Same category when this item has one; otherwise any other article.
    fn is_related(&self, other: &Self) -> bool {
        match &self.category {
            Some(category) => other.category.as_ref() == Some(category),
            None => true,
        }
    }
}
