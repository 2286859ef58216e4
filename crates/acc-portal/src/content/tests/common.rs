use std::sync::Arc;
use std::thread;
use std::time::Duration;

use axum::Router;

use crate::content::{
    content_admin_router, content_public_router, CaseDraft, CaseService, ContentId,
    ContentRepository, ContentStatus, EducationalResource, NewsDraft, NewsService,
    ResourceDraft, ResourceService, ResourceType,
};
use crate::shared::RepositoryError;
use crate::memory::MemoryContentRepository;
use crate::testing::with_sessions;

pub(super) const LONG_CONTENT: &str = "The Anti-Corruption Commission secured a conviction after a two year investigation \
into the diversion of public funds earmarked for rural health facilities across the province.";

pub(super) fn case_service() -> Arc<CaseService> {
    Arc::new(CaseService::new(Arc::new(MemoryContentRepository::default())))
}

pub(super) fn news_service() -> Arc<NewsService> {
    Arc::new(NewsService::new(Arc::new(MemoryContentRepository::default())))
}

pub(super) fn resource_service() -> Arc<ResourceService> {
    Arc::new(ResourceService::new(Arc::new(MemoryContentRepository::default())))
}

pub(super) fn case_draft(title: &str, sector: &str, status: ContentStatus) -> CaseDraft {
    CaseDraft {
        title: title.to_string(),
        summary: "Former official convicted of misappropriating health funds.".to_string(),
        content: LONG_CONTENT.to_string(),
        case_number: Some("ACC/2023/112".to_string()),
        defendant: Some("Mohamed Sesay".to_string()),
        charges: vec!["Misappropriation of public funds".to_string()],
        verdict: Some("Guilty".to_string()),
        sentence: Some("Five years imprisonment".to_string()),
        amount_involved: Some(5_000_000_000.0),
        amount_recovered: Some(3_200_000_000.0),
        sector: Some(sector.to_string()),
        region: Some("Bo".to_string()),
        case_date: chrono::NaiveDate::from_ymd_opt(2023, 3, 14),
        verdict_date: chrono::NaiveDate::from_ymd_opt(2023, 11, 2),
        featured_image: None,
        status,
    }
}

pub(super) fn news_draft(title: &str, category: Option<&str>) -> NewsDraft {
    NewsDraft {
        title: title.to_string(),
        excerpt: Some("Recovered assets will be auctioned publicly.".to_string()),
        content: LONG_CONTENT.to_string(),
        category: category.map(str::to_string),
        tags: vec!["auction".to_string()],
        featured_image: Some("/uploads/news/cover.jpg".to_string()),
        status: ContentStatus::Published,
    }
}

pub(super) fn resource_draft(title: &str, category: &str) -> ResourceDraft {
    ResourceDraft {
        title: title.to_string(),
        description: "A citizen guide to recognising and reporting bribery.".to_string(),
        content: None,
        category: category.to_string(),
        resource_type: ResourceType::Pdf,
        featured_image: None,
        file_url: Some("/uploads/documents/guide.pdf".to_string()),
        video_url: None,
        status: ContentStatus::Published,
    }
}

pub(super) fn news_router(service: Arc<NewsService>) -> Router {
    with_sessions(
        content_public_router(service.clone(), "/api/news")
            .merge(content_admin_router(service, "/api/admin/news")),
    )
}

pub(super) fn resource_router(service: Arc<ResourceService>) -> Router {
    with_sessions(
        content_public_router(service.clone(), "/api/resources")
            .merge(content_admin_router(service, "/api/admin/resources")),
    )
}

type LookupHook = Box<dyn Fn() + Send + Sync>;

/// Delays slug lookups and optionally runs a hook between the lookup and the caller's next step.
pub(super) struct SlowLookups {
    inner: MemoryContentRepository<EducationalResource>,
    delay: Duration,
    after_lookup: Option<LookupHook>,
}

impl SlowLookups {
    pub(super) fn new(inner: MemoryContentRepository<EducationalResource>, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            after_lookup: None,
        }
    }

    pub(super) fn after_lookup(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.after_lookup = Some(Box::new(hook));
        self
    }
}

impl ContentRepository<EducationalResource> for SlowLookups {
    fn insert(&self, entry: EducationalResource) -> Result<EducationalResource, RepositoryError> {
        self.inner.insert(entry)
    }

    fn update(&self, entry: EducationalResource) -> Result<EducationalResource, RepositoryError> {
        self.inner.update(entry)
    }

    fn record_view(&self, id: &ContentId) -> Result<EducationalResource, RepositoryError> {
        self.inner.record_view(id)
    }

    fn fetch(&self, id: &ContentId) -> Result<Option<EducationalResource>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<EducationalResource>, RepositoryError> {
        let found = self.inner.find_by_slug(slug);
        thread::sleep(self.delay);
        if let Some(hook) = &self.after_lookup {
            hook();
        }
        found
    }

    fn delete(&self, id: &ContentId) -> Result<EducationalResource, RepositoryError> {
        self.inner.delete(id)
    }

    fn all(&self) -> Result<Vec<EducationalResource>, RepositoryError> {
        self.inner.all()
    }
}
