use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::common::*;
use crate::content::{
    CaseFilters, CasePatch, ContentEntry, ContentServiceError, ContentStatus, NewsFilters,
    ResourceFilters, ResourceService, ResourceType,
};
use crate::memory::MemoryContentRepository;

#[test]
fn drafts_stay_hidden_until_published() {
    let service = case_service();
    let case = service
        .create(case_draft("Health Ministry Fraud Case", "Health", ContentStatus::Draft))
        .expect("case created");
    assert!(case.publication.published_at.is_none());

    let listed = service.list_published(&CaseFilters::default()).expect("list");
    assert_eq!(listed.pagination.total, 0);
    assert!(matches!(
        service.get_public(&case.slug),
        Err(ContentServiceError::NotFound("Case"))
    ));

    let published = service
        .set_status(&case.id, ContentStatus::Published)
        .expect("published");
    assert!(published.publication.published_at.is_some());
    assert_eq!(
        service
            .list_published(&CaseFilters::default())
            .expect("list")
            .pagination
            .total,
        1
    );
}

#[test]
fn case_validation_reports_field_messages() {
    let service = case_service();
    let mut draft = case_draft("Bad", "Health", ContentStatus::Draft);
    draft.content = "Too short".to_string();
    draft.amount_recovered = Some(-1.0);

    let Err(ContentServiceError::Validation(errors)) = service.create(draft) else {
        panic!("expected validation failure");
    };
    assert!(errors.has_field("title"));
    assert!(errors.has_field("content"));
    assert!(errors.has_field("amount_recovered"));
    assert_eq!(errors.first_message(), "Title must be at least 5 characters");
}

#[test]
fn case_filters_match_year_sector_and_search() {
    let service = case_service();
    service
        .create(case_draft("Health Ministry Fraud Case", "Health", ContentStatus::Published))
        .expect("created");
    service
        .create(case_draft("Road Contract Kickbacks", "Infrastructure", ContentStatus::Published))
        .expect("created");

    let by_sector = CaseFilters {
        sector: Some("Health".to_string()),
        ..CaseFilters::default()
    };
    assert_eq!(service.list_published(&by_sector).expect("list").data.len(), 1);

    let wrong_year = CaseFilters {
        year: Some(2019),
        ..CaseFilters::default()
    };
    assert!(service.list_published(&wrong_year).expect("list").data.is_empty());

    let search = CaseFilters {
        search: Some("KICKBACKS".to_string()),
        ..CaseFilters::default()
    };
    let found = service.list_published(&search).expect("list");
    assert_eq!(found.data[0].title, "Road Contract Kickbacks");
}

#[test]
fn related_cases_share_a_sector() {
    let service = case_service();
    let first = service
        .create(case_draft("Health Ministry Fraud Case", "Health", ContentStatus::Published))
        .expect("created");
    service
        .create(case_draft("Hospital Supplies Diversion", "Health", ContentStatus::Published))
        .expect("created");
    service
        .create(case_draft("Road Contract Kickbacks", "Infrastructure", ContentStatus::Published))
        .expect("created");

    let detail = service.get_public(&first.slug).expect("detail");
    assert_eq!(detail.related.len(), 1);
    assert_eq!(detail.related[0].title, "Hospital Supplies Diversion");
}

#[test]
fn patch_keeps_slug_and_first_publication_stamp() {
    let service = case_service();
    let case = service
        .create(case_draft("Health Ministry Fraud Case", "Health", ContentStatus::Published))
        .expect("created");
    let stamp = case.publication.published_at;

    let archived = service
        .update(
            &case.id,
            CasePatch {
                title: Some("Health Ministry Fraud Case (Appeal)".to_string()),
                status: Some(ContentStatus::Archived),
                ..CasePatch::default()
            },
        )
        .expect("updated");
    assert_eq!(archived.slug, case.slug);
    assert_eq!(archived.publication.status, ContentStatus::Archived);
    assert_eq!(archived.publication.published_at, stamp);
}

#[test]
fn news_related_items_follow_category() {
    let service = news_service();
    let first = service
        .create(news_draft("Assets Auction Announced", Some("Auctions")))
        .expect("created");
    service
        .create(news_draft("Second Auction Round Opens", Some("Auctions")))
        .expect("created");
    service
        .create(news_draft("Commissioner Visits Kenema", Some("Outreach")))
        .expect("created");

    let detail = service.get_public(&first.slug).expect("detail");
    assert_eq!(detail.related.len(), 1);
    assert_eq!(detail.related[0].category.as_deref(), Some("Auctions"));

    let filtered = service
        .list_published(&NewsFilters {
            category: Some("Outreach".to_string()),
            ..NewsFilters::default()
        })
        .expect("list");
    assert_eq!(filtered.data.len(), 1);
}

#[test]
fn public_resource_reads_count_downloads() {
    let service = resource_service();
    let resource = service
        .create(resource_draft("Guide to Reporting Bribery", "Guides"))
        .expect("created");

    service.get_public(&resource.slug).expect("first read");
    let second = service.get_public(&resource.slug).expect("second read");
    assert_eq!(second.entry.download_count, 2);
    assert_eq!(service.admin_get(&resource.id).expect("stored").download_count, 2);
}

#[test]
fn overlapping_public_reads_count_every_download() {
    let storage = MemoryContentRepository::default();
    let service = Arc::new(ResourceService::new(Arc::new(SlowLookups::new(
        storage,
        Duration::from_millis(5),
    ))));
    let resource = service
        .create(resource_draft("Guide to Reporting Bribery", "Guides"))
        .expect("created");

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = service.clone();
            let slug = resource.slug.clone();
            thread::spawn(move || service.get_public(&slug).map(|_| ()))
        })
        .collect();
    for reader in readers {
        reader.join().expect("reader thread").expect("public read");
    }

    assert_eq!(service.admin_get(&resource.id).expect("stored").download_count, 4);
}

#[test]
fn public_read_does_not_undo_a_concurrent_archive() {
    let storage = MemoryContentRepository::default();
    let staff = Arc::new(ResourceService::new(Arc::new(storage.clone())));
    let resource = staff
        .create(resource_draft("Guide to Reporting Bribery", "Guides"))
        .expect("created");

    let archiver = staff.clone();
    let id = resource.id.clone();
    let public = ResourceService::new(Arc::new(
        SlowLookups::new(storage, Duration::from_millis(1)).after_lookup(move || {
            archiver
                .set_status(&id, ContentStatus::Archived)
                .expect("archived");
        }),
    ));

    assert!(matches!(
        public.get_public(&resource.slug),
        Err(ContentServiceError::NotFound("Resource"))
    ));
    let stored = staff.admin_get(&resource.id).expect("stored");
    assert_eq!(stored.publication.status, ContentStatus::Archived);
    assert_eq!(stored.download_count, 1);
}

#[test]
fn staff_edits_keep_the_download_count() {
    let service = resource_service();
    let resource = service
        .create(resource_draft("Guide to Reporting Bribery", "Guides"))
        .expect("created");
    service.get_public(&resource.slug).expect("public read");

    let archived = service
        .set_status(&resource.id, ContentStatus::Archived)
        .expect("archived");
    assert_eq!(archived.download_count, 1);
}

#[test]
fn resource_limit_is_capped_at_fifty() {
    let service = resource_service();
    let filters = ResourceFilters {
        limit: Some(51),
        ..ResourceFilters::default()
    };
    assert!(matches!(
        service.list_published(&filters),
        Err(ContentServiceError::Validation(_))
    ));
    let defaults = service
        .list_published(&ResourceFilters::default())
        .expect("defaults");
    assert_eq!(defaults.pagination.limit, 12);
    assert_eq!(
        defaults.pagination.limit,
        crate::content::EducationalResource::DEFAULT_LIMIT
    );
}

#[test]
fn resource_type_filter_and_missing_category() {
    let service = resource_service();
    service
        .create(resource_draft("Guide to Reporting Bribery", "Guides"))
        .expect("created");

    let videos = ResourceFilters {
        resource_type: Some(ResourceType::Video),
        ..ResourceFilters::default()
    };
    assert!(service.list_published(&videos).expect("list").data.is_empty());

    let mut draft = resource_draft("Integrity in Schools", "");
    draft.file_url = Some("not a url".to_string());
    let Err(ContentServiceError::Validation(errors)) = service.create(draft) else {
        panic!("expected validation failure");
    };
    assert!(errors
        .errors()
        .iter()
        .any(|error| error.message == "Category is required"));
    assert!(errors.has_field("file_url"));
}

#[test]
fn delete_unknown_entry_is_not_found() {
    let service = news_service();
    assert!(matches!(
        service.delete(&crate::content::ContentId::from("missing")),
        Err(ContentServiceError::NotFound("News article"))
    ));
}
