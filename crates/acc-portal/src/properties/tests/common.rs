use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use crate::memory::{MemoryInterestRepository, MemoryPropertyRepository, MemorySettingsRepository};
use crate::properties::{
    property_admin_router, property_public_router, InterestSubmission, Property, PropertyDraft,
    PropertyService, PropertyStatus, PropertyType,
};
use crate::rate_limit::FixedWindowLimiter;
use crate::settings::SettingsService;
use crate::testing::with_sessions;

pub(super) struct Harness {
    pub(super) service: Arc<PropertyService>,
    pub(super) settings: Arc<SettingsService>,
    pub(super) interests: MemoryInterestRepository,
    pub(super) properties: MemoryPropertyRepository,
}

pub(super) fn harness() -> Harness {
    let settings = Arc::new(SettingsService::new(Arc::new(
        MemorySettingsRepository::default(),
    )));
    let interests = MemoryInterestRepository::default();
    let properties = MemoryPropertyRepository::default();
    let service = Arc::new(PropertyService::new(
        Arc::new(properties.clone()),
        Arc::new(interests.clone()),
        settings.clone(),
    ));
    Harness {
        service,
        settings,
        interests,
        properties,
    }
}

pub(super) fn draft(title: &str) -> PropertyDraft {
    PropertyDraft {
        title: title.to_string(),
        description: "Recovered residential property forfeited following a conviction."
            .to_string(),
        property_type: PropertyType::Residential,
        status: PropertyStatus::Available,
        region: "Western Area Urban".to_string(),
        district: Some("Freetown".to_string()),
        address: Some("15 Hill Station Road".to_string()),
        latitude: Some(8.4657),
        longitude: Some(-13.2317),
        estimated_value: 2_500_000_000.0,
        minimum_bid: Some(2_000_000_000.0),
        currency: "SLE".to_string(),
        auction_date: None,
        auction_venue: None,
        auction_end_date: None,
        size: Some("1,200 sq m".to_string()),
        bedrooms: Some(5),
        bathrooms: Some(4),
        year_built: Some(2015),
        features: vec!["Swimming Pool".to_string(), "Generator".to_string()],
        case_reference: Some("ACC/2023/045".to_string()),
        former_owner: None,
        recovery_date: None,
        is_featured: false,
        publish: true,
    }
}

pub(super) fn create(service: &PropertyService, draft: PropertyDraft) -> Property {
    service.create(draft).expect("property created")
}

pub(super) fn submission() -> InterestSubmission {
    InterestSubmission {
        full_name: "Ibrahim Bangura".to_string(),
        email: "ibrahim.bangura@example.sl".to_string(),
        phone: "+23278555123".to_string(),
        organization: Some("Bangura Holdings".to_string()),
        address: None,
        nationality: "Sierra Leonean".to_string(),
        nin: Some("NIN-00112233".to_string()),
        passport_number: None,
        intended_use: Some("Family residence".to_string()),
        proposed_amount: Some(2_100_000_000.0),
        message: None,
    }
}

pub(super) fn router(service: Arc<PropertyService>, max_requests: u32) -> Router {
    let limiter = Arc::new(FixedWindowLimiter::new(max_requests, Duration::from_secs(60)));
    with_sessions(
        property_public_router(service.clone(), limiter).merge(property_admin_router(service)),
    )
}
