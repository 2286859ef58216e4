use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    listing_order, DocumentDraft, ImageDraft, Property, PropertyDetail, PropertyDocument,
    PropertyDocumentId, PropertyDraft, PropertyFilters, PropertyId, PropertyImage,
    PropertyImageId, PropertyPatch,
};
use super::interest::{
    ExpressionOfInterest, InterestFilters, InterestId, InterestReceipt, InterestStatus,
    InterestSubmission, InterestView,
};
use super::repository::{InterestRepository, PropertyRepository};
use crate::settings::{SettingsService, SettingsServiceError};
use crate::shared::identifiers::generate_slug_with_entropy;
use crate::shared::{generate_reference_number, generate_slug, Paginated, RepositoryError, ValidationErrors};

const SLUG_ATTEMPTS: usize = 5;
const INTEREST_CONFIRMATION: &str = "Your expression of interest has been submitted successfully";

/// Orchestrates listings, media attachments and the EOI intake.
pub struct PropertyService {
    properties: Arc<dyn PropertyRepository>,
    interests: Arc<dyn InterestRepository>,
    settings: Arc<SettingsService>,
}

impl PropertyService {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        interests: Arc<dyn InterestRepository>,
        settings: Arc<SettingsService>,
    ) -> Self {
        Self {
            properties,
            interests,
            settings,
        }
    }

    fn published(&self) -> Result<Vec<Property>, PropertyServiceError> {
        let mut published: Vec<Property> = self
            .properties
            .all()?
            .into_iter()
            .filter(Property::is_published)
            .collect();
        published.sort_by(listing_order);
        Ok(published)
    }

    pub fn list_published(
        &self,
        filters: &PropertyFilters,
    ) -> Result<Paginated<Property>, PropertyServiceError> {
        let page = filters.page_request()?;
        let matching: Vec<Property> = self
            .published()?
            .into_iter()
            .filter(|property| filters.matches(property))
            .collect();
        Ok(page.paginate(matching).map(Property::into_card))
    }

    /// Home page selection, sized by the `featured_properties_count` setting.
    pub fn featured(&self) -> Result<Vec<Property>, PropertyServiceError> {
        let count = self.settings.featured_properties_count()?;
        Ok(self
            .published()?
            .into_iter()
            .take(count)
            .map(Property::into_card)
            .collect())
    }

    /// Public detail lookup by slug or id; counts the view.
    pub fn get_public(&self, id_or_slug: &str) -> Result<PropertyDetail, PropertyServiceError> {
        let found = match self.properties.find_by_slug(id_or_slug)? {
            Some(property) => Some(property),
            None => self.properties.fetch(&PropertyId::from(id_or_slug))?,
        };
        let property = found
            .filter(Property::is_published)
            .ok_or(PropertyServiceError::NotFound)?;

        let mut property = match self.properties.record_view(&property.id) {
            Ok(property) if property.is_published() => property,
            Ok(_) | Err(RepositoryError::NotFound) => return Err(PropertyServiceError::NotFound),
            Err(err) => return Err(err.into()),
        };
        property.sort_images();
        self.detail(property)
    }

    pub fn admin_get(&self, id: &PropertyId) -> Result<PropertyDetail, PropertyServiceError> {
        let mut property = self.fetch(id)?;
        property.sort_images();
        self.detail(property)
    }

    /// Every listing regardless of publication, newest first.
    pub fn admin_list(&self) -> Result<Vec<PropertyDetail>, PropertyServiceError> {
        self.properties
            .all()?
            .into_iter()
            .map(|property| self.detail(property.into_card()))
            .collect()
    }

    /// Most recently created listings for the admin overview.
    pub fn recent(&self, limit: usize) -> Result<Vec<Property>, PropertyServiceError> {
        Ok(self
            .properties
            .all()?
            .into_iter()
            .take(limit)
            .map(Property::into_card)
            .collect())
    }

    pub fn count_published(&self) -> Result<usize, PropertyServiceError> {
        Ok(self
            .properties
            .all()?
            .iter()
            .filter(|property| property.is_published())
            .count())
    }

    pub fn create(&self, draft: PropertyDraft) -> Result<Property, PropertyServiceError> {
        draft.validate()?;
        let now = Utc::now();
        let id = PropertyId::generate();
        let reference_number = generate_reference_number("PROP");

        let mut property = Property {
            id,
            reference_number,
            slug: generate_slug(&draft.title),
            title: draft.title.trim().to_string(),
            description: draft.description,
            property_type: draft.property_type,
            status: draft.status,
            region: draft.region,
            district: draft.district,
            address: draft.address,
            latitude: draft.latitude,
            longitude: draft.longitude,
            estimated_value: draft.estimated_value,
            minimum_bid: draft.minimum_bid,
            currency: draft.currency,
            auction_date: draft.auction_date,
            auction_venue: draft.auction_venue,
            auction_end_date: draft.auction_end_date,
            size: draft.size,
            bedrooms: draft.bedrooms,
            bathrooms: draft.bathrooms,
            year_built: draft.year_built,
            features: draft.features,
            case_reference: draft.case_reference,
            former_owner: draft.former_owner,
            recovery_date: draft.recovery_date,
            is_featured: draft.is_featured,
            view_count: 0,
            published_at: draft.publish.then_some(now),
            created_at: now,
            updated_at: now,
            images: Vec::new(),
            documents: Vec::new(),
        };

        for attempt in 1..=SLUG_ATTEMPTS {
            match self.properties.insert(property.clone()) {
                Ok(stored) => {
                    info!(
                        property_id = %stored.id,
                        reference = %stored.reference_number,
                        published = stored.is_published(),
                        "property created"
                    );
                    return Ok(stored);
                }
                Err(RepositoryError::Conflict(reason)) if attempt < SLUG_ATTEMPTS => {
                    warn!(%reason, attempt, "property slug collided, retrying");
                    property.slug = generate_slug_with_entropy(&property.title);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(PropertyServiceError::Repository(RepositoryError::Conflict(
            "property slug".to_string(),
        )))
    }

    pub fn update(
        &self,
        id: &PropertyId,
        patch: PropertyPatch,
    ) -> Result<Property, PropertyServiceError> {
        patch.validate()?;
        let mut property = self.fetch(id)?;
        patch.apply(&mut property, Utc::now());
        let property = self.properties.update(property)?;
        info!(property_id = %property.id, status = ?property.status, "property updated");
        Ok(property)
    }

    /// Removes the listing together with its media and every EOI lodged against it.
    pub fn delete(&self, id: &PropertyId) -> Result<(), PropertyServiceError> {
        let removed = self.properties.delete(id).map_err(|err| match err {
            RepositoryError::NotFound => PropertyServiceError::NotFound,
            other => PropertyServiceError::Repository(other),
        })?;
        let interests = self.interests.delete_for(id)?;
        info!(
            property_id = %removed.id,
            reference = %removed.reference_number,
            interests,
            "property deleted"
        );
        Ok(())
    }

    pub fn add_image(
        &self,
        id: &PropertyId,
        draft: ImageDraft,
    ) -> Result<Property, PropertyServiceError> {
        draft.validate()?;
        let mut property = self.fetch(id)?;

        let is_primary = draft.is_primary || property.images.is_empty();
        if is_primary {
            for image in &mut property.images {
                image.is_primary = false;
            }
        }
        let sort_order = draft
            .sort_order
            .unwrap_or(property.images.len() as u32);
        property.images.push(PropertyImage {
            id: PropertyImageId::generate(),
            property_id: property.id.clone(),
            url: draft.url,
            caption: draft.caption,
            is_primary,
            sort_order,
        });
        property.sort_images();
        property.updated_at = Utc::now();

        let property = self.properties.update(property)?;
        info!(property_id = %property.id, images = property.images.len(), "property image attached");
        Ok(property)
    }

    pub fn add_document(
        &self,
        id: &PropertyId,
        draft: DocumentDraft,
    ) -> Result<Property, PropertyServiceError> {
        draft.validate()?;
        let mut property = self.fetch(id)?;
        property.documents.push(PropertyDocument {
            id: PropertyDocumentId::generate(),
            property_id: property.id.clone(),
            title: draft.title.trim().to_string(),
            url: draft.url,
            document_type: draft.document_type,
        });
        property.updated_at = Utc::now();

        let property = self.properties.update(property)?;
        info!(property_id = %property.id, documents = property.documents.len(), "property document attached");
        Ok(property)
    }

    pub fn submit_interest(
        &self,
        property_id: &PropertyId,
        submission: InterestSubmission,
        ip_address: &str,
    ) -> Result<InterestReceipt, PropertyServiceError> {
        submission.validate()?;
        let property = self.fetch(property_id)?;
        if !property.status.accepts_interest() {
            warn!(property_id = %property.id, status = ?property.status, "interest rejected: property unavailable");
            return Err(PropertyServiceError::NoLongerAvailable);
        }

        let interest = ExpressionOfInterest {
            id: InterestId::generate(),
            reference_number: generate_reference_number("EOI"),
            property_id: property.id.clone(),
            full_name: submission.full_name.trim().to_string(),
            email: submission.email.trim().to_string(),
            phone: submission.phone.trim().to_string(),
            organization: submission.organization,
            address: submission.address,
            nationality: submission.nationality.trim().to_string(),
            nin: submission.nin,
            passport_number: submission.passport_number,
            intended_use: submission.intended_use,
            proposed_amount: submission.proposed_amount,
            message: submission.message,
            status: InterestStatus::Pending,
            ip_address: ip_address.to_string(),
            submitted_at: Utc::now(),
        };

        let stored = self.interests.insert(interest)?;
        info!(
            property_id = %stored.property_id,
            reference = %stored.reference_number,
            "expression of interest received"
        );
        Ok(InterestReceipt {
            reference_number: stored.reference_number,
            message: INTEREST_CONFIRMATION.to_string(),
        })
    }

    pub fn list_interests(
        &self,
        filters: &InterestFilters,
    ) -> Result<Paginated<InterestView>, PropertyServiceError> {
        let page = filters.page_request()?;
        let matching: Vec<ExpressionOfInterest> = self
            .interests
            .all()?
            .into_iter()
            .filter(|interest| filters.matches(interest))
            .collect();

        let page = page.paginate(matching);
        let mut rows = Vec::with_capacity(page.data.len());
        for interest in page.data {
            let property = self.properties.fetch(&interest.property_id)?;
            rows.push(InterestView {
                property_title: property.as_ref().map(|p| p.title.clone()),
                property_reference: property.map(|p| p.reference_number),
                interest,
            });
        }
        Ok(Paginated {
            data: rows,
            pagination: page.pagination,
        })
    }

    pub fn update_interest_status(
        &self,
        id: &InterestId,
        status: InterestStatus,
    ) -> Result<ExpressionOfInterest, PropertyServiceError> {
        let mut interest = self
            .interests
            .fetch(id)?
            .ok_or(PropertyServiceError::InterestNotFound)?;
        let previous = interest.status;
        interest.status = status;
        self.interests.update(interest.clone())?;
        info!(
            reference = %interest.reference_number,
            from = ?previous,
            to = ?status,
            "expression of interest status changed"
        );
        Ok(interest)
    }

    pub fn count_pending_interests(&self) -> Result<usize, PropertyServiceError> {
        Ok(self
            .interests
            .all()?
            .iter()
            .filter(|interest| interest.status == InterestStatus::Pending)
            .count())
    }

    fn fetch(&self, id: &PropertyId) -> Result<Property, PropertyServiceError> {
        self.properties
            .fetch(id)?
            .ok_or(PropertyServiceError::NotFound)
    }

    fn detail(&self, property: Property) -> Result<PropertyDetail, PropertyServiceError> {
        let expressions_of_interest = self.interests.count_for(&property.id)?;
        Ok(PropertyDetail {
            property,
            expressions_of_interest,
        })
    }
}

/// Error raised by the property service.
#[derive(Debug, thiserror::Error)]
pub enum PropertyServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("Property not found")]
    NotFound,
    #[error("Expression of interest not found")]
    InterestNotFound,
    #[error("This property is no longer available")]
    NoLongerAvailable,
    #[error(transparent)]
    Settings(#[from] SettingsServiceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
