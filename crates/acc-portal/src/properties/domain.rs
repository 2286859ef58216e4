use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::identifiers::entity_id;
use crate::shared::{PageRequest, ValidationErrors, Validator};

entity_id!(
    /// Identifier wrapper for recovered properties.
    PropertyId
);

entity_id!(PropertyImageId);
entity_id!(PropertyDocumentId);

pub const DEFAULT_CURRENCY: &str = "SLE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    Residential,
    Commercial,
    Land,
    Vehicle,
    Equipment,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyStatus {
    #[default]
    Available,
    UnderAuction,
    Sold,
    Reserved,
    Withdrawn,
}

impl PropertyStatus {
    /// Sold and withdrawn assets no longer take expressions of interest.
    pub fn accepts_interest(&self) -> bool {
        !matches!(self, PropertyStatus::Sold | PropertyStatus::Withdrawn)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyImage {
    pub id: PropertyImageId,
    pub property_id: PropertyId,
    pub url: String,
    pub caption: Option<String>,
    pub is_primary: bool,
    pub sort_order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDocument {
    pub id: PropertyDocumentId,
    pub property_id: PropertyId,
    pub title: String,
    pub url: String,
    pub document_type: String,
}

/// Stored aggregate: the property with its gallery and documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub reference_number: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub region: String,
    pub district: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub estimated_value: f64,
    pub minimum_bid: Option<f64>,
    pub currency: String,
    pub auction_date: Option<DateTime<Utc>>,
    pub auction_venue: Option<String>,
    pub auction_end_date: Option<DateTime<Utc>>,
    pub size: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub year_built: Option<i32>,
    pub features: Vec<String>,
    pub case_reference: Option<String>,
    pub former_owner: Option<String>,
    pub recovery_date: Option<NaiveDate>,
    pub is_featured: bool,
    pub view_count: u64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub images: Vec<PropertyImage>,
    pub documents: Vec<PropertyDocument>,
}

impl Property {
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    /// Primary image first, then by sort order.
    pub fn sort_images(&mut self) {
        self.images
            .sort_by(|a, b| b.is_primary.cmp(&a.is_primary).then(a.sort_order.cmp(&b.sort_order)));
    }

    /// Listing card: only the lead image travels with the summary.
    pub fn into_card(mut self) -> Self {
        self.sort_images();
        self.images.truncate(1);
        self.documents.clear();
        self
    }

    fn search_haystack(&self) -> [Option<&str>; 4] {
        [
            Some(self.title.as_str()),
            Some(self.description.as_str()),
            Some(self.reference_number.as_str()),
            self.address.as_deref(),
        ]
    }
}

/// Property plus the number of expressions of interest lodged against it.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub property: Property,
    pub expressions_of_interest: usize,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Admin payload for a new listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub status: PropertyStatus,
    pub region: String,
    pub district: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub estimated_value: f64,
    pub minimum_bid: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub auction_date: Option<DateTime<Utc>>,
    pub auction_venue: Option<String>,
    pub auction_end_date: Option<DateTime<Utc>>,
    pub size: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub year_built: Option<i32>,
    #[serde(default)]
    pub features: Vec<String>,
    pub case_reference: Option<String>,
    pub former_owner: Option<String>,
    pub recovery_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_featured: bool,
    /// Publish immediately instead of saving as unpublished.
    #[serde(default)]
    pub publish: bool,
}

impl PropertyDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator.chars_between("title", &self.title, 5, 200);
        validator.min_chars("description", &self.description, 20);
        validator.min_chars("region", &self.region, 1);
        check_numbers(
            &mut validator,
            NumericFields {
                latitude: self.latitude,
                longitude: self.longitude,
                estimated_value: Some(self.estimated_value),
                minimum_bid: self.minimum_bid,
                bedrooms: self.bedrooms,
                bathrooms: self.bathrooms,
                year_built: self.year_built,
            },
        );
        validator.finish()
    }
}

/// Partial admin update. `publish` sets or clears the publication stamp.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub status: Option<PropertyStatus>,
    pub region: Option<String>,
    pub district: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub estimated_value: Option<f64>,
    pub minimum_bid: Option<f64>,
    pub currency: Option<String>,
    pub auction_date: Option<DateTime<Utc>>,
    pub auction_venue: Option<String>,
    pub auction_end_date: Option<DateTime<Utc>>,
    pub size: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub year_built: Option<i32>,
    pub features: Option<Vec<String>>,
    pub case_reference: Option<String>,
    pub former_owner: Option<String>,
    pub recovery_date: Option<NaiveDate>,
    pub is_featured: Option<bool>,
    pub publish: Option<bool>,
}

impl PropertyPatch {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator.optional_chars_between("title", self.title.as_deref(), 5, 200);
        if let Some(description) = &self.description {
            validator.min_chars("description", description, 20);
        }
        if let Some(region) = &self.region {
            validator.min_chars("region", region, 1);
        }
        check_numbers(
            &mut validator,
            NumericFields {
                latitude: self.latitude,
                longitude: self.longitude,
                estimated_value: self.estimated_value,
                minimum_bid: self.minimum_bid,
                bedrooms: self.bedrooms,
                bathrooms: self.bathrooms,
                year_built: self.year_built,
            },
        );
        validator.finish()
    }

    pub fn apply(self, property: &mut Property, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            property.title = title;
        }
        if let Some(description) = self.description {
            property.description = description;
        }
        if let Some(property_type) = self.property_type {
            property.property_type = property_type;
        }
        if let Some(status) = self.status {
            property.status = status;
        }
        if let Some(region) = self.region {
            property.region = region;
        }
        if let Some(estimated_value) = self.estimated_value {
            property.estimated_value = estimated_value;
        }
        if let Some(currency) = self.currency {
            property.currency = currency;
        }
        if let Some(features) = self.features {
            property.features = features;
        }
        if let Some(is_featured) = self.is_featured {
            property.is_featured = is_featured;
        }

        replace_if_some(&mut property.district, self.district);
        replace_if_some(&mut property.address, self.address);
        replace_if_some(&mut property.latitude, self.latitude);
        replace_if_some(&mut property.longitude, self.longitude);
        replace_if_some(&mut property.minimum_bid, self.minimum_bid);
        replace_if_some(&mut property.auction_date, self.auction_date);
        replace_if_some(&mut property.auction_venue, self.auction_venue);
        replace_if_some(&mut property.auction_end_date, self.auction_end_date);
        replace_if_some(&mut property.size, self.size);
        replace_if_some(&mut property.bedrooms, self.bedrooms);
        replace_if_some(&mut property.bathrooms, self.bathrooms);
        replace_if_some(&mut property.year_built, self.year_built);
        replace_if_some(&mut property.case_reference, self.case_reference);
        replace_if_some(&mut property.former_owner, self.former_owner);
        replace_if_some(&mut property.recovery_date, self.recovery_date);

        match self.publish {
            Some(true) if property.published_at.is_none() => property.published_at = Some(now),
            Some(false) => property.published_at = None,
            _ => {}
        }
        property.updated_at = now;
    }
}

fn replace_if_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

struct NumericFields {
    latitude: Option<f64>,
    longitude: Option<f64>,
    estimated_value: Option<f64>,
    minimum_bid: Option<f64>,
    bedrooms: Option<i32>,
    bathrooms: Option<i32>,
    year_built: Option<i32>,
}

fn check_numbers(validator: &mut Validator, fields: NumericFields) {
    validator.within("latitude", fields.latitude, -90.0, 90.0);
    validator.within("longitude", fields.longitude, -180.0, 180.0);
    validator.non_negative("estimated_value", fields.estimated_value);
    validator.non_negative("minimum_bid", fields.minimum_bid);
    validator.non_negative("bedrooms", fields.bedrooms.map(f64::from));
    validator.non_negative("bathrooms", fields.bathrooms.map(f64::from));
    validator.within(
        "year_built",
        fields.year_built.map(f64::from),
        1800.0,
        f64::from(Utc::now().year()),
    );
}

/// Attach an uploaded image to a property.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageDraft {
    pub url: String,
    pub caption: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    pub sort_order: Option<u32>,
}

impl ImageDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator.min_chars("url", &self.url, 1);
        validator.optional_url("url", Some(self.url.as_str()));
        validator.optional_max_chars("caption", self.caption.as_deref(), 200);
        validator.finish()
    }
}

/// Attach an uploaded document (title deed, valuation report...) to a property.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentDraft {
    pub title: String,
    pub url: String,
    pub document_type: String,
}

impl DocumentDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator.chars_between("title", &self.title, 1, 200);
        validator.min_chars("url", &self.url, 1);
        validator.optional_url("url", Some(self.url.as_str()));
        validator.min_chars("document_type", &self.document_type, 1);
        validator.finish()
    }
}

/// Query string accepted by the public listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyFilters {
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub status: Option<PropertyStatus>,
    pub region: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PropertyFilters {
    pub const DEFAULT_LIMIT: u32 = 12;
    pub const MAX_LIMIT: u32 = 100;

    pub fn page_request(&self) -> Result<PageRequest, ValidationErrors> {
        let mut validator = Validator::new();
        validator.non_negative("min_price", self.min_price);
        validator.non_negative("max_price", self.max_price);
        validator.finish()?;
        PageRequest::resolve(self.page, self.limit, Self::DEFAULT_LIMIT, Self::MAX_LIMIT)
    }

    pub fn matches(&self, property: &Property) -> bool {
        if self.property_type.is_some_and(|kind| kind != property.property_type) {
            return false;
        }
        if self.status.is_some_and(|status| status != property.status) {
            return false;
        }
        if let Some(region) = self.region.as_deref().filter(|region| !region.is_empty()) {
            if property.region != region {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| property.estimated_value < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| property.estimated_value > max) {
            return false;
        }
        match self.search.as_deref().map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => {
                let needle = term.to_lowercase();
                property
                    .search_haystack()
                    .into_iter()
                    .flatten()
                    .any(|text| text.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

/// Featured listings first, then most recently published.
pub fn listing_order(a: &Property, b: &Property) -> std::cmp::Ordering {
    b.is_featured
        .cmp(&a.is_featured)
        .then_with(|| b.published_at.cmp(&a.published_at))
}
