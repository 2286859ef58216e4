use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::PropertyId;
use crate::shared::identifiers::entity_id;
use crate::shared::{PageRequest, ValidationErrors, Validator};

entity_id!(
    /// Identifier wrapper for expressions of interest.
    InterestId
);

/// Nationality that is identified by NIN rather than passport.
pub const DOMESTIC_NATIONALITY: &str = "Sierra Leonean";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestStatus {
    #[default]
    Pending,
    UnderReview,
    Shortlisted,
    Accepted,
    Rejected,
}

/// Public payload for registering interest in an auctioned property.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InterestSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub organization: Option<String>,
    pub address: Option<String>,
    pub nationality: String,
    pub nin: Option<String>,
    pub passport_number: Option<String>,
    pub intended_use: Option<String>,
    pub proposed_amount: Option<f64>,
    pub message: Option<String>,
}

impl InterestSubmission {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new();
        validator.chars_between("full_name", &self.full_name, 2, 100);
        validator.email("email", &self.email);
        validator.chars_between("phone", &self.phone, 8, 20);
        validator.optional_max_chars("organization", self.organization.as_deref(), 200);
        validator.optional_max_chars("address", self.address.as_deref(), 500);
        validator.min_chars("nationality", &self.nationality, 1);
        validator.optional_max_chars("intended_use", self.intended_use.as_deref(), 500);
        validator.non_negative("proposed_amount", self.proposed_amount);
        validator.optional_max_chars("message", self.message.as_deref(), 2000);

        let nationality = self.nationality.trim();
        if nationality == DOMESTIC_NATIONALITY {
            if char_len(self.nin.as_deref()) < 8 {
                validator.fail("nin", "NIN must be at least 8 characters");
            }
        } else if !nationality.is_empty() && char_len(self.passport_number.as_deref()) < 5 {
            validator.fail(
                "passport_number",
                "Passport number must be at least 5 characters",
            );
        }

        validator.finish()
    }
}

fn char_len(value: Option<&str>) -> usize {
    value.map(|value| value.trim().chars().count()).unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionOfInterest {
    pub id: InterestId,
    pub reference_number: String,
    pub property_id: PropertyId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub organization: Option<String>,
    pub address: Option<String>,
    pub nationality: String,
    pub nin: Option<String>,
    pub passport_number: Option<String>,
    pub intended_use: Option<String>,
    pub proposed_amount: Option<f64>,
    pub message: Option<String>,
    pub status: InterestStatus,
    pub ip_address: String,
    pub submitted_at: DateTime<Utc>,
}

/// Confirmation handed back to the bidder.
#[derive(Debug, Clone, Serialize)]
pub struct InterestReceipt {
    pub reference_number: String,
    pub message: String,
}

/// Admin listing row: the EOI plus enough of the property to identify it.
#[derive(Debug, Clone, Serialize)]
pub struct InterestView {
    #[serde(flatten)]
    pub interest: ExpressionOfInterest,
    pub property_title: Option<String>,
    pub property_reference: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterestStatusUpdate {
    pub status: InterestStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterestFilters {
    pub property_id: Option<String>,
    pub status: Option<InterestStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl InterestFilters {
    pub fn page_request(&self) -> Result<PageRequest, ValidationErrors> {
        PageRequest::resolve(self.page, self.limit, 20, 100)
    }

    pub fn matches(&self, interest: &ExpressionOfInterest) -> bool {
        self.property_id
            .as_deref()
            .map_or(true, |id| interest.property_id.as_str() == id)
            && self.status.map_or(true, |status| interest.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(nationality: &str) -> InterestSubmission {
        InterestSubmission {
            full_name: "Aminata Conteh".to_string(),
            email: "aminata@example.sl".to_string(),
            phone: "+23276123456".to_string(),
            organization: None,
            address: None,
            nationality: nationality.to_string(),
            nin: None,
            passport_number: None,
            intended_use: None,
            proposed_amount: None,
            message: None,
        }
    }

    #[test]
    fn sierra_leoneans_need_a_nin() {
        let mut input = submission("Sierra Leonean");
        let errors = input.validate().expect_err("nin required");
        assert_eq!(errors.first_message(), "NIN must be at least 8 characters");

        input.nin = Some("SL1234567".to_string());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn foreign_nationals_need_a_passport() {
        let mut input = submission("Ghanaian");
        input.nin = Some("SL1234567".to_string());
        let errors = input.validate().expect_err("passport required");
        assert!(errors.has_field("passport_number"));

        input.passport_number = Some("G1234".to_string());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn missing_nationality_reports_only_the_required_field() {
        let errors = submission(" ").validate().expect_err("nationality required");
        assert!(errors.has_field("nationality"));
        assert!(!errors.has_field("passport_number"));
        assert!(!errors.has_field("nin"));
    }

    #[test]
    fn negative_offer_is_rejected() {
        let mut input = submission("Ghanaian");
        input.passport_number = Some("G12345".to_string());
        input.proposed_amount = Some(-10.0);
        let errors = input.validate().expect_err("negative amount");
        assert_eq!(errors.first_message(), "Proposed amount must be positive");
    }
}
