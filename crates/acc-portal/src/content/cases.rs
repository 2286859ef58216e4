use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::entry::{equals_if_set, search_matches, ContentEntry, ContentId};
use super::publication::{ContentStatus, Publication};
use crate::shared::{ValidationErrors, Validator};

/// Highlight of a prosecuted corruption case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseHighlight {
    pub id: ContentId,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub case_number: Option<String>,
    pub defendant: Option<String>,
    pub charges: Vec<String>,
    pub verdict: Option<String>,
    pub sentence: Option<String>,
    pub amount_involved: Option<f64>,
    pub amount_recovered: Option<f64>,
    pub sector: Option<String>,
    pub region: Option<String>,
    pub case_date: Option<NaiveDate>,
    pub verdict_date: Option<NaiveDate>,
    pub featured_image: Option<String>,
    #[serde(flatten)]
    pub publication: Publication,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaseDraft {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub case_number: Option<String>,
    pub defendant: Option<String>,
    #[serde(default)]
    pub charges: Vec<String>,
    pub verdict: Option<String>,
    pub sentence: Option<String>,
    pub amount_involved: Option<f64>,
    pub amount_recovered: Option<f64>,
    pub sector: Option<String>,
    pub region: Option<String>,
    pub case_date: Option<NaiveDate>,
    pub verdict_date: Option<NaiveDate>,
    pub featured_image: Option<String>,
    #[serde(default)]
    pub status: ContentStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CasePatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub case_number: Option<String>,
    pub defendant: Option<String>,
    pub charges: Option<Vec<String>>,
    pub verdict: Option<String>,
    pub sentence: Option<String>,
    pub amount_involved: Option<f64>,
    pub amount_recovered: Option<f64>,
    pub sector: Option<String>,
    pub region: Option<String>,
    pub case_date: Option<NaiveDate>,
    pub verdict_date: Option<NaiveDate>,
    pub featured_image: Option<String>,
    pub status: Option<ContentStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseFilters {
    pub sector: Option<String>,
    pub region: Option<String>,
    pub year: Option<i32>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

struct CaseFields<'a> {
    title: Option<&'a str>,
    summary: Option<&'a str>,
    content: Option<&'a str>,
    case_number: Option<&'a str>,
    defendant: Option<&'a str>,
    verdict: Option<&'a str>,
    sentence: Option<&'a str>,
    amount_involved: Option<f64>,
    amount_recovered: Option<f64>,
    featured_image: Option<&'a str>,
}

fn check(fields: CaseFields<'_>) -> Result<(), ValidationErrors> {
    let mut validator = Validator::new();
    validator.optional_chars_between("title", fields.title, 5, 200);
    validator.optional_chars_between("summary", fields.summary, 20, 500);
    if let Some(content) = fields.content {
        validator.min_chars("content", content, 100);
    }
    validator.optional_max_chars("case_number", fields.case_number, 50);
    validator.optional_max_chars("defendant", fields.defendant, 200);
    validator.optional_max_chars("verdict", fields.verdict, 100);
    validator.optional_max_chars("sentence", fields.sentence, 500);
    validator.non_negative("amount_involved", fields.amount_involved);
    validator.non_negative("amount_recovered", fields.amount_recovered);
    validator.optional_url("featured_image", fields.featured_image);
    validator.finish()
}

fn set_if_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

impl ContentEntry for CaseHighlight {
    type Draft = CaseDraft;
    type Patch = CasePatch;
    type Filters = CaseFilters;

    const NOUN: &'static str = "Case";
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

    fn validate_draft(draft: &CaseDraft) -> Result<(), ValidationErrors> {
        check(CaseFields {
            title: Some(&draft.title),
            summary: Some(&draft.summary),
            content: Some(&draft.content),
            case_number: draft.case_number.as_deref(),
            defendant: draft.defendant.as_deref(),
            verdict: draft.verdict.as_deref(),
            sentence: draft.sentence.as_deref(),
            amount_involved: draft.amount_involved,
            amount_recovered: draft.amount_recovered,
            featured_image: draft.featured_image.as_deref(),
        })
    }

    fn draft_title(draft: &CaseDraft) -> &str {
        &draft.title
    }

    fn draft_status(draft: &CaseDraft) -> ContentStatus {
        draft.status
    }

    fn from_draft(id: ContentId, slug: String, draft: CaseDraft, publication: Publication) -> Self {
        Self {
            id,
            slug,
            title: draft.title.trim().to_string(),
            summary: draft.summary,
            content: draft.content,
            case_number: draft.case_number,
            defendant: draft.defendant,
            charges: draft.charges,
            verdict: draft.verdict,
            sentence: draft.sentence,
            amount_involved: draft.amount_involved,
            amount_recovered: draft.amount_recovered,
            sector: draft.sector,
            region: draft.region,
            case_date: draft.case_date,
            verdict_date: draft.verdict_date,
            featured_image: draft.featured_image,
            publication,
        }
    }

    fn validate_patch(patch: &CasePatch) -> Result<(), ValidationErrors> {
        check(CaseFields {
            title: patch.title.as_deref(),
            summary: patch.summary.as_deref(),
            content: patch.content.as_deref(),
            case_number: patch.case_number.as_deref(),
            defendant: patch.defendant.as_deref(),
            verdict: patch.verdict.as_deref(),
            sentence: patch.sentence.as_deref(),
            amount_involved: patch.amount_involved,
            amount_recovered: patch.amount_recovered,
            featured_image: patch.featured_image.as_deref(),
        })
    }

    fn patch_status(patch: &CasePatch) -> Option<ContentStatus> {
        patch.status
    }

    fn apply_patch(&mut self, patch: CasePatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(summary) = patch.summary {
            self.summary = summary;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(charges) = patch.charges {
            self.charges = charges;
        }
        set_if_some(&mut self.case_number, patch.case_number);
        set_if_some(&mut self.defendant, patch.defendant);
        set_if_some(&mut self.verdict, patch.verdict);
        set_if_some(&mut self.sentence, patch.sentence);
        set_if_some(&mut self.amount_involved, patch.amount_involved);
        set_if_some(&mut self.amount_recovered, patch.amount_recovered);
        set_if_some(&mut self.sector, patch.sector);
        set_if_some(&mut self.region, patch.region);
        set_if_some(&mut self.case_date, patch.case_date);
        set_if_some(&mut self.verdict_date, patch.verdict_date);
        set_if_some(&mut self.featured_image, patch.featured_image);
    }

    fn page(filters: &CaseFilters) -> (Option<u32>, Option<u32>) {
        (filters.page, filters.limit)
    }

    fn matches(&self, filters: &CaseFilters) -> bool {
        equals_if_set(filters.sector.as_deref(), self.sector.as_deref())
            && equals_if_set(filters.region.as_deref(), self.region.as_deref())
            && filters
                .year
                .map_or(true, |year| self.case_date.is_some_and(|date| date.year() == year))
            && search_matches(
                filters.search.as_deref(),
                &[
                    Some(self.title.as_str()),
                    Some(self.summary.as_str()),
                    self.defendant.as_deref(),
                ],
            )
    }

    /// Cases in the same sector, or any case when the sector is unknown.
    fn is_related(&self, other: &Self) -> bool {
        match &self.sector {
            Some(sector) => other.sector.as_ref() == Some(sector),
            None => true,
        }
    }
}
