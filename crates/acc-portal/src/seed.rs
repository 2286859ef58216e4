//! Demonstration data for a fresh portal: the bootstrap administrator, a handful of
//! recovered assets, two recovery periods and published editorial content.
//!
//! Seeding is idempotent. Records that already exist are left alone.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::info;

use crate::accounts::AccountServiceError;
use crate::app::Portal;
use crate::config::AuthConfig;
use crate::content::{
    CaseDraft, ContentServiceError, ContentStatus, NewsDraft, ResourceDraft, ResourceType,
};
use crate::properties::domain::DEFAULT_CURRENCY;
use crate::properties::{ImageDraft, PropertyDraft, PropertyServiceError, PropertyStatus, PropertyType};
use crate::settings::SettingsServiceError;
use crate::statistics::{Breakdown, PeriodType, StatisticDraft, StatisticsServiceError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Accounts(#[from] AccountServiceError),
    #[error(transparent)]
    Properties(#[from] PropertyServiceError),
    #[error(transparent)]
    Statistics(#[from] StatisticsServiceError),
    #[error(transparent)]
    Content(#[from] ContentServiceError),
    #[error(transparent)]
    Settings(#[from] SettingsServiceError),
}

/// How many records each step created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub properties: usize,
    pub statistics: usize,
    pub cases: usize,
    pub news: usize,
    pub resources: usize,
    pub settings: usize,
}

pub fn seed(portal: &Portal, auth: &AuthConfig) -> Result<SeedSummary, SeedError> {
    let admin = portal
        .accounts
        .ensure_admin(&auth.admin_email, &auth.admin_password)?;
    info!(email = %admin.email, "administrator available");

    let mut summary = SeedSummary::default();

    if portal.properties.admin_list()?.is_empty() {
        for (draft, image) in properties() {
            let property = portal.properties.create(draft)?;
            portal.properties.add_image(
                &property.id,
                ImageDraft {
                    url: image.to_string(),
                    caption: None,
                    is_primary: true,
                    sort_order: Some(0),
                },
            )?;
            summary.properties += 1;
        }
    }

    for draft in sample_statistics() {
        match portal.statistics.create(draft) {
            Ok(_) => summary.statistics += 1,
            Err(StatisticsServiceError::Duplicate) => {}
            Err(err) => return Err(err.into()),
        }
    }

    if portal.cases.admin_list()?.is_empty() {
        for draft in cases() {
            portal.cases.create(draft)?;
            summary.cases += 1;
        }
    }
    if portal.news.admin_list()?.is_empty() {
        for draft in news() {
            portal.news.create(draft)?;
            summary.news += 1;
        }
    }
    if portal.resources.admin_list()?.is_empty() {
        for draft in resources() {
            portal.resources.create(draft)?;
            summary.resources += 1;
        }
    }

    let settings = site_settings();
    summary.settings = settings.len();
    portal.settings.store(settings)?;

    info!(
        properties = summary.properties,
        statistics = summary.statistics,
        cases = summary.cases,
        news = summary.news,
        resources = summary.resources,
        "seed data loaded"
    );
    Ok(summary)
}

fn auction_day(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 10, 0, 0).single()
}

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn listing(title: &str, description: &str, property_type: PropertyType) -> PropertyDraft {
    PropertyDraft {
        title: title.to_string(),
        description: description.to_string(),
        property_type,
        status: PropertyStatus::Available,
        region: "Western Area Urban".to_string(),
        district: None,
        address: None,
        latitude: None,
        longitude: None,
        estimated_value: 0.0,
        minimum_bid: None,
        currency: DEFAULT_CURRENCY.to_string(),
        auction_date: None,
        auction_venue: Some("ACC Headquarters, Freetown".to_string()),
        auction_end_date: None,
        size: None,
        bedrooms: None,
        bathrooms: None,
        year_built: None,
        features: Vec::new(),
        case_reference: None,
        former_owner: Some("Confiscated Asset".to_string()),
        recovery_date: None,
        is_featured: false,
        publish: true,
    }
}

fn properties() -> Vec<(PropertyDraft, &'static str)> {
    let hill_station = PropertyDraft {
        district: Some("Freetown".to_string()),
        address: Some("15 Hill Station Road, Freetown".to_string()),
        latitude: Some(8.4657),
        longitude: Some(-13.2317),
        estimated_value: 2_500_000_000.0,
        minimum_bid: Some(2_000_000_000.0),
        auction_date: auction_day(2024, 4, 15),
        size: Some("450 sqm".to_string()),
        bedrooms: Some(3),
        bathrooms: Some(2),
        year_built: Some(2018),
        features: features(&["Garden", "Parking", "Security", "Generator"]),
        case_reference: Some("ACC/2023/045".to_string()),
        is_featured: true,
        ..listing(
            "3-Bedroom Residential Property in Hill Station",
            "A well-maintained 3-bedroom residential property in the Hill Station area with a garden and modern amenities, recovered from a case involving misappropriated public funds.",
            PropertyType::Residential,
        )
    };

    let central = PropertyDraft {
        district: Some("Freetown".to_string()),
        address: Some("25 Siaka Stevens Street, Freetown".to_string()),
        latitude: Some(8.4844),
        longitude: Some(-13.2299),
        estimated_value: 5_000_000_000.0,
        minimum_bid: Some(4_000_000_000.0),
        auction_date: auction_day(2024, 4, 20),
        size: Some("800 sqm".to_string()),
        features: features(&["Elevator", "Parking", "24/7 Security", "Conference Room"]),
        case_reference: Some("ACC/2022/089".to_string()),
        is_featured: true,
        ..listing(
            "Commercial Building in Central Freetown",
            "Three-storey office building in the central business district, recovered through the prosecution of a procurement fraud case.",
            PropertyType::Commercial,
        )
    };

    let kenema = PropertyDraft {
        region: "Kenema".to_string(),
        district: Some("Kenema".to_string()),
        address: Some("Blama Road, Kenema".to_string()),
        latitude: Some(7.8762),
        longitude: Some(-11.1903),
        estimated_value: 500_000_000.0,
        minimum_bid: Some(350_000_000.0),
        auction_date: auction_day(2024, 4, 25),
        auction_venue: Some("Kenema District Council Hall".to_string()),
        size: Some("10 hectares".to_string()),
        features: features(&["Water Access", "Road Access", "Fertile Soil"]),
        case_reference: Some("ACC/2023/112".to_string()),
        ..listing(
            "Agricultural Land in Kenema",
            "Fertile agricultural land with access to water, suited to cash crop cultivation. Seized during an embezzlement investigation.",
            PropertyType::Land,
        )
    };

    let vehicle = PropertyDraft {
        status: PropertyStatus::UnderAuction,
        address: Some("ACC Impound Lot, Freetown".to_string()),
        estimated_value: 350_000_000.0,
        minimum_bid: Some(280_000_000.0),
        auction_date: auction_day(2024, 4, 10),
        features: features(&["Leather Interior", "Sunroof", "4WD", "Low Mileage"]),
        case_reference: Some("ACC/2023/078".to_string()),
        is_featured: true,
        ..listing(
            "Toyota Land Cruiser V8 2020",
            "Low-mileage 2020 Land Cruiser V8 in excellent condition, seized during an investigation into misuse of public funds.",
            PropertyType::Vehicle,
        )
    };

    let equipment = PropertyDraft {
        address: Some("ACC Storage Facility, Wellington".to_string()),
        estimated_value: 800_000_000.0,
        minimum_bid: Some(600_000_000.0),
        auction_date: auction_day(2024, 5, 1),
        auction_venue: Some("Wellington Industrial Area".to_string()),
        features: features(&["Working Condition", "Recent Service", "Complete Documentation"]),
        case_reference: Some("ACC/2022/156".to_string()),
        ..listing(
            "Construction Equipment Set",
            "Excavator, bulldozer and cement mixers in working condition, recovered from a case involving inflated government contracts.",
            PropertyType::Equipment,
        )
    };

    vec![
        (hill_station, "/uploads/properties/hill-station.jpg"),
        (central, "/uploads/properties/central-freetown.jpg"),
        (kenema, "/uploads/properties/kenema-land.jpg"),
        (vehicle, "/uploads/properties/land-cruiser.jpg"),
        (equipment, "/uploads/properties/equipment.jpg"),
    ]
}

fn breakdown(entries: &[(&str, f64)]) -> Breakdown {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

/// Recovery figures for 2023 and the first quarter of 2024.
pub fn sample_statistics() -> Vec<StatisticDraft> {
    vec![
        StatisticDraft {
            period: "2023".to_string(),
            period_type: PeriodType::Yearly,
            total_recovered: 45_000_000_000.0,
            cash_recovered: Some(25_000_000_000.0),
            assets_recovered: Some(20_000_000_000.0),
            funds_to_treasury: Some(40_000_000_000.0),
            cases_opened: Some(156),
            cases_closed: Some(134),
            prosecutions: Some(89),
            convictions: Some(78),
            acquittals: Some(11),
            properties_seized: Some(45),
            properties_auctioned: Some(32),
            sector_breakdown: Some(breakdown(&[
                ("Public Administration", 15_000_000_000.0),
                ("Health", 8_000_000_000.0),
                ("Education", 7_000_000_000.0),
                ("Infrastructure", 10_000_000_000.0),
                ("Other", 5_000_000_000.0),
            ])),
            region_breakdown: Some(breakdown(&[
                ("Western Area Urban", 20_000_000_000.0),
                ("Western Area Rural", 5_000_000_000.0),
                ("Bo", 4_000_000_000.0),
                ("Kenema", 6_000_000_000.0),
                ("Bombali", 5_000_000_000.0),
                ("Other", 5_000_000_000.0),
            ])),
        },
        StatisticDraft {
            period: "2024-Q1".to_string(),
            period_type: PeriodType::Quarterly,
            total_recovered: 12_000_000_000.0,
            cash_recovered: Some(7_000_000_000.0),
            assets_recovered: Some(5_000_000_000.0),
            funds_to_treasury: Some(10_000_000_000.0),
            cases_opened: Some(42),
            cases_closed: Some(38),
            prosecutions: Some(25),
            convictions: Some(22),
            acquittals: Some(3),
            properties_seized: Some(12),
            properties_auctioned: Some(8),
            sector_breakdown: None,
            region_breakdown: None,
        },
    ]
}

fn cases() -> Vec<CaseDraft> {
    vec![
        CaseDraft {
            title: "Former Minister Convicted in Embezzlement Case".to_string(),
            summary: "A former government minister was convicted for embezzling over Le 5 billion from public funds intended for infrastructure development.".to_string(),
            content: "<h2>Case Overview</h2><p>The Commission prosecuted a former minister found guilty of embezzling funds earmarked for infrastructure projects across several districts.</p><h2>Verdict and Sentence</h2><p>The court ordered forfeiture of all illegally acquired assets, valued at over Le 3 billion.</p>".to_string(),
            case_number: Some("ACC/2023/045".to_string()),
            defendant: Some("Former Minister".to_string()),
            charges: features(&["Embezzlement", "Abuse of Office", "Money Laundering"]),
            verdict: Some("Guilty".to_string()),
            sentence: Some("15 years imprisonment".to_string()),
            amount_involved: Some(5_000_000_000.0),
            amount_recovered: Some(3_200_000_000.0),
            sector: Some("Public Administration".to_string()),
            region: Some("Western Area Urban".to_string()),
            case_date: NaiveDate::from_ymd_opt(2022, 6, 15),
            verdict_date: NaiveDate::from_ymd_opt(2023, 11, 20),
            featured_image: None,
            status: ContentStatus::Published,
        },
        CaseDraft {
            title: "Procurement Fraud Ring Dismantled".to_string(),
            summary: "ACC investigation leads to the prosecution of 8 individuals involved in a procurement fraud scheme affecting multiple government ministries.".to_string(),
            content: "<h2>Case Overview</h2><p>A procurement fraud ring of officials and private contractors inflated contracts and supplied substandard goods to three ministries over four years.</p><h2>Prosecution Results</h2><p>All eight defendants were found guilty and more than Le 2 billion was recovered.</p>".to_string(),
            case_number: Some("ACC/2022/089".to_string()),
            defendant: Some("Multiple Defendants".to_string()),
            charges: features(&["Procurement Fraud", "Conspiracy", "Corruption"]),
            verdict: Some("Guilty (All Defendants)".to_string()),
            sentence: Some("5-12 years imprisonment".to_string()),
            amount_involved: Some(3_500_000_000.0),
            amount_recovered: Some(2_100_000_000.0),
            sector: Some("Procurement".to_string()),
            region: Some("Multiple Regions".to_string()),
            case_date: NaiveDate::from_ymd_opt(2021, 3, 10),
            verdict_date: NaiveDate::from_ymd_opt(2023, 8, 15),
            featured_image: None,
            status: ContentStatus::Published,
        },
    ]
}

fn news() -> Vec<NewsDraft> {
    vec![
        NewsDraft {
            title: "ACC Launches New Public Education Campaign".to_string(),
            excerpt: Some("The Anti-Corruption Commission has launched a nationwide campaign to educate citizens about corruption prevention and reporting.".to_string()),
            content: "<p>The campaign \"Clean Hands, Clean Sierra Leone\" runs for six months with radio programmes, community outreach in every district and school anti-corruption clubs.</p>".to_string(),
            category: Some("Campaigns".to_string()),
            tags: features(&["education", "campaign", "awareness"]),
            featured_image: None,
            status: ContentStatus::Published,
        },
        NewsDraft {
            title: "Quarterly Asset Recovery Report Released".to_string(),
            excerpt: Some("ACC announces record-breaking asset recovery figures for Q1 2024, with over Le 12 billion recovered.".to_string()),
            content: "<p>Total assets recovered reached Le 12 billion, including Le 7 billion in cash and 12 seized properties. The full report is on the transparency dashboard.</p>".to_string(),
            category: Some("Reports".to_string()),
            tags: features(&["statistics", "recovery", "report"]),
            featured_image: None,
            status: ContentStatus::Published,
        },
    ]
}

fn resources() -> Vec<ResourceDraft> {
    vec![
        ResourceDraft {
            title: "Understanding Corruption: A Citizen's Guide".to_string(),
            description: "A guide explaining the forms corruption takes, its impact on society and how citizens can help combat it.".to_string(),
            content: Some("<h2>What is Corruption?</h2><p>Corruption is the abuse of entrusted power for private gain.</p>".to_string()),
            category: "Guides".to_string(),
            resource_type: ResourceType::Article,
            featured_image: None,
            file_url: None,
            video_url: None,
            status: ContentStatus::Published,
        },
        ResourceDraft {
            title: "Anti-Corruption Laws in Sierra Leone".to_string(),
            description: "An overview of the legal framework governing anti-corruption efforts in Sierra Leone, including the Anti-Corruption Act.".to_string(),
            content: None,
            category: "Legal".to_string(),
            resource_type: ResourceType::Pdf,
            featured_image: None,
            file_url: Some("/uploads/resources/anti-corruption-act.pdf".to_string()),
            video_url: None,
            status: ContentStatus::Published,
        },
        ResourceDraft {
            title: "How to Report Corruption - Video Guide".to_string(),
            description: "Step-by-step video tutorial on how to submit a corruption report through the official channels.".to_string(),
            content: None,
            category: "Tutorials".to_string(),
            resource_type: ResourceType::Video,
            featured_image: None,
            file_url: None,
            video_url: Some("https://www.youtube.com/watch?v=example".to_string()),
            status: ContentStatus::Published,
        },
    ]
}

fn site_settings() -> Vec<(String, Value)> {
    vec![
        (
            "site_name".to_string(),
            json!({ "en": "ACC Sierra Leone", "kri": "ACC Salone" }),
        ),
        ("contact_email".to_string(), json!("info@anticorruption.gov.sl")),
        ("contact_phone".to_string(), json!("+232 22 228 092")),
        (
            "office_address".to_string(),
            json!("3 Gloucester Street, Freetown, Sierra Leone"),
        ),
        (
            "social_media".to_string(),
            json!({
                "facebook": "https://facebook.com/accsl",
                "twitter": "https://twitter.com/accsl",
                "youtube": "https://youtube.com/accsl",
            }),
        ),
        ("featured_properties_count".to_string(), json!(3)),
        ("enable_anonymous_reports".to_string(), json!(true)),
        ("maintenance_mode".to_string(), json!(false)),
    ]
}
