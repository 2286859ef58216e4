use chrono::Utc;
use uuid::Uuid;

/// Administrative regions offered by filters and used by seed data.
pub const SIERRA_LEONE_REGIONS: [&str; 16] = [
    "Western Area Urban",
    "Western Area Rural",
    "Bo",
    "Bonthe",
    "Moyamba",
    "Pujehun",
    "Kenema",
    "Kailahun",
    "Kono",
    "Bombali",
    "Falaba",
    "Koinadugu",
    "Tonkolili",
    "Kambia",
    "Karene",
    "Port Loko",
];

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Declares a string-backed identifier newtype with a random v4 constructor.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

pub(crate) use entity_id;

/// Lowercase URL slug: word characters survive, whitespace/`_`/`-` runs collapse to one `-`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
        }
    }

    slug
}

/// Slug with a short clock-derived suffix so repeated titles stay unique.
pub fn generate_slug(text: &str) -> String {
    let base = slugify(text);
    let base = if base.is_empty() {
        "item".to_string()
    } else {
        base
    };
    let stamp = to_base36(Utc::now().timestamp_millis().unsigned_abs() as u128);
    let suffix_start = stamp.len().saturating_sub(4);
    format!("{base}-{}", &stamp[suffix_start..])
}

/// Slug suffixed with random characters, used when a clock suffix collided.
pub(crate) fn generate_slug_with_entropy(text: &str) -> String {
    format!("{}-{}", generate_slug(text), random_base36(3))
}

/// `PREFIX-<millis base36>-<4 random chars>`, all upper case.
pub fn generate_reference_number(prefix: &str) -> String {
    let timestamp = to_base36(Utc::now().timestamp_millis().unsigned_abs() as u128);
    format!(
        "{prefix}-{}-{}",
        timestamp.to_uppercase(),
        random_base36(4).to_uppercase()
    )
}

/// Whole-number percentage, `0` when the total is zero.
pub fn calculate_percentage(value: f64, total: f64) -> u32 {
    if total == 0.0 {
        return 0;
    }
    ((value / total) * 100.0).round().max(0.0) as u32
}

pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }
    let shortened: String = text.chars().take(length).collect();
    format!("{}...", shortened.trim())
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn random_base36(len: usize) -> String {
    let entropy = Uuid::new_v4().as_u128();
    let encoded = to_base36(entropy);
    let mut out: String = encoded.chars().rev().take(len).collect();
    while out.len() < len {
        out.push('0');
    }
    out
}
