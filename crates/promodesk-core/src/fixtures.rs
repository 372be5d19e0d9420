use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::drafts::{
    validate_settings, AffiliateLinkDraft, BrandDraft, CampaignDraft, ContentDraft, EarningDraft,
    PromotionalItemDraft, UserProfileDraft,
};
use crate::editor::Draft;
use crate::model::{
    AffiliateLink, Brand, Campaign, ContentPiece, Earning, Entity, PlatformSettings,
    PromotionalItem, UserProfile, PLATFORM_SETTINGS_DOC_ID,
};
use crate::ConfigError;

const BUILTIN_FIXTURES: &str = include_str!("../../../config/fixtures.yaml");

/// The seed collections every list screen starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub promotional_items: Vec<PromotionalItem>,
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub content: Vec<ContentPiece>,
    #[serde(default)]
    pub affiliate_links: Vec<AffiliateLink>,
    #[serde(default)]
    pub earnings: Vec<Earning>,
    pub profile: UserProfile,
    #[serde(default)]
    pub settings: PlatformSettings,
}

impl Fixtures {
    /// Fixtures compiled into the binary from `config/fixtures.yaml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded file fails to parse or validate.
    pub fn builtin() -> Result<Self, ConfigError> {
        parse_fixtures(BUILTIN_FIXTURES)
    }
}

/// Load and validate fixtures from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_fixtures(path: &Path) -> Result<Fixtures, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FixturesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    let fixtures = parse_fixtures(&content)?;
    tracing::debug!(
        path = %path.display(),
        brands = fixtures.brands.len(),
        items = fixtures.promotional_items.len(),
        "loaded fixtures"
    );
    Ok(fixtures)
}

/// Load from `path` when given, otherwise fall back to the built-in set.
///
/// # Errors
///
/// Returns `ConfigError` if the selected fixtures fail to load.
pub fn load_fixtures_or_builtin(path: Option<&Path>) -> Result<Fixtures, ConfigError> {
    match path {
        Some(p) => load_fixtures(p),
        None => Fixtures::builtin(),
    }
}

fn parse_fixtures(content: &str) -> Result<Fixtures, ConfigError> {
    let fixtures: Fixtures =
        serde_yaml::from_str(content).map_err(ConfigError::FixturesFileParse)?;
    validate_fixtures(&fixtures)?;
    Ok(fixtures)
}

/// Reject duplicate ids within a kind and records that break their editor rules.
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate_fixtures(fixtures: &Fixtures) -> Result<(), ConfigError> {
    check_collection::<BrandDraft>(&fixtures.brands)?;
    check_collection::<PromotionalItemDraft>(&fixtures.promotional_items)?;
    check_collection::<CampaignDraft>(&fixtures.campaigns)?;
    check_collection::<ContentDraft>(&fixtures.content)?;
    check_collection::<AffiliateLinkDraft>(&fixtures.affiliate_links)?;
    check_collection::<EarningDraft>(&fixtures.earnings)?;
    check_collection::<UserProfileDraft>(std::slice::from_ref(&fixtures.profile))?;

    validate_settings(&fixtures.settings).map_err(|errors| ConfigError::InvalidFixture {
        kind: "settings",
        id: PLATFORM_SETTINGS_DOC_ID.to_string(),
        errors,
    })
}

fn check_collection<D: Draft>(records: &[D::Record]) -> Result<(), ConfigError> {
    let kind = <D::Record as Entity>::KIND;
    let mut seen = HashSet::new();
    for record in records {
        let id = record.id();
        if id.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{kind} with empty id")));
        }
        if !seen.insert(id) {
            return Err(ConfigError::Validation(format!("duplicate {kind} id: '{id}'")));
        }
        D::from_record(record)
            .validate()
            .map_err(|errors| ConfigError::InvalidFixture {
                kind,
                id: id.to_string(),
                errors,
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_fixtures_are_valid() {
        let fixtures = Fixtures::builtin().expect("embedded fixtures parse");
        let names: Vec<&str> = fixtures.brands.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            ["GamerFuel Inc.", "TechNova Gadgets", "Chic Trends Boutique"]
        );
        assert_eq!(fixtures.brands[0].id, "brand001");
        assert_eq!(fixtures.profile.username, "alex_rivera");
        assert_eq!(fixtures.settings, PlatformSettings::default());
    }

    #[test]
    fn builtin_item_metadata_is_an_object() {
        let fixtures = Fixtures::builtin().unwrap();
        let item = fixtures
            .promotional_items
            .iter()
            .find(|i| i.id == "item001")
            .expect("item001 present");
        let metadata = item.metadata.as_ref().expect("metadata present");
        assert_eq!(metadata["size_ml"], 355);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut fixtures = Fixtures::builtin().unwrap();
        let copy = fixtures.brands[0].clone();
        fixtures.brands.push(copy);
        let err = validate_fixtures(&fixtures).unwrap_err();
        assert!(err.to_string().contains("duplicate brand id: 'brand001'"));
    }

    #[test]
    fn records_breaking_editor_rules_are_rejected() {
        let mut fixtures = Fixtures::builtin().unwrap();
        fixtures.campaigns[0].brand_id = Some("brand001".to_string());
        let err = validate_fixtures(&fixtures).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidFixture { kind: "campaign", ref id, .. } if id == "camp001"),
            "got: {err:?}"
        );
    }

    #[test]
    fn load_fixtures_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            r"
brands:
  - id: b1
    name: Solo Brand
    category: other
profile:
  id: user9
  full_name: Sam Lee
  username: sam_lee
  email: sam@example.com
"
        )
        .unwrap();
        let fixtures = load_fixtures(file.path()).unwrap();
        assert_eq!(fixtures.brands.len(), 1);
        assert!(fixtures.campaigns.is_empty());
        assert_eq!(fixtures.settings.site_name, "PromoDesk");
    }

    #[test]
    fn load_fixtures_missing_file_reports_path() {
        let err = load_fixtures(Path::new("/nonexistent/fixtures.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FixturesFileIo { ref path, .. } if path.contains("nonexistent")));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = parse_fixtures("brands: [").unwrap_err();
        assert!(matches!(err, ConfigError::FixturesFileParse(_)));
    }
}
