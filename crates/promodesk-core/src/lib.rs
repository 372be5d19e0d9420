pub mod app_config;
pub mod config;
pub mod display;
pub mod drafts;
pub mod editor;
pub mod error;
pub mod fixtures;
pub mod listing;
pub mod metrics;
pub mod model;
pub mod preferences;
pub mod validate;

pub use app_config::{AppConfig, Environment, SettingsStoreKind};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_GENAI_BASE_URL};
pub use editor::{Draft, EntityEditor, SubmitError};
pub use error::ConfigError;
pub use fixtures::{load_fixtures, load_fixtures_or_builtin, validate_fixtures, Fixtures};
pub use model::{
    generate_id, AffiliateLink, Brand, BrandCategory, Campaign, ContentPiece, ContentType,
    Earning, EarningSource, EarningStatus, Entity, ItemType, PlatformSettings, PromotionalItem,
    SocialPlatform, SocialProfile, UserProfile, PLATFORM_SETTINGS_DOC_ID,
};
pub use preferences::{load_theme, save_theme, PreferenceError, Theme};
pub use validate::{FieldError, FieldErrors, Validator};
