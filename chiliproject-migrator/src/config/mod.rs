//! Migration settings loading.
//!
//! The settings file carries everything the run needs that is not part of the
//! CSV export: the GitLab API location, one private token per ChiliProject
//! author and the manual project name overrides.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    default_closed_status, default_migration_label, default_page_size, MigrationSettings,
};
