//! Core domain logic for the SkillMap employee directory.
//! This crate is the single source of truth for skill normalization,
//! specialty aggregation, catalog alignment and directory search.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod skills;
pub mod source;

pub use config::{BoxedDirectorySource, ConfigError, DirectoryConfig, SourceConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{
    EmployeeDetailRecord, EmployeeId, EmployeeProfile, EmployeeRecord, EmployeeSummary,
    ImprovementArea,
};
pub use model::skill::{NormalizedSkill, Proficiency, SkillRecord, Specialty};
pub use model::technology::{CatalogEntry, Technology, TechnologyId};
pub use search::filter::{
    available_skill_tags, filter_employees, DirectoryEntry, EmployeeFilter, SkillTagSelection,
};
pub use service::directory_service::{DirectoryService, DirectoryView, EmployeeDetailView};
pub use service::view_state::{DirectoryError, DirectoryResult, FetchState, Navigation, ViewTicket};
pub use skills::aggregate::{aggregate_by_specialty, SpecialtyGroup, SpecialtyGroups};
pub use skills::catalog::Catalog;
pub use skills::dataset::{
    build_catalog_aligned_dataset, CatalogAlignedDataset, DatasetSeries, SeriesInput,
};
pub use skills::matching::match_key;
pub use skills::normalize::{normalize_skill, normalize_skills};
pub use source::snapshot::{DirectorySnapshot, SnapshotDirectorySource};
pub use source::sqlite_source::SqliteDirectorySource;
pub use source::{DirectorySource, SourceError, SourceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
