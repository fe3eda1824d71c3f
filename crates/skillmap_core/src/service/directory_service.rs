//! Directory use-case service.
//!
//! # Responsibility
//! - Open the directory and employee-detail views.
//! - Issue the employee and catalog fetches of a view concurrently and join
//!   them before the view is built.
//! - Run the core pipeline: boundary check, normalize, aggregate, align.
//!
//! # Invariants
//! - A view is built only after every fetch it depends on has finished.
//! - Source failures become `Failed` slots or empty data, never panics.
//! - Unknown employees surface as `DirectoryError::EmployeeNotFound`.
//! - Every view is rebuilt from scratch; nothing is cached between opens.

use crate::logging::sanitize_message;
use crate::model::employee::{EmployeeId, EmployeeProfile, EmployeeSummary};
use crate::search::filter::{available_skill_tags, EmployeeFilter};
use crate::service::view_state::{DirectoryError, DirectoryResult, FetchState, Navigation};
use crate::skills::aggregate::{aggregate_by_specialty, SpecialtyGroups};
use crate::skills::catalog::Catalog;
use crate::skills::dataset::{combined_dataset, specialty_dataset, CatalogAlignedDataset};
use crate::source::boundary::{check_employee_detail, check_employee_record};
use crate::source::{DirectorySource, SourceResult};
use log::{error, info};
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Instant;

const MAX_LOGGED_ERROR_CHARS: usize = 200;
const FETCH_PANICKED: &str = "fetch panicked";

/// Searchable directory view: employee list joined with the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryView {
    pub employees: FetchState<Vec<EmployeeSummary>>,
    pub catalog: FetchState<Catalog>,
}

impl DirectoryView {
    /// Ready once both fetches delivered data.
    pub fn is_ready(&self) -> bool {
        self.employees.is_ready() && self.catalog.is_ready()
    }

    /// Loaded employees, or an empty slice when the fetch did not succeed.
    pub fn employees(&self) -> &[EmployeeSummary] {
        self.employees
            .as_ready()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn filter(&self, filter: &EmployeeFilter) -> Vec<&EmployeeSummary> {
        filter.apply(self.employees())
    }

    pub fn skill_tags(&self) -> Vec<String> {
        available_skill_tags(self.employees())
    }
}

/// Employee detail view with specialty groups and chart datasets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeDetailView {
    pub profile: EmployeeProfile,
    pub catalog: Catalog,
    pub specialty_groups: SpecialtyGroups,
    /// All skills as one catalog-aligned series.
    pub proficiency_chart: CatalogAlignedDataset,
    /// One catalog-aligned series per specialty, alphabetical.
    pub specialty_chart: CatalogAlignedDataset,
    /// Set when the catalog fetch failed and charts use an empty catalog.
    pub catalog_error: Option<DirectoryError>,
}

impl EmployeeDetailView {
    pub fn build(
        profile: EmployeeProfile,
        catalog: Catalog,
        catalog_error: Option<DirectoryError>,
    ) -> Self {
        let specialty_groups = aggregate_by_specialty(&profile.skills);
        let proficiency_chart = combined_dataset(&catalog, &profile.skills);
        let specialty_chart = specialty_dataset(&catalog, &specialty_groups);
        Self {
            profile,
            catalog,
            specialty_groups,
            proficiency_chart,
            specialty_chart,
            catalog_error,
        }
    }

    /// `false` means "no data" for this employee, not an error.
    pub fn has_skill_data(&self) -> bool {
        !self.specialty_groups.is_empty()
    }
}

/// Use-case service over a directory source.
pub struct DirectoryService<S: DirectorySource> {
    source: S,
    navigation: Navigation,
}

impl<S: DirectorySource + Sync> DirectoryService<S> {
    pub fn new(source: S) -> Self {
        Self::with_navigation(source, Navigation::new())
    }

    /// Shares `navigation` with the caller so it can abandon open views.
    pub fn with_navigation(source: S, navigation: Navigation) -> Self {
        Self { source, navigation }
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Opens the directory view, optionally restricted to one manager's
    /// direct reports.
    pub fn open_directory(&self, manager: Option<EmployeeId>) -> DirectoryView {
        let ticket = self.navigation.begin_view();
        let started_at = Instant::now();

        let (employees, catalog) = fetch_joined(
            || self.source.fetch_employee_collection(manager),
            || self.source.fetch_technology_catalog(),
        );
        let employees = log_failure("employee_collection", employees).map(|records| {
            records
                .into_iter()
                .map(check_employee_record)
                .map(EmployeeSummary::from_record)
                .collect::<Vec<_>>()
        });
        let catalog = log_failure("technology_catalog", catalog).map(Catalog::from_entries);

        let (employees, catalog) = ticket.settle_pair(
            FetchState::from_result(employees),
            FetchState::from_result(catalog),
        );
        let view = DirectoryView { employees, catalog };
        info!(
            "event=view_open module=service view=directory status={} employees={} technologies={} duration_ms={}",
            view_status(
                view.is_ready(),
                !matches!(view.employees, FetchState::Abandoned)
            ),
            view.employees().len(),
            view.catalog.as_ready().map_or(0, Catalog::len),
            started_at.elapsed().as_millis()
        );
        view
    }

    /// Opens the detail view of one employee.
    ///
    /// A failed catalog fetch still yields a view, with empty charts and
    /// `catalog_error` set; a failed or empty employee fetch does not.
    pub fn open_employee(&self, id: EmployeeId) -> FetchState<EmployeeDetailView> {
        let ticket = self.navigation.begin_view();
        let started_at = Instant::now();

        let (detail, catalog) = fetch_joined(
            || self.source.fetch_employee_detail(id),
            || self.source.fetch_technology_catalog(),
        );

        let record = match log_failure("employee_detail", detail) {
            Ok(Some(record)) => record,
            Ok(None) => {
                info!(
                    "event=view_open module=service view=employee status=not_found employee_id={id}"
                );
                return ticket.settle(FetchState::Failed(DirectoryError::EmployeeNotFound(id)));
            }
            Err(err) => return ticket.settle(FetchState::Failed(err)),
        };
        let (catalog, catalog_error) = match log_failure("technology_catalog", catalog) {
            Ok(entries) => (Catalog::from_entries(entries), None),
            Err(err) => (Catalog::default(), Some(err)),
        };

        let profile = EmployeeProfile::from_record(check_employee_detail(record));
        let view = EmployeeDetailView::build(profile, catalog, catalog_error);
        info!(
            "event=view_open module=service view=employee status={} employee_id={} skills={} specialties={} technologies={} duration_ms={}",
            view_status(view.catalog_error.is_none(), ticket.is_current()),
            id,
            view.profile.skills.len(),
            view.specialty_groups.len(),
            view.catalog.len(),
            started_at.elapsed().as_millis()
        );
        ticket.settle(FetchState::Ready(view))
    }

    /// Opens a catalog-only view.
    pub fn open_catalog(&self) -> FetchState<Catalog> {
        let ticket = self.navigation.begin_view();
        let catalog = log_failure(
            "technology_catalog",
            run_fetch(|| self.source.fetch_technology_catalog()),
        );
        ticket.settle(FetchState::from_result(catalog.map(Catalog::from_entries)))
    }
}

/// Runs `first` on a scoped thread and `second` on the caller's thread and
/// waits for both.
fn fetch_joined<A, B, FA, FB>(first: FA, second: FB) -> (DirectoryResult<A>, DirectoryResult<B>)
where
    A: Send,
    FA: FnOnce() -> SourceResult<A> + Send,
    FB: FnOnce() -> SourceResult<B>,
{
    thread::scope(|scope| {
        let handle = scope.spawn(first);
        let second = run_fetch(second);
        let first = match handle.join() {
            Ok(result) => result.map_err(DirectoryError::from),
            Err(_) => Err(DirectoryError::Unavailable(FETCH_PANICKED.to_string())),
        };
        (first, second)
    })
}

fn run_fetch<T>(fetch: impl FnOnce() -> SourceResult<T>) -> DirectoryResult<T> {
    match panic::catch_unwind(AssertUnwindSafe(fetch)) {
        Ok(result) => result.map_err(DirectoryError::from),
        Err(_) => Err(DirectoryError::Unavailable(FETCH_PANICKED.to_string())),
    }
}

fn log_failure<T>(query: &str, result: DirectoryResult<T>) -> DirectoryResult<T> {
    if let Err(err) = &result {
        error!(
            "event=source_fetch module=service status=error query={} error={}",
            query,
            sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS)
        );
    }
    result
}

fn view_status(complete: bool, current: bool) -> &'static str {
    match (current, complete) {
        (false, _) => "abandoned",
        (true, true) => "ok",
        (true, false) => "degraded",
    }
}
