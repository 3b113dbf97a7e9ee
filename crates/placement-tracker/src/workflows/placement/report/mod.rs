pub mod views;

use serde::{Deserialize, Serialize};

use super::domain::{Internship, InternshipStatus};
use super::registry::PlacementRegistry;
use views::{InternshipView, StatusCountEntry};

/// Optional, case-insensitive filters; blank values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    pub status: Option<String>,
    pub major: Option<String>,
    pub level: Option<String>,
}

impl ReportFilter {
    pub fn matches(&self, internship: &Internship) -> bool {
        field_matches(self.status.as_deref(), internship.status.label())
            && field_matches(self.major.as_deref(), &internship.preferred_major)
            && field_matches(self.level.as_deref(), internship.level.label())
    }
}

fn field_matches(filter: Option<&str>, value: &str) -> bool {
    match filter.map(str::trim) {
        Some(wanted) if !wanted.is_empty() => wanted.eq_ignore_ascii_case(value.trim()),
        _ => true,
    }
}

/// Postings matching a filter plus slot and status totals over the matches.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementReport {
    pub filter: ReportFilter,
    pub internships: Vec<InternshipView>,
    pub status_counts: Vec<StatusCountEntry>,
    pub total_slots: u32,
    pub filled_slots: u32,
}

impl PlacementReport {
    pub fn generate(registry: &PlacementRegistry, filter: &ReportFilter) -> Self {
        let internships: Vec<InternshipView> = registry
            .internships()
            .filter(|internship| filter.matches(internship))
            .map(|internship| InternshipView::from_internship(registry, internship))
            .collect();

        let status_counts = InternshipStatus::ordered()
            .into_iter()
            .map(|status| StatusCountEntry {
                status,
                status_label: status.label(),
                count: internships
                    .iter()
                    .filter(|view| view.status == status)
                    .count(),
            })
            .filter(|entry| entry.count > 0)
            .collect();

        let total_slots = internships.iter().map(|view| view.slots).sum();
        let filled_slots = internships.iter().map(|view| view.slots_filled).sum();

        Self {
            filter: filter.clone(),
            internships,
            status_counts,
            total_slots,
            filled_slots,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.internships.is_empty()
    }
}
