use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::{
    ApplicationStatus, Internship, InternshipId, InternshipLevel, InternshipStatus, UserId,
};
use super::super::registry::PlacementRegistry;

#[derive(Debug, Clone, Serialize)]
pub struct InternshipView {
    pub id: InternshipId,
    pub title: String,
    pub company_name: String,
    pub owner: UserId,
    pub level: InternshipLevel,
    pub level_label: &'static str,
    pub preferred_major: String,
    pub status: InternshipStatus,
    pub status_label: &'static str,
    pub opening_date: NaiveDate,
    pub closing_date: NaiveDate,
    pub slots: u32,
    pub slots_filled: u32,
    pub visible: bool,
    pub applications: usize,
    pub accepted: usize,
}

impl InternshipView {
    pub fn from_internship(registry: &PlacementRegistry, internship: &Internship) -> Self {
        let applications = registry.applications_to(internship);
        let accepted = applications
            .iter()
            .filter(|application| application.status == ApplicationStatus::Accepted)
            .count();

        Self {
            id: internship.id.clone(),
            title: internship.title.clone(),
            company_name: internship.company_name.clone(),
            owner: internship.owner.clone(),
            level: internship.level,
            level_label: internship.level.label(),
            preferred_major: internship.preferred_major.clone(),
            status: internship.status,
            status_label: internship.status.label(),
            opening_date: internship.opening_date,
            closing_date: internship.closing_date,
            slots: internship.slots,
            slots_filled: internship.slots_filled,
            visible: internship.visible,
            applications: applications.len(),
            accepted,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCountEntry {
    pub status: InternshipStatus,
    pub status_label: &'static str,
    pub count: usize,
}
