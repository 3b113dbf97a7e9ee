use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::{
    ApplicationStatus, InternshipLevel, InternshipStatus, WithdrawalStatus,
};

pub(crate) const STAFF_ROLE_LABEL: &str = "Career Center Staff";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StudentRow {
    #[serde(rename = "StudentID")]
    pub(crate) id: String,
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Password")]
    pub(crate) password: String,
    #[serde(rename = "Major")]
    pub(crate) major: String,
    #[serde(rename = "Year")]
    pub(crate) year_of_study: u8,
}

impl StudentRow {
    pub(crate) const HEADERS: [&'static str; 5] = ["StudentID", "Name", "Password", "Major", "Year"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StaffRow {
    #[serde(rename = "StaffID")]
    pub(crate) id: String,
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Password")]
    pub(crate) password: String,
    #[serde(rename = "Role", default)]
    pub(crate) role: String,
    #[serde(rename = "Department")]
    pub(crate) department: String,
}

impl StaffRow {
    pub(crate) const HEADERS: [&'static str; 5] =
        ["StaffID", "Name", "Password", "Role", "Department"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RepresentativeRow {
    #[serde(rename = "CompanyRepID")]
    pub(crate) id: String,
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Password")]
    pub(crate) password: String,
    #[serde(rename = "CompanyName")]
    pub(crate) company_name: String,
    #[serde(rename = "Department")]
    pub(crate) department: String,
    #[serde(rename = "Position")]
    pub(crate) position: String,
    #[serde(rename = "isApproved")]
    pub(crate) approved: bool,
}

impl RepresentativeRow {
    pub(crate) const HEADERS: [&'static str; 7] = [
        "CompanyRepID",
        "Name",
        "Password",
        "CompanyName",
        "Department",
        "Position",
        "isApproved",
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct InternshipRow {
    #[serde(rename = "InternshipID")]
    pub(crate) id: String,
    #[serde(rename = "Title")]
    pub(crate) title: String,
    #[serde(rename = "Description")]
    pub(crate) description: String,
    #[serde(rename = "Level")]
    pub(crate) level: InternshipLevel,
    #[serde(rename = "PreferredMajor")]
    pub(crate) preferred_major: String,
    #[serde(rename = "OpeningDate")]
    pub(crate) opening_date: NaiveDate,
    #[serde(rename = "ClosingDate")]
    pub(crate) closing_date: NaiveDate,
    #[serde(rename = "Status")]
    pub(crate) status: InternshipStatus,
    #[serde(rename = "CompanyName")]
    pub(crate) company_name: String,
    #[serde(rename = "OwnerID")]
    pub(crate) owner: String,
    #[serde(rename = "Slots")]
    pub(crate) slots: u32,
    #[serde(rename = "SlotsFilled")]
    pub(crate) slots_filled: u32,
    #[serde(rename = "Visible")]
    pub(crate) visible: bool,
}

impl InternshipRow {
    pub(crate) const HEADERS: [&'static str; 13] = [
        "InternshipID",
        "Title",
        "Description",
        "Level",
        "PreferredMajor",
        "OpeningDate",
        "ClosingDate",
        "Status",
        "CompanyName",
        "OwnerID",
        "Slots",
        "SlotsFilled",
        "Visible",
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ApplicationRow {
    #[serde(rename = "ApplicationID")]
    pub(crate) id: String,
    #[serde(rename = "StudentID")]
    pub(crate) student: String,
    #[serde(rename = "InternshipID")]
    pub(crate) internship: String,
    #[serde(rename = "Status")]
    pub(crate) status: ApplicationStatus,
    #[serde(rename = "SubmittedDate")]
    pub(crate) submitted_on: NaiveDate,
}

impl ApplicationRow {
    pub(crate) const HEADERS: [&'static str; 5] = [
        "ApplicationID",
        "StudentID",
        "InternshipID",
        "Status",
        "SubmittedDate",
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WithdrawalRow {
    #[serde(rename = "RequestID")]
    pub(crate) id: String,
    #[serde(rename = "ApplicationID")]
    pub(crate) application: String,
    #[serde(rename = "RequestedDate")]
    pub(crate) requested_on: NaiveDate,
    #[serde(rename = "Status")]
    pub(crate) status: WithdrawalStatus,
}

impl WithdrawalRow {
    pub(crate) const HEADERS: [&'static str; 4] =
        ["RequestID", "ApplicationID", "RequestedDate", "Status"];
}
