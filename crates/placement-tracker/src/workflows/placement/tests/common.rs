use chrono::NaiveDate;

use crate::workflows::placement::domain::{
    Account, ApplicationId, InternshipDraft, InternshipId, InternshipLevel, UserId,
};
use crate::workflows::placement::{Clock, PlacementPolicy, PlacementService};

pub(super) const STAFF: &str = "staff1";
pub(super) const REP: &str = "rep1";
pub(super) const PENDING_REP: &str = "rep2";

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")
}

pub(super) fn user(id: &str) -> UserId {
    UserId::from(id)
}

/// Staff, one authorized and one unauthorized representative, and no students.
pub(super) fn service() -> PlacementService {
    let mut service =
        PlacementService::new(PlacementPolicy::default()).with_clock(Clock::Fixed(today()));
    {
        let mut accounts = service.accounts();
        accounts
            .register_staff(Account::new(STAFF, "Grace Staff", "password"), "Career Office")
            .expect("staff registers");
        accounts
            .register_representative(
                Account::new(REP, "Rita Rep", "password"),
                "Acme Analytics",
                "Engineering",
                "Recruiter",
            )
            .expect("rep registers");
        accounts
            .register_representative(
                Account::new(PENDING_REP, "Paul Pending", "password"),
                "Globex",
                "Finance",
                "Manager",
            )
            .expect("rep registers");
        accounts
            .authorize_representative(&user(REP), true)
            .expect("rep authorized");
    }
    service
}

pub(super) fn add_student(service: &mut PlacementService, id: &str, year: u8, major: &str) -> UserId {
    service
        .accounts()
        .register_student(Account::new(id, format!("Student {id}"), "password"), year, major)
        .expect("student registers");
    user(id)
}

pub(super) fn draft(title: &str, level: InternshipLevel, slots: u32) -> InternshipDraft {
    InternshipDraft {
        title: title.to_string(),
        description: format!("{title} placement"),
        level,
        preferred_major: "Computer Science".to_string(),
        opening_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
        closing_date: NaiveDate::from_ymd_opt(2025, 3, 31).expect("valid date"),
        slots,
    }
}

/// Create and approve a posting owned by [`REP`].
pub(super) fn approved_internship(
    service: &mut PlacementService,
    title: &str,
    level: InternshipLevel,
    slots: u32,
) -> InternshipId {
    let mut internships = service.internships();
    let internship = internships
        .create(&user(REP), draft(title, level, slots))
        .expect("internship created");
    internships
        .approve(&internship.id)
        .expect("internship approved");
    internship.id
}

/// Submit and approve an application, leaving an offer ready for acceptance.
pub(super) fn offered(
    service: &mut PlacementService,
    student: &UserId,
    internship: &InternshipId,
) -> ApplicationId {
    let mut applications = service.applications();
    let application = applications
        .apply(student, internship)
        .expect("application submitted");
    applications
        .approve(&application.id)
        .expect("application approved");
    application.id
}
