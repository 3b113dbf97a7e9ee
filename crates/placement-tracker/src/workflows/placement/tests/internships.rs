use chrono::NaiveDate;

use super::common::*;
use crate::workflows::placement::domain::{
    ApplicationStatus, ErrorKind, InternshipLevel, InternshipStatus, PlacementError,
};
use crate::workflows::placement::ReportFilter;

#[test]
fn created_posting_waits_hidden_for_approval() {
    let mut service = service();
    let internship = service
        .internships()
        .create(&user(REP), draft("Data Intern", InternshipLevel::Basic, 3))
        .expect("created");

    assert_eq!(internship.status, InternshipStatus::Pending);
    assert!(!internship.visible);
    assert_eq!(internship.company_name, "Acme Analytics");
    assert_eq!(internship.slots_filled, 0);
    assert_eq!(
        service.registry().representative(&user(REP)).expect("rep").postings,
        vec![internship.id.clone()]
    );
    assert_eq!(service.internships().pending().len(), 1);
}

#[test]
fn unapproved_representative_cannot_post() {
    let mut service = service();
    let err = service
        .internships()
        .create(
            &user(PENDING_REP),
            draft("Audit Intern", InternshipLevel::Basic, 1),
        )
        .expect_err("not authorized");

    assert_eq!(err, PlacementError::RepresentativeNotApproved(user(PENDING_REP)));
    assert_eq!(err.kind(), ErrorKind::Permission);
    assert_eq!(service.registry().internships().count(), 0);
}

#[test]
fn sixth_posting_exceeds_cap() {
    let mut service = service();
    for n in 0..5 {
        service
            .internships()
            .create(
                &user(REP),
                draft(&format!("Role {n}"), InternshipLevel::Basic, 1),
            )
            .expect("within cap");
    }

    let err = service
        .internships()
        .create(&user(REP), draft("Role 6", InternshipLevel::Basic, 1))
        .expect_err("cap reached");

    assert_eq!(err.kind(), ErrorKind::Capacity);
    assert_eq!(
        service
            .registry()
            .representative(&user(REP))
            .expect("rep")
            .postings
            .len(),
        5
    );
}

#[test]
fn slots_and_dates_are_validated() {
    let mut service = service();

    for slots in [0, 11] {
        let err = service
            .internships()
            .create(&user(REP), draft("Bad slots", InternshipLevel::Basic, slots))
            .expect_err("slots out of range");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    let mut backwards = draft("Backwards", InternshipLevel::Basic, 2);
    backwards.closing_date = NaiveDate::from_ymd_opt(2024, 12, 1).expect("valid date");
    let err = service
        .internships()
        .create(&user(REP), backwards)
        .expect_err("closing before opening");
    assert!(matches!(err, PlacementError::InvalidDateWindow { .. }));
    assert_eq!(service.registry().internships().count(), 0);
}

#[test]
fn approve_and_reject_require_pending() {
    let mut service = service();
    let id = approved_internship(&mut service, "Data Intern", InternshipLevel::Basic, 2);
    let posted = service.registry().internship(&id).expect("posting");
    assert_eq!(posted.status, InternshipStatus::Approved);
    assert!(posted.visible);

    let err = service.internships().reject(&id).expect_err("already approved");
    assert_eq!(err.kind(), ErrorKind::State);

    let pending = service
        .internships()
        .create(&user(REP), draft("Ops Intern", InternshipLevel::Basic, 1))
        .expect("created");
    service.internships().reject(&pending.id).expect("rejected");
    let rejected = service.registry().internship(&pending.id).expect("posting");
    assert_eq!(rejected.status, InternshipStatus::Rejected);
    assert!(!rejected.visible);
    assert_eq!(
        service
            .internships()
            .approve(&pending.id)
            .expect_err("rejected is final")
            .kind(),
        ErrorKind::State
    );
}

#[test]
fn visibility_toggles_only_while_approved() {
    let mut service = service();
    let id = approved_internship(&mut service, "Data Intern", InternshipLevel::Basic, 1);

    assert!(!service.internships().toggle_visibility(&id).expect("hide"));
    assert!(service.internships().toggle_visibility(&id).expect("show"));

    let pending = service
        .internships()
        .create(&user(REP), draft("Ops Intern", InternshipLevel::Basic, 1))
        .expect("created");
    let err = service
        .internships()
        .toggle_visibility(&pending.id)
        .expect_err("pending posting");
    assert!(matches!(
        err,
        PlacementError::InternshipTransition {
            status: InternshipStatus::Pending,
            ..
        }
    ));
}

#[test]
fn available_listing_filters_major_level_and_visibility() {
    let mut service = service();
    let basic = approved_internship(&mut service, "Basic", InternshipLevel::Basic, 1);
    let advanced = approved_internship(&mut service, "Advanced", InternshipLevel::Advanced, 1);
    let hidden = approved_internship(&mut service, "Hidden", InternshipLevel::Basic, 1);
    service
        .internships()
        .toggle_visibility(&hidden)
        .expect("hidden");
    let mut other_major = draft("Wet lab", InternshipLevel::Basic, 1);
    other_major.preferred_major = "Biology".to_string();
    let biology = service
        .internships()
        .create(&user(REP), other_major)
        .expect("created");
    service
        .internships()
        .approve(&biology.id)
        .expect("approved");

    let freshman = add_student(&mut service, "s1", 1, "computer science");
    let senior = add_student(&mut service, "s2", 3, "Computer Science");

    let ids = |list: Vec<&crate::workflows::placement::Internship>| {
        list.into_iter().map(|i| i.id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(
        ids(service.internships().list_available_for(&freshman).expect("listing")),
        vec![basic.clone()]
    );
    assert_eq!(
        ids(service.internships().list_available_for(&senior).expect("listing")),
        vec![basic, advanced]
    );
}

#[test]
fn removal_cascades_to_applications_and_withdrawals() {
    let mut service = service();
    let target = approved_internship(&mut service, "Doomed", InternshipLevel::Basic, 2);
    let keep = approved_internship(&mut service, "Kept", InternshipLevel::Basic, 2);
    let alice = add_student(&mut service, "s1", 2, "Computer Science");
    let bob = add_student(&mut service, "s2", 2, "Computer Science");

    let doomed_a = service.applications().apply(&alice, &target).expect("applied");
    let doomed_b = service.applications().apply(&bob, &target).expect("applied");
    let kept = service.applications().apply(&alice, &keep).expect("applied");
    service
        .withdrawals()
        .request(&doomed_a.id)
        .expect("withdrawal requested");

    let summary = service.internships().remove(&target).expect("removed");
    assert_eq!(
        summary.applications_removed,
        vec![doomed_a.id.clone(), doomed_b.id.clone()]
    );
    assert_eq!(summary.withdrawals_removed, 1);

    let registry = service.registry();
    assert!(registry.internship(&target).is_err());
    assert!(registry.application(&doomed_a.id).is_err());
    assert!(registry.application(&doomed_b.id).is_err());
    assert_eq!(registry.withdrawals().count(), 0);
    assert_eq!(
        registry.student(&alice).expect("student").applications,
        vec![kept.id.clone()]
    );
    assert!(registry.student(&bob).expect("student").applications.is_empty());
    assert_eq!(
        registry.representative(&user(REP)).expect("rep").postings,
        vec![keep]
    );
    assert_eq!(
        registry.application(&kept.id).expect("kept").status,
        ApplicationStatus::Pending
    );
}

#[test]
fn only_the_owner_sees_received_applications() {
    let mut service = service();
    let id = approved_internship(&mut service, "Data Intern", InternshipLevel::Basic, 2);
    let student = add_student(&mut service, "s1", 2, "Computer Science");
    service.applications().apply(&student, &id).expect("applied");
    service
        .accounts()
        .authorize_representative(&user(PENDING_REP), true)
        .expect("authorized");

    assert_eq!(
        service
            .internships()
            .applications_for(&user(REP), &id)
            .expect("owner view")
            .len(),
        1
    );
    let err = service
        .internships()
        .applications_for(&user(PENDING_REP), &id)
        .expect_err("not the owner");
    assert_eq!(err.kind(), ErrorKind::Permission);
}

#[test]
fn report_filters_case_insensitively() {
    let mut service = service();
    approved_internship(&mut service, "Basic", InternshipLevel::Basic, 2);
    approved_internship(&mut service, "Advanced", InternshipLevel::Advanced, 3);
    service
        .internships()
        .create(&user(REP), draft("Pending", InternshipLevel::Basic, 1))
        .expect("created");

    let everything = service.report(&ReportFilter::default());
    assert_eq!(everything.internships.len(), 3);
    assert_eq!(everything.total_slots, 6);

    let filter = ReportFilter {
        status: Some("approved".to_string()),
        major: Some("COMPUTER SCIENCE".to_string()),
        level: Some("  ".to_string()),
    };
    let approved = service.internships().generate_report(&filter);
    assert_eq!(approved.internships.len(), 2);
    assert_eq!(approved.status_counts.len(), 1);
    assert_eq!(approved.status_counts[0].status, InternshipStatus::Approved);
    assert_eq!(approved.status_counts[0].count, 2);
}
