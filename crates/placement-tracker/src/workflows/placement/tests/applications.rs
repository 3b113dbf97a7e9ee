use super::common::*;
use crate::workflows::placement::domain::{
    ApplicationStatus, ErrorKind, InternshipLevel, InternshipStatus, PlacementError,
};

#[test]
fn apply_records_pending_application_on_both_sides() {
    let mut service = service();
    let internship = approved_internship(&mut service, "Data Intern", InternshipLevel::Basic, 2);
    let student = add_student(&mut service, "s1", 2, "Computer Science");

    let application = service
        .applications()
        .apply(&student, &internship)
        .expect("applied");

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.submitted_on, today());
    let registry = service.registry();
    assert_eq!(
        registry.student(&student).expect("student").applications,
        vec![application.id.clone()]
    );
    assert_eq!(
        registry.internship(&internship).expect("posting").applications,
        vec![application.id]
    );
}

#[test]
fn duplicate_application_rejected_whatever_the_first_status() {
    let mut service = service();
    let internship = approved_internship(&mut service, "Data Intern", InternshipLevel::Basic, 2);
    let student = add_student(&mut service, "s1", 2, "Computer Science");
    let first = service
        .applications()
        .apply(&student, &internship)
        .expect("applied");
    service.applications().reject(&first.id).expect("rejected");

    let err = service
        .applications()
        .apply(&student, &internship)
        .expect_err("already applied");
    assert!(matches!(err, PlacementError::AlreadyApplied { .. }));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn fourth_pending_application_hits_cap() {
    let mut service = service();
    let student = add_student(&mut service, "s1", 2, "Computer Science");
    let postings: Vec<_> = (0..4)
        .map(|n| {
            approved_internship(
                &mut service,
                &format!("Role {n}"),
                InternshipLevel::Basic,
                1,
            )
        })
        .collect();

    for internship in &postings[..3] {
        service
            .applications()
            .apply(&student, internship)
            .expect("under cap");
    }
    let err = service
        .applications()
        .apply(&student, &postings[3])
        .expect_err("cap reached");
    assert_eq!(err.kind(), ErrorKind::Capacity);
    assert_eq!(service.applications().pending_count(&student).expect("count"), 3);
}

#[test]
fn resolved_applications_free_the_pending_cap() {
    let mut service = service();
    let student = add_student(&mut service, "s1", 2, "Computer Science");
    let postings: Vec<_> = (0..4)
        .map(|n| {
            approved_internship(
                &mut service,
                &format!("Role {n}"),
                InternshipLevel::Basic,
                1,
            )
        })
        .collect();

    let first = service
        .applications()
        .apply(&student, &postings[0])
        .expect("applied");
    for internship in &postings[1..3] {
        service
            .applications()
            .apply(&student, internship)
            .expect("applied");
    }
    service.applications().approve(&first.id).expect("approved");

    service
        .applications()
        .apply(&student, &postings[3])
        .expect("approved offers do not count as pending");
}

#[test]
fn approve_requires_pending_and_open_slot() {
    let mut service = service();
    let internship = approved_internship(&mut service, "Solo", InternshipLevel::Basic, 1);
    let alice = add_student(&mut service, "s1", 2, "Computer Science");
    let bob = add_student(&mut service, "s2", 2, "Computer Science");

    let offer = offered(&mut service, &alice, &internship);
    let err = service
        .applications()
        .approve(&offer)
        .expect_err("already approved");
    assert!(matches!(
        err,
        PlacementError::ApplicationTransition {
            status: ApplicationStatus::Approved,
            ..
        }
    ));

    service
        .applications()
        .accept_placement(&offer)
        .expect("accepted");
    let late = service
        .applications()
        .apply(&bob, &internship)
        .expect("hidden postings still accept direct applications");
    let err = service
        .applications()
        .approve(&late.id)
        .expect_err("no slot left");
    assert_eq!(err.kind(), ErrorKind::Capacity);
}

#[test]
fn acceptance_consumes_slot_and_cancels_pending_siblings() {
    let mut service = service();
    let chosen = approved_internship(&mut service, "Chosen", InternshipLevel::Basic, 2);
    let other_offer = approved_internship(&mut service, "Backup", InternshipLevel::Basic, 2);
    let waiting = approved_internship(&mut service, "Waiting", InternshipLevel::Basic, 2);
    let student = add_student(&mut service, "s1", 2, "Computer Science");

    let accepted = offered(&mut service, &student, &chosen);
    let backup = offered(&mut service, &student, &other_offer);
    let pending = service
        .applications()
        .apply(&student, &waiting)
        .expect("applied");

    let outcome = service
        .applications()
        .accept_placement(&accepted)
        .expect("accepted");
    assert_eq!(outcome.cancelled, vec![pending.id.clone()]);
    assert!(!outcome.internship_filled);

    let registry = service.registry();
    assert_eq!(
        registry.application(&accepted).expect("app").status,
        ApplicationStatus::Accepted
    );
    assert_eq!(
        registry.application(&backup).expect("app").status,
        ApplicationStatus::Approved
    );
    assert_eq!(
        registry.application(&pending.id).expect("app").status,
        ApplicationStatus::Unsuccessful
    );
    let posting = registry.internship(&chosen).expect("posting");
    assert_eq!(posting.slots_filled, 1);
    assert_eq!(posting.status, InternshipStatus::Approved);
    assert!(posting.visible);
}

#[test]
fn two_slots_three_offers_fill_and_hide_the_posting() {
    let mut service = service();
    let internship = approved_internship(&mut service, "Pair", InternshipLevel::Basic, 2);
    let offers: Vec<_> = ["s1", "s2", "s3"]
        .into_iter()
        .map(|id| {
            let student = add_student(&mut service, id, 2, "Computer Science");
            offered(&mut service, &student, &internship)
        })
        .collect();

    service
        .applications()
        .accept_placement(&offers[0])
        .expect("first accepted");
    let outcome = service
        .applications()
        .accept_placement(&offers[1])
        .expect("second accepted");
    assert!(outcome.internship_filled);

    let posting = service.registry().internship(&internship).expect("posting");
    assert_eq!(posting.status, InternshipStatus::Filled);
    assert!(!posting.visible);
    assert_eq!(posting.slots_filled, 2);

    let err = service
        .applications()
        .accept_placement(&offers[2])
        .expect_err("posting full");
    assert!(matches!(err, PlacementError::SlotsFull { filled: 2, slots: 2, .. }));
    assert_eq!(err.kind(), ErrorKind::Capacity);
    assert_eq!(
        service.registry().application(&offers[2]).expect("app").status,
        ApplicationStatus::Approved
    );
}

#[test]
fn accept_requires_an_approved_offer() {
    let mut service = service();
    let internship = approved_internship(&mut service, "Data Intern", InternshipLevel::Basic, 2);
    let student = add_student(&mut service, "s1", 2, "Computer Science");
    let application = service
        .applications()
        .apply(&student, &internship)
        .expect("applied");

    let err = service
        .applications()
        .accept_placement(&application.id)
        .expect_err("still pending");
    assert_eq!(err.kind(), ErrorKind::State);
    assert_eq!(
        service.registry().internship(&internship).expect("posting").slots_filled,
        0
    );
}

#[test]
fn unknown_references_are_not_found() {
    let mut service = service();
    let student = add_student(&mut service, "s1", 2, "Computer Science");
    let err = service
        .applications()
        .apply(&student, &"int-999999".into())
        .expect_err("no such posting");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = service
        .applications()
        .apply(&user(STAFF), &"int-999999".into())
        .expect_err("staff cannot apply");
    assert_eq!(err.kind(), ErrorKind::Permission);
}
