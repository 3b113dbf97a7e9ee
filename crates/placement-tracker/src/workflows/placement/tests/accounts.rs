use super::common::*;
use crate::workflows::placement::domain::{Account, ErrorKind, Role};
use crate::workflows::placement::LoginOutcome;

#[test]
fn login_reports_each_outcome() {
    let mut service = service();
    add_student(&mut service, "s1", 2, "Computer Science");
    let accounts = service.accounts();

    assert_eq!(
        accounts.login(&user("s1"), "password"),
        LoginOutcome::Authenticated(Role::Student)
    );
    assert_eq!(
        accounts.login(&user(STAFF), "password"),
        LoginOutcome::Authenticated(Role::CareerCenterStaff)
    );
    assert_eq!(accounts.login(&user("s1"), "nope"), LoginOutcome::WrongPassword);
    assert_eq!(accounts.login(&user("ghost"), "password"), LoginOutcome::UnknownUser);
    assert_eq!(
        accounts.login(&user(PENDING_REP), "password"),
        LoginOutcome::PendingApproval
    );
}

#[test]
fn user_ids_are_unique_ignoring_case() {
    let mut service = service();
    add_student(&mut service, "s1", 2, "Computer Science");
    let err = service
        .accounts()
        .register_staff(Account::new("S1", "Shadow", "password"), "Career Office")
        .expect_err("id taken");
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn authorization_moves_representative_out_of_pending_queue() {
    let mut service = service();
    assert_eq!(service.accounts().pending_representatives().len(), 1);

    service
        .accounts()
        .authorize_representative(&user(PENDING_REP), true)
        .expect("authorized");
    assert!(service.accounts().pending_representatives().is_empty());
    assert_eq!(
        service.accounts().login(&user(PENDING_REP), "password"),
        LoginOutcome::Authenticated(Role::CompanyRepresentative)
    );

    let err = service
        .accounts()
        .authorize_representative(&user("s-none"), true)
        .expect_err("unknown user");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn changed_password_replaces_the_old_one() {
    let mut service = service();
    service
        .accounts()
        .change_password(&user(STAFF), "hunter2")
        .expect("changed");
    let accounts = service.accounts();
    assert_eq!(accounts.login(&user(STAFF), "password"), LoginOutcome::WrongPassword);
    assert_eq!(
        accounts.login(&user(STAFF), "hunter2"),
        LoginOutcome::Authenticated(Role::CareerCenterStaff)
    );
}
