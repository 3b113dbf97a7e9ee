use serde::Serialize;
use tracing::info;

use super::domain::{
    Account, CareerCenterStaff, CompanyRepresentative, PlacementError, Role, Student, User,
    UserId,
};
use super::registry::PlacementRegistry;

/// Result of checking a credential pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "role", rename_all = "snake_case")]
pub enum LoginOutcome {
    UnknownUser,
    WrongPassword,
    /// Correct credentials for a representative staff has not authorized yet.
    PendingApproval,
    Authenticated(Role),
}

/// Registration, authorization, and credential checks for every role.
pub struct Accounts<'a> {
    registry: &'a mut PlacementRegistry,
}

impl<'a> Accounts<'a> {
    pub fn new(registry: &'a mut PlacementRegistry) -> Self {
        Self { registry }
    }

    pub fn register_student(
        &mut self,
        account: Account,
        year_of_study: u8,
        major: impl Into<String>,
    ) -> Result<(), PlacementError> {
        let id = account.id.clone();
        self.registry
            .insert_user(User::Student(Student::new(account, year_of_study, major)))?;
        info!(user = %id, "student registered");
        Ok(())
    }

    pub fn register_staff(
        &mut self,
        account: Account,
        department: impl Into<String>,
    ) -> Result<(), PlacementError> {
        let id = account.id.clone();
        self.registry
            .insert_user(User::Staff(CareerCenterStaff::new(account, department)))?;
        info!(user = %id, "staff registered");
        Ok(())
    }

    /// Representatives start unapproved and cannot post until staff authorize them.
    pub fn register_representative(
        &mut self,
        account: Account,
        company_name: impl Into<String>,
        department: impl Into<String>,
        position: impl Into<String>,
    ) -> Result<(), PlacementError> {
        let id = account.id.clone();
        self.registry
            .insert_user(User::Representative(CompanyRepresentative::new(
                account,
                company_name,
                department,
                position,
            )))?;
        info!(user = %id, "representative registered, awaiting authorization");
        Ok(())
    }

    pub fn authorize_representative(
        &mut self,
        id: &UserId,
        approve: bool,
    ) -> Result<(), PlacementError> {
        let rep = self.registry.representative_mut(id)?;
        rep.approved = approve;
        info!(user = %id, approved = approve, "representative authorization updated");
        Ok(())
    }

    pub fn pending_representatives(&self) -> Vec<&CompanyRepresentative> {
        self.registry
            .representatives()
            .filter(|rep| !rep.approved)
            .collect()
    }

    pub fn login(&self, id: &UserId, password: &str) -> LoginOutcome {
        let Ok(user) = self.registry.user(id) else {
            return LoginOutcome::UnknownUser;
        };
        if !user.account().verify(password) {
            return LoginOutcome::WrongPassword;
        }
        match user {
            User::Representative(rep) if !rep.approved => LoginOutcome::PendingApproval,
            other => LoginOutcome::Authenticated(other.role()),
        }
    }

    pub fn change_password(
        &mut self,
        id: &UserId,
        new_password: impl Into<String>,
    ) -> Result<(), PlacementError> {
        self.registry.user_mut(id)?.account_mut().password = new_password.into();
        info!(user = %id, "password changed");
        Ok(())
    }
}
