use std::collections::BTreeMap;

use super::domain::{
    Application, ApplicationId, CompanyRepresentative, Internship, InternshipId, PlacementError,
    Role, Student, User, UserId, WithdrawalId, WithdrawalRequest,
};

/// Sequential identifier generator that can resume after previously loaded ids.
#[derive(Debug, Clone)]
pub(crate) struct IdSequence {
    prefix: &'static str,
    next: u64,
}

impl IdSequence {
    pub(crate) const fn new(prefix: &'static str) -> Self {
        Self { prefix, next: 1 }
    }

    pub(crate) fn issue(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        format!("{}-{id:06}", self.prefix)
    }

    /// Bump the counter past the numeric suffix of an id seen elsewhere.
    pub(crate) fn observe(&mut self, id: &str) {
        if let Some(value) = numeric_suffix(id) {
            if value >= self.next {
                self.next = value.saturating_add(1);
            }
        }
    }
}

fn numeric_suffix(id: &str) -> Option<u64> {
    let digits = id
        .bytes()
        .rev()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    id[id.len() - digits..].parse().ok()
}

/// Arena owning every entity; cross references between entities are ids into these maps.
#[derive(Debug, Clone)]
pub struct PlacementRegistry {
    users: BTreeMap<UserId, User>,
    internships: BTreeMap<InternshipId, Internship>,
    applications: BTreeMap<ApplicationId, Application>,
    withdrawals: BTreeMap<WithdrawalId, WithdrawalRequest>,
    /// Creation order. Back-reference lists follow it, so storage writes rows in this order.
    internship_order: Vec<InternshipId>,
    application_order: Vec<ApplicationId>,
    internship_ids: IdSequence,
    application_ids: IdSequence,
    withdrawal_ids: IdSequence,
}

impl Default for PlacementRegistry {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            internships: BTreeMap::new(),
            applications: BTreeMap::new(),
            withdrawals: BTreeMap::new(),
            internship_order: Vec::new(),
            application_order: Vec::new(),
            internship_ids: IdSequence::new("int"),
            application_ids: IdSequence::new("app"),
            withdrawal_ids: IdSequence::new("wdr"),
        }
    }
}

impl PlacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.users.values().filter_map(|user| match user {
            User::Student(student) => Some(student),
            _ => None,
        })
    }

    pub fn representatives(&self) -> impl Iterator<Item = &CompanyRepresentative> {
        self.users.values().filter_map(|user| match user {
            User::Representative(rep) => Some(rep),
            _ => None,
        })
    }

    pub fn internships(&self) -> impl Iterator<Item = &Internship> {
        self.internships.values()
    }

    pub fn applications(&self) -> impl Iterator<Item = &Application> {
        self.applications.values()
    }

    pub fn withdrawals(&self) -> impl Iterator<Item = &WithdrawalRequest> {
        self.withdrawals.values()
    }

    pub(crate) fn internships_by_creation(&self) -> impl Iterator<Item = &Internship> {
        self.internship_order
            .iter()
            .filter_map(|id| self.internships.get(id))
    }

    pub(crate) fn applications_by_creation(&self) -> impl Iterator<Item = &Application> {
        self.application_order
            .iter()
            .filter_map(|id| self.applications.get(id))
    }

    pub fn user(&self, id: &UserId) -> Result<&User, PlacementError> {
        self.users
            .get(id)
            .ok_or_else(|| PlacementError::UnknownUser(id.clone()))
    }

    pub fn student(&self, id: &UserId) -> Result<&Student, PlacementError> {
        match self.user(id)? {
            User::Student(student) => Ok(student),
            other => Err(wrong_role(other, Role::Student)),
        }
    }

    pub fn representative(&self, id: &UserId) -> Result<&CompanyRepresentative, PlacementError> {
        match self.user(id)? {
            User::Representative(rep) => Ok(rep),
            other => Err(wrong_role(other, Role::CompanyRepresentative)),
        }
    }

    pub fn internship(&self, id: &InternshipId) -> Result<&Internship, PlacementError> {
        self.internships
            .get(id)
            .ok_or_else(|| PlacementError::UnknownInternship(id.clone()))
    }

    pub fn application(&self, id: &ApplicationId) -> Result<&Application, PlacementError> {
        self.applications
            .get(id)
            .ok_or_else(|| PlacementError::UnknownApplication(id.clone()))
    }

    pub fn withdrawal(&self, id: &WithdrawalId) -> Result<&WithdrawalRequest, PlacementError> {
        self.withdrawals
            .get(id)
            .ok_or_else(|| PlacementError::UnknownWithdrawal(id.clone()))
    }

    /// Applications of a student in submission order.
    pub fn applications_of(&self, student: &Student) -> Vec<&Application> {
        student
            .applications
            .iter()
            .filter_map(|id| self.applications.get(id))
            .collect()
    }

    /// Applications received by a posting in submission order.
    pub fn applications_to(&self, internship: &Internship) -> Vec<&Application> {
        internship
            .applications
            .iter()
            .filter_map(|id| self.applications.get(id))
            .collect()
    }

    pub(crate) fn user_mut(&mut self, id: &UserId) -> Result<&mut User, PlacementError> {
        self.users
            .get_mut(id)
            .ok_or_else(|| PlacementError::UnknownUser(id.clone()))
    }

    pub(crate) fn student_mut(&mut self, id: &UserId) -> Result<&mut Student, PlacementError> {
        match self.user_mut(id)? {
            User::Student(student) => Ok(student),
            other => Err(wrong_role(other, Role::Student)),
        }
    }

    pub(crate) fn representative_mut(
        &mut self,
        id: &UserId,
    ) -> Result<&mut CompanyRepresentative, PlacementError> {
        match self.user_mut(id)? {
            User::Representative(rep) => Ok(rep),
            other => Err(wrong_role(other, Role::CompanyRepresentative)),
        }
    }

    pub(crate) fn internship_mut(
        &mut self,
        id: &InternshipId,
    ) -> Result<&mut Internship, PlacementError> {
        self.internships
            .get_mut(id)
            .ok_or_else(|| PlacementError::UnknownInternship(id.clone()))
    }

    pub(crate) fn application_mut(
        &mut self,
        id: &ApplicationId,
    ) -> Result<&mut Application, PlacementError> {
        self.applications
            .get_mut(id)
            .ok_or_else(|| PlacementError::UnknownApplication(id.clone()))
    }

    pub(crate) fn withdrawal_mut(
        &mut self,
        id: &WithdrawalId,
    ) -> Result<&mut WithdrawalRequest, PlacementError> {
        self.withdrawals
            .get_mut(id)
            .ok_or_else(|| PlacementError::UnknownWithdrawal(id.clone()))
    }

    /// Ids are unique ignoring ASCII case.
    pub(crate) fn insert_user(&mut self, user: User) -> Result<(), PlacementError> {
        let taken = self
            .users
            .keys()
            .any(|id| id.as_str().eq_ignore_ascii_case(user.id().as_str()));
        if taken {
            return Err(PlacementError::DuplicateUser(user.id().clone()));
        }
        self.users.insert(user.id().clone(), user);
        Ok(())
    }

    pub(crate) fn insert_internship(&mut self, internship: Internship) {
        self.internship_ids.observe(internship.id.as_str());
        let id = internship.id.clone();
        if self.internships.insert(id.clone(), internship).is_none() {
            self.internship_order.push(id);
        }
    }

    pub(crate) fn insert_application(&mut self, application: Application) {
        self.application_ids.observe(application.id.as_str());
        let id = application.id.clone();
        if self.applications.insert(id.clone(), application).is_none() {
            self.application_order.push(id);
        }
    }

    pub(crate) fn insert_withdrawal(&mut self, request: WithdrawalRequest) {
        self.withdrawal_ids.observe(request.id.as_str());
        self.withdrawals.insert(request.id.clone(), request);
    }

    pub(crate) fn take_internship(&mut self, id: &InternshipId) -> Option<Internship> {
        let internship = self.internships.remove(id)?;
        self.internship_order.retain(|existing| existing != id);
        Some(internship)
    }

    pub(crate) fn take_application(&mut self, id: &ApplicationId) -> Option<Application> {
        let application = self.applications.remove(id)?;
        self.application_order.retain(|existing| existing != id);
        Some(application)
    }

    /// Drop every withdrawal request filed against the application, returning how many went.
    pub(crate) fn purge_withdrawals_for(&mut self, application: &ApplicationId) -> usize {
        let before = self.withdrawals.len();
        self.withdrawals
            .retain(|_, request| &request.application != application);
        before - self.withdrawals.len()
    }

    pub(crate) fn next_internship_id(&mut self) -> InternshipId {
        loop {
            let id = InternshipId(self.internship_ids.issue());
            if !self.internships.contains_key(&id) {
                return id;
            }
        }
    }

    pub(crate) fn next_application_id(&mut self) -> ApplicationId {
        loop {
            let id = ApplicationId(self.application_ids.issue());
            if !self.applications.contains_key(&id) {
                return id;
            }
        }
    }

    pub(crate) fn next_withdrawal_id(&mut self) -> WithdrawalId {
        loop {
            let id = WithdrawalId(self.withdrawal_ids.issue());
            if !self.withdrawals.contains_key(&id) {
                return id;
            }
        }
    }
}

fn wrong_role(user: &User, expected: Role) -> PlacementError {
    PlacementError::WrongRole {
        user: user.id().clone(),
        expected,
        actual: user.role(),
    }
}
