use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Login identifier shared by every role.
    UserId
);
string_id!(
    /// Identifier of an internship posting.
    InternshipId
);
string_id!(
    /// Identifier of a student's application to a posting.
    ApplicationId
);
string_id!(
    /// Identifier of a withdrawal request.
    WithdrawalId
);

/// Experience level advertised on a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InternshipLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl InternshipLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::Basic, Self::Intermediate, Self::Advanced]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Intermediate => "INTERMEDIATE",
            Self::Advanced => "ADVANCED",
        }
    }
}

/// Approval state of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InternshipStatus {
    Pending,
    Approved,
    Rejected,
    Filled,
}

impl InternshipStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Pending, Self::Approved, Self::Rejected, Self::Filled]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Filled => "FILLED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Accepted,
    Unsuccessful,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Accepted => "ACCEPTED",
            Self::Unsuccessful => "UNSUCCESSFUL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

impl WithdrawalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    CompanyRepresentative,
    CareerCenterStaff,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::CompanyRepresentative => "company representative",
            Self::CareerCenterStaff => "career center staff",
        }
    }
}

macro_rules! label_display {
    ($($name:ident),+) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

label_display!(
    InternshipLevel,
    InternshipStatus,
    ApplicationStatus,
    WithdrawalStatus,
    Role
);

/// Raised when free text does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for InternshipLevel {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "internship level",
                value: value.to_string(),
            })
    }
}

impl FromStr for InternshipStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "internship status",
                value: value.to_string(),
            })
    }
}

/// Identity and credential shared by all roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub name: String,
    pub password: String,
}

impl Account {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            password: password.into(),
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        self.password == password
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub account: Account,
    pub year_of_study: u8,
    pub major: String,
    /// Applications in the order they were submitted.
    pub applications: Vec<ApplicationId>,
}

impl Student {
    pub fn new(account: Account, year_of_study: u8, major: impl Into<String>) -> Self {
        Self {
            account,
            year_of_study,
            major: major.into(),
            applications: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRepresentative {
    pub account: Account,
    pub company_name: String,
    pub department: String,
    pub position: String,
    pub approved: bool,
    pub postings: Vec<InternshipId>,
}

impl CompanyRepresentative {
    /// New representatives wait for career center authorization.
    pub fn new(
        account: Account,
        company_name: impl Into<String>,
        department: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            account,
            company_name: company_name.into(),
            department: department.into(),
            position: position.into(),
            approved: false,
            postings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerCenterStaff {
    pub account: Account,
    pub department: String,
}

impl CareerCenterStaff {
    pub fn new(account: Account, department: impl Into<String>) -> Self {
        Self {
            account,
            department: department.into(),
        }
    }
}

/// Every account in the system, tagged by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum User {
    Student(Student),
    Representative(CompanyRepresentative),
    Staff(CareerCenterStaff),
}

impl User {
    pub fn account(&self) -> &Account {
        match self {
            User::Student(student) => &student.account,
            User::Representative(rep) => &rep.account,
            User::Staff(staff) => &staff.account,
        }
    }

    pub fn account_mut(&mut self) -> &mut Account {
        match self {
            User::Student(student) => &mut student.account,
            User::Representative(rep) => &mut rep.account,
            User::Staff(staff) => &mut staff.account,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.account().id
    }

    pub const fn role(&self) -> Role {
        match self {
            User::Student(_) => Role::Student,
            User::Representative(_) => Role::CompanyRepresentative,
            User::Staff(_) => Role::CareerCenterStaff,
        }
    }
}

/// Fields a representative supplies when posting a new internship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipDraft {
    pub title: String,
    pub description: String,
    pub level: InternshipLevel,
    pub preferred_major: String,
    pub opening_date: NaiveDate,
    pub closing_date: NaiveDate,
    pub slots: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Internship {
    pub id: InternshipId,
    pub title: String,
    pub description: String,
    pub level: InternshipLevel,
    pub preferred_major: String,
    pub opening_date: NaiveDate,
    pub closing_date: NaiveDate,
    pub status: InternshipStatus,
    pub company_name: String,
    pub owner: UserId,
    pub slots: u32,
    pub slots_filled: u32,
    pub visible: bool,
    pub applications: Vec<ApplicationId>,
}

impl Internship {
    pub fn has_open_slot(&self) -> bool {
        self.slots_filled < self.slots
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub student: UserId,
    pub internship: InternshipId,
    pub status: ApplicationStatus,
    pub submitted_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub id: WithdrawalId,
    pub application: ApplicationId,
    pub requested_on: NaiveDate,
    pub status: WithdrawalStatus,
}

/// Coarse classification callers use to decide how to present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Capacity,
    Permission,
    NotFound,
    State,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Capacity => "capacity",
            ErrorKind::Permission => "permission",
            ErrorKind::NotFound => "not found",
            ErrorKind::State => "state",
        })
    }
}

/// Recoverable failure raised by the lifecycle managers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("slots must be between 1 and {max}, got {slots}")]
    InvalidSlots { slots: u32, max: u32 },
    #[error("closing date {closing} is before opening date {opening}")]
    InvalidDateWindow {
        opening: NaiveDate,
        closing: NaiveDate,
    },
    #[error("student {student} has already applied to internship {internship}")]
    AlreadyApplied {
        student: UserId,
        internship: InternshipId,
    },
    #[error("user id {0} is already taken")]
    DuplicateUser(UserId),
    #[error("representative {representative} already has {limit} postings")]
    PostingLimitReached { representative: UserId, limit: usize },
    #[error("student {student} already has {limit} pending applications")]
    PendingLimitReached { student: UserId, limit: usize },
    #[error("internship {internship} has no open slots ({filled}/{slots} filled)")]
    SlotsFull {
        internship: InternshipId,
        filled: u32,
        slots: u32,
    },
    #[error("representative {0} has not been authorized by career center staff")]
    RepresentativeNotApproved(UserId),
    #[error("representative {representative} does not own internship {internship}")]
    NotOwner {
        representative: UserId,
        internship: InternshipId,
    },
    #[error("user {user} is a {actual}, expected a {expected}")]
    WrongRole {
        user: UserId,
        expected: Role,
        actual: Role,
    },
    #[error("unknown user {0}")]
    UnknownUser(UserId),
    #[error("unknown internship {0}")]
    UnknownInternship(InternshipId),
    #[error("unknown application {0}")]
    UnknownApplication(ApplicationId),
    #[error("unknown withdrawal request {0}")]
    UnknownWithdrawal(WithdrawalId),
    #[error("cannot {action} internship {internship} while it is {status}")]
    InternshipTransition {
        internship: InternshipId,
        status: InternshipStatus,
        action: &'static str,
    },
    #[error("cannot {action} application {application} while it is {status}")]
    ApplicationTransition {
        application: ApplicationId,
        status: ApplicationStatus,
        action: &'static str,
    },
    #[error("withdrawal request {request} was already {status}")]
    WithdrawalResolved {
        request: WithdrawalId,
        status: WithdrawalStatus,
    },
}

impl PlacementError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            PlacementError::InvalidSlots { .. }
            | PlacementError::InvalidDateWindow { .. }
            | PlacementError::AlreadyApplied { .. }
            | PlacementError::DuplicateUser(_) => ErrorKind::Validation,
            PlacementError::PostingLimitReached { .. }
            | PlacementError::PendingLimitReached { .. }
            | PlacementError::SlotsFull { .. } => ErrorKind::Capacity,
            PlacementError::RepresentativeNotApproved(_)
            | PlacementError::NotOwner { .. }
            | PlacementError::WrongRole { .. } => ErrorKind::Permission,
            PlacementError::UnknownUser(_)
            | PlacementError::UnknownInternship(_)
            | PlacementError::UnknownApplication(_)
            | PlacementError::UnknownWithdrawal(_) => ErrorKind::NotFound,
            PlacementError::InternshipTransition { .. }
            | PlacementError::ApplicationTransition { .. }
            | PlacementError::WithdrawalResolved { .. } => ErrorKind::State,
        }
    }
}
