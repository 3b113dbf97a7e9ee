//! CSV persistence for the whole entity graph.
//!
//! Each entity kind lives in its own file inside a data directory. Loading resolves every
//! cross reference before handing the registry to the lifecycle managers, so a dangling
//! owner, student, internship, or application id fails the load instead of leaving an
//! orphan behind. Internship rows must also satisfy the slot, date, and visibility rules
//! the lifecycle managers maintain.
//!
//! Internship and application rows are written in creation order so that the
//! back-reference lists rebuilt on load match the ones that were saved.

mod rows;

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{
    Account, Application, ApplicationId, CareerCenterStaff, CompanyRepresentative, Internship,
    InternshipId, InternshipStatus, Student, User, UserId, WithdrawalId, WithdrawalRequest,
};
use super::registry::PlacementRegistry;
use rows::{
    ApplicationRow, InternshipRow, RepresentativeRow, StaffRow, StudentRow, WithdrawalRow,
    STAFF_ROLE_LABEL,
};

pub const STUDENTS_FILE: &str = "students.csv";
pub const STAFF_FILE: &str = "staff.csv";
pub const REPRESENTATIVES_FILE: &str = "company_representatives.csv";
pub const INTERNSHIPS_FILE: &str = "internships.csv";
pub const APPLICATIONS_FILE: &str = "applications.csv";
pub const WITHDRAWALS_FILE: &str = "withdrawal_requests.csv";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid CSV data in {table}: {source}")]
    Csv {
        table: &'static str,
        source: csv::Error,
    },
    #[error("{table} references unknown {kind} {id}")]
    DanglingReference {
        table: &'static str,
        kind: &'static str,
        id: String,
    },
    #[error("duplicate id {id} in {table}")]
    DuplicateId { table: &'static str, id: String },
    #[error("invalid record {id} in {table}: {reason}")]
    InvalidRecord {
        table: &'static str,
        id: String,
        reason: &'static str,
    },
}

/// Flat, serialization-ready copy of every entity.
#[derive(Debug, Clone, Default)]
pub struct PlacementSnapshot {
    students: Vec<StudentRow>,
    staff: Vec<StaffRow>,
    representatives: Vec<RepresentativeRow>,
    internships: Vec<InternshipRow>,
    applications: Vec<ApplicationRow>,
    withdrawals: Vec<WithdrawalRow>,
}

impl PlacementSnapshot {
    pub fn from_registry(registry: &PlacementRegistry) -> Self {
        let mut snapshot = Self::default();

        for user in registry.users() {
            match user {
                User::Student(student) => snapshot.students.push(StudentRow {
                    id: student.account.id.0.clone(),
                    name: student.account.name.clone(),
                    password: student.account.password.clone(),
                    major: student.major.clone(),
                    year_of_study: student.year_of_study,
                }),
                User::Staff(staff) => snapshot.staff.push(StaffRow {
                    id: staff.account.id.0.clone(),
                    name: staff.account.name.clone(),
                    password: staff.account.password.clone(),
                    role: STAFF_ROLE_LABEL.to_string(),
                    department: staff.department.clone(),
                }),
                User::Representative(rep) => snapshot.representatives.push(RepresentativeRow {
                    id: rep.account.id.0.clone(),
                    name: rep.account.name.clone(),
                    password: rep.account.password.clone(),
                    company_name: rep.company_name.clone(),
                    department: rep.department.clone(),
                    position: rep.position.clone(),
                    approved: rep.approved,
                }),
            }
        }

        snapshot.internships = registry
            .internships_by_creation()
            .map(|internship| InternshipRow {
                id: internship.id.0.clone(),
                title: internship.title.clone(),
                description: internship.description.clone(),
                level: internship.level,
                preferred_major: internship.preferred_major.clone(),
                opening_date: internship.opening_date,
                closing_date: internship.closing_date,
                status: internship.status,
                company_name: internship.company_name.clone(),
                owner: internship.owner.0.clone(),
                slots: internship.slots,
                slots_filled: internship.slots_filled,
                visible: internship.visible,
            })
            .collect();

        snapshot.applications = registry
            .applications_by_creation()
            .map(|application| ApplicationRow {
                id: application.id.0.clone(),
                student: application.student.0.clone(),
                internship: application.internship.0.clone(),
                status: application.status,
                submitted_on: application.submitted_on,
            })
            .collect();

        snapshot.withdrawals = registry
            .withdrawals()
            .map(|request| WithdrawalRow {
                id: request.id.0.clone(),
                application: request.application.0.clone(),
                requested_on: request.requested_on,
                status: request.status,
            })
            .collect();

        snapshot
    }

    /// Rebuild the registry, resolving references and rebuilding back-reference lists in
    /// file order.
    pub fn into_registry(self) -> Result<PlacementRegistry, StorageError> {
        let mut registry = PlacementRegistry::new();

        for row in self.students {
            let account = Account::new(row.id.as_str(), row.name, row.password);
            let student = Student::new(account, row.year_of_study, row.major);
            insert_user(&mut registry, User::Student(student), STUDENTS_FILE)?;
        }
        for row in self.staff {
            let account = Account::new(row.id.as_str(), row.name, row.password);
            let staff = CareerCenterStaff::new(account, row.department);
            insert_user(&mut registry, User::Staff(staff), STAFF_FILE)?;
        }
        for row in self.representatives {
            let account = Account::new(row.id.as_str(), row.name, row.password);
            let mut rep =
                CompanyRepresentative::new(account, row.company_name, row.department, row.position);
            rep.approved = row.approved;
            insert_user(&mut registry, User::Representative(rep), REPRESENTATIVES_FILE)?;
        }

        for row in self.internships {
            let id = InternshipId(row.id.clone());
            if registry.internship(&id).is_ok() {
                return Err(duplicate(INTERNSHIPS_FILE, id.0));
            }
            if let Some(reason) = internship_violation(&row) {
                return Err(StorageError::InvalidRecord {
                    table: INTERNSHIPS_FILE,
                    id: id.0,
                    reason,
                });
            }
            let owner = UserId(row.owner);
            registry
                .representative_mut(&owner)
                .map_err(|_| dangling(INTERNSHIPS_FILE, "representative", &owner.0))?
                .postings
                .push(id.clone());
            registry.insert_internship(Internship {
                id,
                title: row.title,
                description: row.description,
                level: row.level,
                preferred_major: row.preferred_major,
                opening_date: row.opening_date,
                closing_date: row.closing_date,
                status: row.status,
                company_name: row.company_name,
                owner,
                slots: row.slots,
                slots_filled: row.slots_filled,
                visible: row.visible,
                applications: Vec::new(),
            });
        }

        for row in self.applications {
            let id = ApplicationId(row.id);
            if registry.application(&id).is_ok() {
                return Err(duplicate(APPLICATIONS_FILE, id.0));
            }
            let student = UserId(row.student);
            let internship = InternshipId(row.internship);
            if registry.student(&student).is_err() {
                return Err(dangling(APPLICATIONS_FILE, "student", &student.0));
            }
            if registry.internship(&internship).is_err() {
                return Err(dangling(APPLICATIONS_FILE, "internship", &internship.0));
            }

            registry
                .student_mut(&student)
                .map_err(|_| dangling(APPLICATIONS_FILE, "student", &student.0))?
                .applications
                .push(id.clone());
            registry
                .internship_mut(&internship)
                .map_err(|_| dangling(APPLICATIONS_FILE, "internship", &internship.0))?
                .applications
                .push(id.clone());
            registry.insert_application(Application {
                id,
                student,
                internship,
                status: row.status,
                submitted_on: row.submitted_on,
            });
        }

        for row in self.withdrawals {
            let id = WithdrawalId(row.id);
            if registry.withdrawal(&id).is_ok() {
                return Err(duplicate(WITHDRAWALS_FILE, id.0));
            }
            let application = ApplicationId(row.application);
            if registry.application(&application).is_err() {
                return Err(dangling(WITHDRAWALS_FILE, "application", &application.0));
            }
            registry.insert_withdrawal(WithdrawalRequest {
                id,
                application,
                requested_on: row.requested_on,
                status: row.status,
            });
        }

        Ok(registry)
    }
}

fn insert_user(
    registry: &mut PlacementRegistry,
    user: User,
    table: &'static str,
) -> Result<(), StorageError> {
    let id = user.id().0.clone();
    registry
        .insert_user(user)
        .map_err(|_| duplicate(table, id))
}

/// The slot ceiling is a configurable policy, so only the fixed floor is checked here.
fn internship_violation(row: &InternshipRow) -> Option<&'static str> {
    if row.slots == 0 {
        Some("slots must be at least 1")
    } else if row.slots_filled > row.slots {
        Some("filled slots exceed total slots")
    } else if row.closing_date < row.opening_date {
        Some("closing date precedes opening date")
    } else if row.visible && row.status != InternshipStatus::Approved {
        Some("only approved internships can be visible")
    } else {
        None
    }
}

fn duplicate(table: &'static str, id: String) -> StorageError {
    StorageError::DuplicateId { table, id }
}

fn dangling(table: &'static str, kind: &'static str, id: &str) -> StorageError {
    StorageError::DanglingReference {
        table,
        kind,
        id: id.to_string(),
    }
}

/// Data directory holding one CSV file per entity kind.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Missing files load as empty tables.
    pub fn load(&self) -> Result<PlacementRegistry, StorageError> {
        let snapshot = PlacementSnapshot {
            students: self.read_table(STUDENTS_FILE)?,
            staff: self.read_table(STAFF_FILE)?,
            representatives: self.read_table(REPRESENTATIVES_FILE)?,
            internships: self.read_table(INTERNSHIPS_FILE)?,
            applications: self.read_table(APPLICATIONS_FILE)?,
            withdrawals: self.read_table(WITHDRAWALS_FILE)?,
        };
        let registry = snapshot.into_registry()?;

        info!(dir = %self.dir.display(), "placement data loaded");
        Ok(registry)
    }

    pub fn save(&self, registry: &PlacementRegistry) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let snapshot = PlacementSnapshot::from_registry(registry);
        self.write_table(STUDENTS_FILE, &StudentRow::HEADERS, &snapshot.students)?;
        self.write_table(STAFF_FILE, &StaffRow::HEADERS, &snapshot.staff)?;
        self.write_table(
            REPRESENTATIVES_FILE,
            &RepresentativeRow::HEADERS,
            &snapshot.representatives,
        )?;
        self.write_table(
            INTERNSHIPS_FILE,
            &InternshipRow::HEADERS,
            &snapshot.internships,
        )?;
        self.write_table(
            APPLICATIONS_FILE,
            &ApplicationRow::HEADERS,
            &snapshot.applications,
        )?;
        self.write_table(
            WITHDRAWALS_FILE,
            &WithdrawalRow::HEADERS,
            &snapshot.withdrawals,
        )?;

        info!(dir = %self.dir.display(), "placement data saved");
        Ok(())
    }

    fn read_table<T: DeserializeOwned>(&self, table: &'static str) -> Result<Vec<T>, StorageError> {
        let path = self.dir.join(table);
        match File::open(&path) {
            Ok(file) => read_rows(file, table),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "table missing, treating as empty");
                Ok(Vec::new())
            }
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn write_table<T: Serialize>(
        &self,
        table: &'static str,
        headers: &[&str],
        rows: &[T],
    ) -> Result<(), StorageError> {
        let path = self.dir.join(table);
        let file = File::create(&path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        write_rows(file, table, headers, rows)
    }
}

pub(crate) fn read_rows<R: Read, T: DeserializeOwned>(
    reader: R,
    table: &'static str,
) -> Result<Vec<T>, StorageError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<T>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| StorageError::Csv { table, source })
}

/// Headers are written explicitly so empty tables still carry them.
pub(crate) fn write_rows<W: Write, T: Serialize>(
    writer: W,
    table: &'static str,
    headers: &[&str],
    rows: &[T],
) -> Result<(), StorageError> {
    let csv_error = |source: csv::Error| StorageError::Csv { table, source };
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(headers).map_err(csv_error)?;
    for row in rows {
        csv_writer.serialize(row).map_err(csv_error)?;
    }
    csv_writer
        .flush()
        .map_err(|err| csv_error(csv::Error::from(err)))
}
