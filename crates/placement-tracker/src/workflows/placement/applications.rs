use serde::Serialize;
use tracing::{debug, info};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, InternshipId, InternshipStatus,
    PlacementError, Student, UserId,
};
use super::policy::PlacementPolicy;
use super::registry::PlacementRegistry;
use super::service::Clock;

/// Result of a student accepting an offered placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptanceOutcome {
    pub application: ApplicationId,
    pub internship: InternshipId,
    pub internship_filled: bool,
    /// Pending applications of the same student closed by the acceptance.
    pub cancelled: Vec<ApplicationId>,
}

/// Application lifecycle: submission caps, review, and placement acceptance.
pub struct ApplicationLifecycle<'a> {
    registry: &'a mut PlacementRegistry,
    policy: &'a PlacementPolicy,
    clock: Clock,
}

impl<'a> ApplicationLifecycle<'a> {
    pub fn new(
        registry: &'a mut PlacementRegistry,
        policy: &'a PlacementPolicy,
        clock: Clock,
    ) -> Self {
        Self {
            registry,
            policy,
            clock,
        }
    }

    pub fn apply(
        &mut self,
        student: &UserId,
        internship: &InternshipId,
    ) -> Result<Application, PlacementError> {
        let record = self.registry.student(student)?;
        self.registry.internship(internship)?;

        if pending_count(&*self.registry, record) >= self.policy.max_pending_applications {
            return Err(PlacementError::PendingLimitReached {
                student: student.clone(),
                limit: self.policy.max_pending_applications,
            });
        }
        let already_applied = self
            .registry
            .applications_of(record)
            .iter()
            .any(|existing| &existing.internship == internship);
        if already_applied {
            return Err(PlacementError::AlreadyApplied {
                student: student.clone(),
                internship: internship.clone(),
            });
        }

        let id = self.registry.next_application_id();
        let application = Application {
            id: id.clone(),
            student: student.clone(),
            internship: internship.clone(),
            status: ApplicationStatus::Pending,
            submitted_on: self.clock.today(),
        };

        self.registry
            .student_mut(student)?
            .applications
            .push(id.clone());
        self.registry
            .internship_mut(internship)?
            .applications
            .push(id.clone());
        self.registry.insert_application(application.clone());

        info!(application = %id, %student, %internship, "application submitted");
        Ok(application)
    }

    /// Offer the placement. A slot is only consumed once the student accepts.
    pub fn approve(&mut self, id: &ApplicationId) -> Result<(), PlacementError> {
        let application = self.registry.application(id)?;
        require_status(application, ApplicationStatus::Pending, "approve")?;

        let internship = self.registry.internship(&application.internship)?;
        if !internship.has_open_slot() {
            return Err(PlacementError::SlotsFull {
                internship: internship.id.clone(),
                filled: internship.slots_filled,
                slots: internship.slots,
            });
        }

        self.registry.application_mut(id)?.status = ApplicationStatus::Approved;
        info!(application = %id, "application approved");
        Ok(())
    }

    pub fn reject(&mut self, id: &ApplicationId) -> Result<(), PlacementError> {
        let application = self.registry.application_mut(id)?;
        application.status = ApplicationStatus::Unsuccessful;

        info!(application = %id, "application rejected");
        Ok(())
    }

    /// Accept an approved offer, consuming a slot and closing the student's other pending bids.
    pub fn accept_placement(
        &mut self,
        id: &ApplicationId,
    ) -> Result<AcceptanceOutcome, PlacementError> {
        let application = self.registry.application(id)?;
        require_status(application, ApplicationStatus::Approved, "accept")?;
        let internship_id = application.internship.clone();
        let student_id = application.student.clone();

        let internship = self.registry.internship(&internship_id)?;
        if !internship.has_open_slot() {
            return Err(PlacementError::SlotsFull {
                internship: internship_id,
                filled: internship.slots_filled,
                slots: internship.slots,
            });
        }
        let siblings: Vec<ApplicationId> = self
            .registry
            .student(&student_id)?
            .applications
            .iter()
            .filter(|other| *other != id)
            .cloned()
            .collect();

        let internship = self.registry.internship_mut(&internship_id)?;
        internship.slots_filled += 1;
        let internship_filled = internship.slots_filled >= internship.slots;
        if internship_filled {
            internship.status = InternshipStatus::Filled;
            internship.visible = false;
        }
        self.registry.application_mut(id)?.status = ApplicationStatus::Accepted;

        let mut cancelled = Vec::new();
        for sibling in siblings {
            let other = self.registry.application_mut(&sibling)?;
            if other.status == ApplicationStatus::Pending {
                other.status = ApplicationStatus::Unsuccessful;
                debug!(application = %sibling, accepted = %id, "pending application closed by acceptance");
                cancelled.push(sibling);
            }
        }

        info!(
            application = %id,
            internship = %internship_id,
            filled = internship_filled,
            cancelled = cancelled.len(),
            "placement accepted"
        );
        Ok(AcceptanceOutcome {
            application: id.clone(),
            internship: internship_id,
            internship_filled,
            cancelled,
        })
    }

    /// A student's applications in submission order.
    pub fn for_student(&self, student: &UserId) -> Result<Vec<&Application>, PlacementError> {
        let record = self.registry.student(student)?;
        Ok(self.registry.applications_of(record))
    }

    pub fn pending_count(&self, student: &UserId) -> Result<usize, PlacementError> {
        let record = self.registry.student(student)?;
        Ok(pending_count(&*self.registry, record))
    }
}

fn pending_count(registry: &PlacementRegistry, student: &Student) -> usize {
    registry
        .applications_of(student)
        .iter()
        .filter(|application| application.status == ApplicationStatus::Pending)
        .count()
}

fn require_status(
    application: &Application,
    expected: ApplicationStatus,
    action: &'static str,
) -> Result<(), PlacementError> {
    if application.status == expected {
        Ok(())
    } else {
        Err(PlacementError::ApplicationTransition {
            application: application.id.clone(),
            status: application.status,
            action,
        })
    }
}
