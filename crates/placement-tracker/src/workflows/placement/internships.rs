use serde::Serialize;
use tracing::{debug, info};

use super::domain::{
    Application, ApplicationId, Internship, InternshipDraft, InternshipId, InternshipLevel,
    InternshipStatus, PlacementError, UserId,
};
use super::policy::PlacementPolicy;
use super::registry::PlacementRegistry;
use super::report::{PlacementReport, ReportFilter};

/// What a cascading posting removal took with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalSummary {
    pub internship: InternshipId,
    pub applications_removed: Vec<ApplicationId>,
    pub withdrawals_removed: usize,
}

/// Posting lifecycle: creation caps, staff approval, visibility, and removal.
pub struct InternshipLifecycle<'a> {
    registry: &'a mut PlacementRegistry,
    policy: &'a PlacementPolicy,
}

impl<'a> InternshipLifecycle<'a> {
    pub fn new(registry: &'a mut PlacementRegistry, policy: &'a PlacementPolicy) -> Self {
        Self { registry, policy }
    }

    /// Post a new internship on behalf of an authorized representative.
    pub fn create(
        &mut self,
        owner: &UserId,
        draft: InternshipDraft,
    ) -> Result<Internship, PlacementError> {
        let rep = self.registry.representative(owner)?;
        if !rep.approved {
            return Err(PlacementError::RepresentativeNotApproved(owner.clone()));
        }
        if rep.postings.len() >= self.policy.max_postings_per_representative {
            return Err(PlacementError::PostingLimitReached {
                representative: owner.clone(),
                limit: self.policy.max_postings_per_representative,
            });
        }
        if !self.policy.slots_in_range(draft.slots) {
            return Err(PlacementError::InvalidSlots {
                slots: draft.slots,
                max: self.policy.max_slots,
            });
        }
        if draft.closing_date < draft.opening_date {
            return Err(PlacementError::InvalidDateWindow {
                opening: draft.opening_date,
                closing: draft.closing_date,
            });
        }

        let company_name = rep.company_name.clone();
        let id = self.registry.next_internship_id();
        let internship = Internship {
            id: id.clone(),
            title: draft.title,
            description: draft.description,
            level: draft.level,
            preferred_major: draft.preferred_major,
            opening_date: draft.opening_date,
            closing_date: draft.closing_date,
            status: InternshipStatus::Pending,
            company_name,
            owner: owner.clone(),
            slots: draft.slots,
            slots_filled: 0,
            visible: false,
            applications: Vec::new(),
        };

        self.registry
            .representative_mut(owner)?
            .postings
            .push(id.clone());
        self.registry.insert_internship(internship.clone());

        info!(internship = %id, %owner, slots = internship.slots, "internship posted for approval");
        Ok(internship)
    }

    pub fn approve(&mut self, id: &InternshipId) -> Result<(), PlacementError> {
        let internship = self.registry.internship_mut(id)?;
        require_pending(internship, "approve")?;
        internship.status = InternshipStatus::Approved;
        internship.visible = true;

        info!(internship = %id, "internship approved");
        Ok(())
    }

    pub fn reject(&mut self, id: &InternshipId) -> Result<(), PlacementError> {
        let internship = self.registry.internship_mut(id)?;
        require_pending(internship, "reject")?;
        internship.status = InternshipStatus::Rejected;
        internship.visible = false;

        info!(internship = %id, "internship rejected");
        Ok(())
    }

    /// Flip visibility of an approved posting, returning the new value.
    pub fn toggle_visibility(&mut self, id: &InternshipId) -> Result<bool, PlacementError> {
        let internship = self.registry.internship_mut(id)?;
        if internship.status != InternshipStatus::Approved {
            return Err(PlacementError::InternshipTransition {
                internship: id.clone(),
                status: internship.status,
                action: "toggle visibility of",
            });
        }
        internship.visible = !internship.visible;

        info!(internship = %id, visible = internship.visible, "internship visibility toggled");
        Ok(internship.visible)
    }

    /// Delete a posting together with every application and withdrawal request tied to it.
    pub fn remove(&mut self, id: &InternshipId) -> Result<RemovalSummary, PlacementError> {
        let internship = self
            .registry
            .take_internship(id)
            .ok_or_else(|| PlacementError::UnknownInternship(id.clone()))?;

        let linked: Vec<ApplicationId> = self
            .registry
            .applications()
            .filter(|application| &application.internship == id)
            .map(|application| application.id.clone())
            .collect();

        let mut withdrawals_removed = 0;
        for application_id in &linked {
            if let Some(application) = self.registry.take_application(application_id) {
                if let Ok(student) = self.registry.student_mut(&application.student) {
                    student
                        .applications
                        .retain(|existing| existing != application_id);
                }
            }
            withdrawals_removed += self.registry.purge_withdrawals_for(application_id);
            debug!(application = %application_id, internship = %id, "application removed with posting");
        }

        if let Ok(owner) = self.registry.representative_mut(&internship.owner) {
            owner.postings.retain(|posting| posting != id);
        }

        info!(
            internship = %id,
            applications = linked.len(),
            withdrawals = withdrawals_removed,
            "internship removed"
        );
        Ok(RemovalSummary {
            internship: id.clone(),
            applications_removed: linked,
            withdrawals_removed,
        })
    }

    /// Approved, visible postings matching the student's major, BASIC only for first years.
    pub fn list_available_for(&self, student: &UserId) -> Result<Vec<&Internship>, PlacementError> {
        let student = self.registry.student(student)?;
        Ok(self
            .registry
            .internships()
            .filter(|internship| {
                internship.status == InternshipStatus::Approved && internship.visible
            })
            .filter(|internship| internship.preferred_major.eq_ignore_ascii_case(&student.major))
            .filter(|internship| {
                student.year_of_study != 1 || internship.level == InternshipLevel::Basic
            })
            .collect())
    }

    /// Postings waiting for career center approval.
    pub fn pending(&self) -> Vec<&Internship> {
        self.registry
            .internships()
            .filter(|internship| internship.status == InternshipStatus::Pending)
            .collect()
    }

    /// A representative's postings in creation order.
    pub fn owned_by(&self, representative: &UserId) -> Result<Vec<&Internship>, PlacementError> {
        let rep = self.registry.representative(representative)?;
        Ok(rep
            .postings
            .iter()
            .filter_map(|id| self.registry.internship(id).ok())
            .collect())
    }

    /// Applications received by a posting, visible only to its owner.
    pub fn applications_for(
        &self,
        representative: &UserId,
        id: &InternshipId,
    ) -> Result<Vec<&Application>, PlacementError> {
        self.registry.representative(representative)?;
        let internship = self.registry.internship(id)?;
        if &internship.owner != representative {
            return Err(PlacementError::NotOwner {
                representative: representative.clone(),
                internship: id.clone(),
            });
        }
        Ok(self.registry.applications_to(internship))
    }

    pub fn generate_report(&self, filter: &ReportFilter) -> PlacementReport {
        PlacementReport::generate(&*self.registry, filter)
    }
}

fn require_pending(internship: &Internship, action: &'static str) -> Result<(), PlacementError> {
    if internship.status == InternshipStatus::Pending {
        Ok(())
    } else {
        Err(PlacementError::InternshipTransition {
            internship: internship.id.clone(),
            status: internship.status,
            action,
        })
    }
}
