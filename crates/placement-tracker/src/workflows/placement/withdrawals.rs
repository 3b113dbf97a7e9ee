use serde::Serialize;
use tracing::info;

use super::domain::{
    ApplicationId, ApplicationStatus, InternshipStatus, PlacementError, WithdrawalId,
    WithdrawalRequest, WithdrawalStatus,
};
use super::registry::PlacementRegistry;
use super::service::Clock;

/// How staff resolved a withdrawal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawalOutcome {
    pub request: WithdrawalId,
    pub status: WithdrawalStatus,
    /// Set when the withdrawn application held an accepted placement.
    pub slot_released: bool,
}

/// Student-initiated withdrawal requests and their resolution by staff.
pub struct WithdrawalLifecycle<'a> {
    registry: &'a mut PlacementRegistry,
    clock: Clock,
}

impl<'a> WithdrawalLifecycle<'a> {
    pub fn new(registry: &'a mut PlacementRegistry, clock: Clock) -> Self {
        Self { registry, clock }
    }

    /// File a request against any existing application, whatever its status.
    pub fn request(
        &mut self,
        application: &ApplicationId,
    ) -> Result<WithdrawalRequest, PlacementError> {
        self.registry.application(application)?;

        let id = self.registry.next_withdrawal_id();
        let request = WithdrawalRequest {
            id: id.clone(),
            application: application.clone(),
            requested_on: self.clock.today(),
            status: WithdrawalStatus::Pending,
        };
        self.registry.insert_withdrawal(request.clone());

        info!(request = %id, %application, "withdrawal requested");
        Ok(request)
    }

    pub fn process(
        &mut self,
        id: &WithdrawalId,
        approve: bool,
    ) -> Result<WithdrawalOutcome, PlacementError> {
        let request = self.registry.withdrawal(id)?;
        if request.status != WithdrawalStatus::Pending {
            return Err(PlacementError::WithdrawalResolved {
                request: id.clone(),
                status: request.status,
            });
        }

        if !approve {
            self.registry.withdrawal_mut(id)?.status = WithdrawalStatus::Rejected;
            info!(request = %id, "withdrawal rejected");
            return Ok(WithdrawalOutcome {
                request: id.clone(),
                status: WithdrawalStatus::Rejected,
                slot_released: false,
            });
        }

        let application_id = request.application.clone();
        let application = self.registry.application(&application_id)?;
        let internship_id = application.internship.clone();
        // Only an accepted placement was ever counted against the posting's slots.
        let held_slot = application.status == ApplicationStatus::Accepted;
        if held_slot {
            self.registry.internship(&internship_id)?;
        }

        self.registry.withdrawal_mut(id)?.status = WithdrawalStatus::Approved;
        self.registry.application_mut(&application_id)?.status = ApplicationStatus::Unsuccessful;

        let mut slot_released = false;
        if held_slot {
            let internship = self.registry.internship_mut(&internship_id)?;
            if internship.slots_filled > 0 {
                internship.slots_filled -= 1;
                slot_released = true;
            }
            if internship.status == InternshipStatus::Filled && internship.has_open_slot() {
                internship.status = InternshipStatus::Approved;
            }
        }

        info!(
            request = %id,
            application = %application_id,
            slot_released,
            "withdrawal approved"
        );
        Ok(WithdrawalOutcome {
            request: id.clone(),
            status: WithdrawalStatus::Approved,
            slot_released,
        })
    }

    /// Requests still awaiting a staff decision.
    pub fn pending(&self) -> Vec<&WithdrawalRequest> {
        self.registry
            .withdrawals()
            .filter(|request| request.status == WithdrawalStatus::Pending)
            .collect()
    }
}
