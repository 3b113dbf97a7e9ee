use chrono::{Local, NaiveDate};

use super::accounts::Accounts;
use super::applications::ApplicationLifecycle;
use super::internships::InternshipLifecycle;
use super::policy::PlacementPolicy;
use super::registry::PlacementRegistry;
use super::report::{PlacementReport, ReportFilter};
use super::withdrawals::WithdrawalLifecycle;

/// Source of the date stamped on applications and withdrawal requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

/// Context object owning the entity graph; the lifecycle managers borrow it per call.
#[derive(Debug, Clone)]
pub struct PlacementService {
    registry: PlacementRegistry,
    policy: PlacementPolicy,
    clock: Clock,
}

impl PlacementService {
    pub fn new(policy: PlacementPolicy) -> Self {
        Self::with_registry(PlacementRegistry::new(), policy)
    }

    pub fn with_registry(registry: PlacementRegistry, policy: PlacementPolicy) -> Self {
        Self {
            registry,
            policy,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &PlacementRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> PlacementRegistry {
        self.registry
    }

    pub fn policy(&self) -> &PlacementPolicy {
        &self.policy
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn accounts(&mut self) -> Accounts<'_> {
        Accounts::new(&mut self.registry)
    }

    pub fn internships(&mut self) -> InternshipLifecycle<'_> {
        InternshipLifecycle::new(&mut self.registry, &self.policy)
    }

    pub fn applications(&mut self) -> ApplicationLifecycle<'_> {
        ApplicationLifecycle::new(&mut self.registry, &self.policy, self.clock)
    }

    pub fn withdrawals(&mut self) -> WithdrawalLifecycle<'_> {
        WithdrawalLifecycle::new(&mut self.registry, self.clock)
    }

    pub fn report(&self, filter: &ReportFilter) -> PlacementReport {
        PlacementReport::generate(&self.registry, filter)
    }
}

impl Default for PlacementService {
    fn default() -> Self {
        Self::new(PlacementPolicy::default())
    }
}
