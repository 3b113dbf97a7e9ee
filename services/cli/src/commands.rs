use crate::cli::{
    ApplicationCommand, InternshipCommand, RepCommand, ReportArgs, StaffCommand, StoreCommand,
    StudentCommand, WithdrawalCommand,
};
use crate::infra::Workspace;
use crate::render::{self, Output};
use placement_tracker::config::AppConfig;
use placement_tracker::error::AppError;
use placement_tracker::workflows::placement::{
    Account, ApplicationId, InternshipDraft, InternshipId, LoginOutcome, PlacementService,
    ReportFilter, UserId, WithdrawalId,
};
use std::path::PathBuf;
use tracing::warn;

/// Load the data directory, run one command, and save only when the command changed state.
pub(crate) fn dispatch(
    command: StoreCommand,
    config: &AppConfig,
    data_dir: Option<PathBuf>,
    json: bool,
) -> Result<(), AppError> {
    let mut workspace = Workspace::open(config, data_dir)?;
    let output = Output::from_flag(json);

    let mutated = match apply(command, workspace.service(), output) {
        Ok(mutated) => mutated,
        Err(err) => {
            if let AppError::Placement(refusal) = &err {
                warn!(kind = %refusal.kind(), "operation refused: {refusal}");
            }
            return Err(err);
        }
    };

    if mutated {
        workspace.save()?;
    }
    Ok(())
}

/// Returns whether the registry changed.
fn apply(
    command: StoreCommand,
    service: &mut PlacementService,
    output: Output,
) -> Result<bool, AppError> {
    match command {
        StoreCommand::Init => {
            println!("Initialized placement data directory.");
            Ok(true)
        }
        StoreCommand::Student {
            command: StudentCommand::Register(args),
        } => {
            service.accounts().register_student(
                Account::new(args.id.as_str(), args.name, args.password),
                args.year,
                args.major,
            )?;
            println!("Registered student {}.", args.id);
            Ok(true)
        }
        StoreCommand::Staff {
            command: StaffCommand::Register(args),
        } => {
            service.accounts().register_staff(
                Account::new(args.id.as_str(), args.name, args.password),
                args.department,
            )?;
            println!("Registered career center staff {}.", args.id);
            Ok(true)
        }
        StoreCommand::Rep { command } => rep(command, service, output),
        StoreCommand::Login(args) => {
            let outcome = service
                .accounts()
                .login(&UserId::from(args.id.as_str()), &args.password);
            if output == Output::Json {
                render::print_json(&outcome)?;
            } else {
                match outcome {
                    LoginOutcome::Authenticated(role) => {
                        println!("Logged in {} as {}.", args.id, role)
                    }
                    LoginOutcome::PendingApproval => {
                        println!("Account {} is awaiting staff authorization.", args.id)
                    }
                    LoginOutcome::WrongPassword => println!("Incorrect password."),
                    LoginOutcome::UnknownUser => println!("No account with id {}.", args.id),
                }
            }
            Ok(false)
        }
        StoreCommand::Passwd(args) => {
            service
                .accounts()
                .change_password(&UserId::from(args.id.as_str()), args.new_password)?;
            println!("Password changed for {}.", args.id);
            Ok(true)
        }
        StoreCommand::Internship { command } => internship(command, service, output),
        StoreCommand::Application { command } => application(command, service, output),
        StoreCommand::Withdrawal { command } => withdrawal(command, service, output),
        StoreCommand::Report(args) => {
            let report = service.report(&report_filter(args));
            render::report(output, &report)?;
            Ok(false)
        }
    }
}

fn rep(
    command: RepCommand,
    service: &mut PlacementService,
    output: Output,
) -> Result<bool, AppError> {
    match command {
        RepCommand::Register(args) => {
            service.accounts().register_representative(
                Account::new(args.id.as_str(), args.name, args.password),
                args.company,
                args.department,
                args.position,
            )?;
            println!(
                "Registered representative {}; staff authorization required before posting.",
                args.id
            );
            Ok(true)
        }
        RepCommand::Authorize(args) => {
            service
                .accounts()
                .authorize_representative(&UserId::from(args.id.as_str()), !args.revoke)?;
            if args.revoke {
                println!("Revoked posting rights for {}.", args.id);
            } else {
                println!("Authorized representative {}.", args.id);
            }
            Ok(true)
        }
        RepCommand::Pending => {
            render::representatives(output, &service.accounts().pending_representatives())?;
            Ok(false)
        }
    }
}

fn internship(
    command: InternshipCommand,
    service: &mut PlacementService,
    output: Output,
) -> Result<bool, AppError> {
    let mut internships = service.internships();
    match command {
        InternshipCommand::Create(args) => {
            let created = internships.create(
                &UserId::from(args.rep.as_str()),
                InternshipDraft {
                    title: args.title,
                    description: args.description,
                    level: args.level,
                    preferred_major: args.major,
                    opening_date: args.opening,
                    closing_date: args.closing,
                    slots: args.slots,
                },
            )?;
            println!(
                "Created internship {} ({} slots), pending staff approval.",
                created.id, created.slots
            );
            Ok(true)
        }
        InternshipCommand::Approve(args) => {
            internships.approve(&InternshipId::from(args.id.as_str()))?;
            println!("Approved internship {}; it is now visible.", args.id);
            Ok(true)
        }
        InternshipCommand::Reject(args) => {
            internships.reject(&InternshipId::from(args.id.as_str()))?;
            println!("Rejected internship {}.", args.id);
            Ok(true)
        }
        InternshipCommand::Toggle(args) => {
            let visible = internships.toggle_visibility(&InternshipId::from(args.id.as_str()))?;
            println!(
                "Internship {} is now {}.",
                args.id,
                if visible { "visible" } else { "hidden" }
            );
            Ok(true)
        }
        InternshipCommand::Remove(args) => {
            let summary = internships.remove(&InternshipId::from(args.id.as_str()))?;
            println!(
                "Removed internship {} with {} applications and {} withdrawal requests.",
                summary.internship,
                summary.applications_removed.len(),
                summary.withdrawals_removed
            );
            Ok(true)
        }
        InternshipCommand::Available(args) => {
            let list = internships.list_available_for(&UserId::from(args.student.as_str()))?;
            render::internships(output, &list)?;
            Ok(false)
        }
        InternshipCommand::Pending => {
            render::internships(output, &internships.pending())?;
            Ok(false)
        }
        InternshipCommand::Owned(args) => {
            let list = internships.owned_by(&UserId::from(args.rep.as_str()))?;
            render::internships(output, &list)?;
            Ok(false)
        }
        InternshipCommand::Applicants(args) => {
            let list = internships.applications_for(
                &UserId::from(args.rep.as_str()),
                &InternshipId::from(args.internship.as_str()),
            )?;
            render::applications(output, &list)?;
            Ok(false)
        }
    }
}

fn application(
    command: ApplicationCommand,
    service: &mut PlacementService,
    output: Output,
) -> Result<bool, AppError> {
    let mut applications = service.applications();
    match command {
        ApplicationCommand::Apply(args) => {
            let submitted = applications.apply(
                &UserId::from(args.student.as_str()),
                &InternshipId::from(args.internship.as_str()),
            )?;
            println!(
                "Submitted application {} to internship {}.",
                submitted.id, submitted.internship
            );
            Ok(true)
        }
        ApplicationCommand::Approve(args) => {
            applications.approve(&ApplicationId::from(args.id.as_str()))?;
            println!("Offered placement for application {}.", args.id);
            Ok(true)
        }
        ApplicationCommand::Reject(args) => {
            applications.reject(&ApplicationId::from(args.id.as_str()))?;
            println!("Marked application {} unsuccessful.", args.id);
            Ok(true)
        }
        ApplicationCommand::Accept(args) => {
            let outcome = applications.accept_placement(&ApplicationId::from(args.id.as_str()))?;
            println!(
                "Accepted placement {} at {}{}; {} pending applications closed.",
                outcome.application,
                outcome.internship,
                if outcome.internship_filled {
                    " (internship now filled)"
                } else {
                    ""
                },
                outcome.cancelled.len()
            );
            Ok(true)
        }
        ApplicationCommand::List(args) => {
            let list = applications.for_student(&UserId::from(args.student.as_str()))?;
            render::applications(output, &list)?;
            Ok(false)
        }
    }
}

fn withdrawal(
    command: WithdrawalCommand,
    service: &mut PlacementService,
    output: Output,
) -> Result<bool, AppError> {
    let mut withdrawals = service.withdrawals();
    match command {
        WithdrawalCommand::Request(args) => {
            let request = withdrawals.request(&ApplicationId::from(args.id.as_str()))?;
            println!(
                "Filed withdrawal request {} for application {}.",
                request.id, request.application
            );
            Ok(true)
        }
        WithdrawalCommand::Process(args) => {
            let outcome = withdrawals.process(&WithdrawalId::from(args.id.as_str()), !args.reject)?;
            println!(
                "Withdrawal request {} {}{}.",
                outcome.request,
                outcome.status,
                if outcome.slot_released {
                    "; slot released"
                } else {
                    ""
                }
            );
            Ok(true)
        }
        WithdrawalCommand::Pending => {
            render::withdrawals(output, &withdrawals.pending())?;
            Ok(false)
        }
    }
}

fn report_filter(args: ReportArgs) -> ReportFilter {
    ReportFilter {
        status: args.status,
        major: args.major,
        level: args.level,
    }
}
