use crate::infra::Workspace;
use crate::render::{self, Output};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use placement_tracker::config::AppConfig;
use placement_tracker::error::AppError;
use placement_tracker::workflows::placement::{
    Account, Clock, InternshipDraft, InternshipLevel, PlacementError, PlacementService,
    ReportFilter, UserId,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date stamped on applications and requests (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Write the resulting tables to the data directory instead of discarding them.
    #[arg(long)]
    pub(crate) save: bool,
}

/// Walk a two-slot posting through three offers, a withdrawal, and a refill.
pub(crate) fn run_demo(
    args: DemoArgs,
    config: &AppConfig,
    data_dir: Option<PathBuf>,
) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let mut service =
        PlacementService::new(config.policy).with_clock(Clock::Fixed(today));

    println!("Internship placement demo ({today})");
    let (rep, students) = seed_accounts(&mut service)?;

    let posting = service.internships().create(
        &rep,
        InternshipDraft {
            title: "Data Platform Intern".to_string(),
            description: "Build ingestion pipelines and dashboards".to_string(),
            level: InternshipLevel::Intermediate,
            preferred_major: "Computer Science".to_string(),
            opening_date: today,
            closing_date: today + Duration::days(60),
            slots: 2,
        },
    )?;
    println!("- {} posted {} ({} slots)", rep, posting.id, posting.slots);
    service.internships().approve(&posting.id)?;
    println!("- Staff approved {}; it is now visible", posting.id);

    let mut offers = Vec::new();
    for student in &students {
        let application = service.applications().apply(student, &posting.id)?;
        service.applications().approve(&application.id)?;
        println!("- {} applied ({}) and received an offer", student, application.id);
        offers.push(application.id);
    }

    for offer in &offers[..2] {
        let outcome = service.applications().accept_placement(offer)?;
        println!(
            "- {} accepted{}",
            outcome.application,
            if outcome.internship_filled {
                "; posting filled and hidden"
            } else {
                ""
            }
        );
    }

    match service.applications().accept_placement(&offers[2]) {
        Err(err @ PlacementError::SlotsFull { .. }) => {
            println!("- {} could not accept: {}", offers[2], err)
        }
        Err(err) => return Err(err.into()),
        Ok(_) => println!("- {} accepted unexpectedly", offers[2]),
    }

    let request = service.withdrawals().request(&offers[0])?;
    let outcome = service.withdrawals().process(&request.id, true)?;
    println!(
        "- Staff approved withdrawal {} for {}{}",
        request.id,
        offers[0],
        if outcome.slot_released {
            "; one slot released"
        } else {
            ""
        }
    );
    service.applications().accept_placement(&offers[2])?;
    println!("- {} accepted the released slot", offers[2]);

    println!();
    render::report(Output::Text, &service.report(&ReportFilter::default()))?;

    if args.save {
        let mut workspace = Workspace::open(config, data_dir)?;
        *workspace.service() = service;
        workspace.save()?;
        info!(dir = %workspace.store().dir().display(), "demo data written");
        println!("\nDemo tables written to {}", workspace.store().dir().display());
    }

    Ok(())
}

fn seed_accounts(service: &mut PlacementService) -> Result<(UserId, Vec<UserId>), AppError> {
    let mut accounts = service.accounts();
    accounts.register_staff(
        Account::new("staff-demo", "Grace Tan", "password"),
        "Career Center",
    )?;
    accounts.register_representative(
        Account::new("rep-demo", "Rita Lim", "password"),
        "Acme Analytics",
        "Engineering",
        "Recruiter",
    )?;
    let rep = UserId::from("rep-demo");
    accounts.authorize_representative(&rep, true)?;

    let mut students = Vec::new();
    for (id, name, year) in [
        ("u-demo-01", "Alice Ong", 2),
        ("u-demo-02", "Bala Kumar", 3),
        ("u-demo-03", "Chen Wei", 4),
    ] {
        accounts.register_student(Account::new(id, name, "password"), year, "Computer Science")?;
        students.push(UserId::from(id));
    }
    println!(
        "- Registered 1 staff member, 1 representative, {} students",
        students.len()
    );

    Ok((rep, students))
}
