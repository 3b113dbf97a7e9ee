use crate::commands;
use crate::demo::{run_demo, DemoArgs};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use placement_tracker::config::AppConfig;
use placement_tracker::error::AppError;
use placement_tracker::telemetry;
use placement_tracker::workflows::placement::InternshipLevel;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "placement",
    about = "Track internship postings, student applications, and withdrawal requests",
    version
)]
pub(crate) struct Cli {
    /// Directory holding the CSV tables (overrides APP_DATA_DIR)
    #[arg(long, global = true)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Print listings and reports as JSON
    #[arg(long, global = true)]
    pub(crate) json: bool,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    #[command(flatten)]
    Store(StoreCommand),
    /// Run a scripted placement scenario end to end
    Demo(DemoArgs),
}

/// Commands that load the data directory and save it back when they change state.
#[derive(Subcommand, Debug)]
pub(crate) enum StoreCommand {
    /// Create the data directory with empty tables
    Init,
    /// Student accounts
    Student {
        #[command(subcommand)]
        command: StudentCommand,
    },
    /// Career center staff accounts
    Staff {
        #[command(subcommand)]
        command: StaffCommand,
    },
    /// Company representative accounts and authorization
    Rep {
        #[command(subcommand)]
        command: RepCommand,
    },
    /// Check a user's credentials
    Login(LoginArgs),
    /// Replace a user's password
    Passwd(PasswdArgs),
    /// Internship postings
    Internship {
        #[command(subcommand)]
        command: InternshipCommand,
    },
    /// Student applications
    Application {
        #[command(subcommand)]
        command: ApplicationCommand,
    },
    /// Withdrawal requests
    Withdrawal {
        #[command(subcommand)]
        command: WithdrawalCommand,
    },
    /// Filtered internship report with status and slot totals
    Report(ReportArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum StudentCommand {
    Register(StudentRegisterArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum StaffCommand {
    Register(StaffRegisterArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum RepCommand {
    /// Register a representative; staff must authorize them before they can post
    Register(RepRegisterArgs),
    /// Grant (or with --revoke, withdraw) posting rights
    Authorize(AuthorizeArgs),
    /// Representatives awaiting authorization
    Pending,
}

#[derive(Subcommand, Debug)]
pub(crate) enum InternshipCommand {
    /// Post a new internship for staff approval
    Create(CreateInternshipArgs),
    Approve(InternshipIdArg),
    Reject(InternshipIdArg),
    /// Show or hide an approved posting
    Toggle(InternshipIdArg),
    /// Delete a posting with its applications and withdrawal requests
    Remove(InternshipIdArg),
    /// Postings a student can currently apply to
    Available(StudentIdArg),
    /// Postings waiting for staff approval
    Pending,
    /// Postings owned by a representative
    Owned(RepIdArg),
    /// Applications received by a representative's posting
    Applicants(ApplicantsArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum ApplicationCommand {
    Apply(ApplyArgs),
    /// Offer the placement to the applicant
    Approve(ApplicationIdArg),
    Reject(ApplicationIdArg),
    /// Accept an offered placement on the student's behalf
    Accept(ApplicationIdArg),
    /// A student's applications in submission order
    List(StudentIdArg),
}

#[derive(Subcommand, Debug)]
pub(crate) enum WithdrawalCommand {
    Request(ApplicationIdArg),
    /// Approve (or with --reject, reject) a pending request
    Process(ProcessWithdrawalArgs),
    Pending,
}

#[derive(Args, Debug)]
pub(crate) struct StudentRegisterArgs {
    pub(crate) id: String,
    pub(crate) name: String,
    #[arg(long, default_value = "password")]
    pub(crate) password: String,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub(crate) year: u8,
    #[arg(long)]
    pub(crate) major: String,
}

#[derive(Args, Debug)]
pub(crate) struct StaffRegisterArgs {
    pub(crate) id: String,
    pub(crate) name: String,
    #[arg(long, default_value = "password")]
    pub(crate) password: String,
    #[arg(long)]
    pub(crate) department: String,
}

#[derive(Args, Debug)]
pub(crate) struct RepRegisterArgs {
    pub(crate) id: String,
    pub(crate) name: String,
    #[arg(long, default_value = "password")]
    pub(crate) password: String,
    #[arg(long)]
    pub(crate) company: String,
    #[arg(long)]
    pub(crate) department: String,
    #[arg(long)]
    pub(crate) position: String,
}

#[derive(Args, Debug)]
pub(crate) struct AuthorizeArgs {
    pub(crate) id: String,
    #[arg(long)]
    pub(crate) revoke: bool,
}

#[derive(Args, Debug)]
pub(crate) struct LoginArgs {
    pub(crate) id: String,
    pub(crate) password: String,
}

#[derive(Args, Debug)]
pub(crate) struct PasswdArgs {
    pub(crate) id: String,
    pub(crate) new_password: String,
}

#[derive(Args, Debug)]
pub(crate) struct CreateInternshipArgs {
    /// Owning representative
    #[arg(long)]
    pub(crate) rep: String,
    #[arg(long)]
    pub(crate) title: String,
    #[arg(long, default_value = "")]
    pub(crate) description: String,
    /// BASIC, INTERMEDIATE or ADVANCED
    #[arg(long, default_value = "BASIC")]
    pub(crate) level: InternshipLevel,
    #[arg(long)]
    pub(crate) major: String,
    /// Opening date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) opening: NaiveDate,
    /// Closing date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) closing: NaiveDate,
    #[arg(long, default_value_t = 1)]
    pub(crate) slots: u32,
}

#[derive(Args, Debug)]
pub(crate) struct InternshipIdArg {
    pub(crate) id: String,
}

#[derive(Args, Debug)]
pub(crate) struct StudentIdArg {
    pub(crate) student: String,
}

#[derive(Args, Debug)]
pub(crate) struct RepIdArg {
    pub(crate) rep: String,
}

#[derive(Args, Debug)]
pub(crate) struct ApplicantsArgs {
    pub(crate) rep: String,
    pub(crate) internship: String,
}

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    pub(crate) student: String,
    pub(crate) internship: String,
}

#[derive(Args, Debug)]
pub(crate) struct ApplicationIdArg {
    pub(crate) id: String,
}

#[derive(Args, Debug)]
pub(crate) struct ProcessWithdrawalArgs {
    pub(crate) id: String,
    #[arg(long)]
    pub(crate) reject: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Filter by internship status
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Filter by preferred major
    #[arg(long)]
    pub(crate) major: Option<String>,
    /// Filter by internship level
    #[arg(long)]
    pub(crate) level: Option<String>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    execute(cli, &config)
}

pub(crate) fn execute(cli: Cli, config: &AppConfig) -> Result<(), AppError> {
    let Cli {
        data_dir,
        json,
        command,
    } = cli;

    match command {
        Command::Store(command) => commands::dispatch(command, config, data_dir, json),
        Command::Demo(args) => run_demo(args, config, data_dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{test_config, Workspace};
    use placement_tracker::workflows::placement::{
        ApplicationStatus, InternshipStatus, UserId,
    };

    fn run_in(dir: &std::path::Path, args: &[&str]) -> Result<(), AppError> {
        let mut argv = vec!["placement", "--data-dir"];
        let dir = dir.to_str().expect("utf8 path");
        argv.push(dir);
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).expect("arguments parse");
        execute(cli, &test_config(std::path::Path::new(dir)))
    }

    #[test]
    fn demo_is_parsed_apart_from_store_commands() {
        let cli = Cli::try_parse_from(["placement", "demo", "--save"]).expect("demo parses");
        assert!(matches!(cli.command, Command::Demo(DemoArgs { save: true, .. })));

        let cli = Cli::try_parse_from(["placement", "init"]).expect("init parses");
        assert!(matches!(cli.command, Command::Store(StoreCommand::Init)));

        let cli = Cli::try_parse_from(["placement", "--json", "report", "--status", "filled"])
            .expect("report parses");
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::Store(StoreCommand::Report(ReportArgs { status: Some(_), .. }))
        ));
    }

    #[test]
    fn create_requires_iso_dates_and_known_level() {
        let parsed = Cli::try_parse_from([
            "placement",
            "internship",
            "create",
            "--rep",
            "rep1",
            "--title",
            "Intern",
            "--major",
            "Math",
            "--opening",
            "2025/01/01",
            "--closing",
            "2025-02-01",
        ]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "placement",
            "internship",
            "create",
            "--rep",
            "rep1",
            "--title",
            "Intern",
            "--major",
            "Math",
            "--level",
            "expert",
            "--opening",
            "2025-01-01",
            "--closing",
            "2025-02-01",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn commands_persist_a_placement_through_the_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path();

        run_in(path, &["init"]).expect("init");
        run_in(path, &["staff", "register", "staff1", "Grace", "--department", "Careers"])
            .expect("staff");
        run_in(
            path,
            &[
                "rep", "register", "rep1", "Rita", "--company", "Acme", "--department", "Eng",
                "--position", "Lead",
            ],
        )
        .expect("rep");
        run_in(
            path,
            &["student", "register", "s1", "Alice", "--year", "2", "--major", "Math"],
        )
        .expect("student");

        let create = [
            "internship", "create", "--rep", "rep1", "--title", "Quant", "--major", "Math",
            "--opening", "2025-01-01", "--closing", "2025-03-01",
        ];
        let err = run_in(path, &create).expect_err("rep not yet authorized");
        assert!(matches!(err, AppError::Placement(_)));

        run_in(path, &["rep", "authorize", "rep1"]).expect("authorize");
        run_in(path, &create).expect("create");
        run_in(path, &["internship", "approve", "int-000001"]).expect("approve");
        run_in(path, &["application", "apply", "s1", "int-000001"]).expect("apply");
        run_in(path, &["application", "approve", "app-000001"]).expect("offer");
        run_in(path, &["application", "accept", "app-000001"]).expect("accept");
        run_in(path, &["--json", "report", "--status", "filled"]).expect("report");

        let config = test_config(path);
        let mut workspace = Workspace::open(&config, None).expect("reopen");
        let registry = workspace.service().registry();
        let internship = registry
            .internship(&"int-000001".into())
            .expect("persisted posting");
        assert_eq!(internship.status, InternshipStatus::Filled);
        assert_eq!(
            registry
                .application(&"app-000001".into())
                .expect("persisted application")
                .status,
            ApplicationStatus::Accepted
        );
        assert!(registry.student(&UserId::from("s1")).is_ok());
    }

    #[test]
    fn refused_operation_leaves_tables_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path();
        run_in(
            path,
            &["student", "register", "s1", "Alice", "--year", "1", "--major", "Math"],
        )
        .expect("student");

        let before = std::fs::read_to_string(path.join("students.csv")).expect("students");
        let err = run_in(
            path,
            &["student", "register", "S1", "Shadow", "--year", "2", "--major", "Art"],
        )
        .expect_err("duplicate id");
        assert!(err.to_string().contains("already taken"));
        let after = std::fs::read_to_string(path.join("students.csv")).expect("students");
        assert_eq!(before, after);
    }
}
