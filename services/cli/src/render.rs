use placement_tracker::error::AppError;
use placement_tracker::workflows::placement::{
    Application, CompanyRepresentative, Internship, PlacementReport, WithdrawalRequest,
};
use serde::Serialize;

/// Output mode chosen with the global `--json` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Output {
    Text,
    Json,
}

impl Output {
    pub(crate) fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

pub(crate) fn internships(output: Output, list: &[&Internship]) -> Result<(), AppError> {
    if output == Output::Json {
        return print_json(list);
    }
    if list.is_empty() {
        println!("No internships.");
        return Ok(());
    }
    for internship in list {
        println!(
            "- {} | {} | {} | {} | {} | {}/{} filled | {} -> {}{}",
            internship.id,
            internship.title,
            internship.company_name,
            internship.level,
            internship.status,
            internship.slots_filled,
            internship.slots,
            internship.opening_date,
            internship.closing_date,
            if internship.visible { "" } else { " (hidden)" }
        );
    }
    Ok(())
}

pub(crate) fn applications(output: Output, list: &[&Application]) -> Result<(), AppError> {
    if output == Output::Json {
        return print_json(list);
    }
    if list.is_empty() {
        println!("No applications.");
        return Ok(());
    }
    for application in list {
        println!(
            "- {} | student {} | internship {} | {} | submitted {}",
            application.id,
            application.student,
            application.internship,
            application.status,
            application.submitted_on
        );
    }
    Ok(())
}

pub(crate) fn withdrawals(output: Output, list: &[&WithdrawalRequest]) -> Result<(), AppError> {
    if output == Output::Json {
        return print_json(list);
    }
    if list.is_empty() {
        println!("No withdrawal requests.");
        return Ok(());
    }
    for request in list {
        println!(
            "- {} | application {} | {} | requested {}",
            request.id, request.application, request.status, request.requested_on
        );
    }
    Ok(())
}

pub(crate) fn representatives(
    output: Output,
    list: &[&CompanyRepresentative],
) -> Result<(), AppError> {
    if output == Output::Json {
        return print_json(list);
    }
    if list.is_empty() {
        println!("No representatives awaiting authorization.");
        return Ok(());
    }
    for rep in list {
        println!(
            "- {} | {} | {} ({}, {})",
            rep.account.id, rep.account.name, rep.company_name, rep.department, rep.position
        );
    }
    Ok(())
}

pub(crate) fn report(output: Output, report: &PlacementReport) -> Result<(), AppError> {
    if output == Output::Json {
        return print_json(report);
    }

    println!("Internship report");
    let filters: Vec<String> = [
        ("status", &report.filter.status),
        ("major", &report.filter.major),
        ("level", &report.filter.level),
    ]
    .into_iter()
    .filter_map(|(name, value)| {
        value
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(|value| format!("{name}={value}"))
    })
    .collect();
    if !filters.is_empty() {
        println!("Filters: {}", filters.join(", "));
    }

    if report.is_empty() {
        println!("No internships match the filters.");
        return Ok(());
    }

    println!(
        "Slots: {}/{} filled across {} postings",
        report.filled_slots,
        report.total_slots,
        report.internships.len()
    );
    println!("By status:");
    for entry in &report.status_counts {
        println!("  - {}: {}", entry.status_label, entry.count);
    }
    println!("Postings:");
    for view in &report.internships {
        println!(
            "  - {} | {} @ {} | {} | {} | {} | {}/{} filled | {} applications, {} accepted",
            view.id,
            view.title,
            view.company_name,
            view.level_label,
            view.preferred_major,
            view.status_label,
            view.slots_filled,
            view.slots,
            view.applications,
            view.accepted
        );
    }
    Ok(())
}
