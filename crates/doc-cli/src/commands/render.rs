//! Terminal rendering of engine results

use colored::Colorize;
use doc_core::lint::LintDigest;
use doc_core::{HealthSnapshot, Impact, Outcome, ParityVerdict, Severity, WorkflowReport};

/// Number of priorities shown with the health check
const PRIORITY_PREVIEW: usize = 5;

pub fn print_health(snapshot: &HealthSnapshot) {
    let m = &snapshot.metrics;
    println!("{}", "Documentation Health".bold());
    println!();
    println!("{}:       {}", "Documents".dimmed(), m.total_docs);
    println!("{}:  {}", "Stale documents".dimmed(), stale_count(m.stale_docs));
    println!("{}:        {}%", "Coverage".dimmed(), m.coverage_percentage);
    println!("{}:   {}", "Relationships".dimmed(), m.total_relationships);
    println!();

    if snapshot.priorities.is_empty() {
        println!("{} No open priorities", "OK".green().bold());
        return;
    }

    println!("{}:", "Priorities".bold());
    for priority in snapshot.top_priorities(PRIORITY_PREVIEW) {
        let marker = match priority.impact {
            Impact::High => "high".red().bold(),
            Impact::Medium => "medium".yellow(),
            Impact::Low => "low".dimmed(),
        };
        println!("  [{}] {}: {}", marker, priority.file.cyan(), priority.reason);
    }
    let hidden = snapshot.priorities.len().saturating_sub(PRIORITY_PREVIEW);
    if hidden > 0 {
        println!("  {}", format!("... and {} more", hidden).dimmed());
    }
}

fn stale_count(stale: usize) -> colored::ColoredString {
    if stale == 0 {
        "0".green()
    } else {
        stale.to_string().yellow()
    }
}

pub fn print_digest(digest: &LintDigest, limit: usize) {
    if digest.is_empty() {
        println!("{} No warnings or errors found", "OK".green().bold());
        return;
    }

    println!("{} {} issue(s) need attention:", "!".yellow().bold(), digest.len());
    for issue in digest.preview(limit) {
        let severity = match issue.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow(),
            Severity::Info => "info".dimmed(),
        };
        println!(
            "  [{}] {}:{} {} {}",
            severity,
            issue.file.cyan(),
            issue.line,
            issue.message,
            format!("[{}]", issue.rule).dimmed()
        );
    }
    let remaining = digest.remaining(limit);
    if remaining > 0 {
        println!(
            "  {}",
            format!("... and {} more (see LINT_WARNINGS.md)", remaining).dimmed()
        );
    }
}

pub fn print_parity(verdict: &ParityVerdict) {
    let status = match verdict.status_label() {
        "passed" => "passed".green().bold(),
        "skipped" => "skipped".yellow().bold(),
        other => other.red().bold(),
    };
    println!("{}: {}", "Parity".bold(), status);
    for line in verdict.issue_lines() {
        println!("  - {}", line);
    }
}

pub fn print_report(report: &WorkflowReport, preview_limit: usize) {
    println!(
        "{} Workflow {} finished",
        "=>".blue().bold(),
        report.workflow.id().cyan()
    );
    for action in &report.actions {
        println!("  {} {}", "+".green(), action);
    }

    if let Some(lint) = &report.lint {
        println!();
        print_digest(&LintDigest::from_report(lint), preview_limit);
    }
    if let Some(parity) = &report.parity {
        println!();
        print_parity(parity);
    }

    println!();
    match report.outcome {
        Outcome::Pass => println!("{} Documentation is consistent", "OK".green().bold()),
        Outcome::NonFatal => println!(
            "{} Issues surfaced; parity check deferred",
            "!".yellow().bold()
        ),
        Outcome::Fatal => println!("{} Documentation needs attention", "FAIL".red().bold()),
    }
}
