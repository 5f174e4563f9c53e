use crate::draft::{pending_file_from_path, Draft};
use crate::model::{Submission, SUBJECTS};
use crate::roster::reconcile;
use crate::store::{HttpStore, StudentStore};
use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "marksheet-cli",
    version,
    about = "Record and chart per-subject student exam marks against a remote store"
)]
pub struct Cli {
    /// Base URL of the record/file store service
    #[arg(long, default_value = "http://localhost:5000")]
    pub base_url: String,

    /// Print the reconciled roster as JSON and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Print a roster table and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Submit one manual record first: the student's name
    #[arg(long, requires = "standard", requires = "marks")]
    pub submit: Option<String>,

    /// Standard (class) for --submit
    #[arg(long)]
    pub standard: Option<String>,

    /// Comma-separated subject marks for --submit, in catalog order
    /// (Telugu,Maths,Science,Social,Hindi,English)
    #[arg(long)]
    pub marks: Option<String>,

    /// Upload a marks spreadsheet (.csv, .xlsx or .xls) instead of manual entry
    #[arg(long, conflicts_with = "submit")]
    pub upload: Option<std::path::PathBuf>,

    /// Reject non-numeric manual marks instead of forwarding them as nulls
    #[arg(long)]
    pub strict_marks: bool,

    /// HTTP request timeout
    #[arg(long, default_value = "10s")]
    pub request_timeout: humantime::Duration,
}

pub async fn run(args: Cli) -> Result<()> {
    let one_shot = args.json || args.text || args.submit.is_some() || args.upload.is_some();
    if !one_shot {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            return run_one_shot(args).await;
        }
    }

    run_one_shot(args).await
}

/// Build a submission from CLI flags through the same draft transitions the
/// TUI uses, so the mutual-exclusion and validation rules apply identically.
fn build_submission(args: &Cli) -> Result<Option<Submission>> {
    let mut draft = Draft::new();

    if let Some(path) = &args.upload {
        draft
            .set_file(pending_file_from_path(path))
            .context("file rejected")?;
    } else if let Some(name) = &args.submit {
        draft.name = name.clone();
        draft.standard = args.standard.clone().unwrap_or_default();
        let marks = args.marks.as_deref().unwrap_or_default();
        let entries: Vec<&str> = marks.split(',').map(str::trim).collect();
        if entries.len() != SUBJECTS.len() {
            anyhow::bail!(
                "--marks needs {} comma-separated values, got {}",
                SUBJECTS.len(),
                entries.len()
            );
        }
        for (i, entry) in entries.iter().enumerate() {
            draft.set_manual_mark(i, *entry);
        }
    } else {
        return Ok(None);
    }

    let submission = draft.build(args.strict_marks).context("invalid submission")?;
    Ok(Some(submission))
}

/// Non-interactive path: optionally submit, then fetch, reconcile and print.
/// Unlike the interactive core, network failures here propagate as process
/// errors so scripts can detect them.
async fn run_one_shot(args: Cli) -> Result<()> {
    let store = HttpStore::new(&args.base_url, Duration::from(args.request_timeout))?;

    if let Some(submission) = build_submission(&args)? {
        store
            .store_record(&submission.record)
            .await
            .context("store record")?;
        if let Some(file) = &submission.file {
            store.upload_file(file).await.context("upload file")?;
            eprintln!("Uploaded {}", file.file_name);
        } else {
            eprintln!("Stored record for {}", submission.record.name);
        }
    }

    let records = store.fetch_students().await.context("fetch students")?;
    let roster = reconcile(records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(roster.entries())?);
    } else {
        let summary = crate::text_summary::build_text_summary(&roster);
        for line in summary.lines {
            println!("{}", line);
        }
    }

    Ok(())
}
