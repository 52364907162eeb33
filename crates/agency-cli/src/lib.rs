//! Agency CLI - the dashboard on the command line
//!
//! `agency [--config PATH] [--json] <command>` loads the configured dataset
//! and prints one view as text or JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! let matches = agency_cli::cli::command().get_matches_from(["agency", "board", "--assignee", "me"]);
//! let output = agency_cli::execute(&dashboard, &matches).await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;
pub mod render;

use agency_core::Dashboard;
use agency_view::{DocumentFilter, ProjectFilter, ProjectStats, TaskStats};
use anyhow::{bail, Context};
use clap::ArgMatches;
use serde::Serialize;

/// Task and project cards for `stats`
#[derive(Debug, Serialize)]
struct Summary {
    tasks: TaskStats,
    projects: ProjectStats,
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> anyhow::Result<String> {
    if json {
        serde_json::to_string_pretty(value).context("serializing output")
    } else {
        Ok(text(value))
    }
}

/// Run the selected subcommand and return what to print
///
/// # Errors
/// Bad filter flags, unknown records, store failures.
pub async fn execute(dashboard: &Dashboard, matches: &ArgMatches) -> anyhow::Result<String> {
    let json = matches.get_flag("json");
    let clock = dashboard.clock();
    match matches.subcommand() {
        Some(("board", args)) => {
            let board = dashboard.task_board(&cli::task_filter(args)?).await?;
            emit(json, &board, render::board)
        }
        Some(("tasks", args)) => {
            let rows = dashboard.task_list(&cli::task_filter(args)?).await?;
            emit(json, &rows, |rows| render::task_rows(rows))
        }
        Some(("timeline", args)) => {
            let Some(id) = args.get_one::<String>("conversation") else {
                bail!("missing conversation id");
            };
            let sections = dashboard.conversation_timeline(&id.as_str().into()).await?;
            emit(json, &sections, |sections| render::timeline(sections, clock))
        }
        Some(("stats", _)) => {
            let summary = Summary {
                tasks: dashboard.task_stats().await?,
                projects: dashboard.project_overview(&ProjectFilter::new()).await?.stats,
            };
            emit(json, &summary, |s| render::stats(&s.tasks, &s.projects))
        }
        Some(("calendar", args)) => {
            let events = dashboard.calendar_feed(&cli::event_filter(args)).await?;
            emit(json, &events, |events| render::calendar(events))
        }
        Some(("files", args)) if args.get_flag("recent") => {
            let recent = dashboard.recent_files(Some(cli::recent_limit(args))).await?;
            emit(json, &recent, |recent| render::recent_files(recent, clock.now()))
        }
        Some(("files", _)) => {
            let docs = dashboard.document_library(&DocumentFilter::new()).await?;
            emit(json, &docs, |docs| render::documents(docs, clock.now()))
        }
        Some(("meetings", _)) => {
            let schedule = dashboard.meeting_schedule().await?;
            emit(json, &schedule, |schedule| render::meetings(schedule, clock))
        }
        Some(("reports", _)) => {
            let series = dashboard.report_series().await?;
            emit(json, &series, render::reports)
        }
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given"),
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
