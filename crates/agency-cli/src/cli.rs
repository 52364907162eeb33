//! Command-line definition

use agency_view::{EventFilter, FilterError, TaskFilter};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Task filter flags, named after their filter keys
pub const TASK_FILTER_KEYS: [&str; 10] =
    ["priority", "status", "type", "assignee", "client", "project", "due", "from", "to", "search"];

fn task_filter_args() -> Vec<Arg> {
    vec![
        Arg::new("priority").long("priority").help("Low, Medium, High, Critical or all"),
        Arg::new("status").long("status").help("\"To Do\", \"In Progress\", Done or all"),
        Arg::new("type").long("type").help("internal, client or all"),
        Arg::new("assignee").long("assignee").help("all, unassigned, me or a staff id"),
        Arg::new("client").long("client").help("Exact client name"),
        Arg::new("project").long("project").help("Exact project name"),
        Arg::new("due").long("due").help("overdue, due-today, upcoming, no-date or all"),
        Arg::new("from").long("from").help("Earliest due date (yyyy-MM-dd)"),
        Arg::new("to").long("to").help("Latest due date (yyyy-MM-dd)"),
        Arg::new("search").long("search").help("Substring of title, client or project"),
    ]
}

/// Files listed by `files --recent` without `--limit`
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Build the `agency` command
#[must_use]
pub fn command() -> Command {
    Command::new("agency")
        .version(agency_core::VERSION)
        .about("Agency dashboard: tasks, chat, files, projects and calendar")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML config file (defaults apply when absent)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand(Command::new("board").about("Kanban board").args(task_filter_args()))
        .subcommand(Command::new("tasks").about("Task list with due states").args(task_filter_args()))
        .subcommand(
            Command::new("timeline")
                .about("Conversation messages grouped by day")
                .arg(Arg::new("conversation").required(true).help("Conversation id")),
        )
        .subcommand(Command::new("stats").about("Task and project summary cards"))
        .subcommand(
            Command::new("calendar")
                .about("Calendar feed")
                .arg(Arg::new("member").long("member").help("Employee or attendee name"))
                .arg(Arg::new("client").long("client").help("Client name")),
        )
        .subcommand(
            Command::new("files")
                .about("Document library")
                .arg(
                    Arg::new("recent")
                        .long("recent")
                        .action(ArgAction::SetTrue)
                        .help("Upload stats and the newest files"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .requires("recent")
                        .value_parser(value_parser!(usize))
                        .help("Files to list with --recent [default: 10]"),
                ),
        )
        .subcommand(Command::new("meetings").about("Upcoming and past meetings"))
        .subcommand(Command::new("reports").about("Chart series"))
}

/// Task filter from the filter flags present in `args`
///
/// # Errors
/// A flag value that does not parse.
pub fn task_filter(args: &ArgMatches) -> Result<TaskFilter, FilterError> {
    let pairs = TASK_FILTER_KEYS
        .iter()
        .filter_map(|key| args.get_one::<String>(key).map(|value| (*key, value.as_str())));
    TaskFilter::from_pairs(pairs)
}

/// `--limit`, or the default when absent
#[must_use]
pub fn recent_limit(args: &ArgMatches) -> usize {
    args.get_one::<usize>("limit").copied().unwrap_or(DEFAULT_RECENT_LIMIT)
}

/// Calendar filter from `--member` and `--client`
#[must_use]
pub fn event_filter(args: &ArgMatches) -> EventFilter {
    let mut filter = EventFilter::new();
    if let Some(member) = args.get_one::<String>("member") {
        filter = filter.for_member(member.as_str());
    }
    if let Some(client) = args.get_one::<String>("client") {
        filter = filter.for_client(client.as_str());
    }
    filter
}
