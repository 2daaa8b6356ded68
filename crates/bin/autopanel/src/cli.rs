//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use autopanel_app::services::RECENT_EXECUTIONS;
use autopanel_domain::scheduler::{IntervalTrigger, TriggerConfig};
use autopanel_domain::time::{Timestamp, parse_timestamp};

#[derive(Debug, Parser)]
#[command(
    name = "autopanel",
    version,
    about = "Control panel for a task-automation backend"
)]
pub struct Cli {
    /// Path to the configuration file (defaults to `autopanel.toml`).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the project and its tasks.
    Tasks,
    /// Show the options that apply to a task.
    Options {
        /// Task entry.
        entry: String,
    },
    /// Run tasks now.
    Start {
        /// Task entries to run.
        #[arg(required = true)]
        entries: Vec<String>,
        /// Override an option value (`KEY=VALUE`, repeatable).
        #[arg(long = "set", value_parser = parse_key_value)]
        values: Vec<(String, String)>,
        /// Start from the saved option values.
        #[arg(long)]
        saved: bool,
    },
    /// Stop the running execution.
    Stop,
    /// Manage scheduled tasks.
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// Show the execution history.
    Executions {
        /// Number of executions to fetch.
        #[arg(long, default_value_t = RECENT_EXECUTIONS)]
        limit: usize,
    },
    /// Manage the saved user configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Manage the panel settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Discover and connect devices.
    #[command(subcommand)]
    Devices(DeviceCommand),
}

#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    /// List scheduled tasks.
    List,
    /// Create a scheduled task.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Task entries to run (repeatable).
        #[arg(long = "task", required = true)]
        tasks: Vec<String>,
        #[command(flatten)]
        trigger: TriggerArgs,
        /// Override an option value (`KEY=VALUE`, repeatable).
        #[arg(long = "set", value_parser = parse_key_value)]
        values: Vec<(String, String)>,
        /// Create the task paused.
        #[arg(long)]
        disabled: bool,
    },
    /// Change a scheduled task; omitted fields stay as they are.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Replace the task entries (repeatable).
        #[arg(long = "task")]
        tasks: Vec<String>,
        #[command(flatten)]
        trigger: TriggerArgs,
        /// Override an option value for the new entries (`KEY=VALUE`).
        #[arg(long = "set", value_parser = parse_key_value, requires = "tasks")]
        values: Vec<(String, String)>,
    },
    /// Delete a scheduled task.
    Delete { id: String },
    /// Pause a scheduled task.
    Pause { id: String },
    /// Resume a paused task.
    Resume { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the saved user configuration.
    Show,
    /// Save a task selection and option values.
    Save {
        /// Task entries to check.
        entries: Vec<String>,
        /// Option value to save (`KEY=VALUE`, repeatable).
        #[arg(long = "set", value_parser = parse_key_value)]
        values: Vec<(String, String)>,
    },
    /// Delete the saved user configuration.
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the current settings.
    Show,
    /// Change settings (`section.field=VALUE`, e.g. `runtime.timeout=600`).
    Set {
        #[arg(required = true, value_parser = parse_key_value)]
        values: Vec<(String, String)>,
    },
    /// Restore the default settings.
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// List the devices the backend can see.
    List,
    /// Connect to a device by name or address.
    Connect { device: String },
}

/// Trigger flags; at most one of `--cron`, `--at` or an `--every-*` set.
#[derive(Debug, Args)]
pub struct TriggerArgs {
    /// Cron expression, e.g. `"0 8 * * *"`.
    #[arg(long, conflicts_with_all = ["at", "every"])]
    pub cron: Option<String>,
    /// Run once at this time (RFC 3339 or `YYYY-MM-DDTHH:MM:SS`).
    #[arg(long, value_parser = parse_timestamp, conflicts_with = "every")]
    pub at: Option<Timestamp>,
    #[command(flatten)]
    pub every: EveryArgs,
}

#[derive(Debug, Default, Args)]
#[group(id = "every", multiple = true, required = false)]
pub struct EveryArgs {
    #[command(flatten)]
    pub units: IntervalUnits,
    /// First interval run.
    #[arg(long, value_parser = parse_timestamp, requires = "every_unit")]
    pub start: Option<Timestamp>,
    /// No interval runs after this time.
    #[arg(long, value_parser = parse_timestamp, requires = "every_unit")]
    pub end: Option<Timestamp>,
}

/// Period of an interval trigger; `--start`/`--end` need at least one.
#[derive(Debug, Default, Args)]
#[group(id = "every_unit", multiple = true, required = false)]
pub struct IntervalUnits {
    #[arg(long = "every-weeks")]
    pub weeks: Option<u32>,
    #[arg(long = "every-days")]
    pub days: Option<u32>,
    #[arg(long = "every-hours")]
    pub hours: Option<u32>,
    #[arg(long = "every-minutes")]
    pub minutes: Option<u32>,
    #[arg(long = "every-seconds")]
    pub seconds: Option<u32>,
}

impl IntervalUnits {
    fn is_set(&self) -> bool {
        self.weeks.is_some()
            || self.days.is_some()
            || self.hours.is_some()
            || self.minutes.is_some()
            || self.seconds.is_some()
    }
}

impl TriggerArgs {
    /// The trigger described by the flags, if any was given.
    #[must_use]
    pub fn into_config(self) -> Option<TriggerConfig> {
        if let Some(cron) = self.cron {
            return Some(TriggerConfig::Cron { cron });
        }
        if let Some(run_date) = self.at {
            return Some(TriggerConfig::Date { run_date });
        }
        let every = self.every;
        let units = every.units;
        if !units.is_set() {
            return None;
        }
        Some(TriggerConfig::Interval(IntervalTrigger {
            weeks: units.weeks,
            days: units.days,
            hours: units.hours,
            minutes: units.minutes,
            seconds: units.seconds,
            start_date: every.start,
            end_date: every.end,
        }))
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
