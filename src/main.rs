use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use shift_tracker::calculation::{
    PayStats, active_minutes, format_hours_short, format_minutes, format_money, shift_hours,
};
use shift_tracker::clock::SystemClock;
use shift_tracker::config::SettingsLoader;
use shift_tracker::error::{TrackerError, TrackerResult};
use shift_tracker::models::{ShiftDurations, ShiftPatch, ShiftType, ThemeMode, Week, WorkerConfigPatch};
use shift_tracker::storage::FileStore;
use shift_tracker::tracker::Tracker;

#[derive(Parser)]
#[command(name = "shift-tracker", version, about = "Track work shifts, hours and weekly pay")]
struct Cli {
    /// Directory holding the tracker's JSON documents
    #[arg(long, default_value = ".shift-tracker")]
    data_dir: PathBuf,
    /// YAML settings file (defaults are used when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// First-run setup: name and hourly rate
    Setup {
        /// Display name
        #[arg(long)]
        name: String,
        /// Pay per hour (defaults to the settings value)
        #[arg(long)]
        rate: Option<Decimal>,
    },
    /// Show or change the worker configuration
    Config {
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New hourly rate
        #[arg(long)]
        rate: Option<Decimal>,
        /// Planned hours for M, T and N shifts, e.g. "4,4,5"
        #[arg(long)]
        durations: Option<String>,
    },
    /// Show the current week and its totals
    Status,
    /// Add a planned shift
    Add {
        /// Day of the shift (YYYY-MM-DD)
        date: NaiveDate,
        /// Shift type: M, T or N
        shift_type: ShiftType,
    },
    /// Check in to a shift now
    CheckIn {
        /// Shift type: M, T or N
        shift_type: ShiftType,
        /// Day of the shift (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Check out of a shift now
    CheckOut {
        /// Shift type: M, T or N
        shift_type: ShiftType,
        /// Day of the shift (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Edit a recorded shift
    Edit {
        /// Day of the shift (YYYY-MM-DD)
        date: NaiveDate,
        /// Shift type: M, T or N
        shift_type: ShiftType,
        /// Check-in time, "HH:MM" on the shift's day or "YYYY-MM-DDTHH:MM"
        #[arg(long = "in")]
        check_in: Option<String>,
        /// Check-out time, "HH:MM" on the shift's day or "YYYY-MM-DDTHH:MM"
        #[arg(long = "out")]
        check_out: Option<String>,
        /// Fill both times from the expected window and planned duration
        #[arg(long, conflicts_with_all = ["check_in", "check_out"])]
        suggested: bool,
        /// Mark the shift as extra (or not)
        #[arg(long)]
        extra: Option<bool>,
        /// Replace the note
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete a shift
    Delete {
        /// Day of the shift (YYYY-MM-DD)
        date: NaiveDate,
        /// Shift type: M, T or N
        shift_type: ShiftType,
    },
    /// Close the current week and move it to history
    CloseWeek,
    /// Discard the current week without archiving it
    ResetWeek,
    /// List closed weeks, most recent first
    History,
    /// Delete all closed weeks
    ClearHistory,
    /// Show or change preferences
    Prefs {
        /// Theme: light or dark
        #[arg(long)]
        theme: Option<ThemeMode>,
        /// Switch between light and dark
        #[arg(long, conflicts_with = "theme")]
        toggle_theme: bool,
        /// Enable or disable notifications
        #[arg(long)]
        notifications: Option<bool>,
    },
    /// Delete all data
    ResetAll {
        /// Master password
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> TrackerResult<()> {
    let settings = SettingsLoader::load_or_default(cli.settings.as_deref())?.into_settings();
    let storage = Arc::new(FileStore::new(cli.data_dir));
    let mut tracker = Tracker::open(storage, Arc::new(SystemClock), settings).await?;
    for warning in tracker.load_warnings() {
        eprintln!("warning: {warning}, starting from empty data for it");
    }

    if !matches!(cli.cmd, Command::Setup { .. } | Command::Prefs { .. } | Command::ResetAll { .. })
        && tracker.worker().is_configured()
    {
        tracker.ensure_current_week().await?;
    }

    match cli.cmd {
        Command::Setup { name, rate } => {
            let rate = rate.unwrap_or(tracker.settings().default_hourly_rate);
            tracker.setup(&name, rate).await?;
            println!("Welcome, {}.", name.trim());
            print_week_summary(&tracker)?;
        }
        Command::Config {
            name,
            rate,
            durations,
        } => {
            let patch = WorkerConfigPatch {
                name,
                hourly_rate: rate,
                shift_durations: durations.as_deref().map(parse_durations).transpose()?,
                weekly_schedule: None,
            };
            if patch != WorkerConfigPatch::default() {
                tracker.worker_mut().update(patch).await?;
            }
            print_config(&tracker)?;
        }
        Command::Status => print_week_summary(&tracker)?,
        Command::Add { date, shift_type } => {
            tracker.weeks_mut().add_shift(date, shift_type).await?;
            println!("Added {} shift on {date}.", shift_type.label());
        }
        Command::CheckIn { shift_type, date } => {
            let date = date.unwrap_or_else(|| tracker.today());
            tracker.weeks_mut().check_in(date, shift_type).await?;
            println!(
                "Checked in to {} shift at {}.",
                shift_type.label(),
                tracker.now().format("%H:%M")
            );
        }
        Command::CheckOut { shift_type, date } => {
            let date = date.unwrap_or_else(|| tracker.today());
            tracker.weeks_mut().check_out(date, shift_type).await?;
            println!(
                "Checked out of {} shift at {}.",
                shift_type.label(),
                tracker.now().format("%H:%M")
            );
        }
        Command::Edit {
            date,
            shift_type,
            check_in,
            check_out,
            suggested,
            extra,
            note,
        } => {
            let mut patch = ShiftPatch {
                check_in_time: check_in.as_deref().map(|t| parse_time(date, t)).transpose()?,
                check_out_time: check_out.as_deref().map(|t| parse_time(date, t)).transpose()?,
                is_extra: extra,
                note,
            };
            if suggested {
                let (check_in, check_out) = tracker.suggested_times(date, shift_type)?;
                patch.check_in_time = Some(check_in);
                patch.check_out_time = Some(check_out);
            }
            tracker.edit_shift(date, shift_type, &patch).await?;
            println!("Updated {} shift on {date}.", shift_type.label());
        }
        Command::Delete { date, shift_type } => {
            tracker.weeks_mut().delete_shift(date, shift_type).await?;
            println!("Deleted {} shift on {date}.", shift_type.label());
        }
        Command::CloseWeek => {
            let Some(week) = tracker.weeks().current_week().cloned() else {
                println!("No week is open.");
                return Ok(());
            };
            let stats = tracker.stats_for(&week)?;
            tracker.weeks_mut().close_week().await?;
            println!("Closed {}.", week.id);
            print_stats(&stats, &tracker.settings().currency_symbol);
        }
        Command::ResetWeek => {
            tracker.weeks_mut().reset_current_week().await?;
            println!("Current week discarded.");
        }
        Command::History => print_history(&tracker)?,
        Command::ClearHistory => {
            tracker.weeks_mut().clear_history().await?;
            println!("History cleared.");
        }
        Command::Prefs {
            theme,
            toggle_theme,
            notifications,
        } => {
            if let Some(theme) = theme {
                tracker.preferences_mut().set_theme(theme).await?;
            }
            if toggle_theme {
                tracker.preferences_mut().toggle_theme().await?;
            }
            if let Some(enabled) = notifications {
                tracker.preferences_mut().set_notifications(enabled).await?;
            }
            let prefs = tracker.preferences().preferences();
            println!("Theme:         {}", prefs.theme_mode);
            println!(
                "Notifications: {}",
                if prefs.notifications_enabled { "on" } else { "off" }
            );
        }
        Command::ResetAll { password } => {
            tracker.full_reset(&password).await?;
            println!("All data deleted.");
        }
    }
    Ok(())
}

/// Parses `HH:MM` on `date`, or a full `YYYY-MM-DDTHH:MM` timestamp.
fn parse_time(date: NaiveDate, raw: &str) -> TrackerResult<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(at);
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map(|time| date.and_time(time))
        .map_err(|_| {
            TrackerError::validation("time", format!("'{raw}' is neither HH:MM nor YYYY-MM-DDTHH:MM"))
        })
}

fn parse_durations(raw: &str) -> TrackerResult<ShiftDurations> {
    let parts = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<Decimal>()
                .map_err(|e| TrackerError::validation("durations", e.to_string()))
        })
        .collect::<TrackerResult<Vec<_>>>()?;
    match parts.as_slice() {
        [morning, afternoon, night] => Ok(ShiftDurations {
            morning: *morning,
            afternoon: *afternoon,
            night: *night,
        }),
        _ => Err(TrackerError::validation(
            "durations",
            "expected three comma-separated values for M, T and N",
        )),
    }
}

fn print_config(tracker: &Tracker) -> TrackerResult<()> {
    let config = tracker.worker().require()?;
    let symbol = &tracker.settings().currency_symbol;
    println!("Name:        {}", config.name);
    println!("Hourly rate: {}", format_money(config.hourly_rate, symbol));
    for shift_type in ShiftType::ALL {
        println!(
            "{:<12} {}",
            format!("{}:", shift_type.label()),
            format_hours_short(config.shift_durations.get(shift_type))
        );
    }
    Ok(())
}

fn print_week_summary(tracker: &Tracker) -> TrackerResult<()> {
    let Some(week) = tracker.weeks().current_week() else {
        println!("No week is open.");
        return Ok(());
    };
    println!("Week {} to {}", week.start_date, week.end_date);
    print_days(tracker, week);
    let stats = tracker.stats_for(week)?;
    print_stats(&stats, &tracker.settings().currency_symbol);
    Ok(())
}

fn print_days(tracker: &Tracker, week: &Week) {
    let now = tracker.now();
    for day in &week.days {
        if day.shifts.is_empty() {
            println!("  {} {}  rest", day.date.format("%a"), day.date);
            continue;
        }
        for shift in &day.shifts {
            let worked = if shift.is_active() {
                format!(
                    "{} so far",
                    format_minutes(active_minutes(shift.check_in_time, now))
                )
            } else {
                format_hours_short(shift_hours(shift))
            };
            let extra = if shift.is_extra { " [extra]" } else { "" };
            println!(
                "  {} {}  {}  {:<8} {}{}",
                day.date.format("%a"),
                day.date,
                shift.shift_type,
                worked,
                tracker.shift_status(shift),
                extra
            );
        }
    }
}

fn print_stats(stats: &PayStats, symbol: &str) {
    println!(
        "Hours: {} (normal {}, extra {})",
        format_hours_short(stats.total_hours),
        format_hours_short(stats.normal_hours),
        format_hours_short(stats.extra_hours)
    );
    println!(
        "Pay:   {} (normal {}, extra {})",
        format_money(stats.total_pay, symbol),
        format_money(stats.normal_pay, symbol),
        format_money(stats.extra_pay, symbol)
    );
}

fn print_history(tracker: &Tracker) -> TrackerResult<()> {
    let symbol = &tracker.settings().currency_symbol;
    let mut any = false;
    for week in tracker.weeks().history_recent_first() {
        any = true;
        let stats = tracker.stats_for(week)?;
        println!(
            "{} to {}  {:>6}  {}",
            week.start_date,
            week.end_date,
            format_hours_short(stats.total_hours),
            format_money(stats.total_pay, symbol)
        );
    }
    if !any {
        println!("No closed weeks yet.");
    }
    Ok(())
}
