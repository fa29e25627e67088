//! The tracker facade.
//!
//! [`Tracker`] wires the stores to a shared storage backend, clock and
//! settings, and exposes the operations that need more than one of them:
//! first-run setup, validated shift edits, pay summaries and the full reset.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::{PayRate, PayStats, ShiftStatus, week_stats};
use crate::clock::Clock;
use crate::config::TrackerSettings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Shift, ShiftPatch, ShiftType, Week, WorkerConfig};
use crate::planning::suggested_times;
use crate::storage::{KeyValueStore, keys};
use crate::store::{PreferencesStore, WeekStore, WorkerStore, verify_master_password};
use crate::validation::validate_shift_patch;

/// Entry point for everything the tracker does.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use shift_tracker::clock::FixedClock;
/// use shift_tracker::config::TrackerSettings;
/// use shift_tracker::models::ShiftType;
/// use shift_tracker::storage::MemoryStore;
/// use shift_tracker::tracker::Tracker;
/// use chrono::{Duration, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// runtime.block_on(async {
///     let now = NaiveDateTime::parse_from_str("2026-01-14 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///     let clock = Arc::new(FixedClock::new(now));
///     let mut tracker = Tracker::open(Arc::new(MemoryStore::new()), clock.clone(), TrackerSettings::default())
///         .await
///         .unwrap();
///
///     tracker.setup("Rosa", Decimal::new(10, 0)).await.unwrap();
///     tracker.weeks_mut().check_in(now.date(), ShiftType::Morning).await.unwrap();
///     clock.advance(Duration::hours(4));
///     tracker.weeks_mut().check_out(now.date(), ShiftType::Morning).await.unwrap();
///
///     let stats = tracker.current_week_stats().unwrap().unwrap();
///     assert_eq!(stats.total_pay, Decimal::new(40, 0));
/// });
/// ```
pub struct Tracker {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    settings: TrackerSettings,
    worker: WorkerStore,
    weeks: WeekStore,
    preferences: PreferencesStore,
}

impl Tracker {
    /// Loads every store from `storage`.
    ///
    /// Unreadable documents do not fail the load; they are reported by
    /// [`Tracker::load_warnings`].
    pub async fn open(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        settings: TrackerSettings,
    ) -> TrackerResult<Self> {
        let worker = WorkerStore::load(storage.clone(), clock.clone()).await?;
        let weeks = WeekStore::load(storage.clone(), clock.clone()).await?;
        let preferences = PreferencesStore::load(storage.clone()).await?;
        Ok(Self {
            storage,
            clock,
            settings,
            worker,
            weeks,
            preferences,
        })
    }

    /// Returns the documents that could not be loaded and were replaced by
    /// their empty values.
    pub fn load_warnings(&self) -> impl Iterator<Item = &TrackerError> {
        self.worker
            .load_errors()
            .iter()
            .chain(self.weeks.load_errors())
            .chain(self.preferences.load_errors())
    }

    /// Returns the active settings.
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Returns the current time from the tracker's clock.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Returns today's date from the tracker's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Returns the worker configuration store.
    pub fn worker(&self) -> &WorkerStore {
        &self.worker
    }

    /// Returns the worker configuration store for changes.
    pub fn worker_mut(&mut self) -> &mut WorkerStore {
        &mut self.worker
    }

    /// Returns the week store.
    pub fn weeks(&self) -> &WeekStore {
        &self.weeks
    }

    /// Returns the week store for changes.
    pub fn weeks_mut(&mut self) -> &mut WeekStore {
        &mut self.weeks
    }

    /// Returns the preferences store.
    pub fn preferences(&self) -> &PreferencesStore {
        &self.preferences
    }

    /// Returns the preferences store for changes.
    pub fn preferences_mut(&mut self) -> &mut PreferencesStore {
        &mut self.preferences
    }

    /// Completes first-run setup with the default durations and template
    /// from the settings, then opens the week containing today.
    pub async fn setup(&mut self, name: &str, hourly_rate: Decimal) -> TrackerResult<()> {
        let mut config = WorkerConfig::new(name.trim(), hourly_rate, self.clock.now());
        config.shift_durations = self.settings.default_shift_durations.clone();
        config.weekly_schedule = self.settings.default_weekly_schedule.clone();
        self.worker.save(config).await?;
        info!(name = name.trim(), "Setup completed");
        self.ensure_current_week().await?;
        Ok(())
    }

    /// Opens the week containing today if none is open.
    ///
    /// Returns `true` when a new week was started.
    pub async fn ensure_current_week(&mut self) -> TrackerResult<bool> {
        let worker = self.worker.require()?;
        self.weeks
            .ensure_current_week(worker, self.settings.week_start)
            .await
    }

    /// Returns the pay rate of the configured worker.
    pub fn pay_rate(&self) -> TrackerResult<PayRate> {
        let worker = self.worker.require()?;
        Ok(PayRate::for_worker(worker, self.settings.extra_multiplier))
    }

    /// Returns hours and pay of `week` at the worker's rate.
    pub fn stats_for(&self, week: &Week) -> TrackerResult<PayStats> {
        Ok(week_stats(week, &self.pay_rate()?))
    }

    /// Returns hours and pay of the current week, or `None` if no week is
    /// open.
    pub fn current_week_stats(&self) -> TrackerResult<Option<PayStats>> {
        let rate = self.pay_rate()?;
        Ok(self.weeks.current_week().map(|week| week_stats(week, &rate)))
    }

    /// Classifies a shift against the expected windows.
    pub fn shift_status(&self, shift: &Shift) -> ShiftStatus {
        ShiftStatus::of(shift, &self.settings)
    }

    /// Suggests check-in and check-out times for a shift on `date`.
    pub fn suggested_times(
        &self,
        date: NaiveDate,
        shift_type: ShiftType,
    ) -> TrackerResult<(NaiveDateTime, NaiveDateTime)> {
        let worker = self.worker.require()?;
        Ok(suggested_times(
            date,
            shift_type,
            &worker.shift_durations,
            &self.settings,
        ))
    }

    /// Validates `patch` against the existing shift and applies it.
    pub async fn edit_shift(
        &mut self,
        date: NaiveDate,
        shift_type: ShiftType,
        patch: &ShiftPatch,
    ) -> TrackerResult<()> {
        let Some(week) = self.weeks.current_week() else {
            return Ok(());
        };
        let shift = week
            .day(date)
            .and_then(|day| day.shift(shift_type))
            .ok_or(TrackerError::ShiftNotFound { date, shift_type })?;
        validate_shift_patch(shift, patch, self.settings.note_max_length)?;
        self.weeks.update_shift(date, shift_type, patch).await
    }

    /// Deletes every stored document and clears all in-memory state.
    ///
    /// Nothing changes unless `password` matches the master password. When
    /// a key cannot be removed the remaining keys are still attempted and
    /// the first failure is returned.
    pub async fn full_reset(&mut self, password: &str) -> TrackerResult<()> {
        verify_master_password(password)?;

        self.worker.forget();
        self.weeks.forget();
        self.preferences.forget();

        let mut first_error = None;
        for key in keys::ALL {
            if let Err(e) = self.storage.remove(key).await {
                warn!(key, error = %e, "Failed to remove key during full reset");
                first_error.get_or_insert(e);
            }
        }
        info!("All tracker data reset");
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("settings", &self.settings)
            .field("worker", &self.worker)
            .field("weeks", &self.weeks)
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}
