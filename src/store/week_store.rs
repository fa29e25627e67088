//! Persistent week store.

use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{ShiftPatch, ShiftType, Week, WorkerConfig};
use crate::planning::{build_week, week_window};
use crate::storage::{KeyValueStore, keys, load_json_or_recover, save_json};

use super::week_state::WeekState;

/// Which documents a mutation touched.
#[derive(Debug, Clone, Copy)]
enum Touched {
    Current,
    History,
    Both,
}

/// Owns the [`WeekState`] and writes it through to storage.
///
/// Every mutation changes memory first and then persists. A failed write is
/// logged and returned as [`TrackerError::Persistence`](crate::error::TrackerError::Persistence),
/// but the in-memory change is kept.
pub struct WeekStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    state: WeekState,
    load_errors: Vec<TrackerError>,
}

impl WeekStore {
    /// Creates a store around an existing state without reading storage.
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, state: WeekState) -> Self {
        Self {
            storage,
            clock,
            state,
            load_errors: Vec::new(),
        }
    }

    /// Reads the current week and history from storage.
    ///
    /// A document that cannot be read or parsed is logged and replaced by
    /// its empty value; see [`WeekStore::load_errors`].
    pub async fn load(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> TrackerResult<Self> {
        let mut load_errors = Vec::new();
        let current: Option<Week> =
            load_json_or_recover::<Option<Week>>(storage.as_ref(), keys::CURRENT_WEEK, &mut load_errors)
                .await
                .flatten();
        let history: Vec<Week> =
            load_json_or_recover(storage.as_ref(), keys::WEEK_HISTORY, &mut load_errors)
                .await
                .unwrap_or_default();
        debug!(
            current = current.as_ref().map(|w| w.id.as_str()),
            history = history.len(),
            "Loaded week state"
        );
        let mut store = Self::new(storage, clock, WeekState::new(current, history));
        store.load_errors = load_errors;
        Ok(store)
    }

    /// Returns the failures skipped while loading.
    pub fn load_errors(&self) -> &[TrackerError] {
        &self.load_errors
    }

    /// Returns the full state.
    pub fn state(&self) -> &WeekState {
        &self.state
    }

    /// Returns the open week, if any.
    pub fn current_week(&self) -> Option<&Week> {
        self.state.current.as_ref()
    }

    /// Returns closed weeks in the order they were closed.
    pub fn history(&self) -> &[Week] {
        &self.state.history
    }

    /// Returns closed weeks, most recently closed first.
    pub fn history_recent_first(&self) -> impl Iterator<Item = &Week> {
        self.state.history_recent_first()
    }

    /// Builds the week starting at `start_date` from the worker's template
    /// and makes it current.
    pub async fn start_week(
        &mut self,
        start_date: NaiveDate,
        worker: &WorkerConfig,
    ) -> TrackerResult<()> {
        let week = build_week(
            start_date,
            &worker.weekly_schedule,
            &worker.shift_durations,
            self.clock.now(),
        );
        let week_id = week.id.clone();
        self.state.start_week(week)?;
        info!(%week_id, "Started week");
        self.persist(Touched::Current).await
    }

    /// Starts the week containing today if no week is open.
    ///
    /// Returns `true` when a new week was started.
    pub async fn ensure_current_week(
        &mut self,
        worker: &WorkerConfig,
        week_start: Weekday,
    ) -> TrackerResult<bool> {
        if self.state.current.is_some() {
            return Ok(false);
        }
        let window = week_window(self.clock.today(), week_start);
        self.start_week(window.start_date, worker).await?;
        Ok(true)
    }

    /// Adds a planned shift.
    pub async fn add_shift(&mut self, date: NaiveDate, shift_type: ShiftType) -> TrackerResult<()> {
        let changed = self.state.add_shift(date, shift_type, self.clock.now())?;
        if changed {
            info!(%date, %shift_type, "Added shift");
            self.persist(Touched::Current).await?;
        }
        Ok(())
    }

    /// Checks in now, creating the shift if needed.
    pub async fn check_in(&mut self, date: NaiveDate, shift_type: ShiftType) -> TrackerResult<()> {
        let now = self.clock.now();
        let changed = self.state.check_in(date, shift_type, now)?;
        if changed {
            info!(%date, %shift_type, at = %now, "Checked in");
            self.persist(Touched::Current).await?;
        }
        Ok(())
    }

    /// Checks out now.
    pub async fn check_out(&mut self, date: NaiveDate, shift_type: ShiftType) -> TrackerResult<()> {
        let now = self.clock.now();
        let changed = self.state.check_out(date, shift_type, now)?;
        if changed {
            info!(%date, %shift_type, at = %now, "Checked out");
            self.persist(Touched::Current).await?;
        }
        Ok(())
    }

    /// Merges `patch` into an existing shift.
    pub async fn update_shift(
        &mut self,
        date: NaiveDate,
        shift_type: ShiftType,
        patch: &ShiftPatch,
    ) -> TrackerResult<()> {
        let changed = self
            .state
            .update_shift(date, shift_type, patch, self.clock.now())?;
        if changed {
            info!(%date, %shift_type, "Updated shift");
            self.persist(Touched::Current).await?;
        }
        Ok(())
    }

    /// Deletes a shift if present.
    pub async fn delete_shift(&mut self, date: NaiveDate, shift_type: ShiftType) -> TrackerResult<()> {
        if self.state.delete_shift(date, shift_type) {
            info!(%date, %shift_type, "Deleted shift");
            self.persist(Touched::Current).await?;
        }
        Ok(())
    }

    /// Closes the current week and archives it.
    ///
    /// Returns the id of the closed week, or `None` if no week was open.
    pub async fn close_week(&mut self) -> TrackerResult<Option<String>> {
        let Some(week_id) = self.state.close_week(self.clock.now()) else {
            return Ok(None);
        };
        info!(%week_id, history = self.state.history.len(), "Closed week");
        self.persist(Touched::Both).await?;
        Ok(Some(week_id))
    }

    /// Discards the current week without archiving it.
    pub async fn reset_current_week(&mut self) -> TrackerResult<()> {
        if self.state.reset_current_week() {
            info!("Reset current week");
            self.persist(Touched::Current).await?;
        }
        Ok(())
    }

    /// Deletes every closed week.
    pub async fn clear_history(&mut self) -> TrackerResult<()> {
        if self.state.clear_history() {
            info!("Cleared week history");
            self.persist(Touched::History).await?;
        }
        Ok(())
    }

    /// Writes the current week and history again.
    ///
    /// Retries a write that failed earlier; the in-memory state is the
    /// source of truth.
    pub async fn flush(&self) -> TrackerResult<()> {
        self.persist(Touched::Both).await
    }

    /// Drops the in-memory state without touching storage.
    pub(crate) fn forget(&mut self) {
        self.state = WeekState::default();
        self.load_errors.clear();
    }

    async fn persist(&self, touched: Touched) -> TrackerResult<()> {
        let result = match touched {
            Touched::Current => self.save_current().await,
            Touched::History => self.save_history().await,
            // a closed week must stay in at least one document
            Touched::Both => match self.save_history().await {
                Ok(()) => self.save_current().await,
                Err(e) => Err(e),
            },
        };
        if let Err(e) = &result {
            warn!(error = %e, "Week state kept in memory but not persisted");
        }
        result
    }

    async fn save_current(&self) -> TrackerResult<()> {
        match &self.state.current {
            Some(week) => save_json(self.storage.as_ref(), keys::CURRENT_WEEK, week).await,
            None => self.storage.remove(keys::CURRENT_WEEK).await,
        }
    }

    async fn save_history(&self) -> TrackerResult<()> {
        save_json(self.storage.as_ref(), keys::WEEK_HISTORY, &self.state.history).await
    }
}

impl std::fmt::Debug for WeekStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeekStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::TrackerError;
    use crate::storage::MemoryStore;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn worker() -> WorkerConfig {
        WorkerConfig::new("Rosa", Decimal::new(10, 0), at("2026-01-01 09:00:00"))
    }

    #[tokio::test]
    async fn test_ensure_current_week_uses_window_of_today() {
        let storage = Arc::new(MemoryStore::new());
        // Saturday
        let clock = Arc::new(FixedClock::new(at("2026-01-17 10:00:00")));
        let mut store = WeekStore::load(storage.clone(), clock).await.unwrap();

        assert!(store.ensure_current_week(&worker(), Weekday::Wed).await.unwrap());
        assert_eq!(store.current_week().unwrap().id, "week_2026-01-14");
        assert!(!store.ensure_current_week(&worker(), Weekday::Wed).await.unwrap());
        assert!(storage.get(keys::CURRENT_WEEK).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_state_survives_reload() {
        let storage = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(at("2026-01-14 08:00:00")));
        let date = at("2026-01-14 08:00:00").date();

        let mut store = WeekStore::load(storage.clone(), clock.clone()).await.unwrap();
        store.start_week(date, &worker()).await.unwrap();
        store.check_in(date, ShiftType::Morning).await.unwrap();

        let reloaded = WeekStore::load(storage, clock).await.unwrap();
        assert_eq!(reloaded.state(), store.state());
    }

    #[tokio::test]
    async fn test_failed_persist_keeps_memory() {
        let storage = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(at("2026-01-14 08:00:00")));
        let date = at("2026-01-14 08:00:00").date();
        let mut store = WeekStore::load(storage.clone(), clock).await.unwrap();
        store.start_week(date, &worker()).await.unwrap();

        storage.set_fail_writes(true);
        let err = store.check_in(date, ShiftType::Morning).await.unwrap_err();
        assert!(matches!(err, TrackerError::Persistence { .. }));

        let shift = store.current_week().unwrap().day(date).unwrap().shift(ShiftType::Morning).unwrap();
        assert!(shift.is_active());
    }

    #[tokio::test]
    async fn test_failed_history_write_keeps_closed_week_on_disk() {
        let storage = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(at("2026-01-14 08:00:00")));
        let date = at("2026-01-14 08:00:00").date();
        let mut store = WeekStore::load(storage.clone(), clock.clone()).await.unwrap();
        store.start_week(date, &worker()).await.unwrap();
        let week_id = store.current_week().unwrap().id.clone();

        storage.set_failing_key(Some(keys::WEEK_HISTORY)).await;
        let err = store.close_week().await.unwrap_err();
        assert!(matches!(err, TrackerError::Persistence { .. }));

        let reloaded = WeekStore::load(storage.clone(), clock.clone()).await.unwrap();
        assert_eq!(reloaded.current_week().unwrap().id, week_id);
        assert!(reloaded.history().is_empty());

        storage.set_failing_key(None).await;
        store.flush().await.unwrap();
        let reloaded = WeekStore::load(storage.clone(), clock).await.unwrap();
        assert!(reloaded.current_week().is_none());
        assert_eq!(reloaded.history()[0].id, week_id);
        assert!(storage.get(keys::CURRENT_WEEK).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reset_removes_current_week_key() {
        let storage = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(at("2026-01-14 08:00:00")));
        let date = at("2026-01-14 08:00:00").date();
        let mut store = WeekStore::load(storage.clone(), clock).await.unwrap();
        store.start_week(date, &worker()).await.unwrap();

        store.reset_current_week().await.unwrap();
        assert!(storage.get(keys::CURRENT_WEEK).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_document_loads_as_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(keys::CURRENT_WEEK, "{not json".to_string())
            .await
            .unwrap();
        storage.set(keys::WEEK_HISTORY, "[]".to_string()).await.unwrap();
        let clock = Arc::new(FixedClock::new(at("2026-01-14 08:00:00")));

        let store = WeekStore::load(storage, clock).await.unwrap();
        assert!(store.current_week().is_none());
        assert!(store.history().is_empty());
        assert_eq!(store.load_errors().len(), 1);
        assert!(store.load_errors()[0].is_persistence());
    }

    #[tokio::test]
    async fn test_legacy_null_current_week_loads_as_none() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(keys::CURRENT_WEEK, "null".to_string()).await.unwrap();
        let clock = Arc::new(FixedClock::new(at("2026-01-14 08:00:00")));

        let store = WeekStore::load(storage, clock).await.unwrap();
        assert!(store.current_week().is_none());
        assert!(store.load_errors().is_empty());
    }
}
