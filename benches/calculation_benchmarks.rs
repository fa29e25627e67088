//! Performance benchmarks for the shift tracker.
//!
//! This benchmark suite covers the hot paths behind every status refresh:
//! - Pay totals for a full week
//! - Building a week from the template
//! - A check-in / check-out cycle through the in-memory store
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use shift_tracker::calculation::{PayRate, week_stats};
use shift_tracker::clock::FixedClock;
use shift_tracker::models::{Shift, ShiftDurations, ShiftType, Week, default_weekly_schedule};
use shift_tracker::planning::build_week;
use shift_tracker::storage::MemoryStore;
use shift_tracker::store::{WeekState, WeekStore};

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 14).unwrap()
}

fn created_at() -> NaiveDateTime {
    start_date().and_hms_opt(7, 0, 0).unwrap()
}

/// Creates a week with `per_day` completed 4-hour shifts on every day.
fn create_worked_week(per_day: usize) -> Week {
    let mut week = build_week(start_date(), &[], &ShiftDurations::default(), created_at());
    for (i, day) in week.days.iter_mut().enumerate() {
        for shift_type in ShiftType::ALL.into_iter().take(per_day) {
            let check_in = day.date.and_hms_opt(8, 0, 0).unwrap();
            let mut shift = Shift::checked_in(shift_type, check_in);
            shift.check_out_time = Some(check_in + Duration::hours(4));
            shift.is_extra = i % 3 == 0;
            day.shifts.push(shift);
        }
    }
    week
}

/// Benchmark: pay totals for weeks of increasing size.
fn bench_week_stats(c: &mut Criterion) {
    let rate = PayRate::new(Decimal::new(10, 0));
    let mut group = c.benchmark_group("week_stats");

    for per_day in [1usize, 2, 3] {
        let week = create_worked_week(per_day);
        group.throughput(Throughput::Elements((per_day * 7) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(per_day * 7), &week, |b, week| {
            b.iter(|| black_box(week_stats(black_box(week), &rate)))
        });
    }

    group.finish();
}

/// Benchmark: building a week from the default template.
fn bench_build_week(c: &mut Criterion) {
    let schedule = default_weekly_schedule();
    let durations = ShiftDurations::default();

    c.bench_function("build_week", |b| {
        b.iter(|| {
            black_box(build_week(
                black_box(start_date()),
                &schedule,
                &durations,
                created_at(),
            ))
        })
    });
}

/// Benchmark: check-in and check-out persisted through the memory store.
fn bench_check_in_out(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let week = build_week(
        start_date(),
        &default_weekly_schedule(),
        &ShiftDurations::default(),
        created_at(),
    );

    c.bench_function("check_in_out", |b| {
        b.to_async(&rt).iter(|| {
            let week = week.clone();
            async move {
                let clock = Arc::new(FixedClock::new(created_at()));
                let mut store = WeekStore::new(
                    Arc::new(MemoryStore::new()),
                    clock.clone(),
                    WeekState::new(Some(week), Vec::new()),
                );
                store.check_in(start_date(), ShiftType::Morning).await.unwrap();
                clock.advance(Duration::hours(4));
                store.check_out(start_date(), ShiftType::Morning).await.unwrap();
                black_box(store)
            }
        })
    });
}

criterion_group!(benches, bench_week_stats, bench_build_week, bench_check_in_out);
criterion_main!(benches);
