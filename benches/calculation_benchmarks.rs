//! Performance benchmarks for the Worktime Engine.
//!
//! This benchmark suite covers the month pipeline at three levels:
//! - Single-day worked hours calculation
//! - Building and aggregating a full month of rows
//! - The `/calculate` endpoint end to end over an in-memory source
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use worktime_engine::api::{AppState, create_router};
use worktime_engine::calculation::{
    BuildContext, aggregate_month, build_daily_records, calculate_worked_hours,
};
use worktime_engine::calendar::HolidayCalendar;
use worktime_engine::config::{ConfigLoader, WorkHoursConfig};
use worktime_engine::models::{ClockTime, LeaveClassifier, LeaveType, RawDay, YearMonth};
use worktime_engine::source::MemoryAttendanceSource;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn october() -> YearMonth {
    "2025-10".parse().expect("valid month")
}

/// Rows for the first `day_count` days of October 2025, with a mix of
/// regular days, late arrivals, leave and next-day clock-outs on weekdays.
fn create_month_rows(day_count: usize) -> Vec<RawDay> {
    october()
        .days()
        .take(day_count)
        .map(|date: NaiveDate| {
            let row = RawDay::for_date(date.format("%Y-%m-%d").to_string());
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                return row;
            }
            match date.day() % 5 {
                0 => row.with_leave("上午").with_clock("13:00", "21:30"),
                1 => row.with_clock("9:40", "20:10"),
                2 => row.with_leave("自定义").with_leave_range("14:00", "16:30"),
                3 => row.with_clock("9:00", "1:15+1"),
                _ => row.with_clock("8:55", "18:20"),
            }
        })
        .collect()
}

/// Benchmark: Worked hours for a single day.
fn bench_single_day(c: &mut Criterion) {
    let config = WorkHoursConfig::default();
    let clock_in: ClockTime = "9:00".parse().expect("valid clock");
    let clock_out: ClockTime = "20:30".parse().expect("valid clock");

    c.bench_function("single_day_worked_hours", |b| {
        b.iter(|| {
            black_box(calculate_worked_hours(
                black_box(clock_in),
                black_box(clock_out),
                LeaveType::None,
                &config,
            ))
        })
    });
}

/// Benchmark: Build and aggregate months of increasing length.
fn bench_month_pipeline(c: &mut Criterion) {
    let loader = ConfigLoader::load("./config").expect("Failed to load config");
    let calendar = loader.holiday_calendar();
    let classifier = loader.leave_classifier();
    let config = loader.work_hours().clone();
    let reference_date = NaiveDate::from_ymd_opt(2025, 10, 15).expect("valid date");
    let context = BuildContext {
        calendar: &calendar,
        config: &config,
        classifier: &classifier,
        reference_date,
    };

    let mut group = c.benchmark_group("month_pipeline");

    for day_count in [7usize, 14, 31] {
        let rows = create_month_rows(day_count);

        group.throughput(Throughput::Elements(day_count as u64));
        group.bench_with_input(BenchmarkId::new("days", day_count), &rows, |b, rows| {
            b.iter(|| {
                let records = build_daily_records(rows, &context);
                black_box(aggregate_month(
                    october(),
                    records,
                    reference_date,
                    &calendar,
                    &config,
                ))
            })
        });
    }

    group.finish();
}

/// Benchmark: `/calculate` over a full month held in memory.
fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("runtime");
    let source = MemoryAttendanceSource::new();
    source.insert_month(october(), create_month_rows(31));
    let state = AppState::new(
        WorkHoursConfig::default(),
        HolidayCalendar::with_default_schedule().expect("bundled schedule"),
        LeaveClassifier::default(),
        Arc::new(source),
    )
    .with_reference_date(NaiveDate::from_ymd_opt(2025, 10, 15).expect("valid date"));
    let router = create_router(state);

    c.bench_function("calculate_endpoint_month", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .uri("/api/workhours/calculate?yearMonth=2025-10")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_day,
    bench_month_pipeline,
    bench_calculate_endpoint,
);
criterion_main!(benches);
