//! Worktime Engine for monthly attendance statistics
//!
//! This crate turns daily clock-in/clock-out rows into per-day worked hours,
//! leave hours and lateness, then aggregates them into month statistics
//! measured against a target, using a calendar of legal holidays and makeup
//! workdays.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod source;
