//! # ClinicDesk Core
//!
//! Domain types and the availability slot generator shared by the database
//! and API crates.
//!
//! - **models**: availability windows, weekday masks and time slots
//! - **ids**: strongly typed identifiers parsed at the HTTP edge
//! - **calendar**: calendar-date parsing and wall-clock helpers
//! - **slots**: the pure slot generator
//! - **store**: the data-access seam the generator reads windows through
//! - **service**: ties a store to the generator for one resource and date

pub mod calendar;
pub mod errors;
pub mod ids;
pub mod models;
pub mod service;
pub mod slots;
pub mod store;
