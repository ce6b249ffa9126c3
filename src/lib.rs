//! Delivery / payout KPI engine shared by the desktop dashboard and the
//! command-line tools.

pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod report;
