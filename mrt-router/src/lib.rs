//! Taipei Metro route planner.
//!
//! Answers: "leaving this station now, how do I get to that one?" over the
//! Taipei MRT network, using published timetables where they exist and
//! headway estimates on the Brown line.

pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod timetable;
pub mod web;
