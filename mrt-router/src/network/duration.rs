//! In-train travel times.
//!
//! Each line has a table of cumulative minutes from its first station.
//! The ride between two stations on the same line is the difference of
//! their entries.

use crate::domain::{Line, Station};

use super::NetworkError;

/// Minutes from R02.
static RED: [u32; 27] = [
    0, 2, 4, 6, 8, 10, 13, 15, // R02-R09
    17, 18, 20, 21, 23, 26, 28, 30, 31, 33, // R10-R19
    35, 37, 39, 41, 44, 45, 48, 51, 54, // R20-R28
];

/// Minutes from G01.
static GREEN: [u32; 19] = [
    0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24, 26, 28, 31, 32, 35, 37,
];

/// Minutes from BL01.
static BLUE: [u32; 23] = [
    0, 3, 6, 8, 11, 13, 14, 17, 18, 22, 24, 27, 29, 30, 33, 34, 36, 38, 40, 41, 44, 46, 48,
];

/// Minutes from BR01.
static BROWN: [u32; 24] = [
    0, 2, 3, 5, 7, 10, 11, 14, 15, 17, 19, 21, 23, 27, 29, 31, 33, 34, 36, 37, 40, 42, 43, 45,
];

/// Minutes from Y07.
static YELLOW: [u32; 14] = [0, 3, 5, 7, 9, 12, 15, 16, 19, 21, 25, 28, 30, 33];

/// Minutes from O01 along the Xinzhuang branch.
static ORANGE: [u32; 21] = [
    0, 2, 4, 6, 10, 14, 17, 19, 21, 23, 25, 26, // O01-O12
    29, 31, 33, 36, 38, 40, 43, 45, 48, // O13-O21
];

/// Minutes from O01 along the Luzhou branch, O50-O54.
static ORANGE_LUZHOU: [u32; 5] = [29, 32, 33, 35, 38];

/// Minutes from the first station of the line (or of the Orange trunk).
pub fn cumulative_minutes(station: Station) -> u32 {
    let n = usize::from(station.number());
    match station.line() {
        Line::R => RED[n - 2],
        Line::G => GREEN[n - 1],
        Line::BL => BLUE[n - 1],
        Line::BR => BROWN[n - 1],
        Line::Y => YELLOW[n - 7],
        Line::O if n >= 50 => ORANGE_LUZHOU[n - 50],
        Line::O => ORANGE[n - 1],
    }
}

/// Ride time between two stations served by one train.
///
/// Fails when the stations are on different lines, or on different
/// branches of the Orange line.
pub fn line_duration(a: Station, b: Station) -> Result<u32, NetworkError> {
    if a.line() != b.line() {
        return Err(NetworkError::DifferentLines(a, b));
    }
    if !a.shares_track(&b) {
        return Err(NetworkError::CrossBranch(a, b));
    }
    Ok(cumulative_minutes(a).abs_diff(cumulative_minutes(b)))
}
