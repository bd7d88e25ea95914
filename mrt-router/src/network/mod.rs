//! Static network model: interchanges, transfer times and ride times.

mod complex;
mod duration;
mod transfers;

pub use complex::{StationNode, complexes, equivalent_stations, is_interchange};
pub use duration::{cumulative_minutes, line_duration};
pub use transfers::{TransferTable, TransferTableBuilder, taipei_transfers};

use crate::domain::Station;

/// Errors from network lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// The two stations are on different lines.
    #[error("stations {0} and {1} are on different lines")]
    DifferentLines(Station, Station),

    /// The two stations are on different Orange line branches.
    #[error("no train runs between {0} and {1}: they are on different branches")]
    CrossBranch(Station, Station),

    /// The two stations do not share an interchange.
    #[error("stations {0} and {1} are not transferable")]
    NotTransferable(Station, Station),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let a = Station::parse("O13").unwrap();
        let b = Station::parse("O50").unwrap();
        assert_eq!(
            NetworkError::CrossBranch(a, b).to_string(),
            "no train runs between O13 and O50: they are on different branches"
        );

        let c = Station::parse("R02").unwrap();
        assert_eq!(
            NetworkError::NotTransferable(a, c).to_string(),
            "stations O13 and R02 are not transferable"
        );
    }
}
