//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{InvalidStation, Language, Line, Station};
use crate::network::{TransferTable, equivalent_stations, is_interchange};
use crate::planner::{RouteConstraints, RoutedPath};
use crate::timetable::TerminalDepartures;

/// Query for the station list.
#[derive(Debug, Deserialize)]
pub struct StationsQuery {
    /// Only stations on this line (e.g. "BL")
    pub line: Option<String>,

    /// Name language (defaults to English)
    pub lang: Option<String>,
}

/// Query carrying only a name language.
#[derive(Debug, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

/// Query for a departure board.
#[derive(Debug, Deserialize)]
pub struct DeparturesQuery {
    /// Service time in HH:MM format (defaults to now)
    pub time: Option<String>,

    /// Day type, 1 (Monday) to 7 (Sunday) (defaults to today)
    pub day: Option<u8>,

    /// Departures per terminal
    pub limit: Option<usize>,

    /// Run the holiday timetable
    #[serde(default)]
    pub holiday: bool,

    pub lang: Option<String>,
}

/// How a route query ranks its results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMode {
    #[default]
    Fastest,
    FewestInterchanges,
    Custom,
}

/// Request to plan a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin station code
    pub from: String,

    /// Destination station code
    pub to: String,

    /// Service time in HH:MM format (defaults to now)
    pub time: Option<String>,

    /// Day type, 1 (Monday) to 7 (Sunday) (defaults to today)
    pub day: Option<u8>,

    /// Number of routes wanted, at most 10
    pub k: Option<usize>,

    #[serde(default)]
    pub mode: RouteMode,

    /// Only read in custom mode
    #[serde(default)]
    pub constraints: ConstraintsDto,

    #[serde(default)]
    pub holiday: bool,

    pub lang: Option<String>,
}

/// Constraints of a custom route query.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConstraintsDto {
    pub must_stations: Vec<String>,
    pub avoid_stations: Vec<String>,
    pub avoid_lines: Vec<String>,
    pub must_lines: Vec<String>,
    pub minimize_time: Option<bool>,
    pub minimize_interchanges: Option<bool>,
    pub max_interchanges: Option<usize>,
}

impl ConstraintsDto {
    /// Parse codes into constraints; unset fields take the defaults.
    pub fn into_constraints(self) -> Result<RouteConstraints, InvalidStation> {
        let defaults = RouteConstraints::default();
        Ok(RouteConstraints {
            must_stations: parse_stations(&self.must_stations)?,
            avoid_stations: parse_stations(&self.avoid_stations)?,
            avoid_lines: parse_lines(&self.avoid_lines)?,
            must_lines: parse_lines(&self.must_lines)?,
            minimize_time: self.minimize_time.unwrap_or(defaults.minimize_time),
            minimize_interchanges: self
                .minimize_interchanges
                .unwrap_or(defaults.minimize_interchanges),
            max_interchanges: self.max_interchanges.unwrap_or(defaults.max_interchanges),
        })
    }
}

fn parse_stations(codes: &[String]) -> Result<Vec<Station>, InvalidStation> {
    codes.iter().map(|c| Station::parse(c.trim())).collect()
}

fn parse_lines(codes: &[String]) -> Result<Vec<Line>, InvalidStation> {
    codes.iter().map(|c| Line::parse(c.trim())).collect()
}

/// A line and its station codes.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub code: String,
    pub stations: Vec<String>,
}

/// Response listing all lines.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineResult>,
}

/// A station in a list.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub code: String,
    pub line: String,
    pub name: String,

    /// Whether the station is part of an interchange
    pub interchange: bool,
}

impl StationResult {
    pub fn from_station(station: Station, lang: Language) -> Self {
        Self {
            code: station.code(),
            line: station.line().to_string(),
            name: station.name(lang).to_string(),
            interchange: is_interchange(station),
        }
    }
}

/// Response listing stations.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// A station's names in every language.
#[derive(Debug, Serialize)]
pub struct NamesResult {
    pub zh: String,
    pub en: String,
    pub ja: String,
    pub ko: String,
}

/// A walking connection to another platform.
#[derive(Debug, Serialize)]
pub struct TransferResult {
    pub to: String,
    pub minutes: u32,
}

/// Details of one station.
#[derive(Debug, Serialize)]
pub struct StationDetail {
    pub code: String,
    pub line: String,
    pub name: String,
    pub names: NamesResult,

    /// Codes of the same physical station on other lines
    pub equivalent: Vec<String>,

    pub transfers: Vec<TransferResult>,
}

impl StationDetail {
    pub fn from_station(station: Station, lang: Language, transfers: &TransferTable) -> Self {
        let names = station.names();
        Self {
            code: station.code(),
            line: station.line().to_string(),
            name: station.name(lang).to_string(),
            names: NamesResult {
                zh: names.get(Language::Zh).to_string(),
                en: names.get(Language::En).to_string(),
                ja: names.get(Language::Ja).to_string(),
                ko: names.get(Language::Ko).to_string(),
            },
            equivalent: equivalent_stations(station)
                .into_iter()
                .filter(|s| *s != station)
                .map(|s| s.code())
                .collect(),
            transfers: transfers
                .transfers_from(station)
                .iter()
                .map(|(to, minutes)| TransferResult {
                    to: to.code(),
                    minutes: *minutes,
                })
                .collect(),
        }
    }
}

/// Upcoming departures towards one terminal.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    pub terminal: String,
    pub terminal_name: String,
    pub times: Vec<String>,

    /// Headway estimates rather than timetabled departures
    pub approximate: bool,
}

impl DepartureResult {
    pub fn from_departures(departures: &TerminalDepartures, lang: Language) -> Self {
        Self {
            terminal: departures.terminal.code(),
            terminal_name: departures.terminal.name(lang).to_string(),
            times: departures.times.iter().map(ToString::to_string).collect(),
            approximate: departures.approximate,
        }
    }
}

/// Response for a departure board.
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    pub station: String,
    pub time: String,
    pub day: u8,
    pub departures: Vec<DepartureResult>,
}

/// One stop of a route.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub code: String,
    pub name: String,
    pub arrival: String,
    pub departure: String,
}

/// A route option.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub stops: Vec<StopResult>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub total_minutes: u32,
    pub interchanges: usize,

    /// Some departures are headway estimates
    pub approximate: bool,
}

impl RouteResult {
    pub fn from_route(route: &RoutedPath, lang: Language) -> Self {
        let stops = route
            .path()
            .stations()
            .iter()
            .zip(route.times())
            .map(|(station, time)| StopResult {
                code: station.code(),
                name: station.name(lang).to_string(),
                arrival: time.arrival.to_string(),
                departure: time.departure.to_string(),
            })
            .collect();

        Self {
            stops,
            departure: route.departure().map(|t| t.to_string()),
            arrival: route.arrival().map(|t| t.to_string()),
            total_minutes: route.total_minutes(),
            interchanges: route.interchange_count(),
            approximate: route.is_approximate(),
        }
    }
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub from: String,
    pub to: String,
    pub time: String,
    pub day: u8,
    pub routes: Vec<RouteResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::taipei_transfers;

    fn st(code: &str) -> Station {
        Station::parse(code).unwrap()
    }

    #[test]
    fn route_request_defaults() {
        let req: RouteRequest = serde_json::from_str(r#"{"from": "R10", "to": "G12"}"#).unwrap();
        assert_eq!(req.mode, RouteMode::Fastest);
        assert!(req.constraints.must_stations.is_empty());
        assert!(!req.holiday);
        assert!(req.k.is_none());
    }

    #[test]
    fn route_mode_names() {
        let req: RouteRequest = serde_json::from_str(
            r#"{"from": "R10", "to": "G12", "mode": "fewest_interchanges"}"#,
        )
        .unwrap();
        assert_eq!(req.mode, RouteMode::FewestInterchanges);
    }

    #[test]
    fn constraints_parse_codes() {
        let dto: ConstraintsDto = serde_json::from_str(
            r#"{"must_stations": ["R08", " G12 "], "avoid_lines": ["BR"], "max_interchanges": 2}"#,
        )
        .unwrap();
        let constraints = dto.into_constraints().unwrap();
        assert_eq!(constraints.must_stations, vec![st("R08"), st("G12")]);
        assert_eq!(constraints.avoid_lines, vec![Line::BR]);
        assert_eq!(constraints.max_interchanges, 2);
        assert!(constraints.minimize_time);
    }

    #[test]
    fn constraints_reject_bad_codes() {
        let dto = ConstraintsDto {
            avoid_stations: vec!["R99".to_string()],
            ..ConstraintsDto::default()
        };
        assert!(dto.into_constraints().is_err());
    }

    #[test]
    fn station_detail_lists_equivalents_and_transfers() {
        let detail = StationDetail::from_station(st("R10"), Language::Zh, &taipei_transfers());
        assert_eq!(detail.name, "台北車站");
        assert_eq!(detail.names.en, "Taipei Main Station");
        assert_eq!(detail.equivalent, vec!["BL12"]);
        assert_eq!(detail.transfers.len(), 1);
        assert_eq!(detail.transfers[0].to, "BL12");
        assert_eq!(detail.transfers[0].minutes, 4);
    }

    #[test]
    fn station_result_flags_interchanges() {
        assert!(StationResult::from_station(st("R10"), Language::En).interchange);
        assert!(!StationResult::from_station(st("R09"), Language::En).interchange);
    }
}
