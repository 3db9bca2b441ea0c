use std::path::PathBuf;

use thiserror::Error;

use crate::data::{Distance, StationId};
use crate::line::LineId;

pub type SubwayResult<T> = Result<T, SubwayError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidSection {
    #[error("Stations {up:?} and {down:?} are both already on the line")]
    AlreadyConnected { up: StationId, down: StationId },

    #[error("Neither {up:?} nor {down:?} is on the line")]
    Disconnected { up: StationId, down: StationId },

    #[error("Section of distance {distance} does not fit inside the existing section of distance {existing}")]
    SplitTooLong {
        distance: Distance,
        existing: Distance,
    },

    #[error("A section cannot start and end at Station {station:?}")]
    SameEndpoints { station: StationId },

    #[error("A section must have a positive distance")]
    ZeroDistance,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubwayError {
    #[error("Invalid section: {0}")]
    InvalidSection(#[from] InvalidSection),

    #[error("A line must keep at least one section (currently {sections})")]
    ChainTooShort { sections: usize },

    #[error("Only the terminus {terminus:?} can be removed, not {station:?}")]
    InvalidRemoval {
        station: StationId,
        terminus: StationId,
    },

    #[error("No such Station {station_id:?}")]
    UnknownStation { station_id: StationId },

    #[error("Origin and destination are the same Station {station_id:?}")]
    SameStation { station_id: StationId },

    #[error("No route between Station {origin:?} and Station {destination:?}")]
    NoPath {
        origin: StationId,
        destination: StationId,
    },

    #[error("No such Line {line_id:?}")]
    UnknownLine { line_id: LineId },

    #[error("Station {station_id:?} is still served by Line {line_id:?}")]
    StationInUse {
        station_id: StationId,
        line_id: LineId,
    },
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Could not read {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{file} refers to unknown Station {station_id:?}")]
    MissingStation {
        file: &'static str,
        station_id: StationId,
    },

    #[error("{file} refers to unknown Line {line_id:?}")]
    MissingLine { file: &'static str, line_id: LineId },

    #[error("Rejected row {row} of {file}: {source}")]
    Rejected {
        file: &'static str,
        row: usize,
        #[source]
        source: SubwayError,
    },
}
