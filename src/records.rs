use serde::Deserialize;
use std::{collections::HashMap, path::Path};
use tracing::info;

use crate::data::{Distance, StationId};
use crate::error::ImportError;
use crate::line::LineId;
use crate::subway::SubwayMap;

pub const STATIONS_FILE: &str = "stations.csv";
pub const LINES_FILE: &str = "lines.csv";
pub const SECTIONS_FILE: &str = "sections.csv";

#[derive(Deserialize, Debug, Clone)]
pub struct StationRecord {
    pub station_id: StationId,
    pub station_name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LineRecord {
    pub line_id: LineId,
    pub line_name: String,
    pub line_color: String,
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: Distance,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SectionRecord {
    pub line_id: LineId,
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: Distance,
}

#[derive(Debug, Default)]
pub struct Dataset {
    pub stations: Vec<StationRecord>,
    pub lines: Vec<LineRecord>,
    pub sections: Vec<SectionRecord>,
}

fn deserialize_into<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, ImportError> {
    let wrap = |source: csv::Error| ImportError::Csv {
        path: path.to_owned(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(wrap)?;
    let records = reader
        .deserialize()
        .map(|parse_result| parse_result.map_err(wrap))
        .collect::<Result<Vec<T>, _>>()?;

    Ok(records)
}

impl Dataset {
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ImportError> {
        let dir = dir.as_ref();

        info!("Processing stations");
        let stations = deserialize_into::<StationRecord>(&dir.join(STATIONS_FILE))?;

        info!("Processing lines");
        let lines = deserialize_into::<LineRecord>(&dir.join(LINES_FILE))?;

        info!("Processing sections");
        let sections = deserialize_into::<SectionRecord>(&dir.join(SECTIONS_FILE))?;

        Ok(Self {
            stations,
            lines,
            sections,
        })
    }

    /// Builds a map from the records. Ids in the files only link rows
    /// together; the map hands out its own ids.
    pub fn into_subway_map(self) -> Result<SubwayMap, ImportError> {
        let mut map = SubwayMap::new();

        let station_ids: HashMap<StationId, StationId> = self
            .stations
            .into_iter()
            .map(|record| (record.station_id, map.add_station(record.station_name).id))
            .collect();
        let resolve_station = |file: &'static str, station_id: StationId| {
            station_ids
                .get(&station_id)
                .copied()
                .ok_or(ImportError::MissingStation { file, station_id })
        };

        let mut line_ids: HashMap<LineId, LineId> = HashMap::new();
        for (row, record) in self.lines.into_iter().enumerate() {
            let up = resolve_station(LINES_FILE, record.up_station_id)?;
            let down = resolve_station(LINES_FILE, record.down_station_id)?;
            let line_id = map
                .create_line(record.line_name, record.line_color, up, down, record.distance)
                .map_err(|source| ImportError::Rejected {
                    file: LINES_FILE,
                    row: row + 1,
                    source,
                })?;
            line_ids.insert(record.line_id, line_id);
        }

        for (row, record) in self.sections.into_iter().enumerate() {
            let line_id = line_ids
                .get(&record.line_id)
                .copied()
                .ok_or(ImportError::MissingLine {
                    file: SECTIONS_FILE,
                    line_id: record.line_id,
                })?;
            let up = resolve_station(SECTIONS_FILE, record.up_station_id)?;
            let down = resolve_station(SECTIONS_FILE, record.down_station_id)?;
            map.add_section(line_id, up, down, record.distance)
                .map_err(|source| ImportError::Rejected {
                    file: SECTIONS_FILE,
                    row: row + 1,
                    source,
                })?;
        }

        info!(
            stations = map.stations().count(),
            lines = map.lines().count(),
            "Imported subway map"
        );
        Ok(map)
    }
}
