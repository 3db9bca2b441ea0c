//! In-memory registry of stations and lines.
//!
//! Resolves caller-supplied ids into `Station` values before handing them to
//! the domain types, and answers path queries across every registered line.

use std::{collections::BTreeMap, sync::Arc};

use tracing::{debug, info};

use crate::data::*;
use crate::error::{SubwayError, SubwayResult};
use crate::line::{Line, LineId};
use crate::network::NetworkGraph;
use crate::path::{Path, PathFinder};

#[derive(Debug, Default)]
pub struct SubwayMap {
    stations: BTreeMap<StationId, Arc<Station>>,
    lines: BTreeMap<LineId, Line>,
    next_station_id: StationId,
    next_line_id: LineId,
}

impl SubwayMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_station(&mut self, name: impl Into<String>) -> Arc<Station> {
        self.next_station_id += 1;
        let station = Arc::new(Station::new(self.next_station_id, name));
        self.stations
            .insert(station.id, Arc::clone(&station));
        debug!(station_id = station.id, name = %station.name, "Added station");
        station
    }

    pub fn station(&self, station_id: StationId) -> SubwayResult<&Arc<Station>> {
        self.stations
            .get(&station_id)
            .ok_or(SubwayError::UnknownStation { station_id })
    }

    pub fn stations(&self) -> impl Iterator<Item = &Arc<Station>> {
        self.stations.values()
    }

    pub fn station_by_name(&self, name: &str) -> Option<&Arc<Station>> {
        self.stations().find(|station| station.name == name)
    }

    pub fn remove_station(&mut self, station_id: StationId) -> SubwayResult<Arc<Station>> {
        let station = self.station(station_id)?;
        if let Some(line) = self.lines.values().find(|line| line.serves(station)) {
            return Err(SubwayError::StationInUse {
                station_id,
                line_id: line.id,
            });
        }

        self.stations
            .remove(&station_id)
            .ok_or(SubwayError::UnknownStation { station_id })
    }

    pub fn create_line(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        up_station_id: StationId,
        down_station_id: StationId,
        distance: Distance,
    ) -> SubwayResult<LineId> {
        let up_station = Arc::clone(self.station(up_station_id)?);
        let down_station = Arc::clone(self.station(down_station_id)?);

        let line_id = self.next_line_id + 1;
        let line = Line::new(line_id, name, color, up_station, down_station, distance)?;
        self.next_line_id = line_id;
        info!(line_id, name = %line.name, "Created line");
        self.lines.insert(line_id, line);

        Ok(line_id)
    }

    pub fn line(&self, line_id: LineId) -> SubwayResult<&Line> {
        self.lines
            .get(&line_id)
            .ok_or(SubwayError::UnknownLine { line_id })
    }

    fn line_mut(&mut self, line_id: LineId) -> SubwayResult<&mut Line> {
        self.lines
            .get_mut(&line_id)
            .ok_or(SubwayError::UnknownLine { line_id })
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn line_by_name(&self, name: &str) -> Option<&Line> {
        self.lines().find(|line| line.name == name)
    }

    pub fn update_line(
        &mut self,
        line_id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> SubwayResult<()> {
        self.line_mut(line_id)?.update(name, color);
        Ok(())
    }

    pub fn delete_line(&mut self, line_id: LineId) -> SubwayResult<Line> {
        let line = self
            .lines
            .remove(&line_id)
            .ok_or(SubwayError::UnknownLine { line_id })?;
        info!(line_id, name = %line.name, "Deleted line");
        Ok(line)
    }

    pub fn add_section(
        &mut self,
        line_id: LineId,
        up_station_id: StationId,
        down_station_id: StationId,
        distance: Distance,
    ) -> SubwayResult<()> {
        let up_station = Arc::clone(self.station(up_station_id)?);
        let down_station = Arc::clone(self.station(down_station_id)?);

        self.line_mut(line_id)?
            .add_section(up_station, down_station, distance)
    }

    pub fn remove_section(
        &mut self,
        line_id: LineId,
        station_id: StationId,
    ) -> SubwayResult<Section> {
        let station = Arc::clone(self.station(station_id)?);
        self.line_mut(line_id)?.remove_station(&station)
    }

    /// Builds a fresh network of every line and searches it.
    pub fn find_path(&self, origin: StationId, destination: StationId) -> SubwayResult<Path> {
        let graph = NetworkGraph::from_lines(self.lines());
        debug!(
            stations = graph.station_count(),
            edges = graph.edge_count(),
            "Built network graph"
        );

        PathFinder::new(&graph).find_shortest_path(origin, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidSection;

    #[test]
    fn station_ids_are_sequential() {
        let mut map = SubwayMap::new();
        let gangnam = map.add_station("강남역");
        let yangjae = map.add_station("양재역");

        assert_eq!((gangnam.id, yangjae.id), (1, 2));
        assert_eq!(map.station(2).unwrap().name, "양재역");
        assert_eq!(map.station_by_name("강남역").map(|s| s.id), Some(1));
        assert!(map.station_by_name("정자역").is_none());
        assert_eq!(
            map.station(3).unwrap_err(),
            SubwayError::UnknownStation { station_id: 3 }
        );
    }

    #[test]
    fn create_line_requires_known_stations() {
        let mut map = SubwayMap::new();
        let gangnam = map.add_station("강남역");

        assert_eq!(
            map.create_line("신분당선", "bg-red-600", gangnam.id, 9, 10),
            Err(SubwayError::UnknownStation { station_id: 9 })
        );
        assert_eq!(map.lines().count(), 0);
    }

    #[test]
    fn failed_line_creation_does_not_burn_an_id() {
        let mut map = SubwayMap::new();
        let gangnam = map.add_station("강남역");
        let yangjae = map.add_station("양재역");

        assert!(map.create_line("bad", "red", gangnam.id, gangnam.id, 10).is_err());
        let line_id = map.create_line("신분당선", "red", gangnam.id, yangjae.id, 10).unwrap();

        assert_eq!(line_id, 1);
    }

    #[test]
    fn sections_are_routed_to_their_line() {
        let mut map = SubwayMap::new();
        let gangnam = map.add_station("강남역").id;
        let yangjae = map.add_station("양재역").id;
        let jeongja = map.add_station("정자역").id;
        let line_id = map.create_line("신분당선", "bg-red-600", gangnam, yangjae, 10).unwrap();

        map.add_section(line_id, yangjae, jeongja, 6).unwrap();
        let stations: Vec<StationId> = map
            .line(line_id)
            .unwrap()
            .stations()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(stations, vec![gangnam, yangjae, jeongja]);

        assert_eq!(
            map.add_section(line_id, gangnam, jeongja, 3),
            Err(SubwayError::InvalidSection(
                InvalidSection::AlreadyConnected {
                    up: gangnam,
                    down: jeongja
                }
            ))
        );
        assert_eq!(
            map.add_section(42, yangjae, jeongja, 3),
            Err(SubwayError::UnknownLine { line_id: 42 })
        );

        let removed = map.remove_section(line_id, jeongja).unwrap();
        assert_eq!(removed.down_station.id, jeongja);
    }

    #[test]
    fn stations_on_a_line_cannot_be_removed() {
        let mut map = SubwayMap::new();
        let gangnam = map.add_station("강남역").id;
        let yangjae = map.add_station("양재역").id;
        let spare = map.add_station("정자역").id;
        let line_id = map.create_line("신분당선", "red", gangnam, yangjae, 10).unwrap();

        assert_eq!(
            map.remove_station(gangnam),
            Err(SubwayError::StationInUse {
                station_id: gangnam,
                line_id
            })
        );
        assert_eq!(map.remove_station(spare).unwrap().id, spare);

        map.delete_line(line_id).unwrap();
        assert!(map.remove_station(gangnam).is_ok());
    }

    #[test]
    fn update_and_delete_line() {
        let mut map = SubwayMap::new();
        let gangnam = map.add_station("강남역").id;
        let yangjae = map.add_station("양재역").id;
        let line_id = map.create_line("신분당선", "red", gangnam, yangjae, 10).unwrap();

        map.update_line(line_id, "구분당선", "blue").unwrap();
        assert_eq!(map.line(line_id).unwrap().name, "구분당선");
        assert!(map.line_by_name("신분당선").is_none());
        assert_eq!(map.line_by_name("구분당선").map(|line| line.id), Some(line_id));

        map.delete_line(line_id).unwrap();
        assert_eq!(
            map.line(line_id).unwrap_err(),
            SubwayError::UnknownLine { line_id }
        );
        assert_eq!(
            map.find_path(gangnam, yangjae),
            Err(SubwayError::UnknownStation {
                station_id: gangnam
            })
        );
    }
}
