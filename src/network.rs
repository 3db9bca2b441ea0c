use itertools::*;
use std::{collections::HashMap, sync::Arc};

use crate::data::*;
use crate::line::Line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: StationId,
    pub weight: Distance,
}

/// Undirected multigraph over every station served by any line.
///
/// Parallel edges between the same pair of stations are kept as they are;
/// the path search settles on the cheapest one by itself.
#[derive(Debug, Default)]
pub struct NetworkGraph {
    stations: HashMap<StationId, Arc<Station>>,
    adjacency: HashMap<StationId, Vec<Edge>>,
    edge_count: usize,
}

impl NetworkGraph {
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a Line>) -> Self {
        Self::from_sections(lines.into_iter().flat_map(|line| line.sections()))
    }

    pub fn from_sections<'a>(sections: impl IntoIterator<Item = &'a Section>) -> Self {
        let sections: Vec<&Section> = sections.into_iter().collect();

        let stations = sections
            .iter()
            .flat_map(|section| section.stations())
            .map(|station| (station.id, Arc::clone(station)))
            .collect();

        let adjacency = sections
            .iter()
            .flat_map(|section| {
                let (up, down) = (section.up_station.id, section.down_station.id);
                [
                    (
                        up,
                        Edge {
                            to: down,
                            weight: section.distance,
                        },
                    ),
                    (
                        down,
                        Edge {
                            to: up,
                            weight: section.distance,
                        },
                    ),
                ]
            })
            .into_group_map();

        Self {
            stations,
            adjacency,
            edge_count: sections.len(),
        }
    }

    pub fn contains(&self, station_id: StationId) -> bool {
        self.stations.contains_key(&station_id)
    }

    pub fn station(&self, station_id: StationId) -> Option<&Arc<Station>> {
        self.stations.get(&station_id)
    }

    pub fn neighbours(&self, station_id: StationId) -> &[Edge] {
        self.adjacency
            .get(&station_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: StationId) -> Arc<Station> {
        Arc::new(Station::new(id, format!("Station {id}")))
    }

    #[test]
    fn edges_are_undirected() {
        let (a, b) = (station(1), station(2));
        let section = Section::new(a, b, 4).unwrap();

        let graph = NetworkGraph::from_sections([&section]);

        assert_eq!(graph.station_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbours(1), &[Edge { to: 2, weight: 4 }]);
        assert_eq!(graph.neighbours(2), &[Edge { to: 1, weight: 4 }]);
    }

    #[test]
    fn parallel_edges_are_kept() {
        let (a, b) = (station(1), station(2));
        let line_one = Line::new(1, "1", "blue", Arc::clone(&a), Arc::clone(&b), 9).unwrap();
        let line_two = Line::new(2, "2", "green", Arc::clone(&b), Arc::clone(&a), 3).unwrap();

        let graph = NetworkGraph::from_lines([&line_one, &line_two]);

        assert_eq!(graph.station_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        let mut weights: Vec<Distance> = graph.neighbours(1).iter().map(|e| e.weight).collect();
        weights.sort_unstable();
        assert_eq!(weights, vec![3, 9]);
    }

    #[test]
    fn unknown_station_has_no_neighbours() {
        let graph = NetworkGraph::default();

        assert!(!graph.contains(42));
        assert!(graph.station(42).is_none());
        assert!(graph.neighbours(42).is_empty());
    }
}
