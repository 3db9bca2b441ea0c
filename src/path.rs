use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap},
    sync::Arc,
};

use tracing::debug;

use crate::data::*;
use crate::error::{SubwayError, SubwayResult};
use crate::network::NetworkGraph;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub stations: Vec<Arc<Station>>,
    pub distance: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    cost: u64,
    station: StationId,
}

// Reversed so that `BinaryHeap` pops the cheapest station first.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.station.cmp(&other.station))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
pub struct PathFinder<'a> {
    graph: &'a NetworkGraph,
}

impl<'a> PathFinder<'a> {
    pub fn new(graph: &'a NetworkGraph) -> Self {
        Self { graph }
    }

    pub fn find_shortest_path(
        &self,
        origin: StationId,
        destination: StationId,
    ) -> SubwayResult<Path> {
        if origin == destination {
            return Err(SubwayError::SameStation { station_id: origin });
        }
        for station_id in [origin, destination] {
            if !self.graph.contains(station_id) {
                return Err(SubwayError::UnknownStation { station_id });
            }
        }

        let mut dist: HashMap<StationId, u64> = HashMap::from([(origin, 0)]);
        let mut prev: HashMap<StationId, StationId> = HashMap::new();
        let mut heap = BinaryHeap::from([Frontier {
            cost: 0,
            station: origin,
        }]);

        while let Some(Frontier { cost, station }) = heap.pop() {
            if station == destination {
                debug!(origin, destination, cost, "Destination settled");
                return self.trace_back(&prev, origin, destination, cost);
            }
            if dist.get(&station).is_some_and(|&best| cost > best) {
                continue;
            }

            for edge in self.graph.neighbours(station) {
                let candidate = cost + u64::from(edge.weight);
                if dist.get(&edge.to).map_or(true, |&best| candidate < best) {
                    dist.insert(edge.to, candidate);
                    prev.insert(edge.to, station);
                    heap.push(Frontier {
                        cost: candidate,
                        station: edge.to,
                    });
                }
            }
        }

        Err(SubwayError::NoPath {
            origin,
            destination,
        })
    }

    fn trace_back(
        &self,
        prev: &HashMap<StationId, StationId>,
        origin: StationId,
        destination: StationId,
        distance: u64,
    ) -> SubwayResult<Path> {
        let mut ids = vec![destination];
        let mut cursor = destination;
        while cursor != origin {
            cursor = *prev.get(&cursor).ok_or(SubwayError::NoPath {
                origin,
                destination,
            })?;
            ids.push(cursor);
        }

        let stations = ids
            .into_iter()
            .rev()
            .map(|station_id| {
                self.graph
                    .station(station_id)
                    .cloned()
                    .ok_or(SubwayError::UnknownStation { station_id })
            })
            .collect::<SubwayResult<Vec<_>>>()?;

        Ok(Path { stations, distance })
    }
}
