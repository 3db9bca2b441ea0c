use std::sync::Arc;

use crate::chain::SectionChain;
use crate::data::*;
use crate::error::SubwayResult;

pub type LineId = u64;

#[derive(Debug, Clone)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    pub color: String,
    chain: SectionChain,
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Line {
    /// A line always starts out with exactly one section.
    pub fn new(
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
        up_station: Arc<Station>,
        down_station: Arc<Station>,
        distance: Distance,
    ) -> SubwayResult<Self> {
        let mut chain = SectionChain::new();
        chain.add_section(Section::new(up_station, down_station, distance)?)?;

        Ok(Self {
            id,
            name: name.into(),
            color: color.into(),
            chain,
        })
    }

    pub fn update(&mut self, name: impl Into<String>, color: impl Into<String>) {
        self.name = name.into();
        self.color = color.into();
    }

    pub fn sections(&self) -> Vec<&Section> {
        self.chain.sections()
    }

    pub fn stations(&self) -> Vec<Arc<Station>> {
        self.chain.stations()
    }

    pub fn serves(&self, station: &Station) -> bool {
        self.chain.contains(station)
    }

    pub fn total_distance(&self) -> u64 {
        self.chain.total_distance()
    }

    pub fn add_section(
        &mut self,
        up_station: Arc<Station>,
        down_station: Arc<Station>,
        distance: Distance,
    ) -> SubwayResult<()> {
        self.chain
            .add_section(Section::new(up_station, down_station, distance)?)
    }

    pub fn remove_station(&mut self, station: &Station) -> SubwayResult<Section> {
        self.chain.remove_station(station)
    }
}
