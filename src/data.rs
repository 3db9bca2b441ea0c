use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::error::InvalidSection;

pub type StationId = u64;

pub type Distance = u32;

#[derive(Debug, Clone)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A directed hop between two neighbouring stations of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub up_station: Arc<Station>,
    pub down_station: Arc<Station>,
    pub distance: Distance,
}

impl Section {
    pub fn new(
        up_station: Arc<Station>,
        down_station: Arc<Station>,
        distance: Distance,
    ) -> Result<Self, InvalidSection> {
        if up_station == down_station {
            return Err(InvalidSection::SameEndpoints {
                station: up_station.id,
            });
        }
        if distance == 0 {
            return Err(InvalidSection::ZeroDistance);
        }

        Ok(Self {
            up_station,
            down_station,
            distance,
        })
    }

    pub fn stations(&self) -> [&Arc<Station>; 2] {
        [&self.up_station, &self.down_station]
    }

    pub fn touches(&self, station: &Station) -> bool {
        self.up_station.as_ref() == station || self.down_station.as_ref() == station
    }
}
