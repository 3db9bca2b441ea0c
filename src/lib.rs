//! Subway lines as ordered chains of sections, and shortest paths across
//! the network formed by all of them.

pub mod chain;
pub mod data;
pub mod error;
pub mod line;
pub mod network;
pub mod path;
pub mod records;
pub mod subway;

pub use chain::SectionChain;
pub use data::{Distance, Section, Station, StationId};
pub use error::{ImportError, InvalidSection, SubwayError, SubwayResult};
pub use line::{Line, LineId};
pub use network::NetworkGraph;
pub use path::{Path, PathFinder};
pub use records::Dataset;
pub use subway::SubwayMap;
