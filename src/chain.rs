//! Ordered, non-branching section storage for a single line.
//!
//! Sections live in an arena in insertion order. Path order is recovered on
//! read by walking the `by_up` index from the origin station, so splits and
//! prepends never shuffle the arena.

use std::{collections::HashMap, iter, sync::Arc};

use tracing::debug;

use crate::data::*;
use crate::error::{InvalidSection, SubwayError, SubwayResult};

#[derive(Debug, Clone, Default)]
pub struct SectionChain {
    arena: Vec<Section>,
    by_up: HashMap<StationId, usize>,
    by_down: HashMap<StationId, usize>,
    origin: Option<StationId>,
    terminus: Option<StationId>,
}

impl SectionChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, station: &Station) -> bool {
        self.by_up.contains_key(&station.id) || self.by_down.contains_key(&station.id)
    }

    pub fn origin(&self) -> Option<&Arc<Station>> {
        let idx = self.by_up.get(self.origin.as_ref()?)?;
        Some(&self.arena[*idx].up_station)
    }

    pub fn terminus(&self) -> Option<&Arc<Station>> {
        let idx = self.by_down.get(self.terminus.as_ref()?)?;
        Some(&self.arena[*idx].down_station)
    }

    pub fn total_distance(&self) -> u64 {
        self.arena
            .iter()
            .map(|section| u64::from(section.distance))
            .sum()
    }

    /// Sections in path order, from the origin to the terminus.
    pub fn sections(&self) -> Vec<&Section> {
        let mut ordered = Vec::with_capacity(self.arena.len());
        let mut cursor = self.origin;

        while let Some(idx) = cursor.and_then(|station_id| self.by_up.get(&station_id)) {
            let section = &self.arena[*idx];
            ordered.push(section);
            cursor = Some(section.down_station.id);
        }

        ordered
    }

    /// Stations in path order; always one more than the number of sections.
    pub fn stations(&self) -> Vec<Arc<Station>> {
        let sections = self.sections();
        match sections.first() {
            Some(first) => iter::once(Arc::clone(&first.up_station))
                .chain(
                    sections
                        .iter()
                        .map(|section| Arc::clone(&section.down_station)),
                )
                .collect(),
            None => Vec::default(),
        }
    }

    pub fn add_section(&mut self, section: Section) -> SubwayResult<()> {
        let (Some(origin), Some(terminus)) = (self.origin, self.terminus) else {
            debug!(
                up = section.up_station.id,
                down = section.down_station.id,
                "Installing first section"
            );
            self.origin = Some(section.up_station.id);
            self.terminus = Some(section.down_station.id);
            self.push(section);
            return Ok(());
        };

        let up = section.up_station.id;
        let down = section.down_station.id;

        match (
            self.contains(&section.up_station),
            self.contains(&section.down_station),
        ) {
            (true, true) => Err(InvalidSection::AlreadyConnected { up, down }.into()),
            (false, false) => Err(InvalidSection::Disconnected { up, down }.into()),
            _ if up == terminus => {
                debug!(up, down, "Appending section");
                self.terminus = Some(down);
                self.push(section);
                Ok(())
            }
            _ if down == origin => {
                debug!(up, down, "Prepending section");
                self.origin = Some(up);
                self.push(section);
                Ok(())
            }
            (true, false) => self.split_after(section),
            (false, true) => self.split_before(section),
        }
    }

    /// Removes the terminus, dropping the last section of the line.
    pub fn remove_station(&mut self, station: &Station) -> SubwayResult<Section> {
        let sections = self.len();
        let terminus = match self.terminus {
            Some(terminus) if sections >= 2 => terminus,
            _ => return Err(SubwayError::ChainTooShort { sections }),
        };

        if station.id != terminus {
            return Err(SubwayError::InvalidRemoval {
                station: station.id,
                terminus,
            });
        }

        let idx = self.by_down[&terminus];
        let removed = self.detach(idx);
        self.terminus = Some(removed.up_station.id);
        debug!(station = station.id, "Removed terminus");

        Ok(removed)
    }

    fn push(&mut self, section: Section) {
        let idx = self.arena.len();
        self.by_up.insert(section.up_station.id, idx);
        self.by_down.insert(section.down_station.id, idx);
        self.arena.push(section);
    }

    /// `U -> D` becomes `U -> X -> D` where the new section is `U -> X`.
    fn split_after(&mut self, section: Section) -> SubwayResult<()> {
        let idx = self.by_up[&section.up_station.id];
        let existing = &self.arena[idx];
        let remainder = existing
            .distance
            .checked_sub(section.distance)
            .filter(|remainder| *remainder > 0)
            .ok_or(InvalidSection::SplitTooLong {
                distance: section.distance,
                existing: existing.distance,
            })?;

        let tail = Section::new(
            Arc::clone(&section.down_station),
            Arc::clone(&existing.down_station),
            remainder,
        )?;
        debug!(
            up = section.up_station.id,
            inserted = section.down_station.id,
            down = tail.down_station.id,
            "Splitting section after its up station"
        );

        self.by_down.remove(&tail.down_station.id);
        self.by_down.insert(section.down_station.id, idx);
        self.arena[idx] = section;
        self.push(tail);

        Ok(())
    }

    /// `U -> D` becomes `U -> X -> D` where the new section is `X -> D`.
    fn split_before(&mut self, section: Section) -> SubwayResult<()> {
        let idx = self.by_down[&section.down_station.id];
        let existing = &self.arena[idx];
        let remainder = existing
            .distance
            .checked_sub(section.distance)
            .filter(|remainder| *remainder > 0)
            .ok_or(InvalidSection::SplitTooLong {
                distance: section.distance,
                existing: existing.distance,
            })?;

        let head = Section::new(
            Arc::clone(&existing.up_station),
            Arc::clone(&section.up_station),
            remainder,
        )?;
        debug!(
            up = head.up_station.id,
            inserted = section.up_station.id,
            down = section.down_station.id,
            "Splitting section before its down station"
        );

        self.by_down.insert(head.down_station.id, idx);
        self.arena[idx] = head;
        self.push(section);

        Ok(())
    }

    /// Takes a section out of the arena, keeping both indexes in step with
    /// the slot that `swap_remove` moves into its place.
    fn detach(&mut self, idx: usize) -> Section {
        let removed = self.arena.swap_remove(idx);
        self.by_up.remove(&removed.up_station.id);
        self.by_down.remove(&removed.down_station.id);

        if let Some(moved) = self.arena.get(idx) {
            self.by_up.insert(moved.up_station.id, idx);
            self.by_down.insert(moved.down_station.id, idx);
        }

        removed
    }
}
