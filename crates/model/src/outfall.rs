use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::{coordinate::Coordinate, facility::Facility};

/// Straight pipe from a plant to its discharge point in the receiving water.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfallSegment {
    pub facility_id: Id<Facility>,
    pub facility_name: String,
    coordinates: [Coordinate; 2],
}

impl OutfallSegment {
    pub fn new(facility: &Facility, discharge: Coordinate) -> Self {
        Self {
            facility_id: facility.id.clone(),
            facility_name: facility.name.clone(),
            coordinates: [facility.location, discharge],
        }
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }
}
