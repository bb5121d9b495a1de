use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{coordinate::Coordinate, ExampleData};

/// A wastewater treatment plant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    /// Normalized name, used to match catchments to plants.
    pub id: Id<Facility>,
    pub name: String,
    pub location: Coordinate,
}

impl Facility {
    pub fn new<S: Into<String>>(name: S, location: Coordinate) -> Self {
        let name = name.into();
        Self {
            id: Id::from_name(&name),
            name,
            location,
        }
    }
}

impl HasId for Facility {
    type IdType = String;
}

impl ExampleData for Facility {
    fn example_data() -> Self {
        Facility::new("Humber", Coordinate::new(-79.4930, 43.6300))
    }
}
