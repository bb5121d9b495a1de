use indexmap::IndexMap;
use model::{coordinate::Coordinate, facility::Facility, outfall::OutfallSegment};
use phf::phf_map;

/// Where the Toronto plants discharge into Lake Ontario, as `[lng, lat]`.
pub static DISCHARGE_POINTS: phf::Map<&'static str, [f64; 2]> = phf_map! {
    "North Toronto" => [-79.354502, 43.698287],
    "Humber" => [-79.471552, 43.628355],
    "Ashbridges Bay" => [-79.304403, 43.647421],
    "Highland Creek" => [-79.138169, 43.761908],
};

/// [`DISCHARGE_POINTS`] as an owned table, sorted by plant name.
pub fn default_discharge_points() -> IndexMap<String, Coordinate> {
    let mut points = DISCHARGE_POINTS
        .entries()
        .map(|(name, point)| ((*name).to_owned(), Coordinate::from(*point)))
        .collect::<IndexMap<_, _>>();
    points.sort_keys();
    points
}

/// Builds outfall pipes from a fixed table of discharge points.
#[derive(Debug, Clone)]
pub struct OutfallBuilder {
    discharge_points: IndexMap<String, Coordinate>,
}

impl OutfallBuilder {
    pub fn new(discharge_points: IndexMap<String, Coordinate>) -> Self {
        Self { discharge_points }
    }

    /// The outfall of the given plant, or `None` if the table has no
    /// discharge point for it. Plant names must match the table exactly.
    pub fn build(&self, facility: &Facility) -> Option<OutfallSegment> {
        self.discharge_points
            .get(&facility.name)
            .map(|discharge| OutfallSegment::new(facility, *discharge))
    }

    /// Outfalls of all given plants that have one, in the given order.
    pub fn build_all<'a, I>(&self, facilities: I) -> Vec<OutfallSegment>
    where
        I: IntoIterator<Item = &'a Facility>,
    {
        facilities
            .into_iter()
            .filter_map(|facility| self.build(facility))
            .collect()
    }
}

impl Default for OutfallBuilder {
    fn default() -> Self {
        Self::new(default_discharge_points())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highland_creek() -> Facility {
        Facility::new("Highland Creek", Coordinate::new(-79.1500, 43.7800))
    }

    #[test]
    fn known_plant_gets_a_two_point_pipe() {
        let segment = OutfallBuilder::default().build(&highland_creek()).unwrap();
        assert_eq!(
            segment.coordinates(),
            &[
                Coordinate::new(-79.1500, 43.7800),
                Coordinate::new(-79.138169, 43.761908),
            ]
        );
        assert_eq!(segment.facility_name, "Highland Creek");
    }

    #[test]
    fn unknown_plant_has_no_pipe() {
        let facility = Facility::new("G.E. Booth", Coordinate::new(-79.57, 43.58));
        assert!(OutfallBuilder::default().build(&facility).is_none());
    }

    #[test]
    fn lookup_uses_the_exact_table_name() {
        let facility = Facility::new("highland creek", Coordinate::new(-79.15, 43.78));
        assert!(OutfallBuilder::default().build(&facility).is_none());
    }

    #[test]
    fn build_all_skips_plants_without_outfall() {
        let facilities = vec![
            Facility::new("Humber", Coordinate::new(-79.49, 43.63)),
            Facility::new("Clarkson", Coordinate::new(-79.62, 43.50)),
            highland_creek(),
        ];
        let segments = OutfallBuilder::default().build_all(&facilities);
        let names = segments
            .iter()
            .map(|segment| segment.facility_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Humber", "Highland Creek"]);
    }

    #[test]
    fn default_table_is_sorted_by_name() {
        let names = default_discharge_points().into_keys().collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["Ashbridges Bay", "Highland Creek", "Humber", "North Toronto"]
        );
    }
}
