use model::{
    catchment::Catchment,
    coordinate::QueryPoint,
    facility::Facility,
};
use utility::id::Id;

use crate::{FlushError, FlushResult};

/// The catchment and plant serving a clicked point.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub catchment: &'a Catchment,
    pub facility: &'a Facility,
}

/// Owns the loaded catchments and plants and answers which plant serves a
/// point. The two collections load independently; resolving fails with
/// [`FlushError::DataNotReady`] until both have arrived.
#[derive(Debug, Clone, Default)]
pub struct CatchmentResolver {
    catchments: Option<Vec<Catchment>>,
    facilities: Option<Vec<Facility>>,
}

impl CatchmentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_catchments(&mut self, catchments: Vec<Catchment>) {
        log::info!("loaded {} catchments", catchments.len());
        self.catchments = Some(catchments);
    }

    pub fn load_facilities(&mut self, facilities: Vec<Facility>) {
        log::info!("loaded {} facilities", facilities.len());
        self.facilities = Some(facilities);
    }

    pub fn is_ready(&self) -> bool {
        self.catchments.is_some() && self.facilities.is_some()
    }

    pub fn facilities(&self) -> &[Facility] {
        self.facilities.as_deref().unwrap_or_default()
    }

    /// Finds the plant serving `point`.
    ///
    /// Catchments are scanned in load order and the first one containing the
    /// point wins. Its plant is then looked up by normalized name.
    pub fn resolve(&self, point: &QueryPoint) -> FlushResult<Resolution<'_>> {
        let (Some(catchments), Some(facilities)) = (&self.catchments, &self.facilities)
        else {
            return Err(FlushError::DataNotReady);
        };

        let catchment = catchments
            .iter()
            .find(|catchment| catchment.contains(point))
            .ok_or(FlushError::OutOfCoverage)?;
        let facility_name = catchment
            .facility_name
            .as_deref()
            .ok_or(FlushError::OutOfCoverage)?;

        let wanted = Id::<Facility>::from_name(facility_name);
        let facility = facilities
            .iter()
            .find(|facility| facility.id == wanted)
            .ok_or_else(|| FlushError::UnmodeledAuthority {
                facility_name: facility_name.to_owned(),
            })?;

        Ok(Resolution {
            catchment,
            facility,
        })
    }
}

#[cfg(test)]
mod tests {
    use geo::polygon;
    use model::{coordinate::Coordinate, ExampleData};

    use super::*;

    fn square(name: Option<&str>, min: (f64, f64), max: (f64, f64)) -> Catchment {
        Catchment::from_polygon(
            name.map(str::to_owned),
            polygon![
                (x: min.0, y: min.1),
                (x: max.0, y: min.1),
                (x: max.0, y: max.1),
                (x: min.0, y: max.1),
            ],
        )
    }

    fn toronto() -> CatchmentResolver {
        let mut resolver = CatchmentResolver::new();
        resolver.load_catchments(vec![
            square(Some("Humber"), (-79.60, 43.58), (-79.45, 43.76)),
            square(Some("ashbridges_BAY!!"), (-79.45, 43.62), (-79.25, 43.76)),
            square(Some("G.E. Booth"), (-79.70, 43.50), (-79.60, 43.65)),
            square(None, (-79.25, 43.62), (-79.20, 43.76)),
        ]);
        resolver.load_facilities(vec![
            Facility::example_data(),
            Facility::new("Ashbridges Bay", Coordinate::new(-79.3176, 43.6560)),
        ]);
        resolver
    }

    #[test]
    fn point_in_humber_catchment_resolves_to_humber() {
        let resolver = toronto();
        let resolution = resolver.resolve(&Coordinate::new(-79.50, 43.70)).unwrap();
        assert_eq!(resolution.facility.name, "Humber");
        assert_eq!(resolution.catchment.facility_name.as_deref(), Some("Humber"));
    }

    #[test]
    fn catchment_spelling_is_normalized() {
        let resolver = toronto();
        let resolution = resolver.resolve(&Coordinate::new(-79.35, 43.70)).unwrap();
        assert_eq!(resolution.facility.name, "Ashbridges Bay");
    }

    #[test]
    fn point_outside_every_catchment() {
        let resolver = toronto();
        let result = resolver.resolve(&Coordinate::new(-78.00, 44.00));
        assert_eq!(result.unwrap_err(), FlushError::OutOfCoverage);
    }

    #[test]
    fn catchment_without_modeled_plant() {
        let resolver = toronto();
        let result = resolver.resolve(&Coordinate::new(-79.65, 43.55));
        assert_eq!(
            result.unwrap_err(),
            FlushError::UnmodeledAuthority {
                facility_name: "G.E. Booth".to_owned()
            }
        );
    }

    #[test]
    fn catchment_without_plant_name_is_not_covered() {
        let resolver = toronto();
        let result = resolver.resolve(&Coordinate::new(-79.22, 43.70));
        assert_eq!(result.unwrap_err(), FlushError::OutOfCoverage);
    }

    #[test]
    fn first_catchment_in_load_order_wins() {
        // both squares share the border at -79.45
        let resolver = toronto();
        let resolution = resolver.resolve(&Coordinate::new(-79.45, 43.70)).unwrap();
        assert_eq!(resolution.facility.name, "Humber");
    }

    #[test]
    fn not_ready_until_both_collections_loaded() {
        let mut resolver = CatchmentResolver::new();
        let point = Coordinate::new(-79.50, 43.70);
        assert_eq!(resolver.resolve(&point).unwrap_err(), FlushError::DataNotReady);

        resolver.load_facilities(vec![Facility::example_data()]);
        assert!(!resolver.is_ready());
        assert_eq!(resolver.resolve(&point).unwrap_err(), FlushError::DataNotReady);

        resolver.load_catchments(vec![square(
            Some("HUMBER"),
            (-79.60, 43.58),
            (-79.45, 43.76),
        )]);
        assert!(resolver.is_ready());
        assert_eq!(resolver.resolve(&point).unwrap().facility.name, "Humber");
    }
}
