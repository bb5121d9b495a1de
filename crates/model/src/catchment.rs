use geo::{Intersects, MultiPolygon, Polygon};

use crate::coordinate::Coordinate;

/// Service area of a single treatment plant.
#[derive(Debug, Clone)]
pub struct Catchment {
    /// Name of the plant as spelled by the catchment feed. It does not have to
    /// match the facility feed's spelling exactly.
    pub facility_name: Option<String>,
    pub area: MultiPolygon<f64>,
}

impl Catchment {
    pub fn new(facility_name: Option<String>, area: MultiPolygon<f64>) -> Self {
        Self {
            facility_name,
            area,
        }
    }

    pub fn from_polygon(facility_name: Option<String>, polygon: Polygon<f64>) -> Self {
        Self::new(facility_name, MultiPolygon::new(vec![polygon]))
    }

    /// Whether the point lies inside the area. Points on a boundary ring count
    /// as inside, points inside a hole do not.
    pub fn contains(&self, point: &Coordinate) -> bool {
        let coord = geo::coord! { x: point.longitude, y: point.latitude };
        self.area.iter().any(|polygon| polygon.intersects(&coord))
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, LineString};

    use super::*;

    fn square_with_hole() -> Catchment {
        let exterior = LineString::from(vec![
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (0.0, 4.0),
            (0.0, 0.0),
        ]);
        let hole = LineString::from(vec![
            (1.0, 1.0),
            (2.0, 1.0),
            (2.0, 2.0),
            (1.0, 2.0),
            (1.0, 1.0),
        ]);
        Catchment::from_polygon(
            Some("Humber".to_owned()),
            Polygon::new(exterior, vec![hole]),
        )
    }

    #[test]
    fn interior_and_boundary_points_are_contained() {
        let catchment = square_with_hole();
        assert!(catchment.contains(&Coordinate::new(3.0, 3.0)));
        assert!(catchment.contains(&Coordinate::new(4.0, 2.0)));
        assert!(catchment.contains(&Coordinate::new(0.0, 0.0)));
    }

    #[test]
    fn outside_and_hole_points_are_not_contained() {
        let catchment = square_with_hole();
        assert!(!catchment.contains(&Coordinate::new(5.0, 1.0)));
        assert!(!catchment.contains(&Coordinate::new(1.5, 1.5)));
    }

    #[test]
    fn any_part_of_a_multipolygon_matches() {
        let catchment = Catchment::new(
            None,
            MultiPolygon::new(vec![
                polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
                polygon![(x: 10.0, y: 10.0), (x: 11.0, y: 10.0), (x: 11.0, y: 11.0)],
            ]),
        );
        assert!(catchment.contains(&Coordinate::new(10.9, 10.1)));
        assert!(!catchment.contains(&Coordinate::new(5.0, 5.0)));
    }
}
