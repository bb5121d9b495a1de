use geo::{Geometry, MultiPolygon};
use geojson::{Feature, FeatureCollection};
use model::{catchment::Catchment, coordinate::Coordinate, facility::Facility};

/// Property holding the plant name of a plant feature.
pub const PLANT_NAME_PROPERTY: &str = "Plant_Name";
/// Property holding the name of the serving plant of a catchment feature.
pub const CATCHMENT_PLANT_PROPERTY: &str = "Plant";

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    feature
        .property(key)
        .and_then(|value| value.as_str())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn geometry(feature: &Feature) -> Option<Geometry<f64>> {
    let geometry = feature.geometry.clone()?;
    match Geometry::<f64>::try_from(geometry) {
        Ok(geometry) => Some(geometry),
        Err(why) => {
            log::warn!("skipping feature with unusable geometry: {}", why);
            None
        }
    }
}

/// Every point feature with a plant name becomes a [`Facility`]. Other
/// features are skipped.
pub fn facilities(collection: &FeatureCollection) -> Vec<Facility> {
    collection
        .features
        .iter()
        .filter_map(|feature| {
            let name = string_property(feature, PLANT_NAME_PROPERTY)?;
            match geometry(feature)? {
                Geometry::Point(point) => Some(Facility::new(name, Coordinate::from(point))),
                _ => {
                    log::warn!("plant '{}' is not a point", name);
                    None
                }
            }
        })
        .collect()
}

/// Every polygonal feature becomes a [`Catchment`], in feed order. A missing
/// plant name is kept as `None`.
pub fn catchments(collection: &FeatureCollection) -> Vec<Catchment> {
    collection
        .features
        .iter()
        .filter_map(|feature| {
            let area = match geometry(feature)? {
                Geometry::Polygon(polygon) => MultiPolygon::new(vec![polygon]),
                Geometry::MultiPolygon(multi_polygon) => multi_polygon,
                _ => return None,
            };
            Some(Catchment::new(
                string_property(feature, CATCHMENT_PLANT_PROPERTY),
                area,
            ))
        })
        .collect()
}
