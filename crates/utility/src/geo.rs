use itertools::Itertools;

/// Mean earth radius (IUGG), the same value web map tooling measures with.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Length of a polyline given as `(longitude, latitude)` pairs, in kilometres.
///
/// Sums the great-circle distance of every pair of consecutive points. Empty
/// and single-point polylines have length zero.
pub fn polyline_length<I>(points: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    points
        .into_iter()
        .tuple_windows()
        .map(|((lon_1, lat_1), (lon_2, lat_2))| {
            haversine_distance(lat_1, lon_1, lat_2, lon_2)
        })
        .sum()
}

/// Axis-aligned extent of `(longitude, latitude)` pairs as
/// `((min_lon, min_lat), (max_lon, max_lat))`, or `None` for no points.
pub fn extent<I>(points: I) -> Option<((f64, f64), (f64, f64))>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    points.into_iter().fold(None, |acc, (lon, lat)| match acc {
        None => Some(((lon, lat), (lon, lat))),
        Some(((min_lon, min_lat), (max_lon, max_lat))) => Some((
            (min_lon.min(lon), min_lat.min(lat)),
            (max_lon.max(lon), max_lat.max(lat)),
        )),
    })
}
