use model::{
    coordinate::Coordinate, distance::FlushDistance, outfall::OutfallSegment,
    path::RawPath,
};
use utility::geo::polyline_length;

/// Great-circle length of a coordinate sequence in kilometres.
pub fn segment_length_km(coordinates: &[Coordinate]) -> f64 {
    polyline_length(coordinates.iter().map(Coordinate::as_tuple))
}

/// Total distance of a flush. The walking leg is always measured on the raw
/// route, never on its smoothed display version. Without an outfall the
/// second leg counts as zero.
pub fn flush_distance(walking: &RawPath, outfall: Option<&OutfallSegment>) -> FlushDistance {
    let walking_km = segment_length_km(walking.coordinates());
    let outfall_km = outfall
        .map(|segment| segment_length_km(segment.coordinates()))
        .unwrap_or(0.0);
    FlushDistance::new(walking_km, outfall_km)
}

#[cfg(test)]
mod tests {
    use model::facility::Facility;

    use crate::smoothing::smooth;

    use super::*;

    fn zigzag() -> RawPath {
        RawPath::new(vec![
            Coordinate::new(-79.400, 43.650),
            Coordinate::new(-79.395, 43.660),
            Coordinate::new(-79.390, 43.650),
            Coordinate::new(-79.385, 43.660),
            Coordinate::new(-79.380, 43.650),
        ])
        .unwrap()
    }

    #[test]
    fn total_is_the_sum_of_both_legs() {
        let facility = Facility::new("Humber", Coordinate::new(-79.380, 43.650));
        let outfall = OutfallSegment::new(&facility, Coordinate::new(-79.471552, 43.628355));
        let distance = flush_distance(&zigzag(), Some(&outfall));
        assert_eq!(distance.walking_km, segment_length_km(zigzag().coordinates()));
        assert_eq!(distance.outfall_km, segment_length_km(outfall.coordinates()));
        assert_eq!(distance.total_km, distance.walking_km + distance.outfall_km);
    }

    #[test]
    fn missing_outfall_counts_as_zero() {
        let distance = flush_distance(&zigzag(), None);
        assert_eq!(distance.outfall_km, 0.0);
        assert_eq!(distance.total_km, distance.walking_km);
    }

    #[test]
    fn walking_leg_is_measured_unsmoothed() {
        let raw = zigzag();
        let smoothed = smooth(&raw, 2);
        let raw_km = flush_distance(&raw, None).walking_km;
        // smoothing cuts the corners of the zigzag
        assert!(segment_length_km(smoothed.coordinates()) < raw_km);
        assert!(raw_km > 4.0);
    }
}
