use model::{
    coordinate::Coordinate,
    path::{DisplayPath, RawPath},
};

/// Smooths a route for display with a centered moving average.
///
/// Every interior point becomes the unweighted mean of the raw points within
/// `half_window` positions on either side. The window is clamped at both ends
/// of the route instead of being padded, and the first and last point are
/// kept as they are. Routes of at most `half_window` points are returned
/// unchanged.
pub fn smooth(raw: &RawPath, half_window: usize) -> DisplayPath {
    let coordinates = raw.coordinates();
    let len = coordinates.len();
    if len <= half_window {
        return DisplayPath::from(raw.clone());
    }

    let mut smoothed = Vec::with_capacity(len);
    smoothed.push(coordinates[0]);
    for i in 1..len - 1 {
        let window = &coordinates[i.saturating_sub(half_window)..=(i + half_window).min(len - 1)];
        // windows are never empty: they always contain `i`
        smoothed.push(Coordinate::mean(window).unwrap_or(coordinates[i]));
    }
    smoothed.push(coordinates[len - 1]);

    DisplayPath::new(smoothed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[[f64; 2]]) -> RawPath {
        RawPath::new(points.iter().copied().map(Coordinate::from).collect()).unwrap()
    }

    #[test]
    fn straight_line_with_window_one() {
        let raw = path(&[[0.0, 0.0], [0.0, 1.0], [0.0, 2.0], [0.0, 3.0], [0.0, 4.0]]);
        let display = smooth(&raw, 1);
        assert_eq!(display.len(), 5);
        assert_eq!(display.coordinates()[0], Coordinate::new(0.0, 0.0));
        assert_eq!(display.coordinates()[4], Coordinate::new(0.0, 4.0));
        // evenly spaced points are their own windowed mean
        assert_eq!(display.coordinates()[1], Coordinate::new(0.0, 1.0));
        assert_eq!(display.coordinates()[2], Coordinate::new(0.0, 2.0));
        assert_eq!(display.coordinates()[3], Coordinate::new(0.0, 3.0));
    }

    #[test]
    fn zigzag_is_flattened() {
        let raw = path(&[[0.0, 0.0], [1.0, 3.0], [2.0, 0.0], [3.0, 3.0], [4.0, 0.0]]);
        let display = smooth(&raw, 1);
        let expected = [
            [0.0, 0.0],
            [1.0, 1.0],
            [2.0, 2.0],
            [3.0, 1.0],
            [4.0, 0.0],
        ];
        for (actual, expected) in display.coordinates().iter().zip(expected) {
            assert!((actual.longitude - expected[0]).abs() < 1e-12);
            assert!((actual.latitude - expected[1]).abs() < 1e-12);
        }
    }

    #[test]
    fn windows_narrow_at_the_ends() {
        let raw = path(&[[0.0, 0.0], [0.0, 6.0], [0.0, 0.0], [0.0, 0.0], [0.0, 0.0]]);
        let display = smooth(&raw, 2);
        // index 1 averages indices 0..=3, it can not reach before the start
        assert_eq!(display.coordinates()[1], Coordinate::new(0.0, 1.5));
        // index 3 averages indices 1..=4
        assert_eq!(display.coordinates()[3], Coordinate::new(0.0, 1.5));
        // index 2 averages all five
        assert_eq!(display.coordinates()[2], Coordinate::new(0.0, 1.2));
    }

    #[test]
    fn short_paths_are_left_alone() {
        let raw = path(&[[0.0, 0.0], [5.0, 5.0]]);
        assert_eq!(smooth(&raw, 2).coordinates(), raw.coordinates());
        let raw = path(&[[0.0, 0.0], [9.0, 1.0], [5.0, 5.0]]);
        assert_eq!(smooth(&raw, 3).coordinates(), raw.coordinates());
    }

    #[test]
    fn end_points_are_always_kept() {
        for len in 2..12 {
            let points = (0..len)
                .map(|i| [i as f64 * 0.37, ((i * 7) % 5) as f64])
                .collect::<Vec<_>>();
            let raw = path(&points);
            for half_window in 1..5 {
                let display = smooth(&raw, half_window);
                assert_eq!(display.len(), raw.len());
                assert_eq!(display.coordinates()[0], raw.first());
                assert_eq!(display.coordinates()[len - 1], raw.last());
            }
        }
    }
}
