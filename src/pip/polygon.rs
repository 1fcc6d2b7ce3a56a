//! Even-odd ray casting over a lat/lon ring.

use crate::models::Coordinate;

/// Test whether `point` lies inside the ring described by `boundary`.
///
/// The ring is implicitly closed. Latitude is treated as the x axis and
/// longitude as the y axis. Rings with fewer than three points contain nothing.
/// Points exactly on an edge may go either way.
pub fn point_in_polygon(point: &Coordinate, boundary: &[Coordinate]) -> bool {
    if boundary.len() < 3 {
        return false;
    }

    let (x, y) = (point.latitude, point.longitude);
    let mut inside = false;
    let mut j = boundary.len() - 1;

    for i in 0..boundary.len() {
        let (xi, yi) = (boundary[i].latitude, boundary[i].longitude);
        let (xj, yj) = (boundary[j].latitude, boundary[j].longitude);

        // Horizontal edges never cross; skipping them also avoids dividing by zero
        if yi != yj && (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }

        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Vec<Coordinate> {
        vec![
            Coordinate::new(min, min),
            Coordinate::new(min, max),
            Coordinate::new(max, max),
            Coordinate::new(max, min),
        ]
    }

    #[test]
    fn test_centroid_inside() {
        assert!(point_in_polygon(&Coordinate::new(0.5, 0.5), &square(0.0, 1.0)));
    }

    #[test]
    fn test_far_point_outside() {
        assert!(!point_in_polygon(&Coordinate::new(40.0, -70.0), &square(0.0, 1.0)));
        assert!(!point_in_polygon(&Coordinate::new(0.5, 1.5), &square(0.0, 1.0)));
    }

    #[test]
    fn test_concave_ring() {
        // U shape opening to high latitudes
        let ring = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 3.0),
            Coordinate::new(3.0, 3.0),
            Coordinate::new(3.0, 2.0),
            Coordinate::new(1.0, 2.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(3.0, 1.0),
            Coordinate::new(3.0, 0.0),
        ];
        assert!(point_in_polygon(&Coordinate::new(2.0, 0.5), &ring));
        assert!(!point_in_polygon(&Coordinate::new(2.0, 1.5), &ring));
        assert!(point_in_polygon(&Coordinate::new(0.5, 1.5), &ring));
    }

    #[test]
    fn test_degenerate_rings() {
        let p = Coordinate::new(0.5, 0.5);
        assert!(!point_in_polygon(&p, &[]));
        assert!(!point_in_polygon(&p, &square(0.0, 1.0)[..2]));

        // All points share one longitude: every edge is horizontal in this frame
        let flat = vec![
            Coordinate::new(0.0, 0.5),
            Coordinate::new(1.0, 0.5),
            Coordinate::new(2.0, 0.5),
        ];
        assert!(!point_in_polygon(&p, &flat));
    }

    #[test]
    fn test_nan_point_is_outside() {
        assert!(!point_in_polygon(
            &Coordinate::new(f64::NAN, 0.5),
            &square(0.0, 1.0)
        ));
    }
}
