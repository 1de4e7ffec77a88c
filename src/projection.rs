//! Flat-Earth projection between geographic and local planar coordinates.
//!
//! Coverage sampling and interference analysis both work in a local tangent
//! plane around a site, in kilometres east and north of it. The projection
//! is the constant-scale approximation: one degree of latitude is 111.32 km
//! everywhere, one degree of longitude is 111.32 km scaled by the cosine of
//! the *origin's* latitude. Valid at city scale, which is the scale a cell
//! plan operates at; every numeric contract of the engine is expressed in
//! this projection, so it must not be swapped for a geodesic model.

use geo::Point;

/// Kilometres per degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Projects a local (east, north) offset in kilometres from an origin into
/// geographic coordinates (x = longitude, y = latitude).
pub fn project(origin: Point<f64>, east_km: f64, north_km: f64) -> Point<f64> {
    let latitude = origin.y() + north_km / KM_PER_DEGREE;
    let longitude = origin.x() + east_km / (KM_PER_DEGREE * origin.y().to_radians().cos());

    Point::new(longitude, latitude)
}

/// Inverse of [`project`]: the (east, north) offset in kilometres of a
/// geographic point relative to an origin.
pub fn offset(origin: Point<f64>, point: Point<f64>) -> (f64, f64) {
    let east_km = (point.x() - origin.x()) * KM_PER_DEGREE * origin.y().to_radians().cos();
    let north_km = (point.y() - origin.y()) * KM_PER_DEGREE;

    (east_km, north_km)
}

/// Planar distance in kilometres between an origin and a geographic point.
pub fn distance_km(origin: Point<f64>, point: Point<f64>) -> f64 {
    let (east, north) = offset(origin, point);
    east.hypot(north)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_trips_within_float_tolerance() {
        let origin = Point::new(-17.4467, 14.6928);

        for &(east, north) in &[(0.0, 0.0), (1.0, 0.0), (0.0, -2.5), (3.2, 4.7), (-12.0, 8.5)] {
            let there = project(origin, east, north);
            let (back_east, back_north) = offset(origin, there);

            assert_relative_eq!(back_east, east, epsilon = 1e-9);
            assert_relative_eq!(back_north, north, epsilon = 1e-9);
        }
    }

    #[test]
    fn one_degree_of_latitude_is_the_scale_constant() {
        let origin = Point::new(0.0, 0.0);
        let north = project(origin, 0.0, KM_PER_DEGREE);

        assert_relative_eq!(north.y(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn longitude_scale_shrinks_with_latitude() {
        let equator = project(Point::new(0.0, 0.0), 10.0, 0.0);
        let dakar = project(Point::new(0.0, 14.6928), 10.0, 0.0);

        // The same eastward distance spans more degrees away from the equator.
        assert!(dakar.x() > equator.x());
    }

    #[test]
    fn planar_distance_matches_pythagoras() {
        let origin = Point::new(-17.4467, 14.6928);
        let point = project(origin, 3.0, 4.0);

        assert_relative_eq!(distance_km(origin, point), 5.0, epsilon = 1e-9);
    }
}
