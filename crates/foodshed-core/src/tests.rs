//! Unit tests for foodshed-core.

// ── Distance bands ────────────────────────────────────────────────────────────

#[cfg(test)]
mod distance {
    use crate::{CoreError, DistanceBand, MILES_TO_METERS};

    #[test]
    fn from_miles_rounds_to_tenths() {
        assert_eq!(DistanceBand::from_miles(0.3).unwrap().tenths(), 3);
        // Float noise near a band still lands on it.
        assert_eq!(DistanceBand::from_miles(0.300000004).unwrap().tenths(), 3);
        assert_eq!(DistanceBand::from_miles(0.25).unwrap().tenths(), 3); // round half up
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(matches!(
            DistanceBand::from_miles(0.0),
            Err(CoreError::DistanceOutOfRange(_))
        ));
        assert!(DistanceBand::from_miles(-0.5).is_err());
        assert!(DistanceBand::from_miles(1.2).is_err());
        assert!(DistanceBand::from_miles(f64::NAN).is_err());
    }

    #[test]
    fn full_set_is_ten_ascending_bands() {
        let all: Vec<_> = DistanceBand::all().collect();
        assert_eq!(all.len(), 10);
        assert_eq!(all.first().copied(), Some(DistanceBand::MIN));
        assert_eq!(all.last().copied(), Some(DistanceBand::MAX));
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn meters_conversion() {
        let half = DistanceBand::from_miles(0.5).unwrap();
        assert!((half.meters() - 0.5 * MILES_TO_METERS).abs() < 1e-9);
    }

    #[test]
    fn display_is_one_decimal() {
        assert_eq!(DistanceBand::from_miles(1.0).unwrap().to_string(), "1.0");
        assert_eq!(DistanceBand::from_miles(0.7).unwrap().to_string(), "0.7");
    }
}

// ── Travel modes ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod mode {
    use crate::TravelMode;

    #[test]
    fn parse_round_trip() {
        for mode in TravelMode::ALL {
            assert_eq!(mode.as_str().parse::<TravelMode>().unwrap(), mode);
        }
        // Case and whitespace tolerant, the way CLI lists arrive.
        assert_eq!(" Walk ".parse::<TravelMode>().unwrap(), TravelMode::Walk);
    }

    #[test]
    fn unknown_mode_rejected() {
        assert!("bike".parse::<TravelMode>().is_err());
        assert!("".parse::<TravelMode>().is_err());
    }

    #[test]
    fn network_subset() {
        assert!(!TravelMode::Euclidean.is_network());
        assert!(TravelMode::Walk.is_network());
        assert!(TravelMode::Drive.is_network());
    }
}

// ── Geography ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod geo {
    use crate::{GeoPoint, LocalProjection};

    #[test]
    fn coordinate_validation() {
        assert!(GeoPoint::new(33.749, -84.388).is_valid());
        assert!(!GeoPoint::new(f64::NAN, -84.0).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -181.0).is_valid());
    }

    #[test]
    fn haversine_known_distance() {
        // One degree of latitude is ~111.19 km on the sphere used here.
        let a = GeoPoint::new(33.0, -84.0);
        let b = GeoPoint::new(34.0, -84.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn projection_round_trip() {
        let origin = GeoPoint::new(33.749, -84.388);
        let proj = LocalProjection::centered_on(origin);
        let p = GeoPoint::new(33.80, -84.30);
        let (x, y) = proj.to_plane(p);
        let back = proj.to_wgs84(x, y);
        assert!((back.lat - p.lat).abs() < 1e-9);
        assert!((back.lon - p.lon).abs() < 1e-9);
    }

    #[test]
    fn projection_agrees_with_haversine_locally() {
        let origin = GeoPoint::new(33.749, -84.388);
        let proj = LocalProjection::centered_on(origin);
        let p = GeoPoint::new(33.76, -84.40);
        let (x, y) = proj.to_plane(p);
        let plane_d = (x * x + y * y).sqrt();
        let sphere_d = origin.distance_m(p);
        // Within a couple of km of the origin the two should agree closely.
        assert!((plane_d - sphere_d).abs() / sphere_d < 1e-3);
    }
}
