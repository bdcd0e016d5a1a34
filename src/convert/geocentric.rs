use super::{expect_frame, Convert, IterationPolicy};
use crate::error::InvalidInput;
use crate::position::{Frame, Position};
use crate::{util, Ellipsoid, Geocentric, Geodetic};
use log::{debug, trace};

/// Projects [`Geodetic`] positions into [`Geocentric`] (ECEF) ones.
///
/// This is the closed-form projection, exact up to floating point rounding. A position without
/// altitude is projected onto the surface of the ellipsoid.
///
/// See
/// <https://en.wikipedia.org/wiki/Geographic_coordinate_conversion#From_geodetic_to_ECEF_coordinates>.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticToGeocentric {
    ellipsoid: Ellipsoid,
}

impl GeodeticToGeocentric {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    #[must_use]
    pub fn project(&self, geodetic: &Geodetic) -> Geocentric {
        let (lat_phi, lon_lambda, height_h) = geodetic.radians_and_meters();
        let e2 = self.ellipsoid.e2();
        let n_phi = self.ellipsoid.n(lat_phi);

        let x = (n_phi + height_h) * lat_phi.cos() * lon_lambda.cos();
        let y = (n_phi + height_h) * lat_phi.cos() * lon_lambda.sin();
        let z = ((1. - e2) * n_phi + height_h) * lat_phi.sin();

        Geocentric::from_meters(x, y, z)
    }
}

impl Convert for GeodeticToGeocentric {
    fn source_frame(&self) -> Frame {
        Frame::Geodetic
    }

    fn target_frame(&self) -> Frame {
        Frame::Geocentric
    }

    fn convert(&self, position: &Position) -> Result<Position, InvalidInput> {
        let Position::Geodetic(geodetic) = position else {
            return Err(position.wrong_frame(Frame::Geodetic));
        };
        let geocentric = self.project(geodetic);
        trace!("geodetic {geodetic} -> geocentric {geocentric}");
        Ok(geocentric.into())
    }
}

/// Recovers [`Geodetic`] positions from [`Geocentric`] (ECEF) ones.
///
/// There is no exact closed form in this direction. This uses a fixed-point iteration on the
/// latitude, seeded with the latitude the point would have on a sphere flattened by `1 - e²`:
///
/// ```text
/// p     = sqrt(x² + y²)
/// lat₀  = atan2(z, p (1 - e²))
/// lat'  = atan2(z + e² N(lat) sin(lat), p)
/// h     = p / cos(lat) - N(lat)
/// ```
///
/// until the latitude settles according to the [`IterationPolicy`]. The result always carries an
/// altitude, even if it is (close to) zero.
///
/// <div class="warning">
///
/// Near the poles `p` approaches zero and `h = p / cos(lat) - N` loses precision quickly; right
/// on the polar axis it degenerates entirely. This is a known limit of the formulation and is not
/// reported as an error.
///
/// </div>
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricToGeodetic {
    ellipsoid: Ellipsoid,
    policy: IterationPolicy,
}

impl GeocentricToGeodetic {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self::with_policy(ellipsoid, IterationPolicy::default())
    }

    #[must_use]
    pub fn with_policy(ellipsoid: Ellipsoid, policy: IterationPolicy) -> Self {
        Self { ellipsoid, policy }
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    #[must_use]
    pub fn policy(&self) -> &IterationPolicy {
        &self.policy
    }

    #[must_use]
    pub fn unproject(&self, geocentric: &Geocentric) -> Geodetic {
        let [x, y, z] = geocentric.values();
        let e2 = self.ellipsoid.e2();

        let p = (x * x + y * y).sqrt();
        let lon = y.atan2(x);

        let mut lat = z.atan2(p * (1. - e2));
        let mut steps = 0;
        let mut converged = false;
        while steps < self.policy.max_iterations {
            let n = self.ellipsoid.n(lat);
            let next = (z + e2 * n * lat.sin()).atan2(p);
            let delta = (next - lat).abs();
            lat = next;
            steps += 1;
            if delta <= self.policy.tolerance_radians() {
                converged = true;
                break;
            }
        }
        if converged {
            trace!("latitude converged after {steps} steps");
        } else {
            debug!(
                "latitude of {geocentric} did not settle within {} steps; using last estimate",
                self.policy.max_iterations
            );
        }

        let n = self.ellipsoid.n(lat);
        let h = p / lat.cos() - n;

        Geodetic::from_degrees_and_meters(util::rad_to_deg(lat), util::rad_to_deg(lon), h)
    }
}

impl Convert for GeocentricToGeodetic {
    fn source_frame(&self) -> Frame {
        Frame::Geocentric
    }

    fn target_frame(&self) -> Frame {
        Frame::Geodetic
    }

    fn convert(&self, position: &Position) -> Result<Position, InvalidInput> {
        expect_frame(position, Frame::Geocentric)?;
        let geocentric = Geocentric::from_values(&position.values())?;
        let geodetic = self.unproject(&geocentric);
        trace!("geocentric {geocentric} -> geodetic {geodetic}");
        Ok(geodetic.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{GeocentricToGeodetic, GeodeticToGeocentric};
    use crate::convert::{Convert, IterationPolicy};
    use crate::ellipsoid::{self, Ellipsoid, WGS84};
    use crate::error::InvalidInput;
    use crate::position::{Frame, Position};
    use crate::{Geocentric, Geodetic};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use quickcheck::quickcheck;
    use rstest::rstest;
    use uom::si::f64::{Angle, Length};
    use uom::si::{angle::radian, length::meter};

    impl From<&nav_types::ECEF<f64>> for Geocentric {
        fn from(value: &nav_types::ECEF<f64>) -> Self {
            Geocentric::from_meters(value.x(), value.y(), value.z())
        }
    }

    #[rstest]
    #[case(ellipsoid::WGS84)]
    #[case(ellipsoid::GRS80)]
    #[case(ellipsoid::IERS2003)]
    #[case(ellipsoid::GRS67)]
    #[case(ellipsoid::AIRY_1830)]
    #[case(ellipsoid::BESSEL_1841)]
    #[case(ellipsoid::CLARKE_1866)]
    #[case(ellipsoid::INTERNATIONAL_1924)]
    fn origin_of_angles_is_semi_major_axis(#[case] ellipsoid: Ellipsoid) {
        let to_ecef = GeodeticToGeocentric::new(ellipsoid);
        let a = ellipsoid.semi_major_axis().get::<meter>();
        assert_eq!(
            to_ecef.project(&Geodetic::from_degrees_and_meters(0., 0., 0.)).values(),
            [a, 0., 0.]
        );
        // a missing altitude is the ellipsoid surface
        assert_eq!(
            to_ecef.project(&Geodetic::from_degrees(0., 0.)).values(),
            [a, 0., 0.]
        );
    }

    #[test]
    fn known_wgs_to_ecef() {
        let to_ecef = GeodeticToGeocentric::new(WGS84);
        for (wgs, ecef) in [
            ((0., 0., 0.), (6378137., 0., 0.)),
            (
                // Mt. Fuji
                (35.3619, 138.7280, 2294.0),
                (-3915138.118709466, 3436144.354064903, 3672011.028417511),
            ),
            (
                (-27.270950, 19.880389, 3000.),
                (5337604.33, 1930119.71, -2906308.35),
            ),
        ] {
            let (lat, lon, alt) = wgs;
            let (x, y, z) = ecef;
            let geocentric = to_ecef.project(&Geodetic::from_degrees_and_meters(lat, lon, alt));
            assert_abs_diff_eq!(
                geocentric,
                Geocentric::from_meters(x, y, z),
                epsilon = Length::new::<meter>(0.1)
            );
        }
    }

    #[rstest]
    #[case(47.9948211, 7.8211606, 1000.)]
    #[case(67.112282, 19.880389, 0.)]
    #[case(84.883074, -29.160550, 2000.)]
    #[case(-27.270950, 143.722880, 100.)]
    #[case(-89.999999, -179.99999, 1000.)]
    fn matches_nav_types(#[case] lat: f64, #[case] lon: f64, #[case] alt: f64) {
        let ours = GeodeticToGeocentric::new(WGS84)
            .project(&Geodetic::from_degrees_and_meters(lat, lon, alt));
        let theirs = nav_types::ECEF::from(nav_types::WGS84::from_degrees_and_meters(lat, lon, alt));
        assert_relative_eq!(ours, Geocentric::from(&theirs));
    }

    #[rstest]
    #[case(WGS84.semi_major_axis().get::<meter>(), 0.)]
    #[case(WGS84.semi_major_axis().get::<meter>() + 100., 100.)]
    fn equator_altitude(#[case] x: f64, #[case] expected_altitude: f64) {
        let geodetic =
            GeocentricToGeodetic::new(WGS84).unproject(&Geocentric::from_meters(x, 0., 0.));
        let [lat, lon, alt] = geodetic.values()[..] else {
            panic!("altitude is always present");
        };
        assert_abs_diff_eq!(lat, 0., epsilon = 1e-6);
        assert_abs_diff_eq!(lon, 0., epsilon = 1e-6);
        assert_abs_diff_eq!(alt, expected_altitude, epsilon = 1e-3);
    }

    #[test]
    fn altitude_is_always_present() {
        let on_surface = GeodeticToGeocentric::new(WGS84).project(&Geodetic::from_degrees(10., 20.));
        let geodetic = GeocentricToGeodetic::new(WGS84).unproject(&on_surface);
        assert!(geodetic.altitude().is_some());
        assert_eq!(geodetic.values().len(), 3);
    }

    #[rstest]
    #[case(45., 45., 0.)]
    #[case(35.3619, 138.7280, 2294.0)]
    #[case(-33.8568, 151.2153, -20.)]
    #[case(0., -180., 35_786_000.)]
    #[case(89.9, 12., 10.)]
    #[case(-60., 0., 8848.)]
    fn round_trip(#[case] lat: f64, #[case] lon: f64, #[case] alt: f64) {
        let geodetic = Geodetic::from_degrees_and_meters(lat, lon, alt);
        let ecef = GeodeticToGeocentric::new(WGS84).project(&geodetic);
        let back = GeocentricToGeodetic::new(WGS84).unproject(&ecef);
        let [blat, blon, balt] = back.values()[..] else {
            panic!("altitude is always present");
        };
        assert_abs_diff_eq!(blat, lat, epsilon = 1e-9);
        // -180° and 180° are the same meridian
        let lon_error = (blon - lon).rem_euclid(360.).min((lon - blon).rem_euclid(360.));
        assert_abs_diff_eq!(lon_error, 0., epsilon = 1e-9);
        assert_abs_diff_eq!(balt, alt, epsilon = 1e-4);
    }

    fn try_geodetic_geocentric_roundtrip(geodetic: Geodetic) {
        for ellipsoid in [ellipsoid::WGS84, ellipsoid::BESSEL_1841, ellipsoid::INTERNATIONAL_1924] {
            let ecef = GeodeticToGeocentric::new(ellipsoid).project(&geodetic);
            let mut back = GeocentricToGeodetic::new(ellipsoid).unproject(&ecef);
            if geodetic.altitude().is_none() {
                assert_abs_diff_eq!(back.altitude().unwrap().get::<meter>(), 0., epsilon = 1e-4);
                back.clear_altitude();
            }
            assert_relative_eq!(back, geodetic);
        }
    }

    quickcheck! {
        fn geodetic_geocentric_roundtrip(geodetic: Geodetic) -> () {
            try_geodetic_geocentric_roundtrip(geodetic);
        }
    }

    #[test]
    fn iteration_cap_returns_last_estimate() {
        let ecef = GeodeticToGeocentric::new(WGS84)
            .project(&Geodetic::from_degrees_and_meters(45., 45., 0.));
        let one_step = GeocentricToGeodetic::with_policy(
            WGS84,
            IterationPolicy {
                tolerance: Angle::new::<radian>(0.),
                max_iterations: 1,
            },
        );
        let zero_steps = GeocentricToGeodetic::with_policy(
            WGS84,
            IterationPolicy {
                tolerance: Angle::new::<radian>(1e-12),
                max_iterations: 0,
            },
        );
        let full = GeocentricToGeodetic::new(WGS84).unproject(&ecef);

        // a single step already lands within a few centimeters of the converged answer
        let coarse = one_step.unproject(&ecef);
        assert!(coarse.altitude().is_some());
        assert_relative_eq!(
            coarse,
            full,
            epsilon = Length::new::<meter>(1.)
        );

        // without any steps, the seed latitude is used as is
        let seed = zero_steps.unproject(&ecef);
        let e2 = WGS84.eccentricity_sq();
        let [x, y, z] = ecef.values();
        let expected_lat = z.atan2((x * x + y * y).sqrt() * (1. - e2)).to_degrees();
        assert_abs_diff_eq!(seed.values()[0], expected_lat, epsilon = 1e-12);
    }

    #[test]
    fn rejects_other_frames() {
        let to_geodetic = GeocentricToGeodetic::new(WGS84);
        assert_eq!(
            to_geodetic.convert(&Position::from(Geodetic::from_degrees_and_meters(10., 20., 0.))),
            Err(InvalidInput::WrongFrame {
                expected: Frame::Geocentric,
                found: Frame::Geodetic,
            })
        );

        let to_geocentric = GeodeticToGeocentric::new(WGS84);
        assert_eq!(
            to_geocentric.convert(&Position::from(Geocentric::from_meters(1., 2., 3.))),
            Err(InvalidInput::WrongFrame {
                expected: Frame::Geodetic,
                found: Frame::Geocentric,
            })
        );
    }

    #[test]
    fn generic_and_typed_agree() {
        let geodetic = Geodetic::from_degrees_and_meters(-27.270950, 19.880389, 3000.);
        let to_ecef = GeodeticToGeocentric::new(WGS84);
        let to_geodetic = GeocentricToGeodetic::new(WGS84);

        let ecef = to_ecef.convert(&geodetic.into()).unwrap();
        assert_eq!(ecef, Position::from(to_ecef.project(&geodetic)));

        let back = to_geodetic.convert(&ecef).unwrap();
        assert_eq!(
            back,
            Position::from(to_geodetic.unproject(ecef.as_geocentric().unwrap()))
        );
    }
}
