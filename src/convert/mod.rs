//! Conversion strategies between the supported frames.
//!
//! Each strategy converts from exactly one [`Frame`] to exactly one other, takes everything it
//! needs (the [`Ellipsoid`](crate::Ellipsoid), and for local tangent planes the origin) at
//! construction, and never changes afterwards. That makes every strategy cheap to reuse for any
//! number of positions and safe to share between threads without locking.
//!
//! | from \ to               | geodetic                         | geocentric                        | local tangent plane                |
//! |-------------------------|----------------------------------|-----------------------------------|------------------------------------|
//! | **geodetic**            |                                  | [`GeodeticToGeocentric`]          | [`GeodeticToLocalTangentPlane`]    |
//! | **geocentric**          | [`GeocentricToGeodetic`]         |                                   | [`GeocentricToLocalTangentPlane`]  |
//! | **local tangent plane** | [`LocalTangentPlaneToGeodetic`]  | [`LocalTangentPlaneToGeocentric`] |                                    |
//!
//! Every strategy implements [`Convert`], which works on [`Position`]s and fails with
//! [`InvalidInput::WrongFrame`] when handed a position in the wrong frame. Callers that already
//! hold the concrete input type can use the strategies' inherent methods instead, which cannot
//! fail.
//!
//! ```
//! use geoframes::convert::{Convert, GeodeticToLocalTangentPlane, LocalTangentPlaneToGeodetic};
//! use geoframes::{ellipsoid::WGS84, Geodetic, Position};
//!
//! let origin = Geodetic::from_degrees_and_meters(35.6812, 139.7671, 40.);
//! let to_local = GeodeticToLocalTangentPlane::new(WGS84, origin);
//! let to_geodetic = LocalTangentPlaneToGeodetic::new(WGS84, origin);
//!
//! let skytree = Position::from(Geodetic::from_degrees_and_meters(35.7101, 139.8107, 634.));
//! let local = to_local.convert(&skytree)?;
//! let back = to_geodetic.convert(&local)?;
//!
//! let [lat, lon, alt] = back.values()[..] else { unreachable!() };
//! assert!((lat - 35.7101).abs() < 1e-9);
//! assert!((lon - 139.8107).abs() < 1e-9);
//! assert!((alt - 634.).abs() < 1e-6);
//!
//! // handing a converter the wrong frame is an error, not a panic
//! assert!(to_local.convert(&local).is_err());
//! # Ok::<(), geoframes::InvalidInput>(())
//! ```

use crate::error::InvalidInput;
use crate::position::{Frame, Position};
use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod composite;
mod geocentric;
mod tangent;

pub use composite::{GeodeticToLocalTangentPlane, LocalTangentPlaneToGeodetic};
pub use geocentric::{GeocentricToGeodetic, GeodeticToGeocentric};
pub use tangent::{GeocentricToLocalTangentPlane, LocalTangentPlaneToGeocentric};

/// A conversion of one position from a fixed source frame to a fixed target frame.
///
/// Implementations hold only immutable, construction-time parameters, so `convert` is a pure
/// function of its input.
pub trait Convert {
    /// The frame that [`Convert::convert`] accepts.
    fn source_frame(&self) -> Frame;

    /// The frame that [`Convert::convert`] produces.
    fn target_frame(&self) -> Frame;

    /// Converts `position` into [`Convert::target_frame`].
    ///
    /// Fails with [`InvalidInput::WrongFrame`] if `position` is not in
    /// [`Convert::source_frame`].
    fn convert(&self, position: &Position) -> Result<Position, InvalidInput>;
}

/// When the fixed-point iteration of [`GeocentricToGeodetic`] stops.
///
/// The iteration stops as soon as the latitude changes by no more than `tolerance` between two
/// steps, or after `max_iterations` steps, whichever comes first. Reaching the cap is not an
/// error; the last latitude computed is used.
///
/// The defaults (1e-12 rad, 100 steps) converge to well below a millimeter anywhere away from
/// the poles, usually within a handful of steps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IterationPolicy {
    pub tolerance: Angle,
    pub max_iterations: usize,
}

impl IterationPolicy {
    pub(crate) fn tolerance_radians(&self) -> f64 {
        self.tolerance.get::<radian>()
    }
}

impl Default for IterationPolicy {
    fn default() -> Self {
        Self {
            tolerance: Angle::new::<radian>(1e-12),
            max_iterations: 100,
        }
    }
}

/// Used by every strategy to reject positions in a frame it does not convert from.
fn expect_frame(position: &Position, expected: Frame) -> Result<(), InvalidInput> {
    if position.frame() == expected {
        Ok(())
    } else {
        Err(position.wrong_frame(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::{BESSEL_1841, GRS80, WGS84};
    use crate::{Geocentric, Geodetic, LocalTangentPlane};
    use rstest::rstest;

    fn origin() -> Geodetic {
        Geodetic::from_degrees_and_meters(47.9948211, 7.8211606, 1000.)
    }

    fn all_strategies() -> Vec<Box<dyn Convert>> {
        vec![
            Box::new(GeodeticToGeocentric::new(WGS84)),
            Box::new(GeocentricToGeodetic::new(WGS84)),
            Box::new(GeocentricToLocalTangentPlane::new(WGS84, origin())),
            Box::new(LocalTangentPlaneToGeocentric::new(GRS80, origin())),
            Box::new(GeodeticToLocalTangentPlane::new(BESSEL_1841, origin())),
            Box::new(LocalTangentPlaneToGeodetic::new(WGS84, origin())),
        ]
    }

    fn sample(frame: Frame) -> Position {
        match frame {
            Frame::Geodetic => Geodetic::from_degrees_and_meters(10., 20., 0.).into(),
            Frame::Geocentric => Geocentric::from_meters(6378137., 0., 0.).into(),
            Frame::LocalTangentPlane => LocalTangentPlane::from_meters(1., 2., 3., origin()).into(),
        }
    }

    #[test]
    fn every_strategy_rejects_every_other_frame() {
        for strategy in all_strategies() {
            for frame in [Frame::Geodetic, Frame::Geocentric, Frame::LocalTangentPlane] {
                let result = strategy.convert(&sample(frame));
                if frame == strategy.source_frame() {
                    let converted = result.expect("source frame is accepted");
                    assert_eq!(converted.frame(), strategy.target_frame());
                } else {
                    assert_eq!(
                        result,
                        Err(InvalidInput::WrongFrame {
                            expected: strategy.source_frame(),
                            found: frame,
                        })
                    );
                }
            }
        }
    }

    #[test]
    fn strategies_are_shareable() {
        fn assert_send_sync_clone<T: Send + Sync + Clone + std::fmt::Debug>() {}
        assert_send_sync_clone::<GeodeticToGeocentric>();
        assert_send_sync_clone::<GeocentricToGeodetic>();
        assert_send_sync_clone::<GeocentricToLocalTangentPlane>();
        assert_send_sync_clone::<LocalTangentPlaneToGeocentric>();
        assert_send_sync_clone::<GeodeticToLocalTangentPlane>();
        assert_send_sync_clone::<LocalTangentPlaneToGeodetic>();
    }

    #[test]
    fn concurrent_callers_see_independent_results() {
        let to_local = GeodeticToLocalTangentPlane::new(WGS84, origin());
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let to_local = &to_local;
                    s.spawn(move || {
                        let p = Geodetic::from_degrees_and_meters(48., 7.8 + f64::from(i) * 0.01, 0.);
                        to_local.convert(&p.into())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (i, result) in results.into_iter().enumerate() {
            let p = Geodetic::from_degrees_and_meters(48., 7.8 + i as f64 * 0.01, 0.);
            assert_eq!(result, to_local.convert(&p.into()));
        }
    }

    #[rstest]
    #[case(IterationPolicy::default(), 1e-12, 100)]
    #[case(IterationPolicy { tolerance: Angle::new::<radian>(1e-6), max_iterations: 3 }, 1e-6, 3)]
    fn iteration_policy(#[case] policy: IterationPolicy, #[case] tol: f64, #[case] max: usize) {
        assert_eq!(policy.tolerance_radians(), tol);
        assert_eq!(policy.max_iterations, max);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn iteration_policy_serde_fills_defaults() {
        let policy: IterationPolicy = serde_yaml::from_str("max_iterations: 7").unwrap();
        assert_eq!(policy.max_iterations, 7);
        assert_eq!(policy.tolerance, IterationPolicy::default().tolerance);

        let ser = serde_yaml::to_string(&IterationPolicy::default()).unwrap();
        assert_eq!(
            serde_yaml::from_str::<IterationPolicy>(&ser).unwrap(),
            IterationPolicy::default()
        );
    }
}
