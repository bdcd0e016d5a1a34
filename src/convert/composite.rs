use super::{
    expect_frame, Convert, GeocentricToGeodetic, GeocentricToLocalTangentPlane,
    GeodeticToGeocentric, IterationPolicy, LocalTangentPlaneToGeocentric,
};
use crate::error::InvalidInput;
use crate::position::{Frame, Position};
use crate::{Ellipsoid, Geodetic, LocalTangentPlane};
use log::trace;

/// Expresses [`Geodetic`] positions in the local tangent plane at a fixed origin, by way of ECEF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticToLocalTangentPlane {
    to_geocentric: GeodeticToGeocentric,
    to_local: GeocentricToLocalTangentPlane,
}

impl GeodeticToLocalTangentPlane {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, origin: Geodetic) -> Self {
        Self {
            to_geocentric: GeodeticToGeocentric::new(ellipsoid),
            to_local: GeocentricToLocalTangentPlane::new(ellipsoid, origin),
        }
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        self.to_geocentric.ellipsoid()
    }

    #[must_use]
    pub fn origin(&self) -> &Geodetic {
        self.to_local.origin()
    }

    #[must_use]
    pub fn to_local(&self, geodetic: &Geodetic) -> LocalTangentPlane {
        self.to_local.to_local(&self.to_geocentric.project(geodetic))
    }
}

impl Convert for GeodeticToLocalTangentPlane {
    fn source_frame(&self) -> Frame {
        Frame::Geodetic
    }

    fn target_frame(&self) -> Frame {
        Frame::LocalTangentPlane
    }

    fn convert(&self, position: &Position) -> Result<Position, InvalidInput> {
        expect_frame(position, Frame::Geodetic)?;
        let geocentric = self.to_geocentric.convert(position)?;
        let local = self.to_local.convert(&geocentric)?;
        trace!("geodetic {position} -> local {local} at {}", self.origin());
        Ok(local)
    }
}

/// Maps [`LocalTangentPlane`] positions at a fixed origin back into [`Geodetic`] ones, by way of
/// ECEF.
///
/// As with [`LocalTangentPlaneToGeocentric`], the offsets are interpreted relative to the origin
/// given at construction, whatever origin the input carries. The result always has an altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTangentPlaneToGeodetic {
    to_geocentric: LocalTangentPlaneToGeocentric,
    to_geodetic: GeocentricToGeodetic,
}

impl LocalTangentPlaneToGeodetic {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, origin: Geodetic) -> Self {
        Self::with_policy(ellipsoid, origin, IterationPolicy::default())
    }

    /// Like [`LocalTangentPlaneToGeodetic::new`], but with a custom stopping rule for the
    /// ECEF to geodetic step.
    #[must_use]
    pub fn with_policy(ellipsoid: Ellipsoid, origin: Geodetic, policy: IterationPolicy) -> Self {
        Self {
            to_geocentric: LocalTangentPlaneToGeocentric::new(ellipsoid, origin),
            to_geodetic: GeocentricToGeodetic::with_policy(ellipsoid, policy),
        }
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        self.to_geodetic.ellipsoid()
    }

    #[must_use]
    pub fn origin(&self) -> &Geodetic {
        self.to_geocentric.origin()
    }

    #[must_use]
    pub fn policy(&self) -> &IterationPolicy {
        self.to_geodetic.policy()
    }

    #[must_use]
    pub fn to_geodetic(&self, local: &LocalTangentPlane) -> Geodetic {
        self.to_geodetic.unproject(&self.to_geocentric.to_geocentric(local))
    }
}

impl Convert for LocalTangentPlaneToGeodetic {
    fn source_frame(&self) -> Frame {
        Frame::LocalTangentPlane
    }

    fn target_frame(&self) -> Frame {
        Frame::Geodetic
    }

    fn convert(&self, position: &Position) -> Result<Position, InvalidInput> {
        expect_frame(position, Frame::LocalTangentPlane)?;
        let geocentric = self.to_geocentric.convert(position)?;
        let geodetic = self.to_geodetic.convert(&geocentric)?;
        trace!("local {position} at {} -> geodetic {geodetic}", self.origin());
        Ok(geodetic)
    }
}
