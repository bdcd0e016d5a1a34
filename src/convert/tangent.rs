use super::{expect_frame, Convert, GeodeticToGeocentric};
use crate::error::InvalidInput;
use crate::position::{Frame, Position};
use crate::{Ellipsoid, Geocentric, Geodetic, LocalTangentPlane, Matrix3, Vector3};
use log::trace;
use nalgebra::Rotation3;

/// The east, north, up basis at one origin, expressed in ECEF.
///
/// Both the origin's ECEF position and the rotation only depend on the origin and the ellipsoid,
/// so they are computed once when a strategy is constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EnuFrame {
    origin: Geocentric,
    rotation: Rotation3<f64>,
}

impl EnuFrame {
    pub(crate) fn at(ellipsoid: Ellipsoid, origin: &Geodetic) -> Self {
        let (phi, lambda, _) = origin.radians_and_meters();

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let sin_lambda = lambda.sin();
        let cos_lambda = lambda.cos();

        // rows are the east, north, and up axes in ECEF
        let matrix = Matrix3::new(
            -sin_lambda,
            cos_lambda,
            0.,
            -sin_phi * cos_lambda,
            -sin_phi * sin_lambda,
            cos_phi,
            cos_phi * cos_lambda,
            cos_phi * sin_lambda,
            sin_phi,
        );

        Self {
            origin: GeodeticToGeocentric::new(ellipsoid).project(origin),
            // orthonormal by construction
            rotation: Rotation3::from_matrix_unchecked(matrix),
        }
    }

    /// ECEF displacement from the origin, rotated into east, north, up.
    pub(crate) fn to_enu(&self, point: &Geocentric) -> Vector3 {
        self.rotation * self.origin.offset_to(point)
    }

    /// Rotates an east, north, up offset back into ECEF and adds the origin.
    pub(crate) fn to_ecef(&self, enu: &Vector3) -> Geocentric {
        self.origin.translated(self.rotation.inverse_transform_vector(enu))
    }
}

/// Expresses [`Geocentric`] positions relative to a fixed origin, in that origin's local tangent
/// plane.
///
/// Every produced [`LocalTangentPlane`] carries its own copy of the origin the strategy was
/// constructed with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricToLocalTangentPlane {
    ellipsoid: Ellipsoid,
    origin: Geodetic,
    frame: EnuFrame,
}

impl GeocentricToLocalTangentPlane {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, origin: Geodetic) -> Self {
        Self {
            ellipsoid,
            origin,
            frame: EnuFrame::at(ellipsoid, &origin),
        }
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    #[must_use]
    pub fn origin(&self) -> &Geodetic {
        &self.origin
    }

    #[must_use]
    pub fn to_local(&self, geocentric: &Geocentric) -> LocalTangentPlane {
        LocalTangentPlane::from_enu(self.frame.to_enu(geocentric), self.origin)
    }
}

impl Convert for GeocentricToLocalTangentPlane {
    fn source_frame(&self) -> Frame {
        Frame::Geocentric
    }

    fn target_frame(&self) -> Frame {
        Frame::LocalTangentPlane
    }

    fn convert(&self, position: &Position) -> Result<Position, InvalidInput> {
        let Position::Geocentric(geocentric) = position else {
            return Err(position.wrong_frame(Frame::Geocentric));
        };
        let local = self.to_local(geocentric);
        trace!("geocentric {geocentric} -> local {local} at {}", self.origin);
        Ok(local.into())
    }
}

/// Maps [`LocalTangentPlane`] positions back into [`Geocentric`] (ECEF) ones.
///
/// The offsets are always interpreted relative to the origin this strategy was constructed with.
/// The origin carried by the input position is not consulted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTangentPlaneToGeocentric {
    ellipsoid: Ellipsoid,
    origin: Geodetic,
    frame: EnuFrame,
}

impl LocalTangentPlaneToGeocentric {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, origin: Geodetic) -> Self {
        Self {
            ellipsoid,
            origin,
            frame: EnuFrame::at(ellipsoid, &origin),
        }
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    #[must_use]
    pub fn origin(&self) -> &Geodetic {
        &self.origin
    }

    #[must_use]
    pub fn to_geocentric(&self, local: &LocalTangentPlane) -> Geocentric {
        self.frame.to_ecef(&local.enu())
    }
}

impl Convert for LocalTangentPlaneToGeocentric {
    fn source_frame(&self) -> Frame {
        Frame::LocalTangentPlane
    }

    fn target_frame(&self) -> Frame {
        Frame::Geocentric
    }

    fn convert(&self, position: &Position) -> Result<Position, InvalidInput> {
        expect_frame(position, Frame::LocalTangentPlane)?;
        let local = LocalTangentPlane::from_values(&position.values(), self.origin)?;
        let geocentric = self.to_geocentric(&local);
        trace!("local {local} at {} -> geocentric {geocentric}", self.origin);
        Ok(geocentric.into())
    }
}
