use crate::error::{Arity, InvalidInput};
use crate::position::{Frame, Position};
use crate::{util, Geodetic, Vector3};
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::f64::Length;
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point given as east, north, and up offsets (in meters) from an origin, measured along the
/// plane tangent to the reference ellipsoid at that origin.
///
/// The position owns its origin outright. Constructing one from an origin, or replacing the
/// origin later, stores a copy, so changes to the caller's original never show up here and
/// changes made through [`LocalTangentPlane::origin_mut`] never show up in any other copy.
///
/// See
/// <https://en.wikipedia.org/wiki/Local_tangent_plane_coordinates#Local_east,_north,_up_(ENU)_coordinates>.
#[doc(alias = "ENU")]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalTangentPlane {
    east: f64,
    north: f64,
    up: f64,
    origin: Box<Position>,
}

impl LocalTangentPlane {
    /// Constructs a local position at the given offsets from `origin`.
    ///
    /// The origin is usually a [`Geodetic`] position, which is also what the local tangent plane
    /// converters use as their origin.
    pub fn new(
        east: impl Into<Length>,
        north: impl Into<Length>,
        up: impl Into<Length>,
        origin: impl Into<Position>,
    ) -> Self {
        Self::from_meters(
            east.into().get::<meter>(),
            north.into().get::<meter>(),
            up.into().get::<meter>(),
            origin,
        )
    }

    #[must_use]
    pub fn from_meters(east: f64, north: f64, up: f64, origin: impl Into<Position>) -> Self {
        Self {
            east,
            north,
            up,
            origin: Box::new(origin.into()),
        }
    }

    /// Constructs a local position from exactly three generic values, `[east, north, up]`.
    pub fn from_values(values: &[f64], origin: impl Into<Position>) -> Result<Self, InvalidInput> {
        match *values {
            [east, north, up] => Ok(Self::from_meters(east, north, up, origin)),
            _ => Err(wrong_arity(values.len())),
        }
    }

    /// Returns `[east, north, up]` in meters.
    #[must_use]
    pub fn values(&self) -> [f64; 3] {
        [self.east, self.north, self.up]
    }

    /// Replaces the offsets from exactly three generic values. The origin is kept.
    ///
    /// Anything but three values leaves `self` untouched.
    pub fn set_values(&mut self, values: &[f64]) -> Result<(), InvalidInput> {
        let [east, north, up] = <[f64; 3]>::try_from(values).map_err(|_| wrong_arity(values.len()))?;
        self.east = east;
        self.north = north;
        self.up = up;
        Ok(())
    }

    #[must_use]
    pub fn east(&self) -> Length {
        Length::new::<meter>(self.east)
    }

    #[must_use]
    pub fn north(&self) -> Length {
        Length::new::<meter>(self.north)
    }

    #[must_use]
    pub fn up(&self) -> Length {
        Length::new::<meter>(self.up)
    }

    pub fn set_east(&mut self, east: impl Into<Length>) {
        self.east = east.into().get::<meter>();
    }

    pub fn set_north(&mut self, north: impl Into<Length>) {
        self.north = north.into().get::<meter>();
    }

    pub fn set_up(&mut self, up: impl Into<Length>) {
        self.up = up.into().get::<meter>();
    }

    #[must_use]
    pub fn origin(&self) -> &Position {
        &self.origin
    }

    /// Gives mutable access to this position's private copy of its origin.
    pub fn origin_mut(&mut self) -> &mut Position {
        &mut self.origin
    }

    /// Replaces the origin with a copy of `origin`.
    pub fn set_origin(&mut self, origin: impl Into<Position>) {
        self.origin = Box::new(origin.into());
    }

    /// Replaces the origin with a [`Geodetic`] built from `[latitude°, longitude°]` or
    /// `[latitude°, longitude°, altitude m]`.
    ///
    /// Any other number of values is rejected and the current origin is kept.
    pub fn set_origin_values(&mut self, values: &[f64]) -> Result<(), InvalidInput> {
        let origin = Geodetic::from_values(values)
            .map_err(|_| InvalidInput::OriginArity { found: values.len() })?;
        self.set_origin(origin);
        Ok(())
    }

    /// Offsets as a vector in the east, north, up basis.
    pub(crate) fn enu(&self) -> Vector3 {
        Vector3::new(self.east, self.north, self.up)
    }

    pub(crate) fn from_enu(enu: Vector3, origin: impl Into<Position>) -> Self {
        Self::from_meters(enu.x, enu.y, enu.z, origin)
    }
}

fn wrong_arity(found: usize) -> InvalidInput {
    InvalidInput::WrongArity {
        frame: Frame::LocalTangentPlane,
        expected: Arity::Three,
        found,
    }
}

/// Renders `[east, north, up]` with six decimals. The origin is not included.
impl Display for LocalTangentPlane {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        util::write_values(f, &self.values())
    }
}

/// Approximate comparison of the offsets. Origins must match exactly.
#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for LocalTangentPlane {
    type Epsilon = Length;

    fn default_epsilon() -> Self::Epsilon {
        Length::new::<meter>(0.001)
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.origin == other.origin && self.enu().abs_diff_eq(&other.enu(), epsilon.get::<meter>())
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for LocalTangentPlane {
    fn default_max_relative() -> Self::Epsilon {
        Length::new::<meter>(Vector3::default_max_relative())
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.origin == other.origin
            && self.enu().relative_eq(
                &other.enu(),
                epsilon.get::<meter>(),
                max_relative.get::<meter>(),
            )
    }
}
