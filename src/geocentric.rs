use crate::error::{Arity, InvalidInput};
use crate::position::Frame;
use crate::{util, Point3, Vector3};
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::f64::Length;
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in the Earth-Centered, Earth-Fixed cartesian frame.
///
/// The origin is the center of the reference ellipsoid, +X points at latitude 0°/longitude 0°,
/// +Y at latitude 0°/longitude 90°, and +Z at the north pole. All components are in meters.
///
/// See <https://en.wikipedia.org/wiki/Earth-centered,_Earth-fixed_coordinate_system>.
#[doc(alias = "ECEF")]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Xyz", into = "Xyz"))]
pub struct Geocentric {
    pub(crate) point: Point3,
}

impl Geocentric {
    pub(crate) fn from_nalgebra_point(point: Point3) -> Self {
        Self { point }
    }

    /// Constructs a point from its cartesian components.
    pub fn new(x: impl Into<Length>, y: impl Into<Length>, z: impl Into<Length>) -> Self {
        Self::from_meters(
            x.into().get::<meter>(),
            y.into().get::<meter>(),
            z.into().get::<meter>(),
        )
    }

    #[must_use]
    pub fn from_meters(x: f64, y: f64, z: f64) -> Self {
        Self::from_nalgebra_point(Point3::new(x, y, z))
    }

    /// Constructs a point from exactly three generic values, `[x, y, z]` in meters.
    pub fn from_values(values: &[f64]) -> Result<Self, InvalidInput> {
        match *values {
            [x, y, z] => Ok(Self::from_meters(x, y, z)),
            _ => Err(InvalidInput::WrongArity {
                frame: Frame::Geocentric,
                expected: Arity::Three,
                found: values.len(),
            }),
        }
    }

    /// Returns `[x, y, z]` in meters.
    #[must_use]
    pub fn values(&self) -> [f64; 3] {
        [self.point.x, self.point.y, self.point.z]
    }

    /// Replaces all three components. Anything but exactly three values leaves `self` untouched.
    pub fn set_values(&mut self, values: &[f64]) -> Result<(), InvalidInput> {
        *self = Self::from_values(values)?;
        Ok(())
    }

    #[must_use]
    pub fn x(&self) -> Length {
        Length::new::<meter>(self.point.x)
    }

    #[must_use]
    pub fn y(&self) -> Length {
        Length::new::<meter>(self.point.y)
    }

    #[must_use]
    pub fn z(&self) -> Length {
        Length::new::<meter>(self.point.z)
    }

    pub fn set_x(&mut self, x: impl Into<Length>) {
        self.point.x = x.into().get::<meter>();
    }

    pub fn set_y(&mut self, y: impl Into<Length>) {
        self.point.y = y.into().get::<meter>();
    }

    pub fn set_z(&mut self, z: impl Into<Length>) {
        self.point.z = z.into().get::<meter>();
    }

    /// Computes the distance of this point from the center of the Earth.
    #[doc(alias = "norm")]
    #[must_use]
    pub fn distance_from_center(&self) -> Length {
        Length::new::<meter>(self.point.coords.norm())
    }

    /// Computes the straight-line distance between this point and the given point.
    #[must_use]
    pub fn distance_from(&self, other: &Geocentric) -> Length {
        Length::new::<meter>(self.offset_to(other).norm())
    }

    /// The displacement that takes `self` to `other`.
    pub(crate) fn offset_to(&self, other: &Geocentric) -> Vector3 {
        other.point - self.point
    }

    pub(crate) fn translated(&self, by: Vector3) -> Self {
        Self::from_nalgebra_point(self.point + by)
    }
}

impl Display for Geocentric {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        util::write_values(f, &self.values())
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Geocentric {
    type Epsilon = Length;

    fn default_epsilon() -> Self::Epsilon {
        // NOTE: in meters. a millimeter is plenty for points that are ~6.4e6 m from the origin.
        Length::new::<meter>(0.001)
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // NOTE: this measures whether any _one_ component is off by more than epsilon, not
        // whether the distance between the points is.
        self.point.abs_diff_eq(&other.point, epsilon.get::<meter>())
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Geocentric {
    fn default_max_relative() -> Self::Epsilon {
        Length::new::<meter>(Point3::default_max_relative())
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.point.relative_eq(
            &other.point,
            epsilon.get::<meter>(),
            max_relative.get::<meter>(),
        )
    }
}

/// Wire shape of a [`Geocentric`] point.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct Xyz {
    x: f64,
    y: f64,
    z: f64,
}

#[cfg(feature = "serde")]
impl From<Xyz> for Geocentric {
    fn from(Xyz { x, y, z }: Xyz) -> Self {
        Geocentric::from_meters(x, y, z)
    }
}

#[cfg(feature = "serde")]
impl From<Geocentric> for Xyz {
    fn from(p: Geocentric) -> Self {
        let [x, y, z] = p.values();
        Xyz { x, y, z }
    }
}
