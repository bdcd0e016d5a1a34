use crate::util;
use uom::si::f64::{Angle, Length};
use uom::si::{angle::radian, length::meter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A reference ellipsoid, ie the mathematical model of the Earth's shape that geodetic
/// latitude, longitude, and altitude are measured against.
///
/// The eccentricity is derived from the flattening once, at construction, and can not drift
/// from it afterwards since the fields are not exposed for mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Parameters", into = "Parameters"))]
pub struct Ellipsoid {
    a: f64,
    f: f64,
    // e^2 = 1 - b^2/a^2
    //     = 1 - (a - af)^2 / a^2
    //     = 1 - (1 - 2 * f + f^2)
    //     = 2 * f - f^2
    e2: f64,
}

impl Ellipsoid {
    /// Constructs an ellipsoid from its semi-major axis `a` (in meters) and its flattening `f`.
    #[must_use]
    pub const fn new(semi_major_axis: f64, flattening: f64) -> Self {
        Self {
            a: semi_major_axis,
            f: flattening,
            e2: 2.0 * flattening - flattening * flattening,
        }
    }

    /// Constructs an ellipsoid from its semi-major axis and its inverse flattening `1/f`, which
    /// is how most datums publish it.
    #[must_use]
    pub const fn from_inverse_flattening(semi_major_axis: f64, inverse_flattening: f64) -> Self {
        Self::new(semi_major_axis, 1.0 / inverse_flattening)
    }

    /// Returns the equatorial radius.
    #[doc(alias = "a")]
    #[must_use]
    pub fn semi_major_axis(&self) -> Length {
        Length::new::<meter>(self.a)
    }

    /// Returns the polar radius, `a * (1 - f)`.
    #[doc(alias = "b")]
    #[must_use]
    pub fn semi_minor_axis(&self) -> Length {
        Length::new::<meter>(self.a * (1.0 - self.f))
    }

    #[doc(alias = "f")]
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// Returns the first eccentricity squared, `2f - f²`.
    #[doc(alias = "e2")]
    #[doc(alias = "e^2")]
    #[must_use]
    pub fn eccentricity_sq(&self) -> f64 {
        self.e2
    }

    /// Returns the prime-vertical radius of curvature at the given geodetic latitude.
    ///
    /// See <https://en.wikipedia.org/wiki/Earth_radius#Prime_vertical>.
    #[doc(alias = "N")]
    #[must_use]
    pub fn prime_vertical_radius(&self, latitude: impl Into<Angle>) -> Length {
        Length::new::<meter>(self.n(latitude.into().get::<radian>()))
    }

    pub(crate) fn e2(&self) -> f64 {
        self.e2
    }

    /// N for a latitude already in radians.
    pub(crate) fn n(&self, lat: f64) -> f64 {
        util::prime_vertical_radius(self.a, self.e2, lat)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        WGS84
    }
}

// https://nsgreg.nga.mil/doc/view?i=4085 table 3.1
pub const WGS84: Ellipsoid = Ellipsoid::from_inverse_flattening(6_378_137.0, 298.257_223_563);
pub const GRS80: Ellipsoid = Ellipsoid::from_inverse_flattening(6_378_137.0, 298.257_222_101);
pub const IERS2003: Ellipsoid = Ellipsoid::from_inverse_flattening(6_378_136.6, 298.256_42);
pub const GRS67: Ellipsoid = Ellipsoid::from_inverse_flattening(6_378_160.0, 298.247_167_427);
pub const AIRY_1830: Ellipsoid = Ellipsoid::from_inverse_flattening(6_377_563.396, 299.324_964_6);
pub const BESSEL_1841: Ellipsoid =
    Ellipsoid::from_inverse_flattening(6_377_397.155, 299.152_812_8);
pub const CLARKE_1866: Ellipsoid =
    Ellipsoid::from_inverse_flattening(6_378_206.4, 294.978_698_2);
/// Also known as Hayford 1909.
pub const INTERNATIONAL_1924: Ellipsoid = Ellipsoid::from_inverse_flattening(6_378_388.0, 297.0);

/// Wire shape of an [`Ellipsoid`]; `e2` is recomputed on the way in.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct Parameters {
    a: f64,
    f: f64,
}

#[cfg(feature = "serde")]
impl From<Parameters> for Ellipsoid {
    fn from(Parameters { a, f }: Parameters) -> Self {
        Ellipsoid::new(a, f)
    }
}

#[cfg(feature = "serde")]
impl From<Ellipsoid> for Parameters {
    fn from(e: Ellipsoid) -> Self {
        Parameters { a: e.a, f: e.f }
    }
}
