use crate::error::{Arity, InvalidInput};
use crate::position::Frame;
use crate::util;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use uom::si::f64::{Angle, Length};
use uom::si::{angle::degree, length::meter};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A location given as latitude and longitude on a reference ellipsoid, and optionally the
/// altitude above that ellipsoid.
///
/// The ellipsoid itself is not part of the position; it is supplied to whatever converter the
/// position is handed to.
///
/// A missing altitude means that no altitude is known, which is distinct from an altitude of
/// zero. Converters that need one treat a missing altitude as being on the ellipsoid surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geodetic {
    // NOTE: stored as the raw degrees/meters the caller gave us so that `values` hands back
    // exactly what went in. no normalization of either angle happens here.
    latitude: f64,
    longitude: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    altitude: Option<f64>,
}

impl Geodetic {
    /// Constructs a geodetic position from its typed components.
    pub fn build(
        Components {
            latitude,
            longitude,
            altitude,
        }: Components,
    ) -> Self {
        let builder = Self::builder().latitude(latitude).longitude(longitude);
        match altitude {
            Some(altitude) => builder.altitude(altitude).build(),
            None => builder.build(),
        }
    }

    /// Provides a constructor for a [`Geodetic`] position.
    pub fn builder() -> Builder<MissingLatitude, MissingLongitude> {
        Builder {
            under_construction: Geodetic {
                latitude: 0.,
                longitude: 0.,
                altitude: None,
            },
            has: (PhantomData, PhantomData),
        }
    }

    /// Constructs a position without altitude from latitude and longitude in degrees.
    #[must_use]
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    /// Constructs a position from latitude and longitude in degrees and altitude in meters.
    #[must_use]
    pub fn from_degrees_and_meters(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: Some(altitude),
        }
    }

    /// Constructs a position from `[latitude°, longitude°]` or
    /// `[latitude°, longitude°, altitude m]`.
    pub fn from_values(values: &[f64]) -> Result<Self, InvalidInput> {
        match *values {
            [latitude, longitude] => Ok(Self::from_degrees(latitude, longitude)),
            [latitude, longitude, altitude] => Ok(Self::from_degrees_and_meters(
                latitude, longitude, altitude,
            )),
            _ => Err(InvalidInput::WrongArity {
                frame: Frame::Geodetic,
                expected: Arity::TwoOrThree,
                found: values.len(),
            }),
        }
    }

    /// Returns `[latitude°, longitude°]`, or `[latitude°, longitude°, altitude m]` when the
    /// altitude is known.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        let mut values = vec![self.latitude, self.longitude];
        values.extend(self.altitude);
        values
    }

    /// Replaces latitude, longitude, and altitude from 2 or 3 generic values.
    ///
    /// Two values clear the altitude. Any other length is rejected and leaves `self` untouched.
    pub fn set_values(&mut self, values: &[f64]) -> Result<(), InvalidInput> {
        *self = Self::from_values(values)?;
        Ok(())
    }

    /// Returns the angle north of the equator.
    #[must_use]
    pub fn latitude(&self) -> Angle {
        Angle::new::<degree>(self.latitude)
    }

    /// Returns the angle east of the [IERS Reference Meridian].
    ///
    /// [IERS Reference Meridian]: https://en.wikipedia.org/wiki/IERS_Reference_Meridian
    #[must_use]
    pub fn longitude(&self) -> Angle {
        Angle::new::<degree>(self.longitude)
    }

    /// Returns the height above the reference ellipsoid, if known.
    ///
    /// Note that this is not height above sea level; no geoid model is applied.
    #[must_use]
    pub fn altitude(&self) -> Option<Length> {
        self.altitude.map(Length::new::<meter>)
    }

    pub fn set_latitude(&mut self, latitude: impl Into<Angle>) {
        self.latitude = latitude.into().get::<degree>();
    }

    pub fn set_longitude(&mut self, longitude: impl Into<Angle>) {
        self.longitude = longitude.into().get::<degree>();
    }

    pub fn set_altitude(&mut self, altitude: impl Into<Length>) {
        self.altitude = Some(altitude.into().get::<meter>());
    }

    /// Forgets the altitude, so that [`Geodetic::values`] yields two values again.
    pub fn clear_altitude(&mut self) {
        self.altitude = None;
    }

    /// Latitude and longitude in radians, altitude in meters with a missing altitude as zero.
    pub(crate) fn radians_and_meters(&self) -> (f64, f64, f64) {
        (
            util::deg_to_rad(self.latitude),
            util::deg_to_rad(self.longitude),
            self.altitude.unwrap_or(0.),
        )
    }

    /// Computes the [great-circle distance] between the two positions' projections onto a
    /// sphere with the given radius, ignoring altitude.
    ///
    /// Note that this is an approximation as the earth is not a perfect sphere.
    ///
    /// [great-circle distance]: https://en.wikipedia.org/wiki/Great-circle_distance
    #[doc(alias = "great_circle_distance")]
    #[must_use]
    pub fn haversine_distance(&self, other: &Geodetic, radius: impl Into<Length>) -> Length {
        radius.into() * central_angle_by_inverse_haversine(self, other)
    }
}

/// Renders `[latitude, longitude]` or `[latitude, longitude, altitude]` with six decimals.
///
/// The alternate form (`{:#}`) renders hemispheres instead, eg `35.3619°N, 138.728°E, 2294m`.
impl Display for Geodetic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !f.alternate() {
            return util::write_values(f, &self.values());
        }

        let ns = if self.latitude.is_sign_negative() { 'S' } else { 'N' };
        let ew = if self.longitude.is_sign_negative() { 'W' } else { 'E' };
        let (lat, lon) = (self.latitude.abs(), self.longitude.abs());
        write!(f, "{lat}°{ns}, {lon}°{ew}")?;
        if let Some(alt) = self.altitude {
            write!(f, ", {alt}m")?;
        }
        Ok(())
    }
}

/// Computes the central angle (in radians) between the given lat/lon points.
///
/// The current implementation computes this [using the archaversine] (inverse haversine).
///
/// [using the archaversine]: https://en.wikipedia.org/wiki/Haversine_formula#Formulation
fn central_angle_by_inverse_haversine(a: &Geodetic, b: &Geodetic) -> f64 {
    let (lat_a, lon_a, _) = a.radians_and_meters(); // φ1, λ1
    let (lat_b, lon_b, _) = b.radians_and_meters(); // φ2, λ2
    let delta_lat = lat_b - lat_a;
    let delta_lon = lon_b - lon_a;

    let inner = 1. - delta_lat.cos() + lat_a.cos() * lat_b.cos() * (1. - delta_lon.cos());
    2. * (inner / 2.).max(0.).sqrt().asin()
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Geodetic {
    type Epsilon = Length;

    fn default_epsilon() -> Self::Epsilon {
        // NOTE: in meters, both along the surface and vertically. the geocentric to geodetic
        // inverse converges to well below a millimeter, so a centimeter is generous.
        Length::new::<meter>(0.01)
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let radius = crate::ellipsoid::WGS84.semi_major_axis();
        self.haversine_distance(other, radius) <= epsilon
            && match (self.altitude, other.altitude) {
                (None, None) => true,
                (Some(a), Some(b)) => a.abs_diff_eq(&b, epsilon.get::<meter>()),
                _ => false,
            }
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Geodetic {
    fn default_max_relative() -> Self::Epsilon {
        Length::new::<meter>(f64::default_max_relative())
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        let radius = crate::ellipsoid::WGS84.semi_major_axis();
        self.haversine_distance(other, radius)
            .get::<meter>()
            .abs_diff_eq(&0., epsilon.get::<meter>())
            && match (self.altitude, other.altitude) {
                (None, None) => true,
                (Some(a), Some(b)) => {
                    a.relative_eq(&b, epsilon.get::<meter>(), max_relative.get::<meter>())
                }
                _ => false,
            }
    }
}

/// Argument type for [`Geodetic::build`].
#[derive(Debug, Default, Clone, Copy)]
#[must_use]
pub struct Components {
    /// The latitude angle of the proposed [`Geodetic`] position.
    pub latitude: Angle,

    /// The longitude angle of the proposed [`Geodetic`] position.
    pub longitude: Angle,

    /// The altitude above the reference ellipsoid, if known.
    pub altitude: Option<Length>,
}

/// Used to indicate that a partially-constructed [`Geodetic`] is missing the latitude component.
pub struct MissingLatitude;
/// Used to indicate that a partially-constructed [`Geodetic`] has the latitude component set.
pub struct HasLatitude;
/// Used to indicate that a partially-constructed [`Geodetic`] is missing the longitude component.
pub struct MissingLongitude;
/// Used to indicate that a partially-constructed [`Geodetic`] has the longitude component set.
pub struct HasLongitude;

/// [Builder] for a [`Geodetic`] position.
///
/// Latitude and longitude must be provided before [`Builder::build`] becomes available. The
/// altitude is optional.
///
/// [Builder]: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
#[derive(Debug)]
#[must_use]
pub struct Builder<Latitude, Longitude> {
    under_construction: Geodetic,
    has: (PhantomData<Latitude>, PhantomData<Longitude>),
}

// manual impls of Clone and Copy to avoid requiring the markers to be Copy + Clone
impl<L1, L2> Clone for Builder<L1, L2> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<L1, L2> Copy for Builder<L1, L2> {}

impl<L1, L2> Builder<L1, L2> {
    pub fn latitude(mut self, latitude: impl Into<Angle>) -> Builder<HasLatitude, L2> {
        self.under_construction.set_latitude(latitude);
        Builder {
            under_construction: self.under_construction,
            has: (PhantomData::<HasLatitude>, self.has.1),
        }
    }

    pub fn longitude(mut self, longitude: impl Into<Angle>) -> Builder<L1, HasLongitude> {
        self.under_construction.set_longitude(longitude);
        Builder {
            under_construction: self.under_construction,
            has: (self.has.0, PhantomData::<HasLongitude>),
        }
    }

    /// Sets the altitude above the reference ellipsoid.
    pub fn altitude(mut self, altitude: impl Into<Length>) -> Self {
        self.under_construction.set_altitude(altitude);
        self
    }
}

impl Builder<HasLatitude, HasLongitude> {
    #[must_use]
    pub fn build(self) -> Geodetic {
        self.under_construction
    }
}
