//! This library converts positions between the three frames that geodesy, navigation, and
//! surveying software keep having to move between:
//!
//! - [`Geodetic`]: latitude and longitude in degrees on a reference [`Ellipsoid`], plus an
//!   optional altitude above it in meters.
//! - [`Geocentric`]: Earth-Centered, Earth-Fixed (ECEF) cartesian `x`, `y`, `z` in meters.
//! - [`LocalTangentPlane`]: east, north, up (ENU) offsets in meters from an origin, measured in the
//!   plane tangent to the ellipsoid at that origin.
//!
//! Any of them can be wrapped in a [`Position`], which is what the conversion strategies in
//! [`convert`] accept and produce. Each strategy converts from exactly one frame to exactly one
//! other and is parameterized, at construction, with the ellipsoid to use (and, for local tangent
//! planes, the origin). Strategies never change after construction, so a single one can be shared
//! across threads and reused for any number of positions.
//!
//! A small set of well-known ellipsoids, such as [WGS84](ellipsoid::WGS84) and
//! [GRS80](ellipsoid::GRS80), lives in [`ellipsoid`].
//!
//! # Examples
//!
//! Assume a surveyor has set up a base station and wants to know where a point measured 120 m
//! east, 45 m north, and 3 m up of it lies on the globe, and how far that is from the center of
//! the Earth.
//!
//! ```
//! use geoframes::convert::{Convert, LocalTangentPlaneToGeocentric, LocalTangentPlaneToGeodetic};
//! use geoframes::{ellipsoid::WGS84, Geodetic, LocalTangentPlane, Position};
//! use uom::si::f64::{Angle, Length};
//! use uom::si::{angle::degree, length::meter};
//!
//! let base = Geodetic::builder()
//!     .latitude(Angle::new::<degree>(47.9948211))
//!     .longitude(Angle::new::<degree>(7.8211606))
//!     .altitude(Length::new::<meter>(278.))
//!     .build();
//!
//! let measured = LocalTangentPlane::new(
//!     Length::new::<meter>(120.),
//!     Length::new::<meter>(45.),
//!     Length::new::<meter>(3.),
//!     base,
//! );
//!
//! // typed, infallible path
//! let to_geodetic = LocalTangentPlaneToGeodetic::new(WGS84, base);
//! let on_globe = to_geodetic.to_geodetic(&measured);
//! assert!(on_globe.longitude() > base.longitude());
//! assert!(on_globe.latitude() > base.latitude());
//!
//! // generic path, for when frames are only known at runtime
//! let to_ecef: Box<dyn Convert> = Box::new(LocalTangentPlaneToGeocentric::new(WGS84, base));
//! let ecef = to_ecef.convert(&Position::from(measured))?.into_geocentric()?;
//! assert!(ecef.distance_from_center() > WGS84.semi_minor_axis());
//! # Ok::<(), geoframes::InvalidInput>(())
//! ```
//!
//! # Features
//!
//! - `serde` (default): `Serialize` and `Deserialize` for positions, ellipsoids, and
//!   [`IterationPolicy`](convert::IterationPolicy).
//! - `approx` (default): [`approx`](https://docs.rs/approx) comparisons for positions.
//!
//! # Logging
//!
//! Conversions emit [`log`](https://docs.rs/log) records at `trace` level, and a `debug` record
//! when the ECEF to geodetic iteration stops at its step limit. Install any `log` backend to see
//! them.

mod error;
mod geocentric;
mod geodetic;
mod local;
mod position;

pub mod convert;
pub mod ellipsoid;
pub mod util;

pub(crate) type Point3 = nalgebra::Point3<f64>;
pub(crate) type Vector3 = nalgebra::Vector3<f64>;
pub(crate) type Matrix3 = nalgebra::Matrix3<f64>;

pub use ellipsoid::Ellipsoid;
pub use error::{Arity, InvalidInput};
pub use geocentric::Geocentric;
pub use geodetic::Geodetic;
pub use local::LocalTangentPlane;
pub use position::{Frame, Position};

/// Types for constructing [`Geodetic`] positions from typed components.
pub mod builder {
    pub use super::geodetic::{
        Builder, Components, HasLatitude, HasLongitude, MissingLatitude, MissingLongitude,
    };
}
