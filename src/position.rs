use crate::error::InvalidInput;
use crate::{Geocentric, Geodetic, LocalTangentPlane};
use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Names the reference frame a [`Position`] is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Frame {
    /// Latitude, longitude, and (optionally) altitude.
    Geodetic,
    /// Earth-centered, Earth-fixed cartesian (ECEF).
    Geocentric,
    /// East, north, up relative to an origin (ENU).
    LocalTangentPlane,
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Frame::Geodetic => "geodetic",
            Frame::Geocentric => "geocentric",
            Frame::LocalTangentPlane => "local tangent plane",
        })
    }
}

/// A position in any of the supported frames.
///
/// This is what [`Convert`](crate::convert::Convert) implementations consume and produce. Each
/// converter matches on the variant it expects and returns [`InvalidInput::WrongFrame`] for any
/// other.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "frame", rename_all = "snake_case"))]
pub enum Position {
    Geodetic(Geodetic),
    Geocentric(Geocentric),
    LocalTangentPlane(LocalTangentPlane),
}

impl Position {
    #[must_use]
    pub fn frame(&self) -> Frame {
        match self {
            Position::Geodetic(_) => Frame::Geodetic,
            Position::Geocentric(_) => Frame::Geocentric,
            Position::LocalTangentPlane(_) => Frame::LocalTangentPlane,
        }
    }

    /// Returns the generic values of the position, in the order of its frame's convention.
    ///
    /// This is `[latitude°, longitude°]` or `[latitude°, longitude°, altitude m]` for
    /// [`Geodetic`], `[x, y, z]` for [`Geocentric`], and `[east, north, up]` for
    /// [`LocalTangentPlane`].
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        match self {
            Position::Geodetic(p) => p.values(),
            Position::Geocentric(p) => p.values().to_vec(),
            Position::LocalTangentPlane(p) => p.values().to_vec(),
        }
    }

    /// Replaces the generic values of the position, keeping its frame.
    ///
    /// On error the position is left as it was.
    pub fn set_values(&mut self, values: &[f64]) -> Result<(), InvalidInput> {
        match self {
            Position::Geodetic(p) => p.set_values(values),
            Position::Geocentric(p) => p.set_values(values),
            Position::LocalTangentPlane(p) => p.set_values(values),
        }
    }

    #[must_use]
    pub fn as_geodetic(&self) -> Option<&Geodetic> {
        match self {
            Position::Geodetic(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_geocentric(&self) -> Option<&Geocentric> {
        match self {
            Position::Geocentric(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_local_tangent_plane(&self) -> Option<&LocalTangentPlane> {
        match self {
            Position::LocalTangentPlane(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_geodetic(self) -> Result<Geodetic, InvalidInput> {
        match self {
            Position::Geodetic(p) => Ok(p),
            other => Err(other.wrong_frame(Frame::Geodetic)),
        }
    }

    pub fn into_geocentric(self) -> Result<Geocentric, InvalidInput> {
        match self {
            Position::Geocentric(p) => Ok(p),
            other => Err(other.wrong_frame(Frame::Geocentric)),
        }
    }

    pub fn into_local_tangent_plane(self) -> Result<LocalTangentPlane, InvalidInput> {
        match self {
            Position::LocalTangentPlane(p) => Ok(p),
            other => Err(other.wrong_frame(Frame::LocalTangentPlane)),
        }
    }

    pub(crate) fn wrong_frame(&self, expected: Frame) -> InvalidInput {
        InvalidInput::WrongFrame {
            expected,
            found: self.frame(),
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Position::Geodetic(p) => Display::fmt(p, f),
            Position::Geocentric(p) => Display::fmt(p, f),
            Position::LocalTangentPlane(p) => Display::fmt(p, f),
        }
    }
}

impl From<Geodetic> for Position {
    fn from(p: Geodetic) -> Self {
        Position::Geodetic(p)
    }
}

impl From<Geocentric> for Position {
    fn from(p: Geocentric) -> Self {
        Position::Geocentric(p)
    }
}

impl From<LocalTangentPlane> for Position {
    fn from(p: LocalTangentPlane) -> Self {
        Position::LocalTangentPlane(p)
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, Position};
    use crate::error::{Arity, InvalidInput};
    use crate::{Geocentric, Geodetic, LocalTangentPlane};
    use rstest::rstest;

    fn tokyo() -> Geodetic {
        Geodetic::from_degrees_and_meters(35.6812, 139.7671, 40.)
    }

    #[rstest]
    #[case(Geodetic::from_degrees(1., 2.).into(), Frame::Geodetic, 2)]
    #[case(tokyo().into(), Frame::Geodetic, 3)]
    #[case(Geocentric::from_meters(1., 2., 3.).into(), Frame::Geocentric, 3)]
    #[case(LocalTangentPlane::from_meters(1., 2., 3., tokyo()).into(), Frame::LocalTangentPlane, 3)]
    fn frame_and_arity(#[case] position: Position, #[case] frame: Frame, #[case] n: usize) {
        assert_eq!(position.frame(), frame);
        assert_eq!(position.values().len(), n);
    }

    #[test]
    fn set_values_keeps_frame_and_rejects_bad_shape() {
        let mut position = Position::from(Geocentric::from_meters(1., 2., 3.));
        assert_eq!(
            position.set_values(&[4., 5.]),
            Err(InvalidInput::WrongArity {
                frame: Frame::Geocentric,
                expected: Arity::Three,
                found: 2
            })
        );
        assert_eq!(position.values(), vec![1., 2., 3.]);

        position.set_values(&[4., 5., 6.]).unwrap();
        assert_eq!(position.frame(), Frame::Geocentric);
        assert_eq!(position.values(), vec![4., 5., 6.]);
    }

    #[test]
    fn downcasts() {
        let position = Position::from(tokyo());
        assert_eq!(position.as_geodetic(), Some(&tokyo()));
        assert_eq!(position.as_geocentric(), None);
        assert_eq!(position.as_local_tangent_plane(), None);
        assert_eq!(
            position.clone().into_geocentric(),
            Err(InvalidInput::WrongFrame {
                expected: Frame::Geocentric,
                found: Frame::Geodetic
            })
        );
        assert_eq!(position.into_geodetic(), Ok(tokyo()));
    }

    #[test]
    fn display_delegates() {
        insta::assert_snapshot!(Position::from(tokyo()), @"[35.681200, 139.767100, 40.000000]");
        insta::assert_snapshot!(Position::from(Geodetic::from_degrees(-1., 0.5)), @"[-1.000000, 0.500000]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn position_serde() {
        let position = Position::from(LocalTangentPlane::from_meters(
            10.,
            -20.,
            3.5,
            Geocentric::from_meters(1., 2., 3.),
        ));
        let ser = serde_yaml::to_string(&position).unwrap();
        let de = serde_yaml::from_str::<Position>(&ser).unwrap();
        assert_eq!(position, de);
    }
}
