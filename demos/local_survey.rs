//! Converts a handful of survey points taken relative to a base station into geodetic and ECEF
//! positions and back.
//!
//! Run with `RUST_LOG=trace` to see every conversion step.

use geoframes::convert::{
    Convert, GeocentricToGeodetic, GeodeticToLocalTangentPlane, LocalTangentPlaneToGeocentric,
    LocalTangentPlaneToGeodetic,
};
use geoframes::{ellipsoid, Geodetic, LocalTangentPlane, Position};
use uom::si::f64::Length;
use uom::si::length::meter;

fn main() -> Result<(), geoframes::InvalidInput> {
    env_logger::init();

    // base station on the Schlossberg in Freiburg
    let base = Geodetic::from_degrees_and_meters(47.9948211, 7.8211606, 460.);

    let to_geodetic = LocalTangentPlaneToGeodetic::new(ellipsoid::WGS84, base);
    let to_ecef = LocalTangentPlaneToGeocentric::new(ellipsoid::WGS84, base);
    let to_local = GeodeticToLocalTangentPlane::new(ellipsoid::WGS84, base);

    let points = [
        ("cathedral spire", [-380., -610., -184.]),
        ("tower", [1250., 40., 35.]),
        ("far marker", [-9800., 15200., -210.]),
    ];

    for (name, enu) in points {
        let local = Position::from(LocalTangentPlane::from_values(&enu, base)?);

        let geodetic = to_geodetic.convert(&local)?;
        let ecef = to_ecef.convert(&local)?;
        let back = to_local.convert(&geodetic)?;

        println!("{name}");
        println!("  local      {local}");
        println!("  geodetic   {geodetic:#}");
        println!("  geocentric {ecef}");
        println!("  local      {back} (round trip)");
    }

    // the same ECEF point on two different ellipsoids
    let ecef = to_ecef.convert(&LocalTangentPlane::from_meters(0., 0., 0., base).into())?;
    for (name, ellipsoid) in [
        ("WGS84", ellipsoid::WGS84),
        ("Bessel 1841", ellipsoid::BESSEL_1841),
    ] {
        let geodetic = GeocentricToGeodetic::new(ellipsoid).convert(&ecef)?.into_geodetic()?;
        let altitude = geodetic.altitude().unwrap_or(Length::new::<meter>(0.));
        println!(
            "base station on {name}: {geodetic:#} ({:.3} m above the ellipsoid)",
            altitude.get::<meter>()
        );
    }

    Ok(())
}
