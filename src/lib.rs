// Copyright (c) 2024-2026 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! vincenty-geodesic
//!
//! A library for solving geodesic problems on the surface of an ellipsoid of
//! revolution, e.g. the
//! [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid or the reference ellipsoids of other planetary bodies.
//!
//! ## Geodesic navigation
//!
//! The shortest path between two points on the surface of an ellipsoid is a
//! [geodesic](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid).
//! It is the equivalent of a straight line segment in planar geometry or a
//! [great circle arc](https://en.wikipedia.org/wiki/Great_circle) on the
//! surface of a sphere.
//!
//! This library uses T. Vincenty's nested equations to calculate:
//!
//! - the length and azimuths of the geodesic between two positions, the
//!   "inverse" problem: [`vincenty::inverse`] or [`vdist`];
//! - the position at a distance and azimuth from a position, the "direct"
//!   problem: [`vincenty::direct`] or [`vreckon`];
//! - equally spaced positions along the geodesic between two positions:
//!   [`track::calculate_track`] or [`track2`].
//!
//! ## Design
//!
//! The `Ellipsoid` class represents an ellipsoid of revolution.
//! The static `WGS84_ELLIPSOID` represents the WGS-84 `Ellipsoid` and the
//! [`ellipsoid::models`] module contains a catalog of other reference ellipsoids.
//! Ellipsoids are immutable and are passed to the solvers by reference.
//!
//! The solvers are pure functions, so they may be called from any number of
//! threads at the same time.
//!
//! Positions that are essentially antipodal are solved with slightly reduced
//! precision: a warning is logged via the [log](https://crates.io/crates/log)
//! facade and the solution is flagged, see
//! [`vincenty::InverseSolution::precision_reduced`].
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Degrees`
//!   and `Radians`;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.

#![cfg_attr(not(test), no_std)]

extern crate alloc;
extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod ellipsoid;
pub mod error;
pub mod track;
pub mod vincenty;

pub use angle_sc::{Degrees, Radians};
pub use error::GeodesyError;
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use unit_sphere::LatLong;

use alloc::vec::Vec;
use lazy_static::lazy_static;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
}

impl Ellipsoid {
    /// Constructor.
    /// @pre `a` > 0 and 0 <= `f` < 1.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    #[must_use]
    pub fn new(a: Metres, f: f64) -> Self {
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            one_minus_f: 1.0 - f,
            e_2: ellipsoid::calculate_sq_eccentricity(f),
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
        }
    }

    /// Construct an `Ellipsoid` from its Semimajor and Semiminor axes.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `b` - the Semiminor axis of the `Ellipsoid`.
    ///
    /// # Errors
    ///
    /// `InvalidEllipsoid` unless `a` is finite and 0 < `b` <= `a`.
    pub fn from_axes(a: Metres, b: Metres) -> Result<Self, GeodesyError> {
        if a.0.is_finite() && 0.0 < b.0 && b.0 <= a.0 {
            Ok(Self::new(a, ellipsoid::calculate_flattening(a, b)))
        } else {
            Err(GeodesyError::InvalidEllipsoid { a: a.0, b: b.0 })
        }
    }

    /// Find an `Ellipsoid` in the catalog of reference ellipsoids by name.
    /// * `name` - the name of the model, e.g. "wgs84", "grs80", "moon".
    ///
    /// # Errors
    ///
    /// `UnknownModel` if the name is not in the catalog.
    pub fn from_name(name: &str) -> Result<&'static Self, GeodesyError> {
        name.parse::<ellipsoid::models::Model>()
            .map(ellipsoid::models::Model::ellipsoid)
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::new(ellipsoid::models::wgs84::A, ellipsoid::models::wgs84::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `Ellipsoid`.
    pub static ref WGS84_ELLIPSOID: Ellipsoid = Ellipsoid::wgs84();
}

/// Calculate the geodesic distance and azimuth between a pair of positions.
/// * `lat1`, `lon1` - the start position.
/// * `lat2`, `lon2` - the finish position.
/// * `ellipsoid` - the `Ellipsoid`, WGS-84 if None.
///
/// returns the distance and the azimuth at the start position in the
/// range [0°, 360°).
///
/// # Errors
///
/// `LatitudeOutOfRange` if either latitude is not within -90° to 90°,
/// `InvalidLongitude` if either longitude is not finite.
///
/// # Examples
/// ```
/// use vincenty_geodesic::*;
/// use angle_sc::is_within_tolerance;
///
/// let (distance, azimuth) = vdist(Degrees(0.0), Degrees(0.0), Degrees(0.0), Degrees(1.0), None).unwrap();
/// assert!(is_within_tolerance(111_319.490_793, distance.0, 1e-6));
/// assert_eq!(90.0, azimuth.0);
/// ```
pub fn vdist(
    lat1: Degrees,
    lon1: Degrees,
    lat2: Degrees,
    lon2: Degrees,
    ellipsoid: Option<&Ellipsoid>,
) -> Result<(Metres, Degrees), GeodesyError> {
    let ellipsoid = ellipsoid.unwrap_or(&*WGS84_ELLIPSOID);
    let solution = vincenty::inverse(
        &LatLong::new(lat1, lon1),
        &LatLong::new(lat2, lon2),
        ellipsoid,
    )?;
    Ok((solution.distance(), solution.azimuth()))
}

/// Calculate the position at a distance and azimuth from a position.
/// * `lat1`, `lon1` - the start position.
/// * `range` - the distance along the geodesic.
/// * `azimuth` - the azimuth at the start position, in any range.
/// * `ellipsoid` - the `Ellipsoid`, WGS-84 if None.
///
/// returns the latitude and longitude of the finish position, the longitude
/// in the range (-180°, 180°].
///
/// # Errors
///
/// `LatitudeOutOfRange` if the latitude is not within -90° to 90°,
/// `InvalidLongitude` if the longitude is not finite,
/// `InvalidRange` if the range is negative or not finite,
/// `InvalidAzimuth` if the azimuth is not finite.
pub fn vreckon(
    lat1: Degrees,
    lon1: Degrees,
    range: Metres,
    azimuth: Degrees,
    ellipsoid: Option<&Ellipsoid>,
) -> Result<(Degrees, Degrees), GeodesyError> {
    let ellipsoid = ellipsoid.unwrap_or(&*WGS84_ELLIPSOID);
    let solution = vincenty::direct(&LatLong::new(lat1, lon1), range, azimuth, ellipsoid)?;
    Ok((solution.lat(), solution.lon()))
}

/// Calculate `npts` equally spaced positions along the geodesic between a
/// pair of positions.
/// * `lat1`, `lon1` - the start position.
/// * `lat2`, `lon2` - the finish position.
/// * `ellipsoid` - the `Ellipsoid`, WGS-84 if None.
/// * `npts` - the number of positions, at least 2.
///
/// returns the latitudes and longitudes of the positions.
///
/// # Errors
///
/// See [`track::calculate_track`].
pub fn track2(
    lat1: Degrees,
    lon1: Degrees,
    lat2: Degrees,
    lon2: Degrees,
    ellipsoid: Option<&Ellipsoid>,
    npts: usize,
) -> Result<(Vec<Degrees>, Vec<Degrees>), GeodesyError> {
    let ellipsoid = ellipsoid.unwrap_or(&*WGS84_ELLIPSOID);
    let points = track::calculate_track(
        &LatLong::new(lat1, lon1),
        &LatLong::new(lat2, lon2),
        npts,
        ellipsoid,
    )?;
    Ok(points.iter().map(|point| (point.lat(), point.lon())).unzip())
}
