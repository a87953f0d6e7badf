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

//! The track module contains functions for calculating equally spaced
//! positions along the geodesic between a pair of positions.
//!
//! Each step uses the "direct" solution from the previous position and then
//! recalculates the azimuth to the finish position with the "inverse"
//! solution, since the azimuth of a geodesic changes along its length.

use crate::vincenty::{self, validate_latitude, validate_longitude, MAX_PRECISION};
use crate::{Ellipsoid, GeodesyError, Metres};
use alloc::vec::Vec;
use angle_sc::{Angle, Degrees, Radians};
use core::f64::consts::PI;
use unit_sphere::LatLong;

/// Calculate the great circle separation of a pair of positions on a sphere.
/// It uses the formula from Vincenty's paper, which is accurate for
/// positions that are nearly antipodal.
/// * `a_lat`, `b_lat` - the latitudes of the positions.
/// * `delta_long` - the longitude difference between the positions.
///
/// returns the separation in the range [0, π].
#[must_use]
pub fn calculate_gc_separation(a_lat: Angle, b_lat: Angle, delta_long: Angle) -> Radians {
    let (sin_lat1, cos_lat1) = (a_lat.sin().0, a_lat.cos().0);
    let (sin_lat2, cos_lat2) = (b_lat.sin().0, b_lat.cos().0);
    let (sin_delta_lon, cos_delta_lon) = (delta_long.sin().0, delta_long.cos().0);
    Radians(libm::atan2(
        libm::hypot(
            cos_lat2 * sin_delta_lon,
            cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_delta_lon,
        ),
        sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_delta_lon,
    ))
}

/// Calculate `npts` positions along the geodesic between a pair of positions.
///
/// The first and last positions are `a` and `b` unchanged, the positions
/// between them are equally spaced along the geodesic.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
/// * `npts` - the number of positions, at least 2.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// # Errors
///
/// `TooFewPoints` if `npts` < 2,
/// `LatitudeOutOfRange` if either latitude is not within -90° to 90°,
/// `InvalidLongitude` if either longitude is not finite,
/// `AntipodalEndpoints` if `npts` > 2 and the positions are antipodal, since
/// there is no unique geodesic between them.
///
/// # Examples
/// ```
/// use vincenty_geodesic::*;
/// use angle_sc::is_within_tolerance;
///
/// let a = LatLong::new(Degrees(0.0), Degrees(0.0));
/// let b = LatLong::new(Degrees(0.0), Degrees(90.0));
/// let points = track::calculate_track(&a, &b, 5, &WGS84_ELLIPSOID).unwrap();
///
/// assert_eq!(5, points.len());
/// assert!(is_within_tolerance(45.0, points[2].lon().0, 1e-9));
/// ```
pub fn calculate_track(
    a: &LatLong,
    b: &LatLong,
    npts: usize,
    ellipsoid: &Ellipsoid,
) -> Result<Vec<LatLong>, GeodesyError> {
    if npts < 2 {
        return Err(GeodesyError::TooFewPoints(npts));
    }

    validate_latitude(a.lat())?;
    validate_longitude(a.lon())?;
    validate_latitude(b.lat())?;
    validate_longitude(b.lon())?;

    let mut points = Vec::with_capacity(npts);
    points.push(LatLong::new(a.lat(), a.lon()));
    if 2 < npts {
        let separation = calculate_gc_separation(
            Angle::from(a.lat()),
            Angle::from(b.lat()),
            Angle::from(b.lon() - a.lon()),
        );
        if libm::fabs(PI - separation.0) <= MAX_PRECISION.0 {
            return Err(GeodesyError::AntipodalEndpoints);
        }

        let solution = vincenty::inverse(a, b, ellipsoid)?;
        #[allow(clippy::cast_precision_loss)]
        let increment = Metres(solution.distance().0 / (npts - 1) as f64);

        let mut azimuth: Degrees = solution.azimuth();
        let mut position = LatLong::new(a.lat(), a.lon());
        for _ in 2..npts {
            let step = vincenty::direct(&position, increment, azimuth, ellipsoid)?;
            position = step.position();

            // the azimuth changes along the geodesic
            azimuth = vincenty::inverse(&position, b, ellipsoid)?.azimuth();
            points.push(step.position());
        }
    }
    points.push(LatLong::new(b.lat(), b.lon()));

    Ok(points)
}
