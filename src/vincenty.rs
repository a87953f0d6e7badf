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

//! The vincenty module contains iterative solutions of the two geodesic
//! problems on the surface of an ellipsoid of revolution:
//!
//! - the "inverse" problem: the length and azimuths of the geodesic between
//!   a pair of positions, see [`inverse`];
//! - the "direct" problem: the position at a distance along the geodesic from
//!   a position with a given azimuth, see [`direct`].
//!
//! Both use the nested equations of T. Vincenty in
//! [Direct and Inverse Solutions of Geodesics on the Ellipsoid with application of nested equations](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf).
//!
//! The geodesic is mapped onto a great circle arc on the auxiliary sphere
//! using the `reduced` latitudes of the positions.
//! The inverse solution iterates on `λ`, the longitude difference on the
//! auxiliary sphere, for at most `MAX_INVERSE_ITERATIONS` passes.
//! The direct solution iterates on `σ`, the arc length on the auxiliary sphere.
//!
//! All of the solver state is local to each call.

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::similar_names)]
#![allow(clippy::suboptimal_flops)]

use crate::ellipsoid::coefficients::{
    calculate_delta_sigma, calculate_lambda_correction, calculate_u_sq, evaluate_a, evaluate_b,
    evaluate_c,
};
use crate::ellipsoid::calculate_reduced_latitude;
use crate::{Ellipsoid, GeodesyError, Metres};
use angle_sc::{Angle, Degrees, Radians};
use core::f64::consts::{FRAC_PI_2, PI, TAU};
use log::{trace, warn};
use unit_sphere::LatLong;

/// The convergence tolerance of the iterations, in Radians.
pub const MAX_PRECISION: Radians = Radians(1e-12);

/// The maximum number of passes of the inverse iteration.
pub const MAX_INVERSE_ITERATIONS: u32 = 50;

/// Latitudes closer than this to a pole are moved this far from the pole,
/// approximately 0.6mm on the Earth.
pub const POLE_OFFSET: Radians = Radians(1e-10);

/// Validate a geodetic latitude.
/// * `lat` - the latitude.
///
/// returns the latitude in radians, or `LatitudeOutOfRange` if |lat| > 90°.
///
/// # Errors
///
/// `LatitudeOutOfRange` if the latitude is not within -90° to 90°, or is NaN.
pub fn validate_latitude(lat: Degrees) -> Result<f64, GeodesyError> {
    if libm::fabs(lat.0) <= 90.0 {
        Ok(lat.0.to_radians())
    } else {
        Err(GeodesyError::LatitudeOutOfRange(lat.0))
    }
}

/// Validate a longitude.
/// * `lon` - the longitude, in any range.
///
/// returns the longitude in radians.
///
/// # Errors
///
/// `InvalidLongitude` if the longitude is not finite.
pub fn validate_longitude(lon: Degrees) -> Result<f64, GeodesyError> {
    if lon.0.is_finite() {
        Ok(lon.0.to_radians())
    } else {
        Err(GeodesyError::InvalidLongitude(lon.0))
    }
}

/// Normalise a longitude into the range (-180°, 180°].
/// * `lon` - the longitude in degrees.
#[must_use]
pub fn normalise_longitude(lon: Degrees) -> Degrees {
    let mut value = libm::fmod(lon.0 + 180.0, 360.0);
    if value <= 0.0 {
        value += 360.0;
    }
    Degrees(value - 180.0)
}

/// Normalise an azimuth into the range [0°, 360°).
/// * `angle` - the azimuth in radians.
#[must_use]
pub fn normalise_azimuth(angle: f64) -> Degrees {
    let mut value = libm::fmod(angle.to_degrees(), 360.0);
    if value < 0.0 {
        value += 360.0;
    }
    // a tiny negative value rounds up to 360
    if 360.0 <= value {
        value = 0.0;
    }
    Degrees(value)
}

/// Move a latitude away from a pole, where the azimuth is undefined.
/// * `lat` - the geodetic latitude in radians.
#[must_use]
fn offset_from_pole(lat: f64) -> f64 {
    if libm::fabs(FRAC_PI_2 - libm::fabs(lat)) < POLE_OFFSET.0 {
        libm::copysign(FRAC_PI_2 - POLE_OFFSET.0, lat)
    } else {
        lat
    }
}

/// Reduce an angle into the range [0, 2π).
#[must_use]
fn modulo_tau(angle: f64) -> f64 {
    let value = libm::fmod(angle, TAU);
    if value < 0.0 {
        value + TAU
    } else {
        value
    }
}

/// The sign of a value: -1, 0 or 1.
#[must_use]
fn sign(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else if 0.0 < value {
        1.0
    } else {
        0.0
    }
}

/// A pair of `reduced` latitudes on the auxiliary sphere.
#[derive(Clone, Copy, Debug)]
struct ReducedLatitudes {
    beta1: Angle,
    beta2: Angle,
}

impl ReducedLatitudes {
    fn new(lat1: f64, lat2: f64, one_minus_f: f64) -> Self {
        let beta1 = calculate_reduced_latitude(offset_from_pole(lat1), one_minus_f);
        let beta2 = calculate_reduced_latitude(offset_from_pole(lat2), one_minus_f);
        Self {
            beta1: Angle::from(Radians(beta1)),
            beta2: Angle::from(Radians(beta2)),
        }
    }

    /// The azimuths at the start and finish of the great circle arc between
    /// the latitudes for the signed longitude difference `lambda`.
    fn azimuths(&self, lambda: f64) -> (f64, f64) {
        let (sin_lambda, cos_lambda) = libm::sincos(lambda);
        let (sin_u1, cos_u1) = (self.beta1.sin().0, self.beta1.cos().0);
        let (sin_u2, cos_u2) = (self.beta2.sin().0, self.beta2.cos().0);
        let alpha1 = libm::atan2(
            cos_u2 * sin_lambda,
            cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda,
        );
        let alpha2 = libm::atan2(
            cos_u1 * sin_lambda,
            -sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda,
        );
        (alpha1, alpha2)
    }
}

/// The great circle arc on the auxiliary sphere for a trial value of `λ`.
#[derive(Clone, Copy, Debug)]
struct AuxiliaryArc {
    sigma: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    /// Clairaut's constant, the sine of the azimuth at the Equator.
    sin_alpha: f64,
    sq_cos_alpha: f64,
    cos_2sigma_m: f64,
}

impl AuxiliaryArc {
    fn new(u: &ReducedLatitudes, lambda: f64) -> Self {
        let (sin_lambda, cos_lambda) = libm::sincos(lambda);
        let (sin_u1, cos_u1) = (u.beta1.sin().0, u.beta1.cos().0);
        let (sin_u2, cos_u2) = (u.beta2.sin().0, u.beta2.cos().0);
        let sin_sigma = libm::hypot(
            cos_u2 * sin_lambda,
            cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda,
        );
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = libm::atan2(sin_sigma, cos_sigma);

        // coincident points have no azimuth
        let sin_alpha = if sin_sigma == 0.0 {
            0.0
        } else {
            (cos_u1 * cos_u2 * sin_lambda / sin_sigma).clamp(-1.0, 1.0)
        };
        let sq_cos_alpha = (1.0 - sin_alpha) * (1.0 + sin_alpha);

        // an equatorial arc has no mid point latitude
        let cos_2sigma_m = if sq_cos_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / sq_cos_alpha
        };

        Self {
            sigma,
            sin_sigma,
            cos_sigma,
            sin_alpha,
            sq_cos_alpha,
            cos_2sigma_m,
        }
    }
}

/// The solution of the inverse geodesic problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseSolution {
    distance: Metres,
    azimuth: Degrees,
    back_azimuth: Degrees,
    iterations: u32,
    precision_reduced: bool,
}

impl InverseSolution {
    /// The length of the geodesic on the ellipsoid.
    #[must_use]
    pub const fn distance(&self) -> Metres {
        self.distance
    }

    /// The azimuth of the geodesic at the start position, clockwise from
    /// North in the range [0°, 360°).
    /// It is 0° for coincident positions.
    ///
    /// At a pole, North is taken along the meridian of the start longitude,
    /// so with `Δlon = lon2 - lon1` the azimuth from the North pole is
    /// `180° - Δlon` and from the South pole it is `Δlon`.
    /// It is 180° from the North pole only when the longitudes are equal.
    #[must_use]
    pub const fn azimuth(&self) -> Degrees {
        self.azimuth
    }

    /// The azimuth from the finish position back to the start position,
    /// in the range [0°, 360°).
    #[must_use]
    pub const fn back_azimuth(&self) -> Degrees {
        self.back_azimuth
    }

    /// The number of passes of the iteration.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Whether the positions were essentially antipodal, so the iteration was
    /// stopped at `λ = π` and the solution may be slightly less precise.
    #[must_use]
    pub const fn precision_reduced(&self) -> bool {
        self.precision_reduced
    }
}

/// Solve the inverse geodesic problem for validated coordinates.
/// * `lat1`, `lon1` - the start position in radians, |lat1| <= π/2.
/// * `lat2`, `lon2` - the finish position in radians, |lat2| <= π/2.
/// * `ellipsoid` - the `Ellipsoid`.
#[must_use]
fn solve_inverse(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    ellipsoid: &Ellipsoid,
) -> InverseSolution {
    let f = ellipsoid.f();
    let u = ReducedLatitudes::new(lat1, lat2, ellipsoid.one_minus_f());

    let delta_lon = modulo_tau(lon2) - modulo_tau(lon1);
    let mut l = libm::fabs(delta_lon);
    if PI < l {
        l = TAU - l;
    }

    let mut lambda = l;
    let mut arc = AuxiliaryArc::new(&u, lambda);
    let mut iterations = 1;
    let mut precision_reduced = false;
    loop {
        let c = evaluate_c(f, arc.sq_cos_alpha);
        let lambda_prev = lambda;
        lambda = l + calculate_lambda_correction(
            f,
            c,
            arc.sin_alpha,
            arc.sigma,
            arc.sin_sigma,
            arc.cos_sigma,
            arc.cos_2sigma_m,
        );

        if PI < lambda {
            warn!("Essentially antipodal points encountered, precision may be reduced slightly");
            lambda = PI;
            precision_reduced = true;
            break;
        }

        if libm::fabs(lambda - lambda_prev) <= MAX_PRECISION.0 {
            break;
        }

        if MAX_INVERSE_ITERATIONS <= iterations {
            warn!("Essentially antipodal points, precision may be reduced slightly");
            lambda = PI;
            precision_reduced = true;
            break;
        }

        iterations += 1;
        arc = AuxiliaryArc::new(&u, lambda);
    }
    trace!("inverse solution: {iterations} iterations, lambda: {lambda}");

    let u_sq = calculate_u_sq(arc.sq_cos_alpha, ellipsoid.ep_2());
    let b = evaluate_b(u_sq);
    let delta_sigma = calculate_delta_sigma(b, arc.sin_sigma, arc.cos_sigma, arc.cos_2sigma_m);
    let distance = ellipsoid.b().0 * evaluate_a(u_sq) * (arc.sigma - delta_sigma);

    // restore the direction of lambda from the longitude difference
    let lambda = if sign(libm::sin(delta_lon)) * sign(libm::sin(lambda)) < 0.0 {
        -libm::fabs(lambda)
    } else {
        libm::fabs(lambda)
    };
    let (alpha1, alpha2) = u.azimuths(lambda);

    InverseSolution {
        distance: Metres(distance.max(0.0)),
        azimuth: normalise_azimuth(alpha1),
        back_azimuth: normalise_azimuth(alpha2 + PI),
        iterations,
        precision_reduced,
    }
}

/// Calculate the length and azimuths of the geodesic between a pair of
/// positions on the ellipsoid, the "inverse" problem.
///
/// Essentially antipodal positions are not an error: the iteration is
/// stopped at `λ = π`, a warning is logged and the solution is flagged by
/// `precision_reduced`.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
/// * `ellipsoid` - the `Ellipsoid`.
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
/// let istanbul = LatLong::new(Degrees(42.0), Degrees(29.0));
/// let washington = LatLong::new(Degrees(39.0), Degrees(-77.0));
/// let result = vincenty::inverse(&istanbul, &washington, &WGS84_ELLIPSOID).unwrap();
///
/// assert!(is_within_tolerance(8_339_863.136, result.distance().0, 1e-3));
/// assert!(is_within_tolerance(309.306_246_959, result.azimuth().0, 1e-9));
/// assert!(is_within_tolerance(47.735_339_288, result.back_azimuth().0, 1e-9));
/// ```
pub fn inverse(
    a: &LatLong,
    b: &LatLong,
    ellipsoid: &Ellipsoid,
) -> Result<InverseSolution, GeodesyError> {
    let lat1 = validate_latitude(a.lat())?;
    let lon1 = validate_longitude(a.lon())?;
    let lat2 = validate_latitude(b.lat())?;
    let lon2 = validate_longitude(b.lon())?;
    Ok(solve_inverse(lat1, lon1, lat2, lon2, ellipsoid))
}

/// The solution of the direct geodesic problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectSolution {
    lat: Degrees,
    lon: Degrees,
    back_azimuth: Degrees,
    iterations: u32,
}

impl DirectSolution {
    /// The geodetic latitude of the finish position.
    #[must_use]
    pub const fn lat(&self) -> Degrees {
        self.lat
    }

    /// The longitude of the finish position, in the range (-180°, 180°].
    #[must_use]
    pub const fn lon(&self) -> Degrees {
        self.lon
    }

    /// The finish position.
    #[must_use]
    pub fn position(&self) -> LatLong {
        LatLong::new(self.lat, self.lon)
    }

    /// The azimuth from the finish position back to the start position,
    /// in the range [0°, 360°).
    #[must_use]
    pub const fn back_azimuth(&self) -> Degrees {
        self.back_azimuth
    }

    /// The number of passes of the iteration.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Solve the direct geodesic problem for validated inputs.
/// * `lat1`, `lon1` - the start position in radians, |lat1| <= π/2.
/// * `range` - the geodesic distance in metres, finite and not negative.
/// * `azimuth` - the start azimuth in radians.
/// * `ellipsoid` - the `Ellipsoid`.
#[must_use]
fn solve_direct(
    lat1: f64,
    lon1: f64,
    range: f64,
    azimuth: f64,
    ellipsoid: &Ellipsoid,
) -> DirectSolution {
    let f = ellipsoid.f();
    let one_minus_f = ellipsoid.one_minus_f();
    let (sin_alpha1, cos_alpha1) = libm::sincos(azimuth);

    let tan_u1 = one_minus_f * libm::tan(offset_from_pole(lat1));
    let cos_u1 = 1.0 / libm::sqrt(1.0 + tan_u1 * tan_u1);
    let sin_u1 = tan_u1 * cos_u1;

    // the arc length from the Equator crossing to the start position
    let sigma1 = libm::atan2(tan_u1, cos_alpha1);

    // Clairaut's constant, invariant along the geodesic
    let sin_alpha = cos_u1 * sin_alpha1;
    let sq_cos_alpha = (1.0 - sin_alpha) * (1.0 + sin_alpha);

    let u_sq = calculate_u_sq(sq_cos_alpha, ellipsoid.ep_2());
    let b = evaluate_b(u_sq);
    let sigma0 = range / (ellipsoid.b().0 * evaluate_a(u_sq));

    // Note: the iteration is contractive for all finite ranges, so it is not
    // limited by a maximum number of iterations.
    let mut sigma = sigma0;
    let mut iterations = 0;
    loop {
        iterations += 1;
        let cos_2sigma_m = libm::cos(2.0 * sigma1 + sigma);
        let (sin_sigma, cos_sigma) = libm::sincos(sigma);
        let sigma_prev = sigma;
        sigma = sigma0 + calculate_delta_sigma(b, sin_sigma, cos_sigma, cos_2sigma_m);
        // a NaN also terminates the iteration
        if !(MAX_PRECISION.0 < libm::fabs(sigma - sigma_prev)) {
            break;
        }
    }
    trace!("direct solution: {iterations} iterations, sigma: {sigma}");

    let cos_2sigma_m = libm::cos(2.0 * sigma1 + sigma);
    let (sin_sigma, cos_sigma) = libm::sincos(sigma);

    let temp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
    let lat2 = libm::atan2(
        sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1,
        one_minus_f * libm::hypot(sin_alpha, temp),
    );

    // the longitude difference on the auxiliary sphere
    let lambda = libm::atan2(
        sin_sigma * sin_alpha1,
        cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1,
    );
    let c = evaluate_c(f, sq_cos_alpha);
    let delta_lon = lambda
        - calculate_lambda_correction(
            f,
            c,
            sin_alpha,
            sigma,
            sin_sigma,
            cos_sigma,
            cos_2sigma_m,
        );

    DirectSolution {
        lat: Degrees(lat2.to_degrees()),
        lon: normalise_longitude(Degrees((lon1 + delta_lon).to_degrees())),
        back_azimuth: normalise_azimuth(libm::atan2(sin_alpha, -temp) + PI),
        iterations,
    }
}

/// Calculate the position at a distance along the geodesic from a position
/// with a given azimuth, the "direct" problem.
///
/// Note: there is no limit on the number of iterations, since the iteration
/// converges for all finite ranges.
/// * `a` - the start position in geodetic coordinates.
/// * `range` - the distance along the geodesic.
/// * `azimuth` - the azimuth at the start position, in any range.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// # Errors
///
/// `LatitudeOutOfRange` if the latitude is not within -90° to 90°,
/// `InvalidLongitude` if the longitude is not finite,
/// `InvalidRange` if the range is negative or not finite,
/// `InvalidAzimuth` if the azimuth is not finite.
///
/// # Examples
/// ```
/// use vincenty_geodesic::*;
/// use angle_sc::is_within_tolerance;
///
/// let origin = LatLong::new(Degrees(0.0), Degrees(0.0));
/// let result = vincenty::direct(&origin, Metres(111_319.490_793), Degrees(90.0), &WGS84_ELLIPSOID).unwrap();
///
/// assert!(is_within_tolerance(0.0, result.lat().0, 1e-12));
/// assert!(is_within_tolerance(1.0, result.lon().0, 1e-9));
/// ```
pub fn direct(
    a: &LatLong,
    range: Metres,
    azimuth: Degrees,
    ellipsoid: &Ellipsoid,
) -> Result<DirectSolution, GeodesyError> {
    let lat1 = validate_latitude(a.lat())?;
    let lon1 = validate_longitude(a.lon())?;
    if !(0.0 <= range.0 && range.0.is_finite()) {
        return Err(GeodesyError::InvalidRange(range.0));
    }
    if !azimuth.0.is_finite() {
        return Err(GeodesyError::InvalidAzimuth(azimuth.0));
    }
    Ok(solve_direct(
        lat1,
        lon1,
        range.0,
        azimuth.0.to_radians(),
        ellipsoid,
    ))
}
