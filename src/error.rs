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

//! The error module contains the errors returned when the inputs to a
//! geodesic calculation violate its preconditions.
//!
//! Loss of precision for nearly antipodal points is **not** an error, see
//! [`crate::vincenty::InverseSolution::precision_reduced`].

use alloc::string::String;
use thiserror::Error;

/// The errors returned by the geodesic solvers and the ellipsoid catalog.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeodesyError {
    #[error("latitude {0}° is outside the range -90° to 90°")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0}° is not a finite value")]
    InvalidLongitude(f64),

    #[error("range {0} m must be finite and not negative")]
    InvalidRange(f64),

    #[error("azimuth {0}° is not a finite value")]
    InvalidAzimuth(f64),

    #[error("a track requires at least 2 points, not {0}")]
    TooFewPoints(usize),

    #[error("cannot compute intermediate points between antipodal positions")]
    AntipodalEndpoints,

    #[error("invalid ellipsoid axes: a = {a} m, b = {b} m")]
    InvalidEllipsoid { a: f64, b: f64 },

    #[error("unknown ellipsoid model: {0}")]
    UnknownModel(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_geodesy_error_display() {
        assert_eq!(
            "latitude 91° is outside the range -90° to 90°",
            GeodesyError::LatitudeOutOfRange(91.0).to_string()
        );
        assert_eq!(
            "range -1 m must be finite and not negative",
            GeodesyError::InvalidRange(-1.0).to_string()
        );
        assert_eq!(
            "a track requires at least 2 points, not 1",
            GeodesyError::TooFewPoints(1).to_string()
        );
        assert_eq!(
            "unknown ellipsoid model: pluto",
            GeodesyError::UnknownModel("pluto".to_string()).to_string()
        );
    }

    #[test]
    fn test_geodesy_error_traits() {
        let error = GeodesyError::InvalidEllipsoid { a: 1.0, b: 2.0 };
        let error_clone = error.clone();
        assert!(error_clone == error);

        println!("GeodesyError: {:?}", error);
    }
}
