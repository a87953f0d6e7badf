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

//! The models module contains a catalog of reference ellipsoids of the Earth
//! and of other planetary bodies.
//!
//! The catalog is built once, on first use, and is immutable thereafter, so
//! `Ellipsoid` references borrowed from it may be shared between threads.

use crate::ellipsoid::calculate_flattening;
use crate::{Ellipsoid, GeodesyError, Metres};
use alloc::string::ToString;
use core::str::FromStr;
use lazy_static::lazy_static;

/// The WGS 84 primary parameters from the ICAO
/// [WGS 84 Implementation Manual Version 2.4](https://www.icao.int/safety/pbn/Documentation/EUROCONTROL/Eurocontrol%20WGS%2084%20Implementation%20Manual.pdf)
/// Chapter 3, page 14.
pub mod wgs84 {
    use crate::Metres;

    /// The WGS 84 Semimajor axis measured in metres.
    /// This is the radius at the equator.
    pub const A: Metres = Metres(6_378_137.0);

    /// The WGS 84 flattening, a ratio.
    pub const F: f64 = 1.0 / 298.257_223_563;
}

/// The number of models in the catalog.
const MODEL_COUNT: usize = 11;

/// A named reference ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Model {
    /// World Geodetic System 1984.
    Wgs84,
    /// Geodetic Reference System 1980.
    Grs80,
    /// World Geodetic System 1972.
    Wgs72,
    Clarke1866,
    Bessel1841,
    Airy1830,
    /// Also known as the Hayford ellipsoid.
    International1924,
    Krassovsky1940,
    /// The IAU Moon.
    Moon,
    /// The IAU 2000 Mars.
    Mars,
    /// Venus is modelled as a sphere.
    Venus,
}

impl Model {
    /// All of the models in the catalog.
    pub const ALL: [Self; MODEL_COUNT] = [
        Self::Wgs84,
        Self::Grs80,
        Self::Wgs72,
        Self::Clarke1866,
        Self::Bessel1841,
        Self::Airy1830,
        Self::International1924,
        Self::Krassovsky1940,
        Self::Moon,
        Self::Mars,
        Self::Venus,
    ];

    /// The canonical name of the model.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wgs84 => "wgs84",
            Self::Grs80 => "grs80",
            Self::Wgs72 => "wgs72",
            Self::Clarke1866 => "clarke1866",
            Self::Bessel1841 => "bessel1841",
            Self::Airy1830 => "airy1830",
            Self::International1924 => "international1924",
            Self::Krassovsky1940 => "krassovsky1940",
            Self::Moon => "moon",
            Self::Mars => "mars",
            Self::Venus => "venus",
        }
    }

    /// The Semimajor axis and flattening of the model.
    #[must_use]
    pub fn parameters(self) -> (Metres, f64) {
        match self {
            Self::Wgs84 => (wgs84::A, wgs84::F),
            Self::Grs80 => (Metres(6_378_137.0), 1.0 / 298.257_222_101),
            Self::Wgs72 => (Metres(6_378_135.0), 1.0 / 298.26),
            Self::Clarke1866 => {
                let a = Metres(6_378_206.4);
                (a, calculate_flattening(a, Metres(6_356_583.8)))
            }
            Self::Bessel1841 => (Metres(6_377_397.155), 1.0 / 299.152_812_8),
            Self::Airy1830 => (Metres(6_377_563.396), 1.0 / 299.324_964_6),
            Self::International1924 => (Metres(6_378_388.0), 1.0 / 297.0),
            Self::Krassovsky1940 => (Metres(6_378_245.0), 1.0 / 298.3),
            Self::Moon => {
                let a = Metres(1_738_100.0);
                (a, calculate_flattening(a, Metres(1_736_000.0)))
            }
            Self::Mars => {
                let a = Metres(3_396_190.0);
                (a, calculate_flattening(a, Metres(3_376_200.0)))
            }
            Self::Venus => (Metres(6_051_800.0), 0.0),
        }
    }

    /// A reference to the `Ellipsoid` of the model in the catalog.
    #[must_use]
    pub fn ellipsoid(self) -> &'static Ellipsoid {
        &CATALOG[self as usize]
    }
}

impl FromStr for Model {
    type Err = GeodesyError;

    /// Find a model by name, ignoring case.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| GeodesyError::UnknownModel(name.to_string()))
    }
}

lazy_static! {
    /// The catalog of ellipsoids, in the order of `Model::ALL`.
    static ref CATALOG: [Ellipsoid; MODEL_COUNT] = Model::ALL.map(|model| {
        let (a, f) = model.parameters();
        Ellipsoid::new(a, f)
    });
}
