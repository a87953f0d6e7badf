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

// extern crate we're testing, same as any other code would do.
extern crate vincenty_geodesic;

use angle_sc::{is_within_tolerance, Degrees};
use csv::ReaderBuilder;
use std::env;
use std::path::Path;
use unit_sphere::LatLong;
use vincenty_geodesic::{
    track, track2, vdist, vincenty, vreckon, Ellipsoid, GeodesyError, Metres, NauticalMiles,
    WGS84_ELLIPSOID,
};

/// The difference between two angles in degrees, in the range [-180°, 180°].
fn angle_difference(a: Degrees, b: Degrees) -> f64 {
    libm::remainder(a.0 - b.0, 360.0)
}

#[test]
#[ignore]
fn test_geodesic_examples() {
    // Read GEODTEST_DIR/GeodTest.dat file and run tests
    let geoid = Ellipsoid::wgs84();

    let filename = "GeodTest.dat";
    let dir_key = "GEODTEST_DIR";

    let p = env::var(dir_key).expect("Environment variable not found: GEODTEST_DIR");
    let path = Path::new(&p);
    let file_path = path.join(filename);
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .from_path(file_path)
        .expect("Could not read file: GeodTest.dat");
    let mut line_number = 1;
    for result in csv_reader.records() {
        let record = result.unwrap();

        //  random lines: 1 to 100000
        //  nearly antipodal lines: 100001 to 150000
        //  short lines: 150001 to 200000
        let is_antipodal = (100_000 < line_number) && (line_number <= 150_000);
        if !is_antipodal {
            let lat1 = Degrees(record[0].parse::<f64>().unwrap());
            let lon1 = Degrees(record[1].parse::<f64>().unwrap());
            let azi1 = Degrees(record[2].parse::<f64>().unwrap());
            let lat2 = Degrees(record[3].parse::<f64>().unwrap());
            let lon2 = Degrees(record[4].parse::<f64>().unwrap());
            let azi2 = Degrees(record[5].parse::<f64>().unwrap());
            let d_metres = Metres(record[6].parse::<f64>().unwrap());

            let a = LatLong::new(lat1, lon1);
            let b = LatLong::new(lat2, lon2);
            let result = vincenty::inverse(&a, &b, &geoid).unwrap();

            // Vincenty's method does not converge for some nearly antipodal random lines
            if !result.precision_reduced() {
                let delta_azimuth = libm::fabs(angle_difference(azi1, result.azimuth()));
                if 5.5e-5 < delta_azimuth {
                    panic!(
                        "azimuth, line: {:?} delta: {:?} azimuth: {:?} delta_long: {:?} ",
                        line_number, delta_azimuth, azi1, lon2
                    );
                }

                // The back azimuth points from the finish to the start
                let delta_azimuth = libm::fabs(angle_difference(
                    Degrees(azi2.0 + 180.0),
                    result.back_azimuth(),
                ));
                if 5.5e-5 < delta_azimuth {
                    panic!(
                        "back azimuth, line: {:?} delta: {:?} azimuth: {:?} delta_long: {:?} ",
                        line_number, delta_azimuth, azi2, lon2
                    );
                }

                let delta_length_m = libm::fabs(d_metres.0 - result.distance().0);
                if 1.0e-3 < delta_length_m {
                    panic!(
                        "length, line: {:?} delta: {:?} length: {:?} result: {:?} ",
                        line_number,
                        delta_length_m,
                        d_metres,
                        result.distance()
                    );
                }
            }
        }

        line_number += 1;
        if 200000 < line_number {
            break;
        }
    }
}

#[test]
fn test_inverse_direct_round_trips() {
    let lats = [-60.0, -30.0, 0.0, 30.0, 60.0];
    let delta_lons = [-150.0, -90.0, -45.0, -1.0, 10.0, 60.0, 120.0, 170.0];
    let start_lons = [-100.0, 0.0, 175.0];

    for lat1 in lats {
        for lat2 in lats {
            for lon1 in start_lons {
                for delta_lon in delta_lons {
                    let a = LatLong::new(Degrees(lat1), Degrees(lon1));
                    let b = LatLong::new(Degrees(lat2), Degrees(lon1 + delta_lon));

                    let inverse = vincenty::inverse(&a, &b, &WGS84_ELLIPSOID).unwrap();
                    assert!(!inverse.precision_reduced());
                    assert!(inverse.iterations() < vincenty::MAX_INVERSE_ITERATIONS);

                    let direct = vincenty::direct(
                        &a,
                        inverse.distance(),
                        inverse.azimuth(),
                        &WGS84_ELLIPSOID,
                    )
                    .unwrap();
                    assert!(is_within_tolerance(lat2, direct.lat().0, 1e-8));
                    assert!(
                        libm::fabs(angle_difference(Degrees(lon1 + delta_lon), direct.lon()))
                            < 1e-8
                    );
                    assert!(
                        libm::fabs(angle_difference(inverse.back_azimuth(), direct.back_azimuth()))
                            < 1e-8
                    );
                }
            }
        }
    }
}

#[test]
fn test_inverse_symmetry() {
    let positions = [
        (Degrees(42.0), Degrees(29.0)),
        (Degrees(39.0), Degrees(-77.0)),
        (Degrees(-33.9), Degrees(151.2)),
        (Degrees(51.5), Degrees(0.0)),
        (Degrees(-70.0), Degrees(40.0)),
    ];

    for (lat1, lon1) in positions {
        for (lat2, lon2) in positions {
            let a = LatLong::new(lat1, lon1);
            let b = LatLong::new(lat2, lon2);
            let forward = vincenty::inverse(&a, &b, &WGS84_ELLIPSOID).unwrap();
            let reverse = vincenty::inverse(&b, &a, &WGS84_ELLIPSOID).unwrap();

            assert!(is_within_tolerance(
                forward.distance().0,
                reverse.distance().0,
                1e-6
            ));
            if 0.0 < forward.distance().0 {
                assert!(
                    libm::fabs(angle_difference(forward.back_azimuth(), reverse.azimuth())) < 1e-7
                );
            }
        }
    }
}

#[test]
fn test_poles() {
    // a quarter meridian
    let (distance, azimuth) =
        vdist(Degrees(0.0), Degrees(0.0), Degrees(90.0), Degrees(0.0), None).unwrap();
    assert!(is_within_tolerance(10_001_965.729, distance.0, 1e-3));
    assert_eq!(0.0, azimuth.0);

    let (distance, azimuth) =
        vdist(Degrees(90.0), Degrees(0.0), Degrees(0.0), Degrees(0.0), None).unwrap();
    assert!(is_within_tolerance(10_001_965.729, distance.0, 1e-3));
    assert!(is_within_tolerance(180.0, azimuth.0, 1e-6));

    let (lat, _lon) =
        vreckon(Degrees(0.0), Degrees(0.0), distance, Degrees(0.0), None).unwrap();
    assert!(is_within_tolerance(90.0, lat.0, 1e-6));
}

#[test]
fn test_antipodal_positions() {
    let a = LatLong::new(Degrees(0.0), Degrees(0.0));
    let b = LatLong::new(Degrees(0.0), Degrees(180.0));

    let result = vincenty::inverse(&a, &b, &WGS84_ELLIPSOID).unwrap();
    assert!(result.precision_reduced());
    assert!(is_within_tolerance(
        WGS84_ELLIPSOID.b().0 * core::f64::consts::PI,
        result.distance().0,
        1e-6
    ));

    assert_eq!(
        Some(GeodesyError::AntipodalEndpoints),
        track2(
            Degrees(0.0),
            Degrees(0.0),
            Degrees(0.0),
            Degrees(180.0),
            None,
            5
        )
        .err()
    );

    // The end points alone may be antipodal
    let (lats, lons) = track2(
        Degrees(0.0),
        Degrees(0.0),
        Degrees(0.0),
        Degrees(180.0),
        None,
        2,
    )
    .unwrap();
    assert_eq!(vec![Degrees(0.0), Degrees(0.0)], lats);
    assert_eq!(vec![Degrees(0.0), Degrees(180.0)], lons);
}

#[test]
fn test_track_lies_on_geodesic() {
    let istanbul = LatLong::new(Degrees(42.0), Degrees(29.0));
    let washington = LatLong::new(Degrees(39.0), Degrees(-77.0));
    let npts = 10;

    let line = vincenty::inverse(&istanbul, &washington, &WGS84_ELLIPSOID).unwrap();
    let increment = line.distance().0 / 9.0;
    assert!(is_within_tolerance(926_651.4595, increment, 1e-3));

    let points = track::calculate_track(&istanbul, &washington, npts, &WGS84_ELLIPSOID).unwrap();
    assert_eq!(npts, points.len());
    assert_eq!(istanbul.lat(), points[0].lat());
    assert_eq!(istanbul.lon(), points[0].lon());
    assert_eq!(washington.lat(), points[npts - 1].lat());
    assert_eq!(washington.lon(), points[npts - 1].lon());

    let mut expected_distance = 0.0;
    for i in 1..npts {
        expected_distance += increment;
        let step = vincenty::inverse(&points[i - 1], &points[i], &WGS84_ELLIPSOID).unwrap();
        assert!(is_within_tolerance(increment, step.distance().0, 1e-3));

        // every point is on the geodesic from the start position
        let from_start = vincenty::inverse(&istanbul, &points[i], &WGS84_ELLIPSOID).unwrap();
        assert!(
            libm::fabs(angle_difference(line.azimuth(), from_start.azimuth())) < 1e-8
        );
        assert!(is_within_tolerance(
            expected_distance,
            from_start.distance().0,
            1e-3
        ));
    }
}

#[test]
fn test_distance_in_nautical_miles() {
    let (distance, _azimuth) = vdist(
        Degrees(42.0),
        Degrees(29.0),
        Degrees(39.0),
        Degrees(-77.0),
        None,
    )
    .unwrap();
    let distance_nm = NauticalMiles::from(distance);
    assert!(is_within_tolerance(4_503.166, distance_nm.0, 1e-3));
}

#[test]
fn test_other_ellipsoids() {
    let moon = Ellipsoid::from_name("moon").unwrap();
    let (distance, _azimuth) = vdist(
        Degrees(0.0),
        Degrees(0.0),
        Degrees(10.0),
        Degrees(10.0),
        Some(moon),
    )
    .unwrap();
    assert!(is_within_tolerance(427_406.245_47, distance.0, 1e-3));

    assert!(Ellipsoid::from_name("pluto").is_err());
}
