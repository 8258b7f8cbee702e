use approx::assert_abs_diff_eq;
use geourl::location::{AxisOrder, Coordinate, GeoError, MatchMethod, Normalizer};
use geourl::providers;

fn parse(input: &str) -> Coordinate {
    Normalizer::new()
        .normalize(input)
        .unwrap_or_else(|e| panic!("{}: {}", input, e))
        .coordinate
}

#[test]
fn test_same_place_every_notation() {
    // San Francisco airport, written every way we understand.
    let inputs = [
        "37.618889, -122.375",
        "37° 37′ 8″ N, 122° 22′ 30″ W",
        "37_37_08_N_122_22_30_W",
        "N 37 37 8 W 122 22 30",
        "37 37.13333 N 122 22.5 W",
        "37.618889 N 122.375 W",
        "https://www.openstreetmap.org/#map=14/37.618889/-122.375",
        "https://www.strava.com/heatmap#13/-122.375/37.618889/hot/all",
        "http://wikimapia.org/#lang=en&lat=37.618889&lon=-122.375&z=10&m=b",
        "geo:37.618889,-122.375",
        "https://example.net/viewer?lat=37.618889&lon=-122.375",
    ];
    let expected = Coordinate::new(37.618889, -122.375).unwrap();
    for input in inputs {
        let c = parse(input);
        assert!(c.approx_eq(&expected, 1e-4), "{} -> {}", input, c);
    }
}

#[test]
fn test_readme_examples() {
    let c = parse("27.175015,78.042155");
    assert_eq!((c.lat, c.lon), (27.175015, 78.042155));

    let c = parse("30°34′15″N 104°3′38″E");
    assert_abs_diff_eq!(c.lat, 30.5708, epsilon = 1e-4);
    assert_abs_diff_eq!(c.lon, 104.0606, epsilon = 1e-4);

    let c = parse("https://www.google.com/maps/@45.876349,9.655686,10z");
    assert_eq!((c.lat, c.lon, c.zoom), (45.876349, 9.655686, Some(10)));
}

#[test]
fn test_sample_inputs() {
    let cases: &[(&str, f64, f64)] = &[
        ("48°53'56\"N 12°39'25\"E", 48.898889, 12.656944),
        (
            "39 deg 13 min 26.686 sec north latitude, 98 deg 32 min 30.506 sec west longitude",
            39.224080,
            -98.541807,
        ),
        ("49.440603,11.004759", 49.440603, 11.004759),
        ("37 deg 48' 12.18\" N 122 deg 10' 35.20\" W", 37.80338, -122.176444),
        ("36° 16' 37.3764\" N, 139° 22' 30.5364\" E", 36.277049, 139.375149),
        ("N 37 ° 29 ' 49 '', W 122 ° 14 ' 25 ''", 37.496944, -122.240278),
        (
            "http://hikebikemap.de/?zoom=12&lat=50.95942&lon=14.1342&layers=B0000FFFFF",
            50.95942,
            14.1342,
        ),
        (
            "https://www.google.com/maps/place/Brembana+Service+S.R.L./@45.876349,9.655686,487m/",
            45.876349,
            9.655686,
        ),
        (
            "http://labs.strava.com/heatmap/#15/-122.30854/37.50493/gray/both",
            37.50493,
            -122.30854,
        ),
    ];
    for (input, lat, lon) in cases {
        let c = parse(input);
        assert_abs_diff_eq!(c.lat, *lat, epsilon = 1e-5);
        assert_abs_diff_eq!(c.lon, *lon, epsilon = 1e-5);
    }
}

#[test]
fn test_provider_round_trip() {
    let normalizer = Normalizer::new();
    for original in ["-33.8688,151.2093", "64.1466 N 21.9426 W", "0.5,-0.25"] {
        let first = normalizer.normalize(original).unwrap().coordinate;
        for rendered in providers::render_all(&first) {
            let back = normalizer.normalize(&rendered.url).unwrap();
            assert_eq!(back.method, MatchMethod::Provider(rendered.provider));
            assert!(
                back.coordinate.approx_eq(&first, 1e-7),
                "{} -> {}",
                rendered.url,
                back.coordinate
            );
        }
    }
}

#[test]
fn test_dms_round_trip() {
    let c = parse("-22.951916,-43.210487");
    let again = parse(&c.to_dms());
    // DMS keeps a tenth of an arc-second.
    assert!(again.approx_eq(&c, 0.1 / 3600.0), "{} vs {}", again, c);
}

#[test]
fn test_canonical_round_trip() {
    let c = parse("36° 16' 37.3764\" N, 139° 22' 30.5364\" E");
    let again = parse(&c.to_string());
    assert!(again.approx_eq(&c, 1e-7));
}

#[test]
fn test_lon_lat_flag() {
    let r = Normalizer::with_axis_order(AxisOrder::LonLat)
        .normalize("139.375149 36.277049")
        .unwrap();
    assert_abs_diff_eq!(r.coordinate.lat, 36.277049);
    assert_abs_diff_eq!(r.coordinate.lon, 139.375149);
}

#[test]
fn test_errors() {
    let n = Normalizer::new();
    assert_eq!(n.normalize("").unwrap_err(), GeoError::Empty);
    assert!(matches!(n.normalize("1 2 3 4 5 6 7"), Err(GeoError::Unrecognized(_))));
    assert!(matches!(n.normalize("100.5, 200.5"), Err(GeoError::Unrecognized(_))));
}
