use rand::{thread_rng, Rng};


/// Default map center (India) and its jitter box, used when no place matches.
pub const DEFAULT_CENTER: (f64, f64) = (20.5937, 78.9629);
pub const DEFAULT_LAT_SPREAD: f64 = 10.0;
pub const DEFAULT_LON_SPREAD: f64 = 15.0;

/// Jitter applied to a matched place so same-city markers do not overlap.
pub const CITY_SPREAD: f64 = 0.1;

/// Reference points for major cities, matched in table order.
const CITY_TABLE: [(&str, f64, f64); 10] = [
    ("delhi", 28.6139, 77.2090),
    ("mumbai", 19.0760, 72.8777),
    ("kolkata", 22.5726, 88.3639),
    ("chennai", 13.0827, 80.2707),
    ("bangalore", 12.9716, 77.5946),
    ("hyderabad", 17.3850, 78.4867),
    ("ahmedabad", 23.0225, 72.5714),
    ("pune", 18.5204, 73.8567),
    ("jaipur", 26.9124, 75.7873),
    ("lucknow", 26.8467, 80.9462),
];


/// Turns a free-text location into approximate coordinates.
///
/// Implementations never fail; a miss degrades to a jittered default point.
/// The trait is the seam for swapping in a real network geocoder later.
pub trait Geocoder {
    fn resolve(&self, location: &str) -> (f64, f64);
}


/// Best-effort geocoder backed by the fixed city table.
///
/// The first table entry whose key is a substring of the input wins, so the
/// result is non-deterministic under ambiguous input by contract.
pub struct CityTableGeocoder;

impl Geocoder for CityTableGeocoder {
    fn resolve(&self, location: &str) -> (f64, f64) {
        let mut rng = thread_rng();
        let needle = location.to_lowercase();

        for &(city, lat, lon) in CITY_TABLE.iter() {
            if needle.contains(city) {
                return (lat + jitter(&mut rng, CITY_SPREAD),
                    lon + jitter(&mut rng, CITY_SPREAD));
            }
        }

        (DEFAULT_CENTER.0 + jitter(&mut rng, DEFAULT_LAT_SPREAD),
            DEFAULT_CENTER.1 + jitter(&mut rng, DEFAULT_LON_SPREAD))
    }
}

fn jitter<R: Rng>(rng: &mut R, spread: f64) -> f64 {
    rng.gen_range(-spread / 2.0..spread / 2.0)
}


#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn matched_city_stays_within_small_jitter() {
        let geocoder = CityTableGeocoder;

        for _ in 0..50 {
            let (lat, lon) = geocoder.resolve("Mumbai Central");
            assert!((lat - 19.0760).abs() <= CITY_SPREAD / 2.0 + EPS);
            assert!((lon - 72.8777).abs() <= CITY_SPREAD / 2.0 + EPS);
        }
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let geocoder = CityTableGeocoder;

        let (lat, _) = geocoder.resolve("NEW DELHI railway station");
        assert!((lat - 28.6139).abs() <= CITY_SPREAD / 2.0 + EPS);
    }

    #[test]
    fn unknown_place_falls_in_default_box() {
        let geocoder = CityTableGeocoder;

        for _ in 0..50 {
            let (lat, lon) = geocoder.resolve("Atlantis");
            assert!((lat - DEFAULT_CENTER.0).abs() <= DEFAULT_LAT_SPREAD / 2.0 + EPS);
            assert!((lon - DEFAULT_CENTER.1).abs() <= DEFAULT_LON_SPREAD / 2.0 + EPS);
        }
    }

    #[test]
    fn empty_input_still_resolves() {
        let geocoder = CityTableGeocoder;

        let (lat, lon) = geocoder.resolve("");
        assert!(lat.is_finite() && lon.is_finite());
    }
}
