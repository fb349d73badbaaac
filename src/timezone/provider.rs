//! Coordinate to zone lookup.
//!
//! [`TimezoneProvider`] is the seam where a real geocoding or timezone service
//! can be plugged in. [`RegionTableProvider`] is the built-in coarse classifier:
//! a static list of latitude/longitude boxes checked in order, first match
//! wins. It is not authoritative near borders, on islands or in the oceans.

use chrono_tz::Tz;
use chrono_tz::{Africa, America, Asia, Australia, Europe, Pacific};

use crate::geo::GeoCoordinate;

/// Something that can name the timezone of a coordinate.
pub trait TimezoneProvider: Send + Sync {
    /// The zone for `coordinate`, or `None` if the provider has no answer and
    /// the resolver should fall back.
    fn lookup(&self, coordinate: &GeoCoordinate) -> Option<Tz>;
}

/// An inclusive latitude/longitude box mapped to one zone.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub name: &'static str,
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
    pub zone: Tz,
}

impl Region {
    const fn new(
        name: &'static str,
        latitudes: (f64, f64),
        longitudes: (f64, f64),
        zone: Tz,
    ) -> Self {
        Self {
            name,
            south: latitudes.0,
            north: latitudes.1,
            west: longitudes.0,
            east: longitudes.1,
            zone,
        }
    }

    pub fn contains(&self, coordinate: &GeoCoordinate) -> bool {
        (self.south..=self.north).contains(&coordinate.latitude())
            && (self.west..=self.east).contains(&coordinate.longitude())
    }
}

/// World regions, most specific first.
///
/// Boxes overlap on purpose: a small box listed early carves an exception out
/// of a larger one listed later.
pub static REGIONS: &[Region] = &[
    // North America
    Region::new("Hawaii", (18.5, 22.5), (-160.5, -154.5), Pacific::Honolulu),
    Region::new("Alaska", (51.0, 71.5), (-170.0, -141.0), America::Anchorage),
    Region::new("US Pacific", (32.5, 49.0), (-125.0, -114.5), America::Los_Angeles),
    Region::new("Arizona", (31.3, 37.0), (-114.5, -109.0), America::Phoenix),
    Region::new("US Mountain", (31.3, 49.0), (-114.5, -102.0), America::Denver),
    Region::new("US Central", (26.0, 49.0), (-102.0, -87.0), America::Chicago),
    Region::new("US Eastern", (24.5, 48.0), (-87.0, -66.9), America::New_York),
    Region::new("Canada Pacific", (48.3, 60.0), (-139.0, -120.0), America::Vancouver),
    Region::new("Canada Mountain", (49.0, 60.0), (-120.0, -102.0), America::Edmonton),
    Region::new("Canada Central", (49.0, 60.0), (-102.0, -89.0), America::Winnipeg),
    Region::new("Canada Eastern", (42.0, 63.0), (-89.0, -64.0), America::Toronto),
    Region::new("Canada Atlantic", (43.0, 60.0), (-64.0, -52.5), America::Halifax),
    Region::new("Central America", (7.0, 17.5), (-92.0, -77.2), America::Guatemala),
    Region::new("Mexico", (14.5, 32.7), (-117.2, -86.7), America::Mexico_City),
    Region::new("Caribbean", (10.0, 27.0), (-77.2, -59.0), America::Puerto_Rico),
    // South America
    Region::new("Venezuela", (0.6, 12.5), (-72.0, -59.8), America::Caracas),
    Region::new("Andes North", (-18.4, 12.5), (-82.0, -66.0), America::Bogota),
    Region::new("Chile", (-56.0, -17.5), (-76.0, -69.5), America::Santiago),
    Region::new("Argentina", (-55.1, -21.8), (-69.5, -53.6), America::Argentina::Buenos_Aires),
    Region::new("Brazil East", (-34.0, 5.3), (-53.6, -34.7), America::Sao_Paulo),
    Region::new("Brazil West", (-34.0, 5.3), (-74.0, -53.6), America::Manaus),
    // Europe
    Region::new("Portugal", (36.9, 42.2), (-9.6, -6.2), Europe::Lisbon),
    Region::new("British Isles", (49.8, 61.0), (-11.0, 1.8), Europe::London),
    Region::new("Spain", (35.9, 43.8), (-9.4, 4.4), Europe::Madrid),
    Region::new("France", (42.3, 51.1), (-5.2, 8.3), Europe::Paris),
    Region::new("Poland", (49.0, 55.0), (14.1, 24.2), Europe::Warsaw),
    Region::new("Israel", (29.5, 33.4), (34.2, 35.9), Asia::Jerusalem),
    Region::new("Egypt", (22.0, 31.7), (24.7, 34.2), Africa::Cairo),
    Region::new("Turkey", (35.8, 42.1), (26.0, 44.8), Europe::Istanbul),
    Region::new("Central Europe", (36.0, 71.2), (-6.2, 19.0), Europe::Berlin),
    Region::new("Eastern Europe", (34.8, 70.1), (19.0, 32.0), Europe::Bucharest),
    // Middle East and Russia
    Region::new("Gulf", (16.0, 25.8), (51.5, 60.0), Asia::Dubai),
    Region::new("Iran", (25.0, 39.8), (44.0, 63.3), Asia::Tehran),
    Region::new("Arabia", (12.0, 33.0), (34.2, 51.5), Asia::Riyadh),
    Region::new("Western Russia", (41.2, 70.0), (32.0, 60.0), Europe::Moscow),
    // Asia
    Region::new("Kazakhstan", (40.5, 55.5), (46.0, 80.0), Asia::Almaty),
    Region::new("Pakistan", (23.6, 37.1), (60.8, 75.0), Asia::Karachi),
    Region::new("Bangladesh", (20.6, 26.7), (88.7, 92.7), Asia::Dhaka),
    Region::new("India", (6.5, 35.7), (68.0, 97.5), Asia::Kolkata),
    Region::new("Singapore", (-1.0, 7.5), (99.5, 119.5), Asia::Singapore),
    Region::new("Indochina", (5.0, 23.5), (97.5, 109.5), Asia::Bangkok),
    Region::new("Indonesia West", (-11.0, 6.0), (95.0, 115.0), Asia::Jakarta),
    Region::new("Philippines", (4.5, 21.2), (116.0, 127.0), Asia::Manila),
    Region::new("Taiwan", (21.8, 25.4), (119.8, 122.2), Asia::Taipei),
    Region::new("Korea", (33.0, 38.7), (124.5, 130.0), Asia::Seoul),
    Region::new("Japan", (24.0, 45.6), (128.5, 146.0), Asia::Tokyo),
    Region::new("China", (18.0, 54.0), (73.5, 135.0), Asia::Shanghai),
    Region::new("Siberia West", (54.0, 78.0), (60.0, 90.0), Asia::Novosibirsk),
    Region::new("Siberia Central", (50.0, 78.0), (90.0, 120.0), Asia::Irkutsk),
    Region::new("Russian Far East", (42.0, 78.0), (120.0, 180.0), Asia::Vladivostok),
    // Africa
    Region::new("Morocco", (27.6, 36.0), (-13.2, -1.0), Africa::Casablanca),
    Region::new("West Africa", (4.0, 27.6), (-18.0, 1.5), Africa::Abidjan),
    Region::new("West Central Africa", (-18.0, 24.0), (1.5, 16.0), Africa::Lagos),
    Region::new("Southern Africa", (-35.0, -12.0), (11.0, 41.0), Africa::Johannesburg),
    Region::new("Central Africa", (-12.0, 24.0), (16.0, 29.0), Africa::Maputo),
    Region::new("East Africa", (-12.0, 18.0), (29.0, 52.0), Africa::Nairobi),
    // Oceania
    Region::new("Tasmania", (-44.0, -39.2), (143.5, 149.0), Australia::Hobart),
    Region::new("Western Australia", (-36.0, -13.0), (112.0, 129.0), Australia::Perth),
    Region::new("Northern Territory", (-26.0, -10.0), (129.0, 138.0), Australia::Darwin),
    Region::new("South Australia", (-39.0, -26.0), (129.0, 141.0), Australia::Adelaide),
    Region::new("Australia East", (-39.2, -28.2), (141.0, 154.0), Australia::Sydney),
    Region::new("Queensland", (-29.0, -9.0), (138.0, 154.0), Australia::Brisbane),
    Region::new("New Zealand", (-47.5, -34.0), (166.0, 179.0), Pacific::Auckland),
];

/// The built-in bounding-box classifier over [`REGIONS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionTableProvider;

impl RegionTableProvider {
    /// Name of the first region containing `coordinate`.
    pub fn region_name(&self, coordinate: &GeoCoordinate) -> Option<&'static str> {
        find_region(coordinate).map(|region| region.name)
    }
}

impl TimezoneProvider for RegionTableProvider {
    fn lookup(&self, coordinate: &GeoCoordinate) -> Option<Tz> {
        find_region(coordinate).map(|region| region.zone)
    }
}

fn find_region(coordinate: &GeoCoordinate) -> Option<&'static Region> {
    REGIONS.iter().find(|region| region.contains(coordinate))
}
