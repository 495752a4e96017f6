//! Las Vegas area attractions for realistic planning fixtures.
//!
//! Coordinates are approximate (OpenStreetMap, rounded to ~10 m).

use itinerary_planner::Point;

/// A named attraction with coordinates and a place category.
#[derive(Debug, Clone)]
pub struct Attraction {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub category: &'static str,
}

impl Attraction {
    pub const fn new(name: &'static str, lat: f64, lng: f64, category: &'static str) -> Self {
        Self { name, lat, lng, category }
    }

    pub fn to_point(&self) -> Point {
        Point::with_category(self.name, self.lat, self.lng, self.category)
    }
}

// ============================================================================
// Lodging
// ============================================================================

pub fn bellagio() -> Point {
    Point::new("Bellagio", 36.1126, -115.1767)
}

pub fn golden_nugget() -> Point {
    Point::new("Golden Nugget", 36.1707, -115.1456)
}

// ============================================================================
// Strip
// ============================================================================

pub const STRIP: &[Attraction] = &[
    Attraction::new("High Roller", 36.1177, -115.1683, "amusement_park"),
    Attraction::new("Shark Reef Aquarium", 36.0906, -115.1762, "aquarium"),
    Attraction::new("Bellagio Gallery of Fine Art", 36.1129, -115.1748, "art_gallery"),
    Attraction::new("Bellagio Conservatory", 36.1122, -115.1755, "park"),
    Attraction::new("Eiffel Tower Viewing Deck", 36.1125, -115.1724, "tourist_attraction"),
    Attraction::new("Madame Tussauds", 36.1213, -115.1703, "museum"),
    Attraction::new("Secret Garden and Dolphin Habitat", 36.1210, -115.1749, "zoo"),
    Attraction::new("Welcome to Las Vegas Sign", 36.0820, -115.1728, "tourist_attraction"),
    Attraction::new("T-Mobile Arena", 36.1028, -115.1783, "stadium"),
    Attraction::new("Forum Shops", 36.1184, -115.1760, "shopping_mall"),
];

// ============================================================================
// Downtown
// ============================================================================

pub const DOWNTOWN: &[Attraction] = &[
    Attraction::new("Fremont Street Experience", 36.1707, -115.1437, "tourist_attraction"),
    Attraction::new("Mob Museum", 36.1728, -115.1412, "museum"),
    Attraction::new("Neon Museum", 36.1769, -115.1353, "museum"),
    Attraction::new("Las Vegas City Hall", 36.1673, -115.1486, "city_hall"),
    Attraction::new("Discovery Children's Museum", 36.1676, -115.1585, "museum"),
    Attraction::new("Las Vegas Natural History Museum", 36.1822, -115.1377, "museum"),
];

// ============================================================================
// Outlying
// ============================================================================

pub const OUTLYING: &[Attraction] = &[
    Attraction::new("Springs Preserve", 36.1685, -115.1905, "park"),
    Attraction::new("Red Rock Canyon Visitor Center", 36.1359, -115.4275, "park"),
    Attraction::new("Clark County Wetlands Park", 36.0947, -115.0229, "park"),
    Attraction::new("Ethel M Chocolates Cactus Garden", 36.0722, -115.0703, "park"),
];

/// Every fixture attraction as points.
pub fn all_points() -> Vec<Point> {
    STRIP
        .iter()
        .chain(DOWNTOWN)
        .chain(OUTLYING)
        .map(Attraction::to_point)
        .collect()
}

/// The first `count` fixture attractions as points.
pub fn sample_points(count: usize) -> Vec<Point> {
    all_points().into_iter().take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let points = all_points();
        let mut names: Vec<&str> = points.iter().map(Point::id).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), points.len());
    }

    #[test]
    fn test_coordinates_in_vegas_area() {
        for point in all_points() {
            let c = point.coordinate();
            assert!(c.lat > 35.9 && c.lat < 36.3, "{} lat out of range: {}", point.id(), c.lat);
            assert!(c.lng > -115.5 && c.lng < -114.8, "{} lng out of range: {}", point.id(), c.lng);
        }
    }
}
