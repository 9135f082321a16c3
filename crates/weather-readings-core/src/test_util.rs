use crate::reading::Reading;

pub(crate) fn reading(
    country: &str,
    state: &str,
    city: &str,
    year: i32,
    month: u32,
    day: u32,
    avg_temp: f64,
) -> Reading {
    Reading::new("Region", country, state, city, month, day, year, avg_temp)
}

/// Readings in an order that is not sorted by location: Berlin first,
/// then Algiers, then Phoenix with years out of order.
pub(crate) fn unsorted_readings() -> Vec<Reading> {
    vec![
        reading("Germany", "", "Berlin", 2000, 1, 1, 30.0),
        reading("Germany", "", "Berlin", 2001, 1, 1, 31.0),
        reading("Algeria", "", "Algiers", 2000, 1, 1, 60.0),
        reading("Algeria", "", "Algiers", 2000, 1, 2, 61.0),
        reading("US", "Arizona", "Phoenix", 2002, 1, 1, 64.0),
        reading("US", "Arizona", "Phoenix", 2000, 1, 1, 60.0),
        reading("US", "Arizona", "Phoenix", 2001, 1, 1, -99.0),
    ]
}

/// Already sorted by natural order, with a three-reading Phoenix run in the
/// middle and a repeated year inside it.
pub(crate) fn sorted_readings() -> Vec<Reading> {
    vec![
        reading("Algeria", "", "Algiers", 1995, 1, 1, 64.2),
        reading("Algeria", "", "Algiers", 1995, 1, 2, 49.4),
        reading("Germany", "", "Berlin", 1996, 5, 5, 55.0),
        reading("US", "Arizona", "Phoenix", 2000, 1, 1, 60.0),
        reading("US", "Arizona", "Phoenix", 2000, 1, 2, 61.0),
        reading("US", "Arizona", "Phoenix", 2001, 1, 1, 62.0),
        reading("US", "Arizona", "Tucson", 2000, 1, 1, 58.0),
        reading("US", "Texas", "Austin", 2000, 1, 1, 50.0),
    ]
}

/// Key present only at index 0, ahead of readings that all sort before it,
/// so a binary search over the unsorted order never reaches it.
pub(crate) fn hidden_first_readings() -> Vec<Reading> {
    vec![
        reading("Zimbabwe", "", "Harare", 2003, 7, 4, 70.0),
        reading("Algeria", "", "Algiers", 2000, 1, 1, 60.0),
        reading("Algeria", "", "Algiers", 2001, 1, 1, 61.0),
        reading("Germany", "", "Berlin", 2000, 1, 1, 30.0),
        reading("Germany", "", "Berlin", 2001, 1, 1, 31.0),
    ]
}

pub(crate) fn cities(readings: &[Reading]) -> Vec<(String, i32, u32, u32)> {
    readings
        .iter()
        .map(|r| (r.city.clone(), r.year, r.month, r.day))
        .collect()
}
