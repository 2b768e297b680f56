/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! Static table of Bangalore localities consulted before any network geocoding.

use super::{types::*, utils::title_case};

pub const MAX_SUGGESTIONS: usize = 5;
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

// Order matters: partial matches return the first entry that matches.
static LOCALITIES: [(&str, f64, f64); 26] = [
    ("koramangala", 12.9352, 77.6245),
    ("indiranagar", 12.9716, 77.6412),
    ("whitefield", 12.9698, 77.7500),
    ("mg road", 12.9759, 77.6061),
    ("airport", 13.1986, 77.7066),
    ("electronic city", 12.8399, 77.6770),
    ("hsr layout", 12.9121, 77.6446),
    ("hsr", 12.9121, 77.6446),
    ("jayanagar", 12.9250, 77.5838),
    ("btm layout", 12.9165, 77.6101),
    ("btm", 12.9165, 77.6101),
    ("marathahalli", 12.9591, 77.6974),
    ("silk board", 12.9177, 77.6237),
    ("hebbal", 13.0358, 77.5970),
    ("yelahanka", 13.1007, 77.5963),
    ("jp nagar", 12.9077, 77.5859),
    ("banashankari", 12.9250, 77.5461),
    ("rajajinagar", 12.9917, 77.5553),
    ("malleshwaram", 13.0029, 77.5707),
    ("vijayanagar", 12.9718, 77.5341),
    ("yeshwanthpur", 13.0281, 77.5385),
    ("kr puram", 13.0094, 77.6963),
    ("bellandur", 12.9259, 77.6784),
    ("sarjapur", 12.8756, 77.7509),
    ("bannerghatta", 12.8007, 77.5963),
    ("basavanagudi", 12.9423, 77.5738),
];

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn entries() -> impl Iterator<Item = (&'static str, Point)> {
    LOCALITIES
        .iter()
        .map(|(key, lat, lon)| (*key, Point::new(*lat, *lon)))
}

fn matches_partially(key: &str, normalized: &str) -> bool {
    key.contains(normalized) || normalized.contains(key)
}

pub fn lookup_exact(text: &str) -> Option<Point> {
    let normalized = normalize(text);
    entries()
        .find(|(key, _)| *key == normalized)
        .map(|(_, point)| point)
}

/// First locality whose key contains the input, or is contained in it.
pub fn lookup_partial(text: &str) -> Option<Point> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }
    entries()
        .find(|(key, _)| matches_partially(key, &normalized))
        .map(|(_, point)| point)
}

/// Title-cased locality names matching `text`, at most [`MAX_SUGGESTIONS`].
pub fn suggestions(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    if normalized.chars().count() < MIN_SUGGESTION_QUERY_LEN {
        return vec![];
    }

    let mut suggestions: Vec<String> = Vec::new();
    for (key, _) in entries() {
        if matches_partially(key, &normalized) {
            let formatted = title_case(key);
            if !suggestions.contains(&formatted) {
                suggestions.push(formatted);
            }
        }
    }
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Locality names shown to the user when a lookup fails.
pub fn hint(for_pickup: bool) -> String {
    if for_pickup {
        "Koramangala, HSR Layout, Jayanagar".to_string()
    } else {
        "Indiranagar, Whitefield, MG Road".to_string()
    }
}

pub fn len() -> usize {
    LOCALITIES.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        assert_eq!(
            lookup_exact("  Koramangala "),
            Some(Point::new(12.9352, 77.6245))
        );
        assert_eq!(lookup_exact("MG Road"), Some(Point::new(12.9759, 77.6061)));
        assert_eq!(lookup_exact("Koramangala 5th Block"), None);
    }

    #[test]
    fn test_partial_match_both_directions() {
        // input contains key
        assert_eq!(
            lookup_partial("Koramangala 5th Block"),
            Some(Point::new(12.9352, 77.6245))
        );
        // key contains input
        assert_eq!(lookup_partial("whitef"), Some(Point::new(12.9698, 77.7500)));
        assert_eq!(lookup_partial("Atlantis"), None);
        assert_eq!(lookup_partial("   "), None);
    }

    #[test]
    fn test_partial_match_prefers_table_order() {
        assert_eq!(lookup_partial("hsr"), Some(Point::new(12.9121, 77.6446)));
        assert_eq!(
            lookup_partial("nagar"),
            Some(Point::new(12.9716, 77.6412))
        );
    }

    #[test]
    fn test_suggestions() {
        assert!(suggestions("k").is_empty());
        assert_eq!(suggestions("hsr"), vec!["Hsr Layout", "Hsr"]);
        assert_eq!(
            suggestions("nagar"),
            vec![
                "Indiranagar",
                "Jayanagar",
                "Jp Nagar",
                "Rajajinagar",
                "Vijayanagar"
            ]
        );
    }

    #[test]
    fn test_table_size() {
        assert_eq!(len(), 26);
    }
}
