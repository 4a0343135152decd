//! Built-in list of named places inside the service area

use tracing::debug;

use super::geo::{haversine_km, GeoPoint};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place {
    pub name: &'static str,
    /// Older or colloquial names that also match
    pub aliases: &'static [&'static str],
    pub point: GeoPoint,
}

impl Place {
    const fn new(name: &'static str, aliases: &'static [&'static str], lat: f64, lng: f64) -> Self {
        Self {
            name,
            aliases,
            point: GeoPoint::new(lat, lng),
        }
    }

    fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

const KERALA_PLACES: &[Place] = &[
    Place::new("Thiruvananthapuram", &["Trivandrum"], 8.5241, 76.9366),
    Place::new("Kollam", &["Quilon"], 8.8932, 76.6141),
    Place::new("Varkala", &[], 8.7379, 76.7163),
    Place::new("Pathanamthitta", &[], 9.2648, 76.7870),
    Place::new("Alappuzha", &["Alleppey"], 9.4981, 76.3388),
    Place::new("Kottayam", &[], 9.5916, 76.5222),
    Place::new("Idukki", &["Painavu"], 9.8497, 76.9720),
    Place::new("Kochi", &["Cochin"], 9.9312, 76.2673),
    Place::new("Ernakulam", &[], 9.9816, 76.2999),
    Place::new("Fort Kochi", &[], 9.9658, 76.2421),
    Place::new("Aluva", &["Alwaye"], 10.1004, 76.3570),
    Place::new("Munnar", &[], 10.0889, 77.0595),
    Place::new("Thrissur", &["Trichur"], 10.5276, 76.2144),
    Place::new("Guruvayur", &[], 10.5946, 76.0410),
    Place::new("Palakkad", &["Palghat"], 10.7867, 76.6548),
    Place::new("Malappuram", &[], 11.0510, 76.0711),
    Place::new("Kozhikode", &["Calicut"], 11.2588, 75.7804),
    Place::new("Kalpetta", &["Wayanad"], 11.6085, 76.0830),
    Place::new("Kannur", &["Cannanore"], 11.8745, 75.3704),
    Place::new("Kasaragod", &[], 12.4996, 74.9869),
];

#[derive(Debug, Clone)]
pub struct Gazetteer {
    places: Vec<Place>,
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::new(KERALA_PLACES.to_vec())
    }
}

impl Gazetteer {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Look up a place by name: exact (case-insensitive), then the shortest
    /// prefix match, then the closest spelling within a small edit distance.
    pub fn search(&self, query: &str) -> crate::Result<&Place> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(crate::Error::UnknownPlace(query.to_string()));
        }

        if let Some(place) = self
            .places
            .iter()
            .find(|p| p.names().any(|n| n.to_lowercase() == needle))
        {
            return Ok(place);
        }

        if let Some(place) = self
            .places
            .iter()
            .filter(|p| p.names().any(|n| n.to_lowercase().starts_with(&needle)))
            .min_by_key(|p| p.name.len())
        {
            return Ok(place);
        }

        let cutoff = (needle.chars().count() / 3).max(1);
        let best = self
            .places
            .iter()
            .filter_map(|p| {
                p.names()
                    .map(|n| edit_distance(&needle, &n.to_lowercase()))
                    .min()
                    .map(|d| (d, p))
            })
            .filter(|(d, _)| *d <= cutoff)
            .min_by_key(|(d, _)| *d);

        match best {
            Some((distance, place)) => {
                debug!(query, matched = place.name, distance, "Fuzzy place match");
                Ok(place)
            }
            None => Err(crate::Error::UnknownPlace(query.to_string())),
        }
    }

    /// Closest known place to `point`
    pub fn nearest(&self, point: GeoPoint) -> Option<&Place> {
        self.places.iter().min_by(|a, b| {
            haversine_km(a.point, point).total_cmp(&haversine_km(b.point, point))
        })
    }
}

/// Levenshtein distance over chars
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut row = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != *cb);
            row[j + 1] = substitute.min(prev[j + 1] + 1).min(row[j] + 1);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}
