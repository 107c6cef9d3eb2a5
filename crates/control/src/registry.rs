use std::collections::BTreeMap;

use crate::command::Intensity;

/// Current intensity of every place that has received a command.
///
/// Places are created on first write and overwritten afterwards; there is no
/// removal and no validation against a list of known zones.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    places: BTreeMap<String, Intensity>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, place: &str, intensity: Intensity) {
        self.places.insert(place.to_string(), intensity);
    }

    pub fn get(&self, place: &str) -> Option<Intensity> {
        self.places.get(place).copied()
    }

    pub fn snapshot(&self) -> BTreeMap<String, Intensity> {
        self.places.clone()
    }
}
