//! Original -> substitute mapping with uniqueness guarantees

use super::bank::NameSource;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Number of draws from the name source before falling back to a numbered name
pub const DEFAULT_MAX_ATTEMPTS: usize = 25;

/// Insertion-ordered map from original name to substitute.
///
/// Serializes as a JSON object whose keys keep first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    index: HashMap<String, String>,
    order: Vec<String>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.index.get(original).map(String::as_str)
    }

    pub fn contains(&self, original: &str) -> bool {
        self.index.contains_key(original)
    }

    /// Append a mapping. Returns false (and changes nothing) if the key exists.
    pub fn insert(&mut self, original: String, substitute: String) -> bool {
        if self.index.contains_key(&original) {
            return false;
        }
        self.order.push(original.clone());
        self.index.insert(original, substitute);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in first-encountered order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .map(move |k| (k.as_str(), self.index[k].as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(_, v)| v)
    }
}

impl Serialize for MappingTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (original, substitute) in self.iter() {
            map.serialize_entry(original, substitute)?;
        }
        map.end()
    }
}

struct MappingTableVisitor;

impl<'de> Visitor<'de> for MappingTableVisitor {
    type Value = MappingTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping original names to substitutes")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<MappingTable, A::Error> {
        let mut table = MappingTable::new();
        while let Some((original, substitute)) = access.next_entry::<String, String>()? {
            if table.contains(&original) {
                return Err(de::Error::custom(format!(
                    "duplicate original name '{}'",
                    original
                )));
            }
            table.insert(original, substitute);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for MappingTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(MappingTableVisitor)
    }
}

/// Stateful name substitution service.
///
/// Every distinct trimmed original gets exactly one substitute, and no two
/// originals ever share a substitute. Entries are never removed.
pub struct SubstitutionTable<S: NameSource> {
    source: S,
    mappings: MappingTable,
    used_names: HashSet<String>,
    max_attempts: usize,
    warn_on_max_attempts: bool,
}

impl<S: NameSource> SubstitutionTable<S> {
    pub fn new(source: S) -> Self {
        Self::with_mappings(source, MappingTable::new())
    }

    /// Start from previously issued mappings; their substitutes count as used.
    pub fn with_mappings(source: S, mappings: MappingTable) -> Self {
        let used_names = mappings.values().map(String::from).collect();
        Self {
            source,
            mappings,
            used_names,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            warn_on_max_attempts: false,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_warn_on_max_attempts(mut self, warn: bool) -> Self {
        self.warn_on_max_attempts = warn;
        self
    }

    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Look up or assign the substitute for `original`.
    ///
    /// Blank input is returned untouched and never recorded.
    pub fn get_safe_name(&mut self, original: &str) -> String {
        let key = original.trim();
        if key.is_empty() {
            return original.to_string();
        }

        if let Some(existing) = self.mappings.get(key) {
            return existing.to_string();
        }

        for _ in 0..self.max_attempts {
            let candidate = self.source.next_candidate();
            if !self.used_names.contains(&candidate) {
                self.record(key, &candidate);
                return candidate;
            }
        }

        let base = self.source.next_candidate();
        let mut counter = self.used_names.len();
        let mut candidate = format!("{}{}", base, counter);
        // Only reachable when a loaded session already holds numbered names
        while self.used_names.contains(&candidate) {
            counter += 1;
            candidate = format!("{}{}", base, counter);
        }
        self.record(key, &candidate);

        if self.warn_on_max_attempts {
            log::warn!(
                "Max attempts reached ({}). Assigned unique name '{}' for original name '{}'.",
                self.max_attempts,
                candidate,
                key
            );
        } else {
            log::debug!("Fallback name '{}' assigned for '{}'", candidate, key);
        }

        candidate
    }

    fn record(&mut self, key: &str, substitute: &str) {
        self.mappings.insert(key.to_string(), substitute.to_string());
        self.used_names.insert(substitute.to_string());
    }
}
