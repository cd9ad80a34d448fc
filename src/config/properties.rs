use crate::foundation::math::{parse_f64_prefix, parse_i64_prefix};

/// Ordered key-value configuration bag.
///
/// Declaration order is observable: geometry keyframes are declared as
/// `key[<offset>]` entries and consumed in the order they were set, so the
/// bag is backed by an ordered sequence rather than a hash map. Lookups scan
/// linearly; bags hold tens of entries at most.
///
/// Numeric getters are permissive: they parse a leading numeric prefix and
/// fall back to zero, so a missing or malformed scalar never fails a frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing an existing entry in place (the
    /// original declaration position is kept) or appending a new one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up the raw string value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Numeric value of `name`; zero when absent or malformed.
    pub fn get_f64(&self, name: &str) -> f64 {
        self.get(name)
            .and_then(parse_f64_prefix)
            .map_or(0.0, |(value, _)| value)
    }

    /// Integer value of `name`; zero when absent or malformed.
    pub fn get_i64(&self, name: &str) -> i64 {
        self.get(name)
            .and_then(parse_i64_prefix)
            .map_or(0, |(value, _)| value)
    }

    /// True when `name` has an entry.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of entries in the bag.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the bag holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl serde::Serialize for Properties {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for Properties {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Properties;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of scalar configuration values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Properties, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut properties = Properties::new();
                // Entries are visited in document order, which the bag keeps.
                while let Some((name, value)) =
                    access.next_entry::<String, serde_json::Value>()?
                {
                    let value = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    properties.set(name, value);
                }
                Ok(properties)
            }
        }

        deserializer.deserialize_map(Visitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/properties.rs"]
mod tests;
