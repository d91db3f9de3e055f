use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::list_filter::SortOption;

/// Backend identifier. The API hands out both numeric and string ids, so
/// both are normalised into text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = match RawId::deserialize(deserializer)? {
            RawId::Text(text) => text,
            RawId::Int(value) => value.to_string(),
            RawId::Float(value) => value.to_string(),
        };
        Ok(RecordId(id))
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// Value of the first of `keys` present in a map, ignoring the rest.
/// Used on `#[serde(flatten)]` fields whose keys are spelled several ways
/// and may arrive together.
struct FirstKey<T> {
    keys: &'static [&'static str],
    marker: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for FirstKey<T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a map with one of {:?}", self.keys)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Option<T>, A::Error> {
        let mut found: Option<(usize, T)> = None;
        while let Some(key) = map.next_key::<String>()? {
            match self.keys.iter().position(|candidate| *candidate == key) {
                Some(rank) if found.as_ref().map_or(true, |(best, _)| rank < *best) => {
                    found = Some((rank, map.next_value()?));
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(found.map(|(_, value)| value))
    }
}

pub(crate) fn first_key<'de, D, T>(
    deserializer: D,
    keys: &'static [&'static str],
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    deserializer.deserialize_map(FirstKey {
        keys,
        marker: PhantomData,
    })
}

/// `id`, falling back to Mongo's `_id`. Payloads may carry both.
pub fn deserialize_record_key<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    first_key(deserializer, &["id", "_id"])?.ok_or_else(|| de::Error::missing_field("id"))
}

/// One table column: a header and the projection that renders a cell.
pub struct Column<T> {
    pub header: &'static str,
    pub cell: fn(&T) -> String,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

/// An entity served by one REST collection and listed on one page.
pub trait Record: Clone + PartialEq + Send + Sync + DeserializeOwned + 'static {
    /// Collection path relative to the API base, e.g. `schools`.
    const COLLECTION: &'static str;
    /// Page heading.
    const TITLE: &'static str;

    fn id(&self) -> &RecordId;

    /// Text matched by the free-text search box.
    fn search_field(&self) -> String;

    fn sort_options() -> Vec<SortOption<Self>>;

    fn columns() -> Vec<Column<Self>>;
}

/// Records whose default ordering is by a display name.
pub trait Named {
    fn display_name(&self) -> &str;
}

/// "Name (A-Z)" and "Name (Z-A)", compared case-insensitively.
pub fn name_sort_options<T: Named>() -> Vec<SortOption<T>> {
    vec![
        SortOption {
            key: "nameAsc",
            label: "Name (A-Z)",
            compare: |a: &T, b: &T| locale_cmp(a.display_name(), b.display_name()),
        },
        SortOption {
            key: "nameDesc",
            label: "Name (Z-A)",
            compare: |a: &T, b: &T| locale_cmp(b.display_name(), a.display_name()),
        },
    ]
}

/// Replaces the record with the same id, or appends it when it is new.
pub fn upsert_record<R: Record>(records: &mut Vec<R>, record: R) {
    match records.iter().position(|existing| existing.id() == record.id()) {
        Some(idx) => records[idx] = record,
        None => records.push(record),
    }
}

/// Drops every record carrying `id`. Returns whether anything was removed.
pub fn remove_record<R: Record>(records: &mut Vec<R>, id: &RecordId) -> bool {
    let before = records.len();
    records.retain(|record| record.id() != id);
    records.len() != before
}

/// Case-insensitive comparison used by the name sorts, close to what a
/// locale-aware collation gives for plain Latin text. Names equal but for
/// case put the lowercase form first.
pub fn locale_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_numbers_and_strings() {
        let ids: Vec<RecordId> =
            serde_json::from_str(r#"[12, "64f1c0", 3.0]"#).expect("ids should decode");

        assert_eq!(ids[0], RecordId::from(12));
        assert_eq!(ids[1], RecordId::from("64f1c0"));
        assert_eq!(ids[2].0, "3");
    }

    #[test]
    fn locale_cmp_ignores_case_first() {
        use std::cmp::Ordering;

        assert_eq!(locale_cmp("bob", "Charlie"), Ordering::Less);
        assert_eq!(locale_cmp("Alice", "bob"), Ordering::Less);
        assert_ne!(locale_cmp("bob", "Bob"), Ordering::Equal);
    }

    #[test]
    fn lowercase_sorts_before_uppercase_on_a_case_tie() {
        use std::cmp::Ordering;

        assert_eq!(locale_cmp("alice", "Alice"), Ordering::Less);
        assert_eq!(locale_cmp("Alice", "alice"), Ordering::Greater);

        let mut names = vec!["Alice", "bob", "alice"];
        names.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(names, vec!["alice", "Alice", "bob"]);
    }
}
