//! Serialization for Record as a plain JSON object.
//!
//! Fields serialize in record order and deserialize in document order, so a
//! round trip through a JSON string keeps the column order of the source.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();
        if let Some(hint) = access.size_hint() {
            record.fields.reserve(hint);
        }
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            record.insert(key, value);
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::records_from_json;

    #[test]
    fn test_serialize_in_field_order() {
        let record = Record::new().set("name", "Contoso").set("id", 7);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"Contoso","id":7}"#);
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let rows = records_from_json(r#"[{"zeta": 1, "alpha": "a", "extra": null}]"#).unwrap();

        let names: Vec<&str> = rows[0].fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "extra"]);
        assert_eq!(rows[0].get("extra"), Some(&Value::Null));
    }

    #[test]
    fn test_deserialize_rejects_arrays_of_scalars() {
        assert!(records_from_json("[1, 2, 3]").is_err());
    }
}
