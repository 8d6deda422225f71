/// End dates that may be absent, `null` or an empty string, all meaning "ongoing".
pub mod open_end_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize, de, ser};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        value.map(|date| date.to_string()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        match <Option<String> as Deserialize>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => s.trim().parse().map(Some).map_err(de::Error::custom),
        }
    }
}
