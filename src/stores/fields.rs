//! Serde helpers for field formats inherited from the browser data.

/// `YYYY-MM-DD` calendar dates, as produced by `<input type="date">`.
pub(crate) mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::macros::format_description;
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, s: S) -> Result<S::Ok, S::Error> {
        let text = date
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(serde::ser::Error::custom)?;
        s.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Date, D::Error> {
        let text = String::deserialize(d)?;
        Date::parse(&text, format_description!("[year]-[month]-[day]"))
            .map_err(serde::de::Error::custom)
    }
}

/// Like [`iso_date`], but an empty string (a date input left blank) is `None`.
/// `None` is written back as an empty string.
pub(crate) mod optional_iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::macros::format_description;
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Option<Date>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => super::iso_date::serialize(date, s),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Date>, D::Error> {
        let text = Option::<String>::deserialize(d)?.unwrap_or_default();
        if text.trim().is_empty() {
            return Ok(None);
        }
        Date::parse(&text, format_description!("[year]-[month]-[day]"))
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

/// Guest counts were stored straight from form inputs, so older data holds
/// them as strings (`"2"`) while checkout wrote numbers (`2`).
pub(crate) fn number_or_string<'de, D>(d: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(d)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use time::macros::date;
    use time::Date;

    #[derive(Debug, Serialize, Deserialize)]
    struct Stay {
        #[serde(with = "super::iso_date")]
        day: Date,
        #[serde(deserialize_with = "super::number_or_string")]
        guests: u32,
    }

    #[test]
    fn dates_use_iso_calendar_format() {
        let stay = Stay { day: date!(2025 - 03 - 07), guests: 2 };
        let json = serde_json::to_string(&stay).unwrap();
        assert_eq!(json, r#"{"day":"2025-03-07","guests":2}"#);

        assert!(serde_json::from_str::<Stay>(r#"{"day":"07/03/2025","guests":2}"#).is_err());
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Search {
        #[serde(with = "super::optional_iso_date", default)]
        day: Option<Date>,
    }

    #[test]
    fn blank_dates_read_as_none() {
        let blank: Search = serde_json::from_str(r#"{"day":""}"#).unwrap();
        let missing: Search = serde_json::from_str("{}").unwrap();
        let set: Search = serde_json::from_str(r#"{"day":"2025-03-07"}"#).unwrap();
        assert_eq!(blank.day, None);
        assert_eq!(missing.day, None);
        assert_eq!(set.day, Some(date!(2025 - 03 - 07)));

        assert_eq!(serde_json::to_string(&blank).unwrap(), r#"{"day":""}"#);
        assert!(serde_json::from_str::<Search>(r#"{"day":"soon"}"#).is_err());
    }

    #[test]
    fn guests_accept_numbers_and_strings() {
        let a: Stay = serde_json::from_str(r#"{"day":"2025-03-07","guests":3}"#).unwrap();
        let b: Stay = serde_json::from_str(r#"{"day":"2025-03-07","guests":"3"}"#).unwrap();
        assert_eq!(a.guests, 3);
        assert_eq!(b.guests, 3);

        assert!(serde_json::from_str::<Stay>(r#"{"day":"2025-03-07","guests":"many"}"#).is_err());
    }
}
