//! Value entities that network objects point at but that carry no relations.

use chrono::{DateTime, SecondsFormat, TimeZone};

/// A reference to a geographical location.
///
/// Unlike network objects, the identifier of a Location is not checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub identification: Option<String>,
    pub name: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub altitude: Option<f64>,
    pub unlocode: Option<String>,
    pub address: Option<String>,
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coordinates(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude: Some(longitude),
            latitude: Some(latitude),
            ..Self::default()
        }
    }
}

/// A time interval during which a network object is active.
///
/// An object with several lifetimes is active during their union.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lifetime {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interval with both bounds rendered as RFC 3339 timestamps.
    pub fn between<Tz: TimeZone>(start: DateTime<Tz>, end: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            start: Some(start.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            end: Some(end.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }

    /// Open-ended interval.
    pub fn starting<Tz: TimeZone>(start: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            start: Some(start.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            end: None,
        }
    }
}

/// Discriminates one data stream embedded in another, e.g. a VLAN id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    pub labeltype: Option<String>,
    pub value: Option<String>,
}

impl Label {
    pub fn new(labeltype: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            labeltype: Some(labeltype.into()),
            value: Some(value.into()),
        }
    }
}

/// An unordered set of label values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelGroup {
    pub labeltype: String,
    pub values: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedList;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_lifetime_between_formats_rfc3339() {
        let start = Utc.with_ymd_and_hms(2013, 5, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2014, 5, 1, 12, 30, 0).unwrap();
        let lifetime = Lifetime::between(start, end);

        assert_eq!(lifetime.start.as_deref(), Some("2013-05-01T00:00:00Z"));
        assert_eq!(lifetime.end.as_deref(), Some("2014-05-01T12:30:00Z"));
    }

    #[test]
    fn test_label_new() {
        let label = Label::new("http://schemas.ogf.org/nml/2013/05/ethernet#vlan", "1501");
        assert_eq!(label.value.as_deref(), Some("1501"));
    }
}
