use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::Record;
use crate::status::ScheduleType;
use crate::types::{EntityId, EntityKind};

/// A calendar entry (showing, move-in, inspection, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: EntityId,
    pub title: String,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub time: NaiveTime,
    pub property_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for ScheduleItem {
    const KIND: EntityKind = EntityKind::ScheduleItem;

    fn id(&self) -> &str {
        &self.id
    }
}

/// 12-hour clock times such as `"9:00 AM"` and `"2:30 PM"`.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const PARSE_FORMAT: &str = "%I:%M %p";
    const DISPLAY_FORMAT: &str = "%-I:%M %p";

    pub fn format(time: &NaiveTime) -> String {
        time.format(DISPLAY_FORMAT).to_string()
    }

    pub fn parse(value: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(value.trim(), PARSE_FORMAT)
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid time '{raw}': {e}")))
    }
}
