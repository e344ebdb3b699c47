use super::exam::ExamRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Calendar date key ("YYYY-MM-DD") → day number of the exam period.
pub type DateIndex = BTreeMap<String, u32>;

/// Slot name → timing, in document order.
pub type SlotTimingMap = IndexMap<String, SlotTiming>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTiming {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    pub start: String,
    pub end: String,
}

impl SlotTiming {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            day: None,
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn display(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

/// The static exam schedule document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub exams: Vec<ExamRecord>,
    #[serde(default, deserialize_with = "date_index")]
    pub dates: DateIndex,
    #[serde(default)]
    pub slot_timing: SlotTimingMap,
}

impl Dataset {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn is_empty(&self) -> bool {
        self.exams.is_empty() && self.dates.is_empty() && self.slot_timing.is_empty()
    }

    /// Day number of `date`, if the date belongs to the exam period.
    pub fn day_of(&self, date: &str) -> Option<u32> {
        self.dates.get(date).copied()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatesRepr {
    Map(DateIndex),
    List(Vec<String>),
}

/// `dates` is either an object of day numbers or a plain list of date keys;
/// a list is numbered 1.. in sorted order.
fn date_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateIndex, D::Error> {
    Ok(match DatesRepr::deserialize(deserializer)? {
        DatesRepr::Map(m) => m,
        DatesRepr::List(mut list) => {
            list.sort();
            list.dedup();
            list.into_iter()
                .enumerate()
                .map(|(i, d)| (d, i as u32 + 1))
                .collect()
        }
    })
}
