use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::de;
use crate::time::DayKey;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum DayType {
    Weekday,
    Weekend,
    Stat,
    Holiday,
    #[default]
    Unknown,
}

impl DayType {
    pub fn from_label(label: &str) -> DayType {
        let label = label.trim().to_lowercase();
        match label.as_str() {
            "weekday" | "workday" | "work day" => DayType::Weekday,
            "weekend" => DayType::Weekend,
            _ if label.contains("stat") => DayType::Stat,
            _ if label.contains("holiday") => DayType::Holiday,
            _ => DayType::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Weekend => "weekend",
            DayType::Stat => "stat",
            DayType::Holiday => "holiday",
            DayType::Unknown => "",
        }
    }
}

impl From<Option<String>> for DayType {
    fn from(label: Option<String>) -> Self {
        label.map(|l| DayType::from_label(&l)).unwrap_or_default()
    }
}

/// An explicit `0` target is a real target. A missing one defers to the
/// calendar and monthly sources.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DayRecord {
    #[serde(default, alias = "DayType")]
    pub day_type: DayType,
    #[serde(default, alias = "TargetMaint", deserialize_with = "de::optional_number")]
    pub explicit_target_maint: Option<f64>,
    #[serde(default, alias = "TargetConst", deserialize_with = "de::optional_number")]
    pub explicit_target_const: Option<f64>,
    #[serde(default, alias = "ActualMaint", deserialize_with = "de::number")]
    pub actual_maint: f64,
    #[serde(default, alias = "ActualConst", deserialize_with = "de::number")]
    pub actual_const: f64,
    #[serde(default, alias = "MissedTickets", deserialize_with = "de::number")]
    pub missed_tickets: f64,
    #[serde(default, alias = "SafetyIncidents", deserialize_with = "de::number")]
    pub safety_incidents: f64,
    #[serde(default, alias = "Notes", deserialize_with = "de::text")]
    pub notes: String,
}

impl DayRecord {
    pub fn has_explicit_target(&self) -> bool {
        self.explicit_target_maint.is_some() || self.explicit_target_const.is_some()
    }

    /// (maint, const) when at least one explicit target is present; the
    /// missing side counts as 0.
    pub fn sheet_target(&self) -> Option<(f64, f64)> {
        if !self.has_explicit_target() {
            return None;
        }
        Some((
            self.explicit_target_maint.unwrap_or(0.0),
            self.explicit_target_const.unwrap_or(0.0),
        ))
    }

}

pub type DayRecords = BTreeMap<DayKey, DayRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_type_labels() {
        assert_eq!(DayType::from_label("Weekday"), DayType::Weekday);
        assert_eq!(DayType::from_label("WEEKEND"), DayType::Weekend);
        assert_eq!(DayType::from_label("Stat Holiday"), DayType::Stat);
        assert_eq!(DayType::from_label("holiday"), DayType::Holiday);
        assert_eq!(DayType::from_label(""), DayType::Unknown);
        assert_eq!(DayType::from_label("rain day"), DayType::Unknown);
    }

    #[test]
    fn test_explicit_zero_is_present() {
        let record: DayRecord = serde_json::from_str(
            r#"{"explicit_target_maint": 0, "actual_maint": "7.5"}"#,
        )
        .unwrap();
        assert_eq!(record.explicit_target_maint, Some(0.0));
        assert_eq!(record.explicit_target_const, None);
        assert_eq!(record.sheet_target(), Some((0.0, 0.0)));
        assert_eq!(record.actual_maint, 7.5);
    }

    #[test]
    fn test_blank_targets_are_absent() {
        let record: DayRecord = serde_json::from_str(
            r#"{"DayType": "Weekday", "TargetMaint": "", "TargetConst": null, "Notes": " rain "}"#,
        )
        .unwrap();
        assert!(!record.has_explicit_target());
        assert_eq!(record.day_type, DayType::Weekday);
        assert_eq!(record.notes, "rain");
    }

    #[test]
    fn test_null_day_type_is_unknown() {
        let record: DayRecord = serde_json::from_str(r#"{"DayType": null}"#).unwrap();
        assert_eq!(record.day_type, DayType::Unknown);
    }
}
