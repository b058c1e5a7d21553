use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::de;
use crate::time::{DayKey, MonthKey};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CalendarTargetRecord {
    pub day: DayKey,
    pub maint_target: f64,
    pub const_target: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlyTargetRecord {
    pub month: MonthKey,
    #[serde(default)]
    pub maintenance_monthly: f64,
    #[serde(default)]
    pub construction_monthly: f64,
    #[serde(default)]
    pub maintenance_revenue: f64,
    #[serde(default)]
    pub construction_revenue: f64,
}

impl MonthlyTargetRecord {
    pub fn hours(month: MonthKey, maintenance_monthly: f64, construction_monthly: f64) -> Self {
        Self {
            month,
            maintenance_monthly,
            construction_monthly,
            maintenance_revenue: 0.0,
            construction_revenue: 0.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlyCapacity {
    pub month: MonthKey,
    #[serde(default, alias = "maintcap", deserialize_with = "de::number")]
    pub maint_capacity: f64,
    #[serde(default, alias = "constcap", deserialize_with = "de::number")]
    pub const_capacity: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlyRevenueActual {
    pub month: MonthKey,
    #[serde(default, deserialize_with = "de::number")]
    pub maintenance: f64,
    #[serde(default, deserialize_with = "de::number")]
    pub construction: f64,
}

pub type CalendarTargets = BTreeMap<DayKey, CalendarTargetRecord>;
pub type MonthlyTargets = BTreeMap<MonthKey, MonthlyTargetRecord>;
pub type MonthlyCapacities = BTreeMap<MonthKey, MonthlyCapacity>;
pub type MonthlyRevenueActuals = BTreeMap<MonthKey, MonthlyRevenueActual>;
