use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetSource {
    Sheet,
    Calendar,
    MonthlyAverage,
}

impl BudgetSource {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetSource::Sheet => "Sheet",
            BudgetSource::Calendar => "Calendar",
            BudgetSource::MonthlyAverage => "Monthly avg",
        }
    }
}

#[derive(Serialize)]
struct Figures {
    maint: f64,
    cons: f64,
    total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<BudgetSource>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(into = "Figures")]
pub struct ResolvedBudget {
    pub maint: f64,
    pub cons: f64,
    pub source: BudgetSource,
}

impl ResolvedBudget {
    pub fn new(maint: f64, cons: f64, source: BudgetSource) -> Self {
        Self { maint, cons, source }
    }

    pub fn zero(source: BudgetSource) -> Self {
        Self::new(0.0, 0.0, source)
    }

    pub fn total(&self) -> f64 {
        self.maint + self.cons
    }

    pub fn pick(&self, view: HoursView) -> f64 {
        view.pick(self.maint, self.cons)
    }
}

impl From<ResolvedBudget> for Figures {
    fn from(b: ResolvedBudget) -> Self {
        Figures {
            maint: b.maint,
            cons: b.cons,
            total: b.total(),
            source: Some(b.source),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(into = "Figures")]
pub struct ActualTotals {
    pub maint: f64,
    pub cons: f64,
}

impl ActualTotals {
    pub fn total(&self) -> f64 {
        self.maint + self.cons
    }

    pub fn pick(&self, view: HoursView) -> f64 {
        view.pick(self.maint, self.cons)
    }
}

impl From<ActualTotals> for Figures {
    fn from(a: ActualTotals) -> Self {
        Figures {
            maint: a.maint,
            cons: a.cons,
            total: a.total(),
            source: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HoursView {
    Maintenance,
    Construction,
    #[default]
    Total,
}

impl HoursView {
    pub fn pick(&self, maint: f64, cons: f64) -> f64 {
        match self {
            HoursView::Maintenance => maint,
            HoursView::Construction => cons,
            HoursView::Total => maint + cons,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HoursView::Maintenance => "Maintenance",
            HoursView::Construction => "Construction",
            HoursView::Total => "Total",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum_of_divisions() {
        let budget = ResolvedBudget::new(12.5, 30.0, BudgetSource::Calendar);
        assert_eq!(budget.total(), 42.5);
        assert_eq!(budget.pick(HoursView::Construction), 30.0);
    }

    #[test]
    fn test_serialized_budget_carries_total() {
        let budget = ResolvedBudget::new(1.0, 2.0, BudgetSource::Sheet);
        let json = serde_json::to_value(budget).unwrap();
        assert_eq!(json["total"], 3.0);
        assert_eq!(json["source"], "Sheet");

        let actual = serde_json::to_value(ActualTotals { maint: 4.0, cons: 0.5 }).unwrap();
        assert_eq!(actual["total"], 4.5);
        assert!(actual.get("source").is_none());
    }
}
