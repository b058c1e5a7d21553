use serde::{Deserialize, Serialize};

use crate::time::{DayKey, MonthKey};

const MAINTENANCE_KEYWORDS: [&str; 5] = [
    "maintenance",
    "commercial maintenance",
    "residential maintenance",
    "irrigation",
    "lighting",
];
const WON_STATUS_WORDS: [&str; 3] = ["won", "closed won", "sold"];
const LOST_STATUS_WORDS: [&str; 2] = ["lost", "closed lost"];
const ACTIVE_TICKET_WORDS: [&str; 2] = ["open", "scheduled"];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Division {
    Construction,
    Maintenance,
    Other,
}

impl Division {
    pub fn classify(name: &str) -> Division {
        let name = name.to_lowercase();
        if name.contains("construction") {
            Division::Construction
        } else if MAINTENANCE_KEYWORDS.iter().any(|k| name.contains(k)) {
            Division::Maintenance
        } else {
            Division::Other
        }
    }
}

impl From<String> for Division {
    fn from(name: String) -> Self {
        Division::classify(&name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PipelineStatus {
    Won,
    Lost,
    Open,
}

impl PipelineStatus {
    pub fn classify(status: &str) -> PipelineStatus {
        let status = status.trim().to_lowercase();
        if WON_STATUS_WORDS.iter().any(|w| status.contains(w)) {
            PipelineStatus::Won
        } else if LOST_STATUS_WORDS.iter().any(|w| status.contains(w)) {
            PipelineStatus::Lost
        } else {
            PipelineStatus::Open
        }
    }

    pub fn is_open(&self) -> bool {
        *self == PipelineStatus::Open
    }
}

impl From<String> for PipelineStatus {
    fn from(status: String) -> Self {
        PipelineStatus::classify(&status)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PipelineOpportunity {
    pub division: Division,
    pub status: PipelineStatus,
    pub start_month: MonthKey,
    pub weighted_hours: f64,
    pub weighted_dollars: f64,
    pub estimated_dollars: f64,
}

impl PipelineOpportunity {
    pub fn is_open_for(&self, division: Division) -> bool {
        self.division == division && self.status.is_open()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TicketStatus {
    Active,
    Inactive,
}

impl TicketStatus {
    pub fn classify(status: &str) -> TicketStatus {
        let status = status.trim().to_lowercase();
        if status == "active" || ACTIVE_TICKET_WORDS.iter().any(|w| status.contains(w)) {
            TicketStatus::Active
        } else {
            TicketStatus::Inactive
        }
    }
}

impl From<String> for TicketStatus {
    fn from(status: String) -> Self {
        TicketStatus::classify(&status)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkTicket {
    pub division: Division,
    pub status: TicketStatus,
    pub scheduled: DayKey,
    pub estimated_hours: f64,
}

impl WorkTicket {
    pub fn is_active_for(&self, division: Division) -> bool {
        self.division == division && self.status == TicketStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_classify() {
        assert_eq!(Division::classify("Construction"), Division::Construction);
        assert_eq!(Division::classify("Residential Maintenance"), Division::Maintenance);
        assert_eq!(Division::classify("Irrigation"), Division::Maintenance);
        assert_eq!(Division::classify("Construction & Maintenance"), Division::Construction);
        assert_eq!(Division::classify("Snow"), Division::Other);
    }

    #[test]
    fn test_pipeline_status_classify() {
        assert_eq!(PipelineStatus::classify("Closed Won"), PipelineStatus::Won);
        assert_eq!(PipelineStatus::classify("Sold"), PipelineStatus::Won);
        assert_eq!(PipelineStatus::classify("Closed Lost"), PipelineStatus::Lost);
        assert_eq!(PipelineStatus::classify("Proposal Sent"), PipelineStatus::Open);
        assert_eq!(PipelineStatus::classify(""), PipelineStatus::Open);
    }

    #[test]
    fn test_ticket_status_classify() {
        assert_eq!(TicketStatus::classify("Scheduled"), TicketStatus::Active);
        assert_eq!(TicketStatus::classify(" open "), TicketStatus::Active);
        assert_eq!(TicketStatus::classify("Completed"), TicketStatus::Inactive);
    }
}
