use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{AcceptanceTaskId, ProjectId};
use crate::CoreError;

/// The fire-safety systems that go through formal acceptance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
pub enum AcceptanceCategory {
    #[serde(rename = "Automatic Fire Alarm")]
    #[strum(serialize = "Automatic Fire Alarm")]
    FireAlarm,
    #[serde(rename = "Wall Hydrant")]
    #[strum(serialize = "Wall Hydrant")]
    WallHydrant,
    #[serde(rename = "Automatic Sprinkler")]
    #[strum(serialize = "Automatic Sprinkler")]
    Sprinkler,
    #[serde(rename = "Fire Curtain")]
    #[strum(serialize = "Fire Curtain")]
    FireCurtain,
    #[serde(rename = "Pressurization & Smoke Extraction")]
    #[strum(serialize = "Pressurization & Smoke Extraction")]
    SmokeControl,
    #[serde(rename = "Lightning Protection")]
    #[strum(serialize = "Lightning Protection")]
    LightningProtection,
    #[serde(rename = "Emergency Lighting & Exit")]
    #[strum(serialize = "Emergency Lighting & Exit")]
    EmergencyLighting,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
pub enum AcceptanceStatus {
    Pending,
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    InProgress,
    Approved,
    Rejected,
}

impl AcceptanceStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Workflow table: Pending -> {In Progress, Rejected},
    /// In Progress -> {Approved, Rejected}; Approved and Rejected are final.
    pub fn can_transition_to(self, next: AcceptanceStatus) -> bool {
        use AcceptanceStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress) | (Pending, Rejected) | (InProgress, Approved) | (InProgress, Rejected)
        )
    }
}

/// How status changes on acceptance records are validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TransitionPolicy {
    /// Any status may be set directly (manual override).
    #[default]
    Unrestricted,
    /// Only the transitions in [`AcceptanceStatus::can_transition_to`].
    Workflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum EvidenceKind {
    #[serde(rename = "PDF")]
    Pdf,
    Image,
    Excel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceFile {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EvidenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub date: String,
}

/// A QA/QC checklist item awaiting sign-off against a technical standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptanceTask {
    pub id: AcceptanceTaskId,
    pub project_id: ProjectId,
    /// Cached from the owning project at creation time.
    pub project_name: String,
    pub category: AcceptanceCategory,
    pub title: String,
    pub standard_ref: String,
    pub status: AcceptanceStatus,
    #[serde(default)]
    pub documents: Vec<EvidenceFile>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_date: Option<String>,
}

impl AcceptanceTask {
    pub fn new(
        id: impl Into<AcceptanceTaskId>,
        project_id: impl Into<ProjectId>,
        project_name: impl Into<String>,
        category: AcceptanceCategory,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            project_name: project_name.into(),
            category,
            title: title.into(),
            standard_ref: String::new(),
            status: AcceptanceStatus::Pending,
            documents: Vec::new(),
            images: Vec::new(),
            inspector: None,
            notes: None,
            check_date: None,
        }
    }

    pub fn with_status(mut self, status: AcceptanceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_document(mut self, name: impl Into<String>, kind: EvidenceKind, date: &str) -> Self {
        self.documents.push(EvidenceFile {
            name: name.into(),
            kind,
            url: None,
            date: date.to_string(),
        });
        self
    }

    pub fn has_evidence(&self) -> bool {
        !self.documents.is_empty()
    }

    /// Set the status, validating the move according to `policy`.
    ///
    /// Setting the current status again is always accepted.
    pub fn set_status(
        &mut self,
        next: AcceptanceStatus,
        policy: TransitionPolicy,
    ) -> Result<(), CoreError> {
        if next != self.status
            && policy == TransitionPolicy::Workflow
            && !self.status.can_transition_to(next)
        {
            return Err(CoreError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: AcceptanceStatus) -> AcceptanceTask {
        AcceptanceTask::new("qa-1", "p1", "Tower A", AcceptanceCategory::Sprinkler, "Pressure test")
            .with_status(status)
    }

    #[test]
    fn unrestricted_policy_allows_any_move() {
        let mut record = task(AcceptanceStatus::Approved);
        record
            .set_status(AcceptanceStatus::Pending, TransitionPolicy::Unrestricted)
            .unwrap();
        assert_eq!(record.status, AcceptanceStatus::Pending);
    }

    #[test]
    fn workflow_policy_follows_the_table() {
        let mut record = task(AcceptanceStatus::Pending);
        record
            .set_status(AcceptanceStatus::InProgress, TransitionPolicy::Workflow)
            .unwrap();
        record
            .set_status(AcceptanceStatus::Approved, TransitionPolicy::Workflow)
            .unwrap();

        let err = record
            .set_status(AcceptanceStatus::InProgress, TransitionPolicy::Workflow)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidTransition {
                from: AcceptanceStatus::Approved,
                to: AcceptanceStatus::InProgress,
            }
        );
        assert_eq!(record.status, AcceptanceStatus::Approved);
    }

    #[test]
    fn workflow_rejects_skipping_inspection() {
        let mut record = task(AcceptanceStatus::Pending);
        assert!(record
            .set_status(AcceptanceStatus::Approved, TransitionPolicy::Workflow)
            .is_err());
    }

    #[test]
    fn status_and_category_wire_names() {
        assert_eq!(
            serde_json::to_string(&AcceptanceStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        let category: AcceptanceCategory =
            serde_json::from_str("\"Pressurization & Smoke Extraction\"").unwrap();
        assert_eq!(category, AcceptanceCategory::SmokeControl);
        assert!(serde_json::from_str::<AcceptanceCategory>("\"Other\"").is_err());
    }

    #[test]
    fn transition_policy_parses_from_config_strings() {
        assert_eq!("workflow".parse::<TransitionPolicy>(), Ok(TransitionPolicy::Workflow));
        assert_eq!("Unrestricted".parse::<TransitionPolicy>(), Ok(TransitionPolicy::Unrestricted));
    }
}
