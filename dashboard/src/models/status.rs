//! Deployment status and its presentation table

use std::fmt;

use serde::{Deserialize, Serialize};

/// Helm release status as shown on a card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStatus {
    Deployed = 0,
    Deleted = 1,
    Superseded = 2,
    Failed = 3,
    Deleting = 4,
    PendingInstall = 5,
    PendingUpgrade = 6,
    PendingRollback = 7,
    #[default]
    Unknown = 8,
}

/// Icon kind a renderer should draw for a status chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusIcon {
    Done,
    Clear,
    Pending,
    Info,
}

/// Color kind a renderer should use for a status chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Success,
    Danger,
    Neutral,
}

/// Label, icon and color of a status chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPresentation {
    pub label: &'static str,
    pub icon: StatusIcon,
    pub color: StatusColor,
}

const fn chip(label: &'static str, icon: StatusIcon, color: StatusColor) -> StatusPresentation {
    StatusPresentation { label, icon, color }
}

/// Indexed by the `DeploymentStatus` discriminant
static PRESENTATION: [StatusPresentation; 9] = [
    chip("Deployed", StatusIcon::Done, StatusColor::Success),
    chip("Deleted", StatusIcon::Clear, StatusColor::Danger),
    chip("Superseded", StatusIcon::Done, StatusColor::Success),
    chip("Failed", StatusIcon::Clear, StatusColor::Danger),
    chip("Deleting", StatusIcon::Pending, StatusColor::Danger),
    chip("Deploying", StatusIcon::Pending, StatusColor::Success),
    chip("Upgrading", StatusIcon::Pending, StatusColor::Success),
    chip("Rolling Back", StatusIcon::Pending, StatusColor::Danger),
    chip("Unknown", StatusIcon::Info, StatusColor::Neutral),
];

/// Indexed by the `DeploymentStatus` discriminant
static WIRE_NAMES: [&str; 9] = [
    "deployed",
    "deleted",
    "superseded",
    "failed",
    "deleting",
    "pending_install",
    "pending_upgrade",
    "pending_rollback",
    "unknown",
];

impl DeploymentStatus {
    pub const ALL: [DeploymentStatus; 9] = [
        DeploymentStatus::Deployed,
        DeploymentStatus::Deleted,
        DeploymentStatus::Superseded,
        DeploymentStatus::Failed,
        DeploymentStatus::Deleting,
        DeploymentStatus::PendingInstall,
        DeploymentStatus::PendingUpgrade,
        DeploymentStatus::PendingRollback,
        DeploymentStatus::Unknown,
    ];

    /// Resolve a raw wire value; anything unrecognized is `Unknown`.
    ///
    /// Case-insensitive, and `-` or spaces are accepted in place of `_`.
    pub fn from_wire(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .unwrap_or(DeploymentStatus::Unknown)
    }

    /// Lower snake case name, e.g. `pending_install`
    pub fn as_str(&self) -> &'static str {
        WIRE_NAMES[*self as usize]
    }

    pub fn presentation(&self) -> StatusPresentation {
        PRESENTATION[*self as usize]
    }

    pub fn label(&self) -> &'static str {
        self.presentation().label
    }

    /// True while helm is still working on the release
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            DeploymentStatus::Deleting
                | DeploymentStatus::PendingInstall
                | DeploymentStatus::PendingUpgrade
                | DeploymentStatus::PendingRollback
        )
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
