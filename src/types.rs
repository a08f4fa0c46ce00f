//! Type-safe funnel stage definitions
//!
//! The four engagement stages are fixed for the life of the process. Using an
//! enum instead of free-form labels keeps sidebar order, CSV file names and
//! display labels in one place.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// A stage of the engagement funnel, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, EnumCount)]
#[strum(ascii_case_insensitive)]
pub enum FunnelStage {
    #[serde(rename = "Download Brochure")]
    #[strum(to_string = "Download Brochure", serialize = "download-brochure")]
    DownloadBrochure,
    #[serde(rename = "Signed Up For Preview")]
    #[strum(to_string = "Signed Up For Preview", serialize = "signed-up-for-preview")]
    SignedUpForPreview,
    #[serde(rename = "Attended Preview")]
    #[strum(to_string = "Attended Preview", serialize = "attended-preview")]
    AttendedPreview,
    #[serde(rename = "Gave Feedback")]
    #[strum(to_string = "Gave Feedback", serialize = "gave-feedback")]
    GaveFeedback,
}

impl FunnelStage {
    /// All stages in sidebar order
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Position of this stage in the sidebar (0-indexed)
    pub fn index(&self) -> usize {
        match self {
            Self::DownloadBrochure => 0,
            Self::SignedUpForPreview => 1,
            Self::AttendedPreview => 2,
            Self::GaveFeedback => 3,
        }
    }

    /// Stage at the given sidebar position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// CSV file the stage is loaded from when no config overrides it
    pub fn default_file(&self) -> &'static str {
        match self {
            Self::DownloadBrochure => "Download_Brochure.csv",
            Self::SignedUpForPreview => "Signed_Up_Preview.csv",
            Self::AttendedPreview => "Attended_Preview.csv",
            Self::GaveFeedback => "Gave_Feedback.csv",
        }
    }

    /// Checkbox tooltip text
    pub fn help(&self) -> &'static str {
        match self {
            Self::DownloadBrochure => "Users who downloaded the brochure",
            Self::SignedUpForPreview => "Users who signed up for a preview",
            Self::AttendedPreview => "Users who attended the preview",
            Self::GaveFeedback => "Users who gave feedback",
        }
    }
}

/// Names of the identity and display columns shared by every stage table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFields {
    /// Column that identifies a person across stages
    pub identity: String,
    /// Column shown next to the identity
    pub display: String,
}

impl Default for KeyFields {
    fn default() -> Self {
        Self {
            identity: "Email".to_string(),
            display: "Name".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::EnumCount;

    #[test]
    fn test_stage_labels() {
        assert_eq!(FunnelStage::DownloadBrochure.to_string(), "Download Brochure");
        assert_eq!(FunnelStage::SignedUpForPreview.to_string(), "Signed Up For Preview");
        assert_eq!(FunnelStage::AttendedPreview.to_string(), "Attended Preview");
        assert_eq!(FunnelStage::GaveFeedback.to_string(), "Gave Feedback");
    }

    #[test]
    fn test_stage_parse_label_and_slug() {
        assert_eq!(
            FunnelStage::from_str("Attended Preview").unwrap(),
            FunnelStage::AttendedPreview
        );
        assert_eq!(
            FunnelStage::from_str("gave-feedback").unwrap(),
            FunnelStage::GaveFeedback
        );
        assert_eq!(
            FunnelStage::from_str("download brochure").unwrap(),
            FunnelStage::DownloadBrochure
        );
        assert!(FunnelStage::from_str("Bought Ticket").is_err());
    }

    #[test]
    fn test_stage_index_matches_iteration_order() {
        assert_eq!(FunnelStage::COUNT, 4);
        for (i, stage) in FunnelStage::iter().enumerate() {
            assert_eq!(stage.index(), i);
            assert_eq!(FunnelStage::from_index(i), Some(stage));
        }
        assert_eq!(FunnelStage::from_index(4), None);
    }

    #[test]
    fn test_stage_serde_uses_label() {
        let json = serde_json::to_string(&FunnelStage::SignedUpForPreview).unwrap();
        assert_eq!(json, "\"Signed Up For Preview\"");
    }

    #[test]
    fn test_default_key_fields() {
        let keys = KeyFields::default();
        assert_eq!(keys.identity, "Email");
        assert_eq!(keys.display, "Name");
    }
}
