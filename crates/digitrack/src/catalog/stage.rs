use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Position of a work in the digitization pipeline.
///
/// Labels outside the known pipeline are kept verbatim in `Custom` so that
/// whatever a file name or spreadsheet says is not lost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Stage {
    #[default]
    Pending,
    Scanning,
    ScanningQc,
    PdfPages,
    PdfQc,
    Uploading,
    Completed,
    Custom(String),
}

impl Stage {
    /// The linear pipeline, in order.
    pub const PIPELINE: [Stage; 7] = [
        Stage::Pending,
        Stage::Scanning,
        Stage::ScanningQc,
        Stage::PdfPages,
        Stage::PdfQc,
        Stage::Uploading,
        Stage::Completed,
    ];

    /// Parses a stage label, case-insensitively and ignoring spaces,
    /// hyphens and underscores. Returns `None` for a blank label.
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }

        let folded: String = trimmed
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        let stage = match folded.as_str() {
            "pending" => Stage::Pending,
            "scanning" => Stage::Scanning,
            "scanningqc" => Stage::ScanningQc,
            "pdfpages" => Stage::PdfPages,
            "pdfqc" => Stage::PdfQc,
            "uploading" | "pdfuploading" => Stage::Uploading,
            "completed" => Stage::Completed,
            _ => Stage::Custom(trimmed.to_string()),
        };
        Some(stage)
    }

    pub fn label(&self) -> &str {
        match self {
            Stage::Pending => "Pending",
            Stage::Scanning => "Scanning",
            Stage::ScanningQc => "Scanning-QC",
            Stage::PdfPages => "PDF Pages",
            Stage::PdfQc => "PDF-QC",
            Stage::Uploading => "Uploading",
            Stage::Completed => "Completed",
            Stage::Custom(label) => label,
        }
    }

    /// Index in the pipeline; `None` for custom stages.
    pub fn position(&self) -> Option<usize> {
        Self::PIPELINE.iter().position(|s| s == self)
    }

    /// The stage that follows this one. `None` once completed, and for
    /// custom stages, which have no place in the pipeline.
    pub fn next(&self) -> Option<Stage> {
        self.position()
            .and_then(|idx| Self::PIPELINE.get(idx + 1))
            .cloned()
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Stage::Custom(_))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::from_label(s)
            .ok_or_else(|| CatalogError::Validation("Stage label is empty".to_string()))
    }
}

impl From<Stage> for String {
    fn from(stage: Stage) -> Self {
        stage.label().to_string()
    }
}

impl From<String> for Stage {
    fn from(label: String) -> Self {
        Stage::from_label(&label).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_labels_round_trip() {
        for stage in Stage::PIPELINE {
            assert_eq!(Stage::from_label(stage.label()), Some(stage.clone()));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Stage::from_label("Scanning Q-C"), Some(Stage::ScanningQc));
        assert_eq!(Stage::from_label("scanning_qc"), Some(Stage::ScanningQc));
        assert_eq!(Stage::from_label("PDF Q-C"), Some(Stage::PdfQc));
        assert_eq!(Stage::from_label("PDF Uploading"), Some(Stage::Uploading));
        assert_eq!(Stage::from_label("COMPLETED"), Some(Stage::Completed));
    }

    #[test]
    fn test_unknown_label_is_custom() {
        assert_eq!(
            Stage::from_label(" org "),
            Some(Stage::Custom("org".to_string()))
        );
    }

    #[test]
    fn test_default_and_unparseable_stored_label() {
        assert_eq!(Stage::default(), Stage::Pending);
        assert_eq!(Stage::from(String::from("  ")), Stage::Pending);
    }

    #[test]
    fn test_blank_label_is_none() {
        assert_eq!(Stage::from_label("   "), None);
        assert!("".parse::<Stage>().is_err());
    }

    #[test]
    fn test_next_walks_pipeline() {
        assert_eq!(Stage::Pending.next(), Some(Stage::Scanning));
        assert_eq!(Stage::PdfQc.next(), Some(Stage::Uploading));
        assert_eq!(Stage::Completed.next(), None);
        assert_eq!(Stage::Custom("org".to_string()).next(), None);
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Stage::PdfPages).unwrap();
        assert_eq!(json, "\"PDF Pages\"");
        let back: Stage = serde_json::from_str("\"pdf-qc\"").unwrap();
        assert_eq!(back, Stage::PdfQc);
    }
}
