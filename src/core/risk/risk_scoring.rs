// Risk scoring adapter - turns raw fraud signals into a score and a band.
//
// The ML model behind the signals lives elsewhere. This module only consumes
// its outputs (similarity, velocity, document checks, account velocity) and
// applies a fixed, deterministic weighting. No state, no I/O.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scores above this are `High`.
pub const HIGH_RISK_THRESHOLD: f64 = 7.0;
/// Scores above this (and at most `HIGH_RISK_THRESHOLD`) are `Medium`.
pub const MEDIUM_RISK_THRESHOLD: f64 = 4.0;
/// Upper bound of the nominal score range.
pub const MAX_RISK_SCORE: f64 = 10.0;

// Signal weights. The weighted sum can exceed MAX_RISK_SCORE and is clamped.
const SIMILARITY_WEIGHT: f64 = 4.0;
const VELOCITY_WEIGHT: f64 = 3.0;
const VELOCITY_SATURATION_PER_HOUR: f64 = 20.0;
const RAPID_CAMPAIGN_WEIGHT: f64 = 2.0;
const RAPID_CAMPAIGN_SATURATION: f64 = 5.0;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    #[error("Signal `{signal}` is out of range: {value}")]
    InvalidSignal { signal: &'static str, value: String },
}

// ============================================================================
// MODELS
// ============================================================================

/// Outcome of the document verification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCheck {
    Verified,
    Pending,
    Failed,
}

impl DocumentCheck {
    fn weight(self) -> f64 {
        match self {
            DocumentCheck::Verified => 0.0,
            DocumentCheck::Pending => 1.0,
            DocumentCheck::Failed => 3.0,
        }
    }
}

/// Bag of raw signals about a campaign or an account.
///
/// Every signal is optional; a missing signal contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskSignals {
    /// How closely the story matches existing campaigns, in percent (0-100).
    pub content_similarity_pct: Option<f64>,
    /// Donations per hour observed on the campaign (>= 0).
    pub donation_velocity_per_hour: Option<f64>,
    /// Result of the document verification step.
    pub document_check: Option<DocumentCheck>,
    /// Campaigns created by the same account in the last 24 hours.
    pub campaigns_last_24h: Option<u32>,
}

/// Coarse classification of a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// Classify a score. `(-inf, 4]` is low, `(4, 7]` medium, `(7, +inf)` high.
    pub fn classify(score: f64) -> Self {
        if score > HIGH_RISK_THRESHOLD {
            RiskBand::High
        } else if score > MEDIUM_RISK_THRESHOLD {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    /// Badge text shown in the moderation queue.
    pub fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "Low Risk",
            RiskBand::Medium => "Medium Risk",
            RiskBand::High => "High Risk",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskBand::Low => write!(f, "low"),
            RiskBand::Medium => write!(f, "medium"),
            RiskBand::High => write!(f, "high"),
        }
    }
}

/// Score plus band. Never stored on its own; the score is copied onto the
/// campaign record at intake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: f64,
    pub band: RiskBand,
}

impl RiskAssessment {
    /// Wrap an externally produced score, checking it is a usable number.
    pub fn from_score(score: f64) -> Result<Self, RiskError> {
        if !score.is_finite() || !(0.0..=MAX_RISK_SCORE).contains(&score) {
            return Err(RiskError::InvalidSignal {
                signal: "risk_score",
                value: score.to_string(),
            });
        }
        Ok(Self {
            score,
            band: RiskBand::classify(score),
        })
    }
}

// ============================================================================
// SCORING
// ============================================================================

/// Score a bag of signals.
///
/// Fails if any provided signal is outside its domain. The result is rounded
/// to one decimal so the badge shown to staff matches the stored score.
pub fn score(signals: &RiskSignals) -> Result<RiskAssessment, RiskError> {
    validate(signals)?;

    let mut total = 0.0;

    if let Some(pct) = signals.content_similarity_pct {
        total += pct / 100.0 * SIMILARITY_WEIGHT;
    }

    if let Some(velocity) = signals.donation_velocity_per_hour {
        total += (velocity / VELOCITY_SATURATION_PER_HOUR).min(1.0) * VELOCITY_WEIGHT;
    }

    if let Some(check) = signals.document_check {
        total += check.weight();
    }

    if let Some(count) = signals.campaigns_last_24h {
        // One campaign a day is normal.
        let excess = count.saturating_sub(1) as f64;
        total += (excess / (RAPID_CAMPAIGN_SATURATION - 1.0)).min(1.0) * RAPID_CAMPAIGN_WEIGHT;
    }

    let score = (total.min(MAX_RISK_SCORE) * 10.0).round() / 10.0;

    Ok(RiskAssessment {
        score,
        band: RiskBand::classify(score),
    })
}

fn validate(signals: &RiskSignals) -> Result<(), RiskError> {
    if let Some(pct) = signals.content_similarity_pct {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(RiskError::InvalidSignal {
                signal: "content_similarity_pct",
                value: pct.to_string(),
            });
        }
    }

    if let Some(velocity) = signals.donation_velocity_per_hour {
        if !velocity.is_finite() || velocity < 0.0 {
            return Err(RiskError::InvalidSignal {
                signal: "donation_velocity_per_hour",
                value: velocity.to_string(),
            });
        }
    }

    Ok(())
}
