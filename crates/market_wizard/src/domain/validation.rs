//! Validation gate per wizard step.
//!
//! Failures never escape as errors from the wizard: the reducer turns them
//! into an error notification and leaves the cursor where it is.
//!
//! The configuration step has no blocking rule. Empty poll options or ladder
//! items pass; this mirrors the current product behaviour and is tracked as
//! an open question in DESIGN.md.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::draft::DraftRecord;
use crate::domain::steps::StepId;

/// How strict the "Basic Info" step is.
///
/// `Lenient` is used when the market is created together with a group,
/// `Standalone` by the dedicated market creation page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    #[default]
    Lenient,
    Standalone,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a group name")]
    MissingGroupName,
    #[error("Please select a market type")]
    MissingMarketType,
    #[error("Please enter a title")]
    MissingTitle,
    #[error("Please enter a description")]
    MissingDescription,
    #[error("Buy-in must be a positive amount")]
    InvalidBuyIn,
}

pub fn check(step: StepId, draft: &DraftRecord, strictness: Strictness) -> Result<(), ValidationError> {
    match step {
        StepId::GroupInfo => {
            let named = draft
                .group
                .as_ref()
                .is_some_and(|g| !g.name.trim().is_empty());
            if !named {
                return Err(ValidationError::MissingGroupName);
            }
        }
        StepId::MarketType => {
            if draft.market_type.is_none() {
                return Err(ValidationError::MissingMarketType);
            }
        }
        StepId::BasicInfo => {
            if draft.title.trim().is_empty() {
                return Err(ValidationError::MissingTitle);
            }
            if strictness == Strictness::Standalone {
                if draft.description.trim().is_empty() {
                    return Err(ValidationError::MissingDescription);
                }
                if !draft.buy_in_amount().is_some_and(|v| v > 0.0) {
                    return Err(ValidationError::InvalidBuyIn);
                }
            }
        }
        StepId::Configuration | StepId::Review => {}
    }
    Ok(())
}

pub fn can_advance(step: StepId, draft: &DraftRecord, strictness: Strictness) -> bool {
    check(step, draft, strictness).is_ok()
}
