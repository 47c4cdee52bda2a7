//! Submission handler: turns the finished draft into a creation request and
//! resolves where the user lands afterwards.
//!
//! Lifecycle: `Idle -> Pending -> Succeeded(redirect) | Failed(reason)`.
//! Only one submission may be in flight. `begin` while `Pending` (or after a
//! success) is refused, so a double click can never produce two redirects.
//! A failure returns the handler to a state where `begin` is allowed again.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::draft::DraftRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionResult {
    Pending,
    Succeeded(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error("the draft was already submitted")]
    AlreadySubmitted,
    #[error("no submission is pending")]
    NotPending,
    #[error("failed to serialize draft: {0}")]
    Serialize(String),
}

/// Route prefixes used to build the redirect target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routes {
    pub market_route: String,
    pub group_route: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            market_route: "/markets".into(),
            group_route: "/groups".into(),
        }
    }
}

/// Input for the (simulated) creation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRequest {
    pub with_group: bool,
    pub payload: serde_json::Value,
}

/// Identifiers handed back by the creation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedMarket {
    pub market_id: Uuid,
    pub group_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionHandler {
    routes: Routes,
    status: Option<SubmissionResult>,
}

impl SubmissionHandler {
    pub fn new(routes: Routes) -> Self {
        Self {
            routes,
            status: None,
        }
    }

    pub fn status(&self) -> Option<&SubmissionResult> {
        self.status.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, Some(SubmissionResult::Pending))
    }

    /// Serialize the draft and mark the submission as pending.
    pub fn begin(&mut self, draft: &DraftRecord) -> Result<SubmissionRequest, SubmitError> {
        match self.status {
            Some(SubmissionResult::Pending) => return Err(SubmitError::AlreadyInFlight),
            Some(SubmissionResult::Succeeded(_)) => return Err(SubmitError::AlreadySubmitted),
            _ => {}
        }
        let payload =
            serde_json::to_value(draft).map_err(|e| SubmitError::Serialize(e.to_string()))?;
        self.status = Some(SubmissionResult::Pending);
        Ok(SubmissionRequest {
            with_group: draft.creates_group(),
            payload,
        })
    }

    /// Record a successful creation and return the redirect target.
    pub fn succeed(&mut self, created: CreatedMarket) -> Result<String, SubmitError> {
        if !self.is_pending() {
            return Err(SubmitError::NotPending);
        }
        let redirect = self.redirect_for(&created);
        self.status = Some(SubmissionResult::Succeeded(redirect.clone()));
        Ok(redirect)
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), SubmitError> {
        if !self.is_pending() {
            return Err(SubmitError::NotPending);
        }
        self.status = Some(SubmissionResult::Failed(reason.into()));
        Ok(())
    }

    /// Group flows land on the new group (with the market preselected),
    /// plain flows on the market itself.
    pub fn redirect_for(&self, created: &CreatedMarket) -> String {
        match created.group_id {
            Some(group_id) => format!(
                "{}/{}?market={}",
                self.routes.group_route, group_id, created.market_id
            ),
            None => format!("{}/{}", self.routes.market_route, created.market_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::{FieldEdit, MarketType};
    use pretty_assertions::assert_eq;

    fn draft() -> DraftRecord {
        let mut d = DraftRecord::new(false);
        d.apply(FieldEdit::Title("Best Route".into())).unwrap();
        d.apply(FieldEdit::MarketType(MarketType::Poll)).unwrap();
        d
    }

    #[test]
    fn begin_twice_is_refused_while_pending() {
        let mut h = SubmissionHandler::default();
        h.begin(&draft()).unwrap();
        assert_eq!(h.begin(&draft()), Err(SubmitError::AlreadyInFlight));
        assert_eq!(h.status(), Some(&SubmissionResult::Pending));
    }

    #[test]
    fn success_yields_a_single_redirect() {
        let mut h = SubmissionHandler::new(Routes::default());
        h.begin(&draft()).unwrap();
        let market_id = Uuid::new_v4();
        let redirect = h
            .succeed(CreatedMarket {
                market_id,
                group_id: None,
            })
            .unwrap();
        assert_eq!(redirect, format!("/markets/{market_id}"));
        assert_eq!(
            h.succeed(CreatedMarket {
                market_id,
                group_id: None
            }),
            Err(SubmitError::NotPending)
        );
        assert_eq!(h.begin(&draft()), Err(SubmitError::AlreadySubmitted));
    }

    #[test]
    fn group_redirect_still_names_the_market() {
        let h = SubmissionHandler::new(Routes {
            market_route: "/m".into(),
            group_route: "/g".into(),
        });
        let created = CreatedMarket {
            market_id: Uuid::new_v4(),
            group_id: Some(Uuid::new_v4()),
        };
        let redirect = h.redirect_for(&created);
        assert!(redirect.starts_with("/g/"));
        assert!(redirect.contains(&created.market_id.to_string()));
    }

    #[test]
    fn failure_allows_a_retry() {
        let mut h = SubmissionHandler::default();
        h.begin(&draft()).unwrap();
        h.fail("offline").unwrap();
        assert_eq!(h.status(), Some(&SubmissionResult::Failed("offline".into())));
        assert!(h.begin(&draft()).is_ok());
    }

    #[test]
    fn request_carries_serialized_draft() {
        let mut h = SubmissionHandler::default();
        let req = h.begin(&draft()).unwrap();
        assert!(!req.with_group);
        assert_eq!(req.payload["title"], "Best Route");
        assert_eq!(req.payload["market_type"], "poll");
        assert_eq!(req.payload["payload"]["kind"], "poll");
    }
}
