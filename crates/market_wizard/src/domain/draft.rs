//! Draft record assembled across the wizard steps (the form field store).
//!
//! The draft is created empty when the wizard is mounted and mutated one
//! field at a time through [`FieldEdit`]. It is never persisted; submission
//! serializes it into the creation payload and the wizard drops it
//! afterwards.
//!
//! Invariant: the shape of [`TypePayload`] always follows the selected
//! [`MarketType`]:
//!   * poll     -> list of answer options
//!   * ladder   -> ranked item list
//!   * reflex   -> trigger scenario string
//!   * betrayal -> no extra payload
//!
//! Selecting a market type resets the payload to that type's default shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Minimum number of entries a poll or ladder keeps.
pub const MIN_ENTRIES: usize = 2;

/// Closed set of market types offered on the "Market Type" step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarketType {
    Poll,
    Betrayal,
    Reflex,
    Ladder,
}

impl MarketType {
    pub fn label(&self) -> &'static str {
        match self {
            MarketType::Poll => "Poll",
            MarketType::Betrayal => "Betrayal",
            MarketType::Reflex => "Reflex",
            MarketType::Ladder => "Ladder",
        }
    }

    /// Default payload for a freshly selected type.
    pub fn default_payload(&self) -> TypePayload {
        match self {
            MarketType::Poll => TypePayload::Poll {
                options: vec![String::new(); MIN_ENTRIES],
            },
            MarketType::Ladder => TypePayload::Ladder {
                items: vec![String::new(); MIN_ENTRIES],
            },
            MarketType::Reflex => TypePayload::Reflex {
                trigger: String::new(),
            },
            MarketType::Betrayal => TypePayload::None,
        }
    }
}

/// Type-specific part of the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypePayload {
    #[default]
    None,
    Poll {
        options: Vec<String>,
    },
    Ladder {
        items: Vec<String>,
    },
    Reflex {
        trigger: String,
    },
}

impl TypePayload {
    fn entries_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            TypePayload::Poll { options } => Some(options),
            TypePayload::Ladder { items } => Some(items),
            _ => None,
        }
    }

    /// Poll options or ladder items, if this payload carries a list.
    pub fn entries(&self) -> Option<&[String]> {
        match self {
            TypePayload::Poll { options } => Some(options),
            TypePayload::Ladder { items } => Some(items),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Who the market is offered to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "lowercase")]
pub enum Audience {
    #[default]
    Everyone,
    Friends,
    /// An existing group, referenced by fixture id.
    Group(String),
}

/// Group identity fields, present only when the group step is part of the flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDraft {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub group: Option<GroupDraft>,
    pub title: String,
    pub description: String,
    pub market_type: Option<MarketType>,
    pub category: String,
    pub audience: Audience,
    pub image: Option<String>,
    /// Buy-in as typed by the user; parsed on validation.
    pub buy_in: String,
    pub ends_at: Option<DateTime<Utc>>,
    pub payload: TypePayload,
}

/// A single input event against the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldEdit {
    GroupName(String),
    GroupDescription(String),
    GroupVisibility(Visibility),
    Title(String),
    Description(String),
    MarketType(MarketType),
    Category(String),
    Audience(Audience),
    Image(Option<String>),
    BuyIn(String),
    EndsAt(Option<DateTime<Utc>>),
    Trigger(String),
    SetEntry { index: usize, text: String },
    AddEntry,
    RemoveEntry(usize),
    MoveEntry { from: usize, to: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("this flow does not create a group")]
    NoGroup,
    #[error("field does not apply to the selected market type")]
    PayloadMismatch,
    #[error("entry {0} does not exist")]
    IndexOutOfRange(usize),
    #[error("a poll or ladder needs at least two entries")]
    MinimumEntries,
}

impl DraftRecord {
    /// Empty draft; carries an empty group section when the flow creates a group.
    pub fn new(with_group: bool) -> Self {
        Self {
            group: with_group.then(GroupDraft::default),
            ..Default::default()
        }
    }

    pub fn creates_group(&self) -> bool {
        self.group.is_some()
    }

    /// Parsed buy-in amount, if the raw text is a finite number.
    pub fn buy_in_amount(&self) -> Option<f64> {
        self.buy_in
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    pub fn apply(&mut self, edit: FieldEdit) -> Result<(), DraftError> {
        match edit {
            FieldEdit::GroupName(v) => self.group_mut()?.name = v,
            FieldEdit::GroupDescription(v) => self.group_mut()?.description = v,
            FieldEdit::GroupVisibility(v) => self.group_mut()?.visibility = v,
            FieldEdit::Title(v) => self.title = v,
            FieldEdit::Description(v) => self.description = v,
            FieldEdit::MarketType(t) => {
                if self.market_type != Some(t) {
                    self.market_type = Some(t);
                    self.payload = t.default_payload();
                }
            }
            FieldEdit::Category(v) => self.category = v,
            FieldEdit::Audience(v) => self.audience = v,
            FieldEdit::Image(v) => self.image = v,
            FieldEdit::BuyIn(v) => self.buy_in = v,
            FieldEdit::EndsAt(v) => self.ends_at = v,
            FieldEdit::Trigger(v) => match &mut self.payload {
                TypePayload::Reflex { trigger } => *trigger = v,
                _ => return Err(DraftError::PayloadMismatch),
            },
            FieldEdit::SetEntry { index, text } => {
                let entries = self.entries_mut()?;
                let slot = entries
                    .get_mut(index)
                    .ok_or(DraftError::IndexOutOfRange(index))?;
                *slot = text;
            }
            FieldEdit::AddEntry => self.entries_mut()?.push(String::new()),
            FieldEdit::RemoveEntry(index) => {
                let entries = self.entries_mut()?;
                if index >= entries.len() {
                    return Err(DraftError::IndexOutOfRange(index));
                }
                if entries.len() <= MIN_ENTRIES {
                    return Err(DraftError::MinimumEntries);
                }
                entries.remove(index);
            }
            FieldEdit::MoveEntry { from, to } => {
                let entries = self.entries_mut()?;
                let len = entries.len();
                if from >= len {
                    return Err(DraftError::IndexOutOfRange(from));
                }
                if to >= len {
                    return Err(DraftError::IndexOutOfRange(to));
                }
                let item = entries.remove(from);
                entries.insert(to, item);
            }
        }
        Ok(())
    }

    /// Human-readable lines for the review step.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(group) = &self.group {
            lines.push(format!("Group: {} ({})", group.name, group.visibility));
        }
        lines.push(format!("Title: {}", self.title));
        let kind = self.market_type.map(|t| t.label()).unwrap_or("-");
        lines.push(format!("Type: {kind}"));
        if !self.category.is_empty() {
            lines.push(format!("Category: {}", self.category));
        }
        lines.push(format!("Buy-in: {}", self.buy_in));
        if let Some(ends_at) = self.ends_at {
            lines.push(format!("Ends: {}", ends_at.format("%Y-%m-%d %H:%M UTC")));
        }
        match &self.payload {
            TypePayload::Poll { options } => {
                lines.push(format!("Options: {}", options.join(", ")));
            }
            TypePayload::Ladder { items } => {
                for (rank, item) in items.iter().enumerate() {
                    lines.push(format!("#{} {}", rank + 1, item));
                }
            }
            TypePayload::Reflex { trigger } => lines.push(format!("Trigger: {trigger}")),
            TypePayload::None => {}
        }
        lines
    }

    fn group_mut(&mut self) -> Result<&mut GroupDraft, DraftError> {
        self.group.as_mut().ok_or(DraftError::NoGroup)
    }

    fn entries_mut(&mut self) -> Result<&mut Vec<String>, DraftError> {
        self.payload
            .entries_mut()
            .ok_or(DraftError::PayloadMismatch)
    }
}
