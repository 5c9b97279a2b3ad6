use std::{fmt, str::FromStr};

use alloy_primitives::{Address, TxHash, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FailureReason, UnknownDraftField};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ArtistId);

/// The connected wallet account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
}

impl Account {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Checksummed prefix used by compact "connected" indicators, e.g. `0xAbCd...`.
    pub fn short_label(&self) -> String {
        let full = self.address.to_string();
        format!("{}...", &full[..6])
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Title,
    Description,
    ReferenceUrl,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [Self::Title, Self::Description, Self::ReferenceUrl];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::ReferenceUrl => "reference_url",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = UnknownDraftField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "reference_url" | "referenceUrl" | "reference" => Ok(Self::ReferenceUrl),
            other => Err(UnknownDraftField(other.to_string())),
        }
    }
}

/// In-progress commission input, edited freely and validated only at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_artist: Option<ArtistId>,
    pub title: String,
    pub description: String,
    pub reference_url: String,
}

impl CommissionDraft {
    pub fn for_artist(artist: ArtistId) -> Self {
        Self {
            target_artist: Some(artist),
            ..Self::default()
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Description => &self.description,
            DraftField::ReferenceUrl => &self.reference_url,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Title => self.title = value,
            DraftField::Description => self.description = value,
            DraftField::ReferenceUrl => self.reference_url = value,
        }
    }

    /// Clears the text fields; the target artist is kept.
    pub fn clear_fields(&mut self) {
        self.title.clear();
        self.description.clear();
        self.reference_url.clear();
    }

    pub fn has_input(&self) -> bool {
        DraftField::ALL.iter().any(|f| !self.field(*f).is_empty())
    }
}

/// Payload handed to the contract call, derived from a validated draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRequest {
    pub title: String,
    pub description: String,
    pub reference_url: String,
    pub attached_value: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub tx_hash: TxHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<u64>,
    pub confirmed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded(Receipt),
    Failed(FailureReason),
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}
