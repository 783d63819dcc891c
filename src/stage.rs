//! Transfer stage labels and provider roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of data flowing through a provider stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStage {
    Entities,
    Links,
    Configuration,
    Schemas,
}

impl TransferStage {
    /// All stages, in transfer order.
    pub const ALL: [TransferStage; 4] = [
        TransferStage::Entities,
        TransferStage::Links,
        TransferStage::Configuration,
        TransferStage::Schemas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStage::Entities => "entities",
            TransferStage::Links => "links",
            TransferStage::Configuration => "configuration",
            TransferStage::Schemas => "schemas",
        }
    }
}

impl fmt::Display for TransferStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a transfer a provider sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Source,
    Destination,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::Source => write!(f, "source"),
            ProviderType::Destination => write!(f, "destination"),
        }
    }
}
