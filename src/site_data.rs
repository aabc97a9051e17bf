/// Data structures for Tread Lightly
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MESSAGE;

/// Where the warning banner is placed on the page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SiteStyle {
    #[default]
    Inline,
    PopupLeft,
    PopupRight,
}

impl SiteStyle {
    pub const ALL: [SiteStyle; 3] = [SiteStyle::Inline, SiteStyle::PopupLeft, SiteStyle::PopupRight];

    /// CSS class applied to the banner element
    pub fn class_name(self) -> &'static str {
        match self {
            SiteStyle::Inline => "tc-inline",
            SiteStyle::PopupLeft => "tc-popup-left",
            SiteStyle::PopupRight => "tc-popup-right",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SiteStyle::Inline => "Inline",
            SiteStyle::PopupLeft => "Popup (left)",
            SiteStyle::PopupRight => "Popup (right)",
        }
    }
}

/// Presentation settings for a marked domain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteOptions {
    pub style: SiteStyle,
    pub message: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        SiteOptions {
            style: SiteStyle::default(),
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

/// Persisted preference for a single domain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteRecord {
    pub url: String,
    pub enabled: bool,
    pub options: SiteOptions,
}

impl SiteRecord {
    pub fn new(url: String, enabled: bool, options: SiteOptions) -> SiteRecord {
        SiteRecord { url, enabled, options }
    }

    /// Fresh disabled record for a domain that has never been configured.
    /// Every call builds a new value.
    pub fn default_for(identity: &str) -> SiteRecord {
        SiteRecord::new(identity.to_string(), false, SiteOptions::default())
    }
}
