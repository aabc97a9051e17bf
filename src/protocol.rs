/// Messages and collaborator seams between the control surface and the page agent

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MessagingError;
use crate::site_data::SiteOptions;

/// Command sent from the control surface to the page agent of one tab.
///
/// Delivery is fire-and-forget: nothing is acknowledged and nothing is
/// retried. A page that misses a command catches up from storage on its
/// next load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum Command {
    ToggleWarning { enabled: bool, options: SiteOptions },
    ChangeStyle { options: SiteOptions },
    ChangeMessage { msg: String },
}

/// Presents the banner on the page
pub trait Renderer {
    fn show(&mut self, options: &SiteOptions);
    fn hide(&mut self);
    fn set_message(&mut self, text: &str);

    /// False once the banner is gone, including when the user dismissed it
    fn is_showing(&self) -> bool;
}

/// The browser tab the control surface was opened for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveTab {
    pub id: i32,
    #[serde(default)]
    pub url: Option<String>,
}

/// Tab discovery and per-tab message delivery
#[async_trait(?Send)]
pub trait TabMessenger {
    async fn active_tab(&self) -> Result<ActiveTab, MessagingError>;

    async fn send(&self, tab_id: i32, command: &Command) -> Result<(), MessagingError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site_data::SiteStyle;
    use serde_json::json;

    #[test]
    fn test_toggle_wire_format() {
        let command = Command::ToggleWarning {
            enabled: true,
            options: SiteOptions {
                style: SiteStyle::Inline,
                message: "careful".to_string(),
            },
        };

        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            json!({
                "name": "toggle-warning",
                "enabled": true,
                "options": { "style": "inline", "message": "careful" }
            })
        );
    }

    #[test]
    fn test_change_style_and_message_wire_format() {
        let style: Command = serde_json::from_value(json!({
            "name": "change-style",
            "options": { "style": "popupLeft", "message": "m" }
        }))
        .unwrap();
        let message: Command =
            serde_json::from_value(json!({ "name": "change-message", "msg": "hello" })).unwrap();

        assert_eq!(
            style,
            Command::ChangeStyle {
                options: SiteOptions {
                    style: SiteStyle::PopupLeft,
                    message: "m".to_string()
                }
            }
        );
        assert_eq!(message, Command::ChangeMessage { msg: "hello".to_string() });
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        let result: Result<Command, _> = serde_json::from_value(json!({ "enabled": true }));
        assert!(result.is_err());
    }

    #[test]
    fn test_active_tab_ignores_extra_fields() {
        let tab: ActiveTab = serde_json::from_value(json!({
            "id": 7,
            "url": "https://prod.com",
            "title": "Prod",
            "pinned": false,
            "index": 2
        }))
        .unwrap();

        assert_eq!(tab.id, 7);
        assert_eq!(tab.url.as_deref(), Some("https://prod.com"));
    }
}
