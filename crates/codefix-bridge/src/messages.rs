//! The panel wire protocol: one discriminated enum per direction,
//! dispatched on the `type` tag.
//!
//! The host and the UI surface only ever talk through these two channels;
//! there is no shared state between them.

use serde::{Deserialize, Serialize};

/// Messages the UI surface sends to the editor host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UiMessage {
    /// The surface finished loading and wants the initial snapshot.
    WebviewReady,
    /// Replace the target document's full text with `code`.
    ApplyFix { code: String },
    /// Dispose the surface.
    ClosePanel,
}

/// Messages the editor host sends to the UI surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    /// Snapshot delivery in reply to `webviewReady`.
    InitialCode { code: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ui_messages_carry_their_wire_tags() {
        assert_eq!(
            serde_json::to_value(UiMessage::WebviewReady).unwrap(),
            json!({"type": "webviewReady"})
        );
        assert_eq!(
            serde_json::to_value(UiMessage::ApplyFix {
                code: "x = 1".to_string()
            })
            .unwrap(),
            json!({"type": "applyFix", "code": "x = 1"})
        );
        assert_eq!(
            serde_json::to_value(UiMessage::ClosePanel).unwrap(),
            json!({"type": "closePanel"})
        );
    }

    #[test]
    fn host_messages_round_trip() {
        let wire = json!({"type": "initialCode", "code": "x=1"});
        let msg: HostMessage = serde_json::from_value(wire).unwrap();
        assert_eq!(
            msg,
            HostMessage::InitialCode {
                code: "x=1".to_string()
            }
        );
    }
}
