use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// One wire message. The relay echoes whatever it receives verbatim to every
/// other peer, so client-to-server and server-to-client payloads share a
/// single shape. Binary frames use the bincode derives; the serde tag only
/// shapes the JSON form.
#[derive(Serialize, Deserialize, Encode, Decode, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum WireMessage {
    /// A segment of a freehand stroke, ending at (x, y). Each event is
    /// self-contained (position + color + width), so dropped or reordered
    /// events degrade the picture without corrupting state.
    #[serde(rename = "draw")]
    Draw {
        x: f32,
        y: f32,
        color: String,
        #[serde(rename = "lineWidth")]
        line_width: f32,
    },
    /// Chat-style broadcast; relayed but not interpreted by the board.
    #[serde(rename = "guess")]
    Guess { text: String },
}

impl WireMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            WireMessage::Draw { .. } => "draw",
            WireMessage::Guess { .. } => "guess",
        }
    }
}

pub fn encode_message(message: &WireMessage) -> Option<Vec<u8>> {
    bincode::encode_to_vec(message, bincode::config::standard()).ok()
}

pub fn decode_message(payload: &[u8]) -> Option<WireMessage> {
    bincode::decode_from_slice(payload, bincode::config::standard())
        .ok()
        .map(|(message, _)| message)
}
