//! Inbound events, decoded once from a core [`Update`].

use dbot_core::Update;
use prompt::Length;

pub const STYLE_PREFIX: &str = "style:";
pub const LENGTH_PREFIX: &str = "length:";

/// What the user did, independent of transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Text starting with `http`.
    Link(String),
    /// Any other message, including non-text ones.
    Text(String),
    /// Style button; the id is checked against the catalog by the conversation.
    StyleChosen(String),
    LengthChosen(Length),
    /// Callback payload that matches no known choice.
    UnknownChoice(String),
}

impl Event {
    pub fn decode(update: &Update) -> Self {
        match update {
            Update::Message(m) => {
                let text = m.content.trim();
                if text.starts_with("http") {
                    Event::Link(text.to_string())
                } else {
                    Event::Text(text.to_string())
                }
            }
            Update::Callback(c) => decode_choice(&c.data),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Link(_) => "link",
            Event::Text(_) => "text",
            Event::StyleChosen(_) => "style_chosen",
            Event::LengthChosen(_) => "length_chosen",
            Event::UnknownChoice(_) => "unknown_choice",
        }
    }
}

fn decode_choice(data: &str) -> Event {
    if let Some(id) = data.strip_prefix(STYLE_PREFIX) {
        if !id.is_empty() {
            return Event::StyleChosen(id.to_string());
        }
    } else if let Some(id) = data.strip_prefix(LENGTH_PREFIX) {
        if let Ok(length) = id.parse::<Length>() {
            return Event::LengthChosen(length);
        }
    }
    Event::UnknownChoice(data.to_string())
}

/// Callback payload of a style button.
pub fn style_payload(style_id: &str) -> String {
    format!("{}{}", STYLE_PREFIX, style_id)
}

/// Callback payload of a length button.
pub fn length_payload(length: Length) -> String {
    format!("{}{}", LENGTH_PREFIX, length.id())
}
