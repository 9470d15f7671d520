use serde::{Deserialize, Serialize};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    #[serde(rename = "me")]
    Me,
    #[serde(rename = "bot")]
    Bot,
}

impl Author {
    /// The tag shown next to the message text
    pub fn tag(&self) -> &'static str {
        match self {
            Author::Me => "me",
            Author::Bot => "bot",
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Author::Me)
    }
}

/// A single chat message. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub author: Author,
    pub text: String,
}

impl Message {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
        }
    }

    /// Create a message from the local user
    pub fn me(text: impl Into<String>) -> Self {
        Self::new(Author::Me, text)
    }

    /// Create a message from the counterpart
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Author::Bot, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_tags() {
        assert_eq!(Author::Me.tag(), "me");
        assert_eq!(Author::Bot.tag(), "bot");
        assert!(Author::Me.is_local());
        assert!(!Author::Bot.is_local());
    }

    #[test]
    fn test_message_serializes_author_tag() -> anyhow::Result<()> {
        let json = serde_json::to_string(&Message::bot("Hi"))?;
        assert_eq!(json, r#"{"author":"bot","text":"Hi"}"#);

        let parsed: Message = serde_json::from_str(r#"{"author":"me","text":"yo"}"#)?;
        assert_eq!(parsed, Message::me("yo"));
        Ok(())
    }
}
