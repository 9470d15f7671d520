use crate::tui::{Author, Message};

const GREETING: &str = "Hello";
const REPLY: &str = "Hello, how can I help you?";

/// The conversation owned by a single session. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    messages: Vec<Message>,
}

impl ChatState {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// The demo conversation every session starts with
    pub fn seeded() -> Self {
        Self::new(vec![
            Message::me(GREETING),
            Message::bot(REPLY),
            Message::me(GREETING),
            Message::bot(REPLY),
        ])
    }

    pub fn append(&mut self, author: Author, text: impl Into<String>) {
        self.messages.push(Message::new(author, text));
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_conversation() {
        let chat = ChatState::seeded();
        assert_eq!(
            chat.messages(),
            &[
                Message::me("Hello"),
                Message::bot("Hello, how can I help you?"),
                Message::me("Hello"),
                Message::bot("Hello, how can I help you?"),
            ]
        );
    }

    #[test]
    fn test_append_keeps_order() {
        let mut chat = ChatState::default();
        assert_eq!(chat.len(), 0);

        for text in ["one", "two", "three"] {
            chat.append(Author::Me, text);
        }
        chat.append(Author::Bot, "four");

        let texts: Vec<&str> = chat.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three", "four"]);
        assert_eq!(chat.messages()[3].author, Author::Bot);
        assert_eq!(chat.len(), 4);
    }
}
