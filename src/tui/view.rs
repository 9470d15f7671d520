//! Declarative description of what the screen shows.
//!
//! [`compose`] is a pure function of the session state. The renderer in
//! `ui.rs` turns the resulting [`View`] into widgets.

use crate::app::ChatState;
use crate::tui::{
    message::Message,
    session::UiState,
    theme::{ThemeIcon, ThemeMode},
};

pub const APP_TITLE: &str = "CHATBOT";
pub const HEADLINE: &str = "Make your own Chat Application with Ollama and Langchain";
pub const SEARCH_HINT: &str = "Search...";
pub const INPUT_LABEL: &str = "Type your message";
pub const SUBMIT_LABEL: &str = "Submit";
pub const LEADING_ICON: &str = "✨";
pub const SEARCH_ICON: &str = "⌕";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub theme: ThemeMode,
    pub app_bar: AppBar,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppBar {
    pub leading: &'static str,
    pub title: &'static str,
    pub search_icon: &'static str,
    pub theme_icon: ThemeIcon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    SearchBar { hint: &'static str, visible: bool },
    Title(&'static str),
    Form(MessageForm),
    Divider,
    Row(MessageRow),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageForm {
    pub label: &'static str,
    pub value: String,
    pub submit: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAlignment {
    Start,
    End,
}

/// One message line: the label and text in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub alignment: RowAlignment,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Author(String),
    Text(String),
}

impl MessageRow {
    /// Local-user rows read `me: text` on the right; others `text :bot` on the left.
    pub fn from_message(msg: &Message) -> Self {
        let tag = msg.author.tag();
        if msg.author.is_local() {
            Self {
                alignment: RowAlignment::End,
                segments: vec![
                    Segment::Author(format!("{tag}:")),
                    Segment::Text(msg.text.clone()),
                ],
            }
        } else {
            Self {
                alignment: RowAlignment::Start,
                segments: vec![
                    Segment::Text(msg.text.clone()),
                    Segment::Author(format!(":{tag}")),
                ],
            }
        }
    }
}

pub fn compose(chat: &ChatState, ui: &UiState) -> View {
    let mut body = vec![
        Node::SearchBar {
            hint: SEARCH_HINT,
            visible: ui.search_visible,
        },
        Node::Title(HEADLINE),
        Node::Form(MessageForm {
            label: INPUT_LABEL,
            value: ui.draft.clone(),
            submit: SUBMIT_LABEL,
        }),
        Node::Divider,
    ];
    body.extend(
        chat.messages()
            .iter()
            .map(|msg| Node::Row(MessageRow::from_message(msg))),
    );

    View {
        theme: ui.theme_mode,
        app_bar: AppBar {
            leading: LEADING_ICON,
            title: APP_TITLE,
            search_icon: SEARCH_ICON,
            theme_icon: ui.theme_icon,
        },
        body,
    }
}

impl View {
    pub fn rows(&self) -> impl Iterator<Item = &MessageRow> {
        self.body.iter().filter_map(|node| match node {
            Node::Row(row) => Some(row),
            _ => None,
        })
    }
}
