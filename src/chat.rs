// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::PortfolioApi;
use crate::markup::Node;
use crate::models::{ChatMessage, ChatRequest, Sender};
use std::fmt;
use tracing::{debug, error};

pub const CHAT_ERROR_MESSAGE: &str = "Sorry, I couldn't reach the assistant. Please try again.";
pub const DEFAULT_TOP_K_SOURCES: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input: nothing appended, nothing sent.
    Ignored,
    Replied,
    Failed,
}

type Observer = Box<dyn FnMut(&ChatWidget)>;

/// Floating chat panel with an append-only transcript.
pub struct ChatWidget {
    open: bool,
    waiting: bool,
    top_k_sources: u32,
    transcript: Vec<ChatMessage>,
    observer: Option<Observer>,
}

impl fmt::Debug for ChatWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatWidget")
            .field("open", &self.open)
            .field("waiting", &self.waiting)
            .field("top_k_sources", &self.top_k_sources)
            .field("transcript", &self.transcript)
            .finish_non_exhaustive()
    }
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K_SOURCES)
    }
}

impl ChatWidget {
    pub fn new(top_k_sources: u32) -> Self {
        Self {
            open: false,
            waiting: false,
            top_k_sources,
            transcript: Vec::new(),
            observer: None,
        }
    }

    /// Called whenever the waiting indicator is raised or lowered.
    pub fn with_observer(mut self, f: impl FnMut(&ChatWidget) + 'static) -> Self {
        self.observer = Some(Box::new(f));
        self
    }

    fn set_waiting(&mut self, waiting: bool) {
        self.waiting = waiting;
        if let Some(mut f) = self.observer.take() {
            f(self);
            self.observer = Some(f);
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.transcript.last()
    }

    fn push(&mut self, sender: Sender, text: String, tickers: Option<Vec<String>>) {
        self.transcript.push(ChatMessage {
            text,
            sender,
            detected_stock_tickers: tickers,
        });
    }

    /// The user's message is appended before the request goes out and is
    /// never rolled back; failures append a bot-side error instead.
    pub fn send<A: PortfolioApi + ?Sized>(
        &mut self,
        api: &A,
        token: Option<&str>,
        input: &str,
    ) -> SendOutcome {
        let message = input.trim();
        if message.is_empty() {
            return SendOutcome::Ignored;
        }
        self.push(Sender::User, message.to_string(), None);

        self.set_waiting(true);
        let req = ChatRequest {
            message: message.to_string(),
            top_k_sources: self.top_k_sources,
        };
        let res = api.chat(token, &req);
        self.set_waiting(false);

        match res {
            Ok(reply) => {
                let tickers = reply.detected_stocks.filter(|t| !t.is_empty());
                debug!(tickers = ?tickers, "chat reply received");
                self.push(Sender::Bot, reply.reply, tickers);
                SendOutcome::Replied
            }
            Err(e) => {
                error!(error = %e, "chat request failed");
                self.push(Sender::Bot, CHAT_ERROR_MESSAGE.to_string(), None);
                SendOutcome::Failed
            }
        }
    }

    pub fn to_node(&self) -> Node {
        let mut entries: Vec<Node> = self
            .transcript
            .iter()
            .map(|m| {
                let class = match m.sender {
                    Sender::User => "message user-message",
                    Sender::Bot => "message bot-message",
                };
                let mut children = vec![Node::with_class(
                    "p",
                    "message-text",
                    vec![Node::text(&m.text)],
                )];
                if let Some(tickers) = &m.detected_stock_tickers {
                    children.push(Node::with_class(
                        "small",
                        "detected-stocks",
                        vec![Node::text(format!("Detected: {}", tickers.join(", ")))],
                    ));
                }
                Node::with_class("div", class, children)
            })
            .collect();
        if self.waiting {
            entries.push(Node::with_class("div", "message bot-message typing", vec![]));
        }
        Node::with_class("div", "chat-messages", entries)
    }
}
