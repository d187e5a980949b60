// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{FakeApi, Failure};
use folioscope::chat::{CHAT_ERROR_MESSAGE, ChatWidget, SendOutcome};
use folioscope::models::{ChatReply, Sender};
use std::cell::RefCell;
use std::rc::Rc;

/// (waiting, typing indicator in markup, transcript length) at each notification.
type Seen = Rc<RefCell<Vec<(bool, bool, usize)>>>;

fn watched(seen: &Seen) -> ChatWidget {
    let log = Rc::clone(seen);
    ChatWidget::default().with_observer(move |w| {
        let typing = w.to_node().render_html().contains("typing");
        log.borrow_mut().push((w.is_waiting(), typing, w.transcript().len()));
    })
}

#[test]
fn blank_input_is_ignored() {
    let api = FakeApi::default();
    let mut chat = ChatWidget::default();
    assert_eq!(chat.send(&api, Some("tok"), "   \n"), SendOutcome::Ignored);
    assert!(chat.transcript().is_empty());
    assert!(api.calls().is_empty());
}

#[test]
fn reply_appends_one_bot_message() {
    let api = FakeApi::default();
    let mut chat = ChatWidget::new(3);
    assert_eq!(
        chat.send(&api, Some("tok"), "  How is AAPL doing? "),
        SendOutcome::Replied
    );
    let t = chat.transcript();
    assert_eq!(t.len(), 2);
    assert_eq!(t[0].sender, Sender::User);
    assert_eq!(t[0].text, "How is AAPL doing?");
    assert_eq!(t[1].sender, Sender::Bot);
    assert_eq!(t[1].detected_stock_tickers.as_deref(), Some(&["AAPL".to_string()][..]));
    assert!(!chat.is_waiting());

    let req = &api.chat_requests.borrow()[0];
    assert_eq!(req.message, "How is AAPL doing?");
    assert_eq!(req.top_k_sources, 3);
    assert_eq!(api.tokens_seen.borrow()[0].as_deref(), Some("tok"));
}

#[test]
fn empty_ticker_list_is_dropped() {
    let api = FakeApi {
        chat_reply: ChatReply {
            reply: "Hello".into(),
            detected_stocks: Some(vec![]),
        },
        ..FakeApi::default()
    };
    let mut chat = ChatWidget::default();
    chat.send(&api, None, "hi");
    assert!(chat.last().unwrap().detected_stock_tickers.is_none());
    assert_eq!(api.tokens_seen.borrow()[0], None);
}

#[test]
fn failure_keeps_user_message_and_appends_error() {
    let api = FakeApi::default().failing("chat", Failure::Server(503, "down".into()));
    let mut chat = ChatWidget::default();
    assert_eq!(chat.send(&api, None, "hello"), SendOutcome::Failed);
    let t = chat.transcript();
    assert_eq!(t.len(), 2);
    assert_eq!(t[0].text, "hello");
    assert_eq!(t[1].text, CHAT_ERROR_MESSAGE);
    assert_eq!(t[1].sender, Sender::Bot);
}

#[test]
fn toggle_and_transcript_markup() {
    let api = FakeApi::default();
    let mut chat = ChatWidget::default();
    assert!(!chat.is_open());
    assert!(chat.toggle());
    chat.send(&api, None, "<i>hi</i>");
    assert!(!chat.toggle());
    assert_eq!(chat.transcript().len(), 2);

    let html = chat.to_node().render_html();
    assert!(html.contains("&lt;i&gt;hi&lt;/i&gt;"));
    assert!(html.contains("Detected: AAPL"));
}

#[test]
fn indicator_is_raised_during_the_request() {
    let api = FakeApi::default();
    let seen = Seen::default();
    let mut chat = watched(&seen);
    assert_eq!(chat.send(&api, None, "hi"), SendOutcome::Replied);
    assert_eq!(*seen.borrow(), vec![(true, true, 1), (false, false, 1)]);
    assert!(!chat.is_waiting());
}

#[test]
fn indicator_is_lowered_after_a_failure() {
    let api = FakeApi::default().failing("chat", Failure::Server(500, "boom".into()));
    let seen = Seen::default();
    let mut chat = watched(&seen);
    assert_eq!(chat.send(&api, None, "hi"), SendOutcome::Failed);
    assert_eq!(*seen.borrow(), vec![(true, true, 1), (false, false, 1)]);
    assert_eq!(chat.last().unwrap().text, CHAT_ERROR_MESSAGE);
}

#[test]
fn ignored_input_never_raises_the_indicator() {
    let api = FakeApi::default();
    let seen = Seen::default();
    let mut chat = watched(&seen);
    chat.send(&api, None, "  ");
    assert!(seen.borrow().is_empty());
}
