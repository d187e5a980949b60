// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use crate::chat::{ChatWidget, SendOutcome};
use crate::markup::strip_controls;
use crate::models::Sender;
use anyhow::Result;
use std::io::{self, BufRead, Write};

fn print_reply(widget: &ChatWidget) {
    let Some(msg) = widget.last() else {
        return;
    };
    if msg.sender != Sender::Bot {
        return;
    }
    println!("bot> {}", strip_controls(&msg.text));
    if let Some(tickers) = &msg.detected_stock_tickers {
        println!("     [{}]", strip_controls(&tickers.join(", ")));
    }
}

pub fn handle(ctx: &mut Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let mut widget = ChatWidget::new(ctx.cfg.top_k_sources).with_observer(|w| {
        if w.is_waiting() {
            eprintln!("bot is typing...");
        }
    });
    widget.toggle();
    let token = ctx.state.token().map(str::to_string);

    if let Some(message) = sub.get_one::<String>("message") {
        if widget.send(&ctx.api, token.as_deref(), message) == SendOutcome::Ignored {
            println!("Nothing to send");
        }
        print_reply(&widget);
        return Ok(());
    }

    println!("Ask about your holdings. Type /close to leave.");
    let stdin = io::stdin();
    let mut line = String::new();
    while widget.is_open() {
        print!("you> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim() == "/close" {
            widget.toggle();
            continue;
        }
        if widget.send(&ctx.api, token.as_deref(), &line) == SendOutcome::Ignored {
            continue;
        }
        print_reply(&widget);
    }
    Ok(())
}
