// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! View tree shared by the dashboard and the chat transcript.
//!
//! Text nodes are escaped when rendered. `Text::Rich` is the one exception and
//! only understands `**bold**` and blank-line paragraph breaks.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Text {
    Plain(String),
    Rich(String),
}

impl Text {
    pub fn plain(s: impl Into<String>) -> Self {
        Text::Plain(s.into())
    }

    pub fn rich(s: impl Into<String>) -> Self {
        Text::Rich(s.into())
    }

    pub fn to_html(&self) -> String {
        match self {
            Text::Plain(s) => escape_html(s),
            Text::Rich(s) => rich_to_html(s),
        }
    }

    /// Terminal rendering: markup markers and control characters stripped.
    pub fn to_terminal(&self) -> String {
        match self {
            Text::Plain(s) => strip_controls(s),
            Text::Rich(s) => strip_controls(&BOLD.replace_all(s, "$1")),
        }
    }
}

/// Drops control characters (ESC included) except newlines and tabs, so
/// server text cannot drive the terminal.
pub fn strip_controls(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes first, then applies the bold and paragraph-break conventions.
pub fn rich_to_html(s: &str) -> String {
    let escaped = escape_html(s);
    let bolded = BOLD.replace_all(&escaped, "<strong>$1</strong>");
    bolded.replace("\n\n", "<br><br>")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    Element {
        tag: &'static str,
        class: Option<String>,
        children: Vec<Node>,
    },
    Text(Text),
}

impl Node {
    pub fn el(tag: &'static str, children: Vec<Node>) -> Self {
        Node::Element {
            tag,
            class: None,
            children,
        }
    }

    pub fn with_class(tag: &'static str, class: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element {
            tag,
            class: Some(class.into()),
            children,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(Text::plain(s))
    }

    pub fn render_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&t.to_html()),
            Node::Element {
                tag,
                class,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                if let Some(c) = class {
                    out.push_str(" class=\"");
                    out.push_str(&escape_html(c));
                    out.push('"');
                }
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}
