//! Plain-text rendering of the render state, with optional terminal colours

use std::fmt::Write as _;

use crossterm::style::{Color, Stylize};

use crate::messages::{Notice, RenderState};
use crate::response::{BodyView, DisplayModel};

const HELP_TEXT: &str = r#"Commands:
────────────────────────────
  method GET|POST|PUT|PATCH|DELETE
  url <url>               Request URL
  param <key>=<value>     Add a query param row
  header <Key>: <value>   Add a header row
  clear params|headers    Remove all rows
  body none|json|raw <text>
  auth none|bearer <token>|basic <user>[:<pass>]
  timeout <secs>          1 to 120 seconds
  verify on|off           TLS verification
  show                    Print the current request
  send                    Send the request
  curl                    Print the cURL equivalent
  download [path]         Save the raw response body
  save [name]             Save a preset
  load <name>             Load a preset
  presets                 List presets
  import <curl command>   Load a request from cURL
  help                    This help
  quit                    Exit
────────────────────────────
Notes: disable TLS verification only in test environments.
Bearer auth adds the Authorization header."#;

/// Apply a colour only when styling is enabled
fn paint(text: &str, color: Color, styled: bool) -> String {
    if styled {
        text.with(color).to_string()
    } else {
        text.to_string()
    }
}

/// Render one state update as text. Empty when there is nothing to show.
pub fn render(state: &RenderState, styled: bool) -> String {
    let mut out = String::new();

    if state.show_help {
        let _ = writeln!(out, "{}", HELP_TEXT);
    }

    if let Some(notice) = &state.notice {
        let line = match notice {
            Notice::Info(text) => text.clone(),
            Notice::Success(text) => paint(text, Color::Green, styled),
            Notice::Error(text) => paint(text, Color::Red, styled),
        };
        let _ = writeln!(out, "{}", line);
    }

    if let Some(response) = &state.response {
        out.push_str(&render_response(response, styled));
    }

    out
}

/// Shell prompt showing the current method and URL
pub fn prompt(state: &RenderState, styled: bool) -> String {
    let method = state.method.as_str();
    let url = if state.url.is_empty() {
        crate::constants::URL_PLACEHOLDER
    } else {
        state.url.as_str()
    };
    let busy = if state.is_loading { " (sending)" } else { "" };
    format!("{} {}{}> ", paint(method, method_color(method), styled), url, busy)
}

fn render_response(response: &DisplayModel, styled: bool) -> String {
    let mut out = String::new();
    let status = response.status.to_string();
    let _ = writeln!(
        out,
        "Status {}   Elapsed {:.3}s",
        paint(&status, status_color(response.status), styled),
        response.elapsed.as_secs_f64()
    );
    let _ = writeln!(out, "Final URL {}", response.final_url);

    let _ = writeln!(out, "\nResponse headers");
    for (key, value) in &response.headers {
        let _ = writeln!(out, "  {}: {}", paint(key, Color::Cyan, styled), value);
    }

    let _ = writeln!(out, "\nBody");
    let body = response.body.to_text();
    match &response.body {
        BodyView::Structured(_) if styled => {
            for line in highlight_json(&body) {
                let _ = writeln!(out, "{}", line);
            }
        }
        _ => {
            let _ = writeln!(out, "{}", body);
        }
    }

    if let Some(curl) = &response.curl {
        let _ = writeln!(out, "\ncURL preview\n{}", curl);
    }
    out
}

/// Simple JSON syntax highlighting
pub fn highlight_json(text: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for line in text.lines() {
        let mut spans = String::new();
        let mut current = String::new();
        let mut in_string = false;
        let mut escaped = false;

        for (idx, c) in line.char_indices() {
            if in_string {
                current.push(c);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    // End of string; keys are followed by ':'
                    in_string = false;
                    let color = if line[idx + 1..].trim_start().starts_with(':') {
                        Color::Cyan
                    } else {
                        Color::Green
                    };
                    spans.push_str(&current.as_str().with(color).to_string());
                    current.clear();
                }
                continue;
            }

            match c {
                '"' => {
                    flush_token(&mut spans, &mut current);
                    in_string = true;
                    current.push(c);
                }
                '{' | '}' | '[' | ']' => {
                    flush_token(&mut spans, &mut current);
                    spans.push_str(&c.with(Color::Yellow).to_string());
                }
                ' ' | ',' | ':' => {
                    flush_token(&mut spans, &mut current);
                    spans.push(c);
                }
                _ => current.push(c),
            }
        }
        flush_token(&mut spans, &mut current);
        lines.push(spans);
    }

    lines
}

/// Colour a bare token: literals magenta, numbers yellow
fn flush_token(spans: &mut String, current: &mut String) {
    if current.is_empty() {
        return;
    }
    let styled = match current.as_str() {
        "true" | "false" | "null" => current.as_str().with(Color::Magenta).to_string(),
        token if token.parse::<f64>().is_ok() => token.with(Color::Yellow).to_string(),
        token => token.to_string(),
    };
    spans.push_str(&styled);
    current.clear();
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "PATCH" => Color::Cyan,
        "DELETE" => Color::Red,
        _ => Color::White,
    }
}
