//! UI events - messages from the shell to the App layer

use std::path::PathBuf;

use crate::constants::DEFAULT_DOWNLOAD_FILE;
use crate::models::{AuthConfig, BodyMode, HttpMethod, KeyValueRow};

/// Events generated from user input in the shell
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Request form
    SetMethod(HttpMethod),
    SetUrl(String),
    AddParam(KeyValueRow),
    AddHeader(KeyValueRow),
    ClearParams,
    ClearHeaders,
    SetBody(BodyMode, String),
    SetAuth(AuthConfig),
    SetTimeout(f64),
    SetVerifyTls(bool),
    ShowConfig,

    // Request actions
    SendRequest,
    ShowCurl,
    Download(PathBuf),

    // Presets
    SavePreset(String),
    LoadPreset(String),
    ListPresets,

    // cURL
    ImportCurl(String),

    // Popups
    ShowHelp,

    // System
    Quit,
    /// Input closed: quit once the in-flight request, if any, has finished
    EndOfInput,
}

/// Map one input line to an event. Blank lines map to `None`.
pub fn parse_command(line: &str) -> Result<Option<UiEvent>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command.to_lowercase().as_str() {
        "method" => UiEvent::SetMethod(rest.parse()?),
        "url" => UiEvent::SetUrl(rest.to_string()),
        "param" => UiEvent::AddParam(split_row(rest, '=')),
        "header" => UiEvent::AddHeader(split_row(rest, ':')),
        "clear" => match rest {
            "params" => UiEvent::ClearParams,
            "headers" => UiEvent::ClearHeaders,
            other => return Err(format!("Cannot clear '{}': use params or headers", other)),
        },
        "body" => parse_body(rest)?,
        "auth" => UiEvent::SetAuth(parse_auth(rest)?),
        "timeout" => UiEvent::SetTimeout(
            rest.parse()
                .map_err(|_| format!("Invalid timeout '{}': expected seconds", rest))?,
        ),
        "verify" => UiEvent::SetVerifyTls(match rest {
            "on" | "true" | "yes" => true,
            "off" | "false" | "no" => false,
            other => return Err(format!("Invalid verify value '{}': use on or off", other)),
        }),
        "show" => UiEvent::ShowConfig,
        "send" => UiEvent::SendRequest,
        "curl" => UiEvent::ShowCurl,
        "download" => UiEvent::Download(PathBuf::from(if rest.is_empty() {
            DEFAULT_DOWNLOAD_FILE
        } else {
            rest
        })),
        "save" => UiEvent::SavePreset(rest.to_string()),
        "load" if !rest.is_empty() => UiEvent::LoadPreset(rest.to_string()),
        "load" => return Err("Usage: load <preset name>".to_string()),
        "presets" => UiEvent::ListPresets,
        "import" if !rest.is_empty() => UiEvent::ImportCurl(rest.to_string()),
        "import" => return Err("Usage: import <curl command>".to_string()),
        "help" | "?" => UiEvent::ShowHelp,
        "quit" | "exit" | "q" => UiEvent::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
    };
    Ok(Some(event))
}

/// Split `key<sep>value`; a row without separator has an empty value
fn split_row(rest: &str, separator: char) -> KeyValueRow {
    match rest.split_once(separator) {
        Some((key, value)) => KeyValueRow::new(key, value),
        None => KeyValueRow::new(rest, ""),
    }
}

fn parse_body(rest: &str) -> Result<UiEvent, String> {
    let (mode, text) = match rest.split_once(char::is_whitespace) {
        Some((mode, text)) => (mode, text.trim_start()),
        None => (rest, ""),
    };
    let mode = match mode {
        "none" => BodyMode::None,
        "json" => BodyMode::Json,
        "raw" => BodyMode::Raw,
        other => return Err(format!("Unknown body mode '{}': use none, json or raw", other)),
    };
    Ok(UiEvent::SetBody(mode, text.to_string()))
}

fn parse_auth(rest: &str) -> Result<AuthConfig, String> {
    let (mode, value) = match rest.split_once(char::is_whitespace) {
        Some((mode, value)) => (mode, value.trim()),
        None => (rest, ""),
    };
    match mode.to_lowercase().as_str() {
        "none" => Ok(AuthConfig::default()),
        "bearer" => Ok(AuthConfig::bearer(value)),
        "basic" => Ok(match value.split_once(':') {
            Some((user, pass)) => AuthConfig::basic(user, Some(pass.to_string())),
            None => AuthConfig::basic(value, None),
        }),
        other => Err(format!("Unknown auth type '{}': use none, bearer or basic", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> UiEvent {
        parse_command(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_line_is_no_event() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn test_form_commands() {
        assert_eq!(parse("method post"), UiEvent::SetMethod(HttpMethod::POST));
        assert_eq!(
            parse("url  https://host/a "),
            UiEvent::SetUrl("https://host/a".into())
        );
        assert_eq!(parse("param q=a=b"), UiEvent::AddParam(KeyValueRow::new("q", "a=b")));
        assert_eq!(
            parse("header Accept: text/html"),
            UiEvent::AddHeader(KeyValueRow::new("Accept", " text/html"))
        );
        assert_eq!(parse("timeout 2.5"), UiEvent::SetTimeout(2.5));
        assert_eq!(parse("verify off"), UiEvent::SetVerifyTls(false));
        assert_eq!(parse("clear headers"), UiEvent::ClearHeaders);
    }

    #[test]
    fn test_body_keeps_text_verbatim() {
        assert_eq!(
            parse(r#"body json {"x": 1}"#),
            UiEvent::SetBody(BodyMode::Json, r#"{"x": 1}"#.into())
        );
        assert_eq!(parse("body none"), UiEvent::SetBody(BodyMode::None, String::new()));
        assert!(parse_command("body xml <a/>").is_err());
    }

    #[test]
    fn test_auth_commands() {
        assert_eq!(parse("auth bearer tok"), UiEvent::SetAuth(AuthConfig::bearer("tok")));
        assert_eq!(
            parse("auth basic bob:pw"),
            UiEvent::SetAuth(AuthConfig::basic("bob", Some("pw".into())))
        );
        assert_eq!(parse("auth basic bob"), UiEvent::SetAuth(AuthConfig::basic("bob", None)));
        assert_eq!(parse("auth none"), UiEvent::SetAuth(AuthConfig::default()));
    }

    #[test]
    fn test_preset_and_session_commands() {
        assert_eq!(parse("save"), UiEvent::SavePreset(String::new()));
        assert_eq!(parse("save my api"), UiEvent::SavePreset("my api".into()));
        assert_eq!(parse("load my api"), UiEvent::LoadPreset("my api".into()));
        assert!(parse_command("load").is_err());
        assert_eq!(parse("download"), UiEvent::Download(PathBuf::from("response.bin")));
        assert_eq!(
            parse("import curl https://host"),
            UiEvent::ImportCurl("curl https://host".into())
        );
        assert_eq!(parse("QUIT"), UiEvent::Quit);
    }

    #[test]
    fn test_bad_input_is_an_error() {
        assert!(parse_command("method BREW").is_err());
        assert!(parse_command("timeout soon").is_err());
        assert!(parse_command("frobnicate").is_err());
    }
}
