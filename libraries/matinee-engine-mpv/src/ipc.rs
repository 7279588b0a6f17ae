//! mpv JSON IPC wire protocol
//!
//! Newline-delimited JSON over a unix socket. Commands carry a
//! monotonically increasing `request_id`; replies echo it back.
//! Asynchronous events arrive interleaved with replies on the same
//! stream.

use serde_json::{json, Value};

/// Registration ids for `observe_property`
pub const OBSERVE_TIME_POS: u64 = 1;
pub const OBSERVE_DURATION: u64 = 2;
pub const OBSERVE_PAUSE: u64 = 3;

/// Encode one command line (without the trailing newline)
pub fn encode_command(args: &[Value], request_id: u64) -> String {
    json!({
        "command": args,
        "request_id": request_id,
    })
    .to_string()
}

/// One parsed line from the socket
#[derive(Debug, Clone, PartialEq)]
pub enum MpvMessage {
    /// Reply to a numbered command; `error` is `"success"` when it worked
    Reply { request_id: u64, error: String },

    /// Asynchronous event
    Event(MpvEvent),
}

/// Asynchronous events mpv pushes over the socket
#[derive(Debug, Clone, PartialEq)]
pub enum MpvEvent {
    /// An observed property changed; `data` is absent when the property
    /// became unavailable
    PropertyChange { name: String, data: Option<Value> },

    /// A new file started playing
    StartFile,

    /// The current file stopped, with mpv's reason string
    EndFile { reason: String },

    /// Any event this adapter does not interpret
    Other(String),
}

/// Parse one line from the socket.
///
/// Returns `None` for lines that are not valid JSON or match neither a
/// reply nor an event shape.
pub fn parse_line(line: &str) -> Option<MpvMessage> {
    let msg: Value = serde_json::from_str(line.trim()).ok()?;

    if let Some(event) = msg.get("event").and_then(Value::as_str) {
        let event = match event {
            "property-change" => MpvEvent::PropertyChange {
                name: msg
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                data: msg.get("data").filter(|data| !data.is_null()).cloned(),
            },
            "start-file" => MpvEvent::StartFile,
            "end-file" => MpvEvent::EndFile {
                reason: msg
                    .get("reason")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
            },
            other => MpvEvent::Other(other.to_string()),
        };
        return Some(MpvMessage::Event(event));
    }

    if let Some(request_id) = msg.get("request_id").and_then(Value::as_u64) {
        return Some(MpvMessage::Reply {
            request_id,
            error: msg
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_commands_with_request_ids() {
        let line = encode_command(&[json!("loadfile"), json!("/v/a.mp4"), json!("replace")], 7);
        let parsed: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["command"], json!(["loadfile", "/v/a.mp4", "replace"]));
        assert_eq!(parsed["request_id"], json!(7));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn parses_replies() {
        assert_eq!(
            parse_line(r#"{"request_id":3,"error":"success"}"#),
            Some(MpvMessage::Reply {
                request_id: 3,
                error: "success".to_string()
            })
        );
        assert_eq!(
            parse_line(r#"{"request_id":4,"error":"invalid parameter"}"#),
            Some(MpvMessage::Reply {
                request_id: 4,
                error: "invalid parameter".to_string()
            })
        );
    }

    #[test]
    fn parses_property_changes() {
        let parsed = parse_line(r#"{"event":"property-change","id":1,"name":"time-pos","data":12.5}"#);
        assert_eq!(
            parsed,
            Some(MpvMessage::Event(MpvEvent::PropertyChange {
                name: "time-pos".to_string(),
                data: Some(json!(12.5)),
            }))
        );
    }

    #[test]
    fn null_property_data_reads_as_absent() {
        let parsed = parse_line(r#"{"event":"property-change","id":2,"name":"duration","data":null}"#);
        assert_eq!(
            parsed,
            Some(MpvMessage::Event(MpvEvent::PropertyChange {
                name: "duration".to_string(),
                data: None,
            }))
        );
    }

    #[test]
    fn parses_file_lifecycle_events() {
        assert_eq!(
            parse_line(r#"{"event":"start-file","playlist_entry_id":2}"#),
            Some(MpvMessage::Event(MpvEvent::StartFile))
        );
        assert_eq!(
            parse_line(r#"{"event":"end-file","reason":"eof"}"#),
            Some(MpvMessage::Event(MpvEvent::EndFile {
                reason: "eof".to_string()
            }))
        );
    }

    #[test]
    fn unknown_events_pass_through_as_other() {
        assert_eq!(
            parse_line(r#"{"event":"file-loaded"}"#),
            Some(MpvMessage::Event(MpvEvent::Other("file-loaded".to_string())))
        );
    }

    #[test]
    fn garbage_lines_parse_to_none() {
        assert_eq!(parse_line("not json"), None);
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line(r#"{"neither":"shape"}"#), None);
    }
}
