//! Incremental Server-Sent-Events framing.
//!
//! The streaming execute endpoint frames its response body as SSE: records
//! separated by a blank line, each record carrying zero or more `event:`
//! and `data:` lines. Network reads land at arbitrary byte boundaries, so
//! the parser buffers a partial trailing record across feeds and only ever
//! yields complete records.
//!
//! Parsing is split from transport on purpose: [`SseParser`] is pure and
//! synchronous (feed text, get records), which keeps the chunk-boundary
//! edge cases unit-testable without a socket.

use serde::Deserialize;

use crate::models::SuggestedAgent;

/// One complete `event:`/`data:` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseRecord {
    /// Event name; `message` when the record carried no `event:` line.
    pub event: String,
    /// Concatenated `data:` payload.
    pub data: String,
}

/// Incremental SSE record parser.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: String,
}

impl SseParser {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Feed a chunk of body text and collect every record completed by it.
    /// A trailing partial record stays buffered until more bytes arrive.
    pub fn feed(&mut self, chunk: &str) -> Vec<SseRecord> {
        self.buffer.push_str(chunk);

        let mut records = Vec::new();
        while let Some(pos) = self.buffer.find("\n\n") {
            let raw: String = self.buffer.drain(..pos + 2).collect();
            if let Some(record) = parse_record(raw.trim_end_matches('\n')) {
                records.push(record);
            }
        }
        records
    }

    /// Unconsumed partial input, if any. A clean stream ends with an empty
    /// buffer; leftovers mean the body was cut mid-record.
    pub fn pending(&self) -> &str {
        &self.buffer
    }
}

fn parse_record(raw: &str) -> Option<SseRecord> {
    let mut event = "message".to_string();
    let mut data = String::new();

    for line in raw.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(rest) = line.strip_prefix("event:") {
            event = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("data:") {
            data.push_str(rest.trim());
        }
    }

    if data.is_empty() {
        return None;
    }
    Some(SseRecord { event, data })
}

/// Decoded event from the streaming execute endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Cumulative partial transcript. Replaces the displayed text; the
    /// backend resends the full partial each time.
    Token { partial: String },
    /// Terminal success. `response` is authoritative over any token text.
    Done(StreamDone),
    /// Terminal failure reported by the backend.
    Error { message: String },
}

/// Payload of the terminal `done` event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamDone {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub latency_ms: i64,
    #[serde(default)]
    pub tokens_used: u64,
    #[serde(default)]
    pub model_used: String,
    #[serde(default)]
    pub suggested_agent: Option<SuggestedAgent>,
}

impl StreamEvent {
    /// Interpret a parsed record. Unknown event names and undecodable
    /// payloads yield `None` and are skipped upstream.
    pub fn from_record(record: &SseRecord) -> Option<StreamEvent> {
        let parsed: serde_json::Value = serde_json::from_str(&record.data).ok()?;
        match record.event.as_str() {
            "token" => Some(StreamEvent::Token {
                partial: parsed
                    .get("partial")
                    .and_then(|p| p.as_str())
                    .unwrap_or_default()
                    .to_string(),
            }),
            "done" => serde_json::from_value(parsed).ok().map(StreamEvent::Done),
            "error" => Some(StreamEvent::Error {
                message: parsed
                    .get("error")
                    .and_then(|e| e.as_str())
                    .unwrap_or("Streaming failed")
                    .to_string(),
            }),
            _ => None,
        }
    }

    /// True for `done` and `error`; reading stops after a terminal event.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done(_) | StreamEvent::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(event: &str, data: &str) -> SseRecord {
        SseRecord {
            event: event.to_string(),
            data: data.to_string(),
        }
    }

    #[test]
    fn test_single_complete_record() {
        let mut parser = SseParser::new();
        let records = parser.feed("event: token\ndata: {\"partial\":\"Hello\"}\n\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event, "token");
        assert_eq!(records[0].data, "{\"partial\":\"Hello\"}");
        assert!(parser.pending().is_empty());
    }

    #[test]
    fn test_multiple_records_in_one_chunk() {
        let mut parser = SseParser::new();
        let records = parser.feed(
            "event: token\ndata: {\"partial\":\"Hi\"}\n\nevent: done\ndata: {\"response\":\"Hi!\"}\n\n",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event, "token");
        assert_eq!(records[1].event, "done");
    }

    #[test]
    fn test_record_split_across_chunks() {
        let mut parser = SseParser::new();
        assert!(parser.feed("event: tok").is_empty());
        assert!(parser.feed("en\ndata: {\"partial\":").is_empty());
        let records = parser.feed("\"Hello\"}\n\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event, "token");
        assert_eq!(records[0].data, "{\"partial\":\"Hello\"}");
    }

    #[test]
    fn test_byte_level_chunking_matches_whole_delivery() {
        let body = "event: token\ndata: {\"partial\":\"Hello\"}\n\nevent: token\ndata: {\"partial\":\"Hello there\"}\n\nevent: done\ndata: {\"response\":\"Hello there!\",\"latency_ms\":120}\n\n";

        let mut whole = SseParser::new();
        let expected = whole.feed(body);

        for chunk_size in [1usize, 2, 3, 7, 16] {
            let mut parser = SseParser::new();
            let mut actual = Vec::new();
            let chars: Vec<char> = body.chars().collect();
            for chunk in chars.chunks(chunk_size) {
                let s: String = chunk.iter().collect();
                actual.extend(parser.feed(&s));
            }
            assert_eq!(actual, expected, "chunk_size={}", chunk_size);
            assert!(parser.pending().is_empty());
        }
    }

    #[test]
    fn test_partial_trailing_record_stays_buffered() {
        let mut parser = SseParser::new();
        let records = parser.feed("event: done\ndata: {\"response\":\"x\"}\n\nevent: tok");
        assert_eq!(records.len(), 1);
        assert_eq!(parser.pending(), "event: tok");
    }

    #[test]
    fn test_dataless_record_skipped() {
        let mut parser = SseParser::new();
        let records = parser.feed("event: ping\n\nevent: token\ndata: {\"partial\":\"a\"}\n\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event, "token");
    }

    #[test]
    fn test_missing_event_line_defaults_to_message() {
        let mut parser = SseParser::new();
        let records = parser.feed("data: {\"x\":1}\n\n");
        assert_eq!(records[0].event, "message");
    }

    #[test]
    fn test_multiple_data_lines_concatenate() {
        let mut parser = SseParser::new();
        let records = parser.feed("event: token\ndata: {\"partial\":\ndata: \"ab\"}\n\n");
        assert_eq!(records[0].data, "{\"partial\":\"ab\"}");
    }

    #[test]
    fn test_crlf_lines() {
        let mut parser = SseParser::new();
        let records = parser.feed("event: token\r\ndata: {\"partial\":\"a\"}\r\n\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event, "token");
    }

    #[test]
    fn test_stream_event_token() {
        let event =
            StreamEvent::from_record(&record("token", r#"{"partial":"Hello there"}"#)).unwrap();
        assert_eq!(
            event,
            StreamEvent::Token {
                partial: "Hello there".to_string()
            }
        );
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_stream_event_done() {
        let event = StreamEvent::from_record(&record(
            "done",
            r#"{"response":"Hello there!","latency_ms":120,"tokens_used":9,"model_used":"gpt-4o-mini"}"#,
        ))
        .unwrap();
        match &event {
            StreamEvent::Done(done) => {
                assert_eq!(done.response, "Hello there!");
                assert_eq!(done.latency_ms, 120);
                assert_eq!(done.tokens_used, 9);
            }
            other => panic!("expected done, got {:?}", other),
        }
        assert!(event.is_terminal());
    }

    #[test]
    fn test_stream_event_done_with_referral() {
        let event = StreamEvent::from_record(&record(
            "done",
            r#"{"response":"Ask finance.","suggested_agent":{"code":"LEDGER-02","reason":"tax question","is_hired":true}}"#,
        ))
        .unwrap();
        match event {
            StreamEvent::Done(done) => {
                let suggested = done.suggested_agent.unwrap();
                assert_eq!(suggested.code, "LEDGER-02");
                assert!(suggested.is_hired);
            }
            other => panic!("expected done, got {:?}", other),
        }
    }

    #[test]
    fn test_stream_event_error() {
        let event = StreamEvent::from_record(&record("error", r#"{"error":"model overloaded"}"#))
            .unwrap();
        assert_eq!(
            event,
            StreamEvent::Error {
                message: "model overloaded".to_string()
            }
        );
        assert!(event.is_terminal());

        let fallback = StreamEvent::from_record(&record("error", r#"{}"#)).unwrap();
        assert_eq!(
            fallback,
            StreamEvent::Error {
                message: "Streaming failed".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_event_ignored() {
        assert!(StreamEvent::from_record(&record("heartbeat", r#"{"t":1}"#)).is_none());
        assert!(StreamEvent::from_record(&record("token", "not json")).is_none());
    }
}
