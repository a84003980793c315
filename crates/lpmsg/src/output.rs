use std::io::{IsTerminal, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// What was encoded, and where it went if it was sent.
#[derive(Serialize, Debug)]
pub struct FrameReport<'a> {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes_sent: Option<usize>,
    total_length: u16,
    payload_length: u8,
    payload: &'a str,
    wire_size: usize,
    hex: String,
    timestamp: String,
    #[serde(skip)]
    wire: &'a [u8],
}

impl<'a> FrameReport<'a> {
    /// Report for an encoded frame. `wire` must be a complete frame.
    pub fn encoded(payload: &'a str, wire: &'a [u8]) -> Self {
        Self {
            kind: "encoded",
            destination: None,
            bytes_sent: None,
            total_length: u16::from_be_bytes([wire[0], wire[1]]),
            payload_length: wire[2],
            payload,
            wire_size: wire.len(),
            hex: hex_bytes(wire),
            timestamp: now_unix_seconds(),
            wire,
        }
    }

    /// Mark the frame as sent to `destination`.
    pub fn sent(mut self, destination: String, bytes_sent: usize) -> Self {
        self.kind = "sent";
        self.destination = Some(destination);
        self.bytes_sent = Some(bytes_sent);
        self
    }
}

pub fn print_report(report: &FrameReport<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            if let Some(destination) = &report.destination {
                table.add_row(vec!["destination".to_string(), destination.clone()]);
            }
            if let Some(sent) = report.bytes_sent {
                table.add_row(vec!["bytes_sent".to_string(), sent.to_string()]);
            }
            table
                .add_row(vec![
                    "total_length".to_string(),
                    report.total_length.to_string(),
                ])
                .add_row(vec![
                    "payload_length".to_string(),
                    report.payload_length.to_string(),
                ])
                .add_row(vec!["payload".to_string(), report.payload.to_string()])
                .add_row(vec!["hex".to_string(), report.hex.clone()]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            if let Some(destination) = &report.destination {
                print!(
                    "sent {} bytes to {}: ",
                    report.bytes_sent.unwrap_or_default(),
                    destination
                );
            }
            println!(
                "total_length={} payload_length={} payload={:?} hex={}",
                report.total_length, report.payload_length, report.payload, report.hex
            );
        }
        OutputFormat::Raw => {
            print_raw(report.wire);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Space-separated uppercase hex, e.g. `00 0C 0B`.
pub fn hex_bytes(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_matches_wire_dump_style() {
        assert_eq!(hex_bytes(&[0x00, 0x0C, 0x0B, 0x48]), "00 0C 0B 48");
        assert_eq!(hex_bytes(&[]), "");
    }

    #[test]
    fn report_reads_header_fields() {
        let wire = [0x00, 0x03, 0x02, b'h', b'i'];
        let report = FrameReport::encoded("hi", &wire);
        assert_eq!(report.total_length, 3);
        assert_eq!(report.payload_length, 2);
        assert_eq!(report.wire_size, 5);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "encoded");
        assert!(json.get("destination").is_none());
        assert!(json.get("wire").is_none());
    }

    #[test]
    fn sent_report_carries_destination() {
        let wire = [0x00, 0x01, 0x00];
        let report = FrameReport::encoded("", &wire).sent("localhost:12000".into(), 3);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "sent");
        assert_eq!(json["destination"], "localhost:12000");
        assert_eq!(json["bytes_sent"], 3);
    }
}
