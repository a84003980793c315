#![cfg(feature = "cli")]

use std::net::UdpSocket;
use std::process::Command;
use std::time::Duration;

fn local_receiver() -> UdpSocket {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("receiver should bind");
    socket
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("read timeout should apply");
    socket
}

fn lpmsg() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lpmsg"));
    cmd.env_remove("LPMSG_HOST").env_remove("LPMSG_PORT");
    cmd.arg("--log-level").arg("error");
    cmd
}

#[test]
fn send_default_payload_delivers_hello_world() {
    let receiver = local_receiver();
    let port = receiver.local_addr().unwrap().port();

    let output = lpmsg()
        .arg("--format")
        .arg("json")
        .arg("send")
        .arg("--host")
        .arg("127.0.0.1")
        .arg("--port")
        .arg(port.to_string())
        .output()
        .expect("send should run");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let mut buf = [0u8; 512];
    let (n, _) = receiver.recv_from(&mut buf).expect("datagram should arrive");
    assert_eq!(
        &buf[..n],
        &[0x00, 0x0C, 0x0B, 0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x20, 0x57, 0x6F, 0x72, 0x6C, 0x64]
    );

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("send should emit json");
    assert_eq!(report["kind"], "sent");
    assert_eq!(report["bytes_sent"], 14);
    assert_eq!(report["destination"], format!("127.0.0.1:{port}"));
    assert_eq!(report["hex"], "00 0C 0B 48 65 6C 6C 6F 20 57 6F 72 6C 64");
}

#[test]
fn send_reads_destination_from_env() {
    let receiver = local_receiver();
    let port = receiver.local_addr().unwrap().port();

    let status = lpmsg()
        .env("LPMSG_HOST", "127.0.0.1")
        .env("LPMSG_PORT", port.to_string())
        .arg("--format")
        .arg("pretty")
        .arg("send")
        .arg("ünïcode")
        .status()
        .expect("send should run");
    assert!(status.success());

    let mut buf = [0u8; 512];
    let (n, _) = receiver.recv_from(&mut buf).expect("datagram should arrive");
    let text = "ünïcode";
    assert_eq!(n, text.len() + 3);
    assert_eq!(buf[2] as usize, text.len());
    assert_eq!(&buf[3..n], text.as_bytes());
}

#[test]
fn send_oversized_payload_exits_60_without_sending() {
    let receiver = local_receiver();
    receiver
        .set_read_timeout(Some(Duration::from_millis(300)))
        .unwrap();
    let port = receiver.local_addr().unwrap().port();

    let output = lpmsg()
        .arg("send")
        .arg("a".repeat(255))
        .arg("--host")
        .arg("127.0.0.1")
        .arg("--port")
        .arg(port.to_string())
        .output()
        .expect("send should run");

    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("payload too large"));

    let mut buf = [0u8; 512];
    assert!(receiver.recv_from(&mut buf).is_err(), "nothing should be sent");
}

#[test]
fn encode_raw_writes_wire_bytes() {
    let output = lpmsg()
        .arg("--format")
        .arg("raw")
        .arg("encode")
        .arg("")
        .output()
        .expect("encode should run");

    assert!(output.status.success());
    assert_eq!(output.stdout, vec![0x00, 0x01, 0x00]);
}

#[test]
fn encode_json_reports_length_fields() {
    let output = lpmsg()
        .arg("--format")
        .arg("json")
        .arg("encode")
        .arg("x".repeat(254))
        .output()
        .expect("encode should run");

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("encode should emit json");
    assert_eq!(report["kind"], "encoded");
    assert_eq!(report["total_length"], 255);
    assert_eq!(report["payload_length"], 254);
    assert_eq!(report["wire_size"], 257);
}

#[test]
fn version_prints_package_version() {
    let output = lpmsg().arg("version").output().expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("lpmsg {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_extended_prints_only_known_fields() {
    let output = lpmsg()
        .arg("version")
        .arg("--extended")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: lpmsg"));
    assert!(stdout.contains("max_payload: 254 bytes"));
    assert!(!stdout.contains("rustc:"));
    assert!(!stdout.contains("git_hash:"));
    assert!(!stdout.contains("target: unknown"));
}
