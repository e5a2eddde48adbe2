//! Protocol detection based on well-known port numbers.
//!
//! Maps a port to a protocol label and the probe that elicits a banner from
//! it. Ports not in the table fall back to an HTTP request, which is the
//! probe most likely to get *something* back from an unknown TCP service.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Placeholder replaced with the target host in probe templates.
const HOST_PLACEHOLDER: &[u8] = b"{host}";

const HTTP_GET: &[u8] = b"GET / HTTP/1.1\r\nHost: {host}\r\n\r\n";

/// Standard query for `www.google.com`, type A, class IN, transaction id 0.
const DNS_QUERY: &[u8] = b"\x00\x00\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
\x03www\x06google\x03com\x00\x00\x01\x00\x01";

/// Label used for ports missing from the table.
pub const UNKNOWN_PROTOCOL: &str = "Unknown";

/// How a protocol is coaxed into revealing itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeTemplate {
    /// The service speaks first; send nothing and wait.
    Passive,
    /// Send these bytes, with `{host}` substituted, then wait.
    Send(&'static [u8]),
}

/// One row of the protocol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolEntry {
    pub port: u16,
    pub name: &'static str,
    pub probe: ProbeTemplate,
}

impl ProtocolEntry {
    const fn send(port: u16, name: &'static str, payload: &'static [u8]) -> Self {
        Self {
            port,
            name,
            probe: ProbeTemplate::Send(payload),
        }
    }

    const fn passive(port: u16, name: &'static str) -> Self {
        Self {
            port,
            name,
            probe: ProbeTemplate::Passive,
        }
    }
}

/// Every protocol the scanner knows by port.
pub const PROTOCOLS: &[ProtocolEntry] = &[
    ProtocolEntry::send(21, "FTP", b"HELP\r\n"),
    ProtocolEntry::passive(22, "SSH"),
    ProtocolEntry::send(23, "Telnet", b"\r\n"),
    ProtocolEntry::send(25, "SMTP", b"EHLO localhost\r\n"),
    ProtocolEntry::send(53, "DNS", DNS_QUERY),
    ProtocolEntry::send(80, "HTTP", HTTP_GET),
    ProtocolEntry::send(110, "POP3", b"USER root\r\n"),
    ProtocolEntry::send(143, "IMAP", b"1 CAPABILITY\r\n"),
    // Cleartext request; no TLS handshake is attempted on the TLS ports.
    ProtocolEntry::send(443, "HTTPS", HTTP_GET),
    ProtocolEntry::send(993, "IMAPS", b"1 CAPABILITY\r\n"),
    ProtocolEntry::send(995, "POP3S", b"USER root\r\n"),
    ProtocolEntry::passive(3306, "MySQL"),
    ProtocolEntry::passive(3389, "RDP"),
    ProtocolEntry::passive(5432, "PostgreSQL"),
    ProtocolEntry::send(8080, "HTTP-Alt", HTTP_GET),
];

static BY_PORT: LazyLock<HashMap<u16, &'static ProtocolEntry>> =
    LazyLock::new(|| PROTOCOLS.iter().map(|entry| (entry.port, entry)).collect());

/// A probe ready to be put on the wire for one specific port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// Protocol label, `"Unknown"` for ports outside the table.
    pub protocol: &'static str,
    /// Bytes to send, `None` for passive-banner protocols.
    pub payload: Option<Cow<'static, [u8]>>,
}

impl Probe {
    /// Whether the service is expected to speak first.
    pub fn is_passive(&self) -> bool {
        self.payload.is_none()
    }
}

/// Look up the table entry for a port, if any.
pub fn get_protocol(port: u16) -> Option<&'static ProtocolEntry> {
    BY_PORT.get(&port).copied()
}

/// Resolve the protocol label and probe bytes for `port` on `host`.
///
/// Total over all ports: anything not in the table is labelled
/// [`UNKNOWN_PROTOCOL`] and gets the HTTP probe.
pub fn lookup(port: u16, host: &str) -> Probe {
    let (protocol, template) = match get_protocol(port) {
        Some(entry) => (entry.name, entry.probe),
        None => (UNKNOWN_PROTOCOL, ProbeTemplate::Send(HTTP_GET)),
    };

    let payload = match template {
        ProbeTemplate::Passive => None,
        ProbeTemplate::Send(bytes) => Some(render_template(bytes, host)),
    };

    Probe { protocol, payload }
}

/// Substitute every `{host}` in `template` with the raw bytes of `host`.
fn render_template(template: &'static [u8], host: &str) -> Cow<'static, [u8]> {
    if !contains(template, HOST_PLACEHOLDER) {
        return Cow::Borrowed(template);
    }

    let mut out = Vec::with_capacity(template.len() + host.len());
    let mut rest = template;
    while let Some(pos) = find(rest, HOST_PLACEHOLDER) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(host.as_bytes());
        rest = &rest[pos + HOST_PLACEHOLDER.len()..];
    }
    out.extend_from_slice(rest);
    Cow::Owned(out)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(port: u16, host: &str) -> Vec<u8> {
        lookup(port, host).payload.unwrap().into_owned()
    }

    #[test]
    fn test_known_ports() {
        assert_eq!(lookup(21, "h").protocol, "FTP");
        assert_eq!(payload(21, "h"), b"HELP\r\n");
        assert_eq!(payload(23, "h"), b"\r\n");
        assert_eq!(payload(25, "h"), b"EHLO localhost\r\n");
        assert_eq!(payload(110, "h"), b"USER root\r\n");
        assert_eq!(payload(995, "h"), b"USER root\r\n");
        assert_eq!(payload(143, "h"), b"1 CAPABILITY\r\n");
        assert_eq!(payload(993, "h"), b"1 CAPABILITY\r\n");
        assert_eq!(lookup(8080, "h").protocol, "HTTP-Alt");
        assert_eq!(lookup(443, "h").protocol, "HTTPS");
    }

    #[test]
    fn test_passive_protocols() {
        for (port, name) in [(22, "SSH"), (3306, "MySQL"), (5432, "PostgreSQL"), (3389, "RDP")] {
            let probe = lookup(port, "example.com");
            assert_eq!(probe.protocol, name);
            assert!(probe.is_passive(), "{name} should wait for a banner");
        }
    }

    #[test]
    fn test_host_substitution() {
        assert_eq!(
            payload(80, "example.com"),
            b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n"
        );
        assert_eq!(
            payload(443, "10.0.0.1"),
            b"GET / HTTP/1.1\r\nHost: 10.0.0.1\r\n\r\n"
        );
        // Templates without a placeholder are not copied.
        assert!(matches!(lookup(21, "h").payload, Some(Cow::Borrowed(_))));
    }

    #[test]
    fn test_dns_query_bytes() {
        let query = payload(53, "ignored");
        assert_eq!(query.len(), 32);
        assert_eq!(&query[..12], &[0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&query[12..28], b"\x03www\x06google\x03com\x00");
        assert_eq!(&query[28..], &[0, 1, 0, 1]);
    }

    #[test]
    fn test_unknown_port_falls_back_to_http() {
        for port in [0, 1, 12345, 65535] {
            let probe = lookup(port, "example.com");
            assert_eq!(probe.protocol, UNKNOWN_PROTOCOL);
            assert_eq!(
                probe.payload.as_deref(),
                Some(&b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n"[..])
            );
        }
    }

    #[test]
    fn test_lookup_is_deterministic() {
        for port in [21, 22, 53, 80, 9999] {
            assert_eq!(lookup(port, "host"), lookup(port, "host"));
        }
    }

    #[test]
    fn test_table_has_unique_ports() {
        assert_eq!(BY_PORT.len(), PROTOCOLS.len());
    }
}
