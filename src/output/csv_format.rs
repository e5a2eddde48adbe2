//! CSV output formatting.

use crate::summary::ScanSummary;
use std::io::{self, Write};

/// Write one CSV row per port, with a header row.
pub fn write_csv<W: Write>(summary: &ScanSummary, out: W) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    wtr.write_record(["port", "protocol", "status", "banner", "error"])?;

    for result in &summary.results {
        wtr.write_record([
            result.port.to_string().as_str(),
            result.protocol.as_str(),
            result.status.as_str(),
            result.banner.as_str(),
            result.error_detail.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Print results in CSV format.
pub fn print_csv(summary: &ScanSummary) -> io::Result<()> {
    write_csv(summary, io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::scanner::PortResult;
    use crate::types::Port;

    #[test]
    fn test_write_csv() {
        let mut summary = ScanSummary::new("example.com", 2);
        summary.record(PortResult::open(
            Port::new(25).unwrap(),
            "SMTP",
            "220 mx ESMTP\r\n250 OK",
        ));
        summary.record(PortResult::failed(
            Port::new(110).unwrap(),
            "POP3",
            &ScanError::ConnectionRefused,
        ));

        let mut buf = Vec::new();
        write_csv(&summary, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("port,protocol,status,banner,error\n"));
        // Multi-line banners are quoted, not split across rows.
        assert!(text.contains("25,SMTP,OPEN,\"220 mx ESMTP\r\n250 OK\",\n"));
        assert!(text.ends_with("110,POP3,CLOSED,,connection refused\n"));
    }
}
