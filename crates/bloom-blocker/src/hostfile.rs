//! Hosts-file and domain-list parsing
//!
//! Blocklists use the hosts-file convention of sinkholing a name to
//! `0.0.0.0`:
//!
//! ```text
//! # comment
//! 0.0.0.0 ads.example.com
//! 0.0.0.0 tracker.example.net   # trailing comment
//! ```
//!
//! Test domain lists are looser: any IPv4 address followed by a hostname.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::net::Ipv4Addr;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{BlockerError, Result};

/// Address that marks a sinkholed hostname
pub const SINKHOLE_ADDR: &str = "0.0.0.0";

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Extract the hostname from a `0.0.0.0 <hostname>` line.
///
/// Returns the first hostname token. Comments, blank lines, other
/// addresses and a bare `0.0.0.0` yield `None`.
pub fn parse_hosts_line(line: &str) -> Option<&str> {
    let rest = strip_comment(line).strip_prefix(SINKHOLE_ADDR)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    rest.split_whitespace().next()
}

/// Extract the hostname from an `<ipv4> <hostname>` line.
pub fn parse_ip_prefixed_line(line: &str) -> Option<&str> {
    let mut tokens = strip_comment(line).split_whitespace();
    tokens.next()?.parse::<Ipv4Addr>().ok()?;
    tokens.next()
}

fn collect_lines<R, F>(reader: R, parse: F) -> Result<Vec<String>>
where
    R: BufRead,
    F: Fn(&str) -> Option<&str>,
{
    let mut hostnames = Vec::new();
    let mut skipped = 0usize;
    let mut lossy = 0usize;

    // Bytes that are not UTF-8 decode to U+FFFD instead of failing the load
    for raw in reader.split(b'\n') {
        let raw = raw?;
        let line = String::from_utf8_lossy(&raw);
        if let Cow::Owned(_) = line {
            lossy += 1;
        }
        match parse(&line) {
            Some(host) => hostnames.push(host.to_owned()),
            None => skipped += 1,
        }
    }

    if lossy > 0 {
        warn!(lines = lossy, "Replaced invalid UTF-8 in host lines");
    }
    debug!(parsed = hostnames.len(), skipped, "Parsed host lines");
    Ok(hostnames)
}

/// Read blocked hostnames from a hosts-format source, in file order
pub fn read_hostfile<R: BufRead>(reader: R) -> Result<Vec<String>> {
    collect_lines(reader, parse_hosts_line)
}

/// Read hostnames from an IP-prefixed domain list, in file order
pub fn read_domain_list<R: BufRead>(reader: R) -> Result<Vec<String>> {
    collect_lines(reader, parse_ip_prefixed_line)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| BlockerError::io(path, e))
}

/// Attach `path` to read failures that surfaced after the file was opened
fn with_path<T>(path: &Path, result: Result<T>) -> Result<T> {
    result.map_err(|e| match e {
        BlockerError::Read(source) => BlockerError::io(path, source),
        other => other,
    })
}

/// Load blocked hostnames from a hosts file on disk
pub fn load_hostfile(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let hosts = with_path(path, read_hostfile(open(path)?))?;
    info!(path = %path.display(), count = hosts.len(), "Loaded hosts file");
    Ok(hosts)
}

/// Load hostnames from an IP-prefixed domain list on disk
pub fn load_domain_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let domains = with_path(path, read_domain_list(open(path)?))?;
    info!(path = %path.display(), count = domains.len(), "Loaded domain list");
    Ok(domains)
}
