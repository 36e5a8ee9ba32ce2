//! Listening sockets from the kernel tables in `/proc/net`.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::Path;

use crate::domain::entities::socket::{ListeningSocket, Protocol};
use crate::domain::ports::collector::CollectionError;

const TCP_LISTEN: &str = "0A";
/// Unconnected UDP sockets report `TCP_CLOSE`.
const UDP_UNCONNECTED: &str = "07";

const TABLES: [(&str, Protocol); 4] = [
    ("tcp", Protocol::Tcp),
    ("tcp6", Protocol::Tcp6),
    ("udp", Protocol::Udp),
    ("udp6", Protocol::Udp6),
];

/// Reads every table under `proc_net_dir` (normally `/proc/net`).
///
/// Missing tables (e.g. IPv6 disabled) are skipped; when none can be read
/// the error is reported.
pub fn read_listening_sockets(proc_net_dir: &Path) -> Result<Vec<ListeningSocket>, CollectionError> {
    let mut sockets = Vec::new();
    let mut read_any = false;

    for (table, protocol) in TABLES {
        let path = proc_net_dir.join(table);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                read_any = true;
                sockets.extend(parse_table(&content, protocol));
            }
            Err(e) => tracing::debug!(path = %path.display(), "Skipping socket table: {e}"),
        }
    }

    if !read_any {
        return Err(CollectionError::MetricsUnavailable(format!(
            "no socket table readable under {}",
            proc_net_dir.display()
        )));
    }

    sockets.sort_by(|a, b| (a.port, a.protocol as u8).cmp(&(b.port, b.protocol as u8)));
    sockets.dedup();
    Ok(sockets)
}

/// Parses one `/proc/net/{tcp,tcp6,udp,udp6}` table, keeping listening entries.
#[must_use]
pub fn parse_table(content: &str, protocol: Protocol) -> Vec<ListeningSocket> {
    let wanted_state = match protocol {
        Protocol::Tcp | Protocol::Tcp6 => TCP_LISTEN,
        Protocol::Udp | Protocol::Udp6 => UDP_UNCONNECTED,
    };

    content
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let (local, state) = (fields.get(1)?, fields.get(3)?);
            if !state.eq_ignore_ascii_case(wanted_state) {
                return None;
            }
            let (address, port) = parse_endpoint(local)?;
            Some(ListeningSocket {
                protocol,
                address,
                port,
            })
        })
        .collect()
}

/// Decodes `ADDR:PORT` where the address is printed as native-endian 32-bit words.
fn parse_endpoint(raw: &str) -> Option<(IpAddr, u16)> {
    let (addr_hex, port_hex) = raw.split_once(':')?;
    let port = u16::from_str_radix(port_hex, 16).ok()?;

    let address = match addr_hex.len() {
        8 => {
            let word = u32::from_str_radix(addr_hex, 16).ok()?;
            IpAddr::V4(Ipv4Addr::from(word.to_ne_bytes()))
        }
        32 => {
            let mut octets = [0u8; 16];
            for (i, chunk) in octets.chunks_exact_mut(4).enumerate() {
                let word = u32::from_str_radix(addr_hex.get(i * 8..i * 8 + 8)?, 16).ok()?;
                chunk.copy_from_slice(&word.to_ne_bytes());
            }
            IpAddr::V6(Ipv6Addr::from(octets))
        }
        _ => return None,
    };

    Some((address, port))
}
