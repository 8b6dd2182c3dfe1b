//! Client address classification.
//!
//! # Responsibilities
//! - Decide whether the effective client address is Local or Remote
//! - Resolve the effective address from the socket peer and the
//!   `X-Forwarded-For` chain according to the configured trust variant
//!
//! # Design Decisions
//! - Pure function, no I/O; malformed addresses classify as Remote
//!   (fail closed toward requiring auth)
//! - Only the first forwarded entry is consulted: single split, O(1)
//!   in header length
//! - The forwarded header is client-supplied and taken at face value;
//!   there is no trusted-proxy allowlist. Deployments that cannot
//!   tolerate spoofing must strip the header at the edge.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Whether the effective client address falls within loopback or
/// private network ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Local,
    Remote,
}

/// Which forwarded-header trust variant a deployment runs.
///
/// The two variants ship in different deployments and must not be
/// merged: a given process runs exactly one, picked by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForwardedTrust {
    /// Substitute the first forwarded entry whenever the header is
    /// present, regardless of who the peer is.
    Always,

    /// Only honor the forwarded header when the socket peer itself is
    /// a local address (i.e. the request came through a co-located
    /// proxy). Additionally treats any effective address containing
    /// "localhost" (case-insensitive) as Local.
    WhenPeerLocal,
}

/// Classify a request given the transport peer address and the raw
/// `X-Forwarded-For` header value, if any.
pub fn classify(peer: &str, forwarded: Option<&str>, trust: ForwardedTrust) -> Classification {
    let first_hop = first_forwarded_entry(forwarded);

    let effective = match trust {
        ForwardedTrust::Always => first_hop.unwrap_or(peer),
        ForwardedTrust::WhenPeerLocal => {
            if is_local_range(peer) {
                first_hop.unwrap_or(peer)
            } else {
                peer
            }
        }
    };

    let local = match trust {
        ForwardedTrust::Always => is_local_range(effective),
        ForwardedTrust::WhenPeerLocal => {
            is_local_range(effective) || effective.to_ascii_lowercase().contains("localhost")
        }
    };

    if local {
        Classification::Local
    } else {
        Classification::Remote
    }
}

/// First comma-separated entry of the forwarded chain. An empty header
/// (or an empty first entry) counts as absent.
fn first_forwarded_entry(forwarded: Option<&str>) -> Option<&str> {
    forwarded
        .and_then(|chain| chain.split(',').next())
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// True when the string parses as an IP literal inside loopback or
/// private ranges. Anything unparseable is not local.
fn is_local_range(addr: &str) -> bool {
    match addr.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => v4.is_loopback() || v4.is_private() || v4.is_link_local(),
        Ok(IpAddr::V6(v6)) => {
            let segments = v6.segments();
            v6.is_loopback()
                // fc00::/7 unique local
                || (segments[0] & 0xfe00) == 0xfc00
                // fe80::/10 link local
                || (segments[0] & 0xffc0) == 0xfe80
        }
        Err(_) => false,
    }
}
