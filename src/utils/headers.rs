//! Browser-like request header randomization
//!
//! Outbound provider traffic carries a randomly selected desktop user agent
//! and a static set of standard browser headers so the request cadence does
//! not carry an obvious automation fingerprint. Stateless: every call is a
//! pure function of the pool.

use rand::seq::IndexedRandom;

/// Fixed pool of realistic desktop browser user agents
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36 Edg/125.0.0.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:127.0) Gecko/20100101 Firefox/127.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
];

/// Static browser headers paired with every randomized user agent.
///
/// Accept-Encoding is deliberately absent: reqwest advertises the formats it
/// was built with (gzip, br, deflate) and setting the header manually would
/// disable its automatic decompression.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.9,id;q=0.8"),
    ("Connection", "keep-alive"),
    ("Sec-Fetch-Dest", "document"),
    ("Sec-Fetch-Mode", "navigate"),
    ("Sec-Fetch-Site", "none"),
    ("Sec-Fetch-User", "?1"),
    ("Upgrade-Insecure-Requests", "1"),
];

/// Pick one user agent from the pool, uniformly at random
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// A full browser-like header set with a freshly randomized user agent
pub fn randomized_headers() -> Vec<(&'static str, &'static str)> {
    let mut headers = Vec::with_capacity(BROWSER_HEADERS.len() + 1);
    headers.push(("User-Agent", random_user_agent()));
    headers.extend_from_slice(BROWSER_HEADERS);
    headers
}
