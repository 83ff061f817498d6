//! Application configuration parsed from the command line.
//!
//! Configuration is parsed once at startup, validated by clap, and passed
//! explicitly to the components that need it. Nothing here is mutable after
//! `Config::parse()` returns.
//!
//! ```bash
//! redirector --host 0.0.0.0:8080 --redirect https://example.com \
//!     --graceful-timeout 15s --debug
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

/// Service configuration, one instance per process.
#[derive(Parser, Debug, Clone)]
#[command(name = "redirector")]
#[command(version, about = "Redirects every incoming request to a single target URL")]
pub struct Config {
    /// IP and port to bind to
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub host: SocketAddr,

    /// Redirect target URL
    #[arg(long, default_value = "https://google.com", value_parser = parse_redirect)]
    pub redirect: String,

    /// Enable DEBUG log output
    #[arg(long)]
    pub debug: bool,

    /// How long to wait for in-flight requests to finish during shutdown,
    /// e.g. 15s or 1m
    #[arg(long, default_value = "5s", value_parser = parse_duration)]
    pub graceful_timeout: Duration,
}

/// Validates the redirect target as an absolute URL.
///
/// The original flag text is kept verbatim so the `Location` header carries
/// exactly what the operator configured, without URL normalization.
fn parse_redirect(s: &str) -> Result<String, String> {
    Url::parse(s).map_err(|e| format!("invalid redirect URL: {e}"))?;
    Ok(s.to_string())
}

/// Parses durations written as one or more `<integer><unit>` segments,
/// where the unit is `ms`, `s`, `m`, or `h`. `1m30s` is 90 seconds.
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("missing unit in duration {s:?}"))?;
        if digits_end == 0 {
            return Err(format!("invalid duration {s:?}"));
        }
        let value: u64 = rest[..digits_end]
            .parse()
            .map_err(|_| format!("invalid duration {s:?}"))?;
        rest = &rest[digits_end..];

        // "ms" must be tried before "m".
        let (unit_len, segment) = if rest.starts_with("ms") {
            (2, Some(Duration::from_millis(value)))
        } else if rest.starts_with('s') {
            (1, Some(Duration::from_secs(value)))
        } else if rest.starts_with('m') {
            (1, value.checked_mul(60).map(Duration::from_secs))
        } else if rest.starts_with('h') {
            (1, value.checked_mul(3600).map(Duration::from_secs))
        } else {
            return Err(format!("unknown unit in duration {s:?}"));
        };
        let segment = segment.ok_or_else(|| format!("duration {s:?} overflows"))?;
        total = total
            .checked_add(segment)
            .ok_or_else(|| format!("duration {s:?} overflows"))?;
        rest = &rest[unit_len..];
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::try_parse_from(["redirector"]).unwrap();
        assert_eq!(config.host, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.redirect, "https://google.com");
        assert!(!config.debug);
        assert_eq!(config.graceful_timeout, Duration::from_secs(5));
    }

    #[test]
    fn parses_all_flags() {
        let config = Config::try_parse_from([
            "redirector",
            "--host",
            "127.0.0.1:9000",
            "--redirect",
            "https://example.com/landing",
            "--debug",
            "--graceful-timeout",
            "1m30s",
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.redirect, "https://example.com/landing");
        assert!(config.debug);
        assert_eq!(config.graceful_timeout, Duration::from_secs(90));
    }

    #[test]
    fn rejects_invalid_redirect_url() {
        assert!(Config::try_parse_from(["redirector", "--redirect", "not a url"]).is_err());
    }

    #[test]
    fn rejects_invalid_bind_address() {
        assert!(Config::try_parse_from(["redirector", "--host", "nowhere"]).is_err());
    }

    #[test]
    fn duration_single_units() {
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
    }

    #[test]
    fn duration_compound_segments() {
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(
            parse_duration("1h30m").unwrap(),
            Duration::from_secs(90 * 60)
        );
    }

    #[test]
    fn duration_rejects_malformed_input() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("5").is_err());
        assert!(parse_duration("s").is_err());
        assert!(parse_duration("10x").is_err());
        assert!(parse_duration("ms").is_err());
    }

    #[test]
    fn duration_overflow_is_an_error() {
        // u64::MAX seconds plus anything exceeds Duration's range; the
        // parser must report it instead of panicking mid flag parse.
        assert!(parse_duration("18446744073709551615s500ms").is_err());
        assert!(parse_duration("18446744073709551615h").is_err());
        assert!(parse_duration("99999999999999999999s").is_err());
    }
}
