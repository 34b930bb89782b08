//! Textual envelope around the base64 license payload.
//!
//! A license file looks like:
//!
//! ```text
//! =====BEGIN MONSTA LICENSE=====
//! q83vASNFZ4mrze8BI0VniavN7wEjRWeJq83vASNFZ4mrze8BI0VniavN7wEjRWeJ
//! q83vASNFZ4mrze8BI0Vn
//! =====END MONSTA LICENSE=====
//! ```
//!
//! Blank lines and banner lines (longer than two characters, starting and
//! ending with `=`) are ignored wherever they appear; every other line is
//! payload, so any line wrapping is accepted.

/// Banner written before the payload.
pub const BEGIN_BANNER: &str = "=====BEGIN MONSTA LICENSE=====";

/// Banner written after the payload.
pub const END_BANNER: &str = "=====END MONSTA LICENSE=====";

/// Column width used when wrapping the payload.
pub const LINE_WIDTH: usize = 64;

/// Returns true for a banner/separator line.
#[must_use]
pub fn is_banner(line: &str) -> bool {
    line.len() > 2 && line.starts_with('=') && line.ends_with('=')
}

/// Concatenates the payload lines of a license file in order.
///
/// Payload lines are appended untrimmed; `\r\n` endings are accepted.
#[must_use]
pub fn extract_encoded_data(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty() && !is_banner(line))
        .collect()
}

/// Wraps a base64 payload between banners at [`LINE_WIDTH`] columns.
#[must_use]
pub fn wrap_encoded_data(encoded: &str) -> String {
    let chars: Vec<char> = encoded.chars().collect();
    let mut out = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH + 64);
    out.push_str(BEGIN_BANNER);
    out.push('\n');
    for chunk in chars.chunks(LINE_WIDTH) {
        out.extend(chunk);
        out.push('\n');
    }
    out.push_str(END_BANNER);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn banner_rule() {
        assert!(is_banner("====="));
        assert!(is_banner("=====BEGIN====="));
        assert!(is_banner("==="));
        assert!(!is_banner("=="));
        assert!(!is_banner("=abc"));
        assert!(!is_banner("abc="));
        // base64 padding on a payload line is not a banner
        assert!(!is_banner("QUJD=="));
    }

    #[test]
    fn skips_blank_and_banner_lines() {
        let contents = "=====BEGIN=====\n\nQUJD\n   \nREVG\n=====END=====\n";
        assert_eq!(extract_encoded_data(contents), "QUJDREVG");
    }

    #[test]
    fn crlf_endings() {
        let contents = "=====BEGIN=====\r\nQUJD\r\nREVG\r\n=====END=====\r\n";
        assert_eq!(extract_encoded_data(contents), "QUJDREVG");
    }

    #[test]
    fn payload_lines_kept_untrimmed() {
        assert_eq!(extract_encoded_data(" QUJD\n"), " QUJD");
    }

    #[test]
    fn wrap_then_extract() {
        let payload: String = "A".repeat(150);
        let wrapped = wrap_encoded_data(&payload);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines.first(), Some(&BEGIN_BANNER));
        assert_eq!(lines.last(), Some(&END_BANNER));
        assert_eq!(lines.len(), 2 + 3);
        assert!(lines[1..4].iter().all(|l| l.len() <= LINE_WIDTH));
        assert_eq!(extract_encoded_data(&wrapped), payload);
    }
}
