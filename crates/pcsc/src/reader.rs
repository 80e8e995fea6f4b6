//! Reader name lists as returned by the resource manager

use tracing::warn;

/// Split a NUL-delimited, double-NUL-terminated multi-string into reader names
///
/// Parsing stops at the first empty entry or at the end of the buffer, so a
/// missing final terminator is tolerated. Names that are not valid UTF-8 are
/// skipped with a warning: they could not be passed back to connect unchanged.
pub fn parse_reader_names(buffer: &[u8]) -> Vec<String> {
    buffer
        .split(|&byte| byte == 0)
        .take_while(|name| !name.is_empty())
        .filter_map(|name| match std::str::from_utf8(name) {
            Ok(name) => Some(name.to_owned()),
            Err(_) => {
                warn!(reader = %hex::encode(name), "Skipping reader with non UTF-8 name");
                None
            }
        })
        .collect()
}

/// Encode reader names as a multi-string, the inverse of [`parse_reader_names`]
pub fn encode_reader_names<S: AsRef<str>>(names: &[S]) -> Vec<u8> {
    let capacity = names.iter().map(|n| n.as_ref().len() + 1).sum::<usize>() + 1;
    let mut buffer = Vec::with_capacity(capacity);
    for name in names {
        buffer.extend_from_slice(name.as_ref().as_bytes());
        buffer.push(0);
    }
    buffer.push(0);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_readers() {
        let names = parse_reader_names(b"Reader A\0Reader B\0\0");
        assert_eq!(names, vec!["Reader A", "Reader B"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_reader_names(b"").is_empty());
        assert!(parse_reader_names(b"\0").is_empty());
        assert!(parse_reader_names(b"\0\0").is_empty());
    }

    #[test]
    fn test_parse_stops_at_double_nul() {
        let names = parse_reader_names(b"First\0\0Stale\0\0");
        assert_eq!(names, vec!["First"]);
    }

    #[test]
    fn test_parse_missing_terminator() {
        let names = parse_reader_names(b"Only reader");
        assert_eq!(names, vec!["Only reader"]);
    }

    #[test]
    fn test_parse_skips_invalid_utf8() {
        assert!(parse_reader_names(b"Lecteur \xE9\0\0").is_empty());
        let names = parse_reader_names(b"Lecteur \xE9\0Reader B\0\0");
        assert_eq!(names, vec!["Reader B"]);
    }

    #[test]
    fn test_encode() {
        assert_eq!(
            encode_reader_names(&["Reader A", "Reader B"]),
            b"Reader A\0Reader B\0\0"
        );
        assert_eq!(encode_reader_names::<&str>(&[]), b"\0");
    }
}
