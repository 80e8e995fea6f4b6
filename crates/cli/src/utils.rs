use std::error::Error;

use cardlink_pcsc::{CardService, CardSession};
use tracing::info;

/// Decode an APDU written in hex, ignoring whitespace
pub(crate) fn parse_apdu(input: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let clean: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if clean.is_empty() {
        return Err("Empty APDU".into());
    }
    let bytes = hex::decode(&clean).map_err(|e| format!("Invalid hex '{input}': {e}"))?;
    if bytes.len() < 4 {
        return Err(format!("APDU command too short: {} bytes", bytes.len()).into());
    }
    Ok(bytes)
}

/// Pick the requested reader, or the first one when none is requested
pub(crate) fn choose_reader(
    readers: &[String],
    requested: Option<&str>,
) -> Result<String, Box<dyn Error>> {
    match requested {
        Some(name) => readers
            .iter()
            .find(|r| r.as_str() == name)
            .cloned()
            .ok_or_else(|| format!("Reader '{name}' not found").into()),
        None => readers.first().cloned().ok_or_else(|| "No readers found!".into()),
    }
}

/// Resolve the reader to use and connect to it
pub(crate) fn connect_reader<S: CardService>(
    session: &mut CardSession<S>,
    requested: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let readers = session.list_readers()?;
    let reader = choose_reader(&readers, requested)?;

    info!("Using reader: {reader}");
    let protocol = session.connect(&reader)?;
    println!("Connected to {reader} ({protocol})");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_apdu() {
        assert_eq!(
            parse_apdu("00A4040008A000000003000000").unwrap(),
            hex::decode("00A4040008A000000003000000").unwrap()
        );
        assert_eq!(
            parse_apdu("00 a4 04 00 00").unwrap(),
            vec![0x00, 0xA4, 0x04, 0x00, 0x00]
        );
    }

    #[test]
    fn test_parse_apdu_rejects_bad_input() {
        assert!(parse_apdu("").is_err());
        assert!(parse_apdu("   ").is_err());
        assert!(parse_apdu("00A4").is_err());
        assert!(parse_apdu("00A40400Z").is_err());
        assert!(parse_apdu("00A404000").is_err());
    }

    #[test]
    fn test_choose_reader() {
        let readers = vec!["Reader A".to_string(), "Reader B".to_string()];
        assert_eq!(choose_reader(&readers, None).unwrap(), "Reader A");
        assert_eq!(choose_reader(&readers, Some("Reader B")).unwrap(), "Reader B");
        assert!(choose_reader(&readers, Some("Reader C")).is_err());
        assert!(choose_reader(&[], None).is_err());
    }
}
