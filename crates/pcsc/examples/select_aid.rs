//! Example showing how to select an application by AID
//!
//! Cards that answer `61 XX` get their response fetched with GET RESPONSE
//! before it is printed.

use cardlink_pcsc::{CardSession, StatusWord};

// Define common AIDs (Application Identifiers)
struct AidRegistry;

impl AidRegistry {
    // Payment AIDs
    const VISA: &'static str = "A0000000031010";
    const MASTERCARD: &'static str = "A0000000041010";

    // Identity/Government AIDs
    const PIV: &'static str = "A0000003081000";

    // Other AIDs
    const OPENPGP: &'static str = "D27600012401";
}

/// Select an application by AID
fn select_aid(
    session: &mut CardSession<cardlink_pcsc::PcscService>,
    aid_hex: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let aid = hex::decode(aid_hex)?;

    let mut command = vec![0x00, 0xA4, 0x04, 0x00, aid.len() as u8];
    command.extend_from_slice(&aid);
    command.push(0x00);

    println!("Selecting AID: {aid_hex}");

    let response = session.send_command(&command)?;
    match StatusWord::from_response(&response) {
        Some(sw) if sw.is_success() => Ok(format!(
            "Selected successfully, {} data bytes returned",
            response.len() - 2
        )),
        Some(sw) => Ok(format!("Selection failed: {sw}")),
        None => Ok(format!("Malformed response: {}", hex::encode_upper(&response))),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = CardSession::system();

    let readers = session.list_readers()?;
    let Some(reader) = readers.first() else {
        println!("No readers found!");
        return Ok(());
    };

    session.connect(reader)?;
    println!("Using reader: {reader}");

    for aid in [
        AidRegistry::VISA,
        AidRegistry::MASTERCARD,
        AidRegistry::PIV,
        AidRegistry::OPENPGP,
    ] {
        match select_aid(&mut session, aid) {
            Ok(result) => println!("  {result}"),
            Err(e) => println!("  Error: {e}"),
        }
    }

    Ok(())
}
