//! Example showing how to enumerate connected card readers and read each ATR

use cardlink_pcsc::CardSession;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = CardSession::system();

    let readers = session.list_readers()?;

    println!("Found {} readers:", readers.len());

    for (i, reader) in readers.iter().enumerate() {
        println!("{}. Reader: {}", i + 1, reader);

        match session.connect(reader) {
            Ok(protocol) => match session.atr() {
                Ok(atr) => println!(
                    "   Card present ({protocol}), ATR: {}",
                    hex::encode_upper(atr)
                ),
                Err(e) => println!("   Card present ({protocol}), ATR unavailable: {e}"),
            },
            Err(e) => println!("   No card: {e}"),
        }
        session.disconnect();
    }

    Ok(())
}
