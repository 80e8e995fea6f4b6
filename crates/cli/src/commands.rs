use std::{
    error::Error,
    io::{self, BufRead, Write},
};

use cardlink_pcsc::{CardService, CardSession, StatusWord};

use crate::utils::{connect_reader, parse_apdu};

/// List available readers
pub(crate) fn list_readers<S: CardService>(
    session: &mut CardSession<S>,
) -> Result<(), Box<dyn Error>> {
    let readers = session.list_readers()?;

    if readers.is_empty() {
        println!("No readers found!");
        return Ok(());
    }

    println!("Available readers:");
    for (i, reader) in readers.iter().enumerate() {
        println!("{}. {}", i + 1, reader);
    }

    Ok(())
}

/// Connect and print the ATR
pub(crate) fn print_atr<S: CardService>(
    session: &mut CardSession<S>,
    reader: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    connect_reader(session, reader)?;
    println!("ATR: {}", hex::encode_upper(session.atr()?));
    Ok(())
}

/// Send each APDU in turn, stopping at the first failure
pub(crate) fn send_all<S: CardService>(
    session: &mut CardSession<S>,
    reader: Option<&str>,
    apdus: &[String],
) -> Result<(), Box<dyn Error>> {
    let commands = apdus
        .iter()
        .map(|apdu| parse_apdu(apdu))
        .collect::<Result<Vec<_>, _>>()?;

    connect_reader(session, reader)?;
    for command in &commands {
        println!("> {}", hex::encode_upper(command));
        let response = session.send_command(command)?;
        print_response(&response);
    }

    Ok(())
}

/// Interactive APDU shell
pub(crate) fn shell<S: CardService>(
    session: &mut CardSession<S>,
    reader: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    connect_reader(session, reader)?;

    println!("\nAPDU Shell - Enter commands in hex format or 'help' for assistance");
    println!("Examples:");
    println!("  00A404000AA000000003000000");
    println!("  00 A4 04 00 0A A0 00 00 00 03 00 00 00");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(Ok(input)) => input,
            _ => break,
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "exit" | "quit" | "q" => break,

            "help" | "?" => {
                println!("Commands:");
                println!("  <hex>      - Send APDU command (e.g., '00A4040008A000000003000000')");
                println!("  atr        - Display the card's ATR");
                println!("  reconnect  - Close and reopen the reader connection");
                println!("  help       - Show this help");
                println!("  exit       - Exit the shell");
            }

            "atr" => match session.atr() {
                Ok(atr) => println!("ATR: {}", hex::encode_upper(&atr)),
                Err(e) => println!("Error getting ATR: {e}"),
            },

            "reconnect" => {
                let Some(name) = session.reader_name().map(str::to_owned) else {
                    println!("Not connected");
                    continue;
                };
                match session.connect(&name) {
                    Ok(protocol) => println!("Reconnected to {name} ({protocol})"),
                    Err(e) => println!("Error reconnecting: {e}"),
                }
            }

            _ => match parse_apdu(input) {
                Ok(command) => match session.send_command(&command) {
                    Ok(response) => print_response(&response),
                    Err(e) => println!("Command failed: {e}"),
                },
                Err(e) => println!("{e}"),
            },
        }
    }

    session.disconnect();
    println!("Goodbye!");
    Ok(())
}

fn print_response(response: &[u8]) {
    println!("Response:");
    match StatusWord::from_response(response) {
        Some(status) => {
            println!("  Status: {status}");
            let payload = &response[..response.len() - 2];
            if !payload.is_empty() {
                println!("  Data: {}", hex::encode_upper(payload));
            }
        }
        None => println!("  Raw: {}", hex::encode_upper(response)),
    }
}
