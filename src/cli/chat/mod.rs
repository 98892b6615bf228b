//! Chat command - interactive question loop in the terminal

use std::io::{self, Write};

use crate::config::AppConfig;
use crate::domain::session::ChatTurn;
use crate::infrastructure::logging;

/// Run the interactive loop.
///
/// Prompts for a user name and conversation id (combined into the session
/// id), optionally rebuilds the index from a PDF first, then answers
/// questions until "exit". Per-question failures are printed and the loop
/// continues; the cache persists on every store, so quitting needs no extra
/// flush.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let user = prompt("User name: ")?;
    let conversation = prompt("Conversation id: ")?;
    let session_id = format!("{user} - {conversation}");

    if prompt("Index a new PDF first (y/n)? ")?.eq_ignore_ascii_case("y") {
        let pdf = prompt("Path to the PDF: ")?;
        let service = crate::create_ingestion_service(&config)?;
        let index = service.ingest_file(pdf.as_ref()).await?;
        println!("Indexed {} chunks.", index.len());
    }

    let state = crate::create_app_state(&config).await?;
    state.sessions.ensure(&session_id).await;

    loop {
        let query = prompt("You: ")?;

        if query.eq_ignore_ascii_case("exit") {
            break;
        }

        if query.is_empty() {
            continue;
        }

        match state.chat.answer(&query, &session_id).await {
            Ok(answer) => {
                println!("Assistant: {answer}");
                state
                    .sessions
                    .append(
                        &session_id,
                        vec![ChatTurn::user(&query), ChatTurn::assistant(&answer)],
                    )
                    .await;
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }

    Ok(())
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    Ok(line.trim().to_string())
}
