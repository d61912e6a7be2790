//! Interactive chat loop against a running server. Preference is sticky
//! until changed with `pref`; `clear` wipes the server-side session;
//! `quit`/`exit` leaves.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde_json::json;
use shopscout_core::ranking::PreferenceMode;

use crate::commands::CommandResult;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplAction {
    Quit,
    Clear,
    SetPreference(String),
    Send(String),
    Nothing,
}

fn parse_action(input: &str) -> ReplAction {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ReplAction::Nothing;
    }

    let lowered = trimmed.to_lowercase();
    if lowered == "quit" || lowered == "exit" {
        return ReplAction::Quit;
    }
    if lowered == "clear" {
        return ReplAction::Clear;
    }
    if let Some(raw) = lowered.strip_prefix("pref ") {
        return ReplAction::SetPreference(raw.trim().to_string());
    }

    ReplAction::Send(trimmed.to_string())
}

pub fn run(server_url: String) -> CommandResult {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "chat",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let client = reqwest::Client::new();
    let server_url = server_url.trim_end_matches('/').to_string();

    println!("--- Shopscout shopping assistant ---");
    println!("Type 'quit' or 'exit' to close.");
    println!("Type 'clear' to reset the conversation memory.");
    println!("Set preference with 'pref price', 'pref quality', or 'pref balanced'.");
    println!("{}", "-".repeat(40));

    let mut preference = PreferenceMode::Balanced;
    let mut session_id: Option<String> = None;
    let stdin = io::stdin();

    loop {
        print!("\nYou: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(error) => {
                return CommandResult::failure("chat", "io", error.to_string(), 4);
            }
        }

        match parse_action(&line) {
            ReplAction::Nothing => continue,
            ReplAction::Quit => {
                println!("\n[System] Goodbye.");
                break;
            }
            ReplAction::SetPreference(raw) => match PreferenceMode::from_str(&raw) {
                Ok(mode) => {
                    preference = mode;
                    println!("[System] Preference set to: {}", mode.as_str());
                }
                Err(_) => {
                    println!("[System] Invalid preference. Choose from: price, quality, balanced.");
                }
            },
            ReplAction::Clear => {
                match runtime.block_on(clear_memory(&client, &server_url, session_id.as_deref())) {
                    Ok(()) => {
                        session_id = None;
                        println!("\n[System] Memory cleared. Ready for a fresh start.");
                    }
                    Err(error) => println!("\n[Error] Could not clear memory: {error:#}"),
                }
            }
            ReplAction::Send(text) => {
                println!("[System] Sending request...");
                match runtime.block_on(converse(
                    &client,
                    &server_url,
                    &text,
                    preference,
                    session_id.as_deref(),
                )) {
                    Ok((reply, new_session_id)) => {
                        session_id = Some(new_session_id);
                        println!("\nAgent:\n{reply}");
                    }
                    Err(error) => println!("\n[Error] {error:#}"),
                }
            }
        }
    }

    CommandResult::success("chat", "chat session ended")
}

async fn converse(
    client: &reqwest::Client,
    server_url: &str,
    text: &str,
    preference: PreferenceMode,
    session_id: Option<&str>,
) -> Result<(String, String)> {
    let payload = json!({
        "request": text,
        "preference": preference.as_str(),
        "session_id": session_id,
    });

    let response = client
        .post(format!("{server_url}/api/converse"))
        .json(&payload)
        .send()
        .await
        .context("could not reach the server; is shopscout-server running?")?;

    let status = response.status();
    let body: serde_json::Value =
        response.json().await.context("server response was not json")?;

    if !status.is_success() {
        let detail = body["error"].as_str().unwrap_or("no details provided");
        return Err(anyhow!("server responded with {status}: {detail}"));
    }

    let reply = body["response"]
        .as_str()
        .ok_or_else(|| anyhow!("server response missing `response` field"))?
        .to_string();
    let new_session_id = body["session_id"]
        .as_str()
        .ok_or_else(|| anyhow!("server response missing `session_id` field"))?
        .to_string();

    Ok((reply, new_session_id))
}

async fn clear_memory(
    client: &reqwest::Client,
    server_url: &str,
    session_id: Option<&str>,
) -> Result<()> {
    let response = client
        .post(format!("{server_url}/api/memory/clear"))
        .json(&json!({ "session_id": session_id }))
        .send()
        .await
        .context("could not reach the server; is shopscout-server running?")?;

    if !response.status().is_success() {
        return Err(anyhow!("server responded with {}", response.status()));
    }

    Ok(())
}
