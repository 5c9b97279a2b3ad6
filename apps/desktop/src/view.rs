//! Terminal rendering of roster, wallet and submission state.

use client_core::Roster;
use shared::{
    domain::{Account, DraftField, Receipt, SubmissionState},
    error::CommissionError,
};

pub fn print_roster(roster: &Roster) {
    for artist in roster.artists() {
        println!("[{}] {}", artist.id, artist.name);
        println!("    {}", artist.specialty);
        println!("    portfolio: {}", artist.portfolio_image);
    }
}

pub fn connected_label(account: &Account) -> String {
    format!("{} Connected", account.short_label())
}

pub fn describe_failure(err: &CommissionError) -> String {
    match err {
        CommissionError::WalletUnavailable => {
            "No wallet found. Install a wallet (use the Monad Testnet RPC) and set rpc_url."
                .to_string()
        }
        CommissionError::UserRejected => {
            "Request declined in the wallet; run the command again to retry.".to_string()
        }
        CommissionError::NotConnected => "Connect a wallet before submitting.".to_string(),
        CommissionError::Validation(field) => match field {
            DraftField::Title => "Title is required.".to_string(),
            DraftField::Description => "Description is required.".to_string(),
            DraftField::ReferenceUrl => {
                "Reference must be a full URL such as https://example.com/ref.png.".to_string()
            }
        },
        CommissionError::TransactionReverted { tx_hash } => {
            format!("Commission request was rejected by the contract (tx {tx_hash}).")
        }
        CommissionError::Provider(message) => {
            format!("Failed to submit commission: {message}")
        }
        CommissionError::SubmissionInFlight => {
            "A commission request is already being submitted.".to_string()
        }
        CommissionError::ConfirmationTimeout { tx_hash, waited_secs } => format!(
            "Transaction {tx_hash} was sent but not confirmed within {waited_secs}s; check it in a block explorer before retrying."
        ),
        CommissionError::Disposed => "The session has ended.".to_string(),
    }
}

pub fn submission_line(state: &SubmissionState) -> Option<String> {
    match state {
        SubmissionState::Pending => Some("Submitting...".to_string()),
        _ => None,
    }
}

pub fn confirmed_line(receipt: &Receipt) -> String {
    match receipt.block_number {
        Some(block) => format!(
            "Commission submitted successfully! tx {} in block {block}",
            receipt.tx_hash
        ),
        None => format!("Commission submitted successfully! tx {}", receipt.tx_hash),
    }
}

/// Parses `name=value` for `--set`, e.g. `title=Portrait`.
pub fn parse_field_assignment(raw: &str) -> Result<(DraftField, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let field = name.parse::<DraftField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}
