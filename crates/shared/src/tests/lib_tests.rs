use alloy_primitives::{Address, TxHash, U64};

use crate::{
    domain::{Account, ArtistId, CommissionDraft, DraftField, SubmissionState},
    error::{CommissionError, ErrorCode, FailureReason},
    protocol::{RpcErrorObject, RpcTransactionReceipt, TransactionReceipt, UNAUTHORIZED},
};

#[test]
fn draft_field_parses_view_names() {
    assert_eq!("title".parse::<DraftField>().unwrap(), DraftField::Title);
    assert_eq!(
        " description ".parse::<DraftField>().unwrap(),
        DraftField::Description
    );
    assert_eq!(
        "referenceUrl".parse::<DraftField>().unwrap(),
        DraftField::ReferenceUrl
    );
    assert_eq!(
        "reference".parse::<DraftField>().unwrap(),
        DraftField::ReferenceUrl
    );

    let err = "budget".parse::<DraftField>().expect_err("unknown field");
    assert_eq!(err.to_string(), "unknown draft field 'budget'");
}

#[test]
fn account_short_label_keeps_prefix() {
    let account = Account::new(Address::repeat_byte(0xab));
    assert_eq!(account.short_label().to_ascii_lowercase(), "0xabab...");
    assert_eq!(account.to_string().len(), 42);
}

#[test]
fn draft_clear_keeps_target_artist() {
    let mut draft = CommissionDraft::for_artist(ArtistId(2));
    draft.set(DraftField::Title, "Portrait".into());
    draft.set(DraftField::ReferenceUrl, "https://example.com/ref.png".into());
    assert!(draft.has_input());

    draft.clear_fields();
    assert!(!draft.has_input());
    assert_eq!(draft.target_artist, Some(ArtistId(2)));
}

#[test]
fn receipt_status_maps_to_success_flag() {
    let hash = TxHash::repeat_byte(0x11);
    let mined = RpcTransactionReceipt {
        transaction_hash: hash,
        block_number: Some(U64::from(42)),
        gas_used: Some(U64::from(21_000)),
        status: Some(U64::from(1)),
    };
    let receipt = TransactionReceipt::from(mined.clone());
    assert!(receipt.succeeded);
    assert_eq!(receipt.block_number, Some(42));
    assert_eq!(receipt.gas_used, Some(21_000));

    let reverted = RpcTransactionReceipt {
        status: Some(U64::ZERO),
        ..mined
    };
    assert!(!TransactionReceipt::from(reverted).succeeded);
}

#[test]
fn receipt_parses_from_wallet_json() {
    let raw = serde_json::json!({
        "transactionHash": format!("0x{}", "22".repeat(32)),
        "blockNumber": "0x10",
        "gasUsed": "0x5208",
        "status": "0x1",
        "logs": []
    });
    let parsed: RpcTransactionReceipt = serde_json::from_value(raw).expect("receipt");
    assert_eq!(parsed.block_number, Some(U64::from(16)));
    assert_eq!(parsed.status, Some(U64::from(1)));
}

#[test]
fn user_rejection_codes_are_recognized() {
    let rejected = RpcErrorObject {
        code: 4001,
        message: "User rejected the request.".into(),
        data: None,
    };
    assert!(rejected.is_user_rejection());

    let internal = RpcErrorObject {
        code: -32603,
        message: "internal".into(),
        data: None,
    };
    assert!(!internal.is_user_rejection());

    let unauthorized = RpcErrorObject {
        code: UNAUTHORIZED,
        message: "The requested account has not been authorized.".into(),
        data: None,
    };
    assert!(!unauthorized.is_user_rejection());
}

#[test]
fn failure_reason_carries_code_and_message() {
    let err = CommissionError::Validation(DraftField::ReferenceUrl);
    let reason = FailureReason::from(&err);
    assert_eq!(reason.code, ErrorCode::Validation);
    assert_eq!(reason.message, "invalid reference_url");
    assert_eq!(err.invalid_field(), Some(DraftField::ReferenceUrl));
    assert!(!err.is_retryable());
    assert!(CommissionError::UserRejected.is_retryable());
}

#[test]
fn submission_state_serializes_tagged() {
    let failed = SubmissionState::Failed(FailureReason::new(ErrorCode::UserRejected, "declined"));
    let json = serde_json::to_value(&failed).expect("serialize");
    assert_eq!(json["state"], "failed");
    assert_eq!(json["detail"]["code"], "user_rejected");
    assert_eq!(
        serde_json::to_value(SubmissionState::Idle).expect("serialize")["state"],
        "idle"
    );
}
