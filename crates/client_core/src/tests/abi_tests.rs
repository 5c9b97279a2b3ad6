use super::*;

#[test]
fn selector_matches_known_erc20_transfer() {
    assert_eq!(
        function_selector("transfer(address,uint256)"),
        [0xa9, 0x05, 0x9c, 0xbb]
    );
}

#[test]
fn request_commission_selector_from_canonical_and_fragment() {
    let canonical = FunctionCall::parse("requestCommission(string,string,string)").expect("parse");
    let fragment = FunctionCall::parse(
        "function requestCommission(string memory title, string memory description, string memory reference) public payable",
    )
    .expect("parse fragment");

    assert_eq!(canonical.selector(), [0xf6, 0x0d, 0x50, 0x3e]);
    assert_eq!(canonical, fragment);
    assert_eq!(fragment.arity(), 3);
    assert_eq!(fragment.canonical(), "requestCommission(string,string,string)");
}

#[test]
fn rejects_non_string_parameters() {
    let err = FunctionCall::parse("requestCommission(string,uint256)").expect_err("must fail");
    assert_eq!(err, AbiError::UnsupportedType("uint256".into()));

    assert!(matches!(
        FunctionCall::parse("requestCommission"),
        Err(AbiError::MalformedSignature(_))
    ));
}

#[test]
fn encodes_single_string_argument() {
    let call = FunctionCall::parse("f(string)").expect("parse");
    let data = call.encode(&["a"]).expect("encode");

    assert_eq!(data.len(), 4 + 3 * 32);
    assert_eq!(&data[..4], &call.selector());
    // head: offset of the tail
    assert_eq!(data[4 + 31], 0x20);
    // tail: length then right-padded bytes
    assert_eq!(data[4 + 63], 1);
    assert_eq!(data[4 + 64], b'a');
    assert!(data[4 + 65..].iter().all(|b| *b == 0));
}

#[test]
fn encodes_three_strings_with_empty_reference() {
    let call = FunctionCall::parse("requestCommission(string,string,string)").expect("parse");
    let description = "A fantasy portrait of a knight in silver armour";
    let data = call
        .encode(&["Portrait", description, ""])
        .expect("encode");

    // 3 head words, then: len+1 word, len+2 words, len only
    assert_eq!(data.len(), 4 + 3 * 32 + 2 * 32 + 3 * 32 + 32);

    let offsets: Vec<usize> = (0..3)
        .map(|i| {
            let start = 4 + i * 32;
            U256::from_be_slice(&data[start..start + 32]).to::<usize>()
        })
        .collect();
    assert_eq!(offsets, vec![96, 160, 256]);

    let desc_len_at = 4 + offsets[1];
    assert_eq!(
        U256::from_be_slice(&data[desc_len_at..desc_len_at + 32]).to::<usize>(),
        description.len()
    );
    let reference_len_at = 4 + offsets[2];
    assert!(data[reference_len_at..].iter().all(|b| *b == 0));
}

#[test]
fn argument_count_must_match() {
    let call = FunctionCall::parse("requestCommission(string,string,string)").expect("parse");
    assert_eq!(
        call.encode(&["only one"]).expect_err("must fail"),
        AbiError::ArgumentCount {
            expected: 3,
            actual: 1
        }
    );
}
