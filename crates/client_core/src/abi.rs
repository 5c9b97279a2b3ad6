//! Minimal Solidity ABI support for calls whose parameters are all `string`.

use alloy_primitives::{keccak256, Bytes, U256};
use thiserror::Error;

const WORD: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("malformed function signature '{0}'")]
    MalformedSignature(String),
    #[error("unsupported parameter type '{0}' (only string is supported)")]
    UnsupportedType(String),
    #[error("expected {expected} arguments, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },
}

/// A parsed contract function. Accepts either the canonical form
/// `requestCommission(string,string,string)` or a human-readable fragment such as
/// `function requestCommission(string memory title, ...) public payable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    name: String,
    arity: usize,
    selector: [u8; 4],
}

impl FunctionCall {
    pub fn parse(signature: &str) -> Result<Self, AbiError> {
        let malformed = || AbiError::MalformedSignature(signature.to_string());

        let trimmed = signature.trim();
        let trimmed = trimmed.strip_prefix("function ").unwrap_or(trimmed).trim();
        let open = trimmed.find('(').ok_or_else(malformed)?;
        let close = trimmed.rfind(')').ok_or_else(malformed)?;
        if close < open {
            return Err(malformed());
        }

        let name = trimmed[..open].trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(malformed());
        }

        let params = trimmed[open + 1..close].trim();
        let mut arity = 0;
        if !params.is_empty() {
            for param in params.split(',') {
                let ty = param.split_whitespace().next().ok_or_else(malformed)?;
                if ty != "string" {
                    return Err(AbiError::UnsupportedType(ty.to_string()));
                }
                arity += 1;
            }
        }

        let canonical = format!("{name}({})", vec!["string"; arity].join(","));
        Ok(Self {
            name: name.to_string(),
            arity,
            selector: function_selector(&canonical),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn selector(&self) -> [u8; 4] {
        self.selector
    }

    pub fn canonical(&self) -> String {
        format!("{}({})", self.name, vec!["string"; self.arity].join(","))
    }

    pub fn encode(&self, args: &[&str]) -> Result<Bytes, AbiError> {
        if args.len() != self.arity {
            return Err(AbiError::ArgumentCount {
                expected: self.arity,
                actual: args.len(),
            });
        }
        Ok(encode_call(self.selector, args))
    }
}

pub fn function_selector(canonical_signature: &str) -> [u8; 4] {
    let hash = keccak256(canonical_signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Selector followed by the head/tail encoding of dynamic `string` arguments.
pub fn encode_call(selector: [u8; 4], args: &[&str]) -> Bytes {
    let head_len = args.len() * WORD;
    let tails: Vec<Vec<u8>> = args.iter().map(|arg| encode_string_tail(arg)).collect();

    let mut out = Vec::with_capacity(4 + head_len + tails.iter().map(Vec::len).sum::<usize>());
    out.extend_from_slice(&selector);

    let mut offset = head_len;
    for tail in &tails {
        out.extend_from_slice(&word(offset));
        offset += tail.len();
    }
    for tail in tails {
        out.extend(tail);
    }
    out.into()
}

fn encode_string_tail(value: &str) -> Vec<u8> {
    let data = value.as_bytes();
    let padded = data.len().div_ceil(WORD) * WORD;
    let mut tail = Vec::with_capacity(WORD + padded);
    tail.extend_from_slice(&word(data.len()));
    tail.extend_from_slice(data);
    tail.resize(WORD + padded, 0);
    tail
}

fn word(value: usize) -> [u8; WORD] {
    U256::from(value).to_be_bytes::<WORD>()
}

#[cfg(test)]
#[path = "tests/abi_tests.rs"]
mod tests;
