use ethers::types::{Address, U256};
use sha3::{Digest, Keccak256};

/// Signature of the ERC-20 allowance call placed on approval transactions.
pub const ERC20_APPROVE_SIGNATURE: &str = "approve(address,uint256)";

/// Compute the first 4 bytes (function selector) from a signature string, e.g. "approve(address,uint256)".
pub fn selector_from_signature(signature: &str) -> [u8; 4] {
    let mut keccak = Keccak256::new();
    keccak.update(signature.as_bytes());
    let out = keccak.finalize();
    [out[0], out[1], out[2], out[3]]
}

/// Encode an address into a 32-byte ABI word (left-padded).
pub fn abi_word_address(addr: &Address) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[12..].copy_from_slice(addr.as_bytes());
    out
}

/// Encode an unsigned integer into a 32-byte big-endian ABI word.
pub fn abi_word_uint256(value: U256) -> [u8; 32] {
    let mut out = [0u8; 32];
    value.to_big_endian(&mut out);
    out
}

/// Pack a selector and ABI words contiguously into calldata.
pub fn abi_pack(selector: [u8; 4], words: &[[u8; 32]]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + 32 * words.len());
    out.extend_from_slice(&selector);
    for w in words {
        out.extend_from_slice(w);
    }
    out
}

/// Calldata for `approve(spender, amount)` as a 0x-prefixed lowercase hex string.
pub fn encode_approve(spender: &Address, amount: U256) -> String {
    let selector = selector_from_signature(ERC20_APPROVE_SIGNATURE);
    let data = abi_pack(selector, &[abi_word_address(spender), abi_word_uint256(amount)]);
    format!("0x{}", hex::encode(data))
}
