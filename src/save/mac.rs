//! Format B: AES-256-ECB with a key baked into the macOS client.
//!
//! Plaintext is padded with `0x0b` up to the block size. Padding is not self
//! describing, so decoding leaves any trailing `0x0b` bytes in place.

use super::{SaveError, SaveErrorKind};
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;

/// Encryption key shared by every macOS save
pub const KEY: &[u8; 32] = b"ipu9TUv54yv]isFMh5@;t.5w34E2Ry@{";

/// Byte used to fill the last block
pub const PAD_BYTE: u8 = 0x0b;

const BLOCK_SIZE: usize = 16;

fn cipher() -> Aes256 {
    Aes256::new(GenericArray::from_slice(KEY))
}

/// Decrypt a format B container
pub fn decode(data: &[u8]) -> Result<Vec<u8>, SaveError> {
    if data.len() % BLOCK_SIZE != 0 {
        return Err(SaveErrorKind::CorruptData(format!(
            "ciphertext of {} bytes is not a multiple of {}",
            data.len(),
            BLOCK_SIZE
        ))
        .into());
    }

    let cipher = cipher();
    let mut out = data.to_vec();
    for block in out.chunks_exact_mut(BLOCK_SIZE) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }

    Ok(out)
}

/// Pad and encrypt plaintext into a format B container
pub fn encode(plaintext: &[u8]) -> Vec<u8> {
    let mut out = plaintext.to_vec();
    let extra = out.len() % BLOCK_SIZE;
    if extra > 0 {
        out.resize(out.len() + BLOCK_SIZE - extra, PAD_BYTE);
    }

    let cipher = cipher();
    for block in out.chunks_exact_mut(BLOCK_SIZE) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }

    out
}
