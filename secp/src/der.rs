//! Strict DER encoding of ECDSA signatures.
//!
//! The accepted form is `30 len 02 rlen r 02 slen s` with short-form
//! lengths only, minimal INTEGER encodings and no trailing bytes.

use crate::constants::MAX_DER_SIGNATURE_SIZE;
use crate::errors::Error;

const SEQUENCE_TAG: u8 = 0x30;
const INTEGER_TAG: u8 = 0x02;

/// Encode two 32-byte big-endian integers as a DER SEQUENCE.
pub(crate) fn encode(r: &[u8; 32], s: &[u8; 32]) -> Vec<u8> {
    let mut body = Vec::with_capacity(MAX_DER_SIGNATURE_SIZE);
    encode_integer(&mut body, r);
    encode_integer(&mut body, s);

    let mut out = Vec::with_capacity(body.len() + 2);
    out.push(SEQUENCE_TAG);
    out.push(body.len() as u8);
    out.extend_from_slice(&body);
    out
}

fn encode_integer(out: &mut Vec<u8>, value: &[u8; 32]) {
    let start = value.iter().position(|&b| b != 0).unwrap_or(31);
    let digits = &value[start..];
    let pad = digits[0] & 0x80 != 0;

    out.push(INTEGER_TAG);
    out.push((digits.len() + pad as usize) as u8);
    if pad {
        out.push(0x00);
    }
    out.extend_from_slice(digits);
}

/// Decode a DER SEQUENCE of two non-negative INTEGERs of at most 32 bytes.
pub(crate) fn decode(bytes: &[u8]) -> Result<([u8; 32], [u8; 32]), Error> {
    if bytes.len() < 2 || bytes.len() > MAX_DER_SIGNATURE_SIZE {
        return Err(Error::InvalidSignature);
    }
    if bytes[0] != SEQUENCE_TAG || bytes[1] as usize != bytes.len() - 2 {
        return Err(Error::InvalidSignature);
    }

    let mut rest = &bytes[2..];
    let r = decode_integer(&mut rest)?;
    let s = decode_integer(&mut rest)?;
    if !rest.is_empty() {
        return Err(Error::InvalidSignature);
    }
    Ok((r, s))
}

fn decode_integer(input: &mut &[u8]) -> Result<[u8; 32], Error> {
    let data = *input;
    if data.len() < 2 || data[0] != INTEGER_TAG {
        return Err(Error::InvalidSignature);
    }
    let len = data[1] as usize;
    // Long-form lengths are never needed for 33-byte integers.
    if len == 0 || len > 33 || data.len() < 2 + len {
        return Err(Error::InvalidSignature);
    }

    let mut digits = &data[2..2 + len];
    if digits[0] & 0x80 != 0 {
        return Err(Error::InvalidSignature);
    }
    if digits[0] == 0x00 && len > 1 {
        // A leading zero is only allowed in front of a high bit.
        if digits[1] & 0x80 == 0 {
            return Err(Error::InvalidSignature);
        }
        digits = &digits[1..];
    }
    if digits.len() > 32 {
        return Err(Error::InvalidSignature);
    }

    let mut out = [0u8; 32];
    out[32 - digits.len()..].copy_from_slice(digits);
    *input = &data[2 + len..];
    Ok(out)
}
