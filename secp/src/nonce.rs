//! Deterministic nonce generation (RFC 6979, section 3.2).
//!
//! The generator is HMAC-DRBG over SHA-256. It is seeded with the secret
//! key, the reduced message hash and optional auxiliary data, then yields a
//! stream of 32-byte candidates. The same generator seeds context blinding.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

const HMAC_BLOCK: usize = 64;

// Feed a SHA-256 context with the inner HMAC block for a 32-byte key.
fn hmac_start(sh: &mut Sha256, key: &[u8; 32]) {
    let mut block = [0x36u8; HMAC_BLOCK];
    for (b, k) in block.iter_mut().zip(key) {
        *b ^= k;
    }
    sh.update(block);
}

// Finish an HMAC-SHA256 computation with the same key. The context is
// reset and ready for the next HMAC.
fn hmac_end(sh: &mut Sha256, key: &[u8; 32]) -> [u8; 32] {
    let inner = sh.finalize_reset();
    let mut block = [0x5cu8; HMAC_BLOCK];
    for (b, k) in block.iter_mut().zip(key) {
        *b ^= k;
    }
    sh.update(block);
    sh.update(inner);
    sh.finalize_reset().into()
}

/// HMAC-DRBG state.
pub(crate) struct Rfc6979 {
    k: [u8; 32],
    v: [u8; 32],
    retry: bool,
}

impl Rfc6979 {
    /// Seed the generator with the concatenation of `seed`.
    pub(crate) fn new(seed: &[&[u8]]) -> Self {
        let mut sh = Sha256::new();
        let mut k = [0x00u8; 32];
        let mut v = [0x01u8; 32];

        // 3.2.d
        hmac_start(&mut sh, &k);
        sh.update(v);
        sh.update([0x00]);
        for part in seed {
            sh.update(part);
        }
        k = hmac_end(&mut sh, &k);

        // 3.2.e
        hmac_start(&mut sh, &k);
        sh.update(v);
        v = hmac_end(&mut sh, &k);

        // 3.2.f
        hmac_start(&mut sh, &k);
        sh.update(v);
        sh.update([0x01]);
        for part in seed {
            sh.update(part);
        }
        k = hmac_end(&mut sh, &k);

        // 3.2.g
        hmac_start(&mut sh, &k);
        sh.update(v);
        v = hmac_end(&mut sh, &k);

        Rfc6979 { k, v, retry: false }
    }

    /// Next 32-byte candidate.
    ///
    /// Every call after the first re-keys with V || 0x00, as in
    /// step 3.2.h when a candidate is rejected.
    pub(crate) fn generate(&mut self) -> [u8; 32] {
        let mut sh = Sha256::new();

        if self.retry {
            hmac_start(&mut sh, &self.k);
            sh.update(self.v);
            sh.update([0x00]);
            self.k = hmac_end(&mut sh, &self.k);

            hmac_start(&mut sh, &self.k);
            sh.update(self.v);
            self.v = hmac_end(&mut sh, &self.k);
        }

        hmac_start(&mut sh, &self.k);
        sh.update(self.v);
        self.v = hmac_end(&mut sh, &self.k);
        self.retry = true;

        self.v
    }
}

impl Drop for Rfc6979 {
    fn drop(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hmac_reference(key: &[u8], msg: &[u8]) -> [u8; 32] {
        // RFC 2104 with a key no longer than one block.
        let mut ipad = [0x36u8; HMAC_BLOCK];
        let mut opad = [0x5cu8; HMAC_BLOCK];
        for (i, k) in key.iter().enumerate() {
            ipad[i] ^= k;
            opad[i] ^= k;
        }
        let inner = Sha256::new().chain_update(ipad).chain_update(msg).finalize();
        Sha256::new()
            .chain_update(opad)
            .chain_update(inner)
            .finalize()
            .into()
    }

    #[test]
    fn test_hmac_matches_rfc4231_case_2() {
        // RFC 4231 test case 2, key "Jefe" zero-padded to 32 bytes.
        let mut key = [0u8; 32];
        key[..4].copy_from_slice(b"Jefe");
        let msg = b"what do ya want for nothing?";

        let mut sh = Sha256::new();
        hmac_start(&mut sh, &key);
        sh.update(msg);
        let mac = hmac_end(&mut sh, &key);

        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
        assert_eq!(mac, hmac_reference(&key, msg));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let key = [0x11u8; 32];
        let msg = [0x22u8; 32];
        let mut a = Rfc6979::new(&[&key[..], &msg[..]]);
        let mut b = Rfc6979::new(&[&key[..], &msg[..]]);

        for _ in 0..3 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_seed_parts_concatenate() {
        let seed = [0x42u8; 64];
        let mut whole = Rfc6979::new(&[&seed[..]]);
        let mut split = Rfc6979::new(&[&seed[..32], &seed[32..]]);

        assert_eq!(whole.generate(), split.generate());
    }

    #[test]
    fn test_retry_changes_output() {
        let mut drbg = Rfc6979::new(&[&[0x01u8; 32][..]]);
        let first = drbg.generate();
        let second = drbg.generate();

        assert_ne!(first, second);
    }

    #[test]
    fn test_extra_data_changes_output() {
        let key = [0x07u8; 32];
        let msg = [0x08u8; 32];
        let aux = [0x09u8; 32];

        let plain = Rfc6979::new(&[&key[..], &msg[..]]).generate();
        let with_aux = Rfc6979::new(&[&key[..], &msg[..], &aux[..]]).generate();

        assert_ne!(plain, with_aux);
    }
}
