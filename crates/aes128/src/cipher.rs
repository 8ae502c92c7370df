//! Forward and inverse block transforms.

use crate::block::Block;
use crate::key::{Aes128Key, KeySchedule};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};

/// Runs the forward cipher over `state` with a prepared schedule.
///
/// The final round omits MixColumns, as the cipher definition requires.
pub fn encrypt_in_place(state: &mut Block, schedule: &KeySchedule) {
    add_round_key(state, schedule.round_key(0));

    for round in 1..10 {
        sub_bytes(state);
        shift_rows(state);
        mix_columns(state);
        add_round_key(state, schedule.round_key(round));
    }

    sub_bytes(state);
    shift_rows(state);
    add_round_key(state, schedule.round_key(10));
}

/// Runs the inverse cipher over `state`, consuming the round keys of the
/// same schedule in reverse order.
pub fn decrypt_in_place(state: &mut Block, schedule: &KeySchedule) {
    add_round_key(state, schedule.round_key(10));

    for round in (1..10).rev() {
        inv_shift_rows(state);
        inv_sub_bytes(state);
        add_round_key(state, schedule.round_key(round));
        inv_mix_columns(state);
    }

    inv_shift_rows(state);
    inv_sub_bytes(state);
    add_round_key(state, schedule.round_key(0));
}

/// Encrypts one block, expanding the key for this call only.
pub fn encrypt(key: &Aes128Key, plaintext: &Block) -> Block {
    let schedule = KeySchedule::new(key);
    let mut state = *plaintext;
    encrypt_in_place(&mut state, &schedule);
    state
}

/// Decrypts one block, expanding the key for this call only.
pub fn decrypt(key: &Aes128Key, ciphertext: &Block) -> Block {
    let schedule = KeySchedule::new(key);
    let mut state = *ciphertext;
    decrypt_in_place(&mut state, &schedule);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: Block = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: Block = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    // FIPS-197 Appendix B worked example.
    const APPENDIX_B_KEY: [u8; 16] = [
        0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f,
        0x3c,
    ];
    const APPENDIX_B_PLAIN: Block = [
        0x32, 0x43, 0xf6, 0xa8, 0x88, 0x5a, 0x30, 0x8d, 0x31, 0x31, 0x98, 0xa2, 0xe0, 0x37, 0x07,
        0x34,
    ];
    const APPENDIX_B_CIPHER: Block = [
        0x39, 0x25, 0x84, 0x1d, 0x02, 0xdc, 0x09, 0xfb, 0xdc, 0x11, 0x85, 0x97, 0x19, 0x6a, 0x0b,
        0x32,
    ];

    #[test]
    fn encrypt_matches_nist_vector() {
        let key = Aes128Key::from(NIST_KEY);
        assert_eq!(encrypt(&key, &NIST_PLAIN), NIST_CIPHER);
    }

    #[test]
    fn decrypt_matches_nist_vector() {
        let key = Aes128Key::from(NIST_KEY);
        assert_eq!(decrypt(&key, &NIST_CIPHER), NIST_PLAIN);
    }

    #[test]
    fn encrypt_matches_appendix_b_trace() {
        let key = Aes128Key::from(APPENDIX_B_KEY);
        assert_eq!(encrypt(&key, &APPENDIX_B_PLAIN), APPENDIX_B_CIPHER);
        assert_eq!(decrypt(&key, &APPENDIX_B_CIPHER), APPENDIX_B_PLAIN);
    }

    #[test]
    fn decrypt_undoes_encrypt_for_random_inputs() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let key = Aes128Key::from(key_bytes);
            assert_eq!(decrypt(&key, &encrypt(&key, &block)), block);
        }
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let key = Aes128Key::from(NIST_KEY);
        let first = encrypt(&key, &NIST_PLAIN);
        let second = encrypt(&key, &NIST_PLAIN);
        assert_eq!(first, second);
    }

    #[test]
    fn single_bit_flip_diffuses_through_the_ciphertext() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for _ in 0..16 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let key = Aes128Key::from(key_bytes);

            let baseline = encrypt(&key, &block);
            let bit = rng.next_u32() as usize % 128;
            let mut flipped = block;
            flipped[bit / 8] ^= 1 << (bit % 8);
            let changed = encrypt(&key, &flipped);

            let differing: u32 = baseline
                .iter()
                .zip(changed.iter())
                .map(|(a, b)| (a ^ b).count_ones())
                .sum();
            assert!(
                differing > 32,
                "only {differing} of 128 ciphertext bits changed"
            );
        }
    }
}
