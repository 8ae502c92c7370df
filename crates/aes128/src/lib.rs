//! Fixed-size AES-128 block cipher engine.
//!
//! Implements the FIPS-197 key schedule and the forward and inverse block
//! transforms, hard-coded to the 128-bit key size (Nk=4, Nr=10). Two call
//! shapes are provided:
//! - one-shot [`encrypt`]/[`decrypt`], which expand the key per call;
//! - prepared contexts, [`Ecb`] for independent blocks and [`CbcDecrypt`]
//!   for chained multi-block buffers, which expand the key once.
//!
//! Every operation is a total function over fixed-size inputs: there is no
//! error type and no hidden state shared between calls. The implementation
//! favors clarity over constant-time guarantees and is not side-channel
//! hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cbc;
mod cipher;
mod ecb;
mod key;
mod round;
mod sbox;

pub use crate::block::{xor_in_place, Block, BLOCK_SIZE};
pub use crate::cbc::CbcDecrypt;
pub use crate::cipher::{decrypt, decrypt_in_place, encrypt, encrypt_in_place};
pub use crate::ecb::Ecb;
pub use crate::key::{Aes128Key, KeySchedule, KEY_SIZE, ROUND_KEYS};
