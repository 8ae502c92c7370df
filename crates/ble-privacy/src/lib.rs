//! Resolvable private address (RPA) handling for BLE peers.
//!
//! A resolvable private address carries a 24-bit random part (`prand`) and a
//! 24-bit hash computed by encrypting the zero-padded `prand` with the
//! peer's identity resolving key. Knowing the key, a device can recompute
//! the hash from the address's random part and decide whether the address
//! belongs to that peer without any on-air exchange.
//!
//! Addresses and keys use the on-air (little-endian) byte order here; the
//! cipher consumes them most-significant byte first, so both are reversed at
//! the boundary.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use aes128::{Aes128Key, Block, Ecb, KEY_SIZE};

/// Size of a device address in bytes.
pub const ADDRESS_SIZE: usize = 6;

/// A device address in on-air order: bytes 0..3 carry the hash, bytes 3..6
/// the random part, least significant byte first.
pub type Address = [u8; ADDRESS_SIZE];

/// Marker bits in the most significant byte of a resolvable address: the
/// top two bits of `prand` must read `0b01`.
const MARKER_MASK: u8 = 0xc0;
const MARKER_VALUE: u8 = 0x40;

/// A peer's identity resolving key in transmission (little-endian) order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdentityResolvingKey([u8; KEY_SIZE]);

impl IdentityResolvingKey {
    /// Wraps key bytes as exchanged during pairing.
    pub fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Reverses the byte order into the form the cipher consumes.
    fn cipher_key(&self) -> Aes128Key {
        let mut reversed = self.0;
        reversed.reverse();
        Aes128Key::from(reversed)
    }
}

impl From<[u8; KEY_SIZE]> for IdentityResolvingKey {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self::new(bytes)
    }
}

/// Computes the 24-bit address hash for `prand` under `irk`.
///
/// The cipher input is a block of thirteen zero bytes followed by `prand`
/// most significant byte first; the hash is the low 24 bits of the
/// ciphertext, returned in on-air order.
pub fn hash(irk: &IdentityResolvingKey, prand: [u8; 3]) -> [u8; 3] {
    let mut block: Block = [0u8; 16];
    block[13] = prand[2];
    block[14] = prand[1];
    block[15] = prand[0];

    let ecb = Ecb::new(&irk.cipher_key());
    let ciphertext = ecb.encrypt_block(&block);
    [ciphertext[15], ciphertext[14], ciphertext[13]]
}

/// Returns whether `address` carries the resolvable-private marker bits.
pub fn is_resolvable(address: &Address) -> bool {
    address[5] & MARKER_MASK == MARKER_VALUE
}

/// Checks whether `address` was generated from `irk`.
///
/// Recomputes the hash from the address's random part and compares it with
/// the hash the address carries. Addresses without the resolvable marker
/// never match.
pub fn resolve(irk: &IdentityResolvingKey, address: &Address) -> bool {
    if !is_resolvable(address) {
        return false;
    }
    let prand = [address[3], address[4], address[5]];
    hash(irk, prand) == address[..3]
}

/// Builds a resolvable private address from `irk` and a caller-supplied
/// random part. The marker bits are forced into `prand` before hashing.
pub fn build_address(irk: &IdentityResolvingKey, mut prand: [u8; 3]) -> Address {
    prand[2] = (prand[2] & !MARKER_MASK) | MARKER_VALUE;
    let hash = hash(irk, prand);
    [hash[0], hash[1], hash[2], prand[0], prand[1], prand[2]]
}
