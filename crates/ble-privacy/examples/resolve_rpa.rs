//! Demonstrates building a resolvable private address and resolving it back.

use ble_privacy::{build_address, is_resolvable, resolve, IdentityResolvingKey};

fn main() {
    // Bluetooth Core sample data: key ec0234a357c8ad05341010a60a397d9b
    // (most significant byte first), prand 0x708194.
    let irk = IdentityResolvingKey::new([
        0x9b, 0x7d, 0x39, 0x0a, 0xa6, 0x10, 0x10, 0x34, 0x05, 0xad, 0xc8, 0x57, 0xa3, 0x34, 0x02,
        0xec,
    ]);

    let address = build_address(&irk, [0x94, 0x81, 0x70]);
    assert!(is_resolvable(&address));
    assert!(resolve(&irk, &address));

    let other_key = IdentityResolvingKey::new([0u8; 16]);
    assert!(!resolve(&other_key, &address));

    let display: Vec<String> = address.iter().rev().map(|b| format!("{b:02X}")).collect();
    println!(
        "generated address {}; resolves only under its own IRK",
        display.join(":")
    );
}
