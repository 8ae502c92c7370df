//! Command-line interface for the AES-128 engine and RPA tooling.

#![forbid(unsafe_code)]

use aes128::{Aes128Key, Block, CbcDecrypt, Ecb, BLOCK_SIZE, KEY_SIZE};
use anyhow::{bail, Context, Result};
use ble_privacy::{build_address, resolve, Address, IdentityResolvingKey, ADDRESS_SIZE};
use clap::{Parser, Subcommand};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// BLE privacy cipher CLI.
#[derive(Parser)]
#[command(
    name = "blepriv",
    version,
    author,
    about = "AES-128 block operations and resolvable-private-address tooling"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a hex buffer in ECB mode, one independent block at a time.
    Encrypt {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Plaintext as hex, a multiple of 16 bytes.
        #[arg(long, value_name = "HEX")]
        data_hex: String,
    },
    /// Decrypt a hex buffer: ECB by default, CBC when an IV is supplied.
    Decrypt {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Ciphertext as hex, a multiple of 16 bytes.
        #[arg(long, value_name = "HEX")]
        data_hex: String,
        /// Optional CBC initialization vector as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        iv_hex: Option<String>,
    },
    /// Check whether a resolvable private address belongs to an IRK.
    Resolve {
        /// Identity resolving key as 32 hex characters, transmission order.
        #[arg(long, value_name = "HEX")]
        irk_hex: String,
        /// Device address as colon-separated hex, most significant byte first.
        #[arg(long, value_name = "AA:BB:CC:DD:EE:FF")]
        address: String,
    },
    /// Generate a fresh resolvable private address for an IRK.
    GenRpa {
        /// Identity resolving key as 32 hex characters, transmission order.
        #[arg(long, value_name = "HEX")]
        irk_hex: String,
        /// Optional RNG seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Encrypt { key_hex, data_hex } => cmd_encrypt(&key_hex, &data_hex),
        Commands::Decrypt {
            key_hex,
            data_hex,
            iv_hex,
        } => cmd_decrypt(&key_hex, &data_hex, iv_hex.as_deref()),
        Commands::Resolve { irk_hex, address } => cmd_resolve(&irk_hex, &address),
        Commands::GenRpa { irk_hex, seed } => cmd_gen_rpa(&irk_hex, seed),
    }
}

fn cmd_encrypt(key_hex: &str, data_hex: &str) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let mut data = parse_data_hex(data_hex)?;
    let ecb = Ecb::new(&key);
    for chunk in data.chunks_mut(BLOCK_SIZE) {
        let block = block_from(chunk);
        chunk.copy_from_slice(&ecb.encrypt_block(&block));
    }
    println!("{}", hex::encode(data));
    Ok(())
}

fn cmd_decrypt(key_hex: &str, data_hex: &str, iv_hex: Option<&str>) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let mut data = parse_data_hex(data_hex)?;
    match iv_hex {
        Some(iv_hex) => {
            let iv = parse_iv_hex(iv_hex)?;
            let mut cbc = CbcDecrypt::new(&key, iv);
            cbc.decrypt_in_place(&mut data);
        }
        None => {
            let ecb = Ecb::new(&key);
            for chunk in data.chunks_mut(BLOCK_SIZE) {
                let block = block_from(chunk);
                chunk.copy_from_slice(&ecb.decrypt_block(&block));
            }
        }
    }
    println!("{}", hex::encode(data));
    Ok(())
}

fn cmd_resolve(irk_hex: &str, address: &str) -> Result<()> {
    let irk = parse_irk_hex(irk_hex)?;
    let address = parse_address(address)?;
    if resolve(&irk, &address) {
        println!("address resolves against the supplied IRK");
        Ok(())
    } else {
        bail!("address does not resolve against the supplied IRK")
    }
}

fn cmd_gen_rpa(irk_hex: &str, seed: Option<u64>) -> Result<()> {
    let irk = parse_irk_hex(irk_hex)?;
    let mut rng = seeded_rng(seed);
    let mut prand = [0u8; 3];
    rng.fill_bytes(&mut prand);
    let address = build_address(&irk, prand);
    println!("{}", format_address(&address));
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<Aes128Key> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    if bytes.len() != KEY_SIZE {
        bail!("AES-128 key must be 16 bytes (32 hex characters)");
    }
    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(&bytes);
    Ok(Aes128Key::from(key))
}

fn parse_irk_hex(hex_str: &str) -> Result<IdentityResolvingKey> {
    let bytes = hex::decode(hex_str.trim()).context("decode IRK hex")?;
    if bytes.len() != KEY_SIZE {
        bail!("IRK must be 16 bytes (32 hex characters)");
    }
    let mut irk = [0u8; KEY_SIZE];
    irk.copy_from_slice(&bytes);
    Ok(IdentityResolvingKey::new(irk))
}

fn parse_iv_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode IV hex")?;
    if bytes.len() != BLOCK_SIZE {
        bail!("IV must be 16 bytes (32 hex characters)");
    }
    let mut iv = [0u8; BLOCK_SIZE];
    iv.copy_from_slice(&bytes);
    Ok(iv)
}

fn parse_data_hex(hex_str: &str) -> Result<Vec<u8>> {
    let data = hex::decode(hex_str.trim()).context("decode data hex")?;
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        bail!("data length must be a non-zero multiple of 16 bytes");
    }
    Ok(data)
}

/// Parses a display address (most significant byte first, colon separated)
/// into on-air byte order.
fn parse_address(text: &str) -> Result<Address> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() != ADDRESS_SIZE {
        bail!("address must have 6 colon-separated byte values");
    }
    let mut address = [0u8; ADDRESS_SIZE];
    for (i, part) in parts.iter().enumerate() {
        let byte = u8::from_str_radix(part, 16)
            .with_context(|| format!("parse address byte {part:?}"))?;
        address[ADDRESS_SIZE - 1 - i] = byte;
    }
    Ok(address)
}

fn format_address(address: &Address) -> String {
    let display: Vec<String> = address
        .iter()
        .rev()
        .map(|byte| format!("{byte:02X}"))
        .collect();
    display.join(":")
}

fn block_from(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(chunk);
    block
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
