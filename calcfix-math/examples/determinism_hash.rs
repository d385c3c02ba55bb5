use calcfix_math::sin;
use calcfix_num::I16F16;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // One full turn either side of zero, in steps of 1/16 rad
    let table: Vec<I16F16> = (-101..=101).map(|i| sin(I16F16::from_f32(i as f32 / 16.0))).collect();
    let mut bytes = Vec::with_capacity(table.len() * 4);
    for v in &table {
        bytes.extend_from_slice(&v.raw().to_le_bytes());
    }
    let digest = sha256(&bytes);
    tracing::info!(entries = table.len(), "sine table built");
    println!("SINE_TABLE_HASH {}", digest);
}

fn sha256(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    let out = hasher.finalize();
    hex::encode(out)
}
