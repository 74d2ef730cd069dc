//! Walk through one blind signature round and print the parameter catalog.
//!
//! ```text
//! cargo run --example blind_signature [LEVEL]
//! RUST_LOG=rlwe_blind=debug cargo run --example blind_signature TEST_SMALL
//! ```

use rand::rngs::OsRng;
use rlwe_blind::lattice::ALL_LEVELS;
use rlwe_blind::{BlindSignature, SecurityLevel};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const RULE: &str = "======================================================================";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rlwe_blind=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

fn run(level: SecurityLevel) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = OsRng;

    println!("\n{RULE}");
    println!("    RLWE Blind Signature Demo - {level}");
    println!("{RULE}\n");

    let mut scheme = BlindSignature::from_level(level)?;
    let p = scheme.parameters();
    println!("  Ring dimension (n):     {}", p.n);
    println!("  Modulus (q):            {}", p.q);
    println!("  Gaussian σ:             {}", p.sigma);
    println!("  Classical security:     ~{} bits", p.classical_bits);
    println!("  Quantum security:       ~{} bits", p.quantum_bits);
    println!(
        "  Security status:        {}\n",
        if p.is_secure { "SECURE" } else { "INSECURE" }
    );

    println!("Generating keys...");
    scheme.generate_keys(&mut rng)?;
    println!("  keys generated\n");

    println!("CLIENT: blinding secret 0xDEADBEEF");
    let secret = [0xDE, 0xAD, 0xBE, 0xEF];
    let blinded = scheme.compute_blinded_message(&mut rng, &secret)?;

    println!("SERVER: signing blinded message");
    let blind_sig = scheme.blind_sign(&mut rng, &blinded.blinded)?;

    println!("CLIENT: unblinding signature");
    let signature = scheme.compute_signature(&blind_sig, &blinded.factor, &scheme.public_key().b)?;

    let verified = scheme.verify(&secret, &signature)?;
    println!(
        "SERVER: verification {}",
        if verified { "SUCCESS" } else { "FAILED" }
    );

    let wrong_secret = [0xDE, 0xAD, 0xBE, 0xEE];
    let wrong_verified = scheme.verify(&wrong_secret, &signature)?;
    println!(
        "SERVER: wrong secret 0xDEADBEEE {}\n",
        if wrong_verified {
            "INCORRECTLY SUCCEEDED"
        } else {
            "CORRECTLY FAILED"
        }
    );

    Ok(())
}

fn print_catalog() {
    println!("{RULE}");
    println!("    Available Security Levels");
    println!("{RULE}\n");
    println!("Level                       n       q      σ  Classical    Quantum  Status");
    println!("--------------------------------------------------------------------------");

    for level in ALL_LEVELS {
        let p = level.params();
        println!(
            "{:<24}{:>6}{:>8}{:>7.1}{:>6} bits{:>6} bits  {}",
            p.name,
            p.n,
            p.q,
            p.sigma,
            p.classical_bits,
            p.quantum_bits,
            if p.is_secure { "secure" } else { "INSECURE" }
        );
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let level = match std::env::args().nth(1) {
        Some(name) => name.parse()?,
        None => SecurityLevel::default(),
    };

    run(level)?;
    print_catalog();
    Ok(())
}
