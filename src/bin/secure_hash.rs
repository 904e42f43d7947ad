//! OnePay Secure Hash Tool
//!
//! Prints the canonical string and `vpc_SecureHash` for a query string, and
//! whether an embedded hash matches. Useful when a gateway rejects a request
//! with a signature error.
//!
//! Usage: `secure_hash <SECRET_HEX> <QUERY_STRING>`

use std::env;
use std::process::ExitCode;

use rust_onepay::{HmacSigner, Result, SignedParams};

fn run(secret_hex: &str, query: &str) -> Result<()> {
    let signer = HmacSigner::from_hex(secret_hex)?;
    let params = SignedParams::from_query(query);

    let canonical = params.canonicalize()?;
    let signature = signer.sign(&canonical)?;

    println!("Canonical:   {}", canonical);
    println!("SecureHash:  {}", signature);

    if let Some(claimed) = params.secure_hash() {
        let matches = signer.verify(&canonical, claimed)?;
        println!("Embedded:    {} ({})", claimed, if matches { "valid" } else { "INVALID" });
    }

    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let [secret_hex, query] = args.as_slice() else {
        eprintln!("Usage: secure_hash <SECRET_HEX> <QUERY_STRING>");
        return ExitCode::from(2);
    };

    match run(secret_hex, query) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
