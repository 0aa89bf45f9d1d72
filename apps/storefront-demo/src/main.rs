//! # Storefront Demo Entry Point
//!
//! Drives the cart and auth stores from the terminal.
//!
//! ## Usage
//! ```bash
//! storefront catalog --category mobiles --sort price-low
//! storefront shop 1 1 9
//! storefront login asha@example.com secret1
//! storefront whoami
//! storefront logout
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match storefront_demo::run(std::env::args().skip(1).collect()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
