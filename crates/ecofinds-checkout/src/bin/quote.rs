//! # Cart Quote Tool
//!
//! Prices a cart file and prints the breakdown as JSON.
//!
//! ## Usage
//! ```bash
//! # Plain quote
//! cargo run -p ecofinds-checkout --bin quote -- cart.json
//!
//! # With a coupon and an EcoPoints balance to redeem
//! cargo run -p ecofinds-checkout --bin quote -- cart.json --coupon ECO10 --eco-points 150
//!
//! # 18% GST profile
//! ECOFINDS_PRICING_PROFILE=gst18 cargo run -p ecofinds-checkout --bin quote -- cart.json
//! ```
//!
//! The cart file is an array of `{ "id", "unitPrice", "quantity" }` rows with
//! amounts in paise.

use std::env;
use std::fs;

use ecofinds_checkout::fakes::ApprovingGateway;
use ecofinds_checkout::{init_tracing, CheckoutService, StoreConfig};
use ecofinds_core::validation::validate_coupon_code;
use ecofinds_core::{Cart, EcoPoints, PriceModifiers};
use tracing::info;

fn print_help() {
    println!("EcoFinds Cart Quote");
    println!();
    println!("Usage: quote <CART.json> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --coupon <CODE>      Coupon code to apply");
    println!("  -p, --eco-points <N>     EcoPoints balance to redeem");
    println!("  -h, --help               Show this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();

    let mut cart_path: Option<String> = None;
    let mut modifiers = PriceModifiers::none();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--coupon" | "-c" => {
                let code = iter.next().ok_or("--coupon needs a value")?;
                validate_coupon_code(code)?;
                modifiers.coupon_code = Some(code.clone());
            }
            "--eco-points" | "-p" => {
                let points: u64 = iter
                    .next()
                    .ok_or("--eco-points needs a value")?
                    .parse()
                    .map_err(|_| "--eco-points must be a whole number")?;
                modifiers = modifiers.redeeming(EcoPoints::new(points));
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            path if cart_path.is_none() && !path.starts_with('-') => {
                cart_path = Some(path.to_string());
            }
            other => return Err(format!("unexpected argument: {other}").into()),
        }
    }

    let Some(cart_path) = cart_path else {
        print_help();
        return Err("missing cart file".into());
    };

    let config = StoreConfig::from_env()?;
    info!(store = %config.store_name, cart = %cart_path, "Quoting cart");

    let cart = Cart::from_json(&fs::read_to_string(&cart_path)?)?;
    let service = CheckoutService::new(config, ApprovingGateway::new());
    let breakdown = service.quote(&cart, &modifiers);

    println!("{}", serde_json::to_string_pretty(&breakdown)?);

    Ok(())
}
