/*
[INPUT]:  Merchant credentials (env: BYTEWALLET_MERCHANT_ID, BYTEWALLET_API_KEY)
[OUTPUT]: Responses from every merchant endpoint
[POS]:    Examples - signed merchant API calls
[UPDATE]: When adding new merchant endpoints
*/

use std::str::FromStr;

use bytewallet_adapter::*;
use rust_decimal::Decimal;

/// Example: walk through the merchant endpoints against a live gateway
#[tokio::main]
async fn main() {
    println!("=== ByteWallet Merchant Example ===\n");

    let merchant_id = std::env::var("BYTEWALLET_MERCHANT_ID").unwrap_or_else(|_| "80006".to_string());
    let api_key = match std::env::var("BYTEWALLET_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            eprintln!("Set BYTEWALLET_API_KEY to run this example");
            return;
        }
    };

    let credentials = Credentials::new(
        merchant_id,
        api_key,
        "https://api.ByteWallets.io",
        "https://localhost/callUrl",
    );
    let client = match GatewayClient::new(credentials) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Gateway client created\n");

    println!("Querying supported coins...");
    match client.support_coins(true).await {
        Ok(result) => println!("✓ Coins: {:?}", result),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nCreating address for main coin 62...");
    match client.create_address("62", None, None).await {
        Ok(result) => println!("✓ Address: {:?}", result),
        Err(e) => println!("✗ Error: {}", e),
    }

    let address = "TEpK1aWkeuskfo8reeeMqG7hdJ5tRytyAF";

    println!("\nChecking address {}...", address);
    match client.check_address("62", address).await {
        Ok(result) => println!("✓ Check: {:?}", result),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nChecking address ownership...");
    match client.exist_address("62", address).await {
        Ok(result) => println!("✓ Exists: {:?}", result),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nRequesting withdrawal...");
    let params = WithdrawParams {
        business_id: "sn00001".to_string(),
        main_coin_type: "62".to_string(),
        coin_type: "62".to_string(),
        address: address.to_string(),
        amount: Decimal::from_str("10").unwrap_or_default(),
        memo: Some("Withdrawal for invoice #12345".to_string()),
    };
    match client.withdraw(params).await {
        Ok(result) => println!("✓ Withdraw: {:?}", result),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Merchant example complete");
}
