// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use diffusion_gateway::{api, GatewayConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();

    println!("🚀 Starting diffusion gateway...\n");
    println!("   listen:        {}", config.listen_addr);
    println!("   generator:     {}", config.generator_url);
    println!("   automatic1111: {}", config.automatic1111_url);
    println!("   outputs:       {}", config.output_dir.display());
    println!();

    api::start_server(config).await
}
