use clap::Parser;

use cafe_cart_lib::config::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cafe_cart_lib::run(Args::parse()).await
}
