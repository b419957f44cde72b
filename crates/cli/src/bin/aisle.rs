use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    aisle_cli::main_entry().await
}
