//! Site Mailer - Entry Point

#[tokio::main]
async fn main() -> eyre::Result<()> {
    site_mailer::run().await
}
