use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    gradebook::cli::run().await
}
