use anyhow::Result;
use clap::Parser;

pub mod serve;

#[derive(Parser)]
#[command(author, version, about = "IPL AI chat widget", long_about = None)]
pub struct Cli {
    /// Set the server host address
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Set the server port
    #[arg(long, default_value = "8501")]
    port: String,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    serve::run(args.host, args.port).await
}
