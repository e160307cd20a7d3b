use anyhow::Result;
use authkey::UrlSigner;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "authkey", about = "CDN auth_key URL signer")]
struct Cli {
    /// The URL to sign; non-image URLs are printed back unchanged
    url: Option<String>,

    /// Expiry as Unix-epoch seconds (defaults to the current time)
    #[arg(long, env = "AUTHKEY_EXPIRY")]
    expiry: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "AUTHKEY_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the signed URL.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let signer = UrlSigner::new();
    let url = cli.url.unwrap_or_default();
    let signed = match cli.expiry {
        Some(expiry) => signer.sign_with_expiry(&url, expiry),
        None => signer.sign(&url),
    };
    println!("{signed}");

    Ok(())
}
