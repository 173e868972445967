//! OAuth2 authorization-code flow demo
//!
//! Prints the authorize URL for your registered application, then exchanges
//! the code you paste back for an access token.
//!
//! Usage:
//!   cargo run --example auth_flow -- <client_id> <client_secret> <redirect_uri>

use std::io::{BufRead, Write};
use weibo_timeline::{ApiConfig, Authenticator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let client_id = args.next().ok_or("missing <client_id> argument")?;
    let client_secret = args.next().ok_or("missing <client_secret> argument")?;
    let redirect_uri = args.next().ok_or("missing <redirect_uri> argument")?;

    let auth = Authenticator::new(&ApiConfig::default(), client_id, client_secret, redirect_uri)?;

    println!("Open this URL in a browser and grant access:\n");
    println!("  {}\n", auth.authorize_url()?);

    print!("Paste the code from the redirect URL: ");
    std::io::stdout().flush()?;
    let mut code = String::new();
    std::io::stdin().lock().read_line(&mut code)?;

    let token = auth.exchange_code(code.trim()).await?;
    println!("\naccess_token: {}", token.access_token);
    println!("expires_in:   {} seconds", token.expires_in);
    println!("uid:          {}", token.uid);

    Ok(())
}
