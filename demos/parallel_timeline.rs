//! Parallel timeline aggregation demo
//!
//! Fetches a user's recent statuses with concurrent page workers and prints
//! them newest-first.
//!
//! Usage:
//!   cargo run --example parallel_timeline -- <access_token> <screen_name> [count]

use std::sync::Arc;
use std::time::Duration;
use weibo_timeline::{
    AggregatorConfig, ApiClient, ApiConfig, ApiPageFetcher, Subject, TimelineAggregator,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let access_token = args.next().ok_or("missing <access_token> argument")?;
    let screen_name = args.next().ok_or("missing <screen_name> argument")?;
    let count: usize = args.next().as_deref().unwrap_or("200").parse()?;

    let client = Arc::new(ApiClient::new(&ApiConfig::default())?);
    let fetcher = Arc::new(ApiPageFetcher::new(client, access_token));
    let aggregator = TimelineAggregator::new(fetcher, AggregatorConfig::default());

    let started = std::time::Instant::now();
    let statuses = aggregator
        .fetch_timeline(
            &Subject::screen_name(screen_name.as_str()),
            count,
            Some(Duration::from_secs(10)),
        )
        .await?;

    println!(
        "fetched {} unique statuses for @{} in {:?}\n",
        statuses.len(),
        screen_name,
        started.elapsed()
    );

    for status in &statuses {
        let when = status
            .created_at_utc()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| status.created_at.clone());
        println!("{}  [{}]  {}", status.id, when, status.text);
    }

    Ok(())
}
