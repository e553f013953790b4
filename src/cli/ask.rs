use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::chat::ChatSessionBuilder;
use crate::core::AppConfig;

pub async fn run(question: &str) -> Result<()> {
    // If using the CLI only, set up tracing to output to stdout and
    // stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::default();
    let mut session = ChatSessionBuilder::new(
        &config.gemini_api_hostname,
        &config.gemini_api_key,
        &config.gemini_model,
    )
    .build();

    let before = session.transcript().len();
    session.submit(question).await;

    if session.transcript().len() > before {
        if let Some(reply) = session.transcript().last() {
            println!("{}", reply.content());
        }
    } else {
        println!("Nothing submitted. Ask a non-empty question.");
    }

    Ok(())
}
