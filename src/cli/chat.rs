use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::chat::ChatSessionBuilder;
use crate::core::AppConfig;
use crate::notify::Notice;

const SUGGESTED_QUESTIONS: &[&str] = &[
    "Tell me about the fall of the Roman Empire",
    "What were the major achievements of ancient Egypt?",
    "Explain the causes of World War I",
    "How did the Renaissance change European society?",
    "What was daily life like in medieval times?",
    "Tell me about the Silk Road trade routes",
];

pub async fn run() -> Result<()> {
    let mut rl = DefaultEditor::new().expect("Editor failed");

    let config = AppConfig::default();
    let (tx, mut rx) = mpsc::unbounded_channel::<Notice>();
    let mut session = ChatSessionBuilder::new(
        &config.gemini_api_hostname,
        &config.gemini_api_key,
        &config.gemini_model,
    )
    .notices(tx)
    .build();

    if let Some(welcome) = session.transcript().last() {
        println!("{}\n", welcome.content());
    }
    println!("Try asking:");
    for question in SUGGESTED_QUESTIONS {
        println!("  - {}", question);
    }
    println!();

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let before = session.transcript().len();
                session.submit(&line).await;

                while let Ok(notice) = rx.try_recv() {
                    eprintln!("! {}", notice.message);
                }

                // Nothing was appended when the input was rejected
                if session.transcript().len() > before
                    && let Some(reply) = session.transcript().last()
                {
                    println!(
                        "[{}] {}",
                        reply.timestamp().format("%H:%M:%S"),
                        reply.content()
                    );
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
