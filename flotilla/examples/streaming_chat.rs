//! Example of streaming a chat completion from the replicated text service

use flotilla::prelude::*;
use futures::StreamExt;

#[tokio::main]
async fn main() -> Result<(), flotilla::Error> {
    // Create a client with the default endpoint sets
    let client = Client::new()?;

    // Build a request
    let request = GenerationRequest::builder()
        .message(Message::system("You are a concise assistant."))
        .message(Message::user("Write a haiku about the sea"))
        .build();

    println!("Streaming response...\n");

    // Each call dials a freshly shuffled endpoint order
    let mut stream = client.generate(request).await?;

    // Process stream events
    let mut accumulator = StreamAccumulator::new();

    while let Some(event) = stream.next().await {
        let event = event?;
        if let StreamEvent::Delta(ref delta) = event {
            print!("{}", delta.text);
        }
        accumulator.process_event(event);
    }

    println!("\n\nFull response: {}", accumulator.text());

    Ok(())
}
