//! Example of pointing the client at a self-hosted replica fleet
//!
//! Failed dial attempts are logged at WARN level, so running this with
//! `RUST_LOG=flotilla_client=warn` shows the failover in action.

use flotilla::prelude::*;

#[tokio::main]
async fn main() -> Result<(), flotilla::Error> {
    tracing_subscriber::fmt::init();

    // Replicas are interchangeable; the client shuffles this list on
    // every call and walks it until one answers
    let client = Client::builder()
        .text_endpoints([
            "https://gen-a.internal.example/api/chat",
            "https://gen-b.internal.example/api/chat",
            "https://gen-c.internal.example/api/chat",
        ])
        .image_endpoints(["https://img.internal.example/api/image"])
        .build()?;

    println!(
        "Text replicas: {}",
        client.config().text_endpoints.len()
    );

    let request = GenerationRequest::builder()
        .message(Message::user("Summarize the plot of Moby Dick in one line"))
        .build();

    // collect_text drains the stream and returns the joined deltas
    let text = client.collect_text(request).await?;
    println!("{}", text);

    Ok(())
}
