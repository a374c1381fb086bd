//! Example of generating an image through the replicated image service

use flotilla::prelude::*;

#[tokio::main]
async fn main() -> Result<(), flotilla::Error> {
    let client = Client::new()?;

    // The "flux" alias resolves to the image model, so generate()
    // routes this request to the image endpoint set
    let request = GenerationRequest::builder()
        .message(Message::user("A lighthouse on a stormy coast, oil painting"))
        .model("flux")
        .build();

    println!("Requesting image...");

    let image = client.generate_image(request).await?;

    println!("Generated {} image(s):", image.urls.len());
    for url in &image.urls {
        println!("  {}", url);
    }
    println!("Alt text: {}", image.alt);

    Ok(())
}
