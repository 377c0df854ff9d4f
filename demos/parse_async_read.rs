use tokio::io::AsyncRead;
// Import formscan types.
use formscan::Multipart;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate an `AsyncRead` and the boundary from somewhere e.g. server request body.
    let (reader, boundary) = get_async_reader_from_somewhere().await;

    // Create a `Multipart` instance for that boundary and decode the whole reader.
    let multipart = Multipart::new(boundary);
    let form = multipart.parse_reader(reader).await?;

    for (name, field) in form {
        println!(
            "Name: {:?}, File Name: {:?}, Index: {}",
            name,
            field.file_name(),
            field.index()
        );

        // Read field content as text.
        println!("Content: {:?}", field.text());
    }

    Ok(())
}

// Generate an `AsyncRead` and the boundary from somewhere e.g. server request body.
async fn get_async_reader_from_somewhere() -> (impl AsyncRead, &'static str) {
    let data = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"My Field\"\r\n\r\nabcd\r\n--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"File Field\"; filename=\"a-binary-file.bin\"\r\nContent-Type: application/octet-stream\r\n\r\nHello world\nHello\r\nWorld\rAgain\r\n--X-BOUNDARY--\r\n";

    (data.as_bytes(), "X-BOUNDARY")
}
