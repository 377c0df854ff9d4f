use std::{convert::Infallible, net::SocketAddr};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{body::Incoming, Request, Response, StatusCode};
// Import the formscan types.
use formscan::{Constraints, FormData, Multipart, SizeLimit};

fn respond(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(body.into()));
    *res.status_mut() = status;
    res
}

// A handler for incoming requests.
async fn handle(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let constraints = Constraints::new().size_limit(SizeLimit::new().whole_stream(8 * 1024 * 1024).for_field("op", 64));

    // Extract the `multipart/form-data` boundary from the headers.
    let multipart = match Multipart::from_headers_with_constraints(req.headers(), constraints) {
        Ok(multipart) => multipart,
        Err(err) => return Ok(respond(StatusCode::BAD_REQUEST, format!("BAD REQUEST: {}", err))),
    };

    // The decoder works on the whole body, so buffer it first.
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => return Ok(respond(StatusCode::BAD_REQUEST, format!("BAD REQUEST: {}", err))),
    };

    // A rejected body, e.g. a part declaring `Content-Type: text/plain`, is a client error.
    let form = match multipart.parse(body) {
        Ok(form) => form,
        Err(err) => return Ok(respond(StatusCode::BAD_REQUEST, format!("BAD REQUEST: {}", err))),
    };

    Ok(dispatch(&form))
}

// Routes on the `op` field the way an operation-table endpoint would.
fn dispatch(form: &FormData) -> Response<Full<Bytes>> {
    let op = match form.field("op") {
        Some(op) => op.text(),
        None => return respond(StatusCode::BAD_REQUEST, "missing [op] parameter"),
    };

    match op.as_str() {
        "describe" => {
            let mut lines = Vec::new();
            for (name, content) in form.iter() {
                lines.push(format!("{}: {} bytes", name, content.len()));
            }
            lines.sort();
            respond(StatusCode::OK, lines.join("\n"))
        }
        _ => respond(StatusCode::BAD_REQUEST, format!("operation [{}] not supported", op)),
    }
}

#[tokio::main]
async fn main() {
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    println!("Server running at: {}", addr);

    let service = hyper::service::service_fn(handle);

    loop {
        let (socket, _remote_addr) = listener.accept().await.unwrap();
        let socket = hyper_util::rt::TokioIo::new(socket);
        tokio::spawn(async move {
            if let Err(e) = hyper::server::conn::http1::Builder::new()
                .serve_connection(socket, service)
                .await
            {
                eprintln!("server error: {}", e);
            }
        });
    }
}
