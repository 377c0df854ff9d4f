use std::convert::Infallible;

use bytes::Bytes;
use formscan::{parse_form_data, Constraints, Error, Multipart, SizeLimit};
use futures_util::stream;

const SCENARIO: &str = "--AaB03x\r\n\
                        Content-Disposition: form-data; name=\"field1\"\r\n\
                        \r\n\
                        value1\r\n\
                        --AaB03x\r\n\
                        Content-Disposition: form-data; name=\"file\"; filename=\"file1.bin\"\r\n\
                        Content-Type: application/octet-stream\r\n\
                        \r\n\
                        \x00\x01\x02\r\n\
                        --AaB03x--\r\n";

fn char_stream(data: &str) -> impl futures_util::Stream<Item = Result<Bytes, Infallible>> + '_ {
    stream::iter(
        data.chars()
            .map(|ch| ch.to_string())
            .map(|part| Ok(Bytes::copy_from_slice(part.as_bytes()))),
    )
}

#[test]
fn test_multipart_basic() {
    let form = parse_form_data("AaB03x", SCENARIO);

    assert_eq!(form.len(), 2);
    assert_eq!(form.get("field1").unwrap().as_ref(), b"value1");
    assert_eq!(form.get("file").unwrap().as_ref(), b"\x00\x01\x02");
}

#[test]
fn test_multipart_disallowed_content_type() {
    let body = SCENARIO.replace("application/octet-stream", "text/plain");

    assert!(parse_form_data("AaB03x", body.clone()).is_empty());
    assert!(matches!(
        Multipart::new("AaB03x").parse(body),
        Err(Error::DisallowedContentType { .. })
    ));
}

#[test]
fn test_multipart_disallowed_content_type_in_first_part() {
    let body = "--X\r\n\
                Content-Disposition: form-data; name=\"a\"\r\n\
                Content-Type: image/png\r\n\
                \r\n\
                abc\r\n\
                --X\r\n\
                Content-Disposition: form-data; name=\"b\"\r\n\
                \r\n\
                def\r\n\
                --X--\r\n";

    assert!(parse_form_data("X", body).is_empty());
}

#[test]
fn test_multipart_empty() {
    assert!(parse_form_data("AaB03x", "").is_empty());
    assert!(parse_form_data("X-BOUNDARY", "--X-BOUNDARY--\r\n").is_empty());
}

#[test]
fn test_multipart_missing_disposition_reuses_name() {
    let body = "--X\r\n\
                Content-Disposition: form-data; name=\"field1\"\r\n\
                \r\n\
                first\r\n\
                --X\r\n\
                Content-Type: application/octet-stream\r\n\
                \r\n\
                second\r\n\
                --X--\r\n";

    let form = parse_form_data("X", body);

    assert_eq!(form.len(), 1);
    assert_eq!(form.get("field1").unwrap().as_ref(), b"second");
    assert_eq!(form.field("field1").unwrap().index(), 1);
}

#[test]
fn test_multipart_first_part_without_name() {
    let body = "--X\r\n\r\nanonymous\r\n--X--\r\n";

    let form = parse_form_data("X", body);
    assert_eq!(form.get("").unwrap().as_ref(), b"anonymous");
}

#[test]
fn test_multipart_last_write_wins() {
    let body = "--X\r\n\
                Content-Disposition: form-data; name=\"dup\"\r\n\
                \r\n\
                one\r\n\
                --X\r\n\
                Content-Disposition: form-data; name=\"other\"\r\n\
                \r\n\
                two\r\n\
                --X\r\n\
                Content-Disposition: form-data; name=\"dup\"\r\n\
                \r\n\
                three\r\n\
                --X--\r\n";

    let form = parse_form_data("X", body);

    assert_eq!(form.len(), 2);
    assert_eq!(form.get("dup").unwrap().as_ref(), b"three");
    assert_eq!(form.get("other").unwrap().as_ref(), b"two");
}

#[test]
fn test_multipart_embedded_delimiter_is_content() {
    let content: &[u8] = b"abc--X\r\nnot a boundary--X\n--X\rdone";

    let mut body = Vec::new();
    body.extend_from_slice(b"--X\r\nContent-Disposition: form-data; name=\"bin\"\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(b"\r\n--X--\r\n");

    let form = parse_form_data("X", body);
    assert_eq!(form.get("bin").unwrap().as_ref(), content);
}

#[test]
fn test_multipart_content_with_crlf() {
    let body = "--X\r\n\
                Content-Disposition: form-data; name=\"text\"\r\n\
                \r\n\
                Hello world\nHello\r\nWorld\rAgain\r\n\r\n\
                --X--\r\n";

    let form = parse_form_data("X", body);
    assert_eq!(form.get("text").unwrap().as_ref(), b"Hello world\nHello\r\nWorld\rAgain\r\n");
}

#[test]
fn test_multipart_header_names_case_insensitive() {
    let body = "--X\r\n\
                CONTENT-DISPOSITION: form-data; name=\"a\"\r\n\
                content-type: Application/Octet-Stream\r\n\
                Content-length: 3\r\n\
                \r\n\
                abc\r\n\
                --X--\r\n";

    let form = parse_form_data("X", body);
    let field = form.field("a").unwrap();

    assert_eq!(field.bytes().as_ref(), b"abc");
    assert_eq!(field.content_length(), Some(3));
}

#[test]
fn test_multipart_idempotent() {
    let multipart = Multipart::new("AaB03x");
    let body = Bytes::from_static(SCENARIO.as_bytes());

    let first = multipart.parse(body.clone()).unwrap();
    let second = multipart.parse(body).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_multipart_truncated() {
    let body = "--X\r\n\
                Content-Disposition: form-data; name=\"a\"\r\n\
                \r\n\
                complete\r\n\
                --X\r\n\
                Content-Disposition: form-data; name=\"b\"\r\n\
                \r\n\
                cut off here";

    let form = parse_form_data("X", body);
    assert_eq!(form.get("a").unwrap().as_ref(), b"complete");
    assert_eq!(form.get("b").unwrap().as_ref(), b"cut off here");

    let strict = Multipart::with_constraints("X", Constraints::new().require_terminator(true));
    assert_eq!(strict.parse(body), Err(Error::IncompleteStream));
}

#[test]
fn test_multipart_garbage_never_panics() {
    let inputs: &[&[u8]] = &[
        b"\r\n",
        b"\r",
        b"--X",
        b"--X\r\n",
        b"--X\r\n\r\n",
        b"--X\r\nContent-Disposition: form-data; name=\"a\"",
        b"--X\r\n\r\n--X",
        b"\r\n--X\r\n\r\n\r\n--X\r\n\r\n\r\n",
        b"\x00\xff--X--",
    ];

    for input in inputs {
        let _ = parse_form_data("X", Bytes::copy_from_slice(input));
        let strict = Multipart::with_constraints("X", Constraints::new().require_terminator(true));
        let _ = strict.parse(Bytes::copy_from_slice(input));
    }
}

#[tokio::test]
async fn test_multipart_parse_stream() {
    let multipart = Multipart::new("AaB03x");

    let form = multipart.parse_stream(char_stream(SCENARIO)).await.unwrap();

    assert_eq!(form.get("field1").unwrap().as_ref(), b"value1");
    assert_eq!(form.get("file").unwrap().as_ref(), b"\x00\x01\x02");
}

#[tokio::test]
async fn test_multipart_parse_stream_size_limit() {
    let constraints = Constraints::new().size_limit(SizeLimit::new().whole_stream(16));
    let multipart = Multipart::with_constraints("AaB03x", constraints);

    assert_eq!(
        multipart.parse_stream(char_stream(SCENARIO)).await,
        Err(Error::StreamSizeExceeded { limit: 16 })
    );
}

#[tokio::test]
async fn test_multipart_parse_stream_read_error() {
    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
        Ok(Bytes::from_static(b"--X\r\n")),
        Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "connection reset")),
    ];

    let result = Multipart::new("X").parse_stream(stream::iter(chunks)).await;
    assert!(matches!(result, Err(Error::StreamReadFailed(_))));
}

#[cfg(feature = "tokio-io")]
#[tokio::test]
async fn test_multipart_parse_reader() {
    let form = Multipart::new("AaB03x").parse_reader(SCENARIO.as_bytes()).await.unwrap();
    assert_eq!(form.len(), 2);
}

#[cfg(feature = "json")]
#[test]
fn test_multipart_json_field() {
    #[derive(serde::Deserialize)]
    struct Args {
        op: String,
        count: u32,
    }

    let body = "--X\r\n\
                Content-Disposition: form-data; name=\"args\"\r\n\
                \r\n\
                {\"op\":\"replicate\",\"count\":2}\r\n\
                --X--\r\n";

    let form = parse_form_data("X", body);
    let args: Args = form.field("args").unwrap().json().unwrap();

    assert_eq!(args.op, "replicate");
    assert_eq!(args.count, 2);
}
