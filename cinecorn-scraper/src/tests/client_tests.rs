use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use crate::client::MetadataClient;
use crate::config::ProviderConfig;
use crate::error::ScrapeError;
use crate::provider::{ArtworkSource, MetadataSource};

/// A canned HTTP response: status line text and body.
struct Reply {
    status: &'static str,
    body: Vec<u8>,
}

impl Reply {
    fn new(status: &'static str, body: &str) -> Self {
        Self {
            status,
            body: body.as_bytes().to_vec(),
        }
    }
}

/// Serve each reply to one connection, in order, on a local port.
///
/// Returns the server's base address and a channel yielding the request line
/// of every request received.
fn serve(replies: Vec<Reply>) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for reply in replies {
            let (mut stream, _) = listener.accept().unwrap();

            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&chunk[..n]);
            }
            let request_line = String::from_utf8_lossy(&head)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string();
            let _ = tx.send(request_line);

            let header = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n",
                reply.status,
                reply.body.len()
            );
            stream.write_all(header.as_bytes()).unwrap();
            stream.write_all(&reply.body).unwrap();
            stream.flush().unwrap();
        }
    });

    (format!("http://{addr}"), rx)
}

fn client_for(addr: &str, api_key: Option<&str>) -> MetadataClient {
    let config = ProviderConfig {
        base_url: format!("{addr}/api"),
        api_key: api_key.map(str::to_string),
        timeout_secs: 5,
    };
    MetadataClient::new(&config).unwrap()
}

#[test]
fn test_search_encodes_term_and_sends_api_key() {
    let (addr, requests) = serve(vec![Reply::new(
        "200 OK",
        r#"{"results": [{"id": "0060196", "title": "Il buono, il brutto, il cattivo", "year": 1966}]}"#,
    )]);
    let client = client_for(&addr, Some("k"));

    let hits = client.search("The Good, the Bad & Ugly").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "0060196");
    assert_eq!(hits[0].year, Some(1966));

    assert_eq!(
        requests.recv().unwrap(),
        "GET /api/search?q=The+Good%2C+the+Bad+%26+Ugly&api_key=k HTTP/1.1"
    );
}

#[test]
fn test_search_without_api_key_omits_parameter() {
    let (addr, requests) = serve(vec![Reply::new("200 OK", r#"{"results": []}"#)]);
    let client = client_for(&addr, None);

    assert!(client.search("Heat").unwrap().is_empty());
    assert_eq!(requests.recv().unwrap(), "GET /api/search?q=Heat HTTP/1.1");
}

#[test]
fn test_fetch_details_parses_spaced_keys() {
    let (addr, requests) = serve(vec![Reply::new(
        "200 OK",
        r#"{
            "id": "0060196",
            "title": "Il buono, il brutto, il cattivo",
            "year": 1966,
            "runtimes": ["161", "178"],
            "rating": 9.0,
            "plot outline": "A bounty hunting scam joins two men in an uneasy alliance.",
            "genres": ["Western"],
            "director": [{"id": "0001466", "name": "Sergio Leone"}]
        }"#,
    )]);
    let client = client_for(&addr, Some("k"));

    let movie = client.fetch_details("0060196").unwrap();
    assert_eq!(movie.title.as_deref(), Some("Il buono, il brutto, il cattivo"));
    assert_eq!(movie.runtimes.len(), 2);
    assert!(movie.plot_outline.is_some());
    assert_eq!(movie.directors[0].name, "Sergio Leone");

    assert_eq!(
        requests.recv().unwrap(),
        "GET /api/movie/0060196?api_key=k HTTP/1.1"
    );
}

#[test]
fn test_fetch_details_404_is_not_found_and_id_is_one_segment() {
    let (addr, requests) = serve(vec![Reply::new("404 Not Found", "no such movie")]);
    let client = client_for(&addr, Some("k"));

    match client.fetch_details("tt/0060196").unwrap_err() {
        ScrapeError::NotFound { term } => assert_eq!(term, "tt/0060196"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        requests.recv().unwrap(),
        "GET /api/movie/tt%2F0060196?api_key=k HTTP/1.1"
    );
}

#[test]
fn test_rejected_key_is_invalid_credentials() {
    let (addr, _requests) = serve(vec![
        Reply::new("401 Unauthorized", ""),
        Reply::new("403 Forbidden", ""),
    ]);
    let client = client_for(&addr, Some("wrong"));

    assert!(matches!(
        client.search("Heat").unwrap_err(),
        ScrapeError::InvalidCredentials(_)
    ));
    assert!(matches!(
        client.fetch_details("0113277").unwrap_err(),
        ScrapeError::InvalidCredentials(_)
    ));
}

#[test]
fn test_too_many_requests_is_rate_limit() {
    let (addr, _requests) = serve(vec![Reply::new("429 Too Many Requests", "")]);
    let client = client_for(&addr, Some("k"));

    assert!(matches!(
        client.search("Heat").unwrap_err(),
        ScrapeError::RateLimit
    ));
}

#[test]
fn test_other_failure_is_server_error_with_body() {
    let (addr, _requests) = serve(vec![Reply::new("500 Internal Server Error", "upstream down")]);
    let client = client_for(&addr, Some("k"));

    match client.search("Heat").unwrap_err() {
        ScrapeError::ServerError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream down");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_fetch_bytes_returns_body() {
    let (addr, requests) = serve(vec![Reply {
        status: "200 OK",
        body: vec![0xFF, 0xD8, 0xFF, 0xE0],
    }]);
    let client = client_for(&addr, Some("k"));

    let url = format!("{addr}/images/cover._V1._SX95.jpg");
    assert_eq!(client.fetch_bytes(&url).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
    assert_eq!(
        requests.recv().unwrap(),
        "GET /images/cover._V1._SX95.jpg HTTP/1.1"
    );
}

#[test]
fn test_fetch_bytes_non_success_is_fetch_error() {
    let (addr, _requests) = serve(vec![Reply::new("404 Not Found", "")]);
    let client = client_for(&addr, Some("k"));

    let url = format!("{addr}/images/missing.jpg");
    match client.fetch_bytes(&url).unwrap_err() {
        ScrapeError::Fetch { url: failed, reason } => {
            assert_eq!(failed, url);
            assert_eq!(reason, "HTTP 404 Not Found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_fetch_bytes_unreachable_host_is_fetch_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = client_for(&format!("http://{addr}"), None);

    let err = client
        .fetch_bytes(&format!("http://{addr}/images/cover.jpg"))
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Fetch { .. }));
}

#[test]
fn test_new_rejects_unusable_base_url() {
    for base_url in ["not a url", "mailto:someone@example.com"] {
        let config = ProviderConfig {
            base_url: base_url.to_string(),
            api_key: None,
            timeout_secs: 5,
        };
        assert!(matches!(
            MetadataClient::new(&config).err(),
            Some(ScrapeError::Config(_))
        ));
    }
}
