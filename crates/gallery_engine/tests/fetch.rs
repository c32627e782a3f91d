use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use gallery_core::{PageOutcome, PageRequest, PAGE_SIZE};
use gallery_engine::{fetch_page, FailureKind, FetchSettings, ImageSearch, ReqwestImageSearch};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hit(id: u64) -> Value {
    json!({
        "id": id,
        "pageURL": format!("https://pixabay.com/photos/{id}/"),
        "type": "photo",
        "tags": format!("cat, pet, {id}"),
        "previewURL": format!("https://cdn.example.com/{id}_150.jpg"),
        "webformatURL": format!("https://cdn.example.com/{id}_640.jpg"),
        "largeImageURL": format!("https://cdn.example.com/{id}_1280.jpg"),
        "views": 100 + id,
        "downloads": 50 + id,
        "likes": 10 + id,
        "comments": id,
        "user": "someone"
    })
}

fn body(first_id: u64, count: u64, total_hits: u64) -> Value {
    json!({
        "total": total_hits * 10,
        "totalHits": total_hits,
        "hits": (first_id..first_id + count).map(hit).collect::<Vec<_>>(),
    })
}

fn settings(server: &MockServer) -> FetchSettings {
    FetchSettings {
        endpoint: format!("{}/api/", server.uri()),
        api_key: "test-key".to_string(),
        ..FetchSettings::default()
    }
}

fn request(query: &str, page: u32) -> PageRequest {
    PageRequest {
        request_id: 1,
        query: query.to_string(),
        page,
        page_size: PAGE_SIZE,
    }
}

#[tokio::test]
async fn search_sends_fixed_request_contract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "yellow flowers"))
        .and(query_param("image_type", "photo"))
        .and(query_param("orientation", "horizontal"))
        .and(query_param("page", "2"))
        .and(query_param("safesearch", "true"))
        .and(query_param("per_page", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(41, 40, 95)))
        .expect(1)
        .mount(&server)
        .await;

    let search = ReqwestImageSearch::new(settings(&server)).expect("client");
    let response = search
        .search(&request("yellow flowers", 2))
        .await
        .expect("search ok");

    assert_eq!(response.total_hits, 95);
    assert_eq!(response.hits.len(), 40);
    assert_eq!(response.hits[0].id, 41);
    assert_eq!(response.hits[0].webformat_url, "https://cdn.example.com/41_640.jpg");
}

#[tokio::test]
async fn fetch_page_classifies_middle_and_last_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(1, 40, 95)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(81, 15, 95)))
        .mount(&server)
        .await;
    let search = ReqwestImageSearch::new(settings(&server)).expect("client");

    match fetch_page(&search, &request("cats", 1)).await {
        PageOutcome::Page(result) => {
            assert!(!result.exhausted);
            assert_eq!(result.items.len(), 40);
            assert_eq!(result.total_available, 95);
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    match fetch_page(&search, &request("cats", 3)).await {
        PageOutcome::Page(result) => {
            assert!(result.exhausted);
            let ids: Vec<u64> = result.items.iter().map(|item| item.id).collect();
            assert_eq!(ids, (81..96).collect::<Vec<u64>>());
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn fetch_page_reports_empty_result_as_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(0, 0, 0)))
        .mount(&server)
        .await;
    let search = ReqwestImageSearch::new(settings(&server)).expect("client");

    match fetch_page(&search, &request("zzzzqqq", 1)).await {
        PageOutcome::Page(result) => {
            assert!(result.exhausted);
            assert!(result.items.is_empty());
            assert_eq!(result.total_available, 0);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn search_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("[ERROR 400] \"key\" is invalid"))
        .mount(&server)
        .await;
    let search = ReqwestImageSearch::new(settings(&server)).expect("client");

    let err = search.search(&request("cats", 1)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));

    match fetch_page(&search, &request("cats", 1)).await {
        PageOutcome::Failure { message } => assert!(message.contains("http status 400")),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn search_fails_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;
    let search = ReqwestImageSearch::new(settings(&server)).expect("client");

    let err = search.search(&request("cats", 1)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn search_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(body(1, 1, 1)),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings(&server)
    };
    let search = ReqwestImageSearch::new(settings).expect("client");

    let err = search.search(&request("cats", 1)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
    assert!(!err.message.contains("test-key"));
}

#[tokio::test]
async fn search_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..settings(&server)
    };
    let search = ReqwestImageSearch::new(settings).expect("client");

    let err = search.search(&request("cats", 1)).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

/// Serves one chunked response (no Content-Length) from a raw socket.
fn serve_chunked_once(chunks: Vec<&'static str>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let mut response = String::from(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
             Transfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
        );
        for chunk in chunks {
            response.push_str(&format!("{:x}\r\n{chunk}\r\n", chunk.len()));
        }
        response.push_str("0\r\n\r\n");
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
    });
    format!("http://{addr}/api/")
}

#[tokio::test]
async fn search_caps_streamed_body_without_content_length() {
    let endpoint = serve_chunked_once(vec!["{\"totalHits\":", " 0, \"hits\"", ": [] }      "]);
    let search = ReqwestImageSearch::new(FetchSettings {
        endpoint,
        api_key: "test-key".to_string(),
        max_bytes: 20,
        ..FetchSettings::default()
    })
    .expect("client");

    let err = search.search(&request("cats", 1)).await.unwrap_err();
    assert!(
        matches!(err.kind, FailureKind::TooLarge { max_bytes: 20, actual: Some(actual) } if actual > 20),
        "unexpected error {err:?}"
    );
}

#[tokio::test]
async fn streamed_body_within_cap_is_decoded() {
    let endpoint = serve_chunked_once(vec!["{\"totalHits\":", " 0, \"hits\"", ": [] }"]);
    let search = ReqwestImageSearch::new(FetchSettings {
        endpoint,
        api_key: "test-key".to_string(),
        max_bytes: 64,
        ..FetchSettings::default()
    })
    .expect("client");

    let response = search.search(&request("cats", 1)).await.expect("response");
    assert_eq!(response.total_hits, 0);
    assert!(response.hits.is_empty());
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_failure() {
    let settings = FetchSettings {
        endpoint: "http://127.0.0.1:9/api/".to_string(),
        api_key: "test-key".to_string(),
        connect_timeout: Duration::from_millis(200),
        request_timeout: Duration::from_secs(2),
        ..FetchSettings::default()
    };
    let search = ReqwestImageSearch::new(settings).expect("client");

    match fetch_page(&search, &request("cats", 1)).await {
        PageOutcome::Failure { message } => assert!(!message.contains("test-key")),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn request_url_encodes_query() {
    let search = ReqwestImageSearch::new(FetchSettings {
        api_key: "k".to_string(),
        ..FetchSettings::default()
    })
    .expect("client");

    let url = search.request_url(&request("red & blue", 1)).expect("url");
    assert_eq!(url.host_str(), Some("pixabay.com"));
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("key".to_string(), "k".to_string()),
            ("q".to_string(), "red & blue".to_string()),
            ("image_type".to_string(), "photo".to_string()),
            ("orientation".to_string(), "horizontal".to_string()),
            ("page".to_string(), "1".to_string()),
            ("safesearch".to_string(), "true".to_string()),
            ("per_page".to_string(), "40".to_string()),
        ]
    );
}

#[test]
fn invalid_endpoint_is_rejected() {
    let search = ReqwestImageSearch::new(FetchSettings {
        endpoint: "not a url".to_string(),
        ..FetchSettings::default()
    })
    .expect("client");

    let err = search.request_url(&request("cats", 1)).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
