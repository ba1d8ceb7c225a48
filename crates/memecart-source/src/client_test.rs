use super::*;
use crate::types::{ImgflipData, ImgflipMeme};

const URL: &str = "https://api.imgflip.com/get_memes";

fn meme(id: &str) -> ImgflipMeme {
    ImgflipMeme {
        id: id.to_string(),
        name: format!("Meme {id}"),
        url: format!("https://i.imgflip.com/{id}.jpg"),
        width: 500,
        height: 500,
        box_count: 2,
    }
}

#[test]
fn new_accepts_https_url() {
    let client = ImgflipClient::new(URL, 5, "memecart-test/0.1", 0, 0).unwrap();
    assert_eq!(client.catalog_url(), URL);
}

#[test]
fn new_rejects_unparseable_url() {
    let result = ImgflipClient::new("not a url", 5, "memecart-test/0.1", 0, 0);
    assert!(
        matches!(result, Err(SourceError::InvalidUrl { .. })),
        "expected InvalidUrl"
    );
}

#[test]
fn new_rejects_non_http_scheme() {
    let result = ImgflipClient::new("ftp://example.com/memes", 5, "memecart-test/0.1", 0, 0);
    assert!(
        matches!(result, Err(SourceError::InvalidUrl { ref reason, .. }) if reason.contains("ftp")),
        "expected InvalidUrl for ftp scheme"
    );
}

#[test]
fn unpack_response_rejects_unsuccessful_payload() {
    let response = ImgflipResponse {
        success: false,
        data: None,
        error_message: Some("Service unavailable".to_string()),
    };
    let err = unpack_response(response, URL).unwrap_err();
    assert!(
        matches!(err, SourceError::Unsuccessful { ref message, .. } if message == "Service unavailable"),
        "expected Unsuccessful, got: {err:?}"
    );
}

#[test]
fn unpack_response_unsuccessful_without_message() {
    let response = ImgflipResponse {
        success: false,
        data: None,
        error_message: None,
    };
    let err = unpack_response(response, URL).unwrap_err();
    assert!(matches!(err, SourceError::Unsuccessful { ref message, .. } if message == "no error message"));
}

#[test]
fn unpack_response_success_without_data_is_empty() {
    let response = ImgflipResponse {
        success: true,
        data: None,
        error_message: None,
    };
    assert!(unpack_response(response, URL).unwrap().is_empty());
}

#[test]
fn unpack_response_normalizes_items_in_order() {
    let response = ImgflipResponse {
        success: true,
        data: Some(ImgflipData {
            memes: vec![meme("3"), meme("1"), meme("2")],
        }),
        error_message: None,
    };
    let items = unpack_response(response, URL).unwrap();
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["3", "1", "2"]);
}

#[test]
fn transient_classification() {
    assert!(SourceError::RateLimited {
        url: URL.into(),
        retry_after_secs: 1
    }
    .is_transient());
    assert!(SourceError::UnexpectedStatus {
        status: 502,
        url: URL.into()
    }
    .is_transient());
    assert!(!SourceError::UnexpectedStatus {
        status: 400,
        url: URL.into()
    }
    .is_transient());
    assert!(!SourceError::NotFound { url: URL.into() }.is_transient());
    assert!(!SourceError::Unsuccessful {
        url: URL.into(),
        message: String::new()
    }
    .is_transient());
}
