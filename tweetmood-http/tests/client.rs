use reqwest::StatusCode;
use serde::Deserialize;
use tweetmood_http::{Auth, HttpClient, HttpError, OAuth1Keys, OAuth1Signer, RequestOpts};
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize)]
struct Item {
    id: u64,
    name: String,
}

fn signer() -> OAuth1Signer {
    OAuth1Signer::new(OAuth1Keys {
        consumer_key: "ck".into(),
        consumer_secret: "cs".into(),
        token: "at".into(),
        token_secret: "ats".into(),
    })
}

#[tokio::test]
async fn get_json_sends_query_and_signature() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/items/show.json"))
        .and(query_param("screen_name", "jack"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 12,
            "name": "jack"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let signer = signer();
    let item: Item = client
        .get_json(
            "1.1/items/show.json",
            RequestOpts {
                auth: Some(Auth::OAuth1(&signer)),
                query: Some(vec![("screen_name", "jack".into())]),
            },
        )
        .await
        .unwrap();

    assert_eq!(item.id, 12);
    assert_eq!(item.name, "jack");
}

#[tokio::test]
async fn authorization_header_is_oauth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1, "name": "x"})))
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let signer = signer();
    let _: Item = client
        .get_json(
            "1.1/items/show.json",
            RequestOpts {
                auth: Some(Auth::OAuth1(&signer)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let auth = received[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(auth.starts_with("OAuth "));
    assert!(auth.contains(r#"oauth_consumer_key="ck""#));
    assert!(auth.contains(r#"oauth_token="at""#));
}

#[tokio::test]
async fn error_status_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "errors": [{"code": 88, "message": "Rate limit exceeded"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let err = client
        .get_json::<Item>("1.1/items/show.json", RequestOpts::default())
        .await
        .unwrap_err();

    match err {
        HttpError::Api {
            status,
            code,
            message,
            ..
        } => {
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
            assert_eq!(code, Some(88));
            assert_eq!(message, "Rate limit exceeded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let err = client
        .get_json::<Item>("1.1/items/show.json", RequestOpts::default())
        .await
        .unwrap_err();

    assert!(matches!(err, HttpError::Decode(_, ref body) if body == "not json"));
}
