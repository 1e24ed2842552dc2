use serde_json::json;
use tweetmood_http::OAuth1Keys;
use tweetmood_social::twitter::TwitterApi;
use tweetmood_social::{SocialApi, SocialError, UserRef, fetch_following, fetch_tweets};
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn keys() -> OAuth1Keys {
    OAuth1Keys {
        consumer_key: "ck".into(),
        consumer_secret: "cs".into(),
        token: "at".into(),
        token_secret: "ats".into(),
    }
}

fn api(server: &MockServer) -> TwitterApi {
    TwitterApi::with_base_url(&server.uri(), keys()).unwrap()
}

fn user_json(id: u64, handle: &str, followers: u64) -> serde_json::Value {
    json!({
        "id": id,
        "screen_name": handle,
        "name": format!("{handle} display"),
        "followers_count": followers,
        "created_at": "Wed Oct 10 20:19:24 +0000 2018",
        "profile_image_url": format!("http://pbs.example/{handle}_normal.jpg"),
    })
}

#[tokio::test]
async fn get_user_by_handle_and_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/users/show.json"))
        .and(query_param("screen_name", "jack"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(12, "jack", 6_000_000)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1.1/users/show.json"))
        .and(query_param("user_id", "783214"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(783214, "twitter", 60_000_000)))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server);
    let jack = api.get_user(&UserRef::Handle("jack".into())).await.unwrap();
    assert_eq!(jack.id, 12);
    assert_eq!(jack.followers_count, 6_000_000);

    let by_id = api.get_user(&UserRef::Id(783214)).await.unwrap();
    assert_eq!(by_id.screen_name, "twitter");
}

#[tokio::test]
async fn timeline_request_asks_for_extended_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .and(query_param("screen_name", "jack"))
        .and(query_param("count", "200"))
        .and(query_param("tweet_mode", "extended"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let posts = api(&server).get_recent_posts("jack", 5000).await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn fetch_tweets_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/users/show.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(12, "jack", 1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .and(query_param("count", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 2,
                "created_at": "Mon Jan 06 00:00:01 +0000 2020",
                "full_text": "What a wonderful, happy day! #sunshine",
                "retweet_count": 3,
                "entities": {"hashtags": [{"text": "sunshine"}], "urls": [], "user_mentions": []}
            },
            {
                "id": 1,
                "created_at": "Sun Mar 01 12:00:00 +0000 2015",
                "full_text": "This is awful and I hate it",
                "retweet_count": 0,
                "entities": {"hashtags": [], "urls": [], "user_mentions": [{"screen_name": "bob"}]}
            }
        ])))
        .mount(&server)
        .await;

    let timeline = fetch_tweets(&api(&server), "jack").await.unwrap();
    assert_eq!(timeline.user, "jack");
    assert_eq!(timeline.count, 2);
    assert!(timeline.posts[0].score > 0.0);
    assert!(timeline.posts[1].score < 0.0);
    assert_eq!(timeline.posts[0].hashtags, vec!["sunshine"]);
    assert_eq!(timeline.posts[1].mentions, vec!["bob"]);
}

#[tokio::test]
async fn fetch_following_sorts_resolved_friends() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/friends/ids.json"))
        .and(query_param("screen_name", "jack"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ids": [1, 2, 3],
            "next_cursor": 0
        })))
        .expect(1)
        .mount(&server)
        .await;
    for (id, handle, followers) in [(1, "small", 10), (2, "big", 5000), (3, "medium", 700)] {
        Mock::given(method("GET"))
            .and(path("/1.1/users/show.json"))
            .and(query_param("user_id", id.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(id, handle, followers)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let accounts = fetch_following(&api(&server), "jack").await.unwrap();
    let handles: Vec<_> = accounts.iter().map(|a| a.handle.as_str()).collect();
    assert_eq!(handles, ["big", "medium", "small"]);
    assert_eq!(accounts[0].image, "http://pbs.example/big_normal.jpg");
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"code": 50, "message": "User not found."}]
        })))
        .mount(&server)
        .await;

    let err = api(&server)
        .get_user(&UserRef::Handle("nobody_here".into()))
        .await
        .unwrap_err();
    match err {
        SocialError::NotFound { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "User not found.");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn rate_limit_surfaces_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/friends/ids.json"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "errors": [{"code": 88, "message": "Rate limit exceeded"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = api(&server).get_friend_ids("jack").await.unwrap_err();
    assert!(matches!(err, SocialError::RateLimited { status: 429, .. }));
}
