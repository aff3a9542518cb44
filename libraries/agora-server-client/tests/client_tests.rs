//! Tests for the Agora server client library.
//!
//! These tests use mock servers to verify client behavior without a real
//! API server.

use agora_server_client::{
    AgoraClient, ApiError, ClientConfig, NewAccount, NewPost, PostListQuery, PostSort,
    PostUpdate, ProfileUpdate,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AgoraClient {
    AgoraClient::new(ClientConfig::new(server.uri())).expect("valid mock url")
}

// =============================================================================
// Auth Tests
// =============================================================================

mod auth {
    use super::*;

    #[tokio::test]
    async fn login_returns_raw_profile() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({ "email": "ann@example.com", "password": "pw" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "nickname": "Ann",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let profile = client
            .auth()
            .login("ann@example.com", "pw")
            .await
            .expect("login succeeds");

        assert_eq!(profile["id"], 7);
        assert_eq!(profile["nickname"], "Ann");
    }

    #[tokio::test]
    async fn login_rejection_is_auth_failed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.auth().login("ann@example.com", "wrong").await;

        match result {
            Err(ApiError::AuthFailed(_)) => {}
            other => panic!("expected AuthFailed, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn fetch_profile_maps_401_to_auth_required() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.auth().fetch_profile().await;

        assert!(matches!(result, Err(ApiError::AuthRequired)));
    }

    #[tokio::test]
    async fn logout_uses_delete() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.auth().logout().await.expect("logout succeeds");
    }

    #[tokio::test]
    async fn signup_posts_account_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(json!({
                "nickname": "Ann",
                "email": "ann@example.com",
                "password": "pw",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 9 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .auth()
            .signup(&NewAccount {
                nickname: "Ann".to_string(),
                email: "ann@example.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .expect("signup succeeds");
    }

    #[tokio::test]
    async fn profile_update_omits_unset_image_fields() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/users/me"))
            .and(body_json(json!({ "nickname": "Ann", "email": "a@b.c" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .auth()
            .update_profile(&ProfileUpdate {
                nickname: "Ann".to_string(),
                email: "a@b.c".to_string(),
                ..ProfileUpdate::default()
            })
            .await
            .expect("update succeeds");
    }

    #[tokio::test]
    async fn delete_account_surfaces_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.auth().delete_account().await;

        match result {
            Err(ApiError::Server { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Server error, got {:?}", other.map(|_| ())),
        }
    }
}

// =============================================================================
// Feed Tests
// =============================================================================

mod feed {
    use super::*;

    #[tokio::test]
    async fn list_sends_cursor_size_and_sort() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts"))
            .and(query_param("cursorId", "42"))
            .and(query_param("size", "12"))
            .and(query_param("sort", "likes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": 41, "title": "Hello", "authorNickname": "Ann", "likeCount": 3 }
                ],
                "nextCursor": 41,
                "hasNext": true,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = client
            .posts()
            .list(&PostListQuery {
                cursor_id: Some(42),
                size: 12,
                sort: PostSort::Popular,
            })
            .await
            .expect("feed page");

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Hello");
        assert_eq!(page.items[0].like_count, 3);
        assert_eq!(page.next_cursor, Some(41));
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn list_defaults_missing_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "id": 1 }],
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = client
            .posts()
            .list(&PostListQuery::default())
            .await
            .expect("feed page");

        assert_eq!(page.items[0].title, "");
        assert_eq!(page.items[0].reply_count, 0);
        assert_eq!(page.next_cursor, None);
        assert!(!page.has_next);
    }
}

// =============================================================================
// Post Tests
// =============================================================================

mod posts {
    use super::*;

    #[tokio::test]
    async fn get_parses_detail_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "title": "Post",
                "content": "Body",
                "author": { "id": 7, "nickname": "Ann" },
                "liked": true,
                "likeCount": 2,
                "fileUrls": ["https://cdn/x.png"],
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let post = client.posts().get(5).await.expect("post detail");

        assert_eq!(post.id, 5);
        assert!(post.liked);
        assert_eq!(post.author.as_ref().map(|a| a.nickname.as_str()), Some("Ann"));
        assert_eq!(post.file_urls, vec!["https://cdn/x.png"]);
    }

    #[tokio::test]
    async fn get_missing_post_is_server_404() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts/999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.posts().get(999).await;

        match result {
            Err(ApiError::Server { status: 404, .. }) => {}
            other => panic!("expected 404, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn create_returns_new_post_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/posts"))
            .and(body_json(json!({
                "title": "T",
                "content": "C",
                "fileIds": [3],
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 11 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let created = client
            .posts()
            .create(&NewPost {
                title: "T".to_string(),
                content: "C".to_string(),
                file_ids: vec![3],
            })
            .await
            .expect("post created");

        assert_eq!(created.id, 11);
    }

    #[tokio::test]
    async fn update_omits_file_ids_when_unset() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/posts/11"))
            .and(body_json(json!({ "title": "T2", "content": "C2" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .posts()
            .update(
                11,
                &PostUpdate {
                    title: "T2".to_string(),
                    content: "C2".to_string(),
                    file_ids: None,
                },
            )
            .await
            .expect("post updated");
    }
}

// =============================================================================
// Comment Tests
// =============================================================================

mod comments {
    use super::*;

    #[tokio::test]
    async fn comment_page_round_trip() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts/5/comments"))
            .and(query_param("page", "1"))
            .and(query_param("size", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "id": 1, "content": "hi", "authorId": 7, "authorNickname": "Ann" }
                ],
                "page": 1,
                "totalPages": 3,
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = client.posts().comments(5, 1, 10).await.expect("comments");

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].author_id, Some(7));
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn create_and_update_and_delete_comment() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/posts/5/comments"))
            .and(body_json(json!({ "content": "first" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 21, "content": "first",
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/comments/21"))
            .and(body_json(json!({ "content": "edited" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 21, "content": "edited", "updatedAt": "2025-06-01T10:00:00Z",
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/comments/21"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let created = client
            .posts()
            .create_comment(5, "first")
            .await
            .expect("comment created");
        assert_eq!(created.id, 21);

        let updated = client
            .posts()
            .update_comment(21, "edited")
            .await
            .expect("comment updated");
        assert_eq!(updated.content, "edited");
        assert_eq!(updated.updated_at.as_deref(), Some("2025-06-01T10:00:00Z"));

        client
            .posts()
            .delete_comment(21)
            .await
            .expect("comment deleted");
    }
}

// =============================================================================
// Reaction Tests
// =============================================================================

mod reactions {
    use super::*;

    #[tokio::test]
    async fn like_and_unlike_report_new_state() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/posts/5/likes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "liked": true, "likeCount": 4,
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/posts/5/likes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "liked": false, "likeCount": 3,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);

        let liked = client.posts().like(5).await.expect("like");
        assert!(liked.liked);
        assert_eq!(liked.like_count, 4);

        let unliked = client.posts().unlike(5).await.expect("unlike");
        assert!(!unliked.liked);
        assert_eq!(unliked.like_count, 3);
    }

    #[tokio::test]
    async fn vote_posts_selected_option() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/posts/5/vote"))
            .and(body_json(json!({ "option": "up" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "option": "up", "voteCount": 9,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let vote = client.posts().vote(5, "up").await.expect("vote");

        assert_eq!(vote.option, "up");
        assert_eq!(vote.vote_count, 9);
    }
}

// =============================================================================
// File Tests
// =============================================================================

mod files {
    use super::*;

    #[tokio::test]
    async fn upload_sends_multipart_and_parses_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/files"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 33,
                "url": "https://cdn/33.png",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let uploaded = client
            .files()
            .upload("photo.png", vec![1, 2, 3], "image/png")
            .await
            .expect("upload");

        assert_eq!(uploaded.id, 33);
        assert_eq!(uploaded.url.as_deref(), Some("https://cdn/33.png"));
    }

    #[tokio::test]
    async fn upload_path_rejects_missing_file() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let result = client
            .files()
            .upload_path(std::path::Path::new("/definitely/not/here.png"))
            .await;

        assert!(matches!(result, Err(ApiError::FileNotFound(_))));
    }
}

// =============================================================================
// Ranking Tests
// =============================================================================

mod rankings {
    use super::*;

    #[tokio::test]
    async fn list_decodes_wrapped_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rankings"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "nickname": "Ann", "score": 12, "totalVotes": 5, "correctVotes": 4 }
                ],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let entries = client.rankings().list(20).await.expect("rankings");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].correct_votes, 4);
    }

    #[tokio::test]
    async fn vote_score_defaults_missing_counters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me/vote-score"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "score": 7 })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let score = client.rankings().my_vote_score().await.expect("score");

        assert_eq!(score.score, 7);
        assert_eq!(score.total_votes, 0);
        assert_eq!(score.correct_votes, 0);
    }
}

// =============================================================================
// Timeout Tests
// =============================================================================

mod timeouts {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn slow_response_aborts_as_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": 1 }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = ClientConfig::new(server.uri()).with_timeout_ms(50);
        let client = AgoraClient::new(config).expect("valid url");

        let result = client.auth().fetch_profile().await;
        assert!(matches!(result, Err(ApiError::Timeout)));
    }
}
