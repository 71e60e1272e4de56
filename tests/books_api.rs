mod common;

use axum::http::StatusCode;
use common::{error_code, TestApp};
use libris_app::responses::NO_CHANGES_MESSAGE;
use serde_json::json;

#[tokio::test]
async fn create_and_fetch_joined_view() {
    let app = TestApp::new().await;
    let author = app.author("Chinua Achebe", 1930, "Nigerian").await;

    let (status, created) = app
        .post(
            "/books",
            json!({ "title": "Things Fall Apart", "author_id": author.to_string(), "published": 1958 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["author_id"], author);
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app.get(&format!("/books/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": id,
            "title": "Things Fall Apart",
            "author_id": author,
            "published": 1958,
            "author": "Chinua Achebe",
            "birthYear": 1930,
            "nationality": "Nigerian"
        })
    );
}

#[tokio::test]
async fn list_returns_plain_books_in_id_order() {
    let app = TestApp::new().await;
    let author = app.author("Leo Tolstoy", 1828, "Russian").await;
    let first = app.book("War and Peace", author, 1869).await;
    let second = app.book("Anna Karenina", author, 1878).await;

    let (status, body) = app.get("/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": first, "title": "War and Peace", "author_id": author, "published": 1869 },
            { "id": second, "title": "Anna Karenina", "author_id": author, "published": 1878 }
        ])
    );
}

#[tokio::test]
async fn create_with_unknown_author_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/books", json!({ "title": "Orphan", "author_id": 42, "published": 2000 }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "not_found");
    assert_eq!(app.writes(), 0);
}

#[tokio::test]
async fn create_validates_fields() {
    let app = TestApp::new().await;
    let author = app.author("Mary Shelley", 1797, "British").await;
    let writes = app.writes();

    let cases = [
        (json!({ "author_id": author, "published": 1818 }), "missing_field"),
        (json!({ "title": "Frankenstein", "published": 1818 }), "missing_field"),
        (json!({ "title": "Frankenstein", "author_id": author }), "missing_field"),
        (json!({ "title": "F", "author_id": author, "published": 1818 }), "invalid_field"),
        (json!({ "title": "F".repeat(201), "author_id": author, "published": 1818 }), "invalid_field"),
        (json!({ "title": "Frankenstein", "author_id": 0, "published": 1818 }), "invalid_identifier"),
        (json!({ "title": "Frankenstein", "author_id": "abc", "published": 1818 }), "invalid_identifier"),
        (json!({ "title": "Frankenstein", "author_id": author, "published": 50000 }), "invalid_year"),
    ];

    for (body, code) in cases {
        let (status, response) = app.post("/books", body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(error_code(&response), code, "{body}");
    }
    assert_eq!(app.writes(), writes);
}

#[tokio::test]
async fn invalid_identifiers_are_rejected() {
    let app = TestApp::new().await;

    for raw in ["abc", "-1", "0"] {
        for method in ["GET", "DELETE"] {
            let (status, body) = app.send(method, &format!("/books/{raw}"), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(error_code(&body), "invalid_identifier");
        }

        let (status, body) = app
            .put(&format!("/books/{raw}"), json!({ "title": "Emma" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "invalid_identifier");
    }
}

#[tokio::test]
async fn mistyped_values_report_field_errors() {
    let app = TestApp::new().await;
    let author = app.author("Jane Austen", 1775, "British").await;
    let writes = app.writes();

    let cases = [
        (json!({ "title": "Emma", "author_id": author, "published": 1815.5 }), "invalid_year"),
        (json!({ "title": "Emma", "author_id": author, "published": true }), "invalid_year"),
        (json!({ "title": "Emma", "author_id": 1.5, "published": 1815 }), "invalid_identifier"),
        (json!({ "title": 123, "author_id": author, "published": 1815 }), "invalid_field"),
    ];
    for (body, code) in cases {
        let (status, response) = app.post("/books", body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(error_code(&response), code, "{body}");
    }
    assert_eq!(app.writes(), writes);

    let (status, body) = app
        .post("/books", json!({ "title": "Emma", "author_id": author, "published": 1815.0 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["published"], 1815);
}

#[tokio::test]
async fn storage_failure_is_an_internal_error() {
    let app = TestApp::new().await;
    let author = app.author("Jane Austen", 1775, "British").await;
    sqlx::query("DROP TABLE books")
        .execute(&app.pool)
        .await
        .unwrap();

    for uri in ["/books".to_string(), format!("/authors/{author}/books")] {
        let (status, body) = app.get(&uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(error_code(&body), "internal_error");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("storage error:"), "{message}");
        assert!(message.contains("no such table: books"), "{message}");
    }
}

#[tokio::test]
async fn unknown_book_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/books/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Could not find book with id: 7");

    let (status, _) = app.put("/books/7", json!({ "title": "Nothing" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.delete("/books/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_moves_book_to_another_author() {
    let app = TestApp::new().await;
    let austen = app.author("Jane Austen", 1775, "British").await;
    let shelley = app.author("Mary Shelley", 1797, "British").await;
    let id = app.book("Frankenstein", austen, 1818).await;

    let (status, body) = app
        .put(&format!("/books/{id}"), json!({ "author_id": shelley }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author_id"], shelley);
    assert_eq!(body["title"], "Frankenstein");

    let (_, listed) = app.get(&format!("/authors/{austen}/books")).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn update_rejects_dangling_author_reference() {
    let app = TestApp::new().await;
    let author = app.author("Jane Austen", 1775, "British").await;
    let id = app.book("Emma", author, 1815).await;
    let writes = app.writes();

    let (status, body) = app
        .put(&format!("/books/{id}"), json!({ "author_id": 404 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "invalid_reference");
    assert_eq!(app.writes(), writes);
}

#[tokio::test]
async fn identical_update_reports_no_changes() {
    let app = TestApp::new().await;
    let author = app.author("Jane Austen", 1775, "British").await;
    let id = app.book("Emma", author, 1815).await;
    let writes = app.writes();

    let (status, body) = app
        .put(
            &format!("/books/{id}"),
            json!({ "title": " Emma ", "author_id": author, "published": 1815 }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": NO_CHANGES_MESSAGE }));
    assert_eq!(app.writes(), writes);
}

#[tokio::test]
async fn update_requires_a_field() {
    let app = TestApp::new().await;
    let author = app.author("Jane Austen", 1775, "British").await;
    let id = app.book("Emma", author, 1815).await;

    let (status, body) = app.put(&format!("/books/{id}"), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "empty_update");
}

#[tokio::test]
async fn delete_returns_snapshot() {
    let app = TestApp::new().await;
    let author = app.author("Jane Austen", 1775, "British").await;
    let id = app.book("Emma", author, 1815).await;

    let (status, body) = app.delete(&format!("/books/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": id, "title": "Emma", "author_id": author, "published": 1815 })
    );

    let (status, _) = app.get(&format!("/books/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
