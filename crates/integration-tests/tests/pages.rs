//! Popover pages, the contact form, and the mode toggle.

use axum::http::StatusCode;

use kyboot_integration_tests::{body_text, get, post_form, test_app};

#[tokio::test]
async fn terms_popover_renders() {
    let app = test_app();

    let body = body_text(get(&app, "/pages/terms").await, StatusCode::OK).await;
    assert!(body.contains("Terms &amp; Conditions"));
}

#[tokio::test]
async fn contact_form_renders_empty() {
    let app = test_app();

    let body = body_text(get(&app, "/contact").await, StatusCode::OK).await;
    assert!(body.contains("Contact us"));
    assert!(!body.contains("field-error"));
}

#[tokio::test]
async fn invalid_contact_submission_re_renders_with_errors_and_values() {
    let app = test_app();

    let body = body_text(
        post_form(&app, "/contact", "name=&email=not-an-email&message=hi").await,
        StatusCode::OK,
    )
    .await;
    assert!(body.contains("Name required"));
    assert!(body.contains("Valid email required"));
    assert!(body.contains("Message too short"));
    // Entered values survive the round trip.
    assert!(body.contains("not-an-email"));
}

#[tokio::test]
async fn valid_contact_submission_yields_a_success_toast() {
    let app = test_app();

    let body = body_text(
        post_form(
            &app,
            "/contact",
            "name=Nadia&email=nadia%40example.com&message=Where+is+my+order%3F",
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert!(body.contains("Message sent!"));
}

#[tokio::test]
async fn unknown_paths_get_a_404() {
    let app = test_app();

    let body = body_text(get(&app, "/no-such-page").await, StatusCode::NOT_FOUND).await;
    assert!(body.contains("Not found"));
}

#[tokio::test]
async fn mode_toggle_redirects_home_and_flips_the_body_class() {
    let app = test_app();

    let before = body_text(get(&app, "/").await, StatusCode::OK).await;
    assert!(before.contains("mode-glass"));

    let response = post_form(&app, "/mode", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let after = body_text(get(&app, "/").await, StatusCode::OK).await;
    assert!(after.contains("mode-normal"));
}
