use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, body_json, method, path, query_param},
};

use crate::helpers::spawn_app;

fn contact_list_body() -> serde_json::Value {
    json!({
        "Count": 1,
        "Data": [{
            "Address": "Xpgno5zs4",
            "CreatedAt": "2017-05-10T08:06:17Z",
            "ID": 1766080,
            "IsDeleted": false,
            "Name": "COMMUNITY",
            "SubscriberCount": 0
        }],
        "Total": 1
    })
}

#[tokio::test]
async fn registering_a_follower_enrolls_and_welcomes_them() {
    let app = spawn_app().await;

    Mock::given(path("/v3/REST/contactslist"))
        .and(method("GET"))
        .and(query_param("Name", "COMMUNITY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contact_list_body()))
        .expect(1)
        .mount(&app.email_server)
        .await;

    Mock::given(path("/v3/REST/contactslist/1766080/managecontact"))
        .and(method("POST"))
        .and(body_json(json!({
            "Email": "follower@example.net",
            "action": "addnoforce"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    Mock::given(path("/v3/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_follower(json!({ "email": "follower@example.net" }))
        .await;

    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn the_welcome_email_carries_the_configured_identity_and_template() {
    let app = spawn_app().await;

    Mock::given(path("/v3/REST/contactslist"))
        .and(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contact_list_body()))
        .mount(&app.email_server)
        .await;

    Mock::given(path("/v3/REST/contactslist/1766080/managecontact"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    Mock::given(path("/v3/send"))
        .and(method("POST"))
        .and(body_json(json!({
            "FromEmail": "no-reply@example.net",
            "FromName": "Community Team",
            "Subject": "Welcome to the community",
            "MJ-TemplateID": "129291",
            "MJ-TemplateLanguage": "true",
            "Recipients": [{ "Email": "follower@example.net", "Vars": {} }]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_follower(json!({ "email": "follower@example.net" }))
        .await;

    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn an_invalid_email_is_rejected_without_contacting_the_vendor() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (json!({ "email": "definitely-not-an-email" }), "malformed email"),
        (json!({ "email": "" }), "empty email"),
        (json!({}), "missing email"),
    ];

    for (body, description) in test_cases {
        let response = app.post_follower(body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload was {}.",
            description
        );
    }
}

#[tokio::test]
async fn a_vendor_rejection_surfaces_as_an_internal_error() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.email_server)
        .await;

    let response = app
        .post_follower(json!({ "email": "follower@example.net" }))
        .await;

    assert_eq!(500, response.status().as_u16());
}

#[tokio::test]
async fn a_missing_contact_list_surfaces_as_an_internal_error() {
    let app = spawn_app().await;

    Mock::given(path("/v3/REST/contactslist"))
        .and(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "Count": 0, "Data": [], "Total": 0 })),
        )
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_follower(json!({ "email": "follower@example.net" }))
        .await;

    assert_eq!(500, response.status().as_u16());
}
