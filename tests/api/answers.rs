use crate::helpers::spawn_app;

#[tokio::test]
async fn a_known_assessment_challenge_pair_returns_its_answer() {
    let app = spawn_app().await;

    let response = app
        .get_answer("ref_assessment_id", "ref_qcm_challenge_id")
        .await;

    assert_eq!(200, response.status().as_u16());
    let document: serde_json::Value = response
        .json()
        .await
        .expect("Failed to parse the response body.");
    assert_eq!(document["data"]["id"], "ref_answer_qcm_id");
    assert_eq!(document["data"]["attributes"]["value"], "1,3");
    assert_eq!(
        document["data"]["relationships"]["assessment"]["data"]["id"],
        "ref_assessment_id"
    );
    assert_eq!(
        document["data"]["relationships"]["challenge"]["data"]["id"],
        "ref_qcm_challenge_id"
    );
}

#[tokio::test]
async fn an_unknown_pair_returns_the_placeholder_answer() {
    let app = spawn_app().await;

    let response = app
        .get_answer("no_such_assessment", "no_such_challenge")
        .await;

    assert_eq!(200, response.status().as_u16());
    let document: serde_json::Value = response
        .json()
        .await
        .expect("Failed to parse the response body.");
    assert_eq!(
        document,
        serde_json::json!({
            "data": {
                "type": "answers",
                "id": "answerId",
                "attributes": { "value": "" }
            }
        })
    );
}

#[tokio::test]
async fn missing_query_parameters_are_rejected() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/api/answers", &app.address))
        .query(&[("assessment", "ref_assessment_id")])
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
}
