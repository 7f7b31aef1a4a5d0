use crate::helpers::TestApp;

#[tokio::test]
async fn healthcheck_works() {
    // Spin up the test instance
    let app = TestApp::spawn().await;

    // Send a request to the healthcheck endpoint
    let response = app
        .api_client
        .get(format!("{}/healthcheck", &app.address))
        .send()
        .await
        .expect("Failed to execute request");

    // Check the response
    assert!(response.status().is_success());
    assert_eq!(response.content_length(), Some(0));
}
