use crate::helpers::mock_api::{MockCharacterApi, MockResponse};
use crate::helpers::TestApp;

#[tokio::test]
async fn health_check_works() {
    let mock_api =
        MockCharacterApi::spawn(vec![], MockResponse::character("Jon Snow", &["Lord Snow"])).await;
    let app = TestApp::spawn_app(&mock_api).await;

    let response = app
        .client
        .get(format!("http://{}/health", app.base_address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!("healthy".to_string(), response.text().await.unwrap());
}
