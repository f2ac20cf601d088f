use std::fs;
use tracing::info;

mod test_utils {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Mounts all three analytics endpoints for one coin.
    pub async fn mount_analytics_endpoints(coin: &str, days: u32) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/crypto/stats"))
            .and(query_param("coin", coin))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "price": 42000.5,
                "change24h": 2.35,
                "marketCap": 820000000000.0
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/crypto/deviation"))
            .and(query_param("coin", coin))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "deviation": 1234.56,
                "mean": 41000.0,
                "variance": 1524138.4
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/crypto/market-chart"))
            .and(query_param("coin", coin))
            .and(query_param("days", days.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "prices": [[1700000000000i64, 42000.126], [1700086400000i64, 42500.4]]
            })))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

#[test_log::test(tokio::test)]
async fn test_full_dashboard_flow_with_mock() {
    let mock_server = test_utils::mount_analytics_endpoints("ethereum", 30).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
        api:
          base_url: {}
        default_coin: ethereum
        history_days: 30
        theme: dark
    "#,
        mock_server.uri()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");

    let result = cryptodash::run(
        Some(config_file.path().to_str().unwrap()),
        cryptodash::ShowOptions::default(),
    )
    .await;
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_cli_flags_override_config() {
    // Config selects bitcoin, the flag selects matic-network; only the
    // matic-network endpoints exist, so overriding is the only way to pass.
    let mock_server = test_utils::mount_analytics_endpoints("matic-network", 7).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
        api:
          base_url: {}
        default_coin: bitcoin
        history_days: 30
    "#,
        mock_server.uri()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");

    let options = cryptodash::ShowOptions {
        coin: Some(cryptodash::coin::Coin::MaticNetwork),
        days: Some(7),
        ..Default::default()
    };
    let result = cryptodash::run(Some(config_file.path().to_str().unwrap()), options).await;
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );

    let phase_check = mock_server.received_requests().await.unwrap();
    assert_eq!(phase_check.len(), 3, "Expected exactly one combined fetch");
}

#[test_log::test(tokio::test)]
async fn test_backend_error_surfaces_as_visible_error() {
    use cryptodash::client::ApiClient;
    use cryptodash::coin::Coin;
    use cryptodash::dashboard::{Dashboard, Phase};
    use cryptodash::ui;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = test_utils::mount_analytics_endpoints("bitcoin", 30).await;

    // Stats fails for ethereum; deviation and chart are not mounted either,
    // but the server-supplied message must win over any fallback.
    Mock::given(method("GET"))
        .and(path("/api/crypto/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"error": "coin not found"}"#))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri()).expect("Failed to build client");
    let mut dashboard = Dashboard::new(&client, 30);

    info!("Selecting a coin the backend rejects");
    dashboard
        .select_coin(Coin::Ethereum, ui::new_progress_bar(3, false))
        .await;

    let Phase::Error(message) = dashboard.phase() else {
        panic!("Expected Error, got {:?}", dashboard.phase());
    };
    assert_eq!(message, "coin not found");

    // A later successful selection replaces the error wholesale.
    dashboard
        .select_coin(Coin::Bitcoin, ui::new_progress_bar(3, false))
        .await;
    let Phase::Ready(snapshot) = dashboard.phase() else {
        panic!("Expected Ready, got {:?}", dashboard.phase());
    };
    assert_eq!(snapshot.coin, Coin::Bitcoin);
    assert_eq!(snapshot.history.len(), 2);
}
