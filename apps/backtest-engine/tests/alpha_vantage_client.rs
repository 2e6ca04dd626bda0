//! HTTP behaviour of the Alpha Vantage client against a mock server.

use std::time::Duration;

use backtest_engine::data::{AlphaVantageClient, DataError, OutputSize};
use chrono::NaiveDate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DAILY: &str = r#"{
    "Meta Data": {"2. Symbol": "IBM"},
    "Time Series (Daily)": {
        "2024-01-05": {"4. close": "104.0"},
        "2024-01-04": {"4. close": "103.0"},
        "2024-01-03": {"4. close": "101.5"},
        "2024-01-02": {"4. close": "100.0"}
    }
}"#;

fn client(server: &MockServer, output_size: OutputSize) -> AlphaVantageClient {
    match AlphaVantageClient::new("demo", server.uri(), output_size, Duration::from_secs(5)) {
        Ok(c) => c,
        Err(e) => panic!("client should build: {e}"),
    }
}

async fn mount_body(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_daily_sends_query_and_sorts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "TIME_SERIES_DAILY"))
        .and(query_param("symbol", "IBM"))
        .and(query_param("outputsize", "full"))
        .and(query_param("apikey", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DAILY))
        .expect(1)
        .mount(&server)
        .await;

    let prices = match client(&server, OutputSize::Full).fetch_daily("ibm").await {
        Ok(p) => p,
        Err(e) => panic!("fetch should succeed: {e}"),
    };

    assert_eq!(prices.closes(), vec![100.0, 101.5, 103.0, 104.0]);
    assert_eq!(prices.first_date(), NaiveDate::from_ymd_opt(2024, 1, 2));
    assert_eq!(prices.last_date(), NaiveDate::from_ymd_opt(2024, 1, 5));
}

#[tokio::test]
async fn test_fetch_daily_maps_error_message() {
    let server = MockServer::start().await;
    mount_body(&server, 200, r#"{"Error Message": "Invalid API call."}"#).await;

    let result = client(&server, OutputSize::Compact).fetch_daily("NOPE").await;
    assert!(matches!(result, Err(DataError::Api(msg)) if msg.contains("Invalid API call")));
}

#[tokio::test]
async fn test_fetch_daily_maps_rate_limit_note() {
    let server = MockServer::start().await;
    mount_body(&server, 200, r#"{"Note": "API call frequency exceeded."}"#).await;

    let Err(err) = client(&server, OutputSize::Compact).fetch_daily("IBM").await else {
        panic!("rate limit notice must fail");
    };
    assert!(matches!(err, DataError::RateLimited(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_fetch_daily_missing_series_is_unavailable_ticker() {
    let server = MockServer::start().await;
    mount_body(&server, 200, r#"{"Meta Data": {}}"#).await;

    let Err(err) = client(&server, OutputSize::Compact).fetch_daily("ZZZZ").await else {
        panic!("missing series must fail");
    };
    assert_eq!(err.to_string(), "Invalid or unavailable ticker: ZZZZ");
}

#[tokio::test]
async fn test_fetch_daily_empty_series() {
    let server = MockServer::start().await;
    mount_body(&server, 200, r#"{"Time Series (Daily)": {}}"#).await;

    let result = client(&server, OutputSize::Compact).fetch_daily("IBM").await;
    assert!(matches!(result, Err(DataError::EmptySeries { symbol }) if symbol == "IBM"));
}

#[tokio::test]
async fn test_fetch_daily_http_error_status() {
    let server = MockServer::start().await;
    mount_body(&server, 503, "upstream unavailable").await;

    let result = client(&server, OutputSize::Compact).fetch_daily("IBM").await;
    assert!(matches!(
        result,
        Err(DataError::Http { status: 503, ref message }) if message == "upstream unavailable"
    ));
}

#[tokio::test]
async fn test_fetch_daily_malformed_body() {
    let server = MockServer::start().await;
    mount_body(&server, 200, "<html>not json</html>").await;

    let result = client(&server, OutputSize::Compact).fetch_daily("IBM").await;
    assert!(matches!(result, Err(DataError::JsonParse(_))));
}

#[tokio::test]
async fn test_invalid_symbol_is_rejected_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DAILY))
        .expect(0)
        .mount(&server)
        .await;

    let result = client(&server, OutputSize::Compact)
        .fetch_daily("AAPL&apikey=x")
        .await;
    assert!(matches!(result, Err(DataError::InvalidSymbol(_))));
}
