//! Current-weather readings from the OpenWeatherMap API.

use crate::fetcher::error::FetchError;
use crate::fetcher::ReadingSource;
use crate::types::field::Field;
use crate::types::raw_reading::RawReading;
use bon::bon;
use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_UNITS: &str = "metric";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches one reading per call from the OpenWeatherMap "current weather" endpoint.
///
/// Failures are never retried. The API key is only ever sent as a query
/// parameter and is stripped from reported network errors.
pub struct OpenWeatherFetcher {
    api_key: String,
    base_url: String,
    units: String,
    client: Client,
}

#[bon]
impl OpenWeatherFetcher {
    /// Creates a fetcher.
    ///
    /// # Arguments
    ///
    /// * `.api_key(..)`: **Required.** The OpenWeatherMap API key.
    /// * `.base_url(..)`: Optional. Endpoint to query. Defaults to [`DEFAULT_BASE_URL`].
    /// * `.units(..)`: Optional. Unit system passed to the API. Defaults to `metric`,
    ///   which the default plausibility bounds assume.
    /// * `.timeout(..)`: Optional. Per-request timeout. Defaults to 10 seconds.
    /// * `.system_proxy(bool)`: Optional. Whether proxies from the environment are
    ///   honoured. Defaults to `true`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingApiKey`] for an empty key and
    /// [`FetchError::ClientBuild`] if the HTTP client cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use weatherstat::{OpenWeatherFetcher, ReadingSource};
    ///
    /// let fetcher = OpenWeatherFetcher::builder().api_key("YOUR_API_KEY").build()?;
    /// let reading = fetcher.fetch("Kyiv")?;
    /// println!("{:?}", reading.get("temp"));
    /// # Ok::<(), weatherstat::FetchError>(())
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] api_key: String,
        #[builder(into)] base_url: Option<String>,
        #[builder(into)] units: Option<String>,
        timeout: Option<Duration>,
        system_proxy: Option<bool>,
    ) -> Result<Self, FetchError> {
        if api_key.trim().is_empty() {
            return Err(FetchError::MissingApiKey);
        }
        let mut client_builder = Client::builder().timeout(timeout.unwrap_or(DEFAULT_TIMEOUT));
        if !system_proxy.unwrap_or(true) {
            client_builder = client_builder.no_proxy();
        }
        let client = client_builder.build().map_err(FetchError::ClientBuild)?;
        Ok(Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            units: units.unwrap_or_else(|| DEFAULT_UNITS.to_string()),
            client,
        })
    }
}

impl ReadingSource for OpenWeatherFetcher {
    fn fetch(&self, location: &str) -> Result<RawReading, FetchError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(FetchError::InvalidLocation);
        }
        info!("Fetching current weather for '{}'", location);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .map_err(|e| FetchError::Network(location.to_string(), e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error for '{}': {}", location, status);
            return Err(status_error(status, location));
        }

        let body: Value = response
            .json()
            .map_err(|e| FetchError::MalformedResponse {
                location: location.to_string(),
                message: e.without_url().to_string(),
            })?;
        reading_from_response(location, &body)
    }
}

fn status_error(status: StatusCode, location: &str) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED => FetchError::Auth,
        StatusCode::NOT_FOUND => FetchError::NotFound(location.to_string()),
        status => FetchError::HttpStatus {
            location: location.to_string(),
            status,
        },
    }
}

/// Extracts a reading from a current-weather response body.
///
/// Measurements are copied verbatim from the `main` object; a key the
/// provider leaves out stays absent so the analyzer records it as missing.
fn reading_from_response(location: &str, body: &Value) -> Result<RawReading, FetchError> {
    let main = body
        .get("main")
        .and_then(Value::as_object)
        .ok_or_else(|| FetchError::MalformedResponse {
            location: location.to_string(),
            message: "response is missing 'main' weather data".to_string(),
        })?;

    let mut reading = RawReading::for_city(location);
    for field in Field::ALL {
        if let Some(value) = main.get(field.column_name()) {
            reading.set(field.column_name(), value.clone());
        }
    }
    if let Some(dt) = body.get(RawReading::OBSERVED_AT_KEY) {
        reading.set(RawReading::OBSERVED_AT_KEY, dt.clone());
    }
    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::error::FetchErrorKind;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc::{self, Receiver};
    use std::thread;

    /// Serves a single canned HTTP/1.1 response on a loopback port.
    /// Returns the endpoint URL and a channel yielding the received request head.
    fn serve_once(status_line: &str, body: &str) -> (String, Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut head: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }
            let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
            let _ = stream.write_all(response.as_bytes());
        });
        (format!("http://{}/data/2.5/weather", addr), rx)
    }

    fn local_fetcher(base_url: String) -> Result<OpenWeatherFetcher, FetchError> {
        OpenWeatherFetcher::builder()
            .api_key("test-key")
            .base_url(base_url)
            .timeout(Duration::from_secs(5))
            .system_proxy(false)
            .build()
    }

    #[test]
    fn test_fetch_success_sends_query_and_extracts_reading() -> Result<(), FetchError> {
        let (url, requests) = serve_once(
            "200 OK",
            r#"{"dt": 1700000000, "main": {"temp": 15, "humidity": 70, "pressure": 1010}}"#,
        );
        let reading = local_fetcher(url)?.fetch(" Lviv ")?;

        assert_eq!(reading.city(), Some("Lviv"));
        assert_eq!(reading.field(Field::Temp), Some(&json!(15)));
        assert_eq!(reading.field(Field::Humidity), Some(&json!(70)));
        assert_eq!(reading.field(Field::Pressure), Some(&json!(1010)));
        assert_eq!(reading.observed_at().map(|t| t.timestamp()), Some(1_700_000_000));

        let head = requests.recv().expect("request head");
        let request_line = head.lines().next().unwrap_or_default();
        assert!(request_line.starts_with("GET /data/2.5/weather?"), "{}", request_line);
        assert!(request_line.contains("q=Lviv"), "{}", request_line);
        assert!(request_line.contains("appid=test-key"), "{}", request_line);
        assert!(request_line.contains("units=metric"), "{}", request_line);
        Ok(())
    }

    #[test]
    fn test_fetch_unauthorized_is_auth_error() -> Result<(), FetchError> {
        let (url, _requests) = serve_once("401 Unauthorized", r#"{"cod": 401}"#);
        let err = local_fetcher(url)?.fetch("Lviv").unwrap_err();
        assert!(matches!(err, FetchError::Auth));
        assert_eq!(err.kind(), FetchErrorKind::Auth);
        Ok(())
    }

    #[test]
    fn test_fetch_unknown_city_is_not_found() -> Result<(), FetchError> {
        let (url, _requests) = serve_once("404 Not Found", r#"{"cod": "404"}"#);
        let err = local_fetcher(url)?.fetch("Atlantis").unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref city) if city == "Atlantis"));
        assert_eq!(err.kind(), FetchErrorKind::NotFound);
        Ok(())
    }

    #[test]
    fn test_fetch_server_error_is_http_status() -> Result<(), FetchError> {
        let (url, _requests) = serve_once("500 Internal Server Error", "{}");
        let err = local_fetcher(url)?.fetch("Lviv").unwrap_err();
        assert!(matches!(
            err,
            FetchError::HttpStatus { status: StatusCode::INTERNAL_SERVER_ERROR, .. }
        ));
        assert_eq!(err.kind(), FetchErrorKind::Fetch);
        Ok(())
    }

    #[test]
    fn test_fetch_body_without_main_is_malformed() -> Result<(), FetchError> {
        let (url, _requests) = serve_once("200 OK", r#"{"cod": 200, "name": "Lviv"}"#);
        let err = local_fetcher(url)?.fetch("Lviv").unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse { .. }));
        assert_eq!(err.kind(), FetchErrorKind::Fetch);
        Ok(())
    }

    #[test]
    fn test_fetch_non_json_body_is_malformed() -> Result<(), FetchError> {
        let (url, _requests) = serve_once("200 OK", "not json");
        let err = local_fetcher(url)?.fetch("Lviv").unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse { .. }));
        assert_eq!(err.kind(), FetchErrorKind::Fetch);
        Ok(())
    }

    #[test]
    fn test_fetch_connection_refused_is_network_error() -> Result<(), FetchError> {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
            listener.local_addr().expect("listener address")
        };
        let err = local_fetcher(format!("http://{}/data/2.5/weather", addr))?
            .fetch("Lviv")
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(ref city, _) if city == "Lviv"));
        assert_eq!(err.kind(), FetchErrorKind::Fetch);
        assert!(!err.to_string().contains("test-key"));
        Ok(())
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let result = OpenWeatherFetcher::builder().api_key("  ").build();
        assert!(matches!(result, Err(FetchError::MissingApiKey)));
    }

    #[test]
    fn test_empty_location_is_rejected_before_any_request() -> Result<(), FetchError> {
        let fetcher = OpenWeatherFetcher::builder()
            .api_key("key")
            .base_url("http://127.0.0.1:9/unused")
            .build()?;
        let err = fetcher.fetch("   ").unwrap_err();
        assert!(matches!(err, FetchError::InvalidLocation));
        assert_eq!(err.kind(), FetchErrorKind::NotFound);
        Ok(())
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_error(StatusCode::UNAUTHORIZED, "Kyiv").kind(), FetchErrorKind::Auth);

        let not_found = status_error(StatusCode::NOT_FOUND, "Atlantis");
        assert_eq!(not_found.kind(), FetchErrorKind::NotFound);
        assert_eq!(not_found.to_string(), "Location 'Atlantis' not found (HTTP 404)");

        let server = status_error(StatusCode::INTERNAL_SERVER_ERROR, "Kyiv");
        assert_eq!(server.kind(), FetchErrorKind::Fetch);
        assert!(matches!(
            server,
            FetchError::HttpStatus { status: StatusCode::INTERNAL_SERVER_ERROR, .. }
        ));
    }

    #[test]
    fn test_reading_from_response() -> Result<(), FetchError> {
        let body = json!({
            "name": "Kyiv",
            "dt": 1_700_000_000,
            "main": {"temp": 20.5, "feels_like": 19.0, "humidity": 40, "pressure": 1012}
        });
        let reading = reading_from_response("Kyiv", &body)?;

        assert_eq!(reading.city(), Some("Kyiv"));
        assert_eq!(reading.field(Field::Temp), Some(&json!(20.5)));
        assert_eq!(reading.field(Field::Humidity), Some(&json!(40)));
        assert_eq!(reading.field(Field::Pressure), Some(&json!(1012)));
        assert!(reading.get("feels_like").is_none());
        assert_eq!(reading.observed_at().map(|t| t.timestamp()), Some(1_700_000_000));
        Ok(())
    }

    #[test]
    fn test_partial_main_leaves_keys_absent() -> Result<(), FetchError> {
        let reading = reading_from_response("Kyiv", &json!({"main": {"temp": 3}}))?;
        assert!(reading.field(Field::Humidity).is_none());
        assert!(reading.field(Field::Pressure).is_none());
        Ok(())
    }

    #[test]
    fn test_missing_main_is_malformed() {
        let result = reading_from_response("Kyiv", &json!({"cod": 200}));
        match result {
            Err(err @ FetchError::MalformedResponse { .. }) => {
                assert_eq!(err.kind(), FetchErrorKind::Fetch)
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }
}
