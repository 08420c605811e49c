use std::{convert::Infallible, sync::Arc, time::Duration};

use futures_lite::StreamExt;
use log::{debug, error};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tera::Tera;
use warp::{
    http::StatusCode,
    hyper::body::Buf,
    multipart::{FormData, Part},
    reject::Reject,
    Filter, Rejection, Reply,
};

use crate::{
    analyzer::{SpotAnalyzer, SpotImage},
    config::Config,
    forecast::{ForecastProvider, DEFAULT_LOCATION},
    models::CatchRecord,
    store::{self, CatchLog},
};

pub const SERVICE_NAME: &str = "FishCast API";

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template("index.html", include_str!("templates/index.html"))
        .unwrap();
    tera
});

/// Everything the handlers need, cloned into each filter. The store and the
/// two collaborators are injected here so tests can swap them out.
#[derive(Clone)]
pub struct Context {
    pub store: Arc<CatchLog>,
    pub analyzer: Arc<dyn SpotAnalyzer>,
    pub forecast: Arc<dyn ForecastProvider>,
    pub require_species: bool,
    pub max_catch_bytes: u64,
    pub max_image_bytes: u64,
    pub stub_delay: Duration,
}

impl Context {
    pub fn new(
        store: Arc<CatchLog>,
        analyzer: Arc<dyn SpotAnalyzer>,
        forecast: Arc<dyn ForecastProvider>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            analyzer,
            forecast,
            require_species: config.require_species,
            max_catch_bytes: config.max_catch_bytes,
            max_image_bytes: config.max_image_bytes,
            stub_delay: config.stub_delay,
        }
    }
}

/// The complete filter: all endpoints, rejection handling, CORS and request
/// logging. `warp::serve` takes it as-is, and so does `warp::test`.
pub fn routes(
    ctx: &Context,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    index()
        .or(health())
        .or(catches_list(ctx))
        .or(catches_log(ctx))
        .or(analyze(ctx))
        .or(bite_forecast(ctx))
        .recover(handle_rejection)
        .with(cors())
        .with(warp::log("fishcast_api"))
}

fn with_ctx(ctx: Context) -> impl Filter<Extract = (Context,), Error = Infallible> + Clone {
    warp::any().map(move || ctx.clone())
}

fn cors() -> warp::cors::Builder {
    warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_header("content-type")
}

// GET /
fn index() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path::end().and(warp::get()).and_then(render_index)
}

// GET /health
fn health() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("health").and(warp::get()).and_then(health_check)
}

// GET /api/catches
fn catches_list(ctx: &Context) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "catches")
        .and(warp::get())
        .and(with_ctx(ctx.clone()))
        .and_then(list_catches)
}

// POST /api/catches
fn catches_log(ctx: &Context) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "catches")
        .and(warp::post())
        .and(warp::body::content_length_limit(ctx.max_catch_bytes))
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(log_catch)
}

// POST /api/analyze
fn analyze(ctx: &Context) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "analyze")
        .and(warp::post())
        .and(warp::multipart::form().max_length(ctx.max_image_bytes))
        .and(with_ctx(ctx.clone()))
        .and_then(analyze_spot)
}

// POST /api/forecast
fn bite_forecast(ctx: &Context) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "forecast")
        .and(warp::post())
        .and(warp::body::content_length_limit(ctx.max_catch_bytes))
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(forecast_for_location)
}

async fn render_index() -> Result<impl Reply, Rejection> {
    let mut page = tera::Context::new();
    page.insert("service", SERVICE_NAME);

    let html = TEMPLATES.render("index.html", &page).map_err(|err| {
        error!("could not render the index page: {err}");
        warp::reject::custom(RenderFailed)
    })?;

    Ok(warp::reply::html(html))
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    service: &'static str,
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&Health {
        status: "healthy",
        service: SERVICE_NAME,
    }))
}

async fn list_catches(ctx: Context) -> Result<impl Reply, Rejection> {
    let catches = ctx.store.list().map_err(reject_store)?;

    Ok(warp::reply::json(&catches))
}

#[derive(Debug, Serialize)]
struct LoggedCatch {
    message: String,
    catch: CatchRecord,
}

async fn log_catch(payload: Map<String, Value>, ctx: Context) -> Result<impl Reply, Rejection> {
    if ctx.require_species {
        let has_species = payload
            .get("species")
            .and_then(Value::as_str)
            .map_or(false, |species| !species.trim().is_empty());

        if !has_species {
            return Err(reject_validation(
                "species is required and must be a non-empty string",
            ));
        }
    }

    let logged = ctx.store.append(payload).map_err(reject_store)?;

    Ok(warp::reply::json(&LoggedCatch {
        message: format!(
            "Catch logged successfully! Total catches: {}",
            logged.total
        ),
        catch: logged.record,
    }))
}

#[derive(Debug, Serialize)]
struct Analysis {
    success: bool,
    recommendation: String,
    filename: String,
}

async fn analyze_spot(form: FormData, ctx: Context) -> Result<impl Reply, Rejection> {
    let image = image_from_form(form).await?;

    if !ctx.stub_delay.is_zero() {
        tokio::time::sleep(ctx.stub_delay).await;
    }

    let recommendation = ctx.analyzer.analyze(&image).await.map_err(|err| {
        error!("spot analysis failed: {err}");
        warp::reject::custom(AnalysisFailed)
    })?;

    Ok(warp::reply::json(&Analysis {
        success: true,
        recommendation,
        filename: image.filename,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ForecastBody {
    location: Option<String>,
}

async fn forecast_for_location(body: ForecastBody, ctx: Context) -> Result<impl Reply, Rejection> {
    let location = match body.location.as_deref() {
        Some(location) if !location.is_empty() => location.to_string(),
        _ => DEFAULT_LOCATION.to_string(),
    };

    if !ctx.stub_delay.is_zero() {
        tokio::time::sleep(ctx.stub_delay).await;
    }

    debug!("forecasting for {location}");

    let forecast = ctx.forecast.forecast(&location).await.map_err(|err| {
        error!("could not produce a forecast: {err}");
        warp::reject::custom(ForecastFailed)
    })?;

    Ok(warp::reply::json(&forecast))
}

/// Pull the `file` part out of the upload. Parts other than `file` are
/// ignored, matching the single-file upload the demo ui sends.
async fn image_from_form(form: FormData) -> Result<SpotImage, Rejection> {
    let mut form = Box::pin(form);

    while let Some(part) = form.next().await {
        let part = part.map_err(|err| {
            debug!("malformed multipart body: {err}");
            reject_validation("malformed multipart body")
        })?;

        if part.name() != "file" {
            continue;
        }

        let filename = part.filename().unwrap_or("upload").to_string();
        let content_type = match part.content_type() {
            Some(mime) if mime.starts_with("image/") => mime.to_string(),
            _ => return Err(reject_validation("Only image files are allowed")),
        };

        let bytes = part_bytes(part).await?;

        debug!("received {filename} ({} bytes)", bytes.len());

        return Ok(SpotImage {
            filename,
            content_type,
            bytes,
        });
    }

    Err(reject_validation("No image file provided"))
}

async fn part_bytes(part: Part) -> Result<Vec<u8>, Rejection> {
    let mut stream = Box::pin(part.stream());
    let mut bytes = Vec::new();

    while let Some(chunk) = stream.next().await {
        let mut chunk = chunk.map_err(|err| {
            debug!("could not read the uploaded file: {err}");
            reject_validation("could not read the uploaded file")
        })?;

        while chunk.has_remaining() {
            let slice = chunk.chunk();
            let taken = slice.len();
            bytes.extend_from_slice(slice);
            chunk.advance(taken);
        }
    }

    Ok(bytes)
}

/// The client sent something we refuse to parse or store.
#[derive(Debug)]
struct Validation(String);

impl Reject for Validation {}

#[derive(Debug)]
struct StoreUnavailable;

impl Reject for StoreUnavailable {}

#[derive(Debug)]
struct AnalysisFailed;

impl Reject for AnalysisFailed {}

#[derive(Debug)]
struct ForecastFailed;

impl Reject for ForecastFailed {}

#[derive(Debug)]
struct RenderFailed;

impl Reject for RenderFailed {}

fn reject_validation(message: impl Into<String>) -> Rejection {
    warp::reject::custom(Validation(message.into()))
}

fn reject_store(err: store::Error) -> Rejection {
    error!("catch log failure: {err}");
    warp::reject::custom(StoreUnavailable)
}

#[derive(Debug, Serialize)]
struct ErrorMessage {
    error: String,
}

/// Map every rejection to the JSON error envelope. Custom rejections are
/// checked before warp's built-ins: a combined rejection from an `or` chain
/// can carry both, and the custom one names the actual failure.
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(Validation(message)) = err.find() {
        (StatusCode::BAD_REQUEST, message.clone())
    } else if let Some(err) = err.find::<warp::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, err.to_string())
    } else if err.find::<StoreUnavailable>().is_some() {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "the catch log is temporarily unavailable".to_string(),
        )
    } else if err.find::<AnalysisFailed>().is_some() {
        (
            StatusCode::BAD_GATEWAY,
            "spot analysis is currently unavailable".to_string(),
        )
    } else if err.find::<ForecastFailed>().is_some() {
        (
            StatusCode::BAD_GATEWAY,
            "the forecast is currently unavailable".to_string(),
        )
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "payload too large".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            "content-length header required".to_string(),
        )
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "unsupported content-type".to_string(),
        )
    } else if err.find::<warp::reject::InvalidHeader>().is_some() {
        (StatusCode::BAD_REQUEST, "invalid header".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        )
    } else {
        error!("unhandled rejection: {err:?}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    let reply = warp::reply::json(&ErrorMessage { error: message });

    Ok(warp::reply::with_status(reply, status))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        analyzer::{self, CannedAnalyzer, CANNED_RECOMMENDATION},
        forecast::CannedForecast,
    };

    fn context() -> Context {
        Context {
            store: Arc::new(CatchLog::new()),
            analyzer: Arc::new(CannedAnalyzer),
            forecast: Arc::new(CannedForecast),
            require_species: true,
            max_catch_bytes: crate::config::DEFAULT_MAX_CATCH_BYTES,
            max_image_bytes: crate::config::DEFAULT_MAX_IMAGE_BYTES,
            stub_delay: Duration::ZERO,
        }
    }

    fn body_json(response: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    fn multipart(name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> (String, Vec<u8>) {
        let boundary = "fishcast-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name={name:?}; filename={filename:?}\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        (
            format!("multipart/form-data; boundary={boundary}"),
            body,
        )
    }

    mod health {
        use super::*;

        #[tokio::test]
        async fn reports_healthy() {
            let routes = routes(&context());

            let response = warp::test::request()
                .method("GET")
                .path("/health")
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                body_json(&response),
                json!({ "status": "healthy", "service": "FishCast API" })
            );
        }
    }

    mod index {
        use super::*;

        #[tokio::test]
        async fn lists_the_endpoints() {
            let routes = routes(&context());

            let response = warp::test::request()
                .method("GET")
                .path("/")
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::OK);
            let page = String::from_utf8(response.body().to_vec()).unwrap();
            assert!(page.contains("FishCast API"));
            assert!(page.contains("/api/catches"));
            assert!(page.contains("/api/analyze"));
            assert!(page.contains("/api/forecast"));
        }
    }

    mod catches {
        use super::*;

        #[tokio::test]
        async fn starts_empty() {
            let routes = routes(&context());

            let response = warp::test::request()
                .method("GET")
                .path("/api/catches")
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(&response), json!([]));
        }

        #[tokio::test]
        async fn logs_a_catch_and_reports_the_total() {
            let routes = routes(&context());

            let response = warp::test::request()
                .method("POST")
                .path("/api/catches")
                .json(&json!({ "species": "Largemouth Bass", "weight": 3.2, "date": "2024-01-15" }))
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(&response);
            assert_eq!(body["message"], "Catch logged successfully! Total catches: 1");
            assert_eq!(body["catch"]["species"], "Largemouth Bass");
            assert!(body["catch"]["id"].is_i64());
            assert!(body["catch"]["logged_at"].is_string());
        }

        #[tokio::test]
        async fn lists_newest_date_first() {
            let routes = routes(&context());

            for (species, date) in [
                ("Rainbow Trout", "2024-01-12"),
                ("Largemouth Bass", "2024-01-15"),
            ] {
                let response = warp::test::request()
                    .method("POST")
                    .path("/api/catches")
                    .json(&json!({ "species": species, "date": date }))
                    .reply(&routes)
                    .await;
                assert_eq!(response.status(), StatusCode::OK);
            }

            let response = warp::test::request()
                .method("GET")
                .path("/api/catches")
                .reply(&routes)
                .await;

            let body = body_json(&response);
            assert_eq!(body[0]["species"], "Largemouth Bass");
            assert_eq!(body[1]["species"], "Rainbow Trout");
        }

        #[tokio::test]
        async fn rejects_a_missing_species() {
            let routes = routes(&context());

            let response = warp::test::request()
                .method("POST")
                .path("/api/catches")
                .json(&json!({ "weight": 3.2 }))
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                body_json(&response)["error"],
                "species is required and must be a non-empty string"
            );
        }

        #[tokio::test]
        async fn rejects_a_blank_species() {
            let routes = routes(&context());

            let response = warp::test::request()
                .method("POST")
                .path("/api/catches")
                .json(&json!({ "species": "   " }))
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        #[tokio::test]
        async fn admits_anything_when_the_species_rule_is_off() {
            let mut ctx = context();
            ctx.require_species = false;
            let routes = routes(&ctx);

            let response = warp::test::request()
                .method("POST")
                .path("/api/catches")
                .json(&json!({ "weight": 3.2 }))
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::OK);
        }

        #[tokio::test]
        async fn rejects_a_non_object_body() {
            let routes = routes(&context());

            let response = warp::test::request()
                .method("POST")
                .path("/api/catches")
                .json(&json!(["not", "an", "object"]))
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        #[tokio::test]
        async fn rejects_malformed_json() {
            let routes = routes(&context());

            let response = warp::test::request()
                .method("POST")
                .path("/api/catches")
                .header("content-type", "application/json")
                .body("{\"species\": ")
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        #[tokio::test]
        async fn rejects_an_oversized_payload() {
            let mut ctx = context();
            ctx.max_catch_bytes = 64;
            let routes = routes(&ctx);

            let response = warp::test::request()
                .method("POST")
                .path("/api/catches")
                .json(&json!({ "species": "Carp", "notes": "x".repeat(200) }))
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        }

        #[tokio::test]
        async fn wrong_method_is_rejected() {
            let routes = routes(&context());

            let response = warp::test::request()
                .method("DELETE")
                .path("/api/catches")
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        }
    }

    mod analyze {
        use super::*;

        #[tokio::test]
        async fn returns_the_canned_recommendation() {
            let routes = routes(&context());
            let (content_type, body) = multipart("file", "cove.jpg", "image/jpeg", &[0xff, 0xd8]);

            let response = warp::test::request()
                .method("POST")
                .path("/api/analyze")
                .header("content-type", content_type)
                .body(body)
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(&response);
            assert_eq!(body["success"], true);
            assert_eq!(body["filename"], "cove.jpg");
            assert_eq!(body["recommendation"], CANNED_RECOMMENDATION);
        }

        #[tokio::test]
        async fn rejects_an_upload_without_a_file_part() {
            let routes = routes(&context());
            let (content_type, body) = multipart("note", "note.txt", "text/plain", b"hello");

            let response = warp::test::request()
                .method("POST")
                .path("/api/analyze")
                .header("content-type", content_type)
                .body(body)
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(&response)["error"], "No image file provided");
        }

        #[tokio::test]
        async fn rejects_a_file_that_is_not_an_image() {
            let routes = routes(&context());
            let (content_type, body) = multipart("file", "notes.txt", "text/plain", b"hello");

            let response = warp::test::request()
                .method("POST")
                .path("/api/analyze")
                .header("content-type", content_type)
                .body(body)
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(&response)["error"], "Only image files are allowed");
        }

        #[tokio::test]
        async fn rejects_an_oversized_upload() {
            let mut ctx = context();
            ctx.max_image_bytes = 256;
            let routes = routes(&ctx);
            let (content_type, body) =
                multipart("file", "huge.jpg", "image/jpeg", &[0u8; 1024]);

            let response = warp::test::request()
                .method("POST")
                .path("/api/analyze")
                .header("content-type", content_type)
                .body(body)
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        }

        #[tokio::test]
        async fn maps_analyzer_failures_to_bad_gateway() {
            struct FailingAnalyzer;

            #[async_trait::async_trait]
            impl SpotAnalyzer for FailingAnalyzer {
                async fn analyze(&self, _image: &SpotImage) -> Result<String, analyzer::Error> {
                    Err(analyzer::Error::EmptyResponse)
                }
            }

            let mut ctx = context();
            ctx.analyzer = Arc::new(FailingAnalyzer);
            let routes = routes(&ctx);
            let (content_type, body) = multipart("file", "cove.jpg", "image/jpeg", &[0xff, 0xd8]);

            let response = warp::test::request()
                .method("POST")
                .path("/api/analyze")
                .header("content-type", content_type)
                .body(body)
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        }

        #[tokio::test]
        async fn waits_out_the_stub_delay() {
            let mut ctx = context();
            ctx.stub_delay = Duration::from_millis(50);
            let routes = routes(&ctx);
            let (content_type, body) = multipart("file", "cove.jpg", "image/jpeg", &[0xff, 0xd8]);

            let started = std::time::Instant::now();
            let response = warp::test::request()
                .method("POST")
                .path("/api/analyze")
                .header("content-type", content_type)
                .body(body)
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::OK);
            assert!(started.elapsed() >= Duration::from_millis(50));
        }
    }

    mod forecast {
        use super::*;

        #[tokio::test]
        async fn echoes_the_location() {
            let routes = routes(&context());

            let response = warp::test::request()
                .method("POST")
                .path("/api/forecast")
                .json(&json!({ "location": "Lake Erie" }))
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(&response);
            assert_eq!(body["location"], "Lake Erie");
            assert_eq!(body["bite_score"], 8.5);
            assert_eq!(body["activity_level"], "Excellent");
            assert_eq!(body["moon_phase"], "Waxing Gibbous");
        }

        #[tokio::test]
        async fn defaults_to_an_unknown_location() {
            let routes = routes(&context());

            for body in [json!({}), json!({ "location": "" })] {
                let response = warp::test::request()
                    .method("POST")
                    .path("/api/forecast")
                    .json(&body)
                    .reply(&routes)
                    .await;

                assert_eq!(response.status(), StatusCode::OK);
                assert_eq!(body_json(&response)["location"], "Unknown Location");
            }
        }
    }

    mod rejections {
        use super::*;

        #[tokio::test]
        async fn store_failures_map_to_service_unavailable() {
            let rejection = reject_store(store::Error::Unavailable("a writer crashed"));

            let reply = handle_rejection(rejection).await.unwrap();
            let response = reply.into_response();

            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        }

        #[tokio::test]
        async fn unknown_routes_return_json_not_found() {
            let routes = routes(&context());

            let response = warp::test::request()
                .method("GET")
                .path("/api/nope")
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(body_json(&response), json!({ "error": "Not found" }));
        }

        #[tokio::test]
        async fn preflight_allows_cross_origin_posts() {
            let routes = routes(&context());

            let response = warp::test::request()
                .method("OPTIONS")
                .path("/api/catches")
                .header("origin", "http://localhost:5173")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .reply(&routes)
                .await;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()["access-control-allow-origin"], "*");
        }
    }
}
