use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use serde::{Deserialize, Serialize};
use std::{convert, net, str::FromStr};
use tokio::time;
use tracing::*;
use ulid::Ulid;

use crate::config;
use crate::errors::Error;
use crate::executor::{ExecutorHandle, Query};

/// Query string parameters, accepted by both endpoints.
#[derive(Debug, Default, Deserialize, PartialEq)]
struct RequestParameters {
    query: Option<String>,
    database: Option<String>,
}

fn parse_parameters(query_string: Option<&str>) -> Result<RequestParameters, String> {
    match query_string {
        Some(query_string) => serde_urlencoded::from_str(query_string)
            .map_err(|error| format!("Invalid query string: {}", error)),
        None => Ok(RequestParameters::default()),
    }
}

fn json_response(status: StatusCode, payload: &impl Serialize) -> Response<Body> {
    let (status, body) = match serde_json::to_string_pretty(payload) {
        Ok(body) => (status, body),
        Err(error) => {
            error!("‼️ Could not serialize response: {}", error);
            (StatusCode::INTERNAL_SERVER_ERROR, String::new())
        }
    };
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

fn error_response(error: &Error) -> Response<Body> {
    let status = match error {
        Error::ExecutorUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_REQUEST,
    };
    json_response(status, error)
}

fn request_error(message: &str) -> Response<Body> {
    json_response(
        StatusCode::BAD_REQUEST,
        &serde_json::json!({ "type": "request", "message": message }),
    )
}

fn empty_response(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

async fn run_sql(
    executor: &ExecutorHandle,
    sql: &str,
    database: Option<&str>,
    read_only: bool,
) -> Response<Body> {
    let query = match Query::parse(sql) {
        Ok(query) => query,
        Err(error) => return error_response(&error),
    };
    if read_only && !query.statement.is_read_only() {
        return request_error("Only read-only statements can be sent with GET, use POST instead");
    }
    let ctx = executor.context(database);
    match executor.execute(query, ctx).await {
        Ok(result) => json_response(StatusCode::OK, &result),
        Err(error) => error_response(&error),
    }
}

async fn handle(executor: ExecutorHandle, req: Request<Body>) -> Result<Response<Body>, hyper::Error> {
    let timer = time::Instant::now();
    let request_id = Ulid::new();
    debug!("⚡️ Received request ID {}", request_id);
    let parameters = parse_parameters(req.uri().query());
    let response = match (req.uri().path(), req.method()) {
        ("/", &Method::POST) => {
            // Read-write
            let body_bytes = hyper::body::to_bytes(req.into_body()).await?;
            match (parameters, String::from_utf8(body_bytes.to_vec())) {
                (Err(message), _) => request_error(&message),
                (Ok(_), Err(_)) => request_error("Request body is not valid UTF-8"),
                (Ok(parameters), Ok(sql)) => {
                    run_sql(&executor, &sql, parameters.database.as_deref(), false).await
                }
            }
        }
        ("/", &Method::GET) => match parameters {
            // Read-only
            Ok(RequestParameters {
                query: Some(sql),
                database,
            }) => run_sql(&executor, &sql, database.as_deref(), true).await,
            Ok(_) => request_error("Missing `query` parameter"),
            Err(message) => request_error(&message),
        },
        ("/", _) => empty_response(StatusCode::METHOD_NOT_ALLOWED),
        _ => empty_response(StatusCode::NOT_FOUND),
    };
    debug!(
        "🪃 Finished request ID {} in {} µs",
        request_id,
        timer.elapsed().as_micros()
    );
    Ok(response)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!("‼️ Failed to install Ctrl+C signal handler: {}", error);
        // Without a handler the server just runs until killed
        std::future::pending::<()>().await;
    }
    info!("💤 Shutting down gracefully...");
}

/// Start server loop.
pub async fn start_server(config: &config::Config, executor: ExecutorHandle) -> anyhow::Result<()> {
    let tcp_listen_address = net::SocketAddr::new(
        net::IpAddr::from_str(&config.tcp_listen_host)?,
        config.tcp_listen_port,
    );

    let server = Server::try_bind(&tcp_listen_address)?
        .serve(make_service_fn(move |_conn| {
            let executor = executor.clone();
            async move {
                Ok::<_, convert::Infallible>(service_fn(move |req| handle(executor.clone(), req)))
            }
        }))
        .with_graceful_shutdown(shutdown_signal());

    info!("👂 Server listening on {}...", tcp_listen_address);

    if let Err(e) = server.await {
        error!("‼️ Encountered server error: {}", e);
        return Err(e.into());
    }
    debug!("⏹ Server no longer listening");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::executor::Executor;
    use pretty_assertions::assert_eq;

    fn spawn_executor() -> ExecutorHandle {
        let mut executor = Executor::new(&config::Config::default(), Catalog::new());
        let handle = executor.prepare_channel();
        tokio::spawn(async move { executor.start().await });
        handle
    }

    async fn send(executor: &ExecutorHandle, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = handle(executor.clone(), request).await.unwrap();
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post(sql: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/")
            .body(Body::from(sql.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn post_writes_and_get_reads() {
        let executor = spawn_executor();
        let (status, _) = send(&executor, post("CREATE TABLE t (a INT, b TEXT)")).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&executor, post("INSERT INTO t VALUES (1, 'x')")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([{ "affected_rows": 1 }]));

        let (status, body) = send(&executor, get("/?query=SELECT%20*%20FROM%20t")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([{ "a": 1, "b": "x" }]));
    }

    #[tokio::test]
    async fn get_refuses_writes() {
        let executor = spawn_executor();
        let (status, body) = send(
            &executor,
            get("/?query=CREATE%20TABLE%20t%20(a%20INT)"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "request");
        let (status, body) = send(&executor, get("/")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Missing `query` parameter");
    }

    #[tokio::test]
    async fn errors_are_json_maps() {
        let executor = spawn_executor();
        let (status, body) = send(
            &executor,
            get("/?query=SELECT%20*%20FROM%20missing&database=nowhere"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({ "type": "not_found", "message": "database not found: nowhere" })
        );
    }

    #[tokio::test]
    async fn unknown_routes_are_rejected() {
        let executor = spawn_executor();
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&executor, request).await.0, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(send(&executor, get("/elsewhere")).await.0, StatusCode::NOT_FOUND);
    }
}
