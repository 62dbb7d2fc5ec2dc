use std::net::SocketAddr;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use steensgaard_core::{Constraint, Solver, SolverError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, long, default_value_t = 0)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env(/* RUST_LOG env var sets logging level */))
        .init();

    let args = Args::parse();
    let router = Router::new()
        .route("/analyze", post(analyze))
        .route("/healthz", get(healthz));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("listening on {}", local_addr);
    axum::serve(listener, router).await?;

    Ok(())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Runs the pre-pass and solver on `spawn_blocking` since `Solver::analyze`
/// is synchronous CPU work, not I/O.
async fn analyze(Json(constraints): Json<Vec<Constraint>>) -> Response {
    let outcome = tokio::task::spawn_blocking(move || Solver::analyze(constraints))
        .await
        .expect("solver task panicked");

    match outcome {
        Ok((mut solver, stats)) => {
            let graph = solver
                .shape_graph()
                .expect("shape graph export cannot fail right after a successful analysis");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "shape_graph": {
                        "nodes": graph.nodes,
                        "edges": graph.edges,
                    },
                    "stats": {
                        "classes": stats.equivalence_classes,
                        "constraints": stats.constraints_processed,
                    },
                })),
            )
                .into_response()
        }
        Err(err) => {
            let kind = match &err {
                SolverError::UnknownId(_) => "UnknownId",
                SolverError::UnknownName(_) => "UnknownName",
                SolverError::ArityMismatch { .. } => "ArityMismatch",
            };
            tracing::warn!(error = %err, "analysis rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "error": kind, "detail": err.to_string() })),
            )
                .into_response()
        }
    }
}
