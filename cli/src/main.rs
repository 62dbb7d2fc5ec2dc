use clap::Parser;
use serde_json::Value;
use std::{
    error::Error,
    fs::File,
    io::BufReader,
    path::PathBuf,
};
use steensgaard_core::{Constraint, Solver};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// path to a JSON file containing a top-level array of constraints
    #[arg(short, long)]
    filepath: PathBuf,

    /// print the representative and points-to target for this variable;
    /// repeatable. Omitted: every registered variable is printed.
    #[arg(long)]
    query: Vec<String>,

    /// write the solved storage shape graph as JSON to this path
    #[arg(long)]
    export_graph: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env(/* RUST_LOG env var sets logging level */))
        .init();

    let args = Args::parse();

    let file = File::open(&args.filepath)?;
    let reader = BufReader::new(file);
    let constraints: Vec<Constraint> = serde_json::from_reader(reader)?;

    let (mut solver, stats) = match Solver::analyze(constraints) {
        Ok(pair) => pair,
        Err(err) => {
            tracing::error!(error = %err, "analysis failed");
            return Err(err.into());
        }
    };
    tracing::info!(
        constraints = stats.constraints_processed,
        classes = stats.equivalence_classes,
        "analysis complete"
    );

    let names = if args.query.is_empty() {
        solver.variable_names()
    } else {
        args.query.clone()
    };

    for name in names {
        let rep = solver.representative(&name)?;
        match solver.points_to(&name)? {
            Some(pointee) => println!("{name}: ecr={rep} points_to={pointee}"),
            None => println!("{name}: ecr={rep} points_to=⊥"),
        }
    }

    if let Some(path) = args.export_graph {
        let graph = solver.shape_graph()?;
        let json: Value = serde_json::json!({
            "nodes": graph.nodes,
            "edges": graph.edges,
        });
        std::fs::write(&path, serde_json::to_vec_pretty(&json)?)?;
        tracing::info!(path = %path.display(), "wrote shape graph");
    }

    Ok(())
}
