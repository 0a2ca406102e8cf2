use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use oa_importer::prelude::*;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let paths = match parse_args(std::env::args().collect()) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    CliApp::new("oa-importer")
        .run(move |writer| run_import(writer, paths))
        .await
}

/// Parse and validate command-line arguments
fn parse_args(args: Vec<String>) -> Result<Vec<PathBuf>, AppError> {
    if args.len() < 2 {
        return Err(AppError::InvalidArguments(
            "Usage: oa-importer <addresses.csv> [addresses.csv ...]".to_string(),
        ));
    }
    Ok(args[1..].iter().map(PathBuf::from).collect())
}

/// Main application logic - sequences the input files and writes normalized
/// records to stdout as CSV
async fn run_import(
    writer: tokio::io::BufWriter<tokio::io::Stdout>,
    paths: Vec<PathBuf>,
) -> Result<(), AppError> {
    let records = RecordSequencer::new(paths);
    let stats = std::sync::Arc::clone(records.stats());

    let mut sink = CsvSink::new(writer);
    let written = write_records(records, &mut sink).await?;

    tracing::info!(
        records = written,
        bad_records = stats.bad_record_count(),
        "import finished"
    );
    Ok(())
}
