//! sheetdb CLI - query remote spreadsheet documents

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sheetdb::prelude::*;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "sheetdb")]
#[command(author, version, about = "Query zones of remote spreadsheet documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a document and print it, or a zone of it
    Get {
        /// Document name
        document: String,

        /// Access key
        #[arg(short, long)]
        key: String,

        /// Base URL of the document service
        #[arg(long)]
        base_url: String,

        /// Zone begin in A1 notation (used with --end)
        #[arg(long, requires = "end")]
        begin: Option<String>,

        /// Zone end in A1 notation (used with --begin)
        #[arg(long, requires = "begin")]
        end: Option<String>,

        /// Zone as a colon range, e.g. A1:C3
        #[arg(long, conflicts_with_all = ["begin", "end"])]
        zone: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Re-fetch on an interval and print each result until interrupted
    Watch {
        /// Document name
        document: String,

        /// Access key
        #[arg(short, long)]
        key: String,

        /// Base URL of the document service
        #[arg(long)]
        base_url: String,

        /// Refresh interval in milliseconds (minimum 200)
        #[arg(short, long, default_value = "1000")]
        interval: u64,

        /// Zone begin in A1 notation (used with --end)
        #[arg(long, requires = "end")]
        begin: Option<String>,

        /// Zone end in A1 notation (used with --begin)
        #[arg(long, requires = "begin")]
        end: Option<String>,

        /// Zone as a colon range, e.g. A1:C3
        #[arg(long, conflicts_with_all = ["begin", "end"])]
        zone: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Get {
            document,
            key,
            base_url,
            begin,
            end,
            zone,
            json,
        } => {
            let zone = zone_spec(begin, end, zone)?;
            get(&document, &key, &base_url, zone, json).await
        }
        Commands::Watch {
            document,
            key,
            base_url,
            interval,
            begin,
            end,
            zone,
            json,
        } => {
            let zone = zone_spec(begin, end, zone)?;
            watch(&document, &key, &base_url, interval, zone, json).await
        }
    }
}

fn build_client(base_url: &str) -> Result<SheetDb<HttpProvider>> {
    let provider = HttpProvider::new(HttpConfig::new(base_url))
        .context("Failed to build HTTP client")?;
    Ok(SheetDb::new(provider))
}

fn zone_spec(
    begin: Option<String>,
    end: Option<String>,
    zone: Option<String>,
) -> Result<Option<ZoneSpec>> {
    match (begin, end, zone) {
        (Some(begin), Some(end), None) => {
            Ok(Some(ZoneSpec::new(begin.as_str(), end.as_str())))
        }
        (None, None, Some(range)) => {
            let spec = ZoneSpec::parse(&range)
                .with_context(|| format!("Invalid zone '{range}'"))?;
            Ok(Some(spec))
        }
        (None, None, None) => Ok(None),
        _ => bail!("--begin and --end must be used together"),
    }
}

async fn get(
    document: &str,
    key: &str,
    base_url: &str,
    zone: Option<ZoneSpec>,
    json: bool,
) -> Result<()> {
    let client = build_client(base_url)?;

    let mut request = GetRequest::new(document, key);
    if let Some(zone) = zone {
        request = request.with_zone(zone);
    }

    let output = client
        .get(&request)
        .await
        .with_context(|| format!("Query of '{document}' failed"))?;
    print_output(&output, json)
}

async fn watch(
    document: &str,
    key: &str,
    base_url: &str,
    interval_ms: u64,
    zone: Option<ZoneSpec>,
    json: bool,
) -> Result<()> {
    let client = build_client(base_url)?;
    let interval = Duration::from_millis(interval_ms);

    let mut request = GetRequest::new(document, key);
    if let Some(zone) = zone {
        request = request.with_zone(zone);
    }

    // The refresh controller drives the fetches; this loop prints whatever
    // entry currently owns the cache slot.
    let _handle = client
        .refresh(document, key, interval)
        .context("Cannot start refresh")?;

    match client.get(&request).await {
        Ok(output) => print_output(&output, json)?,
        Err(e) => eprintln!("error: {e}"),
    }

    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;
    loop {
        ticker.tick().await;

        match client.cached(request.document.as_str()) {
            None => {}
            Some(Err(failure)) => eprintln!("error: {failure}"),
            Some(Ok(doc)) => match &request.zone {
                None => print_document(&doc, json)?,
                Some(spec) => {
                    let (begin, end) = spec.resolve()?;
                    match sheetdb::zone::extract(&doc, begin, end) {
                        Ok(result) => print_zone(&result, json)?,
                        Err(e) => eprintln!("error: {e}"),
                    }
                }
            },
        }
    }
}

fn print_output(output: &QueryOutput, json: bool) -> Result<()> {
    match output {
        QueryOutput::Document(doc) => print_document(doc, json),
        QueryOutput::Zone(zone) => print_zone(zone, json),
    }
}

fn print_document(doc: &Document, json: bool) -> Result<()> {
    if json {
        let mut cells = serde_json::Map::new();
        for (coord, cell) in doc.cells() {
            let mut fields = serde_json::Map::new();
            if let Some(result) = &cell.result {
                fields.insert("result".to_string(), serde_json::to_value(result)?);
            }
            cells.insert(coord.to_string(), Value::Object(fields));
        }

        let mut body = serde_json::Map::new();
        body.insert("cells".to_string(), Value::Object(cells));
        println!("{}", serde_json::to_string_pretty(&Value::Object(body))?);
    } else {
        let mut entries: Vec<_> = doc.cells().collect();
        entries.sort_by_key(|(coord, _)| (coord.row, coord.col));

        for (coord, cell) in entries {
            match &cell.result {
                Some(value) => println!("{coord}\t{value}"),
                None => println!("{coord}\t(unevaluated)"),
            }
        }
    }

    Ok(())
}

fn print_zone(zone: &ZoneResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(zone)?);
        return Ok(());
    }

    if zone.columns.iter().any(Option::is_some) {
        let header: Vec<String> = zone
            .columns
            .iter()
            .map(|label| label.as_ref().map(|v| v.to_string()).unwrap_or_default())
            .collect();
        println!("\t{}", header.join("\t"));
    }

    for row in &zone.rows {
        let label = row
            .label
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_default();
        let data: Vec<String> = row.data.iter().map(|n| n.to_string()).collect();
        println!("{label}\t{}", data.join("\t"));
    }

    Ok(())
}
