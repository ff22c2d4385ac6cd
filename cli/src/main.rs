use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use search_cli::corpus::load_corpus;
use search_cli::input::{read_line, read_line_with_number, read_ratings};
use search_cli::output::{write_json, write_match, write_pages, MatchOutput, SearchOutput};
use search_core::{DocId, DocumentStatus, RequestQueue, SearchServer};
use tracing_subscriber::{fmt, EnvFilter};

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Index short documents and run TF-IDF queries against them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load a corpus and print the top documents for a query
    Search {
        /// Input path (JSON/JSONL file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Space-separated stop words
        #[arg(long, default_value = "")]
        stop_words: String,
        /// Query; prefix a word with '-' to exclude documents containing it
        #[arg(long)]
        query: String,
        /// Only documents with this status
        #[arg(long, value_enum, default_value_t = StatusArg::Actual)]
        status: StatusArg,
        /// Only documents rated at least this
        #[arg(long)]
        min_rating: Option<i32>,
        /// Results per printed page
        #[arg(long, default_value_t = 2)]
        page_size: usize,
        /// Print JSON instead of pages
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Load a corpus and report which query words a document contains
    Match {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "")]
        stop_words: String,
        #[arg(long)]
        query: String,
        /// Document id to match against
        #[arg(long)]
        id: DocId,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Read stop words, documents and queries from stdin
    Interactive {
        #[arg(long, default_value_t = 2)]
        page_size: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Search { input, stop_words, query, status, min_rating, page_size, json } => {
            let mut server = SearchServer::new(&stop_words)?;
            load_corpus(&mut server, &input)?;
            let status = DocumentStatus::from(status);
            let min_rating = min_rating.unwrap_or(i32::MIN);
            let start = Instant::now();
            let results = server.find_top_documents_with(&query, &|_, doc_status, rating| {
                doc_status == status && rating >= min_rating
            })?;
            let elapsed = start.elapsed();
            tracing::info!(
                query = %query,
                hits = results.len(),
                took_s = elapsed.as_secs_f64(),
                "search complete"
            );
            if json {
                let output = SearchOutput {
                    query: &query,
                    took_s: elapsed.as_secs_f64(),
                    total_hits: results.len(),
                    results: &results,
                };
                write_json(&mut out, &output)
            } else {
                write_pages(&mut out, &results, page_size)
            }
        }
        Commands::Match { input, stop_words, query, id, json } => {
            let mut server = SearchServer::new(&stop_words)?;
            load_corpus(&mut server, &input)?;
            let (words, status) = server.match_document(&query, id)?;
            if json {
                let output = MatchOutput { query: &query, doc_id: id, status, words: &words };
                write_json(&mut out, &output)
            } else {
                write_match(&mut out, id, &words, status)
            }
        }
        Commands::Interactive { page_size } => {
            let stdin = io::stdin();
            run_interactive(&mut stdin.lock(), &mut out, page_size)
        }
    }
}

/// Stop words line, document count line, then a text line and a ratings line per
/// document (ids are assigned from 0), then one query per line until end of input.
fn run_interactive<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    page_size: usize,
) -> Result<()> {
    let stop_words = read_line(input)?.unwrap_or_default();
    let mut server = SearchServer::new(&stop_words)?;
    let count = read_line_with_number(input)?;
    if count < 0 {
        bail!("document count must not be negative, got {count}");
    }
    for id in 0..count {
        let Some(text) = read_line(input)? else {
            bail!("expected {count} documents, got {id}");
        };
        let ratings = read_ratings(input)?;
        server.add_document(DocId::try_from(id)?, &text, DocumentStatus::Actual, &ratings)?;
    }
    tracing::info!(documents = server.document_count(), "corpus loaded");

    let mut queue = RequestQueue::new(&server);
    while let Some(query) = read_line(input)? {
        if query.trim().is_empty() {
            continue;
        }
        // a bad query is reported and the session goes on
        match queue.add_find_request(&query) {
            Ok(results) => write_pages(out, &results, page_size)?,
            Err(err) => writeln!(out, "error: {err}")?,
        }
    }
    writeln!(out, "Total empty requests: {}", queue.no_result_requests())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn interactive_session() {
        let script = "and with\n\
                      3\n\
                      white cat with fancy collar\n\
                      2 8 -3\n\
                      fluffy cat fluffy tail\n\
                      3 7 2 7\n\
                      groomed dog expressive eyes\n\
                      4 5 -12 2 1\n\
                      fluffy groomed cat\n\
                      parrot\n\
                      cat --dog\n";
        let mut out = Vec::new();
        run_interactive(&mut Cursor::new(script), &mut out, 2).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("{ document_id = 1,"));
        assert_eq!(lines[1], "Page break");
        assert!(lines[2].starts_with("{ document_id = 0,"));
        assert_eq!(lines[3], "no documents found");
        assert!(lines[4].starts_with("error: malformed minus-word"));
        assert_eq!(lines[5], "Total empty requests: 1");
    }

    #[test]
    fn interactive_rejects_short_corpus() {
        let script = "\n2\nonly one\n0\n";
        let mut out = Vec::new();
        assert!(run_interactive(&mut Cursor::new(script), &mut out, 2).is_err());
    }
}
