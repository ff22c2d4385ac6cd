use anyhow::Result;
use search_core::{paginate, Document, DocumentStatus};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
pub struct SearchOutput<'a> {
    pub query: &'a str,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: &'a [Document],
}

#[derive(Serialize)]
pub struct MatchOutput<'a> {
    pub query: &'a str,
    pub doc_id: i32,
    pub status: DocumentStatus,
    pub words: &'a [String],
}

/// Print results one page per line, with a separator between pages.
pub fn write_pages<W: Write>(out: &mut W, results: &[Document], page_size: usize) -> Result<()> {
    if results.is_empty() {
        writeln!(out, "no documents found")?;
        return Ok(());
    }
    for (n, page) in paginate(results, page_size).iter().enumerate() {
        if n > 0 {
            writeln!(out, "Page break")?;
        }
        writeln!(out, "{page}")?;
    }
    Ok(())
}

pub fn write_match<W: Write>(
    out: &mut W,
    doc_id: i32,
    words: &[String],
    status: DocumentStatus,
) -> Result<()> {
    let words = words.join(" ");
    writeln!(out, "{{ document_id = {doc_id}, status = {status}, words = {words} }}")?;
    Ok(())
}

pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_separated() {
        let docs = vec![
            Document::new(1, 0.5, 2),
            Document::new(2, 0.25, 1),
            Document::new(3, 0.1, 0),
        ];
        let mut buf = Vec::new();
        write_pages(&mut buf, &docs, 2).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Page break");
        assert_eq!(lines[2], "{ document_id = 3, relevance = 0.1, rating = 0 }");
    }

    #[test]
    fn empty_results_say_so() {
        let mut buf = Vec::new();
        write_pages(&mut buf, &[], 2).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "no documents found\n");
    }

    #[test]
    fn match_line() {
        let mut buf = Vec::new();
        write_match(&mut buf, 4, &["cat".into(), "fluffy".into()], DocumentStatus::Actual).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{ document_id = 4, status = actual, words = cat fluffy }\n"
        );
    }

    #[test]
    fn json_output() {
        let docs = vec![Document::new(1, 0.5, 2)];
        let mut buf = Vec::new();
        let output = SearchOutput { query: "cat", took_s: 0.0, total_hits: 1, results: &docs };
        write_json(&mut buf, &output).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["results"][0]["id"], 1);
        assert_eq!(v["total_hits"], 1);
    }
}
