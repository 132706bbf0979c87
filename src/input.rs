//! Readers for mapping and query files, plain or gzip-compressed.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::alignment::{AlignmentRecord, CigarParsing};
use crate::batch::{AlignmentMap, add_alignment};
use crate::error::Error;
use crate::query::QueryRecord;

/// Reads a mapping file into alignments keyed by transcript ID.
pub fn read_mapping_file(path: &Path, delimiter: &str) -> Result<AlignmentMap, Error> {
    let reader = open_input(path, "mapping")?;
    parse_mapping(reader, delimiter, path)
}

/// Reads a query file, preserving line order.
pub fn read_query_file(path: &Path, delimiter: &str) -> Result<Vec<QueryRecord>, Error> {
    let reader = open_input(path, "query")?;
    parse_queries(reader, delimiter, path)
}

/// Parses mapping lines from a buffered reader. Blank lines are skipped; errors are
/// annotated with `source` and the line number.
pub fn parse_mapping<R: BufRead>(
    reader: R,
    delimiter: &str,
    source: &Path,
) -> Result<AlignmentMap, Error> {
    let mut alignments = AlignmentMap::new();
    for_each_record(reader, source, |line| {
        let record = AlignmentRecord::from_line(line, delimiter, CigarParsing::Eager)?;
        add_alignment(&mut alignments, record)
    })?;
    Ok(alignments)
}

/// Parses query lines from a buffered reader. Blank lines are skipped; errors are
/// annotated with `source` and the line number.
pub fn parse_queries<R: BufRead>(
    reader: R,
    delimiter: &str,
    source: &Path,
) -> Result<Vec<QueryRecord>, Error> {
    let mut queries = Vec::new();
    for_each_record(reader, source, |line| {
        queries.push(QueryRecord::from_line(line, delimiter)?);
        Ok(())
    })?;
    Ok(queries)
}

fn for_each_record<R, F>(reader: R, source: &Path, mut handle: F) -> Result<(), Error>
where
    R: BufRead,
    F: FnMut(&str) -> Result<(), Error>,
{
    for (line_num, line) in reader.lines().enumerate() {
        let line_num = line_num + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        handle(&line).map_err(|e| e.at_line(source.to_path_buf(), line_num))?;
    }
    Ok(())
}

/// Opens `path` for line reading, decompressing when the name ends in `.gz`.
fn open_input(path: &Path, kind: &'static str) -> Result<Box<dyn BufRead>, Error> {
    if !path.is_file() {
        return Err(Error::FileNotFound {
            kind,
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use tempfile::NamedTempFile;

    const MAPPING: &str = "T1\tchr1\t100\t5M2D5M\n\nT2\tchr2\t500\t10M\t-1\n";

    fn write_temp(suffix: &str, bytes: &[u8]) -> NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(bytes).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn parse_mapping_skips_blank_lines() {
        let map = parse_mapping(Cursor::new(MAPPING), "\t", Path::new("map.tsv")).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["T2"].transcript_start, 500);
        assert!(map["T2"].strand.is_reverse());
    }

    #[test]
    fn parse_mapping_reports_line_number() {
        let text = "T1\tchr1\t100\t5M\n\n   \nT2\tchr1\t100\n";
        let err = parse_mapping(Cursor::new(text), "\t", Path::new("map.tsv")).unwrap_err();
        match &err {
            Error::AtLine { line_num, .. } => assert_eq!(*line_num, 4),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.root(), Error::MalformedRecord { fields: 3, .. }));
        assert!(err.to_string().starts_with("map.tsv:4: "));
    }

    #[test]
    fn duplicate_transcripts_rejected() {
        let text = "T1\tchr1\t100\t5M\nT1\tchr2\t200\t5M\n";
        let err = parse_mapping(Cursor::new(text), "\t", Path::new("map.tsv")).unwrap_err();
        assert!(matches!(err.root(), Error::DuplicateTranscript(id) if id == "T1"));
    }

    #[test]
    fn parse_queries_in_order() {
        let text = "T2\t3\n\nT1\t0\nT1\t9\n";
        let queries = parse_queries(Cursor::new(text), "\t", Path::new("q.tsv")).unwrap();
        let positions: Vec<(&str, u64)> = queries
            .iter()
            .map(|q| (q.transcript_id.as_str(), q.position))
            .collect();
        assert_eq!(positions, vec![("T2", 3), ("T1", 0), ("T1", 9)]);
    }

    #[test]
    fn parse_queries_invalid_position() {
        let text = "T1\t3\nT1\t-3\n";
        let err = parse_queries(Cursor::new(text), "\t", Path::new("q.tsv")).unwrap_err();
        assert!(matches!(err.root(), Error::InvalidPosition(v) if v == "-3"));
    }

    #[test]
    fn read_mapping_file_plain_and_gzip() {
        let plain = write_temp(".tsv", MAPPING.as_bytes());
        let map = read_mapping_file(plain.path(), "\t").unwrap();
        assert_eq!(map.len(), 2);

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(MAPPING.as_bytes()).unwrap();
        let gz = write_temp(".tsv.gz", &encoder.finish().unwrap());
        let map = read_mapping_file(gz.path(), "\t").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["T1"].contig, "chr1");
    }

    #[test]
    fn read_query_file_with_custom_delimiter() {
        let f = write_temp(".csv", b"T1,4\nT2,0\n");
        let queries = read_query_file(f.path(), ",").unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].position, 4);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read_query_file(Path::new("/nonexistent/queries.tsv"), "\t").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { kind: "query", .. }));
    }

    #[test]
    fn directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_mapping_file(dir.path(), "\t").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { kind: "mapping", .. }));
    }
}
