//! Writer for translation results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::batch::TranslationResult;
use crate::error::Error;

/// Writes one delimited line per result, in the order given.
pub fn write_results<W: Write>(
    mut writer: W,
    results: &[TranslationResult],
    delimiter: &str,
) -> Result<(), Error> {
    for result in results {
        writeln!(writer, "{}", result.to_line(delimiter))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes results to `path`, gzip-compressing when the name ends in `.gz`.
pub fn write_results_file(
    path: &Path,
    results: &[TranslationResult],
    delimiter: &str,
) -> Result<(), Error> {
    let writer = BufWriter::new(File::create(path)?);
    if path.extension().is_some_and(|ext| ext == "gz") {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        write_results(&mut encoder, results, delimiter)?;
        encoder.finish()?.flush()?;
        Ok(())
    } else {
        write_results(writer, results, delimiter)
    }
}
