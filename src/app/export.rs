use std::path::Path;

use tokio::io::{AsyncWriteExt, BufWriter};

use crate::{error::ExportError, metrics::BenchmarkResult};

/// Writes the result as indented JSON, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the result cannot be serialized or the file cannot
/// be written.
pub async fn write_result(result: &BenchmarkResult, path: &Path) -> Result<(), ExportError> {
    let json =
        serde_json::to_vec_pretty(result).map_err(|source| ExportError::Serialize { source })?;
    let write_err = |source: std::io::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = tokio::fs::File::create(path).await.map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&json).await.map_err(write_err)?;
    writer.write_all(b"\n").await.map_err(write_err)?;
    writer.flush().await.map_err(write_err)?;
    Ok(())
}
