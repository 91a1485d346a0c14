use std::{
    fs::{self, File},
    io::{self, BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use tetrevo_evaluator::HeuristicWeights;

use crate::model::ai_model::AiModel;

/// Weights file used when no path is given.
pub const DEFAULT_WEIGHTS_PATH: &str = "tetris_weights.txt";

/// Writes `value` as pretty-printed JSON to a new file at `path`.
pub fn save_json<T>(path: &Path, value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush output to {}", path.display()))?;
    Ok(())
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Loads weights from a text file, or from an AI model if the path ends in `.json`.
pub fn load_weights<P>(path: P) -> anyhow::Result<HeuristicWeights>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.extension().is_some_and(|ext| ext == "json") {
        return Ok(AiModel::open(path)?.weights);
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read weights file: {}", path.display()))?;
    let weights = text
        .parse()
        .with_context(|| format!("Failed to parse weights file: {}", path.display()))?;
    Ok(weights)
}

/// Writes weights in the four-line text format.
pub fn save_weights<P>(path: P, weights: &HeuristicWeights) -> anyhow::Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    fs::write(path, weights.to_text())
        .with_context(|| format!("Failed to write weights file: {}", path.display()))
}
