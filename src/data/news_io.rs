use {
    crate::models::NewsMatch,
    anyhow::{Context, Result},
    std::{
        fs::File,
        io::{BufWriter, Write},
        path::Path,
    },
};

/// Overwrites `path` with one record per match.
pub fn save_matches(path: &Path, matches: &[NewsMatch]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for m in matches {
        writer.write_all(m.to_record().as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
