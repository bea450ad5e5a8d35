use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally replacing the copy
    /// with a `.zip` archive. Returns the path that was written.
    pub fn backup(
        pool: &DbPool,
        db_path: &str,
        dest_file: &Path,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        let src = Path::new(db_path);

        if !src.exists() {
            return Err(AppError::Other(format!("Database not found: {}", src.display())));
        }

        if dest_file.exists() && !force {
            return Err(AppError::Other(format!(
                "{} already exists (use --force to overwrite)",
                dest_file.display()
            )));
        }

        if let Some(parent) = dest_file.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::copy(src, dest_file)?;

        let final_path = if compress {
            let compressed = compress_backup(dest_file)?;
            if let Err(e) = fs::remove_file(dest_file) {
                warning(format!("Failed to remove uncompressed backup: {e}"));
            }
            compressed
        } else {
            dest_file.to_path_buf()
        };

        audit(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        )?;

        success(format!("Backup created: {}", final_path.display()));
        Ok(final_path)
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "rattendance.sqlite".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(entry, options)
        .map_err(|e| AppError::Export(e.to_string()))?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(|e| AppError::Export(e.to_string()))?;

    Ok(zip_path)
}
