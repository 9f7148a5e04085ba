use crate::context::Context;
use crate::error::Error;
use crate::result::Result;
use crate::utils;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Permissions given to the bot binary inside the archive
const BINARY_MODE: u32 = 0o755;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file with its unix permission bits
    File(u32),
    /// Bare directory entry; contents are not archived
    Dir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub source: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

/// Everything that goes into one submission archive: the top-level entries
/// of the assets directory (sorted by name) followed by the renamed binary.
#[derive(Debug, Clone)]
pub struct ArchiveManifest {
    entries: Vec<ArchiveEntry>,
}

impl ArchiveManifest {
    /// Collect the assets directory listing and the binary.
    ///
    /// Fails before anything is written if the directory or binary is
    /// missing, or if an asset would shadow the binary entry.
    pub fn collect(assets_dir: &Path, binary: &Path, binary_entry: &str) -> Result<Self> {
        if !assets_dir.is_dir() {
            return Err(Error::AssetsNotFound(assets_dir.to_path_buf()));
        }

        let mut entries = Vec::new();
        let walker = WalkDir::new(assets_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            let name = entry.file_name().to_str().ok_or_else(|| {
                Error::custom(format!("non UTF-8 file name in {}", assets_dir.display()))
            })?;

            if name == binary_entry {
                return Err(Error::DuplicateEntry(name.to_string()));
            }

            let kind = if entry.file_type().is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File(file_mode(entry.path())?)
            };

            entries.push(ArchiveEntry {
                source: entry.path().to_path_buf(),
                name: name.to_string(),
                kind,
            });
        }

        if !binary.is_file() {
            return Err(Error::BinaryNotFound(binary.to_path_buf()));
        }

        entries.push(ArchiveEntry {
            source: binary.to_path_buf(),
            name: binary_entry.to_string(),
            kind: EntryKind::File(BINARY_MODE),
        });

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn entry_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Write a deflate-compressed zip to `output_path`.
    ///
    /// The archive is built in a temporary file next to the target and
    /// renamed into place only once it is complete. On error the temporary
    /// file is removed and any existing file at `output_path` is left as is.
    pub fn write(&self, ctx: &Context, output_path: &Path) -> Result<()> {
        let output_dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        utils::ensure_dir(output_dir)?;

        let temp_file = NamedTempFile::new_in(output_dir)?;
        let mut zip = ZipWriter::new(temp_file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &self.entries {
            if ctx.verbose {
                cliclack::log::remark(format!("Adding {} as {}", entry.source.display(), entry.name))?;
            }

            match entry.kind {
                EntryKind::Dir => {
                    zip.add_directory(entry.name.as_str(), options)?;
                }
                EntryKind::File(mode) => {
                    zip.start_file(entry.name.as_str(), options.unix_permissions(mode))?;
                    let mut source = File::open(&entry.source)?;
                    io::copy(&mut source, &mut zip)?;
                }
            }
        }

        let temp_file = zip.finish()?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(output_path)?;

        Ok(())
    }
}

#[cfg(unix)]
fn file_mode(path: &Path) -> Result<u32> {
    use std::os::unix::fs::PermissionsExt;
    Ok(std::fs::metadata(path)?.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn file_mode(_path: &Path) -> Result<u32> {
    Ok(0o644)
}
