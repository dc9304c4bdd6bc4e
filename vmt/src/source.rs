use std::path::{Path, PathBuf};

use crate::error::Error;

/// A file as is, or the `.vm` files of a directory in name order.
pub fn sources(path: &Path) -> Result<Vec<PathBuf>, Error> {
    let name = path.display().to_string();
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = vec![];
    for entry in std::fs::read_dir(path).map_err(|e| Error::FileOpen(name.clone(), e))? {
        let path = entry.map_err(|e| Error::FileRead(name.clone(), e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "vm") {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(Error::NoSource(name));
    }
    files.sort();
    Ok(files)
}

/// `dir/dir.<ext>` for a directory, `file.<ext>` for a file.
pub fn default_output(input: &Path, ext: &str) -> String {
    let path = if input.is_dir() {
        let stem = input
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|s| s.to_os_string()))
            .unwrap_or_else(|| "out".into());
        input.join(stem).with_extension(ext)
    } else {
        input.with_extension(ext)
    };
    path.display().to_string()
}

/// File name shown in diagnostics for assembly that only exists in memory.
pub fn generated_name(output: &str) -> String {
    format!("{} (generated)", Path::new(output).with_extension("asm").display())
}
