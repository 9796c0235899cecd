//! `git` ingest variant — shallow clone, then a stable text-file walk

use std::path::{Path, PathBuf};

use episodeer_core::{Error, Result, SourceType};

use crate::IngestResult;

const TEXT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

pub fn ingest(repo_url: &str, subpath: Option<&str>) -> Result<IngestResult> {
    let workspace = tempfile::tempdir().map_err(Error::from)?;

    let mut fetch_opts = git2::FetchOptions::new();
    fetch_opts.depth(1);
    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fetch_opts);

    builder
        .clone(repo_url, workspace.path())
        .map_err(|e| Error::FetchFailed(format!("git clone failed: {e}")))?;

    let root = match subpath {
        Some(sub) => workspace.path().join(sub),
        None => workspace.path().to_path_buf(),
    };
    if !root.exists() {
        return Err(Error::FetchFailed(format!("subpath '{}' not found in repository", sub_display(subpath))));
    }

    let mut files = Vec::new();
    collect_text_files(&root, &mut files)?;
    files.sort();

    if files.is_empty() {
        return Err(Error::EmptyContent);
    }

    let mut raw_text = String::new();
    for path in &files {
        let contents = std::fs::read_to_string(path).map_err(Error::from)?;
        let relative = path.strip_prefix(&root).unwrap_or(path);
        raw_text.push_str(&format!("# {}\n\n", relative.display()));
        raw_text.push_str(&contents);
        raw_text.push_str("\n\n");
    }

    let title = repo_title(repo_url);

    Ok(IngestResult {
        title,
        source_type: SourceType::Git,
        raw_text,
    })
}

fn sub_display(subpath: Option<&str>) -> &str {
    subpath.unwrap_or("")
}

/// Depth-first, lexicographic walk collecting markdown/text files.
fn collect_text_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(Error::from)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| !p.components().any(|c| c.as_os_str() == ".git"))
        .collect();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_text_files(&path, out)?;
        } else if is_text_file(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn repo_title(repo_url: &str) -> String {
    repo_url
        .trim_end_matches('/')
        .trim_end_matches(".git")
        .rsplit('/')
        .next()
        .unwrap_or(repo_url)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_title_from_repo_url() {
        assert_eq!(repo_title("https://github.com/user/my-repo.git"), "my-repo");
        assert_eq!(repo_title("https://github.com/user/my-repo"), "my-repo");
    }

    #[test]
    fn recognizes_text_extensions() {
        assert!(is_text_file(Path::new("README.md")));
        assert!(is_text_file(Path::new("notes.txt")));
        assert!(!is_text_file(Path::new("main.rs")));
    }
}
