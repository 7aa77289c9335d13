//! Registry of documented items, keyed by dotted import path.

use crate::model::SourceItem;
use crate::parser::python;
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// All items discovered under the configured source roots.
#[derive(Debug, Default)]
pub struct Registry {
    items: BTreeMap<String, SourceItem>,
}

impl Registry {
    /// Scan every `.py` file under the given roots.
    pub fn from_roots(roots: &[PathBuf]) -> Result<Registry> {
        let mut registry = Registry::default();
        for root in roots {
            let files = collect_sources(root)
                .with_context(|| format!("failed to scan root: {}", root.display()))?;
            for file in files {
                let content = fs::read_to_string(&file)
                    .with_context(|| format!("failed to read {}", file.display()))?;
                let module = module_path(root, &file);
                registry.add_file(&content, &module, &file.to_string_lossy());
            }
        }
        Ok(registry)
    }

    /// Scan a single source string (used by tests and stdin pipelines).
    pub fn add_file(&mut self, content: &str, module: &str, file: &str) {
        for item in python::parse(content, module, file) {
            self.items.insert(item.path.clone(), item);
        }
    }

    /// Resolve a dotted import path. Failure here is a hard error; without
    /// an item there is nothing to build a record from.
    pub fn resolve(&self, path: &str) -> Result<&SourceItem> {
        self.items
            .get(path)
            .ok_or_else(|| anyhow!("cannot resolve import path: {path}"))
    }

    pub fn get(&self, path: &str) -> Option<&SourceItem> {
        self.items.get(path)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Recursively collect `.py` files under a root, sorted for determinism.
fn collect_sources(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if root.is_file() {
        files.push(root.to_path_buf());
        return Ok(files);
    }
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = fs::read_dir(&dir)
            .with_context(|| format!("failed to read directory: {}", dir.display()))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|e| e.to_str()) == Some("py") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Derive the dotted module path of a file relative to its root.
/// `src/pkg/series.py` under root `src` becomes `pkg.series`;
/// `__init__.py` names its package.
fn module_path(root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    let mut parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    if let Some(last) = parts.last_mut() {
        *last = last.trim_end_matches(".py").to_string();
    }
    if parts.last().map(|p| p == "__init__").unwrap_or(false) {
        parts.pop();
    }
    if parts.is_empty() {
        // A bare __init__.py at the root: fall back to the root dir name.
        return root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
    }
    parts.join(".")
}
