// Template lookup across an ordered list of sources: every context
// `template_dirs` entry first, the built-in set last. The first source that
// knows a name wins, so a single stage can be replaced without copying the
// whole set.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;
use walkdir::WalkDir;

use super::templates::BUILTIN_TEMPLATES;

pub const TEMPLATE_EXTENSION: &str = "hbs";

pub trait TemplateSource {
    /// Human readable location, for logs.
    fn location(&self) -> String;

    /// Source of the template `name`, or None when this source lacks it.
    fn load(&self, name: &str) -> Result<Option<String>>;

    /// Every template name this source provides.
    fn names(&self) -> Result<Vec<String>>;
}

pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, TEMPLATE_EXTENSION))
    }
}

impl TemplateSource for DirectorySource {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn load(&self, name: &str) -> Result<Option<String>> {
        let path = self.path_of(name);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn names(&self) -> Result<Vec<String>> {
        // A missing directory simply provides nothing.
        if !self.root.is_dir() {
            debug!("Template directory {} does not exist", self.root.display());
            return Ok(vec![]);
        }
        let mut names = vec![];
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = template_name(entry.path()) {
                names.push(name);
            }
        }
        Ok(names)
    }
}

fn template_name(path: &Path) -> Option<String> {
    if path.extension()?.to_str()? != TEMPLATE_EXTENSION {
        return None;
    }
    Some(path.file_stem()?.to_str()?.to_string())
}

pub struct BuiltinSource;

impl TemplateSource for BuiltinSource {
    fn location(&self) -> String {
        "<builtin>".to_string()
    }

    fn load(&self, name: &str) -> Result<Option<String>> {
        Ok(BUILTIN_TEMPLATES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, source)| source.to_string()))
    }

    fn names(&self) -> Result<Vec<String>> {
        Ok(BUILTIN_TEMPLATES.iter().map(|(n, _)| n.to_string()).collect())
    }
}

pub struct TemplateChain {
    sources: Vec<Box<dyn TemplateSource>>,
}

impl TemplateChain {
    pub fn new(sources: Vec<Box<dyn TemplateSource>>) -> Self {
        Self { sources }
    }

    /// Directories in priority order, then the built-in set.
    pub fn with_dirs(dirs: &[PathBuf]) -> Self {
        let mut sources: Vec<Box<dyn TemplateSource>> = dirs
            .iter()
            .map(|d| Box::new(DirectorySource::new(d)) as Box<dyn TemplateSource>)
            .collect();
        sources.push(Box::new(BuiltinSource));
        Self::new(sources)
    }

    pub fn resolve(&self, name: &str) -> Result<Option<String>> {
        for source in &self.sources {
            if let Some(template) = source.load(name)? {
                debug!("Template {} resolved from {}", name, source.location());
                return Ok(Some(template));
            }
        }
        Ok(None)
    }

    /// Union of the names of every source, sorted.
    pub fn names(&self) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for source in &self.sources {
            names.extend(source.names()?);
        }
        Ok(names)
    }
}
