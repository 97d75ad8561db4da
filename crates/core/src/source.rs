use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub type SourceReader = Box<dyn BufRead + Send>;

type OpenFn = dyn Fn() -> io::Result<SourceReader> + Send + Sync;

/// A named, re-openable text input.
///
/// Inputs are handed around as suppliers rather than open readers so that
/// whichever worker runs a stage opens its own input.
#[derive(Clone)]
pub struct SourceSupplier {
    name: Arc<str>,
    open: Arc<OpenFn>,
}

impl SourceSupplier {
    pub fn new<F>(name: impl Into<Arc<str>>, open: F) -> Self
    where
        F: Fn() -> io::Result<SourceReader> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            open: Arc::new(open),
        }
    }

    pub fn file(path: &Path) -> Self {
        let owned: PathBuf = path.to_path_buf();
        Self::new(path.display().to_string(), move || {
            let file = File::open(&owned)?;
            Ok(Box::new(BufReader::new(file)) as SourceReader)
        })
    }

    pub fn text(name: &str, contents: impl Into<String>) -> Self {
        let contents: Arc<str> = Arc::from(contents.into());
        Self::new(name, move || {
            Ok(Box::new(Cursor::new(contents.as_bytes().to_vec())) as SourceReader)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn open(&self) -> io::Result<SourceReader> {
        (self.open)()
    }
}

impl fmt::Debug for SourceSupplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceSupplier")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
