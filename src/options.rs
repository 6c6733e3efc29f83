use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Only the first `limit` rows of the input are enriched and written.
    pub limit: Option<usize>,
}
