use super::{sub_path, RepositoryTarget};
use crate::common::result::RepotreeResult;
use crate::domain::value_objects::execution::Execution;

const NPM: &str = "npm";

/// Package-manager translator: one execution per declared package.
#[derive(Debug, Clone, Default)]
pub struct NpmTranslator {
    package: Option<String>,
}

impl NpmTranslator {
    pub fn new(package: Option<String>) -> Self {
        Self { package }
    }

    /// Package selected with `--pkg`, if any.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn parse(
        &self,
        args: &[String],
        target: &RepositoryTarget<'_>,
    ) -> RepotreeResult<Vec<Execution>> {
        let root = target.repository_path();

        Ok(target
            .repository
            .packages
            .iter()
            .filter(|package| self.package().map_or(true, |name| package.name == name))
            .map(|package| Execution::new(NPM, sub_path(&root, &package.path), args.to_vec()))
            .collect())
    }
}
