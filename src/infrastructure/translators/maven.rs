use tracing::info;

use super::RepositoryTarget;
use crate::common::result::RepotreeResult;
use crate::domain::value_objects::execution::Execution;

const MVN: &str = "mvn";
const POM: &str = "pom.xml";

/// Build-tool translator. Repositories without a project descriptor are skipped, not failed.
#[derive(Debug, Clone, Default)]
pub struct MavenTranslator;

impl MavenTranslator {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(
        &self,
        args: &[String],
        target: &RepositoryTarget<'_>,
    ) -> RepotreeResult<Vec<Execution>> {
        let path = target.repository_path();

        let skip = !path.join(POM).is_file();
        if skip {
            info!(
                "Repository {} in path {} is not a valid maven project, skipped.",
                target.repository_name(),
                path.display()
            );
        }

        Ok(vec![Execution::new(MVN, path, args.to_vec()).with_skip(skip)])
    }
}
