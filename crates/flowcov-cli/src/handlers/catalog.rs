//! Catalog query handlers: modules, grep, tags

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Output;
use crate::{GrepArgs, TagsArgs};
use flowcov::{module_grep_args, normalize_module_name, FlowCatalog};
use std::io::{self, Write};

fn write_lines<I, S>(lines: I) -> CliResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for line in lines {
        writeln!(handle, "{}", line.as_ref())?;
    }
    Ok(())
}

/// Runner arguments for `module`, validated against the catalog
pub fn grep_args_for(catalog: &FlowCatalog, module: &str, extra: &[String]) -> CliResult<Vec<String>> {
    let module = normalize_module_name(module);
    if module.is_empty() {
        return Err(CliError::invalid_argument("Module name is required."));
    }
    catalog.require_module(module)?;
    Ok(module_grep_args(module, extra))
}

/// Execute the modules command
pub fn execute_modules(config: &CliConfig) -> CliResult<()> {
    let catalog = FlowCatalog::load_required(&config.catalog_path)?;
    let modules = catalog.modules();
    if modules.is_empty() {
        Output::new(config.use_color(), config.verbosity.is_quiet()).warning(&format!(
            "No modules found in {}.",
            config.catalog_path.display()
        ));
        return Ok(());
    }
    write_lines(modules)
}

/// Execute the grep command
pub fn execute_grep(config: &CliConfig, args: &GrepArgs) -> CliResult<()> {
    let catalog = FlowCatalog::load_required(&config.catalog_path)?;
    write_lines(grep_args_for(&catalog, &args.module, &args.extra)?)
}

/// Execute the tags command
pub fn execute_tags(config: &CliConfig, args: &TagsArgs) -> CliResult<()> {
    let catalog = FlowCatalog::load_required(&config.catalog_path)?;
    write_lines(catalog.tags_for(&args.flow_id, &config.tag_prefix)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "version": "1.0.0",
        "flows": {
            "auth-login": {"name": "Login", "module": "auth", "roles": [], "priority": "P1",
                           "description": "", "expectedSpecs": 1},
            "doc-upload": {"name": "Upload", "module": "documents", "roles": [], "priority": "P2",
                           "description": "", "expectedSpecs": 1}
        }
    }"#;

    fn catalog() -> FlowCatalog {
        FlowCatalog::from_json(CATALOG).unwrap()
    }

    #[test]
    fn test_grep_args_for_known_module() {
        let args = grep_args_for(&catalog(), "@module:auth", &["--project=Chrome".into()]).unwrap();
        assert_eq!(args, vec!["--grep", "@module:auth", "--project=Chrome"]);
    }

    #[test]
    fn test_grep_args_for_unknown_module() {
        let err = grep_args_for(&catalog(), "billing", &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown module \"billing\". Available modules: auth, documents."
        );
    }

    #[test]
    fn test_grep_args_requires_module_name() {
        let err = grep_args_for(&catalog(), "  @module: ", &[]).unwrap_err();
        assert!(err.to_string().contains("Module name is required."));
    }
}
