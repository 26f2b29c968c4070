use crate::{
    BuildArgs,
    build::{Builder, base_path_from_config},
    config::Config,
};

pub fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    let config_path = Config::path_from_arg(args.config_file.as_deref())?;
    let config = Config::load_from_arg(args.config_file.as_deref())?;

    // Get the base path for resolving relative paths
    let base_path = base_path_from_config(&config_path);

    let builder = Builder::new(config, base_path).with_drafts(args.drafts);
    let report = builder.build()?;

    println!(
        "Built blog to {} ({} posts, {} pages)",
        report.output_dir.display(),
        report.documents,
        report.pages_written
    );

    if !report.is_success() {
        for err in &report.parse_errors {
            eprintln!("  parse error: {err}");
        }
        for err in &report.render_errors {
            eprintln!("  render error: {err}");
        }
        anyhow::bail!(
            "{} file(s) could not be parsed and {} page(s) could not be rendered",
            report.parse_errors.len(),
            report.render_errors.len()
        );
    }

    Ok(())
}
