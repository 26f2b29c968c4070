use crate::{
    CleanArgs,
    build::{Builder, base_path_from_config},
    config::Config,
};

pub fn run(args: &CleanArgs) -> Result<(), anyhow::Error> {
    let config_path = Config::path_from_arg(args.config_file.as_deref())?;
    let config = Config::load_from_arg(args.config_file.as_deref())?;

    // Get the base path for resolving relative paths
    let base_path = base_path_from_config(&config_path);
    let site_path = Builder::new(config, base_path).output_dir();

    // Delete the generated site folder
    if site_path.exists() {
        if args.dry_run {
            println!("Would delete {}", site_path.display());
        } else {
            std::fs::remove_dir_all(&site_path)?;
            println!("Deleted {}", site_path.display());
        }
    } else {
        println!("Nothing to clean at {}", site_path.display());
    }

    Ok(())
}
