use std::path::Path;

use anyhow::Context;

use crate::{
    InitArgs,
    build::BUILTIN_LAYOUTS,
    config::{Config, DEFAULT_CONFIG_FILE},
};

const WELCOME_POST: &str = "---
title: Welcome
categories: [meta]
---
This is the first post. Edit or delete it, then run `quire build`.
";

pub fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            std::fs::create_dir_all(&path)?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let config_file = path.join(DEFAULT_CONFIG_FILE);
    if config_file.exists() {
        anyhow::bail!(
            "{} already exists, refusing to overwrite it",
            config_file.display()
        );
    }

    println!("Initializing blog in {}", path.display());

    let config = Config::default();
    let config_text = serde_yaml::to_string(&config)?;
    std::fs::write(&config_file, config_text)
        .with_context(|| format!("failed to write {}", config_file.display()))?;
    println!(
        "Created config file {config_file}",
        config_file = config_file.display()
    );

    let today = chrono::Local::now().format("%Y-%m-%d");
    let post = path
        .join(&config.content.posts)
        .join(format!("{today}-welcome.md"));
    write_new(&post, WELCOME_POST)?;

    let layouts = path.join(&config.content.layouts);
    for (name, source) in BUILTIN_LAYOUTS {
        write_new(&layouts.join(name), source)?;
    }
    println!("Created layouts in {}", layouts.display());

    Ok(())
}

/// Write `content` to `path` unless a file is already there.
fn write_new(path: &Path, content: &str) -> Result<(), anyhow::Error> {
    if path.exists() {
        println!("Keeping existing {}", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}
