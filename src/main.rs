mod archive;
mod args;
mod cmd;
mod config;
mod context;
mod error;
mod example;
mod packager;
mod request;
mod result;
mod toolchain;
mod tpl;
mod utils;

use args::Args;
use config::Config;
use context::Context;
use error::Error;
use packager::Packager;
use request::BuildRequest;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> result::Result<()> {
    run_with(Args::parse())
}

fn run_with(args: Args) -> result::Result<()> {
    let Args {
        name,
        example,
        path,
        config: config_path,
        verbose,
        no_build,
    } = args;

    cliclack::intro("ladder-zip")?;

    // An unknown example is reported and nothing else happens
    let request = match BuildRequest::new(&name, example.as_deref()) {
        Ok(request) => request,
        Err(e @ Error::InvalidExample(_)) => {
            cliclack::outro_cancel(e.to_string())?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let project_dir = utils::find_project_dir(path.as_deref())?;
    let ctx = Context::new(project_dir, verbose);
    let config = Config::load(&ctx, config_path.as_deref())?;
    let packager = Packager::new(&ctx, &config, &request);

    if verbose {
        if let Some(example) = request.example() {
            cliclack::log::info(format!("Building example {}", example))?;
        }
        cliclack::log::info(format!("Target: {}", packager.target()))?;
    }

    if no_build {
        cliclack::log::warning("Skipping build, packaging the existing binary")?;
    } else if verbose {
        // Build output is streamed, so no spinner over it
        packager.build()?;
        cliclack::log::success(format!("Built {}", packager.plan().binary_name))?;
    } else {
        let spinner = cliclack::spinner();
        spinner.start(format!("Running {}", packager.plan().command_line()));
        if let Err(e) = packager.build() {
            spinner.error("Build failed");
            return Err(e);
        }
        spinner.stop(format!("Built {}", packager.plan().binary_name));
    }

    let manifest = if verbose {
        let manifest = packager.package()?;
        cliclack::log::info(format!("Archived {}", manifest.entry_names().join(", ")))?;
        manifest
    } else {
        let spinner = cliclack::spinner();
        spinner.start("Creating zip archive...");
        match packager.package() {
            Ok(manifest) => {
                spinner.stop(format!("Archived {} entries", manifest.entries().len()));
                manifest
            }
            Err(e) => {
                spinner.error("Failed to create archive");
                return Err(e);
            }
        }
    };

    cliclack::outro(format!(
        "Created {} ({} entries)",
        packager.archive_path().display(),
        manifest.entries().len()
    ))?;
    Ok(())
}
