//! modhook's command-line entry point.
//! Parses arguments, loads the configuration and performs one generation run.

use modhook::{
    cli::{get_args, Args},
    config::get_config,
    error::{default_error_handler, Result},
    logger::init_logger,
    processor::Preprocessor,
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = get_config(&args.source_dir, args.config.as_deref())?;
    if let Some(template_root) = args.template_root {
        config.template_root = template_root;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }

    let preprocessor = Preprocessor::new(&config, &args.source_dir)?;
    let report = preprocessor.run()?;

    for path in &report.skipped {
        println!("skipped: '{}'", path.display());
    }
    for path in &report.written {
        println!("spliced: '{}'", path.display());
    }
    for path in &report.copied {
        println!("copied: '{}'", path.display());
    }
    println!(
        "Integrated {} module(s) into {}.",
        report.modules.len(),
        preprocessor.output_root().display()
    );
    Ok(())
}
