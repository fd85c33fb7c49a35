//! `trails` demo binary: opens the multi-trail viewer window.
//!
//! Usage: `trails [OPTIONS.toml]`. With no argument, default options are
//! used. Press `A` to add a trail, `C` to clear, `R` to reset the camera.

use std::path::Path;

use trails::{Options, Viewer};

fn load_options(arg: Option<&str>) -> Result<Options, trails::TrailsError> {
    let Some(path) = arg else {
        return Ok(Options::default());
    };
    let options = Options::load(Path::new(path))?;
    log::info!("loaded options from {path}");
    Ok(options)
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let arg = std::env::args().nth(1);
    let options = match load_options(arg.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
