/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use crate::config::{Settings, YamlRead};
use crate::logging::GlobalLogger;

use ::clap::{App, Arg};
use ::std::ffi::OsStr;
use ::std::fs::File;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        for cause in e.iter_chain() {
            error!("{}", cause);
        }

        if ::std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            error!("{}", e.backtrace());
        } else {
            error!("(for a backtrace, try again with RUST_BACKTRACE=1)");
        }
        ::std::process::exit(1);
    });
}

// %% CRATES: binary: stridemat %%
pub fn stridemat() {
    let matches = App::new("stridemat")
        .about("Run a script of strided matrix operations.")
        .version(env!("CARGO_PKG_VERSION"))
        .args(&[
            Arg::with_name("config")
                .short("c").long("config").value_name("SCRIPT")
                .takes_value(true).required(true)
                .help("yaml script: named matrices and a list of steps"),
            Arg::with_name("verbose")
                .short("v").long("verbose").multiple(true)
                .help("log view construction from the matrix library"),
            Arg::with_name("log")
                .long("log").value_name("FILE").takes_value(true)
                .help("also write the log to this file"),
            Arg::with_name("no_color")
                .long("no-color")
                .help("disable colored log levels"),
        ])
        .get_matches();

    if matches.is_present("no_color") {
        crate::color::set_enabled(false);
    }

    let mut logger = GlobalLogger::default();
    logger.verbosity(matches.occurrences_of("verbose"));
    if let Some(path) = matches.value_of_os("log") {
        logger.path(path);
    }
    if let Err(e) = logger.apply() {
        // nothing else can report it
        eprintln!("failed to set up logging: {}", e);
    }

    wrap_result_main(|| {
        // `required(true)` guarantees presence
        let path = matches.value_of_os("config").expect("(BUG) clap let a required arg through!");
        info!("reading script {}", path.to_string_lossy());
        let settings = Settings::from_reader(File::open(path)?)?;

        for block in crate::run_script(&settings)? {
            println!("{}", block);
        }
        Ok(())
    });
}
