#![deny(clippy::unwrap_used)]

use clap::error::ErrorKind;
use clap::{arg, command, crate_name, value_parser};
use log::debug;
use std::env;
use std::ffi::{OsStr, OsString};
use std::os::fd::IntoRawFd;
use std::path::PathBuf;
use std::process::exit;

use open_serial_port::{open_port, PortConfig, PortError};

const EXIT_USAGE: i32 = 1;

fn main() {
    env_logger::init();

    let args: Vec<OsString> = env::args_os().collect();
    if args.len() != 2 {
        usage_error();
    }

    let matches = match command!() // requires `cargo` feature
        .arg(
            arg!(
                <DEVICE> "Serial device to open, e.g. /dev/ttyUSB0"
            )
            .value_parser(value_parser!(OsString)),
        )
        .try_get_matches_from(device_args(args))
    {
        Ok(matches) => matches,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                debug!("{}", err);
                usage_error();
            }
        },
    };

    let path = PathBuf::from(
        matches
            .get_one::<OsString>("DEVICE")
            .expect("Requires device parameter"),
    );
    let config = PortConfig::default();

    let port = match open_port(&path, &config) {
        Ok(port) => port,
        Err(err) => fail(err, |e| e.to_string()),
    };

    if let Err(err) = port.configure(&config) {
        fail(err, |e| {
            format!("was unable to configure \"{}\": {}", path.display(), e)
        });
    }

    // Ownership of the descriptor passes to whoever reads it from stdout.
    println!("{}", port.into_raw_fd());
}

/// The single argument is always a device path, even if it is empty or looks
/// like an option. Only the help and version flags are left to clap.
fn device_args(mut args: Vec<OsString>) -> Vec<OsString> {
    let is_info_flag = args.get(1).is_some_and(|arg| {
        [OsStr::new("-h"), OsStr::new("--help"), OsStr::new("-V"), OsStr::new("--version")]
            .contains(&arg.as_os_str())
    });
    if !is_info_flag {
        args.insert(1, OsString::from("--"));
    }
    args
}

fn usage_error() -> ! {
    eprintln!("Error: `{}` expects exactly one argument.", crate_name!());
    exit(EXIT_USAGE);
}

fn fail(err: PortError, describe: impl FnOnce(&PortError) -> String) -> ! {
    debug!("{:?}", err);
    eprintln!("Error: `{}` {}", crate_name!(), describe(&err));
    exit(err.exit_code());
}
