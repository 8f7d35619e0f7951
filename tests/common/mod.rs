use std::process::{Command, Output};

#[path = "../../src/port/fake.rs"]
mod fake;

pub(crate) use fake::VirtualPort;

pub const BIN: &str = env!("CARGO_BIN_EXE_open-serial-port");

pub fn run<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(BIN)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Unable to run binary")
}
