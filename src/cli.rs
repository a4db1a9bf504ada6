use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("pi-uploader")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Captures a still photo from the attached camera and uploads it to the backend's hardware image endpoint.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom configuration file (default: config/uploader.yaml)")
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the captured JPEG (default: timestamped file in the temp directory)")
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .help("Skip camera detection and upload a placeholder JPEG")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("keep")
                .long("keep")
                .help("Keep the local file after a successful upload")
                .action(ArgAction::SetTrue)
        )
}
