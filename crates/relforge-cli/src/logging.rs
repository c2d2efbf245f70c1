//! Logging setup for the binary. Library crates only ever emit `tracing`
//! events; this is the one place a subscriber gets installed.

#[derive(Debug, Clone, Copy, clap::ValueEnum, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, clap::Args)]
pub struct LogArgs {
    /// Increase verbosity; repeatable (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease verbosity; repeatable.
    #[arg(short = 'q', long = "quiet", action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub format: LogFormat,
}

impl LogArgs {
    fn level(&self) -> &'static str {
        let net = i16::from(self.verbose) - i16::from(self.quiet);
        match net {
            i16::MIN..=-1 => "error",
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

pub fn init_logging(args: &LogArgs) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(args.level())
        .with_target(false);

    match args.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.compact().with_ansi(true).init(),
    }
}
