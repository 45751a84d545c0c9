use std::env;
use std::ffi::OsStr;

use anyhow::Context as _;
use log::{error, info};
use seahorse::{App, Context, Flag, FlagType};

use zeiterfassung::generate_time_sheets;
use zeiterfassung::input::{Config, Settings, VacationRange};

fn set_env_if_absent<K: AsRef<OsStr>, V: AsRef<OsStr>>(var: K, default: impl FnOnce() -> V) {
    if env::var(var.as_ref()).is_err() {
        env::set_var(var, default());
    }
}

fn main() {
    set_env_if_absent("RUST_APP_LOG", || "info");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");

    if let Err(e) = run() {
        error!("{:?}", e);
        ::std::process::exit(1);
    }
}

mod seahorse_exts {
    use std::path::PathBuf;

    use seahorse::Context;

    pub trait ContextExt {
        fn context(&self) -> &Context;

        fn optional_string_flag(&self, name: &str) -> Option<String> {
            self.context().string_flag(name).ok()
        }

        fn optional_path_flag(&self, name: &str) -> Option<PathBuf> {
            self.optional_string_flag(name).map(PathBuf::from)
        }
    }

    impl ContextExt for Context {
        fn context(&self) -> &Context {
            self
        }
    }

    /// Whether `arg` looks like a value of the form `start:end:hours`.
    fn is_triple(arg: &str) -> bool {
        !arg.starts_with('-') && arg.matches(':').count() == 2
    }

    /// seahorse only sees the first occurrence of a flag, so every
    /// `--long <value>...`, `--long=<value>` and `-short <value>...` is
    /// collected into a single `--long <v1>,<v2>` at the end of the arguments.
    ///
    /// After the first value, further `start:end:hours` values are taken as
    /// long as they follow directly.
    pub fn merge_repeated_flag(
        args: Vec<String>,
        long: &str,
        short: &str,
    ) -> anyhow::Result<Vec<String>> {
        let long_flag = format!("--{}", long);
        let short_flag = format!("-{}", short);
        let assignment = format!("{}=", long_flag);

        let mut result = Vec::with_capacity(args.len());
        let mut values = Vec::new();

        let mut args = args.into_iter().peekable();
        while let Some(arg) = args.next() {
            if arg == long_flag || arg == short_flag {
                match args.next() {
                    Some(value) if !value.starts_with('-') => values.push(value),
                    _ => anyhow::bail!("missing value for flag \"{}\"", arg),
                }

                while let Some(value) = args.next_if(|next| is_triple(next)) {
                    values.push(value);
                }
            } else if let Some(value) = arg.strip_prefix(&assignment) {
                values.push(value.to_string());
            } else {
                result.push(arg);
            }
        }

        if !values.is_empty() {
            result.push(long_flag);
            result.push(values.join(","));
        }

        Ok(result)
    }

}

use seahorse_exts::{merge_repeated_flag, ContextExt};

fn build_config(context: &Context) -> anyhow::Result<Config> {
    let (input, anchor) = match context.args.as_slice() {
        [input, anchor] => (input, anchor),
        _ => anyhow::bail!(
            "expected exactly two arguments: <file.csv> <start date:YYYY-MM-DD>, got {}",
            context.args.len()
        ),
    };

    let mut config = Config::try_from_args(input, anchor)?;

    if let Some(path) = context.optional_path_flag("config") {
        let settings = Settings::from_file(&path)
            .with_context(|| format!("failed to load settings from `{}`", path.display()))?;
        config.settings(settings);
    }

    if let Some(vacations) = context.optional_string_flag("vacation") {
        config.vacations(
            VacationRange::parse_list(&vacations)
                .with_context(|| format!("invalid vacation \"{}\"", vacations))?,
        );
    }

    if let Some(output) = context.optional_path_flag("output") {
        config.output_dir(output);
    }

    config
        .compile_pdf(context.bool_flag("pdf"))
        .cleanup(context.bool_flag("cleanup"));

    let config = config.build()?;

    info!("finished building config");

    Ok(config)
}

fn make(context: &Context) -> anyhow::Result<()> {
    let config = build_config(context)?;
    let created = generate_time_sheets(&config)?;

    info!("created {} files", created.len());

    Ok(())
}

fn action(context: &Context) {
    if let Err(e) = make(context) {
        error!("{:?}", e);
        ::std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = merge_repeated_flag(env::args().collect(), "vacation", "v")?;

    let app = App::new(env!("CARGO_PKG_NAME"))
        .description(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .usage(format!(
            "{} [args] <file.csv> <start date:YYYY-MM-DD>",
            env!("CARGO_PKG_NAME")
        ))
        .flag(
            Flag::new("vacation", FlagType::String)
                .description("Vacation as `start:end:hours`, for example `2021-01-18:2021-01-20:8.0`. Takes several values and can be repeated.")
                .alias("v"),
        )
        .flag(
            Flag::new("pdf", FlagType::Bool)
                .description("Compiles the generated tables with latexmk.")
                .alias("p"),
        )
        .flag(
            Flag::new("cleanup", FlagType::Bool)
                .description("Removes the auxiliary LaTeX files. Requires --pdf.")
                .alias("c"),
        )
        .flag(
            Flag::new("output", FlagType::String)
                .description("[optional] Path to the output folder. Default: `.`")
                .alias("o"),
        )
        .flag(
            Flag::new("config", FlagType::String)
                .description("[optional] Path to a settings file (toml)."),
        )
        .action(action);

    app.run(args);

    Ok(())
}
