use clap::Parser;

const EPILOG: &str = "\
Unrecognised arguments will be forwarded to `pip list --outdated` and
`pip install`, so you can pass things such as --user, --pre and --timeout
and they will do what you expect. See `pip list -h` and `pip install -h`
for a full overview of the options.";

#[derive(Parser, Debug)]
#[command(
    name = "pip-review",
    about = "Keeps your Python packages fresh - review and upgrade outdated pip packages",
    version,
    author,
    after_help = EPILOG
)]
pub struct Cli {
    /// Show the pip command lines being executed
    #[arg(short, long)]
    pub verbose: bool,

    /// Print raw "name==latest" lines (suitable for passing to pip install)
    #[arg(short, long)]
    pub raw: bool,

    /// Ask interactively whether to install each update
    #[arg(short, long, conflicts_with = "raw")]
    pub interactive: bool,

    /// Automatically install every update found
    #[arg(short, long)]
    pub auto: bool,

    /// Continue with the remaining installs when one fails
    #[arg(short = 'C', long)]
    pub continue_on_fail: bool,

    /// Freeze all outdated packages to "requirements.txt" before upgrading them
    #[arg(long)]
    pub freeze_outdated_packages: bool,

    /// Only check packages matching this name pattern
    #[arg(long, default_value = "", value_name = "PATTERN")]
    pub whitelist: String,

    /// Skip packages matching this name pattern
    #[arg(long, default_value = "", value_name = "PATTERN")]
    pub blacklist: String,

    /// Arguments forwarded to pip (split between `pip list` and `pip install`).
    ///
    /// Capture is trailing: once the first forwarded token is seen, every
    /// later token goes to pip, including ones that spell a pip-review flag.
    /// Put pip-review's own flags before the forwarded ones.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "PIP_ARGS")]
    pub forwarded: Vec<String>,
}
