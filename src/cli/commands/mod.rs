use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Pure clap command definitions with zero business logic
#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("search")
                .env("BWSWEEP_SEARCH")
                .help("Only delete items matching this search term (passed to `bw list items --search`)")
                .long("search")
                .short('s')
                .value_name("TERM"),
        )
        .arg(
            Arg::new("batch")
                .default_value("1")
                .env("BWSWEEP_BATCH")
                .help("Number of delete operations to run in parallel")
                .long("batch")
                .short('b')
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("permanent")
                .action(ArgAction::SetTrue)
                .env("BWSWEEP_PERMANENT")
                .help("Permanently delete items instead of moving them to the trash")
                .long("permanent")
                .short('P'),
        )
        .arg(
            Arg::new("bw-bin")
                .default_value("bw")
                .env("BWSWEEP_BW_BIN")
                .help("Bitwarden CLI executable to invoke")
                .long("bw-bin")
                .value_name("PATH"),
        )
}
