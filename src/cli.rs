use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "shotclone")]
#[command(author, version, about, long_about = None)]
#[command(about = "Clone the latest Maya ASCII scene of a shot into another shot as v001")]
pub struct Args {
    /// Source shot folder (must contain ep_###, sq_### and sh_###)
    pub source_dir: String,

    /// Destination shot folder (must contain ep_###, sq_### and sh_###)
    pub dest_dir: String,

    /// Overwrite an existing destination file without asking
    #[arg(short, long, conflicts_with = "no_clobber")]
    pub yes: bool,

    /// Never overwrite an existing destination file
    #[arg(short, long)]
    pub no_clobber: bool,

    /// Simulate the clone without touching the filesystem
    #[arg(short, long)]
    pub dry: bool,

    /// Print the result as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
