use clap::Parser;

const CMD_NAME: &str = "tlphases";
const DEFAULT_CONFIG: &str = "tls.add.xml";

/// Stores our command-line args format.
#[derive(Parser)]
#[command(name = CMD_NAME, version, about = None, long_about = None)]
pub struct Args {
    /// Traffic light program file (SUMO network or additional file)
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    #[arg(env = "AIENVS_TLS_CONFIG")]
    pub config: String,

    /// Only show these traffic lights
    #[arg(short, long = "light", value_name = "ID")]
    pub lights: Vec<String>,

    /// Look for tlLogic elements at any depth, not just under the root element
    #[arg(short, long)]
    pub deep: bool,

    /// Print additional debugging info (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
