use std::path::PathBuf;

use phases::Scan;

use crate::args::Args;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Config file \"{0}\" does not exist")]
    ConfigNotFound(String),
}

/// Settings are like Args, except all the logic has
/// been applied so e.g. the config path is resolved.
#[derive(Debug)]
pub struct Settings {
    pub config: PathBuf,
    pub verbose: u8,
    pub lights: Vec<String>,
    pub scan: Scan,
}

impl TryFrom<Args> for Settings {
    type Error = anyhow::Error;
    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let mut config = PathBuf::from(&args.config);
        if config.exists() {
            config = config.canonicalize()?;
        } else {
            return Err(Error::ConfigNotFound(args.config).into());
        }

        let scan = if args.deep {
            Scan::AnyDepth
        } else {
            Scan::TopLevel
        };

        Ok(Self {
            config,
            verbose: args.verbose,
            lights: args.lights,
            scan,
        })
    }
}
