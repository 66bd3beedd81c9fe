//! Parsing command-line arguments.

use clap::{
    crate_authors, crate_description, crate_name, crate_version,
    error::{ErrorKind, Result as ClapResult},
    value_parser, Arg, ArgAction, ArgMatches, Command,
};
use lifemorph_lib::{Config, Resample};
use std::{
    error::Error as StdError,
    ffi::{OsStr, OsString},
    fs,
    path::{Path, PathBuf},
};

fn positive<T: std::str::FromStr + PartialEq + Default>(s: &str) -> Result<T, String> {
    match s.parse::<T>() {
        Ok(n) if n != T::default() => Ok(n),
        _ => Err(String::from("must be a positive integer")),
    }
}

/// Parses a configuration file. The format is chosen by the extension:
/// `toml`, `yaml` / `yml` or `json`.
///
/// Missing fields take their default values.
pub(crate) fn parse_config(text: &str, format: &str) -> Result<Config, Box<dyn StdError>> {
    let config = match format {
        "toml" => toml::from_str(text)?,
        "yaml" | "yml" => serde_yaml::from_str(text)?,
        "json" => serde_json::from_str(text)?,
        _ => return Err(format!("unsupported config format {:?}", format).into()),
    };
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config, Box<dyn StdError>> {
    let text = fs::read_to_string(path)?;
    let format = path.extension().and_then(OsStr::to_str).unwrap_or_default();
    parse_config(&text, format)
}

fn command() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .long_about(
            "Morphing Conway's Game of Life into a picture\n\
             \n\
             The picture is turned into a target pattern: pixels darker than \
             half gray are alive, the others dead. The animation starts from \
             a random grid on a torus. After every generation, each cell is \
             replaced by the target cell with a probability that starts at \
             10% and grows by 2% every frame, until the grid matches the \
             target or the frames run out.\n\
             \n\
             Grids are printed in Plaintext format:\n\
             * Dead cells are represented by `.`;\n\
             * Living cells are represented by `o`.\n",
        )
        .arg(
            Arg::new("IMAGE")
                .help("Path of the target image")
                .required(true)
                .index(1)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("CONFIG")
                .help("Read settings from a TOML, YAML or JSON file")
                .long_help(
                    "Read settings from a TOML, YAML or JSON file\n\
                     The format is chosen by the file extension. \
                     Command-line options override the file.\n",
                )
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("SIZE")
                .help("Side length of the grid [default: 50]")
                .short('s')
                .long("size")
                .value_parser(positive::<usize>),
        )
        .arg(
            Arg::new("FRAMES")
                .help("Maximal number of frames [default: 100]")
                .short('f')
                .long("frames")
                .value_parser(positive::<u64>),
        )
        .arg(
            Arg::new("SEED")
                .help("Seed of the random number generator")
                .long_help(
                    "Seed of the random number generator\n\
                     The same seed, image and settings always give the same animation.\n",
                )
                .long("seed")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("INTERVAL")
                .help("Milliseconds between frames [default: 200]")
                .short('i')
                .long("interval")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("RESAMPLE")
                .help("How to resize the image to the grid [default: catmull-rom]")
                .long("resample")
                .value_parser(Resample::NAMES),
        )
        .arg(
            Arg::new("ALL")
                .help("Prints every frame instead of only the last one")
                .long_help(
                    "Prints every frame instead of only the last one\n\
                     Only useful when --no-tui is set.\n",
                )
                .short('a')
                .long("all")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("NOTUI")
                .help("Prints the frames to the standard output, without entering the TUI")
                .short('n')
                .long("no-tui")
                .action(ArgAction::SetTrue),
        )
}

/// A struct to store the parse results.
#[derive(Clone, Debug)]
pub(crate) struct Args {
    pub(crate) image: PathBuf,
    pub(crate) config: Config,
    pub(crate) all: bool,
    #[cfg(feature = "tui")]
    pub(crate) no_tui: bool,
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> ClapResult<Self> {
        Self::parse_from(std::env::args_os())
    }

    pub(crate) fn parse_from<I, T>(itr: I) -> ClapResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cmd = command();
        let matches = cmd.try_get_matches_from_mut(itr)?;
        Self::from_matches(&matches).map_err(|e| cmd.error(ErrorKind::InvalidValue, e))
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, Box<dyn StdError>> {
        let mut config = match matches.get_one::<PathBuf>("CONFIG") {
            Some(path) => read_config(path)
                .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?,
            None => Config::default(),
        };

        if let Some(&size) = matches.get_one::<usize>("SIZE") {
            config.size = size;
        }
        if let Some(&max_frames) = matches.get_one::<u64>("FRAMES") {
            config.max_frames = max_frames;
        }
        if let Some(&seed) = matches.get_one::<u64>("SEED") {
            config.seed = Some(seed);
        }
        if let Some(&interval_ms) = matches.get_one::<u64>("INTERVAL") {
            config.interval_ms = interval_ms;
        }
        if let Some(resample) = matches.get_one::<String>("RESAMPLE") {
            config.resample = resample.parse()?;
        }
        config.validate()?;

        let image = matches
            .get_one::<PathBuf>("IMAGE")
            .cloned()
            .ok_or("missing image")?;

        Ok(Args {
            image,
            config,
            all: matches.get_flag("ALL"),
            #[cfg(feature = "tui")]
            no_tui: matches.get_flag("NOTUI"),
        })
    }
}
