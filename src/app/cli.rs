//! cli stuff
use {
    crate::{config::options::FolioCfg, theme::{Palette, ThemeMode}},
    clap::{Parser, Subcommand},
    color_eyre::{Report, eyre::Result},
    schemars::generate::SchemaSettings,
    std::{
        fs::OpenOptions,
        io::{BufWriter, Write},
    },
};

/// the CLI
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// What to do, serves the site when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Save instead of printing
    #[arg(long)]
    pub save: bool,

    /// Generate a JSON schemafile based on the defaults
    #[arg(short = 's', long)]
    pub gen_schema: bool,

    /// Generate the default config file
    #[arg(short = 'd', long)]
    pub gen_default: bool,

    /// Generate both the schema and the default config file
    #[arg(short = 'a', long)]
    pub gen_all: bool,
}

/// the subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the site server
    Serve {
        /// Open the site in the default browser once it's up
        #[arg(long)]
        open: bool,
    },

    /// Print the favicon the site would show for a theme
    Favicon {
        /// light or dark
        #[arg(long, default_value_t = ThemeMode::Dark)]
        mode: ThemeMode,

        /// palette id, e.g. palette-3
        #[arg(long, default_value_t = Palette::Default)]
        palette: Palette,
    },

    /// Send a message through a running site's contact form
    Contact {
        /// Sender name
        #[arg(long)]
        name: String,

        /// Sender email
        #[arg(long)]
        email: String,

        /// Message body
        #[arg(long)]
        message: String,

        /// Base url of the site, defaults to the configured server address
        #[arg(long)]
        url: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Self::Serve { open: false }
    }
}

impl Cli {
    /// handle the config generation flags
    ///
    /// returns `true` when one of them ran, in which case nothing else should
    ///
    /// # Errors
    ///
    /// returns an error if it fails to generate and/or save the json schema
    /// returns an error if it fails to generate and/or save the default config
    pub fn run_generators(&self) -> Result<bool> {
        if self.gen_schema || self.gen_all {
            Self::gen_schema(self.save)?;
        }

        if self.gen_default || self.gen_all {
            Self::gen_defaults(self.save)?;
        }

        Ok(self.gen_default || self.gen_all || self.gen_schema)
    }

    /// the subcommand to run
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }

    /// save a string to a file
    ///
    /// # Errors
    ///
    /// returns an error if it fails to open `path`
    pub fn write_to_file(path: &str, contents: &str) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;
        let mut w = BufWriter::new(file);
        w.write_all(contents.as_bytes()).map_err(Report::new)
    }

    /// the config schema as pretty json
    pub fn schema_json() -> Result<String> {
        let settings = SchemaSettings::draft2020_12().for_serialize();
        let generator = settings.into_generator();
        let schema = generator.into_root_schema_for::<FolioCfg>();
        Ok(serde_json::to_string_pretty(&schema)?)
    }

    /// generate/save the config schema
    ///
    /// # Errors
    ///
    /// returns an error if it fails to save the schema to `resources/folio.schema.json`
    pub fn gen_schema(save: bool) -> Result<()> {
        let schema_str = Self::schema_json()?;

        if save {
            Self::write_to_file("resources/folio.schema.json", &schema_str)?;
        } else {
            println!("{}", schema_str);
        }

        Ok(())
    }

    /// generate/save the default config file
    ///
    /// # Errors
    ///
    /// returns an error if it fails to save the default config to `resources/folio.default.toml`
    pub fn gen_defaults(save: bool) -> Result<()> {
        let defaults = toml::to_string_pretty(&FolioCfg::default())?;

        if save {
            Self::write_to_file("resources/folio.default.toml", &defaults)?;
        } else {
            println!("{}", defaults);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_serves() {
        let cli = Cli::try_parse_from(["folio"]).unwrap();
        assert_eq!(cli.command(), Command::Serve { open: false });
    }

    #[test]
    fn test_favicon_args_parse() {
        let cli = Cli::try_parse_from(["folio", "favicon", "--mode", "light", "--palette", "palette-3"])
            .unwrap();

        assert_eq!(
            cli.command(),
            Command::Favicon {
                mode: ThemeMode::Light,
                palette: Palette::Three,
            }
        );
    }

    #[test]
    fn test_unknown_palette_is_rejected() {
        assert!(Cli::try_parse_from(["folio", "favicon", "--palette", "neon"]).is_err());
    }

    #[test]
    fn test_schema_names_sections() {
        let schema = Cli::schema_json().unwrap();

        assert!(schema.contains("\"server\""));
        assert!(schema.contains("\"relay_url\""));
    }
}
