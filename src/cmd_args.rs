use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Document path
    /// Required. Path of the document, relative to the root directory.
    /// A `drive:` prefix is accepted and ignored when touching the disk.
    #[clap(help = "document path")]
    path: String,

    /// Root directory the contents backend resolves paths against
    #[clap(short = 'r', long, default_value = ".", help = "root directory")]
    root: String,

    /// Settings file. Falls back to DOCBIND_CONFIG_PATH, then ~/.docbind/config
    #[clap(short = 'c', long, help = "settings file")]
    config: Option<String>,

    /// Create the document instead of loading it
    #[clap(short = 'n', long, help = "create a new document", default_value = "false")]
    new: bool,

    /// Text appended through the editor once the document is bound
    #[clap(short = 'a', long, help = "append text through the editor")]
    append: Option<String>,

    /// Save the document before exiting
    #[clap(short = 's', long, help = "save before exiting", default_value = "false")]
    save: bool,

    /// Rename the document before exiting
    #[clap(long, help = "rename the document")]
    rename: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    path: String,
    root: String,
    config: Option<String>,
    new: bool,
    append: Option<String>,
    save: bool,
    rename: Option<String>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            path: args.path,
            root: args.root,
            config: args.config,
            new: args.new,
            append: args.append,
            save: args.save,
            rename: args.rename,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Explicit settings path, if one was given
    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn is_new(&self) -> bool {
        self.new
    }

    pub fn append(&self) -> Option<&str> {
        self.append.as_deref()
    }

    pub fn save(&self) -> bool {
        self.save
    }

    pub fn rename(&self) -> Option<&str> {
        self.rename.as_deref()
    }
}
