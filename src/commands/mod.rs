mod config_cmd;
mod recipe;

pub use config_cmd::ConfigCommand;
pub use recipe::{AddCommand, DeleteCommand, EditCommand, ListCommand, ShowCommand};

use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
