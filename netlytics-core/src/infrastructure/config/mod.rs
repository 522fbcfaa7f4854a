pub mod project;

pub use project::{find_config_file, load_pipeline_config};
