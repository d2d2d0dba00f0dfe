pub mod discovery;
pub mod error;

pub use discovery::{
    ScanOptions, is_meta_backup, is_meta_file, list_asset_files, load_name_records,
};
pub use error::{IngestError, Result};
