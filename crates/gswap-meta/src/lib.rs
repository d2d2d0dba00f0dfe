//! Unity `.meta` GUID access and GUID swap plans.

pub mod error;
pub mod meta_file;
pub mod plan_file;
pub mod swap;

pub use error::{MetaError, Result};
pub use meta_file::{backup_path_for, meta_path_for, parse_guid, read_guid, replace_guid};
pub use plan_file::{PLAN_FORMAT_VERSION, StoredPlan, load_plan, save_plan};
pub use swap::{ApplyOptions, ApplyReport, apply_plan, build_plan};
