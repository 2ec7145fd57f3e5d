mod descriptor;
mod paths;

pub use descriptor::{PackageDescriptor, MODULES_DIR, PACKAGE_DESCRIPTOR_FILE};
pub use paths::{join_lexical, normalize_lexical};
