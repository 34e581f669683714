pub mod checksum;
pub mod links;
pub mod listing;
pub mod pattern;
pub mod resolver;
pub mod walker;

pub use checksum::{Checksum, ChecksumLocator, parse_manifest};
pub use links::{Link, extract_links};
pub use listing::{DirectoryListing, ListingEntry};
pub use pattern::WildcardPattern;
pub use resolver::{DirectoryChoice, resolve_directory, resolve_file};
pub use walker::{DirectoryWalker, ResolvedTarget};
