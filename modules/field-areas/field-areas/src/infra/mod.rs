pub mod owner_lookup;
pub mod storage;

pub use owner_lookup::DirectoryOwnerLookup;
pub use storage::InMemoryFieldAreaRepository;
