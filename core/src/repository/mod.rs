pub mod file;
pub mod traits;

// Re-export
pub use file::FileSourceRepository;
pub use traits::SourceRepository;
