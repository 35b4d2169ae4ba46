mod media_library;

pub use media_library::{LibraryEntry, MediaLibrary, MediaLibraryError};
