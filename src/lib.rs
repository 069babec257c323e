pub mod cli;
pub mod compiler;
pub mod io;

pub use cli::*;
pub use io::FileSystemSources;
