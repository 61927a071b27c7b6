pub mod formatting;
pub mod path;
pub mod time;

pub use formatting::hours2readable;
